use alloc::string::String;

use thiserror::Error;

/// Shared `Result` alias for the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised by [`crate::Collapsible`].
///
/// Only construction can fail in normal use. Once the mirror is built, passes are pure
/// arithmetic over cached widths and cannot fail.
#[derive(Clone, Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The container locator did not resolve to anything.
    #[error("[COL-1001] no container found for locator {locator:?}")]
    ContainerNotFound { locator: String },

    /// The threshold was negative or not finite.
    #[error("[COL-1002] threshold must be a finite value >= 0, got {threshold}")]
    InvalidThreshold { threshold: f64 },

    /// A pass (or open toggle) ran before [`crate::Collapsible::build_mirror`].
    #[error("[COL-2001] overflow mirror has not been built")]
    MirrorNotInitialized,
}

impl Error {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ContainerNotFound { .. } => "COL-1001",
            Self::InvalidThreshold { .. } => "COL-1002",
            Self::MirrorNotInitialized => "COL-2001",
        }
    }

    /// Whether the error aborts construction of the engine.
    #[must_use]
    pub const fn is_construction_error(&self) -> bool {
        matches!(
            self,
            Self::ContainerNotFound { .. } | Self::InvalidThreshold { .. }
        )
    }
}

use alloc::string::String;
use alloc::sync::Arc;

use crate::collapsible::Collapsible;
use crate::{Error, Result};

/// A callback fired after a pass changes what is collapsed, or after the overflow list is
/// opened or closed.
pub type OnChangeCallback<H> = Arc<dyn Fn(&Collapsible<H>) + Send + Sync>;

/// Configuration for [`crate::Collapsible`].
///
/// This type is cheap to clone: the callback is stored in an `Arc`.
pub struct CollapsibleOptions<H = f64> {
    /// Minimum spare width that must remain after all visible items are laid out.
    pub threshold: f64,

    /// Optional callback fired when the engine's visible state changes.
    pub on_change: Option<OnChangeCallback<H>>,
}

impl<H> Clone for CollapsibleOptions<H> {
    fn clone(&self) -> Self {
        Self {
            threshold: self.threshold,
            on_change: self.on_change.clone(),
        }
    }
}

impl<H> CollapsibleOptions<H> {
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            on_change: None,
        }
    }

    pub fn with_on_change(
        mut self,
        on_change: impl Fn(&Collapsible<H>) + Send + Sync + 'static,
    ) -> Self {
        self.on_change = Some(Arc::new(on_change));
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(Error::InvalidThreshold {
                threshold: self.threshold,
            });
        }
        Ok(())
    }
}

impl<H> core::fmt::Debug for CollapsibleOptions<H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CollapsibleOptions")
            .field("threshold", &self.threshold)
            .field("on_change", &self.on_change.as_ref().map(|_| "Fn(..)"))
            .finish()
    }
}

/// Plain-data construction input: where the items live and how much slack to keep.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`, so integrations can
/// load it alongside the rest of their UI configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollapsibleConfig {
    /// Opaque container locator, resolved by the [`crate::ItemSource`].
    pub locator: String,
    pub threshold: f64,
}

impl CollapsibleConfig {
    pub fn new(locator: impl Into<String>, threshold: f64) -> Self {
        Self {
            locator: locator.into(),
            threshold,
        }
    }

    pub fn options<H>(&self) -> CollapsibleOptions<H> {
        CollapsibleOptions::new(self.threshold)
    }
}

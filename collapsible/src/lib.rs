//! A headless overflow-collapse engine for horizontal item lists.
//!
//! For adapter-level utilities (resize subscriptions, rendering surfaces, pass coalescing), see
//! the `collapsible-adapter` crate.
//!
//! When a container is too narrow to show every item at its natural width, the engine collapses
//! a trailing run of items out of the primary list and reveals them in a secondary overflow
//! list. Both lists are projections of one canonical item-state sequence, so they cannot drift.
//!
//! It is UI-agnostic. A TUI/GUI/DOM layer is expected to provide:
//! - the ordered items and their rendered widths (via [`ItemSource`])
//! - the current available width of the measurement boundary on every pass
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod collapsible;
mod error;
mod mirror;
mod options;
mod overflow;
mod registry;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use collapsible::Collapsible;
pub use error::{Error, Result};
pub use mirror::Mirror;
pub use options::{CollapsibleConfig, CollapsibleOptions, OnChangeCallback};
pub use overflow::{collapse_count, renderable_count, required_width};
pub use registry::{ItemRegistry, ItemSource, Measure, StaticSource};
pub use state::OverflowState;
pub use types::{ItemState, Projection};

//! Adapter utilities for the `collapsible` crate.
//!
//! The `collapsible` crate is UI-agnostic and focuses on the overflow math and the canonical
//! item state. This crate provides small, framework-neutral helpers an integration needs to
//! drive it:
//!
//! - A [`Surface`] capability receiving the primary/mirror visibility projections
//! - A [`ResizeSignal`] subscription capability (plus an in-memory [`ManualSignal`])
//! - Single-flight pass scheduling that coalesces resize storms
//! - A [`Controller`] exposing `render()`
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod boundary;
mod controller;
mod scheduler;
mod signal;
mod surface;


pub use boundary::{Boundary, SharedWidth};
pub use controller::{Controller, Rendered};
pub use scheduler::{PassScheduler, PassStats};
pub use signal::{ManualSignal, ManualSubscription, ResizeSignal};
pub use surface::{MemorySurface, Surface};

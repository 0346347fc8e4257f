use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::{Error, Result};

/// A handle whose rendered width can be read.
pub trait Measure {
    fn width(&self) -> f64;
}

impl Measure for f64 {
    fn width(&self) -> f64 {
        *self
    }
}

impl Measure for f32 {
    fn width(&self) -> f64 {
        f64::from(*self)
    }
}

impl Measure for u32 {
    fn width(&self) -> f64 {
        f64::from(*self)
    }
}

impl<T: Measure + ?Sized> Measure for &T {
    fn width(&self) -> f64 {
        (**self).width()
    }
}

/// Resolves a container locator to its immediate list entries.
///
/// This is the only coupling between the engine and a rendering surface: a DOM integration
/// might run a selector query, a TUI might look up a widget id.
pub trait ItemSource {
    type Handle: Measure;

    /// Returns the container's items in document order, or `None` when the locator matches
    /// nothing. An existing but empty container returns `Some(vec![])`.
    fn enumerate(&self, locator: &str) -> Option<Vec<Self::Handle>>;
}

/// An in-memory [`ItemSource`] holding named containers.
#[derive(Clone, Debug)]
pub struct StaticSource<H> {
    containers: Vec<(String, Vec<H>)>,
}

impl<H> Default for StaticSource<H> {
    fn default() -> Self {
        Self {
            containers: Vec::new(),
        }
    }
}

impl<H> StaticSource<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a container.
    pub fn with_container(mut self, locator: impl Into<String>, items: Vec<H>) -> Self {
        let locator = locator.into();
        match self.containers.iter_mut().find(|(l, _)| *l == locator) {
            Some((_, existing)) => *existing = items,
            None => self.containers.push((locator, items)),
        }
        self
    }
}

impl<H: Measure + Clone> ItemSource for StaticSource<H> {
    type Handle = H;

    fn enumerate(&self, locator: &str) -> Option<Vec<H>> {
        self.containers
            .iter()
            .find(|(l, _)| l == locator)
            .map(|(_, items)| items.clone())
    }
}

/// The ordered primary items and their widths, captured once.
///
/// Widths are read from each handle exactly once, at capture time, and are authoritative for the
/// registry's lifetime. Content changes after capture require building a new registry.
#[derive(Clone, Debug)]
pub struct ItemRegistry<H = f64> {
    locator: Option<String>,
    handles: Vec<H>,
    widths: Vec<f64>, // sanitized, >= 0
}

impl<H: Measure> ItemRegistry<H> {
    /// Resolves `locator` through `source` and measures every item.
    pub fn capture<S>(source: &S, locator: &str) -> Result<Self>
    where
        S: ItemSource<Handle = H> + ?Sized,
    {
        let Some(handles) = source.enumerate(locator) else {
            cwarn!(locator, "ItemRegistry::capture: container not found");
            return Err(Error::ContainerNotFound {
                locator: locator.to_string(),
            });
        };
        let mut registry = Self::from_handles(handles);
        registry.locator = Some(locator.to_string());
        cdebug!(locator, count = registry.len(), "ItemRegistry::capture");
        Ok(registry)
    }

    /// Builds a registry from already-enumerated handles.
    pub fn from_handles(handles: Vec<H>) -> Self {
        let widths = handles
            .iter()
            .enumerate()
            .map(|(index, handle)| sanitize_width(index, handle.width()))
            .collect();
        Self {
            locator: None,
            handles,
            widths,
        }
    }
}

impl ItemRegistry<f64> {
    /// Builds a registry from synthetic widths.
    pub fn from_widths(widths: impl IntoIterator<Item = f64>) -> Self {
        Self::from_handles(widths.into_iter().collect())
    }
}

impl<H> ItemRegistry<H> {
    /// The cached widths, in item order.
    pub fn capture_widths(&self) -> &[f64] {
        &self.widths
    }

    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    pub fn handle(&self, index: usize) -> Option<&H> {
        self.handles.get(index)
    }

    pub fn width(&self, index: usize) -> Option<f64> {
        self.widths.get(index).copied()
    }

    /// The locator this registry was captured from, if any.
    pub fn locator(&self) -> Option<&str> {
        self.locator.as_deref()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn total_width(&self) -> f64 {
        self.widths.iter().sum()
    }
}

fn sanitize_width(_index: usize, width: f64) -> f64 {
    if width.is_finite() && width >= 0.0 {
        return width;
    }
    cwarn!(
        index = _index,
        width,
        "ItemRegistry: invalid item width, treating as 0"
    );
    0.0
}

use alloc::rc::Rc;
use core::cell::Cell;

/// The measurement boundary: whatever element bounds the list's layout.
///
/// This is typically the container's parent rather than the container itself, because the
/// container grows to include the overflow control. Which element (or the viewport) to measure
/// is the integration's decision; the engine only consumes the number.
pub trait Boundary {
    fn available_width(&self) -> f64;
}

impl<F: Fn() -> f64> Boundary for F {
    fn available_width(&self) -> f64 {
        self()
    }
}

/// A shared, settable width. Clones observe the same value.
///
/// Useful for hosts that receive the boundary width with their resize events and
/// for tests.
#[derive(Clone, Debug, Default)]
pub struct SharedWidth(Rc<Cell<f64>>);

impl SharedWidth {
    pub fn new(width: f64) -> Self {
        Self(Rc::new(Cell::new(width)))
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn set(&self, width: f64) {
        self.0.set(width);
    }
}

impl Boundary for SharedWidth {
    fn available_width(&self) -> f64 {
        self.get()
    }
}

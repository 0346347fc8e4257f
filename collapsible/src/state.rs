/// A lightweight, serializable snapshot of the engine after the latest pass.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OverflowState {
    /// Number of items in the list.
    pub count: usize,
    /// Number of trailing items currently collapsed into the overflow list (`k`).
    pub collapsed: usize,
    pub overflow_hidden: bool,
    /// Whether the overflow list is expanded by its toggle control.
    pub open: bool,
    /// Available width used by the latest pass, if a pass has run.
    pub last_available_width: Option<f64>,
}

impl OverflowState {
    /// Items shown in the primary list. A snapshot claiming more collapsed items than it holds
    /// reports zero.
    pub fn visible(&self) -> usize {
        self.count.saturating_sub(self.collapsed)
    }

    pub fn is_overflowing(&self) -> bool {
        self.collapsed > 0
    }
}

/// Which rendering of the item list a visibility flag belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Projection {
    /// The inline list inside the container.
    Primary,
    /// The cloned list inside the overflow container.
    Mirror,
}

/// Canonical per-item state. The primary and mirror flags are both derived from `collapsed`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemState {
    pub index: usize,
    /// Width captured at construction (never negative).
    pub width: f64,
    pub collapsed: bool,
}

impl ItemState {
    pub fn hidden_in(&self, projection: Projection) -> bool {
        match projection {
            Projection::Primary => self.collapsed,
            Projection::Mirror => !self.collapsed,
        }
    }
}

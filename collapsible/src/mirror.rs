/// The overflow housing: a toggle control plus a secondary list holding one clone per item.
///
/// The clones' visibility is not stored here. Mirror index `i` is the clone of primary index `i`
/// and is hidden exactly when item `i` is not collapsed, so both lists read the same
/// [`crate::ItemState`] sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mirror {
    len: usize,
    open: bool,
    overflow_hidden: bool,
}

impl Mirror {
    /// A freshly built mirror: every clone hidden, overflow container hidden, list closed.
    pub(crate) fn build(len: usize) -> Self {
        Self {
            len,
            open: false,
            overflow_hidden: true,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether the toggle control has expanded the secondary list.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Whether the overflow container itself (toggle + list) is hidden.
    pub fn overflow_hidden(&self) -> bool {
        self.overflow_hidden
    }

    pub(crate) fn set_open(&mut self, open: bool) -> bool {
        let changed = self.open != open;
        self.open = open;
        changed
    }

    pub(crate) fn set_overflow_hidden(&mut self, hidden: bool) {
        self.overflow_hidden = hidden;
    }
}

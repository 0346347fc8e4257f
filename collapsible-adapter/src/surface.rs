use alloc::vec;
use alloc::vec::Vec;

use collapsible::Projection;

/// The rendering side of an engine: where the primary list, the mirror list and the overflow
/// container actually live.
///
/// A DOM integration would toggle a "hidden" class per node; a TUI integration would flip flags
/// read by its widgets. The controller writes every flag on every pass and then calls
/// [`Surface::commit`], so a surface that batches writes never shows a half-applied pass.
pub trait Surface {
    /// Creates the overflow container (toggle control + secondary list) holding `count` clones
    /// of the primary items, in item order.
    fn build_overflow(&mut self, count: usize);

    fn set_item_hidden(&mut self, projection: Projection, index: usize, hidden: bool);

    fn set_overflow_hidden(&mut self, hidden: bool);

    /// Shows or hides the secondary list inside the overflow container.
    fn set_overflow_open(&mut self, open: bool);

    /// Called after a batch of writes completes.
    fn commit(&mut self) {}
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn build_overflow(&mut self, count: usize) {
        (**self).build_overflow(count);
    }

    fn set_item_hidden(&mut self, projection: Projection, index: usize, hidden: bool) {
        (**self).set_item_hidden(projection, index, hidden);
    }

    fn set_overflow_hidden(&mut self, hidden: bool) {
        (**self).set_overflow_hidden(hidden);
    }

    fn set_overflow_open(&mut self, open: bool) {
        (**self).set_overflow_open(open);
    }

    fn commit(&mut self) {
        (**self).commit();
    }
}

/// An in-memory [`Surface`] that records the flags it receives.
///
/// Headless hosts can render from it directly; tests use it to check what an observer would
/// see after each committed pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySurface {
    primary: Vec<bool>,
    mirror: Vec<bool>,
    overflow_hidden: bool,
    open: bool,
    builds: usize,
    commits: usize,
}

impl MemorySurface {
    /// A surface holding `count` visible primary items and no overflow container yet.
    pub fn new(count: usize) -> Self {
        Self {
            primary: vec![false; count],
            mirror: Vec::new(),
            overflow_hidden: true,
            open: false,
            builds: 0,
            commits: 0,
        }
    }

    pub fn primary_hidden(&self) -> &[bool] {
        &self.primary
    }

    pub fn mirror_hidden(&self) -> &[bool] {
        &self.mirror
    }

    pub fn overflow_hidden(&self) -> bool {
        self.overflow_hidden
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// How many times the overflow container was built.
    pub fn builds(&self) -> usize {
        self.builds
    }

    pub fn commits(&self) -> usize {
        self.commits
    }

    fn flags_mut(&mut self, projection: Projection) -> &mut Vec<bool> {
        match projection {
            Projection::Primary => &mut self.primary,
            Projection::Mirror => &mut self.mirror,
        }
    }
}

impl Surface for MemorySurface {
    fn build_overflow(&mut self, count: usize) {
        self.builds += 1;
        self.primary.resize(count, false);
        self.mirror = vec![true; count];
        self.overflow_hidden = true;
        self.open = false;
    }

    fn set_item_hidden(&mut self, projection: Projection, index: usize, hidden: bool) {
        let flags = self.flags_mut(projection);
        let Some(flag) = flags.get_mut(index) else {
            cwarn!(index, ?projection, "MemorySurface: out-of-bounds item");
            debug_assert!(false, "MemorySurface: out-of-bounds item (i={index})");
            return;
        };
        *flag = hidden;
    }

    fn set_overflow_hidden(&mut self, hidden: bool) {
        self.overflow_hidden = hidden;
    }

    fn set_overflow_open(&mut self, open: bool) {
        self.open = open;
    }

    fn commit(&mut self) {
        self.commits += 1;
    }
}

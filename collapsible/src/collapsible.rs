use alloc::vec::Vec;

use crate::overflow;
use crate::{
    CollapsibleOptions, Error, ItemRegistry, ItemSource, ItemState, Measure, Mirror,
    OverflowState, Projection, Result,
};

/// A headless overflow-collapse engine.
///
/// This type is intentionally UI-agnostic:
/// - It holds the item handles it was given, but never touches a rendering surface.
/// - Your adapter drives it by building the mirror once and calling [`Collapsible::sync`] with
///   the available width on every resize.
/// - Visibility is exposed via zero-allocation projection APIs (`for_each_primary`,
///   `for_each_mirror`).
///
/// For resize subscriptions and pass coalescing, see the `collapsible-adapter` crate.
#[derive(Clone, Debug)]
pub struct Collapsible<H = f64> {
    options: CollapsibleOptions<H>,
    registry: ItemRegistry<H>,
    items: Vec<ItemState>,
    mirror: Option<Mirror>,
    collapsed: usize, // k, always <= items.len()
    last_available_width: Option<f64>,
}

impl<H: Measure> Collapsible<H> {
    /// Resolves `locator` through `source`, captures item widths and validates options.
    ///
    /// Fails with [`Error::ContainerNotFound`] when the locator matches nothing, and with
    /// [`Error::InvalidThreshold`] when the threshold is negative or not finite.
    pub fn new<S>(source: &S, locator: &str, options: CollapsibleOptions<H>) -> Result<Self>
    where
        S: ItemSource<Handle = H> + ?Sized,
    {
        options.validate()?;
        let registry = ItemRegistry::capture(source, locator)?;
        Self::from_registry(registry, options)
    }
}

impl Collapsible<f64> {
    /// Creates an engine over synthetic widths.
    pub fn from_widths(
        widths: impl IntoIterator<Item = f64>,
        options: CollapsibleOptions<f64>,
    ) -> Result<Self> {
        Self::from_registry(ItemRegistry::from_widths(widths), options)
    }
}

impl<H> Collapsible<H> {
    pub fn from_registry(
        registry: ItemRegistry<H>,
        options: CollapsibleOptions<H>,
    ) -> Result<Self> {
        options.validate()?;
        let items = registry
            .capture_widths()
            .iter()
            .enumerate()
            .map(|(index, &width)| ItemState {
                index,
                width,
                collapsed: false,
            })
            .collect();
        cdebug!(
            count = registry.len(),
            threshold = options.threshold,
            "Collapsible::new"
        );
        Ok(Self {
            options,
            registry,
            items,
            mirror: None,
            collapsed: 0,
            last_available_width: None,
        })
    }

    pub fn options(&self) -> &CollapsibleOptions<H> {
        &self.options
    }

    pub fn threshold(&self) -> f64 {
        self.options.threshold
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&Collapsible<H>) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| alloc::sync::Arc::new(f) as _);
    }

    pub fn registry(&self) -> &ItemRegistry<H> {
        &self.registry
    }

    pub fn capture_widths(&self) -> &[f64] {
        self.registry.capture_widths()
    }

    pub fn count(&self) -> usize {
        self.items.len()
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }

    /// Builds the overflow mirror: one hidden clone per item, in item order, inside a hidden
    /// overflow container.
    ///
    /// Runs once per engine. A second call keeps the existing mirror and its state.
    pub fn build_mirror(&mut self) -> &Mirror {
        if self.mirror.is_some() {
            cwarn!("Collapsible::build_mirror called twice; keeping the existing mirror");
        }
        let len = self.items.len();
        self.mirror.get_or_insert_with(|| {
            cdebug!(len, "Collapsible::build_mirror");
            Mirror::build(len)
        })
    }

    pub fn mirror(&self) -> Option<&Mirror> {
        self.mirror.as_ref()
    }

    pub fn is_mirror_built(&self) -> bool {
        self.mirror.is_some()
    }

    /// Computes `k` for `available_width` without applying it.
    pub fn collapse_count_for(&self, available_width: f64) -> usize {
        overflow::collapse_count(
            self.registry.capture_widths(),
            available_width,
            self.options.threshold,
        )
    }

    /// Runs one pass: computes `k` from cached widths and `available_width`, then applies it.
    ///
    /// `available_width` is the width of the measurement boundary (typically the container's
    /// parent), not the container itself, since the container grows to fit the overflow control.
    /// Returns the applied `k`.
    pub fn sync(&mut self, available_width: f64) -> Result<usize> {
        if self.mirror.is_none() {
            return Err(Error::MirrorNotInitialized);
        }
        if available_width.is_nan() {
            cwarn!("Collapsible::sync: available width is NaN, treating as 0");
        }
        let k = self.collapse_count_for(available_width);
        ctrace!(available_width, k, count = self.items.len(), "Collapsible::sync");
        self.last_available_width = Some(available_width);
        self.apply(k)?;
        Ok(k)
    }

    /// Applies a collapse count to both projections and the overflow container.
    ///
    /// Every item is reset first and then the trailing `k` are collapsed, right to left, so the
    /// result depends only on `k` and never on the previous state. `k` larger than the item
    /// count collapses everything.
    pub fn apply(&mut self, k: usize) -> Result<()> {
        let n = self.items.len();
        let k = k.min(n);
        let Some(mirror) = self.mirror.as_mut() else {
            return Err(Error::MirrorNotInitialized);
        };

        let prev_collapsed = self.collapsed;
        let prev_overflow_hidden = mirror.overflow_hidden();

        mirror.set_overflow_hidden(k == 0);

        for item in &mut self.items {
            item.collapsed = false;
        }
        for i in 0..k {
            let idx = n - i - 1;
            self.items[idx].collapsed = true;
        }
        self.collapsed = k;

        if prev_collapsed != k || prev_overflow_hidden != (k == 0) {
            self.notify();
        }
        Ok(())
    }

    /// Number of trailing items currently collapsed (`k`).
    pub fn collapsed_count(&self) -> usize {
        self.collapsed
    }

    pub fn visible_count(&self) -> usize {
        self.items.len() - self.collapsed
    }

    pub fn is_overflowing(&self) -> bool {
        self.collapsed > 0
    }

    pub fn items(&self) -> &[ItemState] {
        &self.items
    }

    pub fn item(&self, index: usize) -> Option<ItemState> {
        self.items.get(index).copied()
    }

    pub fn handle(&self, index: usize) -> Option<&H> {
        self.registry.handle(index)
    }

    pub fn is_hidden(&self, projection: Projection, index: usize) -> Option<bool> {
        self.items.get(index).map(|it| it.hidden_in(projection))
    }

    pub fn primary_hidden(&self, index: usize) -> Option<bool> {
        self.is_hidden(Projection::Primary, index)
    }

    pub fn mirror_hidden(&self, index: usize) -> Option<bool> {
        self.is_hidden(Projection::Mirror, index)
    }

    /// Whether the overflow container is hidden. Before the mirror is built there is nothing to
    /// show, so this is `true`.
    pub fn overflow_hidden(&self) -> bool {
        self.mirror.is_none_or(|m| m.overflow_hidden())
    }

    /// Visits `(index, hidden)` for every item in the given projection, in item order.
    pub fn for_each_in(&self, projection: Projection, mut f: impl FnMut(usize, bool)) {
        for item in &self.items {
            f(item.index, item.hidden_in(projection));
        }
    }

    pub fn for_each_primary(&self, f: impl FnMut(usize, bool)) {
        self.for_each_in(Projection::Primary, f);
    }

    pub fn for_each_mirror(&self, f: impl FnMut(usize, bool)) {
        self.for_each_in(Projection::Mirror, f);
    }

    /// Sum of widths of the items currently shown in the primary list.
    pub fn visible_width(&self) -> f64 {
        self.items
            .iter()
            .filter(|it| !it.collapsed)
            .map(|it| it.width)
            .sum()
    }

    /// Available width needed to show every item; see [`crate::required_width`].
    pub fn required_width(&self) -> f64 {
        overflow::required_width(self.registry.capture_widths(), self.options.threshold)
    }

    pub fn last_available_width(&self) -> Option<f64> {
        self.last_available_width
    }

    pub fn is_open(&self) -> bool {
        self.mirror.is_some_and(|m| m.is_open())
    }

    /// Flips the overflow list's open state (the toggle control's activation). Returns the new
    /// state.
    pub fn toggle_open(&mut self) -> Result<bool> {
        let open = !self.is_open();
        self.set_open(open)?;
        Ok(open)
    }

    pub fn set_open(&mut self, open: bool) -> Result<()> {
        let mirror = self.mirror.as_mut().ok_or(Error::MirrorNotInitialized)?;
        if mirror.set_open(open) {
            ctrace!(open, "Collapsible::set_open");
            self.notify();
        }
        Ok(())
    }

    /// Returns a lightweight snapshot of the current state.
    pub fn state(&self) -> OverflowState {
        OverflowState {
            count: self.items.len(),
            collapsed: self.collapsed,
            overflow_hidden: self.overflow_hidden(),
            open: self.is_open(),
            last_available_width: self.last_available_width,
        }
    }
}

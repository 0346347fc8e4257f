use crate::*;

use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_u64(&mut self, start: u64, end_exclusive: u64) -> u64 {
        debug_assert!(start < end_exclusive);
        let span = end_exclusive - start;
        start + (self.next_u64() % span)
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        self.gen_range_u64(start as u64, end_exclusive as u64) as usize
    }

    fn gen_width(&mut self) -> f64 {
        // Integral widths keep float sums exact.
        self.gen_range_u64(0, 200) as f64
    }
}

fn built(widths: &[f64], threshold: f64) -> Collapsible {
    let opts = CollapsibleOptions::new(threshold);
    let mut c = Collapsible::from_widths(widths.iter().copied(), opts).unwrap();
    c.build_mirror();
    c
}

fn primary_flags(c: &Collapsible) -> Vec<bool> {
    let mut out = Vec::new();
    c.for_each_primary(|_, hidden| out.push(hidden));
    out
}

fn mirror_flags(c: &Collapsible) -> Vec<bool> {
    let mut out = Vec::new();
    c.for_each_mirror(|_, hidden| out.push(hidden));
    out
}

fn assert_invariants(c: &Collapsible) {
    let n = c.count();
    let k = c.collapsed_count();
    assert!(k <= n);
    let primary = primary_flags(c);
    let mirror = mirror_flags(c);
    assert_eq!(primary.len(), n);
    assert_eq!(mirror.len(), n);
    for i in 0..n {
        let trailing = i >= n - k;
        assert_eq!(primary[i], trailing, "primary[{i}] (n={n}, k={k})");
        assert_eq!(mirror[i], !trailing, "mirror[{i}] (n={n}, k={k})");
    }
    assert_eq!(c.overflow_hidden(), k == 0);
}

#[test]
fn scenario_everything_fits() {
    let mut c = built(&[50.0, 50.0, 50.0], 20.0);
    assert_eq!(c.sync(200.0).unwrap(), 0);
    assert!(c.overflow_hidden());
    assert_eq!(primary_flags(&c), vec![false, false, false]);
    assert_eq!(mirror_flags(&c), vec![true, true, true]);
    assert_invariants(&c);
}

#[test]
fn scenario_boundary_is_inclusive_of_threshold() {
    let mut c = built(&[50.0, 50.0, 50.0], 20.0);
    // 120 - 100 == 20 keeps item 1; item 2 leaves -30.
    assert_eq!(c.sync(120.0).unwrap(), 1);
    assert!(!c.overflow_hidden());
    assert_eq!(primary_flags(&c), vec![false, false, true]);
    assert_eq!(mirror_flags(&c), vec![true, true, false]);
    assert_invariants(&c);
}

#[test]
fn scenario_first_item_violates_threshold() {
    let mut c = built(&[50.0, 50.0, 50.0], 20.0);
    assert_eq!(c.sync(40.0).unwrap(), 3);
    assert!(!c.overflow_hidden());
    assert_eq!(primary_flags(&c), vec![true, true, true]);
    assert_eq!(mirror_flags(&c), vec![false, false, false]);
    assert_eq!(c.visible_count(), 0);
}

#[test]
fn scenario_empty_list_never_overflows() {
    let mut c = built(&[], 20.0);
    assert!(c.mirror().unwrap().is_empty());
    for w in [0.0, -10.0, 40.0, 1e9] {
        assert_eq!(c.sync(w).unwrap(), 0);
        assert!(c.overflow_hidden());
    }
    assert!(primary_flags(&c).is_empty());
    assert!(mirror_flags(&c).is_empty());
}

#[test]
fn scenario_repeated_pass_is_idempotent() {
    let mut c = built(&[50.0, 50.0, 50.0], 20.0);
    c.sync(120.0).unwrap();
    let once = (primary_flags(&c), mirror_flags(&c), c.state());
    c.sync(120.0).unwrap();
    let twice = (primary_flags(&c), mirror_flags(&c), c.state());
    assert_eq!(once, twice);
}

#[test]
fn collapse_count_matches_scenarios() {
    let widths = [50.0, 50.0, 50.0];
    assert_eq!(collapse_count(&widths, 200.0, 20.0), 0);
    assert_eq!(collapse_count(&widths, 120.0, 20.0), 1);
    assert_eq!(collapse_count(&widths, 40.0, 20.0), 3);
    assert_eq!(collapse_count(&[], 40.0, 20.0), 0);
    assert_eq!(renderable_count(&widths, 120.0, 20.0), 2);
}

#[test]
fn non_positive_available_width_collapses_everything() {
    let widths = [10.0, 20.0];
    assert_eq!(collapse_count(&widths, 0.0, 0.0), 2);
    assert_eq!(collapse_count(&widths, -50.0, 5.0), 2);
    assert_eq!(collapse_count(&widths, f64::NEG_INFINITY, 0.0), 2);
}

#[test]
fn nan_available_width_is_treated_as_zero() {
    assert_eq!(collapse_count(&[10.0, 20.0], f64::NAN, 0.0), 2);
    // Zero-width items still fit in zero space with a zero threshold.
    assert_eq!(collapse_count(&[0.0, 0.0], f64::NAN, 0.0), 0);
}

#[test]
fn infinite_available_width_keeps_everything() {
    assert_eq!(collapse_count(&[10.0, 20.0], f64::INFINITY, 1000.0), 0);
}

#[test]
fn walk_stops_at_first_violation_even_if_later_items_are_empty() {
    // Item 1 violates; item 2 would "fit" on its own but is never considered.
    assert_eq!(collapse_count(&[10.0, 100.0, 0.0], 50.0, 0.0), 2);
}

#[test]
fn apply_is_independent_of_previous_state() {
    let mut c = built(&[10.0; 6], 0.0);
    c.apply(5).unwrap();
    c.apply(2).unwrap();
    let from_five = (primary_flags(&c), mirror_flags(&c));

    let mut fresh = built(&[10.0; 6], 0.0);
    fresh.apply(2).unwrap();
    assert_eq!(from_five, (primary_flags(&fresh), mirror_flags(&fresh)));
    assert_invariants(&c);
}

#[test]
fn apply_clamps_k_to_item_count() {
    let mut c = built(&[10.0, 10.0], 0.0);
    c.apply(99).unwrap();
    assert_eq!(c.collapsed_count(), 2);
    assert_invariants(&c);
}

#[test]
fn collapse_order_is_right_to_left() {
    let mut c = built(&[10.0, 10.0, 10.0, 10.0], 0.0);
    c.sync(30.0).unwrap();
    assert_eq!(c.collapsed_count(), 1);
    assert_eq!(c.item(3).map(|it| it.collapsed), Some(true));
    c.sync(20.0).unwrap();
    assert_eq!(c.collapsed_count(), 2);
    assert_eq!(c.item(2).map(|it| it.collapsed), Some(true));
    assert_eq!(c.item(1).map(|it| it.collapsed), Some(false));
}

#[test]
fn sync_before_mirror_is_an_error() {
    let mut c = Collapsible::from_widths([10.0], CollapsibleOptions::new(0.0)).unwrap();
    assert_eq!(c.sync(100.0), Err(Error::MirrorNotInitialized));
    assert_eq!(c.apply(0), Err(Error::MirrorNotInitialized));
    assert_eq!(c.toggle_open(), Err(Error::MirrorNotInitialized));
    assert_eq!(c.collapsed_count(), 0);
    assert!(c.overflow_hidden());
    assert_eq!(Error::MirrorNotInitialized.code(), "COL-2001");
    assert!(!Error::MirrorNotInitialized.is_construction_error());
}

#[test]
fn build_mirror_starts_hidden_and_twice_keeps_state() {
    let mut c = built(&[50.0, 50.0], 0.0);
    assert!(mirror_flags(&c).iter().all(|&h| h));
    assert!(c.overflow_hidden());
    assert_eq!(c.mirror().map(Mirror::len), Some(2));

    c.sync(60.0).unwrap();
    c.toggle_open().unwrap();
    let before = c.state();
    c.build_mirror();
    assert_eq!(c.state(), before);
}

#[test]
fn container_not_found_aborts_construction() {
    let source = StaticSource::new().with_container("#nav", vec![10.0, 20.0]);
    let err = Collapsible::new(&source, "#missing", CollapsibleOptions::new(0.0)).unwrap_err();
    assert_eq!(
        err,
        Error::ContainerNotFound {
            locator: "#missing".to_string()
        }
    );
    assert_eq!(err.code(), "COL-1001");
    assert!(err.is_construction_error());
    assert!(err.to_string().contains("#missing"));
}

#[test]
fn new_captures_widths_from_source() {
    let source = StaticSource::new()
        .with_container("#nav", vec![10.0f32, 20.5])
        .with_container("#side", vec![1.0f32]);
    let c = Collapsible::new(&source, "#nav", CollapsibleOptions::new(4.0)).unwrap();
    assert_eq!(c.capture_widths(), &[10.0, 20.5]);
    assert_eq!(c.registry().locator(), Some("#nav"));
    assert_eq!(c.handle(1), Some(&20.5f32));
    assert_eq!(c.required_width(), 34.5);
}

#[test]
fn empty_container_is_not_an_error() {
    let source = StaticSource::<f64>::new().with_container("#nav", vec![]);
    let c = Collapsible::new(&source, "#nav", CollapsibleOptions::new(0.0)).unwrap();
    assert_eq!(c.count(), 0);
}

#[test]
fn invalid_threshold_is_rejected() {
    for threshold in [-1.0, f64::NAN, f64::INFINITY] {
        let err = Collapsible::from_widths([10.0], CollapsibleOptions::new(threshold)).unwrap_err();
        assert_eq!(err.code(), "COL-1002");
    }
    assert!(Collapsible::from_widths([10.0], CollapsibleOptions::new(0.0)).is_ok());
}

#[test]
fn invalid_widths_are_cached_as_zero() {
    let registry = ItemRegistry::from_widths([10.0, -5.0, f64::NAN, f64::INFINITY, 3.0]);
    assert_eq!(registry.capture_widths(), &[10.0, 0.0, 0.0, 0.0, 3.0]);
    assert_eq!(registry.total_width(), 13.0);
}

#[derive(Clone, Debug)]
struct CountingHandle {
    width: f64,
    reads: Arc<AtomicUsize>,
}

impl Measure for CountingHandle {
    fn width(&self) -> f64 {
        self.reads.fetch_add(1, Ordering::Relaxed);
        self.width
    }
}

#[test]
fn widths_are_measured_once() {
    let reads = Arc::new(AtomicUsize::new(0));
    let handles = (0..4)
        .map(|i| CountingHandle {
            width: 10.0 * (i + 1) as f64,
            reads: Arc::clone(&reads),
        })
        .collect::<Vec<_>>();
    let source = StaticSource::new().with_container("nav", handles);
    let mut c = Collapsible::new(&source, "nav", CollapsibleOptions::new(0.0)).unwrap();
    c.build_mirror();
    for w in [100.0, 50.0, 10.0, 0.0, 1000.0] {
        c.sync(w).unwrap();
    }
    assert_eq!(reads.load(Ordering::Relaxed), 4);
}

#[test]
fn on_change_fires_only_when_visible_state_changes() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_cb = Arc::clone(&calls);
    let opts = CollapsibleOptions::new(0.0).with_on_change(move |_c: &Collapsible| {
        calls_in_cb.fetch_add(1, Ordering::Relaxed);
    });
    let mut c = Collapsible::from_widths([10.0, 10.0, 10.0], opts).unwrap();
    c.build_mirror();

    c.sync(100.0).unwrap(); // k stays 0
    assert_eq!(calls.load(Ordering::Relaxed), 0);
    c.sync(25.0).unwrap(); // k = 1
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    c.sync(25.0).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 1);
    c.toggle_open().unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 2);
    c.set_open(true).unwrap();
    assert_eq!(calls.load(Ordering::Relaxed), 2);
}

#[test]
fn on_change_observes_completed_pass() {
    let opts = CollapsibleOptions::new(0.0).with_on_change(|c: &Collapsible| {
        let n = c.count();
        let k = c.collapsed_count();
        for i in 0..n {
            assert_eq!(c.primary_hidden(i), Some(i >= n - k));
            assert_eq!(c.mirror_hidden(i), Some(i < n - k));
        }
        assert_eq!(c.overflow_hidden(), k == 0);
    });
    let mut c = Collapsible::from_widths([10.0; 5], opts).unwrap();
    c.build_mirror();
    for w in [45.0, 10.0, 100.0, 0.0, 30.0] {
        c.sync(w).unwrap();
    }
}

#[test]
fn state_snapshot_reports_latest_pass() {
    let mut c = built(&[30.0, 30.0, 30.0], 10.0);
    assert_eq!(c.state().last_available_width, None);
    c.sync(55.0).unwrap();
    let s = c.state();
    assert_eq!(s.count, 3);
    assert_eq!(s.collapsed, 2);
    assert_eq!(s.visible(), 1);
    assert!(s.is_overflowing());
    assert!(!s.overflow_hidden);
    assert!(!s.open);
    assert_eq!(s.last_available_width, Some(55.0));
    assert_eq!(c.visible_width(), 30.0);
}

#[test]
fn inconsistent_snapshot_reports_no_visible_items() {
    let s = OverflowState {
        count: 1,
        collapsed: 3,
        ..OverflowState::default()
    };
    assert_eq!(s.visible(), 0);
    assert!(s.is_overflowing());
}

#[test]
fn config_builds_options() {
    let cfg = CollapsibleConfig::new(".navbar", 12.0);
    let opts: CollapsibleOptions = cfg.options();
    assert_eq!(opts.threshold, 12.0);
    assert!(opts.on_change.is_none());
}

#[test]
fn randomized_invariants_and_monotonicity() {
    let mut rng = Lcg::new(0x5eed);
    for _ in 0..200 {
        let n = rng.gen_range_usize(0, 12);
        let widths = (0..n).map(|_| rng.gen_width()).collect::<Vec<_>>();
        let threshold = rng.gen_range_u64(0, 50) as f64;
        let mut c = built(&widths, threshold);

        let mut available = required_width(&widths, threshold) + 100.0;
        let mut last_k = 0usize;
        while available > -50.0 {
            let k = c.sync(available).unwrap();
            assert_eq!(k, collapse_count(&widths, available, threshold));
            assert!(k >= last_k, "k decreased as width shrank");
            assert_invariants(&c);
            last_k = k;
            available -= rng.gen_range_u64(1, 40) as f64;
        }
        assert_eq!(last_k, n);
    }
}

#[test]
fn randomized_passes_converge_regardless_of_history() {
    let mut rng = Lcg::new(42);
    let widths = (0..10).map(|_| rng.gen_width()).collect::<Vec<_>>();
    let mut c = built(&widths, 8.0);
    for _ in 0..100 {
        let target = rng.gen_range_u64(0, 2000) as f64;
        let noise = rng.gen_range_u64(0, 2000) as f64;
        c.sync(noise).unwrap();
        c.sync(target).unwrap();
        let mut fresh = built(&widths, 8.0);
        fresh.sync(target).unwrap();
        assert_eq!(primary_flags(&c), primary_flags(&fresh));
        assert_eq!(mirror_flags(&c), mirror_flags(&fresh));
        assert_eq!(c.overflow_hidden(), fresh.overflow_hidden());
    }
}

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

/// A source of "the boundary's size may have changed" notifications.
///
/// The engine does not care how notifications are produced (resize observers, terminal
/// `SIGWINCH`, window events), only that the callback is eventually invoked after
/// layout-affecting changes. Dropping the returned subscription releases it.
pub trait ResizeSignal {
    type Subscription;

    fn on_size_change(&mut self, callback: Box<dyn FnMut()>) -> Self::Subscription;
}

struct Slot {
    alive: Rc<Cell<bool>>,
    callback: Box<dyn FnMut()>,
}

#[derive(Default)]
struct SignalInner {
    slots: RefCell<Vec<Slot>>,
    // Liveness flags of the slots taken out for the running dispatch round.
    in_flight: RefCell<Vec<Rc<Cell<bool>>>>,
    dispatching: Cell<bool>,
    redispatch: Cell<bool>,
}

struct DispatchGuard<'a>(&'a SignalInner);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.redispatch.set(false);
        self.0.dispatching.set(false);
    }
}

/// One dispatch round. Dropping it, even while unwinding from a callback, puts the taken slots
/// back ahead of any subscribed during the round.
struct Round<'a> {
    inner: &'a SignalInner,
    slots: Vec<Slot>,
}

impl<'a> Round<'a> {
    fn take(inner: &'a SignalInner) -> Self {
        let slots = core::mem::take(&mut *inner.slots.borrow_mut());
        *inner.in_flight.borrow_mut() = slots.iter().map(|s| Rc::clone(&s.alive)).collect();
        Self { inner, slots }
    }

    fn dispatch(&mut self) {
        for slot in &mut self.slots {
            if slot.alive.get() {
                (slot.callback)();
            }
        }
    }
}

impl Drop for Round<'_> {
    fn drop(&mut self) {
        let mut slots = core::mem::take(&mut self.slots);
        let mut live = self.inner.slots.borrow_mut();
        slots.append(&mut live);
        slots.retain(|s| s.alive.get());
        *live = slots;
        self.inner.in_flight.borrow_mut().clear();
    }
}

/// An in-memory [`ResizeSignal`]: the host calls [`ManualSignal::notify`] from whatever event
/// it receives.
///
/// Clones share the same subscriber list.
#[derive(Clone, Default)]
pub struct ManualSignal {
    inner: Rc<SignalInner>,
}

impl ManualSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions, including those being dispatched right now.
    pub fn subscriber_count(&self) -> usize {
        let inner = &self.inner;
        let live = inner.slots.borrow().iter().filter(|s| s.alive.get()).count();
        let in_flight = inner.in_flight.borrow().iter().filter(|a| a.get()).count();
        live + in_flight
    }

    /// Invokes every live callback, in subscription order.
    ///
    /// Calling `notify` from inside a callback schedules one more dispatch round after the
    /// current one instead of recursing. A panicking callback aborts the round but leaves the
    /// signal usable.
    pub fn notify(&self) {
        let inner = &*self.inner;
        if inner.dispatching.replace(true) {
            inner.redispatch.set(true);
            return;
        }
        let _guard = DispatchGuard(inner);
        loop {
            Round::take(inner).dispatch();
            if !inner.redispatch.replace(false) {
                break;
            }
        }
    }
}

impl ResizeSignal for ManualSignal {
    type Subscription = ManualSubscription;

    fn on_size_change(&mut self, callback: Box<dyn FnMut()>) -> ManualSubscription {
        let alive = Rc::new(Cell::new(true));
        self.inner.slots.borrow_mut().push(Slot {
            alive: Rc::clone(&alive),
            callback,
        });
        ManualSubscription { alive }
    }
}

impl fmt::Debug for ManualSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualSignal")
            .field("subscribers", &self.subscriber_count())
            .field("dispatching", &self.inner.dispatching.get())
            .finish()
    }
}

/// A live [`ManualSignal`] subscription. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
#[derive(Debug)]
pub struct ManualSubscription {
    alive: Rc<Cell<bool>>,
}

impl ManualSubscription {
    pub fn is_active(&self) -> bool {
        self.alive.get()
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for ManualSubscription {
    fn drop(&mut self) {
        self.alive.set(false);
    }
}

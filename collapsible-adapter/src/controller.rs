use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;

use collapsible::{Collapsible, OverflowState, Projection, Result};

use crate::{Boundary, PassScheduler, PassStats, ResizeSignal, Surface};

/// A framework-neutral controller that wraps a `collapsible::Collapsible` and keeps a
/// [`Surface`] in sync with it.
///
/// This type does not hold any UI objects beyond the surface it was given. Adapters drive it
/// either manually (`build` once, then `pass` on every resize) or by calling
/// [`Controller::render`], which subscribes to a [`ResizeSignal`] and serializes passes.
#[derive(Clone, Debug)]
pub struct Controller<H, B, R> {
    engine: Collapsible<H>,
    boundary: B,
    surface: R,
}

impl<H, B: Boundary, R: Surface> Controller<H, B, R> {
    pub fn new(engine: Collapsible<H>, boundary: B, surface: R) -> Self {
        Self {
            engine,
            boundary,
            surface,
        }
    }

    pub fn engine(&self) -> &Collapsible<H> {
        &self.engine
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut R {
        &mut self.surface
    }

    pub fn into_parts(self) -> (Collapsible<H>, B, R) {
        (self.engine, self.boundary, self.surface)
    }

    /// Builds the overflow mirror in the engine and on the surface.
    ///
    /// Runs once; later calls are ignored.
    pub fn build(&mut self) {
        if self.engine.is_mirror_built() {
            cwarn!("Controller::build called twice; keeping the existing overflow");
            return;
        }
        let count = self.engine.build_mirror().len();
        self.surface.build_overflow(count);
        self.flush();
    }

    /// Runs one pass: reads the boundary width, recomputes `k`, then writes every flag to the
    /// surface. Returns the applied `k`.
    pub fn pass(&mut self) -> Result<usize> {
        let available_width = self.boundary.available_width();
        let k = self.engine.sync(available_width)?;
        self.flush();
        Ok(k)
    }

    /// Flips the overflow list's open state and mirrors it onto the surface.
    pub fn toggle_open(&mut self) -> Result<bool> {
        let open = self.engine.toggle_open()?;
        self.surface.set_overflow_open(open);
        self.surface.commit();
        Ok(open)
    }

    fn flush(&mut self) {
        let engine = &self.engine;
        let surface = &mut self.surface;
        for item in engine.items() {
            surface.set_item_hidden(Projection::Primary, item.index, item.collapsed);
            surface.set_item_hidden(Projection::Mirror, item.index, !item.collapsed);
        }
        surface.set_overflow_hidden(engine.overflow_hidden());
        surface.set_overflow_open(engine.is_open());
        surface.commit();
    }

    /// Builds the mirror, runs the initial pass, then subscribes to `signal` for every later
    /// pass.
    ///
    /// Consumes the controller, so the mirror is built exactly once. Dropping the returned
    /// [`Rendered`] releases the subscription.
    pub fn render<S>(mut self, signal: &mut S) -> Result<Rendered<H, B, R, S::Subscription>>
    where
        S: ResizeSignal + ?Sized,
        H: 'static,
        B: 'static,
        R: 'static,
    {
        self.build();
        let shared = Rc::new(Shared {
            scheduler: PassScheduler::new(),
            controller: RefCell::new(self),
        });
        if let Some(Err(err)) = shared.request_pass() {
            return Err(err);
        }

        let weak = Rc::downgrade(&shared);
        let subscription = signal.on_size_change(Box::new(move || {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            if let Some(Err(_err)) = shared.request_pass() {
                cwarn!(error = %_err, "resize pass failed");
            }
        }));
        cdebug!("Controller::render: subscribed to size changes");

        Ok(Rendered {
            shared,
            subscription,
        })
    }
}

struct Shared<H, B, R> {
    scheduler: PassScheduler,
    controller: RefCell<Controller<H, B, R>>,
}

impl<H, B: Boundary, R: Surface> Shared<H, B, R> {
    // The controller is only ever borrowed while the scheduler is running, so a pass started
    // through `run` never finds it borrowed.
    fn request_pass(&self) -> Option<Result<usize>> {
        self.scheduler.run(|| self.controller.borrow_mut().pass())
    }

    fn exclusive<T>(
        &self,
        f: impl FnOnce(&RefCell<Controller<H, B, R>>) -> Option<T>,
    ) -> Option<T> {
        let (out, follow_up) = self
            .scheduler
            .exclusive(|| f(&self.controller), || self.controller.borrow_mut().pass())?;
        if let Some(Err(_err)) = follow_up {
            cwarn!(error = %_err, "deferred resize pass failed");
        }
        out
    }
}

/// A rendered controller: the initial pass has run and size changes trigger further passes.
///
/// Passes never interleave. A size change (or [`Rendered::refresh`]) arriving while a pass or a
/// `with_*` call is running is coalesced into a single follow-up pass.
pub struct Rendered<H, B, R, Sub> {
    shared: Rc<Shared<H, B, R>>,
    subscription: Sub,
}

impl<H, B: Boundary, R: Surface, Sub> Rendered<H, B, R, Sub> {
    /// Requests a pass now, as if the size-change signal fired.
    ///
    /// Returns `None` when a pass is already running; that pass re-runs once before returning.
    pub fn refresh(&self) -> Option<Result<usize>> {
        self.shared.request_pass()
    }

    /// Runs `f` against the controller. Returns `None` while a pass is running.
    ///
    /// Size changes signalled while `f` runs are deferred into one pass that runs right after
    /// `f` returns.
    pub fn with_controller<T>(&self, f: impl FnOnce(&mut Controller<H, B, R>) -> T) -> Option<T> {
        self.shared.exclusive(|controller| {
            let mut controller = controller.try_borrow_mut().ok()?;
            Some(f(&mut controller))
        })
    }

    pub fn with_engine<T>(&self, f: impl FnOnce(&Collapsible<H>) -> T) -> Option<T> {
        self.shared.exclusive(|controller| {
            let controller = controller.try_borrow().ok()?;
            Some(f(controller.engine()))
        })
    }

    pub fn with_surface<T>(&self, f: impl FnOnce(&R) -> T) -> Option<T> {
        self.shared.exclusive(|controller| {
            let controller = controller.try_borrow().ok()?;
            Some(f(controller.surface()))
        })
    }

    pub fn toggle_open(&self) -> Option<Result<bool>> {
        self.with_controller(Controller::toggle_open)
    }

    pub fn state(&self) -> Option<OverflowState> {
        self.with_engine(Collapsible::state)
    }

    pub fn stats(&self) -> PassStats {
        self.shared.scheduler.stats()
    }

    pub fn subscription(&self) -> &Sub {
        &self.subscription
    }

    /// Releases the size-change subscription and returns the controller.
    ///
    /// Returns `None` if called while a pass is running.
    pub fn into_controller(self) -> Option<Controller<H, B, R>> {
        let Rendered {
            shared,
            subscription,
        } = self;
        drop(subscription);
        Rc::try_unwrap(shared)
            .ok()
            .map(|shared| shared.controller.into_inner())
    }
}

impl<H, B, R, Sub> fmt::Debug for Rendered<H, B, R, Sub> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rendered")
            .field("stats", &self.shared.scheduler.stats())
            .field("running", &self.shared.scheduler.is_running())
            .finish_non_exhaustive()
    }
}

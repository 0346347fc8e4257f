use core::cell::Cell;

/// Pass counters for one engine.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PassStats {
    /// Passes run to completion.
    pub passes: u64,
    /// Requests absorbed into an already-pending pass.
    pub coalesced: u64,
}

/// Serializes passes for one engine.
///
/// - Single-flight: at most one pass runs at a time.
/// - At most one pending pass: requests arriving while a pass runs collapse into a single
///   follow-up pass, started as soon as the running pass completes.
///
/// This is a single-threaded scheduler. Re-entrant requests (from callbacks fired during a
/// pass) are the only way to observe a running pass.
#[derive(Debug, Default)]
pub struct PassScheduler {
    running: Cell<bool>,
    pending: Cell<bool>,
    passes: Cell<u64>,
    coalesced: Cell<u64>,
}

struct RunningGuard<'a>(&'a Cell<bool>);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl PassScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.get()
    }

    pub fn stats(&self) -> PassStats {
        PassStats {
            passes: self.passes.get(),
            coalesced: self.coalesced.get(),
        }
    }

    /// Runs `pass` now and returns the result of the last pass it ran.
    ///
    /// If a pass is already running, records a pending re-run and returns `None`; the running
    /// call then re-runs `pass` until no request is pending.
    pub fn run<T>(&self, mut pass: impl FnMut() -> T) -> Option<T> {
        if self.running.get() {
            if self.pending.replace(true) {
                self.coalesced.set(self.coalesced.get().saturating_add(1));
            }
            ctrace!("PassScheduler::run: pass in progress, deferring");
            return None;
        }

        self.running.set(true);
        let _guard = RunningGuard(&self.running);
        loop {
            let out = pass();
            self.passes.set(self.passes.get().saturating_add(1));
            if !self.pending.replace(false) {
                return Some(out);
            }
        }
    }

    /// Runs `f` in the single-flight slot without counting it as a pass.
    ///
    /// Requests arriving while `f` runs are deferred as usual and drained with `pass` once `f`
    /// returns. Returns `None` without calling `f` if a pass is already running; otherwise
    /// returns `f`'s output and the follow-up pass result, if one ran.
    pub fn exclusive<T, U>(
        &self,
        f: impl FnOnce() -> T,
        pass: impl FnMut() -> U,
    ) -> Option<(T, Option<U>)> {
        if self.running.get() {
            return None;
        }

        let out = {
            self.running.set(true);
            let _guard = RunningGuard(&self.running);
            f()
        };
        let follow_up = if self.pending.replace(false) {
            ctrace!("PassScheduler::exclusive: draining deferred pass");
            self.run(pass)
        } else {
            None
        };
        Some((out, follow_up))
    }
}

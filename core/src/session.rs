use crate::*;

/// Source of delayed tasks used to flip a mismatched pair back.
///
/// Dropping a [`Scheduler::Task`] must cancel it, so a session that goes away never has its reset run against a
/// discarded board.
pub trait Scheduler {
    type Task;

    fn schedule(&mut self, delay_ms: u32) -> Self::Task;
}

/// Receiver for the three lifecycle events of a match session.
pub trait MatchListener {
    fn on_successful_match(&mut self) {}

    fn on_failed_match(&mut self) {}

    fn on_all_matched(&mut self) {}

    fn on_event(&mut self, event: MatchEvent) {
        match event {
            MatchEvent::SuccessfulMatch => self.on_successful_match(),
            MatchEvent::FailedMatch => self.on_failed_match(),
            MatchEvent::AllMatched => self.on_all_matched(),
        }
    }
}

impl MatchListener for alloc::vec::Vec<MatchEvent> {
    fn on_event(&mut self, event: MatchEvent) {
        self.push(event);
    }
}

impl MatchListener for () {}

/// A match engine together with the single pending mismatch reset it may be waiting on.
pub struct MatchSession<S: Scheduler> {
    engine: MatchEngine,
    mismatch_delay_ms: u32,
    scheduler: S,
    pending: Option<S::Task>,
}

impl<S: Scheduler> MatchSession<S> {
    pub fn new(engine: MatchEngine, mismatch_delay_ms: u32, scheduler: S) -> Self {
        Self {
            engine,
            mismatch_delay_ms,
            scheduler,
            pending: None,
        }
    }

    pub fn engine(&self) -> &MatchEngine {
        &self.engine
    }

    pub fn mismatch_delay_ms(&self) -> u32 {
        self.mismatch_delay_ms
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pick(&mut self, coords: Coord2, listener: &mut impl MatchListener) -> PickOutcome {
        let outcome = self.engine.pick(coords);
        if matches!(outcome, PickOutcome::Mismatched) {
            debug_assert!(self.pending.is_none(), "the input gate allows one reset");
            self.pending = Some(self.scheduler.schedule(self.mismatch_delay_ms));
        }
        Self::dispatch(outcome, listener);
        outcome
    }

    /// Runs the pending mismatch reset, to be called once the scheduled task fires.
    pub fn fire_pending(&mut self, listener: &mut impl MatchListener) -> PickOutcome {
        if self.pending.take().is_none() {
            log::debug!("no pending reset to fire");
            return PickOutcome::NoChange;
        }
        let outcome = self.engine.complete_mismatch();
        Self::dispatch(outcome, listener);
        outcome
    }

    /// Drops the pending reset without touching the board.
    pub fn cancel_pending(&mut self) -> bool {
        let cancelled = self.pending.take().is_some();
        if cancelled {
            log::debug!("cancelled pending reset");
        }
        cancelled
    }

    fn dispatch(outcome: PickOutcome, listener: &mut impl MatchListener) {
        for event in outcome.events() {
            listener.on_event(event);
        }
    }
}

impl<S: Scheduler> core::fmt::Debug for MatchSession<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MatchSession")
            .field("engine", &self.engine)
            .field("mismatch_delay_ms", &self.mismatch_delay_ms)
            .field("pending", &self.pending.is_some())
            .finish_non_exhaustive()
    }
}

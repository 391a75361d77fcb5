//! Playback controller for stepping through a recorded trace.
//!
//! The controller owns the cursor, the phase and at most one pending
//! timer. It is driven from outside: transport calls change state
//! immediately, and [`PlaybackController::tick`] fires the pending timer
//! once the clock has passed its due instant.

use std::sync::Arc;
use std::time::{Duration, Instant};

use stepwise_core::{Step, Trace};

use crate::clock::{Clock, SystemClock};
use crate::error::{PlaybackError, Result};
use crate::events::{PlaybackUpdate, SubscriptionId, Subscribers, UpdateCause};
use crate::phase::{Phase, Transport};

/// Generation number of a scheduled timer.
///
/// Every schedule gets a fresh id, so a timer that was cancelled or
/// superseded can be recognised and ignored if it still fires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

/// The single scheduled advance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due: Instant,
}

/// Everything observable about playback at one instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlaybackState {
    pub phase: Phase,
    pub cursor: usize,
    /// Delay between steps, in milliseconds. Always positive.
    pub speed_ms: u64,
    pub pending: Option<PendingTimer>,
}

/// Transport state machine over an immutable trace.
pub struct PlaybackController<P, C = SystemClock> {
    trace: Arc<Trace<P>>,
    clock: C,
    state: PlaybackState,
    next_timer: u64,
    subscribers: Subscribers<P>,
    disposed: bool,
}

impl<P> PlaybackController<P, SystemClock> {
    /// Create a controller in Idle at step 0, timed by the system clock.
    pub fn new(trace: Arc<Trace<P>>, speed_ms: u64) -> Result<Self> {
        Self::with_clock(trace, speed_ms, SystemClock)
    }
}

impl<P, C: Clock> PlaybackController<P, C> {
    /// Create a controller in Idle at step 0, timed by `clock`.
    pub fn with_clock(trace: Arc<Trace<P>>, speed_ms: u64, clock: C) -> Result<Self> {
        if speed_ms == 0 {
            tracing::warn!(speed_ms, "rejected step delay");
            return Err(PlaybackError::InvalidSpeed { ms: speed_ms });
        }
        tracing::debug!(steps = trace.len(), speed_ms, "playback controller created");
        Ok(Self {
            trace,
            clock,
            state: PlaybackState {
                phase: Phase::Idle,
                cursor: 0,
                speed_ms,
                pending: None,
            },
            next_timer: 0,
            subscribers: Subscribers::new(),
            disposed: false,
        })
    }

    pub fn trace(&self) -> &Arc<Trace<P>> {
        &self.trace
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn cursor(&self) -> usize {
        self.state.cursor
    }

    pub fn speed_ms(&self) -> u64 {
        self.state.speed_ms
    }

    pub fn current_step(&self) -> &Step<P> {
        &self.trace.steps()[self.state.cursor]
    }

    pub fn pending_timer(&self) -> Option<PendingTimer> {
        self.state.pending
    }

    /// When the pending timer is due, if one is scheduled.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.state.pending.map(|timer| timer.due)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Register a handler called after every cursor or phase change.
    ///
    /// Handlers cannot call back into the controller; collect what they
    /// need and act on it after the transport call returns.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&PlaybackUpdate<'_, P>) + Send + 'static,
    {
        if self.disposed {
            return SubscriptionId::default();
        }
        self.subscribers.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Start or resume playback.
    ///
    /// From Idle or Paused this schedules the next advance one full delay
    /// from now. A cursor already on the terminal step finishes instead.
    pub fn play(&mut self) {
        if self.disposed {
            return;
        }
        let event = if self.trace.is_terminal_index(self.state.cursor) {
            Transport::Complete
        } else {
            Transport::Play
        };
        if !self.apply(event) {
            tracing::trace!(phase = %self.state.phase, "play ignored");
            return;
        }
        if self.state.phase.is_playing() {
            let now = self.clock.now();
            self.schedule(now);
        }
        self.notify(UpdateCause::Play);
    }

    /// Pause playback, keeping the cursor. Only applies while Playing.
    pub fn pause(&mut self) {
        if self.disposed {
            return;
        }
        if !self.apply(Transport::Pause) {
            tracing::trace!(phase = %self.state.phase, "pause ignored");
            return;
        }
        self.cancel();
        self.notify(UpdateCause::Pause);
    }

    /// Return to step 0 in Idle. The step delay is kept.
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }
        let before = self.state;
        self.cancel();
        self.apply(Transport::Reset);
        self.state.cursor = 0;
        if self.state != before {
            self.notify(UpdateCause::Reset);
        }
    }

    /// Change the delay between steps.
    ///
    /// While Playing, the pending timer is replaced by one a full new
    /// delay from now.
    pub fn set_speed(&mut self, ms: u64) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        if ms == 0 {
            tracing::warn!(ms, "rejected step delay");
            return Err(PlaybackError::InvalidSpeed { ms });
        }
        tracing::debug!(from = self.state.speed_ms, to = ms, "step delay changed");
        self.state.speed_ms = ms;
        if self.state.phase.is_playing() {
            self.cancel();
            let now = self.clock.now();
            self.schedule(now);
        }
        Ok(())
    }

    /// Move the cursor to `index`.
    ///
    /// The terminal step lands in Finished. Otherwise Playing keeps playing
    /// from the new step, Paused stays Paused, and Idle or Finished become
    /// Paused (a jump to step 0 from Idle stays Idle).
    pub fn jump_to(&mut self, index: usize) -> Result<()> {
        if self.disposed {
            return Ok(());
        }
        let len = self.trace.len();
        if index >= len {
            tracing::warn!(index, len, "rejected jump");
            return Err(PlaybackError::OutOfRangeIndex { index, len });
        }

        self.cancel();
        let from = self.state.phase;
        let to = if self.trace.is_terminal_index(index) {
            Phase::Finished
        } else {
            match from {
                Phase::Playing => Phase::Playing,
                Phase::Idle if index == 0 => Phase::Idle,
                Phase::Idle | Phase::Paused | Phase::Finished => Phase::Paused,
            }
        };

        self.state.cursor = index;
        self.enter(to);
        if to.is_playing() {
            let now = self.clock.now();
            self.schedule(now);
        }
        self.notify(UpdateCause::Jump);
        Ok(())
    }

    /// Fire every timer that is due, returning how many steps advanced.
    ///
    /// Each fired timer schedules the next from its own due instant, so
    /// polling late catches up without skipping or repeating steps.
    pub fn tick(&mut self) -> usize {
        let now = self.clock.now();
        let mut advanced = 0;
        while let Some(timer) = self.state.pending.filter(|t| t.due <= now) {
            if !self.fire(timer.id) {
                break;
            }
            advanced += 1;
        }
        advanced
    }

    /// Fire the timer `id` now, regardless of its due instant.
    ///
    /// Returns false, changing nothing, if `id` is not the pending timer.
    pub fn fire(&mut self, id: TimerId) -> bool {
        if self.disposed {
            return false;
        }
        let Some(timer) = self.state.pending.filter(|t| t.id == id) else {
            tracing::trace!(?id, "stale timer ignored");
            return false;
        };
        self.state.pending = None;

        let next = self.state.cursor + 1;
        if next >= self.trace.len() {
            // unreachable while the invariants hold: a timer is never left
            // pending on the terminal step
            self.apply(Transport::Complete);
            return false;
        }
        self.state.cursor = next;
        tracing::trace!(cursor = next, "advanced");

        if self.trace.is_terminal_index(next) {
            self.apply(Transport::Complete);
        } else {
            self.apply(Transport::Advance);
            self.schedule(timer.due);
        }
        self.notify(UpdateCause::Advance);
        true
    }

    /// Swap in a new trace and return to Idle on it.
    ///
    /// The pending timer of the old trace is cancelled and can never fire.
    pub fn replace_trace(&mut self, trace: Arc<Trace<P>>) {
        if self.disposed {
            return;
        }
        self.cancel();
        tracing::debug!(steps = trace.len(), "trace replaced");
        self.trace = trace;
        self.state.cursor = 0;
        self.enter(Phase::Idle);
        self.notify(UpdateCause::TraceReplaced);
    }

    /// Cancel the pending timer and drop all subscribers.
    ///
    /// Every later call is a no-op.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.cancel();
        self.subscribers.clear();
        self.disposed = true;
        tracing::debug!("playback controller disposed");
    }

    /// Apply a table transition. Returns false if `event` does not apply.
    fn apply(&mut self, event: Transport) -> bool {
        match self.state.phase.on(event) {
            Some(to) => {
                self.enter(to);
                true
            }
            None => false,
        }
    }

    fn enter(&mut self, to: Phase) {
        let from = self.state.phase;
        if from != to {
            tracing::debug!(%from, %to, cursor = self.state.cursor, "phase transition");
        }
        self.state.phase = to;
    }

    fn schedule(&mut self, from: Instant) {
        let id = TimerId(self.next_timer);
        self.next_timer += 1;
        let due = from + Duration::from_millis(self.state.speed_ms);
        debug_assert!(self.state.pending.is_none());
        self.state.pending = Some(PendingTimer { id, due });
    }

    fn cancel(&mut self) {
        if let Some(timer) = self.state.pending.take() {
            tracing::trace!(id = ?timer.id, "timer cancelled");
        }
    }

    fn notify(&mut self, cause: UpdateCause) {
        if self.subscribers.is_empty() {
            return;
        }
        let Some(step) = self.trace.get(self.state.cursor) else {
            return;
        };
        let update = PlaybackUpdate {
            phase: self.state.phase,
            cursor: self.state.cursor,
            step,
            cause,
        };
        self.subscribers.dispatch(&update);
    }
}

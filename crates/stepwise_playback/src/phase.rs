//! Playback phases and the transport transition table
//!
//! Transitions are data: a flat list of `(from, event, to)` triples. An
//! event with no matching row leaves the phase unchanged, which is how
//! stale transport calls (pausing while paused, playing when finished)
//! become no-ops.
//!
//! Jumps are not in the table since their target depends on the
//! destination step; see [`PlaybackController::jump_to`].
//!
//! [`PlaybackController::jump_to`]: crate::PlaybackController::jump_to

use std::fmt;

/// Where the controller is in its lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Cursor at 0, no timer.
    #[default]
    Idle,
    /// A timer is pending.
    Playing,
    /// Stopped mid-trace, cursor kept.
    Paused,
    /// Cursor at the terminal step, no timer.
    Finished,
}

/// Events that drive phase changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transport {
    Play,
    Pause,
    Reset,
    /// A timer fired and the next step is not terminal.
    Advance,
    /// The cursor reached the terminal step.
    Complete,
}

const TRANSITIONS: &[(Phase, Transport, Phase)] = &[
    (Phase::Idle, Transport::Play, Phase::Playing),
    (Phase::Paused, Transport::Play, Phase::Playing),
    (Phase::Playing, Transport::Pause, Phase::Paused),
    (Phase::Playing, Transport::Advance, Phase::Playing),
    (Phase::Playing, Transport::Complete, Phase::Finished),
    // play with the cursor already on the terminal step
    (Phase::Idle, Transport::Complete, Phase::Finished),
    (Phase::Paused, Transport::Complete, Phase::Finished),
    (Phase::Idle, Transport::Reset, Phase::Idle),
    (Phase::Playing, Transport::Reset, Phase::Idle),
    (Phase::Paused, Transport::Reset, Phase::Idle),
    (Phase::Finished, Transport::Reset, Phase::Idle),
];

impl Phase {
    /// The phase `event` leads to, or `None` if the event does not apply.
    pub fn on(self, event: Transport) -> Option<Phase> {
        TRANSITIONS
            .iter()
            .find(|&&(from, ev, _)| from == self && ev == event)
            .map(|&(_, _, to)| to)
    }

    /// Whether `event` triggers a transition from this phase.
    pub fn accepts(self, event: Transport) -> bool {
        self.on(event).is_some()
    }

    pub fn is_playing(self) -> bool {
        self == Phase::Playing
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Playing => "playing",
            Phase::Paused => "paused",
            Phase::Finished => "finished",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

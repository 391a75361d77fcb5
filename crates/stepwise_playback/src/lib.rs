//! Stepwise Playback
//!
//! Transport controls over an immutable [`Trace`](stepwise_core::Trace):
//!
//! - **Controller**: phase, cursor, step delay and the single pending timer
//! - **Clocks**: system, manual (for tests) and tokio time sources
//! - **Subscriptions**: push notifications after every cursor or phase change
//! - **Driver**: a tokio task that owns a controller and sleeps to its deadlines
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use stepwise_core::{Terminal, TraceRecorder};
//! use stepwise_playback::{ManualClock, Phase, PlaybackController};
//!
//! let mut rec = TraceRecorder::new();
//! rec.step("compare", 1);
//! let trace = Arc::new(rec.finish(Terminal::new("done", 2)));
//!
//! let clock = ManualClock::new();
//! let mut player = PlaybackController::with_clock(trace, 250, clock.clone()).unwrap();
//! player.play();
//!
//! clock.advance_ms(250);
//! player.tick();
//! assert_eq!(player.phase(), Phase::Finished);
//! assert_eq!(player.current_step().label, "done");
//! ```

pub mod clock;
pub mod controller;
pub mod driver;
pub mod error;
pub mod events;
pub mod phase;

pub use clock::{Clock, ManualClock, SystemClock, TokioClock};
pub use controller::{PendingTimer, PlaybackController, PlaybackState, TimerId};
pub use driver::{PlaybackDriver, PlaybackSnapshot};
pub use error::{PlaybackError, Result};
pub use events::{PlaybackUpdate, SubscriptionId, Subscribers, UpdateCause, UpdateHandler};
pub use phase::{Phase, Transport};

//! Stepwise Core
//!
//! The data model shared by every algorithm recorder and by the playback
//! engine:
//!
//! - **Steps**: immutable snapshots of one observable moment of a run
//! - **Traces**: dense, terminated sequences of steps for a single input
//! - **Recorders**: the contract an algorithm implements to produce a trace
//!
//! # Example
//!
//! ```rust
//! use stepwise_core::{record, Recorder, Terminal, TraceRecorder, ValidationError};
//!
//! struct CountDown;
//!
//! impl Recorder for CountDown {
//!     const NAME: &'static str = "count-down";
//!     type Input = u32;
//!     type Payload = u32;
//!
//!     fn validate(input: &u32) -> Result<(), ValidationError> {
//!         if *input == 0 {
//!             return Err(ValidationError::new(Self::NAME, "start must be at least 1"));
//!         }
//!         Ok(())
//!     }
//!
//!     fn record(input: &u32, trace: &mut TraceRecorder<u32>) -> Terminal<u32> {
//!         for n in (1..=*input).rev() {
//!             trace.step(format!("{n}..."), n);
//!         }
//!         Terminal::new("lift-off", 0)
//!     }
//! }
//!
//! let trace = record::<CountDown>(&3).unwrap();
//! assert_eq!(trace.len(), 4);
//! assert!(trace.terminal().is_terminal);
//! ```

pub mod error;
pub mod recorder;
pub mod step;

pub use error::ValidationError;
pub use recorder::{record, Recorder, Terminal, TraceRecorder};
pub use step::{Step, Trace};

//! Trace recording
//!
//! Algorithms implement [`Recorder`]; [`record`] validates the input and
//! runs the algorithm once, synchronously, collecting steps into a
//! [`TraceRecorder`].

use crate::{Step, Trace, ValidationError};

/// The terminal step of a recording: the algorithm's final state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terminal<P> {
    pub label: String,
    pub payload: P,
}

impl<P> Terminal<P> {
    pub fn new(label: impl Into<String>, payload: P) -> Self {
        Self {
            label: label.into(),
            payload,
        }
    }
}

/// Builder that lays out steps with dense indices.
///
/// `finish` consumes the builder and always appends the terminal step, so a
/// trace produced here is non-empty and properly terminated.
#[derive(Debug)]
pub struct TraceRecorder<P> {
    steps: Vec<Step<P>>,
}

impl<P> TraceRecorder<P> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Record one non-terminal step.
    pub fn step(&mut self, label: impl Into<String>, payload: P) {
        let index = self.steps.len();
        self.steps.push(Step {
            index,
            payload,
            label: label.into(),
            is_terminal: false,
        });
    }

    /// Number of steps recorded so far.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Append the terminal step and seal the trace.
    pub fn finish(mut self, terminal: Terminal<P>) -> Trace<P> {
        let index = self.steps.len();
        self.steps.push(Step {
            index,
            payload: terminal.payload,
            label: terminal.label,
            is_terminal: true,
        });
        Trace::from_recorded(self.steps)
    }
}

impl<P> Default for TraceRecorder<P> {
    fn default() -> Self {
        Self::new()
    }
}

/// An algorithm that can be run once against an input to produce a trace.
///
/// Implementations must be pure: the same input always yields the same
/// steps. Every decision that changes externally observable state emits
/// exactly one step, and all display state a renderer needs lives in the
/// payload.
pub trait Recorder {
    /// Stable identifier used in errors and logs.
    const NAME: &'static str;

    type Input;
    type Payload;

    /// Check the algorithm's preconditions.
    fn validate(input: &Self::Input) -> Result<(), ValidationError>;

    /// Run the algorithm on validated input, returning its final state.
    fn record(input: &Self::Input, trace: &mut TraceRecorder<Self::Payload>)
        -> Terminal<Self::Payload>;
}

/// Validate `input` and record a full trace for `R`.
///
/// Invalid input fails before any step is recorded.
pub fn record<R: Recorder>(input: &R::Input) -> Result<Trace<R::Payload>, ValidationError> {
    if let Err(err) = R::validate(input) {
        tracing::debug!(algorithm = R::NAME, constraint = %err.constraint, "input rejected");
        return Err(err);
    }

    let mut recorder = TraceRecorder::new();
    let terminal = R::record(input, &mut recorder);
    let trace = recorder.finish(terminal);

    tracing::debug!(algorithm = R::NAME, steps = trace.len(), "trace recorded");
    Ok(trace)
}

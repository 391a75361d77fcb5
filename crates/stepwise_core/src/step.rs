//! Steps and traces
//!
//! A [`Trace`] is the complete, ordered record of one algorithm run on one
//! input. It can only be produced by a [`TraceRecorder`](crate::TraceRecorder),
//! which guarantees the structural invariants:
//!
//! - at least one step
//! - indices are exactly `0..len`
//! - exactly one terminal step, and it is the last one

use serde::Serialize;

/// One immutable, observable moment of an algorithm's execution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Step<P> {
    /// Position in the trace (dense, 0-based).
    pub index: usize,
    /// Algorithm-specific snapshot, opaque to the engine.
    pub payload: P,
    /// Short narration of what happened at this step.
    pub label: String,
    /// Whether this step is the algorithm's final state.
    pub is_terminal: bool,
}

/// An ordered, finite, immutable sequence of steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Trace<P> {
    steps: Vec<Step<P>>,
}

impl<P> Trace<P> {
    /// Wrap steps that the recorder has already laid out.
    pub(crate) fn from_recorded(steps: Vec<Step<P>>) -> Self {
        debug_assert!(!steps.is_empty());
        debug_assert!(steps.iter().enumerate().all(|(i, s)| s.index == i));
        debug_assert!(steps
            .iter()
            .enumerate()
            .all(|(i, s)| s.is_terminal == (i + 1 == steps.len())));
        Self { steps }
    }

    /// Number of steps (always at least 1).
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Index of the terminal step.
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Step<P>> {
        self.steps.get(index)
    }

    pub fn steps(&self) -> &[Step<P>] {
        &self.steps
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step<P>> {
        self.steps.iter()
    }

    pub fn first(&self) -> &Step<P> {
        &self.steps[0]
    }

    /// The final step, carrying the algorithm's result.
    pub fn terminal(&self) -> &Step<P> {
        &self.steps[self.last_index()]
    }

    /// Whether `index` points at the terminal step.
    pub fn is_terminal_index(&self, index: usize) -> bool {
        index == self.last_index()
    }

    /// Convert every payload, keeping indices, labels and terminal flags.
    pub fn map<Q>(self, mut f: impl FnMut(P) -> Q) -> Trace<Q> {
        Trace {
            steps: self
                .steps
                .into_iter()
                .map(|s| Step {
                    index: s.index,
                    payload: f(s.payload),
                    label: s.label,
                    is_terminal: s.is_terminal,
                })
                .collect(),
        }
    }

    /// Narration of every step, in order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.steps.iter().map(|s| s.label.as_str())
    }
}

impl<'a, P> IntoIterator for &'a Trace<P> {
    type Item = &'a Step<P>;
    type IntoIter = std::slice::Iter<'a, Step<P>>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

//! Recover the original array from a "doubled" array
//!
//! A doubled array holds every element of some original array together with
//! twice that element, shuffled. Sorting ascending and greedily pairing each
//! unused value with an unused double recovers the original.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DoubleOriginalInput {
    pub changed: Vec<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PairingAction {
    Sorted,
    Counted,
    /// `original` was matched with `doubled`.
    Paired { original: u64, doubled: u64 },
    /// The value was already consumed as someone's double.
    Skipped { value: u64 },
    /// No unused double exists for `value`.
    Unmatched { value: u64 },
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DoubleOriginalState {
    pub sorted: Vec<u64>,
    /// Unused occurrences of each value after this step.
    pub frequencies: BTreeMap<u64, usize>,
    /// Position in `sorted` being examined.
    pub cursor: Option<usize>,
    /// Original elements recovered so far.
    pub original: Vec<u64>,
    pub action: PairingAction,
    /// Set on the terminal step: whether the input was a doubled array.
    pub is_doubled: Option<bool>,
}

pub struct DoubleOriginal;

impl Recorder for DoubleOriginal {
    const NAME: &'static str = "double-original";
    type Input = DoubleOriginalInput;
    type Payload = DoubleOriginalState;

    fn validate(input: &DoubleOriginalInput) -> Result<(), ValidationError> {
        ValidationError::ensure(
            Self::NAME,
            input.changed.len() % 2 == 0,
            "array length must be even",
        )
    }

    fn record(
        input: &DoubleOriginalInput,
        trace: &mut TraceRecorder<DoubleOriginalState>,
    ) -> Terminal<DoubleOriginalState> {
        let mut sorted = input.changed.clone();
        sorted.sort_unstable();

        let mut state = DoubleOriginalState {
            sorted: sorted.clone(),
            frequencies: BTreeMap::new(),
            cursor: None,
            original: Vec::new(),
            action: PairingAction::Sorted,
            is_doubled: None,
        };
        trace.step(format!("Sorted input: {sorted:?}"), state.clone());

        for &value in &sorted {
            *state.frequencies.entry(value).or_default() += 1;
        }
        state.action = PairingAction::Counted;
        trace.step("Counted occurrences of each value", state.clone());

        for (i, &value) in sorted.iter().enumerate() {
            state.cursor = Some(i);

            if state.frequencies.get(&value).copied().unwrap_or(0) == 0 {
                state.action = PairingAction::Skipped { value };
                trace.step(
                    format!("{value} at position {i} was already used as a double"),
                    state.clone(),
                );
                continue;
            }
            decrement(&mut state.frequencies, value);

            let doubled = value.checked_mul(2);
            let available = doubled
                .map(|d| state.frequencies.get(&d).copied().unwrap_or(0) > 0)
                .unwrap_or(false);

            match doubled {
                Some(doubled) if available => {
                    decrement(&mut state.frequencies, doubled);
                    state.original.push(value);
                    state.action = PairingAction::Paired {
                        original: value,
                        doubled,
                    };
                    trace.step(format!("Paired {value} with {doubled}"), state.clone());
                }
                _ => {
                    state.action = PairingAction::Unmatched { value };
                    state.original.clear();
                    state.is_doubled = Some(false);
                    return Terminal::new(
                        format!("Not a doubled array: no unused double for {value}"),
                        state,
                    );
                }
            }
        }

        state.cursor = None;
        state.action = PairingAction::Done;
        state.is_doubled = Some(true);
        Terminal::new(format!("Original array: {:?}", state.original), state)
    }
}

fn decrement(frequencies: &mut BTreeMap<u64, usize>, value: u64) {
    if let Some(count) = frequencies.get_mut(&value) {
        *count = count.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::record;

    fn run(changed: &[u64]) -> stepwise_core::Trace<DoubleOriginalState> {
        record::<DoubleOriginal>(&DoubleOriginalInput {
            changed: changed.to_vec(),
        })
        .unwrap()
    }

    #[test]
    fn test_recovers_original() {
        let trace = run(&[1, 3, 4, 2, 6, 8]);
        let result = &trace.terminal().payload;
        assert_eq!(result.is_doubled, Some(true));
        assert_eq!(result.original, vec![1, 3, 4]);
        assert!(result.frequencies.values().all(|&c| c == 0));
    }

    #[test]
    fn test_zero_pairs_with_itself_only_when_repeated() {
        let trace = run(&[0, 0, 0, 0]);
        assert_eq!(trace.terminal().payload.original, vec![0, 0]);

        let trace = run(&[0, 1]);
        assert_eq!(trace.terminal().payload.is_doubled, Some(false));
    }

    #[test]
    fn test_gallery_example_is_not_doubled() {
        let trace = run(&[1, 4, 2, 8, 6, 9, 7, 3]);
        let result = &trace.terminal().payload;
        assert_eq!(result.is_doubled, Some(false));
        assert!(matches!(result.action, PairingAction::Unmatched { .. }));
    }

    #[test]
    fn test_odd_length_is_rejected_before_recording() {
        let err = record::<DoubleOriginal>(&DoubleOriginalInput {
            changed: vec![1, 2, 4],
        })
        .unwrap_err();
        assert_eq!(err.algorithm, "double-original");
        assert_eq!(err.constraint, "array length must be even");
    }

    #[test]
    fn test_empty_array() {
        let trace = run(&[]);
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.terminal().payload.is_doubled, Some(true));
    }
}

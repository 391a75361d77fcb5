//! Find the duplicated and the missing number in `1..=n` (sign marking)
//!
//! Pass one negates `nums[v - 1]` for every value `v`; meeting an already
//! negative slot reveals the duplicate. Pass two finds the one slot left
//! positive, whose position is the missing number.

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ErrorNumbersInput {
    pub nums: Vec<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorNumbersPhase {
    Marking,
    Scanning,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ErrorNumbersState {
    /// The array with sign marks applied so far.
    pub working: Vec<i64>,
    pub phase: ErrorNumbersPhase,
    pub index: Option<usize>,
    /// Slot whose sign was inspected or flipped at this step.
    pub marked: Option<usize>,
    pub duplicate: Option<i64>,
    pub missing: Option<i64>,
}

pub struct ErrorNumbers;

impl Recorder for ErrorNumbers {
    const NAME: &'static str = "error-numbers";
    type Input = ErrorNumbersInput;
    type Payload = ErrorNumbersState;

    fn validate(input: &ErrorNumbersInput) -> Result<(), ValidationError> {
        let n = input.nums.len() as i64;
        ValidationError::ensure(
            Self::NAME,
            input.nums.len() >= 2,
            "array must hold at least 2 numbers",
        )?;
        ValidationError::ensure(
            Self::NAME,
            input.nums.iter().all(|&v| (1..=n).contains(&v)),
            format!("every value must be in 1..={n}"),
        )
    }

    fn record(
        input: &ErrorNumbersInput,
        trace: &mut TraceRecorder<ErrorNumbersState>,
    ) -> Terminal<ErrorNumbersState> {
        let mut state = ErrorNumbersState {
            working: input.nums.clone(),
            phase: ErrorNumbersPhase::Marking,
            index: None,
            marked: None,
            duplicate: None,
            missing: None,
        };

        for i in 0..state.working.len() {
            let value = state.working[i].abs();
            let slot = (value - 1) as usize;
            state.index = Some(i);
            state.marked = Some(slot);

            let label = if state.working[slot] < 0 {
                state.duplicate = Some(value);
                format!("Slot {slot} is already negative: {value} is the duplicate")
            } else {
                state.working[slot] = -state.working[slot];
                format!("Saw {value}, negate slot {slot}")
            };
            trace.step(label, state.clone());
        }

        state.phase = ErrorNumbersPhase::Scanning;
        for i in 0..state.working.len() {
            state.index = Some(i);
            state.marked = None;
            if state.working[i] > 0 {
                state.missing = Some(i as i64 + 1);
                trace.step(
                    format!("Slot {i} is still positive: {} is missing", i + 1),
                    state.clone(),
                );
                break;
            }
            trace.step(
                format!("Slot {i} is negative, {} is present", i + 1),
                state.clone(),
            );
        }

        for v in state.working.iter_mut() {
            *v = v.abs();
        }
        state.phase = ErrorNumbersPhase::Done;
        state.index = None;
        state.marked = None;

        let label = match (state.duplicate, state.missing) {
            (Some(dup), Some(missing)) => format!("Duplicate {dup}, missing {missing}"),
            _ => "Every number appears exactly once".to_string(),
        };
        Terminal::new(label, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::record;

    fn run(nums: &[i64]) -> stepwise_core::Trace<ErrorNumbersState> {
        record::<ErrorNumbers>(&ErrorNumbersInput {
            nums: nums.to_vec(),
        })
        .unwrap()
    }

    #[test]
    fn test_gallery_example() {
        let trace = run(&[1, 2, 2, 4]);
        let result = &trace.terminal().payload;
        assert_eq!(result.duplicate, Some(2));
        assert_eq!(result.missing, Some(3));
        assert_eq!(result.working, vec![1, 2, 2, 4]);
    }

    #[test]
    fn test_pair_of_ones() {
        let result = run(&[1, 1]).terminal().payload.clone();
        assert_eq!((result.duplicate, result.missing), (Some(1), Some(2)));
    }

    #[test]
    fn test_marks_are_visible_mid_trace() {
        let trace = run(&[1, 2, 2, 4]);
        // after marking value 1, slot 0 is negative
        assert_eq!(trace.steps()[0].payload.working[0], -1);
        assert_eq!(trace.steps()[0].payload.phase, ErrorNumbersPhase::Marking);
    }

    #[test]
    fn test_permutation_has_no_error() {
        let result = run(&[2, 1, 3]).terminal().payload.clone();
        assert_eq!(result.duplicate, None);
        assert_eq!(result.missing, None);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = record::<ErrorNumbers>(&ErrorNumbersInput { nums: vec![1, 5] }).unwrap_err();
        assert_eq!(err.constraint, "every value must be in 1..=2");
    }
}

//! Dutch national flag partition (sort an array of 0s, 1s and 2s in place)
//!
//! Three pointers split the array into settled 0s `[0, low)`, settled 1s
//! `[low, mid)`, the unsorted region `[mid, high)` and settled 2s
//! `[high, len)`. Each iteration settles exactly one element, so a run over
//! `n` elements records `n` movement steps.

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct DutchFlagInput {
    pub nums: Vec<u8>,
}

/// Partition boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FlagPointers {
    /// End of the settled 0s.
    pub low: usize,
    /// Next element to classify.
    pub mid: usize,
    /// Start of the settled 2s.
    pub high: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FlagMove {
    Start,
    /// Elements at `from` and `to` were exchanged.
    Swap { from: usize, to: usize },
    /// A 1 was left in place and `mid` moved past it.
    Advance { at: usize },
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DutchFlagState {
    /// Array contents after this step.
    pub nums: Vec<u8>,
    pub before: FlagPointers,
    pub after: FlagPointers,
    pub action: FlagMove,
}

pub struct DutchFlag;

impl Recorder for DutchFlag {
    const NAME: &'static str = "dutch-flag";
    type Input = DutchFlagInput;
    type Payload = DutchFlagState;

    fn validate(input: &DutchFlagInput) -> Result<(), ValidationError> {
        ValidationError::ensure(
            Self::NAME,
            input.nums.iter().all(|&n| n <= 2),
            "every value must be 0, 1 or 2",
        )
    }

    fn record(
        input: &DutchFlagInput,
        trace: &mut TraceRecorder<DutchFlagState>,
    ) -> Terminal<DutchFlagState> {
        let mut nums = input.nums.clone();
        let mut ptr = FlagPointers {
            low: 0,
            mid: 0,
            high: nums.len(),
        };

        if nums.is_empty() {
            return Terminal::new(
                "Empty array, nothing to sort",
                DutchFlagState {
                    nums,
                    before: ptr,
                    after: ptr,
                    action: FlagMove::Done,
                },
            );
        }

        trace.step(
            "Starting sort",
            DutchFlagState {
                nums: nums.clone(),
                before: ptr,
                after: ptr,
                action: FlagMove::Start,
            },
        );

        while ptr.mid < ptr.high {
            let before = ptr;
            let (label, action) = match nums[ptr.mid] {
                0 => {
                    nums.swap(ptr.mid, ptr.low);
                    let action = FlagMove::Swap {
                        from: ptr.mid,
                        to: ptr.low,
                    };
                    let label = format!(
                        "Found 0 at position {}, swapping with position {}",
                        ptr.mid, ptr.low
                    );
                    ptr.low += 1;
                    ptr.mid += 1;
                    (label, action)
                }
                1 => {
                    let action = FlagMove::Advance { at: ptr.mid };
                    let label = format!("Found 1 at position {}, moving mid pointer", ptr.mid);
                    ptr.mid += 1;
                    (label, action)
                }
                _ => {
                    ptr.high -= 1;
                    nums.swap(ptr.mid, ptr.high);
                    let action = FlagMove::Swap {
                        from: ptr.mid,
                        to: ptr.high,
                    };
                    let label = format!(
                        "Found 2 at position {}, swapping with position {}",
                        ptr.mid, ptr.high
                    );
                    (label, action)
                }
            };

            trace.step(
                label,
                DutchFlagState {
                    nums: nums.clone(),
                    before,
                    after: ptr,
                    action,
                },
            );
        }

        Terminal::new(
            "Sorting complete",
            DutchFlagState {
                nums,
                before: ptr,
                after: ptr,
                action: FlagMove::Done,
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::record;

    fn run(nums: &[u8]) -> stepwise_core::Trace<DutchFlagState> {
        record::<DutchFlag>(&DutchFlagInput {
            nums: nums.to_vec(),
        })
        .unwrap()
    }

    #[test]
    fn test_sorts_gallery_example() {
        let trace = run(&[2, 0, 2, 1, 1, 0]);
        assert_eq!(trace.terminal().payload.nums, vec![0, 0, 1, 1, 2, 2]);
    }

    #[test]
    fn test_one_step_per_movement() {
        let trace = run(&[2, 0, 2, 1, 1, 0]);
        // start + one movement per element + terminal
        assert_eq!(trace.len(), 6 + 2);
        for step in &trace.steps()[1..trace.last_index()] {
            assert!(matches!(
                step.payload.action,
                FlagMove::Swap { .. } | FlagMove::Advance { .. }
            ));
        }
    }

    #[test]
    fn test_swap_records_before_and_after() {
        let trace = run(&[2, 0, 2, 1, 1, 0]);
        let first_move = &trace.steps()[1].payload;
        assert_eq!(first_move.action, FlagMove::Swap { from: 0, to: 5 });
        assert_eq!(first_move.before.high, 6);
        assert_eq!(first_move.after.high, 5);
        assert_eq!(first_move.nums, vec![0, 0, 2, 1, 1, 2]);
    }

    #[test]
    fn test_empty_array() {
        let trace = run(&[]);
        assert_eq!(trace.len(), 1);
        assert!(trace.terminal().payload.nums.is_empty());
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let err = record::<DutchFlag>(&DutchFlagInput { nums: vec![0, 3] }).unwrap_err();
        assert_eq!(err.constraint, "every value must be 0, 1 or 2");
    }
}

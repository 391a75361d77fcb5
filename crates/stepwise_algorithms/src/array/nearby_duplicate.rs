//! Duplicate values within distance `k` (last-seen index table)

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NearbyDuplicateInput {
    pub nums: Vec<i64>,
    pub k: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LookupOutcome {
    /// First time this value is seen.
    New,
    /// Seen before, but `distance` exceeds `k`.
    TooFar { previous: usize, distance: usize },
    /// Seen `distance <= k` positions earlier.
    Found { previous: usize, distance: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NearbyDuplicateState {
    pub index: Option<usize>,
    pub value: Option<i64>,
    /// Most recent index of each value, after this step.
    pub last_seen: BTreeMap<i64, usize>,
    pub outcome: Option<LookupOutcome>,
    /// The matching pair of indices once found.
    pub pair: Option<(usize, usize)>,
}

pub struct NearbyDuplicate;

impl Recorder for NearbyDuplicate {
    const NAME: &'static str = "nearby-duplicate";
    type Input = NearbyDuplicateInput;
    type Payload = NearbyDuplicateState;

    fn validate(input: &NearbyDuplicateInput) -> Result<(), ValidationError> {
        ValidationError::ensure(Self::NAME, input.k >= 1, "k must be at least 1")
    }

    fn record(
        input: &NearbyDuplicateInput,
        trace: &mut TraceRecorder<NearbyDuplicateState>,
    ) -> Terminal<NearbyDuplicateState> {
        let mut state = NearbyDuplicateState {
            index: None,
            value: None,
            last_seen: BTreeMap::new(),
            outcome: None,
            pair: None,
        };

        for (i, &value) in input.nums.iter().enumerate() {
            state.index = Some(i);
            state.value = Some(value);

            let outcome = match state.last_seen.get(&value) {
                Some(&previous) if i - previous <= input.k => LookupOutcome::Found {
                    previous,
                    distance: i - previous,
                },
                Some(&previous) => LookupOutcome::TooFar {
                    previous,
                    distance: i - previous,
                },
                None => LookupOutcome::New,
            };
            state.outcome = Some(outcome);

            if let LookupOutcome::Found { previous, distance } = outcome {
                state.pair = Some((previous, i));
                return Terminal::new(
                    format!(
                        "{value} repeats at positions {previous} and {i} (distance {distance} <= {})",
                        input.k
                    ),
                    state,
                );
            }

            state.last_seen.insert(value, i);
            let label = match outcome {
                LookupOutcome::TooFar { previous, distance } => format!(
                    "{value} was last at {previous}, distance {distance} > {}; remember position {i}",
                    input.k
                ),
                _ => format!("First {value}, remember position {i}"),
            };
            trace.step(label, state.clone());
        }

        state.index = None;
        state.value = None;
        state.outcome = None;
        Terminal::new(
            format!("No duplicate within distance {}", input.k),
            state,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::record;

    fn run(nums: &[i64], k: usize) -> stepwise_core::Trace<NearbyDuplicateState> {
        record::<NearbyDuplicate>(&NearbyDuplicateInput {
            nums: nums.to_vec(),
            k,
        })
        .unwrap()
    }

    #[test]
    fn test_gallery_example_has_no_nearby_duplicate() {
        let trace = run(&[1, 2, 3, 1, 2, 3], 2);
        assert_eq!(trace.terminal().payload.pair, None);
        assert_eq!(trace.len(), 7);
    }

    #[test]
    fn test_finds_pair_within_k() {
        let trace = run(&[1, 2, 3, 1], 3);
        let result = &trace.terminal().payload;
        assert_eq!(result.pair, Some((0, 3)));
        assert_eq!(
            result.outcome,
            Some(LookupOutcome::Found {
                previous: 0,
                distance: 3
            })
        );
    }

    #[test]
    fn test_table_tracks_latest_index() {
        let trace = run(&[7, 0, 0, 7], 1);
        // 0 repeats at distance 1 before the 7s are compared
        assert_eq!(trace.terminal().payload.pair, Some((1, 2)));
        assert_eq!(trace.steps()[1].payload.last_seen.get(&0), Some(&1));
    }

    #[test]
    fn test_k_larger_than_input() {
        let trace = run(&[5, 6], 10);
        assert_eq!(trace.terminal().payload.pair, None);
    }
}

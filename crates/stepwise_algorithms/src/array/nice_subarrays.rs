//! Count subarrays with exactly `k` odd numbers
//!
//! `exactly(k) = at_most(k) - at_most(k - 1)`, where each `at_most` pass is
//! a sliding window that shrinks while it holds too many odd numbers.

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct NiceSubarraysInput {
    pub nums: Vec<i64>,
    pub k: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NiceSubarraysState {
    /// Odd-count bound of the current pass (`k`, then `k - 1`).
    pub bound: usize,
    pub left: usize,
    pub right: Option<usize>,
    pub odd_in_window: usize,
    /// Subarrays ending at `right` added to the running count.
    pub added: usize,
    /// Running total of the current pass.
    pub running: usize,
    pub at_most_k: Option<usize>,
    pub at_most_k_minus_one: Option<usize>,
    pub result: Option<usize>,
}

pub struct NiceSubarrays;

impl Recorder for NiceSubarrays {
    const NAME: &'static str = "nice-subarrays";
    type Input = NiceSubarraysInput;
    type Payload = NiceSubarraysState;

    fn validate(input: &NiceSubarraysInput) -> Result<(), ValidationError> {
        ValidationError::ensure(Self::NAME, input.k >= 1, "k must be at least 1")
    }

    fn record(
        input: &NiceSubarraysInput,
        trace: &mut TraceRecorder<NiceSubarraysState>,
    ) -> Terminal<NiceSubarraysState> {
        let k = input.k;
        let mut state = NiceSubarraysState {
            bound: k,
            left: 0,
            right: None,
            odd_in_window: 0,
            added: 0,
            running: 0,
            at_most_k: None,
            at_most_k_minus_one: None,
            result: None,
        };

        let at_most_k = at_most(&input.nums, k, &mut state, trace);
        state.at_most_k = Some(at_most_k);
        trace.step(
            format!("Completed at_most({k}) = {at_most_k}; starting at_most({})", k - 1),
            state.clone(),
        );

        let at_most_fewer = at_most(&input.nums, k - 1, &mut state, trace);
        state.at_most_k_minus_one = Some(at_most_fewer);

        let result = at_most_k - at_most_fewer;
        state.result = Some(result);
        Terminal::new(
            format!("{result} subarrays have exactly {k} odd numbers ({at_most_k} - {at_most_fewer})"),
            state,
        )
    }
}

fn at_most(
    nums: &[i64],
    bound: usize,
    state: &mut NiceSubarraysState,
    trace: &mut TraceRecorder<NiceSubarraysState>,
) -> usize {
    state.bound = bound;
    state.left = 0;
    state.right = None;
    state.odd_in_window = 0;
    state.added = 0;
    state.running = 0;

    for (right, &value) in nums.iter().enumerate() {
        if value % 2 != 0 {
            state.odd_in_window += 1;
        }
        while state.odd_in_window > bound {
            if nums[state.left] % 2 != 0 {
                state.odd_in_window -= 1;
            }
            state.left += 1;
        }

        state.right = Some(right);
        state.added = right + 1 - state.left;
        state.running += state.added;
        trace.step(
            format!(
                "Window [{}, {right}] has {} odd numbers; adding {} subarrays, at_most({bound}) = {}",
                state.left, state.odd_in_window, state.added, state.running
            ),
            state.clone(),
        );
    }

    state.running
}

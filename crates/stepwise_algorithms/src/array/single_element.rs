//! Single non-duplicated element in a sorted array of pairs (binary search)

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SingleElementInput {
    pub nums: Vec<i64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMove {
    /// `left` moved right of `mid`.
    Right,
    /// `right` moved onto or left of `mid`.
    Left,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SingleElementState {
    pub left: usize,
    pub right: usize,
    pub mid: Option<usize>,
    /// Whether `nums[mid] == nums[mid + 1]`.
    pub pair_at_mid: Option<bool>,
    /// Whether `right - mid` is even.
    pub even_tail: Option<bool>,
    pub action: SearchMove,
    pub result: Option<i64>,
}

pub struct SingleElement;

impl Recorder for SingleElement {
    const NAME: &'static str = "single-element";
    type Input = SingleElementInput;
    type Payload = SingleElementState;

    fn validate(input: &SingleElementInput) -> Result<(), ValidationError> {
        ValidationError::ensure(
            Self::NAME,
            input.nums.len() % 2 == 1,
            "array length must be odd",
        )
    }

    fn record(
        input: &SingleElementInput,
        trace: &mut TraceRecorder<SingleElementState>,
    ) -> Terminal<SingleElementState> {
        let nums = &input.nums;
        let mut left = 0;
        let mut right = nums.len() - 1;

        // `right - left` stays even, so `mid >= left + 1` whenever `left < right`.
        while left < right {
            let mid = left + (right - left) / 2;
            let pair_at_mid = nums[mid] == nums[mid + 1];
            let even_tail = (right - mid) % 2 == 0;
            let (before_left, before_right) = (left, right);

            let action = match (pair_at_mid, even_tail) {
                (true, true) => {
                    left = mid + 2;
                    SearchMove::Right
                }
                (true, false) => {
                    right = mid.saturating_sub(1);
                    SearchMove::Left
                }
                (false, true) => {
                    right = mid;
                    SearchMove::Left
                }
                (false, false) => {
                    left = mid + 1;
                    SearchMove::Right
                }
            };

            trace.step(
                format!(
                    "[{before_left}, {before_right}] mid {mid}: {} {} {}, tail is {}; now [{left}, {right}]",
                    nums[mid],
                    if pair_at_mid { "==" } else { "!=" },
                    nums[mid + 1],
                    if even_tail { "even" } else { "odd" },
                ),
                SingleElementState {
                    left,
                    right,
                    mid: Some(mid),
                    pair_at_mid: Some(pair_at_mid),
                    even_tail: Some(even_tail),
                    action,
                    result: None,
                },
            );
        }

        let result = nums[right];
        Terminal::new(
            format!("Found single non-duplicate number: {result}"),
            SingleElementState {
                left,
                right,
                mid: None,
                pair_at_mid: None,
                even_tail: None,
                action: SearchMove::Done,
                result: Some(result),
            },
        )
    }
}

//! Minimum-length subarray whose sum reaches a target (grow/shrink window)

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SlidingWindowInput {
    pub nums: Vec<u64>,
    pub target: u64,
}

/// Inclusive index range `[start, end]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WindowSpan {
    pub start: usize,
    pub end: usize,
}

impl WindowSpan {
    pub fn width(&self) -> usize {
        self.end - self.start + 1
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowAction {
    /// `right` moved and its value joined the sum.
    Extend,
    /// The window reached the target and was compared to the best so far.
    Found,
    /// `left` moved and its value left the sum.
    Shrink,
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SlidingWindowState {
    pub left: usize,
    pub right: usize,
    pub sum: u64,
    pub min_len: Option<usize>,
    pub best: Option<WindowSpan>,
    pub action: WindowAction,
    /// Elements of the best window; only filled on the terminal step.
    pub subarray: Vec<u64>,
}

pub struct SlidingWindow;

impl Recorder for SlidingWindow {
    const NAME: &'static str = "sliding-window";
    type Input = SlidingWindowInput;
    type Payload = SlidingWindowState;

    fn validate(input: &SlidingWindowInput) -> Result<(), ValidationError> {
        ValidationError::ensure(Self::NAME, input.target >= 1, "target must be at least 1")?;
        ValidationError::ensure(
            Self::NAME,
            input.nums.iter().all(|&n| n >= 1),
            "every value must be a positive integer",
        )?;
        // the running sum never exceeds the total
        ValidationError::ensure(
            Self::NAME,
            input.nums.iter().try_fold(0u64, |acc, &n| acc.checked_add(n)).is_some(),
            "sum of values must fit in 64 bits",
        )
    }

    fn record(
        input: &SlidingWindowInput,
        trace: &mut TraceRecorder<SlidingWindowState>,
    ) -> Terminal<SlidingWindowState> {
        let nums = &input.nums;
        let mut left = 0;
        let mut sum: u64 = 0;
        let mut best: Option<WindowSpan> = None;

        let snapshot = |left, right, sum, best: Option<WindowSpan>, action| SlidingWindowState {
            left,
            right,
            sum,
            min_len: best.map(|b| b.width()),
            best,
            action,
            subarray: Vec::new(),
        };

        for (right, &value) in nums.iter().enumerate() {
            sum += value;
            trace.step(
                format!("Add nums[{right}] = {value} to sum, sum is {sum}"),
                snapshot(left, right, sum, best, WindowAction::Extend),
            );

            while sum >= input.target {
                let window = WindowSpan { start: left, end: right };
                if best.map_or(true, |b| window.width() < b.width()) {
                    best = Some(window);
                }
                trace.step(
                    format!(
                        "Window [{left}, {right}] sums to {sum} >= {}, length {}",
                        input.target,
                        window.width()
                    ),
                    snapshot(left, right, sum, best, WindowAction::Found),
                );

                sum -= nums[left];
                left += 1;
                trace.step(
                    format!("Shrink window: drop nums[{}], sum is {sum}", left - 1),
                    snapshot(left, right, sum, best, WindowAction::Shrink),
                );
            }
        }

        let right = nums.len().saturating_sub(1);
        let mut last = snapshot(left, right, sum, best, WindowAction::Done);
        match best {
            Some(span) => {
                last.subarray = nums[span.start..=span.end].to_vec();
                Terminal::new(
                    format!(
                        "Minimum window length is {} ({:?})",
                        span.width(),
                        last.subarray
                    ),
                    last,
                )
            }
            None => Terminal::new(
                format!("No subarray reaches the target {}", input.target),
                last,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::record;

    fn run(nums: &[u64], target: u64) -> stepwise_core::Trace<SlidingWindowState> {
        record::<SlidingWindow>(&SlidingWindowInput {
            nums: nums.to_vec(),
            target,
        })
        .unwrap()
    }

    #[test]
    fn test_gallery_example_finds_length_two() {
        let trace = run(&[2, 3, 1, 2, 4, 3], 7);
        let result = &trace.terminal().payload;
        assert_eq!(result.min_len, Some(2));
        assert_eq!(result.best, Some(WindowSpan { start: 4, end: 5 }));
        assert_eq!(result.subarray, vec![4, 3]);
    }

    #[test]
    fn test_every_shrink_follows_a_found() {
        let trace = run(&[2, 3, 1, 2, 4, 3], 7);
        let steps = trace.steps();
        for pair in steps.windows(2) {
            if pair[1].payload.action == WindowAction::Shrink {
                assert_eq!(pair[0].payload.action, WindowAction::Found);
                assert_eq!(pair[1].payload.left, pair[0].payload.left + 1);
            }
        }
    }

    #[test]
    fn test_unreachable_target() {
        let trace = run(&[1, 1, 1], 10);
        let result = &trace.terminal().payload;
        assert_eq!(result.min_len, None);
        assert!(result.subarray.is_empty());
        assert_eq!(trace.len(), 4);
    }

    #[test]
    fn test_empty_input_is_degenerate_not_an_error() {
        let trace = run(&[], 3);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.terminal().payload.min_len, None);
    }

    #[test]
    fn test_rejects_zero_target() {
        let err = record::<SlidingWindow>(&SlidingWindowInput {
            nums: vec![1],
            target: 0,
        })
        .unwrap_err();
        assert_eq!(err.constraint, "target must be at least 1");
    }

    #[test]
    fn test_rejects_overflowing_total() {
        let err = record::<SlidingWindow>(&SlidingWindowInput {
            nums: vec![u64::MAX - 1, 1, 1],
            target: u64::MAX,
        })
        .unwrap_err();
        assert_eq!(err.constraint, "sum of values must fit in 64 bits");
    }

    #[test]
    fn test_total_at_the_limit() {
        let trace = run(&[u64::MAX - 1, 1], u64::MAX);
        let result = &trace.terminal().payload;
        assert_eq!(result.best, Some(WindowSpan { start: 0, end: 1 }));
        assert_eq!(result.sum, 1);
    }
}

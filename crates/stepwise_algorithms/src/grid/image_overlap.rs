//! Largest overlap of two binary images under translation
//!
//! A shift `(dx, dy)` lays `second[i - dy][j - dx]` over `first[i][j]`.
//! Shifts are visited with `dy` outermost, both from `-(n-1)` to `n-1`,
//! one step each.

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ImageOverlapInput {
    pub first: Vec<Vec<u8>>,
    pub second: Vec<Vec<u8>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Shift {
    pub dx: isize,
    pub dy: isize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageOverlapState {
    pub shift: Option<Shift>,
    /// Cells of `first` where both images hold a 1 under the current shift.
    pub overlapping: Vec<(usize, usize)>,
    pub best: usize,
    pub best_shift: Option<Shift>,
}

pub struct ImageOverlap;

pub fn overlap_at(first: &[Vec<u8>], second: &[Vec<u8>], shift: Shift) -> Vec<(usize, usize)> {
    let n = first.len() as isize;
    let mut cells = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let (r, c) = (i - shift.dy, j - shift.dx);
            if (0..n).contains(&r)
                && (0..n).contains(&c)
                && first[i as usize][j as usize] == 1
                && second[r as usize][c as usize] == 1
            {
                cells.push((i as usize, j as usize));
            }
        }
    }
    cells
}

impl Recorder for ImageOverlap {
    const NAME: &'static str = "image-overlap";
    type Input = ImageOverlapInput;
    type Payload = ImageOverlapState;

    fn validate(input: &ImageOverlapInput) -> Result<(), ValidationError> {
        let n = input.first.len();
        let square = |image: &[Vec<u8>]| image.iter().all(|row| row.len() == n);
        ValidationError::ensure(
            Self::NAME,
            input.second.len() == n && square(&input.first) && square(&input.second),
            "images must be square and the same size",
        )?;
        ValidationError::ensure(
            Self::NAME,
            input
                .first
                .iter()
                .chain(&input.second)
                .flatten()
                .all(|&v| v <= 1),
            "image cells must be 0 or 1",
        )
    }

    fn record(
        input: &ImageOverlapInput,
        trace: &mut TraceRecorder<ImageOverlapState>,
    ) -> Terminal<ImageOverlapState> {
        let reach = input.first.len() as isize - 1;
        let mut best = 0;
        let mut best_shift = None;

        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let shift = Shift { dx, dy };
                let overlapping = overlap_at(&input.first, &input.second, shift);
                let count = overlapping.len();
                let label = if count > best || best_shift.is_none() {
                    best = count;
                    best_shift = Some(shift);
                    format!("Shift ({dx}, {dy}): {count} overlapping, new best")
                } else {
                    format!("Shift ({dx}, {dy}): {count} overlapping (best {best})")
                };
                trace.step(
                    label,
                    ImageOverlapState {
                        shift: Some(shift),
                        overlapping,
                        best,
                        best_shift,
                    },
                );
            }
        }

        let label = match best_shift {
            Some(s) => format!("Largest overlap {best} at shift ({}, {})", s.dx, s.dy),
            None => "Empty images: no overlap".to_string(),
        };
        let overlapping = best_shift
            .map(|s| overlap_at(&input.first, &input.second, s))
            .unwrap_or_default();
        Terminal::new(
            label,
            ImageOverlapState {
                shift: None,
                overlapping,
                best,
                best_shift,
            },
        )
    }
}

//! 3x3 mean filter, one step per cell in row-major order

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SmoothImageInput {
    pub image: Vec<Vec<u32>>,
}

/// Up to nine in-bounds cells around (and including) the current one.
pub type Neighborhood = SmallVec<[(usize, usize); 9]>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SmoothImageState {
    pub cell: Option<(usize, usize)>,
    pub neighbors: Neighborhood,
    pub sum: u64,
    /// Cells not reached yet are `None`.
    pub result: Vec<Vec<Option<u32>>>,
}

pub struct SmoothImage;

pub fn neighborhood(rows: usize, cols: usize, row: usize, col: usize) -> Neighborhood {
    let mut cells = Neighborhood::new();
    for r in row.saturating_sub(1)..=(row + 1).min(rows - 1) {
        for c in col.saturating_sub(1)..=(col + 1).min(cols - 1) {
            cells.push((r, c));
        }
    }
    cells
}

impl Recorder for SmoothImage {
    const NAME: &'static str = "smooth-image";
    type Input = SmoothImageInput;
    type Payload = SmoothImageState;

    fn validate(input: &SmoothImageInput) -> Result<(), ValidationError> {
        let width = input.image.first().map_or(0, Vec::len);
        ValidationError::ensure(
            Self::NAME,
            input.image.iter().all(|row| row.len() == width),
            "image rows must all have the same length",
        )
    }

    fn record(
        input: &SmoothImageInput,
        trace: &mut TraceRecorder<SmoothImageState>,
    ) -> Terminal<SmoothImageState> {
        let image = &input.image;
        let rows = image.len();
        let cols = image.first().map_or(0, Vec::len);
        let mut result = vec![vec![None; cols]; rows];

        for row in 0..rows {
            for col in 0..cols {
                let neighbors = neighborhood(rows, cols, row, col);
                let sum: u64 = neighbors.iter().map(|&(r, c)| u64::from(image[r][c])).sum();
                // the mean never exceeds the largest input value
                let average = (sum / neighbors.len() as u64) as u32;
                result[row][col] = Some(average);

                trace.step(
                    format!(
                        "Cell ({row}, {col}): {sum} / {} neighbors = {average}",
                        neighbors.len()
                    ),
                    SmoothImageState {
                        cell: Some((row, col)),
                        neighbors,
                        sum,
                        result: result.clone(),
                    },
                );
            }
        }

        Terminal::new(
            format!("Smoothed {rows}x{cols} image"),
            SmoothImageState {
                cell: None,
                neighbors: Neighborhood::new(),
                sum: 0,
                result,
            },
        )
    }
}

//! Circle and axis-aligned rectangle overlap
//!
//! The rectangle point nearest the centre is found by clamping each
//! coordinate into the rectangle. The shapes overlap when that point lies
//! within the radius. Coordinates are integers, so the trace is exact.

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

/// Bound on every coordinate and on the radius, keeping squares in range.
pub const COORD_LIMIT: i64 = 1_000_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct CircleOverlapInput {
    pub radius: i64,
    pub x_center: i64,
    pub y_center: i64,
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapStage {
    ClampX,
    ClampY,
    Compare,
    Done,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct CircleOverlapState {
    pub stage: OverlapStage,
    pub near_x: i64,
    pub near_y: Option<i64>,
    /// Horizontal distance from the centre to `near_x`.
    pub d1: i64,
    pub d2: Option<i64>,
    pub distance_sq: Option<i64>,
    pub radius_sq: i64,
    pub overlapping: Option<bool>,
}

pub struct CircleOverlap;

impl Recorder for CircleOverlap {
    const NAME: &'static str = "circle-overlap";
    type Input = CircleOverlapInput;
    type Payload = CircleOverlapState;

    fn validate(input: &CircleOverlapInput) -> Result<(), ValidationError> {
        ValidationError::ensure(Self::NAME, input.radius >= 1, "radius must be at least 1")?;
        ValidationError::ensure(
            Self::NAME,
            input.x1 <= input.x2 && input.y1 <= input.y2,
            "rectangle corners must satisfy x1 <= x2 and y1 <= y2",
        )?;
        let CircleOverlapInput {
            radius,
            x_center,
            y_center,
            x1,
            y1,
            x2,
            y2,
        } = *input;
        ValidationError::ensure(
            Self::NAME,
            [radius, x_center, y_center, x1, y1, x2, y2]
                .iter()
                .all(|v| v.abs() <= COORD_LIMIT),
            format!("coordinates and radius must be within ±{COORD_LIMIT}"),
        )
    }

    fn record(
        input: &CircleOverlapInput,
        trace: &mut TraceRecorder<CircleOverlapState>,
    ) -> Terminal<CircleOverlapState> {
        let (x, y) = (input.x_center, input.y_center);
        let radius_sq = input.radius * input.radius;

        let near_x = x.clamp(input.x1, input.x2);
        let d1 = (near_x - x).abs();
        let mut state = CircleOverlapState {
            stage: OverlapStage::ClampX,
            near_x,
            near_y: None,
            d1,
            d2: None,
            distance_sq: None,
            radius_sq,
            overlapping: None,
        };
        trace.step(
            format!(
                "Clamp x = {x} into [{}, {}]: nearest x is {near_x}, d1 = {d1}",
                input.x1, input.x2
            ),
            state,
        );

        let near_y = y.clamp(input.y1, input.y2);
        let d2 = (near_y - y).abs();
        state.stage = OverlapStage::ClampY;
        state.near_y = Some(near_y);
        state.d2 = Some(d2);
        trace.step(
            format!(
                "Clamp y = {y} into [{}, {}]: nearest y is {near_y}, d2 = {d2}",
                input.y1, input.y2
            ),
            state,
        );

        let distance_sq = d1 * d1 + d2 * d2;
        let overlapping = distance_sq <= radius_sq;
        state.stage = OverlapStage::Compare;
        state.distance_sq = Some(distance_sq);
        state.overlapping = Some(overlapping);
        let relation = if overlapping { "<=" } else { ">" };
        trace.step(
            format!("d1² + d2² = {distance_sq} {relation} r² = {radius_sq}"),
            state,
        );

        state.stage = OverlapStage::Done;
        let label = if overlapping {
            format!("Circle overlaps the rectangle at ({near_x}, {near_y})")
        } else {
            "Circle does not overlap the rectangle".to_string()
        };
        Terminal::new(label, state)
    }
}

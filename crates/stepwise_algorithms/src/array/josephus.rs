//! Josephus elimination: `n` players in a circle, every `k`-th is removed

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

/// Largest circle accepted; keeps per-step snapshots bounded.
pub const MAX_PLAYERS: usize = 1024;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct JosephusInput {
    pub n: usize,
    pub k: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct JosephusState {
    /// `alive[i]` is seat `i + 1`.
    pub alive: Vec<bool>,
    /// Seats (1-based) counted this round, ending with the eliminated one.
    pub counted: SmallVec<[usize; 8]>,
    pub eliminated: Option<usize>,
    /// Elimination order so far (1-based seats).
    pub order: Vec<usize>,
    pub survivor: Option<usize>,
}

pub struct Josephus;

impl Recorder for Josephus {
    const NAME: &'static str = "josephus";
    type Input = JosephusInput;
    type Payload = JosephusState;

    fn validate(input: &JosephusInput) -> Result<(), ValidationError> {
        ValidationError::ensure(Self::NAME, input.n >= 1, "n must be at least 1")?;
        ValidationError::ensure(
            Self::NAME,
            input.n <= MAX_PLAYERS,
            format!("n must be at most {MAX_PLAYERS}"),
        )?;
        ValidationError::ensure(Self::NAME, input.k >= 1, "k must be at least 1")
    }

    fn record(
        input: &JosephusInput,
        trace: &mut TraceRecorder<JosephusState>,
    ) -> Terminal<JosephusState> {
        let n = input.n;
        let mut state = JosephusState {
            alive: vec![true; n],
            counted: SmallVec::new(),
            eliminated: None,
            order: Vec::with_capacity(n.saturating_sub(1)),
            survivor: None,
        };

        if n > 1 {
            trace.step(
                format!("Seated {n} players, eliminating every {}", ordinal(input.k)),
                state.clone(),
            );
        }

        let mut remaining = n;
        let mut start = 0;
        while remaining > 1 {
            // Counting past a full lap lands on the same seat, so only the
            // remainder of the count is walked.
            let hops = (input.k - 1) % remaining;

            let mut seat = next_alive(&state.alive, start);
            state.counted.clear();
            state.counted.push(seat + 1);
            for _ in 0..hops {
                seat = next_alive(&state.alive, (seat + 1) % n);
                state.counted.push(seat + 1);
            }

            state.alive[seat] = false;
            state.eliminated = Some(seat + 1);
            state.order.push(seat + 1);
            remaining -= 1;
            start = (seat + 1) % n;

            trace.step(
                format!(
                    "Counted {:?}, player {} is eliminated ({remaining} left)",
                    state.counted.as_slice(),
                    seat + 1
                ),
                state.clone(),
            );
        }

        let survivor = state.alive.iter().position(|&a| a).map(|i| i + 1);
        state.counted.clear();
        state.eliminated = None;
        state.survivor = survivor;
        let label = match survivor {
            Some(seat) => format!("Player {seat} survives"),
            None => "No players remain".to_string(),
        };
        Terminal::new(label, state)
    }
}

/// First living seat at or after `from`, wrapping around.
fn next_alive(alive: &[bool], from: usize) -> usize {
    let n = alive.len();
    (0..n)
        .map(|offset| (from + offset) % n)
        .find(|&i| alive[i])
        .unwrap_or(from)
}

fn ordinal(k: usize) -> String {
    let suffix = match (k % 10, k % 100) {
        (1, r) if r != 11 => "st",
        (2, r) if r != 12 => "nd",
        (3, r) if r != 13 => "rd",
        _ => "th",
    };
    format!("{k}{suffix} player")
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::record;

    fn run(n: usize, k: usize) -> stepwise_core::Trace<JosephusState> {
        record::<Josephus>(&JosephusInput { n, k }).unwrap()
    }

    #[test]
    fn test_gallery_example() {
        let trace = run(5, 2);
        let result = &trace.terminal().payload;
        assert_eq!(result.order, vec![2, 4, 1, 5]);
        assert_eq!(result.survivor, Some(3));
        // seating + one step per elimination + terminal
        assert_eq!(trace.len(), 1 + 4 + 1);
    }

    #[test]
    fn test_classic_seven_three() {
        let result = run(7, 3).terminal().payload.clone();
        assert_eq!(result.order, vec![3, 6, 2, 7, 5, 1]);
        assert_eq!(result.survivor, Some(4));
    }

    #[test]
    fn test_k_larger_than_circle_wraps() {
        // k = 7 over 5 players behaves like k = 2 on the first round
        let trace = run(5, 7);
        assert_eq!(trace.steps()[1].payload.eliminated, Some(2));
        assert_eq!(trace.terminal().payload.order.len(), 4);
    }

    #[test]
    fn test_single_player_survives_immediately() {
        let trace = run(1, 3);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.terminal().payload.survivor, Some(1));
    }

    #[test]
    fn test_counted_path_ends_at_eliminated_seat() {
        let trace = run(6, 4);
        for step in &trace.steps()[1..trace.last_index()] {
            let state = &step.payload;
            assert_eq!(state.counted.last().copied(), state.eliminated);
        }
    }

    #[test]
    fn test_rejects_zero_k() {
        let err = record::<Josephus>(&JosephusInput { n: 4, k: 0 }).unwrap_err();
        assert_eq!(err.constraint, "k must be at least 1");
    }

    #[test]
    fn test_ordinal() {
        assert_eq!(ordinal(1), "1st player");
        assert_eq!(ordinal(2), "2nd player");
        assert_eq!(ordinal(11), "11th player");
        assert_eq!(ordinal(23), "23rd player");
    }
}

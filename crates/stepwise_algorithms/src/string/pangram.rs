//! Pangram check: does the text contain all 26 letters?

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PangramInput {
    pub text: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LetterOutcome {
    New,
    Repeat,
    NotALetter,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PangramState {
    pub index: Option<usize>,
    pub ch: Option<char>,
    pub outcome: Option<LetterOutcome>,
    /// `seen[0]` is 'a'.
    pub seen: [bool; 26],
    pub unique: usize,
    pub is_pangram: Option<bool>,
}

pub struct Pangram;

impl Recorder for Pangram {
    const NAME: &'static str = "pangram";
    type Input = PangramInput;
    type Payload = PangramState;

    fn validate(_input: &PangramInput) -> Result<(), ValidationError> {
        Ok(())
    }

    fn record(
        input: &PangramInput,
        trace: &mut TraceRecorder<PangramState>,
    ) -> Terminal<PangramState> {
        let mut state = PangramState {
            index: None,
            ch: None,
            outcome: None,
            seen: [false; 26],
            unique: 0,
            is_pangram: None,
        };

        for (index, ch) in input.text.chars().enumerate() {
            let lower = ch.to_ascii_lowercase();
            let outcome = if lower.is_ascii_lowercase() {
                let slot = (lower as u8 - b'a') as usize;
                if state.seen[slot] {
                    LetterOutcome::Repeat
                } else {
                    state.seen[slot] = true;
                    state.unique += 1;
                    LetterOutcome::New
                }
            } else {
                LetterOutcome::NotALetter
            };

            state.index = Some(index);
            state.ch = Some(ch);
            state.outcome = Some(outcome);
            let label = match outcome {
                LetterOutcome::New => format!("New letter '{lower}' ({}/26)", state.unique),
                LetterOutcome::Repeat => format!("'{lower}' already seen"),
                LetterOutcome::NotALetter => format!("Skip non-letter {ch:?}"),
            };
            trace.step(label, state.clone());
        }

        let is_pangram = state.unique == 26;
        state.is_pangram = Some(is_pangram);
        state.index = None;
        state.ch = None;
        state.outcome = None;

        let label = if is_pangram {
            "All 26 letters present: pangram".to_string()
        } else {
            let missing: String = (b'a'..=b'z')
                .zip(state.seen.iter())
                .filter(|(_, seen)| !**seen)
                .map(|(c, _)| c as char)
                .collect();
            format!("Not a pangram, missing: {missing}")
        };
        Terminal::new(label, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::record;

    fn run(text: &str) -> stepwise_core::Trace<PangramState> {
        record::<Pangram>(&PangramInput { text: text.into() }).unwrap()
    }

    #[test]
    fn test_gallery_example() {
        let trace = run("thequickbrownfoxjumpsoverthelazydog");
        assert_eq!(trace.terminal().payload.is_pangram, Some(true));
        assert_eq!(trace.terminal().payload.unique, 26);
    }

    #[test]
    fn test_missing_letters_are_named() {
        let trace = run("leetcode");
        assert_eq!(trace.terminal().payload.is_pangram, Some(false));
        assert!(trace.terminal().label.starts_with("Not a pangram, missing: abfghij"));
    }

    #[test]
    fn test_letter_table_is_recorded_per_step() {
        let trace = run("Aa!");
        assert_eq!(trace.steps()[0].payload.outcome, Some(LetterOutcome::New));
        assert!(trace.steps()[0].payload.seen[0]);
        assert_eq!(trace.steps()[1].payload.outcome, Some(LetterOutcome::Repeat));
        assert_eq!(trace.steps()[2].payload.outcome, Some(LetterOutcome::NotALetter));
    }

    #[test]
    fn test_empty_text() {
        let trace = run("");
        assert_eq!(trace.len(), 1);
        assert_eq!(trace.terminal().payload.is_pangram, Some(false));
    }
}

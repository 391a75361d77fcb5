//! Do both halves of a string hold the same number of vowels?

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct HalvesAlikeInput {
    pub text: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HalvesAlikeState {
    /// Character positions compared at this step.
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub left_char: Option<char>,
    pub right_char: Option<char>,
    pub left_vowels: usize,
    pub right_vowels: usize,
    pub alike: Option<bool>,
}

pub struct HalvesAlike;

pub fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

impl Recorder for HalvesAlike {
    const NAME: &'static str = "halves-alike";
    type Input = HalvesAlikeInput;
    type Payload = HalvesAlikeState;

    fn validate(input: &HalvesAlikeInput) -> Result<(), ValidationError> {
        ValidationError::ensure(
            Self::NAME,
            input.text.chars().count() % 2 == 0,
            "string length must be even",
        )
    }

    fn record(
        input: &HalvesAlikeInput,
        trace: &mut TraceRecorder<HalvesAlikeState>,
    ) -> Terminal<HalvesAlikeState> {
        let chars: Vec<char> = input.text.chars().collect();
        let half = chars.len() / 2;
        let mut state = HalvesAlikeState {
            left: None,
            right: None,
            left_char: None,
            right_char: None,
            left_vowels: 0,
            right_vowels: 0,
            alike: None,
        };

        for left in 0..half {
            let right = left + half;
            let (lc, rc) = (chars[left], chars[right]);
            if is_vowel(lc) {
                state.left_vowels += 1;
            }
            if is_vowel(rc) {
                state.right_vowels += 1;
            }
            state.left = Some(left);
            state.right = Some(right);
            state.left_char = Some(lc);
            state.right_char = Some(rc);

            trace.step(
                format!(
                    "Compare '{lc}' and '{rc}': vowels {} vs {}",
                    state.left_vowels, state.right_vowels
                ),
                state.clone(),
            );
        }

        let alike = state.left_vowels == state.right_vowels;
        state.alike = Some(alike);
        state.left = None;
        state.right = None;
        state.left_char = None;
        state.right_char = None;
        let label = if alike {
            format!("Both halves have {} vowels", state.left_vowels)
        } else {
            format!(
                "Halves differ: {} vs {} vowels",
                state.left_vowels, state.right_vowels
            )
        };
        Terminal::new(label, state)
    }
}

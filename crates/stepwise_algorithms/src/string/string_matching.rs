//! Words that occur inside another word, or that contain a search term
//!
//! Every alignment of a candidate needle against a haystack is one step.
//! Without a search term, each word is tested against every other distinct
//! word and kept once the first containing word is found.

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct StringMatchingInput {
    pub words: Vec<String>,
    /// Blank or missing means compare the words against each other.
    #[serde(default)]
    pub search: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Alignment {
    pub needle: String,
    pub haystack: String,
    /// Character offset into the haystack.
    pub offset: usize,
    /// Characters matched before the first mismatch.
    pub matched: usize,
    pub found: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StringMatchingState {
    pub alignment: Option<Alignment>,
    pub result: Vec<String>,
}

pub struct StringMatching;

/// Slide `needle` across `haystack`, one step per offset, stopping at the first hit.
fn scan(
    needle: &str,
    haystack: &str,
    result: &[String],
    trace: &mut TraceRecorder<StringMatchingState>,
) -> bool {
    let n: Vec<char> = needle.chars().collect();
    let h: Vec<char> = haystack.chars().collect();
    if n.len() > h.len() {
        return false;
    }

    for offset in 0..=h.len() - n.len() {
        let matched = n
            .iter()
            .zip(&h[offset..])
            .take_while(|(a, b)| a == b)
            .count();
        let found = matched == n.len();
        let label = if found {
            format!("\"{needle}\" found in \"{haystack}\" at {offset}")
        } else {
            format!("\"{needle}\" vs \"{haystack}\" at {offset}: mismatch after {matched}")
        };
        trace.step(
            label,
            StringMatchingState {
                alignment: Some(Alignment {
                    needle: needle.to_string(),
                    haystack: haystack.to_string(),
                    offset,
                    matched,
                    found,
                }),
                result: result.to_vec(),
            },
        );
        if found {
            return true;
        }
    }
    false
}

impl Recorder for StringMatching {
    const NAME: &'static str = "string-matching";
    type Input = StringMatchingInput;
    type Payload = StringMatchingState;

    fn validate(_input: &StringMatchingInput) -> Result<(), ValidationError> {
        Ok(())
    }

    fn record(
        input: &StringMatchingInput,
        trace: &mut TraceRecorder<StringMatchingState>,
    ) -> Terminal<StringMatchingState> {
        let words = &input.words;
        let search = input
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty());
        let mut result: Vec<String> = Vec::new();

        match search {
            Some(term) => {
                for word in words {
                    if scan(term, word, &result, trace) {
                        result.push(word.clone());
                    }
                }
            }
            None => {
                for (i, needle) in words.iter().enumerate() {
                    let contained = words
                        .iter()
                        .enumerate()
                        .filter(|&(j, other)| j != i && other != needle)
                        .any(|(_, haystack)| scan(needle, haystack, &result, trace));
                    if contained {
                        result.push(needle.clone());
                    }
                }
            }
        }

        let label = match search {
            Some(term) if result.is_empty() => format!("No word contains \"{term}\""),
            Some(term) => format!("{} words contain \"{term}\"", result.len()),
            None if result.is_empty() => "No word is a substring of another".to_string(),
            None => format!("Substrings: {}", result.join(", ")),
        };
        Terminal::new(
            label,
            StringMatchingState {
                alignment: None,
                result,
            },
        )
    }
}

//! Count the words that start with a given prefix

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PrefixCountInput {
    pub words: Vec<String>,
    pub prefix: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrefixCountState {
    pub index: Option<usize>,
    pub matched: bool,
    pub count: usize,
    /// Indices of the matching words so far.
    pub matches: Vec<usize>,
}

pub struct PrefixCount;

impl Recorder for PrefixCount {
    const NAME: &'static str = "prefix-count";
    type Input = PrefixCountInput;
    type Payload = PrefixCountState;

    fn validate(input: &PrefixCountInput) -> Result<(), ValidationError> {
        ValidationError::ensure(Self::NAME, !input.prefix.is_empty(), "prefix must not be empty")
    }

    fn record(
        input: &PrefixCountInput,
        trace: &mut TraceRecorder<PrefixCountState>,
    ) -> Terminal<PrefixCountState> {
        let prefix = input.prefix.as_str();
        let mut state = PrefixCountState {
            index: None,
            matched: false,
            count: 0,
            matches: Vec::new(),
        };

        for (index, word) in input.words.iter().enumerate() {
            state.index = Some(index);
            state.matched = word.starts_with(prefix);
            if state.matched {
                state.count += 1;
                state.matches.push(index);
            }
            let label = if state.matched {
                format!("\"{word}\" starts with \"{prefix}\" (count {})", state.count)
            } else {
                format!("\"{word}\" does not start with \"{prefix}\"")
            };
            trace.step(label, state.clone());
        }

        state.index = None;
        state.matched = false;
        Terminal::new(
            format!("{} words start with \"{prefix}\"", state.count),
            state,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_core::record;

    fn count(words: &[&str], prefix: &str) -> usize {
        record::<PrefixCount>(&PrefixCountInput {
            words: words.iter().map(|w| w.to_string()).collect(),
            prefix: prefix.into(),
        })
        .unwrap()
        .terminal()
        .payload
        .count
    }

    #[test]
    fn test_counts_matches() {
        assert_eq!(count(&["pay", "attention", "practice", "attend"], "at"), 2);
        assert_eq!(count(&["leetcode", "win", "loops", "success"], "code"), 0);
    }

    #[test]
    fn test_rejects_empty_prefix() {
        let err = record::<PrefixCount>(&PrefixCountInput {
            words: vec![],
            prefix: String::new(),
        })
        .unwrap_err();
        assert_eq!(err.constraint, "prefix must not be empty");
    }
}

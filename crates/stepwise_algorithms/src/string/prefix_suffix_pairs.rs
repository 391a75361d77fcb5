//! Count index pairs `i < j` where `words[i]` is both a prefix and a suffix of `words[j]`

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct PrefixSuffixPairsInput {
    pub words: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PrefixSuffixPairsState {
    pub i: Option<usize>,
    pub j: Option<usize>,
    pub is_prefix: bool,
    pub is_suffix: bool,
    pub count: usize,
    pub pairs: Vec<(usize, usize)>,
}

pub struct PrefixSuffixPairs;

impl Recorder for PrefixSuffixPairs {
    const NAME: &'static str = "prefix-suffix-pairs";
    type Input = PrefixSuffixPairsInput;
    type Payload = PrefixSuffixPairsState;

    fn validate(_input: &PrefixSuffixPairsInput) -> Result<(), ValidationError> {
        Ok(())
    }

    fn record(
        input: &PrefixSuffixPairsInput,
        trace: &mut TraceRecorder<PrefixSuffixPairsState>,
    ) -> Terminal<PrefixSuffixPairsState> {
        let words = &input.words;
        let mut state = PrefixSuffixPairsState {
            i: None,
            j: None,
            is_prefix: false,
            is_suffix: false,
            count: 0,
            pairs: Vec::new(),
        };

        for i in 0..words.len() {
            for j in i + 1..words.len() {
                let (short, long) = (&words[i], &words[j]);
                state.i = Some(i);
                state.j = Some(j);
                state.is_prefix = long.starts_with(short.as_str());
                state.is_suffix = long.ends_with(short.as_str());

                let label = if state.is_prefix && state.is_suffix {
                    state.count += 1;
                    state.pairs.push((i, j));
                    format!("\"{short}\" is prefix and suffix of \"{long}\" (count {})", state.count)
                } else {
                    let missing = match (state.is_prefix, state.is_suffix) {
                        (false, false) => "neither prefix nor suffix",
                        (true, false) => "a prefix but not a suffix",
                        _ => "a suffix but not a prefix",
                    };
                    format!("\"{short}\" is {missing} of \"{long}\"")
                };
                trace.step(label, state.clone());
            }
        }

        state.i = None;
        state.j = None;
        state.is_prefix = false;
        state.is_suffix = false;
        Terminal::new(format!("{} matching pairs", state.count), state)
    }
}

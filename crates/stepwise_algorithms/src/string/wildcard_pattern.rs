//! Single-wildcard substring match: does `before*after` occur in the text?

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct WildcardPatternInput {
    pub text: String,
    pub pattern: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PatternProbe {
    /// Text before the `*` compared at `at`.
    Prefix { at: usize, hit: bool },
    /// Text after the `*` compared at `at`, with the prefix anchored at `start`.
    Suffix { start: usize, at: usize, hit: bool },
}

/// Half-open character range of the whole match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pub start: usize,
    pub end: usize,
    /// What the `*` stands for.
    pub middle: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WildcardPatternState {
    pub before: String,
    pub after: String,
    pub probe: Option<PatternProbe>,
    pub matched: Option<PatternMatch>,
    pub has_wildcard: bool,
}

pub struct WildcardPattern;

fn matches_at(text: &[char], at: usize, part: &[char]) -> bool {
    text.get(at..at + part.len()).is_some_and(|window| window == part)
}

impl Recorder for WildcardPattern {
    const NAME: &'static str = "wildcard-pattern";
    type Input = WildcardPatternInput;
    type Payload = WildcardPatternState;

    fn validate(input: &WildcardPatternInput) -> Result<(), ValidationError> {
        ValidationError::ensure(Self::NAME, !input.pattern.is_empty(), "pattern must not be empty")?;
        ValidationError::ensure(
            Self::NAME,
            input.pattern.matches('*').count() <= 1,
            "pattern may contain at most one '*'",
        )
    }

    fn record(
        input: &WildcardPatternInput,
        trace: &mut TraceRecorder<WildcardPatternState>,
    ) -> Terminal<WildcardPatternState> {
        let Some((before, after)) = input.pattern.split_once('*') else {
            return Terminal::new(
                format!("Pattern \"{}\" has no '*': no match", input.pattern),
                WildcardPatternState {
                    before: String::new(),
                    after: String::new(),
                    probe: None,
                    matched: None,
                    has_wildcard: false,
                },
            );
        };

        let text: Vec<char> = input.text.chars().collect();
        let head: Vec<char> = before.chars().collect();
        let tail: Vec<char> = after.chars().collect();
        let base = WildcardPatternState {
            before: before.to_string(),
            after: after.to_string(),
            probe: None,
            matched: None,
            has_wildcard: true,
        };
        let probe = |p: PatternProbe| WildcardPatternState {
            probe: Some(p),
            ..base.clone()
        };

        if head.len() <= text.len() {
            for start in 0..=text.len() - head.len() {
                let hit = matches_at(&text, start, &head);
                trace.step(
                    if hit {
                        format!("\"{before}\" found at {start}")
                    } else {
                        format!("\"{before}\" not at {start}")
                    },
                    probe(PatternProbe::Prefix { at: start, hit }),
                );
                if !hit {
                    continue;
                }

                let from = start + head.len();
                if from + tail.len() > text.len() {
                    continue;
                }
                for at in from..=text.len() - tail.len() {
                    let hit = matches_at(&text, at, &tail);
                    trace.step(
                        if hit {
                            format!("\"{after}\" found at {at}")
                        } else {
                            format!("\"{after}\" not at {at}")
                        },
                        probe(PatternProbe::Suffix { start, at, hit }),
                    );
                    if hit {
                        let matched = PatternMatch {
                            start,
                            end: at + tail.len(),
                            middle: text[from..at].iter().collect(),
                        };
                        let label = format!(
                            "Match [{}, {}): '*' stands for \"{}\"",
                            matched.start, matched.end, matched.middle
                        );
                        return Terminal::new(
                            label,
                            WildcardPatternState {
                                matched: Some(matched),
                                ..base.clone()
                            },
                        );
                    }
                }
            }
        }

        Terminal::new(format!("\"{}\" does not occur in the text", input.pattern), base)
    }
}

//! Integer to Roman numeral (greedy symbol emission)

use serde::{Deserialize, Serialize};
use stepwise_core::{Recorder, Terminal, TraceRecorder, ValidationError};

/// Value/symbol table, largest first, including subtractive forms.
pub const SYMBOLS: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RomanInput {
    pub number: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RomanState {
    /// Index into [`SYMBOLS`] considered at this step.
    pub symbol_index: Option<usize>,
    pub value: Option<u32>,
    pub symbol: Option<&'static str>,
    /// How many times the symbol was emitted (0 means skipped).
    pub times: u32,
    pub remaining_before: u32,
    pub remaining: u32,
    pub numeral: String,
}

pub struct Roman;

impl Recorder for Roman {
    const NAME: &'static str = "roman";
    type Input = RomanInput;
    type Payload = RomanState;

    fn validate(input: &RomanInput) -> Result<(), ValidationError> {
        ValidationError::ensure(
            Self::NAME,
            (1..=3999).contains(&input.number),
            "number must be in 1..=3999",
        )
    }

    fn record(input: &RomanInput, trace: &mut TraceRecorder<RomanState>) -> Terminal<RomanState> {
        let mut remaining = input.number;
        let mut numeral = String::new();

        for (i, &(value, symbol)) in SYMBOLS.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let times = remaining / value;
            let before = remaining;
            remaining %= value;
            numeral.push_str(&symbol.repeat(times as usize));

            let label = if times > 0 {
                format!("{before} / {value} = {times}: append {times} x {symbol}, {remaining} left")
            } else {
                format!("{value} ({symbol}) does not fit into {before}")
            };
            trace.step(
                label,
                RomanState {
                    symbol_index: Some(i),
                    value: Some(value),
                    symbol: Some(symbol),
                    times,
                    remaining_before: before,
                    remaining,
                    numeral: numeral.clone(),
                },
            );
        }

        Terminal::new(
            format!("{} = {numeral}", input.number),
            RomanState {
                symbol_index: None,
                value: None,
                symbol: None,
                times: 0,
                remaining_before: 0,
                remaining: 0,
                numeral,
            },
        )
    }
}

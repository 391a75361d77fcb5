//! Stepwise Algorithms
//!
//! Trace recorders for the algorithm gallery. Every algorithm is a
//! [`Recorder`] that can be run with its typed input through
//! [`stepwise_core::record`], or by id with a JSON input through
//! [`create_trace`], which yields a uniform `Trace<Snapshot>`.
//!
//! # Example
//!
//! ```rust
//! use stepwise_algorithms::{create_trace, AlgorithmId, Snapshot};
//!
//! let input = serde_json::json!({ "nums": [2, 0, 2, 1, 1, 0] });
//! let trace = create_trace(AlgorithmId::DutchFlag, input).unwrap();
//!
//! match &trace.terminal().payload {
//!     Snapshot::DutchFlag(state) => assert_eq!(state.nums, vec![0, 0, 1, 1, 2, 2]),
//!     other => panic!("unexpected snapshot {other:?}"),
//! }
//! ```

pub mod array;
pub mod grid;
pub mod string;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
pub use stepwise_core::{record, Recorder, Step, Trace, ValidationError};
use thiserror::Error;

use array::*;
use grid::*;
use string::*;

/// Returned when parsing an algorithm id that does not exist.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown algorithm `{0}`")]
pub struct UnknownAlgorithm(pub String);

/// Which part of the gallery an algorithm belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Array,
    String,
    Grid,
}

macro_rules! algorithms {
    ($( $variant:ident($state:ty) => $recorder:ty, $category:ident, $title:literal; )*) => {
        /// Identifies one algorithm in the gallery.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum AlgorithmId {
            $( $variant, )*
        }

        impl AlgorithmId {
            pub const ALL: &'static [AlgorithmId] = &[$( AlgorithmId::$variant, )*];

            /// Kebab-case id, as used on the command line and in errors.
            pub fn name(self) -> &'static str {
                match self {
                    $( AlgorithmId::$variant => <$recorder as Recorder>::NAME, )*
                }
            }

            /// Human-readable title.
            pub fn title(self) -> &'static str {
                match self {
                    $( AlgorithmId::$variant => $title, )*
                }
            }

            pub fn category(self) -> Category {
                match self {
                    $( AlgorithmId::$variant => Category::$category, )*
                }
            }
        }

        /// The payload of a step from any algorithm.
        ///
        /// Serialized with an `algorithm` tag holding the algorithm's id.
        #[derive(Clone, Debug, PartialEq, Eq, Serialize)]
        #[serde(tag = "algorithm", rename_all = "kebab-case")]
        pub enum Snapshot {
            $( $variant($state), )*
        }

        impl Snapshot {
            pub fn algorithm(&self) -> AlgorithmId {
                match self {
                    $( Snapshot::$variant(_) => AlgorithmId::$variant, )*
                }
            }
        }

        /// Record a trace for `id` from a JSON input.
        ///
        /// Input that does not deserialize into the algorithm's input type is
        /// reported as a [`ValidationError`], like any other rejected input.
        pub fn create_trace(id: AlgorithmId, input: Value) -> Result<Trace<Snapshot>, ValidationError> {
            match id {
                $( AlgorithmId::$variant => record_as::<$recorder>(input, Snapshot::$variant), )*
            }
        }
    };
}

algorithms! {
    DutchFlag(DutchFlagState) => array::DutchFlag, Array, "Dutch National Flag";
    SlidingWindow(SlidingWindowState) => array::SlidingWindow, Array, "Minimum Size Subarray Sum";
    DoubleOriginal(DoubleOriginalState) => array::DoubleOriginal, Array, "Original Array From Doubled Array";
    Josephus(JosephusState) => array::Josephus, Array, "Josephus Problem";
    Roman(RomanState) => string::Roman, String, "Integer to Roman";
    NearbyDuplicate(NearbyDuplicateState) => array::NearbyDuplicate, Array, "Contains Nearby Duplicate";
    ErrorNumbers(ErrorNumbersState) => array::ErrorNumbers, Array, "Set Mismatch";
    HalvesAlike(HalvesAlikeState) => string::HalvesAlike, String, "String Halves Alike";
    NiceSubarrays(NiceSubarraysState) => array::NiceSubarrays, Array, "Count Nice Subarrays";
    Pangram(PangramState) => string::Pangram, String, "Pangram Checker";
    PrefixSuffixPairs(PrefixSuffixPairsState) => string::PrefixSuffixPairs, String, "Prefix and Suffix Pairs";
    PrefixCount(PrefixCountState) => string::PrefixCount, String, "Words With a Given Prefix";
    SingleElement(SingleElementState) => array::SingleElement, Array, "Single Element in a Sorted Array";
    StringMatching(StringMatchingState) => string::StringMatching, String, "String Matching in an Array";
    WildcardPattern(WildcardPatternState) => string::WildcardPattern, String, "Substring Matching Pattern";
    SmoothImage(SmoothImageState) => grid::SmoothImage, Grid, "Image Smoother";
    ImageOverlap(ImageOverlapState) => grid::ImageOverlap, Grid, "Image Overlap";
    CircleOverlap(CircleOverlapState) => grid::CircleOverlap, Grid, "Circle and Rectangle Overlap";
}

fn record_as<R>(
    input: Value,
    wrap: impl Fn(R::Payload) -> Snapshot,
) -> Result<Trace<Snapshot>, ValidationError>
where
    R: Recorder,
    R::Input: DeserializeOwned,
{
    let input: R::Input = serde_json::from_value(input).map_err(|e| {
        tracing::debug!(algorithm = R::NAME, error = %e, "malformed input");
        ValidationError::new(R::NAME, format!("malformed input: {e}"))
    })?;
    Ok(record::<R>(&input)?.map(wrap))
}

impl AlgorithmId {
    /// The gallery's default input for this algorithm.
    pub fn example_input(self) -> Value {
        match self {
            AlgorithmId::DutchFlag => json!({ "nums": [2, 0, 2, 1, 1, 0] }),
            AlgorithmId::SlidingWindow => json!({ "nums": [2, 3, 1, 2, 4, 3], "target": 7 }),
            AlgorithmId::DoubleOriginal => json!({ "changed": [1, 4, 2, 8, 6, 9, 7, 3] }),
            AlgorithmId::Josephus => json!({ "n": 5, "k": 2 }),
            AlgorithmId::Roman => json!({ "number": 3549 }),
            AlgorithmId::NearbyDuplicate => json!({ "nums": [1, 2, 3, 1, 2, 3], "k": 2 }),
            AlgorithmId::ErrorNumbers => json!({ "nums": [1, 2, 2, 4] }),
            AlgorithmId::HalvesAlike => json!({ "text": "textbook" }),
            AlgorithmId::NiceSubarrays => json!({ "nums": [1, 1, 2, 1, 1], "k": 3 }),
            AlgorithmId::Pangram => json!({ "text": "thequickbrownfoxjumpsoverthelazydog" }),
            AlgorithmId::PrefixSuffixPairs => json!({ "words": ["a", "aba", "ababa", "aa"] }),
            AlgorithmId::PrefixCount => {
                json!({ "words": ["pay", "attention", "practice", "attend"], "prefix": "at" })
            }
            AlgorithmId::SingleElement => json!({ "nums": [1, 1, 2, 2, 3, 3, 4, 5, 5, 6, 6] }),
            AlgorithmId::StringMatching => json!({ "words": ["mass", "as", "hero", "superhero"] }),
            AlgorithmId::WildcardPattern => json!({ "text": "leetcode", "pattern": "ee*e" }),
            AlgorithmId::SmoothImage => {
                json!({ "image": [[100, 200, 100], [200, 50, 200], [100, 200, 100]] })
            }
            AlgorithmId::ImageOverlap => json!({
                "first": [[1, 1, 0], [0, 1, 0], [0, 1, 0]],
                "second": [[0, 0, 0], [0, 1, 1], [0, 0, 1]],
            }),
            AlgorithmId::CircleOverlap => json!({
                "radius": 40,
                "x_center": 150,
                "y_center": 150,
                "x1": 200,
                "y1": 100,
                "x2": 300,
                "y2": 200,
            }),
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AlgorithmId {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AlgorithmId::ALL
            .iter()
            .copied()
            .find(|id| id.name() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

impl Serialize for AlgorithmId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

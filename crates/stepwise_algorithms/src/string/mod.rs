//! String algorithms: scans, pair checks and pattern matching.

pub mod halves_alike;
pub mod pangram;
pub mod prefix_count;
pub mod prefix_suffix_pairs;
pub mod roman;
pub mod string_matching;
pub mod wildcard_pattern;

pub use halves_alike::{HalvesAlike, HalvesAlikeInput, HalvesAlikeState};
pub use pangram::{Pangram, PangramInput, PangramState};
pub use prefix_count::{PrefixCount, PrefixCountInput, PrefixCountState};
pub use prefix_suffix_pairs::{PrefixSuffixPairs, PrefixSuffixPairsInput, PrefixSuffixPairsState};
pub use roman::{Roman, RomanInput, RomanState};
pub use string_matching::{StringMatching, StringMatchingInput, StringMatchingState};
pub use wildcard_pattern::{WildcardPattern, WildcardPatternInput, WildcardPatternState};

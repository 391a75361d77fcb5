//! Array algorithms: pointer partitions, windows, tables and searches.

pub mod double_original;
pub mod dutch_flag;
pub mod error_numbers;
pub mod josephus;
pub mod nearby_duplicate;
pub mod nice_subarrays;
pub mod single_element;
pub mod sliding_window;

pub use double_original::{DoubleOriginal, DoubleOriginalInput, DoubleOriginalState};
pub use dutch_flag::{DutchFlag, DutchFlagInput, DutchFlagState};
pub use error_numbers::{ErrorNumbers, ErrorNumbersInput, ErrorNumbersState};
pub use josephus::{Josephus, JosephusInput, JosephusState};
pub use nearby_duplicate::{NearbyDuplicate, NearbyDuplicateInput, NearbyDuplicateState};
pub use nice_subarrays::{NiceSubarrays, NiceSubarraysInput, NiceSubarraysState};
pub use single_element::{SingleElement, SingleElementInput, SingleElementState};
pub use sliding_window::{SlidingWindow, SlidingWindowInput, SlidingWindowState};

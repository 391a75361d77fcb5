//! Grid and plane geometry algorithms.

pub mod circle_overlap;
pub mod image_overlap;
pub mod smooth_image;

pub use circle_overlap::{CircleOverlap, CircleOverlapInput, CircleOverlapState};
pub use image_overlap::{ImageOverlap, ImageOverlapInput, ImageOverlapState};
pub use smooth_image::{SmoothImage, SmoothImageInput, SmoothImageState};

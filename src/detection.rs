//! Decoding of raw detector output into suppressed, labelled detections.

mod builder;
mod decoder;
mod labels;
mod nms;
mod types;

pub use builder::DetectionBuilder;
pub use decoder::{Decoder, DecoderConfig, OutputShape};
pub use labels::{load_labels, parse_labels};
pub use nms::non_max_suppression;
pub use types::Detection;

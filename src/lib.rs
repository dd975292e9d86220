//! Real-time traffic analytics core.
//!
//! Decodes the raw output tensor of a YOLO-style detector into boxes,
//! suppresses duplicates with greedy NMS and keeps stable identities for
//! objects across frames, counting every entry into the danger zone at the
//! bottom of the view.
//!
//! ```ignore
//! use roadtrack::{Pipeline, PipelineConfig};
//!
//! let mut pipeline = Pipeline::new(engine, labels, PipelineConfig::default());
//! pipeline.set_viewport(1080.0, 1920.0);
//! let output = pipeline.process_frame(&pixels, width, height, now_ms)?;
//! for track in &output.active_tracks {
//!     println!("{} #{} {:?}", track.label, track.id, track.rect);
//! }
//! ```

pub mod detection;
pub mod error;
pub mod integration;
pub mod tracker;

pub use detection::{Decoder, DecoderConfig, Detection, DetectionBuilder, OutputShape};
pub use error::{DecodeError, LabelError, PipelineError};
pub use integration::{
    FrameOutput, InferenceEngine, Pipeline, PipelineConfig, Report, TrafficConfig,
    TrafficDurations, TrafficState,
};
pub use tracker::{
    HistoricalRecord, Rect, Track, TrackEvent, TrackState, Tracker, TrackerConfig, Viewport,
};

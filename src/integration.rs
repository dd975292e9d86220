//! Per-frame orchestration: inference output in, tracked objects and
//! session statistics out.

mod engine;
mod pipeline;
mod report;
mod traffic;

pub use engine::InferenceEngine;
pub use pipeline::{FrameOutput, Pipeline, PipelineConfig};
pub use report::Report;
pub use traffic::{TrafficConfig, TrafficDurations, TrafficState, format_duration};

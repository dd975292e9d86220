//! Error types.
//!
//! Per-anchor anomalies in the model output (bad class index, box outside the
//! unit square) are never errors; they are dropped and logged by the decoder.
//! The enums here cover caller mistakes and collaborator failures only.

use thiserror::Error;

/// The output buffer does not match the declared tensor layout.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Four box channels plus at least one class channel are required.
    #[error("output tensor has {channels} channels, expected at least 5")]
    TooFewChannels { channels: usize },
    /// Buffer length disagrees with `channels × elements`.
    #[error("output buffer does not match tensor shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Failure to read a label resource.
#[derive(Debug, Error)]
pub enum LabelError {
    #[error("failed to read labels: {0}")]
    Io(#[from] std::io::Error),
    #[error("label resource contains no labels")]
    Empty,
}

/// Failure while processing a single frame.
#[derive(Debug, Error)]
pub enum PipelineError<E> {
    /// The inference engine failed; the frame is skipped.
    #[error("inference failed: {0}")]
    Inference(E),
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

//! YOLO-style output tensor decoding.
//!
//! The detector emits a `[1, channels, elements]` float tensor. Channels 0-3
//! hold the box as center-x, center-y, width, height and the remaining
//! channels hold one confidence per class. Each of the `elements` columns is
//! one candidate anchor.

use log::{trace, warn};
use ndarray::{ArrayView2, ErrorKind, ShapeError};
use serde::{Deserialize, Serialize};

use crate::detection::{Detection, non_max_suppression};
use crate::error::DecodeError;
use crate::tracker::Rect;

const BOX_CHANNELS: usize = 4;

/// Layout of the detector output, read once from model metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputShape {
    pub channels: usize,
    pub elements: usize,
}

impl OutputShape {
    pub fn new(channels: usize, elements: usize) -> Self {
        Self { channels, elements }
    }

    /// Number of class channels following the box channels.
    pub fn num_classes(&self) -> usize {
        self.channels.saturating_sub(BOX_CHANNELS)
    }

    pub fn len(&self) -> usize {
        self.channels * self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Thresholds applied while decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// A candidate is kept only if its best class score is strictly above this
    pub confidence_threshold: f32,
    /// IoU at or above which the weaker of two boxes is suppressed
    pub iou_threshold: f32,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.3,
            iou_threshold: 0.5,
        }
    }
}

/// Turns raw detector output into labelled detections.
#[derive(Debug, Clone)]
pub struct Decoder {
    labels: Vec<String>,
    shape: OutputShape,
    config: DecoderConfig,
}

impl Decoder {
    pub fn new(labels: Vec<String>, shape: OutputShape, config: DecoderConfig) -> Self {
        Self {
            labels,
            shape,
            config,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn shape(&self) -> OutputShape {
        self.shape
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Decode every anchor whose best class clears the confidence threshold.
    ///
    /// The best class is the first one reaching the maximum score, scanning
    /// in ascending class order. Anchors whose box leaves the unit square or
    /// whose class has no label are dropped. The result is not suppressed.
    pub fn decode(&self, output: &[f32]) -> Result<Vec<Detection>, DecodeError> {
        let OutputShape { channels, elements } = self.shape;
        if channels <= BOX_CHANNELS {
            return Err(DecodeError::TooFewChannels { channels });
        }
        if output.len() != self.shape.len() {
            return Err(ShapeError::from_kind(ErrorKind::IncompatibleShape).into());
        }
        let output = ArrayView2::from_shape((channels, elements), output)?;

        let threshold = self.config.confidence_threshold;
        let mut detections = Vec::new();

        for anchor in output.columns() {
            let mut max_conf = -1.0f32;
            let mut max_idx = None;
            for (class_id, &conf) in anchor.iter().skip(BOX_CHANNELS).enumerate() {
                if conf > max_conf {
                    max_conf = conf;
                    max_idx = Some(class_id);
                }
            }

            if max_conf <= threshold {
                continue;
            }
            let Some(class_id) = max_idx else {
                continue;
            };
            let Some(label) = self.labels.get(class_id) else {
                warn!(
                    "Invalid class index {} for {} labels",
                    class_id,
                    self.labels.len()
                );
                continue;
            };

            let rect = Rect::from_xywh(anchor[0], anchor[1], anchor[2], anchor[3]);
            if !rect.is_normalized() {
                trace!("Dropping out-of-range box {:?}", rect.to_tlbr());
                continue;
            }

            detections.push(Detection::new(rect, max_conf, class_id, label.clone()));
        }

        Ok(detections)
    }

    /// Decode and suppress overlapping boxes.
    pub fn detect(&self, output: &[f32]) -> Result<Vec<Detection>, DecodeError> {
        let candidates = self.decode(output)?;
        Ok(non_max_suppression(candidates, self.config.iou_threshold))
    }
}

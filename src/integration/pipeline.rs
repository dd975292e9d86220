//! Pipeline combining inference output decoding with tracking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::detection::{Decoder, DecoderConfig, Detection};
use crate::error::{DecodeError, PipelineError};
use crate::integration::report::Report;
use crate::integration::traffic::{TrafficClock, TrafficConfig, TrafficDurations, TrafficState};
use crate::tracker::{Track, TrackEvent, Tracker, TrackerConfig, Viewport};

use super::InferenceEngine;

/// Configuration for every stage of the [`Pipeline`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub decoder: DecoderConfig,
    pub tracker: TrackerConfig,
    pub traffic: TrafficConfig,
}

/// Result of processing one frame.
#[derive(Debug, Clone)]
pub struct FrameOutput {
    /// ACTIVE tracks after this frame, in id order
    pub active_tracks: Vec<Track>,
    /// Lifecycle changes caused by this frame
    pub events: Vec<TrackEvent>,
    /// Detections that survived suppression
    pub detections: usize,
    pub traffic_state: TrafficState,
    /// Whether any ACTIVE track is in the danger zone
    pub in_danger: bool,
    /// Set when `in_danger` differs from the previous frame
    pub danger_state_changed: Option<bool>,
}

/// Runs decode, suppression and tracking once per frame.
///
/// Frames must be fed one at a time from a single thread of control; a frame
/// that arrives while another is in flight should be dropped by the caller.
pub struct Pipeline<E: InferenceEngine> {
    engine: E,
    decoder: Decoder,
    tracker: Tracker,
    traffic: TrafficClock,
    traffic_config: TrafficConfig,
    in_danger: bool,
}

impl<E: InferenceEngine> Pipeline<E> {
    /// Create a new pipeline around `engine` with one label per model class.
    pub fn new(engine: E, labels: Vec<String>, config: PipelineConfig) -> Self {
        let shape = engine.output_shape();
        Self {
            engine,
            decoder: Decoder::new(labels, shape, config.decoder),
            tracker: Tracker::new(config.tracker),
            traffic: TrafficClock::default(),
            traffic_config: config.traffic,
            in_danger: false,
        }
    }

    /// Create a new pipeline with default thresholds.
    pub fn with_default_config(engine: E, labels: Vec<String>) -> Self {
        Self::new(engine, labels, PipelineConfig::default())
    }

    /// Update the view-port size; non-positive sizes mark it unknown.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.tracker.set_viewport(Viewport::new(width, height));
    }

    /// Run inference on a frame and feed the result through the tracker.
    ///
    /// # Arguments
    /// * `input` - Raw image bytes
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `now_ms` - Wall-clock timestamp of the frame in milliseconds
    pub fn process_frame(
        &mut self,
        input: &[u8],
        width: u32,
        height: u32,
        now_ms: u64,
    ) -> Result<FrameOutput, PipelineError<E::Error>> {
        let output = self
            .engine
            .infer(input, width, height)
            .map_err(PipelineError::Inference)?;
        Ok(self.process_output(&output, now_ms)?)
    }

    /// Process an output tensor produced outside the pipeline.
    pub fn process_output(
        &mut self,
        output: &[f32],
        now_ms: u64,
    ) -> Result<FrameOutput, DecodeError> {
        let detections = self.decoder.detect(output)?;
        Ok(self.process_detections(&detections, now_ms))
    }

    /// Track already-suppressed detections.
    ///
    /// An empty slice still advances the tracker so lost tracks time out.
    pub fn process_detections(&mut self, detections: &[Detection], now_ms: u64) -> FrameOutput {
        let events = self.tracker.update(detections, now_ms);
        let active_tracks: Vec<Track> = self.tracker.active_tracks().cloned().collect();

        let traffic_state = TrafficState::classify(active_tracks.len(), &self.traffic_config);
        self.traffic.advance(
            Some(traffic_state),
            now_ms,
            self.traffic_config.max_frame_delta_ms,
        );

        let in_danger = self.tracker.any_active_in_danger();
        let danger_state_changed = (in_danger != self.in_danger).then_some(in_danger);
        self.in_danger = in_danger;

        FrameOutput {
            active_tracks,
            events,
            detections: detections.len(),
            traffic_state,
            in_danger,
            danger_state_changed,
        }
    }

    /// Build a statistics snapshot, first crediting time up to `now_ms` to
    /// the current traffic state.
    pub fn report(&mut self, now_ms: u64) -> Report {
        self.traffic
            .advance(None, now_ms, self.traffic_config.max_frame_delta_ms);

        let danger_threshold = self.tracker.config().danger_threshold();
        let mut current_counts = BTreeMap::new();
        let mut active_objects = 0;
        let mut active_in_danger_zone = 0;
        for track in self.tracker.active_tracks() {
            active_objects += 1;
            if track.rect.bottom() >= danger_threshold {
                active_in_danger_zone += 1;
            }
            *current_counts.entry(track.label.clone()).or_insert(0) += 1;
        }

        let mut lifetime_counts = BTreeMap::new();
        for record in self.tracker.history() {
            *lifetime_counts.entry(record.label.clone()).or_insert(0) += 1;
        }

        Report {
            traffic_state: self.traffic.state(),
            active_objects,
            active_in_danger_zone,
            unique_objects: self.tracker.history().len(),
            current_counts,
            lifetime_counts,
            danger_counts: self.tracker.danger_counts().clone(),
            total_danger_alerts: self.tracker.total_danger_alerts(),
            durations: self.traffic.durations(),
        }
    }

    pub fn traffic_state(&self) -> TrafficState {
        self.traffic.state()
    }

    pub fn durations(&self) -> TrafficDurations {
        self.traffic.durations()
    }

    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Get a reference to the underlying inference engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Get a mutable reference to the underlying inference engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Get a reference to the underlying tracker.
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }
}

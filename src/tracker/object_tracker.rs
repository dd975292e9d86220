//! Frame-to-frame object tracker.
//!
//! Association is greedy nearest-neighbour on pixel-space box centers,
//! restricted to detections of the same class. Tracks are visited in id
//! order and each takes the closest unclaimed detection within the match
//! radius, so earlier tracks win contested detections.

use std::collections::BTreeMap;

use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::detection::Detection;
use crate::tracker::history::{HistoricalRecord, History};
use crate::tracker::rect::Rect;
use crate::tracker::track::Track;
use crate::tracker::track_state::TrackState;
use crate::tracker::viewport::{self, Viewport};

/// Configuration for the [`Tracker`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// How long a LOST track may go unmatched before it is dropped
    pub lost_track_timeout_ms: u64,
    /// Match radius as a fraction of the view-port width
    pub match_distance_ratio: f32,
    /// Match radius in pixels while the view-port width is unknown
    pub fallback_match_distance: f32,
    /// Maximum number of trail points per track
    pub trail_capacity: usize,
    /// Height of the danger zone as a fraction of the frame, measured from the bottom
    pub danger_zone_height_ratio: f32,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            lost_track_timeout_ms: 2000,
            match_distance_ratio: 0.15,
            fallback_match_distance: 50.0,
            trail_capacity: 30,
            danger_zone_height_ratio: 0.2,
        }
    }
}

impl TrackerConfig {
    /// Normalized y at or below which a box bottom is in the danger zone.
    pub fn danger_threshold(&self) -> f32 {
        1.0 - self.danger_zone_height_ratio
    }
}

/// Lifecycle changes produced by a single [`Tracker::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackEvent {
    Created { id: u64, label: String },
    /// A LOST track was matched again.
    Recovered { id: u64 },
    Lost { id: u64 },
    /// The track timed out and was dropped for good.
    Removed { id: u64 },
    /// The track's box crossed into the danger zone; `total` is the running
    /// count for its class.
    EnteredDangerZone {
        id: u64,
        label: String,
        total: u32,
    },
}

pub struct Tracker {
    tracks: BTreeMap<u64, Track>,
    history: History,
    danger_counts: BTreeMap<String, u32>,
    next_id: u64,
    viewport: Option<Viewport>,
    config: TrackerConfig,
}

impl Tracker {
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            tracks: BTreeMap::new(),
            history: History::default(),
            danger_counts: BTreeMap::new(),
            next_id: 1,
            viewport: None,
            config,
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// Set or clear the view-port used for pixel-space matching.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    /// Advance the tracker by one frame.
    ///
    /// `detections` should already be suppressed. An empty slice ages every
    /// track: ACTIVE tracks become LOST and LOST tracks past the timeout are
    /// removed.
    ///
    /// Without a view-port, existing tracks are held unmatched whenever the
    /// frame has detections, and every detection opens a new track. The same
    /// object seen over several frames therefore becomes several tracks, each
    /// counted by the danger zone. Set the view-port before the first frame.
    pub fn update(&mut self, detections: &[Detection], now_ms: u64) -> Vec<TrackEvent> {
        let mut events = Vec::new();
        let mut assigned = vec![false; detections.len()];

        let timeout = self.config.lost_track_timeout_ms;
        let danger_threshold = self.config.danger_threshold();
        let match_threshold = viewport::match_threshold(
            self.viewport,
            self.config.match_distance_ratio,
            self.config.fallback_match_distance,
        );

        let det_pixels: Option<Vec<Rect>> = self
            .viewport
            .map(|v| detections.iter().map(|d| d.rect.to_pixels(v)).collect());

        let mut expired = Vec::new();

        for track in self.tracks.values_mut() {
            let eligible =
                track.state == TrackState::Active || track.time_since_seen(now_ms) < timeout;
            if !eligible {
                expired.push(track.id);
                continue;
            }

            let best = match (self.viewport, det_pixels.as_deref()) {
                (Some(v), Some(pixels)) => nearest_detection(
                    &track.rect.to_pixels(v),
                    &track.label,
                    detections,
                    pixels,
                    &assigned,
                    match_threshold,
                ),
                _ if !detections.is_empty() => {
                    trace!("No view-port yet, holding track {} unmatched", track.id);
                    continue;
                }
                _ => None,
            };

            match best {
                Some(idx) => {
                    assigned[idx] = true;
                    let was_lost = track.state == TrackState::Lost;
                    let entered = track.update(detections[idx].rect, now_ms, danger_threshold);
                    self.history.touch(track.id, now_ms);

                    if was_lost {
                        debug!("Recovered track {} ({})", track.id, track.label);
                        events.push(TrackEvent::Recovered { id: track.id });
                    }
                    if entered {
                        let total = bump(&mut self.danger_counts, &track.label);
                        debug!(
                            "Danger alert for {} (id {}), total {}",
                            track.label, track.id, total
                        );
                        events.push(TrackEvent::EnteredDangerZone {
                            id: track.id,
                            label: track.label.clone(),
                            total,
                        });
                    }
                }
                None => match track.state {
                    TrackState::Active => {
                        track.mark_lost();
                        trace!("Track {} lost", track.id);
                        events.push(TrackEvent::Lost { id: track.id });
                    }
                    TrackState::Lost => {
                        if track.time_since_seen(now_ms) >= timeout {
                            expired.push(track.id);
                        }
                    }
                },
            }
        }

        for id in expired {
            if self.tracks.remove(&id).is_some() {
                debug!("Permanently removing timed-out track {}", id);
                events.push(TrackEvent::Removed { id });
            }
        }

        for (det, _) in detections.iter().zip(&assigned).filter(|(_, a)| !**a) {
            let id = self.next_id;
            self.next_id += 1;

            let mut track = Track::new(
                id,
                det.label.clone(),
                det.rect,
                now_ms,
                self.config.trail_capacity,
            );
            self.history.push(HistoricalRecord {
                id,
                label: det.label.clone(),
                first_seen: now_ms,
                last_seen: now_ms,
            });
            trace!("New track {} ({})", id, det.label);
            events.push(TrackEvent::Created {
                id,
                label: det.label.clone(),
            });

            if track.refresh_danger(danger_threshold) {
                let total = bump(&mut self.danger_counts, &track.label);
                debug!(
                    "Danger alert for new {} (id {}), total {}",
                    track.label, id, total
                );
                events.push(TrackEvent::EnteredDangerZone {
                    id,
                    label: track.label.clone(),
                    total,
                });
            }

            self.tracks.insert(id, track);
        }

        events
    }

    /// All retained tracks, ACTIVE and LOST, in id order.
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values()
    }

    pub fn active_tracks(&self) -> impl Iterator<Item = &Track> {
        self.tracks.values().filter(|t| t.is_active())
    }

    pub fn track(&self, id: u64) -> Option<&Track> {
        self.tracks.get(&id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// One record per track ever created, in creation order.
    pub fn history(&self) -> &[HistoricalRecord] {
        self.history.records()
    }

    pub fn record(&self, id: u64) -> Option<&HistoricalRecord> {
        self.history.get(id)
    }

    /// Danger-zone entries per class label.
    pub fn danger_counts(&self) -> &BTreeMap<String, u32> {
        &self.danger_counts
    }

    pub fn total_danger_alerts(&self) -> u32 {
        self.danger_counts.values().sum()
    }

    /// True if any ACTIVE track currently sits in the danger zone.
    pub fn any_active_in_danger(&self) -> bool {
        let threshold = self.config.danger_threshold();
        self.active_tracks().any(|t| t.rect.bottom() >= threshold)
    }
}

fn nearest_detection(
    track_px: &Rect,
    label: &str,
    detections: &[Detection],
    det_pixels: &[Rect],
    assigned: &[bool],
    threshold: f32,
) -> Option<usize> {
    let mut best = None;
    let mut min_distance = f32::MAX;

    for (idx, (det, det_px)) in detections.iter().zip(det_pixels).enumerate() {
        if assigned[idx] || det.label != label {
            continue;
        }
        let distance = track_px.center_distance(det_px);
        if distance < threshold && distance < min_distance {
            min_distance = distance;
            best = Some(idx);
        }
    }

    best
}

fn bump(counts: &mut BTreeMap<String, u32>, label: &str) -> u32 {
    let count = counts.entry(label.to_string()).or_insert(0);
    *count += 1;
    *count
}

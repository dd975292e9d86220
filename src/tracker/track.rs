//! Single tracked object.

use crate::tracker::rect::Rect;
use crate::tracker::track_state::TrackState;
use crate::tracker::trail::Trail;

/// Single object track.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique track identifier, never reused within a tracker
    pub id: u64,
    /// Class label, fixed at creation
    pub label: String,
    /// Current track state
    pub state: TrackState,
    /// Latest matched box in normalized coordinates
    pub rect: Rect,
    /// Centers of the matched boxes, most recent last
    pub trail: Trail,
    /// Timestamp (ms) of the last successful match
    pub last_seen: u64,
    /// Whether `rect` reached the danger zone at the last match
    pub in_danger_zone: bool,
}

impl Track {
    /// Create an active track seeded with its first box.
    pub fn new(id: u64, label: String, rect: Rect, now_ms: u64, trail_capacity: usize) -> Self {
        let mut trail = Trail::with_capacity(trail_capacity);
        trail.push(rect.center());
        Self {
            id,
            label,
            state: TrackState::Active,
            rect,
            trail,
            last_seen: now_ms,
            in_danger_zone: false,
        }
    }

    /// Apply a matched detection box. Returns `true` when this match moves
    /// the track into the danger zone from outside it.
    pub fn update(&mut self, rect: Rect, now_ms: u64, danger_threshold: f32) -> bool {
        self.rect = rect;
        self.trail.push(rect.center());
        self.state = TrackState::Active;
        self.last_seen = now_ms;
        self.refresh_danger(danger_threshold)
    }

    /// Re-evaluate the danger flag for the current box, reporting entry edges.
    pub(crate) fn refresh_danger(&mut self, danger_threshold: f32) -> bool {
        let in_danger = self.rect.bottom() >= danger_threshold;
        let entered = in_danger && !self.in_danger_zone;
        self.in_danger_zone = in_danger;
        entered
    }

    pub fn mark_lost(&mut self) {
        self.state = TrackState::Lost;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == TrackState::Active
    }

    /// Milliseconds since the last match, zero if the clock went backwards.
    #[inline]
    pub fn time_since_seen(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.last_seen)
    }
}

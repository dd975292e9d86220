//! Traffic density classification and time spent in each density state.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Thresholds for [`TrafficState::classify`] and duration bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    /// Largest active-track count still considered light traffic
    pub light_max_objects: usize,
    /// Largest active-track count still considered moderate traffic
    pub moderate_max_objects: usize,
    /// Frame gaps at or above this are treated as clock anomalies and not counted
    pub max_frame_delta_ms: u64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            light_max_objects: 5,
            moderate_max_objects: 8,
            max_frame_delta_ms: 5000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TrafficState {
    #[default]
    NoTraffic,
    Light,
    Moderate,
    Heavy,
}

impl TrafficState {
    /// Classify by the number of ACTIVE tracks.
    pub fn classify(active_tracks: usize, config: &TrafficConfig) -> Self {
        match active_tracks {
            0 => Self::NoTraffic,
            n if n <= config.light_max_objects => Self::Light,
            n if n <= config.moderate_max_objects => Self::Moderate,
            _ => Self::Heavy,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoTraffic => "No Traffic",
            Self::Light => "Light Traffic",
            Self::Moderate => "Moderate Traffic",
            Self::Heavy => "Heavy Traffic",
        }
    }
}

impl fmt::Display for TrafficState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cumulative milliseconds spent in each [`TrafficState`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TrafficDurations {
    pub no_traffic_ms: u64,
    pub light_ms: u64,
    pub moderate_ms: u64,
    pub heavy_ms: u64,
}

impl TrafficDurations {
    pub fn get(&self, state: TrafficState) -> u64 {
        match state {
            TrafficState::NoTraffic => self.no_traffic_ms,
            TrafficState::Light => self.light_ms,
            TrafficState::Moderate => self.moderate_ms,
            TrafficState::Heavy => self.heavy_ms,
        }
    }

    pub fn total(&self) -> u64 {
        self.no_traffic_ms + self.light_ms + self.moderate_ms + self.heavy_ms
    }

    fn add(&mut self, state: TrafficState, ms: u64) {
        let slot = match state {
            TrafficState::NoTraffic => &mut self.no_traffic_ms,
            TrafficState::Light => &mut self.light_ms,
            TrafficState::Moderate => &mut self.moderate_ms,
            TrafficState::Heavy => &mut self.heavy_ms,
        };
        *slot += ms;
    }
}

/// Integrates frame-to-frame time into the state that was current over it.
#[derive(Debug, Clone, Default)]
pub(crate) struct TrafficClock {
    state: TrafficState,
    last_frame_ms: Option<u64>,
    durations: TrafficDurations,
}

impl TrafficClock {
    pub(crate) fn state(&self) -> TrafficState {
        self.state
    }

    pub(crate) fn durations(&self) -> TrafficDurations {
        self.durations
    }

    /// Credit the time since the previous call to the current state, then
    /// switch to `next` if given.
    pub(crate) fn advance(&mut self, next: Option<TrafficState>, now_ms: u64, max_delta_ms: u64) {
        let delta = match self.last_frame_ms {
            Some(last) => now_ms.saturating_sub(last),
            None => 0,
        };
        if delta > 0 && delta < max_delta_ms {
            self.durations.add(self.state, delta);
        }

        if let Some(next) = next {
            self.state = next;
        }
        self.last_frame_ms = Some(now_ms);
    }
}

/// Human readable duration: `1 hr 02 min 03 sec`, `4 min 05 sec` or `6 sec`.
pub fn format_duration(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds / 60) % 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{} hr {:02} min {:02} sec", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{} min {:02} sec", minutes, seconds)
    } else {
        format!("{} sec", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let config = TrafficConfig::default();
        assert_eq!(TrafficState::classify(0, &config), TrafficState::NoTraffic);
        assert_eq!(TrafficState::classify(1, &config), TrafficState::Light);
        assert_eq!(TrafficState::classify(5, &config), TrafficState::Light);
        assert_eq!(TrafficState::classify(6, &config), TrafficState::Moderate);
        assert_eq!(TrafficState::classify(8, &config), TrafficState::Moderate);
        assert_eq!(TrafficState::classify(9, &config), TrafficState::Heavy);
    }

    #[test]
    fn test_clock_credits_previous_state() {
        let mut clock = TrafficClock::default();
        clock.advance(Some(TrafficState::Light), 1_000, 5_000);
        assert_eq!(clock.durations().total(), 0);

        clock.advance(Some(TrafficState::Heavy), 1_100, 5_000);
        clock.advance(Some(TrafficState::Heavy), 1_150, 5_000);
        clock.advance(None, 1_200, 5_000);

        let d = clock.durations();
        assert_eq!(d.light_ms, 100);
        assert_eq!(d.heavy_ms, 100);
        assert_eq!(d.no_traffic_ms, 0);
        assert_eq!(clock.state(), TrafficState::Heavy);
    }

    #[test]
    fn test_clock_skips_anomalous_deltas() {
        let mut clock = TrafficClock::default();
        clock.advance(Some(TrafficState::Light), 10_000, 5_000);
        clock.advance(None, 15_000, 5_000);
        clock.advance(None, 14_000, 5_000);
        clock.advance(None, 14_000, 5_000);
        assert_eq!(clock.durations().total(), 0);

        clock.advance(None, 18_999, 5_000);
        assert_eq!(clock.durations().light_ms, 4_999);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0 sec");
        assert_eq!(format_duration(59_999), "59 sec");
        assert_eq!(format_duration(65_000), "1 min 05 sec");
        assert_eq!(format_duration(3_723_000), "1 hr 02 min 03 sec");
    }
}

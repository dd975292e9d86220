use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::integration::traffic::{TrafficDurations, TrafficState, format_duration};

/// Snapshot of session statistics for reporting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub traffic_state: TrafficState,
    pub active_objects: usize,
    pub active_in_danger_zone: usize,
    /// Number of tracks ever created
    pub unique_objects: usize,
    /// ACTIVE tracks per class right now
    pub current_counts: BTreeMap<String, usize>,
    /// Tracks ever created per class
    pub lifetime_counts: BTreeMap<String, usize>,
    /// Danger-zone entries per class
    pub danger_counts: BTreeMap<String, u32>,
    pub total_danger_alerts: u32,
    pub durations: TrafficDurations,
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "----- Traffic Analysis Report -----")?;
        writeln!(f, "Current Status: {}", self.traffic_state)?;
        writeln!(f, "Objects Currently Active: {}", self.active_objects)?;
        writeln!(
            f,
            "Objects Currently Active in Danger Zone: {}",
            self.active_in_danger_zone
        )?;
        writeln!(
            f,
            "Total Unique Objects Detected Ever: {}",
            self.unique_objects
        )?;
        writeln!(
            f,
            "Total Danger Zone Alerts Issued: {}",
            self.total_danger_alerts
        )?;

        let total = self.durations.total();
        if total > 0 {
            writeln!(f, "Time by traffic state:")?;
            for state in [
                TrafficState::NoTraffic,
                TrafficState::Light,
                TrafficState::Moderate,
                TrafficState::Heavy,
            ] {
                let ms = self.durations.get(state);
                if ms > 0 {
                    writeln!(
                        f,
                        "  {}: {} ({:.1}%)",
                        state,
                        format_duration(ms),
                        ms as f64 / total as f64 * 100.0
                    )?;
                }
            }
        }

        if !self.lifetime_counts.is_empty() {
            writeln!(f, "Objects by class:")?;
            for (label, count) in &self.lifetime_counts {
                let current = self.current_counts.get(label).copied().unwrap_or(0);
                writeln!(f, "  {}: {} total, {} active", label, count, current)?;
            }
        }

        if !self.danger_counts.is_empty() {
            writeln!(f, "Danger zone entries by class:")?;
            for (label, count) in &self.danger_counts {
                writeln!(f, "  {}: {}", label, count)?;
            }
        }

        write!(f, "-----------------------------------")
    }
}

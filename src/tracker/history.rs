use serde::Serialize;

/// Lifetime entry for a track, kept after the track itself is gone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoricalRecord {
    pub id: u64,
    pub label: String,
    /// Timestamp (ms) of the frame that created the track
    pub first_seen: u64,
    /// Timestamp (ms) of the most recent successful match
    pub last_seen: u64,
}

/// Append-only record list. Ids are issued in increasing order, so the list
/// stays sorted by id and lookups are a binary search.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<HistoricalRecord>,
}

impl History {
    pub fn push(&mut self, record: HistoricalRecord) {
        debug_assert!(self.records.last().is_none_or(|r| r.id < record.id));
        self.records.push(record);
    }

    pub fn touch(&mut self, id: u64, now_ms: u64) {
        if let Ok(idx) = self.records.binary_search_by_key(&id, |r| r.id) {
            self.records[idx].last_seen = now_ms;
        }
    }

    pub fn get(&self, id: u64) -> Option<&HistoricalRecord> {
        self.records
            .binary_search_by_key(&id, |r| r.id)
            .ok()
            .map(|idx| &self.records[idx])
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, at: u64) -> HistoricalRecord {
        HistoricalRecord {
            id,
            label: "car".to_string(),
            first_seen: at,
            last_seen: at,
        }
    }

    #[test]
    fn test_touch_updates_last_seen_only() {
        let mut history = History::default();
        history.push(record(1, 100));
        history.push(record(2, 150));

        history.touch(1, 400);
        history.touch(99, 500);

        let r = history.get(1).unwrap();
        assert_eq!(r.first_seen, 100);
        assert_eq!(r.last_seen, 400);
        assert_eq!(history.get(2).unwrap().last_seen, 150);
        assert_eq!(history.records().len(), 2);
    }
}

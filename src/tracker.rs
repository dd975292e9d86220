mod history;
mod object_tracker;
mod rect;
mod track;
mod track_state;
mod trail;
mod viewport;

pub use history::HistoricalRecord;
pub use object_tracker::{TrackEvent, Tracker, TrackerConfig};
pub use rect::{Rect, iou_batch};
pub use track::Track;
pub use track_state::TrackState;
pub use trail::Trail;
pub use viewport::Viewport;

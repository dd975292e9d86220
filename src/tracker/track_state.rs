/// Track state enumeration for object tracking lifecycle.
///
/// Removal is terminal and not represented: a removed track is dropped from
/// the tracker and its id is never handed out again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackState {
    /// Matched on the most recent frame that had geometry available
    #[default]
    Active,
    /// Missed at least one frame, still eligible for re-association
    Lost,
}

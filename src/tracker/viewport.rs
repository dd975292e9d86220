/// Size of the presentation surface in pixels.
///
/// Matching runs in pixel space so the distance threshold tracks what the
/// user sees. A view that has not been laid out yet has no `Viewport`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Returns `None` unless both dimensions are positive.
    pub fn new(width: f32, height: f32) -> Option<Self> {
        (width > 0.0 && height > 0.0).then_some(Self { width, height })
    }
}

/// Maximum center distance, in pixels, for a detection to continue a track.
pub fn match_threshold(viewport: Option<Viewport>, ratio: f32, fallback: f32) -> f32 {
    match viewport {
        Some(v) => v.width * ratio,
        None => fallback,
    }
}

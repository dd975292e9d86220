use nalgebra::Point2;

use crate::tracker::Rect;

/// One candidate object from a single frame.
///
/// Produced by the decoder and consumed within the same frame by the
/// suppressor and the tracker.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Box in normalized TLBR coordinates
    pub rect: Rect,
    /// Confidence of the winning class
    pub score: f32,
    /// Index of the winning class in the label list
    pub class_id: usize,
    /// Label of the winning class
    pub label: String,
}

impl Detection {
    pub fn new(rect: Rect, score: f32, class_id: usize, label: impl Into<String>) -> Self {
        Self {
            rect,
            score,
            class_id,
            label: label.into(),
        }
    }

    #[inline]
    pub fn center(&self) -> Point2<f32> {
        self.rect.center()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.width()
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.rect.height()
    }
}

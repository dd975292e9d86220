use nalgebra::Point2;
use ndarray::Array2;

use crate::tracker::viewport::Viewport;

/// Axis-aligned bounding box in TLBR form.
///
/// Detector output and tracked boxes are kept in normalized coordinates
/// (0-1 relative to the frame); [`Rect::to_pixels`] maps them into the
/// view-port for distance-based matching.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// Left edge
    pub x1: f32,
    /// Top edge
    pub y1: f32,
    /// Right edge
    pub x2: f32,
    /// Bottom edge
    pub y2: f32,
}

impl Rect {
    /// Create a Rect from TLBR format (top-left x, top-left y, bottom-right x, bottom-right y).
    #[inline]
    pub fn from_tlbr(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Create a Rect from XYWH format (center x, center y, width, height).
    #[inline]
    pub fn from_xywh(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self {
            x1: cx - width / 2.0,
            y1: cy - height / 2.0,
            x2: cx + width / 2.0,
            y2: cy + height / 2.0,
        }
    }

    /// Convert to TLBR format: (x1, y1, x2, y2).
    #[inline]
    pub fn to_tlbr(&self) -> [f32; 4] {
        [self.x1, self.y1, self.x2, self.y2]
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }

    /// Bottom edge, used for the danger-zone test.
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y2
    }

    /// Get the center point of the bounding box.
    #[inline]
    pub fn center(&self) -> Point2<f32> {
        Point2::new((self.x1 + self.x2) / 2.0, (self.y1 + self.y2) / 2.0)
    }

    /// Get the area of the bounding box.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }

    /// True when every edge lies inside the closed unit square.
    pub fn is_normalized(&self) -> bool {
        [self.x1, self.y1, self.x2, self.y2]
            .iter()
            .all(|v| (0.0..=1.0).contains(v))
    }

    /// Area shared with `other`, zero when disjoint.
    pub fn intersection(&self, other: &Rect) -> f32 {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);

        (x2 - x1).max(0.0) * (y2 - y1).max(0.0)
    }

    /// Calculate Intersection over Union (IoU) with another bounding box.
    ///
    /// A zero-area box never overlaps anything.
    pub fn iou(&self, other: &Rect) -> f32 {
        let area_a = self.area();
        let area_b = other.area();
        if area_a <= 0.0 || area_b <= 0.0 {
            return 0.0;
        }

        let inter_area = self.intersection(other);
        inter_area / (area_a + area_b - inter_area)
    }

    /// Scale a normalized box into view-port pixels.
    pub fn to_pixels(&self, viewport: Viewport) -> Rect {
        Rect {
            x1: self.x1 * viewport.width,
            y1: self.y1 * viewport.height,
            x2: self.x2 * viewport.width,
            y2: self.y2 * viewport.height,
        }
    }

    /// Euclidean distance between the centers of two boxes.
    pub fn center_distance(&self, other: &Rect) -> f32 {
        nalgebra::distance(&self.center(), &other.center())
    }
}

/// Calculate IoU matrix between two sets of bounding boxes.
///
/// Returns a matrix of shape (M, N) where M is the length of `boxes_a`
/// and N is the length of `boxes_b`.
pub fn iou_batch(boxes_a: &[Rect], boxes_b: &[Rect]) -> Array2<f32> {
    let mut ious = Array2::zeros((boxes_a.len(), boxes_b.len()));
    for (i, a) in boxes_a.iter().enumerate() {
        for (j, b) in boxes_b.iter().enumerate() {
            ious[[i, j]] = a.iou(b);
        }
    }
    ious
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_xywh() {
        let rect = Rect::from_xywh(0.5, 0.5, 0.2, 0.4);
        assert!((rect.x1 - 0.4).abs() < 1e-6);
        assert!((rect.y1 - 0.3).abs() < 1e-6);
        assert!((rect.x2 - 0.6).abs() < 1e-6);
        assert!((rect.y2 - 0.7).abs() < 1e-6);
        assert!((rect.width() - 0.2).abs() < 1e-6);
        assert!((rect.height() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_center_and_area() {
        let rect = Rect::from_tlbr(0.2, 0.4, 0.6, 0.8);
        let c = rect.center();
        assert!((c.x - 0.4).abs() < 1e-6);
        assert!((c.y - 0.6).abs() < 1e-6);
        assert!((rect.area() - 0.16).abs() < 1e-6);
        assert_eq!(rect.bottom(), 0.8);
    }

    #[test]
    fn test_iou() {
        let a = Rect::from_tlbr(0.0, 0.0, 10.0, 10.0);
        let b = Rect::from_tlbr(5.0, 5.0, 15.0, 15.0);

        // Intersection: 5x5 = 25
        // Union: 100 + 100 - 25 = 175
        let iou = a.iou(&b);
        assert!((iou - 25.0 / 175.0).abs() < 1e-6);
        assert!((a.iou(&b) - b.iou(&a)).abs() < 1e-6);
    }

    #[test]
    fn test_iou_no_overlap() {
        let a = Rect::from_tlbr(0.0, 0.0, 0.2, 0.2);
        let b = Rect::from_tlbr(0.5, 0.5, 0.7, 0.7);
        assert_eq!(a.intersection(&b), 0.0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_iou_same_box() {
        let a = Rect::from_tlbr(0.1, 0.1, 0.3, 0.4);
        assert!((a.iou(&a) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_iou_degenerate_box() {
        let line = Rect::from_tlbr(0.2, 0.2, 0.2, 0.6);
        assert_eq!(line.iou(&line), 0.0);

        let a = Rect::from_tlbr(0.0, 0.0, 0.5, 0.5);
        assert_eq!(a.iou(&line), 0.0);
    }

    #[test]
    fn test_is_normalized() {
        assert!(Rect::from_tlbr(0.0, 0.0, 1.0, 1.0).is_normalized());
        assert!(!Rect::from_tlbr(-0.01, 0.0, 0.5, 0.5).is_normalized());
        assert!(!Rect::from_xywh(0.95, 0.5, 0.2, 0.2).is_normalized());
    }

    #[test]
    fn test_to_pixels_and_distance() {
        let viewport = Viewport::new(1000.0, 500.0).unwrap();
        let a = Rect::from_tlbr(0.0, 0.0, 0.2, 0.2).to_pixels(viewport);
        assert_eq!(a.to_tlbr(), [0.0, 0.0, 200.0, 100.0]);

        let b = Rect::from_tlbr(0.3, 0.4, 0.5, 0.6).to_pixels(viewport);
        // centers (100, 50) and (400, 250)
        assert!((a.center_distance(&b) - 360.555_13).abs() < 1e-3);
    }

    #[test]
    fn test_iou_batch() {
        let boxes = [
            Rect::from_tlbr(0.0, 0.0, 0.5, 0.5),
            Rect::from_tlbr(0.5, 0.5, 1.0, 1.0),
        ];
        let ious = iou_batch(&boxes, &boxes);
        assert_eq!(ious.dim(), (2, 2));
        assert!((ious[[0, 0]] - 1.0).abs() < 1e-6);
        assert_eq!(ious[[0, 1]], 0.0);
    }
}

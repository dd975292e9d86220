use crate::detection::Detection;
use crate::tracker::{Rect, iou_batch};

/// Class-agnostic greedy non-maximum suppression.
///
/// Detections are ordered by descending score (stable, so equal scores keep
/// their decode order). Each surviving detection suppresses every later one
/// whose IoU with it is at least `iou_threshold`.
pub fn non_max_suppression(mut detections: Vec<Detection>, iou_threshold: f32) -> Vec<Detection> {
    if detections.len() < 2 {
        return detections;
    }

    detections.sort_by(|a, b| b.score.total_cmp(&a.score));

    let rects: Vec<Rect> = detections.iter().map(|d| d.rect).collect();
    let ious = iou_batch(&rects, &rects);

    let mut suppressed = vec![false; detections.len()];
    for i in 0..detections.len() {
        if suppressed[i] {
            continue;
        }
        for j in (i + 1)..detections.len() {
            if !suppressed[j] && ious[[i, j]] >= iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    detections
        .into_iter()
        .zip(suppressed)
        .filter_map(|(det, s)| (!s).then_some(det))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::DetectionBuilder;

    fn det(label: &str, score: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> Detection {
        DetectionBuilder::new()
            .tlbr(x1, y1, x2, y2)
            .score(score)
            .class(0, label)
            .build()
    }

    #[test]
    fn test_higher_score_survives_overlap() {
        let a = det("car", 0.9, 0.10, 0.10, 0.50, 0.50);
        let b = det("car", 0.95, 0.12, 0.10, 0.52, 0.50);
        assert!(a.rect.iou(&b.rect) >= 0.5);

        let kept = non_max_suppression(vec![a, b], 0.5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 0.95);
    }

    #[test]
    fn test_iou_equal_to_threshold_suppresses() {
        // Areas 0.25 and 0.125 are exact, so IoU is exactly 0.5
        let a = det("car", 0.9, 0.0, 0.0, 0.5, 0.5);
        let b = det("car", 0.8, 0.0, 0.0, 0.5, 0.25);
        assert_eq!(a.rect.iou(&b.rect), 0.5);

        let kept = non_max_suppression(vec![a, b], 0.5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].score, 0.9);
    }

    #[test]
    fn test_suppression_ignores_class() {
        let kept = non_max_suppression(
            vec![
                det("car", 0.8, 0.1, 0.1, 0.5, 0.5),
                det("truck", 0.9, 0.1, 0.1, 0.5, 0.5),
            ],
            0.5,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].label, "truck");
    }

    #[test]
    fn test_disjoint_boxes_all_kept_in_score_order() {
        let kept = non_max_suppression(
            vec![
                det("car", 0.4, 0.0, 0.0, 0.2, 0.2),
                det("car", 0.9, 0.5, 0.5, 0.7, 0.7),
                det("car", 0.6, 0.8, 0.0, 1.0, 0.2),
            ],
            0.5,
        );
        let scores: Vec<f32> = kept.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.9, 0.6, 0.4]);
    }

    #[test]
    fn test_equal_scores_keep_decode_order() {
        let kept = non_max_suppression(
            vec![
                det("first", 0.7, 0.1, 0.1, 0.5, 0.5),
                det("second", 0.7, 0.1, 0.1, 0.5, 0.5),
            ],
            0.5,
        );
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].label, "first");
    }

    #[test]
    fn test_suppressed_box_does_not_suppress_others() {
        // b overlaps both a and c, a and c overlap only slightly. b is removed by a,
        // so c survives.
        let a = det("car", 0.9, 0.00, 0.0, 0.40, 0.4);
        let b = det("car", 0.8, 0.10, 0.0, 0.50, 0.4);
        let c = det("car", 0.7, 0.20, 0.0, 0.60, 0.4);
        assert!(a.rect.iou(&b.rect) >= 0.5);
        assert!(b.rect.iou(&c.rect) >= 0.5);
        assert!(a.rect.iou(&c.rect) < 0.5);

        let kept = non_max_suppression(vec![a, b, c], 0.5);
        let scores: Vec<f32> = kept.iter().map(|d| d.score).collect();
        assert_eq!(scores, vec![0.9, 0.7]);
    }

    #[test]
    fn test_kept_set_pairwise_below_threshold() {
        let mut dets = Vec::new();
        for i in 0..20 {
            let x = (i as f32) * 0.03;
            dets.push(det("car", 0.3 + (i % 7) as f32 * 0.1, x, 0.1, x + 0.2, 0.3));
        }
        let kept = non_max_suppression(dets, 0.5);
        for (i, a) in kept.iter().enumerate() {
            for b in &kept[i + 1..] {
                assert!(a.rect.iou(&b.rect) < 0.5);
            }
        }
    }

    #[test]
    fn test_degenerate_boxes_never_suppressed() {
        let kept = non_max_suppression(
            vec![
                det("car", 0.9, 0.2, 0.2, 0.2, 0.2),
                det("car", 0.8, 0.2, 0.2, 0.2, 0.2),
            ],
            0.5,
        );
        assert_eq!(kept.len(), 2);
    }
}

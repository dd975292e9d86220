use std::collections::VecDeque;

use nalgebra::Point2;

/// Bounded movement history of a track, oldest point first.
#[derive(Debug, Clone)]
pub struct Trail {
    points: VecDeque<Point2<f32>>,
    capacity: usize,
}

impl Trail {
    /// Storage grows with the trail, so any `capacity` is accepted.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: VecDeque::new(),
            capacity,
        }
    }

    /// Append the newest point, evicting from the front once over capacity.
    pub fn push(&mut self, point: Point2<f32>) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent point.
    #[inline]
    pub fn last(&self) -> Option<&Point2<f32>> {
        self.points.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point2<f32>> {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trail_evicts_oldest_first() {
        let mut trail = Trail::with_capacity(3);
        for i in 0..5 {
            trail.push(Point2::new(i as f32, 0.0));
        }

        assert_eq!(trail.len(), 3);
        let xs: Vec<f32> = trail.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![2.0, 3.0, 4.0]);
        assert_eq!(trail.last().map(|p| p.x), Some(4.0));
    }

    #[test]
    fn test_zero_capacity_trail_stays_empty() {
        let mut trail = Trail::with_capacity(0);
        trail.push(Point2::new(0.5, 0.5));
        assert!(trail.is_empty());
    }

    #[test]
    fn test_unbounded_capacity_does_not_preallocate() {
        let mut trail = Trail::with_capacity(usize::MAX);
        trail.push(Point2::new(0.1, 0.2));
        trail.push(Point2::new(0.3, 0.4));
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.capacity(), usize::MAX);
    }
}

// Sliding confidence window for one category

use std::collections::VecDeque;

/// Fixed-capacity FIFO of recent per-clip probabilities. Pure bookkeeping:
/// no I/O, no blocking, no validation beyond clamping into [0, 1].
#[derive(Debug, Clone)]
pub struct ConfidenceTracker {
    window: VecDeque<f64>,
    capacity: usize,
}

impl ConfidenceTracker {
    pub fn new(capacity: usize) -> Self {
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a probability, evicting the oldest entry once full.
    pub fn update(&mut self, probability: f64) {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(probability.clamp(0.0, 1.0));
    }

    /// Drop all accumulated confidence. Used when a confident background
    /// prediction invalidates every in-flight anomaly hypothesis.
    pub fn clear(&mut self) {
        self.window.clear();
    }

    /// Entries strictly greater than the threshold.
    pub fn hit_count(&self, threshold: f64) -> usize {
        self.window.iter().filter(|p| **p > threshold).count()
    }

    /// Mean of the current window, 0.0 when empty.
    pub fn average(&self) -> f64 {
        if self.window.is_empty() {
            return 0.0;
        }
        self.window.iter().sum::<f64>() / self.window.len() as f64
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_never_exceeds_capacity() {
        let mut tracker = ConfidenceTracker::new(5);
        for i in 0..50 {
            tracker.update(i as f64 / 50.0);
            assert!(tracker.len() <= 5);
        }
        assert_eq!(tracker.len(), 5);
    }

    #[test]
    fn test_fifo_eviction_order() {
        let mut tracker = ConfidenceTracker::new(3);
        tracker.update(0.9);
        tracker.update(0.1);
        tracker.update(0.1);
        assert_eq!(tracker.hit_count(0.5), 1);

        // Fourth update evicts the 0.9 at the front, not any newer entry
        tracker.update(0.1);
        assert_eq!(tracker.hit_count(0.5), 0);
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn test_hit_count_is_strictly_greater() {
        let mut tracker = ConfidenceTracker::new(4);
        tracker.update(0.5);
        tracker.update(0.51);
        assert_eq!(tracker.hit_count(0.5), 1);
    }

    #[test]
    fn test_average_empty_window_is_zero() {
        let tracker = ConfidenceTracker::new(4);
        assert_eq!(tracker.average(), 0.0);
    }

    #[test]
    fn test_average_of_window() {
        let mut tracker = ConfidenceTracker::new(4);
        tracker.update(0.2);
        tracker.update(0.4);
        assert!((tracker.average() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_clear_empties_window() {
        let mut tracker = ConfidenceTracker::new(4);
        tracker.update(0.8);
        tracker.update(0.9);
        tracker.clear();
        assert!(tracker.is_empty());
        assert_eq!(tracker.hit_count(0.0), 0);
    }

    #[test]
    fn test_out_of_range_input_clamped() {
        let mut tracker = ConfidenceTracker::new(2);
        tracker.update(2.0);
        tracker.update(-1.0);
        assert_eq!(tracker.hit_count(0.9), 1);
        assert!((tracker.average() - 0.5).abs() < 1e-9);
    }
}

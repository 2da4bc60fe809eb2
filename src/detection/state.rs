// Per-category debounce state

use super::tracker::ConfidenceTracker;
use super::Transition;

/// One tracker plus the hysteresis flag. An alert rises on the clip boundary
/// where the hit count first reaches min_hits and falls on the boundary where
/// it first drops below; every other boundary is Unchanged, so a single
/// continuous event produces exactly one rising edge.
#[derive(Debug, Clone)]
pub struct CategoryAlertState {
    tracker: ConfidenceTracker,
    active: bool,
}

impl CategoryAlertState {
    pub fn new(capacity: usize) -> Self {
        Self {
            tracker: ConfidenceTracker::new(capacity),
            active: false,
        }
    }

    pub fn ingest(&mut self, probability: f64) {
        self.tracker.update(probability);
    }

    /// Compare the sustained-confidence predicate to the stored flag and
    /// report the edge, updating the flag to match.
    pub fn evaluate(&mut self, threshold: f64, min_hits: usize) -> Transition {
        let should_be_active = self.tracker.hit_count(threshold) >= min_hits;
        let transition = match (self.active, should_be_active) {
            (false, true) => Transition::Rising,
            (true, false) => Transition::Falling,
            _ => Transition::Unchanged,
        };
        self.active = should_be_active;
        transition
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn tracker(&self) -> &ConfidenceTracker {
        &self.tracker
    }

    /// Reset window and flag. A falling edge is deliberately not synthesized
    /// here; the next evaluate() reports it.
    pub fn clear(&mut self) {
        self.tracker.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_rising_and_falling_edge() {
        let mut state = CategoryAlertState::new(5);
        let mut edges = Vec::new();

        // 0.6, 0.6, 0.6 then low values: rises once when hits reach 3,
        // falls once when eviction drops hits below 3.
        for p in [0.6, 0.6, 0.6, 0.2, 0.2, 0.2, 0.2, 0.2] {
            state.ingest(p);
            edges.push(state.evaluate(0.5, 3));
        }

        let rising = edges.iter().filter(|t| **t == Transition::Rising).count();
        let falling = edges.iter().filter(|t| **t == Transition::Falling).count();
        assert_eq!(rising, 1);
        assert_eq!(falling, 1);
        assert_eq!(edges[2], Transition::Rising);
    }

    #[test]
    fn test_eviction_driven_fall_timing() {
        // threshold 0.5, min_hits 3, capacity 5, sequence
        // 0.6 0.6 0.6 0.2 0.2. After five values the window still holds all
        // three hits, so the alert stays up; it falls only once a sixth low
        // value evicts the first 0.6.
        let mut state = CategoryAlertState::new(5);
        for p in [0.6, 0.6, 0.6, 0.2, 0.2] {
            state.ingest(p);
            state.evaluate(0.5, 3);
        }
        assert!(state.is_active(), "window of last 5 still holds 3 hits");

        state.ingest(0.2);
        assert_eq!(state.evaluate(0.5, 3), Transition::Falling);
        assert!(!state.is_active());
    }

    #[test]
    fn test_sustained_alert_stays_unchanged() {
        let mut state = CategoryAlertState::new(5);
        for _ in 0..3 {
            state.ingest(0.9);
            state.evaluate(0.5, 3);
        }
        assert!(state.is_active());

        // Continued high confidence must not re-trigger
        for _ in 0..10 {
            state.ingest(0.9);
            assert_eq!(state.evaluate(0.5, 3), Transition::Unchanged);
        }
    }

    #[test]
    fn test_quiet_state_stays_unchanged() {
        let mut state = CategoryAlertState::new(5);
        for _ in 0..10 {
            state.ingest(0.1);
            assert_eq!(state.evaluate(0.5, 3), Transition::Unchanged);
        }
        assert!(!state.is_active());
    }

    #[test]
    fn test_clear_then_evaluate_reports_fall() {
        let mut state = CategoryAlertState::new(5);
        for _ in 0..3 {
            state.ingest(0.9);
            state.evaluate(0.5, 3);
        }
        assert!(state.is_active());

        state.clear();
        assert!(state.is_active(), "flag flips on evaluate, not on clear");
        assert_eq!(state.evaluate(0.5, 3), Transition::Falling);
    }
}

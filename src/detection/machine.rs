// Alert state machine
// Routes each classifier verdict to the matching per-category tracker and
// evaluates every alertable category once per clip boundary.

use chrono::Utc;

use crate::category::Category;
use crate::classify::Classification;
use crate::config::DetectionConfig;

use super::state::CategoryAlertState;
use super::{AlertEvent, Transition};

/// One CategoryAlertState per alertable category, keyed in stable model
/// index order. Runs synchronously once per completed clip.
pub struct AlertStateMachine {
    states: Vec<(Category, CategoryAlertState)>,
    confidence_threshold: f64,
    min_hits: usize,
}

impl AlertStateMachine {
    pub fn new(config: &DetectionConfig) -> Self {
        let capacity = config.tracker_capacity();
        Self {
            states: Category::alertable()
                .map(|cat| (cat, CategoryAlertState::new(capacity)))
                .collect(),
            confidence_threshold: config.confidence_threshold,
            min_hits: config.min_hits,
        }
    }

    /// Route one clip's verdict and evaluate all categories.
    ///
    /// - `None` (inference failure): nothing is routed, but evaluation still
    ///   runs so standing alerts reflect current windows.
    /// - Background: a confident "normal" verdict is strong evidence against
    ///   every in-flight anomaly hypothesis, so all windows are cleared
    ///   rather than left to decay by eviction.
    /// - Anomaly: only that category's tracker is updated; the others keep
    ///   their windows untouched this boundary.
    ///
    /// Returns every non-Unchanged transition with the rising-edge events
    /// already timestamped.
    pub fn on_classification(
        &mut self,
        result: Option<Classification>,
    ) -> Vec<(Category, Transition, Option<AlertEvent>)> {
        match result {
            None => {
                log::debug!("Classifier produced no result for this clip; skipping routing");
            }
            Some(c) if !c.category.is_alertable() => {
                log::debug!(
                    "Background prediction (p={:.2}); clearing all anomaly windows",
                    c.probability
                );
                for (_, state) in &mut self.states {
                    state.clear();
                }
            }
            Some(c) => {
                if let Some((_, state)) =
                    self.states.iter_mut().find(|(cat, _)| *cat == c.category)
                {
                    state.ingest(c.probability);
                }
            }
        }

        let now = Utc::now();
        let mut transitions = Vec::new();
        for (category, state) in &mut self.states {
            let transition = state.evaluate(self.confidence_threshold, self.min_hits);
            match transition {
                Transition::Unchanged => {}
                Transition::Rising => {
                    // Only the routed category's window changed, so the
                    // triggering probability is that clip's result.
                    let confidence = result
                        .filter(|c| c.category == *category)
                        .map(|c| c.probability)
                        .unwrap_or_else(|| state.tracker().average());
                    transitions.push((
                        *category,
                        transition,
                        Some(AlertEvent {
                            category: *category,
                            confidence,
                            at: now,
                        }),
                    ));
                }
                Transition::Falling => transitions.push((*category, transition, None)),
            }
        }
        transitions
    }

    pub fn is_active(&self, category: Category) -> bool {
        self.states
            .iter()
            .find(|(cat, _)| *cat == category)
            .map(|(_, state)| state.is_active())
            .unwrap_or(false)
    }

    /// Hit count currently held for a category, for diagnostics.
    pub fn hit_count(&self, category: Category) -> usize {
        self.states
            .iter()
            .find(|(cat, _)| *cat == category)
            .map(|(_, state)| state.tracker().hit_count(self.confidence_threshold))
            .unwrap_or(0)
    }

    pub fn reset(&mut self) {
        let capacity = self
            .states
            .first()
            .map(|(_, s)| s.tracker().capacity())
            .unwrap_or(0);
        for (_, state) in &mut self.states {
            *state = CategoryAlertState::new(capacity);
        }
    }
}

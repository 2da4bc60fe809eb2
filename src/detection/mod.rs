// Detection Engine
// Turns the noisy per-clip classifier stream into debounced per-category
// alert transitions.

pub mod machine;
pub mod state;
pub mod tracker;


pub use machine::AlertStateMachine;
pub use state::CategoryAlertState;
pub use tracker::ConfidenceTracker;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::category::Category;

/// Edge produced by one debounce evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The sustained-confidence predicate just became satisfied.
    Rising,
    /// The predicate just stopped being satisfied.
    Falling,
    Unchanged,
}

/// One rising edge, recorded exactly once per sustained event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvent {
    pub category: Category,
    /// Probability of the clip that completed the sustained run.
    pub confidence: f64,
    pub at: DateTime<Utc>,
}

// Argus Core - Temporal Decision Layer
// Turns noisy per-clip classifier output into debounced per-category alerts
// and one consolidated incident per video session.

pub mod category;
pub mod classify;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod evidence;
pub mod frame;
pub mod incident;
pub mod session;
pub mod simulate;
pub mod storage;

pub use category::Category;
pub use classify::{Classification, Classifier};
pub use config::{DetectionConfig, RetentionPolicy};
pub use detection::{AlertEvent, AlertStateMachine, Transition};
pub use error::{ArgusError, Result};
pub use evidence::{EvidenceBuffer, EvidenceRef};
pub use frame::Frame;
pub use incident::{Incident, IncidentSink, LoggingSink};
pub use session::{SessionConsolidator, SessionState};

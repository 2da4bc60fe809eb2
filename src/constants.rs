// Argus Core Constants
// Detection defaults match the edge client contracts. Do not change without
// re-validating against the deployed classifier vocabulary.

// Clip assembly
pub const DEFAULT_FRAMES_PER_CLIP: usize = 16;

// Debounce parameters
pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.5;
pub const DEFAULT_MIN_HITS: usize = 3;

// Evidence retention
pub const DEFAULT_SOURCE_FPS: f64 = 25.0;
pub const DEFAULT_EVIDENCE_SECONDS: u32 = 10;

// Frame geometry expected by the classifier preprocessing stage
pub const MODEL_FRAME_WIDTH: u32 = 224;
pub const MODEL_FRAME_HEIGHT: u32 = 224;
pub const MODEL_FRAME_CHANNELS: u32 = 3;

// Incident log
pub const INCIDENT_DB_FILENAME: &str = "incidents.db";
pub const INCIDENT_STATUS_NEW: &str = "new";

// Detection configuration
// One explicit struct passed into the session at construction, replacing the
// per-module globals the edge deployments used to read from the environment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONFIDENCE_THRESHOLD, DEFAULT_EVIDENCE_SECONDS, DEFAULT_FRAMES_PER_CLIP,
    DEFAULT_MIN_HITS, DEFAULT_SOURCE_FPS,
};
use crate::error::{ArgusError, Result};

/// How many frames the evidence buffer keeps for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RetentionPolicy {
    /// Keep every frame of the session. Opt-in for short offline runs only;
    /// a live stream will grow without bound.
    Unbounded,
    /// Ring buffer holding the most recent N frames.
    RingFrames(usize),
    /// Ring buffer holding the most recent T seconds, sized from source fps.
    RingSeconds(u32),
}

impl RetentionPolicy {
    /// Frame capacity for the buffer, or None for unbounded.
    pub fn frame_capacity(&self, source_fps: f64) -> Option<usize> {
        match self {
            RetentionPolicy::Unbounded => None,
            RetentionPolicy::RingFrames(n) => Some((*n).max(1)),
            RetentionPolicy::RingSeconds(secs) => {
                Some(((*secs as f64 * source_fps).round() as usize).max(1))
            }
        }
    }
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        RetentionPolicy::RingSeconds(DEFAULT_EVIDENCE_SECONDS)
    }
}

impl fmt::Display for RetentionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetentionPolicy::Unbounded => write!(f, "unbounded"),
            RetentionPolicy::RingFrames(n) => write!(f, "ring:{}", n),
            RetentionPolicy::RingSeconds(secs) => write!(f, "ring:{}s", secs),
        }
    }
}

impl FromStr for RetentionPolicy {
    type Err = ArgusError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "unbounded" {
            return Ok(RetentionPolicy::Unbounded);
        }
        let rest = s
            .strip_prefix("ring:")
            .ok_or_else(|| ArgusError::Config(format!("Invalid retention policy: {}", s)))?;
        if let Some(secs) = rest.strip_suffix('s') {
            let secs: u32 = secs
                .parse()
                .map_err(|_| ArgusError::Config(format!("Invalid retention seconds: {}", s)))?;
            if secs == 0 {
                return Err(ArgusError::Config("Retention seconds must be > 0".to_string()));
            }
            Ok(RetentionPolicy::RingSeconds(secs))
        } else {
            let frames: usize = rest
                .parse()
                .map_err(|_| ArgusError::Config(format!("Invalid retention frames: {}", s)))?;
            if frames == 0 {
                return Err(ArgusError::Config("Retention frames must be > 0".to_string()));
            }
            Ok(RetentionPolicy::RingFrames(frames))
        }
    }
}

impl TryFrom<String> for RetentionPolicy {
    type Error = ArgusError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<RetentionPolicy> for String {
    fn from(p: RetentionPolicy) -> String {
        p.to_string()
    }
}

/// Parameters for one monitoring session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Frames accumulated before each classifier call.
    pub frames_per_clip: usize,
    /// Probability above which a clip counts as a hit (strictly greater).
    pub confidence_threshold: f64,
    /// Hits required in the window before an alert rises.
    pub min_hits: usize,
    /// Sliding window capacity per category. None means frames_per_clip.
    pub tracker_capacity: Option<usize>,
    /// Frame rate of the source, used to size duration-based retention.
    pub source_fps: f64,
    pub retention: RetentionPolicy,
    /// Camera / physical location recorded on incidents.
    pub location: String,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            frames_per_clip: DEFAULT_FRAMES_PER_CLIP,
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            min_hits: DEFAULT_MIN_HITS,
            tracker_capacity: None,
            source_fps: DEFAULT_SOURCE_FPS,
            retention: RetentionPolicy::default(),
            location: "Unknown".to_string(),
        }
    }
}

impl DetectionConfig {
    pub fn tracker_capacity(&self) -> usize {
        self.tracker_capacity.unwrap_or(self.frames_per_clip)
    }

    /// Fail fast on parameters that could never alert or never fill a clip.
    pub fn validate(&self) -> Result<()> {
        if self.frames_per_clip == 0 {
            return Err(ArgusError::Config("frames_per_clip must be >= 1".to_string()));
        }
        if !(self.confidence_threshold > 0.0 && self.confidence_threshold < 1.0) {
            return Err(ArgusError::Config(format!(
                "confidence_threshold must be in (0, 1), got {}",
                self.confidence_threshold
            )));
        }
        if self.min_hits == 0 {
            return Err(ArgusError::Config("min_hits must be >= 1".to_string()));
        }
        if self.min_hits > self.tracker_capacity() {
            return Err(ArgusError::Config(format!(
                "min_hits ({}) exceeds tracker capacity ({}); the alert predicate could never be satisfied",
                self.min_hits,
                self.tracker_capacity()
            )));
        }
        if !(self.source_fps > 0.0) {
            return Err(ArgusError::Config(format!(
                "source_fps must be > 0, got {}",
                self.source_fps
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(DetectionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_min_hits_over_capacity_rejected() {
        let config = DetectionConfig {
            min_hits: 20,
            frames_per_clip: 16,
            tracker_capacity: None,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_bounds_rejected() {
        for threshold in [0.0, 1.0, 1.5, -0.1] {
            let config = DetectionConfig {
                confidence_threshold: threshold,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "threshold {} accepted", threshold);
        }
    }

    #[test]
    fn test_tracker_capacity_defaults_to_clip_length() {
        let config = DetectionConfig::default();
        assert_eq!(config.tracker_capacity(), config.frames_per_clip);

        let config = DetectionConfig {
            tracker_capacity: Some(5),
            ..Default::default()
        };
        assert_eq!(config.tracker_capacity(), 5);
    }

    #[test]
    fn test_retention_policy_parsing() {
        assert_eq!(
            "unbounded".parse::<RetentionPolicy>().unwrap(),
            RetentionPolicy::Unbounded
        );
        assert_eq!(
            "ring:120".parse::<RetentionPolicy>().unwrap(),
            RetentionPolicy::RingFrames(120)
        );
        assert_eq!(
            "ring:10s".parse::<RetentionPolicy>().unwrap(),
            RetentionPolicy::RingSeconds(10)
        );
        assert!("ring:0".parse::<RetentionPolicy>().is_err());
        assert!("ring:abc".parse::<RetentionPolicy>().is_err());
        assert!("lru:5".parse::<RetentionPolicy>().is_err());
    }

    #[test]
    fn test_retention_capacity_from_fps() {
        assert_eq!(
            RetentionPolicy::RingSeconds(10).frame_capacity(25.0),
            Some(250)
        );
        assert_eq!(RetentionPolicy::RingFrames(64).frame_capacity(25.0), Some(64));
        assert_eq!(RetentionPolicy::Unbounded.frame_capacity(25.0), None);
    }

    #[test]
    fn test_retention_serde_round_trip() {
        let json = serde_json::to_string(&RetentionPolicy::RingSeconds(5)).unwrap();
        assert_eq!(json, "\"ring:5s\"");
        let back: RetentionPolicy = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RetentionPolicy::RingSeconds(5));
    }
}

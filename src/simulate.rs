// Offline simulation
// Replays a scripted stream of classifier outcomes through a full session,
// standing in for the live camera + model during development. Scenario files
// are JSON, one entry per clip.

use std::collections::VecDeque;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::classify::{Classification, Classifier};
use crate::config::DetectionConfig;
use crate::constants::{MODEL_FRAME_CHANNELS, MODEL_FRAME_HEIGHT, MODEL_FRAME_WIDTH};
use crate::error::Result;
use crate::frame::Frame;
use crate::incident::{Incident, IncidentSink};
use crate::session::SessionConsolidator;

/// One scripted clip outcome: a classifier verdict or an inference failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScenarioClip {
    Verdict { category: Category, probability: f64 },
    Failure { fail: bool },
}

/// A replayable session script.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub location: Option<String>,
    pub clips: Vec<ScenarioClip>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&text)?;
        Ok(scenario)
    }
}

/// Classifier that pops a pre-scripted outcome per clip, optionally adding
/// uniform jitter to the probabilities to simulate model noise.
pub struct ScriptedClassifier {
    outcomes: VecDeque<Option<Classification>>,
    jitter: f64,
}

impl ScriptedClassifier {
    pub fn new(outcomes: Vec<Option<Classification>>) -> Self {
        Self {
            outcomes: outcomes.into(),
            jitter: 0.0,
        }
    }

    pub fn with_jitter(mut self, jitter: f64) -> Self {
        self.jitter = jitter.abs();
        self
    }

    pub fn from_scenario(scenario: &Scenario) -> Self {
        let outcomes = scenario
            .clips
            .iter()
            .map(|clip| match clip {
                ScenarioClip::Verdict {
                    category,
                    probability,
                } => Some(Classification::new(*category, *probability)),
                ScenarioClip::Failure { .. } => None,
            })
            .collect();
        Self::new(outcomes)
    }

    pub fn remaining(&self) -> usize {
        self.outcomes.len()
    }
}

impl Classifier for ScriptedClassifier {
    fn classify(&mut self, _clip: &[Frame]) -> Option<Classification> {
        let outcome = self.outcomes.pop_front().flatten()?;
        if self.jitter > 0.0 {
            let delta = rand::thread_rng().gen_range(-self.jitter..=self.jitter);
            Some(Classification::new(
                outcome.category,
                outcome.probability + delta,
            ))
        } else {
            Some(outcome)
        }
    }
}

/// Flat synthetic frame at model input geometry. The fill byte varies per
/// frame index so evidence fingerprints differ between clips.
pub fn synthetic_frame(index: usize) -> Frame {
    let fill = (index % 256) as u8;
    let len = (MODEL_FRAME_WIDTH * MODEL_FRAME_HEIGHT * MODEL_FRAME_CHANNELS) as usize;
    Frame::new(
        MODEL_FRAME_WIDTH,
        MODEL_FRAME_HEIGHT,
        MODEL_FRAME_CHANNELS,
        vec![fill; len],
    )
}

/// Drive one full session from a scenario: frames_per_clip synthetic frames
/// per scripted clip, then finish(). Returns the consolidated incident, if
/// any category sustained.
pub fn run_scenario<S: IncidentSink>(
    config: DetectionConfig,
    scenario: &Scenario,
    sink: S,
    jitter: f64,
) -> Result<Option<Incident>> {
    let mut config = config;
    if let Some(location) = &scenario.location {
        config.location = location.clone();
    }
    let frames_per_clip = config.frames_per_clip;
    let clips = scenario.clips.len();

    let classifier = ScriptedClassifier::from_scenario(scenario).with_jitter(jitter);
    let mut session = SessionConsolidator::new(config, classifier, sink)?;

    session.start()?;
    let mut frame_index = 0;
    for _ in 0..clips {
        for _ in 0..frames_per_clip {
            session.on_frame(synthetic_frame(frame_index))?;
            frame_index += 1;
        }
    }
    session.finish()
}

// Session consolidator
// Drives one video stream from open to end-of-stream: buffers evidence,
// assembles clips, routes classifier verdicts through the alert state
// machine, and emits at most one consolidated incident at the end.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::category::Category;
use crate::classify::Classifier;
use crate::config::DetectionConfig;
use crate::detection::{AlertEvent, AlertStateMachine, Transition};
use crate::error::{ArgusError, Result};
use crate::evidence::{EvidenceBuffer, EvidenceRef};
use crate::frame::Frame;
use crate::incident::{Incident, IncidentSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running,
    Finalizing,
    Closed,
}

/// Owns the alert state machine and evidence buffer for the lifetime of one
/// stream. Frames must arrive in capture order; the whole path is sequential,
/// and the synchronous classifier call is what applies backpressure to the
/// frame source.
pub struct SessionConsolidator<C: Classifier, S: IncidentSink> {
    config: DetectionConfig,
    classifier: C,
    sink: S,
    state: SessionState,
    machine: AlertStateMachine,
    evidence: EvidenceBuffer,
    clip: Vec<Frame>,
    events: Vec<AlertEvent>,
    started_at: Option<DateTime<Utc>>,
}

impl<C: Classifier, S: IncidentSink> SessionConsolidator<C, S> {
    /// Fails fast on an invalid configuration rather than constructing a
    /// session that could never alert.
    pub fn new(config: DetectionConfig, classifier: C, sink: S) -> Result<Self> {
        config.validate()?;
        let machine = AlertStateMachine::new(&config);
        let evidence = EvidenceBuffer::new(config.retention, config.source_fps);
        Ok(Self {
            config,
            classifier,
            sink,
            state: SessionState::Idle,
            machine,
            evidence,
            clip: Vec::new(),
            events: Vec::new(),
            started_at: None,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Begin a session. Also legal from Closed so one consolidator can serve
    /// successive streams from the same camera.
    pub fn start(&mut self) -> Result<()> {
        match self.state {
            SessionState::Idle | SessionState::Closed => {
                self.machine.reset();
                self.evidence.clear();
                self.clip.clear();
                self.events.clear();
                self.started_at = Some(Utc::now());
                self.state = SessionState::Running;
                log::info!(
                    "Session started at {} (clip={} frames, threshold={}, min_hits={}, retention={})",
                    self.config.location,
                    self.config.frames_per_clip,
                    self.config.confidence_threshold,
                    self.config.min_hits,
                    self.config.retention,
                );
                Ok(())
            }
            state => Err(ArgusError::Session(format!(
                "start() called in {:?} state",
                state
            ))),
        }
    }

    /// Ingest one frame. A frame arriving after finish() is a caller error:
    /// warned and dropped so a late frame cannot corrupt a closed session.
    pub fn on_frame(&mut self, frame: Frame) -> Result<()> {
        if self.state != SessionState::Running {
            log::warn!("Frame received in {:?} state; ignoring", self.state);
            return Ok(());
        }

        self.evidence.append(frame.clone());
        self.clip.push(frame);

        if self.clip.len() == self.config.frames_per_clip {
            let result = self.classifier.classify(&self.clip);
            // A clip is consumed atomically; never partially reused.
            self.clip.clear();

            for (category, transition, event) in self.machine.on_classification(result) {
                match transition {
                    Transition::Rising => {
                        let event = event.ok_or_else(|| {
                            ArgusError::Session("rising edge without event".to_string())
                        })?;
                        log::info!(
                            "[ALERT] {} sustained at {} (confidence {:.2})",
                            category,
                            self.config.location,
                            event.confidence
                        );
                        self.events.push(event);
                    }
                    Transition::Falling => {
                        log::info!("[CLEARED] {} no longer sustained", category);
                    }
                    Transition::Unchanged => {}
                }
            }
        }
        Ok(())
    }

    /// Close the session, emitting the consolidated incident if any category
    /// triggered. Safe to call mid-stream: an in-progress sustained alert is
    /// reported rather than silently dropped. A partial clip at end of stream
    /// is discarded, never submitted short.
    pub fn finish(&mut self) -> Result<Option<Incident>> {
        if self.state != SessionState::Running {
            return Err(ArgusError::Session(format!(
                "finish() called in {:?} state",
                self.state
            )));
        }
        self.state = SessionState::Finalizing;
        let ended_at = Utc::now();
        let started_at = self.started_at.unwrap_or(ended_at);

        let incident = if self.events.is_empty() {
            log::info!("Session ended with no alert-worthy anomalies");
            None
        } else {
            let categories: BTreeSet<Category> =
                self.events.iter().map(|e| e.category).collect();
            let peak_confidence = self
                .events
                .iter()
                .map(|e| e.confidence)
                .fold(0.0_f64, f64::max);
            let evidence = EvidenceRef::from_snapshot(self.evidence.snapshot(), self.config.source_fps);

            let incident = Incident {
                categories,
                peak_confidence,
                started_at,
                ended_at,
                location: self.config.location.clone(),
                evidence,
            };

            log::info!(
                "Consolidated incident: [{}] peak {:.2}, {} evidence frames",
                incident.summary(),
                incident.peak_confidence,
                incident.evidence.frame_count()
            );

            // The incident is already computed and immutable; a sink failure
            // is the collaborator's concern and does not cancel it.
            if let Err(e) = self.sink.on_incident(&incident) {
                log::error!("Incident sink failed: {}", e);
            }
            Some(incident)
        };

        self.evidence.clear();
        self.clip.clear();
        self.state = SessionState::Closed;
        Ok(incident)
    }
}

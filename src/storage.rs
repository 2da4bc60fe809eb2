// Incident log
// SQLite collaborator sink: one row per consolidated incident. Owns durable
// storage of the evidence reference; outbound notification is a separate
// collaborator's job.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::constants::INCIDENT_STATUS_NEW;
use crate::error::Result;
use crate::incident::{Incident, IncidentSink};

/// One stored row, as read back for review tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentRow {
    pub id: i64,
    /// Comma-joined sorted category names, e.g. "Arson, Fighting".
    pub event_type: String,
    pub peak_confidence: f64,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    pub location: String,
    pub evidence_id: String,
    pub evidence_fingerprint: String,
    pub frame_count: i64,
    pub status: String,
}

pub struct SqliteIncidentLog {
    conn: Connection,
}

impl SqliteIncidentLog {
    /// Open or create the incident database.
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)?;
        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS incident_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                event_type TEXT NOT NULL,
                peak_confidence REAL NOT NULL,
                started_at TEXT NOT NULL,
                ended_at TEXT NOT NULL,
                location TEXT,
                evidence_id TEXT NOT NULL,
                evidence_fingerprint TEXT NOT NULL,
                frame_count INTEGER NOT NULL,
                status TEXT NOT NULL DEFAULT 'new'
            );",
        )?;
        Ok(Self { conn })
    }

    pub fn insert(&self, incident: &Incident) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO incident_log (event_type, peak_confidence, started_at, ended_at,
                                       location, evidence_id, evidence_fingerprint, frame_count, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                incident.summary(),
                incident.peak_confidence,
                incident.started_at.to_rfc3339(),
                incident.ended_at.to_rfc3339(),
                incident.location,
                incident.evidence.id.to_string(),
                incident.evidence.fingerprint,
                incident.evidence.frame_count() as i64,
                INCIDENT_STATUS_NEW,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Most recent incidents first.
    pub fn list(&self, limit: i64) -> Result<Vec<IncidentRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, event_type, peak_confidence, started_at, ended_at,
                    location, evidence_id, evidence_fingerprint, frame_count, status
             FROM incident_log
             ORDER BY id DESC
             LIMIT ?1",
        )?;

        let rows = stmt
            .query_map([limit], |row| {
                let started: String = row.get(3)?;
                let ended: String = row.get(4)?;
                Ok(IncidentRow {
                    id: row.get(0)?,
                    event_type: row.get(1)?,
                    peak_confidence: row.get(2)?,
                    started_at: DateTime::parse_from_rfc3339(&started)
                        .map(|t| t.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                    ended_at: DateTime::parse_from_rfc3339(&ended)
                        .map(|t| t.with_timezone(&Utc))
                        .unwrap_or_else(|_| Utc::now()),
                    location: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
                    evidence_id: row.get(6)?,
                    evidence_fingerprint: row.get(7)?,
                    frame_count: row.get(8)?,
                    status: row.get(9)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    pub fn count(&self) -> Result<i64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM incident_log", [], |row| row.get(0))?;
        Ok(count)
    }
}

impl IncidentSink for SqliteIncidentLog {
    fn on_incident(&mut self, incident: &Incident) -> Result<()> {
        let id = self.insert(incident)?;
        log::info!("Incident {} logged to database", id);
        Ok(())
    }
}

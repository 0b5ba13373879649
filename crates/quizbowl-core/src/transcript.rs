//! Session transcripts with JSON persistence.
//!
//! A transcript is a write-once artifact of a finished session; nothing in
//! the game reads one back except tooling and tests.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{Outcome, Player};
use crate::statistics::{compute_session_stats, SessionStats};

/// A complete record of one play-through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transcript {
    /// Unique transcript identifier.
    pub id: Uuid,
    /// When the transcript was assembled.
    pub created_at: DateTime<Utc>,
    /// Where the questions came from.
    pub bank: BankSummary,
    /// How many questions the player asked for.
    pub selection: usize,
    /// Player identity and final score.
    pub player: Player,
    /// Per-turn outcomes in play order.
    pub outcomes: Vec<Outcome>,
    /// Aggregated statistics.
    pub stats: SessionStats,
}

/// Summary of the source bank (without the full question list).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankSummary {
    pub source: String,
    pub declared_count: usize,
    pub actual_count: usize,
}

impl Transcript {
    /// Assemble a transcript from a session's outcomes.
    pub fn new(
        bank: BankSummary,
        selection: usize,
        player: Player,
        outcomes: Vec<Outcome>,
    ) -> Self {
        let stats = compute_session_stats(&outcomes);
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            bank,
            selection,
            player,
            outcomes,
            stats,
        }
    }

    /// Save the transcript as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize transcript")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write transcript to {}", path.display()))?;
        Ok(())
    }

    /// Load a transcript from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read transcript from {}", path.display()))?;
        let transcript: Transcript =
            serde_json::from_str(&content).context("failed to parse transcript JSON")?;
        Ok(transcript)
    }
}

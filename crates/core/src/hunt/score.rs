//! Score persistence gate.
//!
//! The original game persisted score as a side effect of UI re-renders,
//! which can double-write. Here a find is an explicit event, deduplicated
//! on (player, target) before the store sees it, and the write path
//! demands a [`VerifiedIdentity`] so an unverified username can never
//! reach the table.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::TargetId;
use crate::auth::VerifiedIdentity;

#[derive(Debug, thiserror::Error)]
#[error("score store failure: {0}")]
pub struct StoreError(pub String);

#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// The verified identity carries no username to key the record by.
    #[error("verified identity has no username")]
    MissingUsername,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The external score table, keyed uniquely by username.
pub trait ScoreStore {
    /// Current score for `username`, 0 if absent.
    fn fetch_score(&self, username: &str) -> Result<u32, StoreError>;

    fn upsert(
        &mut self,
        username: &str,
        score: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The find was new; the store now holds `score`.
    Recorded { score: u32 },
    /// This (player, target) pair was already counted; nothing written.
    Duplicate,
}

/// Deduplicates find events before they become score writes.
#[derive(Default)]
pub struct ScoreKeeper {
    recorded: HashSet<(i64, TargetId)>,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one find for `identity` on `target`, incrementing the stored
    /// score by one unless this exact pair was counted before. Safe to
    /// call repeatedly from retry and re-render paths.
    pub fn record_find(
        &mut self,
        identity: &VerifiedIdentity,
        target: TargetId,
        store: &mut dyn ScoreStore,
        at: DateTime<Utc>,
    ) -> Result<RecordOutcome, ScoreError> {
        let username = identity
            .username
            .as_deref()
            .ok_or(ScoreError::MissingUsername)?;

        let key = (identity.user_id, target);
        if !self.recorded.insert(key) {
            debug!(
                user_id = identity.user_id,
                target_id = target.value(),
                "duplicate find ignored"
            );
            return Ok(RecordOutcome::Duplicate);
        }

        let written = store
            .fetch_score(username)
            .and_then(|current| {
                let score = current + 1;
                store.upsert(username, score, at).map(|_| score)
            });

        match written {
            Ok(score) => {
                info!(
                    user_id = identity.user_id,
                    target_id = target.value(),
                    score,
                    "find recorded"
                );
                Ok(RecordOutcome::Recorded { score })
            }
            Err(err) => {
                // A failed write must stay retryable.
                self.recorded.remove(&key);
                Err(err.into())
            }
        }
    }
}

/// In-memory store for tests and single-process embedders.
#[derive(Default)]
pub struct MemoryScoreStore {
    rows: HashMap<String, (u32, DateTime<Utc>)>,
}

impl MemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn fetch_score(&self, username: &str) -> Result<u32, StoreError> {
        Ok(self.rows.get(username).map(|(score, _)| *score).unwrap_or(0))
    }

    fn upsert(
        &mut self,
        username: &str,
        score: u32,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        self.rows.insert(username.to_owned(), (score, updated_at));
        Ok(())
    }
}

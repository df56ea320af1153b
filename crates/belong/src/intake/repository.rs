use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::flows::FlowKind;
use crate::wizard::{FormData, WizardSession};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A wizard session opened by a visitor, with the flow it belongs to.
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub id: SessionId,
    pub flow: FlowKind,
    pub session: WizardSession,
    pub opened_at: DateTime<Utc>,
    /// When the session last closed; cleared again on reopen.
    pub closed_at: Option<DateTime<Utc>>,
}

impl SessionRecord {
    /// Keeps `closed_at` in step with the wizard state after an edit.
    pub fn note_closure(&mut self, now: DateTime<Utc>) {
        if self.session.is_open() {
            self.closed_at = None;
        } else if self.closed_at.is_none() {
            self.closed_at = Some(now);
        }
    }

    /// How long the session has been closed, if it is.
    pub fn closed_for(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.closed_at
            .map(|closed_at| (now - closed_at).to_std().unwrap_or(Duration::ZERO))
    }
}

/// Storage abstraction so the intake service can be exercised in isolation.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, record: SessionRecord) -> Result<SessionRecord, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<SessionRecord>, RepositoryError>;
    /// Applies `edit` atomically and returns the updated record.
    fn modify(
        &self,
        id: &SessionId,
        edit: &mut dyn FnMut(&mut SessionRecord),
    ) -> Result<SessionRecord, RepositoryError>;
    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError>;
    /// Drops every record `keep` rejects and returns how many were dropped.
    fn retain(
        &self,
        keep: &mut dyn FnMut(&SessionRecord) -> bool,
    ) -> Result<usize, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Completed inquiry handed to the outside world.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionReceipt {
    pub session_id: SessionId,
    pub flow: FlowKind,
    pub fields: FormData,
    pub submitted_at: DateTime<Utc>,
}

/// Destination for completed inquiries (log, mailbox, CRM adapter).
pub trait SubmissionSink: Send + Sync {
    fn record(&self, receipt: SubmissionReceipt) -> Result<(), SinkError>;
}

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    #[error("submission transport unavailable: {0}")]
    Transport(String),
}

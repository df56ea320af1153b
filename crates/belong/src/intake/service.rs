use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::repository::{
    RepositoryError, SessionId, SessionRecord, SessionRepository, SinkError, SubmissionReceipt,
    SubmissionSink,
};
use crate::flows::FlowKind;
use crate::wizard::{
    Advance, CompletionHandler, CompletionProtocol, FieldPatch, FormData, Rejected,
    StepInputError, Submission, WizardError, WizardState,
};

/// How long a completed or cancelled session is kept before it is swept.
pub const DEFAULT_CLOSED_SESSION_TTL: Duration = Duration::from_secs(300);

/// Hosts wizard sessions for visitors and delivers completed inquiries.
pub struct IntakeService<R, S> {
    repository: Arc<R>,
    sink: Arc<S>,
    protocol: CompletionProtocol,
}

/// What happened when a visitor pressed the primary button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AdvanceEvent {
    Moved { step: usize },
    Completed,
    Rejected { reason: Rejected },
}

#[derive(Debug, Clone)]
pub struct AdvanceOutcome {
    pub record: SessionRecord,
    pub event: AdvanceEvent,
}

#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Step(#[from] StepInputError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error("session is {0} and does not accept field updates")]
    Inactive(&'static str),
}

struct ReceiptHandler<'a, S: ?Sized> {
    sink: &'a S,
    session_id: SessionId,
    flow: FlowKind,
}

impl<S> CompletionHandler for ReceiptHandler<'_, S>
where
    S: SubmissionSink + ?Sized,
{
    fn complete(&self, fields: FormData) {
        let receipt = SubmissionReceipt {
            session_id: self.session_id,
            flow: self.flow,
            fields,
            submitted_at: Utc::now(),
        };
        let field_count = receipt.fields.len();

        match self.sink.record(receipt) {
            Ok(()) => info!(
                session_id = %self.session_id,
                flow = %self.flow,
                field_count,
                "inquiry submitted"
            ),
            Err(SinkError::Transport(reason)) => warn!(
                session_id = %self.session_id,
                flow = %self.flow,
                %reason,
                "submission sink rejected inquiry"
            ),
        }
    }
}

impl<R, S> IntakeService<R, S>
where
    R: SessionRepository + 'static,
    S: SubmissionSink + 'static,
{
    pub fn new(repository: Arc<R>, sink: Arc<S>, protocol: CompletionProtocol) -> Self {
        Self {
            repository,
            sink,
            protocol,
        }
    }

    pub fn protocol(&self) -> CompletionProtocol {
        self.protocol
    }

    /// Open a fresh session of `flow` on its first step.
    pub fn open(&self, flow: FlowKind) -> Result<SessionRecord, IntakeError> {
        let record = SessionRecord {
            id: SessionId::new(),
            flow,
            session: flow.open()?,
            opened_at: Utc::now(),
            closed_at: None,
        };
        let stored = self.repository.insert(record)?;
        info!(session_id = %stored.id, %flow, "wizard opened");
        Ok(stored)
    }

    pub fn get(&self, id: &SessionId) -> Result<SessionRecord, IntakeError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Merge answers through the current step, which only accepts the fields it owns.
    pub fn update(&self, id: &SessionId, patch: FieldPatch) -> Result<SessionRecord, IntakeError> {
        let mut patch = Some(patch);
        let mut outcome: Result<(), IntakeError> = Ok(());

        let record = self
            .repository
            .modify(id, &mut |record: &mut SessionRecord| {
                let state = record.session.state();
                if !matches!(state, WizardState::Active { .. }) {
                    outcome = Err(IntakeError::Inactive(state.label()));
                    return;
                }
                let Some(patch) = patch.take() else {
                    return;
                };
                match record.session.current_step().accept(patch) {
                    Ok(accepted) => {
                        record.session.update_field(accepted);
                    }
                    Err(error) => outcome = Err(error.into()),
                }
            })?;

        outcome?;
        Ok(record)
    }

    /// Move forward; on the last step this runs the completion protocol.
    pub async fn advance(&self, id: &SessionId) -> Result<AdvanceOutcome, IntakeError> {
        let mut advance = None;
        let record = self
            .repository
            .modify(id, &mut |record: &mut SessionRecord| {
                advance = Some(record.session.advance());
            })?;

        match advance.ok_or(RepositoryError::NotFound)? {
            Advance::Moved { step } => {
                debug!(session_id = %record.id, step, "wizard advanced");
                Ok(AdvanceOutcome {
                    record,
                    event: AdvanceEvent::Moved { step },
                })
            }
            Advance::Rejected(reason) => {
                debug!(session_id = %record.id, ?reason, "advance ignored");
                Ok(AdvanceOutcome {
                    record,
                    event: AdvanceEvent::Rejected { reason },
                })
            }
            Advance::Submit(submission) => self.complete(record, submission).await,
        }
    }

    async fn complete(
        &self,
        record: SessionRecord,
        submission: Submission,
    ) -> Result<AdvanceOutcome, IntakeError> {
        let session_id = record.id;
        info!(%session_id, flow = %record.flow, "wizard submitting");

        let handler = ReceiptHandler {
            sink: self.sink.as_ref(),
            session_id,
            flow: record.flow,
        };
        let ticket = self.protocol.run(submission, &handler).await;

        let mut finished = false;
        let record = self
            .repository
            .modify(&session_id, &mut |record: &mut SessionRecord| {
                finished = record.session.finish(ticket);
                record.note_closure(Utc::now());
            })?;
        if !finished {
            warn!(%session_id, "submission finished after the session moved on");
        }

        Ok(AdvanceOutcome {
            record,
            event: AdvanceEvent::Completed,
        })
    }

    pub fn retreat(&self, id: &SessionId) -> Result<SessionRecord, IntakeError> {
        let record = self
            .repository
            .modify(id, &mut |record: &mut SessionRecord| {
                record.session.retreat();
            })?;
        Ok(record)
    }

    /// Close without submitting; collected answers are discarded.
    pub fn cancel(&self, id: &SessionId) -> Result<SessionRecord, IntakeError> {
        let mut cancelled = false;
        let record = self
            .repository
            .modify(id, &mut |record: &mut SessionRecord| {
                cancelled = record.session.cancel();
                record.note_closure(Utc::now());
            })?;
        if cancelled {
            info!(session_id = %record.id, flow = %record.flow, "wizard cancelled");
        }
        Ok(record)
    }

    pub fn reopen(&self, id: &SessionId) -> Result<SessionRecord, IntakeError> {
        let record = self
            .repository
            .modify(id, &mut |record: &mut SessionRecord| {
                record.session.reopen();
                record.note_closure(Utc::now());
            })?;
        Ok(record)
    }

    /// Tear the session down entirely.
    pub fn close(&self, id: &SessionId) -> Result<(), IntakeError> {
        self.repository.remove(id)?;
        debug!(session_id = %id, "wizard session removed");
        Ok(())
    }

    /// Remove sessions that have been closed for at least `ttl`.
    ///
    /// Active and submitting sessions are never touched.
    pub fn sweep_closed(&self, ttl: Duration) -> Result<usize, IntakeError> {
        let now = Utc::now();
        let removed = self.repository.retain(&mut |record: &SessionRecord| {
            record.closed_for(now).map_or(true, |age| age < ttl)
        })?;
        if removed > 0 {
            info!(removed, ttl_secs = ttl.as_secs(), "closed wizard sessions swept");
        }
        Ok(removed)
    }
}

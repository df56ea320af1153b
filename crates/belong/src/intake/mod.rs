//! Hosting of inquiry wizard sessions: storage and delivery seams, the
//! intake service that drives sessions on behalf of visitors, and its HTTP
//! router.

pub mod repository;
pub mod router;
pub mod service;
pub mod view;

#[cfg(test)]
mod tests;

pub use repository::{
    RepositoryError, SessionId, SessionRecord, SessionRepository, SinkError, SubmissionReceipt,
    SubmissionSink,
};
pub use router::intake_router;
pub use service::{
    AdvanceEvent, AdvanceOutcome, IntakeError, IntakeService, DEFAULT_CLOSED_SESSION_TTL,
};
pub use view::{FlowSummary, SessionView};

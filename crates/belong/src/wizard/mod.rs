//! Multi-step inquiry wizards: collected field values, per-step contracts,
//! the session state machine, and the simulated completion protocol.

pub mod completion;
pub mod field;
pub mod presentation;
pub mod session;
pub mod step;

pub use completion::{CompletionHandler, CompletionProtocol, DEFAULT_SUBMIT_DELAY};
pub use field::{FieldPatch, FieldValue, FormData};
pub use presentation::{Controls, PrimaryAction, Progress};
pub use session::{
    Advance, Rejected, Submission, SubmissionTicket, WizardError, WizardSession, WizardState,
};
pub use step::{
    Condition, Confirmation, FieldKind, FieldSpec, FieldView, SelectOption, StepBody,
    StepContent, StepDescriptor, StepInputError, StepView, SummaryLine, SummaryLineView,
    SummarySource, ValidationError, ValidationIssue,
};

use std::sync::Arc;

use serde::Serialize;

use super::field::{FieldPatch, FormData};
use super::step::StepDescriptor;

/// Lifecycle of one wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum WizardState {
    Active { step: usize },
    Submitting,
    Closed,
}

impl WizardState {
    pub fn label(&self) -> &'static str {
        match self {
            WizardState::Active { .. } => "active",
            WizardState::Submitting => "submitting",
            WizardState::Closed => "closed",
        }
    }
}

/// Identifies one completion attempt so a late finish cannot reset a newer session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SubmissionTicket(u64);

/// Snapshot handed to the completion protocol when the last step advances.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub ticket: SubmissionTicket,
    pub fields: FormData,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejected {
    /// A completion is already in flight.
    DoubleSubmit,
    SessionClosed,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Moved { step: usize },
    Submit(Submission),
    Rejected(Rejected),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("a wizard needs at least one step")]
    NoSteps,
}

/// Linear multi-step form controller.
///
/// Advancing past the last step starts the completion protocol instead of
/// moving further. Step validation is never consulted here.
#[derive(Debug, Clone)]
pub struct WizardSession {
    steps: Arc<[StepDescriptor]>,
    state: WizardState,
    form: FormData,
    generation: u64,
}

impl WizardSession {
    pub fn new(steps: impl Into<Arc<[StepDescriptor]>>) -> Result<Self, WizardError> {
        let steps = steps.into();
        if steps.is_empty() {
            return Err(WizardError::NoSteps);
        }

        Ok(Self {
            steps,
            state: WizardState::Active { step: 0 },
            form: FormData::new(),
            generation: 0,
        })
    }

    pub fn steps(&self) -> &[StepDescriptor] {
        &self.steps
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn form_data(&self) -> &FormData {
        &self.form
    }

    pub fn is_submitting(&self) -> bool {
        self.state == WizardState::Submitting
    }

    pub fn is_open(&self) -> bool {
        self.state != WizardState::Closed
    }

    fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    pub fn current_step_index(&self) -> usize {
        match self.state {
            WizardState::Active { step } => step,
            WizardState::Submitting => self.last_index(),
            WizardState::Closed => 0,
        }
    }

    pub fn current_step(&self) -> &StepDescriptor {
        &self.steps[self.current_step_index()]
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step_index() == self.last_index()
    }

    pub fn advance(&mut self) -> Advance {
        match self.state {
            WizardState::Active { step } if step < self.last_index() => {
                let step = step + 1;
                self.state = WizardState::Active { step };
                Advance::Moved { step }
            }
            WizardState::Active { .. } => {
                self.state = WizardState::Submitting;
                Advance::Submit(Submission {
                    ticket: SubmissionTicket(self.generation),
                    fields: self.form.clone(),
                })
            }
            WizardState::Submitting => Advance::Rejected(Rejected::DoubleSubmit),
            WizardState::Closed => Advance::Rejected(Rejected::SessionClosed),
        }
    }

    pub fn retreat(&mut self) -> bool {
        match self.state {
            WizardState::Active { step } if step > 0 => {
                self.state = WizardState::Active { step: step - 1 };
                true
            }
            _ => false,
        }
    }

    pub fn update_field(&mut self, patch: FieldPatch) -> bool {
        if !matches!(self.state, WizardState::Active { .. }) {
            return false;
        }
        self.form.merge(patch);
        true
    }

    /// Discards collected answers without running completion.
    pub fn cancel(&mut self) -> bool {
        if !matches!(self.state, WizardState::Active { .. }) {
            return false;
        }
        self.reset();
        true
    }

    /// Ends the completion protocol started by `advance`.
    pub fn finish(&mut self, ticket: SubmissionTicket) -> bool {
        if self.state != WizardState::Submitting || ticket.0 != self.generation {
            return false;
        }
        self.reset();
        true
    }

    /// Opens a closed session again with a fresh form.
    pub fn reopen(&mut self) -> bool {
        if self.state != WizardState::Closed {
            return false;
        }
        self.form = FormData::new();
        self.state = WizardState::Active { step: 0 };
        true
    }

    fn reset(&mut self) {
        self.form = FormData::new();
        self.state = WizardState::Closed;
        self.generation += 1;
    }
}

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::wizard::{
    CompletionHandler, FieldKind, FieldPatch, FieldSpec, FormData, StepContent, StepDescriptor,
    StepInputError, StepView, ValidationError,
};

/// Direct line to the house manager shown beside the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactDetails {
    pub title: &'static str,
    pub phone: &'static str,
    pub email: &'static str,
}

pub const CONTACT_DETAILS: ContactDetails = ContactDetails {
    title: "connect with frances",
    phone: "(612) 555-7890",
    email: "frances@belonghomecare.com",
};

const THANK_YOU_HEADING: &str = "Thank you for your message!";
const THANK_YOU_BODY: &str = "Frances will get back to you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPhase {
    Editing,
    Sending,
    Sent,
}

/// How long each phase after submit lasts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactTimings {
    pub sending: Duration,
    pub thank_you: Duration,
}

impl Default for ContactTimings {
    fn default() -> Self {
        Self {
            sending: Duration::from_millis(1000),
            thank_you: Duration::from_millis(3000),
        }
    }
}

impl ContactTimings {
    pub fn immediate() -> Self {
        Self {
            sending: Duration::ZERO,
            thank_you: Duration::ZERO,
        }
    }
}

/// Identifies one send so a late timer cannot touch a later message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactTicket {
    generation: u64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContactError {
    #[error("contact form is {phase:?} and cannot take input")]
    Busy { phase: ContactPhase },
    #[error(transparent)]
    Input(#[from] StepInputError),
    #[error("contact form is missing required answers")]
    Incomplete(Vec<ValidationError>),
    #[error("contact form is unavailable")]
    Unavailable,
}

#[derive(Debug, Clone, Serialize)]
pub struct SendButton {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThankYou {
    pub heading: &'static str,
    pub body: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactView {
    pub details: ContactDetails,
    pub phase: ContactPhase,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form: Option<StepView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub button: Option<SendButton>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thank_you: Option<ThankYou>,
}

fn step() -> StepDescriptor {
    StepDescriptor::new(
        "Send a Message",
        StepContent::Fields(vec![
            FieldSpec::new("name", "Your Name", FieldKind::Text).required(),
            FieldSpec::new("email", "Email", FieldKind::Email).required(),
            FieldSpec::new("phone", "Phone Number", FieldKind::Phone),
            FieldSpec::new("message", "Message", FieldKind::TextArea).required(),
        ]),
    )
}

/// Single-page contact form: edit, send, thank the visitor, then clear.
///
/// Unlike the wizards, required fields block sending.
#[derive(Debug, Clone)]
pub struct ContactForm {
    step: StepDescriptor,
    form: FormData,
    phase: ContactPhase,
    generation: u64,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            step: step(),
            form: FormData::new(),
            phase: ContactPhase::Editing,
            generation: 0,
        }
    }

    pub fn phase(&self) -> ContactPhase {
        self.phase
    }

    pub fn form_data(&self) -> &FormData {
        &self.form
    }

    pub fn update(&mut self, patch: FieldPatch) -> Result<(), ContactError> {
        if self.phase != ContactPhase::Editing {
            return Err(ContactError::Busy { phase: self.phase });
        }
        let accepted = self.step.accept(patch)?;
        self.form.merge(accepted);
        Ok(())
    }

    /// Starts sending and hands back the message to deliver.
    pub fn submit(&mut self) -> Result<(ContactTicket, FormData), ContactError> {
        if self.phase != ContactPhase::Editing {
            return Err(ContactError::Busy { phase: self.phase });
        }
        let issues = self.step.validate(&self.form);
        if !issues.is_empty() {
            return Err(ContactError::Incomplete(issues));
        }
        self.phase = ContactPhase::Sending;
        Ok((
            ContactTicket {
                generation: self.generation,
            },
            self.form.clone(),
        ))
    }

    pub fn delivered(&mut self, ticket: ContactTicket) -> bool {
        if self.phase != ContactPhase::Sending || ticket.generation != self.generation {
            return false;
        }
        self.phase = ContactPhase::Sent;
        true
    }

    /// Ends the thank-you note and clears every answer.
    pub fn reset(&mut self, ticket: ContactTicket) -> bool {
        if self.phase != ContactPhase::Sent || ticket.generation != self.generation {
            return false;
        }
        self.form = FormData::new();
        self.phase = ContactPhase::Editing;
        self.generation += 1;
        true
    }

    pub fn view(&self) -> ContactView {
        let (form, button, thank_you) = match self.phase {
            ContactPhase::Sent => (
                None,
                None,
                Some(ThankYou {
                    heading: THANK_YOU_HEADING,
                    body: THANK_YOU_BODY,
                }),
            ),
            phase => {
                let sending = phase == ContactPhase::Sending;
                let button = SendButton {
                    label: if sending { "Sending..." } else { "Send Message" },
                    disabled: sending,
                };
                (Some(self.step.view(&self.form)), Some(button), None)
            }
        };
        ContactView {
            details: CONTACT_DETAILS,
            phase: self.phase,
            form,
            button,
            thank_you,
        }
    }
}

fn lock(form: &Mutex<ContactForm>) -> Result<MutexGuard<'_, ContactForm>, ContactError> {
    form.lock().map_err(|_| ContactError::Unavailable)
}

/// Runs one send to the end: sending pause, delivery, thank-you pause, reset.
///
/// The lock is only held between pauses so the view stays readable.
pub async fn send_message<H>(
    form: &Mutex<ContactForm>,
    timings: ContactTimings,
    handler: &H,
) -> Result<(), ContactError>
where
    H: CompletionHandler + ?Sized,
{
    let (ticket, fields) = lock(form)?.submit()?;
    debug!(delay_ms = timings.sending.as_millis() as u64, "sending contact message");
    tokio::time::sleep(timings.sending).await;
    handler.complete(fields);
    if !lock(form)?.delivered(ticket) {
        return Ok(());
    }
    tokio::time::sleep(timings.thank_you).await;
    lock(form)?.reset(ticket);
    Ok(())
}

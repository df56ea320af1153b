use std::time::Duration;

use tracing::debug;

use super::field::FormData;
use super::session::{Submission, SubmissionTicket};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1000);

/// Receives the collected fields once per successful completion.
pub trait CompletionHandler: Send + Sync {
    fn complete(&self, fields: FormData);
}

impl<F> CompletionHandler for F
where
    F: Fn(FormData) + Send + Sync,
{
    fn complete(&self, fields: FormData) {
        self(fields)
    }
}

/// Simulated submission: wait, hand the snapshot over, return the ticket to finish with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionProtocol {
    delay: Duration,
}

impl Default for CompletionProtocol {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl CompletionProtocol {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn immediate() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub async fn run<H>(&self, submission: Submission, handler: &H) -> SubmissionTicket
    where
        H: CompletionHandler + ?Sized,
    {
        let Submission { ticket, fields } = submission;
        if !self.delay.is_zero() {
            debug!(delay_ms = self.delay.as_millis() as u64, "holding submission");
            tokio::time::sleep(self.delay).await;
        }
        handler.complete(fields);
        ticket
    }
}

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::repository::{SessionId, SessionRecord};
use crate::flows::FlowKind;
use crate::wizard::{Controls, FormData, Progress, StepView};

/// Everything a client needs to draw the wizard modal for one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub flow: FlowKind,
    pub title: &'static str,
    pub state: &'static str,
    pub open: bool,
    pub step_index: usize,
    pub step_count: usize,
    pub step: StepView,
    pub progress: Progress,
    pub controls: Controls,
    pub form_data: FormData,
    pub opened_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
}

impl From<&SessionRecord> for SessionView {
    fn from(record: &SessionRecord) -> Self {
        let session = &record.session;
        Self {
            session_id: record.id,
            flow: record.flow,
            title: record.flow.title(),
            state: session.state().label(),
            open: session.is_open(),
            step_index: session.current_step_index(),
            step_count: session.steps().len(),
            step: session.current_step().view(session.form_data()),
            progress: session.progress(),
            controls: session.controls(),
            form_data: session.form_data().clone(),
            opened_at: record.opened_at,
            closed_at: record.closed_at,
        }
    }
}

/// Summary of a flow for the launcher listing.
#[derive(Debug, Clone, Serialize)]
pub struct FlowSummary {
    pub flow: FlowKind,
    pub title: &'static str,
    pub launcher: crate::flows::LauncherCard,
    pub steps: Vec<String>,
}

impl From<FlowKind> for FlowSummary {
    fn from(flow: FlowKind) -> Self {
        Self {
            flow,
            title: flow.title(),
            launcher: flow.launcher(),
            steps: flow.steps().iter().map(|step| step.title.clone()).collect(),
        }
    }
}

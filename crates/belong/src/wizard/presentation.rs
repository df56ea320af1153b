use serde::Serialize;

use super::session::{WizardSession, WizardState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Progress {
    /// One entry per step; filled up to and including the current one.
    pub segments: Vec<bool>,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryAction {
    Next,
    Complete,
    Submitting,
}

impl PrimaryAction {
    pub fn label(&self) -> &'static str {
        match self {
            PrimaryAction::Next => "Next",
            PrimaryAction::Complete => "Complete",
            PrimaryAction::Submitting => "Submitting...",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Controls {
    pub primary: PrimaryAction,
    pub primary_enabled: bool,
    pub back_enabled: bool,
}

impl WizardSession {
    pub fn progress(&self) -> Progress {
        let current = self.current_step_index();
        let total = self.steps().len();
        Progress {
            segments: (0..total).map(|index| index <= current).collect(),
            label: format!("Step {} of {}", current + 1, total),
        }
    }

    pub fn controls(&self) -> Controls {
        let primary = match self.state() {
            WizardState::Submitting => PrimaryAction::Submitting,
            _ if self.is_last_step() => PrimaryAction::Complete,
            _ => PrimaryAction::Next,
        };

        Controls {
            primary,
            primary_enabled: matches!(self.state(), WizardState::Active { .. }),
            back_enabled: matches!(self.state(), WizardState::Active { step } if step > 0),
        }
    }
}

//! The inquiry wizards offered on the site, plus the single-page contact form.

pub mod careers;
pub mod contact;
pub mod family_visit;
pub mod referral;

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use crate::wizard::{StepDescriptor, WizardError, WizardSession};

pub use careers::{job_openings, JobOpening};
pub use contact::{
    send_message, ContactDetails, ContactError, ContactForm, ContactPhase, ContactTimings,
    ContactView, CONTACT_DETAILS,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlowKind {
    FamilyVisit,
    ProfessionalReferral,
    JoinOurTeam,
}

/// Card that opens a flow's wizard when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LauncherCard {
    pub title: &'static str,
    pub description: &'static str,
    pub button_text: &'static str,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown flow '{0}'")]
pub struct UnknownFlow(pub String);

impl FlowKind {
    pub const ALL: [FlowKind; 3] = [
        FlowKind::FamilyVisit,
        FlowKind::ProfessionalReferral,
        FlowKind::JoinOurTeam,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            FlowKind::FamilyVisit => "family-visit",
            FlowKind::ProfessionalReferral => "professional-referral",
            FlowKind::JoinOurTeam => "join-our-team",
        }
    }

    /// Heading of the wizard modal.
    pub fn title(&self) -> &'static str {
        match self {
            FlowKind::FamilyVisit => "Schedule a Visit",
            FlowKind::ProfessionalReferral => "Make a Resident Referral",
            FlowKind::JoinOurTeam => "Join Our Team",
        }
    }

    pub fn launcher(&self) -> LauncherCard {
        match self {
            FlowKind::FamilyVisit => family_visit::LAUNCHER,
            FlowKind::ProfessionalReferral => referral::LAUNCHER,
            FlowKind::JoinOurTeam => careers::LAUNCHER,
        }
    }

    /// Step sequence, built once and shared by every session of the flow.
    pub fn steps(&self) -> Arc<[StepDescriptor]> {
        static FAMILY_VISIT: OnceLock<Arc<[StepDescriptor]>> = OnceLock::new();
        static REFERRAL: OnceLock<Arc<[StepDescriptor]>> = OnceLock::new();
        static CAREERS: OnceLock<Arc<[StepDescriptor]>> = OnceLock::new();

        let cell = match self {
            FlowKind::FamilyVisit => FAMILY_VISIT.get_or_init(|| family_visit::steps().into()),
            FlowKind::ProfessionalReferral => REFERRAL.get_or_init(|| referral::steps().into()),
            FlowKind::JoinOurTeam => CAREERS.get_or_init(|| careers::steps().into()),
        };
        Arc::clone(cell)
    }

    pub fn open(&self) -> Result<WizardSession, WizardError> {
        WizardSession::new(self.steps())
    }
}

impl fmt::Display for FlowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for FlowKind {
    type Err = UnknownFlow;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        FlowKind::ALL
            .into_iter()
            .find(|flow| flow.slug().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownFlow(value.to_string()))
    }
}

use serde::Serialize;

use crate::wizard::{
    Confirmation, FieldKind, FieldSpec, SelectOption, StepContent, StepDescriptor, SummaryLine,
    SummarySource,
};

use super::LauncherCard;

pub(crate) const LAUNCHER: LauncherCard = LauncherCard {
    title: "join our team",
    description: "We hire people who believe in creating genuine homes, not institutions. Join a team that's making a real difference.",
    button_text: "Apply Now",
    highlighted: false,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobOpening {
    pub title: &'static str,
    pub location: &'static str,
    pub employment_type: &'static str,
    pub description: &'static str,
    pub requirements: &'static [&'static str],
}

const OPENINGS: &[JobOpening] = &[JobOpening {
    title: "Residential Care Coordinator",
    location: "Aspen Grove House, Brooklyn Park, MN",
    employment_type: "Full-time",
    description: "We're looking for a compassionate and organized Residential Care Coordinator to oversee daily operations at our Aspen Grove House.",
    requirements: &[
        "Licensed Practical Nurse (LPN) or Registered Nurse (RN) certification",
        "Minimum 2 years experience in mental health care",
        "Strong organizational and documentation skills",
        "Excellent interpersonal and communication abilities",
        "Genuine passion for creating home-like environments for people with mental health conditions",
    ],
}];

pub fn job_openings() -> &'static [JobOpening] {
    OPENINGS
}

fn position_options() -> Vec<SelectOption> {
    OPENINGS
        .iter()
        .map(|job| SelectOption::new(job.title, job.title))
        .chain(std::iter::once(SelectOption::new("other", "Other/Not Listed")))
        .collect()
}

pub(crate) fn steps() -> Vec<StepDescriptor> {
    vec![
        StepDescriptor::new(
            "Your Information",
            StepContent::Fields(vec![
                FieldSpec::new("fullName", "Your Name", FieldKind::Text)
                    .required()
                    .placeholder("Your full name"),
                FieldSpec::new("email", "Email Address", FieldKind::Email)
                    .required()
                    .placeholder("your.email@example.com"),
                FieldSpec::new("phone", "Phone Number", FieldKind::Phone)
                    .placeholder("(123) 456-7890"),
            ]),
        )
        .with_description("Tell us about yourself"),
        StepDescriptor::new(
            "Job Preferences",
            StepContent::Fields(vec![
                FieldSpec::new(
                    "position",
                    "Position of Interest",
                    FieldKind::Select {
                        options: position_options(),
                    },
                )
                .required(),
                FieldSpec::new("otherPosition", "Please Specify", FieldKind::Text)
                    .placeholder("Position you're interested in")
                    .visible_when("position", "other"),
                FieldSpec::new("experience", "Relevant Experience", FieldKind::TextArea)
                    .placeholder("Briefly describe your relevant experience"),
                FieldSpec::new("fullTime", "Full-time", FieldKind::Checkbox),
                FieldSpec::new("partTime", "Part-time", FieldKind::Checkbox),
            ]),
        )
        .with_description("What position interests you?"),
        StepDescriptor::new(
            "Confirm Application",
            StepContent::Confirmation(Confirmation {
                intro: "\"I hire for heart first, skills second. Technical abilities can be taught, but genuine compassion and respect for our residents is essential.\" - Frances, Founder",
                lines: vec![
                    SummaryLine::field("Name:", "fullName"),
                    SummaryLine::field("Email:", "email"),
                    SummaryLine::field("Phone:", "phone"),
                    SummaryLine {
                        label: "Position:",
                        source: SummarySource::ChoiceOrOther {
                            field: "position",
                            other_field: "otherPosition",
                        },
                    },
                ],
                closing: "After submitting, we'll review your application and contact you within 3-5 business days to discuss next steps.",
            }),
        )
        .with_description("Review your information"),
    ]
}

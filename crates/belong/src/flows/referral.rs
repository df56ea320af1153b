use crate::wizard::{
    Confirmation, FieldKind, FieldSpec, SelectOption, StepContent, StepDescriptor, SummaryLine,
};

use super::LauncherCard;

pub(crate) const LAUNCHER: LauncherCard = LauncherCard {
    title: "for healthcare professionals",
    description: "We're currently accepting new residents at our 55+ home. Our streamlined referral process makes placement quick and efficient.",
    button_text: "Make a Referral",
    highlighted: true,
};

pub const MINIMUM_RESIDENT_AGE: f64 = 55.0;
pub const MAXIMUM_RESIDENT_AGE: f64 = 120.0;

const ROLES: &[SelectOption] = &[
    SelectOption::new("case_manager", "Case Manager"),
    SelectOption::new("social_worker", "Social Worker"),
    SelectOption::new("discharge_planner", "Discharge Planner"),
    SelectOption::new("healthcare_provider", "Healthcare Provider"),
    SelectOption::new("other", "Other"),
];

const LOCATIONS: &[SelectOption] = &[
    SelectOption::new("hospital", "Hospital"),
    SelectOption::new("skilled_nursing", "Skilled Nursing Facility"),
    SelectOption::new("assisted_living", "Assisted Living"),
    SelectOption::new("home", "Home"),
    SelectOption::new("other", "Other"),
];

const CARE_NEEDS: &[SelectOption] = &[
    SelectOption::new("memory_care", "Memory Care"),
    SelectOption::new("mobility_assistance", "Mobility Assistance"),
    SelectOption::new("medication_management", "Medication Management"),
    SelectOption::new("activities_daily_living", "Activities of Daily Living"),
    SelectOption::new("social_engagement", "Social Engagement"),
    SelectOption::new("multiple", "Multiple Needs"),
];

const TIMEFRAMES: &[SelectOption] = &[
    SelectOption::new("immediate", "Immediate (within days)"),
    SelectOption::new("soon", "Soon (within 2 weeks)"),
    SelectOption::new("planning", "Planning (within 1-2 months)"),
    SelectOption::new("future", "Future (2+ months)"),
];

pub(crate) fn steps() -> Vec<StepDescriptor> {
    vec![
        StepDescriptor::new(
            "Your Information",
            StepContent::Fields(vec![
                FieldSpec::new("caseManagerName", "Your Name", FieldKind::Text)
                    .required()
                    .placeholder("Your full name"),
                FieldSpec::new("organization", "Organization", FieldKind::Text)
                    .placeholder("Your organization"),
                FieldSpec::new("email", "Email", FieldKind::Email)
                    .required()
                    .placeholder("Your email address"),
                FieldSpec::new("phone", "Phone", FieldKind::Phone)
                    .placeholder("Your phone number"),
                FieldSpec::new(
                    "role",
                    "Your Role",
                    FieldKind::Select {
                        options: ROLES.to_vec(),
                    },
                ),
            ]),
        )
        .with_description("Tell us about yourself"),
        StepDescriptor::new(
            "Resident Information",
            StepContent::Fields(vec![
                FieldSpec::new("residentName", "Resident Name", FieldKind::Text)
                    .required()
                    .placeholder("Resident's full name"),
                FieldSpec::new(
                    "residentAge",
                    "Age",
                    FieldKind::Number {
                        min: Some(MINIMUM_RESIDENT_AGE),
                        max: Some(MAXIMUM_RESIDENT_AGE),
                    },
                )
                .placeholder("Resident's age"),
                FieldSpec::new(
                    "currentLocation",
                    "Current Location",
                    FieldKind::Select {
                        options: LOCATIONS.to_vec(),
                    },
                ),
                FieldSpec::new(
                    "careNeeds",
                    "Primary Care Needs",
                    FieldKind::Select {
                        options: CARE_NEEDS.to_vec(),
                    },
                ),
                FieldSpec::new(
                    "timeframe",
                    "Placement Timeframe",
                    FieldKind::Select {
                        options: TIMEFRAMES.to_vec(),
                    },
                ),
            ]),
        )
        .with_description("Tell us about the potential resident"),
        StepDescriptor::new(
            "Additional Information",
            StepContent::Fields(vec![
                FieldSpec::new("medicalNotes", "Medical Notes", FieldKind::TextArea)
                    .placeholder("Relevant diagnoses, medications, or care considerations"),
                FieldSpec::new("additionalNotes", "Additional Notes", FieldKind::TextArea)
                    .placeholder("Anything else our admissions team should know"),
            ]),
        )
        .with_description("Any other details we should know"),
        StepDescriptor::new(
            "Confirm Referral",
            StepContent::Confirmation(Confirmation {
                intro: "Please review the referral information before submitting:",
                lines: vec![
                    SummaryLine::field("Referrer:", "caseManagerName"),
                    SummaryLine::field("Organization:", "organization"),
                    SummaryLine::field("Resident:", "residentName"),
                    SummaryLine::field("Age:", "residentAge"),
                    SummaryLine::field("Current Location:", "currentLocation"),
                    SummaryLine::field("Timeframe:", "timeframe"),
                ],
                closing: "By clicking \"Complete\", this referral will be sent to our admissions team. We'll contact you within 24 hours to discuss next steps.",
            }),
        )
        .with_description("Review and submit your referral"),
    ]
}

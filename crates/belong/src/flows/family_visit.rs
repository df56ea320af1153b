use crate::wizard::{
    Confirmation, FieldKind, FieldSpec, SelectOption, StepContent, StepDescriptor, SummaryLine,
};

use super::LauncherCard;

pub(crate) const LAUNCHER: LauncherCard = LauncherCard {
    title: "for families & loved ones",
    description: "We'd love to show you around our homes and answer any questions you have about our services and accommodations.",
    button_text: "Schedule a Visit",
    highlighted: false,
};

const RELATIONSHIPS: &[SelectOption] = &[
    SelectOption::new("spouse", "Spouse/Partner"),
    SelectOption::new("child", "Child/Stepchild"),
    SelectOption::new("sibling", "Sibling"),
    SelectOption::new("other-family", "Other Family Member"),
    SelectOption::new("friend", "Friend"),
    SelectOption::new("self", "Self (I am the potential resident)"),
    SelectOption::new("other", "Other"),
];

const GROUP_SIZES: &[SelectOption] = &[
    SelectOption::new("1", "Just me (1 person)"),
    SelectOption::new("2", "2 people"),
    SelectOption::new("3", "3 people"),
    SelectOption::new("4", "4 people"),
    SelectOption::new("5+", "5 or more people"),
];

const VISIT_TIMES: &[SelectOption] = &[
    SelectOption::new("morning", "Morning (10am-12pm)"),
    SelectOption::new("early-afternoon", "Early Afternoon (12pm-2pm)"),
    SelectOption::new("late-afternoon", "Late Afternoon (2pm-4pm)"),
];

pub(crate) fn steps() -> Vec<StepDescriptor> {
    vec![
        StepDescriptor::new(
            "Your Information",
            StepContent::Fields(vec![
                FieldSpec::new("visitorName", "Your Name", FieldKind::Text)
                    .required()
                    .placeholder("Your full name"),
                FieldSpec::new(
                    "relationship",
                    "Relationship to Potential Resident",
                    FieldKind::Select {
                        options: RELATIONSHIPS.to_vec(),
                    },
                ),
                FieldSpec::new("email", "Email", FieldKind::Email)
                    .required()
                    .placeholder("Your email address"),
                FieldSpec::new("phone", "Phone", FieldKind::Phone)
                    .placeholder("Your phone number"),
                FieldSpec::new(
                    "groupSize",
                    "Number of People Visiting",
                    FieldKind::Select {
                        options: GROUP_SIZES.to_vec(),
                    },
                ),
            ]),
        )
        .with_description("Tell us about yourself"),
        StepDescriptor::new(
            "Visit Preferences",
            StepContent::Fields(vec![
                FieldSpec::new("preferredDate", "Preferred Visit Date", FieldKind::Date)
                    .required(),
                FieldSpec::new(
                    "timePreference",
                    "Preferred Time",
                    FieldKind::Select {
                        options: VISIT_TIMES.to_vec(),
                    },
                ),
                FieldSpec::new("alternateDate", "Alternate Date (Optional)", FieldKind::Date),
                FieldSpec::new(
                    "flexibleTiming",
                    "I'm flexible with timing",
                    FieldKind::Checkbox,
                ),
                FieldSpec::new("interests", "Areas of Interest", FieldKind::TextArea)
                    .placeholder("E.g., bedrooms, common areas, activities, meal plans, etc."),
                FieldSpec::new("questions", "Questions for the Visit", FieldKind::TextArea)
                    .placeholder("Any specific questions you'd like answered during your visit?"),
            ]),
        )
        .with_description("When would you like to visit?"),
        StepDescriptor::new(
            "Confirm Details",
            StepContent::Confirmation(Confirmation {
                intro: "Please review your information before submitting:",
                lines: vec![
                    SummaryLine::field("Name:", "visitorName"),
                    SummaryLine::field("Relationship:", "relationship"),
                    SummaryLine::field("Email:", "email"),
                    SummaryLine::field("Phone:", "phone"),
                    SummaryLine::field("Group Size:", "groupSize"),
                    SummaryLine::field("Preferred Date:", "preferredDate"),
                    SummaryLine::field("Preferred Time:", "timePreference"),
                ],
                closing: "By clicking \"Complete\", your visit request will be sent to our team. We'll contact you within 24 hours to confirm your visit.",
            }),
        )
        .with_description("Review your information"),
    ]
}

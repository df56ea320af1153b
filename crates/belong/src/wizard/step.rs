use std::fmt;

use serde::Serialize;

use super::field::{FieldPatch, FieldValue, FormData};

const NOT_PROVIDED: &str = "Not provided";

/// A choice offered by a select field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl SelectOption {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self { value, label }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Phone,
    Date,
    Number {
        #[serde(skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    Select {
        options: Vec<SelectOption>,
    },
    Checkbox,
    TextArea,
}

/// Shows a field only while another field holds a given value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub field: &'static str,
    pub equals: &'static str,
}

impl Condition {
    fn holds(&self, form: &FormData) -> bool {
        form.text(self.field) == self.equals
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<Condition>,
}

impl FieldSpec {
    pub fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            placeholder: None,
            visible_when: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, placeholder: &'static str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    pub fn visible_when(mut self, field: &'static str, equals: &'static str) -> Self {
        self.visible_when = Some(Condition { field, equals });
        self
    }

    pub fn is_visible(&self, form: &FormData) -> bool {
        self.visible_when
            .as_ref()
            .map_or(true, |condition| condition.holds(form))
    }

    fn coerce(&self, value: FieldValue) -> FieldValue {
        match (&self.kind, value) {
            (FieldKind::Checkbox, FieldValue::Text(raw)) => {
                match raw.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" | "yes" | "1" => FieldValue::Flag(true),
                    "false" | "off" | "no" | "0" | "" => FieldValue::Flag(false),
                    _ => FieldValue::Text(raw),
                }
            }
            (FieldKind::Number { .. }, FieldValue::Text(raw)) => match raw.trim().parse::<f64>() {
                Ok(number) => FieldValue::Number(number),
                Err(_) => FieldValue::Text(raw),
            },
            (_, value) => value,
        }
    }

    fn check(&self, form: &FormData) -> Option<ValidationIssue> {
        let value = form.get(self.name).filter(|value| !value.is_blank());
        let Some(value) = value else {
            return self.required.then_some(ValidationIssue::Missing);
        };

        match &self.kind {
            FieldKind::Email => {
                let text = value.as_text().unwrap_or_default();
                let well_formed = text
                    .split_once('@')
                    .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
                (!well_formed).then_some(ValidationIssue::Malformed)
            }
            FieldKind::Number { min, max } => match value.as_number() {
                None => Some(ValidationIssue::NotANumber),
                Some(number) => {
                    let below = min.is_some_and(|min| number < min);
                    let above = max.is_some_and(|max| number > max);
                    (below || above).then_some(ValidationIssue::OutOfRange {
                        min: *min,
                        max: *max,
                    })
                }
            },
            FieldKind::Select { options } => {
                let text = value.as_text().unwrap_or_default();
                (!options.iter().any(|option| option.value == text))
                    .then_some(ValidationIssue::UnknownOption)
            }
            _ => None,
        }
    }
}

/// Advisory problem with one field. Never blocks navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum ValidationIssue {
    Missing,
    Malformed,
    NotANumber,
    OutOfRange {
        min: Option<f64>,
        max: Option<f64>,
    },
    UnknownOption,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::Missing => f.write_str("is required"),
            ValidationIssue::Malformed => f.write_str("is not well formed"),
            ValidationIssue::NotANumber => f.write_str("must be a number"),
            ValidationIssue::OutOfRange { min, max } => {
                f.write_str("must be")?;
                if let Some(min) = min {
                    write!(f, " at least {min}")?;
                }
                if let Some(max) = max {
                    write!(f, " at most {max}")?;
                }
                Ok(())
            }
            ValidationIssue::UnknownOption => f.write_str("is not one of the offered choices"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{field} {issue}")]
pub struct ValidationError {
    pub field: &'static str,
    #[serde(flatten)]
    pub issue: ValidationIssue,
}

/// Where a confirmation line takes its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySource {
    Field(&'static str),
    /// Reads `other_field` when `field` holds `"other"`.
    ChoiceOrOther {
        field: &'static str,
        other_field: &'static str,
    },
}

impl SummarySource {
    fn resolve(&self, form: &FormData) -> Option<String> {
        match self {
            SummarySource::Field(name) => form.display(name),
            SummarySource::ChoiceOrOther { field, other_field } => {
                if form.text(field) == "other" {
                    form.display(other_field)
                } else {
                    form.display(field)
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub label: &'static str,
    pub source: SummarySource,
}

impl SummaryLine {
    pub const fn field(label: &'static str, name: &'static str) -> Self {
        Self {
            label,
            source: SummarySource::Field(name),
        }
    }
}

/// Read-only review step that closes every flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirmation {
    pub intro: &'static str,
    pub lines: Vec<SummaryLine>,
    pub closing: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepContent {
    Fields(Vec<FieldSpec>),
    Confirmation(Confirmation),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StepDescriptor {
    pub title: String,
    pub description: Option<String>,
    pub content: StepContent,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepInputError {
    #[error("step '{step}' does not own field '{field}'")]
    ForeignField { step: String, field: String },
}

impl StepDescriptor {
    pub fn new(title: impl Into<String>, content: StepContent) -> Self {
        Self {
            title: title.into(),
            description: None,
            content,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        match &self.content {
            StepContent::Fields(fields) => fields,
            StepContent::Confirmation(_) => &[],
        }
    }

    pub fn is_confirmation(&self) -> bool {
        matches!(self.content, StepContent::Confirmation(_))
    }

    pub fn owns(&self, name: &str) -> bool {
        self.fields().iter().any(|field| field.name == name)
    }

    /// Narrows raw input to the keys this step owns, coerced to their field kinds.
    pub fn accept(&self, patch: FieldPatch) -> Result<FieldPatch, StepInputError> {
        let mut accepted = FieldPatch::new();
        for (name, value) in patch.into_entries() {
            let Some(spec) = self.fields().iter().find(|field| field.name == name) else {
                return Err(StepInputError::ForeignField {
                    step: self.title.clone(),
                    field: name,
                });
            };
            accepted.insert(name, value.map(|value| spec.coerce(value)));
        }
        Ok(accepted)
    }

    pub fn validate(&self, form: &FormData) -> Vec<ValidationError> {
        self.fields()
            .iter()
            .filter(|field| field.is_visible(form))
            .filter_map(|field| {
                field.check(form).map(|issue| ValidationError {
                    field: field.name,
                    issue,
                })
            })
            .collect()
    }

    pub fn view(&self, form: &FormData) -> StepView {
        let body = match &self.content {
            StepContent::Fields(fields) => {
                let issues = self.validate(form);
                StepBody::Fields {
                    fields: fields
                        .iter()
                        .filter(|field| field.is_visible(form))
                        .map(|field| FieldView {
                            spec: field.clone(),
                            value: form.get(field.name).cloned().unwrap_or_else(|| {
                                if field.kind == FieldKind::Checkbox {
                                    FieldValue::Flag(false)
                                } else {
                                    FieldValue::text("")
                                }
                            }),
                            issues: issues
                                .iter()
                                .filter(|issue| issue.field == field.name)
                                .map(|issue| issue.issue.clone())
                                .collect(),
                        })
                        .collect(),
                }
            }
            StepContent::Confirmation(confirmation) => StepBody::Confirmation {
                intro: confirmation.intro,
                lines: confirmation
                    .lines
                    .iter()
                    .map(|line| SummaryLineView {
                        label: line.label,
                        value: line
                            .source
                            .resolve(form)
                            .unwrap_or_else(|| NOT_PROVIDED.to_string()),
                    })
                    .collect(),
                closing: confirmation.closing,
            },
        };

        StepView {
            title: self.title.clone(),
            description: self.description.clone(),
            body,
        }
    }
}

/// Render model for the step currently on screen.
#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub body: StepBody,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepBody {
    Fields {
        fields: Vec<FieldView>,
    },
    Confirmation {
        intro: &'static str,
        lines: Vec<SummaryLineView>,
        closing: &'static str,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    #[serde(flatten)]
    pub spec: FieldSpec,
    pub value: FieldValue,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryLineView {
    pub label: &'static str,
    pub value: String,
}

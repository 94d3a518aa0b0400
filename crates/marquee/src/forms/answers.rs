use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::schema::{renderable, FormQuestion, QuestionKind};

/// Collected value for a single question, matching the wire shape
/// `string | string[] | boolean`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Flag(bool),
    Text(String),
    Selection(Vec<String>),
}

impl AnswerValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            AnswerValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            AnswerValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_selection(&self) -> Option<&[String]> {
        match self {
            AnswerValue::Selection(items) => Some(items),
            _ => None,
        }
    }
}

/// In-progress answer map for one form session, keyed by question id. Keys
/// with no matching schema entry are kept as-is, never implicitly deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSheet {
    answers: BTreeMap<String, AnswerValue>,
}

impl AnswerSheet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn get(&self, id: &str) -> Option<&AnswerValue> {
        self.answers.get(id)
    }

    /// Insert or overwrite. No shape checking happens here; the control
    /// widget owns the value shape and `validate` reports mismatches.
    pub fn set(&mut self, id: impl Into<String>, value: AnswerValue) {
        self.answers.insert(id.into(), value);
    }

    /// Multi-select toggle: remove the option if already selected, otherwise
    /// append it. The resulting order is insertion order, not the order the
    /// options were declared in.
    pub fn toggle_option(&mut self, id: &str, option: &str) {
        let entry = self
            .answers
            .entry(id.to_string())
            .or_insert_with(|| AnswerValue::Selection(Vec::new()));
        if !matches!(entry, AnswerValue::Selection(_)) {
            *entry = AnswerValue::Selection(Vec::new());
        }
        if let AnswerValue::Selection(items) = entry {
            if let Some(position) = items.iter().position(|item| item == option) {
                items.remove(position);
            } else {
                items.push(option.to_string());
            }
        }
    }

    /// Boolean toggle for an option-less checkbox; an absent answer counts
    /// as unchecked.
    pub fn toggle_flag(&mut self, id: &str) {
        let current = self
            .answers
            .get(id)
            .and_then(AnswerValue::as_flag)
            .unwrap_or(false);
        self.answers.insert(id.to_string(), AnswerValue::Flag(!current));
    }

    /// Submission gate. `required` is enforced uniformly across every kind,
    /// `tel` and `checkbox` included, and stored values whose shape disagrees
    /// with the owning question's kind are reported. The sheet itself is
    /// never mutated, so a failed attempt can be retried without re-entry.
    pub fn validate(&self, schema: &[FormQuestion]) -> Result<(), Vec<AnswerIssue>> {
        let mut issues = Vec::new();

        for question in renderable(schema) {
            let answer = self.answers.get(&question.id);

            if let Some(value) = answer {
                let expected = expected_shape(question);
                if !shape_matches(question, value) {
                    issues.push(AnswerIssue::WrongShape {
                        id: question.id.clone(),
                        label: question.label.clone(),
                        expected,
                    });
                    continue;
                }
            }

            if question.required && !is_answered(question, answer) {
                issues.push(AnswerIssue::MissingRequired {
                    id: question.id.clone(),
                    label: question.label.clone(),
                });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

const fn expected_shape(question: &FormQuestion) -> &'static str {
    match question.kind {
        QuestionKind::Text
        | QuestionKind::Textarea
        | QuestionKind::Email
        | QuestionKind::Tel
        | QuestionKind::Select => "text",
        QuestionKind::Checkbox => {
            if question.options.is_empty() {
                "flag"
            } else {
                "selection"
            }
        }
    }
}

fn shape_matches(question: &FormQuestion, value: &AnswerValue) -> bool {
    match question.kind {
        QuestionKind::Text
        | QuestionKind::Textarea
        | QuestionKind::Email
        | QuestionKind::Tel
        | QuestionKind::Select => matches!(value, AnswerValue::Text(_)),
        QuestionKind::Checkbox if question.options.is_empty() => {
            matches!(value, AnswerValue::Flag(_))
        }
        QuestionKind::Checkbox => matches!(value, AnswerValue::Selection(_)),
    }
}

fn is_answered(question: &FormQuestion, answer: Option<&AnswerValue>) -> bool {
    match question.kind {
        QuestionKind::Text
        | QuestionKind::Textarea
        | QuestionKind::Email
        | QuestionKind::Tel
        | QuestionKind::Select => {
            matches!(answer, Some(AnswerValue::Text(text)) if !text.trim().is_empty())
        }
        QuestionKind::Checkbox if question.options.is_empty() => {
            matches!(answer, Some(AnswerValue::Flag(true)))
        }
        QuestionKind::Checkbox => {
            matches!(answer, Some(AnswerValue::Selection(items)) if !items.is_empty())
        }
    }
}

/// One reason a sheet failed validation, rendered as a human-readable string
/// at the submission boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerIssue {
    MissingRequired {
        id: String,
        label: String,
    },
    WrongShape {
        id: String,
        label: String,
        expected: &'static str,
    },
}

impl fmt::Display for AnswerIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerIssue::MissingRequired { label, .. } => {
                write!(f, "'{label}' is required")
            }
            AnswerIssue::WrongShape {
                label, expected, ..
            } => {
                write!(f, "'{label}' expects a {expected} answer")
            }
        }
    }
}

/// Join issues into the single reason string surfaced to the caller.
pub(crate) fn issues_summary(issues: &[AnswerIssue]) -> String {
    issues
        .iter()
        .map(AnswerIssue::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Closed set of control kinds a schema can ask for. Rendering and validation
/// match exhaustively, so adding a kind is a single compile-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    Text,
    Textarea,
    Email,
    Tel,
    Select,
    Checkbox,
}

impl QuestionKind {
    pub const fn label(self) -> &'static str {
        match self {
            QuestionKind::Text => "text",
            QuestionKind::Textarea => "textarea",
            QuestionKind::Email => "email",
            QuestionKind::Tel => "tel",
            QuestionKind::Select => "select",
            QuestionKind::Checkbox => "checkbox",
        }
    }

    /// Kinds whose `options` sequence is meaningful.
    pub const fn is_choice(self) -> bool {
        matches!(self, QuestionKind::Select | QuestionKind::Checkbox)
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "text" => Some(QuestionKind::Text),
            "textarea" => Some(QuestionKind::Textarea),
            "email" => Some(QuestionKind::Email),
            "tel" => Some(QuestionKind::Tel),
            "select" => Some(QuestionKind::Select),
            "checkbox" => Some(QuestionKind::Checkbox),
            _ => None,
        }
    }
}

/// One fully-populated question of an event's form schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormQuestion {
    pub id: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Question record as authored or fetched, before normalization. Every field
/// may be missing or the wrong shape; unknown `type` strings are tolerated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawQuestion {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub options: Option<Value>,
}

static QUESTION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

pub(crate) fn next_question_id() -> String {
    let id = QUESTION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("q-{id:04}")
}

/// Turn raw records into a clean ordered schema. Entries with a blank label
/// are dropped; everything else degrades to defaults. Never errors.
pub fn normalize_questions(raw: Vec<RawQuestion>) -> Vec<FormQuestion> {
    raw.into_iter().filter_map(normalize_question).collect()
}

fn normalize_question(raw: RawQuestion) -> Option<FormQuestion> {
    let label = raw.label.as_deref().unwrap_or("").trim().to_string();
    if label.is_empty() {
        return None;
    }

    let kind = raw
        .kind
        .as_deref()
        .and_then(QuestionKind::parse)
        .unwrap_or(QuestionKind::Text);

    let id = raw
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(next_question_id);

    let options = if kind.is_choice() {
        coerce_options(raw.options)
    } else {
        Vec::new()
    };

    Some(FormQuestion {
        id,
        label,
        kind,
        required: raw.required.unwrap_or(false),
        options,
    })
}

fn coerce_options(value: Option<Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::String(text) => text,
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// The subset of an already-typed schema that actually renders: blank-label
/// questions are invisible to applicants and excluded from validation.
pub fn renderable(questions: &[FormQuestion]) -> Vec<&FormQuestion> {
    questions
        .iter()
        .filter(|question| !question.label.trim().is_empty())
        .collect()
}

/// Authoring defects surfaced by the schema lint. None of these block
/// rendering; a select without options simply has nothing to pick. A checkbox
/// without options is not a defect, it renders as a boolean toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaDefect {
    SelectWithoutOptions { id: String },
    DuplicateId { id: String },
}

impl fmt::Display for SchemaDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemaDefect::SelectWithoutOptions { id } => {
                write!(f, "select question '{id}' has no options")
            }
            SchemaDefect::DuplicateId { id } => {
                write!(f, "duplicate question id '{id}'")
            }
        }
    }
}

/// Inspect a schema for authoring defects worth surfacing in tooling.
pub fn lint_schema(questions: &[FormQuestion]) -> Vec<SchemaDefect> {
    let mut defects = Vec::new();
    let mut seen = std::collections::BTreeSet::new();

    for question in questions {
        if !seen.insert(question.id.as_str()) {
            defects.push(SchemaDefect::DuplicateId {
                id: question.id.clone(),
            });
        }
        if question.kind == QuestionKind::Select && question.options.is_empty() {
            defects.push(SchemaDefect::SelectWithoutOptions {
                id: question.id.clone(),
            });
        }
    }

    defects
}

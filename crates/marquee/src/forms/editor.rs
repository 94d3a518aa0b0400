use serde::Deserialize;

use super::schema::{next_question_id, FormQuestion, QuestionKind};

/// Partial update merged into an existing question by id. Absent fields are
/// left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionPatch {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<QuestionKind>,
    #[serde(default)]
    pub required: Option<bool>,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("no question with id {id}")]
    UnknownQuestion { id: String },
    #[error("option index {index} out of range for question {id}")]
    OptionOutOfRange { id: String, index: usize },
}

/// In-memory editing session over one event's question list. Nothing is
/// persisted here; the caller saves the finished schema with the event as a
/// whole, last write wins.
#[derive(Debug, Clone, Default)]
pub struct SchemaEditor {
    questions: Vec<FormQuestion>,
}

impl SchemaEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(questions: Vec<FormQuestion>) -> Self {
        Self { questions }
    }

    pub fn questions(&self) -> &[FormQuestion] {
        &self.questions
    }

    /// Append a fresh blank question (kind text, not required) and return
    /// its generated id.
    pub fn add(&mut self) -> String {
        let id = next_question_id();
        self.questions.push(FormQuestion {
            id: id.clone(),
            label: String::new(),
            kind: QuestionKind::Text,
            required: false,
            options: Vec::new(),
        });
        id
    }

    /// Merge a partial update into the question with the given id. Changing
    /// kind away from a choice kind keeps any stale options; they are unused
    /// until the kind changes back and are cleared on `finish`.
    pub fn apply(&mut self, id: &str, patch: QuestionPatch) -> Result<(), EditorError> {
        let question = self.find_mut(id)?;
        if let Some(label) = patch.label {
            question.label = label;
        }
        if let Some(kind) = patch.kind {
            question.kind = kind;
        }
        if let Some(required) = patch.required {
            question.required = required;
        }
        if let Some(options) = patch.options {
            question.options = options;
        }
        Ok(())
    }

    /// Delete by id, immediately and without confirmation.
    pub fn remove(&mut self, id: &str) -> Result<(), EditorError> {
        let position = self
            .questions
            .iter()
            .position(|question| question.id == id)
            .ok_or_else(|| EditorError::UnknownQuestion { id: id.to_string() })?;
        self.questions.remove(position);
        Ok(())
    }

    pub fn push_option(&mut self, id: &str, option: impl Into<String>) -> Result<(), EditorError> {
        let question = self.find_mut(id)?;
        question.options.push(option.into());
        Ok(())
    }

    /// Edits are keyed positionally; removing option N shifts later indices
    /// down by one.
    pub fn set_option(
        &mut self,
        id: &str,
        index: usize,
        option: impl Into<String>,
    ) -> Result<(), EditorError> {
        let question = self.find_mut(id)?;
        let slot = question.options.get_mut(index).ok_or(EditorError::OptionOutOfRange {
            id: id.to_string(),
            index,
        })?;
        *slot = option.into();
        Ok(())
    }

    pub fn remove_option(&mut self, id: &str, index: usize) -> Result<(), EditorError> {
        let question = self.find_mut(id)?;
        if index >= question.options.len() {
            return Err(EditorError::OptionOutOfRange {
                id: id.to_string(),
                index,
            });
        }
        question.options.remove(index);
        Ok(())
    }

    /// Produce the persistable schema, applying save-time cleanup: blank
    /// labels dropped, labels trimmed, choice options trimmed with empties
    /// removed, stale options on non-choice kinds cleared.
    pub fn finish(self) -> Vec<FormQuestion> {
        self.questions
            .into_iter()
            .filter_map(|mut question| {
                let label = question.label.trim();
                if label.is_empty() {
                    return None;
                }
                question.label = label.to_string();
                question.options = if question.kind.is_choice() {
                    question
                        .options
                        .into_iter()
                        .map(|option| option.trim().to_string())
                        .filter(|option| !option.is_empty())
                        .collect()
                } else {
                    Vec::new()
                };
                Some(question)
            })
            .collect()
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut FormQuestion, EditorError> {
        self.questions
            .iter_mut()
            .find(|question| question.id == id)
            .ok_or_else(|| EditorError::UnknownQuestion { id: id.to_string() })
    }
}

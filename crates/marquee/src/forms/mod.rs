//! Dynamic application-form engine.
//!
//! An event carries an ordered schema of typed questions. This module owns the
//! three sides of that contract: lenient normalization of authored schemas,
//! the per-session answer sheet with its validation gate, and the admin-side
//! schema editor.

pub mod answers;
pub mod editor;
pub mod schema;

#[cfg(test)]
mod tests;

pub use answers::{AnswerIssue, AnswerSheet, AnswerValue};
pub use editor::{EditorError, QuestionPatch, SchemaEditor};
pub use schema::{
    lint_schema, normalize_questions, renderable, FormQuestion, QuestionKind, RawQuestion,
    SchemaDefect,
};

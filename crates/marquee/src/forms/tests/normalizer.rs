use serde_json::json;

use super::common::*;
use crate::forms::schema::{
    lint_schema, normalize_questions, renderable, QuestionKind, SchemaDefect,
};

#[test]
fn blank_label_entries_are_dropped() {
    let raw = vec![
        raw(Some("Stage name"), Some("text")),
        raw(Some("   "), Some("text")),
        raw(None, Some("textarea")),
        raw(Some("Preferred slot"), Some("select")),
    ];

    let schema = normalize_questions(raw);

    assert_eq!(schema.len(), 2);
    assert_eq!(schema[0].label, "Stage name");
    assert_eq!(schema[1].label, "Preferred slot");
}

#[test]
fn order_is_preserved_from_input() {
    let raw = vec![
        raw(Some("First"), None),
        raw(Some("Second"), None),
        raw(Some("Third"), None),
    ];

    let labels: Vec<String> = normalize_questions(raw)
        .into_iter()
        .map(|question| question.label)
        .collect();

    assert_eq!(labels, vec!["First", "Second", "Third"]);
}

#[test]
fn defaults_fill_missing_fields() {
    let schema = normalize_questions(vec![raw(Some("  Anything else?  "), None)]);

    let question = &schema[0];
    assert!(!question.id.is_empty());
    assert_eq!(question.label, "Anything else?");
    assert_eq!(question.kind, QuestionKind::Text);
    assert!(!question.required);
    assert!(question.options.is_empty());
}

#[test]
fn unknown_kind_degrades_to_text() {
    let schema = normalize_questions(vec![raw(Some("Mystery"), Some("signature-pad"))]);
    assert_eq!(schema[0].kind, QuestionKind::Text);
}

#[test]
fn generated_ids_are_unique() {
    let schema = normalize_questions(vec![
        raw(Some("One"), None),
        raw(Some("Two"), None),
        raw(Some("Three"), None),
    ]);

    let mut ids: Vec<&str> = schema.iter().map(|question| question.id.as_str()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn non_array_options_coerce_to_empty() {
    let raw = raw_from_json(json!({
        "label": "Preferred slot",
        "type": "select",
        "options": "Opening,Peak",
    }));

    let schema = normalize_questions(vec![raw]);
    assert!(schema[0].options.is_empty());
}

#[test]
fn scalar_option_members_are_stringified() {
    let raw = raw_from_json(json!({
        "label": "Table size",
        "type": "select",
        "options": ["2", 4, true],
    }));

    let schema = normalize_questions(vec![raw]);
    assert_eq!(schema[0].options, vec!["2", "4", "true"]);
}

#[test]
fn options_are_cleared_for_non_choice_kinds() {
    let raw = raw_from_json(json!({
        "label": "Phone",
        "type": "tel",
        "options": ["stale", "values"],
    }));

    let schema = normalize_questions(vec![raw]);
    assert!(schema[0].options.is_empty());
}

#[test]
fn lint_flags_select_without_options_but_keeps_it() {
    let schema = normalize_questions(vec![raw(Some("Pick one"), Some("select"))]);

    assert_eq!(schema.len(), 1, "unusable question is surfaced, not removed");
    let defects = lint_schema(&schema);
    assert_eq!(
        defects,
        vec![SchemaDefect::SelectWithoutOptions {
            id: schema[0].id.clone()
        }]
    );
}

#[test]
fn lint_accepts_optionless_checkbox_as_boolean_toggle() {
    let schema = normalize_questions(vec![raw(Some("I agree"), Some("checkbox"))]);
    assert!(lint_schema(&schema).is_empty());
}

#[test]
fn lint_flags_duplicate_ids() {
    let mut schema = sample_schema();
    schema.push(question("q-name", "Second name question", QuestionKind::Text));

    let defects = lint_schema(&schema);
    assert!(defects.contains(&SchemaDefect::DuplicateId {
        id: "q-name".to_string()
    }));
}

#[test]
fn lint_defects_render_as_human_readable_text() {
    let mut schema = normalize_questions(vec![raw(Some("Pick one"), Some("select"))]);
    let select_id = schema[0].id.clone();
    schema.push(question(&select_id, "Second copy", QuestionKind::Text));

    let rendered: Vec<String> = lint_schema(&schema)
        .iter()
        .map(ToString::to_string)
        .collect();

    assert_eq!(
        rendered,
        vec![
            format!("select question '{select_id}' has no options"),
            format!("duplicate question id '{select_id}'"),
        ]
    );
}

#[test]
fn renderable_hides_blank_labels_from_typed_schemas() {
    let mut schema = sample_schema();
    schema.push(question("q-ghost", "   ", QuestionKind::Text));

    let visible = renderable(&schema);
    assert_eq!(visible.len(), sample_schema().len());
}

use super::common::*;
use crate::forms::editor::{EditorError, QuestionPatch, SchemaEditor};
use crate::forms::schema::QuestionKind;

#[test]
fn add_appends_a_blank_text_question() {
    let mut editor = SchemaEditor::new();

    let id = editor.add();

    let added = &editor.questions()[0];
    assert_eq!(added.id, id);
    assert!(added.label.is_empty());
    assert_eq!(added.kind, QuestionKind::Text);
    assert!(!added.required);
}

#[test]
fn apply_merges_only_supplied_fields() {
    let mut editor = SchemaEditor::open(sample_schema());

    editor
        .apply(
            "q-name",
            QuestionPatch {
                required: Some(false),
                ..QuestionPatch::default()
            },
        )
        .expect("patch applies");

    let patched = &editor.questions()[0];
    assert!(!patched.required);
    assert_eq!(patched.label, "Stage name", "unsupplied fields untouched");
    assert_eq!(patched.kind, QuestionKind::Text);
}

#[test]
fn apply_to_unknown_id_fails() {
    let mut editor = SchemaEditor::open(sample_schema());

    let result = editor.apply("q-nope", QuestionPatch::default());
    assert!(matches!(result, Err(EditorError::UnknownQuestion { .. })));
}

#[test]
fn changing_kind_away_from_choice_retains_stale_options() {
    let mut editor = SchemaEditor::open(sample_schema());

    editor
        .apply(
            "q-slot",
            QuestionPatch {
                kind: Some(QuestionKind::Text),
                ..QuestionPatch::default()
            },
        )
        .expect("patch applies");

    let slot = editor
        .questions()
        .iter()
        .find(|question| question.id == "q-slot")
        .unwrap();
    assert_eq!(slot.kind, QuestionKind::Text);
    assert_eq!(slot.options.len(), 3, "stale options kept while editing");
}

#[test]
fn remove_deletes_by_id_immediately() {
    let mut editor = SchemaEditor::open(sample_schema());
    let before = editor.questions().len();

    editor.remove("q-bio").expect("removes");

    assert_eq!(editor.questions().len(), before - 1);
    assert!(editor.questions().iter().all(|question| question.id != "q-bio"));
}

#[test]
fn option_edits_are_positional() {
    let mut editor = SchemaEditor::open(sample_schema());

    editor.push_option("q-slot", "Afterhours").expect("appends");
    editor.set_option("q-slot", 0, "Warmup").expect("edits in place");
    editor.remove_option("q-slot", 1).expect("removes by index");

    let slot = editor
        .questions()
        .iter()
        .find(|question| question.id == "q-slot")
        .unwrap();
    assert_eq!(slot.options, vec!["Warmup", "Closing", "Afterhours"]);
}

#[test]
fn removing_an_option_shifts_later_indices() {
    let mut editor = SchemaEditor::open(sample_schema());

    editor.remove_option("q-slot", 0).expect("removes first");
    editor.set_option("q-slot", 0, "Peak (late)").expect("index 0 now former second");

    let slot = editor
        .questions()
        .iter()
        .find(|question| question.id == "q-slot")
        .unwrap();
    assert_eq!(slot.options, vec!["Peak (late)", "Closing"]);
}

#[test]
fn out_of_range_option_index_fails() {
    let mut editor = SchemaEditor::open(sample_schema());

    assert!(matches!(
        editor.set_option("q-slot", 9, "nope"),
        Err(EditorError::OptionOutOfRange { index: 9, .. })
    ));
    assert!(matches!(
        editor.remove_option("q-slot", 9),
        Err(EditorError::OptionOutOfRange { index: 9, .. })
    ));
}

#[test]
fn finish_drops_blank_labels_and_trims() {
    let mut editor = SchemaEditor::open(sample_schema());
    editor.add();
    editor
        .apply(
            "q-name",
            QuestionPatch {
                label: Some("  Stage name  ".to_string()),
                ..QuestionPatch::default()
            },
        )
        .expect("patch applies");

    let saved = editor.finish();

    assert_eq!(saved.len(), sample_schema().len(), "blank addition dropped");
    assert_eq!(saved[0].label, "Stage name");
}

#[test]
fn finish_trims_choice_options_and_drops_empties() {
    let mut editor = SchemaEditor::open(sample_schema());
    editor.push_option("q-slot", "   ").expect("appends");
    editor.push_option("q-slot", "  Afterhours ").expect("appends");

    let saved = editor.finish();

    let slot = saved.iter().find(|question| question.id == "q-slot").unwrap();
    assert_eq!(slot.options, vec!["Opening", "Peak", "Closing", "Afterhours"]);
}

#[test]
fn finish_clears_stale_options_on_non_choice_kinds() {
    let mut editor = SchemaEditor::open(sample_schema());
    editor
        .apply(
            "q-slot",
            QuestionPatch {
                kind: Some(QuestionKind::Text),
                ..QuestionPatch::default()
            },
        )
        .expect("patch applies");

    let saved = editor.finish();

    let slot = saved.iter().find(|question| question.id == "q-slot").unwrap();
    assert!(slot.options.is_empty());
}

use crate::forms::schema::{FormQuestion, QuestionKind, RawQuestion};

pub(super) fn question(id: &str, label: &str, kind: QuestionKind) -> FormQuestion {
    FormQuestion {
        id: id.to_string(),
        label: label.to_string(),
        kind,
        required: false,
        options: Vec::new(),
    }
}

pub(super) fn required(mut question: FormQuestion) -> FormQuestion {
    question.required = true;
    question
}

pub(super) fn with_options(mut question: FormQuestion, options: &[&str]) -> FormQuestion {
    question.options = options.iter().map(|option| option.to_string()).collect();
    question
}

pub(super) fn raw(label: Option<&str>, kind: Option<&str>) -> RawQuestion {
    RawQuestion {
        id: None,
        label: label.map(str::to_string),
        kind: kind.map(str::to_string),
        required: None,
        options: None,
    }
}

pub(super) fn raw_from_json(value: serde_json::Value) -> RawQuestion {
    serde_json::from_value(value).expect("raw question deserializes")
}

pub(super) fn sample_schema() -> Vec<FormQuestion> {
    vec![
        required(question("q-name", "Stage name", QuestionKind::Text)),
        question("q-bio", "Tell us about your set", QuestionKind::Textarea),
        with_options(
            question("q-slot", "Preferred slot", QuestionKind::Select),
            &["Opening", "Peak", "Closing"],
        ),
        with_options(
            question("q-gear", "Gear you bring", QuestionKind::Checkbox),
            &["CDJs", "Turntables", "Live rig"],
        ),
        question("q-terms", "I accept the house rules", QuestionKind::Checkbox),
    ]
}

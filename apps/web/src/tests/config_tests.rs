use super::*;

#[test]
fn missing_or_blank_config_uses_stock_page_ids() {
    let bindings = PageBindings::from_json(None).expect("defaults");
    assert_eq!(bindings, PageBindings::default());
    assert_eq!(bindings.upload_button, "upload-btn");
    assert_eq!(bindings.drop_title_selector, ".drop-title");
    assert_eq!(bindings.endpoint, "/analyze");

    let blank = PageBindings::from_json(Some("   ")).expect("blank");
    assert_eq!(blank, PageBindings::default());
}

#[test]
fn partial_config_overrides_only_named_fields() {
    let bindings =
        PageBindings::from_json(Some(r#"{"endpoint":"/api/analyze","rendering":"text"}"#))
            .expect("parse");
    assert_eq!(bindings.endpoint, "/api/analyze");
    assert_eq!(bindings.rendering, ResultRendering::Text);
    assert_eq!(bindings.file_input, "pdf_files");
}

#[test]
fn unknown_fields_are_rejected() {
    let err = PageBindings::from_json(Some(r#"{"upload_btn":"go"}"#)).expect_err("typo");
    assert!(matches!(err, BindingsError::Parse(_)));
}

#[test]
fn empty_ids_are_rejected() {
    let err = PageBindings::from_json(Some(r#"{"loader":" "}"#)).expect_err("empty");
    assert!(matches!(err, BindingsError::Empty("loader")));
}

#[test]
fn radio_and_description_ids_follow_analysis_type() {
    let bindings = PageBindings::default();
    assert_eq!(bindings.radio_id(AnalysisType::TestPapers), "test_papers");
    assert_eq!(
        bindings.description_id(AnalysisType::QuestionPapers),
        "question_papers_desc"
    );
}

use client_core::ResultRendering;
use serde::Deserialize;
use shared::{domain::AnalysisType, protocol::ANALYZE_PATH};
use thiserror::Error;

/// Element IDs and settings the upload page is bound with. Every field has a
/// default matching the stock page, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageBindings {
    pub upload_button: String,
    pub file_input: String,
    pub result_container: String,
    pub loader: String,
    pub question_papers_radio: String,
    pub test_papers_radio: String,
    pub question_papers_description: String,
    pub test_papers_description: String,
    pub drop_zone: String,
    pub drop_title_selector: String,
    pub radio_group: String,
    pub endpoint: String,
    pub rendering: ResultRendering,
    pub log_filter: String,
}

impl Default for PageBindings {
    fn default() -> Self {
        Self {
            upload_button: "upload-btn".into(),
            file_input: "pdf_files".into(),
            result_container: "result-text".into(),
            loader: "loader".into(),
            question_papers_radio: "question_papers".into(),
            test_papers_radio: "test_papers".into(),
            question_papers_description: "question_papers_desc".into(),
            test_papers_description: "test_papers_desc".into(),
            drop_zone: "dropcontainer".into(),
            drop_title_selector: ".drop-title".into(),
            radio_group: "analysis_type".into(),
            endpoint: ANALYZE_PATH.into(),
            rendering: ResultRendering::Markup,
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum BindingsError {
    #[error("invalid page configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("page configuration field `{0}` must not be empty")]
    Empty(&'static str),
}

impl PageBindings {
    /// Parses the optional JSON handed to `initialize`. Blank input means
    /// defaults.
    pub fn from_json(raw: Option<&str>) -> Result<Self, BindingsError> {
        let bindings = match raw.map(str::trim) {
            None | Some("") => Self::default(),
            Some(raw) => serde_json::from_str(raw)?,
        };
        bindings.validate()?;
        Ok(bindings)
    }

    fn validate(&self) -> Result<(), BindingsError> {
        let fields = [
            ("upload_button", &self.upload_button),
            ("file_input", &self.file_input),
            ("result_container", &self.result_container),
            ("loader", &self.loader),
            ("question_papers_radio", &self.question_papers_radio),
            ("test_papers_radio", &self.test_papers_radio),
            ("question_papers_description", &self.question_papers_description),
            ("test_papers_description", &self.test_papers_description),
            ("drop_zone", &self.drop_zone),
            ("drop_title_selector", &self.drop_title_selector),
            ("radio_group", &self.radio_group),
            ("endpoint", &self.endpoint),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(BindingsError::Empty(name));
            }
        }
        Ok(())
    }

    pub fn radio_id(&self, kind: AnalysisType) -> &str {
        match kind {
            AnalysisType::QuestionPapers => &self.question_papers_radio,
            AnalysisType::TestPapers => &self.test_papers_radio,
        }
    }

    pub fn description_id(&self, kind: AnalysisType) -> &str {
        match kind {
            AnalysisType::QuestionPapers => &self.question_papers_description,
            AnalysisType::TestPapers => &self.test_papers_description,
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;

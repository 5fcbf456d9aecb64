use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Mode selector sent to the server alongside the uploaded files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    #[default]
    QuestionPapers,
    TestPapers,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 2] = [AnalysisType::QuestionPapers, AnalysisType::TestPapers];

    pub fn as_str(self) -> &'static str {
        match self {
            AnalysisType::QuestionPapers => "question_papers",
            AnalysisType::TestPapers => "test_papers",
        }
    }

    /// The partner radio in the two-way selector.
    pub fn other(self) -> Self {
        match self {
            AnalysisType::QuestionPapers => AnalysisType::TestPapers,
            AnalysisType::TestPapers => AnalysisType::QuestionPapers,
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown analysis type '{0}'")]
pub struct UnknownAnalysisType(pub String);

impl FromStr for AnalysisType {
    type Err = UnknownAnalysisType;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "question_papers" => Ok(AnalysisType::QuestionPapers),
            "test_papers" => Ok(AnalysisType::TestPapers),
            other => Err(UnknownAnalysisType(other.to_string())),
        }
    }
}

/// Files currently assigned to the file input. Replaced wholesale on every
/// picker or drop action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelection<F> {
    files: Vec<F>,
}

impl<F> FileSelection<F> {
    pub fn new(files: Vec<F>) -> Self {
        Self { files }
    }

    pub fn empty() -> Self {
        Self { files: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[F] {
        &self.files
    }

    pub fn into_files(self) -> Vec<F> {
        self.files
    }
}

impl<F> Default for FileSelection<F> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<F> FromIterator<F> for FileSelection<F> {
    fn from_iter<I: IntoIterator<Item = F>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Server-returned HTML fragment. Never validated client-side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(pub String);

impl AnalysisResult {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Colors applied to the drop zone while dragging over it and at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropZoneStyle {
    pub background_color: &'static str,
    pub border_color: &'static str,
}

pub const DROP_ZONE_HIGHLIGHT: DropZoneStyle = DropZoneStyle {
    background_color: "rgba(52, 152, 219, 0.1)",
    border_color: "rgba(52, 152, 219, 0.5)",
};

pub const DROP_ZONE_IDLE: DropZoneStyle = DropZoneStyle {
    background_color: "#f0f8ff",
    border_color: "#3498db",
};

pub const DROP_PLACEHOLDER: &str = "Drop PDF files here";
pub const NO_FILES_ALERT: &str = "Please select at least one PDF file to analyze.";
pub const ANALYSIS_FAILED_TEXT: &str = "An error occurred during analysis. Please try again.";
pub const ANALYSIS_FAILED_MARKUP: &str =
    "<p>An error occurred during analysis. Please try again.</p>";

/// Counter text for the drop zone title.
pub fn file_counter_text(file_count: usize) -> String {
    match file_count {
        0 => DROP_PLACEHOLDER.to_string(),
        1 => "1 file selected".to_string(),
        n => format!("{n} files selected"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_text_pluralizes() {
        assert_eq!(file_counter_text(0), "Drop PDF files here");
        assert_eq!(file_counter_text(1), "1 file selected");
        assert_eq!(file_counter_text(3), "3 files selected");
    }

    #[test]
    fn analysis_type_parses_wire_names() {
        for kind in AnalysisType::ALL {
            assert_eq!(kind.as_str().parse::<AnalysisType>(), Ok(kind));
        }
        assert_eq!(
            "essays".parse::<AnalysisType>(),
            Err(UnknownAnalysisType("essays".into()))
        );
    }

    #[test]
    fn analysis_type_serializes_snake_case() {
        let json = serde_json::to_string(&AnalysisType::TestPapers).expect("serialize");
        assert_eq!(json, "\"test_papers\"");
        assert_eq!(AnalysisType::default(), AnalysisType::QuestionPapers);
        assert_eq!(AnalysisType::TestPapers.other(), AnalysisType::QuestionPapers);
    }
}

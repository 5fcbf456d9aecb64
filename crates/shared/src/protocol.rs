use serde::{Deserialize, Serialize};

use crate::domain::{AnalysisResult, AnalysisType};

pub const ANALYZE_PATH: &str = "/analyze";
pub const PDF_FILES_FIELD: &str = "pdf_files[]";
pub const ANALYSIS_TYPE_FIELD: &str = "analysis_type";
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Body of a successful `POST /analyze`. Extra fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub result: AnalysisResult,
}

/// Non-file part of the multipart upload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyzeForm {
    pub analysis_type: AnalysisType,
}

/// Joins a server base URL and the endpoint path without doubling slashes.
/// An empty base yields the bare path, which the browser resolves against the
/// page origin.
pub fn endpoint_url(base: &str, path: &str) -> String {
    let base = base.trim().trim_end_matches('/');
    let path = path.trim();
    if base.is_empty() {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_result_and_ignores_extra_fields() {
        let response: AnalyzeResponse =
            serde_json::from_str(r#"{"result":"<p>ok</p>","model":"x"}"#).expect("decode");
        assert_eq!(response.result.as_str(), "<p>ok</p>");
    }

    #[test]
    fn missing_result_is_a_decode_error() {
        assert!(serde_json::from_str::<AnalyzeResponse>(r#"{"status":"ok"}"#).is_err());
    }

    #[test]
    fn endpoint_url_joins_cleanly() {
        assert_eq!(endpoint_url("", ANALYZE_PATH), "/analyze");
        assert_eq!(
            endpoint_url("http://127.0.0.1:5000/", ANALYZE_PATH),
            "http://127.0.0.1:5000/analyze"
        );
        assert_eq!(
            endpoint_url("http://host/api", "analyze"),
            "http://host/api/analyze"
        );
    }
}

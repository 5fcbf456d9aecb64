use thiserror::Error;

/// Every way a submitted analysis can fail. The page collapses all of them
/// into one fixed message; the variants only feed the log.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("analyze request failed: {0}")]
    Network(String),
    #[error("analyze endpoint returned status {status}{}", detail_suffix(.detail))]
    Status { status: u16, detail: Option<String> },
    #[error("analyze response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("analyze response has no string `result` field")]
    MissingResult,
    #[error("browser error: {0}")]
    Browser(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for AnalyzeError {
    fn from(value: reqwest::Error) -> Self {
        AnalyzeError::Network(value.to_string())
    }
}

use serde::{Deserialize, Serialize};

/// Error body a server may attach to a failed `/analyze` response.
///
/// The upload page never shows this to the user; it is decoded only so the
/// failure log carries whatever detail the server provided.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, alias = "message")]
    pub error: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
        }
    }

    /// Best-effort decode of a failure body. Plain-text bodies are kept as-is.
    pub fn from_body(body: &str) -> Option<Self> {
        let body = body.trim();
        if body.is_empty() {
            return None;
        }
        match serde_json::from_str::<ApiError>(body) {
            Ok(parsed) if parsed.error.is_some() => Some(parsed),
            Ok(_) => None,
            Err(_) => Some(Self::new(body)),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

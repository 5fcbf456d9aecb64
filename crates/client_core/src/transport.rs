//! The single outbound request of the upload page.

use async_trait::async_trait;
use shared::{
    domain::{AnalysisResult, AnalysisType, FileSelection},
    protocol::AnalyzeResponse,
};

use crate::error::AnalyzeError;

/// Everything one `POST /analyze` carries.
#[derive(Debug, Clone)]
pub struct AnalyzeRequest<F> {
    pub files: FileSelection<F>,
    pub analysis_type: AnalysisType,
}

/// Sends an [`AnalyzeRequest`] and returns the decoded response.
///
/// Futures are not required to be `Send`: browser implementations hold
/// `JsValue`s across await points.
#[async_trait(?Send)]
pub trait AnalyzeTransport {
    type File;

    async fn analyze(
        &self,
        request: AnalyzeRequest<Self::File>,
    ) -> Result<AnalyzeResponse, AnalyzeError>;
}

/// Decodes a 2xx response body. A body that parses but lacks a string
/// `result` is rejected rather than rendered.
pub fn decode_analyze_body(body: &[u8]) -> Result<AnalyzeResponse, AnalyzeError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    match value.get("result") {
        Some(serde_json::Value::String(result)) => Ok(AnalyzeResponse {
            result: AnalysisResult(result.clone()),
        }),
        _ => Err(AnalyzeError::MissingResult),
    }
}

/// File held in memory, as read from disk by native front ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    pub filename: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl LocalFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            mime_type: None,
            bytes: bytes.into(),
        }
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use http::HttpAnalyzeTransport;

#[cfg(not(target_arch = "wasm32"))]
mod http {
    use async_trait::async_trait;
    use reqwest::{
        multipart::{Form, Part},
        Client,
    };
    use shared::{
        error::ApiError,
        protocol::{
            endpoint_url, AnalyzeResponse, ANALYSIS_TYPE_FIELD, ANALYZE_PATH, PDF_FILES_FIELD,
            PDF_MIME_TYPE,
        },
    };
    use tracing::debug;

    use super::{decode_analyze_body, AnalyzeRequest, AnalyzeTransport, LocalFile};
    use crate::error::AnalyzeError;

    /// Multipart upload over reqwest.
    pub struct HttpAnalyzeTransport {
        http: Client,
        endpoint: String,
    }

    impl HttpAnalyzeTransport {
        pub fn new(server_url: &str) -> Self {
            Self::with_client(Client::new(), server_url, ANALYZE_PATH)
        }

        pub fn with_client(http: Client, server_url: &str, path: &str) -> Self {
            Self {
                http,
                endpoint: endpoint_url(server_url, path),
            }
        }

        pub fn endpoint(&self) -> &str {
            &self.endpoint
        }

        fn build_form(request: AnalyzeRequest<LocalFile>) -> Result<Form, AnalyzeError> {
            let mut form = Form::new();
            for file in request.files.into_files() {
                let mime_type = file.mime_type.as_deref().unwrap_or(PDF_MIME_TYPE);
                let part = Part::bytes(file.bytes)
                    .file_name(file.filename)
                    .mime_str(mime_type)?;
                form = form.part(PDF_FILES_FIELD, part);
            }
            Ok(form.text(ANALYSIS_TYPE_FIELD, request.analysis_type.as_str()))
        }
    }

    #[async_trait(?Send)]
    impl AnalyzeTransport for HttpAnalyzeTransport {
        type File = LocalFile;

        async fn analyze(
            &self,
            request: AnalyzeRequest<LocalFile>,
        ) -> Result<AnalyzeResponse, AnalyzeError> {
            let form = Self::build_form(request)?;
            let response = self
                .http
                .post(&self.endpoint)
                .multipart(form)
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AnalyzeError::Status {
                    status: status.as_u16(),
                    detail: ApiError::from_body(&body).and_then(|body| body.error),
                });
            }

            let body = response.bytes().await?;
            debug!(
                endpoint = %self.endpoint,
                body_bytes = body.len(),
                "analyze response received"
            );
            decode_analyze_body(&body)
        }
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;

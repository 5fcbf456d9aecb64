use async_trait::async_trait;
use client_core::{transport::decode_analyze_body, AnalyzeError, AnalyzeRequest, AnalyzeTransport};
use shared::{
    error::ApiError,
    protocol::{AnalyzeResponse, ANALYSIS_TYPE_FIELD, PDF_FILES_FIELD},
};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, FormData, RequestInit, Response};

use crate::dom::describe_js_error;

/// `fetch` + `FormData` upload, resolved against the page origin.
pub struct FetchTransport {
    endpoint: String,
}

impl FetchTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    fn build_form(request: &AnalyzeRequest<File>) -> Result<FormData, AnalyzeError> {
        let form = FormData::new().map_err(browser_error)?;
        for file in request.files.files() {
            form.append_with_blob_and_filename(PDF_FILES_FIELD, file, &file.name())
                .map_err(browser_error)?;
        }
        form.append_with_str(ANALYSIS_TYPE_FIELD, request.analysis_type.as_str())
            .map_err(browser_error)?;
        Ok(form)
    }
}

fn browser_error(value: JsValue) -> AnalyzeError {
    AnalyzeError::Browser(describe_js_error(&value))
}

#[async_trait(?Send)]
impl AnalyzeTransport for FetchTransport {
    type File = File;

    async fn analyze(
        &self,
        request: AnalyzeRequest<File>,
    ) -> Result<AnalyzeResponse, AnalyzeError> {
        let form = Self::build_form(&request)?;
        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);

        let window =
            web_sys::window().ok_or_else(|| AnalyzeError::Browser("missing window".into()))?;
        let response = JsFuture::from(window.fetch_with_str_and_init(&self.endpoint, &init))
            .await
            .map_err(|err| AnalyzeError::Network(describe_js_error(&err)))?;
        let response: Response = response.dyn_into().map_err(browser_error)?;

        let body = JsFuture::from(response.text().map_err(browser_error)?)
            .await
            .map_err(|err| AnalyzeError::Network(describe_js_error(&err)))?
            .as_string()
            .unwrap_or_default();

        if !response.ok() {
            return Err(AnalyzeError::Status {
                status: response.status(),
                detail: ApiError::from_body(&body).and_then(|body| body.error),
            });
        }

        debug!(endpoint = %self.endpoint, body_bytes = body.len(), "analyze response received");
        decode_analyze_body(body.as_bytes())
    }
}

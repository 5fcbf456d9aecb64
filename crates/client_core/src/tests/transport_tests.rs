use super::*;
use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use shared::protocol::{ANALYSIS_TYPE_FIELD, PDF_FILES_FIELD};
use tokio::{
    net::TcpListener,
    sync::{oneshot, Mutex},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct ReceivedPart {
    name: String,
    file_name: Option<String>,
    content_type: Option<String>,
    body: Vec<u8>,
}

#[derive(Clone, Copy)]
enum Reply {
    Result,
    ServerError,
    NotJson,
    NoResult,
}

#[derive(Clone)]
struct StubState {
    reply: Reply,
    tx: Arc<Mutex<Option<oneshot::Sender<Vec<ReceivedPart>>>>>,
}

async fn handle_analyze(
    State(state): State<StubState>,
    mut multipart: Multipart,
) -> axum::response::Response {
    let mut parts = Vec::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let body = field.bytes().await.map(|b| b.to_vec()).unwrap_or_default();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            body,
        });
    }
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(parts);
    }

    match state.reply {
        Reply::Result => Json(serde_json::json!({ "result": "<p>ok</p>" })).into_response(),
        Reply::ServerError => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "model unavailable" })),
        )
            .into_response(),
        Reply::NotJson => "<html>gateway timeout</html>".into_response(),
        Reply::NoResult => Json(serde_json::json!({ "status": "done" })).into_response(),
    }
}

async fn spawn_analyze_server(reply: Reply) -> (String, oneshot::Receiver<Vec<ReceivedPart>>) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let (tx, rx) = oneshot::channel();
    let state = StubState {
        reply,
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/analyze", post(handle_analyze))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), rx)
}

fn two_pdfs(analysis_type: AnalysisType) -> AnalyzeRequest<LocalFile> {
    AnalyzeRequest {
        files: FileSelection::new(vec![
            LocalFile::new("paper-2021.pdf", b"%PDF-1.4 first".to_vec()),
            LocalFile::new("paper-2022.pdf", b"%PDF-1.4 second".to_vec()),
        ]),
        analysis_type,
    }
}

#[tokio::test]
async fn posts_one_part_per_file_and_the_analysis_type() {
    let (server_url, parts_rx) = spawn_analyze_server(Reply::Result).await;
    let transport = HttpAnalyzeTransport::new(&server_url);

    let response = transport
        .analyze(two_pdfs(AnalysisType::TestPapers))
        .await
        .expect("analyze");
    assert_eq!(response.result.as_str(), "<p>ok</p>");

    let parts = parts_rx.await.expect("parts");
    let files: Vec<_> = parts.iter().filter(|p| p.name == PDF_FILES_FIELD).collect();
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].file_name.as_deref(), Some("paper-2021.pdf"));
    assert_eq!(files[0].content_type.as_deref(), Some("application/pdf"));
    assert_eq!(files[0].body, b"%PDF-1.4 first");
    assert_eq!(files[1].file_name.as_deref(), Some("paper-2022.pdf"));

    let types: Vec<_> = parts
        .iter()
        .filter(|p| p.name == ANALYSIS_TYPE_FIELD)
        .map(|p| String::from_utf8_lossy(&p.body).to_string())
        .collect();
    assert_eq!(types, vec!["test_papers".to_string()]);
}

#[tokio::test]
async fn keeps_explicit_mime_type() {
    let (server_url, parts_rx) = spawn_analyze_server(Reply::Result).await;
    let transport = HttpAnalyzeTransport::new(&format!("{server_url}/"));

    transport
        .analyze(AnalyzeRequest {
            files: FileSelection::new(vec![
                LocalFile::new("scan.bin", vec![1, 2, 3]).with_mime_type("application/octet-stream")
            ]),
            analysis_type: AnalysisType::QuestionPapers,
        })
        .await
        .expect("analyze");

    let parts = parts_rx.await.expect("parts");
    assert_eq!(
        parts[0].content_type.as_deref(),
        Some("application/octet-stream")
    );
}

#[tokio::test]
async fn non_success_status_carries_server_detail() {
    let (server_url, _parts_rx) = spawn_analyze_server(Reply::ServerError).await;
    let transport = HttpAnalyzeTransport::new(&server_url);

    let err = transport
        .analyze(two_pdfs(AnalysisType::QuestionPapers))
        .await
        .expect_err("must fail");
    match err {
        AnalyzeError::Status { status, detail } => {
            assert_eq!(status, 500);
            assert_eq!(detail.as_deref(), Some("model unavailable"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn non_json_body_is_a_decode_failure() {
    let (server_url, _parts_rx) = spawn_analyze_server(Reply::NotJson).await;
    let transport = HttpAnalyzeTransport::new(&server_url);

    let err = transport
        .analyze(two_pdfs(AnalysisType::QuestionPapers))
        .await
        .expect_err("must fail");
    assert!(matches!(err, AnalyzeError::Decode(_)), "unexpected error: {err}");
}

#[tokio::test]
async fn json_without_result_is_rejected() {
    let (server_url, _parts_rx) = spawn_analyze_server(Reply::NoResult).await;
    let transport = HttpAnalyzeTransport::new(&server_url);

    let err = transport
        .analyze(two_pdfs(AnalysisType::QuestionPapers))
        .await
        .expect_err("must fail");
    assert!(matches!(err, AnalyzeError::MissingResult), "unexpected error: {err}");
}

#[tokio::test]
async fn unreachable_server_is_a_network_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let transport = HttpAnalyzeTransport::new(&format!("http://{addr}"));
    let err = transport
        .analyze(two_pdfs(AnalysisType::QuestionPapers))
        .await
        .expect_err("must fail");
    assert!(matches!(err, AnalyzeError::Network(_)), "unexpected error: {err}");
}

#[test]
fn decode_requires_string_result() {
    assert!(matches!(
        decode_analyze_body(br#"{"result":null}"#),
        Err(AnalyzeError::MissingResult)
    ));
    assert!(matches!(
        decode_analyze_body(br#"{"result":42}"#),
        Err(AnalyzeError::MissingResult)
    ));
    let response = decode_analyze_body(br#"{"result":"<h2>Topics</h2>"}"#).expect("decode");
    assert_eq!(response.result.as_str(), "<h2>Topics</h2>");
}

#[test]
fn endpoint_joins_server_url_and_path() {
    let transport = HttpAnalyzeTransport::new("http://localhost:5000/");
    assert_eq!(transport.endpoint(), "http://localhost:5000/analyze");
}

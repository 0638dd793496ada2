use std::sync::{Arc, Mutex};

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use url::Url;

/// Campo recibido por el servicio falso: (nombre, nombre de fichero, contenido).
pub type ReceivedField = (String, Option<String>, Vec<u8>);

pub struct MockChecker {
    pub page_url: Url,
    pub received: Arc<Mutex<Vec<Vec<ReceivedField>>>>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Drop for MockChecker {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            tx.send(()).ok();
        }
    }
}

/// Levanta un `check_plagiarism` falso bajo `/app/` que responde siempre igual.
pub async fn start_mock_checker(status: u16, body: &'static str) -> MockChecker {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let received: Arc<Mutex<Vec<Vec<ReceivedField>>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&received);

    let app = Router::new().route(
        "/app/quizzes/plagarism-checker/check_plagiarism",
        post(move |mut multipart: Multipart| {
            let sink = Arc::clone(&sink);
            async move {
                let mut fields = Vec::new();
                while let Ok(Some(field)) = multipart.next_field().await {
                    let name = field.name().unwrap_or_default().to_string();
                    let file_name = field.file_name().map(str::to_string);
                    let data = field.bytes().await.unwrap_or_default().to_vec();
                    fields.push((name, file_name, data));
                }
                sink.lock().unwrap().push(fields);
                let status = StatusCode::from_u16(status).unwrap();
                (
                    status,
                    [(axum::http::header::CONTENT_TYPE, "application/json")],
                    body,
                )
                    .into_response()
            }
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let page_url = Url::parse(&format!("http://{}/app/index.html", addr)).unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    MockChecker {
        page_url,
        received,
        shutdown: Some(shutdown_tx),
    }
}

pub const REPORT_BODY: &str = r#"{
    "submission_id": "5d41402abc4b2a76b9719d911017c592",
    "timestamp": "2024-05-01T10:00:00",
    "overall_similarity": 42,
    "chunks": [{
        "chunk_id": 1,
        "chunk_text": "sample",
        "similarity": 80,
        "matches": [{ "url": "http://example.com", "similarity": 95, "matched_content": "sample" }]
    }]
}"#;

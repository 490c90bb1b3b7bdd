//! HTTP server for the Daylight viewer.
//!
//! # API Endpoints
//!
//! | Method | Path              | Description                          |
//! |--------|-------------------|--------------------------------------|
//! | GET    | `/health`         | Health check                         |
//! | POST   | `/api/upload`     | Upload a CSV, get the normalized table |
//! | GET    | `/api/logs`       | SSE stream of intake logs            |
//!
//! When a static directory is configured the built frontend is served
//! for every other path.

use axum::{
    extract::{multipart::MultipartError, DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::{cors::CorsLayer, services::ServeDir};

use super::logs::{log_error, LOG_BROADCASTER};
use super::types::{error_response, UploadResponse};
use crate::config::Config;
use crate::error::{ServerError, ServerResult};
use crate::intake::{intake_bytes, IntakeOptions};

/// Name of the multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Multipart framing allowance on top of the file size limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ServerError::Intake(_) => StatusCode::UNPROCESSABLE_ENTITY,
        };
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Build the router for a configuration.
pub fn router(config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    let body_limit = config.max_upload_bytes + MULTIPART_OVERHEAD;
    let static_dir = config.static_dir.clone();
    let state = AppState {
        config: Arc::new(config),
    };

    let app = Router::new()
        .route("/health", get(health))
        .route("/api/upload", post(upload_csv))
        .route("/api/logs", get(sse_logs));

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app.route("/", get(health)),
    };

    app.layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

    println!("🚀 Daylight server running on http://localhost:{}", config.port);
    println!("   POST /api/upload - Upload CSV file");
    println!("   GET  /api/logs   - SSE log stream");
    println!("   GET  /health     - Health check");
    if let Some(dir) = &config.static_dir {
        println!("   Serving frontend from {}", dir.display());
    }
    println!();

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(config)).await?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "daylight",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "upload": "POST /api/upload",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Map a multipart failure, keeping the body limit rejection as 413.
fn multipart_error(err: MultipartError, context: &str, limit: usize) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        log_error(format!("Upload rejected: body exceeds {} bytes", limit));
        return ServerError::PayloadTooLarge { limit };
    }
    ServerError::BadRequest(format!("{}: {}", context, err))
}

async fn upload_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ServerResult<Json<UploadResponse>> {
    let limit = state.config.max_upload_bytes;
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Multipart error", limit))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| multipart_error(e, "Read error", limit))?;
        upload = Some((file_name, bytes.to_vec()));
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| ServerError::BadRequest("No file provided".to_string()))?;

    process_upload(&file_name, &bytes, limit)
        .map(Json)
        .map_err(|e| {
            log_error(format!("Upload of '{}' failed: {}", file_name, e));
            e
        })
}

/// Size check and intake for one uploaded file.
pub fn process_upload(
    file_name: &str,
    bytes: &[u8],
    max_upload_bytes: usize,
) -> ServerResult<UploadResponse> {
    if bytes.len() > max_upload_bytes {
        return Err(ServerError::PayloadTooLarge { limit: max_upload_bytes });
    }

    let output = intake_bytes(file_name, bytes, &IntakeOptions::default())?;
    Ok(UploadResponse::from(output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const BOUNDARY: &str = "daylight-test-boundary";

    /// Multipart body with one `(field, file name, content)` part per entry.
    fn multipart_body(parts: &[(&str, &str, &str)]) -> Vec<u8> {
        let mut body = Vec::new();
        for (field, file_name, content) in parts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                    field, file_name
                )
                .as_bytes(),
            );
            body.extend_from_slice(b"Content-Type: text/csv\r\n\r\n");
            body.extend_from_slice(content.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }

    fn upload_request(parts: &[(&str, &str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_process_upload() {
        let response = process_upload("a.csv", b"A,B\n1,\n", 1024).unwrap();
        assert_eq!(response.headers, vec!["A"]);
        assert_eq!(response.rows, vec![vec![Some("1".to_string())]]);
    }

    #[test]
    fn test_process_upload_too_large() {
        let err = process_upload("a.csv", b"A,B\n1,2\n", 4).unwrap_err();
        assert!(matches!(err, ServerError::PayloadTooLarge { limit: 4 }));
    }

    #[test]
    fn test_process_upload_intake_error() {
        let err = process_upload("a.txt", b"A\n1\n", 1024).unwrap_err();
        assert_eq!(err.to_string(), "Please upload a valid .csv file.");
    }

    #[test]
    fn test_error_status_codes() {
        let cases = [
            (ServerError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (
                ServerError::PayloadTooLarge { limit: 1 },
                StatusCode::PAYLOAD_TOO_LARGE,
            ),
            (
                ServerError::Intake(crate::error::IntakeError::InvalidExtension),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn test_upload_returns_normalized_table() {
        let req = upload_request(&[("file", "visits.csv", "Name,Age\nAnn,—\n—,—\n")]);
        let (status, json) = send(router(Config::default()), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ready");
        assert_eq!(json["headers"], json!(["Name"]));
        assert_eq!(json["rows"], json!([["Ann"]]));
        assert_eq!(json["metadata"]["fileName"], "visits.csv");
        assert_eq!(json["metadata"]["droppedColumns"], json!(["Age"]));
    }

    #[tokio::test]
    async fn test_upload_over_body_limit_is_413() {
        let config = Config {
            max_upload_bytes: 10,
            ..Config::default()
        };
        let content = "Name,Ward\n".repeat(20_000);
        let req = upload_request(&[("file", "big.csv", &content)]);
        let (status, json) = send(router(config), req).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"], "File too large (limit 10 bytes)");
    }

    #[tokio::test]
    async fn test_upload_over_file_limit_within_body_limit_is_413() {
        let config = Config {
            max_upload_bytes: 10,
            ..Config::default()
        };
        let req = upload_request(&[("file", "small.csv", "Name,Ward\nAnn,East\n")]);
        let (status, _) = send(router(config), req).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_upload_without_file_field_is_400() {
        let req = upload_request(&[("attachment", "a.csv", "A\n1\n")]);
        let (status, json) = send(router(Config::default()), req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid request: No file provided");
        assert_eq!(json["headers"], json!([]));
    }

    #[tokio::test]
    async fn test_upload_ignores_other_fields() {
        let req = upload_request(&[
            ("attachment", "notes.txt", "ignored"),
            ("file", "a.csv", "A,B\n1,2\n"),
        ]);
        let (status, json) = send(router(Config::default()), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["headers"], json!(["A", "B"]));
    }

    #[tokio::test]
    async fn test_upload_intake_errors_are_422() {
        let cases = [
            ("a.txt", "A\n1\n", "Please upload a valid .csv file."),
            ("a.csv", "—,—\n—,\n", "Could not find valid headers in CSV."),
            ("a.csv", "\n  \n", "CSV file contains no valid data."),
        ];
        for (file_name, content, message) in cases {
            let req = upload_request(&[("file", file_name, content)]);
            let (status, json) = send(router(Config::default()), req).await;

            assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", file_name);
            assert_eq!(json["status"], "error");
            assert_eq!(json["error"], message);
            assert_eq!(json["rows"], json!([]));
        }
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let req = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, json) = send(router(Config::default()), req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_logs_endpoint_is_event_stream() {
        let req = Request::builder().uri("/api/logs").body(Body::empty()).unwrap();
        let resp = router(Config::default()).oneshot(req).await.unwrap();

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE].to_str().unwrap(),
            "text/event-stream"
        );
    }

    #[test]
    fn test_router_builds_with_and_without_static_dir() {
        let _ = router(Config::default());
        let _ = router(Config {
            static_dir: Some(std::env::temp_dir()),
            ..Config::default()
        });
    }
}

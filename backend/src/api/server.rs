//! HTTP server for uploads and downloads.
//!
//! # API Endpoints
//!
//! | Method | Path                 | Description                              |
//! |--------|----------------------|------------------------------------------|
//! | GET    | `/`, `/health`       | Health check (JSON)                      |
//! | POST   | `/convert`           | Upload a CSV (`csv-file`), get a `.cwr`  |
//! | GET    | `/converted/{file}`  | Download a generated file                |
//! | GET    | `/api/logs`          | SSE log stream (`?job=<id>` to filter)   |

use axum::{
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, Json, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde::Deserialize;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use uuid::Uuid;

use super::logs::{log_info, JobLog, LOG_BROADCASTER};
use super::types::{error_response, ConvertResponse};
use crate::config::Config;
use crate::error::{ConvertError, ConvertResult, ServerError, ServerResult};
use crate::pipeline::{convert_bytes, output_file_name, ConvertOptions};

/// Multipart field names accepted for the uploaded table.
const UPLOAD_FIELDS: [&str; 2] = ["csv-file", "file"];

/// Largest accepted upload.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

struct AppState {
    config: Config,
}

struct Upload {
    file_name: Option<String>,
    bytes: Vec<u8>,
}

/// Build the application router.
pub fn router(config: Config) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_DISPOSITION]);

    let downloads = ServeDir::new(&config.output_dir);
    let state = Arc::new(AppState { config });

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/convert", post(convert_upload))
        .route("/api/logs", get(sse_logs))
        .nest_service("/converted", downloads)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log_info(format!("🚀 cwrkit server running on http://localhost:{}", config.port));
    log_info("POST /convert           - Upload CSV file (field csv-file)");
    log_info(format!(
        "GET  /converted/<file>  - Download from {}",
        config.output_dir.display()
    ));
    log_info("GET  /api/logs          - SSE log stream");
    log_info("GET  /health            - Health check");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(config)).await?;

    Ok(())
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "cwrkit",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "convert": "POST /convert",
            "download": "GET /converted/{file}",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

#[derive(Debug, Deserialize)]
struct LogFilter {
    job: Option<String>,
}

/// SSE endpoint for real-time log streaming
async fn sse_logs(
    Query(filter): Query<LogFilter>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(move |result| {
        let entry = result.ok()?;
        if let Some(ref job) = filter.job {
            if entry.job_id.as_deref() != Some(job.as_str()) {
                return None;
            }
        }
        let json = serde_json::to_string(&entry).ok()?;
        Some(Ok(Event::default().data(json)))
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Upload endpoint: CSV in, `.cwr` file written, JSON summary out.
async fn convert_upload(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ConvertResponse>, (StatusCode, Json<Value>)> {
    let job_id = Uuid::new_v4().to_string();
    let log = JobLog::for_job(job_id.clone());

    match handle_upload(&state, multipart, &job_id, &log).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            log.error(err.to_string());
            Err((status_for(&err), Json(error_response(&job_id, &err.to_string()))))
        }
    }
}

async fn handle_upload(
    state: &AppState,
    mut multipart: Multipart,
    job_id: &str,
    log: &JobLog,
) -> ServerResult<ConvertResponse> {
    let upload = read_upload(&mut multipart).await?;
    log.info(format!(
        "📄 New upload: {} ({} bytes)",
        upload.file_name.as_deref().unwrap_or("unknown"),
        upload.bytes.len()
    ));

    let options = ConvertOptions::from_config(&state.config);
    let job_log = log.clone();
    let bytes = upload.bytes;
    let report = tokio::task::spawn_blocking(move || convert_bytes(&bytes, &options, &job_log))
        .await
        .map_err(|e| ServerError::Internal(e.to_string()))??;

    let file_name = output_file_name(upload.file_name.as_deref());
    store(state, &file_name, &report.output.text).await?;
    log.success(format!("💾 Saved as {}", file_name));

    Ok(ConvertResponse::new(job_id.to_string(), file_name, &report))
}

async fn read_upload(multipart: &mut Multipart) -> ServerResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        if !UPLOAD_FIELDS.contains(&name.as_str()) {
            continue;
        }

        let file_name = field.file_name().map(|s| s.to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?;
        return Ok(Upload {
            file_name,
            bytes: bytes.to_vec(),
        });
    }

    Err(ServerError::BadRequest("No file uploaded".to_string()))
}

async fn store(state: &AppState, file_name: &str, content: &str) -> ConvertResult<()> {
    let dir = &state.config.output_dir;
    tokio::fs::create_dir_all(dir).await?;
    tokio::fs::write(dir.join(file_name), content).await?;
    Ok(())
}

fn status_for(err: &ServerError) -> StatusCode {
    match err {
        ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
        ServerError::Convert(ConvertError::Csv(_)) => StatusCode::BAD_REQUEST,
        ServerError::Convert(ConvertError::Io(_)) | ServerError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

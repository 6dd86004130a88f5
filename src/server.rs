use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::{Json, Router, routing::post};
use log::{info, warn};

use crate::config::ServerConfig;
use crate::data::{ClassSpec, MixInput, MixOutput};
use crate::records::{export, parse_records};
use crate::solver;

type HandlerError = (StatusCode, String);

async fn mix_handler(Json(input): Json<MixInput>) -> Result<Json<MixOutput>, HandlerError> {
    match solver::solve(&input) {
        Ok(output) => Ok(Json(output)),
        Err(e) => Err((StatusCode::BAD_REQUEST, e)),
    }
}

async fn export_handler(Json(input): Json<MixInput>) -> Result<impl IntoResponse, HandlerError> {
    let output = solver::solve(&input).map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    Ok(text(export(&output.classes)))
}

/// Takes record lines as the body and mixes them into the default layout.
async fn import_handler(body: String) -> Result<impl IntoResponse, HandlerError> {
    let students = parse_records(&body).map_err(|e| {
        warn!("Rejected record input: {}", e);
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;
    let input = MixInput {
        students,
        classes: ClassSpec::default_layout(),
        seed: None,
    };
    let output = solver::solve(&input).map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    Ok(text(export(&output.classes)))
}

fn text(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}

pub fn router() -> Router {
    Router::new()
        .route("/v1/classes/mix", post(mix_handler))
        .route("/v1/classes/export", post(export_handler))
        .route("/v1/classes/import", post(import_handler))
}

pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router()).await
}

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use crate::data::{SchedulingInput, SchedulingOutput};
use crate::error::ConfigError;
use crate::report::Workbook;
use crate::solver::Allocator;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

#[derive(Debug)]
pub enum AppError {
    InvalidInput(ConfigError),
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::InvalidInput(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::InvalidInput(e) => {
                warn!("Rejected scheduling request: {}", e);
                (
                    StatusCode::BAD_REQUEST,
                    ApiError {
                        code: "INVALID_INPUT".to_string(),
                        message: e.to_string(),
                    },
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

async fn health_handler() -> &'static str {
    "ok"
}

async fn solve_handler(Json(input): Json<SchedulingInput>) -> Result<Json<SchedulingOutput>, AppError> {
    let schedule = Allocator::new(&input.catalog, &input.config).allocate(&input.sessions)?;
    Ok(Json(schedule.to_output()))
}

async fn export_handler(Json(input): Json<SchedulingInput>) -> Result<Json<Workbook>, AppError> {
    let schedule = Allocator::new(&input.catalog, &input.config).allocate(&input.sessions)?;
    Ok(Json(Workbook::from_schedule(&input.catalog, &schedule)))
}

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/v1/schedule/solve", post(solve_handler))
        .route("/v1/schedule/export", post(export_handler))
}

pub async fn run_server(addr: SocketAddr) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, router()).await
}

use axum::{
    http::{StatusCode, header::InvalidHeaderValue},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::config::ConfigError;
use crate::session::SessionError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Session unavailable: {0}")]
    Session(#[from] SessionError),

    #[error("Failed to render page: {0}")]
    Render(#[from] askama::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to read logo: {0}")]
    Logo(#[from] std::io::Error),

    #[error("Invalid response header: {0}")]
    Header(#[from] InvalidHeaderValue),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}

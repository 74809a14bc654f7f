use crate::params::ValidationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use image_compositor::CompositorError;
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Unknown difficulty")]
    UnknownDifficulty,

    #[error("Failed to load background {thumbnail}: {error}")]
    BackgroundLoad { thumbnail: String, error: String },

    #[error("Failed to load asset {path}: {error}")]
    Asset { path: String, error: String },

    #[error("Failed to encode canvas: {0}")]
    Encoding(#[from] CompositorError),
}

impl AppError {
    pub fn name(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "ValidationError",
            AppError::UnknownDifficulty => "UnknownDifficulty",
            AppError::BackgroundLoad { .. } => "BackgroundLoadError",
            AppError::Asset { .. } => "AssetError",
            AppError::Encoding(_) => "EncodingError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            // validation failures are reported as 500, not 400
            AppError::UnknownDifficulty => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::UnknownDifficulty => {
                log::warn!("{self}");
                json!({ "error": "Unknown difficulty" })
            }
            AppError::Validation(e) => {
                log::error!("{self}");
                serde_json::to_value(e).unwrap_or_else(|_| json!({ "message": e.message }))
            }
            _ => {
                log::error!("{self}");
                json!({ "name": self.name(), "message": self.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

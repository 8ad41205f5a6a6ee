//! Error types for the brand challenge API

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum Submit {
  #[error("User not found. Please login first.")]
  Unregistered,
  #[error("You have already submitted to this challenge")]
  Duplicate,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("Database error: {0}")]
  Database(#[from] DbErr),

  #[error("User not found")]
  UserNotFound,

  #[error("Challenge not found")]
  ChallengeNotFound,

  #[error(transparent)]
  Submit(#[from] Submit),

  #[error("Service unhealthy: {0}")]
  Unavailable(String),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Error::UserNotFound
      | Error::ChallengeNotFound
      | Error::Submit(Submit::Unregistered) => StatusCode::NOT_FOUND,
      Error::Submit(Submit::Duplicate) => StatusCode::BAD_REQUEST,
      Error::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
      Error::Database(_) | Error::Internal(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      error!("Request failed: {self}");
    }

    let body = json::json!({ "detail": self.to_string() });
    (status, Json(body)).into_response()
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

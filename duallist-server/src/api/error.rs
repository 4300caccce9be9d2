//! HTTP rendering of rejected intents.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

use duallist_types::MutationError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Mutation(#[from] MutationError),

    #[error("Not found")]
    NotFound,

    /// Body or query rejected by the extractor with a status of its own
    /// (oversized body, wrong content type).
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

/// `{ "error": "<message>", "code": "<kind>" }`
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    pub code: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Mutation(e) => StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Rejected { status, .. } => *status,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Mutation(e) => e.code(),
            Self::NotFound => "not_found",
            Self::Rejected { status, .. } => match *status {
                StatusCode::PAYLOAD_TOO_LARGE => "payload_too_large",
                StatusCode::UNSUPPORTED_MEDIA_TYPE => "unsupported_media_type",
                _ => "invalid_request",
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let message = rejection.body_text();
        match rejection.status() {
            // Unparseable or mistyped JSON is the caller's malformed intent.
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Self::Mutation(MutationError::InvalidRequest { message })
            },
            status => Self::Rejected { status, message },
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Mutation(MutationError::InvalidRequest { message: rejection.body_text() })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!("[API] {} ({})", self, status);
        } else {
            tracing::debug!("[API] Rejected: {} ({})", self, status);
        }
        let body = ErrorBody { error: self.to_string(), code: self.code() };
        (status, Json(body)).into_response()
    }
}

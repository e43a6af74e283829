//! HTTP error mapping for the JSON API.
//!
//! Every failure renders as `{"error": "<message>"}` with a 400, 404 or 500
//! status. Store failures are logged and reported without file details.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use goaltrack_core::{EntryServiceError, RepoError, TagServiceError};
use log::{error, warn};
use serde_json::json;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn public_message(&self) -> &str {
        match self {
            Self::BadRequest(message) | Self::NotFound(message) => message,
            Self::Internal(_) => "internal storage error",
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BadRequest(message) => write!(f, "bad request: {message}"),
            Self::NotFound(message) => write!(f, "not found: {message}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("event=api_error module=server status=error code={} error={}", status.as_u16(), self);
        } else {
            warn!("event=api_error module=server status=rejected code={} error={}", status.as_u16(), self);
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

impl From<RepoError> for ApiError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound { .. } => Self::NotFound(value.to_string()),
            RepoError::Validation(_) | RepoError::DuplicateId { .. } | RepoError::IdMismatch { .. } => {
                Self::BadRequest(value.to_string())
            }
            RepoError::Store(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<EntryServiceError> for ApiError {
    fn from(value: EntryServiceError) -> Self {
        match value {
            EntryServiceError::GoalNotFound(_) | EntryServiceError::EntryNotFound(_) => {
                Self::NotFound(value.to_string())
            }
            EntryServiceError::ValueMismatch { .. } => Self::BadRequest(value.to_string()),
            EntryServiceError::Repo(err) => err.into(),
        }
    }
}

impl From<TagServiceError> for ApiError {
    fn from(value: TagServiceError) -> Self {
        match value {
            TagServiceError::DuplicateName(_) => Self::BadRequest(value.to_string()),
            TagServiceError::Repo(err) => err.into(),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::BadRequest(value.body_text())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::Internal(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goaltrack_core::StoreError;
    use std::path::PathBuf;

    #[test]
    fn repo_errors_map_to_http_statuses() {
        let missing = ApiError::from(RepoError::NotFound {
            collection: "goals",
            id: "g1".to_string(),
        });
        assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(missing.public_message(), "goal not found: g1");

        let duplicate = ApiError::from(RepoError::DuplicateId {
            collection: "tags",
            id: "t1".to_string(),
        });
        assert_eq!(duplicate.status_code(), StatusCode::BAD_REQUEST);

        let store = ApiError::from(RepoError::Store(StoreError::InvalidLayout {
            path: PathBuf::from("/srv/data/goals.json"),
            collection: "goals",
        }));
        assert_eq!(store.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!store.public_message().contains("/srv"));
    }

    #[test]
    fn duplicate_tag_name_is_a_bad_request() {
        let err = ApiError::from(TagServiceError::DuplicateName("work".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.public_message(), "tag already exists: work");
    }
}

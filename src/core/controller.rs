use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use crate::core::command::CommandError;
use crate::core::domain::Configuration;
use crate::core::library::LibraryError;
use crate::core::repository::RepositoryStore;

#[derive(Debug, Clone)]
pub struct AppState {
    pub(crate) config: Configuration,
    pub(crate) store: RepositoryStore,
}

impl AppState {
    pub fn new(config: Configuration, store: RepositoryStore) -> AppState {
        AppState {
            config,
            store,
        }
    }
}

// ResponseStatus tells callers whether a failure was caused by their input (fail)
// or by the service itself (error)
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ResponseStatus {
    Success,
    Fail,
    Error,
}

// ApiResponse is the envelope wrapping every catalog response
#[derive(Debug, Serialize)]
pub(crate) struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: Option<&str>, data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: message.map(str::to_string),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: &str) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

impl ApiResponse<Value> {
    pub fn failure(status: ResponseStatus, message: &str) -> Self {
        Self {
            status,
            message: Some(message.to_string()),
            data: None,
        }
    }
}

pub(crate) type ServerError = (StatusCode, Json<ApiResponse<Value>>);

fn fail(code: StatusCode, message: &str) -> ServerError {
    (code, Json(ApiResponse::failure(ResponseStatus::Fail, message)))
}

fn error(code: StatusCode, message: &str) -> ServerError {
    (code, Json(ApiResponse::failure(ResponseStatus::Error, message)))
}

pub(crate) fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::from(CommandError::from(LibraryError::from(err)))
}

// body that axum could not read as json at all, e.g. broken syntax or a missing content type
pub(crate) fn json_rejection_to_server_error(rejection: JsonRejection) -> ServerError {
    ServerError::from(CommandError::from(LibraryError::serialization(
        format!("Invalid request payload: {}", rejection.body_text()).as_str())))
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::DuplicateKey { .. } => {
                error(StatusCode::INTERNAL_SERVER_ERROR, err.message())
            }
            CommandError::NotFound { .. } => {
                fail(StatusCode::NOT_FOUND, err.message())
            }
            CommandError::Runtime { .. } => {
                error(StatusCode::INTERNAL_SERVER_ERROR, err.message())
            }
            CommandError::Serialization { .. } => {
                fail(StatusCode::BAD_REQUEST, err.message())
            }
            CommandError::Validation { .. } => {
                fail(StatusCode::BAD_REQUEST, err.message())
            }
        }
    }
}

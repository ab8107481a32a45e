use std::result;

use axum::response::IntoResponse;
use axum::response::Response;
use common::http::ApiError;
use metadata::error::MetadataError;
use thiserror::Error;

pub type Result<T> = result::Result<T, PlatformError>;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("{1:?} error wrapped into {0:?}")]
    Wrapped(Box<PlatformError>, Box<PlatformError>),
    #[error("bad request: {0:?}")]
    BadRequest(String),
    #[error("not found: {0:?}")]
    NotFound(String),
    #[error("internal: {0:?}")]
    Internal(String),
    #[error("metadata: {0:?}")]
    Metadata(#[from] MetadataError),
}

impl PlatformError {
    pub fn wrap_into(self, err: impl Into<PlatformError>) -> PlatformError {
        PlatformError::Wrapped(Box::new(self), Box::new(err.into()))
    }

    pub fn into_api_error(self) -> ApiError {
        match self {
            PlatformError::Wrapped(_, outer) => outer.into_api_error(),
            PlatformError::BadRequest(msg) => ApiError::bad_request(msg),
            PlatformError::NotFound(msg) => ApiError::not_found(msg),
            PlatformError::Internal(msg) => ApiError::internal(msg),
            PlatformError::Metadata(err) => match err {
                MetadataError::NotFound(_) => ApiError::not_found(err.to_string()),
                MetadataError::BadRequest(_) => ApiError::bad_request(err.to_string()),
                MetadataError::Internal(_) => ApiError::internal(err.to_string()),
                MetadataError::Serde(_) => ApiError::internal(err.to_string()),
                MetadataError::Io(_) => ApiError::internal(err.to_string()),
            },
        }
    }
}

impl IntoResponse for PlatformError {
    fn into_response(self) -> Response {
        self.into_api_error().into_response()
    }
}

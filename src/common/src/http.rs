use std::fmt::Display;

use async_trait::async_trait;
use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum_core::body::Body;
use axum_core::extract::Request;
use axum_core::response::Response;
use bytes::Bytes;
use http_body_util::BodyExt;
use http_body_util::Limited;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use tracing::Level;

#[derive(Error, Debug, Clone)]
#[error("{message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

// Clients only ever see a single human readable string.
#[derive(Serialize)]
struct ApiErrorWrapper {
    pub error: String,
}

impl ApiError {
    pub fn bad_request(err: impl ToString) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST).with_message(err.to_string())
    }

    pub fn not_found(err: impl ToString) -> Self {
        ApiError::new(StatusCode::NOT_FOUND).with_message(err.to_string())
    }

    pub fn internal(err: impl ToString) -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR).with_message(err.to_string())
    }

    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            message: status
                .canonical_reason()
                .unwrap_or_default()
                .to_string(),
        }
    }

    pub fn with_message(self, message: String) -> Self {
        Self {
            status: self.status,
            message,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        debug!("ApiError: {:?}", self);
        (
            self.status,
            axum::Json(ApiErrorWrapper {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// JSON extractor/responder whose rejections are rendered as [`ApiError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Json<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(v) => Ok(Json(v.0)),
            Err(err) => Err(ApiError::bad_request(err.body_text())),
        }
    }
}

impl<T> IntoResponse for Json<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Path extractor whose rejections are rendered as [`ApiError`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Path<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(v) => Ok(Path(v.0)),
            Err(err) => Err(ApiError::new(err.status()).with_message(err.body_text())),
        }
    }
}

// Upper bound on a request body buffered for logging.
const MAX_LOGGED_BODY: usize = 2 * 1024 * 1024;

/// Logs method, uri and status. Request bodies are buffered and printed only
/// when debug logging is enabled, so they are streamed untouched otherwise.
pub async fn print_request_response(
    req: Request,
    next: Next,
) -> std::result::Result<impl IntoResponse, (StatusCode, String)> {
    if !tracing::enabled!(Level::DEBUG) {
        return Ok(next.run(req).await);
    }

    debug!("{} {}", req.method(), req.uri());
    let (parts, body) = req.into_parts();
    let bytes = buffer_and_print("request", Limited::new(body, MAX_LOGGED_BODY)).await?;
    let req = Request::from_parts(parts, Body::from(bytes));

    let res = next.run(req).await;
    debug!("{} response", res.status());

    Ok(res)
}

async fn buffer_and_print<B>(
    direction: &str,
    body: B,
) -> std::result::Result<Bytes, (StatusCode, String)>
where
    B: axum::body::HttpBody<Data = Bytes>,
    B::Error: Display,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(err) => {
            return Err((
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("failed to read {direction} body: {err}"),
            ));
        }
    };

    if !bytes.is_empty() {
        if let Ok(body) = std::str::from_utf8(&bytes) {
            debug!("{direction} body = {body}");
        }
    }

    Ok(bytes)
}

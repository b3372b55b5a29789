//! Request extractors
//!
//! `ApiJson` behaves like `axum::Json` but rejects with `ServerError`, so a
//! body that fails to parse gets the same `{"error": ...}` envelope and a 400
//! like every other client error.

use crate::error::ServerError;
use axum::extract::{rejection::JsonRejection, FromRequest};

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ServerError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::BadRequest(rejection.body_text())
    }
}

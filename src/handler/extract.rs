use axum::extract::{FromRequest, FromRequestParts};
use crate::util::error::HandlerError;

/// `Json` whose rejection is reported as a `HandlerError`.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(HandlerError))]
pub struct AppJson<T>(pub T);

/// `Query` whose rejection is reported as a `HandlerError`.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(HandlerError))]
pub struct AppQuery<T>(pub T);

use axum::extract::FromRequest;

use crate::errors::AppError;

/// `Json` whose rejection is an `AppError`, so malformed bodies get the same
/// JSON error shape as every other failure.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

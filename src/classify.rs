use crate::ApiError;

/// Category used for status codes missing from the table, including `0`.
pub const UNKNOWN_CATEGORY: &str = "internal error";

/// Returns the short label for a known HTTP error status.
pub fn status_category(status: u16) -> Option<&'static str> {
    let category = match status {
        400 => "bad request",
        401 => "unauthorized",
        403 => "forbidden",
        404 => "resource not found",
        405 => "incorrect http method",
        406 => "incorrect content type",
        409 => "request conflict",
        429 => "too many requests",
        500 => "internal server error",
        502 => "bad gateway",
        503 => "service unavailable",
        504 => "gateway timeout",
        _ => return None,
    };
    Some(category)
}

/// Builds an [`ApiError::Status`] for an unexpected response.
///
/// The body is embedded as lossy UTF-8 so the server's explanation survives.
pub fn classify(status: u16, body: &[u8]) -> ApiError {
    ApiError::Status {
        status,
        category: status_category(status).unwrap_or(UNKNOWN_CATEGORY),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

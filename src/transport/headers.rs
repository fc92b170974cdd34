//! Outbound header construction.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Build the standard headers for console API requests.
///
/// The bearer header is attached only for a present, non-blank token; a blank
/// credential is treated as "absent" and attaches nothing. A stored token
/// that cannot be encoded as a header value fails here, before the call is
/// attempted, so the error names the malformed credential instead of
/// masquerading as a server-side 401.
pub fn request_headers(token: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    if let Some(token) = token {
        if !token.trim().is_empty() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| Error::Request("stored credential is not a valid header value".into()))?;
            headers.insert(reqwest::header::AUTHORIZATION, value);
        }
    }

    headers.insert(
        reqwest::header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );

    // Unique id per call for server-side log correlation
    headers.insert(
        HeaderName::from_static("x-request-id"),
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .unwrap_or_else(|_| HeaderValue::from_static("00000000-0000-0000-0000-000000000000")),
    );

    Ok(headers)
}

//! Pure response classification.
//!
//! Every inbound result is mapped to a typed [`Outcome`]; the orchestrator in
//! [`super::http`] interprets the outcome and performs side effects. Keeping
//! classification free of side effects makes the decision table testable
//! without a session store or a navigation surface.

use reqwest::StatusCode;

use crate::config::{CODE_SUCCESS, CODE_UNAUTHENTICATED};
use crate::error::Error;
use crate::models::envelope::Envelope;

/// Classified result of one call.
#[derive(Debug)]
pub enum Outcome {
    /// Transport 2xx and success sentinel: the unwrapped `data` payload.
    Success(serde_json::Value),
    /// Transport 2xx, non-success embedded code. Session stays intact.
    Business {
        code: i64,
        message: String,
    },
    /// The session must be torn down (HTTP 401 or embedded code 401).
    SessionInvalid,
    /// The network exchange failed or the HTTP status was non-success.
    Transport(Error),
}

/// Classify a failure that happened before any response was received.
pub fn classify_send_error(err: reqwest::Error) -> Error {
    if err.is_timeout() {
        Error::Timeout
    } else if err.is_connect() {
        Error::Network(err)
    } else if err.is_builder() || err.is_request() {
        // The request never left the process
        Error::Request(err.to_string())
    } else {
        Error::NoResponse(err.to_string())
    }
}

/// Classify a received response.
///
/// For a non-2xx status the body is never inspected; for a 2xx status the
/// envelope decides, so `envelope` is `None` exactly when the body could not
/// be decoded.
pub fn classify_response(status: StatusCode, envelope: Option<Envelope>) -> Outcome {
    if !status.is_success() {
        return match status.as_u16() {
            401 => Outcome::SessionInvalid,
            code => Outcome::Transport(Error::Api { status: code }),
        };
    }

    match envelope {
        None => Outcome::Transport(Error::Decode("response body is not a valid envelope".into())),
        Some(env) if env.code == CODE_SUCCESS => Outcome::Success(env.data),
        Some(env) if env.code == CODE_UNAUTHENTICATED => Outcome::SessionInvalid,
        Some(env) => Outcome::Business {
            code: env.code,
            message: env.message(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(code: i64, msg: Option<&str>, data: serde_json::Value) -> Envelope {
        serde_json::from_value(serde_json::json!({
            "code": code,
            "msg": msg,
            "data": data,
        }))
        .unwrap()
    }

    #[test]
    fn test_http_401_is_session_invalid() {
        let outcome = classify_response(StatusCode::UNAUTHORIZED, None);
        assert!(matches!(outcome, Outcome::SessionInvalid));
    }

    #[test]
    fn test_non_success_statuses_map_to_transport() {
        for (status, message) in [
            (StatusCode::NOT_FOUND, "requested resource not found"),
            (StatusCode::INTERNAL_SERVER_ERROR, "internal server error"),
            (StatusCode::SERVICE_UNAVAILABLE, "request failed (503)"),
        ] {
            match classify_response(status, None) {
                Outcome::Transport(err) => assert_eq!(err.user_message(), message),
                other => panic!("expected transport outcome, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_embedded_401_matches_http_401() {
        let outcome =
            classify_response(StatusCode::OK, Some(envelope(401, Some("expired"), serde_json::Value::Null)));
        assert!(matches!(outcome, Outcome::SessionInvalid));
    }

    #[test]
    fn test_success_sentinel_unwraps_data() {
        let data = serde_json::json!({"id": 9, "list": [1, 2]});
        match classify_response(StatusCode::OK, Some(envelope(200, None, data.clone()))) {
            Outcome::Success(payload) => assert_eq!(payload, data),
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[test]
    fn test_other_embedded_code_is_business_error() {
        match classify_response(StatusCode::OK, Some(envelope(400, Some("bad name"), serde_json::Value::Null))) {
            Outcome::Business { code, message } => {
                assert_eq!(code, 400);
                assert_eq!(message, "bad name");
            }
            other => panic!("expected business outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_business_error_message_fallback() {
        match classify_response(StatusCode::OK, Some(envelope(400, None, serde_json::Value::Null))) {
            Outcome::Business { message, .. } => assert_eq!(message, "system error"),
            other => panic!("expected business outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_undecodable_2xx_body_is_transport() {
        match classify_response(StatusCode::OK, None) {
            Outcome::Transport(Error::Decode(_)) => {}
            other => panic!("expected decode failure, got {:?}", other),
        }
    }
}

//! The response envelope every console endpoint wraps its payload in.

use serde::Deserialize;

/// Backend response envelope: `{code, msg, data}`.
///
/// `code` carries the business status; the HTTP status only reflects the
/// transport. `data` is present on success and may be anything, so it is kept
/// as raw JSON until a caller asks for a concrete type.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    /// Embedded business status code.
    pub code: i64,
    /// Human-readable message, usually only set on failure.
    #[serde(default)]
    pub msg: Option<String>,
    /// Payload, meaningful only when `code` is the success sentinel.
    #[serde(default)]
    pub data: serde_json::Value,
}

impl Envelope {
    /// The message to surface for a non-success envelope.
    pub fn message(&self) -> String {
        match &self.msg {
            Some(m) if !m.is_empty() => m.clone(),
            _ => "system error".into(),
        }
    }
}

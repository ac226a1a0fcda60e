//! Response envelopes used by the quest service.

use serde::Deserialize;

/// Successful response: `{ "data": T, "message"?: string }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
    #[serde(default)]
    pub message: Option<String>,
}

/// Failed response: `{ "error": { status, message, timestamp } }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Some routes answer with a bare `{ "message": ... }`.
#[derive(Deserialize)]
struct BareMessage {
    message: String,
}

/// Extract the server's error message from a failed response body.
pub fn error_message(body: &[u8]) -> Option<String> {
    if let Ok(envelope) = serde_json::from_slice::<ErrorEnvelope>(body) {
        return Some(envelope.error.message);
    }
    serde_json::from_slice::<BareMessage>(body)
        .ok()
        .map(|bare| bare.message)
        .filter(|message| !message.is_empty())
}

//! Outcome of a credential submission.

#[cfg(test)]
#[path = "result_test.rs"]
mod result_test;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Message shown when a submission fails without a usable explanation.
pub const GENERIC_SUBMIT_ERROR: &str = "Something went wrong. Please try again.";

/// Result reported by the auth service for a sign-in or sign-up attempt.
///
/// Wire shape is `{"success": true}` or `{"error": "..."}`. A body carrying
/// neither is read as a generic error so the user always gets feedback.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthActionResult {
    Success,
    Error(String),
}

#[derive(Serialize, Deserialize)]
struct WireResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl From<WireResult> for AuthActionResult {
    fn from(wire: WireResult) -> Self {
        match (wire.error, wire.success) {
            (Some(message), _) if !message.is_empty() => Self::Error(message),
            (_, Some(true)) => Self::Success,
            _ => Self::Error(GENERIC_SUBMIT_ERROR.to_owned()),
        }
    }
}

impl Serialize for AuthActionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            Self::Success => WireResult { success: Some(true), error: None },
            Self::Error(message) => WireResult { success: None, error: Some(message.clone()) },
        };
        wire.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AuthActionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        WireResult::deserialize(deserializer).map(Self::from)
    }
}

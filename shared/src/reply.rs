use derive_more::Display;
use serde_json::Value;

use crate::PredictionResult;

/// Why a submitted upload did not produce a result, phrased for the user.
#[derive(Debug, Display, Clone, PartialEq)]
pub enum ReplyError {
    #[display(fmt = "{}", _0)]
    Server(String),
    #[display(fmt = "Request failed with status code {}", _0)]
    Status(u16),
    #[display(fmt = "Failed to parse response: {}", _0)]
    Parse(String),
    #[display(fmt = "Network error: {}", _0)]
    Network(String),
}

impl std::error::Error for ReplyError {}

/// Decides what a relay reply means for the client.
///
/// An `error` field wins over the status code, so both the relay's own
/// failures and a downstream body that reports an error are surfaced with
/// their message. A bare non-2xx status falls back to a generic message.
pub fn interpret_reply(status: u16, body: &str) -> Result<PredictionResult, ReplyError> {
    let parsed = serde_json::from_str::<Value>(body);

    if let Ok(Value::Object(map)) = &parsed {
        if let Some(Value::String(message)) = map.get("error") {
            if !message.is_empty() {
                return Err(ReplyError::Server(message.clone()));
            }
        }
    }

    if !(200..300).contains(&status) {
        return Err(ReplyError::Status(status));
    }

    let value = parsed.map_err(|e| ReplyError::Parse(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| ReplyError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_becomes_result() {
        let result =
            interpret_reply(200, r#"{"class":"Tomato_Early_blight","confidence":0.87}"#).unwrap();
        assert_eq!(result.class, "Tomato_Early_blight");
        assert!((result.confidence - 0.87).abs() < f32::EPSILON);
    }

    #[test]
    fn error_field_fails_even_with_ok_status() {
        let err = interpret_reply(200, r#"{"error":"model offline"}"#).unwrap_err();
        assert_eq!(err, ReplyError::Server("model offline".into()));
        assert_eq!(err.to_string(), "model offline");
    }

    #[test]
    fn relay_error_body_is_surfaced() {
        let err = interpret_reply(400, r#"{"error":"No file uploaded"}"#).unwrap_err();
        assert_eq!(err.to_string(), "No file uploaded");

        let err = interpret_reply(
            500,
            r#"{"error":"Prediction failed","details":"connection refused"}"#,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Prediction failed");
    }

    #[test]
    fn bare_failure_status_uses_code() {
        let err = interpret_reply(502, "<html>bad gateway</html>").unwrap_err();
        assert_eq!(err.to_string(), "Request failed with status code 502");
    }

    #[test]
    fn empty_error_field_is_not_a_failure() {
        let result =
            interpret_reply(200, r#"{"error":"","class":"Tomato___healthy","confidence":1.0}"#)
                .unwrap();
        assert_eq!(result.class, "Tomato___healthy");
    }

    #[test]
    fn malformed_success_body_is_a_parse_failure() {
        let err = interpret_reply(200, r#"{"label":"x"}"#).unwrap_err();
        assert!(matches!(err, ReplyError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse response: "));
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    Forbidden,
    NotFound,
    Validation,
    Internal,
    #[default]
    #[serde(other)]
    Unknown,
}

/// JSON error body returned by the registry endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: ErrorCode,
    #[serde(alias = "MENSAGEM", alias = "mensagem")]
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Parses an error body, returning `None` when it is not an `ApiError` or
    /// carries an empty message.
    pub fn from_body(body: &[u8]) -> Option<Self> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .filter(|err| !err.message.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_error_body_with_portuguese_message_key() {
        let err = ApiError::from_body(br#"{"MENSAGEM":"Placa duplicada"}"#).expect("parsed");
        assert_eq!(err.code, ErrorCode::Unknown);
        assert_eq!(err.message, "Placa duplicada");
    }

    #[test]
    fn rejects_blank_or_foreign_bodies() {
        assert!(ApiError::from_body(br#"{"message":"   "}"#).is_none());
        assert!(ApiError::from_body(b"<html>bad gateway</html>").is_none());
    }
}

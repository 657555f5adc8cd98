//! Error types for the gridwatch core.

use thiserror::Error;

/// Top-level gridwatch core error.
#[derive(Debug, Error)]
pub enum GridwatchError {
    #[error("alert error: {0}")]
    Alert(#[from] crate::alerts::AlertError),
    #[error("response error: {0}")]
    Response(#[from] crate::response::ResponseError),
    #[error("scenario error: {0}")]
    Scenario(#[from] crate::scenario::ScenarioError),
    #[error("invalid {kind}: '{value}'")]
    InvalidEnumValue { kind: &'static str, value: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_enum_value_message() {
        let err = GridwatchError::InvalidEnumValue {
            kind: "severity",
            value: "extreme".into(),
        };
        assert_eq!(err.to_string(), "invalid severity: 'extreme'");
    }
}

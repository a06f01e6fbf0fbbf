// mailsoap-types/src/error.rs
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A fail-loud token family was handed a token outside its vocabulary.
    #[error("invalid value for {family}: {token:?}, valid values: [{}]", .valid.join(", "))]
    InvalidInput {
        family: &'static str,
        token: String,
        valid: Vec<&'static str>,
    },

    #[error("{record} is missing required field {field:?}")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("invalid flag token {token:?}, expected one of 1, 0, true, false")]
    InvalidFlag { token: String },
}

impl TypeError {
    /// Name of the field or family the error is about, for surfacing to API clients.
    pub fn subject(&self) -> &str {
        match self {
            Self::InvalidInput { family, .. } => family,
            Self::MissingField { field, .. } => field,
            Self::InvalidFlag { .. } => "flag",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_lists_tokens() {
        let err = TypeError::InvalidInput {
            family: "FilterImportance",
            token: "urgent".to_string(),
            valid: vec!["high", "normal", "low"],
        };
        assert_eq!(
            err.to_string(),
            r#"invalid value for FilterImportance: "urgent", valid values: [high, normal, low]"#
        );
        assert_eq!(err.subject(), "FilterImportance");
    }

    #[test]
    fn test_missing_field_message() {
        let err = TypeError::MissingField {
            record: "MsgAttachSpec",
            field: "id",
        };
        assert_eq!(err.to_string(), r#"MsgAttachSpec is missing required field "id""#);
    }
}

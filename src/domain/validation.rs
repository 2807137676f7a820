use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty {
        field: &'static str,
    },
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    InvalidEmailAddress {
        input: String,
    },
    ContainsDelimiter {
        field: &'static str,
        delimiter: char,
    },
    InvalidPhoneNumber {
        input: String,
    },
    InvalidUrl {
        field: &'static str,
        input: String,
    },
    MissingDependentField {
        field: &'static str,
        required_by: &'static str,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::TooLong { field, max, actual } => {
                write!(f, "{field} is too long: {actual} characters (max {max})")
            }
            Self::InvalidEmailAddress { input } => write!(f, "invalid email address: {input}"),
            Self::ContainsDelimiter { field, delimiter } => {
                write!(f, "{field} must not contain '{delimiter}'")
            }
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::InvalidUrl { field, input } => write!(f, "{field} is not a valid URL: {input}"),
            Self::MissingDependentField { field, required_by } => {
                write!(f, "{field} must be set when {required_by} is set")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reject values that are empty after trimming, returning the trimmed value.
pub(crate) fn non_blank(
    field: &'static str,
    value: impl Into<String>,
) -> Result<String, ValidationError> {
    let value = value.into();
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }
    Ok(trimmed.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "to" };
        assert_eq!(err.to_string(), "to must not be empty");

        let err = ValidationError::TooLong {
            field: "text",
            max: 160,
            actual: 161,
        };
        assert_eq!(
            err.to_string(),
            "text is too long: 161 characters (max 160)"
        );

        let err = ValidationError::InvalidEmailAddress {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid email address: bad");

        let err = ValidationError::ContainsDelimiter {
            field: "to",
            delimiter: '|',
        };
        assert_eq!(err.to_string(), "to must not contain '|'");

        let err = ValidationError::MissingDependentField {
            field: "listid",
            required_by: "scheduled_date",
        };
        assert_eq!(
            err.to_string(),
            "listid must be set when scheduled_date is set"
        );
    }

    #[test]
    fn non_blank_trims_and_rejects_whitespace() {
        assert_eq!(non_blank("name", "  x ").unwrap(), "x");
        assert_eq!(
            non_blank("name", " \t "),
            Err(ValidationError::Empty { field: "name" })
        );
    }
}

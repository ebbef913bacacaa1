use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagError {
    #[error("tag title is blank")]
    Blank,
}

/// A list option supplied by the caller was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("`limit' must be a positive number between 1 and 4 digits, got {value:?}")]
    InvalidLimit { value: String },

    #[error("`offset' must be a number between 1 and 4 digits, got {value:?}")]
    InvalidOffset { value: String },

    #[error("`by' must be set to a valid field name ({}), got {value:?}", .allowed.join(", "))]
    InvalidSortField { value: String, allowed: Vec<String> },

    #[error("`order' must be set to either \"asc\" or \"desc\", got {value:?}")]
    InvalidOrder { value: String },
}

impl ValidationError {
    /// Name of the offending option.
    #[must_use]
    pub const fn option(&self) -> &'static str {
        match self {
            Self::InvalidLimit { .. } => "limit",
            Self::InvalidOffset { .. } => "offset",
            Self::InvalidSortField { .. } => "by",
            Self::InvalidOrder { .. } => "order",
        }
    }

    /// The rejected value, as supplied.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::InvalidLimit { value }
            | Self::InvalidOffset { value }
            | Self::InvalidSortField { value, .. }
            | Self::InvalidOrder { value } => value,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown asset type {label:?}")]
pub struct UnknownTypeError {
    pub label: String,
}

impl UnknownTypeError {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

/// The corpus has nothing for what was asked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("no item with id {}", .0)]
    ItemNotFound(String),

    #[error("can't find any tags")]
    NoTags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_cite_option_and_value() {
        let err = ValidationError::InvalidSortField {
            value: "colour".to_string(),
            allowed: vec!["created_at".to_string(), "title".to_string()],
        };
        assert_eq!("by", err.option());
        assert_eq!("colour", err.value());
        assert_eq!(
            "`by' must be set to a valid field name (created_at, title), got \"colour\"",
            err.to_string()
        );

        let err = ValidationError::InvalidLimit {
            value: "12345".to_string(),
        };
        assert_eq!("limit", err.option());
        assert!(err.to_string().contains("12345"));
    }
}

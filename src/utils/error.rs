use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchoolError {
    #[error("Validation failed")]
    Validation { errors: Vec<String> },

    #[error("Database error: {message}")]
    Database { message: String, transient: bool },

    #[error("{resource} not found")]
    NotFound { resource: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Client,
    Persistence,
    Missing,
    System,
}

impl SchoolError {
    pub fn validation(errors: Vec<String>) -> Self {
        Self::Validation { errors }
    }

    /// Store failure that will not go away by retrying.
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            transient: false,
        }
    }

    /// Store failure of the connection-reset / timeout / connection-lost class.
    pub fn transient_database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
            transient: true,
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Database { transient: true, .. })
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation { .. } => ErrorCategory::Client,
            Self::Database { .. } => ErrorCategory::Persistence,
            Self::NotFound { .. } => ErrorCategory::Missing,
            Self::Config { .. } | Self::Io(_) | Self::Internal { .. } => ErrorCategory::System,
        }
    }

    pub fn status_code(&self) -> u16 {
        match self.category() {
            ErrorCategory::Client => 400,
            ErrorCategory::Missing => 404,
            ErrorCategory::Persistence | ErrorCategory::System => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, SchoolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_follow_category() {
        assert_eq!(SchoolError::validation(vec!["bad".into()]).status_code(), 400);
        assert_eq!(SchoolError::database("boom").status_code(), 500);
        assert_eq!(SchoolError::not_found("School").status_code(), 404);
        assert_eq!(SchoolError::config("missing").status_code(), 500);
    }

    #[test]
    fn test_only_transient_database_errors_are_transient() {
        assert!(SchoolError::transient_database("connection reset").is_transient());
        assert!(!SchoolError::database("constraint violated").is_transient());
        assert!(!SchoolError::validation(vec![]).is_transient());
    }

    #[test]
    fn test_not_found_message() {
        assert_eq!(SchoolError::not_found("Route").to_string(), "Route not found");
    }
}

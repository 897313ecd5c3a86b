use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug, PartialEq)]
pub enum LibraryError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    // The caller supplied data that breaks a precondition of the operation, reason_code
    // identifies which rule was violated.
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl LibraryError {
    pub fn duplicate_key(message: &str) -> LibraryError {
        LibraryError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> LibraryError {
        LibraryError::NotFound { message: message.to_string() }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> LibraryError {
        LibraryError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> LibraryError {
        LibraryError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LibraryError::NotFound { .. })
    }
}

impl From<serde_json::Error> for LibraryError {
    fn from(err: serde_json::Error) -> Self {
        LibraryError::serialization(
            format!("Invalid request payload: {}", err).as_str())
    }
}

impl Display for LibraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LibraryError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            LibraryError::NotFound { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            LibraryError::Serialization { message } => {
                write!(f, "{}", message)
            }
            LibraryError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

impl std::error::Error for LibraryError {}

/// A specialized Result type for catalog and repository operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

#[cfg(test)]
mod tests {
    use crate::core::library::LibraryError;

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(LibraryError::duplicate_key("test"), LibraryError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        let err = LibraryError::not_found("test");
        assert!(matches!(err, LibraryError::NotFound{ message: _ }));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_should_create_validation_error() {
        let err = LibraryError::validation("test", Some("name_required".to_string()));
        assert!(matches!(err, LibraryError::Validation{ message: _, reason_code: _ }));
        assert!(!err.is_not_found());
    }

    #[tokio::test]
    async fn test_should_create_serialization_error() {
        assert!(matches!(LibraryError::serialization("test"), LibraryError::Serialization{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_runtime_error() {
        assert!(matches!(LibraryError::runtime("test", None), LibraryError::Runtime{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_convert_json_error() {
        let err = serde_json::from_str::<u32>("-1").expect_err("negative should not parse");
        let err = LibraryError::from(err);
        assert!(matches!(err, LibraryError::Serialization{ message: _ }));
        assert!(err.to_string().starts_with("Invalid request payload: "));
    }

    #[tokio::test]
    async fn test_should_format_errors() {
        assert_eq!("missing", LibraryError::not_found("missing").to_string());
        assert_eq!("bad Some(\"code\")", LibraryError::validation("bad", Some("code".to_string())).to_string());
    }
}

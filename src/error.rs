//! Error Taxonomy
//!
//! Every failure of a dialect assignment maps to one of three kinds, each
//! carrying the resource path it concerns.

use std::io;

/// Errors raised while assigning or listing dialects
#[derive(Debug, thiserror::Error)]
pub enum DialectError {
    /// Target syntax file is missing or unreadable
    #[error("syntax file \"{path}\" not found: {source}")]
    NotFound {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Target exists but is not a syntax-definition mapping
    #[error("syntax file \"{path}\" is malformed: {reason}")]
    MalformedDocument { path: String, reason: String },

    /// Target could not be written back
    #[error("cannot write syntax file \"{path}\": {source}")]
    WriteDenied {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl DialectError {
    pub fn malformed(path: &str, reason: impl Into<String>) -> Self {
        Self::MalformedDocument {
            path: path.to_string(),
            reason: reason.into(),
        }
    }

    /// Error for a syntax file that could not be loaded
    ///
    /// Text that is not UTF-8 was read fine but is no syntax definition.
    pub fn from_load(path: &str, source: io::Error) -> Self {
        if source.kind() == io::ErrorKind::InvalidData {
            Self::malformed(path, "not valid UTF-8")
        } else {
            Self::NotFound {
                path: path.to_string(),
                source,
            }
        }
    }

    /// Short kind name used in notices and logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NotFound",
            Self::MalformedDocument { .. } => "MalformedDocument",
            Self::WriteDenied { .. } => "WriteDenied",
        }
    }
}

pub type Result<T> = std::result::Result<T, DialectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_load_separates_missing_from_undecodable() {
        let missing = io::Error::new(io::ErrorKind::NotFound, "no such file");
        assert_eq!(DialectError::from_load("a", missing).kind(), "NotFound");

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(DialectError::from_load("a", denied).kind(), "NotFound");

        let binary = io::Error::new(io::ErrorKind::InvalidData, "stream did not contain valid UTF-8");
        assert_eq!(
            DialectError::from_load("a", binary).kind(),
            "MalformedDocument"
        );
    }

    #[test]
    fn test_error_messages_name_the_path() {
        let err = DialectError::NotFound {
            path: "Packages/SQL/SQL.sublime-syntax".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.kind(), "NotFound");
        assert!(err.to_string().contains("Packages/SQL/SQL.sublime-syntax"));

        let err = DialectError::malformed("a.sublime-syntax", "not a mapping");
        assert_eq!(err.kind(), "MalformedDocument");
        assert_eq!(
            err.to_string(),
            "syntax file \"a.sublime-syntax\" is malformed: not a mapping"
        );
    }
}

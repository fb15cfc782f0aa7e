//! Error types for the FBX importer core.

use thiserror::Error;

/// Main error type for FBX decoding and scene construction.
#[derive(Error, Debug)]
pub enum Error {
    /// Payload shorter than the decoded type requires
    #[error("Truncated payload: needed {needed} bytes, had {available}")]
    Truncated { needed: usize, available: usize },

    /// Compressed array payload could not be inflated
    #[error("Decompression failed: {0}")]
    Decompress(String),

    /// Decoded byte length disagrees with count * element width
    #[error("Decoded array size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Bool and byte arrays are recognized but not decodable
    #[error("Decoding {0} arrays is not implemented")]
    UnsupportedArrayKind(&'static str),

    /// Accessor called on a property of a different kind
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Attribute index exceeds the index array or value buffer
    #[error("Attribute index {index} out of bounds (count: {count})")]
    AttributeOutOfBounds { index: usize, count: usize },

    /// Cluster index exceeds the skin's cluster list
    #[error("Cluster index {index} out of bounds (count: {count})")]
    ClusterOutOfBounds { index: usize, count: usize },

    /// Unrecognized mapping or reference type string
    #[error("Unsupported attribute mapping: {0}")]
    UnsupportedMapping(String),

    /// Variant-specific operation invoked on the wrong node kind
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Subtree copy requested on a non-copyable node variant
    #[error("Node '{0}' is not copyable")]
    NotCopyable(String),

    /// Invalid data structure in the element tree
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// UTF-8 conversion error
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an "other" error from a string.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }
}

/// Result type alias for FBX operations.
pub type Result<T> = std::result::Result<T, Error>;

/// How the import layer reacts to a malformed object or attribute layer.
///
/// `Strict` aborts on the first decode error. `BestEffort` skips the
/// malformed piece, logs a warning and keeps going with the rest of the
/// document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportPolicy {
    #[default]
    Strict,
    BestEffort,
}

impl ImportPolicy {
    /// Returns true if errors should abort the import.
    #[inline]
    pub fn is_strict(self) -> bool {
        matches!(self, Self::Strict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::Truncated { needed: 8, available: 3 };
        assert!(e.to_string().contains("8"));
        assert!(e.to_string().contains("3"));

        let e = Error::ClusterOutOfBounds { index: 5, count: 2 };
        assert!(e.to_string().contains("5"));
        assert!(e.to_string().contains("2"));

        let e = Error::UnsupportedMapping("ByEdge".into());
        assert!(e.to_string().contains("ByEdge"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_policy() {
        assert!(ImportPolicy::Strict.is_strict());
        assert!(!ImportPolicy::BestEffort.is_strict());
        assert_eq!(ImportPolicy::default(), ImportPolicy::Strict);
    }
}

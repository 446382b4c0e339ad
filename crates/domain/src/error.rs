//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or extraction.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A path segment is absent from the current object.
    #[error("field {segment} not found in data")]
    FieldNotFound {
        /// The segment that could not be resolved.
        segment: String,
    },

    /// The path continues past a leaf value.
    #[error("path {path} continues past leaf field {segment}")]
    PathNotFound {
        /// The full dotted path.
        path: String,
        /// The leaf segment the path tried to descend through.
        segment: String,
    },

    /// The path is empty or ends on an object.
    #[error("path {path} does not point to a leaf node")]
    PathNotLeaf {
        /// The full dotted path.
        path: String,
    },

    /// The leaf value has a different kind than the destination.
    #[error("failed to convert value at {path} to {expected}: found {actual}")]
    TypeCoercion {
        /// The full dotted path.
        path: String,
        /// The destination kind.
        expected: String,
        /// The JSON kind that was found.
        actual: String,
    },

    /// The destination type is not one of the supported leaf kinds.
    #[error("unsupported type for destination variable: {type_name}")]
    UnsupportedDestinationType {
        /// Name of the rejected destination type.
        type_name: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;

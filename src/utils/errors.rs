//! Error types of the crate
//!
//! The library distinguishes between input that is fundamentally unusable
//! ([`SequenceError`]), invalid use of the annotation builder
//! ([`AnnotationError`]) and everything that can go wrong while reading or
//! writing files ([`ReadWriteError`]).
//!
//! Malformed annotation rows are not errors, they are dropped by the readers.
use thiserror::Error;

/// Raised when a nucleotide sequence contains characters outside of `ACGTU`
///
/// # Examples
/// ```rust
/// use gbconvert::models::sequence::validate_sequence;
/// use gbconvert::utils::errors::SequenceError;
///
/// let err = validate_sequence("ACGX").unwrap_err();
/// assert!(matches!(err, SequenceError::InvalidSequence { character: 'X', position: 3 }));
/// ```
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("invalid sequence: character '{character}' at position {position}")]
    InvalidSequence { character: char, position: usize },
}

/// Raised by [`AnnotationBuilder`](`crate::models::AnnotationBuilder`) when required
/// values are missing or inconsistent
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    #[error("annotation is missing the {0}")]
    Missing(&'static str),

    #[error("annotation start {start} is after its end {end}")]
    InvalidCoordinates { start: u32, end: u32 },

    #[error("invalid phase {0}, must be 0, 1 or 2")]
    InvalidPhase(u8),
}

/// Errors that occur while reading input files or writing output
#[derive(Debug, Error)]
pub enum ReadWriteError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sequence(#[from] SequenceError),

    #[error(transparent)]
    Annotation(#[from] AnnotationError),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("{0}")]
    Format(String),
}

impl ReadWriteError {
    pub fn format<S: Into<String>>(msg: S) -> Self {
        ReadWriteError::Format(msg.into())
    }
}

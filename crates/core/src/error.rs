//! Error types for pagination.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`ConnectionArgsError`] - Invalid combination or value of connection arguments
//! - [`CursorValidationError`] - Opaque cursor that fails to decode or validate
//! - [`OptionsError`] - Misconfigured [`crate::PagingOptions`]
//! - [`PaginationError`] - Top-level error returned by the paginators
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Connection Argument Errors
// =============================================================================

/// A client-supplied argument combination violated a pagination rule.
///
/// These are always caused by bad input and should be surfaced to the
/// client as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionArgsError {
    /// The argument is not supported by this paging strategy.
    #[error("This connection does not support the \"{0}\" argument for pagination.")]
    Unsupported(&'static str),

    /// Two arguments that cannot be combined were both supplied.
    #[error("It is not permitted to specify both \"{0}\" and \"{1}\" arguments simultaneously.")]
    MutuallyExclusive(&'static str, &'static str),

    /// A page size argument is outside `[1, max]`.
    #[error("The \"{argument}\" argument accepts a value between 1 and {max}, inclusive.")]
    OutOfRange {
        /// Offending argument (`first` or `last`).
        argument: &'static str,
        /// Maximum accepted page size.
        max: u32,
    },

    /// `page` was combined with a cursor argument.
    #[error("The \"page\" argument cannot be used together with \"last\", \"after\" or \"before\".")]
    PageWithCursor,

    /// `page` is zero or negative.
    #[error("The \"page\" argument accepts only a positive integer greater than zero.")]
    NonPositivePage,

    /// The resolved start offset cannot be represented.
    #[error("The \"{0}\" argument points past the last addressable offset.")]
    OffsetOverflow(&'static str),
}

// =============================================================================
// Cursor Errors
// =============================================================================

/// An opaque cursor failed to decode or its parameters failed validation.
///
/// Carries one entry per problem so clients replaying a stale or tampered
/// cursor learn exactly what was wrong with it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "A provided cursor value is not valid. The following problems were found:\n\n{}",
    format_problems(.problems)
)]
pub struct CursorValidationError {
    /// Individual violations, in schema field order.
    pub problems: Vec<String>,
}

impl CursorValidationError {
    pub fn new(problems: Vec<String>) -> Self {
        Self { problems }
    }

    /// Error with a single problem line.
    pub fn single(problem: impl Into<String>) -> Self {
        Self {
            problems: vec![problem.into()],
        }
    }
}

fn format_problems(problems: &[String]) -> String {
    problems
        .iter()
        .map(|p| format!("- {}", p))
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Options Errors
// =============================================================================

/// Invalid paging configuration.
///
/// Unlike the other errors this one is a server-side fault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// `max_edges_per_page` is zero.
    #[error("max_edges_per_page must be at least 1")]
    ZeroMaxEdges,

    /// `default_edges_per_page` is not within `[1, max_edges_per_page]`.
    #[error("default_edges_per_page must be between 1 and {max}, got {default}")]
    DefaultOutOfRange {
        /// Configured default.
        default: u32,
        /// Configured maximum.
        max: u32,
    },
}

// =============================================================================
// Pagination Errors
// =============================================================================

/// Top-level pagination error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaginationError {
    /// Invalid connection arguments.
    #[error(transparent)]
    Arguments(#[from] ConnectionArgsError),

    /// Invalid cursor.
    #[error(transparent)]
    Cursor(#[from] CursorValidationError),

    /// Invalid paging options.
    #[error("Invalid paging options: {0}")]
    Options(#[from] OptionsError),
}

impl PaginationError {
    /// Whether the error was caused by client input.
    ///
    /// Client errors map to a client-error response, never a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Arguments(_) | Self::Cursor(_))
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Arguments(_) => "arguments",
            Self::Cursor(_) => "cursor",
            Self::Options(_) => "options",
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for paginator operations.
pub type PaginationResult<T> = Result<T, PaginationError>;

/// Result type for cursor decoding and validation.
pub type CursorResult<T> = Result<T, CursorValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    // Test critique: le message liste chaque problème sur sa propre ligne
    #[test]
    fn test_cursor_error_lists_every_problem() {
        let err = CursorValidationError::new(vec![
            "\"offset\" is required".into(),
            "\"foo\" is not allowed".into(),
        ]);
        let msg = err.to_string();

        assert!(msg.starts_with("A provided cursor value is not valid."));
        assert!(msg.ends_with("- \"offset\" is required\n- \"foo\" is not allowed"));
    }

    #[test]
    fn test_error_conversion_chain() {
        let err: PaginationError = ConnectionArgsError::MutuallyExclusive("first", "last").into();
        assert!(err.is_client_error());
        assert_eq!(err.kind(), "arguments");
        // Le message d'origine est préservé
        assert!(err.to_string().contains("\"first\" and \"last\""));

        let err: PaginationError = CursorValidationError::single("bad").into();
        assert!(err.is_client_error());

        // Une mauvaise configuration n'est pas la faute du client
        let err: PaginationError = OptionsError::ZeroMaxEdges.into();
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_out_of_range_names_bounds() {
        let err = ConnectionArgsError::OutOfRange {
            argument: "first",
            max: 100,
        };
        assert_eq!(
            err.to_string(),
            "The \"first\" argument accepts a value between 1 and 100, inclusive."
        );
    }
}

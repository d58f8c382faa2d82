//! Mapping of pagination errors into GraphQL errors.
//!
//! Argument and cursor errors become client errors with
//! `extensions.code = "BAD_USER_INPUT"`. Cursor errors also list every
//! problem found under `extensions.problems`. Misconfigured paging options
//! are reported as internal errors.

use async_graphql::ErrorExtensions;
use folio_core::PaginationError;

pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

/// Convert a [`PaginationError`] into an `async_graphql::Error` with extensions.
pub fn pagination_error(error: PaginationError) -> async_graphql::Error {
    let code = if error.is_client_error() {
        BAD_USER_INPUT
    } else {
        INTERNAL_SERVER_ERROR
    };

    async_graphql::Error::new(error.to_string()).extend_with(|_, ext| {
        ext.set("code", code);
        if let PaginationError::Cursor(cursor) = &error {
            ext.set("problems", cursor.problems.clone());
        }
    })
}

/// `?`-friendly conversion for pagination results inside resolvers.
///
/// The blanket `From<Display>` conversion of `async_graphql::Error` would drop
/// the error code.
pub trait PaginationResultExt<T> {
    fn extend_pagination(self) -> async_graphql::Result<T>;
}

impl<T> PaginationResultExt<T> for Result<T, PaginationError> {
    fn extend_pagination(self) -> async_graphql::Result<T> {
        self.map_err(pagination_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{ConnectionArgsError, CursorValidationError, OptionsError};

    fn extensions(error: async_graphql::Error) -> serde_json::Value {
        serde_json::to_value(error.extensions).unwrap()
    }

    #[test]
    fn test_argument_error_is_bad_user_input() {
        let error = pagination_error(ConnectionArgsError::Unsupported("page").into());

        assert_eq!(
            error.message,
            r#"This connection does not support the "page" argument for pagination."#
        );
        assert_eq!(extensions(error)["code"], BAD_USER_INPUT);
    }

    #[test]
    fn test_cursor_error_lists_problems() {
        let error = pagination_error(
            CursorValidationError::new(vec![
                r#""offset" is required"#.into(),
                r#""id" is not allowed"#.into(),
            ])
            .into(),
        );

        let ext = extensions(error);
        assert_eq!(ext["code"], BAD_USER_INPUT);
        assert_eq!(
            ext["problems"],
            serde_json::json!([r#""offset" is required"#, r#""id" is not allowed"#])
        );
    }

    // Test critique: une mauvaise configuration n'est pas la faute du client
    #[test]
    fn test_options_error_is_internal() {
        let result: Result<(), PaginationError> = Err(OptionsError::ZeroMaxEdges.into());
        let error = result.extend_pagination().unwrap_err();
        assert_eq!(extensions(error)["code"], INTERNAL_SERVER_ERROR);
    }
}

//! Opaque cursor pagination.

use tracing::{debug, instrument};

use super::{PageInput, Paginator, assemble, check_page_size};
use crate::config::PagingOptions;
use crate::connection::{
    Connection, ConnectionArgs, DefaultEnvelope, Edge, EnvelopeFactory, PageDirection,
};
use crate::cursor::{Cursor, OpaqueCursor};
use crate::error::{ConnectionArgsError, CursorResult, PaginationResult};
use crate::metrics::record_rejection;

const STRATEGY: &str = "cursor";

/// Paginator for cursor-keyed connections.
///
/// Supports `first`/`after` and, when reverse order is allowed,
/// `last`/`before`. The `page` argument is never accepted. The decoded
/// cursors are handed back to the caller untouched: what their parameters
/// mean (a sort key, an identifier) is up to the data-fetch collaborator.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorPaginator<C = Cursor> {
    edges_per_page: u32,
    before_cursor: Option<C>,
    after_cursor: Option<C>,
    direction: PageDirection,
}

impl<C: OpaqueCursor> CursorPaginator<C> {
    /// Resolve arguments, decoding cursors with [`OpaqueCursor::from_string`].
    pub fn from_args(args: &ConnectionArgs, options: &PagingOptions) -> PaginationResult<Self> {
        Self::from_args_with(args, options, C::from_string)
    }

    /// Resolve arguments with a connection-specific cursor decoder.
    ///
    /// ```
    /// use folio_core::cursor::{Cursor, CursorSchema, FieldRule};
    /// use folio_core::{ConnectionArgs, CursorPaginator, PagingOptions};
    ///
    /// let schema = CursorSchema::new().field(FieldRule::string("id").required());
    /// let paginator = CursorPaginator::from_args_with(
    ///     &ConnectionArgs::first(10),
    ///     &PagingOptions::default(),
    ///     |s| Cursor::from_string_with_schema(s, &schema),
    /// )
    /// .unwrap();
    /// assert_eq!(paginator.edges_per_page(), 10);
    /// ```
    #[instrument(level = "debug", skip_all, fields(strategy = STRATEGY))]
    pub fn from_args_with<D>(
        args: &ConnectionArgs,
        options: &PagingOptions,
        decode: D,
    ) -> PaginationResult<Self>
    where
        D: Fn(&str) -> CursorResult<C>,
    {
        let result = Self::resolve(args, options, decode);
        match &result {
            Ok(paginator) => debug!(
                edges_per_page = paginator.edges_per_page,
                after = paginator.after_cursor.is_some(),
                before = paginator.before_cursor.is_some(),
                "Resolved cursor pagination"
            ),
            Err(e) => {
                debug!(error = %e, "Rejected cursor pagination arguments");
                record_rejection(STRATEGY, e);
            }
        }
        result
    }

    fn resolve<D>(args: &ConnectionArgs, options: &PagingOptions, decode: D) -> PaginationResult<Self>
    where
        D: Fn(&str) -> CursorResult<C>,
    {
        options.validate()?;

        if args.page.is_some() {
            return Err(ConnectionArgsError::Unsupported("page").into());
        }
        if args.first.is_some() && args.last.is_some() {
            return Err(ConnectionArgsError::MutuallyExclusive("first", "last").into());
        }

        let mut edges_per_page = options.default_edges_per_page;

        if let Some(first) = args.first {
            edges_per_page = check_page_size("first", first, options.max_edges_per_page)?;
        }

        if let Some(last) = args.last {
            if !options.allow_reverse_order {
                return Err(ConnectionArgsError::Unsupported("last").into());
            }
            edges_per_page = check_page_size("last", last, options.max_edges_per_page)?;
        }

        if args.after.is_some() && args.before.is_some() {
            return Err(ConnectionArgsError::MutuallyExclusive("after", "before").into());
        }

        let before_cursor = args.before.as_deref().map(&decode).transpose()?;
        let after_cursor = args.after.as_deref().map(&decode).transpose()?;

        let direction = if args.last.is_some() || before_cursor.is_some() {
            PageDirection::Backward
        } else {
            PageDirection::Forward
        };

        Ok(Self {
            edges_per_page,
            before_cursor,
            after_cursor,
            direction,
        })
    }

    pub fn edges_per_page(&self) -> u32 {
        self.edges_per_page
    }

    pub fn before_cursor(&self) -> Option<&C> {
        self.before_cursor.as_ref()
    }

    pub fn after_cursor(&self) -> Option<&C> {
        self.after_cursor.as_ref()
    }

    /// Which way the collaborator should read from the cursor.
    pub fn direction(&self) -> PageDirection {
        self.direction
    }

    /// Build a connection with the default edge and connection shapes.
    ///
    /// `create_cursor` derives each node's cursor, usually from a stable
    /// business identifier.
    pub fn build<N, X>(
        &self,
        input: PageInput<N, X>,
        create_cursor: impl FnMut(&N, usize) -> C,
    ) -> Connection<Edge<N, X>> {
        self.build_with(input, create_cursor, DefaultEnvelope)
    }

    /// Build a connection through a custom [`EnvelopeFactory`].
    pub fn build_with<N, X, F>(
        &self,
        input: PageInput<N, X>,
        mut create_cursor: impl FnMut(&N, usize) -> C,
        envelope: F,
    ) -> F::Connection
    where
        F: EnvelopeFactory<N, X>,
    {
        assemble(
            self,
            input,
            |node, index| create_cursor(node, index).encode(),
            envelope,
        )
    }
}

impl<C> Paginator for CursorPaginator<C> {
    fn strategy(&self) -> &'static str {
        STRATEGY
    }

    fn edges_per_page(&self) -> u32 {
        self.edges_per_page
    }

    /// Without an explicit value there is a next page only if the total
    /// exceeds what this page holds.
    fn default_has_next_page(&self, total_edges: Option<u64>, edge_count: usize) -> bool {
        total_edges.is_some_and(|total| total > edge_count as u64)
    }

    fn default_has_previous_page(&self) -> bool {
        self.before_cursor.is_some() || self.after_cursor.is_some()
    }
}

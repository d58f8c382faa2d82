//! Numeric offset pagination.

use tracing::{debug, instrument};

use super::{PageInput, Paginator, assemble, check_page_size};
use crate::config::PagingOptions;
use crate::connection::{Connection, ConnectionArgs, DefaultEnvelope, Edge, EnvelopeFactory};
use crate::cursor::{OffsetCursor, OpaqueCursor};
use crate::error::{ConnectionArgsError, PaginationResult};
use crate::metrics::record_rejection;

const STRATEGY: &str = "offset";

/// Paginator for offset-addressed connections.
///
/// Accepts `first`, `page` and `after` (an [`OffsetCursor`]). `last` and
/// `before` are rejected: reading from the end would need the total before
/// fetching, which this strategy does not require.
///
/// The collaborator fetches [`Self::edges_per_page`] records starting at
/// [`Self::start_offset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPaginator {
    edges_per_page: u32,
    start_offset: u64,
    after_cursor: Option<OffsetCursor>,
}

impl OffsetPaginator {
    #[instrument(level = "debug", skip_all, fields(strategy = STRATEGY))]
    pub fn from_args(args: &ConnectionArgs, options: &PagingOptions) -> PaginationResult<Self> {
        let result = Self::resolve(args, options);
        match &result {
            Ok(paginator) => debug!(
                edges_per_page = paginator.edges_per_page,
                start_offset = paginator.start_offset,
                "Resolved offset pagination"
            ),
            Err(e) => {
                debug!(error = %e, "Rejected offset pagination arguments");
                record_rejection(STRATEGY, e);
            }
        }
        result
    }

    fn resolve(args: &ConnectionArgs, options: &PagingOptions) -> PaginationResult<Self> {
        options.validate()?;

        if args.last.is_some() {
            return Err(ConnectionArgsError::Unsupported("last").into());
        }
        if args.before.is_some() {
            return Err(ConnectionArgsError::Unsupported("before").into());
        }

        let mut edges_per_page = options.default_edges_per_page;
        let mut start_offset = 0;

        if let Some(first) = args.first {
            edges_per_page = check_page_size("first", first, options.max_edges_per_page)?;
            start_offset = 0;
        }

        if let Some(page) = args.page {
            if args.after.is_some() {
                return Err(ConnectionArgsError::PageWithCursor.into());
            }
            if page < 1 {
                return Err(ConnectionArgsError::NonPositivePage.into());
            }
            start_offset = u64::from(edges_per_page)
                .checked_mul((page - 1) as u64)
                .filter(|offset| *offset <= OffsetCursor::MAX_OFFSET)
                .ok_or(ConnectionArgsError::OffsetOverflow("page"))?;
        }

        let after_cursor = args
            .after
            .as_deref()
            .map(OffsetCursor::from_string)
            .transpose()?;

        if let Some(cursor) = &after_cursor {
            start_offset = cursor
                .offset
                .checked_add(1)
                .filter(|offset| *offset <= OffsetCursor::MAX_OFFSET)
                .ok_or(ConnectionArgsError::OffsetOverflow("after"))?;
        }

        Ok(Self {
            edges_per_page,
            start_offset,
            after_cursor,
        })
    }

    pub fn edges_per_page(&self) -> u32 {
        self.edges_per_page
    }

    /// Offset of the first record of this page.
    pub fn start_offset(&self) -> u64 {
        self.start_offset
    }

    pub fn after_cursor(&self) -> Option<&OffsetCursor> {
        self.after_cursor.as_ref()
    }

    /// Cursor of the record at `index` within this page.
    pub fn cursor_at(&self, index: usize) -> OffsetCursor {
        OffsetCursor::new(self.start_offset.saturating_add(index as u64))
    }

    /// Build a connection with offset cursors and the default shapes.
    pub fn build<N, X>(&self, input: PageInput<N, X>) -> Connection<Edge<N, X>> {
        self.build_with(input, |_, index| self.cursor_at(index), DefaultEnvelope)
    }

    /// Build a connection with a custom cursor function and [`EnvelopeFactory`].
    pub fn build_with<N, X, F>(
        &self,
        input: PageInput<N, X>,
        mut create_cursor: impl FnMut(&N, usize) -> OffsetCursor,
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

impl Paginator for OffsetPaginator {
    fn strategy(&self) -> &'static str {
        STRATEGY
    }

    fn edges_per_page(&self) -> u32 {
        self.edges_per_page
    }

    fn default_has_next_page(&self, total_edges: Option<u64>, edge_count: usize) -> bool {
        total_edges.is_some_and(|total| total > self.start_offset.saturating_add(edge_count as u64))
    }

    fn default_has_previous_page(&self) -> bool {
        self.start_offset > 0
    }
}

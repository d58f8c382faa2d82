//! GraphQL adapter for Folio connections.
//!
//! Provides the `PageInfo` object type, a macro generating Edge/Connection
//! object types from core envelopes, and the mapping of pagination errors
//! into GraphQL errors.
//!
//! # Exposing a Connection
//!
//! ```ignore
//! use folio_core::{ConnectionArgs, OffsetPaginator, PageInput, PagingOptions};
//! use folio_graphql::{define_connection, PaginationResultExt};
//!
//! define_connection!(Track, catalog::Track, TrackEdge, TrackConnection);
//!
//! async fn tracks(&self, ctx: &Context<'_>, first: Option<i32>, page: Option<i32>) -> Result<TrackConnection> {
//!     let args = ConnectionArgs { first: first.map(i64::from), page: page.map(i64::from), ..Default::default() };
//!     let paginator = OffsetPaginator::from_args(&args, ctx.data()?).extend_pagination()?;
//!     let (tracks, total) = catalog.list(paginator.start_offset(), paginator.edges_per_page()).await?;
//!     Ok(paginator.build(PageInput::from_nodes(tracks).total_edges(total)).into())
//! }
//! ```

mod error;
mod types;

pub use error::{BAD_USER_INPUT, INTERNAL_SERVER_ERROR, PaginationResultExt, pagination_error};
pub use types::PageInfo;

#[doc(hidden)]
pub use folio_core as __core;

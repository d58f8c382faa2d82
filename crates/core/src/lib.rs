//! Core pagination layer for Folio.
//!
//! This crate resolves client pagination arguments and assembles pages in
//! the Relay connection shape. It has no knowledge of where records come
//! from: a data-fetch collaborator reads the resolved page size and
//! position, fetches records, and hands them back for assembly.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      folio (binary)                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      folio-graphql                          │
//! │                 (PageInfo, connections)                     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                      folio-core  ← YOU ARE HERE             │
//! │           (cursors, paginators, connection shapes)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`cursor`] - Opaque cursor codec and typed cursors
//! - [`connection`] - Arguments, edges, page info and envelope factories
//! - [`paginator`] - Argument resolution and page assembly
//! - [`config`] - Paging options
//! - [`error`] - Error types
//! - [`metrics`] - Metrics definitions
//!
//! # Key Concepts
//!
//! ## Cursors
//!
//! A cursor is a base64-encoded query string of key/value pairs. Clients
//! treat it as opaque. Decoding never trusts the payload: typed cursors
//! validate it against a [`cursor::CursorSchema`] and report every problem
//! at once.
//!
//! ## Strategies
//!
//! - [`CursorPaginator`] - keyset pagination with `first`/`after` and
//!   `last`/`before`
//! - [`OffsetPaginator`] - offset pagination with `first`, `page` and `after`
//!
//! ## Request Lifecycle
//!
//! 1. Resolve [`ConnectionArgs`] against [`PagingOptions`] (fails fast)
//! 2. Fetch records using the resolved page size and position
//! 3. Wrap them in a [`PageInput`] with an optional total count
//! 4. Build the [`Connection`], optionally through an [`EnvelopeFactory`]
//!
//! ```
//! use folio_core::{ConnectionArgs, OffsetPaginator, PageInput, PagingOptions};
//!
//! let args = ConnectionArgs::first(5).with_page(2);
//! let paginator = OffsetPaginator::from_args(&args, &PagingOptions::default()).unwrap();
//! assert_eq!(paginator.start_offset(), 5);
//!
//! let connection = paginator.build(PageInput::from_nodes(5..10).total_edges(12));
//! assert_eq!(connection.page_info.start_cursor.as_deref(), Some("b2Zmc2V0PTU="));
//! assert!(connection.page_info.has_previous_page);
//! ```

pub mod config;
pub mod connection;
pub mod cursor;
pub mod error;
pub mod metrics;
pub mod paginator;

pub use config::PagingOptions;
pub use connection::{
    Connection, ConnectionArgs, ConnectionEdge, DefaultEnvelope, Edge, EnvelopeFactory,
    FnEnvelope, PageDirection, PageInfo, PartialEdge, envelope_fn,
};
pub use cursor::{Cursor, OffsetCursor, OpaqueCursor};
pub use error::{
    ConnectionArgsError, CursorResult, CursorValidationError, OptionsError, PaginationError,
    PaginationResult,
};
pub use paginator::{CursorPaginator, OffsetPaginator, PageInput, Paginator};

//! Argument resolution and page assembly.
//!
//! Two strategies share one contract:
//!
//! - [`CursorPaginator`] - opaque cursors keyed on the data (`first`/`after`,
//!   `last`/`before`). The data-fetch collaborator interprets the decoded
//!   cursor's fields itself.
//! - [`OffsetPaginator`] - numeric offsets (`first`, `page`, `after`). The
//!   collaborator fetches `edges_per_page` records starting at
//!   `start_offset`.
//!
//! Both resolve [`crate::ConnectionArgs`] once per request, failing fast on
//! invalid input, and then assemble a page from the fetched records.
//!
//! # Flow
//!
//! 1. Resolve arguments into a paginator (`from_args`)
//! 2. Fetch records using the resolved page size and position
//! 3. Wrap them in a [`PageInput`], optionally with a total count
//! 4. `build` the connection

mod cursor;
mod offset;

pub use cursor::CursorPaginator;
pub use offset::OffsetPaginator;

use tracing::trace;

use crate::connection::{ConnectionEdge, Edge, EnvelopeFactory, PageInfo, PartialEdge};
use crate::error::ConnectionArgsError;
use crate::metrics::record_page_built;

// =============================================================================
// Shared Contract
// =============================================================================

/// Resolved paging state shared by both strategies.
pub trait Paginator {
    /// Strategy label used in logs and metrics.
    fn strategy(&self) -> &'static str;

    /// Page size, always within `[1, max_edges_per_page]`.
    fn edges_per_page(&self) -> u32;

    /// `has_next_page` when the caller gives no explicit value.
    fn default_has_next_page(&self, total_edges: Option<u64>, edge_count: usize) -> bool;

    /// `has_previous_page` when the caller gives no explicit value.
    fn default_has_previous_page(&self) -> bool;
}

/// Records fetched for one page plus optional page-level overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct PageInput<N, X = ()> {
    edges: Vec<PartialEdge<N, X>>,
    total_edges: Option<u64>,
    has_next_page: Option<bool>,
    has_previous_page: Option<bool>,
}

impl<N> PageInput<N> {
    /// Page made of raw records.
    pub fn from_nodes(nodes: impl IntoIterator<Item = N>) -> Self {
        Self::from_edges(nodes.into_iter().map(PartialEdge::new).collect())
    }
}

impl<N, X> PageInput<N, X> {
    /// Page made of pre-built edges, possibly carrying cursors and extra fields.
    pub fn from_edges(edges: Vec<PartialEdge<N, X>>) -> Self {
        Self {
            edges,
            total_edges: None,
            has_next_page: None,
            has_previous_page: None,
        }
    }

    pub fn total_edges(mut self, total: u64) -> Self {
        self.total_edges = Some(total);
        self
    }

    /// Override the computed `has_next_page`.
    ///
    /// Required for cursor pagination when the total is unknown.
    pub fn has_next_page(mut self, value: bool) -> Self {
        self.has_next_page = Some(value);
        self
    }

    /// Override the computed `has_previous_page`.
    pub fn has_previous_page(mut self, value: bool) -> Self {
        self.has_previous_page = Some(value);
        self
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

// =============================================================================
// Assembly
// =============================================================================

/// Build edges and page info for one page.
///
/// `create_cursor` receives each node with its zero-based position in the
/// batch; a cursor already present on a partial edge takes precedence.
fn assemble<P, N, X, F>(
    paginator: &P,
    input: PageInput<N, X>,
    mut create_cursor: impl FnMut(&N, usize) -> String,
    mut envelope: F,
) -> F::Connection
where
    P: Paginator,
    F: EnvelopeFactory<N, X>,
{
    let PageInput {
        edges: partials,
        total_edges,
        has_next_page,
        has_previous_page,
    } = input;

    let edges: Vec<F::Edge> = partials
        .into_iter()
        .enumerate()
        .map(|(index, partial)| {
            let cursor = match partial.cursor {
                Some(cursor) => cursor,
                None => create_cursor(&partial.node, index),
            };
            envelope.create_edge(Edge {
                node: partial.node,
                cursor,
                extra: partial.extra,
            })
        })
        .collect();

    let page_info = PageInfo {
        has_next_page: has_next_page
            .unwrap_or_else(|| paginator.default_has_next_page(total_edges, edges.len())),
        has_previous_page: has_previous_page
            .unwrap_or_else(|| paginator.default_has_previous_page()),
        start_cursor: edges.first().map(|e| e.cursor().to_string()),
        end_cursor: edges.last().map(|e| e.cursor().to_string()),
        total_edges,
    };

    trace!(
        strategy = paginator.strategy(),
        edges = edges.len(),
        has_next_page = page_info.has_next_page,
        has_previous_page = page_info.has_previous_page,
        "Assembled page"
    );
    record_page_built(paginator.strategy(), edges.len());

    envelope.create_connection(edges, page_info)
}

/// Validate a `first` / `last` value against `[1, max]`.
fn check_page_size(argument: &'static str, value: i64, max: u32) -> Result<u32, ConnectionArgsError> {
    if value < 1 || value > i64::from(max) {
        return Err(ConnectionArgsError::OutOfRange { argument, max });
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::{Connection, ConnectionArgs, envelope_fn};
    use crate::cursor::{Cursor, OpaqueCursor};
    use crate::PagingOptions;

    #[test]
    fn test_check_page_size_bounds() {
        assert_eq!(check_page_size("first", 1, 100), Ok(1));
        assert_eq!(check_page_size("first", 100, 100), Ok(100));
        assert!(check_page_size("first", 0, 100).is_err());
        assert!(check_page_size("last", 101, 100).is_err());
        assert!(check_page_size("last", i64::MIN, 100).is_err());
    }

    // Union de types de noeuds: seul l'identifiant sert au curseur
    #[derive(Debug, Clone, PartialEq)]
    enum Bar {
        Fruit { id: String, sugars: u32 },
        Nut { id: String, protein: u32 },
    }

    impl Bar {
        fn id(&self) -> &str {
            match self {
                Bar::Fruit { id, .. } | Bar::Nut { id, .. } => id,
            }
        }
    }

    #[derive(Debug, PartialEq)]
    struct BarEdge {
        node: Bar,
        cursor: String,
        custom_edge_field: Option<u32>,
    }

    impl ConnectionEdge for BarEdge {
        fn cursor(&self) -> &str {
            &self.cursor
        }
    }

    #[test]
    fn test_union_nodes_with_custom_envelope() {
        let paginator: CursorPaginator =
            CursorPaginator::from_args(&ConnectionArgs::first(2), &PagingOptions::default())
                .unwrap();

        let input = PageInput::from_edges(vec![
            PartialEdge::new(Bar::Fruit {
                id: "fruit1".into(),
                sugars: 4,
            })
            .with_extra(Some(7)),
            PartialEdge::new(Bar::Nut {
                id: "nut1".into(),
                protein: 9,
            })
            .with_cursor("preset")
            .with_extra(None),
        ])
        .total_edges(3);

        let connection = paginator.build_with(
            input,
            |node: &Bar, _| Cursor::new([("id", node.id())]),
            envelope_fn(
                |edge: Edge<Bar, Option<u32>>| BarEdge {
                    node: edge.node,
                    cursor: edge.cursor,
                    custom_edge_field: edge.extra,
                },
                |edges: Vec<BarEdge>, page_info: PageInfo| {
                    Connection::new(edges, page_info).with_extra(42u32)
                },
            ),
        );

        assert_eq!(connection.extra, 42);
        assert!(matches!(connection.edges[0].node, Bar::Fruit { sugars: 4, .. }));
        assert!(matches!(connection.edges[1].node, Bar::Nut { protein: 9, .. }));
        assert_eq!(connection.edges[0].custom_edge_field, Some(7));
        assert_eq!(
            connection.edges[0].cursor,
            Cursor::new([("id", "fruit1")]).encode()
        );
        // Le curseur explicite gagne sur le calcul
        assert_eq!(connection.edges[1].cursor, "preset");
        assert_eq!(connection.page_info.end_cursor.as_deref(), Some("preset"));
        assert!(connection.page_info.has_next_page);
    }

    #[test]
    fn test_explicit_overrides_win() {
        let paginator = OffsetPaginator::from_args(
            &ConnectionArgs::first(2).with_page(3),
            &PagingOptions::default(),
        )
        .unwrap();

        let connection = paginator.build(
            PageInput::from_nodes(["a", "b"])
                .total_edges(100)
                .has_next_page(false)
                .has_previous_page(false),
        );

        assert!(!connection.page_info.has_next_page);
        assert!(!connection.page_info.has_previous_page);
        assert_eq!(connection.page_info.total_edges, Some(100));
    }
}

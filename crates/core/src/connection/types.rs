//! Connection envelope shapes.
//!
//! These types implement the Relay connection pattern: a page of edges,
//! each pairing a node with its opaque cursor, plus page metadata. Edges and
//! connections carry a caller-defined `extra` payload that is flattened into
//! the serialized object.

use serde::{Deserialize, Serialize};

/// Information about the current page in a paginated result.
///
/// `start_cursor` and `end_cursor` are `None` iff the page has no edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Whether there are more items after this page.
    pub has_next_page: bool,
    /// Whether there are items before this page.
    pub has_previous_page: bool,
    /// Cursor of the first item in this page.
    pub start_cursor: Option<String>,
    /// Cursor of the last item in this page.
    pub end_cursor: Option<String>,
    /// Total number of items, when the caller knows it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_edges: Option<u64>,
}

/// A single item in a paginated result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge<N, X = ()> {
    /// The actual item.
    pub node: N,
    /// Encoded cursor for this item.
    pub cursor: String,
    /// Caller-defined edge fields.
    #[serde(flatten)]
    pub extra: X,
}

impl<N> Edge<N> {
    pub fn new(node: N, cursor: impl Into<String>) -> Self {
        Self {
            node,
            cursor: cursor.into(),
            extra: (),
        }
    }
}

/// Edge input handed to the page assembler.
///
/// A preset `cursor` is kept as-is instead of being computed.
#[derive(Debug, Clone, PartialEq)]
pub struct PartialEdge<N, X = ()> {
    pub node: N,
    pub cursor: Option<String>,
    pub extra: X,
}

impl<N> PartialEdge<N> {
    pub fn new(node: N) -> Self {
        Self {
            node,
            cursor: None,
            extra: (),
        }
    }
}

impl<N, X> PartialEdge<N, X> {
    pub fn with_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    pub fn with_extra<Y>(self, extra: Y) -> PartialEdge<N, Y> {
        PartialEdge {
            node: self.node,
            cursor: self.cursor,
            extra,
        }
    }
}

/// Anything usable as an edge of a connection.
pub trait ConnectionEdge {
    fn cursor(&self) -> &str;
}

impl<N, X> ConnectionEdge for Edge<N, X> {
    fn cursor(&self) -> &str {
        &self.cursor
    }
}

/// Paginated result set with edges and page info.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<E, X = ()> {
    /// List of edges (node + cursor pairs).
    pub edges: Vec<E>,
    /// Information about the current page.
    pub page_info: PageInfo,
    /// Caller-defined connection fields.
    #[serde(flatten)]
    pub extra: X,
}

impl<E> Connection<E> {
    pub fn new(edges: Vec<E>, page_info: PageInfo) -> Self {
        Self {
            edges,
            page_info,
            extra: (),
        }
    }
}

impl<E, X> Connection<E, X> {
    pub fn with_extra<Y>(self, extra: Y) -> Connection<E, Y> {
        Connection {
            edges: self.edges,
            page_info: self.page_info,
            extra,
        }
    }
}

/// Direction in which the data-fetch collaborator should walk the ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PageDirection {
    /// `first` / `after`: items following the cursor.
    #[default]
    Forward,
    /// `last` / `before`: items preceding the cursor.
    Backward,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Weight {
        weight: u32,
    }

    #[test]
    fn test_serializes_relay_shape() {
        let connection = Connection::new(
            vec![Edge::new("a", "c1")],
            PageInfo {
                has_next_page: true,
                start_cursor: Some("c1".into()),
                end_cursor: Some("c1".into()),
                ..Default::default()
            },
        );

        assert_eq!(
            serde_json::to_value(&connection).unwrap(),
            json!({
                "edges": [{"node": "a", "cursor": "c1"}],
                "pageInfo": {
                    "hasNextPage": true,
                    "hasPreviousPage": false,
                    "startCursor": "c1",
                    "endCursor": "c1"
                }
            })
        );
    }

    // Les champs additionnels sont aplatis dans l'objet sérialisé
    #[test]
    fn test_extra_fields_are_flattened() {
        let edge = Edge {
            node: 1,
            cursor: "c".into(),
            extra: Weight { weight: 7 },
        };
        let connection = Connection::new(vec![edge], PageInfo::default())
            .with_extra(Weight { weight: 9 });

        let value = serde_json::to_value(&connection).unwrap();
        assert_eq!(value["weight"], 9);
        assert_eq!(value["edges"][0]["weight"], 7);
    }

    #[test]
    fn test_partial_edge_builders() {
        let edge = PartialEdge::new("n").with_cursor("c").with_extra(3u8);
        assert_eq!(edge.cursor.as_deref(), Some("c"));
        assert_eq!(edge.extra, 3);
    }
}

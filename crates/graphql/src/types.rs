//! GraphQL object types for connections.

// -----------------------------------------------------------------------------
// Connection Types (Relay-style pagination)
// -----------------------------------------------------------------------------

#[derive(async_graphql::SimpleObject, Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    pub has_previous_page: bool,
    pub start_cursor: Option<String>,
    pub end_cursor: Option<String>,
    /// Total number of edges, when the resolver knows it.
    pub total_edges: Option<i64>,
}

impl From<folio_core::PageInfo> for PageInfo {
    fn from(info: folio_core::PageInfo) -> Self {
        Self {
            has_next_page: info.has_next_page,
            has_previous_page: info.has_previous_page,
            start_cursor: info.start_cursor,
            end_cursor: info.end_cursor,
            total_edges: info
                .total_edges
                .map(|total| i64::try_from(total).unwrap_or(i64::MAX)),
        }
    }
}

/// Generate Relay-style connection types (Edge + Connection) with From impl.
///
/// `$node` is the GraphQL node type and must implement `From<$core_node>`.
/// The calling crate needs `async-graphql` as a dependency.
///
/// ```ignore
/// define_connection!(Track, catalog::Track, TrackEdge, TrackConnection);
///
/// let connection: TrackConnection = paginator.build(input).into();
/// ```
///
/// Extra edge and connection fields are declared as two field lists. The
/// macro also generates the plain structs carried as `extra` by the core
/// envelopes, and the conversion copies each field onto the object type.
///
/// ```ignore
/// define_connection!(
///     Track, catalog::Track, TrackEdge, TrackConnection,
///     edge_fields TrackEdgeFields { play_count: Option<i32> },
///     connection_fields TrackConnectionFields { total_duration: Option<i64> },
/// );
///
/// let input = PageInput::from_edges(
///     tracks.into_iter().map(|t| PartialEdge::new(t).with_extra(TrackEdgeFields { play_count: None })).collect(),
/// );
/// let connection: TrackConnection = paginator
///     .build_with(input, |_, i| paginator.cursor_at(i), envelope_fn(
///         |edge| edge,
///         |edges, page_info| Connection::new(edges, page_info)
///             .with_extra(TrackConnectionFields { total_duration: None }),
///     ))
///     .into();
/// ```
#[macro_export]
macro_rules! define_connection {
    (
        $node:ty, $core_node:ty, $edge:ident, $connection:ident,
        edge_fields $edge_fields:ident { $($ef:ident : $et:ty),* $(,)? },
        connection_fields $connection_fields:ident { $($cf:ident : $ct:ty),* $(,)? } $(,)?
    ) => {
        #[derive(Debug, Clone)]
        pub struct $edge_fields {
            $(pub $ef: $et,)*
        }

        #[derive(Debug, Clone)]
        pub struct $connection_fields {
            $(pub $cf: $ct,)*
        }

        #[derive(async_graphql::SimpleObject)]
        pub struct $edge {
            pub node: $node,
            pub cursor: String,
            $(pub $ef: $et,)*
        }

        #[derive(async_graphql::SimpleObject)]
        pub struct $connection {
            pub edges: Vec<$edge>,
            pub page_info: $crate::PageInfo,
            $(pub $cf: $ct,)*
        }

        impl
            From<
                $crate::__core::Connection<
                    $crate::__core::Edge<$core_node, $edge_fields>,
                    $connection_fields,
                >,
            > for $connection
        {
            fn from(
                conn: $crate::__core::Connection<
                    $crate::__core::Edge<$core_node, $edge_fields>,
                    $connection_fields,
                >,
            ) -> Self {
                Self {
                    edges: conn
                        .edges
                        .into_iter()
                        .map(|e| $edge {
                            node: <$node>::from(e.node),
                            cursor: e.cursor,
                            $($ef: e.extra.$ef,)*
                        })
                        .collect(),
                    page_info: $crate::PageInfo::from(conn.page_info),
                    $($cf: conn.extra.$cf,)*
                }
            }
        }
    };
    ($node:ty, $core_node:ty, $edge:ident, $connection:ident) => {
        #[derive(async_graphql::SimpleObject)]
        pub struct $edge {
            pub node: $node,
            pub cursor: String,
        }

        #[derive(async_graphql::SimpleObject)]
        pub struct $connection {
            pub edges: Vec<$edge>,
            pub page_info: $crate::PageInfo,
        }

        impl From<$crate::__core::Connection<$crate::__core::Edge<$core_node>>> for $connection {
            fn from(conn: $crate::__core::Connection<$crate::__core::Edge<$core_node>>) -> Self {
                Self {
                    edges: conn
                        .edges
                        .into_iter()
                        .map(|e| $edge {
                            node: <$node>::from(e.node),
                            cursor: e.cursor,
                        })
                        .collect(),
                    page_info: $crate::PageInfo::from(conn.page_info),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_info_conversion() {
        let info = PageInfo::from(folio_core::PageInfo {
            has_next_page: true,
            has_previous_page: false,
            start_cursor: Some("a".into()),
            end_cursor: Some("b".into()),
            total_edges: Some(12),
        });

        assert!(info.has_next_page);
        assert_eq!(info.start_cursor.as_deref(), Some("a"));
        assert_eq!(info.total_edges, Some(12));
    }

    // Un total hors de l'intervalle GraphQL Int est saturé, pas tronqué
    #[test]
    fn test_total_edges_saturates() {
        let info = PageInfo::from(folio_core::PageInfo {
            total_edges: Some(u64::MAX),
            ..Default::default()
        });
        assert_eq!(info.total_edges, Some(i64::MAX));
    }
}

//! Factories turning assembled edges and page info into caller types.
//!
//! The page assembler never constructs envelopes directly. It goes through an
//! [`EnvelopeFactory`], so a connection can return its own edge and
//! connection types (with extra fields) without re-implementing the paging
//! rules.

use crate::connection::types::{Connection, ConnectionEdge, Edge, PageInfo};

/// Builds edges and the connection for one page.
pub trait EnvelopeFactory<N, X> {
    type Edge: ConnectionEdge;
    type Connection;

    fn create_edge(&mut self, edge: Edge<N, X>) -> Self::Edge;

    fn create_connection(&mut self, edges: Vec<Self::Edge>, page_info: PageInfo)
        -> Self::Connection;
}

/// Produces the built-in [`Edge`] and [`Connection`] shapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEnvelope;

impl<N, X> EnvelopeFactory<N, X> for DefaultEnvelope {
    type Edge = Edge<N, X>;
    type Connection = Connection<Edge<N, X>>;

    fn create_edge(&mut self, edge: Edge<N, X>) -> Self::Edge {
        edge
    }

    fn create_connection(&mut self, edges: Vec<Self::Edge>, page_info: PageInfo) -> Self::Connection {
        Connection::new(edges, page_info)
    }
}

/// Factory backed by two closures. See [`envelope_fn`].
#[derive(Debug, Clone, Copy)]
pub struct FnEnvelope<FE, FC> {
    create_edge: FE,
    create_connection: FC,
}

/// Build an [`EnvelopeFactory`] from an edge closure and a connection closure.
///
/// ```
/// use folio_core::{envelope_fn, Connection, Edge, PageInfo};
///
/// let _factory = envelope_fn(
///     |edge: Edge<u32>| edge,
///     |edges: Vec<Edge<u32>>, page_info: PageInfo| {
///         let count = edges.len();
///         Connection::new(edges, page_info).with_extra(count)
///     },
/// );
/// ```
pub fn envelope_fn<FE, FC>(create_edge: FE, create_connection: FC) -> FnEnvelope<FE, FC> {
    FnEnvelope {
        create_edge,
        create_connection,
    }
}

impl<N, X, E, C, FE, FC> EnvelopeFactory<N, X> for FnEnvelope<FE, FC>
where
    E: ConnectionEdge,
    FE: FnMut(Edge<N, X>) -> E,
    FC: FnMut(Vec<E>, PageInfo) -> C,
{
    type Edge = E;
    type Connection = C;

    fn create_edge(&mut self, edge: Edge<N, X>) -> E {
        (self.create_edge)(edge)
    }

    fn create_connection(&mut self, edges: Vec<E>, page_info: PageInfo) -> C {
        (self.create_connection)(edges, page_info)
    }
}

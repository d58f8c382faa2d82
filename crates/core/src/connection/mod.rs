//! Relay-style connection types.
//!
//! Arguments coming in from the client, the envelope shapes going back out,
//! and the factories that let a connection substitute its own shapes.

mod args;
mod envelope;
mod types;

pub use args::*;
pub use envelope::*;
pub use types::*;

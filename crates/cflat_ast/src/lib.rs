//! cflat_ast: AST node definitions for the cflat front end.
//!
//! Nodes are tagged unions allocated in a bump arena; parents reference
//! children through arena references, so the whole tree borrows from one
//! arena and is freed with it.

pub mod node;

pub use node::{Ident, IdentContext, NodeData, NodeId, NodeList, Program};

//! cflat_resolver: Name resolution for the cflat front end.
//!
//! Walks the AST, maintains nested lexical scopes, binds every identifier
//! use to its declaration, and resolves struct field access through a
//! registry of struct blueprints. Semantic violations are collected as
//! diagnostics; the pass never aborts early.

mod registry;
mod resolver;
mod scope;
mod symbol;

pub use registry::StructRegistry;
pub use resolver::{Resolution, Resolver};
pub use scope::{ScopeError, ScopeStack};
pub use symbol::{Symbol, SymbolArena, SymbolId, SymbolKind, ValueType};

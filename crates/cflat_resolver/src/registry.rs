//! The struct registry: a directory of struct blueprints.
//!
//! A scope stack used with exactly one permanent frame, independent of
//! lexical nesting. Queried by struct-typed declarations and dot-access
//! chains. Owned by the resolver and created fresh per pass; never global.

use crate::scope::{ScopeError, ScopeStack};
use crate::symbol::SymbolId;
use cflat_core::intern::InternedString;

#[derive(Debug, Default)]
pub struct StructRegistry {
    table: ScopeStack,
}

impl StructRegistry {
    pub fn new() -> Self {
        Self {
            table: ScopeStack::new(),
        }
    }

    /// Register a blueprint under its struct name. A second struct with
    /// the same name yields `DuplicateName`; the caller reports it as a
    /// semantic error and the pass continues.
    pub fn declare(
        &mut self,
        name: InternedString,
        blueprint: SymbolId,
    ) -> Result<(), ScopeError> {
        self.table.declare(name, blueprint)
    }

    /// Look up a struct name.
    pub fn lookup(&self, name: InternedString) -> Result<Option<SymbolId>, ScopeError> {
        self.table.lookup_global(name)
    }
}

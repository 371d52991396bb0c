//! The scope stack: a stack of flat name-to-symbol frames.
//!
//! Each frame maps names declared in one lexical block. Shadowing works by
//! pushing a frame; duplicate detection only consults the topmost frame.

use crate::symbol::{SymbolArena, SymbolId};
use cflat_core::collections::OrderedMap;
use cflat_core::intern::{InternedString, StringInterner};
use thiserror::Error;

/// Failures of individual scope operations.
///
/// `EmptyStack` signals a broken traversal invariant, not a language error;
/// the resolver logs it and skips the operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("name already declared in the innermost scope")]
    DuplicateName,
    #[error("scope stack has no frames")]
    EmptyStack,
}

/// One lexical block's declarations, in insertion order.
#[derive(Debug, Default)]
struct ScopeFrame {
    entries: OrderedMap<InternedString, SymbolId>,
}

/// A stack of scope frames, innermost on top.
///
/// Constructed with a single frame already in place, matching the global
/// scope that exists before any block is entered.
#[derive(Debug)]
pub struct ScopeStack {
    frames: Vec<ScopeFrame>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self {
            frames: vec![ScopeFrame::default()],
        }
    }

    /// Push a new empty frame.
    pub fn enter_scope(&mut self) {
        self.frames.push(ScopeFrame::default());
    }

    /// Pop the topmost frame.
    pub fn exit_scope(&mut self) -> Result<(), ScopeError> {
        self.frames.pop().map(|_| ()).ok_or(ScopeError::EmptyStack)
    }

    /// Insert a name into the topmost frame. Duplicate names within one
    /// frame are rejected; the same name in an outer frame shadows fine.
    pub fn declare(&mut self, name: InternedString, symbol: SymbolId) -> Result<(), ScopeError> {
        let top = self.frames.last_mut().ok_or(ScopeError::EmptyStack)?;
        if top.entries.contains_key(&name) {
            return Err(ScopeError::DuplicateName);
        }
        top.entries.insert(name, symbol);
        Ok(())
    }

    /// Look up a name in the topmost frame only.
    pub fn lookup_local(&self, name: InternedString) -> Result<Option<SymbolId>, ScopeError> {
        let top = self.frames.last().ok_or(ScopeError::EmptyStack)?;
        Ok(top.entries.get(&name).copied())
    }

    /// Look up a name from the innermost frame outwards; the first match
    /// wins, implementing lexical shadowing.
    pub fn lookup_global(&self, name: InternedString) -> Result<Option<SymbolId>, ScopeError> {
        if self.frames.is_empty() {
            return Err(ScopeError::EmptyStack);
        }
        for frame in self.frames.iter().rev() {
            if let Some(&id) = frame.entries.get(&name) {
                return Ok(Some(id));
            }
        }
        Ok(None)
    }

    /// Number of frames currently on the stack.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Render all frames, innermost first, one line per frame, entries in
    /// insertion order. Deterministic; used for debugging and tests.
    pub fn dump(&self, symbols: &SymbolArena, interner: &StringInterner) -> String {
        let mut out = String::from("Sym Table\n");
        for frame in self.frames.iter().rev() {
            out.push('{');
            for (i, (name, id)) in frame.entries.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(interner.resolve(*name));
                out.push_str(": ");
                match symbols.get(*id) {
                    Some(sym) => out.push_str(&sym.render(interner)),
                    None => out.push('?'),
                }
            }
            out.push_str("}\n");
        }
        out
    }
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

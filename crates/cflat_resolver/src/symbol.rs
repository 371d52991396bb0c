//! Symbol definitions.
//!
//! Every named entity the resolver declares becomes a `Symbol` stored in
//! the `SymbolArena`; scopes and the binding table refer to symbols by
//! `SymbolId`.

use crate::scope::ScopeStack;
use cflat_core::intern::{InternedString, StringInterner};

/// Unique identifier for a symbol. Indexes into the `SymbolArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const INVALID: SymbolId = SymbolId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A declared type as it appears in a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueType {
    Int,
    Bool,
    Void,
    Struct(InternedString),
}

impl ValueType {
    /// Render this type the way declarations and scope dumps print it.
    pub fn render(&self, interner: &StringInterner) -> String {
        match self {
            ValueType::Int => "int".to_string(),
            ValueType::Bool => "bool".to_string(),
            ValueType::Void => "void".to_string(),
            ValueType::Struct(name) => interner.resolve(*name).to_string(),
        }
    }
}

/// What kind of entity a symbol is.
#[derive(Debug)]
pub enum SymbolKind {
    /// A plain variable with its declared type.
    Variable { ty: ValueType },
    /// A function signature: parameter types in declared order plus the
    /// return type.
    Function {
        params: Vec<ValueType>,
        ret: ValueType,
    },
    /// A struct blueprint. Owns the struct's field table.
    StructDef { fields: ScopeStack },
    /// A variable of struct type. Holds a non-owning reference to the
    /// blueprint it was declared with, plus the blueprint's name for
    /// display.
    StructInstance {
        blueprint: SymbolId,
        type_name: InternedString,
    },
}

/// A named entity created during resolution.
#[derive(Debug)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: InternedString,
    pub kind: SymbolKind,
}

impl Symbol {
    /// Render this symbol for scope dumps and annotated output.
    ///
    /// Variables render as their type, functions as
    /// `param, param -> ret`, struct instances as their blueprint's name,
    /// and blueprints as `struct <name>`.
    pub fn render(&self, interner: &StringInterner) -> String {
        match &self.kind {
            SymbolKind::Variable { ty } => ty.render(interner),
            SymbolKind::Function { params, ret } => {
                let params = params
                    .iter()
                    .map(|p| p.render(interner))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} -> {}", params, ret.render(interner))
            }
            SymbolKind::StructDef { .. } => {
                format!("struct {}", interner.resolve(self.name))
            }
            SymbolKind::StructInstance { type_name, .. } => {
                interner.resolve(*type_name).to_string()
            }
        }
    }
}

/// Owns all symbols created during one resolution pass.
#[derive(Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    /// Create a new symbol and return its id.
    pub fn alloc(&mut self, name: InternedString, kind: SymbolKind) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(Symbol { id, name, kind });
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols.get(id.index())
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        self.symbols.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_allocates_sequential_ids() {
        let interner = StringInterner::new();
        let mut arena = SymbolArena::new();
        let a = arena.alloc(
            interner.intern("a"),
            SymbolKind::Variable { ty: ValueType::Int },
        );
        let b = arena.alloc(
            interner.intern("b"),
            SymbolKind::Variable {
                ty: ValueType::Bool,
            },
        );
        assert_eq!(a, SymbolId(0));
        assert_eq!(b, SymbolId(1));
        assert_eq!(arena.len(), 2);
    }

    #[test]
    fn test_render_variable() {
        let interner = StringInterner::new();
        let mut arena = SymbolArena::new();
        let id = arena.alloc(
            interner.intern("x"),
            SymbolKind::Variable { ty: ValueType::Int },
        );
        assert_eq!(arena.get(id).unwrap().render(&interner), "int");
    }

    #[test]
    fn test_render_function_signature() {
        let interner = StringInterner::new();
        let mut arena = SymbolArena::new();
        let id = arena.alloc(
            interner.intern("f"),
            SymbolKind::Function {
                params: vec![ValueType::Int, ValueType::Bool],
                ret: ValueType::Void,
            },
        );
        assert_eq!(arena.get(id).unwrap().render(&interner), "int, bool -> void");
    }

    #[test]
    fn test_render_nullary_function() {
        let interner = StringInterner::new();
        let mut arena = SymbolArena::new();
        let id = arena.alloc(
            interner.intern("main"),
            SymbolKind::Function {
                params: vec![],
                ret: ValueType::Int,
            },
        );
        assert_eq!(arena.get(id).unwrap().render(&interner), " -> int");
    }

    #[test]
    fn test_render_struct_symbols() {
        let interner = StringInterner::new();
        let point = interner.intern("Point");
        let mut arena = SymbolArena::new();
        let def = arena.alloc(
            point,
            SymbolKind::StructDef {
                fields: ScopeStack::new(),
            },
        );
        let inst = arena.alloc(
            interner.intern("p"),
            SymbolKind::StructInstance {
                blueprint: def,
                type_name: point,
            },
        );
        assert_eq!(arena.get(def).unwrap().render(&interner), "struct Point");
        assert_eq!(arena.get(inst).unwrap().render(&interner), "Point");
    }
}

//! The name resolver.
//!
//! A single top-down, left-to-right, depth-first walk over the AST.
//! Declarations insert symbols into the current scope, references are
//! bound through the scope chain, and dotted field accesses are resolved
//! against struct blueprints. All semantic violations go to the
//! diagnostics collection and the walk continues; only a broken
//! scope-stack invariant is logged and skipped.

use crate::registry::StructRegistry;
use crate::scope::{ScopeError, ScopeStack};
use crate::symbol::{SymbolArena, SymbolId, SymbolKind, ValueType};
use cflat_ast::node::*;
use cflat_core::intern::StringInterner;
use cflat_core::pos::SourcePos;
use cflat_diagnostics::{messages, DiagnosticCollection, DiagnosticMessage};
use rustc_hash::FxHashMap;

/// The output of one resolution pass: the symbols created, the
/// node-to-symbol binding table, and the diagnostics reported. A node
/// absent from `bindings` is unbound; if it was a reference, a diagnostic
/// was already emitted for it.
#[derive(Debug)]
pub struct Resolution {
    pub symbols: SymbolArena,
    pub bindings: FxHashMap<NodeId, SymbolId>,
    pub diagnostics: DiagnosticCollection,
}

/// Resolves names over one program.
pub struct Resolver {
    interner: StringInterner,
    scopes: ScopeStack,
    registry: StructRegistry,
    symbols: SymbolArena,
    bindings: FxHashMap<NodeId, SymbolId>,
    diagnostics: DiagnosticCollection,
}

impl Resolver {
    /// Create a resolver sharing the interner the AST was built with.
    pub fn new(interner: StringInterner) -> Self {
        Self {
            interner,
            scopes: ScopeStack::new(),
            registry: StructRegistry::new(),
            symbols: SymbolArena::new(),
            bindings: FxHashMap::default(),
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Resolve a whole program. May be called once per resolver.
    pub fn resolve_program(&mut self, program: &Program<'_>) {
        for decl in program.decls {
            self.resolve_decl(decl);
        }
    }

    /// Consume the resolver and return the pass results.
    pub fn finish(self) -> Resolution {
        Resolution {
            symbols: self.symbols,
            bindings: self.bindings,
            diagnostics: self.diagnostics,
        }
    }

    pub fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// The symbol bound to a node, if resolution succeeded for it.
    pub fn binding_of(&self, node: NodeId) -> Option<SymbolId> {
        self.bindings.get(&node).copied()
    }

    /// Current number of scope frames. Back to 1 after a complete pass.
    pub fn scope_depth(&self) -> usize {
        self.scopes.depth()
    }

    /// Render the current scope stack for inspection.
    pub fn dump_scopes(&self) -> String {
        self.scopes.dump(&self.symbols, &self.interner)
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn report(&mut self, pos: SourcePos, message: &DiagnosticMessage) {
        self.diagnostics.report(pos, message, &[]);
    }

    fn bind(&mut self, node: NodeId, symbol: SymbolId) {
        self.bindings.insert(node, symbol);
    }

    /// Topmost-frame lookup with the empty-stack invariant handled: logged
    /// and treated as "not found" without a user-facing diagnostic.
    fn lookup_local(&self, ident: &Ident) -> Option<SymbolId> {
        match self.scopes.lookup_local(ident.name) {
            Ok(found) => found,
            Err(err) => {
                tracing::error!(error = %err, name = %ident.text, "local lookup skipped");
                None
            }
        }
    }

    fn declare(&mut self, ident: &Ident, symbol: SymbolId) {
        if let Err(err) = self.scopes.declare(ident.name, symbol) {
            // Duplicates are caught by lookup_local before allocation, so
            // any failure here is an internal invariant violation.
            tracing::error!(error = %err, name = %ident.text, "declaration skipped");
        }
    }

    fn exit_scope(&mut self) {
        if let Err(err) = self.scopes.exit_scope() {
            tracing::error!(error = %err, "scope pop skipped");
        }
    }

    fn value_type(ty: &TypeSpec) -> ValueType {
        match ty {
            TypeSpec::Int => ValueType::Int,
            TypeSpec::Bool => ValueType::Bool,
            TypeSpec::Void => ValueType::Void,
            TypeSpec::Struct(ident) => ValueType::Struct(ident.name),
        }
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn resolve_decl(&mut self, decl: &Decl<'_>) {
        match decl {
            Decl::Var(n) => self.resolve_var_decl(n),
            Decl::Fn(n) => self.resolve_fn_decl(n),
            Decl::Struct(n) => self.resolve_struct_decl(n),
        }
    }

    /// Variable declarations, including struct fields.
    ///
    /// Checks run in order: void type, unknown struct type, frame-local
    /// duplicate. Any failure suppresses the insertion but every
    /// applicable diagnostic is reported.
    fn resolve_var_decl(&mut self, node: &VarDecl) {
        let pos = node.name.data.pos;
        let mut error = false;

        if matches!(node.ty, TypeSpec::Void) {
            self.report(pos, &messages::NON_FUNCTION_DECLARED_VOID);
            error = true;
        }

        let mut blueprint = None;
        if let TypeSpec::Struct(type_ident) = &node.ty {
            match self.registry.lookup(type_ident.name) {
                Ok(Some(id)) => blueprint = Some(id),
                Ok(None) => {
                    self.report(pos, &messages::INVALID_STRUCT_TYPE_NAME);
                    error = true;
                }
                Err(err) => {
                    tracing::error!(error = %err, "struct type lookup skipped");
                    error = true;
                }
            }
        }

        if self.lookup_local(&node.name).is_some() {
            self.report(pos, &messages::MULTIPLY_DECLARED_IDENTIFIER);
            error = true;
        }

        if error {
            return;
        }

        let kind = match (&node.ty, blueprint) {
            (TypeSpec::Struct(type_ident), Some(blueprint)) => SymbolKind::StructInstance {
                blueprint,
                type_name: type_ident.name,
            },
            _ => SymbolKind::Variable {
                ty: Self::value_type(&node.ty),
            },
        };
        let symbol = self.symbols.alloc(node.name.name, kind);
        self.declare(&node.name, symbol);
    }

    fn resolve_formal(&mut self, node: &FormalDecl) {
        let pos = node.name.data.pos;
        let mut error = false;

        if matches!(node.ty, TypeSpec::Void) {
            self.report(pos, &messages::NON_FUNCTION_DECLARED_VOID);
            error = true;
        }

        if self.lookup_local(&node.name).is_some() {
            self.report(pos, &messages::MULTIPLY_DECLARED_IDENTIFIER);
            error = true;
        }

        if error {
            return;
        }

        let symbol = self.symbols.alloc(
            node.name.name,
            SymbolKind::Variable {
                ty: Self::value_type(&node.ty),
            },
        );
        self.declare(&node.name, symbol);
    }

    /// Function declarations.
    ///
    /// The function symbol is inserted into the enclosing scope before the
    /// body scope is pushed, so later statements and the function's own
    /// body can call it. The signature records every declared formal type
    /// in order, whether or not the formal itself declares cleanly.
    fn resolve_fn_decl(&mut self, node: &FnDecl<'_>) {
        let pos = node.name.data.pos;
        let mut error = false;

        if self.lookup_local(&node.name).is_some() {
            self.report(pos, &messages::MULTIPLY_DECLARED_IDENTIFIER);
            error = true;
        }

        if !error {
            let params = node
                .formals
                .iter()
                .map(|f| Self::value_type(&f.ty))
                .collect();
            let ret = Self::value_type(&node.return_ty);
            let symbol = self
                .symbols
                .alloc(node.name.name, SymbolKind::Function { params, ret });
            self.declare(&node.name, symbol);
        }

        // Formals and locals live in one scope, invisible outside
        self.scopes.enter_scope();
        for formal in node.formals {
            self.resolve_formal(formal);
        }
        for decl in node.body.decls {
            self.resolve_decl(decl);
        }
        for stmt in node.body.stmts {
            self.resolve_stmt(stmt);
        }
        self.exit_scope();
    }

    /// Struct declarations.
    ///
    /// The blueprint symbol is registered in the enclosing scope and the
    /// registry before the field list is resolved, so a field may be of
    /// the struct's own type. Fields resolve against a fresh scope stack;
    /// they never see outer names and outer code never sees them except
    /// through dot access.
    fn resolve_struct_decl(&mut self, node: &StructDecl<'_>) {
        let pos = node.name.data.pos;

        if self.lookup_local(&node.name).is_some() {
            self.report(pos, &messages::MULTIPLY_DECLARED_IDENTIFIER);
            return;
        }

        let symbol = self.symbols.alloc(
            node.name.name,
            SymbolKind::StructDef {
                fields: ScopeStack::new(),
            },
        );
        self.declare(&node.name, symbol);
        match self.registry.declare(node.name.name, symbol) {
            Ok(()) => {}
            Err(ScopeError::DuplicateName) => {
                // Same struct name registered from another lexical scope;
                // the first registration wins
                self.report(pos, &messages::MULTIPLY_DECLARED_IDENTIFIER);
            }
            Err(err) => {
                tracing::error!(error = %err, name = %node.name.text, "struct registration skipped");
            }
        }

        let saved = std::mem::replace(&mut self.scopes, ScopeStack::new());
        for field in node.fields {
            self.resolve_var_decl(field);
        }
        let field_table = std::mem::replace(&mut self.scopes, saved);

        if let Some(sym) = self.symbols.get_mut(symbol) {
            if let SymbolKind::StructDef { fields } = &mut sym.kind {
                *fields = field_table;
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn resolve_stmt(&mut self, stmt: &Stmt<'_>) {
        match stmt {
            Stmt::Assign(n) => self.resolve_assign_expr(n.assign),
            Stmt::PostInc(n) => self.resolve_expr(&n.target),
            Stmt::PostDec(n) => self.resolve_expr(&n.target),
            Stmt::Read(n) => self.resolve_expr(&n.target),
            Stmt::Write(n) => self.resolve_expr(&n.value),
            Stmt::If(n) => {
                self.resolve_expr(&n.cond);
                self.resolve_block(&n.then_block);
            }
            Stmt::IfElse(n) => {
                self.resolve_expr(&n.cond);
                self.resolve_block(&n.then_block);
                self.resolve_block(&n.else_block);
            }
            Stmt::While(n) => {
                self.resolve_expr(&n.cond);
                self.resolve_block(&n.body);
            }
            Stmt::Repeat(n) => {
                self.resolve_expr(&n.count);
                self.resolve_block(&n.body);
            }
            Stmt::Call(n) => self.resolve_call_expr(n.call),
            Stmt::Return(n) => {
                if let Some(value) = &n.value {
                    self.resolve_expr(value);
                }
            }
        }
    }

    /// One branch or loop body: its own scope for local declarations.
    fn resolve_block(&mut self, block: &Block<'_>) {
        self.scopes.enter_scope();
        for decl in block.decls {
            self.resolve_decl(decl);
        }
        for stmt in block.stmts {
            self.resolve_stmt(stmt);
        }
        self.exit_scope();
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn resolve_expr(&mut self, expr: &Expr<'_>) {
        match expr {
            Expr::IntLit(_) | Expr::StrLit(_) | Expr::BoolLit(_) => {}
            Expr::Ident(n) => self.resolve_ident_ref(n),
            Expr::Dot(n) => self.resolve_dot_access(n),
            Expr::Assign(n) => self.resolve_assign_expr(n),
            Expr::Call(n) => self.resolve_call_expr(n),
            Expr::Unary(n) => self.resolve_expr(&n.operand),
            Expr::Binary(n) => {
                self.resolve_expr(&n.lhs);
                self.resolve_expr(&n.rhs);
            }
        }
    }

    fn resolve_assign_expr(&mut self, node: &AssignExpr<'_>) {
        self.resolve_expr(&node.lhs);
        self.resolve_expr(&node.rhs);
    }

    fn resolve_ident_ref(&mut self, ident: &Ident) {
        if ident.ctx != IdentContext::Reference {
            return;
        }
        match self.scopes.lookup_global(ident.name) {
            Ok(Some(symbol)) => self.bind(ident.data.id, symbol),
            Ok(None) => self.report(ident.data.pos, &messages::UNDECLARED_IDENTIFIER),
            Err(err) => {
                tracing::error!(error = %err, name = %ident.text, "identifier lookup skipped");
            }
        }
    }

    fn resolve_call_expr(&mut self, node: &CallExpr<'_>) {
        match self.scopes.lookup_global(node.callee.name) {
            Ok(Some(symbol)) => self.bind(node.callee.data.id, symbol),
            Ok(None) => self.report(node.callee.data.pos, &messages::UNDECLARED_IDENTIFIER),
            Err(err) => {
                tracing::error!(error = %err, name = %node.callee.text, "callee lookup skipped");
            }
        }
        for arg in node.args {
            self.resolve_expr(arg);
        }
    }

    /// Dotted field access, e.g. `a.inner.v`.
    ///
    /// The left-associated chain is flattened into base-to-field order.
    /// The base resolves through the scope chain; every link that is
    /// dotted through must be a struct instance, and each field must
    /// exist in the previous link's blueprint. Resolution of the chain
    /// stops at the first broken link, which reports its own diagnostic;
    /// every identifier confirmed along the way is bound exactly once.
    fn resolve_dot_access(&mut self, node: &DotAccess<'_>) {
        let mut chain: Vec<&Ident> = vec![&node.field];
        let mut base = &node.base;
        while let Expr::Dot(inner) = base {
            chain.push(&inner.field);
            base = &inner.base;
        }
        chain.reverse();

        let first = match base {
            Expr::Ident(ident) => *ident,
            other => {
                // The grammar only derives identifiers as dot bases, but
                // the tree shape allows anything; nothing else can name a
                // struct value.
                self.resolve_expr(other);
                self.report(other.data().pos, &messages::DOT_ACCESS_OF_NON_STRUCT);
                return;
            }
        };

        let base_symbol = match self.scopes.lookup_global(first.name) {
            Ok(Some(symbol)) => symbol,
            Ok(None) => {
                self.report(first.data.pos, &messages::UNDECLARED_IDENTIFIER);
                return;
            }
            Err(err) => {
                tracing::error!(error = %err, name = %first.text, "dot-access base lookup skipped");
                return;
            }
        };

        let mut prev_ident = first;
        let mut prev_symbol = base_symbol;
        for field in chain {
            let blueprint = match self.symbols.get(prev_symbol).map(|s| &s.kind) {
                Some(SymbolKind::StructInstance { blueprint, .. }) => *blueprint,
                _ => {
                    self.report(prev_ident.data.pos, &messages::DOT_ACCESS_OF_NON_STRUCT);
                    return;
                }
            };
            self.bind(prev_ident.data.id, prev_symbol);

            let field_lookup = match self.symbols.get(blueprint).map(|s| &s.kind) {
                Some(SymbolKind::StructDef { fields }) => fields.lookup_global(field.name),
                _ => {
                    tracing::error!(name = %field.text, "blueprint missing for dot access");
                    return;
                }
            };
            match field_lookup {
                Ok(Some(symbol)) => {
                    prev_ident = field;
                    prev_symbol = symbol;
                }
                Ok(None) => {
                    self.report(field.data.pos, &messages::INVALID_STRUCT_FIELD_NAME);
                    return;
                }
                Err(err) => {
                    tracing::error!(error = %err, name = %field.text, "field lookup skipped");
                    return;
                }
            }
        }
        self.bind(prev_ident.data.id, prev_symbol);
    }
}

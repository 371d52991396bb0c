//! cflat_nodebuilder: Synthetic AST node construction.
//!
//! The parser lives upstream of this workspace, so tests and benches build
//! trees programmatically. The builder owns the node ID counter and interns
//! identifier names as it goes.

use cflat_ast::node::*;
use cflat_core::arena::AstArena;
use cflat_core::intern::StringInterner;
use cflat_core::pos::SourcePos;
use std::cell::Cell;

/// Builds arena-allocated AST nodes with fresh node IDs.
pub struct AstBuilder<'a> {
    arena: &'a AstArena,
    interner: StringInterner,
    next_id: Cell<u32>,
}

impl<'a> AstBuilder<'a> {
    pub fn new(arena: &'a AstArena, interner: StringInterner) -> Self {
        Self {
            arena,
            interner,
            next_id: Cell::new(0),
        }
    }

    /// The interner used for identifier names.
    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    fn data(&self, pos: SourcePos) -> NodeData {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        NodeData::new(NodeId(id), pos)
    }

    // ========================================================================
    // Identifiers and types
    // ========================================================================

    fn ident(&self, name: &str, line: u32, col: u32, ctx: IdentContext) -> Ident {
        Ident {
            data: self.data(SourcePos::new(line, col)),
            name: self.interner.intern(name),
            text: name.to_string(),
            ctx,
        }
    }

    /// An identifier at a declaration site.
    pub fn ident_decl(&self, name: &str, line: u32, col: u32) -> Ident {
        self.ident(name, line, col, IdentContext::Declaration)
    }

    /// An identifier use.
    pub fn ident_ref(&self, name: &str, line: u32, col: u32) -> Ident {
        self.ident(name, line, col, IdentContext::Reference)
    }

    pub fn ty_int(&self) -> TypeSpec {
        TypeSpec::Int
    }

    pub fn ty_bool(&self) -> TypeSpec {
        TypeSpec::Bool
    }

    pub fn ty_void(&self) -> TypeSpec {
        TypeSpec::Void
    }

    /// `struct <name>` type annotation. The name identifier is a
    /// declaration-site occurrence, not a reference.
    pub fn ty_struct(&self, name: &str, line: u32, col: u32) -> TypeSpec {
        TypeSpec::Struct(self.ident_decl(name, line, col))
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    pub fn program(&self, decls: Vec<Decl<'a>>) -> &'a Program<'a> {
        self.arena.alloc(Program {
            data: self.data(SourcePos::new(1, 1)),
            decls: self.arena.alloc_vec(decls),
        })
    }

    pub fn var_decl(&self, ty: TypeSpec, name: Ident) -> Decl<'a> {
        let pos = name.data.pos;
        Decl::Var(self.arena.alloc(VarDecl {
            data: self.data(pos),
            ty,
            name,
        }))
    }

    /// A struct field declaration (stored by value in the field list).
    pub fn field(&self, ty: TypeSpec, name: Ident) -> VarDecl {
        let pos = name.data.pos;
        VarDecl {
            data: self.data(pos),
            ty,
            name,
        }
    }

    pub fn formal(&self, ty: TypeSpec, name: Ident) -> FormalDecl {
        let pos = name.data.pos;
        FormalDecl {
            data: self.data(pos),
            ty,
            name,
        }
    }

    pub fn fn_decl(
        &self,
        return_ty: TypeSpec,
        name: Ident,
        formals: Vec<FormalDecl>,
        decls: Vec<Decl<'a>>,
        stmts: Vec<Stmt<'a>>,
    ) -> Decl<'a> {
        let pos = name.data.pos;
        Decl::Fn(self.arena.alloc(FnDecl {
            data: self.data(pos),
            return_ty,
            name,
            formals: self.arena.alloc_vec(formals),
            body: FnBody {
                decls: self.arena.alloc_vec(decls),
                stmts: self.arena.alloc_vec(stmts),
            },
        }))
    }

    pub fn struct_decl(&self, name: Ident, fields: Vec<VarDecl>) -> Decl<'a> {
        let pos = name.data.pos;
        Decl::Struct(self.arena.alloc(StructDecl {
            data: self.data(pos),
            name,
            fields: self.arena.alloc_vec(fields),
        }))
    }

    // ========================================================================
    // Statements
    // ========================================================================

    pub fn block(&self, decls: Vec<Decl<'a>>, stmts: Vec<Stmt<'a>>) -> Block<'a> {
        Block {
            decls: self.arena.alloc_vec(decls),
            stmts: self.arena.alloc_vec(stmts),
        }
    }

    pub fn assign_stmt(&self, lhs: Expr<'a>, rhs: Expr<'a>) -> Stmt<'a> {
        let pos = lhs.data().pos;
        let assign = self.arena.alloc(AssignExpr {
            data: self.data(pos),
            lhs,
            rhs,
        });
        Stmt::Assign(self.arena.alloc(AssignStmt {
            data: self.data(pos),
            assign,
        }))
    }

    pub fn post_inc_stmt(&self, target: Expr<'a>) -> Stmt<'a> {
        let pos = target.data().pos;
        Stmt::PostInc(self.arena.alloc(PostIncStmt {
            data: self.data(pos),
            target,
        }))
    }

    pub fn post_dec_stmt(&self, target: Expr<'a>) -> Stmt<'a> {
        let pos = target.data().pos;
        Stmt::PostDec(self.arena.alloc(PostDecStmt {
            data: self.data(pos),
            target,
        }))
    }

    pub fn read_stmt(&self, target: Expr<'a>) -> Stmt<'a> {
        let pos = target.data().pos;
        Stmt::Read(self.arena.alloc(ReadStmt {
            data: self.data(pos),
            target,
        }))
    }

    pub fn write_stmt(&self, value: Expr<'a>) -> Stmt<'a> {
        let pos = value.data().pos;
        Stmt::Write(self.arena.alloc(WriteStmt {
            data: self.data(pos),
            value,
        }))
    }

    pub fn if_stmt(&self, cond: Expr<'a>, then_block: Block<'a>) -> Stmt<'a> {
        let pos = cond.data().pos;
        Stmt::If(self.arena.alloc(IfStmt {
            data: self.data(pos),
            cond,
            then_block,
        }))
    }

    pub fn if_else_stmt(
        &self,
        cond: Expr<'a>,
        then_block: Block<'a>,
        else_block: Block<'a>,
    ) -> Stmt<'a> {
        let pos = cond.data().pos;
        Stmt::IfElse(self.arena.alloc(IfElseStmt {
            data: self.data(pos),
            cond,
            then_block,
            else_block,
        }))
    }

    pub fn while_stmt(&self, cond: Expr<'a>, body: Block<'a>) -> Stmt<'a> {
        let pos = cond.data().pos;
        Stmt::While(self.arena.alloc(WhileStmt {
            data: self.data(pos),
            cond,
            body,
        }))
    }

    pub fn repeat_stmt(&self, count: Expr<'a>, body: Block<'a>) -> Stmt<'a> {
        let pos = count.data().pos;
        Stmt::Repeat(self.arena.alloc(RepeatStmt {
            data: self.data(pos),
            count,
            body,
        }))
    }

    pub fn call_stmt(&self, callee: Ident, args: Vec<Expr<'a>>) -> Stmt<'a> {
        let pos = callee.data.pos;
        let call = self.arena.alloc(CallExpr {
            data: self.data(pos),
            callee,
            args: self.arena.alloc_vec(args),
        });
        Stmt::Call(self.arena.alloc(CallStmt {
            data: self.data(pos),
            call,
        }))
    }

    pub fn return_stmt(&self, value: Option<Expr<'a>>, line: u32, col: u32) -> Stmt<'a> {
        Stmt::Return(self.arena.alloc(ReturnStmt {
            data: self.data(SourcePos::new(line, col)),
            value,
        }))
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    pub fn int_lit(&self, value: i64, line: u32, col: u32) -> Expr<'a> {
        Expr::IntLit(self.arena.alloc(IntLit {
            data: self.data(SourcePos::new(line, col)),
            value,
        }))
    }

    pub fn str_lit(&self, value: &str, line: u32, col: u32) -> Expr<'a> {
        Expr::StrLit(self.arena.alloc(StrLit {
            data: self.data(SourcePos::new(line, col)),
            value: value.to_string(),
        }))
    }

    pub fn bool_lit(&self, value: bool, line: u32, col: u32) -> Expr<'a> {
        Expr::BoolLit(self.arena.alloc(BoolLit {
            data: self.data(SourcePos::new(line, col)),
            value,
        }))
    }

    pub fn ident_expr(&self, name: &str, line: u32, col: u32) -> Expr<'a> {
        Expr::Ident(self.arena.alloc(self.ident_ref(name, line, col)))
    }

    /// `base.field` - builds one link of a dot-access chain.
    pub fn dot(&self, base: Expr<'a>, field: &str, line: u32, col: u32) -> Expr<'a> {
        let pos = base.data().pos;
        Expr::Dot(self.arena.alloc(DotAccess {
            data: self.data(pos),
            base,
            field: self.ident_ref(field, line, col),
        }))
    }

    pub fn assign_expr(&self, lhs: Expr<'a>, rhs: Expr<'a>) -> Expr<'a> {
        let pos = lhs.data().pos;
        Expr::Assign(self.arena.alloc(AssignExpr {
            data: self.data(pos),
            lhs,
            rhs,
        }))
    }

    pub fn call_expr(&self, callee: Ident, args: Vec<Expr<'a>>) -> Expr<'a> {
        let pos = callee.data.pos;
        Expr::Call(self.arena.alloc(CallExpr {
            data: self.data(pos),
            callee,
            args: self.arena.alloc_vec(args),
        }))
    }

    pub fn unary(&self, op: UnaryOp, operand: Expr<'a>) -> Expr<'a> {
        let pos = operand.data().pos;
        Expr::Unary(self.arena.alloc(UnaryExpr {
            data: self.data(pos),
            op,
            operand,
        }))
    }

    pub fn binary(&self, op: BinaryOp, lhs: Expr<'a>, rhs: Expr<'a>) -> Expr<'a> {
        let pos = lhs.data().pos;
        Expr::Binary(self.arena.alloc(BinaryExpr {
            data: self.data(pos),
            op,
            lhs,
            rhs,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_ids_are_unique() {
        let arena = AstArena::new();
        let b = AstBuilder::new(&arena, StringInterner::new());
        let x = b.ident_decl("x", 1, 5);
        let y = b.ident_decl("y", 2, 5);
        assert_ne!(x.data.id, y.data.id);
    }

    #[test]
    fn test_ident_contexts() {
        let arena = AstArena::new();
        let b = AstBuilder::new(&arena, StringInterner::new());
        let decl = b.ident_decl("x", 1, 5);
        assert_eq!(decl.ctx, IdentContext::Declaration);
        let reference = b.ident_ref("x", 2, 5);
        assert_eq!(reference.ctx, IdentContext::Reference);
        assert_eq!(decl.name, reference.name);
    }

    #[test]
    fn test_builds_program() {
        let arena = AstArena::new();
        let b = AstBuilder::new(&arena, StringInterner::new());
        let decl = b.var_decl(b.ty_int(), b.ident_decl("x", 1, 5));
        let program = b.program(vec![decl]);
        assert_eq!(program.decls.len(), 1);
    }
}

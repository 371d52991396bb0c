//! AST node definitions.
//!
//! One node struct per declaration, statement, and expression kind, grouped
//! under tagged-union enums. Nodes reference child nodes via arena-allocated
//! references.

use cflat_core::intern::InternedString;
use cflat_core::pos::SourcePos;

// ============================================================================
// Core Node Wrapper
// ============================================================================

/// Unique identifier for an AST node, assigned at construction time.
/// The resolver's binding table is keyed by this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const INVALID: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Common data shared by all AST nodes.
#[derive(Debug, Clone)]
pub struct NodeData {
    /// Unique node ID.
    pub id: NodeId,
    /// Source position of the first token of this node.
    pub pos: SourcePos,
}

impl NodeData {
    pub fn new(id: NodeId, pos: SourcePos) -> Self {
        Self { id, pos }
    }
}

/// A list of nodes, allocated in the arena.
pub type NodeList<'a, T> = &'a [T];

// ============================================================================
// Identifier
// ============================================================================

/// Whether an identifier occurrence declares a name or references one.
/// Fixed at construction time; the resolver never flips it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentContext {
    Declaration,
    Reference,
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub data: NodeData,
    /// The interned text of this identifier.
    pub name: InternedString,
    /// The actual text of this identifier as a plain string.
    pub text: String,
    /// Declaration site or reference.
    pub ctx: IdentContext,
}

// ============================================================================
// Types
// ============================================================================

/// A written type annotation.
#[derive(Debug, Clone)]
pub enum TypeSpec {
    Int,
    Bool,
    Void,
    /// `struct Id` - the identifier names the struct blueprint.
    Struct(Ident),
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug)]
pub struct Program<'a> {
    pub data: NodeData,
    pub decls: NodeList<'a, Decl<'a>>,
}

#[derive(Debug)]
pub enum Decl<'a> {
    Var(&'a VarDecl),
    Fn(&'a FnDecl<'a>),
    Struct(&'a StructDecl<'a>),
}

/// `int x;` or `struct Point p;` - also used for struct fields.
#[derive(Debug)]
pub struct VarDecl {
    pub data: NodeData,
    pub ty: TypeSpec,
    pub name: Ident,
}

#[derive(Debug)]
pub struct FnDecl<'a> {
    pub data: NodeData,
    pub return_ty: TypeSpec,
    pub name: Ident,
    pub formals: NodeList<'a, FormalDecl>,
    pub body: FnBody<'a>,
}

/// A formal parameter declaration.
#[derive(Debug)]
pub struct FormalDecl {
    pub data: NodeData,
    pub ty: TypeSpec,
    pub name: Ident,
}

/// A function body: local declarations followed by statements.
#[derive(Debug)]
pub struct FnBody<'a> {
    pub decls: NodeList<'a, Decl<'a>>,
    pub stmts: NodeList<'a, Stmt<'a>>,
}

#[derive(Debug)]
pub struct StructDecl<'a> {
    pub data: NodeData,
    pub name: Ident,
    pub fields: NodeList<'a, VarDecl>,
}

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug)]
pub enum Stmt<'a> {
    Assign(&'a AssignStmt<'a>),
    PostInc(&'a PostIncStmt<'a>),
    PostDec(&'a PostDecStmt<'a>),
    Read(&'a ReadStmt<'a>),
    Write(&'a WriteStmt<'a>),
    If(&'a IfStmt<'a>),
    IfElse(&'a IfElseStmt<'a>),
    While(&'a WhileStmt<'a>),
    Repeat(&'a RepeatStmt<'a>),
    Call(&'a CallStmt<'a>),
    Return(&'a ReturnStmt<'a>),
}

/// A nested block body: local declarations plus statements.
/// Each branch of an if/if-else and each loop body is one of these.
#[derive(Debug)]
pub struct Block<'a> {
    pub decls: NodeList<'a, Decl<'a>>,
    pub stmts: NodeList<'a, Stmt<'a>>,
}

#[derive(Debug)]
pub struct AssignStmt<'a> {
    pub data: NodeData,
    pub assign: &'a AssignExpr<'a>,
}

#[derive(Debug)]
pub struct PostIncStmt<'a> {
    pub data: NodeData,
    pub target: Expr<'a>,
}

#[derive(Debug)]
pub struct PostDecStmt<'a> {
    pub data: NodeData,
    pub target: Expr<'a>,
}

#[derive(Debug)]
pub struct ReadStmt<'a> {
    pub data: NodeData,
    pub target: Expr<'a>,
}

#[derive(Debug)]
pub struct WriteStmt<'a> {
    pub data: NodeData,
    pub value: Expr<'a>,
}

#[derive(Debug)]
pub struct IfStmt<'a> {
    pub data: NodeData,
    pub cond: Expr<'a>,
    pub then_block: Block<'a>,
}

#[derive(Debug)]
pub struct IfElseStmt<'a> {
    pub data: NodeData,
    pub cond: Expr<'a>,
    pub then_block: Block<'a>,
    pub else_block: Block<'a>,
}

#[derive(Debug)]
pub struct WhileStmt<'a> {
    pub data: NodeData,
    pub cond: Expr<'a>,
    pub body: Block<'a>,
}

/// `repeat (n) { ... }` - run the body n times.
#[derive(Debug)]
pub struct RepeatStmt<'a> {
    pub data: NodeData,
    pub count: Expr<'a>,
    pub body: Block<'a>,
}

#[derive(Debug)]
pub struct CallStmt<'a> {
    pub data: NodeData,
    pub call: &'a CallExpr<'a>,
}

#[derive(Debug)]
pub struct ReturnStmt<'a> {
    pub data: NodeData,
    pub value: Option<Expr<'a>>,
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum Expr<'a> {
    IntLit(&'a IntLit),
    StrLit(&'a StrLit),
    BoolLit(&'a BoolLit),
    Ident(&'a Ident),
    Dot(&'a DotAccess<'a>),
    Assign(&'a AssignExpr<'a>),
    Call(&'a CallExpr<'a>),
    Unary(&'a UnaryExpr<'a>),
    Binary(&'a BinaryExpr<'a>),
}

#[derive(Debug)]
pub struct IntLit {
    pub data: NodeData,
    pub value: i64,
}

#[derive(Debug)]
pub struct StrLit {
    pub data: NodeData,
    /// The literal text without the surrounding quotes.
    pub value: String,
}

#[derive(Debug)]
pub struct BoolLit {
    pub data: NodeData,
    pub value: bool,
}

/// `base.field` - chains are left-associated, so `a.b.c` is `(a.b).c`.
#[derive(Debug)]
pub struct DotAccess<'a> {
    pub data: NodeData,
    pub base: Expr<'a>,
    pub field: Ident,
}

#[derive(Debug)]
pub struct AssignExpr<'a> {
    pub data: NodeData,
    pub lhs: Expr<'a>,
    pub rhs: Expr<'a>,
}

#[derive(Debug)]
pub struct CallExpr<'a> {
    pub data: NodeData,
    pub callee: Ident,
    pub args: NodeList<'a, Expr<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug)]
pub struct UnaryExpr<'a> {
    pub data: NodeData,
    pub op: UnaryOp,
    pub operand: Expr<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    And,
    Or,
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

#[derive(Debug)]
pub struct BinaryExpr<'a> {
    pub data: NodeData,
    pub op: BinaryOp,
    pub lhs: Expr<'a>,
    pub rhs: Expr<'a>,
}

impl<'a> Expr<'a> {
    /// The node data of whichever variant this is.
    pub fn data(&self) -> &NodeData {
        match self {
            Expr::IntLit(n) => &n.data,
            Expr::StrLit(n) => &n.data,
            Expr::BoolLit(n) => &n.data,
            Expr::Ident(n) => &n.data,
            Expr::Dot(n) => &n.data,
            Expr::Assign(n) => &n.data,
            Expr::Call(n) => &n.data,
            Expr::Unary(n) => &n.data,
            Expr::Binary(n) => &n.data,
        }
    }
}

//! cflat_printer: AST to text output.
//!
//! Converts AST nodes back into formatted source text. When given the
//! results of a resolution pass, identifier uses that were bound print with
//! their symbol's rendering appended, e.g. `total(int)` or
//! `add(int, int -> int)`; declaration sites and unbound uses print bare.

use cflat_ast::node::*;
use cflat_core::intern::StringInterner;
use cflat_resolver::Resolution;

/// Options for the printer.
pub struct PrinterOptions {
    /// Indentation string.
    pub indent_str: String,
    /// Newline string.
    pub new_line: String,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            indent_str: "    ".to_string(),
            new_line: "\n".to_string(),
        }
    }
}

/// The printer converts AST nodes to text.
pub struct Printer<'r> {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
    interner: &'r StringInterner,
    resolution: Option<&'r Resolution>,
}

impl<'r> Printer<'r> {
    /// A plain printer: identifiers print bare.
    pub fn new(interner: &'r StringInterner) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options: PrinterOptions::default(),
            interner,
            resolution: None,
        }
    }

    /// An annotating printer: bound identifier uses print with their
    /// symbol's rendering.
    pub fn with_resolution(interner: &'r StringInterner, resolution: &'r Resolution) -> Self {
        Self {
            output: String::with_capacity(4096),
            indent_level: 0,
            options: PrinterOptions::default(),
            interner,
            resolution: Some(resolution),
        }
    }

    pub fn with_options(mut self, options: PrinterOptions) -> Self {
        self.options = options;
        self
    }

    /// Print a whole program to a string.
    pub fn print_program(&mut self, program: &Program<'_>) -> String {
        self.output.clear();
        for decl in program.decls {
            self.print_decl(decl);
        }
        self.output.clone()
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn print_decl(&mut self, decl: &Decl<'_>) {
        match decl {
            Decl::Var(n) => self.print_var_decl(n),
            Decl::Fn(n) => self.print_fn_decl(n),
            Decl::Struct(n) => self.print_struct_decl(n),
        }
    }

    fn print_var_decl(&mut self, node: &VarDecl) {
        self.write_indent();
        self.print_type(&node.ty);
        self.write(" ");
        self.print_ident(&node.name);
        self.write(";");
        self.write_newline();
    }

    fn print_fn_decl(&mut self, node: &FnDecl<'_>) {
        self.write_indent();
        self.print_type(&node.return_ty);
        self.write(" ");
        self.print_ident(&node.name);
        self.write("(");
        for (i, formal) in node.formals.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_type(&formal.ty);
            self.write(" ");
            self.print_ident(&formal.name);
        }
        self.write(") {");
        self.write_newline();
        self.indent_level += 1;
        for decl in node.body.decls {
            self.print_decl(decl);
        }
        for stmt in node.body.stmts {
            self.print_stmt(stmt);
        }
        self.indent_level -= 1;
        self.write_indent();
        self.write("}");
        self.write_newline();
    }

    fn print_struct_decl(&mut self, node: &StructDecl<'_>) {
        self.write_indent();
        self.write("struct ");
        self.print_ident(&node.name);
        self.write(" {");
        self.write_newline();
        self.indent_level += 1;
        for field in node.fields {
            self.print_var_decl(field);
        }
        self.indent_level -= 1;
        self.write_indent();
        self.write("};");
        self.write_newline();
    }

    fn print_type(&mut self, ty: &TypeSpec) {
        match ty {
            TypeSpec::Int => self.write("int"),
            TypeSpec::Bool => self.write("bool"),
            TypeSpec::Void => self.write("void"),
            TypeSpec::Struct(name) => {
                self.write("struct ");
                self.print_ident(name);
            }
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn print_stmt(&mut self, stmt: &Stmt<'_>) {
        match stmt {
            Stmt::Assign(n) => {
                self.write_indent();
                self.print_expr(&n.assign.lhs);
                self.write(" = ");
                self.print_expr(&n.assign.rhs);
                self.write(";");
                self.write_newline();
            }
            Stmt::PostInc(n) => {
                self.write_indent();
                self.print_expr(&n.target);
                self.write("++;");
                self.write_newline();
            }
            Stmt::PostDec(n) => {
                self.write_indent();
                self.print_expr(&n.target);
                self.write("--;");
                self.write_newline();
            }
            Stmt::Read(n) => {
                self.write_indent();
                self.write("cin >> ");
                self.print_expr(&n.target);
                self.write(";");
                self.write_newline();
            }
            Stmt::Write(n) => {
                self.write_indent();
                self.write("cout << ");
                self.print_expr(&n.value);
                self.write(";");
                self.write_newline();
            }
            Stmt::If(n) => {
                self.write_indent();
                self.write("if (");
                self.print_expr(&n.cond);
                self.write(") {");
                self.write_newline();
                self.print_block(&n.then_block);
                self.write_indent();
                self.write("}");
                self.write_newline();
            }
            Stmt::IfElse(n) => {
                self.write_indent();
                self.write("if (");
                self.print_expr(&n.cond);
                self.write(") {");
                self.write_newline();
                self.print_block(&n.then_block);
                self.write_indent();
                self.write("}");
                self.write_newline();
                self.write_indent();
                self.write("else {");
                self.write_newline();
                self.print_block(&n.else_block);
                self.write_indent();
                self.write("}");
                self.write_newline();
            }
            Stmt::While(n) => {
                self.write_indent();
                self.write("while (");
                self.print_expr(&n.cond);
                self.write(") {");
                self.write_newline();
                self.print_block(&n.body);
                self.write_indent();
                self.write("}");
                self.write_newline();
            }
            Stmt::Repeat(n) => {
                self.write_indent();
                self.write("repeat (");
                self.print_expr(&n.count);
                self.write(") {");
                self.write_newline();
                self.print_block(&n.body);
                self.write_indent();
                self.write("}");
                self.write_newline();
            }
            Stmt::Call(n) => {
                self.write_indent();
                self.print_call(n.call);
                self.write(";");
                self.write_newline();
            }
            Stmt::Return(n) => {
                self.write_indent();
                self.write("return");
                if let Some(value) = &n.value {
                    self.write(" ");
                    self.print_expr(value);
                }
                self.write(";");
                self.write_newline();
            }
        }
    }

    fn print_block(&mut self, block: &Block<'_>) {
        self.indent_level += 1;
        for decl in block.decls {
            self.print_decl(decl);
        }
        for stmt in block.stmts {
            self.print_stmt(stmt);
        }
        self.indent_level -= 1;
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn print_expr(&mut self, expr: &Expr<'_>) {
        match expr {
            Expr::IntLit(n) => self.write(&n.value.to_string()),
            Expr::StrLit(n) => {
                self.write("\"");
                self.write(&n.value);
                self.write("\"");
            }
            Expr::BoolLit(n) => self.write(if n.value { "true" } else { "false" }),
            Expr::Ident(n) => self.print_ident(n),
            Expr::Dot(n) => {
                self.print_expr(&n.base);
                self.write(".");
                self.print_ident(&n.field);
            }
            Expr::Assign(n) => {
                self.write("(");
                self.print_expr(&n.lhs);
                self.write(" = ");
                self.print_expr(&n.rhs);
                self.write(")");
            }
            Expr::Call(n) => self.print_call(n),
            Expr::Unary(n) => {
                self.write("(");
                self.write(match n.op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Not => "!",
                });
                self.print_expr(&n.operand);
                self.write(")");
            }
            Expr::Binary(n) => {
                self.write("(");
                self.print_expr(&n.lhs);
                self.write(" ");
                self.write(operator_to_string(n.op));
                self.write(" ");
                self.print_expr(&n.rhs);
                self.write(")");
            }
        }
    }

    fn print_call(&mut self, node: &CallExpr<'_>) {
        self.print_ident(&node.callee);
        self.write("(");
        for (i, arg) in node.args.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.print_expr(arg);
        }
        self.write(")");
    }

    /// The annotation hook: bound uses print `name(rendering)`.
    fn print_ident(&mut self, ident: &Ident) {
        self.output.push_str(self.interner.resolve(ident.name));
        if ident.ctx != IdentContext::Reference {
            return;
        }
        let rendered = self.resolution.and_then(|res| {
            let id = res.bindings.get(&ident.data.id)?;
            let symbol = res.symbols.get(*id)?;
            Some(symbol.render(self.interner))
        });
        if let Some(rendered) = rendered {
            self.output.push('(');
            self.output.push_str(&rendered);
            self.output.push(')');
        }
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn write_newline(&mut self) {
        self.output.push_str(&self.options.new_line);
    }
}

/// Source-text spelling of a binary operator.
pub fn operator_to_string(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
        BinaryOp::And => "&&",
        BinaryOp::Or => "||",
        BinaryOp::Eq => "==",
        BinaryOp::Ne => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::Gt => ">",
        BinaryOp::Le => "<=",
        BinaryOp::Ge => ">=",
    }
}

//! Abstract syntax tree — typed nodes for mini-C.
//!
//! The tree is strictly parent-owns-children: inline owned values, `Box`
//! for recursive positions, `Option` for the optional children (`else`
//! blocks, `return` values, the empty expression statement). The parser
//! constructs this tree; the lowering pass in `codegen` walks it.
//!
//! The tree printer renders one node per line, with `" |-"` appended to
//! the indent prefix per nesting level. Its output is deterministic and
//! doubles as a golden-file test surface.

use std::fmt;

/// The four source-level types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ty {
    Int,
    Float,
    Bool,
    Void,
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Ty::Int => write!(f, "int"),
            Ty::Float => write!(f, "float"),
            Ty::Bool => write!(f, "bool"),
            Ty::Void => write!(f, "void"),
        }
    }
}

// ── Operators ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Or,  // ||
    And, // &&
    Eq,  // ==
    Ne,  // !=
    Lt,  // <
    Le,  // <=
    Gt,  // >
    Ge,  // >=
    Add, // +
    Sub, // -
    Mul, // *
    Div, // /
    Rem, // %
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BinOp::Or => "||",
            BinOp::And => "&&",
            BinOp::Eq => "==",
            BinOp::Ne => "!=",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg, // -
    Not, // !
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

// ── Expressions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Integer literal: `42`
    IntLit(i32),

    /// Float literal: `3.14`
    FloatLit(f32),

    /// Boolean literal: `true` / `false`
    BoolLit(bool),

    /// Variable reference: `x`
    VarRef(String),

    /// Assignment to a bare identifier: `x = expr`. The target can only
    /// be a name — the parser produces this node only on `IDENT =`.
    Assign { name: String, value: Box<Expr> },

    /// Binary operation: `a + b`, `a && b`, …
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// Unary operation: `-x`, `!b`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Function call: `f(a, b)`
    Call { callee: String, args: Vec<Expr> },
}

// ── Statements and declarations ──────────────────────────────────────

/// A variable declaration, local (`int x;` inside a block) or global.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub name: String,
    pub ty: Ty,
}

/// A block: local declarations first, then statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub decls: Vec<VarDecl>,
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// An expression statement; `None` is the empty statement `;`.
    Expr(Option<Expr>),

    /// A nested block statement.
    Block(Block),

    /// `if (cond) { … } else { … }` — the else block is optional.
    If {
        cond: Expr,
        then_block: Block,
        else_block: Option<Block>,
    },

    /// `while (cond) stmt` — the body is any statement.
    While { cond: Expr, body: Box<Stmt> },

    /// `return;` or `return expr;`
    Return(Option<Expr>),
}

/// A function parameter. A `(void)` parameter list parses to a single
/// parameter of type [`Ty::Void`]; lowering and printing treat that the
/// same as an empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: Ty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncProto {
    pub name: String,
    pub ret: Ty,
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDef {
    pub proto: FuncProto,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extern {
    pub name: String,
    pub ret: Ty,
    pub params: Vec<Param>,
}

/// A top-level declaration: function definition or global variable.
#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Func(FuncDef),
    Global(VarDecl),
}

/// The root of the tree: externs in order, then declarations in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub externs: Vec<Extern>,
    pub decls: Vec<Decl>,
}

// ── Tree printer ─────────────────────────────────────────────────────

const INDENT: &str = " |-";

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Program")?;
        let child = INDENT.to_string();
        for ext in &self.externs {
            write_extern(f, ext, &child)?;
        }
        for decl in &self.decls {
            match decl {
                Decl::Func(func) => write_func(f, func, &child)?,
                Decl::Global(var) => writeln!(f, "{}Declared {} {}", child, var.ty, var.name)?,
            }
        }
        Ok(())
    }
}

fn write_extern(f: &mut fmt::Formatter<'_>, ext: &Extern, prefix: &str) -> fmt::Result {
    writeln!(f, "{}Extern {} {} with parameters", prefix, ext.ret, ext.name)?;
    write_params(f, &ext.params, &format!("{}{}", prefix, INDENT))
}

fn write_func(f: &mut fmt::Formatter<'_>, func: &FuncDef, prefix: &str) -> fmt::Result {
    writeln!(f, "{}Function Definition", prefix)?;
    let child = format!("{}{}", prefix, INDENT);
    writeln!(
        f,
        "{}Function Prototype {} {} with parameters",
        child, func.proto.ret, func.proto.name
    )?;
    write_params(f, &func.proto.params, &format!("{}{}", child, INDENT))?;
    write_block(f, &func.body, &child)
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[Param], prefix: &str) -> fmt::Result {
    for param in params {
        if param.ty == Ty::Void {
            continue;
        }
        writeln!(f, "{}Function parameter {} {}", prefix, param.ty, param.name)?;
    }
    Ok(())
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block, prefix: &str) -> fmt::Result {
    writeln!(f, "{}Block", prefix)?;
    let child = format!("{}{}", prefix, INDENT);
    for decl in &block.decls {
        writeln!(f, "{}Declared {} {}", child, decl.ty, decl.name)?;
    }
    for stmt in &block.stmts {
        write_stmt(f, stmt, &child)?;
    }
    Ok(())
}

fn write_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, prefix: &str) -> fmt::Result {
    let child = format!("{}{}", prefix, INDENT);
    match stmt {
        Stmt::Expr(None) => Ok(()),
        Stmt::Expr(Some(expr)) => write_expr(f, expr, prefix),
        Stmt::Block(block) => write_block(f, block, prefix),
        Stmt::If {
            cond,
            then_block,
            else_block,
        } => {
            writeln!(f, "{}If", prefix)?;
            write_expr(f, cond, &child)?;
            write_block(f, then_block, &child)?;
            if let Some(else_block) = else_block {
                write_block(f, else_block, &child)?;
            }
            Ok(())
        }
        Stmt::While { cond, body } => {
            writeln!(f, "{}While", prefix)?;
            write_expr(f, cond, &child)?;
            write_stmt(f, body, &child)
        }
        Stmt::Return(value) => {
            writeln!(f, "{}Return expression", prefix)?;
            if let Some(value) = value {
                write_expr(f, value, &child)?;
            }
            Ok(())
        }
    }
}

fn write_expr(f: &mut fmt::Formatter<'_>, expr: &Expr, prefix: &str) -> fmt::Result {
    let child = format!("{}{}", prefix, INDENT);
    match expr {
        Expr::IntLit(n) => writeln!(f, "{}{}", prefix, n),
        Expr::FloatLit(n) => writeln!(f, "{}{}", prefix, n),
        Expr::BoolLit(b) => writeln!(f, "{}{}", prefix, b),
        Expr::VarRef(name) => writeln!(f, "{}{}", prefix, name),
        Expr::Assign { name, value } => {
            writeln!(f, "{}Assigned identifier", prefix)?;
            writeln!(f, "{}{}", child, name)?;
            write_expr(f, value, &child)
        }
        Expr::Binary { op, lhs, rhs } => {
            writeln!(f, "{}Binary operation", prefix)?;
            write_expr(f, lhs, &child)?;
            writeln!(f, "{}{}", child, op)?;
            write_expr(f, rhs, &child)
        }
        Expr::Unary { op, operand } => {
            writeln!(f, "{}Unary operation of {}", prefix, op)?;
            write_expr(f, operand, &child)
        }
        Expr::Call { callee, args } => {
            writeln!(f, "{}Calling function {} with arguments", prefix, callee)?;
            for arg in args {
                write_expr(f, arg, &child)?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_literals_and_binary() {
        let expr = Expr::Binary {
            op: BinOp::Add,
            lhs: Box::new(Expr::IntLit(1)),
            rhs: Box::new(Expr::Binary {
                op: BinOp::Mul,
                lhs: Box::new(Expr::IntLit(2)),
                rhs: Box::new(Expr::IntLit(3)),
            }),
        };
        let program = Program {
            externs: vec![],
            decls: vec![Decl::Func(FuncDef {
                proto: FuncProto {
                    name: "main".into(),
                    ret: Ty::Int,
                    params: vec![],
                },
                body: Block {
                    decls: vec![],
                    stmts: vec![Stmt::Return(Some(expr))],
                },
            })],
        };
        let rendered = program.to_string();
        let expected = "\
Program
 |-Function Definition
 |- |-Function Prototype int main with parameters
 |- |-Block
 |- |- |-Return expression
 |- |- |- |-Binary operation
 |- |- |- |- |-1
 |- |- |- |- |-+
 |- |- |- |- |-Binary operation
 |- |- |- |- |- |-2
 |- |- |- |- |- |-*
 |- |- |- |- |- |-3
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_skips_void_param() {
        let program = Program {
            externs: vec![Extern {
                name: "tick".into(),
                ret: Ty::Void,
                params: vec![Param {
                    name: "void".into(),
                    ty: Ty::Void,
                }],
            }],
            decls: vec![],
        };
        let rendered = program.to_string();
        assert_eq!(rendered, "Program\n |-Extern void tick with parameters\n");
    }

    #[test]
    fn test_render_empty_statement_is_silent() {
        let block = Block {
            decls: vec![],
            stmts: vec![Stmt::Expr(None), Stmt::Expr(Some(Expr::IntLit(5)))],
        };
        let mut out = String::new();
        use std::fmt::Write;
        struct Wrap<'a>(&'a Block);
        impl fmt::Display for Wrap<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write_block(f, self.0, "")
            }
        }
        write!(out, "{}", Wrap(&block)).unwrap();
        assert_eq!(out, "Block\n |-5\n");
    }
}

//! Parser — recursive descent (declarations, statements) + precedence
//! climbing (expressions).
//!
//! Each grammar production maps to a method that consumes tokens from the
//! pushback stream and returns an AST node; the branch taken is always
//! decided by the FIRST set of the production, so error messages can name
//! exactly the tokens that were expected.
//!
//! The expression grammar's stratified precedence layers are encoded as a
//! single climbing loop over a binding-power table instead of one pair of
//! productions per layer — same AST, same left-associativity:
//!
//! | operators            | binding power |
//! |----------------------|---------------|
//! | `\|\|`               | 1             |
//! | `&&`                 | 2             |
//! | `==` `!=`            | 3             |
//! | `<` `<=` `>` `>=`    | 4             |
//! | `+` `-`              | 5             |
//! | `*` `/` `%`          | 6             |
//!
//! Unary `-` and `!` bind tighter than all binary operators and stack
//! right-associatively.
//!
//! The one genuinely LL(2) spot in the grammar is `IDENT = expr` vs an
//! rvalue starting with `IDENT`: the identifier is consumed, the next
//! token inspected, and on anything but `=` the identifier is pushed back
//! into the stream.

use crate::ast::*;
use crate::errors::CompileError;
use crate::stream::TokenStream;
use crate::token::{Token, TokenKind};

pub struct Parser {
    stream: TokenStream,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self {
            stream: TokenStream::new(source),
        }
    }

    /// Parse a complete program. An empty source parses to an empty root.
    pub fn parse(&mut self) -> Result<Program, CompileError> {
        let mut program = Program::default();
        if self.check(&TokenKind::Eof) {
            return Ok(program);
        }
        while self.check(&TokenKind::Extern) {
            program.externs.push(self.extern_decl()?);
        }
        program.decls.push(self.decl()?);
        while !self.check(&TokenKind::Eof) {
            program.decls.push(self.decl()?);
        }
        Ok(program)
    }

    // ── Top-level declarations ───────────────────────────────────────

    /// extern ::= "extern" type_spec IDENT "(" params ")" ";"
    fn extern_decl(&mut self) -> Result<Extern, CompileError> {
        self.expect(TokenKind::Extern)?;
        let ret = self.type_spec()?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::LParen)?;
        let params = self.params()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Extern { name, ret, params })
    }

    /// decl ::= "void" IDENT "(" params ")" block
    ///        | var_type IDENT ( "(" params ")" block | ";" )
    fn decl(&mut self) -> Result<Decl, CompileError> {
        if self.check(&TokenKind::Void) {
            self.stream.advance();
            let name = self.expect_ident()?;
            self.expect(TokenKind::LParen)?;
            let params = self.params()?;
            self.expect(TokenKind::RParen)?;
            let body = self.block()?;
            return Ok(Decl::Func(FuncDef {
                proto: FuncProto {
                    name,
                    ret: Ty::Void,
                    params,
                },
                body,
            }));
        }

        let ty = self.var_type()?;
        let name = self.expect_ident()?;
        if self.check(&TokenKind::LParen) {
            self.stream.advance();
            let params = self.params()?;
            self.expect(TokenKind::RParen)?;
            let body = self.block()?;
            Ok(Decl::Func(FuncDef {
                proto: FuncProto {
                    name,
                    ret: ty,
                    params,
                },
                body,
            }))
        } else if self.check(&TokenKind::Semicolon) {
            self.stream.advance();
            Ok(Decl::Global(VarDecl { name, ty }))
        } else {
            Err(self.syntax_error(
                "expected '(' after function identifier or ';' after variable identifier",
            ))
        }
    }

    /// type_spec ::= "void" | var_type
    fn type_spec(&mut self) -> Result<Ty, CompileError> {
        if self.check(&TokenKind::Void) {
            self.stream.advance();
            return Ok(Ty::Void);
        }
        self.var_type()
    }

    /// var_type ::= "int" | "float" | "bool"
    fn var_type(&mut self) -> Result<Ty, CompileError> {
        let ty = match self.peek_kind() {
            TokenKind::Int => Ty::Int,
            TokenKind::Float => Ty::Float,
            TokenKind::Bool => Ty::Bool,
            _ => return Err(self.syntax_error("expected 'int', 'float', or 'bool'")),
        };
        self.stream.advance();
        Ok(ty)
    }

    /// params ::= param_list | "void" | ε
    ///
    /// `(void)` parses to a single synthetic parameter of type void; both
    /// encodings of "no parameters" are accepted downstream.
    fn params(&mut self) -> Result<Vec<Param>, CompileError> {
        match self.peek_kind() {
            TokenKind::RParen => Ok(Vec::new()),
            TokenKind::Void => {
                self.stream.advance();
                Ok(vec![Param {
                    name: "void".to_string(),
                    ty: Ty::Void,
                }])
            }
            TokenKind::Int | TokenKind::Float | TokenKind::Bool => {
                let mut params = vec![self.param()?];
                while self.check(&TokenKind::Comma) {
                    self.stream.advance();
                    params.push(self.param()?);
                }
                Ok(params)
            }
            _ => Err(self.syntax_error("expected 'void', 'int', 'float', 'bool', or ')'")),
        }
    }

    /// param ::= var_type IDENT
    fn param(&mut self) -> Result<Param, CompileError> {
        let ty = self.var_type()?;
        let name = self.expect_ident()?;
        Ok(Param { name, ty })
    }

    // ── Blocks and statements ────────────────────────────────────────

    /// block ::= "{" local_decl* stmt* "}"
    fn block(&mut self) -> Result<Block, CompileError> {
        self.expect(TokenKind::LBrace)?;
        let mut decls = Vec::new();
        while matches!(
            self.peek_kind(),
            TokenKind::Int | TokenKind::Float | TokenKind::Bool
        ) {
            decls.push(self.local_decl()?);
        }
        let mut stmts = Vec::new();
        while self.starts_stmt() {
            stmts.push(self.stmt()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Block { decls, stmts })
    }

    /// local_decl ::= var_type IDENT ";"
    fn local_decl(&mut self) -> Result<VarDecl, CompileError> {
        let ty = self.var_type()?;
        let name = self.expect_ident()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(VarDecl { name, ty })
    }

    fn starts_stmt(&mut self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Semicolon
                | TokenKind::LBrace
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Return
        ) || self.starts_expr()
    }

    fn starts_expr(&mut self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::LParen
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Ident(_)
                | TokenKind::IntLit(_)
                | TokenKind::FloatLit(_)
                | TokenKind::BoolLit(_)
        )
    }

    /// stmt ::= expr_stmt | block | if_stmt | while_stmt | return_stmt
    fn stmt(&mut self) -> Result<Stmt, CompileError> {
        match self.peek_kind() {
            TokenKind::LBrace => Ok(Stmt::Block(self.block()?)),
            TokenKind::If => self.if_stmt(),
            TokenKind::While => self.while_stmt(),
            TokenKind::Return => self.return_stmt(),
            TokenKind::Semicolon => self.expr_stmt(),
            _ => {
                if self.starts_expr() {
                    self.expr_stmt()
                } else {
                    Err(self.syntax_error(
                        "expected '(', '-', '!', an identifier, a literal, ';', '{', 'if', 'while', or 'return'",
                    ))
                }
            }
        }
    }

    /// expr_stmt ::= expr ";" | ";"
    fn expr_stmt(&mut self) -> Result<Stmt, CompileError> {
        if self.check(&TokenKind::Semicolon) {
            self.stream.advance();
            return Ok(Stmt::Expr(None));
        }
        let expr = self.expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Expr(Some(expr)))
    }

    /// if_stmt ::= "if" "(" expr ")" block ("else" block)?
    fn if_stmt(&mut self) -> Result<Stmt, CompileError> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.expr()?;
        self.expect(TokenKind::RParen)?;
        let then_block = self.block()?;
        let else_block = if self.check(&TokenKind::Else) {
            self.stream.advance();
            Some(self.block()?)
        } else {
            None
        };
        Ok(Stmt::If {
            cond,
            then_block,
            else_block,
        })
    }

    /// while_stmt ::= "while" "(" expr ")" stmt
    fn while_stmt(&mut self) -> Result<Stmt, CompileError> {
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.expr()?;
        self.expect(TokenKind::RParen)?;
        let body = Box::new(self.stmt()?);
        Ok(Stmt::While { cond, body })
    }

    /// return_stmt ::= "return" expr? ";"
    fn return_stmt(&mut self) -> Result<Stmt, CompileError> {
        self.expect(TokenKind::Return)?;
        if self.check(&TokenKind::Semicolon) {
            self.stream.advance();
            return Ok(Stmt::Return(None));
        }
        let value = self.expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Return(Some(value)))
    }

    // ── Expressions ──────────────────────────────────────────────────

    /// expr ::= IDENT "=" expr | rval
    fn expr(&mut self) -> Result<Expr, CompileError> {
        if matches!(self.peek_kind(), TokenKind::Ident(_)) {
            let ident = self.stream.advance();
            if self.check(&TokenKind::Assign) {
                self.stream.advance();
                let value = Box::new(self.expr()?);
                let name = match ident.kind {
                    TokenKind::Ident(name) => name,
                    _ => unreachable!("peeked an identifier"),
                };
                return Ok(Expr::Assign { name, value });
            }
            // Not an assignment after all: put the identifier back and
            // reparse it as the start of an rvalue.
            self.stream.push_back(ident);
        }
        self.binary_expr(0)
    }

    fn binding_power(kind: &TokenKind) -> Option<(BinOp, u8)> {
        let entry = match kind {
            TokenKind::OrOr => (BinOp::Or, 1),
            TokenKind::AndAnd => (BinOp::And, 2),
            TokenKind::EqEq => (BinOp::Eq, 3),
            TokenKind::BangEq => (BinOp::Ne, 3),
            TokenKind::Lt => (BinOp::Lt, 4),
            TokenKind::LtEq => (BinOp::Le, 4),
            TokenKind::Gt => (BinOp::Gt, 4),
            TokenKind::GtEq => (BinOp::Ge, 4),
            TokenKind::Plus => (BinOp::Add, 5),
            TokenKind::Minus => (BinOp::Sub, 5),
            TokenKind::Star => (BinOp::Mul, 6),
            TokenKind::Slash => (BinOp::Div, 6),
            TokenKind::Percent => (BinOp::Rem, 6),
            _ => return None,
        };
        Some(entry)
    }

    /// The precedence-climbing loop. Every binary level is
    /// left-associative: the right-hand side parses at `bp + 1` so an
    /// operator of the same level stops and becomes the next iteration.
    fn binary_expr(&mut self, min_bp: u8) -> Result<Expr, CompileError> {
        let mut lhs = self.unary()?;
        loop {
            let (op, bp) = match Self::binding_power(&self.peek_kind()) {
                Some(entry) => entry,
                None => break,
            };
            if bp < min_bp {
                break;
            }
            self.stream.advance();
            let rhs = self.binary_expr(bp + 1)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// Unary `-` and `!` stack right-associatively: `- -x` is `-(-x)`.
    fn unary(&mut self) -> Result<Expr, CompileError> {
        let op = match self.peek_kind() {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.primary(),
        };
        self.stream.advance();
        let operand = Box::new(self.unary()?);
        Ok(Expr::Unary { op, operand })
    }

    /// primary ::= "(" expr ")" | IDENT | IDENT "(" args ")" | literal
    fn primary(&mut self) -> Result<Expr, CompileError> {
        let token = self.stream.advance();
        match token.kind {
            TokenKind::LParen => {
                let expr = self.expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::Ident(name) => {
                if self.check(&TokenKind::LParen) {
                    self.stream.advance();
                    let args = self.args()?;
                    self.expect(TokenKind::RParen)?;
                    Ok(Expr::Call { callee: name, args })
                } else {
                    Ok(Expr::VarRef(name))
                }
            }
            TokenKind::IntLit(n) => Ok(Expr::IntLit(n)),
            TokenKind::FloatLit(n) => Ok(Expr::FloatLit(n)),
            TokenKind::BoolLit(b) => Ok(Expr::BoolLit(b)),
            _ => Err(Self::syntax_error_at(
                &token,
                "expected '(', an identifier, or an integer, float, or bool literal",
            )),
        }
    }

    /// args ::= arg_list | ε
    fn args(&mut self) -> Result<Vec<Expr>, CompileError> {
        if self.check(&TokenKind::RParen) {
            return Ok(Vec::new());
        }
        let mut args = vec![self.expr()?];
        while self.check(&TokenKind::Comma) {
            self.stream.advance();
            args.push(self.expr()?);
        }
        Ok(args)
    }

    // ── Token helpers ────────────────────────────────────────────────

    fn peek_kind(&mut self) -> TokenKind {
        self.stream.peek().kind.clone()
    }

    fn check(&mut self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek_kind()) == std::mem::discriminant(kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, CompileError> {
        if self.check(&kind) {
            Ok(self.stream.advance())
        } else {
            Err(self.syntax_error(&format!("expected '{}'", kind)))
        }
    }

    fn expect_ident(&mut self) -> Result<String, CompileError> {
        let token = self.stream.advance();
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            _ => Err(Self::syntax_error_at(&token, "expected an identifier")),
        }
    }

    fn syntax_error(&mut self, expected: &str) -> CompileError {
        let token = self.stream.peek().clone();
        Self::syntax_error_at(&token, expected)
    }

    fn syntax_error_at(token: &Token, expected: &str) -> CompileError {
        CompileError::Syntax {
            message: format!("{}, found '{}'", expected, token.kind),
            line: token.line,
            column: token.column,
            span: token.span,
        }
    }
}

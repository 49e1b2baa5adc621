//! minicc — a single-pass compiler for a small statically typed C-like
//! language ("mini-C"), emitting textual IR for an external backend.
//!
//! # Compiler pipeline
//!
//! ```text
//! Source code (.c)
//!     │
//!     ▼
//! ┌──────────┐
//! │  Lexer    │  On-demand tokenizer with line/column tracking
//! └────┬─────┘
//!      │  (pushback token stream)
//!      ▼
//! ┌──────────┐
//! │  Parser   │  Recursive descent + precedence climbing → AST
//! └────┬─────┘
//!      │
//!      ▼
//! ┌──────────┐
//! │ Codegen   │  Scoped identifier resolution, type promotion,
//! └────┬─────┘  IR emission through the builder
//!      │
//!      ▼
//! Textual IR (output.ll)
//! ```

pub mod ast;
pub mod codegen;
pub mod errors;
pub mod ir;
pub mod lexer;
pub mod parser;
pub mod stream;
pub mod token;

pub use codegen::Lowered;
pub use errors::CompileError;

/// Parse a source string into an AST.
pub fn parse(source: &str) -> Result<ast::Program, CompileError> {
    parser::Parser::new(source).parse()
}

/// Compile a source string all the way to an IR module.
pub fn compile_to_ir(source: &str) -> Result<Lowered, CompileError> {
    let program = parse(source)?;
    codegen::lower(&program)
}

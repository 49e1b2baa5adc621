//! Lexer — tokenizes mini-C source one token at a time.
//!
//! The lexer scans the source character by character with a single
//! character of lookahead, maintaining a line/column cursor across calls.
//! Key design decisions:
//!
//! - **Totality**: the lexer never fails. A byte that starts no lexeme
//!   (including a lone `&` or `|`) is emitted as an `Unknown` token and
//!   rejected later by the parser, so every input produces a finite token
//!   stream ending in `Eof`.
//!
//! - **Lazy production**: tokens are produced on demand via
//!   [`Lexer::next_token`]; the parser pulls through a pushback buffer
//!   (see the `stream` module) rather than lexing the whole file up front.
//!
//! - **Keyword recognition**: after scanning an identifier we check it
//!   against a keyword table. `true`/`false` become boolean literals.

use crate::token::{Span, Token, TokenKind};

pub struct Lexer {
    chars: Vec<char>,
    current: usize,  // current position (char index)
    byte_pos: usize, // current byte position
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
            byte_pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Scan and return the next token. At end of input this returns an
    /// `Eof` token (with lexeme `"0"`) on every call.
    pub fn next_token(&mut self) -> Token {
        loop {
            while !self.is_at_end() && self.peek().is_ascii_whitespace() {
                self.advance();
            }

            let line = self.line;
            let column = self.column;
            let start = self.byte_pos;
            let start_char = self.current;

            if self.is_at_end() {
                return Token::new(
                    TokenKind::Eof,
                    "0".to_string(),
                    line,
                    column,
                    Span::new(start, start),
                );
            }

            let c = self.advance();
            let kind = match c {
                c if c.is_ascii_alphabetic() || c == '_' => self.identifier(c),
                c if c.is_ascii_digit() || c == '.' => self.number(c),

                '=' => {
                    if self.match_char('=') {
                        TokenKind::EqEq
                    } else {
                        TokenKind::Assign
                    }
                }
                '!' => {
                    if self.match_char('=') {
                        TokenKind::BangEq
                    } else {
                        TokenKind::Bang
                    }
                }
                '<' => {
                    if self.match_char('=') {
                        TokenKind::LtEq
                    } else {
                        TokenKind::Lt
                    }
                }
                '>' => {
                    if self.match_char('=') {
                        TokenKind::GtEq
                    } else {
                        TokenKind::Gt
                    }
                }
                '&' => {
                    if self.match_char('&') {
                        TokenKind::AndAnd
                    } else {
                        TokenKind::Unknown('&')
                    }
                }
                '|' => {
                    if self.match_char('|') {
                        TokenKind::OrOr
                    } else {
                        TokenKind::Unknown('|')
                    }
                }

                // Division, or a line comment that restarts tokenization.
                '/' => {
                    if self.match_char('/') {
                        while !self.is_at_end() && self.peek() != '\n' && self.peek() != '\r' {
                            self.advance();
                        }
                        continue;
                    }
                    TokenKind::Slash
                }

                '{' => TokenKind::LBrace,
                '}' => TokenKind::RBrace,
                '(' => TokenKind::LParen,
                ')' => TokenKind::RParen,
                ';' => TokenKind::Semicolon,
                ',' => TokenKind::Comma,
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '%' => TokenKind::Percent,

                other => TokenKind::Unknown(other),
            };

            let lexeme: String = self.chars[start_char..self.current].iter().collect();
            return Token::new(kind, lexeme, line, column, Span::new(start, self.byte_pos));
        }
    }

    // ── Lexeme scanners ──────────────────────────────────────────────

    fn identifier(&mut self, first: char) -> TokenKind {
        let mut name = String::new();
        name.push(first);
        while !self.is_at_end() && (self.peek().is_ascii_alphanumeric() || self.peek() == '_') {
            name.push(self.advance());
        }

        match name.as_str() {
            "int" => TokenKind::Int,
            "float" => TokenKind::Float,
            "bool" => TokenKind::Bool,
            "void" => TokenKind::Void,
            "extern" => TokenKind::Extern,
            "if" => TokenKind::If,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "return" => TokenKind::Return,
            "true" => TokenKind::BoolLit(true),
            "false" => TokenKind::BoolLit(false),
            _ => TokenKind::Ident(name),
        }
    }

    fn number(&mut self, first: char) -> TokenKind {
        let mut s = String::new();
        s.push(first);
        let mut is_float = first == '.';

        while !self.is_at_end() && self.peek().is_ascii_digit() {
            s.push(self.advance());
        }

        // A `.` after the integer part switches to a float literal.
        if !is_float && !self.is_at_end() && self.peek() == '.' {
            is_float = true;
            s.push(self.advance());
            while !self.is_at_end() && self.peek().is_ascii_digit() {
                s.push(self.advance());
            }
        }

        if is_float {
            TokenKind::FloatLit(s.parse::<f32>().unwrap_or(0.0))
        } else {
            TokenKind::IntLit(s.parse::<i32>().unwrap_or(i32::MAX))
        }
    }

    // ── Character-level helpers ──────────────────────────────────────

    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        self.byte_pos += c.len_utf8();
        if c == '\n' || c == '\r' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.chars[self.current]
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.chars[self.current] != expected {
            return false;
        }
        self.advance();
        true
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

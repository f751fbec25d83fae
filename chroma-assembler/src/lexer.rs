//! # Lexer for the Chroma Micro-Assembly Language

use logos::Logos;

/// Tokens for chroma micro-assembly
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r]+")] // Skip whitespace (not newlines)
#[logos(skip r"[;#][^\n]*")] // Skip comments
pub enum Token {
    /// Register (r0-r15)
    #[regex(r"r([0-9]|1[0-5])", |lex| lex.slice().to_string())]
    Register(String),

    /// Instruction mnemonic
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Decimal number, possibly negative
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse().ok())]
    Number(i64),

    /// Comma
    #[token(",")]
    Comma,

    /// Newline
    #[regex(r"\n")]
    Newline,
}

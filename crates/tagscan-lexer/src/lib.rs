//! tagscan lexer
//!
//! Tokenizes sequence definition sources into a stream of tokens.
//! Handles punctuation and comparison operators, the `..` range separator,
//! the `::=` assignment, number and string literals, and the split between
//! lowercase identifiers, capitalized type references and reserved words.
//!
//! Scanning never aborts: unexpected characters are collected as diagnostics
//! and the scan carries on with the next character.
//!
//! # Example
//!
//! ```
//! use tagscan_lexer::{Scanner, TokenKind};
//!
//! let output = Scanner::tokenize("");
//! assert_eq!(output.tokens.len(), 1); // Just EOF
//! assert_eq!(output.tokens[0].kind, TokenKind::Eof);
//! assert!(!output.has_errors());
//! ```

pub mod keywords;
pub mod scanner;
pub mod token;

pub use keywords::Keywords;
pub use scanner::Scanner;
pub use token::{Literal, Span, Token, TokenKind};

/// What went wrong while scanning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unterminated string")]
    UnterminatedString,
}

/// Lexer error with position information.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("[line {line}] Error: {kind}")]
pub struct LexerError {
    pub kind: ErrorKind,
    pub line: usize,
    pub column: usize,
}

/// Result of a full scan: every token recognized plus the diagnostics
/// reported along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<LexerError>,
}

impl ScanOutput {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

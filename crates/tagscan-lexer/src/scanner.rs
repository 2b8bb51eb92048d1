use tracing::{debug, trace};

use crate::keywords::Keywords;
use crate::token::{Literal, Span, Token, TokenKind};
use crate::{ErrorKind, LexerError, ScanOutput};

/// How a name-shaped lexeme is classified once fully consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameClass {
    Identifier,
    TypeReference,
    Keyword(TokenKind),
}

impl NameClass {
    fn token_kind(self) -> TokenKind {
        match self {
            NameClass::Identifier => TokenKind::Identifier,
            NameClass::TypeReference => TokenKind::TypeReference,
            NameClass::Keyword(_) => TokenKind::ReserveWord,
        }
    }
}

/// Source scanner.
///
/// Walks a `Vec<char>` copy of the source with a `start`/`current` cursor pair.
/// Every lexeme is `chars[start..current]` at the moment its token is emitted,
/// and carries the line and column of its first character.
///
/// A scanner is single-use: [`Scanner::scan`] consumes it.
pub struct Scanner<'k> {
    keywords: &'k Keywords,
    chars: Vec<char>,
    start: usize,
    current: usize,
    line: usize,
    column: usize,
    start_line: usize,
    start_column: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<LexerError>,
}

impl Scanner<'static> {
    /// Create a new scanner for the given source using the global keyword table.
    pub fn new(source: &str) -> Self {
        Scanner::with_keywords(source, Keywords::global())
    }

    /// Tokenize the entire source, collecting diagnostics instead of stopping.
    pub fn tokenize(source: &str) -> ScanOutput {
        Scanner::new(source).scan()
    }
}

impl<'k> Scanner<'k> {
    /// Create a scanner that resolves reserved words against `keywords`.
    pub fn with_keywords(source: &str, keywords: &'k Keywords) -> Self {
        Self {
            keywords,
            chars: source.chars().collect(),
            start: 0,
            current: 0,
            line: 1,
            column: 1,
            start_line: 1,
            start_column: 1,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Scan all tokens from the source. The last token is always `EOF`.
    pub fn scan(mut self) -> ScanOutput {
        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.start_column = self.column;
            self.scan_token();
        }

        let span = Span::new(self.current, self.current, self.line, self.column);
        self.tokens
            .push(Token::new(TokenKind::Eof, String::new(), None, span));

        debug!(
            tokens = self.tokens.len(),
            diagnostics = self.diagnostics.len(),
            lines = self.line,
            "scan finished"
        );

        ScanOutput {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
        }
    }

    /// Scan the next lexeme starting at `self.start`.
    fn scan_token(&mut self) {
        let c = self.advance();

        match c {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),
            '|' => self.add_token(TokenKind::VerticalLine),

            '.' => {
                let kind = if self.match_char('.') {
                    TokenKind::RangeSeparator
                } else {
                    TokenKind::Dot
                };
                self.add_token(kind);
            }
            ':' => self.scan_colon(),

            '!' => self.add_with_equal(TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_with_equal(TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_with_equal(TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_with_equal(TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.match_char('/') {
                    self.skip_line_comment();
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            // Whitespace
            ' ' | '\r' | '\t' => {}
            '\n' => self.newline(),

            '"' => self.scan_string(),
            c if is_digit(c) => self.scan_number(),
            c if is_alpha(c) => self.scan_name(c),

            _ => self.report(ErrorKind::UnexpectedCharacter(c)),
        }
    }

    // --- Operators ---

    /// `:` `:` `=` is an assignment, `:` `:` is a single colon, `:` alone is a colon.
    fn scan_colon(&mut self) {
        let (kind, extra) = colon_kind(self.peek(), self.peek_next());
        for _ in 0..extra {
            self.advance();
        }
        self.add_token(kind);
    }

    fn add_with_equal(&mut self, with_equal: TokenKind, alone: TokenKind) {
        let kind = if self.match_char('=') { with_equal } else { alone };
        self.add_token(kind);
    }

    /// Skip a `//` comment up to, not including, the next newline.
    fn skip_line_comment(&mut self) {
        while self.peek() != '\n' && !self.is_at_end() {
            self.advance();
        }
    }

    // --- Literals ---

    /// Scan a string literal. No escape processing: the value is the raw text
    /// between the quotes, newlines included.
    fn scan_string(&mut self) {
        while self.peek() != '"' && !self.is_at_end() {
            if self.advance() == '\n' {
                self.newline();
            }
        }

        if self.is_at_end() {
            self.report(ErrorKind::UnterminatedString);
            return;
        }

        self.advance(); // closing quote

        let value: String = self.chars[self.start + 1..self.current - 1].iter().collect();
        self.add_literal(TokenKind::String, Some(Literal::String(value)));
    }

    /// Scan a number literal: digits with at most one fractional part.
    /// A trailing `.` without a digit after it is left for the next token.
    fn scan_number(&mut self) {
        while is_digit(self.peek()) {
            self.advance();
        }

        if self.peek() == '.' && is_digit(self.peek_next()) {
            self.advance();
            while is_digit(self.peek()) {
                self.advance();
            }
        }

        let value = self.lexeme().parse::<f64>().ok().map(Literal::Number);
        self.add_literal(TokenKind::Number, value);
    }

    // --- Names ---

    /// Scan an identifier, type reference or reserved word.
    fn scan_name(&mut self, first: char) {
        while is_alpha_numeric(self.peek()) {
            self.advance();
        }

        let class = self.classify(first, &self.lexeme());
        if let NameClass::Keyword(keyword) = class {
            trace!(?keyword, line = self.start_line, "reserved word");
        }
        self.add_token(class.token_kind());
    }

    /// Reserved words win; otherwise the case of the first character decides.
    fn classify(&self, first: char, text: &str) -> NameClass {
        if let Some(kind) = self.keywords.get(text) {
            NameClass::Keyword(kind)
        } else if first.is_ascii_lowercase() {
            NameClass::Identifier
        } else {
            NameClass::TypeReference
        }
    }

    // --- Helpers ---

    fn add_token(&mut self, kind: TokenKind) {
        self.add_literal(kind, None);
    }

    fn add_literal(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let span = Span::new(self.start, self.current, self.start_line, self.start_column);
        let token = Token::new(kind, self.lexeme(), literal, span);
        trace!(%token, line = span.line, "token");
        self.tokens.push(token);
    }

    fn report(&mut self, kind: ErrorKind) {
        let error = LexerError {
            kind,
            line: self.start_line,
            column: self.start_column,
        };
        trace!(%error, "diagnostic");
        self.diagnostics.push(error);
    }

    fn lexeme(&self) -> String {
        self.chars[self.start..self.current].iter().collect()
    }

    fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    /// Consume and return the next character. Callers check `is_at_end` first.
    fn advance(&mut self) -> char {
        let c = self.chars[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.peek() != expected {
            return false;
        }
        self.advance();
        true
    }

    fn peek(&self) -> char {
        self.chars.get(self.current).copied().unwrap_or('\0')
    }

    fn peek_next(&self) -> char {
        self.chars.get(self.current + 1).copied().unwrap_or('\0')
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.chars.len()
    }
}

/// Decision table for a lexeme starting with `:`, given the two characters
/// after it. Returns the token kind and how many more characters it consumes.
fn colon_kind(second: char, third: char) -> (TokenKind, usize) {
    match (second, third) {
        (':', '=') => (TokenKind::Assignment, 2),
        (':', _) => (TokenKind::Colon, 1),
        _ => (TokenKind::Colon, 0),
    }
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alpha_numeric(c: char) -> bool {
    is_alpha(c) || is_digit(c)
}

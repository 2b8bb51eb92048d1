use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::token::TokenKind;

lazy_static! {
    static ref RESERVED_LOOKUP: Keywords = Keywords::standard();
}

/// Reserved words, keyed by exact spelling.
///
/// Lookups are case-sensitive. `class` and the sequence keywords (`tags`,
/// `begin`, `sequence`, `integer`, `date`, `end`) are also reserved in upper case.
#[derive(Debug, Clone)]
pub struct Keywords {
    map: HashMap<&'static str, TokenKind>,
}

impl Keywords {
    /// The process-wide table, built on first use.
    pub fn global() -> &'static Keywords {
        &RESERVED_LOOKUP
    }

    fn standard() -> Self {
        let mut map = HashMap::new();
        map.insert("and", TokenKind::And);
        map.insert("class", TokenKind::Class);
        map.insert("CLASS", TokenKind::Class);
        map.insert("else", TokenKind::Else);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("fun", TokenKind::Fun);
        map.insert("if", TokenKind::If);
        map.insert("nil", TokenKind::Nil);
        map.insert("or", TokenKind::Or);
        map.insert("print", TokenKind::Print);
        map.insert("return", TokenKind::Return);
        map.insert("super", TokenKind::Super);
        map.insert("this", TokenKind::This);
        map.insert("true", TokenKind::True);
        map.insert("var", TokenKind::Var);
        map.insert("while", TokenKind::While);
        map.insert("tags", TokenKind::Tags);
        map.insert("TAGS", TokenKind::Tags);
        map.insert("begin", TokenKind::Begin);
        map.insert("BEGIN", TokenKind::Begin);
        map.insert("sequence", TokenKind::Sequence);
        map.insert("SEQUENCE", TokenKind::Sequence);
        map.insert("integer", TokenKind::Integer);
        map.insert("INTEGER", TokenKind::Integer);
        map.insert("date", TokenKind::Date);
        map.insert("DATE", TokenKind::Date);
        map.insert("end", TokenKind::End);
        map.insert("END", TokenKind::End);
        Self { map }
    }

    /// Keyword kind for `word`, if it is reserved.
    pub fn get(&self, word: &str) -> Option<TokenKind> {
        self.map.get(word).copied()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.map.contains_key(word)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

//! The ILang scanner.
//!
//! Walks the source text one character at a time. Positions are character
//! offsets, which is what spans and the line map use.

use crate::token::TokenInfo;
use ilang_ast::syntax_kind::SyntaxKind;
use ilang_core::text::TextSpan;
use ilang_core::value::{TypeSymbol, Value};
use ilang_diagnostics::DiagnosticCollection;

/// The scanner converts ILang source text into tokens.
pub struct Scanner {
    /// The source text being scanned.
    text: Vec<char>,
    /// Current position in the text.
    pos: usize,
    /// Start of the current token (after leading whitespace).
    token_start: usize,
    /// The current token kind.
    token: SyntaxKind,
    /// The text of the current token.
    token_value: String,
    /// The literal value of the current token, if it is a number.
    token_literal: Option<Value>,
    /// Accumulated diagnostics.
    diagnostics: DiagnosticCollection,
}

impl Scanner {
    /// Create a new scanner for the given source text.
    pub fn new(text: &str) -> Self {
        Self {
            text: text.chars().collect(),
            pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_literal: None,
            diagnostics: DiagnosticCollection::new(),
        }
    }

    /// Get the current token kind.
    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    /// Get the current token's text.
    #[inline]
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Get the literal value of the current token.
    #[inline]
    pub fn token_literal(&self) -> Option<Value> {
        self.token_literal
    }

    /// Get the start position of the current token.
    #[inline]
    pub fn token_start(&self) -> usize {
        self.token_start
    }

    /// Get the end position of the current token.
    #[inline]
    pub fn token_end(&self) -> usize {
        self.pos
    }

    /// Get accumulated diagnostics.
    pub fn diagnostics(&self) -> &DiagnosticCollection {
        &self.diagnostics
    }

    /// Take accumulated diagnostics, leaving an empty collection.
    pub fn take_diagnostics(&mut self) -> DiagnosticCollection {
        std::mem::take(&mut self.diagnostics)
    }

    /// Snapshot the current token.
    pub fn token_info(&self) -> TokenInfo {
        TokenInfo::new(self.token, self.token_start as u32, self.pos as u32)
            .with_text(self.token_value.clone())
            .with_value(self.token_literal)
    }

    // ========================================================================
    // Character helpers
    // ========================================================================

    #[inline]
    fn current_char(&self) -> Option<char> {
        self.text.get(self.pos).copied()
    }

    #[inline]
    fn char_at(&self, offset: usize) -> Option<char> {
        self.text.get(self.pos + offset).copied()
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if !ch.is_whitespace() {
                return;
            }
            self.pos += 1;
        }
    }

    /// Scan the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.token_value.clear();
        self.token_literal = None;

        self.skip_whitespace();
        self.token_start = self.pos;

        let Some(ch) = self.current_char() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '0'..='9' => self.scan_number(),
            c if is_identifier_start(c) => self.scan_identifier(),
            '+' => self.single(SyntaxKind::PlusToken),
            '-' => self.single(SyntaxKind::MinusToken),
            '*' => self.single(SyntaxKind::AsteriskToken),
            '/' => self.single(SyntaxKind::SlashToken),
            '~' => self.single(SyntaxKind::TildeToken),
            '^' => self.single(SyntaxKind::CaretToken),
            '(' => self.single(SyntaxKind::OpenParenToken),
            ')' => self.single(SyntaxKind::CloseParenToken),
            '{' => self.single(SyntaxKind::OpenBraceToken),
            '}' => self.single(SyntaxKind::CloseBraceToken),
            '&' => self.either('&', SyntaxKind::AmpersandAmpersandToken, SyntaxKind::AmpersandToken),
            '|' => self.either('|', SyntaxKind::BarBarToken, SyntaxKind::BarToken),
            '=' => self.either('=', SyntaxKind::EqualsEqualsToken, SyntaxKind::EqualsToken),
            '!' => self.either('=', SyntaxKind::ExclamationEqualsToken, SyntaxKind::ExclamationToken),
            '<' => self.either('=', SyntaxKind::LessThanEqualsToken, SyntaxKind::LessThanToken),
            '>' => self.either('=', SyntaxKind::GreaterThanEqualsToken, SyntaxKind::GreaterThanToken),
            _ => {
                self.diagnostics.report_bad_character(self.pos as u32, ch);
                self.pos += 1;
                SyntaxKind::Unknown
            }
        };

        if self.token_value.is_empty() {
            self.token_value = self.chars_to_string(self.token_start, self.pos);
        }
        self.token
    }

    fn single(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.pos += 1;
        kind
    }

    /// Scan a one- or two-character operator whose second character is `second`.
    fn either(&mut self, second: char, double: SyntaxKind, single: SyntaxKind) -> SyntaxKind {
        if self.char_at(1) == Some(second) {
            self.pos += 2;
            double
        } else {
            self.pos += 1;
            single
        }
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let start = self.pos;
        while !self.is_eof() && self.text[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        let text = self.chars_to_string(start, self.pos);

        let value = match text.parse::<i32>() {
            Ok(v) => v,
            Err(_) => {
                let span = TextSpan::from_bounds(start as u32, self.pos as u32);
                self.diagnostics
                    .report_invalid_number(span, &text, TypeSymbol::Int32);
                0
            }
        };

        self.token_value = text;
        self.token_literal = Some(Value::Int32(value));
        SyntaxKind::NumericLiteral
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        let start = self.pos;
        self.pos += 1;
        while !self.is_eof() && is_identifier_part(self.text[self.pos]) {
            self.pos += 1;
        }
        let text = self.chars_to_string(start, self.pos);

        // Check if it's a keyword
        let kind = SyntaxKind::from_keyword(&text).unwrap_or(SyntaxKind::Identifier);
        self.token_value = text;
        kind
    }

    fn chars_to_string(&self, start: usize, end: usize) -> String {
        self.text[start..end].iter().collect()
    }
}

/// Scan all of `text`, returning every token up to and including the end of
/// file token, plus the lexical diagnostics.
pub fn tokenize(text: &str) -> (Vec<TokenInfo>, DiagnosticCollection) {
    let mut scanner = Scanner::new(text);
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        tokens.push(scanner.token_info());
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
    }
    (tokens, scanner.take_diagnostics())
}

/// Check if a character can start an identifier.
fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_start(ch))
}

/// Check if a character can be part of an identifier.
fn is_identifier_part(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric() || (ch as u32 > 0x7F && unicode_xid::UnicodeXID::is_xid_continue(ch))
}

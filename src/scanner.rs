//! Streaming lexer.
//!
//! [`Scanner`] walks the source once and yields tokens on demand. The last
//! item is always a single `EOF` token, after which the iterator is fused.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a str) -> Scanner<'a>`
//!   Create a new lexer over the input text.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token, LoxError>` on each `.next()`. Errors never end the
//!   stream: the scanner skips the offending input and carries on, so callers
//!   always see the trailing `EOF`.
//!
//! - `Scanner::scan_tokens(self) -> (Vec<Token>, Vec<LoxError>)`
//!   Drain the iterator, splitting tokens from lexical errors.
//!
//! # Token Recognition (`scan_token`)
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `,`, `.`, `-`, `+`, `;`, `*`, `?`, `:`.
//! - Two‑character operators: `!=`, `==`, `<=`, `>=`.
//! - String literals: `"` … `"`, no escapes, may span lines.
//! - Numeric literals: integer and optional fractional part.
//! - Identifiers/keywords: resolved via a perfect‑hash `KEYWORDS` map.
//! - Comments: `//` to end of line, `/* … */` (non‑nesting).
//!
//! # Example
//!
//! ```rust
//! use treelox::scanner::Scanner;
//!
//! let (tokens, errors) = Scanner::new("print 123; // example").scan_tokens();
//! assert_eq!(tokens.len(), 4);
//! assert!(errors.is_empty());
//! ```

use crate::error::{LoxError, Result};
use crate::token::{Token, TokenType};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// Reserved words. Anything else shaped like an identifier is IDENTIFIER.

static KEYWORDS: phf::Map<&'static str, TokenType> = phf_map! {
    "and"    => TokenType::AND,
    "class"  => TokenType::CLASS,
    "else"   => TokenType::ELSE,
    "false"  => TokenType::FALSE,
    "fun"    => TokenType::FUN,
    "for"    => TokenType::FOR,
    "if"     => TokenType::IF,
    "nil"    => TokenType::NIL,
    "or"     => TokenType::OR,
    "print"  => TokenType::PRINT,
    "return" => TokenType::RETURN,
    "super"  => TokenType::SUPER,
    "this"   => TokenType::THIS,
    "true"   => TokenType::TRUE,
    "var"    => TokenType::VAR,
    "while"  => TokenType::WHILE,
};

/// Cursor over one source text.
pub struct Scanner<'a> {
    src: &'a str,
    bytes: &'a [u8],
    start: usize, // lexeme start
    curr: usize,  // next unread byte
    line: usize,
    pending: Option<TokenType>,
    finished: bool, // EOF emitted
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(src: &'a str) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            bytes: src.as_bytes(),
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
            finished: false,
        }
    }

    /// Scan the whole input, separating tokens from lexical errors.
    ///
    /// The token list always ends with `EOF`.
    pub fn scan_tokens(self) -> (Vec<Token>, Vec<LoxError>) {
        let mut tokens: Vec<Token> = Vec::new();
        let mut errors: Vec<LoxError> = Vec::new();

        for result in self {
            match result {
                Ok(token) => tokens.push(token),
                Err(e) => errors.push(e),
            }
        }

        info!(
            "Scanned {} token(s) with {} error(s)",
            tokens.len(),
            errors.len()
        );

        (tokens, errors)
    }

    // ── cursor ──

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.bytes.len()
    }

    /// Callers guard with [`Self::is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.bytes[self.curr];
        self.curr += 1;
        b
    }

    /// Next unread byte, `0` at end of input.
    #[inline(always)]
    fn peek(&self) -> u8 {
        self.bytes.get(self.curr).copied().unwrap_or(0)
    }

    /// The byte after [`Self::peek`], `0` past the end.
    #[inline(always)]
    fn peek_next(&self) -> u8 {
        self.bytes.get(self.curr + 1).copied().unwrap_or(0)
    }

    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    #[inline(always)]
    fn either(&mut self, expected: u8, matched: TokenType, single: TokenType) {
        let tt = if self.match_byte(expected) {
            matched
        } else {
            single
        };

        self.pending = Some(tt);
    }

    // ── lexemes ──

    /// Consume one lexeme. Leaves `pending` as `None` for whitespace and
    /// comments.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        match b {
            b'(' => self.pending = Some(TokenType::LEFT_PAREN),
            b')' => self.pending = Some(TokenType::RIGHT_PAREN),
            b'{' => self.pending = Some(TokenType::LEFT_BRACE),
            b'}' => self.pending = Some(TokenType::RIGHT_BRACE),
            b',' => self.pending = Some(TokenType::COMMA),
            b'.' => self.pending = Some(TokenType::DOT),
            b'-' => self.pending = Some(TokenType::MINUS),
            b'+' => self.pending = Some(TokenType::PLUS),
            b';' => self.pending = Some(TokenType::SEMICOLON),
            b'*' => self.pending = Some(TokenType::STAR),
            b'?' => self.pending = Some(TokenType::QUESTION),
            b':' => self.pending = Some(TokenType::COLON),

            // `x` or `x=`
            b'!' => self.either(b'=', TokenType::BANG_EQUAL, TokenType::BANG),
            b'=' => self.either(b'=', TokenType::EQUAL_EQUAL, TokenType::EQUAL),
            b'<' => self.either(b'=', TokenType::LESS_EQUAL, TokenType::LESS),
            b'>' => self.either(b'=', TokenType::GREATER_EQUAL, TokenType::GREATER),

            b' ' | b'\r' | b'\t' => {}

            b'\n' => {
                self.line += 1;
            }

            b'/' => {
                if self.match_byte(b'/') {
                    // Fast‑forward to next newline; the newline itself is left
                    // for the main loop so the line counter stays exact.
                    match memchr(b'\n', &self.bytes[self.curr..]) {
                        Some(pos) => self.curr += pos,
                        None => self.curr = self.bytes.len(),
                    }
                } else if self.match_byte(b'*') {
                    self.skip_block_comment();
                } else {
                    self.pending = Some(TokenType::SLASH);
                }
            }

            b'"' => return self.parse_string(),

            b'0'..=b'9' => self.parse_number(),

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.parse_identifier(),

            _ => {
                // Consume the whole scalar so the next lexeme starts on a
                // char boundary.
                let c: char = self.src[self.start..].chars().next().unwrap_or('\u{FFFD}');
                self.curr = self.start + c.len_utf8();

                return Err(LoxError::lex(
                    self.line,
                    format!("Unexpected character: {}", c),
                ));
            }
        }

        Ok(())
    }

    /// Skip a `/* … */` comment. An unterminated comment runs to end of input.
    fn skip_block_comment(&mut self) {
        while !self.is_at_end() {
            if self.peek() == b'*' && self.peek_next() == b'/' {
                self.curr += 2;
                return;
            }

            if self.advance() == b'\n' {
                self.line += 1;
            }
        }

        debug!("Block comment ran to end of input on line {}", self.line);
    }

    /// Body of a string literal; the opening quote is already consumed.
    /// Strings may span lines and have no escapes.
    fn parse_string(&mut self) -> Result<()> {
        while !self.is_at_end() && self.peek() != b'"' {
            if self.advance() == b'\n' {
                self.line += 1;
            }
        }

        if self.is_at_end() {
            return Err(LoxError::lex(self.line, "Unterminated string."));
        }

        self.advance(); // consume closing quote

        let s: &str = &self.src[self.start + 1..self.curr - 1];
        self.pending = Some(TokenType::STRING(s.to_owned()));

        Ok(())
    }

    /// `123` or `3.14`. A trailing `.` is left for the next token.
    fn parse_number(&mut self) {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        if self.peek() == b'.' && self.peek_next().is_ascii_digit() {
            self.advance(); // consume "."

            while self.peek().is_ascii_digit() {
                self.advance();
            }
        }

        let s: &str = &self.src[self.start..self.curr];
        let n: f64 = s.parse::<f64>().unwrap_or(0.0); // digits only, cannot fail
        self.pending = Some(TokenType::NUMBER(n));
    }

    fn parse_identifier(&mut self) {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let text: &str = &self.src[self.start..self.curr];

        let tt: TokenType = KEYWORDS
            .get(text)
            .cloned()
            .unwrap_or(TokenType::IDENTIFIER);

        self.pending = Some(tt);
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        while !self.is_at_end() {
            self.start = self.curr;
            self.pending = None;

            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            if let Some(tt) = self.pending.take() {
                let lexeme: &str = &self.src[self.start..self.curr];
                debug!("Scanned token ({:?}) on line {}", tt, self.line);

                return Some(Ok(Token::new(tt, lexeme, self.line)));
            }
            // Otherwise it was whitespace / comment → continue loop.
        }

        self.finished = true;

        Some(Ok(Token::new(TokenType::EOF, "", self.line)))
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

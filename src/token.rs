use log::trace;
use serde::Serialize;
use std::fmt;
use std::mem;

/// Lexical category of a [`Token`].
///
/// Literal kinds carry their decoded value. Comparison ignores that payload,
/// so `NUMBER(1.0) == NUMBER(2.0)`.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Serialize)]
pub enum TokenType {
    // punctuation
    LEFT_PAREN,
    RIGHT_PAREN,
    LEFT_BRACE,
    RIGHT_BRACE,
    COMMA,
    DOT,
    MINUS,
    PLUS,
    SEMICOLON,
    SLASH,
    STAR,
    QUESTION,
    COLON,

    // one or two characters
    BANG,
    BANG_EQUAL,
    EQUAL,
    EQUAL_EQUAL,
    GREATER,
    GREATER_EQUAL,
    LESS,
    LESS_EQUAL,

    // literals
    IDENTIFIER,
    /// Unquoted contents.
    STRING(String),
    NUMBER(f64),

    // keywords
    AND,
    CLASS,
    ELSE,
    FALSE,
    FUN,
    FOR,
    IF,
    NIL,
    OR,
    PRINT,
    RETURN,
    SUPER,
    THIS,
    TRUE,
    VAR,
    WHILE,

    EOF,
}

impl TokenType {
    /// Variant name without payload, as printed by the token dump.
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::STRING(_) => "STRING",
            TokenType::NUMBER(_) => "NUMBER",
            TokenType::LEFT_PAREN => "LEFT_PAREN",
            TokenType::RIGHT_PAREN => "RIGHT_PAREN",
            TokenType::LEFT_BRACE => "LEFT_BRACE",
            TokenType::RIGHT_BRACE => "RIGHT_BRACE",
            TokenType::COMMA => "COMMA",
            TokenType::DOT => "DOT",
            TokenType::MINUS => "MINUS",
            TokenType::PLUS => "PLUS",
            TokenType::SEMICOLON => "SEMICOLON",
            TokenType::SLASH => "SLASH",
            TokenType::STAR => "STAR",
            TokenType::QUESTION => "QUESTION",
            TokenType::COLON => "COLON",
            TokenType::BANG => "BANG",
            TokenType::BANG_EQUAL => "BANG_EQUAL",
            TokenType::EQUAL => "EQUAL",
            TokenType::EQUAL_EQUAL => "EQUAL_EQUAL",
            TokenType::GREATER => "GREATER",
            TokenType::GREATER_EQUAL => "GREATER_EQUAL",
            TokenType::LESS => "LESS",
            TokenType::LESS_EQUAL => "LESS_EQUAL",
            TokenType::IDENTIFIER => "IDENTIFIER",
            TokenType::AND => "AND",
            TokenType::CLASS => "CLASS",
            TokenType::ELSE => "ELSE",
            TokenType::FALSE => "FALSE",
            TokenType::FUN => "FUN",
            TokenType::FOR => "FOR",
            TokenType::IF => "IF",
            TokenType::NIL => "NIL",
            TokenType::OR => "OR",
            TokenType::PRINT => "PRINT",
            TokenType::RETURN => "RETURN",
            TokenType::SUPER => "SUPER",
            TokenType::THIS => "THIS",
            TokenType::TRUE => "TRUE",
            TokenType::VAR => "VAR",
            TokenType::WHILE => "WHILE",
            TokenType::EOF => "EOF",
        }
    }
}

impl PartialEq for TokenType {
    fn eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

/// One lexeme with its category and source line.
///
/// The lexeme is owned: syntax trees and the closures built from them
/// outlive the source text of a REPL line.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Token {
    pub token_type: TokenType,

    /// Source text exactly as written, quotes included for strings.
    pub lexeme: String,

    pub line: usize,
}

impl Token {
    pub fn new<S: Into<String>>(token_type: TokenType, lexeme: S, line: usize) -> Self {
        let lexeme: String = lexeme.into();

        trace!(
            "token {:?} {:?} on line {}",
            token_type,
            lexeme,
            line
        );

        Self {
            token_type,
            lexeme,
            line,
        }
    }
}

impl fmt::Display for Token {
    /// `KIND lexeme literal`, e.g. `NUMBER 3 3.0` or `IDENTIFIER x null`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.token_type.name(), self.lexeme)?;

        match &self.token_type {
            TokenType::STRING(s) => f.write_str(s),
            TokenType::NUMBER(n) => {
                // 3 → "3.0", 3.14 → "3.14"
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    let mut buf = itoa::Buffer::new();
                    write!(f, "{}.0", buf.format(*n as i64))
                } else if n.fract() == 0.0 {
                    write!(f, "{:.1}", n)
                } else {
                    write!(f, "{}", n)
                }
            }
            _ => f.write_str("null"),
        }
    }
}

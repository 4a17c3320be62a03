//! Centralised error hierarchy for the **Lox interpreter**.
//!
//! Failures travel on two channels:
//!
//! * the *static* channel (`Lex`, `Parse`, `Resolve`) collects every problem
//!   found before execution. Any entry suppresses execution of that run but
//!   never stops the phase that found it.
//! * the *runtime* channel ([`RuntimeError`]) carries the single fault that
//!   aborted the current batch of top‑level statements.
//!
//! The module **does not** print diagnostics itself.

use std::io;
use thiserror::Error;

use log::debug;

use crate::token::{Token, TokenType};

/// Canonical error type used throughout the interpreter.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoxError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// Syntactic (parser) error.
    #[error("[line {line}] Error{location}: {message}")]
    Parse {
        message: String,
        /// ` at 'lexeme'` or ` at end`.
        location: String,
        line: usize,
    },

    /// Scope error found by the resolver.
    #[error("[line {line}] Error{location}: {message}")]
    Resolve {
        message: String,
        location: String,
        line: usize,
    },

    /// Runtime evaluation error.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl LoxError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Lex error: line={}, msg={}", line, message);

        LoxError::Lex { message, line }
    }

    /// Helper constructor for the **parser**.
    pub fn parse<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Parse error: line={}, msg={}", token.line, message);

        LoxError::Parse {
            message,
            location: location_of(token),
            line: token.line,
        }
    }

    /// Helper constructor for the **resolver**.
    pub fn resolve<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Resolve error: line={}, msg={}", token.line, message);

        LoxError::Resolve {
            message,
            location: location_of(token),
            line: token.line,
        }
    }

    /// `true` for errors found before execution starts.
    pub fn is_static(&self) -> bool {
        matches!(
            self,
            LoxError::Lex { .. } | LoxError::Parse { .. } | LoxError::Resolve { .. }
        )
    }

    /// Source line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            LoxError::Lex { line, .. }
            | LoxError::Parse { line, .. }
            | LoxError::Resolve { line, .. } => Some(*line),
            LoxError::Runtime(e) => Some(e.token.line),
            LoxError::Io(_) | LoxError::Utf8(_) => None,
        }
    }
}

fn location_of(token: &Token) -> String {
    if token.token_type == TokenType::EOF {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// A fatal fault raised while executing a program.
///
/// Carries the token nearest to the fault so the report can name a line.
#[derive(Debug, Clone, Error)]
#[error("{message}\n[line {}]", .token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new<S: Into<String>>(token: &Token, msg: S) -> Self {
        let message: String = msg.into();

        debug!("Creating Runtime error: line={}, msg={}", token.line, message);

        RuntimeError {
            token: token.clone(),
            message,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, LoxError>;

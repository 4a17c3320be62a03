//! Session driver: one source text through scan → parse → resolve → run.
//!
//! A [`Lox`] owns a single [`Interpreter`], so globals defined by one call to
//! [`Lox::run`] are visible to the next. The REPL relies on this.

use std::io::Write;

use log::{debug, info};
use thiserror::Error;

use crate::error::LoxError;
use crate::interpreter::Interpreter;
use crate::parser::Parser;
use crate::resolver::Resolver;
use crate::scanner::Scanner;
use crate::stmt::Stmt;

/// Why a run did not complete.
#[derive(Debug, Error)]
pub enum RunError {
    /// Lexical, syntax or scope errors. Nothing was executed.
    #[error("{} static error(s)", .0.len())]
    Static(Vec<LoxError>),

    /// Execution started and was aborted by this error.
    #[error(transparent)]
    Runtime(LoxError),
}

impl RunError {
    /// Process exit status conventionally used for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunError::Static(_) => 65,
            RunError::Runtime(_) => 70,
        }
    }

    /// Every diagnostic carried, in report order.
    pub fn errors(&self) -> Vec<&LoxError> {
        match self {
            RunError::Static(errors) => errors.iter().collect(),
            RunError::Runtime(error) => vec![error],
        }
    }
}

pub struct Lox {
    interpreter: Interpreter,
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl Lox {
    pub fn new() -> Self {
        Lox {
            interpreter: Interpreter::new(),
        }
    }

    /// A session whose `print` output goes to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        Lox {
            interpreter: Interpreter::with_output(out),
        }
    }

    pub fn interpreter_mut(&mut self) -> &mut Interpreter {
        &mut self.interpreter
    }

    /// Scan and parse without resolving or running.
    ///
    /// Lexical errors do not stop parsing, so one pass reports both kinds.
    pub fn parse(source: &str) -> Result<Vec<Stmt>, RunError> {
        let (tokens, mut errors) = Scanner::new(source).scan_tokens();

        debug!("Scanned {} tokens, {} lexical errors", tokens.len(), errors.len());

        let statements: Vec<Stmt> = match Parser::new(tokens).parse() {
            Ok(statements) => statements,
            Err(parse_errors) => {
                errors.extend(parse_errors);
                Vec::new()
            }
        };

        if errors.is_empty() {
            Ok(statements)
        } else {
            Err(RunError::Static(errors))
        }
    }

    /// Run `source` to completion. Static errors suppress execution entirely.
    pub fn run(&mut self, source: &str) -> Result<(), RunError> {
        let statements: Vec<Stmt> = Self::parse(source)?;

        info!("Parsed {} statements", statements.len());

        Resolver::new(&mut self.interpreter)
            .resolve(&statements)
            .map_err(RunError::Static)?;

        self.interpreter
            .interpret(&statements)
            .map_err(|e| RunError::Runtime(LoxError::from(e)))
    }
}

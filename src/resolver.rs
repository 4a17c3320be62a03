//! Scope analysis between parsing and execution.
//!
//! The walk mirrors the block structure of the program with a stack of
//! scopes and, for every variable use that lands in one of them, records in
//! the interpreter how many scopes out the binding lives. Uses that match no
//! scope are globals and get no entry.
//!
//! Scope errors are gathered as the walk goes; it always covers the whole
//! tree.

use crate::error::LoxError;
use crate::expr::{Expr, ExprId};
use crate::interpreter::Interpreter;
use crate::stmt::{FunctionDef, Stmt};
use crate::token::Token;
use log::{debug, info};
use std::collections::{HashMap, HashSet};
use std::mem;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FunctionType {
    None,
    Function,
}

/// Borrows the interpreter for one pass so distances land straight in its
/// table.
pub struct Resolver<'interp> {
    interpreter: &'interp mut Interpreter,
    scopes: Vec<HashMap<String, bool>>, // false=declared, true=defined
    current_function: FunctionType,
    /// Name of the global whose initializer is being resolved. Globals are
    /// not on the scope stack, so self-reference is tracked here.
    initializing_global: Option<String>,
    /// Globals declared earlier in this pass. They are not defined in the
    /// interpreter until the statements run.
    declared_globals: HashSet<String>,
    /// Ids noted in the interpreter by this pass, dropped again on failure.
    noted: Vec<ExprId>,
    errors: Vec<LoxError>,
}

impl<'interp> Resolver<'interp> {
    pub fn new(interpreter: &'interp mut Interpreter) -> Self {
        debug!("Resolver created");

        Resolver {
            interpreter,
            scopes: Vec::new(),
            current_function: FunctionType::None,
            initializing_global: None,
            declared_globals: HashSet::new(),
            noted: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Walk all top‑level statements, returning every scope error found.
    pub fn resolve(&mut self, statements: &[Stmt]) -> Result<(), Vec<LoxError>> {
        info!("Resolving {} top-level statement(s)", statements.len());

        self.resolve_stmts(statements);

        let noted: Vec<ExprId> = mem::take(&mut self.noted);

        if self.errors.is_empty() {
            Ok(())
        } else {
            // the statements never run, so their ids are dead
            self.interpreter.forget_locals(&noted);
            Err(mem::take(&mut self.errors))
        }
    }

    fn resolve_stmts(&mut self, statements: &[Stmt]) {
        for stmt in statements {
            self.resolve_stmt(stmt);
        }
    }

    // ── statement resolution ──

    fn resolve_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Block(statements) => {
                self.begin_scope();
                self.resolve_stmts(statements);
                self.end_scope();
            }

            Stmt::Var { name, initializer } => {
                // declare → resolve initializer → define
                self.declare(name);

                if let Some(expr) = initializer {
                    let global: bool = self.scopes.is_empty();

                    if global {
                        self.initializing_global = Some(name.lexeme.clone());
                    }

                    self.resolve_expr(expr);

                    if global {
                        self.initializing_global = None;
                    }
                }

                self.define(name);
            }

            Stmt::Function { name, function } => {
                // the name is visible inside its own body, so recursion works
                self.declare(name);
                self.define(name);
                self.resolve_function(function);
            }

            Stmt::Expression(expr) | Stmt::Print(expr) => {
                self.resolve_expr(expr);
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                self.resolve_expr(condition);
                self.resolve_stmt(then_branch);

                if let Some(else_branch) = else_branch {
                    self.resolve_stmt(else_branch);
                }
            }

            Stmt::While { condition, body } => {
                self.resolve_expr(condition);
                self.resolve_stmt(body);
            }

            Stmt::Return { keyword, value } => {
                if self.current_function == FunctionType::None {
                    self.errors.push(LoxError::resolve(
                        keyword,
                        "Can't return from top-level code.",
                    ));
                }

                if let Some(expr) = value {
                    self.resolve_expr(expr);
                }
            }
        }
    }

    // ── expression resolution ──

    fn resolve_expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Literal(_) => {}

            Expr::Grouping(inner) => self.resolve_expr(inner),

            Expr::Unary { right, .. } => self.resolve_expr(right),

            Expr::Binary { left, right, .. } | Expr::Logical { left, right, .. } => {
                self.resolve_expr(left);
                self.resolve_expr(right);
            }

            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.resolve_expr(condition);
                self.resolve_expr(then_branch);
                self.resolve_expr(else_branch);
            }

            Expr::Variable { id, name } => {
                if self.in_own_initializer(name) {
                    self.errors.push(LoxError::resolve(
                        name,
                        "Can't read local variable in its own initializer.",
                    ));
                }

                self.resolve_local(*id, name);
            }

            Expr::Assign { id, name, value } => {
                self.resolve_expr(value);
                self.resolve_local(*id, name);
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                self.resolve_expr(callee);

                for argument in arguments {
                    self.resolve_expr(argument);
                }
            }

            Expr::AnonymousFunction { function, .. } => self.resolve_function(function),
        }
    }

    fn in_own_initializer(&self, name: &Token) -> bool {
        match self.scopes.last() {
            Some(scope) => scope.get(&name.lexeme) == Some(&false),

            // redeclaring a global may read its previous value
            None => {
                self.initializing_global.as_deref() == Some(name.lexeme.as_str())
                    && !self.declared_globals.contains(&name.lexeme)
                    && !self.interpreter.is_global(&name.lexeme)
            }
        }
    }

    /// Parameters and body share one scope.
    fn resolve_function(&mut self, function: &FunctionDef) {
        let enclosing: FunctionType = self.current_function;
        self.current_function = FunctionType::Function;

        self.begin_scope();

        for param in &function.params {
            self.declare(param);
            self.define(param);
        }

        self.resolve_stmts(&function.body);
        self.end_scope();

        self.current_function = enclosing;
    }

    // ── scope management ──

    #[inline]
    fn begin_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    #[inline]
    fn end_scope(&mut self) {
        self.scopes.pop();
    }

    fn declare(&mut self, name: &Token) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };

        if scope.contains_key(&name.lexeme) {
            self.errors.push(LoxError::resolve(
                name,
                "Already a variable with this name in this scope.",
            ));
        }

        scope.insert(name.lexeme.clone(), false);
    }

    fn define(&mut self, name: &Token) {
        match self.scopes.last_mut() {
            Some(scope) => {
                scope.insert(name.lexeme.clone(), true);
            }
            None => {
                self.declared_globals.insert(name.lexeme.clone());
            }
        }
    }

    fn resolve_local(&mut self, id: ExprId, name: &Token) {
        for (depth, scope) in self.scopes.iter().rev().enumerate() {
            if scope.contains_key(&name.lexeme) {
                debug!("'{}' is local, {} scope(s) out", name.lexeme, depth);
                self.interpreter.note_local(id, depth);
                self.noted.push(id);
                return;
            }
        }

        debug!("'{}' left to globals", name.lexeme);
    }
}

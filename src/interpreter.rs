//! Tree‑walking evaluator.
//!
//! Statements execute to a [`Flow`]: either they finished normally or a
//! `return` is unwinding with a value. Blocks and loops stop at the first
//! `Flow::Return` and hand it outward untouched; only a function call turns
//! it back into an ordinary value. Runtime faults travel separately as
//! `Err(RuntimeError)` and end the current top‑level batch.

use std::collections::HashMap;
use std::io::{self, Write};
use std::mem;
use std::rc::Rc;

use log::{debug, info, warn};

use crate::callable::{Callable, LoxFunction, NativeFn, NativeFunction};
use crate::environment::{EnvRef, Environment};
use crate::error::RuntimeError;
use crate::expr::{Expr, ExprId, LiteralValue};
use crate::stmt::Stmt;
use crate::token::{Token, TokenType};
use crate::value::Value;

/// Convenient alias for interpreter results.
pub type IResult<T> = Result<T, RuntimeError>;

/// Nested calls allowed before a script is stopped with "Stack overflow.".
pub const MAX_CALL_DEPTH: usize = 256;

/// How a statement finished.
#[derive(Debug)]
pub enum Flow {
    Normal,
    /// A `return` is unwinding toward the nearest call.
    Return(Value),
}

pub struct Interpreter {
    globals: EnvRef,
    environment: EnvRef,
    /// Resolver output: hops from the current environment to the binding.
    locals: HashMap<ExprId, usize>,
    call_depth: usize,
    out: Box<dyn Write>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// An interpreter printing to standard output.
    pub fn new() -> Self {
        Self::with_output(Box::new(io::stdout()))
    }

    /// An interpreter whose `print` statements write to `out`.
    pub fn with_output(out: Box<dyn Write>) -> Self {
        info!("Initializing Interpreter");

        let globals: EnvRef = Environment::new().into_ref();

        let mut interpreter = Self {
            environment: Rc::clone(&globals),
            globals,
            locals: HashMap::new(),
            call_depth: 0,
            out,
        };

        interpreter.define_native("clock", 0, clock);

        interpreter
    }

    /// Expose a host function to scripts as a global.
    pub fn define_native(&mut self, name: &str, arity: usize, func: NativeFn) {
        debug!("Defining native function '{}'", name);

        let native = NativeFunction {
            name: name.to_string(),
            arity,
            func,
        };

        self.globals
            .borrow_mut()
            .define(name, Value::Callable(Callable::Native(native)));
    }

    /// Record that the variable node `id` binds `depth` scopes out.
    pub fn note_local(&mut self, id: ExprId, depth: usize) {
        self.locals.insert(id, depth);
    }

    /// Drop entries for nodes that will never run.
    pub fn forget_locals(&mut self, ids: &[ExprId]) {
        for id in ids {
            self.locals.remove(id);
        }
    }

    /// Whether `name` is currently bound in the global scope.
    pub fn is_global(&self, name: &str) -> bool {
        self.globals.borrow().contains(name)
    }

    /// Hop count recorded for `id`; `None` means global lookup.
    pub fn resolved_depth(&self, id: ExprId) -> Option<usize> {
        self.locals.get(&id).copied()
    }

    /// Run top‑level statements in order, stopping at the first runtime error.
    pub fn interpret(&mut self, statements: &[Stmt]) -> IResult<()> {
        debug!("Interpreting {} statements", statements.len());

        for stmt in statements {
            if let Flow::Return(_) = self.execute(stmt)? {
                // The resolver rejects top-level returns; nothing to unwind to.
                warn!("return reached top level");
                break;
            }
        }

        if let Err(e) = self.out.flush() {
            warn!("Failed to flush output: {}", e);
        }

        info!("Interpretation completed successfully");

        Ok(())
    }

    // ─────────────────────────── statements ───────────────────────────

    fn execute(&mut self, stmt: &Stmt) -> IResult<Flow> {
        match stmt {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
                Ok(Flow::Normal)
            }

            Stmt::Print(expr) => {
                let value: Value = self.evaluate(expr)?;

                if let Err(e) = writeln!(self.out, "{}", value) {
                    warn!("Failed to write print output: {}", e);
                }

                Ok(Flow::Normal)
            }

            Stmt::Var { name, initializer } => {
                let value: Value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Defining variable '{}' = {}", name.lexeme, value);

                self.environment.borrow_mut().define(&name.lexeme, value);

                Ok(Flow::Normal)
            }

            Stmt::Block(statements) => {
                let scope: EnvRef =
                    Environment::with_enclosing(Rc::clone(&self.environment)).into_ref();

                self.execute_block(statements, scope)
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }

            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }

                Ok(Flow::Normal)
            }

            Stmt::Function { name, function } => {
                debug!("Defining function '{}'", name.lexeme);

                let callable = Callable::Declared {
                    name: name.lexeme.clone(),
                    function: LoxFunction::new(Rc::clone(function), Rc::clone(&self.environment)),
                };

                self.environment
                    .borrow_mut()
                    .define(&name.lexeme, Value::Callable(callable));

                Ok(Flow::Normal)
            }

            Stmt::Return { value, .. } => {
                let value: Value = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };

                debug!("Returning value: {}", value);

                Ok(Flow::Return(value))
            }
        }
    }

    /// Run `statements` inside `environment`, restoring the current
    /// environment afterwards whether they finish, return or fail.
    pub fn execute_block(&mut self, statements: &[Stmt], environment: EnvRef) -> IResult<Flow> {
        let previous: EnvRef = mem::replace(&mut self.environment, environment);

        let mut result: IResult<Flow> = Ok(Flow::Normal);

        for stmt in statements {
            match self.execute(stmt) {
                Ok(Flow::Normal) => {}
                unwinding => {
                    result = unwinding;
                    break;
                }
            }
        }

        self.environment = previous;

        result
    }

    // ────────────────────────── expressions ───────────────────────────

    pub fn evaluate(&mut self, expr: &Expr) -> IResult<Value> {
        match expr {
            Expr::Literal(literal) => Ok(match literal {
                LiteralValue::Number(n) => Value::Number(*n),
                LiteralValue::Str(s) => Value::String(s.clone()),
                LiteralValue::True => Value::Bool(true),
                LiteralValue::False => Value::Bool(false),
                LiteralValue::Nil => Value::Nil,
            }),

            Expr::Grouping(inner) => self.evaluate(inner),

            Expr::Unary { operator, right } => {
                let right: Value = self.evaluate(right)?;

                match operator.token_type {
                    TokenType::BANG => Ok(Value::Bool(!right.is_truthy())),
                    TokenType::MINUS => match right {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        _ => Err(RuntimeError::new(operator, "Operand must be a number.")),
                    },
                    _ => Err(RuntimeError::new(operator, "Invalid unary operator.")),
                }
            }

            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;
                let right: Value = self.evaluate(right)?;

                binary(operator, left, right)
            }

            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left: Value = self.evaluate(left)?;

                let short_circuit: bool = if operator.token_type == TokenType::OR {
                    left.is_truthy()
                } else {
                    !left.is_truthy()
                };

                if short_circuit {
                    Ok(left)
                } else {
                    self.evaluate(right)
                }
            }

            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.evaluate(then_branch)
                } else {
                    self.evaluate(else_branch)
                }
            }

            Expr::Variable { id, name } => self.look_up_variable(*id, name),

            Expr::Assign { id, name, value } => {
                let value: Value = self.evaluate(value)?;

                match self.locals.get(id) {
                    Some(&distance) => {
                        Environment::assign_at(&self.environment, distance, name, value.clone())?
                    }
                    None => self.globals.borrow_mut().assign(name, value.clone())?,
                }

                Ok(value)
            }

            Expr::Call {
                callee,
                paren,
                arguments,
            } => self.evaluate_call(callee, paren, arguments),

            Expr::AnonymousFunction { function, .. } => {
                let function = LoxFunction::new(Rc::clone(function), Rc::clone(&self.environment));

                Ok(Value::Callable(Callable::Anonymous(function)))
            }
        }
    }

    fn evaluate_call(
        &mut self,
        callee: &Expr,
        paren: &Token,
        arguments: &[Expr],
    ) -> IResult<Value> {
        let Value::Callable(function) = self.evaluate(callee)? else {
            return Err(RuntimeError::new(paren, "Can only call functions and classes."));
        };

        let mut values: Vec<Value> = Vec::with_capacity(arguments.len());

        for argument in arguments {
            values.push(self.evaluate(argument)?);
        }

        if values.len() != function.arity() {
            return Err(RuntimeError::new(
                paren,
                format!(
                    "Expected {} arguments but got {}.",
                    function.arity(),
                    values.len()
                ),
            ));
        }

        if self.call_depth >= MAX_CALL_DEPTH {
            warn!("Call depth limit {} reached", MAX_CALL_DEPTH);
            return Err(RuntimeError::new(paren, "Stack overflow."));
        }

        self.call_depth += 1;
        let result: IResult<Value> = function.call(self, values, paren);
        self.call_depth -= 1;

        result
    }

    fn look_up_variable(&self, id: ExprId, name: &Token) -> IResult<Value> {
        match self.locals.get(&id) {
            Some(&distance) => Environment::get_at(&self.environment, distance, name),
            None => self.globals.borrow().get(name),
        }
    }
}

fn binary(operator: &Token, left: Value, right: Value) -> IResult<Value> {
    match operator.token_type {
        TokenType::PLUS => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
            _ => Err(RuntimeError::new(
                operator,
                "Operands must be two numbers or two strings.",
            )),
        },

        TokenType::EQUAL_EQUAL => Ok(Value::Bool(left == right)),
        TokenType::BANG_EQUAL => Ok(Value::Bool(left != right)),

        _ => {
            let (a, b) = numbers(operator, &left, &right)?;

            match operator.token_type {
                TokenType::MINUS => Ok(Value::Number(a - b)),
                TokenType::STAR => Ok(Value::Number(a * b)),
                TokenType::SLASH => Ok(Value::Number(a / b)),
                TokenType::GREATER => Ok(Value::Bool(a > b)),
                TokenType::GREATER_EQUAL => Ok(Value::Bool(a >= b)),
                TokenType::LESS => Ok(Value::Bool(a < b)),
                TokenType::LESS_EQUAL => Ok(Value::Bool(a <= b)),
                _ => Err(RuntimeError::new(operator, "Invalid binary operator.")),
            }
        }
    }
}

fn numbers(operator: &Token, left: &Value, right: &Value) -> IResult<(f64, f64)> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((*a, *b)),
        _ => Err(RuntimeError::new(operator, "Operands must be numbers.")),
    }
}

/// `clock()`: seconds since the Unix epoch.
fn clock(_args: &[Value]) -> Result<Value, String> {
    let millis: i64 = chrono::Utc::now().timestamp_millis();

    Ok(Value::Number(millis as f64 / 1000.0))
}

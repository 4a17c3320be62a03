//! Function values: declared, anonymous and native.
//!
//! Declared and anonymous functions are *closures*: they pair a shared
//! [`FunctionDef`] with the environment that was active where they were
//! created. A call always chains its fresh environment onto that captured
//! one, never onto the caller's.

use std::fmt;
use std::rc::Rc;

use log::debug;

use crate::environment::{EnvRef, Environment};
use crate::error::RuntimeError;
use crate::interpreter::{Flow, Interpreter};
use crate::stmt::FunctionDef;
use crate::token::Token;
use crate::value::Value;

/// Host behaviour exposed to scripts. The slice length always equals the
/// registered arity; an `Err` becomes a runtime error at the call site.
pub type NativeFn = fn(&[Value]) -> Result<Value, String>;

#[derive(Clone)]
pub struct NativeFunction {
    pub name: String,
    pub arity: usize,
    pub func: NativeFn,
}

/// A user function: definition plus captured environment.
#[derive(Clone)]
pub struct LoxFunction {
    pub definition: Rc<FunctionDef>,
    pub closure: EnvRef,
}

impl LoxFunction {
    pub fn new(definition: Rc<FunctionDef>, closure: EnvRef) -> Self {
        LoxFunction {
            definition,
            closure,
        }
    }

    pub fn arity(&self) -> usize {
        self.definition.params.len()
    }

    /// Bind parameters in a new environment chained to the closure, run the
    /// body, and turn a `return` into the call's value.
    fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
    ) -> Result<Value, RuntimeError> {
        let environment: EnvRef = Environment::with_enclosing(Rc::clone(&self.closure)).into_ref();

        {
            let mut scope = environment.borrow_mut();

            for (param, argument) in self.definition.params.iter().zip(arguments) {
                debug!("Binding parameter '{}' to {}", param.lexeme, argument);
                scope.define(&param.lexeme, argument);
            }
        }

        match interpreter.execute_block(&self.definition.body, environment)? {
            Flow::Return(value) => Ok(value),
            Flow::Normal => Ok(Value::Nil),
        }
    }

    fn same(&self, other: &LoxFunction) -> bool {
        Rc::ptr_eq(&self.definition, &other.definition) && Rc::ptr_eq(&self.closure, &other.closure)
    }
}

/// Anything a call expression can invoke.
#[derive(Clone)]
pub enum Callable {
    /// `fun name(...) { ... }`
    Declared { name: String, function: LoxFunction },

    /// `fun (...) { ... }` used as an expression.
    Anonymous(LoxFunction),

    Native(NativeFunction),
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Callable::Declared { function, .. } | Callable::Anonymous(function) => function.arity(),
            Callable::Native(native) => native.arity,
        }
    }

    /// Invoke with already evaluated arguments. Arity is checked by the caller.
    ///
    /// `paren` locates errors raised by native functions.
    pub fn call(
        &self,
        interpreter: &mut Interpreter,
        arguments: Vec<Value>,
        paren: &Token,
    ) -> Result<Value, RuntimeError> {
        match self {
            Callable::Declared { name, function } => {
                debug!("Calling user-defined function '{}'", name);
                function.call(interpreter, arguments)
            }

            Callable::Anonymous(function) => {
                debug!("Calling anonymous function");
                function.call(interpreter, arguments)
            }

            Callable::Native(native) => {
                debug!("Calling native function '{}'", native.name);
                (native.func)(&arguments).map_err(|msg| RuntimeError::new(paren, msg))
            }
        }
    }

    /// Identity comparison used by `==`.
    pub fn same(&self, other: &Callable) -> bool {
        match (self, other) {
            (Callable::Declared { function: a, .. }, Callable::Declared { function: b, .. })
            | (Callable::Anonymous(a), Callable::Anonymous(b)) => a.same(b),
            (Callable::Native(a), Callable::Native(b)) => a.name == b.name && a.arity == b.arity,
            _ => false,
        }
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Declared { name, .. } => write!(f, "<fn {}>", name),
            Callable::Anonymous(_) => write!(f, "<fn anonymous>"),
            Callable::Native(native) => write!(f, "<native fn {}>", native.name),
        }
    }
}

// Closures can reach themselves through their captured environment, so
// Debug must not descend into it.
impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

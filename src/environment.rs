use crate::error::RuntimeError;
use crate::token::Token;
use crate::value::Value;
use log::debug;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Shared handle to an environment. Blocks, calls and closures all hold one.
pub type EnvRef = Rc<RefCell<Environment>>;

/// One scope's bindings plus a link to the scope that encloses it.
///
/// The enclosing link is set at construction and never changes, so chains
/// are acyclic (inner → outer).
#[derive(Debug, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
    enclosing: Option<EnvRef>,
}

impl Environment {
    /// A root (global) environment.
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: None,
        }
    }

    pub fn with_enclosing(enclosing: EnvRef) -> Self {
        Environment {
            values: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Wrap in a shared handle.
    pub fn into_ref(self) -> EnvRef {
        Rc::new(RefCell::new(self))
    }

    /// Bind `name` in this scope, replacing any previous binding here.
    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    /// Whether `name` is bound in this scope itself.
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Look `name` up here, then along the enclosing chain.
    pub fn get(&self, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(value) = self.values.get(&name.lexeme) {
            Ok(value.clone())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow().get(name)
        } else {
            Err(undefined(name))
        }
    }

    /// Overwrite the nearest existing binding of `name`. Never declares.
    pub fn assign(&mut self, name: &Token, value: Value) -> Result<(), RuntimeError> {
        if let Some(slot) = self.values.get_mut(&name.lexeme) {
            *slot = value;
            Ok(())
        } else if let Some(enclosing) = &self.enclosing {
            enclosing.borrow_mut().assign(name, value)
        } else {
            Err(undefined(name))
        }
    }

    /// The environment exactly `distance` links out from `env`.
    pub fn ancestor(env: &EnvRef, distance: usize) -> Option<EnvRef> {
        let mut current: EnvRef = Rc::clone(env);

        for _ in 0..distance {
            let next: EnvRef = current.borrow().enclosing.clone()?;
            current = next;
        }

        Some(current)
    }

    /// Read a resolved variable: jump `distance` links, look only there.
    pub fn get_at(env: &EnvRef, distance: usize, name: &Token) -> Result<Value, RuntimeError> {
        if let Some(scope) = Self::ancestor(env, distance) {
            let found: Option<Value> = scope.borrow().values.get(&name.lexeme).cloned();

            if let Some(value) = found {
                return Ok(value);
            }
        }

        debug!(
            "Resolved lookup of '{}' at distance {} found nothing",
            name.lexeme, distance
        );

        Err(undefined(name))
    }

    /// Write a resolved variable: jump `distance` links, assign only there.
    pub fn assign_at(
        env: &EnvRef,
        distance: usize,
        name: &Token,
        value: Value,
    ) -> Result<(), RuntimeError> {
        let scope: EnvRef = Self::ancestor(env, distance).ok_or_else(|| undefined(name))?;
        let mut scope = scope.borrow_mut();

        match scope.values.get_mut(&name.lexeme) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(undefined(name)),
        }
    }
}

fn undefined(name: &Token) -> RuntimeError {
    RuntimeError::new(name, format!("Undefined variable '{}'.", name.lexeme))
}

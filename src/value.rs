use crate::callable::Callable;

/// A dynamically typed runtime value.
#[derive(Debug, Clone)]
pub enum Value {
    Callable(Callable),
    Number(f64),
    String(String),
    Bool(bool),
    Nil,
}

impl Value {
    /// `nil` and `false` are falsy; everything else, `0` and `""` included, is truthy.
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Value::Nil | Value::Bool(false))
    }
}

impl PartialEq for Value {
    /// Lox equality: never coerces, `nil` equals only `nil`, functions
    /// compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::Callable(a), Value::Callable(b)) => a.same(b),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Callable(c) => write!(f, "{}", c),

            Value::Number(n) => {
                // 3.0 prints as "3"; -0.0 keeps its sign.
                if n.fract() == 0.0 {
                    write!(f, "{:.0}", n)
                } else {
                    write!(f, "{}", n)
                }
            }

            Value::String(s) => write!(f, "{}", s),

            Value::Bool(b) => write!(f, "{}", b),

            Value::Nil => write!(f, "nil"),
        }
    }
}

use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::stmt::FunctionDef;
use crate::token::Token;

/// Identity of a variable‑referencing node.
///
/// The resolver keys its distance table by this id. Ids come from one
/// process‑wide counter, so trees parsed at different times (REPL lines)
/// never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(usize);

impl ExprId {
    pub fn fresh() -> Self {
        static NEXT: AtomicUsize = AtomicUsize::new(0);

        ExprId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// A **literal constant** that appears directly in the source code.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// Numeric literal ‑ stored as IEEE‑754 `f64`.
    Number(f64),

    /// String literal without surrounding quotes.
    Str(String),

    True,

    False,

    Nil,
}

/// **Abstract‑Syntax‑Tree node** representing every kind of *expression*.
#[derive(Debug, Clone)]
pub enum Expr {
    Literal(LiteralValue),

    /// Parenthesised sub‑expression: `"(" expression ")"`.
    Grouping(Box<Expr>),

    /// Prefix `!` or `-`.
    Unary { operator: Token, right: Box<Expr> },

    /// Arithmetic, comparison and equality operators.
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// Short‑circuiting `and` / `or`.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },

    /// `condition ? then_branch : else_branch`
    Ternary {
        condition: Box<Expr>,
        /// The `?` token, kept for error locations.
        question: Token,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },

    /// Variable access.
    Variable { id: ExprId, name: Token },

    /// Assignment expression: `identifier "=" expression`
    Assign {
        id: ExprId,
        name: Token,
        value: Box<Expr>,
    },

    /// Function call *Example:* `clock()` or `add(1, 2)(3)`
    Call {
        callee: Box<Expr>,
        /// The closing `)` token ‑ retained for error reporting.
        paren: Token,
        arguments: Vec<Expr>,
    },

    /// `fun (a, b) { ... }` used as a value.
    AnonymousFunction {
        /// The `fun` keyword.
        keyword: Token,
        function: Rc<FunctionDef>,
    },
}

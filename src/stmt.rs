use std::rc::Rc;

use crate::expr::Expr;
use crate::token::Token;

/// Parameters and body shared by declared and anonymous functions.
///
/// Held behind an `Rc` so that every function value created from the same
/// definition shares one copy of the body with the tree.
#[derive(Debug)]
pub struct FunctionDef {
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone)]
pub enum Stmt {
    Expression(Expr),

    Print(Expr),

    Var {
        name: Token,
        initializer: Option<Expr>,
    },

    Block(Vec<Stmt>),

    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },

    While {
        condition: Expr,
        body: Box<Stmt>,
    },

    Function {
        name: Token,
        function: Rc<FunctionDef>,
    },

    Return {
        /// The `return` keyword (for error locations).
        keyword: Token,
        value: Option<Expr>,
    },
}

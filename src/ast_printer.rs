use crate::expr::{Expr, LiteralValue};
use crate::stmt::{FunctionDef, Stmt};

/// Debug renderings of the AST.
///
/// * [`AstPrinter::print`] / [`AstPrinter::print_stmt`] give the
///   Crafting‑Interpreters prefix form, e.g. `(+ 1.0 (group (* 2.0 3.0)))`.
/// * [`AstPrinter::source`] / [`AstPrinter::source_expr`] give Lox source
///   that parses back to the same tree. Groupings are explicit nodes, so no
///   extra parentheses are invented.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(expr: &Expr) -> String {
        match expr {
            // ── literals ────────────────────────────────────────────────
            Expr::Literal(lit) => match lit {
                LiteralValue::True => "true".into(),

                LiteralValue::False => "false".into(),

                LiteralValue::Nil => "nil".into(),

                LiteralValue::Str(s) => s.clone(),

                LiteralValue::Number(n) => {
                    if n.fract() == 0.0 {
                        // 3 → 3.0
                        format!("{:.1}", n)
                    } else {
                        n.to_string()
                    }
                }
            },

            Expr::Grouping(inner) => format!("(group {})", Self::print(inner)),

            Expr::Unary { operator, right } => {
                format!("({} {})", operator.lexeme, Self::print(right))
            }

            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => format!(
                "({} {} {})",
                operator.lexeme,
                Self::print(left),
                Self::print(right)
            ),

            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
                ..
            } => format!(
                "(?: {} {} {})",
                Self::print(condition),
                Self::print(then_branch),
                Self::print(else_branch)
            ),

            Expr::Variable { name, .. } => name.lexeme.clone(),

            Expr::Assign { name, value, .. } => {
                format!("(= {} {})", name.lexeme, Self::print(value))
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let mut s = format!("(call {}", Self::print(callee));
                for arg in arguments {
                    s.push(' ');
                    s.push_str(&Self::print(arg));
                }
                s.push(')');
                s
            }

            Expr::AnonymousFunction { function, .. } => {
                format!("(fun {})", Self::print_function(function))
            }
        }
    }

    pub fn print_stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(expr) => format!("(; {})", Self::print(expr)),

            Stmt::Print(expr) => format!("(print {})", Self::print(expr)),

            Stmt::Var { name, initializer } => match initializer {
                Some(init) => format!("(var {} {})", name.lexeme, Self::print(init)),
                None => format!("(var {})", name.lexeme),
            },

            Stmt::Block(statements) => {
                let mut s = String::from("(block");
                for stmt in statements {
                    s.push(' ');
                    s.push_str(&Self::print_stmt(stmt));
                }
                s.push(')');
                s
            }

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => match else_branch {
                Some(else_branch) => format!(
                    "(if {} {} {})",
                    Self::print(condition),
                    Self::print_stmt(then_branch),
                    Self::print_stmt(else_branch)
                ),
                None => format!(
                    "(if {} {})",
                    Self::print(condition),
                    Self::print_stmt(then_branch)
                ),
            },

            Stmt::While { condition, body } => format!(
                "(while {} {})",
                Self::print(condition),
                Self::print_stmt(body)
            ),

            Stmt::Function { name, function } => {
                format!("(fun {} {})", name.lexeme, Self::print_function(function))
            }

            Stmt::Return { value, .. } => match value {
                Some(value) => format!("(return {})", Self::print(value)),
                None => "(return)".into(),
            },
        }
    }

    fn print_function(function: &FunctionDef) -> String {
        let params: Vec<&str> = function.params.iter().map(|p| p.lexeme.as_str()).collect();

        let mut s = format!("({})", params.join(" "));
        for stmt in &function.body {
            s.push(' ');
            s.push_str(&Self::print_stmt(stmt));
        }
        s
    }

    // ─────────────────────────── source form ──────────────────────────

    /// Render a program back to Lox source, one statement per line.
    pub fn source(statements: &[Stmt]) -> String {
        statements
            .iter()
            .map(Self::source_stmt)
            .collect::<Vec<String>>()
            .join("\n")
    }

    pub fn source_stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expression(expr) => format!("{};", Self::source_expr(expr)),

            Stmt::Print(expr) => format!("print {};", Self::source_expr(expr)),

            Stmt::Var { name, initializer } => match initializer {
                Some(init) => format!("var {} = {};", name.lexeme, Self::source_expr(init)),
                None => format!("var {};", name.lexeme),
            },

            Stmt::Block(statements) => Self::source_block(statements),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                let mut s = format!(
                    "if ({}) {}",
                    Self::source_expr(condition),
                    Self::source_stmt(then_branch)
                );
                if let Some(else_branch) = else_branch {
                    s.push_str(" else ");
                    s.push_str(&Self::source_stmt(else_branch));
                }
                s
            }

            Stmt::While { condition, body } => format!(
                "while ({}) {}",
                Self::source_expr(condition),
                Self::source_stmt(body)
            ),

            Stmt::Function { name, function } => {
                format!("fun {}{}", name.lexeme, Self::source_function(function))
            }

            Stmt::Return { value, .. } => match value {
                Some(value) => format!("return {};", Self::source_expr(value)),
                None => "return;".into(),
            },
        }
    }

    pub fn source_expr(expr: &Expr) -> String {
        match expr {
            Expr::Literal(lit) => match lit {
                LiteralValue::True => "true".into(),
                LiteralValue::False => "false".into(),
                LiteralValue::Nil => "nil".into(),
                LiteralValue::Str(s) => format!("\"{}\"", s),
                LiteralValue::Number(n) => n.to_string(),
            },

            Expr::Grouping(inner) => format!("({})", Self::source_expr(inner)),

            Expr::Unary { operator, right } => {
                format!("{}{}", operator.lexeme, Self::source_expr(right))
            }

            Expr::Binary {
                left,
                operator,
                right,
            }
            | Expr::Logical {
                left,
                operator,
                right,
            } => format!(
                "{} {} {}",
                Self::source_expr(left),
                operator.lexeme,
                Self::source_expr(right)
            ),

            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
                ..
            } => format!(
                "{} ? {} : {}",
                Self::source_expr(condition),
                Self::source_expr(then_branch),
                Self::source_expr(else_branch)
            ),

            Expr::Variable { name, .. } => name.lexeme.clone(),

            Expr::Assign { name, value, .. } => {
                format!("{} = {}", name.lexeme, Self::source_expr(value))
            }

            Expr::Call {
                callee, arguments, ..
            } => {
                let args: Vec<String> = arguments.iter().map(Self::source_expr).collect();
                format!("{}({})", Self::source_expr(callee), args.join(", "))
            }

            Expr::AnonymousFunction { function, .. } => {
                format!("fun {}", Self::source_function(function))
            }
        }
    }

    fn source_function(function: &FunctionDef) -> String {
        let params: Vec<&str> = function.params.iter().map(|p| p.lexeme.as_str()).collect();

        format!("({}) {}", params.join(", "), Self::source_block(&function.body))
    }

    fn source_block(statements: &[Stmt]) -> String {
        if statements.is_empty() {
            return "{ }".into();
        }

        let body: Vec<String> = statements.iter().map(Self::source_stmt).collect();

        format!("{{ {} }}", body.join(" "))
    }
}

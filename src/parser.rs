/*!
Recursive‑descent parser for Lox.

Time & Space
------------
* **n** = number of tokens (including the sole EOF).

Every token is consumed once by `advance()`; error recovery via
`synchronize()` only ever moves forward, so parsing is **Θ(n)**. The AST
owns clones of the tokens it keeps, so it outlives the token buffer.

Error Policy
------------
Errors never abort the parse. Two kinds exist:

* *unwinding* errors (`Err` from a production) bubble up to `declaration`,
  which records them, resynchronizes at the next statement boundary and
  resumes. This yields about one diagnostic per broken statement.
* *reported* errors (invalid assignment target, over 255 parameters or
  arguments) are recorded in place and parsing carries on as if nothing
  happened.

Grammar (EBNF)
--------------

```text
program        → declaration* EOF ;
declaration    → funDecl | varDecl | statement ;
funDecl        → "fun" IDENT function ;
function       → "(" parameters? ")" block ;
varDecl        → "var" IDENT ( "=" expression )? ";" ;
statement      → exprStmt | forStmt | ifStmt | printStmt
               | returnStmt | whileStmt | block ;
forStmt        → "for" "(" ( varDecl | exprStmt | ";" )
                 expression? ";" expression? ")" statement ;
ifStmt         → "if" "(" expression ")" statement ( "else" statement )? ;
printStmt      → "print" expression ";" ;
returnStmt     → "return" expression? ";" ;
whileStmt      → "while" "(" expression ")" statement ;
block          → "{" declaration* "}" ;
exprStmt       → expression ";" ;
parameters     → IDENT ( "," IDENT )* ;
expression     → assignment ;
assignment     → IDENT "=" assignment | ternary ;
ternary        → logic_or ( "?" expression ":" ternary )? ;
logic_or       → logic_and ( "or" logic_and )* ;
logic_and      → equality  ( "and" equality )* ;
equality       → comparison ( ( "!=" | "==" ) comparison )* ;
comparison     → term ( ( ">" | ">=" | "<" | "<=" ) term )* ;
term           → factor ( ( "-" | "+" ) factor )* ;
factor         → unary ( ( "/" | "*" ) unary )* ;
unary          → ( "!" | "-" ) unary | call ;
call           → primary ( "(" arguments? ")" )* ;
arguments      → expression ( "," expression )* ;
primary        → NUMBER | STRING | "true" | "false" | "nil"
               | IDENT | "(" expression ")" | "fun" function ;
```

`for` has no node of its own: it is desugared into `Block` + `While`.
*/

use std::mem;
use std::rc::Rc;

use crate::error::{LoxError, Result};
use crate::expr::{Expr, ExprId, LiteralValue};
use crate::stmt::{FunctionDef, Stmt};
use crate::token::{Token, TokenType};

use log::{debug, info};

const MAX_ARGS: usize = 255;

/// Top‑level parser over a scanned token list.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<LoxError>,
}

impl Parser {
    /// Construct a new parser. A missing trailing `EOF` is supplied.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        info!("Parser created with {} tokens", tokens.len());

        let line: usize = tokens.last().map_or(1, |t| t.line);

        if tokens.last().map_or(true, |t| t.token_type != TokenType::EOF) {
            tokens.push(Token::new(TokenType::EOF, "", line));
        }

        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program.
    ///
    /// Returns every syntax error found if there was at least one.
    pub fn parse(&mut self) -> std::result::Result<Vec<Stmt>, Vec<LoxError>> {
        info!("Beginning parse phase");

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        if self.errors.is_empty() {
            info!("Parsed {} statement(s)", statements.len());

            Ok(statements)
        } else {
            info!("Parse finished with {} error(s)", self.errors.len());

            Err(mem::take(&mut self.errors))
        }
    }

    // ──────────────────────── declaration rules ───────────────────

    /// Parse one declaration, recovering from any unwinding error.
    fn declaration(&mut self) -> Option<Stmt> {
        debug!("Entering declaration at line {}", self.peek().line);

        let result = if self.check(TokenType::FUN) && self.check_next(TokenType::IDENTIFIER) {
            self.advance();
            self.function_declaration()
        } else if self.matches(TokenType::VAR) {
            self.var_declaration()
        } else {
            self.statement()
        };

        match result {
            Ok(stmt) => Some(stmt),
            Err(e) => {
                self.errors.push(e);
                self.synchronize();
                None
            }
        }
    }

    fn function_declaration(&mut self) -> Result<Stmt> {
        let name: Token = self.consume(TokenType::IDENTIFIER, "Expect function name.")?;

        let function: FunctionDef = self.function("function name")?;

        Ok(Stmt::Function {
            name,
            function: Rc::new(function),
        })
    }

    /// Parameter list and body, shared by declarations and anonymous functions.
    /// `after` names what precedes the `(`, for the error message.
    fn function(&mut self, after: &str) -> Result<FunctionDef> {
        self.consume(
            TokenType::LEFT_PAREN,
            &format!("Expect '(' after {}.", after),
        )?;

        let mut params: Vec<Token> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if params.len() >= MAX_ARGS {
                    let err = LoxError::parse(self.peek(), "Can't have more than 255 parameters.");
                    self.errors.push(err);
                }

                params.push(self.consume(TokenType::IDENTIFIER, "Expect parameter name.")?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after parameters.")?;

        self.consume(TokenType::LEFT_BRACE, "Expect '{' before function body.")?;

        let body: Vec<Stmt> = self.block()?;

        Ok(FunctionDef { params, body })
    }

    fn var_declaration(&mut self) -> Result<Stmt> {
        let name: Token = self.consume(TokenType::IDENTIFIER, "Expect variable name.")?;

        let initializer: Option<Expr> = if self.matches(TokenType::EQUAL) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(
            TokenType::SEMICOLON,
            "Expect ';' after variable declaration.",
        )?;

        Ok(Stmt::Var { name, initializer })
    }

    // ───────────────────────── statement rules ────────────────────

    fn statement(&mut self) -> Result<Stmt> {
        if self.matches(TokenType::FOR) {
            self.for_statement()
        } else if self.matches(TokenType::IF) {
            self.if_statement()
        } else if self.matches(TokenType::WHILE) {
            self.while_statement()
        } else if self.matches(TokenType::RETURN) {
            self.return_statement()
        } else if self.matches(TokenType::LEFT_BRACE) {
            Ok(Stmt::Block(self.block()?))
        } else if self.matches(TokenType::PRINT) {
            self.print_statement()
        } else {
            self.expression_statement()
        }
    }

    /// `for (init; cond; incr) body` becomes
    /// `{ init; while (cond) { body; incr; } }`.
    fn for_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'for'.")?;

        let initializer: Option<Stmt> = if self.matches(TokenType::SEMICOLON) {
            None
        } else if self.matches(TokenType::VAR) {
            Some(self.var_declaration()?)
        } else {
            Some(self.expression_statement()?)
        };

        let condition: Option<Expr> = if !self.check(TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "Expect ';' after loop condition.")?;

        let increment: Option<Expr> = if !self.check(TokenType::RIGHT_PAREN) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after for clauses.")?;

        let mut body: Stmt = self.statement()?;

        if let Some(increment) = increment {
            body = Stmt::Block(vec![body, Stmt::Expression(increment)]);
        }

        body = Stmt::While {
            condition: condition.unwrap_or(Expr::Literal(LiteralValue::True)),
            body: Box::new(body),
        };

        if let Some(initializer) = initializer {
            body = Stmt::Block(vec![initializer, body]);
        }

        Ok(body)
    }

    fn print_statement(&mut self) -> Result<Stmt> {
        let value: Expr = self.expression()?;

        self.consume(TokenType::SEMICOLON, "Expect ';' after value.")?;

        Ok(Stmt::Print(value))
    }

    fn expression_statement(&mut self) -> Result<Stmt> {
        let expr: Expr = self.expression()?;

        self.consume(TokenType::SEMICOLON, "Expect ';' after expression.")?;

        Ok(Stmt::Expression(expr))
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'if'.")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after if condition.")?;

        let then_branch: Box<Stmt> = Box::new(self.statement()?);
        let else_branch: Option<Box<Stmt>> = if self.matches(TokenType::ELSE) {
            Some(Box::new(self.statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
        })
    }

    fn while_statement(&mut self) -> Result<Stmt> {
        self.consume(TokenType::LEFT_PAREN, "Expect '(' after 'while'.")?;
        let condition: Expr = self.expression()?;
        self.consume(TokenType::RIGHT_PAREN, "Expect ')' after condition.")?;
        let body: Box<Stmt> = Box::new(self.statement()?);

        Ok(Stmt::While { condition, body })
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        let keyword: Token = self.previous().clone();
        let value: Option<Expr> = if !self.check(TokenType::SEMICOLON) {
            Some(self.expression()?)
        } else {
            None
        };

        self.consume(TokenType::SEMICOLON, "Expect ';' after return value.")?;

        Ok(Stmt::Return { keyword, value })
    }

    /// Statements up to the closing brace. The opening brace is already consumed.
    fn block(&mut self) -> Result<Vec<Stmt>> {
        let mut statements: Vec<Stmt> = Vec::new();

        while !self.check(TokenType::RIGHT_BRACE) && !self.is_at_end() {
            if let Some(stmt) = self.declaration() {
                statements.push(stmt);
            }
        }

        self.consume(TokenType::RIGHT_BRACE, "Expect '}' after block.")?;

        Ok(statements)
    }

    // ─────────────────────── expression rules ─────────────────────

    fn expression(&mut self) -> Result<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> Result<Expr> {
        let expr: Expr = self.ternary()?;

        if !self.matches(TokenType::EQUAL) {
            return Ok(expr);
        }

        let equals: Token = self.previous().clone();
        let value: Expr = self.assignment()?;

        match expr {
            Expr::Variable { name, .. } => Ok(Expr::Assign {
                id: ExprId::fresh(),
                name,
                value: Box::new(value),
            }),

            target => {
                // recorded in place, no unwinding
                self.errors
                    .push(LoxError::parse(&equals, "Invalid assignment target."));

                Ok(target)
            }
        }
    }

    fn ternary(&mut self) -> Result<Expr> {
        let condition: Expr = self.logical_or()?;

        if !self.matches(TokenType::QUESTION) {
            return Ok(condition);
        }

        let question: Token = self.previous().clone();
        let then_branch: Expr = self.expression()?;

        self.consume(
            TokenType::COLON,
            "Expect ':' after then branch of conditional expression.",
        )?;

        let else_branch: Expr = self.ternary()?;

        Ok(Expr::Ternary {
            condition: Box::new(condition),
            question,
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        })
    }

    fn logical_or(&mut self) -> Result<Expr> {
        self.left_assoc(&[TokenType::OR], Self::logical_and, logical)
    }

    fn logical_and(&mut self) -> Result<Expr> {
        self.left_assoc(&[TokenType::AND], Self::equality, logical)
    }

    fn equality(&mut self) -> Result<Expr> {
        self.left_assoc(
            &[TokenType::BANG_EQUAL, TokenType::EQUAL_EQUAL],
            Self::comparison,
            binary,
        )
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.left_assoc(
            &[
                TokenType::GREATER,
                TokenType::GREATER_EQUAL,
                TokenType::LESS,
                TokenType::LESS_EQUAL,
            ],
            Self::term,
            binary,
        )
    }

    fn term(&mut self) -> Result<Expr> {
        self.left_assoc(&[TokenType::MINUS, TokenType::PLUS], Self::factor, binary)
    }

    fn factor(&mut self) -> Result<Expr> {
        self.left_assoc(&[TokenType::STAR, TokenType::SLASH], Self::unary, binary)
    }

    /// `operand ( op operand )*`, folded to the left.
    fn left_assoc(
        &mut self,
        operators: &[TokenType],
        operand: fn(&mut Self) -> Result<Expr>,
        build: fn(Expr, Token, Expr) -> Expr,
    ) -> Result<Expr> {
        let mut expr: Expr = operand(self)?;

        while self.match_any(operators) {
            let operator: Token = self.previous().clone();
            let right: Expr = operand(self)?;

            expr = build(expr, operator, right);
        }

        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr> {
        if self.matches(TokenType::BANG) || self.matches(TokenType::MINUS) {
            let operator: Token = self.previous().clone();
            let right: Expr = self.unary()?;

            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }

        self.call()
    }

    fn call(&mut self) -> Result<Expr> {
        let mut expr: Expr = self.primary()?;

        while self.matches(TokenType::LEFT_PAREN) {
            expr = self.finish_call(expr)?;
        }

        Ok(expr)
    }

    fn finish_call(&mut self, callee: Expr) -> Result<Expr> {
        let mut arguments: Vec<Expr> = Vec::new();

        if !self.check(TokenType::RIGHT_PAREN) {
            loop {
                if arguments.len() >= MAX_ARGS {
                    let err = LoxError::parse(self.peek(), "Can't have more than 255 arguments.");
                    self.errors.push(err);
                }

                arguments.push(self.expression()?);

                if !self.matches(TokenType::COMMA) {
                    break;
                }
            }
        }

        let paren: Token = self.consume(TokenType::RIGHT_PAREN, "Expect ')' after arguments.")?;

        Ok(Expr::Call {
            callee: Box::new(callee),
            paren,
            arguments,
        })
    }

    fn primary(&mut self) -> Result<Expr> {
        let token: Token = self.peek().clone();

        let literal: LiteralValue = match &token.token_type {
            TokenType::FALSE => LiteralValue::False,
            TokenType::TRUE => LiteralValue::True,
            TokenType::NIL => LiteralValue::Nil,
            TokenType::NUMBER(n) => LiteralValue::Number(*n),
            TokenType::STRING(s) => LiteralValue::Str(s.clone()),

            TokenType::IDENTIFIER => {
                self.advance();

                return Ok(Expr::Variable {
                    id: ExprId::fresh(),
                    name: token,
                });
            }

            TokenType::LEFT_PAREN => {
                self.advance();
                let expr: Expr = self.expression()?;

                self.consume(TokenType::RIGHT_PAREN, "Expect ')' after expression.")?;

                return Ok(Expr::Grouping(Box::new(expr)));
            }

            TokenType::FUN => {
                self.advance();
                let function: FunctionDef = self.function("'fun'")?;

                return Ok(Expr::AnonymousFunction {
                    keyword: token,
                    function: Rc::new(function),
                });
            }

            _ => return Err(LoxError::parse(&token, "Expect expression.")),
        };

        self.advance();

        Ok(Expr::Literal(literal))
    }

    // ────────────────────── utility helpers ───────────────────────

    #[inline(always)]
    fn matches(&mut self, ttype: TokenType) -> bool {
        if self.check(ttype) {
            self.advance();

            return true;
        }

        false
    }

    fn match_any(&mut self, kinds: &[TokenType]) -> bool {
        if kinds.iter().any(|kind| self.check(kind.clone())) {
            self.advance();
            return true;
        }

        false
    }

    #[inline(always)]
    fn consume(&mut self, ttype: TokenType, message: &str) -> Result<Token> {
        if self.check(ttype) {
            return Ok(self.advance().clone());
        }

        debug!("consume failed at line {}: {}", self.peek().line, message);

        Err(LoxError::parse(self.peek(), message))
    }

    #[inline(always)]
    fn check(&self, ttype: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }

        self.peek().token_type == ttype
    }

    /// Like [`check`](Self::check) but one token further ahead.
    fn check_next(&self, ttype: TokenType) -> bool {
        self.tokens
            .get(self.current + 1)
            .map_or(false, |t| t.token_type == ttype)
    }

    #[inline(always)]
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }

        self.previous()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        matches!(self.peek().token_type, TokenType::EOF)
    }

    #[inline(always)]
    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    #[inline(always)]
    fn previous(&self) -> &Token {
        &self.tokens[self.current.saturating_sub(1)]
    }

    /// Discards tokens until it thinks it is at a statement boundary.
    fn synchronize(&mut self) {
        self.advance(); // skip the token that caused the error

        while !self.is_at_end() {
            if matches!(self.previous().token_type, TokenType::SEMICOLON) {
                return;
            }

            match self.peek().token_type {
                TokenType::CLASS
                | TokenType::FUN
                | TokenType::VAR
                | TokenType::FOR
                | TokenType::IF
                | TokenType::WHILE
                | TokenType::PRINT
                | TokenType::RETURN => return,
                _ => {}
            }

            self.advance();
        }
    }
}

fn logical(left: Expr, operator: Token, right: Expr) -> Expr {
    Expr::Logical {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

fn binary(left: Expr, operator: Token, right: Expr) -> Expr {
    Expr::Binary {
        left: Box::new(left),
        operator,
        right: Box::new(right),
    }
}

//! Rule parser - converts rule strings into an AST.
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! or         := and (("or" | "||") and)*
//! and        := not (("and" | "&&") not)*
//! not        := ("not" | "!") not | comparison
//! comparison := additive (cmp additive)*      a < b < c  ==  a < b and b < c
//! additive   := term (("+" | "-") term)*
//! term       := unary ("*" unary)*
//! unary      := "-" unary | primary
//! primary    := int | true | false | rarity name | variable | "(" or ")"
//! ```
//!
//! Identifiers are resolved while parsing, so the AST can only name
//! whitelisted variables.

use super::error::RuleError;
use super::lexer::{tokenize, Token, TokenKind};
use super::variables::Variable;
use crate::cards::Rarity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl CmpOp {
    fn from_token(kind: &TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Eq => Some(CmpOp::Eq),
            TokenKind::NotEq => Some(CmpOp::NotEq),
            TokenKind::Lt => Some(CmpOp::Lt),
            TokenKind::LtEq => Some(CmpOp::LtEq),
            TokenKind::Gt => Some(CmpOp::Gt),
            TokenKind::GtEq => Some(CmpOp::GtEq),
            _ => None,
        }
    }

    /// Is this an ordering (as opposed to equality) comparison?
    #[must_use]
    pub fn is_ordering(self) -> bool {
        !matches!(self, CmpOp::Eq | CmpOp::NotEq)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
}

/// Rule expression tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Expr {
    Bool(bool),
    Int(i64),
    Var(Variable),
    Not(Box<Expr>),
    Neg(Box<Expr>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Compare {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Arith {
        op: ArithOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

/// Parse a rule string.
pub fn parse(rule: &str) -> Result<Expr, RuleError> {
    let tokens = tokenize(rule)?;
    if tokens.is_empty() {
        return Err(RuleError::syntax(0, "empty rule"));
    }

    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        end: rule.chars().count(),
    };
    let expr = parser.parse_or()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(RuleError::syntax(
            token.pos,
            format!("unexpected `{}`", token.kind),
        )),
    }
}

struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,
    end: usize,
}

impl<'t> Parser<'t> {
    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| &t.kind == kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_or(&mut self) -> Result<Expr, RuleError> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Expr, RuleError> {
        let mut left = self.parse_not()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn parse_not(&mut self) -> Result<Expr, RuleError> {
        if self.eat(&TokenKind::Not) {
            let inner = self.parse_not()?;
            return Ok(Expr::Not(Box::new(inner)));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> Result<Expr, RuleError> {
        let first = self.parse_additive()?;

        let mut chain: Option<Expr> = None;
        let mut left = first.clone();
        while let Some(op) = self.peek().and_then(|t| CmpOp::from_token(&t.kind)) {
            self.pos += 1;
            let right = self.parse_additive()?;
            let link = Expr::Compare {
                op,
                left: Box::new(left),
                right: Box::new(right.clone()),
            };
            chain = Some(match chain {
                None => link,
                Some(prev) => Expr::And(Box::new(prev), Box::new(link)),
            });
            left = right;
        }

        Ok(chain.unwrap_or(first))
    }

    fn parse_additive(&mut self) -> Result<Expr, RuleError> {
        let mut left = self.parse_term()?;
        loop {
            let op = if self.eat(&TokenKind::Plus) {
                ArithOp::Add
            } else if self.eat(&TokenKind::Minus) {
                ArithOp::Sub
            } else {
                break;
            };
            let right = self.parse_term()?;
            left = Expr::Arith {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr, RuleError> {
        let mut left = self.parse_unary()?;
        while self.eat(&TokenKind::Star) {
            let right = self.parse_unary()?;
            left = Expr::Arith {
                op: ArithOp::Mul,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, RuleError> {
        if self.eat(&TokenKind::Minus) {
            let inner = self.parse_unary()?;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, RuleError> {
        let Some(token) = self.peek() else {
            return Err(RuleError::syntax(self.end, "unexpected end of rule"));
        };
        self.pos += 1;

        match &token.kind {
            TokenKind::Int(i) => Ok(Expr::Int(*i)),
            TokenKind::Ident(name) => resolve_ident(name),
            TokenKind::LParen => {
                let inner = self.parse_or()?;
                if !self.eat(&TokenKind::RParen) {
                    let pos = self.peek().map_or(self.end, |t| t.pos);
                    return Err(RuleError::syntax(pos, "expected `)`"));
                }
                Ok(inner)
            }
            other => Err(RuleError::syntax(token.pos, format!("unexpected `{}`", other))),
        }
    }
}

fn resolve_ident(name: &str) -> Result<Expr, RuleError> {
    match name {
        "true" | "True" => return Ok(Expr::Bool(true)),
        "false" | "False" => return Ok(Expr::Bool(false)),
        _ => {}
    }
    if let Some(rarity) = Rarity::from_name(name) {
        return Ok(Expr::Int(rarity.code()));
    }
    Variable::lookup(name)
        .map(Expr::Var)
        .ok_or_else(|| RuleError::UnknownIdentifier(name.to_string()))
}

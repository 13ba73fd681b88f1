//! Rule tokenizer.

use super::error::RuleError;

/// Longest accepted rule, in tokens.
pub const MAX_TOKENS: usize = 256;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Int(i64),
    Ident(String),
    And,
    Or,
    Not,
    Plus,
    Minus,
    Star,
    LParen,
    RParen,
    Eq,    // ==
    NotEq, // !=
    Lt,    // <
    LtEq,  // <=
    Gt,    // >
    GtEq,  // >=
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Int(i) => write!(f, "{}", i),
            TokenKind::Ident(s) => write!(f, "{}", s),
            TokenKind::And => write!(f, "and"),
            TokenKind::Or => write!(f, "or"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Eq => write!(f, "=="),
            TokenKind::NotEq => write!(f, "!="),
            TokenKind::Lt => write!(f, "<"),
            TokenKind::LtEq => write!(f, "<="),
            TokenKind::Gt => write!(f, ">"),
            TokenKind::GtEq => write!(f, ">="),
        }
    }
}

/// A token and the character offset where it starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

pub fn tokenize(input: &str) -> Result<Vec<Token>, RuleError> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().enumerate().peekable();

    while let Some(&(pos, c)) = chars.peek() {
        let kind = match c {
            c if c.is_whitespace() => {
                chars.next();
                continue;
            }
            '(' => { chars.next(); TokenKind::LParen }
            ')' => { chars.next(); TokenKind::RParen }
            '+' => { chars.next(); TokenKind::Plus }
            '-' => { chars.next(); TokenKind::Minus }
            '*' => { chars.next(); TokenKind::Star }
            '=' => {
                chars.next();
                if chars.next_if(|&(_, n)| n == '=').is_none() {
                    return Err(RuleError::syntax(pos, "use `==` to compare"));
                }
                TokenKind::Eq
            }
            '!' => {
                chars.next();
                if chars.next_if(|&(_, n)| n == '=').is_some() {
                    TokenKind::NotEq
                } else {
                    TokenKind::Not
                }
            }
            '<' => {
                chars.next();
                if chars.next_if(|&(_, n)| n == '=').is_some() {
                    TokenKind::LtEq
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                chars.next();
                if chars.next_if(|&(_, n)| n == '=').is_some() {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            '&' | '|' => {
                chars.next();
                if chars.next_if(|&(_, n)| n == c).is_none() {
                    let word = if c == '&' { "and" } else { "or" };
                    return Err(RuleError::syntax(pos, format!("use `{c}{c}` or `{word}`")));
                }
                if c == '&' { TokenKind::And } else { TokenKind::Or }
            }
            '0'..='9' => {
                let mut digits = String::new();
                while let Some((_, d)) = chars.next_if(|&(_, d)| d.is_ascii_digit()) {
                    digits.push(d);
                }
                if chars.peek().is_some_and(|&(_, n)| is_ident_char(n)) {
                    return Err(RuleError::syntax(pos, "malformed number"));
                }
                let value = digits
                    .parse::<i64>()
                    .map_err(|_| RuleError::syntax(pos, "number out of range"))?;
                TokenKind::Int(value)
            }
            c if is_ident_start(c) => {
                let mut ident = String::new();
                while let Some((_, ch)) = chars.next_if(|&(_, ch)| is_ident_char(ch)) {
                    ident.push(ch);
                }
                match ident.as_str() {
                    "and" => TokenKind::And,
                    "or" => TokenKind::Or,
                    "not" => TokenKind::Not,
                    _ => TokenKind::Ident(ident),
                }
            }
            other => {
                return Err(RuleError::syntax(pos, format!("unexpected character `{other}`")));
            }
        };

        tokens.push(Token { kind, pos });
        if tokens.len() > MAX_TOKENS {
            return Err(RuleError::syntax(pos, format!("rule longer than {MAX_TOKENS} tokens")));
        }
    }

    Ok(tokens)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

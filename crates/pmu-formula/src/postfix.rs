//! Postfix (RPN) representation of a compiled formula.

use std::fmt;

/// Binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operator {
    /// Parse a single operator character.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Sub),
            '*' => Some(Self::Mul),
            '/' => Some(Self::Div),
            _ => None,
        }
    }

    /// Canonical one-character token.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Binding strength; `*` and `/` bind tighter than `+` and `-`.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    /// All four operators group left to right.
    #[must_use]
    pub const fn is_left_associative(self) -> bool {
        true
    }

    /// Apply the operator to two operands (`lhs op rhs`).
    #[must_use]
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One element of a postfix sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostfixToken {
    /// Identifier or numeric literal, lower-cased.
    Operand(String),
    Operator(Operator),
}

impl fmt::Display for PostfixToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Operand(name) => f.write_str(name),
            Self::Operator(op) => write!(f, "{op}"),
        }
    }
}

/// A compiled formula.
///
/// Only [`compile`](crate::compile) constructs values of this type, so every
/// `Postfix` is the image of a syntactically valid infix formula. Its
/// `Display` form is the space-separated token string stored in the tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Postfix {
    tokens: Vec<PostfixToken>,
}

impl Postfix {
    pub(crate) fn new(tokens: Vec<PostfixToken>) -> Self {
        Self { tokens }
    }

    /// Tokens in evaluation order.
    #[must_use]
    pub fn tokens(&self) -> &[PostfixToken] {
        &self.tokens
    }

    /// Operand tokens in evaluation order (duplicates included).
    pub fn operands(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            PostfixToken::Operand(name) => Some(name.as_str()),
            PostfixToken::Operator(_) => None,
        })
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Always false for a compiled formula; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, token) in self.tokens.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{token}")?;
        }
        Ok(())
    }
}

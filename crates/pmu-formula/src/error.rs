//! Error types for formula compilation and evaluation.

use thiserror::Error;

/// A metric formula that is not a well-formed infix expression.
///
/// Positions are byte offsets into the formula source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaSyntaxError {
    /// The formula contains no tokens at all.
    #[error("formula is empty")]
    Empty,

    /// A character outside the formula alphabet.
    #[error("unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },

    /// A token that cannot follow the previous one (e.g. two operators in a row).
    #[error("unexpected token '{token}' at position {position}")]
    UnexpectedToken { token: String, position: usize },

    /// The formula ends where an operand is still required.
    #[error("unexpected end of formula at position {position}")]
    UnexpectedEnd { position: usize },

    /// A `(` without its `)` or a `)` without its `(`.
    #[error("unbalanced parentheses at position {position}")]
    UnbalancedParentheses { position: usize },
}

impl FormulaSyntaxError {
    /// Byte offset of the offending token, if the error has one.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        match self {
            Self::Empty => None,
            Self::UnexpectedCharacter { position, .. }
            | Self::UnexpectedToken { position, .. }
            | Self::UnexpectedEnd { position }
            | Self::UnbalancedParentheses { position } => Some(*position),
        }
    }
}

/// Failure while evaluating a postfix formula.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Operand is neither a known name nor a numeric literal.
    #[error("unknown operand '{0}'")]
    UnknownOperand(String),

    /// The token sequence is not a valid postfix expression.
    #[error("malformed postfix expression: {0}")]
    Malformed(String),
}

/// Result type for formula compilation.
pub type Result<T> = std::result::Result<T, FormulaSyntaxError>;

//! Formula tokenizer.
//!
//! A maximal run of identifier characters (ASCII letters, digits, `_`) is one
//! operand token. Numeric literals may carry a single decimal point between
//! digits (`0.5`). Parentheses and the four operator characters are tokens on
//! their own; whitespace only separates tokens.

use crate::error::{FormulaSyntaxError, Result};
use crate::postfix::Operator;

/// Token kinds produced by [`tokenize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Identifier or numeric literal, lower-cased.
    Operand(String),
    Operator(Operator),
    OpenParen,
    CloseParen,
}

impl TokenKind {
    /// Source-like text of the token, used in error messages.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Operand(name) => name.clone(),
            Self::Operator(op) => op.symbol().to_string(),
            Self::OpenParen => "(".to_string(),
            Self::CloseParen => ")".to_string(),
        }
    }
}

/// A token and the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

fn is_operand_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Split a formula into tokens.
///
/// # Errors
///
/// Returns [`FormulaSyntaxError::UnexpectedCharacter`] for any character
/// outside the formula alphabet.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut idx = 0;

    while idx < bytes.len() {
        let byte = bytes[idx];
        let start = idx;

        if byte.is_ascii_whitespace() {
            idx += 1;
            continue;
        }

        if is_operand_byte(byte) {
            let numeric = byte.is_ascii_digit();
            let mut seen_point = false;
            idx += 1;
            while idx < bytes.len() {
                let next = bytes[idx];
                if is_operand_byte(next) {
                    idx += 1;
                } else if numeric
                    && !seen_point
                    && next == b'.'
                    && bytes.get(idx + 1).is_some_and(u8::is_ascii_digit)
                {
                    seen_point = true;
                    idx += 1;
                } else {
                    break;
                }
            }
            tokens.push(Token {
                kind: TokenKind::Operand(source[start..idx].to_ascii_lowercase()),
                position: start,
            });
            continue;
        }

        let kind = match byte {
            b'(' => TokenKind::OpenParen,
            b')' => TokenKind::CloseParen,
            _ => match Operator::from_char(char::from(byte)) {
                Some(op) => TokenKind::Operator(op),
                None => {
                    // Everything consumed so far is ASCII, so `start` is a char boundary.
                    let character = source[start..].chars().next().unwrap_or('\u{fffd}');
                    return Err(FormulaSyntaxError::UnexpectedCharacter {
                        character,
                        position: start,
                    });
                }
            },
        };
        tokens.push(Token {
            kind,
            position: start,
        });
        idx += 1;
    }

    Ok(tokens)
}

//! Shunting-yard conversion from infix tokens to postfix.

use crate::error::{FormulaSyntaxError, Result};
use crate::lexer::{Token, TokenKind, tokenize};
use crate::postfix::{Operator, Postfix, PostfixToken};

/// Entries on the operator stack.
#[derive(Debug, Clone, Copy)]
enum StackEntry {
    Operator(Operator),
    /// Open parenthesis and its byte offset.
    OpenParen(usize),
}

/// Compile an infix formula into postfix form.
///
/// Operands are lower-cased; operators are emitted as their one-character
/// symbols. Unary minus is not accepted.
///
/// # Errors
///
/// Returns a [`FormulaSyntaxError`] describing the first offending token.
/// No partial output is produced on failure.
///
/// # Example
///
/// ```
/// let postfix = pmu_formula::compile("((stall_backend / cpu_cycles) * 100)").unwrap();
/// assert_eq!(postfix.to_string(), "stall_backend cpu_cycles / 100 *");
/// ```
pub fn compile(source: &str) -> Result<Postfix> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(FormulaSyntaxError::Empty);
    }

    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<StackEntry> = Vec::new();
    // Alternates between operand and operator positions.
    let mut expect_operand = true;

    for Token { kind, position } in tokens {
        match kind {
            TokenKind::Operand(name) => {
                if !expect_operand {
                    return Err(FormulaSyntaxError::UnexpectedToken {
                        token: name,
                        position,
                    });
                }
                output.push(PostfixToken::Operand(name));
                expect_operand = false;
            }
            TokenKind::Operator(op) => {
                if expect_operand {
                    return Err(unexpected(&TokenKind::Operator(op), position));
                }
                while let Some(&StackEntry::Operator(top)) = stack.last() {
                    let binds_first = top.precedence() > op.precedence()
                        || (top.precedence() == op.precedence() && op.is_left_associative());
                    if !binds_first {
                        break;
                    }
                    stack.pop();
                    output.push(PostfixToken::Operator(top));
                }
                stack.push(StackEntry::Operator(op));
                expect_operand = true;
            }
            TokenKind::OpenParen => {
                if !expect_operand {
                    return Err(unexpected(&TokenKind::OpenParen, position));
                }
                stack.push(StackEntry::OpenParen(position));
            }
            TokenKind::CloseParen => {
                let has_open = stack
                    .iter()
                    .any(|entry| matches!(entry, StackEntry::OpenParen(_)));
                if !has_open {
                    return Err(FormulaSyntaxError::UnbalancedParentheses { position });
                }
                if expect_operand {
                    return Err(unexpected(&TokenKind::CloseParen, position));
                }
                while let Some(entry) = stack.pop() {
                    match entry {
                        StackEntry::Operator(op) => output.push(PostfixToken::Operator(op)),
                        StackEntry::OpenParen(_) => break,
                    }
                }
            }
        }
    }

    if expect_operand {
        return Err(FormulaSyntaxError::UnexpectedEnd {
            position: source.len(),
        });
    }

    while let Some(entry) = stack.pop() {
        match entry {
            StackEntry::Operator(op) => output.push(PostfixToken::Operator(op)),
            StackEntry::OpenParen(position) => {
                return Err(FormulaSyntaxError::UnbalancedParentheses { position });
            }
        }
    }

    Ok(Postfix::new(output))
}

fn unexpected(kind: &TokenKind, position: usize) -> FormulaSyntaxError {
    FormulaSyntaxError::UnexpectedToken {
        token: kind.text(),
        position,
    }
}

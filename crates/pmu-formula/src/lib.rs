//! Metric formula compiler.
//!
//! Translates infix arithmetic over performance-counter names
//! (`((stall_backend / cpu_cycles) * 100)`) into space-separated postfix
//! tokens (`stall_backend cpu_cycles / 100 *`) with the shunting-yard
//! algorithm, and evaluates postfix sequences with an operand stack.
//!
//! # Grammar
//!
//! - Operands: maximal runs of ASCII letters, digits and `_`; numeric
//!   literals may contain one decimal point (`0.5`). Operands are lower-cased.
//! - Operators: binary `+ - * /`, all left-associative; `*` and `/` bind
//!   tighter than `+` and `-`.
//! - Parentheses group; unary minus is not part of the grammar.
//!
//! Compilation is a pure function: identical input always yields identical
//! output and the compiler holds no state between calls.

mod compiler;
mod error;
mod eval;
mod lexer;
mod postfix;

pub use compiler::compile;
pub use error::{EvalError, FormulaSyntaxError, Result};
pub use eval::{evaluate, evaluate_str};
pub use lexer::{Token, TokenKind, tokenize};
pub use postfix::{Operator, Postfix, PostfixToken};

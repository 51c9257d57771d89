//! Stack-machine evaluation of postfix formulas.
//!
//! Mirrors how the table consumer computes metric values: operands are pulled
//! from a name lookup (falling back to numeric literals) and any division by
//! zero makes the whole formula evaluate to `0`.

use crate::error::EvalError;
use crate::postfix::{Operator, Postfix, PostfixToken};

enum Step<'a> {
    Operand(&'a str),
    Operator(Operator),
}

/// Evaluate a compiled formula.
///
/// `lookup` receives lower-cased operand names; operands it does not resolve
/// are parsed as numeric literals.
///
/// # Errors
///
/// Returns [`EvalError::UnknownOperand`] for an operand that is neither
/// resolved nor numeric.
///
/// # Example
///
/// ```
/// let postfix = pmu_formula::compile("(stall_backend / cpu_cycles) * 100").unwrap();
/// let value = pmu_formula::evaluate(&postfix, |name| match name {
///     "stall_backend" => Some(25.0),
///     "cpu_cycles" => Some(200.0),
///     _ => None,
/// })
/// .unwrap();
/// assert_eq!(value, 12.5);
/// ```
pub fn evaluate<F>(postfix: &Postfix, lookup: F) -> Result<f64, EvalError>
where
    F: Fn(&str) -> Option<f64>,
{
    let steps = postfix.tokens().iter().map(|token| match token {
        PostfixToken::Operand(name) => Step::Operand(name.as_str()),
        PostfixToken::Operator(op) => Step::Operator(*op),
    });
    run(steps, &lookup)
}

/// Evaluate a postfix token string as stored in the generated tables.
///
/// Tokens are separated by whitespace. Operand names are lower-cased before
/// lookup.
///
/// # Errors
///
/// Returns [`EvalError::Malformed`] when the string is not a valid postfix
/// sequence, or [`EvalError::UnknownOperand`] for unresolved operands.
pub fn evaluate_str<F>(compiled: &str, lookup: F) -> Result<f64, EvalError>
where
    F: Fn(&str) -> Option<f64>,
{
    let lowered = compiled.to_ascii_lowercase();
    let steps = lowered.split_whitespace().map(|token| {
        let mut chars = token.chars();
        match (chars.next().and_then(Operator::from_char), chars.next()) {
            (Some(op), None) => Step::Operator(op),
            _ => Step::Operand(token),
        }
    });
    run(steps, &lookup)
}

fn run<'a, I, F>(steps: I, lookup: &F) -> Result<f64, EvalError>
where
    I: Iterator<Item = Step<'a>>,
    F: Fn(&str) -> Option<f64>,
{
    let mut stack: Vec<f64> = Vec::new();
    let mut divided_by_zero = false;

    for step in steps {
        match step {
            Step::Operand(name) => stack.push(resolve(name, lookup)?),
            Step::Operator(op) => {
                let (Some(rhs), Some(lhs)) = (stack.pop(), stack.pop()) else {
                    return Err(EvalError::Malformed(format!(
                        "operator '{op}' is missing an operand"
                    )));
                };
                if op == Operator::Div && rhs == 0.0 {
                    divided_by_zero = true;
                    stack.push(0.0);
                } else {
                    stack.push(op.apply(lhs, rhs));
                }
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(if divided_by_zero { 0.0 } else { *value }),
        [] => Err(EvalError::Malformed("no operands".to_string())),
        values => Err(EvalError::Malformed(format!(
            "{} operands left without an operator",
            values.len()
        ))),
    }
}

fn resolve<F>(name: &str, lookup: &F) -> Result<f64, EvalError>
where
    F: Fn(&str) -> Option<f64>,
{
    if let Some(value) = lookup(name) {
        return Ok(value);
    }
    name.parse::<f64>()
        .ok()
        .filter(|_| name.starts_with(|c: char| c.is_ascii_digit()))
        .ok_or_else(|| EvalError::UnknownOperand(name.to_string()))
}

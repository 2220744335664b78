//! Recursive bottom-up evaluator: reduces an [`Expression`] tree under a
//! variable environment and angle [`Mode`], falling back to symbolic
//! rewriting (or leaving a node untouched) wherever an operand is not fully
//! numeric.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::ast::Expression;
use crate::error::EvalError;
use crate::functions;
use crate::mode::Mode;
use crate::numeric;
use crate::operators;

/// The user-supplied (and function-shadowed) variable bindings threaded
/// through evaluation.
pub type VarEnv = HashMap<String, Expression>;

lazy_static! {
    /// Always injected as a base layer under user variables; user bindings
    /// of the same name shadow these.
    static ref DEFAULT_VARIABLES: HashMap<String, Expression> = {
        let mut env = HashMap::new();
        env.insert("pi".to_string(), Expression::Float(std::f64::consts::PI));
        env.insert("e".to_string(), Expression::Float(std::f64::consts::E));
        env
    };
}

/// Evaluates `expr` under `vars` (shadowing the built-in `pi`/`e` bindings)
/// and the given angle `mode`.
pub fn evaluate(expr: &Expression, mode: Mode, vars: &VarEnv) -> Result<Expression, EvalError> {
    match expr {
        Expression::Integer(_) | Expression::Float(_) | Expression::Ratio(_, _) => Ok(expr.clone()),

        Expression::Variable(name) => match vars.get(name).or_else(|| DEFAULT_VARIABLES.get(name)) {
            Some(bound) => evaluate(bound, mode, vars),
            None => Ok(Expression::Variable(name.clone())),
        },

        Expression::Unary(operand, op) => {
            let evaluated_operand = evaluate(operand, mode, vars)?;
            if numeric::is_numeric(&evaluated_operand) {
                operators::apply_unary_numeric(*op, &evaluated_operand)
            } else {
                Ok(operators::symbolic_unary_rewrite(&evaluated_operand))
            }
        }

        Expression::Binary(left, right, op) => {
            let evaluated_left = evaluate(left, mode, vars)?;
            let evaluated_right = evaluate(right, mode, vars)?;
            if numeric::is_numeric(&evaluated_left) && numeric::is_numeric(&evaluated_right) {
                operators::apply_binary_numeric(*op, &evaluated_left, &evaluated_right)
            } else {
                match operators::symbolic_binary_rewrite(*op, &evaluated_left, &evaluated_right)? {
                    Some(rewritten) => Ok(rewritten),
                    None => Ok(Expression::binary(evaluated_left, evaluated_right, *op)),
                }
            }
        }

        Expression::FunctionCall(name, args) => functions::dispatch(name, args, mode, vars),
    }
}

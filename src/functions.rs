//! Function library: built-in functions including trig-mode handling,
//! `sum`, and `diff`.

use lazy_static::lazy_static;
use std::collections::HashMap;

use crate::ast::Expression;
use crate::differentiate;
use crate::error::EvalError;
use crate::evaluator::{self, VarEnv};
use crate::mode::Mode;
use crate::numeric::{self, Numeric};

lazy_static! {
    /// Fixed arity `(min, max)` per built-in, consulted by the AST builder
    /// when it validates a synthesized `FunctionCall` token.
    static ref ARITY_TABLE: HashMap<&'static str, (usize, usize)> = {
        let mut table = HashMap::new();
        table.insert("sin", (1, 1));
        table.insert("cos", (1, 1));
        table.insert("tan", (1, 1));
        table.insert("asin", (1, 1));
        table.insert("acos", (1, 1));
        table.insert("atan", (1, 1));
        table.insert("atan2", (2, 2));
        table.insert("ln", (1, 1));
        table.insert("log", (2, 2));
        table.insert("min", (2, 2));
        table.insert("max", (2, 2));
        table.insert("sum", (4, 4));
        table.insert("diff", (2, 2));
        table
    };
}

/// Looks up a function's declared `(min, max)` arity, or `None` if no
/// built-in of that name is registered.
pub fn arity_range(name: &str) -> Option<(usize, usize)> {
    ARITY_TABLE.get(name).copied()
}

/// Dispatches a call to its handler. Callers (the evaluator) must already
/// have validated the name and arity via [`arity_range`] — this is
/// guaranteed once an expression has passed through the AST builder, since
/// its `FunctionCall` constructor refuses unknown names and bad arities.
pub fn dispatch(name: &str, args: &[Expression], mode: Mode, vars: &VarEnv) -> Result<Expression, EvalError> {
    match name {
        "sin" => trig_forward(name, args, mode, vars, f64::sin),
        "cos" => trig_forward(name, args, mode, vars, f64::cos),
        "tan" => trig_forward(name, args, mode, vars, f64::tan),
        "asin" => trig_inverse(name, args, mode, vars, f64::asin),
        "acos" => trig_inverse(name, args, mode, vars, f64::acos),
        "atan" => trig_inverse(name, args, mode, vars, f64::atan),
        "atan2" => atan2(args, mode, vars),
        "ln" => ln(args, mode, vars),
        "log" => log(args, mode, vars),
        "min" => min_max(name, args, mode, vars, f64::min),
        "max" => min_max(name, args, mode, vars, f64::max),
        "sum" => sum(args, mode, vars),
        "diff" => diff(args, mode, vars),
        other => unreachable!("dispatch called with unregistered function '{}'", other),
    }
}

fn eval_all(args: &[Expression], mode: Mode, vars: &VarEnv) -> Result<Vec<Expression>, EvalError> {
    args.iter().map(|arg| evaluator::evaluate(arg, mode, vars)).collect()
}

fn all_numeric(args: &[Expression]) -> bool {
    args.iter().all(numeric::is_numeric)
}

/// `sin`/`cos`/`tan`: scale the evaluated argument into radians, then apply
/// the math function if the scaled value turned out numeric; otherwise
/// rebuild the call with the evaluated (unscaled) argument.
fn trig_forward(
    name: &str,
    args: &[Expression],
    mode: Mode,
    vars: &VarEnv,
    f: fn(f64) -> f64,
) -> Result<Expression, EvalError> {
    let evaluated_arg = evaluator::evaluate(&args[0], mode, vars)?;
    let factor = Expression::Float(mode.to_radians_factor());
    let scaled = evaluator::evaluate(&Expression::binary(evaluated_arg.clone(), factor, '*'), mode, vars)?;

    if numeric::is_numeric(&scaled) {
        Ok(Expression::Float(f(scaled.as_float())))
    } else {
        Ok(Expression::FunctionCall(name.to_string(), vec![evaluated_arg]))
    }
}

/// `asin`/`acos`/`atan`: evaluate the argument as f64, apply the arc
/// function, then scale the result by the inverse factor.
fn trig_inverse(
    name: &str,
    args: &[Expression],
    mode: Mode,
    vars: &VarEnv,
    f: fn(f64) -> f64,
) -> Result<Expression, EvalError> {
    let evaluated = eval_all(args, mode, vars)?;
    if all_numeric(&evaluated) {
        let radians_result = f(evaluated[0].as_float());
        Ok(Expression::Float(radians_result * mode.from_radians_factor()))
    } else {
        Ok(Expression::FunctionCall(name.to_string(), evaluated))
    }
}

fn atan2(args: &[Expression], mode: Mode, vars: &VarEnv) -> Result<Expression, EvalError> {
    let evaluated = eval_all(args, mode, vars)?;
    if all_numeric(&evaluated) {
        let radians_result = evaluated[0].as_float().atan2(evaluated[1].as_float());
        Ok(Expression::Float(radians_result * mode.from_radians_factor()))
    } else {
        Ok(Expression::FunctionCall("atan2".to_string(), evaluated))
    }
}

fn ln(args: &[Expression], mode: Mode, vars: &VarEnv) -> Result<Expression, EvalError> {
    let evaluated = eval_all(args, mode, vars)?;
    if all_numeric(&evaluated) {
        Ok(Expression::Float(evaluated[0].as_float().ln()))
    } else {
        Ok(Expression::FunctionCall("ln".to_string(), evaluated))
    }
}

/// `log(base, x) = ln(x) / ln(base)` — argument order fixed per the design
/// notes' resolution of the source ambiguity.
fn log(args: &[Expression], mode: Mode, vars: &VarEnv) -> Result<Expression, EvalError> {
    let evaluated = eval_all(args, mode, vars)?;
    if all_numeric(&evaluated) {
        let base = evaluated[0].as_float();
        let x = evaluated[1].as_float();
        Ok(Expression::Float(x.ln() / base.ln()))
    } else {
        Ok(Expression::FunctionCall("log".to_string(), evaluated))
    }
}

fn min_max(
    name: &str,
    args: &[Expression],
    mode: Mode,
    vars: &VarEnv,
    f: fn(f64, f64) -> f64,
) -> Result<Expression, EvalError> {
    let evaluated = eval_all(args, mode, vars)?;
    if all_numeric(&evaluated) {
        Ok(Expression::Float(f(evaluated[0].as_float(), evaluated[1].as_float())))
    } else {
        Ok(Expression::FunctionCall(name.to_string(), evaluated))
    }
}

fn variable_name(expr: &Expression, function: &'static str) -> Result<String, EvalError> {
    match expr {
        Expression::Variable(name) => Ok(name.clone()),
        _ => Err(EvalError::ArgumentTypeError { function: function.to_string(), expected: "a bare variable name" }),
    }
}

/// `sum(expr, ident, start, end)`: accumulate `expr` over `ident` bound to
/// each integer in `[start, end]` (empty if `start > end`), evaluating the
/// accumulation step against the outer (unshadowed) environment.
fn sum(args: &[Expression], mode: Mode, vars: &VarEnv) -> Result<Expression, EvalError> {
    let body = &args[0];
    let var_name = variable_name(&args[1], "sum")?;

    let start_val = evaluator::evaluate(&args[2], mode, vars)?;
    let end_val = evaluator::evaluate(&args[3], mode, vars)?;
    let (start, end) = match (&start_val, &end_val) {
        (Expression::Integer(s), Expression::Integer(e)) => (*s, *e),
        _ => return Err(EvalError::SumBoundsNotInteger),
    };

    let mut accumulator = Expression::Integer(0);
    for i in start..=end {
        let mut shadowed = vars.clone();
        shadowed.insert(var_name.clone(), Expression::Integer(i));
        let term = evaluator::evaluate(body, mode, &shadowed)?;
        accumulator = evaluator::evaluate(&Expression::binary(accumulator, term, '+'), mode, vars)?;
    }

    Ok(accumulator)
}

/// `diff(expr, ident)`: structurally differentiate, then evaluate the result.
fn diff(args: &[Expression], mode: Mode, vars: &VarEnv) -> Result<Expression, EvalError> {
    let var_name = variable_name(&args[1], "diff")?;
    let derivative = differentiate::differentiate(&args[0], &var_name)?;
    evaluator::evaluate(&derivative, mode, vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars() -> VarEnv {
        HashMap::new()
    }

    #[test]
    fn sin_in_degrees_of_ninety_is_about_one() {
        let result = trig_forward("sin", &[Expression::Integer(90)], Mode::Degrees, &vars(), f64::sin).unwrap();
        match result {
            Expression::Float(v) => assert!((v - 1.0).abs() < 1e-4),
            other => panic!("expected Float, got {:?}", other),
        }
    }

    #[test]
    fn sin_of_symbolic_argument_rebuilds_call() {
        let x = Expression::Variable("x".to_string());
        let result = trig_forward("sin", &[x.clone()], Mode::Radians, &vars(), f64::sin).unwrap();
        assert_eq!(result, Expression::FunctionCall("sin".to_string(), vec![x]));
    }

    #[test]
    fn asin_one_in_degrees_is_ninety() {
        let result = trig_inverse("asin", &[Expression::Integer(1)], Mode::Degrees, &vars(), f64::asin).unwrap();
        match result {
            Expression::Float(v) => assert!((v - 90.0).abs() < 1e-4),
            other => panic!("expected Float, got {:?}", other),
        }
    }

    #[test]
    fn log_base_x_order() {
        let result = log(&[Expression::Integer(2), Expression::Integer(8)], Mode::Radians, &vars()).unwrap();
        match result {
            Expression::Float(v) => assert!((v - 3.0).abs() < 1e-9),
            other => panic!("expected Float, got {:?}", other),
        }
    }

    #[test]
    fn sum_accumulates_integer_series() {
        let x = Expression::Variable("x".to_string());
        let body = Expression::binary(x.clone(), Expression::Integer(2), '^');
        let result = sum(&[body, x, Expression::Integer(1), Expression::Integer(3)], Mode::Radians, &vars()).unwrap();
        // 1^2 + 2^2 + 3^2 = 14, computed through the float '^' kernel.
        match result {
            Expression::Float(v) => assert!((v - 14.0).abs() < 1e-9),
            other => panic!("expected Float, got {:?}", other),
        }
    }

    #[test]
    fn sum_with_empty_range_is_zero() {
        let x = Expression::Variable("x".to_string());
        let result = sum(&[x.clone(), x, Expression::Integer(5), Expression::Integer(1)], Mode::Radians, &vars()).unwrap();
        assert_eq!(result, Expression::Integer(0));
    }

    #[test]
    fn sum_requires_variable_ident() {
        let err = sum(
            &[Expression::Integer(1), Expression::Integer(2), Expression::Integer(1), Expression::Integer(3)],
            Mode::Radians,
            &vars(),
        )
        .unwrap_err();
        assert!(matches!(err, EvalError::ArgumentTypeError { .. }));
    }

    #[test]
    fn sum_requires_integer_bounds() {
        let x = Expression::Variable("x".to_string());
        let err = sum(&[x.clone(), x, Expression::Float(1.5), Expression::Integer(3)], Mode::Radians, &vars()).unwrap_err();
        assert_eq!(err, EvalError::SumBoundsNotInteger);
    }
}

//! Numeric kernel: integer / ratio / float arithmetic with promotion rules.
//!
//! This module never looks at [`Expression`](crate::ast::Expression) variants
//! other than the three numeric ones; it is the arithmetic substrate the
//! operator table and function library build on.

use crate::ast::Expression;
use crate::error::EvalError;

/// Greatest common divisor, iterative Euclidean algorithm. Always non-negative.
fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Reduces a raw (numerator, denominator) pair to its canonical `Expression`
/// form: `Integer(0)` if the numerator is zero, `Integer(n)` if the
/// denominator divides evenly, else a `Ratio` with gcd 1 and the sign carried
/// on the numerator.
///
/// `den` must be non-zero; callers raise [`EvalError::DivisionByZero`]
/// themselves before this is reached.
pub fn reduce_ratio(num: i64, den: i64) -> Expression {
    debug_assert!(den != 0, "reduce_ratio called with a zero denominator");

    if num == 0 {
        return Expression::Integer(0);
    }

    let (mut num, mut den) = (num, den);
    if den < 0 {
        num = -num;
        den = -den;
    }

    let divisor = gcd(num, den);
    let num = num / divisor;
    let den = den / divisor;

    if den == 1 {
        Expression::Integer(num)
    } else {
        Expression::Ratio(num, den)
    }
}

/// Numeric leaves expose a lossy float view, and zero/one predicates used by
/// the operator table's symbolic identity rules.
pub trait Numeric {
    fn as_float(&self) -> f64;
    fn is_zero(&self) -> bool;
    fn is_one(&self) -> bool;
}

impl Numeric for Expression {
    fn as_float(&self) -> f64 {
        match self {
            Expression::Integer(i) => *i as f64,
            Expression::Float(f) => *f,
            Expression::Ratio(num, den) => *num as f64 / *den as f64,
            _ => f64::NAN,
        }
    }

    fn is_zero(&self) -> bool {
        match self {
            Expression::Integer(i) => *i == 0,
            Expression::Float(f) => *f == 0.0,
            Expression::Ratio(num, _) => *num == 0,
            _ => false,
        }
    }

    fn is_one(&self) -> bool {
        match self {
            Expression::Integer(i) => *i == 1,
            Expression::Float(f) => *f == 1.0,
            Expression::Ratio(num, den) => *num == 1 && *den == 1,
            _ => false,
        }
    }
}

/// True for the three numeric `Expression` variants.
pub fn is_numeric(expr: &Expression) -> bool {
    matches!(expr, Expression::Integer(_) | Expression::Float(_) | Expression::Ratio(_, _))
}

fn as_ratio_parts(expr: &Expression) -> (i64, i64) {
    match expr {
        Expression::Integer(i) => (*i, 1),
        Expression::Ratio(num, den) => (*num, *den),
        _ => unreachable!("as_ratio_parts called on a non-exact numeric"),
    }
}

fn is_float(expr: &Expression) -> bool {
    matches!(expr, Expression::Float(_))
}

/// `l + r` under the promotion rule: float if either operand is float,
/// otherwise exact rational addition followed by `reduce_ratio`.
pub fn add(l: &Expression, r: &Expression) -> Expression {
    if is_float(l) || is_float(r) {
        Expression::Float(l.as_float() + r.as_float())
    } else {
        let (ln, ld) = as_ratio_parts(l);
        let (rn, rd) = as_ratio_parts(r);
        reduce_ratio(ln * rd + rn * ld, ld * rd)
    }
}

/// `l - r`, same promotion rule as [`add`].
pub fn sub(l: &Expression, r: &Expression) -> Expression {
    if is_float(l) || is_float(r) {
        Expression::Float(l.as_float() - r.as_float())
    } else {
        let (ln, ld) = as_ratio_parts(l);
        let (rn, rd) = as_ratio_parts(r);
        reduce_ratio(ln * rd - rn * ld, ld * rd)
    }
}

/// `l * r`, same promotion rule as [`add`].
pub fn mul(l: &Expression, r: &Expression) -> Expression {
    if is_float(l) || is_float(r) {
        Expression::Float(l.as_float() * r.as_float())
    } else {
        let (ln, ld) = as_ratio_parts(l);
        let (rn, rd) = as_ratio_parts(r);
        reduce_ratio(ln * rn, ld * rd)
    }
}

/// `l / r`. Float division follows IEEE-754 (so it may yield `inf`/`NaN`);
/// exact rational division by an exact zero raises [`EvalError::DivisionByZero`]
/// before any `Ratio` is constructed.
pub fn div(l: &Expression, r: &Expression) -> Result<Expression, EvalError> {
    if is_float(l) || is_float(r) {
        Ok(Expression::Float(l.as_float() / r.as_float()))
    } else {
        let (ln, ld) = as_ratio_parts(l);
        let (rn, rd) = as_ratio_parts(r);
        if rn == 0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(reduce_ratio(ln * rd, ld * rn))
    }
}

/// Exponentiation is always computed in `f64`; we do not attempt exact
/// rational power per spec.
pub fn pow(l: &Expression, r: &Expression) -> Expression {
    Expression::Float(l.as_float().powf(r.as_float()))
}

/// Factorial, defined only on non-negative `Integer`s, computed iteratively.
pub fn factorial(expr: &Expression) -> Result<Expression, EvalError> {
    match expr {
        Expression::Integer(n) if *n >= 0 => {
            let mut acc: i64 = 1;
            for k in 2..=*n {
                acc = acc.saturating_mul(k);
            }
            Ok(Expression::Integer(acc))
        }
        _ => Err(EvalError::FactorialDomain),
    }
}

/// Negation, preserving the operand's variant.
pub fn negate(expr: &Expression) -> Expression {
    match expr {
        Expression::Integer(i) => Expression::Integer(-i),
        Expression::Float(f) => Expression::Float(-f),
        Expression::Ratio(num, den) => Expression::Ratio(-num, *den),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduces_to_integer_when_denominator_is_one() {
        assert_eq!(reduce_ratio(4, 2), Expression::Integer(2));
    }

    #[test]
    fn reduces_zero_numerator_to_integer_zero() {
        assert_eq!(reduce_ratio(0, 5), Expression::Integer(0));
    }

    #[test]
    fn reduces_and_carries_sign_on_numerator() {
        assert_eq!(reduce_ratio(2, -4), Expression::Ratio(-1, 2));
    }

    #[test]
    fn add_promotes_to_float_when_either_operand_is_float() {
        assert_eq!(add(&Expression::Integer(1), &Expression::Float(2.5)), Expression::Float(3.5));
    }

    #[test]
    fn add_stays_exact_for_integers() {
        assert_eq!(add(&Expression::Integer(1), &Expression::Integer(2)), Expression::Integer(3));
    }

    #[test]
    fn div_by_exact_zero_errors() {
        assert_eq!(div(&Expression::Integer(1), &Expression::Integer(0)), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn div_by_float_zero_yields_infinity() {
        let result = div(&Expression::Integer(1), &Expression::Float(0.0)).unwrap();
        assert_eq!(result, Expression::Float(f64::INFINITY));
    }

    #[test]
    fn factorial_of_five_is_120() {
        assert_eq!(factorial(&Expression::Integer(5)).unwrap(), Expression::Integer(120));
    }

    #[test]
    fn factorial_of_negative_errors() {
        assert_eq!(factorial(&Expression::Integer(-1)), Err(EvalError::FactorialDomain));
    }

    #[test]
    fn factorial_of_float_errors() {
        assert_eq!(factorial(&Expression::Float(3.0)), Err(EvalError::FactorialDomain));
    }

    #[test]
    fn negate_preserves_variant() {
        assert_eq!(negate(&Expression::Ratio(1, 2)), Expression::Ratio(-1, 2));
    }
}

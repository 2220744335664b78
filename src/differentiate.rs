//! Structural differentiation: `d/d(ident)` applied to an [`Expression`]
//! tree, producing an (unsimplified) derivative tree. The caller is
//! expected to evaluate the result afterwards to fold constants and apply
//! the symbolic identity rewrites.

use crate::ast::Expression;
use crate::error::EvalError;

/// Differentiates `expr` with respect to `ident`.
pub fn differentiate(expr: &Expression, ident: &str) -> Result<Expression, EvalError> {
    match expr {
        Expression::Integer(_) | Expression::Float(_) | Expression::Ratio(_, _) => Ok(Expression::Integer(0)),

        Expression::Variable(name) => {
            if name == ident {
                Ok(Expression::Integer(1))
            } else {
                // Treated as a constant w.r.t. `ident`, but per spec the
                // constant is returned unchanged rather than folded to 0.
                Ok(Expression::Variable(name.clone()))
            }
        }

        Expression::Unary(operand, '~') => {
            let d_operand = differentiate(operand, ident)?;
            Ok(Expression::unary(d_operand, '~'))
        }

        Expression::Binary(left, right, '+') => {
            let dl = differentiate(left, ident)?;
            let dr = differentiate(right, ident)?;
            Ok(Expression::binary(dl, dr, '+'))
        }

        Expression::Binary(left, right, '-') => {
            let dl = differentiate(left, ident)?;
            let dr = differentiate(right, ident)?;
            Ok(Expression::binary(dl, dr, '-'))
        }

        // Product rule: d(l*r) = dl*r + l*dr
        Expression::Binary(left, right, '*') => {
            let dl = differentiate(left, ident)?;
            let dr = differentiate(right, ident)?;
            let term_left = Expression::binary(dl, (**right).clone(), '*');
            let term_right = Expression::binary((**left).clone(), dr, '*');
            Ok(Expression::binary(term_left, term_right, '+'))
        }

        // Quotient rule: d(l/r) = (dl*r - l*dr) / r^2
        Expression::Binary(left, right, '/') => {
            let dl = differentiate(left, ident)?;
            let dr = differentiate(right, ident)?;
            let term_left = Expression::binary(dl, (**right).clone(), '*');
            let term_right = Expression::binary((**left).clone(), dr, '*');
            let numerator = Expression::binary(term_left, term_right, '-');
            let denominator = Expression::binary((**right).clone(), Expression::Integer(2), '^');
            Ok(Expression::binary(numerator, denominator, '/'))
        }

        // Power rule, exponent treated as a constant: d(l^r) = r * l^(r-1) * dl
        Expression::Binary(left, right, '^') => {
            let dl = differentiate(left, ident)?;
            let reduced_exponent = Expression::binary((**right).clone(), Expression::Integer(1), '-');
            let power = Expression::binary((**left).clone(), reduced_exponent, '^');
            let scaled = Expression::binary((**right).clone(), power, '*');
            Ok(Expression::binary(scaled, dl, '*'))
        }

        _ => Err(EvalError::UnsupportedDifferentiation),
    }
}

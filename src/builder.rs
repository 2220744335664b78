//! AST builder: folds an RPN token sequence into an [`Expression`] tree via
//! a value stack, validating function names/arity as calls are constructed.

use crate::ast::Expression;
use crate::error::ParseError;
use crate::functions;
use crate::token::Token;

/// Folds `rpn` (the output of [`crate::shunter::shunt`]) into a single
/// expression tree.
pub fn build(rpn: &[Token]) -> Result<Expression, ParseError> {
    let mut stack: Vec<Expression> = Vec::new();

    for tok in rpn {
        match tok {
            Token::Integer { value, .. } => stack.push(Expression::Integer(*value)),
            Token::Float { value, .. } => stack.push(Expression::Float(*value)),
            Token::Identifier { name, .. } => stack.push(Expression::Variable(name.clone())),

            Token::Operator { symbol, .. } => {
                let info = crate::operators::lookup(*symbol).ok_or(ParseError::UnknownOperator(*symbol))?;
                if info.arity == 1 {
                    let operand = stack.pop().ok_or(ParseError::StackUnderflow)?;
                    stack.push(Expression::unary(operand, *symbol));
                } else {
                    let right = stack.pop().ok_or(ParseError::StackUnderflow)?;
                    let left = stack.pop().ok_or(ParseError::StackUnderflow)?;
                    stack.push(Expression::binary(left, right, *symbol));
                }
            }

            Token::FunctionCall { name, arg_count, .. } => {
                let (min_arity, max_arity) = functions::arity_range(name)
                    .ok_or_else(|| ParseError::UnknownFunction(name.clone()))?;
                if *arg_count < min_arity || *arg_count > max_arity {
                    return Err(ParseError::ArityMismatch {
                        name: name.clone(),
                        expected_min: min_arity,
                        expected_max: max_arity,
                        got: *arg_count,
                    });
                }
                if stack.len() < *arg_count {
                    return Err(ParseError::StackUnderflow);
                }
                let mut args = stack.split_off(stack.len() - arg_count);
                args.reverse();
                stack.push(Expression::FunctionCall(name.clone(), args));
            }

            Token::Punctuation { .. } => {
                unreachable!("shunter never leaves punctuation in its RPN output")
            }
        }
    }

    if stack.len() != 1 {
        return Err(ParseError::UnbalancedStack);
    }

    Ok(stack.pop().expect("checked len == 1 above"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::shunter::shunt;

    fn build_str(input: &str) -> Expression {
        build(&shunt(&tokenize(input).unwrap()).unwrap()).unwrap()
    }

    #[test]
    fn builds_simple_binary_tree() {
        assert_eq!(build_str("1+2"), Expression::binary(Expression::Integer(1), Expression::Integer(2), '+'));
    }

    #[test]
    fn builds_unary_negation() {
        assert_eq!(build_str("-3"), Expression::unary(Expression::Integer(3), '~'));
    }

    #[test]
    fn builds_function_call_with_reversed_stack_order() {
        let expr = build_str("min(3,5)");
        assert_eq!(
            expr,
            Expression::FunctionCall("min".to_string(), vec![Expression::Integer(3), Expression::Integer(5)])
        );
    }

    #[test]
    fn unknown_function_errors() {
        let rpn = shunt(&tokenize("bogus(1)").unwrap()).unwrap();
        assert_eq!(build(&rpn), Err(ParseError::UnknownFunction("bogus".to_string())));
    }

    #[test]
    fn arity_mismatch_errors() {
        let rpn = shunt(&tokenize("sin(1,2)").unwrap()).unwrap();
        assert_eq!(
            build(&rpn),
            Err(ParseError::ArityMismatch { name: "sin".to_string(), expected_min: 1, expected_max: 1, got: 2 })
        );
    }

    #[test]
    fn empty_input_errors() {
        assert_eq!(build(&[]), Err(ParseError::UnbalancedStack));
    }
}

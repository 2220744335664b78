// The main library file that exports all modules

pub mod ast;
pub mod builder;
pub mod differentiate;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod lexer;
pub mod mode;
pub mod numeric;
pub mod operators;
pub mod shunter;
pub mod token;

// Logging
pub mod logging;

pub use ast::Expression;
pub use error::{EngineError, EvalError, LexError, ParseError};
pub use evaluator::VarEnv;
pub use mode::Mode;
pub use token::Token;

/// Parses `text` into an (un-evaluated) expression tree: lex, shunt to RPN,
/// fold into a tree.
pub fn parse(text: &str) -> Result<Expression, EngineError> {
    let tokens = lexer::tokenize(text)?;
    let rpn = shunter::shunt(&tokens)?;
    let expr = builder::build(&rpn)?;
    Ok(expr)
}

/// Parses and evaluates `text` under `mode` and `variables` in one step.
pub fn evaluate(text: &str, mode: Mode, variables: &VarEnv) -> Result<Expression, EngineError> {
    let expr = parse(text)?;
    let result = evaluator::evaluate(&expr, mode, variables)?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_evaluates_arithmetic() {
        let result = evaluate("-3+4", Mode::Radians, &VarEnv::new()).unwrap();
        assert_eq!(result, Expression::Integer(1));
    }

    #[test]
    fn exact_rational_division_stays_exact() {
        let result = evaluate("2/4", Mode::Radians, &VarEnv::new()).unwrap();
        assert_eq!(result.to_string(), "1/2");
    }

    #[test]
    fn float_literal_contaminates_division() {
        let result = evaluate("2/4.", Mode::Radians, &VarEnv::new()).unwrap();
        assert_eq!(result, Expression::Float(0.5));
    }

    #[test]
    fn variable_substitution() {
        let mut vars = VarEnv::new();
        vars.insert("x".to_string(), Expression::Integer(3));
        let result = evaluate("x*2", Mode::Radians, &vars).unwrap();
        assert_eq!(result, Expression::Integer(6));
    }

    #[test]
    fn factorial_of_five() {
        let result = evaluate("5!", Mode::Radians, &VarEnv::new()).unwrap();
        assert_eq!(result, Expression::Integer(120));
    }

    #[test]
    fn sum_of_squares() {
        let result = evaluate("sum(x^2,x,1,3)", Mode::Radians, &VarEnv::new()).unwrap();
        match result {
            Expression::Float(v) => assert!((v - 14.0).abs() < 1e-9),
            other => panic!("expected Float(14), got {:?}", other),
        }
    }

    #[test]
    fn diff_of_cubic_plus_linear() {
        let result = evaluate("diff(x^3+2*x,x)", Mode::Radians, &VarEnv::new()).unwrap();
        assert_eq!(result.to_string(), "((3*(x^2))+2)");
    }

    #[test]
    fn unknown_character_is_a_lex_error() {
        let err = evaluate("3$4", Mode::Radians, &VarEnv::new()).unwrap_err();
        assert!(matches!(err, EngineError::Lex(_)));
    }

    #[test]
    fn unknown_function_is_a_parse_error() {
        let err = evaluate("bogus(1)", Mode::Radians, &VarEnv::new()).unwrap_err();
        assert!(matches!(err, EngineError::Parse(ParseError::UnknownFunction(_))));
    }
}

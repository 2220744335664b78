//! Error types for the expression engine.

use std::error::Error;
use std::fmt;

/// Error during lexing of raw input text into tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum LexError {
    /// A character did not fit any token in-progress state.
    UnexpectedCharacter { ch: char, position: usize },

    /// A number literal had more than one decimal point, more than one
    /// exponent marker, or an exponent sign in the wrong place.
    MalformedNumber { text: String, position: usize },

    /// An identifier was started but never terminated by a valid character
    /// (only reachable if the input ends mid-identifier in a way the
    /// end-of-input flush cannot repair; kept for completeness).
    UnterminatedIdentifier { position: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::UnexpectedCharacter { ch, position } => {
                write!(f, "Unexpected character '{}' at position {}", ch, position)
            }
            LexError::MalformedNumber { text, position } => {
                write!(f, "Malformed number '{}' at position {}", text, position)
            }
            LexError::UnterminatedIdentifier { position } => {
                write!(f, "Unterminated identifier at position {}", position)
            }
        }
    }
}

impl Error for LexError {}

/// Error during conversion of a token sequence into an expression tree
/// (shunting, RPN folding, and function-call validation).
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A `(` was never closed, or a `)` had no matching `(`/function marker.
    MismatchedParentheses,

    /// An operator symbol was encountered that the shunter does not know.
    UnknownOperator(char),

    /// The AST builder's value stack ran out of operands for an operator.
    StackUnderflow,

    /// The AST builder's value stack held more than one value at the end.
    UnbalancedStack,

    /// A function call referenced a name with no registered handler.
    UnknownFunction(String),

    /// A function call supplied an argument count outside the function's
    /// declared arity range.
    ArityMismatch { name: String, expected_min: usize, expected_max: usize, got: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MismatchedParentheses => write!(f, "Mismatched parentheses"),
            ParseError::UnknownOperator(op) => write!(f, "Unknown operator: {}", op),
            ParseError::StackUnderflow => write!(f, "Not enough operands for operator"),
            ParseError::UnbalancedStack => write!(f, "Expression did not reduce to a single value"),
            ParseError::UnknownFunction(name) => write!(f, "Unknown function: {}", name),
            ParseError::ArityMismatch { name, expected_min, expected_max, got } => {
                if expected_min == expected_max {
                    write!(f, "Function '{}' expects {} argument(s), got {}", name, expected_min, got)
                } else {
                    write!(
                        f,
                        "Function '{}' expects between {} and {} argument(s), got {}",
                        name, expected_min, expected_max, got
                    )
                }
            }
        }
    }
}

impl Error for ParseError {}

/// Error during evaluation of an expression tree.
///
/// Undefined variables are deliberately absent from this enum: per spec
/// they remain symbolic rather than raising an error.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// An exact rational division by zero was attempted.
    DivisionByZero,

    /// Factorial was applied to a negative or non-integer operand.
    FactorialDomain,

    /// `sum`'s start/end bounds did not evaluate to exact integers.
    SumBoundsNotInteger,

    /// An argument had the wrong shape for the function (e.g. `diff`/`sum`
    /// expected a bare variable name).
    ArgumentTypeError { function: String, expected: &'static str },

    /// `diff` was asked to differentiate a node it has no rule for.
    UnsupportedDifferentiation,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::DivisionByZero => write!(f, "Division by zero"),
            EvalError::FactorialDomain => write!(f, "Factorial is only defined on non-negative integers"),
            EvalError::SumBoundsNotInteger => write!(f, "sum() bounds must evaluate to exact integers"),
            EvalError::ArgumentTypeError { function, expected } => {
                write!(f, "{}() expected {}", function, expected)
            }
            EvalError::UnsupportedDifferentiation => write!(f, "Cannot symbolically differentiate this expression"),
        }
    }
}

impl Error for EvalError {}

/// Wrapper error type returned by the engine's public `parse`/`evaluate` entry points.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Lex(LexError),
    Parse(ParseError),
    Eval(EvalError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Lex(err) => write!(f, "Lex error: {}", err),
            EngineError::Parse(err) => write!(f, "Parse error: {}", err),
            EngineError::Eval(err) => write!(f, "Evaluation error: {}", err),
        }
    }
}

impl Error for EngineError {}

impl From<LexError> for EngineError {
    fn from(err: LexError) -> Self {
        EngineError::Lex(err)
    }
}

impl From<ParseError> for EngineError {
    fn from(err: ParseError) -> Self {
        EngineError::Parse(err)
    }
}

impl From<EvalError> for EngineError {
    fn from(err: EvalError) -> Self {
        EngineError::Eval(err)
    }
}

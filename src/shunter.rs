//! Shunter: infix token sequence -> RPN token sequence, handling operator
//! precedence/associativity, parenthesized sub-expressions, and function
//! calls with arbitrary arity including zero.

use crate::error::ParseError;
use crate::operators;
use crate::token::{Associativity, Token};

enum StackItem {
    Op { symbol: char, associativity: Associativity, precedence: u8 },
    LeftParen,
    FunctionMarker(String),
}

struct ArgFrame {
    count: usize,
    /// Set when the call's `(` was immediately followed by `)` in the
    /// source token stream — a no-argument call, whose final count is 0
    /// regardless of `count`.
    is_zero_arg_call: bool,
}

/// Converts an infix token sequence into reverse-Polish order.
pub fn shunt(tokens: &[Token]) -> Result<Vec<Token>, ParseError> {
    let mut output: Vec<Token> = Vec::new();
    let mut op_stack: Vec<StackItem> = Vec::new();
    let mut arg_frames: Vec<ArgFrame> = Vec::new();
    let mut prev_was_identifier = false;

    for (i, tok) in tokens.iter().enumerate() {
        match tok {
            Token::Integer { .. } | Token::Float { .. } => {
                output.push(tok.clone());
                prev_was_identifier = false;
            }

            Token::Identifier { .. } => {
                output.push(tok.clone());
                prev_was_identifier = true;
            }

            Token::Operator { symbol, position, .. } => {
                let info = operators::lookup(*symbol).ok_or(ParseError::UnknownOperator(*symbol))?;
                while let Some(StackItem::Op { precedence: top_prec, .. }) = op_stack.last() {
                    let should_pop = if info.associativity == Associativity::Left {
                        info.precedence <= *top_prec
                    } else {
                        info.precedence < *top_prec
                    };
                    if !should_pop {
                        break;
                    }
                    if let Some(StackItem::Op { symbol, associativity, precedence }) = op_stack.pop() {
                        output.push(Token::Operator { symbol, associativity, precedence, position: *position });
                    }
                }
                op_stack.push(StackItem::Op { symbol: *symbol, associativity: info.associativity, precedence: info.precedence });
                prev_was_identifier = false;
            }

            Token::Punctuation { symbol: '(', position: _ } => {
                if prev_was_identifier {
                    // The identifier was pushed straight to the output queue
                    // when we saw it; pull it back off and turn it into a
                    // function marker on the operator stack instead.
                    let name = match output.pop() {
                        Some(Token::Identifier { name, .. }) => name,
                        _ => unreachable!("prev_was_identifier implies the last output token is an Identifier"),
                    };
                    let is_zero_arg_call = matches!(tokens.get(i + 1), Some(Token::Punctuation { symbol: ')', .. }));
                    op_stack.push(StackItem::FunctionMarker(name));
                    arg_frames.push(ArgFrame { count: 0, is_zero_arg_call });
                } else {
                    op_stack.push(StackItem::LeftParen);
                }
                prev_was_identifier = false;
            }

            Token::Punctuation { symbol: ',', position } => {
                loop {
                    match op_stack.last() {
                        Some(StackItem::FunctionMarker(_)) => break,
                        Some(StackItem::Op { .. }) => {
                            if let Some(StackItem::Op { symbol, associativity, precedence }) = op_stack.pop() {
                                output.push(Token::Operator { symbol, associativity, precedence, position: *position });
                            }
                        }
                        Some(StackItem::LeftParen) | None => return Err(ParseError::MismatchedParentheses),
                    }
                }
                if let Some(frame) = arg_frames.last_mut() {
                    frame.count += 1;
                }
                prev_was_identifier = false;
            }

            Token::Punctuation { symbol: ')', position } => {
                loop {
                    match op_stack.pop() {
                        Some(StackItem::LeftParen) => break,
                        Some(StackItem::FunctionMarker(name)) => {
                            let frame = arg_frames.pop().expect("arg_frames stays in sync with function markers");
                            let arg_count = if frame.is_zero_arg_call { 0 } else { frame.count + 1 };
                            output.push(Token::FunctionCall { name, arg_count, position: *position });
                            break;
                        }
                        Some(StackItem::Op { symbol, associativity, precedence }) => {
                            output.push(Token::Operator { symbol, associativity, precedence, position: *position });
                        }
                        None => return Err(ParseError::MismatchedParentheses),
                    }
                }
                prev_was_identifier = false;
            }

            Token::Punctuation { symbol, .. } => {
                unreachable!("lexer never emits punctuation '{}' other than '(', ')', ','", symbol)
            }

            Token::FunctionCall { .. } => {
                unreachable!("FunctionCall tokens are only synthesized during shunting, never fed into it")
            }
        }
    }

    while let Some(item) = op_stack.pop() {
        match item {
            StackItem::Op { symbol, associativity, precedence } => {
                output.push(Token::Operator { symbol, associativity, precedence, position: 0 });
            }
            StackItem::LeftParen | StackItem::FunctionMarker(_) => return Err(ParseError::MismatchedParentheses),
        }
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn shunt_str(input: &str) -> Vec<Token> {
        shunt(&tokenize(input).unwrap()).unwrap()
    }

    fn kinds(tokens: &[Token]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| match t {
                Token::Integer { text, .. } => text.clone(),
                Token::Float { text, .. } => text.clone(),
                Token::Identifier { name, .. } => name.clone(),
                Token::Operator { symbol, .. } => symbol.to_string(),
                Token::FunctionCall { name, arg_count, .. } => format!("{}/{}", name, arg_count),
                Token::Punctuation { symbol, .. } => symbol.to_string(),
            })
            .collect()
    }

    #[test]
    fn simple_precedence() {
        assert_eq!(kinds(&shunt_str("3+4*5")), vec!["3", "4", "5", "*", "+"]);
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(kinds(&shunt_str("(3+4)*5")), vec!["3", "4", "+", "5", "*"]);
    }

    #[test]
    fn right_associative_power() {
        assert_eq!(kinds(&shunt_str("2^3^2")), vec!["2", "3", "2", "^", "^"]);
    }

    #[test]
    fn function_call_with_args() {
        assert_eq!(kinds(&shunt_str("min(3,5)")), vec!["3", "5", "min/2"]);
    }

    #[test]
    fn zero_arg_function_call() {
        assert_eq!(kinds(&shunt_str("pi()")), vec!["pi/0"]);
    }

    #[test]
    fn nested_function_calls() {
        assert_eq!(kinds(&shunt_str("max(1,min(2,3))")), vec!["1", "2", "3", "min/2", "max/2"]);
    }

    #[test]
    fn mismatched_parens_errors() {
        assert_eq!(shunt(&tokenize("(1+2").unwrap()), Err(ParseError::MismatchedParentheses));
    }

    #[test]
    fn unmatched_close_paren_errors() {
        assert_eq!(shunt(&tokenize("1+2)").unwrap()), Err(ParseError::MismatchedParentheses));
    }
}

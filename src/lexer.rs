//! Lexer: char stream -> token sequence, with unary-minus disambiguation.

use crate::error::LexError;
use crate::token::{Associativity, Token};

/// Converts `text` into an ordered token sequence (empty for empty input).
///
/// Fails with [`LexError`] on any character that does not fit any
/// in-progress scanning state.
pub fn tokenize(text: &str) -> Result<Vec<Token>, LexError> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let n = chars.len();
    let mut i = 0;
    let mut tokens = Vec::new();

    // Initially true: a leading '-' is unary negation, not binary subtraction.
    let mut minus_is_unary = true;

    while i < n {
        let (position, ch) = chars[i];

        if ch.is_whitespace() {
            i += 1;
            continue;
        }

        if ch.is_ascii_digit() || ch == '.' {
            let (token, next_i) = lex_number(&chars, i)?;
            tokens.push(token);
            i = next_i;
            minus_is_unary = false;
            continue;
        }

        if is_ident_start(ch) {
            let (token, next_i) = lex_identifier(&chars, i);
            tokens.push(token);
            i = next_i;
            minus_is_unary = false;
            continue;
        }

        match ch {
            '(' => {
                tokens.push(Token::Punctuation { symbol: '(', position });
                minus_is_unary = true;
            }
            ')' => {
                tokens.push(Token::Punctuation { symbol: ')', position });
                minus_is_unary = false;
            }
            ',' => {
                tokens.push(Token::Punctuation { symbol: ',', position });
                minus_is_unary = true;
            }
            '-' => {
                if minus_is_unary {
                    tokens.push(Token::Operator {
                        symbol: '~',
                        associativity: Associativity::Right,
                        precedence: 5,
                        position,
                    });
                } else {
                    tokens.push(Token::Operator {
                        symbol: '-',
                        associativity: Associativity::Left,
                        precedence: 0,
                        position,
                    });
                }
                minus_is_unary = true;
            }
            '+' | '*' | '/' | '^' => {
                let associativity = if ch == '^' { Associativity::Right } else { Associativity::Left };
                tokens.push(Token::Operator { symbol: ch, associativity, precedence: 0, position });
                minus_is_unary = true;
            }
            '!' => {
                // Postfix: behaves like an operand for the purpose of the
                // unary-minus flag (e.g. "5!-3" is subtraction, not "5! ~3").
                tokens.push(Token::Operator { symbol: '!', associativity: Associativity::Left, precedence: 0, position });
                minus_is_unary = false;
            }
            other => return Err(LexError::UnexpectedCharacter { ch: other, position }),
        }
        i += 1;
    }

    Ok(tokens)
}

fn is_ident_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_ident_continue(ch: char) -> bool {
    is_ident_start(ch) || ch.is_ascii_digit()
}

fn lex_identifier(chars: &[(usize, char)], start: usize) -> (Token, usize) {
    let position = chars[start].0;
    let mut i = start;
    let mut name = String::new();

    while i < chars.len() && is_ident_continue(chars[i].1) {
        name.push(chars[i].1);
        i += 1;
    }

    (Token::Identifier { name, position }, i)
}

fn lex_number(chars: &[(usize, char)], start: usize) -> Result<(Token, usize), LexError> {
    let position = chars[start].0;
    let mut i = start;
    let mut text = String::new();
    let mut seen_decimal = false;
    let mut seen_e = false;
    let mut seen_sign_after_e = false;
    let mut seen_exponent_digit = false;

    loop {
        if i >= chars.len() {
            break;
        }
        let ch = chars[i].1;

        if ch.is_ascii_digit() {
            text.push(ch);
            if seen_e {
                seen_exponent_digit = true;
            }
            i += 1;
            continue;
        }

        if ch == '.' {
            if seen_decimal || seen_e {
                return Err(LexError::MalformedNumber { text: format!("{}{}", text, ch), position });
            }
            seen_decimal = true;
            text.push(ch);
            i += 1;
            continue;
        }

        if ch == 'e' || ch == 'E' {
            if seen_e {
                return Err(LexError::MalformedNumber { text: format!("{}{}", text, ch), position });
            }
            seen_e = true;
            text.push(ch);
            i += 1;
            continue;
        }

        if ch == '+' || ch == '-' {
            if seen_e && !seen_exponent_digit {
                if seen_sign_after_e {
                    return Err(LexError::MalformedNumber { text: format!("{}{}", text, ch), position });
                }
                seen_sign_after_e = true;
                text.push(ch);
                i += 1;
                continue;
            }
            // A sign that is not immediately after 'e'/'E' belongs to the
            // next token (binary +/- or unary ~), not to this number.
            break;
        }

        // Any other character (whitespace, punctuation, identifier start,
        // an unrelated operator) ends the number scan.
        break;
    }

    let is_integer_form = !seen_decimal && !seen_e;
    let token = if is_integer_form {
        let value: i64 = text
            .parse()
            .map_err(|_| LexError::MalformedNumber { text: text.clone(), position })?;
        Token::Integer { text, value, position }
    } else {
        let value: f64 = text
            .parse()
            .map_err(|_| LexError::MalformedNumber { text: text.clone(), position })?;
        Token::Float { text, value, position }
    };

    Ok((token, i))
}

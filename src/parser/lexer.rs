use log::trace;
use std::fmt;

use crate::parser::constants::MAX_TOKENS;
use crate::parser::errors::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Number(i64),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    Bang,
    LParen,
    RParen,
    Sqrt,
    Cbrt,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{}", n),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::Bang => write!(f, "!"),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Sqrt => write!(f, "sqrt"),
            TokenKind::Cbrt => write!(f, "cbrt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Character offset in the source text
    pub position: usize,
}

/// Split expression text into tokens.
///
/// Only integer literals, the arithmetic symbols, parentheses and the
/// `sqrt`/`cbrt` function names are recognised. `×`, `÷` and `−` are read as
/// `*`, `/` and `-`.
///
/// # Errors
///
/// Returns an error on any other character, on unknown identifiers, on
/// integer literals that do not fit in an `i64`, and on input longer than
/// [`MAX_TOKENS`] tokens.
pub fn tokenize(text: &str) -> Result<Vec<Token>, ParseError> {
    let chars: Vec<char> = text.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while let Some(&ch) = chars.get(i) {
        let position = i;
        let kind = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            c if c.is_ascii_digit() => {
                let start = i;
                while chars.get(i).is_some_and(char::is_ascii_digit) {
                    i += 1;
                }
                let literal: String = chars[start..i].iter().collect();
                let value = literal
                    .parse::<i64>()
                    .map_err(|_| ParseError::LiteralOverflow(literal.clone()))?;
                tokens.push(Token {
                    kind: TokenKind::Number(value),
                    position,
                });
                continue;
            }
            c if c.is_ascii_alphabetic() => {
                let start = i;
                while chars.get(i).is_some_and(char::is_ascii_alphabetic) {
                    i += 1;
                }
                let name: String = chars[start..i].iter().collect();
                let kind = match name.to_ascii_lowercase().as_str() {
                    "sqrt" => TokenKind::Sqrt,
                    "cbrt" => TokenKind::Cbrt,
                    _ => return Err(ParseError::UnknownFunction { name, position }),
                };
                tokens.push(Token { kind, position });
                continue;
            }
            '+' => TokenKind::Plus,
            '-' | '−' => TokenKind::Minus,
            '*' | '×' => TokenKind::Star,
            '/' | '÷' => TokenKind::Slash,
            '^' => TokenKind::Caret,
            '!' => TokenKind::Bang,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            other => {
                return Err(ParseError::UnexpectedCharacter {
                    ch: other,
                    position,
                });
            }
        };
        tokens.push(Token { kind, position });
        i += 1;
    }

    if tokens.len() > MAX_TOKENS {
        return Err(ParseError::TooLong { limit: MAX_TOKENS });
    }
    trace!("Tokenized '{}' into {} tokens", text, tokens.len());
    Ok(tokens)
}

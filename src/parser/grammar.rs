use log::debug;

use crate::expression::{Expression, Operator, OperatorSet};
use crate::parser::constants::MAX_NESTING_DEPTH;
use crate::parser::errors::ParseError;
use crate::parser::lexer::{Token, TokenKind, tokenize};

/// Recursive descent parser over a fixed arithmetic grammar:
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := unary (('*' | '/') unary)*
/// unary   := '-' unary | power
/// power   := postfix ('^' unary)?
/// postfix := primary '!'*
/// primary := INTEGER | '(' expr ')' | ('sqrt' | 'cbrt') '(' expr ')'
/// ```
///
/// Operators outside the configured set are rejected while parsing, so an
/// accepted tree only ever contains whitelisted operators. A `-` written
/// directly before an integer is a negative literal when subtraction is off.
pub struct ExpressionParser {
    tokens: Vec<Token>,
    position: usize,
    operators: OperatorSet,
    depth: usize,
}

impl ExpressionParser {
    /// # Errors
    ///
    /// Returns an error if the text contains characters outside the grammar.
    pub fn new(text: &str, operators: OperatorSet) -> Result<Self, ParseError> {
        Ok(Self {
            tokens: tokenize(text)?,
            position: 0,
            operators,
            depth: 0,
        })
    }

    /// Parse the whole token stream into an expression tree
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for empty input, malformed syntax, unbalanced
    /// parentheses, trailing tokens, operators that are not enabled, or
    /// nesting deeper than [`MAX_NESTING_DEPTH`].
    pub fn parse(mut self) -> Result<Expression, ParseError> {
        if self.tokens.is_empty() {
            return Err(ParseError::Empty);
        }

        let expr = self.expr()?;

        if let Some(token) = self.peek() {
            debug!("Trailing input at position {}", token.position);
            return Err(match token.kind {
                TokenKind::RParen => ParseError::UnmatchedParenthesis {
                    position: token.position,
                },
                _ => ParseError::UnexpectedToken {
                    found: token.kind.to_string(),
                    position: token.position,
                },
            });
        }

        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    fn peek_kind(&self) -> Option<&TokenKind> {
        self.peek().map(|token| &token.kind)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.position).cloned();
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    fn require(&self, op: Operator) -> Result<(), ParseError> {
        if self.operators.contains(op) {
            Ok(())
        } else {
            Err(ParseError::UnsupportedOperator(op))
        }
    }

    fn expr(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.term()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Plus) => Operator::Add,
                Some(TokenKind::Minus) => Operator::Sub,
                _ => return Ok(left),
            };
            self.require(op)?;
            self.position += 1;
            let right = self.term()?;
            left = Expression::binary(op, left, right)
                .ok_or(ParseError::UnsupportedOperator(op))?;
        }
    }

    fn term(&mut self) -> Result<Expression, ParseError> {
        let mut left = self.unary()?;
        loop {
            let op = match self.peek_kind() {
                Some(TokenKind::Star) => Operator::Mul,
                Some(TokenKind::Slash) => Operator::Div,
                _ => return Ok(left),
            };
            self.require(op)?;
            self.position += 1;
            let right = self.unary()?;
            left = Expression::binary(op, left, right)
                .ok_or(ParseError::UnsupportedOperator(op))?;
        }
    }

    // every recursive cycle of the grammar passes through here
    fn unary(&mut self) -> Result<Expression, ParseError> {
        self.depth += 1;
        if self.depth > MAX_NESTING_DEPTH {
            return Err(ParseError::TooDeep {
                limit: MAX_NESTING_DEPTH,
                position: self.peek().map_or(0, |token| token.position),
            });
        }
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> Result<Expression, ParseError> {
        if !matches!(self.peek_kind(), Some(TokenKind::Minus)) {
            return self.power();
        }
        let literal_follows = matches!(
            self.tokens.get(self.position + 1).map(|token| &token.kind),
            Some(TokenKind::Number(_))
        );
        if literal_follows && !self.operators.contains(Operator::Sub) {
            self.position += 1;
            return match self.power()? {
                Expression::Number(leaf) => Ok(Expression::number(-leaf.value)),
                _ => Err(ParseError::UnsupportedOperator(Operator::Sub)),
            };
        }

        self.require(Operator::Sub)?;
        self.position += 1;
        let operand = self.unary()?;
        Ok(Expression::Neg(Box::new(operand)))
    }

    fn power(&mut self) -> Result<Expression, ParseError> {
        let base = self.postfix()?;
        if matches!(self.peek_kind(), Some(TokenKind::Caret)) {
            self.require(Operator::Pow)?;
            self.position += 1;
            let exponent = self.unary()?;
            return Ok(Expression::Pow(Box::new(base), Box::new(exponent)));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Expression, ParseError> {
        let mut expr = self.primary()?;
        while matches!(self.peek_kind(), Some(TokenKind::Bang)) {
            self.require(Operator::Factorial)?;
            self.position += 1;
            expr = Expression::Factorial(Box::new(expr));
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expression, ParseError> {
        let token = self.next().ok_or(ParseError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(value) => Ok(Expression::number(value)),
            TokenKind::LParen => {
                let inner = self.expr()?;
                self.close_paren(token.position)?;
                Ok(inner)
            }
            TokenKind::Sqrt => self.function(Operator::Sqrt),
            TokenKind::Cbrt => self.function(Operator::Cbrt),
            TokenKind::RParen => Err(ParseError::UnmatchedParenthesis {
                position: token.position,
            }),
            other => Err(ParseError::UnexpectedToken {
                found: other.to_string(),
                position: token.position,
            }),
        }
    }

    /// `sqrt(expr)` or `cbrt(expr)`, called after the function name
    fn function(&mut self, op: Operator) -> Result<Expression, ParseError> {
        self.require(op)?;
        let open = self.next().ok_or(ParseError::UnexpectedEnd)?;
        if open.kind != TokenKind::LParen {
            return Err(ParseError::UnexpectedToken {
                found: open.kind.to_string(),
                position: open.position,
            });
        }
        let inner = self.expr()?;
        self.close_paren(open.position)?;
        Expression::unary(op, inner).ok_or(ParseError::UnsupportedOperator(op))
    }

    fn close_paren(&mut self, opened_at: usize) -> Result<(), ParseError> {
        match self.next() {
            Some(Token {
                kind: TokenKind::RParen,
                ..
            }) => Ok(()),
            Some(token) => Err(ParseError::UnexpectedToken {
                found: token.kind.to_string(),
                position: token.position,
            }),
            None => Err(ParseError::UnclosedParenthesis {
                position: opened_at,
            }),
        }
    }
}

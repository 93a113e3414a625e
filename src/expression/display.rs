use std::fmt;

use crate::expression::ast::Expression;

/// Binding strength used to decide where parentheses are required.
///
/// Parsing the rendered text must give back the same value, so a child is
/// wrapped whenever it binds more loosely than its position allows.
fn precedence(expr: &Expression) -> u8 {
    match expr {
        Expression::Add(_, _) | Expression::Sub(_, _) => 1,
        Expression::Mul(_, _) | Expression::Div(_, _) => 2,
        Expression::Neg(_) => 3,
        Expression::Number(leaf) if leaf.value < 0 => 3,
        Expression::Pow(_, _) => 4,
        Expression::Factorial(_) => 5,
        Expression::Number(_) | Expression::Sqrt(_) | Expression::Cbrt(_) => 6,
    }
}

fn write_with_parens(f: &mut fmt::Formatter, expr: &Expression, need_parens: bool) -> fmt::Result {
    if need_parens {
        write!(f, "(")?;
        fmt_expression(f, expr)?;
        write!(f, ")")
    } else {
        fmt_expression(f, expr)
    }
}

fn write_infix(
    f: &mut fmt::Formatter,
    left: &Expression,
    symbol: &str,
    right: &Expression,
    need_left: bool,
    need_right: bool,
) -> fmt::Result {
    write_with_parens(f, left, need_left)?;
    write!(f, " {} ", symbol)?;
    write_with_parens(f, right, need_right)
}

fn fmt_expression(f: &mut fmt::Formatter, expr: &Expression) -> fmt::Result {
    match expr {
        Expression::Number(leaf) => write!(f, "{}", leaf.value),
        Expression::Add(l, r) => write_infix(f, l, "+", r, false, false),
        Expression::Sub(l, r) => write_infix(f, l, "-", r, false, precedence(r) <= 1),
        Expression::Mul(l, r) => write_infix(f, l, "*", r, precedence(l) < 2, precedence(r) < 2),
        Expression::Div(l, r) => write_infix(f, l, "/", r, precedence(l) < 2, precedence(r) <= 2),
        // right associative: a ^ b ^ c is a ^ (b ^ c)
        Expression::Pow(l, r) => write_infix(f, l, "^", r, precedence(l) <= 4, precedence(r) < 4),
        Expression::Neg(e) => {
            write!(f, "-")?;
            write_with_parens(f, e, precedence(e) < 3)
        }
        Expression::Sqrt(e) => {
            write!(f, "sqrt(")?;
            fmt_expression(f, e)?;
            write!(f, ")")
        }
        Expression::Cbrt(e) => {
            write!(f, "cbrt(")?;
            fmt_expression(f, e)?;
            write!(f, ")")
        }
        Expression::Factorial(e) => {
            write_with_parens(f, e, precedence(e) < 5)?;
            write!(f, "!")
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt_expression(f, self)
    }
}

//! Expression trees, operators, evaluation and display

mod ast;
mod display;
mod errors;
mod eval;
mod operator;

pub use ast::{Expression, Leaf};
pub use errors::ExpressionError;
pub use eval::{MAX_FACTORIAL, apply_binary, apply_unary, within_tolerance};
pub use operator::{Operator, OperatorSet};

pub(crate) use eval::is_integer;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::expression::errors::ExpressionError;

/// Operators a puzzle may enable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "^")]
    Pow,
    #[serde(rename = "sqrt")]
    Sqrt,
    #[serde(rename = "cbrt")]
    Cbrt,
    #[serde(rename = "!")]
    Factorial,
    /// Decimal concatenation of adjacent operands (`1`, `2` -> `12`)
    #[serde(rename = "concat")]
    Concat,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Pow,
        Operator::Sqrt,
        Operator::Cbrt,
        Operator::Factorial,
        Operator::Concat,
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Pow => "^",
            Operator::Sqrt => "sqrt",
            Operator::Cbrt => "cbrt",
            Operator::Factorial => "!",
            Operator::Concat => "concat",
        }
    }

    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Pow
        )
    }

    pub fn is_unary(self) -> bool {
        matches!(self, Operator::Sqrt | Operator::Cbrt | Operator::Factorial)
    }

    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ExpressionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "+" | "add" => Ok(Operator::Add),
            "-" | "sub" => Ok(Operator::Sub),
            "*" | "×" | "mul" => Ok(Operator::Mul),
            "/" | "÷" | "div" => Ok(Operator::Div),
            "^" | "pow" => Ok(Operator::Pow),
            "sqrt" | "sqrt(" => Ok(Operator::Sqrt),
            "cbrt" | "cbrt(" => Ok(Operator::Cbrt),
            "!" | "factorial" => Ok(Operator::Factorial),
            "concat" | "||" => Ok(Operator::Concat),
            other => Err(ExpressionError::UnknownOperator(other.to_string())),
        }
    }
}

/// The subset of operators enabled for a puzzle or a search
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Operator>", into = "Vec<Operator>")]
pub struct OperatorSet {
    bits: u16,
}

impl OperatorSet {
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// `+ - * /`
    pub fn basic() -> Self {
        [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div]
            .into_iter()
            .collect()
    }

    pub fn all() -> Self {
        Operator::ALL.into_iter().collect()
    }

    /// Every operator except concatenation
    pub fn scientific() -> Self {
        Self::all().without(Operator::Concat)
    }

    #[must_use]
    pub fn with(self, op: Operator) -> Self {
        Self {
            bits: self.bits | op.bit(),
        }
    }

    #[must_use]
    pub fn without(self, op: Operator) -> Self {
        Self {
            bits: self.bits & !op.bit(),
        }
    }

    pub fn contains(self, op: Operator) -> bool {
        self.bits & op.bit() != 0
    }

    pub fn is_empty(self) -> bool {
        self.bits == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Operator> {
        Operator::ALL.into_iter().filter(move |op| self.contains(*op))
    }

    pub fn binary(self) -> impl Iterator<Item = Operator> {
        self.iter().filter(|op| op.is_binary())
    }

    pub fn unary(self) -> impl Iterator<Item = Operator> {
        self.iter().filter(|op| op.is_unary())
    }

    pub fn has_binary(self) -> bool {
        self.binary().next().is_some()
    }

    pub fn allows_concatenation(self) -> bool {
        self.contains(Operator::Concat)
    }

    /// True when only `+ - * /` and concatenation are enabled, the operators
    /// for which the feasibility bound holds.
    pub fn is_elementary(self) -> bool {
        self.iter().all(|op| {
            matches!(
                op,
                Operator::Add | Operator::Sub | Operator::Mul | Operator::Div | Operator::Concat
            )
        })
    }

    /// Returns true if every operator in `self` is also in `other`
    pub fn is_subset(self, other: OperatorSet) -> bool {
        self.bits & !other.bits == 0
    }
}

impl fmt::Debug for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for OperatorSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let symbols: Vec<&str> = self.iter().map(Operator::symbol).collect();
        write!(f, "{}", symbols.join(" "))
    }
}

impl FromIterator<Operator> for OperatorSet {
    fn from_iter<I: IntoIterator<Item = Operator>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), OperatorSet::with)
    }
}

impl From<Vec<Operator>> for OperatorSet {
    fn from(ops: Vec<Operator>) -> Self {
        ops.into_iter().collect()
    }
}

impl From<OperatorSet> for Vec<Operator> {
    fn from(set: OperatorSet) -> Self {
        set.iter().collect()
    }
}

impl FromStr for OperatorSet {
    type Err = ExpressionError;

    /// Accepts `basic`, `all`, `scientific`, or a comma separated list of
    /// operator names and symbols.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::basic()),
            "all" => Ok(Self::all()),
            "scientific" => Ok(Self::scientific()),
            list => list
                .split(',')
                .filter(|part| !part.trim().is_empty())
                .map(str::parse::<Operator>)
                .collect(),
        }
    }
}

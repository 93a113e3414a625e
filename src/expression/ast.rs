use crate::expression::operator::Operator;

/// A literal operand value and the operand instances it consumes.
///
/// Leaves built by the solver and generator carry the indices of the puzzle
/// operands they were made from (two or more for a concatenation such as `12`).
/// Leaves produced by the text parser have no sources until submission
/// validation resolves them against a puzzle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Leaf {
    pub value: i64,
    pub sources: Vec<usize>,
}

impl Leaf {
    pub fn new(value: i64, source: usize) -> Self {
        Self {
            value,
            sources: vec![source],
        }
    }

    /// A literal with no operand instance attached
    pub fn literal(value: i64) -> Self {
        Self {
            value,
            sources: Vec::new(),
        }
    }

    pub fn is_concatenation(&self) -> bool {
        self.sources.len() > 1
    }
}

/// Arithmetic expressions over puzzle operands
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Number(Leaf),
    Add(Box<Expression>, Box<Expression>),
    Sub(Box<Expression>, Box<Expression>),
    Mul(Box<Expression>, Box<Expression>),
    Div(Box<Expression>, Box<Expression>),
    Pow(Box<Expression>, Box<Expression>),
    Neg(Box<Expression>),
    Sqrt(Box<Expression>),
    Cbrt(Box<Expression>),
    Factorial(Box<Expression>),
}

impl Expression {
    pub fn number(value: i64) -> Self {
        Expression::Number(Leaf::literal(value))
    }

    /// Build a binary node for `op`, or `None` if `op` is not binary
    pub fn binary(op: Operator, left: Expression, right: Expression) -> Option<Self> {
        let (l, r) = (Box::new(left), Box::new(right));
        match op {
            Operator::Add => Some(Expression::Add(l, r)),
            Operator::Sub => Some(Expression::Sub(l, r)),
            Operator::Mul => Some(Expression::Mul(l, r)),
            Operator::Div => Some(Expression::Div(l, r)),
            Operator::Pow => Some(Expression::Pow(l, r)),
            _ => None,
        }
    }

    /// Build a unary node for `op`, or `None` if `op` is not a unary function
    pub fn unary(op: Operator, operand: Expression) -> Option<Self> {
        let inner = Box::new(operand);
        match op {
            Operator::Sqrt => Some(Expression::Sqrt(inner)),
            Operator::Cbrt => Some(Expression::Cbrt(inner)),
            Operator::Factorial => Some(Expression::Factorial(inner)),
            _ => None,
        }
    }

    /// The operator at the root of this node; `None` for leaves.
    ///
    /// Unary minus reports [`Operator::Sub`].
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Expression::Number(_) => None,
            Expression::Add(_, _) => Some(Operator::Add),
            Expression::Sub(_, _) | Expression::Neg(_) => Some(Operator::Sub),
            Expression::Mul(_, _) => Some(Operator::Mul),
            Expression::Div(_, _) => Some(Operator::Div),
            Expression::Pow(_, _) => Some(Operator::Pow),
            Expression::Sqrt(_) => Some(Operator::Sqrt),
            Expression::Cbrt(_) => Some(Operator::Cbrt),
            Expression::Factorial(_) => Some(Operator::Factorial),
        }
    }

    pub fn is_unary_function(&self) -> bool {
        matches!(
            self,
            Expression::Sqrt(_) | Expression::Cbrt(_) | Expression::Factorial(_)
        )
    }

    /// Leaves in left-to-right order
    pub fn leaves(&self) -> Vec<&Leaf> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a Leaf>) {
        match self {
            Expression::Number(leaf) => out.push(leaf),
            Expression::Add(l, r)
            | Expression::Sub(l, r)
            | Expression::Mul(l, r)
            | Expression::Div(l, r)
            | Expression::Pow(l, r) => {
                l.collect_leaves(out);
                r.collect_leaves(out);
            }
            Expression::Neg(e)
            | Expression::Sqrt(e)
            | Expression::Cbrt(e)
            | Expression::Factorial(e) => e.collect_leaves(out),
        }
    }

    /// Every operator used anywhere in the tree, including concatenation
    /// for leaves that merge several operands.
    pub fn operators(&self) -> Vec<Operator> {
        let mut out = Vec::new();
        self.collect_operators(&mut out);
        out
    }

    fn collect_operators(&self, out: &mut Vec<Operator>) {
        if let Some(op) = self.operator() {
            out.push(op);
        }
        match self {
            Expression::Number(leaf) => {
                if leaf.is_concatenation() {
                    out.push(Operator::Concat);
                }
            }
            Expression::Add(l, r)
            | Expression::Sub(l, r)
            | Expression::Mul(l, r)
            | Expression::Div(l, r)
            | Expression::Pow(l, r) => {
                l.collect_operators(out);
                r.collect_operators(out);
            }
            Expression::Neg(e)
            | Expression::Sqrt(e)
            | Expression::Cbrt(e)
            | Expression::Factorial(e) => e.collect_operators(out),
        }
    }

    /// Operand instance indices consumed by the expression
    pub fn consumed_sources(&self) -> Vec<usize> {
        self.leaves()
            .into_iter()
            .flat_map(|leaf| leaf.sources.iter().copied())
            .collect()
    }
}

use std::fmt;

use rand::Rng;

use crate::pool::errors::PoolError;

/// Binary operators available to the search and to the postfix engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Add,
        Operator::Sub,
        Operator::Mul,
        Operator::Div,
        Operator::Pow,
    ];

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Sub => '-',
            Operator::Mul => '*',
            Operator::Div => '/',
            Operator::Pow => '^',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Sub),
            '*' => Some(Operator::Mul),
            '/' => Some(Operator::Div),
            '^' => Some(Operator::Pow),
            _ => None,
        }
    }

    /// Grouping never changes the value of a chain of this operator
    pub fn is_associative(self) -> bool {
        matches!(self, Operator::Add | Operator::Mul)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Ordered operator pool; the order decides which operator an index draws
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorPool {
    operators: Vec<Operator>,
}

impl OperatorPool {
    pub fn new(operators: Vec<Operator>) -> Self {
        Self { operators }
    }

    /// Parse a pool such as `"+-*"`. Whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::UnknownOperator`] for any other character.
    pub fn parse(symbols: &str) -> Result<Self, PoolError> {
        symbols
            .chars()
            .filter(|c| !c.is_whitespace())
            .map(|c| Operator::from_symbol(c).ok_or(PoolError::UnknownOperator(c)))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Operator {
        self.operators[rng.gen_range(0..self.operators.len())]
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    pub fn contains(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    pub fn operators(&self) -> &[Operator] {
        &self.operators
    }

    /// The single operator this pool is made of, if every entry is the same
    pub fn sole_operator(&self) -> Option<Operator> {
        let first = *self.operators.first()?;
        self.operators
            .iter()
            .all(|op| *op == first)
            .then_some(first)
    }
}

impl fmt::Display for OperatorPool {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for op in &self.operators {
            write!(f, "{}", op)?;
        }
        Ok(())
    }
}

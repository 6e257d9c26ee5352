use crate::pool::Operator;

/// Random expression tree: integer leaves joined by binary operators
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Constant(i64),
    Binary(Operator, Box<Expression>, Box<Expression>),
}

impl Expression {
    pub fn binary(operator: Operator, left: Expression, right: Expression) -> Self {
        Expression::Binary(operator, Box::new(left), Box::new(right))
    }

    /// Number of internal (operator) nodes
    pub fn operation_count(&self) -> usize {
        match self {
            Expression::Constant(_) => 0,
            Expression::Binary(_, l, r) => 1 + l.operation_count() + r.operation_count(),
        }
    }

    pub fn leaf_count(&self) -> usize {
        match self {
            Expression::Constant(_) => 1,
            Expression::Binary(_, l, r) => l.leaf_count() + r.leaf_count(),
        }
    }

    /// Visit every operator node, parents before children
    pub fn for_each_operation<F>(&self, visit: &mut F)
    where
        F: FnMut(Operator, &Expression, &Expression),
    {
        if let Expression::Binary(op, l, r) = self {
            visit(*op, l, r);
            l.for_each_operation(visit);
            r.for_each_operation(visit);
        }
    }
}

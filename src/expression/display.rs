use std::fmt;

use crate::expression::ast::Expression;
use crate::pool::OperatorPool;

/// Fully parenthesized infix form, one pair per operation
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write_node(f, self, true)
    }
}

fn write_node(f: &mut fmt::Formatter, expr: &Expression, parens: bool) -> fmt::Result {
    match expr {
        Expression::Constant(n) => write!(f, "{}", n),
        Expression::Binary(op, l, r) => {
            if parens {
                write!(f, "(")?;
            }
            write_node(f, l, parens)?;
            write!(f, " {} ", op)?;
            write_node(f, r, parens)?;
            if parens {
                write!(f, ")")?;
            }
            Ok(())
        }
    }
}

/// Infix rendering adjusted for the operator pool of the round
pub struct Rendered<'a> {
    expression: &'a Expression,
    operators: &'a OperatorPool,
}

impl fmt::Display for Rendered<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let grouping_irrelevant = self
            .operators
            .sole_operator()
            .is_some_and(|op| op.is_associative());

        match self.expression {
            _ if grouping_irrelevant => write_node(f, self.expression, false),
            // The outermost pair is always redundant.
            Expression::Binary(op, l, r) => {
                write_node(f, l, true)?;
                write!(f, " {} ", op)?;
                write_node(f, r, true)
            }
            Expression::Constant(n) => write!(f, "{}", n),
        }
    }
}

impl Expression {
    /// Render for display: without any parentheses when the round only uses a
    /// single `+` or `*`, otherwise without the outermost pair.
    pub fn render<'a>(&'a self, operators: &'a OperatorPool) -> Rendered<'a> {
        Rendered {
            expression: self,
            operators,
        }
    }
}

/// Postfix (reverse Polish) form of a tree, e.g. `9 9 + 9 *`.
///
/// Negative terms are written as `0 n -` because the postfix engine only reads
/// non-negative literals. That engine works over integers, so replaying this
/// text reproduces the tree's value only when the tree contains no `/` and no
/// power with a negative exponent.
pub struct Postfix<'a>(&'a Expression);

impl fmt::Display for Postfix<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn write_postfix(f: &mut fmt::Formatter, expr: &Expression) -> fmt::Result {
            match expr {
                Expression::Constant(n) if *n < 0 => write!(f, "0 {} -", n.unsigned_abs()),
                Expression::Constant(n) => write!(f, "{}", n),
                Expression::Binary(op, l, r) => {
                    write_postfix(f, l)?;
                    write!(f, " ")?;
                    write_postfix(f, r)?;
                    write!(f, " {}", op)
                }
            }
        }

        write_postfix(f, self.0)
    }
}

impl Expression {
    pub fn postfix(&self) -> Postfix<'_> {
        Postfix(self)
    }
}

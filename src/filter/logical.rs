//! Logical combinators. Operands are kept as given; nothing is flattened.

use super::types::{Expression, LogicalOp};

/// All operands must match.
pub fn and<I>(operands: I) -> Expression
where
    I: IntoIterator<Item = Expression>,
{
    logical(LogicalOp::And, operands)
}

/// At least one operand must match.
pub fn or<I>(operands: I) -> Expression
where
    I: IntoIterator<Item = Expression>,
{
    logical(LogicalOp::Or, operands)
}

/// No operand may match.
pub fn nor<I>(operands: I) -> Expression
where
    I: IntoIterator<Item = Expression>,
{
    logical(LogicalOp::Nor, operands)
}

/// Negates one expression.
#[must_use]
pub fn not(operand: Expression) -> Expression {
    Expression::Not(Box::new(operand))
}

fn logical<I>(op: LogicalOp, operands: I) -> Expression
where
    I: IntoIterator<Item = Expression>,
{
    Expression::Logical { op, operands: operands.into_iter().collect() }
}

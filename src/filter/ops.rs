//! Comparison operators and the field combinator.

use bson::Bson;

use super::encode::{Encode, IntoPattern, Orderable};
use super::types::{Condition, EncodedValue, Expression, FieldExpression, Operator};

/// `{ "$eq": <value> }`
pub fn eq<T: Encode>(value: T) -> Condition {
    Condition::new(Operator::Eq, value.encode())
}

/// `{ "$ne": <value> }`
pub fn ne<T: Encode>(value: T) -> Condition {
    Condition::new(Operator::Ne, value.encode())
}

/// `{ "$gt": <value> }`
pub fn gt<T: Orderable>(value: T) -> Condition {
    Condition::new(Operator::Gt, value.encode())
}

/// `{ "$gte": <value> }`
pub fn gte<T: Orderable>(value: T) -> Condition {
    Condition::new(Operator::Gte, value.encode())
}

/// `{ "$lt": <value> }`
pub fn lt<T: Orderable>(value: T) -> Condition {
    Condition::new(Operator::Lt, value.encode())
}

/// `{ "$lte": <value> }`
pub fn lte<T: Orderable>(value: T) -> Condition {
    Condition::new(Operator::Lte, value.encode())
}

/// `{ "$in": [<v1>, <v2>, ...] }`, each element encoded on its own.
pub fn is_in<I, T>(values: I) -> Condition
where
    I: IntoIterator<Item = T>,
    T: Encode,
{
    Condition::new(Operator::In, encode_all(values))
}

/// `{ "$nin": [<v1>, <v2>, ...] }`
pub fn nin<I, T>(values: I) -> Condition
where
    I: IntoIterator<Item = T>,
    T: Encode,
{
    Condition::new(Operator::Nin, encode_all(values))
}

fn encode_all<I, T>(values: I) -> EncodedValue
where
    I: IntoIterator<Item = T>,
    T: Encode,
{
    EncodedValue::Array(values.into_iter().map(Encode::encode).collect())
}

/// `{ "$regex": "<pattern>" }`
///
/// Compiled patterns contribute their source text only. Flags set on a
/// `RegexBuilder` are not carried over; write them inline (`(?i)`) or add a
/// `$options` condition on the caller side.
pub fn regex<P: IntoPattern>(pattern: P) -> Condition {
    Condition::new(Operator::Regex, EncodedValue::Pattern(pattern.into_pattern()))
}

/// `{ "$type": <value> }`. The value is used as given, e.g. `"string"` or `2`.
pub fn is_type(value: impl Into<Bson>) -> Condition {
    Condition::new(Operator::Type, EncodedValue::Raw(value.into()))
}

/// Groups conditions under `field`, keeping their order and any repeats.
pub fn f<I>(field: impl Into<String>, conditions: I) -> Expression
where
    I: IntoIterator<Item = Condition>,
{
    Expression::Field(FieldExpression {
        field: field.into(),
        conditions: conditions.into_iter().collect(),
    })
}

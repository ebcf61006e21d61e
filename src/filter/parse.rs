use bson::spec::BinarySubtype;
use bson::{Bson, Document};
use serde::{Deserialize, Serialize};

use super::encode::{Encode, OBJECT_ID_HEX_LEN, OBJECT_ID_LEN, ObjectIdPolicy, RawId};
use super::types::{
    Condition, EncodedValue, Expression, FieldExpression, LogicalOp, NOT_KEY, Operator,
};
use crate::errors::DbError;

/// Options for the dynamically typed entry point.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ParseOptions {
    /// Applied to generic binary values of identifier length.
    #[serde(default)]
    pub object_id_policy: ObjectIdPolicy,
}

/// # Errors
/// Returns an error if the JSON is malformed or is not a valid filter document.
pub fn parse_filter_json(json: &str) -> Result<Expression, DbError> {
    parse_filter_json_with(json, ParseOptions::default())
}

/// # Errors
/// Returns an error if the JSON is malformed or is not a valid filter document.
pub fn parse_filter_json_with(json: &str, opts: ParseOptions) -> Result<Expression, DbError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    match Bson::try_from(value)? {
        Bson::Document(doc) => parse_filter_document(&doc, opts),
        other => Err(DbError::Parse(format!("filter must be an object, got {other}"))),
    }
}

/// Converts a filter document back into an [`Expression`].
///
/// # Errors
/// Returns an error for unknown operators, malformed operands, or range
/// operators given values that cannot be ordered.
pub fn parse_filter_document(doc: &Document, opts: ParseOptions) -> Result<Expression, DbError> {
    let mut it = doc.iter();
    let (key, value) = match (it.next(), it.next()) {
        (Some(entry), None) => entry,
        (None, _) => return Err(DbError::Parse("empty filter document".into())),
        (Some(_), Some(_)) => {
            return Err(DbError::Parse(format!(
                "expected exactly one key, got {}; combine them with $and",
                doc.len()
            )));
        }
    };

    if let Some(op) = LogicalOp::from_key(key) {
        let Bson::Array(items) = value else {
            return Err(DbError::Parse(format!("{key} requires an array of documents")));
        };
        let operands = items
            .iter()
            .map(|item| match item {
                Bson::Document(d) => parse_filter_document(d, opts),
                other => Err(DbError::Parse(format!("{key} operand must be a document, got {other}"))),
            })
            .collect::<Result<_, _>>()?;
        return Ok(Expression::Logical { op, operands });
    }
    if key == NOT_KEY {
        let Bson::Document(inner) = value else {
            return Err(DbError::Parse("$not requires a document".into()));
        };
        return Ok(Expression::Not(Box::new(parse_filter_document(inner, opts)?)));
    }
    if key.starts_with('$') {
        return Err(DbError::UnknownOperator(key.to_owned()));
    }

    let conditions = match value {
        Bson::Document(ops) if ops.keys().next().is_some_and(|k| k.starts_with('$')) => ops
            .iter()
            .map(|(k, v)| parse_condition(k, v, opts))
            .collect::<Result<Vec<_>, _>>()?,
        // plain values are an implicit $eq
        other => vec![Condition::new(Operator::Eq, encode_value(other.clone(), opts))],
    };
    Ok(Expression::Field(FieldExpression { field: key.clone(), conditions }))
}

fn parse_condition(key: &str, value: &Bson, opts: ParseOptions) -> Result<Condition, DbError> {
    let op = Operator::from_key(key).ok_or_else(|| DbError::UnknownOperator(key.to_owned()))?;
    let encoded = match op {
        Operator::In | Operator::Nin => match value {
            Bson::Array(_) => encode_value(value.clone(), opts),
            other => {
                return Err(DbError::Parse(format!("{key} requires an array, got {other}")));
            }
        },
        Operator::Regex => match value {
            Bson::String(s) => EncodedValue::Pattern(s.clone()),
            Bson::RegularExpression(re) => EncodedValue::Pattern(re.pattern.clone()),
            other => {
                return Err(DbError::Parse(format!("$regex requires a string, got {other}")));
            }
        },
        Operator::Type => EncodedValue::Raw(value.clone()),
        _ => encode_value(value.clone(), opts),
    };
    if op.is_range() && !encoded.is_orderable() {
        return Err(DbError::NotOrderable { op: op.as_str(), kind: encoded.kind().to_owned() });
    }
    Ok(Condition::new(op, encoded))
}

fn encode_value(value: Bson, opts: ParseOptions) -> EncodedValue {
    match value {
        Bson::Binary(bin)
            if bin.subtype == BinarySubtype::Generic
                && matches!(bin.bytes.len(), OBJECT_ID_LEN | OBJECT_ID_HEX_LEN) =>
        {
            RawId::new(bin.bytes).with_policy(opts.object_id_policy).encode()
        }
        Bson::Array(items) => {
            EncodedValue::Array(items.into_iter().map(|v| encode_value(v, opts)).collect())
        }
        other => other.encode(),
    }
}

use bson::oid::ObjectId;
use bson::{Bson, DateTime};
use serde::{Deserialize, Serialize};

/// Canonical, type-normalized value ready to be placed in a filter document.
///
/// `Int32` and `Int64` are the two wire widths an integer can take. `Raw`
/// carries values that pass through the encoder unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum EncodedValue {
    Int32(i32),
    Int64(i64),
    Float(f64),
    Boolean(bool),
    String(String),
    DateTime(DateTime),
    ObjectId(ObjectId),
    Pattern(String),
    Array(Vec<EncodedValue>),
    Raw(Bson),
}

impl EncodedValue {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Float(_) => "double",
            Self::Boolean(_) => "bool",
            Self::String(_) => "string",
            Self::DateTime(_) => "date",
            Self::ObjectId(_) => "objectId",
            Self::Pattern(_) => "pattern",
            Self::Array(_) => "array",
            Self::Raw(b) => raw_kind(b),
        }
    }

    /// Whether a range operator (`$gt`, `$gte`, `$lt`, `$lte`) accepts this value.
    ///
    /// Arrays qualify when every element is orderable and all elements share
    /// one kind. Integer widths and floats count as one numeric kind.
    #[must_use]
    pub fn is_orderable(&self) -> bool {
        match self {
            Self::Int32(_)
            | Self::Int64(_)
            | Self::Float(_)
            | Self::DateTime(_)
            | Self::ObjectId(_) => true,
            Self::Array(items) => {
                let mut first: Option<&'static str> = None;
                items.iter().all(|v| {
                    if !v.is_orderable() {
                        return false;
                    }
                    let k = v.order_class();
                    *first.get_or_insert(k) == k
                })
            }
            _ => false,
        }
    }

    fn order_class(&self) -> &'static str {
        match self {
            Self::Int32(_) | Self::Int64(_) | Self::Float(_) => "number",
            other => other.kind(),
        }
    }
}

fn raw_kind(b: &Bson) -> &'static str {
    match b {
        Bson::Null => "null",
        Bson::Document(_) => "object",
        Bson::Binary(_) => "binData",
        Bson::RegularExpression(_) => "regex",
        Bson::Timestamp(_) => "timestamp",
        Bson::Decimal128(_) => "decimal",
        Bson::Undefined => "undefined",
        Bson::MinKey => "minKey",
        Bson::MaxKey => "maxKey",
        Bson::Symbol(_) => "symbol",
        Bson::JavaScriptCode(_) | Bson::JavaScriptCodeWithScope(_) => "javascript",
        Bson::DbPointer(_) => "dbPointer",
        Bson::Int32(_) => "int32",
        Bson::Int64(_) => "int64",
        Bson::Double(_) => "double",
        Bson::Boolean(_) => "bool",
        Bson::String(_) => "string",
        Bson::DateTime(_) => "date",
        Bson::ObjectId(_) => "objectId",
        Bson::Array(_) => "array",
    }
}

/// Comparison operators. The wire names are fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    Nin,
    Regex,
    Type,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Gte,
        Operator::Lt,
        Operator::Lte,
        Operator::In,
        Operator::Nin,
        Operator::Regex,
        Operator::Type,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "$eq",
            Operator::Ne => "$ne",
            Operator::Gt => "$gt",
            Operator::Gte => "$gte",
            Operator::Lt => "$lt",
            Operator::Lte => "$lte",
            Operator::In => "$in",
            Operator::Nin => "$nin",
            Operator::Regex => "$regex",
            Operator::Type => "$type",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == key)
    }

    #[must_use]
    pub fn is_range(self) -> bool {
        matches!(self, Operator::Gt | Operator::Gte | Operator::Lt | Operator::Lte)
    }
}

/// A single operator-value pair scoped to one field.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub op: Operator,
    pub value: EncodedValue,
}

impl Condition {
    #[must_use]
    pub fn new(op: Operator, value: EncodedValue) -> Self {
        Self { op, value }
    }
}

/// Conditions grouped under one field name. All conditions must hold.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldExpression {
    pub field: String,
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogicalOp {
    And,
    Or,
    Nor,
}

impl LogicalOp {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogicalOp::And => "$and",
            LogicalOp::Or => "$or",
            LogicalOp::Nor => "$nor",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "$and" => Some(LogicalOp::And),
            "$or" => Some(LogicalOp::Or),
            "$nor" => Some(LogicalOp::Nor),
            _ => None,
        }
    }
}

/// A filter expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Field(FieldExpression),
    Logical { op: LogicalOp, operands: Vec<Expression> },
    Not(Box<Expression>),
}

pub(crate) const NOT_KEY: &str = "$not";

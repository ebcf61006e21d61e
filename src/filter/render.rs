//! Rendering of expression trees into ordered BSON documents.

use bson::{Bson, Document};
use serde::{Serialize, Serializer};
use std::fmt;

use super::types::{Condition, EncodedValue, Expression, FieldExpression, LogicalOp, NOT_KEY};

impl EncodedValue {
    #[must_use]
    pub fn to_bson(&self) -> Bson {
        match self {
            Self::Int32(i) => Bson::Int32(*i),
            Self::Int64(i) => Bson::Int64(*i),
            Self::Float(f) => Bson::Double(*f),
            Self::Boolean(b) => Bson::Boolean(*b),
            Self::String(s) | Self::Pattern(s) => Bson::String(s.clone()),
            Self::DateTime(d) => Bson::DateTime(*d),
            Self::ObjectId(o) => Bson::ObjectId(*o),
            Self::Array(items) => Bson::Array(items.iter().map(Self::to_bson).collect()),
            Self::Raw(b) => b.clone(),
        }
    }
}

impl Condition {
    #[must_use]
    pub fn to_entry(&self) -> (&'static str, Bson) {
        (self.op.as_str(), self.value.to_bson())
    }
}

impl FieldExpression {
    /// Ordered operator/value pairs, repeats included.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, Bson)> {
        self.conditions.iter().map(Condition::to_entry).collect()
    }

    /// Whether some operator appears more than once on this field.
    #[must_use]
    pub fn has_repeated_operator(&self) -> bool {
        self.conditions
            .iter()
            .enumerate()
            .any(|(i, c)| self.conditions[..i].iter().any(|prev| prev.op == c.op))
    }

    /// `{ <field>: { <op1>: <v1>, <op2>: <v2>, ... } }`.
    ///
    /// One document cannot hold the same operator twice, so a field with a
    /// repeated operator renders as `{ "$and": [{ <field>: { <op>: <v> } }, ...] }`
    /// with one entry per condition, in condition order.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        if self.has_repeated_operator() {
            let parts: Vec<Bson> = self
                .entries()
                .into_iter()
                .map(|(op, value)| {
                    let mut cond = Document::new();
                    cond.insert(op, value);
                    let mut part = Document::new();
                    part.insert(self.field.clone(), cond);
                    Bson::Document(part)
                })
                .collect();
            doc.insert(LogicalOp::And.as_str(), parts);
            return doc;
        }
        let mut conds = Document::new();
        for (op, value) in self.entries() {
            conds.insert(op, value);
        }
        doc.insert(self.field.clone(), conds);
        doc
    }
}

impl Expression {
    /// Renders the canonical filter document.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        match self {
            Expression::Field(fe) => return fe.to_document(),
            Expression::Logical { op, operands } => {
                let arr: Vec<Bson> =
                    operands.iter().map(|e| Bson::Document(e.to_document())).collect();
                doc.insert(op.as_str(), arr);
            }
            Expression::Not(inner) => {
                doc.insert(NOT_KEY, inner.to_document());
            }
        }
        doc
    }

    /// The rendered document as relaxed Extended JSON.
    #[must_use]
    pub fn to_relaxed_extjson(&self) -> serde_json::Value {
        Bson::Document(self.to_document()).into_relaxed_extjson()
    }
}

impl From<&Expression> for Document {
    fn from(e: &Expression) -> Self {
        e.to_document()
    }
}

impl From<Expression> for Document {
    fn from(e: Expression) -> Self {
        e.to_document()
    }
}

impl From<Expression> for Bson {
    fn from(e: Expression) -> Self {
        Bson::Document(e.to_document())
    }
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_document())
    }
}

//! Typed builder for query filter documents.
//!
//! ```
//! use bsonfilter::filter::{and, eq, f, gt};
//!
//! let filter = and([f("age", [gt(24)]), f("name", [eq("Ivan")])]);
//! assert_eq!(
//!     filter.to_document(),
//!     bson::doc! {"$and": [{"age": {"$gt": 24}}, {"name": {"$eq": "Ivan"}}]}
//! );
//! ```

mod encode;
mod logical;
mod ops;
mod parse;
mod render;
mod types;

pub use encode::{
    Encode, IdParse, IntoPattern, OBJECT_ID_HEX_LEN, OBJECT_ID_LEN, ObjectIdPolicy, Orderable,
    RawId,
};
pub use logical::{and, nor, not, or};
pub use ops::{eq, f, gt, gte, is_in, is_type, lt, lte, ne, nin, regex};
pub use parse::{ParseOptions, parse_filter_document, parse_filter_json, parse_filter_json_with};
pub use types::{Condition, EncodedValue, Expression, FieldExpression, LogicalOp, Operator};

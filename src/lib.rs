//! Typed builder for MongoDB query filter documents.
//!
//! Filters are built from comparison operators grouped per field with
//! [`filter::f`] and combined with [`filter::and`], [`filter::or`],
//! [`filter::nor`] and [`filter::not`]. The resulting [`filter::Expression`]
//! renders to an ordered `bson::Document` ready to pass to a driver.
//!
//! ```
//! use bsonfilter::filter::{f, gte, lte};
//!
//! let age = f("age", [gte(5), lte(66)]);
//! assert_eq!(age.to_document(), bson::doc! {"age": {"$gte": 5, "$lte": 66}});
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod filter;
pub mod store;
pub mod utils;

pub use errors::DbError;
pub use filter::{Expression, and, eq, f, gt, gte, is_in, is_type, lt, lte, ne, nin, nor, not, or, regex};

/// Initializes logging from `log4rs.yaml` when present.
///
/// # Errors
/// Returns an error if the file exists but cannot be loaded.
pub fn init() -> Result<(), DbError> {
    utils::logger::init()
}

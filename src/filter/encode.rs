//! Type-directed conversion of native values into [`EncodedValue`].
//!
//! The encoder is total: every accepted type maps to some encoded value and
//! nothing here returns an error. Which operators accept which types is
//! decided by the [`Encode`] and [`Orderable`] bounds, not at runtime.

use bson::oid::ObjectId;
use bson::{Bson, DateTime, Document};
use serde::{Deserialize, Serialize};
use std::time::SystemTime;

use super::types::EncodedValue;

/// Length of a binary ObjectId.
pub const OBJECT_ID_LEN: usize = 12;
/// Length of the hexadecimal text form of an ObjectId.
pub const OBJECT_ID_HEX_LEN: usize = 24;

/// Converts a value into its canonical encoded form.
pub trait Encode {
    fn encode(self) -> EncodedValue;
}

/// Marker for the kinds range operators accept: integers, floats, temporal
/// values, identifiers, and sequences of those.
pub trait Orderable: Encode {}

macro_rules! encode_int32 {
    ($($t:ty),*) => {$(
        impl Encode for $t {
            fn encode(self) -> EncodedValue {
                EncodedValue::Int32(i32::from(self))
            }
        }
        impl Orderable for $t {}
    )*};
}

macro_rules! encode_int64 {
    ($($t:ty),*) => {$(
        impl Encode for $t {
            fn encode(self) -> EncodedValue {
                EncodedValue::Int64(i64::from(self))
            }
        }
        impl Orderable for $t {}
    )*};
}

encode_int32!(i8, i16, i32, u8, u16);
encode_int64!(i64, u32);

impl Encode for isize {
    fn encode(self) -> EncodedValue {
        // isize is at most 64 bits on every supported target
        EncodedValue::Int64(self as i64)
    }
}
impl Orderable for isize {}

impl Encode for u64 {
    fn encode(self) -> EncodedValue {
        // BSON has no unsigned 64-bit integer; values above i64::MAX become doubles
        match i64::try_from(self) {
            Ok(v) => EncodedValue::Int64(v),
            Err(_) => EncodedValue::Float(self as f64),
        }
    }
}
impl Orderable for u64 {}

impl Encode for usize {
    fn encode(self) -> EncodedValue {
        (self as u64).encode()
    }
}
impl Orderable for usize {}

impl Encode for f32 {
    fn encode(self) -> EncodedValue {
        EncodedValue::Float(f64::from(self))
    }
}
impl Orderable for f32 {}

impl Encode for f64 {
    fn encode(self) -> EncodedValue {
        EncodedValue::Float(self)
    }
}
impl Orderable for f64 {}

impl Encode for bool {
    fn encode(self) -> EncodedValue {
        EncodedValue::Boolean(self)
    }
}

impl Encode for &str {
    fn encode(self) -> EncodedValue {
        EncodedValue::String(self.to_owned())
    }
}

impl Encode for String {
    fn encode(self) -> EncodedValue {
        EncodedValue::String(self)
    }
}

impl Encode for &String {
    fn encode(self) -> EncodedValue {
        EncodedValue::String(self.clone())
    }
}

// Temporal values: epoch milliseconds, sub-millisecond precision floored.

impl<Tz: chrono::TimeZone> Encode for chrono::DateTime<Tz> {
    fn encode(self) -> EncodedValue {
        EncodedValue::DateTime(DateTime::from_millis(self.timestamp_millis()))
    }
}
impl<Tz: chrono::TimeZone> Orderable for chrono::DateTime<Tz> {}

impl Encode for SystemTime {
    fn encode(self) -> EncodedValue {
        chrono::DateTime::<chrono::Utc>::from(self).encode()
    }
}
impl Orderable for SystemTime {}

impl Encode for DateTime {
    fn encode(self) -> EncodedValue {
        EncodedValue::DateTime(self)
    }
}
impl Orderable for DateTime {}

impl Encode for ObjectId {
    fn encode(self) -> EncodedValue {
        EncodedValue::ObjectId(self)
    }
}
impl Orderable for ObjectId {}

#[cfg(feature = "regex")]
impl Encode for regex::Regex {
    fn encode(self) -> EncodedValue {
        EncodedValue::Pattern(self.as_str().to_owned())
    }
}

#[cfg(feature = "regex")]
impl Encode for &regex::Regex {
    fn encode(self) -> EncodedValue {
        EncodedValue::Pattern(self.as_str().to_owned())
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(self) -> EncodedValue {
        match self {
            Some(v) => v.encode(),
            None => EncodedValue::Raw(Bson::Null),
        }
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(self) -> EncodedValue {
        EncodedValue::Array(self.into_iter().map(Encode::encode).collect())
    }
}
impl<T: Orderable> Orderable for Vec<T> {}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(self) -> EncodedValue {
        EncodedValue::Array(self.into_iter().map(Encode::encode).collect())
    }
}
impl<T: Orderable, const N: usize> Orderable for [T; N] {}

impl<T: Encode + Clone> Encode for &[T] {
    fn encode(self) -> EncodedValue {
        EncodedValue::Array(self.iter().cloned().map(Encode::encode).collect())
    }
}
impl<T: Orderable + Clone> Orderable for &[T] {}

impl Encode for Document {
    fn encode(self) -> EncodedValue {
        EncodedValue::Raw(Bson::Document(self))
    }
}

impl Encode for Bson {
    fn encode(self) -> EncodedValue {
        match self {
            Bson::Int32(i) => EncodedValue::Int32(i),
            Bson::Int64(i) => EncodedValue::Int64(i),
            Bson::Double(f) => EncodedValue::Float(f),
            Bson::Boolean(b) => EncodedValue::Boolean(b),
            Bson::String(s) => EncodedValue::String(s),
            Bson::DateTime(d) => EncodedValue::DateTime(d),
            Bson::ObjectId(o) => EncodedValue::ObjectId(o),
            Bson::Array(items) => EncodedValue::Array(items.into_iter().map(Encode::encode).collect()),
            other => EncodedValue::Raw(other),
        }
    }
}

impl Encode for EncodedValue {
    fn encode(self) -> EncodedValue {
        self
    }
}

/// What a [`RawId`] emits after its ObjectId parse attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectIdPolicy {
    /// Emit the original bytes as an array even when they parse as an ObjectId.
    #[default]
    Preserve,
    /// Emit the parsed ObjectId; fall back to the byte array when parsing fails.
    Normalize,
}

/// Outcome of the ObjectId parse attempt made while encoding a [`RawId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdParse {
    /// Length is neither 12 nor 24 bytes.
    NotAttempted,
    Parsed(ObjectId),
    Failed,
}

/// A byte sequence that represents a document identifier.
///
/// Twelve bytes are read as a binary ObjectId through its hex text form;
/// twenty-four bytes are read as the hex text itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawId {
    bytes: Vec<u8>,
    policy: ObjectIdPolicy,
}

impl RawId {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into(), policy: ObjectIdPolicy::Preserve }
    }

    pub fn normalized(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(bytes).with_policy(ObjectIdPolicy::Normalize)
    }

    #[must_use]
    pub fn with_policy(mut self, policy: ObjectIdPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn policy(&self) -> ObjectIdPolicy {
        self.policy
    }

    /// Attempts the ObjectId parse without encoding.
    #[must_use]
    pub fn parse(&self) -> IdParse {
        let text = match self.bytes.len() {
            OBJECT_ID_LEN => hex::encode(&self.bytes),
            OBJECT_ID_HEX_LEN => match std::str::from_utf8(&self.bytes) {
                Ok(s) => s.to_owned(),
                Err(_) => return IdParse::Failed,
            },
            _ => return IdParse::NotAttempted,
        };
        match ObjectId::parse_str(&text) {
            Ok(oid) => IdParse::Parsed(oid),
            Err(e) => {
                log::debug!("identifier bytes did not parse as ObjectId: {e}");
                IdParse::Failed
            }
        }
    }

    /// Encodes the identifier and reports what the parse attempt produced.
    #[must_use]
    pub fn encode_with_report(self) -> (EncodedValue, IdParse) {
        let outcome = self.parse();
        let value = match (self.policy, outcome) {
            (ObjectIdPolicy::Normalize, IdParse::Parsed(oid)) => EncodedValue::ObjectId(oid),
            _ => bytes_array(&self.bytes),
        };
        (value, outcome)
    }
}

fn bytes_array(bytes: &[u8]) -> EncodedValue {
    EncodedValue::Array(bytes.iter().map(|b| EncodedValue::Int32(i32::from(*b))).collect())
}

impl Encode for RawId {
    fn encode(self) -> EncodedValue {
        self.encode_with_report().0
    }
}
impl Orderable for RawId {}

impl From<Vec<u8>> for RawId {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl From<&[u8]> for RawId {
    fn from(bytes: &[u8]) -> Self {
        Self::new(bytes)
    }
}

impl From<[u8; OBJECT_ID_LEN]> for RawId {
    fn from(bytes: [u8; OBJECT_ID_LEN]) -> Self {
        Self::new(bytes.to_vec())
    }
}

/// Sources accepted by the `regex` operator. Only the pattern text survives.
pub trait IntoPattern {
    fn into_pattern(self) -> String;
}

impl IntoPattern for &str {
    fn into_pattern(self) -> String {
        self.to_owned()
    }
}

impl IntoPattern for String {
    fn into_pattern(self) -> String {
        self
    }
}

impl IntoPattern for &String {
    fn into_pattern(self) -> String {
        self.clone()
    }
}

#[cfg(feature = "regex")]
impl IntoPattern for regex::Regex {
    fn into_pattern(self) -> String {
        self.as_str().to_owned()
    }
}

#[cfg(feature = "regex")]
impl IntoPattern for &regex::Regex {
    fn into_pattern(self) -> String {
        self.as_str().to_owned()
    }
}

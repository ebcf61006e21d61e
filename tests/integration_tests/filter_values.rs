use bson::oid::ObjectId;
use bson::{Bson, DateTime, doc};
use bsonfilter::filter::{
    Encode, IdParse, ObjectIdPolicy, Orderable, RawId, eq, f, gt, gte, is_in, is_type, lt, lte, ne,
    regex,
};
use chrono::{Duration, TimeZone, Utc};

fn field_doc(field: &str, ops: bson::Document) -> bson::Document {
    let mut d = bson::Document::new();
    d.insert(field, ops);
    d
}

fn eq_ne_pair(field: &str, value: impl Encode + Clone, expected: Bson) {
    assert_eq!(
        f(field, [eq(value.clone())]).to_document(),
        field_doc(field, doc! {"$eq": expected.clone()})
    );
    assert_eq!(f(field, [ne(value)]).to_document(), field_doc(field, doc! {"$ne": expected}));
}

fn range_quad(field: &str, value: impl Orderable + Clone, expected: Bson) {
    assert_eq!(
        f(field, [gt(value.clone()), gte(value.clone()), lt(value.clone()), lte(value)])
            .to_document(),
        field_doc(
            field,
            doc! {"$gt": expected.clone(), "$gte": expected.clone(), "$lt": expected.clone(), "$lte": expected}
        )
    );
}

#[test]
fn eq_and_ne_over_scalars_and_arrays() {
    eq_ne_pair("int32_value", 2, Bson::Int32(2));
    eq_ne_pair("int64_value", 4i64, Bson::Int64(4));
    eq_ne_pair("float_value", 2.4, Bson::Double(2.4));
    eq_ne_pair("bool_value", true, Bson::Boolean(true));
    eq_ne_pair("string_value", "this is the value", Bson::String("this is the value".into()));
    eq_ne_pair("array_int32_value", vec![1, 2, 3, 4], bson::bson!([1, 2, 3, 4]));
    eq_ne_pair("array_int64_value", vec![1i64, 2], Bson::Array(vec![Bson::Int64(1), Bson::Int64(2)]));
    eq_ne_pair("array_bool_value", vec![true, false], bson::bson!([true, false]));
    eq_ne_pair(
        "array_string_value",
        vec!["first", "second", "third"],
        bson::bson!(["first", "second", "third"]),
    );
}

#[test]
fn eq_accepts_composite_and_null() {
    let sub = doc! {"city": "Vigo", "zip": 36201};
    assert_eq!(f("address", [eq(sub.clone())]).to_document(), doc! {"address": {"$eq": sub}});
    assert_eq!(f("deleted_at", [eq(None::<i32>)]).to_document(), doc! {"deleted_at": {"$eq": null}});
}

#[test]
fn range_ops_over_numeric_widths() {
    range_quad("int8_value", 2i8, Bson::Int32(2));
    range_quad("uint8_value", 2u8, Bson::Int32(2));
    range_quad("int16_value", 2i16, Bson::Int32(2));
    range_quad("uint16_value", 2u16, Bson::Int32(2));
    range_quad("uint32_value", 2u32, Bson::Int64(2));
    range_quad("uint64_value", 4u64, Bson::Int64(4));
    range_quad("float32_value", 2.5f32, Bson::Double(2.5));
    range_quad("float_value", 2.4f64, Bson::Double(2.4));
    range_quad("array_float_value", vec![1.5f32, 2.5], bson::bson!([1.5, 2.5]));
}

#[test]
fn unsigned_above_i64_max_becomes_double() {
    let big = u64::MAX;
    assert_eq!(f("n", [gt(big)]).to_document(), doc! {"n": {"$gt": big as f64}});
}

#[test]
fn temporal_values_render_as_millis() {
    let t = Utc.timestamp_opt(1_650_000_000, 999_999).unwrap();
    let millis = DateTime::from_millis(t.timestamp_millis());
    assert_eq!(f("best_day_ever", [gt(t)]).to_document(), doc! {"best_day_ever": {"$gt": millis}});
    assert_eq!(f("best_day_ever", [eq(t)]).to_document(), doc! {"best_day_ever": {"$eq": millis}});
    assert_eq!(f("best_day_ever", [ne(t)]).to_document(), doc! {"best_day_ever": {"$ne": millis}});

    let days = vec![t, t - Duration::hours(24)];
    let expected: Vec<Bson> =
        days.iter().map(|d| Bson::DateTime(DateTime::from_millis(d.timestamp_millis()))).collect();
    assert_eq!(f("d", [is_in(days.clone())]).to_document(), doc! {"d": {"$in": expected.clone()}});
    assert_eq!(f("d", [lte(days)]).to_document(), doc! {"d": {"$lte": expected}});
}

#[test]
fn object_ids_compare_directly() {
    let oid = ObjectId::parse_str("572bb8222b288919b68abf6b").unwrap();
    assert_eq!(f("_id", [gt(oid)]).to_document(), doc! {"_id": {"$gt": oid}});
}

#[test]
fn raw_id_bytes_follow_policy() {
    let oid = ObjectId::parse_str("572bb8222b288919b68abf6b").unwrap();
    let preserved = f("_id", [gte(RawId::new(oid.bytes()))]).to_document();
    let bytes: Vec<Bson> = oid.bytes().iter().map(|b| Bson::Int32(i32::from(*b))).collect();
    assert_eq!(preserved, doc! {"_id": {"$gte": bytes}});

    let normalized = f("_id", [gte(RawId::new(oid.bytes()).with_policy(ObjectIdPolicy::Normalize))]);
    assert_eq!(normalized.to_document(), doc! {"_id": {"$gte": oid}});

    let (_, outcome) = RawId::new(b"572bb8222b288919b68abf6b".to_vec()).encode_with_report();
    assert_eq!(outcome, IdParse::Parsed(oid));
}

#[cfg(feature = "regex")]
#[test]
fn compiled_pattern_and_text_render_the_same() {
    let compiled = regex::Regex::new("^Iv(an)?$").unwrap();
    assert_eq!(
        f("name", [regex(&compiled)]).to_document(),
        f("name", [regex("^Iv(an)?$")]).to_document()
    );
    assert_eq!(f("name", [regex(compiled)]).to_document(), doc! {"name": {"$regex": "^Iv(an)?$"}});
}

#[cfg(feature = "regex")]
#[test]
fn builder_flags_are_dropped() {
    let ci = regex::RegexBuilder::new("pedro").case_insensitive(true).build().unwrap();
    assert_eq!(f("name", [regex(&ci)]).to_document(), doc! {"name": {"$regex": "pedro"}});
}

#[cfg(feature = "regex")]
#[test]
fn compiled_patterns_inside_in_become_text() {
    let res = vec![regex::Regex::new("^a").unwrap(), regex::Regex::new("b$").unwrap()];
    assert_eq!(f("tag", [is_in(res)]).to_document(), doc! {"tag": {"$in": ["^a", "b$"]}});
}

#[test]
fn type_passes_through_unencoded() {
    assert_eq!(f("age", [is_type("int")]).to_document(), doc! {"age": {"$type": "int"}});
    assert_eq!(f("age", [is_type(16)]).to_document(), doc! {"age": {"$type": 16}});
    assert_eq!(
        f("age", [is_type(vec!["int", "long"])]).to_document(),
        doc! {"age": {"$type": ["int", "long"]}}
    );
}

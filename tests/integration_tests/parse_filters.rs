use bson::doc;
use bsonfilter::DbError;
use bsonfilter::filter::{
    ObjectIdPolicy, ParseOptions, and, eq, f, gt, gte, is_in, lt, nin, not, or, parse_filter_document,
    parse_filter_json, parse_filter_json_with, regex,
};

#[test]
fn built_expressions_parse_back_equal() {
    let built = or([
        f("name", [regex("^Iv")]),
        and([f("age", [gte(5), lt(70)]), f("surname", [nin(["Gonzalez Gonzalez"])])]),
        not(f("fav_numbers", [is_in([1, 2, 3])])),
    ]);
    let parsed = parse_filter_document(&built.to_document(), ParseOptions::default()).unwrap();
    assert_eq!(parsed, built);
    assert_eq!(parsed.to_document(), built.to_document());
}

#[test]
fn relaxed_extjson_round_trips() {
    let built = and([f("age", [gt(24)]), f("name", [eq("Ivan")])]);
    let json = built.to_relaxed_extjson().to_string();
    let parsed = parse_filter_json(&json).unwrap();
    assert_eq!(parsed.to_document(), built.to_document());
}

#[test]
fn extended_json_dates_are_temporal() {
    let e = parse_filter_json(r#"{"at": {"$lt": {"$date": {"$numberLong": "1650000000999"}}}}"#)
        .unwrap();
    assert_eq!(
        e.to_document(),
        doc! {"at": {"$lt": bson::DateTime::from_millis(1_650_000_000_999)}}
    );
}

#[test]
fn condition_order_survives_parsing() {
    let e = parse_filter_json(r#"{"age": {"$lt": 70, "$gt": 5}}"#).unwrap();
    let doc = e.to_document();
    let keys: Vec<&String> = doc.get_document("age").unwrap().keys().collect();
    assert_eq!(keys, ["$lt", "$gt"]);
}

#[test]
fn binary_identifier_can_be_normalized() {
    let json = r#"{"_id": {"$eq": {"$binary": {"base64": "Vyu4IisoiRm2ir9r", "subType": "00"}}}}"#;
    let opts = ParseOptions { object_id_policy: ObjectIdPolicy::Normalize };
    let e = parse_filter_json_with(json, opts).unwrap();
    let oid = bson::oid::ObjectId::parse_str("572bb8222b288919b68abf6b").unwrap();
    assert_eq!(e.to_document(), doc! {"_id": {"$eq": oid}});
}

#[test]
fn malformed_operands_are_errors() {
    assert!(matches!(parse_filter_json(r#"{"$and": {"a": 1}}"#), Err(DbError::Parse(_))));
    assert!(matches!(parse_filter_json(r#"{"$or": [1]}"#), Err(DbError::Parse(_))));
    assert!(matches!(parse_filter_json(r#"{"$not": 3}"#), Err(DbError::Parse(_))));
    assert!(matches!(parse_filter_json(r#"{"a": {"$in": 3}}"#), Err(DbError::Parse(_))));
    assert!(matches!(parse_filter_json(r#"{"a": {"$regex": 3}}"#), Err(DbError::Parse(_))));
    assert!(matches!(parse_filter_json("{not json"), Err(DbError::Json(_))));
}

#[test]
fn range_operators_check_orderability() {
    assert!(parse_filter_json(r#"{"a": {"$gte": [1, 2.5]}}"#).is_ok());
    assert!(matches!(
        parse_filter_json(r#"{"a": {"$lte": true}}"#),
        Err(DbError::NotOrderable { op: "$lte", .. })
    ));
}

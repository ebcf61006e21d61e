use bson::doc;
use bsonfilter::filter::{and, eq, f, gt, gte, is_in, lt, lte, ne, nin, nor, not, or, regex};

#[test]
fn age_greater_than() {
    assert_eq!(f("age", [gt(24)]).to_document(), doc! {"age": {"$gt": 24}});
}

#[test]
fn age_range_keeps_condition_order() {
    assert_eq!(f("age", [gte(5), lte(66)]).to_document(), doc! {"age": {"$gte": 5, "$lte": 66}});
    let doc = f("age", [lt(70), gt(5)]).to_document();
    let keys: Vec<&String> = doc.get_document("age").unwrap().keys().collect();
    assert_eq!(keys, ["$lt", "$gt"]);
}

#[test]
fn and_of_two_fields() {
    let e = and([f("age", [gt(24)]), f("name", [eq("Ivan")])]);
    assert_eq!(
        e.to_document(),
        doc! {"$and": [{"age": {"$gt": 24}}, {"name": {"$eq": "Ivan"}}]}
    );
}

#[test]
fn in_list_of_ints() {
    assert_eq!(
        f("fav_numbers", [is_in([1, 2, 3])]).to_document(),
        doc! {"fav_numbers": {"$in": [1, 2, 3]}}
    );
    assert_eq!(
        f("fav_numbers", [nin(vec![23, 73])]).to_document(),
        doc! {"fav_numbers": {"$nin": [23, 73]}}
    );
}

#[test]
fn not_wraps_field() {
    assert_eq!(
        not(f("name", [eq("Pedro")])).to_document(),
        doc! {"$not": {"name": {"$eq": "Pedro"}}}
    );
}

#[test]
fn or_and_nor_preserve_operand_order() {
    let operands = || [f("b", [eq(2)]), f("a", [eq(1)]), f("c", [ne(3)])];
    let expected = |key: &str| {
        let mut d = bson::Document::new();
        d.insert(key, bson::bson!([{"b": {"$eq": 2}}, {"a": {"$eq": 1}}, {"c": {"$ne": 3}}]));
        d
    };
    assert_eq!(or(operands()).to_document(), expected("$or"));
    assert_eq!(nor(operands()).to_document(), expected("$nor"));
    assert_eq!(and(operands()).to_document(), expected("$and"));
}

#[test]
fn nested_combinators_are_not_flattened() {
    let e = and([and([f("a", [eq(1)])]), or([f("b", [gt(2)]), not(f("c", [lt(3)]))])]);
    assert_eq!(
        e.to_document(),
        doc! {"$and": [
            {"$and": [{"a": {"$eq": 1}}]},
            {"$or": [{"b": {"$gt": 2}}, {"$not": {"c": {"$lt": 3}}}]}
        ]}
    );
}

#[test]
fn regex_and_in_in_one_compound_filter() {
    let e = or([
        f("name", [regex("^Iv")]),
        and([f("age", [gte(5), lt(70)]), f("surname", [nin(["Gonzalez Gonzalez"])])]),
    ]);
    assert_eq!(
        e.to_document(),
        doc! {"$or": [
            {"name": {"$regex": "^Iv"}},
            {"$and": [
                {"age": {"$gte": 5, "$lt": 70}},
                {"surname": {"$nin": ["Gonzalez Gonzalez"]}}
            ]}
        ]}
    );
}

#[test]
fn empty_operand_lists_render_empty_arrays() {
    let empty: [bsonfilter::Expression; 0] = [];
    assert_eq!(and(empty).to_document(), doc! {"$and": []});
    assert_eq!(f("x", []).to_document(), doc! {"x": {}});
}

#[test]
fn rendering_twice_is_identical() {
    let e = and([f("age", [gt(24), lt(60)]), not(f("name", [eq("Pedro")]))]);
    let first = bson::to_vec(&e.to_document()).unwrap();
    let second = bson::to_vec(&e.to_document()).unwrap();
    assert_eq!(first, second);
    assert_eq!(e.to_string(), e.to_string());
}

#[test]
fn repeated_operator_keeps_every_condition() {
    assert_eq!(
        f("age", [gt(5), gt(1)]).to_document(),
        doc! {"$and": [{"age": {"$gt": 5}}, {"age": {"$gt": 1}}]}
    );
    let e = and([f("age", [lt(70), lt(60)]), f("name", [eq("Ivan")])]);
    assert_eq!(
        e.to_document(),
        doc! {"$and": [
            {"$and": [{"age": {"$lt": 70}}, {"age": {"$lt": 60}}]},
            {"name": {"$eq": "Ivan"}}
        ]}
    );
}

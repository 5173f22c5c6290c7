//! Integration test: every builder's output is accepted by a Draft 6
//! validator, and accepts/rejects the instances its keywords describe.
//!
//! Each case pairs one instance the schema must accept with one it must
//! reject.

use pjs_core::{
    ArrayKeywords, Document, IntegerKeywords, NumberKeywords, ObjectKeywords, ObjectSchema,
    Properties, Required, SchemaNode, StringKeywords,
};
use pjs_schema::{SchemaValidationError, SchemaValidator};
use serde_json::{json, Value};

fn string() -> SchemaNode {
    SchemaNode::string(StringKeywords::default())
}

fn integer() -> SchemaNode {
    SchemaNode::integer(IntegerKeywords::default())
}

fn object(keywords: ObjectKeywords) -> Document {
    ObjectSchema::new(keywords)
        .expect("object keywords should compose")
        .document()
}

fn int_props(names: &[&str]) -> Properties {
    names.iter().map(|n| (*n, integer())).collect()
}

fn check(label: &str, schema: Document, positive: Value, negative: Value) {
    let validator = SchemaValidator::new(label, &schema)
        .unwrap_or_else(|e| panic!("{label}: schema did not compile: {e}"));
    if let Err(e) = validator.validate(&positive) {
        panic!("{label}: expected {positive} to validate, got: {e}");
    }
    match validator.validate(&negative) {
        Err(SchemaValidationError::ValidationFailed { .. }) => {}
        Err(other) => panic!("{label}: unexpected error kind: {other}"),
        Ok(()) => panic!("{label}: expected {negative} to be rejected"),
    }
}

#[test]
fn test_null_and_boolean() {
    check("null", SchemaNode::null().document(), Value::Null, json!("test"));
    check("boolean", SchemaNode::boolean().document(), json!(true), json!("test"));
}

#[test]
fn test_integer_enum() {
    let node = integer();
    let doc = node
        .materialize(IntegerKeywords {
            enum_values: Some(vec![json!(1), json!(2), json!(3)]),
        })
        .unwrap();
    check("integer enum", doc, json!(2), json!(22));
}

#[test]
fn test_number_keywords() {
    let number = SchemaNode::number(NumberKeywords::default());
    let cases = [
        (
            "bounds",
            NumberKeywords {
                minimum: Some(1.into()),
                maximum: Some(5.into()),
                ..Default::default()
            },
            json!(2.5),
            json!(22.3),
        ),
        (
            "exclusive bounds",
            NumberKeywords {
                exclusive_minimum: Some(1.into()),
                exclusive_maximum: Some(5.into()),
                ..Default::default()
            },
            json!(2.5),
            json!(5),
        ),
        (
            "multipleOf",
            NumberKeywords {
                multiple_of: Some(10.into()),
                ..Default::default()
            },
            json!(10),
            json!(98),
        ),
        (
            "enum",
            NumberKeywords {
                enum_values: Some(vec![json!(1), json!(2.2), json!(3.3)]),
                ..Default::default()
            },
            json!(2.2),
            json!(3.4),
        ),
    ];
    for (label, keywords, positive, negative) in cases {
        check(label, number.materialize(keywords).unwrap(), positive, negative);
    }
}

#[test]
fn test_string_keywords() {
    let node = string();
    check(
        "lengths",
        node.materialize(StringKeywords {
            min_length: Some(1),
            max_length: Some(6),
            ..Default::default()
        })
        .unwrap(),
        json!("abcdef"),
        json!("abcdefgh"),
    );
    check(
        "pattern",
        node.materialize(StringKeywords {
            pattern: Some(r"\d{1,3}-\d{1,3}".into()),
            ..Default::default()
        })
        .unwrap(),
        json!("123-123"),
        json!("123-asd"),
    );
    check(
        "enum",
        node.materialize(StringKeywords {
            enum_values: Some(vec![json!("alubaba"), json!("robber")]),
            ..Default::default()
        })
        .unwrap(),
        json!("alubaba"),
        json!("haha"),
    );
}

#[test]
fn test_array_keywords() {
    let array = SchemaNode::array(ArrayKeywords::default());
    let cases = [
        (
            "items",
            ArrayKeywords {
                items: Some(string().into()),
                ..Default::default()
            },
            json!(["test1", "test2"]),
            json!([1, 2]),
        ),
        (
            "tuple items",
            ArrayKeywords {
                items: Some(json!([string(), integer(), SchemaNode::null()])),
                ..Default::default()
            },
            json!(["test1", 123, null]),
            json!([123, "test1", null]),
        ),
        (
            "additionalItems",
            ArrayKeywords {
                items: Some(json!([string(), integer()])),
                additional_items: Some(false.into()),
                ..Default::default()
            },
            json!(["test1", 123]),
            json!([123, "test1", null]),
        ),
        (
            "contains",
            ArrayKeywords {
                contains: Some(string().into()),
                ..Default::default()
            },
            json!(["test1", 123, null]),
            json!([123, 234, null]),
        ),
        (
            "item counts",
            ArrayKeywords {
                min_items: Some(1),
                max_items: Some(3),
                ..Default::default()
            },
            json!(["test1", 123, null]),
            json!([123, ["asd"], null, null]),
        ),
        (
            "uniqueItems",
            ArrayKeywords {
                unique_items: Some(true),
                ..Default::default()
            },
            json!([1, 2, 3, 4]),
            json!([1, 2, 2, 3]),
        ),
    ];
    for (label, keywords, positive, negative) in cases {
        check(label, array.materialize(keywords).unwrap(), positive, negative);
    }
}

#[test]
fn test_object_properties() {
    check(
        "properties",
        object(ObjectKeywords {
            properties: Some(int_props(&["test1"])),
            ..Default::default()
        }),
        json!({"test1": 1}),
        json!({"test1": "testing"}),
    );
    check(
        "additionalProperties",
        object(ObjectKeywords {
            properties: Some(int_props(&["test1"])),
            additional_properties: Some(false.into()),
            ..Default::default()
        }),
        json!({"test1": 1}),
        json!({"test1": 1, "test2": "testing"}),
    );
}

#[test]
fn test_object_required_all() {
    check(
        "required all",
        object(ObjectKeywords {
            properties: Some(int_props(&["test1", "test2"])),
            required: Some(true.into()),
            ..Default::default()
        }),
        json!({"test1": 1, "test2": 2}),
        json!({"test1": 1}),
    );
}

#[test]
fn test_object_required_some() {
    check(
        "required some",
        object(ObjectKeywords {
            properties: Some(int_props(&["test1", "test2"])),
            required: Some(["test1"].into()),
            ..Default::default()
        }),
        json!({"test1": 1}),
        json!({"test2": 2}),
    );
}

#[test]
fn test_object_any_of() {
    check(
        "anyOf",
        object(ObjectKeywords {
            properties: Some(int_props(&["test1", "test2", "test3"])),
            any_of: Some(vec!["test1".into(), "test2".into()]),
            ..Default::default()
        }),
        json!({"test1": 1, "test3": 3}),
        json!({"test3": 3}),
    );
}

#[test]
fn test_object_property_counts() {
    check(
        "property counts",
        object(ObjectKeywords {
            min_properties: Some(1),
            max_properties: Some(3),
            ..Default::default()
        }),
        json!({"test1": 1, "test2": 2}),
        json!({"test1": 1, "test2": 2, "test3": 3, "test4": 4}),
    );
}

#[test]
fn test_object_pattern_properties() {
    check(
        "patternProperties",
        object(ObjectKeywords {
            pattern_properties: Some(int_props(&[r"^test\d$"])),
            additional_properties: Some(false.into()),
            ..Default::default()
        }),
        json!({"test1": 1, "test2": 2}),
        json!({"test1": 1, "test2": 2, "test33": 3, "test44": 4}),
    );
}

#[test]
fn test_object_dependencies() {
    check(
        "dependencies",
        object(ObjectKeywords {
            properties: Some(int_props(&["test1", "test2", "test3"])),
            dependencies: Some(json!({"test3": ["test2"]})),
            required: Some(["test1"].into()),
            ..Default::default()
        }),
        json!({"test1": 1}),
        json!({"test1": 1, "test3": 3}),
    );
}

#[test]
fn test_object_multi_type_property() {
    check(
        "multi-type",
        object(ObjectKeywords {
            properties: Some(Properties::new().with(
                "id",
                vec![
                    integer(),
                    SchemaNode::string(StringKeywords {
                        min_length: Some(3),
                        ..Default::default()
                    }),
                ],
            )),
            ..Default::default()
        }),
        json!({"id": 42}),
        json!({"id": null}),
    );
}

#[test]
fn test_required_false_override_relaxes_schema() {
    let schema = ObjectSchema::new(ObjectKeywords {
        properties: Some(int_props(&["a"])),
        required: Some(Required::All),
        ..Default::default()
    })
    .unwrap();

    let strict = SchemaValidator::from_object("strict", &schema).unwrap();
    assert!(!strict.is_valid(&json!({})));

    let relaxed_doc = schema
        .materialize(ObjectKeywords {
            required: Some(Required::Suppress),
            ..Default::default()
        })
        .unwrap();
    let relaxed = SchemaValidator::new("relaxed", &relaxed_doc).unwrap();
    assert!(relaxed.is_valid(&json!({})));
}

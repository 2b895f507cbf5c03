//! Integration property tests for strong-arm.
//!
//! These tests validate whitelisting, presence and determinism invariants
//! across arbitrary payloads using property-based testing.

use proptest::prelude::*;
use serde_json::{json, Map, Value};
use strong_arm::{
    is_absent, ErrorKind, Flexer, NestedOptions, PermitOptions, Schema, SchemaRegistry,
};

const DECLARED: [&str; 4] = ["id", "title", "public", "note"];

fn registry() -> SchemaRegistry {
    SchemaRegistry::new()
        .with(
            Schema::builder("Post")
                .ignore(["created_at"])
                .permit("id")
                .unwrap()
                .permit("title")
                .unwrap()
                .permit("public")
                .unwrap()
                .permit_with("note", PermitOptions::allow_nil())
                .unwrap()
                .many_nested("comments")
                .one_nested_with("tag", NestedOptions::unformatted())
                .build(),
        )
        .with(Schema::builder("Comment").permit("text").unwrap().build())
        .with(Schema::builder("Tag").permit("id").unwrap().build())
}

// Strategy: Generate arbitrary scalar values, including falsy ones
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

// Strategy: Generate a payload over declared, ignored and nested keys
fn arb_valid_payload() -> impl Strategy<Value = Map<String, Value>> {
    (
        prop::collection::vec((prop::sample::select(DECLARED.to_vec()), arb_scalar()), 1..6),
        prop::collection::vec("[a-z]{1,8}", 0..4),
        prop::option::of(1i64..1000),
        any::<bool>(),
    )
        .prop_map(|(scalars, comments, tag_id, ignored)| {
            let mut map = Map::new();
            for (key, value) in scalars {
                map.insert(key.to_string(), value);
            }
            if !comments.is_empty() {
                let items: Vec<Value> = comments.into_iter().map(|t| json!({"text": t})).collect();
                map.insert("comments_attributes".to_string(), Value::Array(items));
            }
            if let Some(id) = tag_id {
                map.insert("tag".to_string(), json!({"id": id}));
            }
            if ignored {
                map.insert("created_at".to_string(), json!("2017-03-01"));
            }
            map
        })
}

// Strategy: Generate key names that no schema declares
fn arb_undeclared_key() -> impl Strategy<Value = String> {
    "[a-z]{3,10}".prop_filter("must not be declared or ignored", |k| {
        !DECLARED.contains(&k.as_str())
            && k != "created_at"
            && k != "tag"
            && k != "data"
            && k != "comments_attributes"
    })
}

proptest! {
    /// Property: flexing the same input twice gives the same result
    #[test]
    fn proptest_flex_is_deterministic(payload in arb_valid_payload()) {
        let registry = registry();
        let flexer = Flexer::new(&registry);
        let input = Value::Object(payload);

        let first = flexer.flex_named("Post", &input);
        let second = flexer.flex_named("Post", &input);

        prop_assert_eq!(first, second);
    }

    /// Property: output keys are always declared handler keys
    #[test]
    fn proptest_output_only_contains_declared_keys(payload in arb_valid_payload()) {
        let registry = registry();
        let schema = registry.resolve_schema("Post").unwrap();
        let output = Flexer::new(&registry)
            .flex(schema, &Value::Object(payload))
            .expect("payload only holds declared or ignored keys");

        for key in output.keys() {
            prop_assert!(schema.handler(key).is_some(), "undeclared key {} in output", key);
        }
        prop_assert!(!output.contains_key("created_at"));
    }

    /// Property: present scalar values are copied unchanged; absent ones are dropped
    #[test]
    fn proptest_scalars_are_copied_or_dropped(payload in arb_valid_payload()) {
        let registry = registry();
        let output = Flexer::new(&registry)
            .flex_named("Post", &Value::Object(payload.clone()))
            .unwrap();

        for key in DECLARED {
            let allow_nil = key == "note";
            match payload.get(key) {
                Some(value) if !is_absent(Some(value), allow_nil) => {
                    prop_assert_eq!(output.get(key), Some(value));
                }
                _ => prop_assert!(!output.contains_key(key)),
            }
        }
    }

    /// Property: any undeclared key fails the call and is named in the error
    #[test]
    fn proptest_undeclared_keys_are_rejected(
        payload in arb_valid_payload(),
        key in arb_undeclared_key(),
        value in arb_scalar(),
    ) {
        let mut payload = payload;
        payload.insert(key.clone(), value);

        let registry = registry();
        let err = Flexer::new(&registry)
            .flex_named("Post", &Value::Object(payload))
            .unwrap_err();

        prop_assert_eq!(err.kind(), ErrorKind::UnhandledKeys);
        prop_assert!(err.to_string().contains(&key));
    }

    /// Property: boolean values are never treated as absent
    #[test]
    fn proptest_booleans_are_present(flag in any::<bool>()) {
        let registry = registry();
        let output = Flexer::new(&registry)
            .flex_named("Post", &json!({"public": flag}))
            .unwrap();

        prop_assert_eq!(output.get("public"), Some(&Value::Bool(flag)));
    }
}

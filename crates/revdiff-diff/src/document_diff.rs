//! Document-level diff: compare two JSON object documents property by property.
//!
//! Key order follows each document's encounter order (the workspace enables
//! `serde_json/preserve_order`). Values are compared with deep equality, so
//! whitespace and key order never cause a difference while arrays compare
//! positionally.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::{DiffError, DiffResult, Side};
use crate::report::{DiffEntry, DiffReport};

/// How far the differencer descends into nested values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    /// Top-level properties only; nested objects and arrays are opaque values.
    #[default]
    Shallow,
    /// Descend into objects present on both sides, reporting dotted paths.
    /// Arrays are still compared whole. Keys that themselves contain `.` are
    /// written in double quotes (`config."log.level"`).
    Recursive,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffOptions {
    pub mode: DiffMode,
}

impl DiffOptions {
    pub fn recursive() -> Self {
        Self {
            mode: DiffMode::Recursive,
        }
    }
}

/// Parse raw file content as a JSON document.
pub fn parse_document(bytes: &[u8]) -> DiffResult<Value> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Compare two documents with the default (shallow) options.
pub fn diff_documents(old: &Value, new: &Value) -> DiffResult<DiffReport> {
    diff_documents_with(old, new, DiffOptions::default())
}

/// Compare two documents.
///
/// For each key of `old`: missing in `new` is `Removed`, present with a
/// different value (see [`values_equal`]) is `Changed`. Keys of `new`
/// missing from `old` are `Added` and follow all changed/removed entries of
/// the same object.
pub fn diff_documents_with(
    old: &Value,
    new: &Value,
    options: DiffOptions,
) -> DiffResult<DiffReport> {
    let old = as_object(old, Side::Old)?;
    let new = as_object(new, Side::New)?;

    let mut entries = Vec::new();
    diff_objects(None, old, new, options.mode, &mut entries);
    Ok(DiffReport::new(entries))
}

fn as_object(value: &Value, side: Side) -> DiffResult<&Map<String, Value>> {
    value.as_object().ok_or(DiffError::NotAnObject {
        side,
        found: value_kind(value),
    })
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn diff_objects(
    prefix: Option<&str>,
    old: &Map<String, Value>,
    new: &Map<String, Value>,
    mode: DiffMode,
    entries: &mut Vec<DiffEntry>,
) {
    // Removed and changed keys, in old's order.
    for (key, old_val) in old {
        let path = property_path(prefix, key, mode);
        match new.get(key) {
            None => entries.push(DiffEntry::removed(path, old_val.to_string())),
            Some(new_val) if values_equal(old_val, new_val) => {}
            Some(new_val) => match (mode, old_val, new_val) {
                (DiffMode::Recursive, Value::Object(old_obj), Value::Object(new_obj)) => {
                    diff_objects(Some(&path), old_obj, new_obj, mode, entries);
                }
                _ => entries.push(DiffEntry::changed(
                    path,
                    old_val.to_string(),
                    new_val.to_string(),
                )),
            },
        }
    }

    // Added keys, in new's order.
    for (key, new_val) in new {
        if !old.contains_key(key) {
            entries.push(DiffEntry::added(
                property_path(prefix, key, mode),
                new_val.to_string(),
            ));
        }
    }
}

fn property_path(prefix: Option<&str>, key: &str, mode: DiffMode) -> String {
    let key = if mode == DiffMode::Recursive && key.contains('.') {
        format!("\"{key}\"")
    } else {
        key.to_string()
    };
    match prefix {
        Some(prefix) => format!("{prefix}.{key}"),
        None => key,
    }
}

/// Deep equality where numbers compare by value, so `1`, `1.0` and `1e0`
/// are the same. Object key order is ignored, array order is not.
pub fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => numbers_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| values_equal(x, y))
        }
        (Value::Object(xs), Value::Object(ys)) => {
            xs.len() == ys.len()
                && xs
                    .iter()
                    .all(|(k, x)| ys.get(k).is_some_and(|y| values_equal(x, y)))
        }
        _ => a == b,
    }
}

fn numbers_equal(x: &Number, y: &Number) -> bool {
    if let (Some(x), Some(y)) = (x.as_i64(), y.as_i64()) {
        return x == y;
    }
    if let (Some(x), Some(y)) = (x.as_u64(), y.as_u64()) {
        return x == y;
    }
    match (x.as_f64(), y.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DiffKind;
    use serde_json::json;

    fn parse(text: &str) -> Value {
        parse_document(text.as_bytes()).unwrap()
    }

    #[test]
    fn identical_documents_no_diff() {
        let doc = json!({"a": 1, "b": "hello", "c": [1, 2], "d": {"e": null}});
        let report = diff_documents(&doc, &doc).unwrap();
        assert!(!report.has_differences());
    }

    #[test]
    fn end_to_end_changed_and_added() {
        let old = parse(r#"{"a":1,"b":2}"#);
        let new = parse(r#"{"a":1,"b":3,"c":4}"#);

        let report = diff_documents(&old, &new).unwrap();
        assert!(report.has_differences());
        assert_eq!(
            report.entries,
            vec![DiffEntry::changed("b", "2", "3"), DiffEntry::added("c", "4")]
        );
    }

    #[test]
    fn removed_key_carries_old_value() {
        let old = json!({"keep": true, "gone": {"x": 1}});
        let new = json!({"keep": true});

        let report = diff_documents(&old, &new).unwrap();
        assert_eq!(report.entries, vec![DiffEntry::removed("gone", r#"{"x":1}"#)]);
    }

    #[test]
    fn single_value_change_only_reports_that_key() {
        let old = json!({"a": 1, "b": "x", "c": [1]});
        let new = json!({"a": 1, "b": "y", "c": [1]});

        let report = diff_documents(&old, &new).unwrap();
        assert_eq!(report.len(), 1);
        let entry = &report.entries[0];
        assert_eq!(entry.property_path, "b");
        assert_eq!(entry.kind, DiffKind::Changed);
        assert_eq!(entry.old_value.as_deref(), Some("\"x\""));
        assert_eq!(entry.new_value.as_deref(), Some("\"y\""));
    }

    #[test]
    fn whitespace_and_key_order_are_ignored() {
        let old = parse(r#"{"a": {"x": 1, "y": 2}, "b": 3}"#);
        let new = parse("{\n  \"b\" : 3,\n  \"a\": {\"y\":2,\"x\":1}\n}");

        let report = diff_documents(&old, &new).unwrap();
        assert!(!report.has_differences());
    }

    #[test]
    fn arrays_compare_positionally() {
        let old = json!({"list": [1, 2, 3]});
        let new = json!({"list": [3, 2, 1]});

        let report = diff_documents(&old, &new).unwrap();
        assert_eq!(report.changes(), 1);
        assert_eq!(report.entries[0].old_value.as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn explicit_null_is_an_addition() {
        let old = json!({"a": 1});
        let new = json!({"a": 1, "b": null});

        let report = diff_documents(&old, &new).unwrap();
        assert_eq!(report.entries, vec![DiffEntry::added("b", "null")]);
    }

    #[test]
    fn null_to_value_is_a_change() {
        let old = json!({"nullable": null});
        let new = json!({"nullable": "set"});

        let report = diff_documents(&old, &new).unwrap();
        assert_eq!(
            report.entries,
            vec![DiffEntry::changed("nullable", "null", "\"set\"")]
        );
    }

    #[test]
    fn ordering_groups_old_keys_then_added_keys() {
        let old = parse(r#"{"z": 1, "m": 2, "a": 3}"#);
        let new = parse(r#"{"n2": 0, "a": 4, "n1": 0, "z": 1}"#);

        let report = diff_documents(&old, &new).unwrap();
        let paths: Vec<_> = report.entries.iter().map(|e| e.property_path.as_str()).collect();
        assert_eq!(paths, vec!["m", "a", "n2", "n1"]);
        assert_eq!(report.entries[0].kind, DiffKind::Removed);
        assert_eq!(report.entries[1].kind, DiffKind::Changed);
        assert_eq!(report.entries[2].kind, DiffKind::Added);
    }

    #[test]
    fn shallow_mode_treats_nested_objects_whole() {
        let old = json!({"config": {"debug": false, "port": 8080}});
        let new = json!({"config": {"debug": true, "port": 8080}});

        let report = diff_documents(&old, &new).unwrap();
        assert_eq!(
            report.entries,
            vec![DiffEntry::changed(
                "config",
                r#"{"debug":false,"port":8080}"#,
                r#"{"debug":true,"port":8080}"#
            )]
        );
    }

    #[test]
    fn recursive_mode_reports_dotted_paths() {
        let old = json!({"config": {"debug": false, "port": 8080, "db": {"host": "a"}}, "v": 1});
        let new = json!({"config": {"debug": true, "port": 8080, "db": {"host": "b", "pool": 4}}, "v": 1});

        let report = diff_documents_with(&old, &new, DiffOptions::recursive()).unwrap();
        assert_eq!(
            report.entries,
            vec![
                DiffEntry::changed("config.debug", "false", "true"),
                DiffEntry::changed("config.db.host", "\"a\"", "\"b\""),
                DiffEntry::added("config.db.pool", "4"),
            ]
        );
    }

    #[test]
    fn recursive_mode_keeps_arrays_and_type_changes_whole() {
        let old = json!({"a": [{"x": 1}], "b": {"x": 1}});
        let new = json!({"a": [{"x": 2}], "b": "flat"});

        let report = diff_documents_with(&old, &new, DiffOptions::recursive()).unwrap();
        let paths: Vec<_> = report.entries.iter().map(|e| e.property_path.as_str()).collect();
        assert_eq!(paths, vec!["a", "b"]);
        assert_eq!(report.changes(), 2);
    }

    #[test]
    fn numbers_compare_by_value() {
        let old = parse(r#"{"timeout":1,"ratio":100,"limits":[2,{"max":5}],"big":18446744073709551615}"#);
        let new = parse(r#"{"timeout":1.0,"ratio":1e2,"limits":[2.0,{"max":5e0}],"big":18446744073709551615}"#);

        assert!(!diff_documents(&old, &new).unwrap().has_differences());
        assert!(!diff_documents_with(&old, &new, DiffOptions::recursive())
            .unwrap()
            .has_differences());
    }

    #[test]
    fn distinct_numbers_still_differ() {
        let old = parse(r#"{"n":1,"m":-1,"f":0.5}"#);
        let new = parse(r#"{"n":1.5,"m":18446744073709551615,"f":0.25}"#);

        let report = diff_documents(&old, &new).unwrap();
        assert_eq!(report.changes(), 3);
        assert!(!values_equal(&json!("1"), &json!(1)));
    }

    #[test]
    fn recursive_mode_quotes_dotted_keys() {
        let old = json!({"a.b": 1, "a": {"b": 1, "c.d": true}});
        let new = json!({"a.b": 2, "a": {"b": 2, "c.d": false}});

        let report = diff_documents_with(&old, &new, DiffOptions::recursive()).unwrap();
        let paths: Vec<_> = report.entries.iter().map(|e| e.property_path.as_str()).collect();
        assert_eq!(paths, vec![r#""a.b""#, "a.b", r#"a."c.d""#]);

        let shallow = diff_documents(&old, &new).unwrap();
        assert_eq!(shallow.entries[0].property_path, "a.b");
    }

    #[test]
    fn non_object_documents_are_rejected() {
        let err = diff_documents(&json!([1, 2]), &json!({})).unwrap_err();
        assert!(matches!(
            err,
            DiffError::NotAnObject { side: Side::Old, found: "array" }
        ));
        let err = diff_documents(&json!({}), &json!("text")).unwrap_err();
        assert!(matches!(err, DiffError::NotAnObject { side: Side::New, .. }));
    }

    #[test]
    fn invalid_bytes_fail_to_parse() {
        assert!(matches!(
            parse_document(b"{not json"),
            Err(DiffError::InvalidJson(_))
        ));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        fn leaf() -> impl Strategy<Value = Value> {
            prop_oneof![
                Just(Value::Null),
                any::<bool>().prop_map(Value::Bool),
                any::<i64>().prop_map(|n| json!(n)),
                "[a-z]{0,6}".prop_map(Value::String),
            ]
        }

        fn value() -> impl Strategy<Value = Value> {
            leaf().prop_recursive(3, 16, 4, |inner| {
                prop_oneof![
                    proptest::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                    proptest::collection::vec(("[a-z]{1,4}", inner), 0..4)
                        .prop_map(|pairs| Value::Object(pairs.into_iter().collect())),
                ]
            })
        }

        fn document() -> impl Strategy<Value = Vec<(String, Value)>> {
            proptest::collection::btree_map("[a-z]{1,6}", value(), 0..8)
                .prop_map(|map| map.into_iter().collect())
        }

        fn object(pairs: impl IntoIterator<Item = (String, Value)>) -> Value {
            Value::Object(pairs.into_iter().collect())
        }

        proptest! {
            #[test]
            fn self_diff_is_empty(pairs in document()) {
                let doc = object(pairs);
                let report = diff_documents(&doc, &doc).unwrap();
                prop_assert!(!report.has_differences());
            }

            #[test]
            fn insertion_order_does_not_matter(pairs in document()) {
                let forward = object(pairs.clone());
                let backward = object(pairs.into_iter().rev());
                prop_assert!(diff_documents(&forward, &backward).unwrap().is_empty());
                prop_assert!(
                    diff_documents_with(&forward, &backward, DiffOptions::recursive())
                        .unwrap()
                        .is_empty()
                );
            }

            #[test]
            fn extra_key_is_single_addition(pairs in document(), extra in value()) {
                let old = object(pairs.clone());
                let mut new_pairs = pairs;
                new_pairs.push(("__extra".to_string(), extra.clone()));
                let new = object(new_pairs);

                let report = diff_documents(&old, &new).unwrap();
                prop_assert_eq!(report.entries, vec![DiffEntry::added("__extra", extra.to_string())]);
            }

            #[test]
            fn missing_key_is_single_removal(pairs in document(), extra in value()) {
                let mut old_pairs = pairs.clone();
                old_pairs.push(("__gone".to_string(), extra.clone()));
                let old = object(old_pairs);
                let new = object(pairs);

                let report = diff_documents(&old, &new).unwrap();
                prop_assert_eq!(report.entries, vec![DiffEntry::removed("__gone", extra.to_string())]);
            }

            #[test]
            fn number_spelling_does_not_matter(
                numbers in proptest::collection::btree_map("[a-z]{1,6}", -1_000_000i64..1_000_000, 0..8),
                exponent in any::<bool>(),
            ) {
                let plain: Vec<String> = numbers.iter().map(|(k, n)| format!("\"{k}\":{n}")).collect();
                let spelled: Vec<String> = numbers
                    .iter()
                    .map(|(k, n)| {
                        if exponent {
                            format!("\"{k}\":{n}e0")
                        } else {
                            format!("\"{k}\":{n}.0")
                        }
                    })
                    .collect();
                let old = parse(&format!("{{{}}}", plain.join(",")));
                let new = parse(&format!("{{{}}}", spelled.join(",")));
                prop_assert!(diff_documents(&old, &new).unwrap().is_empty());
            }

            #[test]
            fn diff_is_deterministic(a in document(), b in document()) {
                let (old, new) = (object(a), object(b));
                let first = diff_documents(&old, &new).unwrap();
                let second = diff_documents(&old, &new).unwrap();
                prop_assert_eq!(first, second);
            }
        }
    }
}

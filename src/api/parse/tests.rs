//! Unit tests for response normalization and the object mapper

use super::*;
use serde_json::json;

use crate::error::YahooError;

#[test]
fn test_get_value_bare_primitives() {
    assert_eq!(get_value(&json!("hello")).unwrap(), &json!("hello"));
    assert_eq!(get_value(&json!(12)).unwrap(), &json!(12));
    assert_eq!(get_value(&json!(true)).unwrap(), &json!(true));
}

#[test]
fn test_get_value_wrapped_scalar() {
    let node = json!({"$": "4", "unit": "week"});
    assert_eq!(get_value(&node).unwrap(), &json!("4"));
}

#[test]
fn test_get_value_is_idempotent_on_bare_values() {
    let bare = json!("already bare");
    let once = get_value(&bare).unwrap();
    let twice = get_value(once).unwrap();
    assert_eq!(twice, &bare);
}

#[test]
fn test_get_value_mapping_without_value_key() {
    let node = json!({"count": "3"});
    match get_value(&node) {
        Err(YahooError::MalformedResponse { .. }) => (),
        other => panic!("Expected MalformedResponse, got {:?}", other),
    }
}

#[test]
fn test_as_list_single_mapping() {
    let node = json!({"team_id": {"$": "1"}});
    let list = as_list(&node);
    assert_eq!(list, vec![&node]);
}

#[test]
fn test_as_list_preserves_sequence_order() {
    let node = json!([{"pick": "1"}, {"pick": "2"}, {"pick": "3"}]);
    let list = as_list(&node);
    assert_eq!(list.len(), 3);
    assert_eq!(list[0], &json!({"pick": "1"}));
    assert_eq!(list[2], &json!({"pick": "3"}));
}

#[test]
fn test_as_list_null_is_empty() {
    assert!(as_list(&json!(null)).is_empty());
}

#[test]
fn test_list_at_absent_key_is_empty() {
    // An empty league renders its teams container with only a count.
    let node = json!({"count": "0"});
    assert!(list_at(&node, "team").is_empty());
}

#[test]
fn test_pluck_walks_nested_path() {
    let body = json!({"fantasy_content": {"league": {"name": "Test League"}}});
    let node = pluck(&body, &["fantasy_content", "league", "name"]).unwrap();
    assert_eq!(node, &json!("Test League"));
}

#[test]
fn test_pluck_names_missing_segment() {
    let body = json!({"fantasy_content": {}});
    let err = pluck(&body, &["fantasy_content", "league", "teams"]).unwrap_err();
    assert!(err.to_string().contains("`league`"));
}

#[test]
fn test_coercions_accept_string_encodings() {
    assert_eq!(coerce_u32(&json!("12")), Some(12));
    assert_eq!(coerce_u32(&json!(12)), Some(12));
    assert_eq!(coerce_i64(&json!("-3")), Some(-3));
    assert_eq!(coerce_f64(&json!("101.38")), Some(101.38));
    assert_eq!(coerce_f64(&json!(101.38)), Some(101.38));
    assert_eq!(coerce_bool(&json!("1")), Some(true));
    assert_eq!(coerce_bool(&json!(0)), Some(false));
    assert_eq!(coerce_bool(&json!(true)), Some(true));
    assert_eq!(coerce_str(&json!(7)), Some("7".to_string()));
    assert_eq!(coerce_u32(&json!("not a number")), None);
}

/// Minimal entity for exercising the mapper directly.
#[derive(Debug, Default)]
struct Probe {
    a: Option<String>,
    c: Option<u32>,
    children: Vec<String>,
    raw: Option<Value>,
}

const PROBE_FIELDS: &[FieldSpec] = &[
    FieldSpec::scalar("a"),
    FieldSpec::scalar("c"),
    FieldSpec::nested_list("children"),
];

impl ResponseSchema for Probe {
    fn fields() -> &'static [FieldSpec] {
        PROBE_FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        match (key, value) {
            ("a", FieldValue::Scalar(v)) => self.a = coerce_str(v),
            ("c", FieldValue::Scalar(v)) => self.c = coerce_u32(v),
            ("children", FieldValue::Fragments(items)) => {
                for item in items {
                    if let Some(name) = item.get("name").and_then(coerce_str) {
                        self.children.push(name);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn set_raw(&mut self, fragment: &Value) {
        self.raw = Some(fragment.clone());
    }
}

#[derive(Debug, Default)]
struct StrictProbe {
    inner: Option<String>,
}

const STRICT_FIELDS: &[FieldSpec] = &[FieldSpec::nested("inner").required()];

impl ResponseSchema for StrictProbe {
    fn fields() -> &'static [FieldSpec] {
        STRICT_FIELDS
    }

    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()> {
        if let ("inner", FieldValue::Fragment(node)) = (key, value) {
            self.inner = node.get("name").and_then(coerce_str);
        }
        Ok(())
    }
}

#[test]
fn test_mapper_assigns_declared_keys_and_ignores_unknown() {
    // Fragment carries {a, b, c}; the schema declares {a, c}.
    let fragment = json!({"a": {"$": "alpha"}, "b": "ignored", "c": "42"});
    let mut probe = Probe::default();
    map_response(&mut probe, &fragment, false).unwrap();

    assert_eq!(probe.a.as_deref(), Some("alpha"));
    assert_eq!(probe.c, Some(42));
    assert!(probe.children.is_empty());
}

#[test]
fn test_mapper_skips_absent_optional_fields() {
    let fragment = json!({"c": "7"});
    let mut probe = Probe::default();
    map_response(&mut probe, &fragment, false).unwrap();

    assert_eq!(probe.a, None);
    assert_eq!(probe.c, Some(7));
}

#[test]
fn test_mapper_shape_invariance_for_repeated_fields() {
    // One child as a single mapping vs a one-element sequence must map to
    // the same entity.
    let as_mapping = json!({"children": {"name": "only"}});
    let as_sequence = json!({"children": [{"name": "only"}]});

    let mut from_mapping = Probe::default();
    map_response(&mut from_mapping, &as_mapping, false).unwrap();
    let mut from_sequence = Probe::default();
    map_response(&mut from_sequence, &as_sequence, false).unwrap();

    assert_eq!(from_mapping.children, vec!["only".to_string()]);
    assert_eq!(from_mapping.children, from_sequence.children);
}

#[test]
fn test_mapper_repeated_field_many_items() {
    let fragment = json!({"children": [{"name": "a"}, {"name": "b"}]});
    let mut probe = Probe::default();
    map_response(&mut probe, &fragment, false).unwrap();

    assert_eq!(probe.children, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn test_mapper_retain_raw() {
    let fragment = json!({"a": "x", "unmodeled": "still reachable"});
    let mut probe = Probe::default();
    map_response(&mut probe, &fragment, true).unwrap();

    assert_eq!(probe.raw, Some(fragment));
}

#[test]
fn test_mapper_without_retain_raw_keeps_nothing() {
    let fragment = json!({"a": "x"});
    let mut probe = Probe::default();
    map_response(&mut probe, &fragment, false).unwrap();

    assert!(probe.raw.is_none());
}

#[test]
fn test_mapper_required_nested_field_present() {
    let fragment = json!({"inner": {"name": "X"}});
    let mut probe = StrictProbe::default();
    map_response(&mut probe, &fragment, false).unwrap();
    assert_eq!(probe.inner.as_deref(), Some("X"));
}

#[test]
fn test_mapper_missing_required_nested_field_errors() {
    let fragment = json!({"something_else": 1});
    let err = map_response(&mut StrictProbe::default(), &fragment, false).unwrap_err();

    match err {
        YahooError::MalformedResponse { context } => assert!(context.contains("`inner`")),
        other => panic!("Expected MalformedResponse, got {:?}", other),
    }
}

#[test]
fn test_mapper_rejects_non_mapping_fragment() {
    let err = map_response(&mut Probe::default(), &json!([1, 2]), false).unwrap_err();
    match err {
        YahooError::MalformedResponse { context } => assert!(context.contains("array")),
        other => panic!("Expected MalformedResponse, got {:?}", other),
    }
}

#[test]
fn test_mapper_malformed_scalar_inside_fragment() {
    // Declared scalar `a` is a mapping with no `$` value slot.
    let fragment = json!({"a": {"count": 2}});
    let result = map_response(&mut Probe::default(), &fragment, false);
    assert!(matches!(
        result,
        Err(YahooError::MalformedResponse { .. })
    ));
}

#[test]
fn test_from_fragment_builds_defaulted_entity() {
    let probe: Probe = from_fragment(&json!({"a": "alpha"})).unwrap();
    assert_eq!(probe.a.as_deref(), Some("alpha"));
    assert_eq!(probe.c, None);
}

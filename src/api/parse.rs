//! Response normalization and object mapping.
//!
//! Yahoo's JSON payloads are a mechanical conversion of an XML schema, which
//! leaves two shape irregularities the rest of the crate must never see:
//!
//! - a repeatable element arrives as a single object when there is exactly
//!   one instance and as an array when there are many;
//! - a scalar arrives either bare or wrapped as `{"$": value}` with optional
//!   sibling attribute keys.
//!
//! [`get_value`] and [`as_list`] absorb those two conventions, and
//! [`map_response`] populates a target entity from a response fragment by
//! consulting the entity's declared field table ([`ResponseSchema`]).

use serde_json::Value;

use crate::error::{Result, YahooError};

#[cfg(test)]
mod tests;

/// Key under which the XML-to-JSON conversion stores a wrapped scalar value.
pub const VALUE_KEY: &str = "$";

/// Extract the scalar value from a response node.
///
/// Bare primitives are returned unchanged, so callers may apply this
/// speculatively. A mapping is expected to carry the `$` value key; a mapping
/// without one is a scalar access against a non-scalar node.
pub fn get_value(node: &Value) -> Result<&Value> {
    match node {
        Value::Object(map) => map.get(VALUE_KEY).ok_or_else(|| {
            YahooError::malformed(format!(
                "expected a scalar node but the mapping has no `{VALUE_KEY}` value key"
            ))
        }),
        other => Ok(other),
    }
}

/// Coerce a one-or-many response node into a uniform ordered sequence.
///
/// `Null` normalizes to an empty sequence, an array is passed through with
/// its order preserved (element order is meaningful, e.g. draft order), and
/// any other node becomes a one-element sequence. This is the only place in
/// the crate that inspects one-vs-many shape.
pub fn as_list(node: &Value) -> Vec<&Value> {
    match node {
        Value::Null => Vec::new(),
        Value::Array(items) => items.iter().collect(),
        other => vec![other],
    }
}

/// Normalized sequence lookup: the repeated items under `key`, or an empty
/// sequence when the key is absent (e.g. a `teams` container holding only a
/// count for an empty league).
pub fn list_at<'a>(node: &'a Value, key: &str) -> Vec<&'a Value> {
    node.get(key).map(as_list).unwrap_or_default()
}

/// Navigate a response body along a fixed key path.
///
/// Yahoo nests every payload under `fantasy_content` and the resource
/// hierarchy; a missing segment means the response does not have the shape
/// the caller queried for.
pub fn pluck<'a>(body: &'a Value, path: &[&str]) -> Result<&'a Value> {
    let mut node = body;
    for segment in path {
        node = node.get(segment).ok_or_else(|| {
            YahooError::malformed(format!(
                "response has no `{}` node (while walking `{}`)",
                segment,
                path.join("/")
            ))
        })?;
    }
    Ok(node)
}

// The conversion renders numbers and flags as JSON strings as often as
// natives, so scalar coercions accept both encodings.

pub fn coerce_str(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

pub fn coerce_u32(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn coerce_i64(v: &Value) -> Option<i64> {
    match v {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn coerce_f64(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

pub fn coerce_bool(v: &Value) -> Option<bool> {
    match v {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => match s.as_str() {
            "1" | "true" => Some(true),
            "0" | "false" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// How a mapper-assignable field is shaped in the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A scalar node, run through [`get_value`] before assignment.
    Scalar,
    /// A nested entity fragment, assigned as-is for recursive mapping.
    Nested,
    /// A repeatable nested entity, run through [`as_list`] before assignment.
    NestedList,
}

/// One row of an entity's field table: the response key to match, the shape
/// to normalize it to, and whether its absence is an error.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn scalar(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Scalar,
            required: false,
        }
    }

    pub const fn nested(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::Nested,
            required: false,
        }
    }

    pub const fn nested_list(key: &'static str) -> Self {
        Self {
            key,
            kind: FieldKind::NestedList,
            required: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// A normalized field value handed to [`ResponseSchema::assign`]. The
/// variant always matches the [`FieldKind`] declared for the key.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    Scalar(&'a Value),
    Fragment(&'a Value),
    Fragments(Vec<&'a Value>),
}

/// An entity that can be populated from a response fragment.
///
/// The field table makes each entity's contract statically inspectable:
/// which response keys it consumes, how they are shaped, and which of them
/// are mandatory. Keys present in a fragment but not declared here are
/// ignored, since the remote schema evolves independently of the client.
pub trait ResponseSchema {
    /// Field table consulted by [`map_response`].
    fn fields() -> &'static [FieldSpec];

    /// Assign one normalized field. `key` is always one of [`fields`]
    /// (`ResponseSchema::fields`) and `value` matches its declared kind.
    fn assign(&mut self, key: &str, value: FieldValue<'_>) -> Result<()>;

    /// Retain the untouched source fragment, for callers that need response
    /// keys the field table does not model. Only invoked when mapping with
    /// `retain_raw`.
    fn set_raw(&mut self, _fragment: &Value) {}
}

/// Populate `target` in place from a response fragment.
///
/// For every declared field present in the fragment, the value is normalized
/// per its [`FieldKind`] and handed to the entity's `assign`. An absent
/// optional field is skipped (endpoints return overlapping but non-identical
/// field sets for the same conceptual entity); an absent required field is a
/// `MalformedResponse` error.
pub fn map_response<T: ResponseSchema>(
    target: &mut T,
    fragment: &Value,
    retain_raw: bool,
) -> Result<()> {
    let obj = fragment.as_object().ok_or_else(|| {
        YahooError::malformed(format!(
            "expected a mapping fragment, got a {} node",
            value_kind(fragment)
        ))
    })?;

    for spec in T::fields() {
        match obj.get(spec.key) {
            Some(node) => {
                let value = match spec.kind {
                    FieldKind::Scalar => FieldValue::Scalar(get_value(node)?),
                    FieldKind::Nested => FieldValue::Fragment(node),
                    FieldKind::NestedList => FieldValue::Fragments(as_list(node)),
                };
                target.assign(spec.key, value)?;
            }
            None if spec.required => {
                return Err(YahooError::malformed(format!(
                    "required field `{}` is absent from the fragment",
                    spec.key
                )));
            }
            None => {}
        }
    }

    if retain_raw {
        target.set_raw(fragment);
    }

    Ok(())
}

/// Construct a defaulted entity and populate it from `fragment`.
pub fn from_fragment<T: ResponseSchema + Default>(fragment: &Value) -> Result<T> {
    let mut target = T::default();
    map_response(&mut target, fragment, false)?;
    Ok(target)
}

fn value_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

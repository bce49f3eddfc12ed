//! Value model accepted by the logger.
//!
//! A [`Value`] is an owned tree of scalars, sequences, mappings and sets.
//! Callers build it directly, through the `From` conversions below, or from
//! a `serde_json::Value`. The formatter dispatches on the variant tag only.
//!
//! [`Payload`] is what the logging calls take. Plain text and batches of
//! messages are distinct variants, so whether a call is "one structured value"
//! or "several messages" is fixed when the payload is built.

use std::collections::HashSet;
use std::fmt;

use indexmap::IndexMap;

/// A leaf value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl Scalar {
    pub fn is_str(&self) -> bool {
        matches!(self, Scalar::Str(_))
    }
}

impl fmt::Display for Scalar {
    /// Literal form: strings unquoted, floats always carry a fractional part.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Str(s) => f.write_str(s),
            Scalar::Int(i) => write!(f, "{}", i),
            Scalar::Float(x) if x.is_nan() => f.write_str("NaN"),
            Scalar::Float(x) if x.is_infinite() => {
                f.write_str(if *x > 0.0 { "inf" } else { "-inf" })
            }
            Scalar::Float(x) if x.fract() == 0.0 => write!(f, "{:.1}", x),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => f.write_str("null"),
        }
    }
}

/// Ordered key/value pairs with unique keys.
///
/// Two mappings are equal only when their pairs match in the same order.
#[derive(Debug, Clone, Default)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert a pair. An existing key keeps its position and gets the new
    /// value; the previous value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl PartialEq for Mapping {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.entries.iter().eq(other.entries.iter())
    }
}

impl<K, V> FromIterator<(K, V)> for Mapping
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A node of a loggable value tree.
///
/// Values are owned trees, so a cycle cannot be expressed. Nesting depth is
/// not bounded; very deep trees recurse accordingly when rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(Scalar),
    Sequence(Vec<Value>),
    Mapping(Mapping),
    /// Unordered and duplicate-free. Rendered in a canonical order.
    Set(Vec<Value>),
}

impl Value {
    pub fn null() -> Self {
        Value::Scalar(Scalar::Null)
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Scalar(Scalar::Str(s.into()))
    }

    pub fn seq<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Value::Sequence(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Mapping(pairs.into_iter().collect())
    }

    /// Build a set, dropping members identical to one already present.
    ///
    /// Members are compared by their `Debug` form, which tells variants apart
    /// (`1` and `"1"` are distinct) and treats every NaN as one member.
    pub fn set<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let mut seen = HashSet::new();
        let members = items
            .into_iter()
            .map(Into::into)
            .filter(|item: &Value| seen.insert(format!("{:?}", item)))
            .collect();
        Value::Set(members)
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Value::Scalar(_))
    }

    /// The elements as strings when this is a non-empty sequence made only of
    /// string scalars.
    pub fn as_messages(&self) -> Option<Vec<String>> {
        let Value::Sequence(items) = self else {
            return None;
        };
        if items.is_empty() {
            return None;
        }
        items
            .iter()
            .map(|item| match item {
                Value::Scalar(Scalar::Str(s)) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        Value::Scalar(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::str(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Scalar(Scalar::Bool(b))
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Scalar(Scalar::Int(i.into()))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Scalar(Scalar::Int(i))
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Scalar(Scalar::Int(i.into()))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Scalar(Scalar::Float(x))
    }
}

impl From<Mapping> for Value {
    fn from(m: Mapping) -> Self {
        Value::Mapping(m)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or_else(Value::null)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::seq(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match json {
            Json::Null => Value::null(),
            Json::Bool(b) => b.into(),
            Json::Number(n) => match n.as_i64() {
                Some(i) => i.into(),
                // u64 beyond i64::MAX and every non-integer land here
                None => n.as_f64().map(Value::from).unwrap_or_else(Value::null),
            },
            Json::String(s) => s.into(),
            Json::Array(items) => Value::seq(items),
            Json::Object(obj) => {
                let mut mapping = Mapping::with_capacity(obj.len());
                mapping.entries.extend(obj.into_iter().map(|(k, v)| (k, v.into())));
                Value::Mapping(mapping)
            }
        }
    }
}

/// What a logging call accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// A single message, logged verbatim.
    Text(String),
    /// Several messages, each logged as its own entry.
    Messages(Vec<String>),
    /// A structured value rendered by the formatter.
    Value(Value),
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload::Text(s)
    }
}

impl From<&String> for Payload {
    fn from(s: &String) -> Self {
        Payload::Text(s.clone())
    }
}

impl From<Vec<String>> for Payload {
    fn from(messages: Vec<String>) -> Self {
        Payload::Messages(messages)
    }
}

impl From<Vec<&str>> for Payload {
    fn from(messages: Vec<&str>) -> Self {
        Payload::Messages(messages.into_iter().map(str::to_string).collect())
    }
}

impl From<Value> for Payload {
    /// A string scalar becomes `Text` and a sequence of only strings becomes
    /// `Messages`; everything else stays structured.
    fn from(value: Value) -> Self {
        if let Value::Scalar(Scalar::Str(s)) = value {
            return Payload::Text(s);
        }
        match value.as_messages() {
            Some(messages) => Payload::Messages(messages),
            None => Payload::Value(value),
        }
    }
}

impl From<Mapping> for Payload {
    fn from(m: Mapping) -> Self {
        Payload::Value(Value::Mapping(m))
    }
}

impl From<serde_json::Value> for Payload {
    fn from(json: serde_json::Value) -> Self {
        Value::from(json).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_literals() {
        assert_eq!(Scalar::Str("hi".into()).to_string(), "hi");
        assert_eq!(Scalar::Int(-7).to_string(), "-7");
        assert_eq!(Scalar::Float(1.0).to_string(), "1.0");
        assert_eq!(Scalar::Float(2.5).to_string(), "2.5");
        assert_eq!(Scalar::Float(1e16).to_string(), "10000000000000000.0");
        assert_eq!(Scalar::Float(-3e20).to_string(), "-300000000000000000000.0");
        assert_eq!(Scalar::Float(f64::NAN).to_string(), "NaN");
        assert_eq!(Scalar::Float(f64::NEG_INFINITY).to_string(), "-inf");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Null.to_string(), "null");
    }

    #[test]
    fn test_mapping_insert_keeps_keys_unique() {
        let mut m = Mapping::new();
        assert!(m.insert("a", 1).is_none());
        m.insert("b", 2);
        let old = m.insert("a", 3);

        assert_eq!(old, Some(Value::from(1)));
        assert_eq!(m.len(), 2);
        let keys: Vec<_> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(m.get("a"), Some(&Value::from(3)));
    }

    #[test]
    fn test_set_drops_duplicates() {
        let set = Value::set(vec![1, 2, 1, 3, 2]);
        assert_eq!(set, Value::Set(vec![1.into(), 2.into(), 3.into()]));

        let mixed = Value::set(vec![Value::from(1), Value::from("1"), Value::from(1)]);
        assert_eq!(mixed, Value::Set(vec![1.into(), "1".into()]));
    }

    #[test]
    fn test_mapping_collect_keeps_first_position() {
        let m: Mapping = vec![("b", 1), ("a", 2), ("b", 3)].into_iter().collect();
        let pairs: Vec<_> = m.iter().map(|(k, v)| (k, v.clone())).collect();
        assert_eq!(pairs, vec![("b", Value::from(3)), ("a", Value::from(2))]);
    }

    #[test]
    fn test_json_object_keeps_key_order() {
        let value = Value::from(serde_json::json!({"zeta": 1, "alpha": 2, "mid": {"y": 1, "x": 2}}));
        let Value::Mapping(m) = &value else {
            panic!("expected mapping");
        };
        let keys: Vec<_> = m.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(
            crate::format::render(&value, 80),
            "{zeta: 1, alpha: 2, mid: {y: 1, x: 2}}"
        );

        let parsed: serde_json::Value = serde_json::from_str(r#"{"z": 1, "a": 2}"#).unwrap();
        assert_eq!(crate::format::render(&parsed.into(), 80), "{z: 1, a: 2}");
    }

    #[test]
    fn test_large_json_object_converts() {
        let obj: serde_json::Map<String, serde_json::Value> = (0..50_000)
            .map(|i| (format!("key{}", i), serde_json::Value::from(i)))
            .collect();
        let Value::Mapping(m) = Value::from(serde_json::Value::Object(obj)) else {
            panic!("expected mapping");
        };
        assert_eq!(m.len(), 50_000);
        assert_eq!(m.iter().next().map(|(k, _)| k), Some("key0"));
        assert_eq!(m.get("key49999"), Some(&Value::from(49_999)));
    }

    #[test]
    fn test_as_messages() {
        assert_eq!(
            Value::seq(vec!["a", "b"]).as_messages(),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(Value::seq(vec![Value::from("a"), 1.into()]).as_messages(), None);
        assert_eq!(Value::Sequence(vec![]).as_messages(), None);
        assert_eq!(Value::from("a").as_messages(), None);
    }

    #[test]
    fn test_payload_promotion() {
        assert_eq!(Payload::from(Value::from("x")), Payload::Text("x".into()));
        assert_eq!(
            Payload::from(Value::seq(vec!["x", "y"])),
            Payload::Messages(vec!["x".into(), "y".into()])
        );
        assert!(matches!(
            Payload::from(Value::seq(vec![1, 2])),
            Payload::Value(Value::Sequence(_))
        ));
        assert!(matches!(
            Payload::from(Value::Sequence(vec![])),
            Payload::Value(Value::Sequence(_))
        ));
    }

    #[test]
    fn test_from_json() {
        let json = serde_json::json!({
            "name": "node",
            "port": 8080,
            "ratio": 0.5,
            "tags": ["a", "b"],
            "extra": null,
            "big": u64::MAX,
        });

        let Value::Mapping(m) = Value::from(json) else {
            panic!("expected mapping");
        };
        assert_eq!(m.get("name"), Some(&Value::from("node")));
        assert_eq!(m.get("port"), Some(&Value::from(8080)));
        assert_eq!(m.get("ratio"), Some(&Value::from(0.5)));
        assert_eq!(m.get("tags"), Some(&Value::seq(vec!["a", "b"])));
        assert_eq!(m.get("extra"), Some(&Value::null()));
        assert!(matches!(
            m.get("big"),
            Some(Value::Scalar(Scalar::Float(_)))
        ));
    }

    #[test]
    fn test_json_string_array_is_messages() {
        let payload = Payload::from(serde_json::json!(["one", "two", "three"]));
        assert_eq!(
            payload,
            Payload::Messages(vec!["one".into(), "two".into(), "three".into()])
        );
    }
}

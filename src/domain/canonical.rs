//! Canonical encoding of gateway parameters.
//!
//! Both the signing side and the verification side go through
//! [`CanonicalParameterSet`], so sorting, empty-value removal and percent-encoding
//! can never diverge between them.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;

/// Bytes left literal by the gateway's form encoding. Everything else, `*` and
/// `~` included, is percent-encoded; space becomes `+`.
const FORM_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

/// A loosely-typed parameter value, resolved to a string only at the encoding
/// boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Number(Number),
    Bool(bool),
    Null,
    Array(Vec<ParamValue>),
    Object(BTreeMap<String, ParamValue>),
}

impl ParamValue {
    /// Renders the value the way it is signed. `None` means the entry is dropped.
    pub fn render(&self) -> Option<String> {
        match self {
            ParamValue::Null => None,
            ParamValue::String(s) if s.is_empty() => None,
            ParamValue::String(s) => Some(s.clone()),
            ParamValue::Number(n) => Some(n.to_string()),
            ParamValue::Bool(true) => Some("1".to_string()),
            ParamValue::Bool(false) => Some("0".to_string()),
            ParamValue::Array(_) | ParamValue::Object(_) => {
                serde_json::to_string(&self.to_json()).ok()
            }
        }
    }

    fn to_json(&self) -> Value {
        match self {
            ParamValue::String(s) => Value::String(s.clone()),
            ParamValue::Number(n) => Value::Number(n.clone()),
            ParamValue::Bool(b) => Value::Bool(*b),
            ParamValue::Null => Value::Null,
            ParamValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            ParamValue::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::String(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::String(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value.into())
    }
}

impl From<u64> for ParamValue {
    fn from(value: u64) -> Self {
        ParamValue::Number(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(ParamValue::Null, ParamValue::Number)
    }
}

impl<T: Into<ParamValue>> From<Option<T>> for ParamValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ParamValue::Null, Into::into)
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => ParamValue::Null,
            Value::Bool(b) => ParamValue::Bool(b),
            Value::Number(n) => ParamValue::Number(n),
            Value::String(s) => ParamValue::String(s),
            Value::Array(items) => ParamValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(fields) => {
                ParamValue::Object(fields.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

/// The two renderings produced by one traversal of a parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedParams {
    /// Bytes the signature is computed over; no trailing separator.
    pub hash_payload: String,
    /// Same entries with a trailing `&`, ready for the signature parameter.
    pub query_string: String,
}

/// Parameters sorted by key bytes with null and empty values already removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalParameterSet {
    entries: BTreeMap<String, String>,
}

impl CanonicalParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, dropping it (and any previous value under the key) when
    /// it renders to nothing.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        match value.into().render() {
            Some(rendered) => {
                self.entries.insert(key, rendered);
            }
            None => {
                self.entries.remove(&key);
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn encode(&self) -> EncodedParams {
        let mut hash_payload = String::new();
        let mut query_string = String::new();
        let mut first = true;

        for (key, value) in &self.entries {
            let pair = format!("{}={}", encode_component(key), encode_component(value));
            if !first {
                hash_payload.push('&');
            }
            first = false;
            hash_payload.push_str(&pair);
            query_string.push_str(&pair);
            query_string.push('&');
        }

        EncodedParams {
            hash_payload,
            query_string,
        }
    }
}

impl<K, V> FromIterator<(K, V)> for CanonicalParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (key, value) in iter {
            set.insert(key, value);
        }
        set
    }
}

/// Form-encodes one key or value exactly as the gateway does before hashing.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, FORM_ENCODE_SET)
        .to_string()
        .replace("%20", "+")
}

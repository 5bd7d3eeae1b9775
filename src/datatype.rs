// used to serialize values into the backing file
use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};

// used to print out readable forms of a value
use std::borrow::Cow;
use std::fmt;

use tracing::warn;

/// The type a stored attribute currently carries. Update inference reads this
/// tag off the existing value (or off the kind's default) before parsing input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Text,
    Integer,
    Float,
    List,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::List => "list",
        }
    }
}

/// A value in a record's attribute bag.
///
/// Stored untagged, so the JSON shape decides the variant on the way back in:
/// integral numbers become `Integer`, numbers with a fraction become `Float`.
/// An integral number outside the `i64` range is refused rather than read as
/// a float, which would change it on the next write.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttrValue {
    Integer(i64),
    Float(f64),
    Text(String),
    List(Vec<String>),
}

impl AttrValue {
    pub fn type_tag(&self) -> ValueType {
        match self {
            Self::Text(_) => ValueType::Text,
            Self::Integer(_) => ValueType::Integer,
            Self::Float(_) => ValueType::Float,
            Self::List(_) => ValueType::List,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Turns raw console input into a value of the wanted type.
    ///
    /// Input that does not parse as the wanted number type is kept as text
    /// rather than rejected.
    pub fn coerce(raw: &str, wanted: ValueType) -> AttrValue {
        let unquoted = strip_quotes(raw);
        match wanted {
            ValueType::Text => AttrValue::Text(unquoted.to_string()),
            ValueType::Integer => match unquoted.trim().parse::<i64>() {
                Ok(i) => AttrValue::Integer(i),
                Err(_) => {
                    warn!(value = %unquoted, "not an integer, storing as text");
                    AttrValue::Text(unquoted.to_string())
                }
            },
            ValueType::Float => match unquoted.trim().parse::<f64>() {
                // JSON has no spelling for NaN or infinity
                Ok(f) if f.is_finite() => AttrValue::Float(f),
                _ => {
                    warn!(value = %unquoted, "not a float, storing as text");
                    AttrValue::Text(unquoted.to_string())
                }
            },
            ValueType::List => match parse_list(&unquoted) {
                Some(items) => AttrValue::List(items),
                None => {
                    warn!(value = %unquoted, "unbalanced list, storing as text");
                    AttrValue::Text(unquoted.to_string())
                }
            },
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{:?}", s),
            Self::Integer(i) => write!(f, "{}", i),
            // Debug keeps the fraction on whole floats, 3.0 rather than 3
            Self::Float(x) => write!(f, "{:?}", x),
            Self::List(items) => write!(f, "{:?}", items),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        AttrValue::Integer(i)
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        AttrValue::Float(f)
    }
}

impl From<Vec<String>> for AttrValue {
    fn from(items: Vec<String>) -> Self {
        AttrValue::List(items)
    }
}

struct AttrValueVisitor;

impl<'de> Visitor<'de> for AttrValueVisitor {
    type Value = AttrValue;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string, an i64, a float or a list of strings")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<AttrValue, E> {
        Ok(AttrValue::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<AttrValue, E> {
        i64::try_from(v)
            .map(AttrValue::Integer)
            .map_err(|_| E::custom(format!("integer {v} does not fit in an i64")))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<AttrValue, E> {
        Ok(AttrValue::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(v.to_string()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<AttrValue, E> {
        Ok(AttrValue::Text(v))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<AttrValue, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element::<String>()? {
            items.push(item);
        }
        Ok(AttrValue::List(items))
    }
}

impl<'de> Deserialize<'de> for AttrValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(AttrValueVisitor)
    }
}

/// Removes one layer of matching single or double quotes and resolves the
/// backslash escapes inside them.
pub fn strip_quotes(raw: &str) -> Cow<'_, str> {
    let bytes = raw.as_bytes();
    if bytes.len() >= 2 {
        let first = bytes[0];
        let last = bytes[bytes.len() - 1];
        if first == last && (first == b'"' || first == b'\'') {
            return unescape(&raw[1..raw.len() - 1]);
        }
    }
    Cow::Borrowed(raw)
}

fn unescape(inner: &str) -> Cow<'_, str> {
    if !inner.contains('\\') {
        return Cow::Borrowed(inner);
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        match (c, chars.clone().next()) {
            ('\\', Some(next @ ('"' | '\'' | '\\'))) => {
                out.push(next);
                chars.next();
            }
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

// None when the brackets do not pair up.
fn parse_list(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Vec::new());
    }
    if let Ok(items) = serde_json::from_str::<Vec<String>>(trimmed) {
        return Some(items);
    }
    let inner = match (trimmed.strip_prefix('['), trimmed.ends_with(']')) {
        (Some(rest), true) => &rest[..rest.len() - 1],
        (None, false) => trimmed,
        _ => return None,
    };
    Some(
        inner
            .split(',')
            .map(|item| strip_quotes(item.trim()).into_owned())
            .filter(|item| !item.is_empty())
            .collect(),
    )
}

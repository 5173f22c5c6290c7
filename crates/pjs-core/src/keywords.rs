//! # Keyword Sets
//!
//! A [`Keywords`] value is what a caller hands to a builder, either at
//! construction or at materialization. Each entry is a keyword name paired
//! with a value or with the absence-sentinel (`None`). Absent entries are
//! legal everywhere and never reach an emitted document.
//!
//! A top-level JSON `null` is stored as `None`: no keyword in the builder
//! vocabulary takes `null` as its value. Nested nulls (`enum: [null]`) are
//! kept.
//!
//! The typed structs ([`StringKeywords`], [`NumberKeywords`], ...) are the
//! ergonomic front door: one `Option` field per recognized keyword, with
//! `Default` meaning "everything absent".

use serde_json::{Map, Value};

/// A materialized schema document: keyword name to JSON value, in
/// insertion order.
pub type Document = Map<String, Value>;

/// An insertion-ordered keyword set where `None` marks an absent keyword.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Keywords {
    entries: Vec<(String, Option<Value>)>,
}

impl Keywords {
    /// An empty keyword set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert) of a present value.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    /// Builder-style [`insert`](Self::insert) of the absence-sentinel.
    pub fn without(mut self, name: impl Into<String>) -> Self {
        self.insert(name, None);
        self
    }

    /// Set `name` to `value`. A repeated name keeps its first position and
    /// takes the new value. `Some(Value::Null)` is recorded as absent.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<Value>) {
        let name = name.into();
        let value = value.filter(|v| !v.is_null());
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Set `name` only when `value` is present; otherwise record it absent.
    pub(crate) fn insert_opt<V: Into<Value>>(&mut self, name: &str, value: Option<V>) {
        self.insert(name, value.map(Into::into));
    }

    /// The present value for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_ref())
    }

    /// All entries, absent ones included.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Value>)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_ref()))
    }

    /// Only the entries carrying a value.
    pub fn present(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter_map(|(n, v)| v.as_ref().map(|v| (n.as_str(), v)))
    }

    /// All keyword names, absent ones included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of entries, absent ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries were supplied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<()> for Keywords {
    fn from(_: ()) -> Self {
        Self::new()
    }
}

impl From<Document> for Keywords {
    fn from(doc: Document) -> Self {
        doc.into_iter().map(|(k, v)| (k, Some(v))).collect()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<Value>)> for Keywords {
    fn from_iter<I: IntoIterator<Item = (K, Option<Value>)>>(iter: I) -> Self {
        let mut keywords = Self::new();
        for (name, value) in iter {
            keywords.insert(name, value);
        }
        keywords
    }
}

/// Keywords for `null` schemas. There are none; the struct exists so every
/// builder has the same shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NullKeywords;

impl From<NullKeywords> for Keywords {
    fn from(_: NullKeywords) -> Self {
        Self::new()
    }
}

/// Keywords for `boolean` schemas. There are none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BooleanKeywords;

impl From<BooleanKeywords> for Keywords {
    fn from(_: BooleanKeywords) -> Self {
        Self::new()
    }
}

/// Keywords for `integer` schemas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IntegerKeywords {
    /// `enum`
    pub enum_values: Option<Vec<Value>>,
}

impl From<IntegerKeywords> for Keywords {
    fn from(k: IntegerKeywords) -> Self {
        let mut out = Self::new();
        out.insert_opt("enum", k.enum_values);
        out
    }
}

/// Keywords for `number` schemas.
///
/// Bounds are plain JSON values so integers stay integers in the emitted
/// document (`1`, not `1.0`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NumberKeywords {
    /// `multipleOf`
    pub multiple_of: Option<Value>,
    /// `minimum`
    pub minimum: Option<Value>,
    /// `exclusiveMinimum`
    pub exclusive_minimum: Option<Value>,
    /// `maximum`
    pub maximum: Option<Value>,
    /// `exclusiveMaximum`
    pub exclusive_maximum: Option<Value>,
    /// `enum`
    pub enum_values: Option<Vec<Value>>,
}

impl From<NumberKeywords> for Keywords {
    fn from(k: NumberKeywords) -> Self {
        let mut out = Self::new();
        out.insert_opt("multipleOf", k.multiple_of);
        out.insert_opt("minimum", k.minimum);
        out.insert_opt("exclusiveMinimum", k.exclusive_minimum);
        out.insert_opt("maximum", k.maximum);
        out.insert_opt("exclusiveMaximum", k.exclusive_maximum);
        out.insert_opt("enum", k.enum_values);
        out
    }
}

/// Keywords for `string` schemas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringKeywords {
    /// `minLength`
    pub min_length: Option<u64>,
    /// `maxLength`
    pub max_length: Option<u64>,
    /// `pattern` (ECMA 262 regular expression)
    pub pattern: Option<String>,
    /// `format`
    pub format: Option<String>,
    /// `enum`
    pub enum_values: Option<Vec<Value>>,
}

impl From<StringKeywords> for Keywords {
    fn from(k: StringKeywords) -> Self {
        let mut out = Self::new();
        out.insert_opt("minLength", k.min_length);
        out.insert_opt("maxLength", k.max_length);
        out.insert_opt("pattern", k.pattern);
        out.insert_opt("format", k.format);
        out.insert_opt("enum", k.enum_values);
        out
    }
}

/// Keywords for `array` schemas.
///
/// `items` and `contains` take either one schema or, for `items`, an array
/// of schemas (tuple validation). Nodes convert with `.into()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArrayKeywords {
    /// `items`
    pub items: Option<Value>,
    /// `contains`
    pub contains: Option<Value>,
    /// `minItems`
    pub min_items: Option<u64>,
    /// `maxItems`
    pub max_items: Option<u64>,
    /// `additionalItems`
    pub additional_items: Option<Value>,
    /// `uniqueItems`
    pub unique_items: Option<bool>,
}

impl From<ArrayKeywords> for Keywords {
    fn from(k: ArrayKeywords) -> Self {
        let mut out = Self::new();
        out.insert_opt("items", k.items);
        out.insert_opt("contains", k.contains);
        out.insert_opt("minItems", k.min_items);
        out.insert_opt("maxItems", k.max_items);
        out.insert_opt("additionalItems", k.additional_items);
        out.insert_opt("uniqueItems", k.unique_items);
        out
    }
}

//! # Schema Node
//!
//! One generic node type serves all seven JSON Schema primitives. A node is
//! a type tag plus a baseline document computed once at construction:
//!
//! ```text
//! baseline = {type: tag} ∪ {k: v | (k, v) in construction keywords, v present}
//! ```
//!
//! Materialization layers a call-time keyword set over that baseline,
//! right-biased, and returns a fresh [`Document`]. The node itself is never
//! mutated, so one node can be materialized any number of times with
//! different overrides.
//!
//! ## Invariants
//!
//! - `type` is always the first key of the baseline and comes only from the
//!   tag; supplying it as a keyword is rejected.
//! - No emitted document contains an absent keyword.
//! - Every caller-supplied keyword is checked against the tag's whitelist.

use std::fmt;
use std::ops::Index;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::error::{InvalidSchemaError, PjsError};
use crate::keywords::{
    ArrayKeywords, Document, IntegerKeywords, Keywords, NumberKeywords, StringKeywords,
};
use crate::schema_type::{SchemaType, TYPE_KEYWORD};

/// A schema builder for one JSON Schema type.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    schema_type: SchemaType,
    baseline: Document,
}

impl SchemaNode {
    /// Build a node from an arbitrary keyword set.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSchemaError::RequiresComposer`] for
    /// [`SchemaType::Object`], [`InvalidSchemaError::ReservedKeyword`] if the
    /// set names `type`, or [`InvalidSchemaError::UnknownKeyword`] for any
    /// name outside the tag's whitelist. Absent entries are checked too.
    pub fn new(
        schema_type: SchemaType,
        keywords: impl Into<Keywords>,
    ) -> Result<Self, InvalidSchemaError> {
        let keywords = keywords.into();
        check_keywords(schema_type, &keywords)?;
        Ok(Self::from_checked(schema_type, &keywords))
    }

    /// Build a node from keywords already known to be legal for the tag.
    pub(crate) fn from_checked(schema_type: SchemaType, keywords: &Keywords) -> Self {
        let mut baseline = Document::new();
        baseline.insert(
            TYPE_KEYWORD.to_string(),
            Value::String(schema_type.as_str().to_string()),
        );
        for (name, value) in keywords.present() {
            baseline.insert(name.to_string(), value.clone());
        }
        Self {
            schema_type,
            baseline,
        }
    }

    /// A `null` schema.
    pub fn null() -> Self {
        Self::from_checked(SchemaType::Null, &Keywords::new())
    }

    /// A `boolean` schema.
    pub fn boolean() -> Self {
        Self::from_checked(SchemaType::Boolean, &Keywords::new())
    }

    /// An `integer` schema.
    pub fn integer(keywords: IntegerKeywords) -> Self {
        Self::from_checked(SchemaType::Integer, &keywords.into())
    }

    /// A `number` schema.
    pub fn number(keywords: NumberKeywords) -> Self {
        Self::from_checked(SchemaType::Number, &keywords.into())
    }

    /// A `string` schema.
    pub fn string(keywords: StringKeywords) -> Self {
        Self::from_checked(SchemaType::String, &keywords.into())
    }

    /// An `array` schema.
    pub fn array(keywords: ArrayKeywords) -> Self {
        Self::from_checked(SchemaType::Array, &keywords.into())
    }

    /// Produce a document with `overrides` layered over the baseline.
    ///
    /// # Errors
    ///
    /// Same checks as [`SchemaNode::new`], applied to `overrides`. The view
    /// returned by `ObjectSchema::node` therefore cannot be materialized
    /// directly; use `ObjectSchema::materialize`.
    pub fn materialize(
        &self,
        overrides: impl Into<Keywords>,
    ) -> Result<Document, InvalidSchemaError> {
        let overrides = overrides.into();
        check_keywords(self.schema_type, &overrides)?;
        Ok(self.layer(&overrides))
    }

    /// The baseline document, with no overrides applied.
    pub fn document(&self) -> Document {
        self.baseline.clone()
    }

    /// Right-biased union of the baseline and the present overrides.
    pub(crate) fn layer(&self, overrides: &Keywords) -> Document {
        let mut doc = self.baseline.clone();
        for (name, value) in overrides.present() {
            doc.insert(name.to_string(), value.clone());
        }
        doc
    }

    /// The type tag fixed at construction.
    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }

    /// Baseline value for `keyword`.
    pub fn get(&self, keyword: &str) -> Option<&Value> {
        self.baseline.get(keyword)
    }

    /// Whether the baseline carries `keyword`.
    pub fn contains_key(&self, keyword: &str) -> bool {
        self.baseline.contains_key(keyword)
    }

    /// Number of baseline keywords, `type` included.
    pub fn len(&self) -> usize {
        self.baseline.len()
    }

    /// Always false: the baseline carries at least `type`.
    pub fn is_empty(&self) -> bool {
        self.baseline.is_empty()
    }

    /// Baseline entries in insertion order.
    pub fn iter(&self) -> serde_json::map::Iter<'_> {
        self.baseline.iter()
    }

    /// Baseline keyword names in insertion order.
    pub fn keys(&self) -> serde_json::map::Keys<'_> {
        self.baseline.keys()
    }

    /// The baseline as indented JSON, for reading a schema at a glance.
    pub fn to_pretty_string(&self) -> Result<String, PjsError> {
        Ok(serde_json::to_string_pretty(&self.baseline)?)
    }
}

fn check_keywords(schema_type: SchemaType, keywords: &Keywords) -> Result<(), InvalidSchemaError> {
    if schema_type == SchemaType::Object {
        return Err(InvalidSchemaError::RequiresComposer { schema_type });
    }
    keywords
        .names()
        .try_for_each(|name| schema_type.check_keyword(name))
}

impl Index<&str> for SchemaNode {
    type Output = Value;

    /// Panics if the baseline has no such keyword, like a map lookup.
    fn index(&self, keyword: &str) -> &Value {
        &self.baseline[keyword]
    }
}

impl<'a> IntoIterator for &'a SchemaNode {
    type Item = (&'a String, &'a Value);
    type IntoIter = serde_json::map::Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.baseline.iter()
    }
}

impl fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.baseline).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

impl Serialize for SchemaNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.baseline.serialize(serializer)
    }
}

impl From<SchemaNode> for Document {
    fn from(node: SchemaNode) -> Self {
        node.baseline
    }
}

impl From<&SchemaNode> for Document {
    fn from(node: &SchemaNode) -> Self {
        node.document()
    }
}

impl From<SchemaNode> for Value {
    fn from(node: SchemaNode) -> Self {
        Value::Object(node.baseline)
    }
}

impl From<&SchemaNode> for Value {
    fn from(node: &SchemaNode) -> Self {
        Value::Object(node.document())
    }
}

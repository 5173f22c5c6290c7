//! # Object Composer
//!
//! The `object` builder. Besides passing keywords through to the shared
//! [`SchemaNode`] layering, it rewrites three things on every call, in this
//! order:
//!
//! 1. **Multi-type properties.** A property given as a list of schemas is
//!    flattened into one schema whose `type` is the list of member types (in
//!    member order, duplicates kept) and whose other keywords are the member
//!    keywords merged left to right, later members winning.
//! 2. **Required.** `Required::All` expands to every property name in
//!    insertion order, `Required::Fields` is emitted verbatim, and
//!    `Required::Suppress` removes `required` from the produced document.
//! 3. **anyOf shorthand.** `["a", "b"]` becomes
//!    `[{"required": ["a"]}, {"required": ["b"]}]`, i.e. at least one of the
//!    fields must be present.
//!
//! Construction and materialization each run the steps on their own
//! arguments. The only state one call sees from the other is the
//! constructed baseline, which `Required::All` falls back to when a
//! materialization call supplies no `properties` of its own.
//!
//! All rewrites produce new values; caller-supplied property descriptors
//! are never modified.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{InvalidSchemaError, PjsError};
use crate::keywords::{Document, Keywords};
use crate::node::SchemaNode;
use crate::options::{ComposerOptions, MemberTypePolicy};
use crate::schema_type::{SchemaType, TYPE_KEYWORD};

const REQUIRED_KEYWORD: &str = "required";
const PROPERTIES_KEYWORD: &str = "properties";

/// The schema for one object property.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// A single schema.
    Single(Document),
    /// The value may satisfy any one of these schemas.
    Union(Vec<Document>),
}

impl From<Document> for Property {
    fn from(doc: Document) -> Self {
        Self::Single(doc)
    }
}

impl From<SchemaNode> for Property {
    fn from(node: SchemaNode) -> Self {
        Self::Single(node.into())
    }
}

impl From<&SchemaNode> for Property {
    fn from(node: &SchemaNode) -> Self {
        Self::Single(node.into())
    }
}

impl From<ObjectSchema> for Property {
    fn from(schema: ObjectSchema) -> Self {
        Self::Single(schema.node.into())
    }
}

impl From<&ObjectSchema> for Property {
    fn from(schema: &ObjectSchema) -> Self {
        Self::Single(schema.document())
    }
}

impl From<Vec<Document>> for Property {
    fn from(members: Vec<Document>) -> Self {
        Self::Union(members)
    }
}

impl From<Vec<SchemaNode>> for Property {
    fn from(members: Vec<SchemaNode>) -> Self {
        Self::Union(members.into_iter().map(Document::from).collect())
    }
}

impl<const N: usize> From<[SchemaNode; N]> for Property {
    fn from(members: [SchemaNode; N]) -> Self {
        Self::Union(members.into_iter().map(Document::from).collect())
    }
}

/// Property name to descriptor, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Properties {
    entries: Vec<(String, Property)>,
}

impl Properties {
    /// No properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, property: impl Into<Property>) -> Self {
        self.insert(name, property);
        self
    }

    /// Add a property. A repeated name keeps its first position.
    pub fn insert(&mut self, name: impl Into<String>, property: impl Into<Property>) {
        let name = name.into();
        let property = property.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = property,
            None => self.entries.push((name, property)),
        }
    }

    /// Descriptor for `name`.
    pub fn get(&self, name: &str) -> Option<&Property> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, p)| p)
    }

    /// Property names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Property)> {
        self.entries.iter().map(|(n, p)| (n.as_str(), p))
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if there are no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, P: Into<Property>> FromIterator<(K, P)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, P)>>(iter: I) -> Self {
        let mut props = Self::new();
        for (name, property) in iter {
            props.insert(name, property);
        }
        props
    }
}

/// The `required` argument of the object builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Required {
    /// Every supplied property is required (`true`).
    All,
    /// Emit no `required` at all, even if the baseline has one (`false`).
    Suppress,
    /// Exactly these fields are required.
    Fields(Vec<String>),
}

impl From<bool> for Required {
    fn from(all: bool) -> Self {
        if all {
            Self::All
        } else {
            Self::Suppress
        }
    }
}

impl<S: Into<String>> From<Vec<S>> for Required {
    fn from(fields: Vec<S>) -> Self {
        Self::Fields(fields.into_iter().map(Into::into).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Required {
    fn from(fields: [&str; N]) -> Self {
        Self::Fields(fields.iter().map(|f| f.to_string()).collect())
    }
}

/// Arguments of the object builder, for construction or materialization.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectKeywords {
    /// `properties`
    pub properties: Option<Properties>,
    /// `patternProperties`
    pub pattern_properties: Option<Properties>,
    /// `additionalProperties`: a boolean or a schema.
    pub additional_properties: Option<Value>,
    /// `required` shorthand.
    pub required: Option<Required>,
    /// Field names of which at least one must be present.
    pub any_of: Option<Vec<String>>,
    /// `propertyNames`
    pub property_names: Option<Value>,
    /// `minProperties`
    pub min_properties: Option<u64>,
    /// `maxProperties`
    pub max_properties: Option<u64>,
    /// `dependencies`
    pub dependencies: Option<Value>,
}

impl From<()> for ObjectKeywords {
    fn from(_: ()) -> Self {
        Self::default()
    }
}

/// Outcome of the required step for one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RequiredResolution {
    Unset,
    Emit(Vec<String>),
    Suppress,
}

/// One call's arguments after all three rewrite steps.
struct Composed {
    keywords: Keywords,
    suppress_required: bool,
}

/// An `object` schema builder.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    node: SchemaNode,
    options: ComposerOptions,
}

impl ObjectSchema {
    /// Build an object schema with default options.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSchemaError::RequiredWithoutProperties`] for
    /// `Required::All` without `properties`.
    pub fn new(keywords: impl Into<ObjectKeywords>) -> Result<Self, InvalidSchemaError> {
        Self::with_options(keywords, ComposerOptions::default())
    }

    /// Build an object schema with explicit composer options.
    ///
    /// # Errors
    ///
    /// As [`ObjectSchema::new`], plus
    /// [`InvalidSchemaError::MemberMissingType`] under the strict member
    /// policy.
    pub fn with_options(
        keywords: impl Into<ObjectKeywords>,
        options: ComposerOptions,
    ) -> Result<Self, InvalidSchemaError> {
        let composed = compose(&keywords.into(), None, &options)?;
        let node = SchemaNode::from_checked(SchemaType::Object, &composed.keywords);
        Ok(Self { node, options })
    }

    /// Produce a document with `overrides` rewritten and layered over the
    /// baseline.
    ///
    /// # Errors
    ///
    /// Same as construction. `Required::All` only fails if neither the
    /// overrides nor the baseline carry `properties`.
    pub fn materialize(
        &self,
        overrides: impl Into<ObjectKeywords>,
    ) -> Result<Document, InvalidSchemaError> {
        let baseline_properties = self
            .node
            .get(PROPERTIES_KEYWORD)
            .and_then(Value::as_object);
        let composed = compose(&overrides.into(), baseline_properties, &self.options)?;
        let mut doc = self.node.layer(&composed.keywords);
        if composed.suppress_required {
            doc.retain(|name, _| name != REQUIRED_KEYWORD);
        }
        Ok(doc)
    }

    /// The baseline document, with no overrides applied.
    pub fn document(&self) -> Document {
        self.node.document()
    }

    /// Read-only view of the constructed node. The view refuses
    /// `SchemaNode::materialize`; overrides go through
    /// [`ObjectSchema::materialize`].
    pub fn node(&self) -> &SchemaNode {
        &self.node
    }

    /// The baseline as indented JSON.
    pub fn to_pretty_string(&self) -> Result<String, PjsError> {
        self.node.to_pretty_string()
    }

    /// Options this builder was constructed with.
    pub fn options(&self) -> &ComposerOptions {
        &self.options
    }
}

impl fmt::Display for ObjectSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.node, f)
    }
}

impl Serialize for ObjectSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.node.serialize(serializer)
    }
}

impl From<ObjectSchema> for Value {
    fn from(schema: ObjectSchema) -> Self {
        schema.node.into()
    }
}

impl From<&ObjectSchema> for Value {
    fn from(schema: &ObjectSchema) -> Self {
        Value::Object(schema.document())
    }
}

fn compose(
    args: &ObjectKeywords,
    fallback_properties: Option<&Document>,
    options: &ComposerOptions,
) -> Result<Composed, InvalidSchemaError> {
    let properties = args
        .properties
        .as_ref()
        .map(|p| normalize_properties(p, options.member_type))
        .transpose()?;
    let pattern_properties = args
        .pattern_properties
        .as_ref()
        .map(|p| normalize_properties(p, options.member_type))
        .transpose()?;

    let available = properties.as_ref().or(fallback_properties);
    let required = resolve_required(args.required.as_ref(), available)?;
    let any_of = args.any_of.as_deref().and_then(expand_any_of);

    let mut keywords = Keywords::new();
    keywords.insert_opt("properties", properties);
    keywords.insert_opt("patternProperties", pattern_properties);
    keywords.insert_opt("additionalProperties", args.additional_properties.clone());
    if let RequiredResolution::Emit(fields) = &required {
        keywords.insert(REQUIRED_KEYWORD, Some(fields.clone().into()));
    }
    keywords.insert_opt("propertyNames", args.property_names.clone());
    keywords.insert_opt("minProperties", args.min_properties);
    keywords.insert_opt("maxProperties", args.max_properties);
    keywords.insert_opt("dependencies", args.dependencies.clone());
    keywords.insert_opt("anyOf", any_of);

    Ok(Composed {
        keywords,
        suppress_required: required == RequiredResolution::Suppress,
    })
}

/// Flatten every union property into a single schema document.
///
/// Single properties are copied as-is. The input is not modified.
pub fn normalize_properties(
    properties: &Properties,
    policy: MemberTypePolicy,
) -> Result<Document, InvalidSchemaError> {
    let mut out = Document::new();
    for (name, property) in properties.iter() {
        let schema = match property {
            Property::Single(doc) => doc.clone(),
            Property::Union(members) => merge_union(name, members, policy)?,
        };
        out.insert(name.to_string(), Value::Object(schema));
    }
    Ok(out)
}

fn merge_union(
    property: &str,
    members: &[Document],
    policy: MemberTypePolicy,
) -> Result<Document, InvalidSchemaError> {
    let mut types = Vec::new();
    let mut merged = Document::new();

    for (index, member) in members.iter().enumerate() {
        match member.get(TYPE_KEYWORD) {
            Some(Value::Array(member_types)) => types.extend(member_types.iter().cloned()),
            Some(member_type) => types.push(member_type.clone()),
            None => match policy {
                MemberTypePolicy::Strict => {
                    return Err(InvalidSchemaError::MemberMissingType {
                        property: property.to_string(),
                        index,
                    });
                }
                MemberTypePolicy::Lenient => {
                    warn!(
                        property,
                        index,
                        "multi-type member has no `type`; merging its other keywords only"
                    );
                }
            },
        }
        for (name, value) in member {
            if name != TYPE_KEYWORD {
                merged.insert(name.clone(), value.clone());
            }
        }
    }

    debug!(property, types = ?types, "normalized multi-type property");

    let mut schema = Document::new();
    if !types.is_empty() {
        schema.insert(TYPE_KEYWORD.to_string(), Value::Array(types));
    }
    schema.extend(merged);
    Ok(schema)
}

/// Decide what the `required` argument of one call emits.
pub(crate) fn resolve_required(
    required: Option<&Required>,
    properties: Option<&Document>,
) -> Result<RequiredResolution, InvalidSchemaError> {
    match required {
        None => Ok(RequiredResolution::Unset),
        Some(Required::Suppress) => Ok(RequiredResolution::Suppress),
        Some(Required::Fields(fields)) => Ok(RequiredResolution::Emit(fields.clone())),
        Some(Required::All) => {
            let properties = properties.ok_or(InvalidSchemaError::RequiredWithoutProperties)?;
            let fields: Vec<String> = properties.keys().cloned().collect();
            debug!(fields = ?fields, "expanded `required: true`");
            Ok(RequiredResolution::Emit(fields))
        }
    }
}

/// Rewrite the at-least-one-of shorthand into native `anyOf` syntax.
///
/// Returns `None` for an empty list.
pub fn expand_any_of(fields: &[String]) -> Option<Value> {
    if fields.is_empty() {
        return None;
    }
    debug!(fields = ?fields, "expanded `anyOf` shorthand");
    Some(Value::Array(
        fields
            .iter()
            .map(|field| serde_json::json!({ REQUIRED_KEYWORD: [field] }))
            .collect(),
    ))
}

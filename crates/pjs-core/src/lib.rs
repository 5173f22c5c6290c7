//! # pjs-core — Declarative JSON Schema Builders
//!
//! Typed constructors for the seven JSON Schema primitive types. Each
//! builder holds a baseline keyword set chosen at construction and can be
//! materialized any number of times with call-time overrides into a plain
//! [`Document`] that any Draft-6-class validator accepts.
//!
//! ```
//! use pjs_core::{ObjectKeywords, ObjectSchema, Properties, Required, SchemaNode, StringKeywords};
//!
//! let login = ObjectSchema::new(ObjectKeywords {
//!     properties: Some(
//!         Properties::new()
//!             .with("login", SchemaNode::string(StringKeywords { min_length: Some(1), ..Default::default() }))
//!             .with("rememberMe", SchemaNode::boolean()),
//!     ),
//!     additional_properties: Some(false.into()),
//!     required: Some(Required::All),
//!     ..Default::default()
//! })
//! .unwrap();
//!
//! assert_eq!(login.node()["required"], serde_json::json!(["login", "rememberMe"]));
//! ```
//!
//! ## Modules
//!
//! - [`node`] — the generic schema node: type tag, keyword whitelist,
//!   right-biased materialization.
//! - [`object`] — the object composer: multi-type property normalization,
//!   `required` resolution and `anyOf` shorthand expansion.
//! - [`keywords`] — keyword sets with an explicit absence-sentinel, and the
//!   typed per-builder keyword structs.
//!
//! ## Crate Policy
//!
//! - No I/O and no validation of instance data; that belongs to
//!   `pjs-schema`.
//! - No `.unwrap()` outside tests and docs.
//! - Caller-supplied arguments are never mutated.

pub mod error;
pub mod keywords;
pub mod node;
pub mod object;
pub mod options;
pub mod schema_type;

pub use error::{InvalidSchemaError, PjsError};
pub use keywords::{
    ArrayKeywords, BooleanKeywords, Document, IntegerKeywords, Keywords, NullKeywords,
    NumberKeywords, StringKeywords,
};
pub use node::SchemaNode;
pub use object::{
    expand_any_of, normalize_properties, ObjectKeywords, ObjectSchema, Properties, Property,
    Required,
};
pub use options::{ComposerOptions, MemberTypePolicy};
pub use schema_type::SchemaType;

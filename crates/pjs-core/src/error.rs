//! # Error Types
//!
//! Builders fail eagerly: a misused keyword set is rejected when the node is
//! constructed or materialized, never deferred to validator failure.
//! Whether a document *accepts* some instance is the validator's concern and
//! has no representation here.

use thiserror::Error;

use crate::schema_type::SchemaType;

/// Top-level error type for the builder crate.
#[derive(Error, Debug)]
pub enum PjsError {
    /// A keyword set could not be turned into a schema document.
    #[error("invalid schema: {0}")]
    InvalidSchema(#[from] InvalidSchemaError),

    /// A materialized document could not be serialized.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for PjsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// A keyword set that cannot be materialized into a schema document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidSchemaError {
    /// `required: true` was given without any `properties` to expand.
    #[error("`required: true` needs `properties` to expand, but none were supplied")]
    RequiredWithoutProperties,

    /// The keyword is not part of the vocabulary for this schema type.
    #[error("keyword `{keyword}` is not recognized for `{schema_type}` schemas")]
    UnknownKeyword {
        /// Type tag of the node being built.
        schema_type: SchemaType,
        /// The offending keyword name.
        keyword: String,
    },

    /// The keyword is fixed at construction and cannot be supplied.
    #[error("keyword `{keyword}` is reserved and cannot be set or overridden")]
    ReservedKeyword {
        /// The offending keyword name.
        keyword: String,
    },

    /// A member of a multi-type property carries no `type` keyword.
    #[error("member {index} of multi-type property `{property}` has no `type` keyword")]
    MemberMissingType {
        /// Property whose union was being normalized.
        property: String,
        /// Zero-based position of the member within the union.
        index: usize,
    },

    /// `object` schemas are only built through `ObjectSchema`, which runs
    /// property normalization and the `required`/`anyOf` rewrites.
    #[error("`{schema_type}` schemas must be built and materialized through `ObjectSchema`")]
    RequiresComposer {
        /// Type tag that was passed to the generic node.
        schema_type: SchemaType,
    },

    /// A type name outside the seven JSON Schema primitive types.
    #[error("unknown schema type: {0:?}")]
    UnknownType(String),
}

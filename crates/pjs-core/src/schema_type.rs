//! # Schema Type Tags
//!
//! The seven primitive JSON Schema types, each paired with the fixed set of
//! keywords its builder recognizes. A node's tag is chosen once, at
//! construction, and is the only source of the emitted `type` keyword.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::InvalidSchemaError;

/// Keyword emitted for every node's type tag. Never accepted as input.
pub const TYPE_KEYWORD: &str = "type";

const NULL_KEYWORDS: &[&str] = &[];
const BOOLEAN_KEYWORDS: &[&str] = &[];
const INTEGER_KEYWORDS: &[&str] = &["enum"];
const NUMBER_KEYWORDS: &[&str] = &[
    "multipleOf",
    "minimum",
    "exclusiveMinimum",
    "maximum",
    "exclusiveMaximum",
    "enum",
];
const STRING_KEYWORDS: &[&str] = &["minLength", "maxLength", "pattern", "format", "enum"];
const ARRAY_KEYWORDS: &[&str] = &[
    "items",
    "contains",
    "minItems",
    "maxItems",
    "additionalItems",
    "uniqueItems",
];
const OBJECT_KEYWORDS: &[&str] = &[
    "properties",
    "patternProperties",
    "additionalProperties",
    "required",
    "propertyNames",
    "minProperties",
    "maxProperties",
    "dependencies",
];

/// A JSON Schema primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `null`
    Null,
    /// `true` / `false`
    Boolean,
    /// Whole numbers.
    Integer,
    /// Any JSON number.
    Number,
    /// Unicode strings.
    String,
    /// Ordered sequences.
    Array,
    /// String-keyed mappings.
    Object,
}

impl SchemaType {
    /// Returns all seven types in canonical order.
    pub fn all() -> &'static [SchemaType] {
        &[
            Self::Null,
            Self::Boolean,
            Self::Integer,
            Self::Number,
            Self::String,
            Self::Array,
            Self::Object,
        ]
    }

    /// The JSON Schema spelling of this type, as emitted in `type`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Keyword names a node of this type accepts, in declaration order.
    ///
    /// `type` is never listed: it is derived from the tag. The object
    /// composer's `anyOf` shorthand is not listed either, since it is
    /// rewritten before reaching the node.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Null => NULL_KEYWORDS,
            Self::Boolean => BOOLEAN_KEYWORDS,
            Self::Integer => INTEGER_KEYWORDS,
            Self::Number => NUMBER_KEYWORDS,
            Self::String => STRING_KEYWORDS,
            Self::Array => ARRAY_KEYWORDS,
            Self::Object => OBJECT_KEYWORDS,
        }
    }

    /// Whether `keyword` is in this type's whitelist.
    pub fn recognizes(&self, keyword: &str) -> bool {
        self.keywords().contains(&keyword)
    }

    /// Check a caller-supplied keyword name against the whitelist.
    pub(crate) fn check_keyword(&self, keyword: &str) -> Result<(), InvalidSchemaError> {
        if keyword == TYPE_KEYWORD {
            return Err(InvalidSchemaError::ReservedKeyword {
                keyword: keyword.to_string(),
            });
        }
        if !self.recognizes(keyword) {
            return Err(InvalidSchemaError::UnknownKeyword {
                schema_type: *self,
                keyword: keyword.to_string(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = InvalidSchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "null" => Ok(Self::Null),
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "array" => Ok(Self::Array),
            "object" => Ok(Self::Object),
            other => Err(InvalidSchemaError::UnknownType(other.to_string())),
        }
    }
}

//! # Composer Options
//!
//! Knobs for the object composer. Options are plain serde data so they can
//! be embedded in a larger configuration document; every field has a
//! default and partial documents deserialize.

use serde::{Deserialize, Serialize};

/// How a multi-type property treats a member without a `type` keyword.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberTypePolicy {
    /// Skip the member's type contribution, still merge its other keywords.
    #[default]
    Lenient,
    /// Reject the property with `InvalidSchemaError::MemberMissingType`.
    Strict,
}

/// Options for [`ObjectSchema`](crate::ObjectSchema).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComposerOptions {
    /// Handling of union members that carry no `type`.
    pub member_type: MemberTypePolicy,
}

impl ComposerOptions {
    /// Options that reject malformed union members.
    pub fn strict() -> Self {
        Self {
            member_type: MemberTypePolicy::Strict,
        }
    }
}

//! # Validator Configuration
//!
//! Which JSON Schema draft a materialized document is compiled under. The
//! builders emit Draft 6 vocabulary (numeric `exclusiveMinimum`, array-form
//! `items` with `additionalItems`, `dependencies`), so Draft 6 is the
//! default; Draft 4 and Draft 7 read the same subset with minor differences.

use serde::{Deserialize, Serialize};

/// Supported JSON Schema drafts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaDraft {
    /// Draft 4. `exclusiveMinimum`/`exclusiveMaximum` are booleans here.
    Draft4,
    /// Draft 6.
    #[default]
    Draft6,
    /// Draft 7.
    Draft7,
}

impl From<SchemaDraft> for jsonschema::Draft {
    fn from(draft: SchemaDraft) -> Self {
        match draft {
            SchemaDraft::Draft4 => jsonschema::Draft::Draft4,
            SchemaDraft::Draft6 => jsonschema::Draft::Draft6,
            SchemaDraft::Draft7 => jsonschema::Draft::Draft7,
        }
    }
}

/// Options for compiling a [`SchemaValidator`](crate::SchemaValidator).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Draft the document is interpreted under.
    pub draft: SchemaDraft,
}

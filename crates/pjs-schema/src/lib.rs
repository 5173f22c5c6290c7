//! # pjs-schema — Validating Built Schemas
//!
//! The builders in `pjs-core` only produce documents. This crate is the
//! other half of the contract: it compiles those documents with the
//! `jsonschema` crate and checks instance data against them.
//!
//! - [`SchemaValidator`] — compile once, validate many instances, with
//!   every violation reported as a structured [`Violation`].
//! - [`ValidatorConfig`] — draft selection (Draft 6 by default).
//!
//! ## Crate Policy
//!
//! - Depends only on `pjs-core` internally.
//! - Never fetches remote `$ref` targets.

pub mod config;
pub mod validate;

pub use config::{SchemaDraft, ValidatorConfig};
pub use validate::{
    validate, SchemaValidationError, SchemaValidator, ValidationViolations, Violation,
};

//! # Schema Validation
//!
//! Compiles materialized builder documents with the `jsonschema` crate and
//! checks instance data against them, reporting every violation with its
//! instance path, schema path and message.
//!
//! The builders never call into this module; it is the validator side of
//! the contract. A document is compiled once per [`SchemaValidator`] and can
//! then check any number of instances.
//!
//! ## Schema Resolution
//!
//! Builder documents are self-contained. An offline retriever rejects every
//! remote `$ref`, so compilation never reaches the network even when a
//! caller splices a hand-written schema into a keyword value.

use std::fmt;

use jsonschema::{Retrieve, Uri, Validator};
use pjs_core::{Document, InvalidSchemaError, Keywords, ObjectSchema, SchemaNode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::config::ValidatorConfig;

/// Retriever that refuses every external reference.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external reference `{}` cannot be resolved offline", uri.as_str()).into())
    }
}

/// Error during schema compilation or validation.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The instance did not conform to the schema.
    #[error("validation failed against schema '{schema_name}':\n{violations}")]
    ValidationFailed {
        /// Name the validator was created with.
        schema_name: String,
        /// Structured list of individual violations.
        violations: ValidationViolations,
    },

    /// The document could not be compiled (e.g., a keyword of the wrong type).
    #[error("validator build error for schema '{schema_name}': {reason}")]
    ValidatorBuildError {
        /// Name the validator was created with.
        schema_name: String,
        /// Reason the validator could not be built.
        reason: String,
    },

    /// The builder rejected the keyword set before anything was compiled.
    #[error(transparent)]
    InvalidSchema(#[from] InvalidSchemaError),
}

/// One keyword of a built schema that an instance failed.
///
/// `schema_path` points into the materialized document, so its last segment
/// is the builder keyword that rejected the value (`minLength`, `required`,
/// `anyOf`, ...).
#[derive(Debug, Clone)]
pub struct Violation {
    /// JSON Pointer into the instance; empty for the instance root.
    pub instance_path: String,
    /// JSON Pointer into the schema document.
    pub schema_path: String,
    /// Message produced by the validator.
    pub message: String,
}

impl Violation {
    /// The schema keyword that failed, taken from `schema_path`.
    pub fn keyword(&self) -> Option<&str> {
        self.schema_path
            .rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "(root)"
        } else {
            self.instance_path.as_str()
        };
        match self.keyword() {
            Some(keyword) => write!(f, "  {at} [{keyword}]: {}", self.message),
            None => write!(f, "  {at}: {}", self.message),
        }
    }
}

/// Every violation found in one instance, in validator order.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Violations raised by `keyword`, e.g. all `required` failures.
    pub fn by_keyword<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.violations
            .iter()
            .filter(move |v| v.keyword() == Some(keyword))
    }

    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.violations.iter().map(Violation::to_string).collect();
        f.write_str(&lines.join("\n"))
    }
}

/// A compiled schema document.
///
/// `SchemaValidator` is `Send + Sync`; one compiled document can be shared
/// across threads.
pub struct SchemaValidator {
    schema_name: String,
    schema: Document,
    validator: Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("schema_name", &self.schema_name)
            .field("schema", &self.schema)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Compile `schema` under the default configuration (Draft 6).
    ///
    /// `schema_name` only labels error messages.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidatorBuildError` if the document
    /// is not a valid schema.
    pub fn new(
        schema_name: impl Into<String>,
        schema: &Document,
    ) -> Result<Self, SchemaValidationError> {
        Self::with_config(schema_name, schema, &ValidatorConfig::default())
    }

    /// Compile `schema` under an explicit configuration.
    pub fn with_config(
        schema_name: impl Into<String>,
        schema: &Document,
        config: &ValidatorConfig,
    ) -> Result<Self, SchemaValidationError> {
        let schema_name = schema_name.into();
        let mut opts = jsonschema::options();
        opts.with_draft(config.draft.into());
        opts.with_retriever(OfflineRetriever);

        let schema_value = Value::Object(schema.clone());
        let validator = opts.build(&schema_value).map_err(|e| {
            SchemaValidationError::ValidatorBuildError {
                schema_name: schema_name.clone(),
                reason: e.to_string(),
            }
        })?;
        debug!(schema = %schema_name, draft = ?config.draft, "compiled schema validator");

        Ok(Self {
            schema_name,
            schema: schema.clone(),
            validator,
        })
    }

    /// Compile a node's baseline document.
    pub fn from_node(
        schema_name: impl Into<String>,
        node: &SchemaNode,
    ) -> Result<Self, SchemaValidationError> {
        Self::new(schema_name, &node.document())
    }

    /// Materialize `node` with `overrides`, then compile the result.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::InvalidSchema` if the node rejects
    /// the overrides.
    pub fn from_materialized(
        schema_name: impl Into<String>,
        node: &SchemaNode,
        overrides: impl Into<Keywords>,
    ) -> Result<Self, SchemaValidationError> {
        let document = node.materialize(overrides)?;
        Self::new(schema_name, &document)
    }

    /// Compile an object builder's baseline document.
    pub fn from_object(
        schema_name: impl Into<String>,
        schema: &ObjectSchema,
    ) -> Result<Self, SchemaValidationError> {
        Self::new(schema_name, &schema.document())
    }

    /// Name the validator was created with.
    pub fn schema_name(&self) -> &str {
        &self.schema_name
    }

    /// The compiled document.
    pub fn schema(&self) -> &Document {
        &self.schema
    }

    /// Whether `instance` conforms, without collecting violations.
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validator.is_valid(instance)
    }

    /// Validate `instance`, collecting every violation.
    ///
    /// # Errors
    ///
    /// Returns `SchemaValidationError::ValidationFailed` with structured
    /// violation details if the instance is invalid.
    pub fn validate(&self, instance: &Value) -> Result<(), SchemaValidationError> {
        let errors: Vec<Violation> = self
            .validator
            .iter_errors(instance)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaValidationError::ValidationFailed {
                schema_name: self.schema_name.clone(),
                violations: ValidationViolations { violations: errors },
            })
        }
    }
}

/// Compile `schema` and validate one instance against it.
pub fn validate(instance: &Value, schema: &Document) -> Result<(), SchemaValidationError> {
    SchemaValidator::new("schema", schema)?.validate(instance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pjs_core::{
        ObjectKeywords, Properties, Required, SchemaType, StringKeywords,
    };
    use serde_json::json;

    fn login_schema() -> ObjectSchema {
        ObjectSchema::new(ObjectKeywords {
            properties: Some(
                Properties::new()
                    .with(
                        "login",
                        SchemaNode::string(StringKeywords {
                            min_length: Some(1),
                            ..Default::default()
                        }),
                    )
                    .with("password", SchemaNode::string(StringKeywords::default())),
            ),
            required: Some(Required::All),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_validate_valid_instance() {
        let validator = SchemaValidator::from_object("login", &login_schema()).unwrap();
        validator
            .validate(&json!({"login": "x", "password": "y"}))
            .unwrap();
    }

    #[test]
    fn test_validate_missing_field_names_it() {
        let validator = SchemaValidator::from_object("login", &login_schema()).unwrap();
        let err = validator.validate(&json!({"login": "x"})).unwrap_err();
        match &err {
            SchemaValidationError::ValidationFailed {
                schema_name,
                violations,
            } => {
                assert_eq!(schema_name, "login");
                assert_eq!(violations.len(), 1);
                let messages: Vec<&str> =
                    violations.violations().iter().map(|v| v.message.as_str()).collect();
                assert!(
                    messages.iter().any(|m| m.contains("password")),
                    "Expected violation mentioning 'password', got: {messages:?}"
                );
            }
            other => panic!("Expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let validator = SchemaValidator::from_object("login", &login_schema()).unwrap();
        let err = validator
            .validate(&json!({"login": "", "password": 7}))
            .unwrap_err();
        match err {
            SchemaValidationError::ValidationFailed { violations, .. } => {
                let paths: Vec<String> = violations
                    .into_inner()
                    .into_iter()
                    .map(|v| v.instance_path)
                    .collect();
                assert!(paths.contains(&"/login".to_string()), "{paths:?}");
                assert!(paths.contains(&"/password".to_string()), "{paths:?}");
            }
            other => panic!("Expected ValidationFailed, got: {other}"),
        }
    }

    #[test]
    fn test_is_valid_matches_validate() {
        let validator = SchemaValidator::from_node("null", &SchemaNode::null()).unwrap();
        assert!(validator.is_valid(&Value::Null));
        assert!(!validator.is_valid(&json!("test")));
        assert!(validator.validate(&json!("test")).is_err());
    }

    #[test]
    fn test_malformed_keyword_value_fails_to_build() {
        let node = SchemaNode::new(
            SchemaType::String,
            Keywords::new().with("minLength", "one"),
        )
        .unwrap();
        let err = SchemaValidator::from_node("bad", &node).unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::ValidatorBuildError { .. }),
            "Expected ValidatorBuildError, got: {err}"
        );
    }

    #[test]
    fn test_rejected_overrides_surface_as_invalid_schema() {
        let err = SchemaValidator::from_materialized(
            "int",
            &SchemaNode::integer(Default::default()),
            Keywords::new().with("pattern", "^a"),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            SchemaValidationError::InvalidSchema(InvalidSchemaError::UnknownKeyword { .. })
        ));
    }

    #[test]
    fn test_remote_refs_are_not_fetched() {
        let mut schema = Document::new();
        schema.insert(
            "$ref".into(),
            json!("https://example.invalid/schemas/remote.json"),
        );
        let result = SchemaValidator::new("remote", &schema);
        assert!(
            matches!(result, Err(SchemaValidationError::ValidatorBuildError { .. })),
            "remote $ref should not resolve"
        );
    }

    #[test]
    fn test_free_function_validate() {
        let doc = SchemaNode::boolean().document();
        validate(&json!(true), &doc).unwrap();
        assert!(validate(&json!("true"), &doc).is_err());
    }

    #[test]
    fn test_violation_display_names_keyword() {
        let v = Violation {
            instance_path: "/login".to_string(),
            schema_path: "/properties/login/minLength".to_string(),
            message: r#""" is shorter than 1 character"#.to_string(),
        };
        assert_eq!(v.keyword(), Some("minLength"));
        assert_eq!(
            v.to_string(),
            r#"  /login [minLength]: "" is shorter than 1 character"#
        );
    }

    #[test]
    fn test_violation_display_root() {
        let v = Violation {
            instance_path: String::new(),
            schema_path: "/required".to_string(),
            message: r#""password" is a required property"#.to_string(),
        };
        assert!(v.to_string().starts_with("  (root) [required]:"));
    }

    #[test]
    fn test_violations_grouped_by_keyword() {
        let validator = SchemaValidator::from_object("login", &login_schema()).unwrap();
        let err = validator.validate(&json!({"login": ""})).unwrap_err();
        match err {
            SchemaValidationError::ValidationFailed { violations, .. } => {
                assert_eq!(violations.by_keyword("required").count(), 1);
                assert_eq!(violations.by_keyword("minLength").count(), 1);
                assert_eq!(violations.to_string().lines().count(), violations.len());
            }
            other => panic!("Expected ValidationFailed, got: {other}"),
        }
    }
}

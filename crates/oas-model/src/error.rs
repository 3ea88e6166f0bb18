use std::fmt;

use thiserror::Error;

/// A Responses key that is neither `default`, a status code nor a class.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid response key: {0:?}")]
pub struct InvalidStatusKey(pub String);

/// How much a violated rule matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// The document says something OpenAPI calls meaningless or
    /// ignored (SHOULD-level).
    Warning,
    /// The document breaks a MUST-level rule.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

/// A structural rule the shapes alone cannot express.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("unsupported spec version {found:?}, expected {expected}")]
    UnsupportedVersion {
        found: String,
        expected: &'static str,
    },

    #[error("path {0:?} must begin with '/'")]
    PathMissingSlash(String),

    #[error("path {path:?} is the same template as {other:?}")]
    DuplicatePathTemplate { path: String, other: String },

    #[error("path parameter {0:?} must be required")]
    PathParameterNotRequired(String),

    #[error("path parameter {name:?} does not appear in {path:?}")]
    PathParameterNotInTemplate { name: String, path: String },

    #[error("parameter {name:?} in {location} is declared more than once")]
    DuplicateParameter { name: String, location: String },

    #[error("parameter {0:?} declares both schema and type")]
    SchemaAndType(String),

    #[error("operation declares more than one body parameter")]
    MultipleBodyParameters,

    #[error("operation mixes body and formData parameters")]
    BodyAndFormData,

    #[error("type array requires items")]
    MissingItems,

    #[error("file parameter {0:?} must be in formData")]
    FileOutsideFormData(String),

    #[error("collectionFormat multi is not allowed for {location} parameter {name:?}")]
    MultiCollectionFormat { name: String, location: String },

    #[error("allowEmptyValue has no effect on {location} parameter {name:?}")]
    AllowEmptyValueLocation { name: String, location: String },

    #[error("allowReserved has no effect on {location} parameter {name:?}")]
    AllowReservedLocation { name: String, location: String },

    #[error("schema and content are mutually exclusive")]
    SchemaAndContent,

    #[error("parameter {0:?} needs either schema or content")]
    MissingSchemaOrContent(String),

    #[error("content must have exactly one entry, found {0}")]
    ContentEntryCount(usize),

    #[error("example and examples are mutually exclusive")]
    ExampleAndExamples,

    #[error("value and externalValue are mutually exclusive")]
    ValueAndExternalValue,

    #[error("operationRef and operationId are mutually exclusive")]
    OperationRefAndOperationId,

    #[error("style {style} is not allowed for {location} parameters")]
    StyleNotAllowed { style: String, location: String },

    #[error("header parameter {0:?} is ignored by consumers")]
    IgnoredHeaderParameter(String),

    #[error("response header Content-Type is ignored by consumers")]
    IgnoredContentTypeHeader,

    #[error("schema cannot be both readOnly and writeOnly")]
    ReadOnlyAndWriteOnly,

    #[error("readOnly property {0:?} should not be required")]
    ReadOnlyRequired(String),

    #[error("discriminator {0:?} must be a defined property")]
    DiscriminatorNotDefined(String),

    #[error("discriminator {0:?} must be listed in required")]
    DiscriminatorNotRequired(String),

    #[error("responses must declare at least one response")]
    EmptyResponses,

    #[error("status code {0} is not a registered HTTP status code")]
    UnregisteredStatusCode(u16),

    #[error("operationId {0:?} is used by more than one operation")]
    DuplicateOperationId(String),

    #[error("security requirement names undeclared scheme {0:?}")]
    UnknownSecurityScheme(String),

    #[error("component name {0:?} must match ^[a-zA-Z0-9.\\-_]+$")]
    InvalidComponentName(String),

    #[error("server variable {name:?} default {default:?} is not one of its enum values")]
    ServerVariableDefault { name: String, default: String },
}

impl ShapeError {
    pub fn severity(&self) -> Severity {
        match self {
            ShapeError::AllowEmptyValueLocation { .. }
            | ShapeError::AllowReservedLocation { .. }
            | ShapeError::IgnoredHeaderParameter(_)
            | ShapeError::IgnoredContentTypeHeader
            | ShapeError::ReadOnlyRequired(_)
            | ShapeError::ServerVariableDefault { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

/// A rule violation located by a JSON pointer into the document.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{severity} at {pointer}: {error}")]
pub struct Violation {
    pub pointer: String,
    pub severity: Severity,
    pub error: ShapeError,
}

/// Every violation found by a failed check, warnings included.
#[derive(Debug, Clone, PartialEq, Error)]
pub struct Violations(pub Vec<Violation>);

impl Violations {
    pub fn iter(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.0.iter().filter(|v| v.severity == Severity::Error)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} shape violation(s)", self.0.len())?;
        for violation in &self.0 {
            write!(f, "\n  {violation}")?;
        }
        Ok(())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

use super::items::{Items, Validations};
use super::schema::SchemaOrRef;
use crate::extensions::Extensions;
use crate::format::DataFormat;
use crate::reference::ReferenceOr;

/// A `$ref` to a parameter definition or an inline parameter.
pub type ParameterOrRef = ReferenceOr<Parameter>;

/// Parameter location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    FormData,
    Body,
}

impl ParameterLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterLocation::Query => "query",
            ParameterLocation::Header => "header",
            ParameterLocation::Path => "path",
            ParameterLocation::FormData => "formData",
            ParameterLocation::Body => "body",
        }
    }
}

impl fmt::Display for ParameterLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Types allowed for non-body parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    File,
}

/// Array serialization for non-body parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterCollectionFormat {
    #[default]
    Csv,
    Ssv,
    Tsv,
    Pipes,
    /// One parameter instance per value: `foo=bar&foo=baz`.
    Multi,
}

impl ParameterCollectionFormat {
    /// Separator between values, `None` for `multi`.
    pub fn separator(&self) -> Option<char> {
        match self {
            ParameterCollectionFormat::Csv => Some(','),
            ParameterCollectionFormat::Ssv => Some(' '),
            ParameterCollectionFormat::Tsv => Some('\t'),
            ParameterCollectionFormat::Pipes => Some('|'),
            ParameterCollectionFormat::Multi => None,
        }
    }
}

/// The payload of a `body` parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyParameter {
    pub schema: SchemaOrRef,

    /// A `type` next to `schema`. Never valid here, kept so the check can
    /// report it.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "crate::de::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub param_type: Option<serde_json::Value>,
}

/// A parameter carried outside the body: a primitive or an array of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleParameter {
    #[serde(rename = "type")]
    pub param_type: ParameterType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DataFormat>,

    #[serde(rename = "allowEmptyValue", skip_serializing_if = "Option::is_none")]
    pub allow_empty_value: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Items>,

    #[serde(rename = "collectionFormat", skip_serializing_if = "Option::is_none")]
    pub collection_format: Option<ParameterCollectionFormat>,

    /// A `schema` next to `type`. Only body parameters carry one, kept so
    /// the check can report it.
    #[serde(
        default,
        deserialize_with = "crate::de::present",
        skip_serializing_if = "Option::is_none"
    )]
    pub schema: Option<serde_json::Value>,

    #[serde(flatten)]
    pub validations: Validations,
}

impl SimpleParameter {
    pub fn collection_format_or_default(&self) -> ParameterCollectionFormat {
        self.collection_format.unwrap_or_default()
    }
}

/// Location-specific half of a parameter, tagged by `in`.
///
/// A body parameter only ever has a schema and every other location only
/// ever has a type, so the two can never be set together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "in", rename_all = "camelCase")]
pub enum ParameterKind {
    Query(SimpleParameter),
    Header(SimpleParameter),
    Path(SimpleParameter),
    FormData(SimpleParameter),
    Body(BodyParameter),
}

/// An operation parameter. Identified by (`name`, `in`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(flatten)]
    pub kind: ParameterKind,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Parameter {
    pub fn location(&self) -> ParameterLocation {
        match self.kind {
            ParameterKind::Query(_) => ParameterLocation::Query,
            ParameterKind::Header(_) => ParameterLocation::Header,
            ParameterKind::Path(_) => ParameterLocation::Path,
            ParameterKind::FormData(_) => ParameterLocation::FormData,
            ParameterKind::Body(_) => ParameterLocation::Body,
        }
    }

    pub fn is_required(&self) -> bool {
        self.required.unwrap_or(false)
    }

    /// The type half of a non-body parameter.
    pub fn as_simple(&self) -> Option<&SimpleParameter> {
        match &self.kind {
            ParameterKind::Query(p)
            | ParameterKind::Header(p)
            | ParameterKind::Path(p)
            | ParameterKind::FormData(p) => Some(p),
            ParameterKind::Body(_) => None,
        }
    }

    /// The schema of a body parameter.
    pub fn schema(&self) -> Option<&SchemaOrRef> {
        match &self.kind {
            ParameterKind::Body(body) => Some(&body.schema),
            _ => None,
        }
    }
}

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

use crate::check::{self, Check, Checker};
use crate::config::CheckOptions;
use crate::error::{Violation, Violations};
use crate::{v2, v3};

/// A document of either supported major version, told apart by its
/// `swagger` or `openapi` field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Document {
    V2(v2::Swagger),
    V3(v3::OpenApi),
}

impl Document {
    /// The declared version string, e.g. `2.0` or `3.0.3`.
    pub fn version(&self) -> &str {
        match self {
            Document::V2(doc) => &doc.swagger,
            Document::V3(doc) => &doc.openapi,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Document::V2(doc) => &doc.info.title,
            Document::V3(doc) => &doc.info.title,
        }
    }

    pub fn as_v2(&self) -> Option<&v2::Swagger> {
        match self {
            Document::V2(doc) => Some(doc),
            Document::V3(_) => None,
        }
    }

    pub fn as_v3(&self) -> Option<&v3::OpenApi> {
        match self {
            Document::V3(doc) => Some(doc),
            Document::V2(_) => None,
        }
    }

    pub fn check(&self, options: &CheckOptions) -> Result<Vec<Violation>, Violations> {
        check::run(self, options)
    }
}

impl<'de> Deserialize<'de> for Document {
    /// Dispatch on the version field so that a malformed document reports
    /// the error from its own family.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        if value.get("swagger").is_some() {
            v2::Swagger::deserialize(value).map(Document::V2).map_err(D::Error::custom)
        } else if value.get("openapi").is_some() {
            v3::OpenApi::deserialize(value).map(Document::V3).map_err(D::Error::custom)
        } else {
            Err(D::Error::custom("missing `swagger` or `openapi` field"))
        }
    }
}

impl Check for Document {
    fn check_with(&self, checker: &mut Checker<'_>) {
        match self {
            Document::V2(doc) => doc.check_with(checker),
            Document::V3(doc) => doc.check_with(checker),
        }
    }
}

impl From<v2::Swagger> for Document {
    fn from(doc: v2::Swagger) -> Self {
        Document::V2(doc)
    }
}

impl From<v3::OpenApi> for Document {
    fn from(doc: v3::OpenApi) -> Self {
        Document::V3(doc)
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::extensions::Extensions;

/// A server variable for URL templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerVariable {
    /// Sent when no alternate value is supplied.
    pub default: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ServerVariable {
    /// Whether the default is among the allowed values. Always true when
    /// the variable has no enum.
    pub fn default_is_allowed(&self) -> bool {
        self.enum_values
            .as_ref()
            .is_none_or(|values| values.is_empty() || values.contains(&self.default))
    }
}

/// A server URL definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    /// May be relative and may contain `{variable}` placeholders.
    pub url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<IndexMap<String, ServerVariable>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Server {
    /// The URL with every variable replaced by its default. Placeholders
    /// without a declared variable are left untouched.
    pub fn default_url(&self) -> String {
        self.variables
            .iter()
            .flatten()
            .fold(self.url.clone(), |url, (name, variable)| {
                url.replace(&format!("{{{name}}}"), &variable.default)
            })
    }
}

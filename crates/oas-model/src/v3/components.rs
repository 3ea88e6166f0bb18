use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::media_type::ExampleOrRef;
use super::operation::CallbackOrRef;
use super::parameter::{HeaderOrRef, ParameterOrRef};
use super::request_body::RequestBodyOrRef;
use super::response::{LinkOrRef, ResponseOrRef};
use super::schema::SchemaOrRef;
use super::security::SecuritySchemeOrRef;
use crate::extensions::Extensions;

/// Components object holding reusable definitions. Every key must match
/// `^[a-zA-Z0-9.\-_]+$`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemas: Option<IndexMap<String, SchemaOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub responses: Option<IndexMap<String, ResponseOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<IndexMap<String, ParameterOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub examples: Option<IndexMap<String, ExampleOrRef>>,

    #[serde(rename = "requestBodies", skip_serializing_if = "Option::is_none")]
    pub request_bodies: Option<IndexMap<String, RequestBodyOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<IndexMap<String, HeaderOrRef>>,

    #[serde(rename = "securitySchemes", skip_serializing_if = "Option::is_none")]
    pub security_schemes: Option<IndexMap<String, SecuritySchemeOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<IndexMap<String, LinkOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<IndexMap<String, CallbackOrRef>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Components {
    /// Every component name with its section, in section order.
    pub fn names(&self) -> Vec<(&'static str, &str)> {
        fn keys<'a, V>(
            section: &'static str,
            map: &'a Option<IndexMap<String, V>>,
        ) -> impl Iterator<Item = (&'static str, &'a str)> {
            map.iter()
                .flat_map(|map| map.keys())
                .map(move |name| (section, name.as_str()))
        }

        keys("schemas", &self.schemas)
            .chain(keys("responses", &self.responses))
            .chain(keys("parameters", &self.parameters))
            .chain(keys("examples", &self.examples))
            .chain(keys("requestBodies", &self.request_bodies))
            .chain(keys("headers", &self.headers))
            .chain(keys("securitySchemes", &self.security_schemes))
            .chain(keys("links", &self.links))
            .chain(keys("callbacks", &self.callbacks))
            .collect()
    }
}

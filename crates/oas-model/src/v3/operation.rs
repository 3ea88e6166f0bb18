use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::parameter::{Parameter, ParameterOrRef};
use super::request_body::RequestBodyOrRef;
use super::response::Responses;
use super::security::SecurityRequirement;
use super::server::Server;
use super::spec::ExternalDocs;
use crate::extensions::Extensions;
use crate::http::HttpMethod;
use crate::reference::ReferenceOr;

/// An out-of-band request the API may make, keyed by a runtime expression
/// such as `{$request.body#/callbackUrl}`.
pub type Callback = IndexMap<String, PathItem>;

/// A reference or inline callback.
pub type CallbackOrRef = ReferenceOr<Callback>;

/// An API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "externalDocs", skip_serializing_if = "Option::is_none")]
    pub external_docs: Option<ExternalDocs>,

    #[serde(rename = "operationId", skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterOrRef>>,

    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyOrRef>,

    pub responses: Responses,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub callbacks: Option<IndexMap<String, CallbackOrRef>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// `Some(vec![])` removes document-level security for this operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Operation {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }
}

/// A path item, containing operations keyed by HTTP method.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// External definition of this path item. Not followed.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub put: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delete: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patch: Option<Operation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Operation>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub servers: Option<Vec<Server>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterOrRef>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl PathItem {
    /// Declared operations, in get/put/post/delete/options/head/patch/trace
    /// order.
    pub fn operations(&self) -> Vec<(HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Patch, &self.patch),
            (HttpMethod::Trace, &self.trace),
        ]
        .into_iter()
        .filter_map(|(method, op)| op.as_ref().map(|op| (method, op)))
        .collect()
    }

    /// Path-level parameters followed by the operation's own, where an
    /// inline operation parameter replaces a path-level one with the same
    /// `name` and `in`. References are kept as-is and never replaced.
    pub fn merged_parameters<'a>(&'a self, operation: &'a Operation) -> Vec<&'a ParameterOrRef> {
        let overrides = |shared: &Parameter| {
            operation.parameters.iter().flatten().any(|own| {
                own.as_item()
                    .is_some_and(|own| own.name == shared.name && own.location == shared.location)
            })
        };

        let mut merged: Vec<&ParameterOrRef> = self
            .parameters
            .iter()
            .flatten()
            .filter(|shared| shared.as_item().is_none_or(|shared| !overrides(shared)))
            .collect();
        merged.extend(operation.parameters.iter().flatten());
        merged
    }

    /// Servers for `operation`: its own, else this path's, else none.
    pub fn servers_for<'a>(&'a self, operation: &'a Operation) -> &'a [Server] {
        match operation.servers.as_deref() {
            Some(own) if !own.is_empty() => own,
            _ => self.servers.as_deref().unwrap_or_default(),
        }
    }
}

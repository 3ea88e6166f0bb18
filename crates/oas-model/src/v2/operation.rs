use serde::{Deserialize, Serialize};

use super::parameter::{Parameter, ParameterOrRef};
use super::response::Responses;
use super::security::SecurityRequirement;
use super::spec::{ExternalDocs, Scheme};
use crate::extensions::Extensions;
use crate::http::HttpMethod;

/// A single API operation on a path.
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

    /// Overrides the document-level `consumes` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumes: Option<Vec<String>>,

    /// Overrides the document-level `produces` when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub produces: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterOrRef>>,

    pub responses: Responses,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schemes: Option<Vec<Scheme>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    /// `Some(vec![])` removes document-level security for this operation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<Vec<SecurityRequirement>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Operation {
    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }
}

/// The operations available on a single path.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// External definition of this path item. Not followed.
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

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

    /// Parameters shared by every operation on this path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Vec<ParameterOrRef>>,

    #[serde(flatten)]
    pub extensions: Extensions,
}

impl PathItem {
    /// Declared operations, in get/put/post/delete/options/head/patch order.
    pub fn operations(&self) -> Vec<(HttpMethod, &Operation)> {
        [
            (HttpMethod::Get, &self.get),
            (HttpMethod::Put, &self.put),
            (HttpMethod::Post, &self.post),
            (HttpMethod::Delete, &self.delete),
            (HttpMethod::Options, &self.options),
            (HttpMethod::Head, &self.head),
            (HttpMethod::Patch, &self.patch),
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
                own.as_item().is_some_and(|own| {
                    own.name == shared.name && own.location() == shared.location()
                })
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::v2::parameter::ParameterLocation;

    const PETS_ITEM: &str = r##"
parameters:
  - name: petId
    in: path
    required: true
    type: string
  - name: verbose
    in: query
    type: boolean
  - $ref: '#/parameters/traceId'
get:
  operationId: getPet
  parameters:
    - name: petId
      in: path
      required: true
      type: integer
      format: int64
  responses:
    200:
      description: a pet
delete:
  operationId: deletePet
  deprecated: true
  responses:
    default:
      description: deleted
x-owner: pets-team
"##;

    #[test]
    fn operations_in_method_order() {
        let item: PathItem = serde_yaml_ng::from_str(PETS_ITEM).unwrap();
        let methods: Vec<HttpMethod> = item.operations().into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);
        assert!(item.delete.as_ref().unwrap().is_deprecated());
        assert_eq!(item.extensions.0.len(), 1);
    }

    #[test]
    fn operation_parameter_overrides_path_parameter() {
        let item: PathItem = serde_yaml_ng::from_str(PETS_ITEM).unwrap();
        let get = item.get.as_ref().unwrap();
        let merged = item.merged_parameters(get);
        assert_eq!(merged.len(), 3);

        assert_eq!(merged[0].as_item().unwrap().name, "verbose");
        assert_eq!(merged[1].as_reference(), Some("#/parameters/traceId"));
        let pet_id = merged[2].as_item().unwrap();
        assert_eq!(pet_id.location(), ParameterLocation::Path);
        assert_eq!(
            pet_id.as_simple().unwrap().format,
            Some(crate::format::DataFormat::Int64)
        );
    }

    #[test]
    fn operation_requires_responses() {
        let result: Result<Operation, _> =
            serde_json::from_str(r#"{"operationId": "listPets"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn empty_security_override_survives() {
        let op: Operation =
            serde_json::from_str(r#"{"security": [], "responses": {"204": {"description": "ok"}}}"#)
                .unwrap();
        assert_eq!(op.security, Some(vec![]));
        let value = serde_json::to_value(&op).unwrap();
        assert_eq!(value["security"], serde_json::json!([]));
    }

    #[test]
    fn empty_lists_survive() {
        let json = serde_json::json!({
            "tags": [],
            "parameters": [],
            "consumes": [],
            "responses": {"204": {"description": "ok", "headers": {}}}
        });
        let op: Operation = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(op.tags, Some(vec![]));
        assert_eq!(serde_json::to_value(&op).unwrap(), json);

        let item = PathItem {
            get: Some(op),
            ..PathItem::default()
        };
        assert!(item.merged_parameters(item.get.as_ref().unwrap()).is_empty());
    }
}

use crate::check::{
    Check, Checker, check_path_keys, check_read_only_required, check_unique_parameters,
    template_parameters,
};
use crate::config::CheckOptions;
use crate::error::{ShapeError, Violation, Violations};

use super::items::{Items, PrimitiveType};
use super::operation::{Operation, PathItem};
use super::parameter::{
    Parameter, ParameterCollectionFormat, ParameterKind, ParameterLocation, ParameterOrRef,
    ParameterType,
};
use super::response::{Header, Response, ResponseKey, Responses};
use super::schema::{AdditionalProperties, Schema, SchemaOrRef};
use super::spec::Swagger;

impl Check for Swagger {
    fn check_with(&self, checker: &mut Checker<'_>) {
        log::trace!("checking swagger {} document {:?}", self.swagger, self.info.title);

        if self.swagger != "2.0" {
            checker.at("swagger", |c| {
                c.report(ShapeError::UnsupportedVersion {
                    found: self.swagger.clone(),
                    expected: "2.0",
                })
            });
        }

        checker.at("paths", |c| {
            check_path_keys(c, self.paths.keys().map(String::as_str));
            for (path, item) in &self.paths {
                c.at(path, |c| check_path_item(c, self, path, item));
            }
        });

        checker.at("definitions", |c| {
            for (name, schema) in self.definitions.iter().flatten() {
                c.at(name, |c| check_schema(c, schema));
            }
        });

        checker.at("parameters", |c| {
            for (name, parameter) in self.parameters.iter().flatten() {
                c.at(name, |c| check_parameter(c, parameter, None));
            }
        });

        checker.at("responses", |c| {
            for (name, response) in self.responses.iter().flatten() {
                c.at(name, |c| check_response(c, response));
            }
        });

        if let Some(security) = &self.security {
            checker.at("security", |c| {
                c.security_requirements(security, self.security_definitions.as_ref())
            });
        }
    }
}

impl Swagger {
    /// Check the document's structural rules. Warnings alone pass unless
    /// `deny_warnings` is set.
    pub fn check(&self, options: &CheckOptions) -> Result<Vec<Violation>, Violations> {
        crate::check::run(self, options)
    }
}

fn check_path_item(checker: &mut Checker<'_>, doc: &Swagger, path: &str, item: &PathItem) {
    checker.at("parameters", |c| check_parameter_list(c, item.parameters.as_deref().unwrap_or_default(), Some(path)));

    for (method, operation) in item.operations() {
        checker.at(method, |c| check_operation(c, doc, path, item, operation));
    }
}

fn check_operation(
    checker: &mut Checker<'_>,
    doc: &Swagger,
    path: &str,
    item: &PathItem,
    operation: &Operation,
) {
    if let Some(id) = &operation.operation_id {
        checker.operation_id(id);
    }

    checker.at("parameters", |c| check_parameter_list(c, operation.parameters.as_deref().unwrap_or_default(), Some(path)));

    let merged: Vec<&Parameter> = item
        .merged_parameters(operation)
        .into_iter()
        .filter_map(ParameterOrRef::as_item)
        .collect();
    let bodies = merged
        .iter()
        .filter(|p| p.location() == ParameterLocation::Body)
        .count();
    if bodies > 1 {
        checker.report(ShapeError::MultipleBodyParameters);
    }
    if bodies > 0 && merged.iter().any(|p| p.location() == ParameterLocation::FormData) {
        checker.report(ShapeError::BodyAndFormData);
    }

    checker.at("responses", |c| check_responses(c, &operation.responses));

    if let Some(security) = &operation.security {
        checker.at("security", |c| {
            c.security_requirements(security, doc.security_definitions.as_ref())
        });
    }
}

fn check_parameter_list(checker: &mut Checker<'_>, parameters: &[ParameterOrRef], path: Option<&str>) {
    check_unique_parameters(
        checker,
        parameters.iter().enumerate().filter_map(|(i, p)| {
            p.as_item().map(|p| (i, p.name.as_str(), p.location().as_str()))
        }),
    );
    for (i, parameter) in parameters.iter().enumerate() {
        if let Some(parameter) = parameter.as_item() {
            checker.at(i, |c| check_parameter(c, parameter, path));
        }
    }
}

/// `path` is the owning path template for inline parameters, `None` for
/// reusable definitions.
fn check_parameter(checker: &mut Checker<'_>, parameter: &Parameter, path: Option<&str>) {
    let location = parameter.location();

    if location == ParameterLocation::Path {
        if !parameter.is_required() {
            checker.report(ShapeError::PathParameterNotRequired(parameter.name.clone()));
        }
        if let Some(path) = path {
            if !template_parameters(path).contains(&parameter.name.as_str()) {
                checker.report(ShapeError::PathParameterNotInTemplate {
                    name: parameter.name.clone(),
                    path: path.to_string(),
                });
            }
        }
    }

    if let Some(schema) = parameter.schema() {
        checker.at("schema", |c| check_schema_or_ref(c, schema));
    }

    let conflicting = match &parameter.kind {
        ParameterKind::Body(body) => body.param_type.is_some(),
        _ => parameter.as_simple().is_some_and(|p| p.schema.is_some()),
    };
    if conflicting {
        checker.report(ShapeError::SchemaAndType(parameter.name.clone()));
    }

    let Some(simple) = parameter.as_simple() else {
        return;
    };
    if simple.param_type == ParameterType::Array && simple.items.is_none() {
        checker.report(ShapeError::MissingItems);
    }
    if simple.param_type == ParameterType::File && location != ParameterLocation::FormData {
        checker.report(ShapeError::FileOutsideFormData(parameter.name.clone()));
    }
    let query_or_form = matches!(location, ParameterLocation::Query | ParameterLocation::FormData);
    if simple.collection_format == Some(ParameterCollectionFormat::Multi) && !query_or_form {
        checker.report(ShapeError::MultiCollectionFormat {
            name: parameter.name.clone(),
            location: location.to_string(),
        });
    }
    if simple.allow_empty_value.is_some() && !query_or_form {
        checker.report(ShapeError::AllowEmptyValueLocation {
            name: parameter.name.clone(),
            location: location.to_string(),
        });
    }
    if let Some(items) = &simple.items {
        checker.at("items", |c| check_items(c, items));
    }
}

fn check_items(checker: &mut Checker<'_>, items: &Items) {
    match &items.items {
        Some(nested) => checker.at("items", |c| check_items(c, nested)),
        None if items.item_type == PrimitiveType::Array => checker.report(ShapeError::MissingItems),
        None => {}
    }
}

fn check_header(checker: &mut Checker<'_>, header: &Header) {
    match &header.items {
        Some(items) => checker.at("items", |c| check_items(c, items)),
        None if header.header_type == PrimitiveType::Array => {
            checker.report(ShapeError::MissingItems)
        }
        None => {}
    }
}

fn check_responses(checker: &mut Checker<'_>, responses: &Responses) {
    if responses.is_empty() {
        checker.report(ShapeError::EmptyResponses);
    }
    for (key, response) in responses {
        checker.at(key, |c| {
            if let ResponseKey::Code(code) = key {
                c.status_code(*code);
            }
            if let Some(response) = response.as_item() {
                check_response(c, response);
            }
        });
    }
}

fn check_response(checker: &mut Checker<'_>, response: &Response) {
    if let Some(schema) = &response.schema {
        checker.at("schema", |c| check_schema_or_ref(c, schema));
    }
    checker.at("headers", |c| {
        for (name, header) in response.headers.iter().flatten() {
            c.at(name, |c| check_header(c, header));
        }
    });
}

fn check_schema_or_ref(checker: &mut Checker<'_>, schema: &SchemaOrRef) {
    if let Some(schema) = schema.as_item() {
        check_schema(checker, schema);
    }
}

fn check_schema(checker: &mut Checker<'_>, schema: &Schema) {
    let required = schema.required.as_deref().unwrap_or_default();

    if let Some(discriminator) = &schema.discriminator {
        checker.at("discriminator", |c| {
            let defined = schema
                .properties
                .as_ref()
                .is_some_and(|properties| properties.contains_key(discriminator));
            if !defined {
                c.report(ShapeError::DiscriminatorNotDefined(discriminator.clone()));
            }
            if !required.contains(discriminator) {
                c.report(ShapeError::DiscriminatorNotRequired(discriminator.clone()));
            }
        });
    }

    check_read_only_required(
        checker,
        required,
        schema.properties.iter().flatten().map(|(name, property)| {
            (
                name.as_str(),
                property.as_item().is_some_and(Schema::is_read_only),
            )
        }),
    );

    checker.at("properties", |c| {
        for (name, property) in schema.properties.iter().flatten() {
            c.at(name, |c| check_schema_or_ref(c, property));
        }
    });
    if let Some(items) = &schema.items {
        checker.at("items", |c| check_schema_or_ref(c, items));
    }
    checker.at("allOf", |c| {
        for (i, member) in schema.all_of.iter().flatten().enumerate() {
            c.at(i, |c| check_schema_or_ref(c, member));
        }
    });
    if let Some(AdditionalProperties::Schema(additional)) =
        &schema.additional_properties
    {
        checker.at("additionalProperties", |c| check_schema_or_ref(c, additional));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StatusCodePolicy;

    fn violations(yaml: &str, options: &CheckOptions) -> Vec<(String, ShapeError)> {
        let doc: Swagger = serde_yaml_ng::from_str(yaml).unwrap();
        let found = match doc.check(options) {
            Ok(warnings) => warnings,
            Err(violations) => violations.0,
        };
        found.into_iter().map(|v| (v.pointer, v.error)).collect()
    }

    const HEAD: &str = "swagger: '2.0'\ninfo: {title: t, version: '1'}\n";

    #[test]
    fn clean_document_passes() {
        let yaml = format!(
            "{HEAD}paths:
  /pets/{{petId}}:
    get:
      operationId: getPet
      parameters:
        - {{name: petId, in: path, required: true, type: string}}
      responses:
        200: {{description: ok}}
"
        );
        let doc: Swagger = serde_yaml_ng::from_str(&yaml).unwrap();
        assert!(doc.check(&CheckOptions::default()).unwrap().is_empty());
    }

    #[test]
    fn wrong_version() {
        let found = violations(
            "swagger: '3.0'\ninfo: {title: t, version: '1'}\npaths: {}\n",
            &CheckOptions::default(),
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "#/swagger");
    }

    #[test]
    fn path_parameter_rules() {
        let yaml = format!(
            "{HEAD}paths:
  /pets/{{id}}:
    parameters:
      - {{name: id, in: path, type: string}}
      - {{name: owner, in: path, required: true, type: string}}
    get:
      responses:
        default: {{description: ok}}
"
        );
        let found = violations(&yaml, &CheckOptions::default());
        assert_eq!(
            found,
            vec![
                (
                    "#/paths/~1pets~1{id}/parameters/0".to_string(),
                    ShapeError::PathParameterNotRequired("id".into())
                ),
                (
                    "#/paths/~1pets~1{id}/parameters/1".to_string(),
                    ShapeError::PathParameterNotInTemplate {
                        name: "owner".into(),
                        path: "/pets/{id}".into()
                    }
                ),
            ]
        );
    }

    #[test]
    fn body_rules_see_merged_parameters() {
        let yaml = format!(
            "{HEAD}paths:
  /pets:
    parameters:
      - {{name: pet, in: body, schema: {{type: object}}}}
    post:
      parameters:
        - {{name: other, in: body, schema: {{type: object}}}}
        - {{name: upload, in: formData, type: file}}
      responses:
        201: {{description: created}}
"
        );
        let found = violations(&yaml, &CheckOptions::default());
        let errors: Vec<&ShapeError> = found.iter().map(|(_, e)| e).collect();
        assert_eq!(
            errors,
            vec![&ShapeError::MultipleBodyParameters, &ShapeError::BodyAndFormData]
        );
        assert_eq!(found[0].0, "#/paths/~1pets/post");
    }

    #[test]
    fn simple_parameter_rules() {
        let yaml = format!(
            "{HEAD}paths: {{}}
parameters:
  tags: {{name: tags, in: header, type: array, collectionFormat: multi}}
  avatar: {{name: avatar, in: query, type: file}}
  flag: {{name: flag, in: path, required: true, type: boolean, allowEmptyValue: true}}
"
        );
        let found = violations(&yaml, &CheckOptions::default());
        let errors: Vec<ShapeError> = found.into_iter().map(|(_, e)| e).collect();
        assert_eq!(
            errors,
            vec![
                ShapeError::MissingItems,
                ShapeError::MultiCollectionFormat {
                    name: "tags".into(),
                    location: "header".into()
                },
                ShapeError::FileOutsideFormData("avatar".into()),
                ShapeError::AllowEmptyValueLocation {
                    name: "flag".into(),
                    location: "path".into()
                },
            ]
        );
    }

    #[test]
    fn schema_and_type_conflict() {
        let yaml = format!(
            "{HEAD}paths: {{}}
parameters:
  pet: {{name: pet, in: body, type: string, schema: {{type: object}}}}
  q: {{name: q, in: query, type: string, schema: {{type: string}}}}
  plain: {{name: plain, in: query, type: string}}
"
        );
        let found = violations(&yaml, &CheckOptions::default());
        assert_eq!(
            found,
            vec![
                (
                    "#/parameters/pet".to_string(),
                    ShapeError::SchemaAndType("pet".into())
                ),
                (
                    "#/parameters/q".to_string(),
                    ShapeError::SchemaAndType("q".into())
                ),
            ]
        );
    }

    #[test]
    fn discriminator_and_read_only() {
        let yaml = format!(
            "{HEAD}paths: {{}}
definitions:
  Pet:
    type: object
    discriminator: petType
    required: [id]
    properties:
      id: {{type: integer, readOnly: true}}
"
        );
        let found = violations(&yaml, &CheckOptions::default());
        assert_eq!(
            found,
            vec![
                (
                    "#/definitions/Pet/discriminator".to_string(),
                    ShapeError::DiscriminatorNotDefined("petType".into())
                ),
                (
                    "#/definitions/Pet/discriminator".to_string(),
                    ShapeError::DiscriminatorNotRequired("petType".into())
                ),
                (
                    "#/definitions/Pet/properties/id".to_string(),
                    ShapeError::ReadOnlyRequired("id".into())
                ),
            ]
        );
    }

    #[test]
    fn responses_and_security() {
        let yaml = format!(
            "{HEAD}securityDefinitions:
  key: {{type: apiKey, name: k, in: header}}
security:
  - key: []
  - oauth: [read]
paths:
  /a:
    get:
      responses: {{}}
  /b:
    get:
      responses:
        418:
          description: teapot
          headers:
            X-List: {{type: array}}
"
        );
        let options = CheckOptions {
            status_codes: StatusCodePolicy::Registered,
            ..CheckOptions::default()
        };
        let found = violations(&yaml, &options);
        assert_eq!(
            found,
            vec![
                (
                    "#/paths/~1a/get/responses".to_string(),
                    ShapeError::EmptyResponses
                ),
                (
                    "#/paths/~1b/get/responses/418".to_string(),
                    ShapeError::UnregisteredStatusCode(418)
                ),
                (
                    "#/paths/~1b/get/responses/418/headers/X-List".to_string(),
                    ShapeError::MissingItems
                ),
                (
                    "#/security/1/oauth".to_string(),
                    ShapeError::UnknownSecurityScheme("oauth".into())
                ),
            ]
        );
    }
}

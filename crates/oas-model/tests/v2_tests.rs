use oas_model::v2::{
    self, OAuth2Flow, Parameter, ParameterLocation, ResponseKey, SecurityScheme, Swagger,
};
use oas_model::{CheckOptions, HttpMethod, ShapeError, StatusCode, StatusCodePolicy};
use pretty_assertions::assert_eq;

const PETSTORE: &str = include_str!("fixtures/petstore-2.0.yaml");

fn petstore() -> Swagger {
    serde_yaml_ng::from_str(PETSTORE).expect("should parse petstore 2.0")
}

fn errors(doc: &Swagger, options: &CheckOptions) -> Vec<(String, ShapeError)> {
    let found = match doc.check(options) {
        Ok(warnings) => warnings,
        Err(violations) => violations.0,
    };
    found.into_iter().map(|v| (v.pointer, v.error)).collect()
}

fn with_paths(paths: &str) -> Swagger {
    let yaml = format!("swagger: '2.0'\ninfo: {{title: t, version: '1'}}\npaths:\n{paths}");
    serde_yaml_ng::from_str(&yaml).expect("should parse document")
}

#[test]
fn path_parameter_must_be_required() {
    let valid: Parameter = serde_json::from_str(
        r#"{"name": "id", "in": "path", "required": true, "type": "integer"}"#,
    )
    .expect("should parse path parameter");
    assert_eq!(valid.location(), ParameterLocation::Path);
    assert!(valid.is_required());

    let ok = with_paths(
        "  /items/{id}:
    get:
      parameters:
        - {name: id, in: path, required: true, type: integer}
      responses:
        200: {description: ok}
",
    );
    assert!(errors(&ok, &CheckOptions::default()).is_empty());

    let bad = with_paths(
        "  /items/{id}:
    get:
      parameters:
        - {name: id, in: path, required: false, type: integer}
      responses:
        200: {description: ok}
",
    );
    assert_eq!(
        errors(&bad, &CheckOptions::default()),
        vec![(
            "#/paths/~1items~1{id}/get/parameters/0".to_string(),
            ShapeError::PathParameterNotRequired("id".into())
        )]
    );
}

#[test]
fn body_parameters_carry_schema_others_carry_type() {
    let body: Parameter = serde_json::from_str(
        r##"{"name": "pet", "in": "body", "schema": {"$ref": "#/definitions/Pet"}}"##,
    )
    .expect("should parse body parameter");
    assert!(body.schema().is_some());
    assert!(body.as_simple().is_none());

    // A body parameter without a schema, or a typed parameter without a type.
    let typed_body: Result<Parameter, _> =
        serde_json::from_str(r#"{"name": "pet", "in": "body", "type": "string"}"#);
    assert!(typed_body.is_err());

    let untyped_query: Result<Parameter, _> = serde_json::from_str(
        r##"{"name": "q", "in": "query", "schema": {"$ref": "#/definitions/Q"}}"##,
    );
    assert!(untyped_query.is_err());
}

#[test]
fn schema_next_to_type_is_reported() {
    let doc = with_paths(
        "  /pets:
    post:
      parameters:
        - {name: pet, in: body, type: object, schema: {type: object}}
        - {name: q, in: query, type: string, schema: {type: string}}
      responses:
        201: {description: created}
",
    );
    assert_eq!(
        errors(&doc, &CheckOptions::default()),
        vec![
            (
                "#/paths/~1pets/post/parameters/0".to_string(),
                ShapeError::SchemaAndType("pet".into())
            ),
            (
                "#/paths/~1pets/post/parameters/1".to_string(),
                ShapeError::SchemaAndType("q".into())
            ),
        ]
    );

    let encoded = serde_json::to_value(&doc).expect("should encode");
    let parameters = &encoded["paths"]["/pets"]["post"]["parameters"];
    assert_eq!(parameters[0]["type"], "object");
    assert_eq!(parameters[1]["schema"]["type"], "string");
}

#[test]
fn locations_and_types_are_closed() {
    for json in [
        r#"{"name": "c", "in": "cookie", "type": "string"}"#,
        r#"{"name": "q", "in": "query", "type": "date"}"#,
        r#"{"name": "q", "in": "query", "type": "array", "collectionFormat": "json"}"#,
    ] {
        let result: Result<Parameter, _> = serde_json::from_str(json);
        assert!(result.is_err(), "should reject {json}");
    }

    let scheme: Result<SecurityScheme, _> =
        serde_json::from_str(r#"{"type": "http", "scheme": "bearer"}"#);
    assert!(scheme.is_err());
}

#[test]
fn responses_keys() {
    let responses: v2::Responses = serde_yaml_ng::from_str(
        r#"
200: {description: ok}
'404': {description: missing}
default: {description: error}
"#,
    )
    .expect("should parse responses");
    let keys: Vec<ResponseKey> = responses.keys().copied().collect();
    assert_eq!(
        keys,
        vec![
            ResponseKey::Code(StatusCode::new(200).expect("valid code")),
            ResponseKey::Code(StatusCode::new(404).expect("valid code")),
            ResponseKey::Default,
        ]
    );

    for bad in ["{\"4XX\": {\"description\": \"x\"}}", "{\"20\": {\"description\": \"x\"}}"] {
        let result: Result<v2::Responses, _> = serde_json::from_str(bad);
        assert!(result.is_err(), "should reject {bad}");
    }
}

#[test]
fn petstore_operations() {
    let doc = petstore();
    let item = &doc.paths["/pets/{petId}"];
    let methods: Vec<HttpMethod> = item.operations().into_iter().map(|(m, _)| m).collect();
    assert_eq!(methods, vec![HttpMethod::Get, HttpMethod::Delete]);

    let delete = item.delete.as_ref().expect("should have DELETE");
    assert!(delete.is_deprecated());
    let merged = item.merged_parameters(delete);
    assert_eq!(merged.len(), 2);

    let find = doc.paths["/pets"].get.as_ref().expect("should have GET");
    let parameters = find.parameters.as_deref().expect("should have parameters");
    assert!(parameters[1].is_reference());
    assert!(find.responses[&ResponseKey::Default].is_reference());

    let get = item.get.as_ref().expect("should have GET");
    let security = get.security.as_ref().expect("should override security");
    assert!(security[0]["api_key"].is_empty());
}

#[test]
fn petstore_security_definitions() {
    let doc = petstore();
    let definitions = doc
        .security_definitions
        .as_ref()
        .expect("should declare security");
    match &definitions["petstore_auth"] {
        SecurityScheme::OAuth2(oauth) => {
            assert!(matches!(oauth.flow, OAuth2Flow::Implicit { .. }));
            assert_eq!(
                oauth.flow.authorization_url(),
                Some("http://petstore.swagger.io/oauth/dialog")
            );
            assert_eq!(oauth.flow.token_url(), None);
            assert_eq!(oauth.scopes.len(), 2);
        }
        other => panic!("expected oauth2, got {other:?}"),
    }
    assert_eq!(
        definitions["basic"].description(),
        Some("HTTP basic authentication")
    );
}

#[test]
fn registered_status_policy() {
    let doc = with_paths(
        "  /things:
    get:
      responses:
        201: {description: created}
        299: {description: made up}
",
    );
    assert!(errors(&doc, &CheckOptions::default()).is_empty());

    let registered = CheckOptions {
        status_codes: StatusCodePolicy::Registered,
        ..CheckOptions::default()
    };
    assert_eq!(
        errors(&doc, &registered),
        vec![(
            "#/paths/~1things/get/responses/299".to_string(),
            ShapeError::UnregisteredStatusCode(299)
        )]
    );
}

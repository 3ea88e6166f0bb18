use indexmap::IndexMap;

use crate::check::{
    Check, Checker, check_path_keys, check_read_only_required, check_unique_parameters,
    is_valid_component_name, template_parameters,
};
use crate::config::CheckOptions;
use crate::error::{ShapeError, Violation, Violations};

use super::components::Components;
use super::media_type::{Example, ExampleOrRef, MediaType};
use super::operation::{Operation, PathItem};
use super::parameter::{Header, Parameter, ParameterLocation, ParameterOrRef};
use super::response::{Link, Response, ResponseKey, Responses};
use super::schema::{Schema, SchemaOrRef, SchemaType};
use super::security::SecuritySchemeOrRef;
use super::server::Server;
use super::spec::OpenApi;

/// Header parameters that tooling controls and consumers ignore.
const RESERVED_HEADERS: [&str; 3] = ["Accept", "Content-Type", "Authorization"];

impl Check for OpenApi {
    fn check_with(&self, checker: &mut Checker<'_>) {
        log::trace!("checking openapi {} document {:?}", self.openapi, self.info.title);

        if !self.is_supported_version() {
            checker.at("openapi", |c| {
                c.report(ShapeError::UnsupportedVersion {
                    found: self.openapi.clone(),
                    expected: "3.0.x",
                })
            });
        }

        checker.at("servers", |c| check_servers(c, self.servers.as_deref().unwrap_or_default()));

        let schemes = self
            .components
            .as_ref()
            .and_then(|components| components.security_schemes.as_ref());

        checker.at("paths", |c| {
            check_path_keys(c, self.paths.keys().map(String::as_str));
            for (path, item) in &self.paths {
                c.at(path, |c| check_path_item(c, schemes, Some(path.as_str()), item));
            }
        });

        if let Some(components) = &self.components {
            checker.at("components", |c| check_components(c, schemes, components));
        }

        if let Some(security) = &self.security {
            checker.at("security", |c| c.security_requirements(security, schemes));
        }
    }
}

impl OpenApi {
    /// Check the document's structural rules. Warnings alone pass unless
    /// `deny_warnings` is set.
    pub fn check(&self, options: &CheckOptions) -> Result<Vec<Violation>, Violations> {
        crate::check::run(self, options)
    }
}

type Schemes = IndexMap<String, SecuritySchemeOrRef>;

fn check_servers(checker: &mut Checker<'_>, servers: &[Server]) {
    for (i, server) in servers.iter().enumerate() {
        for (name, variable) in server.variables.iter().flatten() {
            if !variable.default_is_allowed() {
                checker.at(i, |c| {
                    c.at("variables", |c| {
                        c.at(name, |c| {
                            c.report(ShapeError::ServerVariableDefault {
                                name: name.clone(),
                                default: variable.default.clone(),
                            })
                        })
                    })
                });
            }
        }
    }
}

/// `path` is the template owning the item, `None` inside callbacks whose keys
/// are runtime expressions.
fn check_path_item(checker: &mut Checker<'_>, schemes: Option<&Schemes>, path: Option<&str>, item: &PathItem) {
    checker.at("servers", |c| check_servers(c, item.servers.as_deref().unwrap_or_default()));
    checker.at("parameters", |c| {
        check_parameter_list(c, item.parameters.as_deref().unwrap_or_default(), path)
    });

    for (method, operation) in item.operations() {
        checker.at(method, |c| check_operation(c, schemes, path, operation));
    }
}

fn check_operation(checker: &mut Checker<'_>, schemes: Option<&Schemes>, path: Option<&str>, operation: &Operation) {
    if let Some(id) = &operation.operation_id {
        checker.operation_id(id);
    }

    checker.at("parameters", |c| {
        check_parameter_list(c, operation.parameters.as_deref().unwrap_or_default(), path)
    });

    if let Some(body) = operation.request_body.as_ref().and_then(|b| b.as_item()) {
        checker.at("requestBody", |c| c.at("content", |c| check_content(c, Some(&body.content))));
    }

    checker.at("responses", |c| check_responses(c, &operation.responses));

    checker.at("callbacks", |c| {
        for (name, callback) in operation.callbacks.iter().flatten() {
            let Some(callback) = callback.as_item() else {
                continue;
            };
            c.at(name, |c| {
                for (expression, item) in callback {
                    c.at(expression, |c| check_path_item(c, schemes, None, item));
                }
            });
        }
    });

    if let Some(security) = &operation.security {
        checker.at("security", |c| c.security_requirements(security, schemes));
    }

    checker.at("servers", |c| check_servers(c, operation.servers.as_deref().unwrap_or_default()));
}

fn check_parameter_list(checker: &mut Checker<'_>, parameters: &[ParameterOrRef], path: Option<&str>) {
    check_unique_parameters(
        checker,
        parameters.iter().enumerate().filter_map(|(i, p)| {
            p.as_item().map(|p| (i, p.name.as_str(), p.location.as_str()))
        }),
    );
    for (i, parameter) in parameters.iter().enumerate() {
        if let Some(parameter) = parameter.as_item() {
            checker.at(i, |c| check_parameter(c, parameter, path));
        }
    }
}

fn check_parameter(checker: &mut Checker<'_>, parameter: &Parameter, path: Option<&str>) {
    let name = &parameter.name;
    let location = parameter.location;

    if location == ParameterLocation::Path {
        if !parameter.is_required() {
            checker.report(ShapeError::PathParameterNotRequired(name.clone()));
        }
        if let Some(path) = path {
            if !template_parameters(path).contains(&name.as_str()) {
                checker.report(ShapeError::PathParameterNotInTemplate {
                    name: name.clone(),
                    path: path.to_string(),
                });
            }
        }
    }

    match (&parameter.schema, &parameter.content) {
        (Some(_), Some(_)) => checker.report(ShapeError::SchemaAndContent),
        (None, None) => checker.report(ShapeError::MissingSchemaOrContent(name.clone())),
        _ => {}
    }
    check_content_entries(checker, parameter.content.as_ref());
    if parameter.example.is_some() && parameter.examples.is_some() {
        checker.report(ShapeError::ExampleAndExamples);
    }

    if let Some(style) = parameter.style {
        if !style.allowed_in(location) {
            checker.at("style", |c| {
                c.report(ShapeError::StyleNotAllowed {
                    style: style.to_string(),
                    location: location.to_string(),
                })
            });
        }
    }
    if location != ParameterLocation::Query {
        if parameter.allow_empty_value.is_some() {
            checker.report(ShapeError::AllowEmptyValueLocation {
                name: name.clone(),
                location: location.to_string(),
            });
        }
        if parameter.allow_reserved.is_some() {
            checker.report(ShapeError::AllowReservedLocation {
                name: name.clone(),
                location: location.to_string(),
            });
        }
    }
    if location == ParameterLocation::Header
        && RESERVED_HEADERS.iter().any(|h| h.eq_ignore_ascii_case(name))
    {
        checker.report(ShapeError::IgnoredHeaderParameter(name.clone()));
    }

    if let Some(schema) = &parameter.schema {
        checker.at("schema", |c| check_schema_or_ref(c, schema));
    }
    checker.at("examples", |c| check_examples(c, parameter.examples.as_ref()));
    checker.at("content", |c| check_content(c, parameter.content.as_ref()));
}

fn check_header(checker: &mut Checker<'_>, header: &Header) {
    if header.schema.is_some() && header.content.is_some() {
        checker.report(ShapeError::SchemaAndContent);
    }
    check_content_entries(checker, header.content.as_ref());
    if header.example.is_some() && header.examples.is_some() {
        checker.report(ShapeError::ExampleAndExamples);
    }
    if let Some(schema) = &header.schema {
        checker.at("schema", |c| check_schema_or_ref(c, schema));
    }
    checker.at("examples", |c| check_examples(c, header.examples.as_ref()));
    checker.at("content", |c| check_content(c, header.content.as_ref()));
}

/// A parameter or header `content` map holds exactly one media type.
fn check_content_entries(checker: &mut Checker<'_>, content: Option<&IndexMap<String, MediaType>>) {
    if let Some(content) = content.filter(|content| content.len() != 1) {
        checker.at("content", |c| c.report(ShapeError::ContentEntryCount(content.len())));
    }
}

fn check_content(checker: &mut Checker<'_>, content: Option<&IndexMap<String, MediaType>>) {
    for (media_type, media) in content.into_iter().flatten() {
        checker.at(media_type, |c| check_media_type(c, media));
    }
}

fn check_media_type(checker: &mut Checker<'_>, media: &MediaType) {
    if media.example.is_some() && media.examples.is_some() {
        checker.report(ShapeError::ExampleAndExamples);
    }
    if let Some(schema) = &media.schema {
        checker.at("schema", |c| check_schema_or_ref(c, schema));
    }
    checker.at("examples", |c| check_examples(c, media.examples.as_ref()));
    checker.at("encoding", |c| {
        for (property, encoding) in media.encoding.iter().flatten() {
            c.at(property, |c| {
                c.at("headers", |c| {
                    for (name, header) in encoding.headers.iter().flatten() {
                        if let Some(header) = header.as_item() {
                            c.at(name, |c| check_header(c, header));
                        }
                    }
                })
            });
        }
    });
}

fn check_examples(checker: &mut Checker<'_>, examples: Option<&IndexMap<String, ExampleOrRef>>) {
    for (name, example) in examples.into_iter().flatten() {
        if let Some(example) = example.as_item() {
            checker.at(name, |c| check_example(c, example));
        }
    }
}

fn check_example(checker: &mut Checker<'_>, example: &Example) {
    if example.value.is_some() && example.external_value.is_some() {
        checker.report(ShapeError::ValueAndExternalValue);
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
    checker.at("headers", |c| {
        for (name, header) in response.headers.iter().flatten() {
            c.at(name, |c| {
                if name.eq_ignore_ascii_case("Content-Type") {
                    c.report(ShapeError::IgnoredContentTypeHeader);
                }
                if let Some(header) = header.as_item() {
                    check_header(c, header);
                }
            });
        }
    });
    checker.at("content", |c| check_content(c, response.content.as_ref()));
    checker.at("links", |c| {
        for (name, link) in response.links.iter().flatten() {
            if let Some(link) = link.as_item() {
                c.at(name, |c| check_link(c, link));
            }
        }
    });
}

fn check_link(checker: &mut Checker<'_>, link: &Link) {
    if link.operation_ref.is_some() && link.operation_id.is_some() {
        checker.report(ShapeError::OperationRefAndOperationId);
    }
    if let Some(server) = &link.server {
        checker.at("server", |c| check_servers(c, std::slice::from_ref(server)));
    }
}

fn check_schema_or_ref(checker: &mut Checker<'_>, schema: &SchemaOrRef) {
    if let Some(schema) = schema.as_item() {
        check_schema(checker, schema);
    }
}

fn check_schema(checker: &mut Checker<'_>, schema: &Schema) {
    if schema.is_read_only() && schema.is_write_only() {
        checker.report(ShapeError::ReadOnlyAndWriteOnly);
    }
    if schema.schema_type == Some(SchemaType::Array) && schema.items.is_none() {
        checker.report(ShapeError::MissingItems);
    }

    check_read_only_required(
        checker,
        schema.required.as_deref().unwrap_or_default(),
        schema.properties.iter().flatten().map(|(name, property)| {
            (
                name.as_str(),
                property.as_item().is_some_and(Schema::is_read_only),
            )
        }),
    );

    for (segments, child) in schema.subschemas() {
        descend(checker, &segments, |c| check_schema_or_ref(c, child));
    }
}

fn descend(checker: &mut Checker<'_>, segments: &[String], f: impl FnOnce(&mut Checker<'_>)) {
    match segments.split_first() {
        Some((first, rest)) => checker.at(first, |c| descend(c, rest, f)),
        None => f(checker),
    }
}

fn check_components(checker: &mut Checker<'_>, schemes: Option<&Schemes>, components: &Components) {
    for (section, name) in components.names() {
        if !is_valid_component_name(name) {
            checker.at(section, |c| {
                c.at(name, |c| c.report(ShapeError::InvalidComponentName(name.to_string())))
            });
        }
    }

    checker.at("schemas", |c| {
        for (name, schema) in components.schemas.iter().flatten() {
            c.at(name, |c| check_schema_or_ref(c, schema));
        }
    });
    checker.at("responses", |c| {
        for (name, response) in components.responses.iter().flatten() {
            if let Some(response) = response.as_item() {
                c.at(name, |c| check_response(c, response));
            }
        }
    });
    checker.at("parameters", |c| {
        for (name, parameter) in components.parameters.iter().flatten() {
            if let Some(parameter) = parameter.as_item() {
                c.at(name, |c| check_parameter(c, parameter, None));
            }
        }
    });
    checker.at("examples", |c| check_examples(c, components.examples.as_ref()));
    checker.at("requestBodies", |c| {
        for (name, body) in components.request_bodies.iter().flatten() {
            if let Some(body) = body.as_item() {
                c.at(name, |c| c.at("content", |c| check_content(c, Some(&body.content))));
            }
        }
    });
    checker.at("headers", |c| {
        for (name, header) in components.headers.iter().flatten() {
            if let Some(header) = header.as_item() {
                c.at(name, |c| check_header(c, header));
            }
        }
    });
    checker.at("links", |c| {
        for (name, link) in components.links.iter().flatten() {
            if let Some(link) = link.as_item() {
                c.at(name, |c| check_link(c, link));
            }
        }
    });
    checker.at("callbacks", |c| {
        for (name, callback) in components.callbacks.iter().flatten() {
            let Some(callback) = callback.as_item() else {
                continue;
            };
            c.at(name, |c| {
                for (expression, item) in callback {
                    c.at(expression, |c| check_path_item(c, schemes, None, item));
                }
            });
        }
    });
}

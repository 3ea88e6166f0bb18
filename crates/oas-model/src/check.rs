//! Read-only walks that report structural rules the types cannot express.
//!
//! Every rule reports into a [`Checker`], which tracks where in the document
//! the walk currently is as a JSON pointer. `$ref` entries are never
//! followed.

use std::collections::HashMap;
use std::fmt::Display;

use indexmap::IndexMap;

use crate::config::{CheckOptions, StatusCodePolicy};
use crate::error::{Severity, ShapeError, Violation, Violations};
use crate::http::StatusCode;

/// A value whose invariants can be checked.
pub trait Check {
    fn check_with(&self, checker: &mut Checker<'_>);
}

/// Collects violations while walking a document.
pub struct Checker<'a> {
    options: &'a CheckOptions,
    segments: Vec<String>,
    violations: Vec<Violation>,
    operation_ids: HashMap<String, String>,
}

impl<'a> Checker<'a> {
    pub fn new(options: &'a CheckOptions) -> Self {
        Self {
            options,
            segments: Vec::new(),
            violations: Vec::new(),
            operation_ids: HashMap::new(),
        }
    }

    pub fn options(&self) -> &CheckOptions {
        self.options
    }

    /// Run `f` one level deeper in the document.
    pub fn at<R>(&mut self, segment: impl Display, f: impl FnOnce(&mut Self) -> R) -> R {
        self.segments.push(segment.to_string());
        let result = f(self);
        self.segments.pop();
        result
    }

    /// The current location as a URI fragment JSON pointer, e.g.
    /// `#/paths/~1pets/get`.
    pub fn pointer(&self) -> String {
        let mut pointer = String::from("#");
        for segment in &self.segments {
            pointer.push('/');
            pointer.push_str(&escape_json_pointer_segment(segment));
        }
        pointer
    }

    /// Record a violation at the current location.
    pub fn report(&mut self, error: ShapeError) {
        let violation = Violation {
            pointer: self.pointer(),
            severity: error.severity(),
            error,
        };
        log::debug!("{violation}");
        self.violations.push(violation);
    }

    /// Record an operationId, reporting it if another operation already
    /// claimed it.
    pub fn operation_id(&mut self, id: &str) {
        if !self.options.unique_operation_ids {
            return;
        }
        match self.operation_ids.get(id).cloned() {
            Some(first) => {
                log::trace!("operationId {id:?} first seen at {first}");
                self.report(ShapeError::DuplicateOperationId(id.to_string()));
            }
            None => {
                let pointer = self.pointer();
                self.operation_ids.insert(id.to_string(), pointer);
            }
        }
    }

    /// Apply the configured status code policy to a Responses key.
    pub fn status_code(&mut self, code: StatusCode) {
        if self.options.status_codes == StatusCodePolicy::Registered && !code.is_registered() {
            self.report(ShapeError::UnregisteredStatusCode(code.as_u16()));
        }
    }

    /// Report security requirement names missing from `declared`.
    pub fn security_requirements<V>(
        &mut self,
        requirements: &[IndexMap<String, Vec<String>>],
        declared: Option<&IndexMap<String, V>>,
    ) {
        if !self.options.security_requirements {
            return;
        }
        for (i, requirement) in requirements.iter().enumerate() {
            self.at(i, |c| {
                for name in requirement.keys() {
                    if !declared.is_some_and(|declared| declared.contains_key(name)) {
                        c.at(name, |c| {
                            c.report(ShapeError::UnknownSecurityScheme(name.clone()))
                        });
                    }
                }
            });
        }
    }

    /// Split the collected violations into success (warnings only) or
    /// failure.
    pub fn finish(self) -> Result<Vec<Violation>, Violations> {
        let failed = self.violations.iter().any(|v| v.severity == Severity::Error)
            || (self.options.deny_warnings && !self.violations.is_empty());
        if failed {
            Err(Violations(self.violations))
        } else {
            Ok(self.violations)
        }
    }
}

/// Check a whole value with fresh state.
pub fn run<T: Check + ?Sized>(value: &T, options: &CheckOptions) -> Result<Vec<Violation>, Violations> {
    let mut checker = Checker::new(options);
    value.check_with(&mut checker);
    checker.finish()
}

/// Escape a segment for use in a JSON pointer per RFC 6901.
fn escape_json_pointer_segment(segment: &str) -> String {
    segment.replace('~', "~0").replace('/', "~1")
}

/// Names of the `{param}` segments of a path template, in order.
pub(crate) fn template_parameters(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    names
}

/// The template with every parameter name erased, so `/pets/{id}` and
/// `/pets/{petId}` compare equal.
fn template_shape(path: &str) -> String {
    let mut shape = String::with_capacity(path.len());
    let mut in_param = false;
    for c in path.chars() {
        match c {
            '{' => {
                in_param = true;
                shape.push('{');
            }
            '}' => {
                in_param = false;
                shape.push('}');
            }
            _ if in_param => {}
            _ => shape.push(c),
        }
    }
    shape
}

/// Path keys must start with `/` and be distinct templates. Runs with the
/// checker positioned at the `paths` object.
pub(crate) fn check_path_keys<'p>(checker: &mut Checker<'_>, paths: impl Iterator<Item = &'p str>) {
    let mut shapes: HashMap<String, &str> = HashMap::new();
    for path in paths {
        checker.at(path, |c| {
            if !path.starts_with('/') {
                c.report(ShapeError::PathMissingSlash(path.to_string()));
            }
            let shape = template_shape(path);
            if let Some(other) = shapes.get(&shape) {
                c.report(ShapeError::DuplicatePathTemplate {
                    path: path.to_string(),
                    other: other.to_string(),
                });
            } else {
                shapes.insert(shape, path);
            }
        });
    }
}

/// Report repeated (`name`, `in`) pairs in a parameter list. Runs with the
/// checker positioned at the list.
pub(crate) fn check_unique_parameters<'p>(
    checker: &mut Checker<'_>,
    parameters: impl Iterator<Item = (usize, &'p str, &'static str)>,
) {
    let mut seen: Vec<(&str, &str)> = Vec::new();
    for (i, name, location) in parameters {
        if seen.contains(&(name, location)) {
            checker.at(i, |c| {
                c.report(ShapeError::DuplicateParameter {
                    name: name.to_string(),
                    location: location.to_string(),
                })
            });
        } else {
            seen.push((name, location));
        }
    }
}

/// Component names are restricted to `[a-zA-Z0-9.\-_]+`.
pub(crate) fn is_valid_component_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_'))
}

/// Warn about readOnly properties that are also required.
pub(crate) fn check_read_only_required<'s>(
    checker: &mut Checker<'_>,
    required: &[String],
    read_only: impl Iterator<Item = (&'s str, bool)>,
) {
    for (name, is_read_only) in read_only {
        if is_read_only && required.iter().any(|r| r == name) {
            checker.at("properties", |c| {
                c.at(name, |c| c.report(ShapeError::ReadOnlyRequired(name.to_string())))
            });
        }
    }
}

use serde::{Deserialize, Serialize};

/// Options for the invariant checks, embeddable in a host tool's config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckOptions {
    pub status_codes: StatusCodePolicy,
    /// Flag operationIds shared by more than one operation.
    pub unique_operation_ids: bool,
    /// Flag security requirements naming schemes the document never declares.
    pub security_requirements: bool,
    /// Treat warnings as failures.
    pub deny_warnings: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            status_codes: StatusCodePolicy::Any,
            unique_operation_ids: true,
            security_requirements: true,
            deny_warnings: false,
        }
    }
}

/// Which numeric Responses keys are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCodePolicy {
    /// Any three-digit code in `100..=599`.
    #[default]
    Any,
    /// Only codes from the HTTP status code registry.
    Registered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = CheckOptions::default();
        assert_eq!(options.status_codes, StatusCodePolicy::Any);
        assert!(options.unique_operation_ids);
        assert!(options.security_requirements);
        assert!(!options.deny_warnings);
    }

    #[test]
    fn test_parse_options_yaml() {
        let yaml = r#"
status_codes: registered
unique_operation_ids: false
security_requirements: false
deny_warnings: true
"#;
        let options: CheckOptions = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(options.status_codes, StatusCodePolicy::Registered);
        assert!(!options.unique_operation_ids);
        assert!(!options.security_requirements);
        assert!(options.deny_warnings);
    }

    #[test]
    fn test_parse_minimal_options() {
        let yaml = "deny_warnings: true\n";
        let options: CheckOptions = serde_yaml_ng::from_str(yaml).unwrap();
        assert!(options.deny_warnings);
        // Defaults applied
        assert_eq!(options.status_codes, StatusCodePolicy::Any);
        assert!(options.unique_operation_ids);
    }
}

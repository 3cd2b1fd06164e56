use crate::domain::error::DomainError;

/// Centralized domain validation.
///
/// Precondition checks that must pass before anything touches the disk.
pub struct DomainValidator;

impl DomainValidator {
    /// A project name becomes a directory name, so it must be a single,
    /// visible path segment.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        let invalid = |reason: &str| DomainError::InvalidProjectName {
            name: name.into(),
            reason: reason.into(),
        };

        if name.trim().is_empty() {
            return Err(invalid("name cannot be empty"));
        }
        if name.trim() != name {
            return Err(invalid("name cannot start or end with whitespace"));
        }
        if name.starts_with('.') {
            return Err(invalid("name cannot start with '.'"));
        }
        if name.contains('/') || name.contains('\\') {
            return Err(invalid("name cannot contain path separators"));
        }
        if name.chars().any(char::is_control) {
            return Err(invalid("name cannot contain control characters"));
        }
        Ok(())
    }
}

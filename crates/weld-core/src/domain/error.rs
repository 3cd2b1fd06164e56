// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so reports can keep a copy)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Invalid plugin identifier '{id}': {reason}")]
    InvalidPluginId { id: String, reason: String },

    #[error("Unsupported API style '{value}'")]
    InvalidApiStyle { value: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes its root: {path}")]
    PathEscapesRoot { path: String },

    // ========================================================================
    // Document Errors
    // ========================================================================
    #[error("Malformed {document}: {reason}")]
    MalformedDocument {
        document: &'static str,
        reason: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "Use alphanumeric characters, hyphens, and underscores".into(),
                "Examples: my-app, my_app, app123".into(),
            ],
            Self::InvalidPluginId { id, .. } => vec![
                format!("'{}' is not a usable plugin identifier", id),
                "Plugin identifiers look like 'category/variant', e.g. logger/default".into(),
                "List available plugins: weld list".into(),
            ],
            Self::InvalidApiStyle { value } => vec![
                format!("'{}' is not a supported API style", value),
                "Supported API styles:".into(),
                "  • rest     - REST endpoints only".into(),
                "  • graphql  - adds the Apollo GraphQL client plugin".into(),
                "Example: weld create my-app --api graphql".into(),
            ],
            Self::AbsolutePathNotAllowed { path } | Self::PathEscapesRoot { path } => vec![
                format!("Path '{}' must stay inside the plugin or project", path),
                "Use paths relative to the plugin root".into(),
            ],
            Self::MalformedDocument { document, .. } => vec![
                format!("Check the JSON syntax of the {}", document),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidPluginId { .. }
            | Self::InvalidApiStyle { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathEscapesRoot { .. } => ErrorCategory::Validation,
            Self::MalformedDocument { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}

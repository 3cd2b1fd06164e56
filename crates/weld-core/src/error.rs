//! Unified error handling for weld-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for weld-core operations.
///
/// Only fatal conditions become a `WeldError`. Per-plugin problems are
/// reported as [`crate::application::ScaffoldWarning`]s and never abort a run.
#[derive(Debug, Error, Clone)]
pub enum WeldError {
    /// Errors from the domain layer (rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),
}

impl WeldError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// `true` for precondition failures raised before any mutation.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::Domain(
                DomainError::InvalidProjectName { .. }
                    | DomainError::InvalidApiStyle { .. }
                    | DomainError::InvalidPluginId { .. }
            ) | Self::Application(ApplicationError::ProjectExists { .. })
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type WeldResult<T> = Result<T, WeldError>;

//! Application layer errors.
//!
//! These errors represent failures in orchestration, not composition rules.
//! Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {}: {reason}", .path.display())]
    FilesystemError { path: PathBuf, reason: String },

    /// Project already exists at target location.
    #[error("Project already exists at {}", .path.display())]
    ProjectExists { path: PathBuf },

    /// The plugins root itself is missing (only raised by listing).
    #[error("Plugin store not found at {}", .path.display())]
    StoreNotFound { path: PathBuf },

    /// An adapter's internal lock was poisoned.
    #[error("Filesystem lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "The project directory may be partially populated; remove it before retrying"
                    .into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name".into(),
                format!("Remove the existing directory: rm -rf {}", path.display()),
            ],
            Self::StoreNotFound { path } => vec![
                format!("No plugin directory at {}", path.display()),
                "Point weld at your plugins with --plugins-dir or WELD_STORE__PLUGINS_DIR".into(),
            ],
            Self::LockPoisoned => vec!["A previous operation panicked; retry the command".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::StoreNotFound { .. } => ErrorCategory::NotFound,
            Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}

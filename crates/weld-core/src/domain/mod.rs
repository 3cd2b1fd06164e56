//! Core domain layer for weld.
//!
//! Pure data and rules of plugin composition. Nothing in here touches the
//! filesystem; all I/O goes through the ports in the application layer.
//!
//! - **No I/O**: JSON documents arrive as strings, paths as values
//! - **Deterministic**: ordered maps everywhere output order matters
//! - **Static tables**: built-in templates and legacy shims are data, not `if`s

pub mod common;
pub mod copy_plan;
pub mod error;
pub mod legacy;
pub mod manifest;
pub mod plugin;
pub mod template;

mod validation;

pub use common::RelativePath;
pub use copy_plan::{CopyInstruction, CopyKind};
pub use error::{DomainError, ErrorCategory};
pub use legacy::{LEGACY_SHIMS, LegacyShim, shim_for};
pub use manifest::{MANIFEST_FILE, ProjectManifest};
pub use plugin::{
    CONFIG_FILE, FileEntry, LIB_DIR, MANIFEST_FRAGMENT_FILE, PathMapping, PluginConfig, PluginId,
    RESERVED_ENTRIES,
};
pub use template::{
    ApiStyle, BUILTIN_TEMPLATES, BuiltinTemplate, TEMPLATE_CONFIG_FILE, TEMPLATE_MANIFEST_FILE,
    TemplateOverride, find_builtin,
};
pub use validation::DomainValidator;

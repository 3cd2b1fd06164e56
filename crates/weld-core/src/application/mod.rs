//! Application layer for weld.
//!
//! This layer contains:
//! - **Services**: the scaffold orchestrator and the steps it drives
//! - **Ports**: the filesystem trait adapters implement
//! - **Report**: what a run produced, warnings included
//! - **Errors**: orchestration failures
//!
//! Composition rules live in `crate::domain`; this layer sequences them and
//! performs I/O through the ports.

pub mod error;
pub mod ports;
pub mod report;
pub mod services;

pub use services::{
    ScaffoldRequest, ScaffoldService, ScaffoldStage, StoreLayout,
    TemplateInfo, // DTO for template listings
};

pub use ports::Filesystem;

pub use error::ApplicationError;
pub use report::{PluginPlan, ResolutionSource, ScaffoldReport, ScaffoldWarning};

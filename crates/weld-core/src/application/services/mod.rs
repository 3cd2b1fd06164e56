//! Application services - orchestrate use cases.
//!
//! [`ScaffoldService`] is the entry point. The other services each own one
//! step of a run and borrow the filesystem port from it.

pub mod materializer;
pub mod merger;
pub mod registry;
pub mod resolver;
pub mod scaffold_service;

pub use materializer::FileMaterializer;
pub use merger::ManifestMerger;
pub use registry::{LoadedPlugin, PluginLookup, PluginRegistry};
pub use resolver::{Resolution, TemplateInfo, TemplateResolver};
pub use scaffold_service::{ScaffoldRequest, ScaffoldService, ScaffoldStage, StoreLayout};

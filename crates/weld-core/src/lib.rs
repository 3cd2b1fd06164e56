//! Weld Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for weld, a tool
//! that composes a new project out of reusable plugin directories.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │             weld-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │          Application Services           │
//! │  ScaffoldService -> Resolver, Registry, │
//! │        Merger, Materializer             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Filesystem)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   weld-adapters (Local, Memory)         │
//! └─────────────────────────────────────────┘
//!
//!     Domain layer (pure): PluginId, PluginConfig, ProjectManifest,
//!     built-in templates, legacy shims, copy instructions
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use weld_core::prelude::*;
//!
//! let service = ScaffoldService::new(
//!     Box::new(filesystem), // impl Filesystem
//!     StoreLayout::new("plugins", "templates"),
//! );
//! let report = service.scaffold(
//!     &ScaffoldRequest::new("my-app", ".")
//!         .with_template("enterprise-monorepo")
//!         .with_api("graphql"),
//! )?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

/// What external crates should use.
pub mod prelude {
    pub use crate::application::{
        ResolutionSource, ScaffoldReport, ScaffoldRequest, ScaffoldService, ScaffoldWarning,
        StoreLayout, TemplateInfo, ports::Filesystem,
    };
    pub use crate::domain::{
        ApiStyle, CopyInstruction, CopyKind, PluginConfig, PluginId, ProjectManifest,
    };
    pub use crate::error::{WeldError, WeldResult};
}

//! gradle-buildinfo - build-info extraction for Gradle projects
//!
//! This library discovers the modules of a Gradle build, reconstructs each
//! module's dependency graph (from the Gradle CLI, or from the build script
//! when the CLI is unavailable), attaches file checksums from the publish
//! manifest or the Gradle module cache, and emits one record per module.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`build_info`): coordinates, scopes, dependency trees and graphs,
//!   plus the parsers and policies that produce them
//! - **Application Layer** (`application`): the collection use case, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Gradle process runner, filesystem, console and JSON output
//! - **Shared** (`shared`): error types, path sandbox and file digests
//!
//! # Example
//!
//! ```no_run
//! use gradle_buildinfo::prelude::*;
//! use std::path::PathBuf;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> Result<()> {
//! let request = CollectRequest::new(PathBuf::from("."));
//! let sandbox = PathSandbox::new(&request.working_dir)?;
//! let executor = GradleCliExecutor::for_project(&sandbox, None, request.command_timeout);
//!
//! // Construction discovers the project's modules
//! let use_case = CollectBuildInfoUseCase::new(
//!     request,
//!     executor,
//!     FileSystemReader::new(),
//!     StderrProgressReporter::new(),
//! )?;
//!
//! let response = use_case
//!     .execute(&CancellationToken::new())
//!     .await
//!     .unwrap_or_else(|interrupted| interrupted.into_partial());
//!
//! let output = JsonBuildInfoFormatter::new().format(&response.modules)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod build_info;
pub mod config;
pub mod ports;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::JsonBuildInfoFormatter;
    pub use crate::adapters::outbound::process::GradleCliExecutor;
    pub use crate::application::dto::{CollectRequest, CollectResponse, DEFAULT_COMMAND_TIMEOUT};
    pub use crate::application::read_models::{
        BuildInfoArtifact, BuildInfoDependency, BuildInfoModule,
    };
    pub use crate::application::use_cases::CollectBuildInfoUseCase;
    pub use crate::build_info::domain::{
        Checksums, Coordinate, DependencyGraph, DependencyRecord, ModuleMetadata, Scope,
    };
    pub use crate::ports::outbound::{
        BuildInfoFormatter, BuildScriptReader, GradleExecutor, OutputPresenter, ProgressReporter,
    };
    pub use crate::shared::error::{CollectError, CommandError, GradleBuildInfoError};
    pub use crate::shared::security::PathSandbox;
    pub use crate::shared::Result;
}

use crate::application::dto::{CollectRequest, CollectResponse};
use crate::application::read_models::{BuildInfoArtifact, BuildInfoDependency, BuildInfoModule};
use crate::build_info::domain::{ArtifactRecord, ModuleMetadata, ModuleTable};
use crate::build_info::policies::{ConfigurationSelector, ScopeMapping};
use crate::build_info::services::manifest::{
    parse_manifest, MANIFEST_INIT_SCRIPT, MANIFEST_PATH_PROPERTY, MANIFEST_TASK,
};
use crate::build_info::services::{
    gradle_user_home, merge_tree, ChecksumResolver, DependencyAccumulator, DependencyTreeParser,
    DiscoveredProject, FallbackDependencyParser, ModuleCache, ModuleDependencies, ModuleDiscovery,
    ProjectModule,
};
use crate::ports::outbound::{BuildScriptReader, GradleExecutor, ProgressReporter};
use crate::shared::error::{CollectError, GradleBuildInfoError};
use crate::shared::security::PathSandbox;
use crate::shared::Result;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;
use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;

/// Flags added to every Gradle invocation
const GRADLE_QUIET_FLAGS: [&str; 2] = ["--console=plain", "-q"];

/// CollectBuildInfoUseCase - extracts build info from a Gradle project
///
/// Construction validates the working directory and discovers every module;
/// [`execute`](Self::execute) then collects one module at a time:
///
/// 1. ask Gradle for the dependency tree of each relevant configuration
/// 2. if that yields nothing, read declared dependencies from the build script
/// 3. attach checksums from the publish manifest or the Gradle module cache,
///    dropping dependencies that have none
///
/// # Type Parameters
/// * `GE` - GradleExecutor implementation
/// * `BR` - BuildScriptReader implementation
/// * `PR` - ProgressReporter implementation
pub struct CollectBuildInfoUseCase<GE, BR, PR> {
    executor: GE,
    reader: BR,
    progress_reporter: PR,
    request: CollectRequest,
    sandbox: PathSandbox,
    project: DiscoveredProject,
    cache: Option<ModuleCache>,
}

impl<GE, BR, PR> CollectBuildInfoUseCase<GE, BR, PR>
where
    GE: GradleExecutor,
    BR: BuildScriptReader,
    PR: ProgressReporter,
{
    /// Validates the working directory and discovers the project's modules
    ///
    /// # Errors
    /// Returns [`GradleBuildInfoError::InvalidWorkingDirectory`] if the
    /// working directory is empty, missing, a symbolic link or not a directory.
    pub fn new(request: CollectRequest, executor: GE, reader: BR, progress_reporter: PR) -> Result<Self> {
        validate_working_dir(&request.working_dir)?;
        let sandbox = PathSandbox::new(&request.working_dir)?;

        progress_reporter.report(&format!(
            "🔍 Discovering Gradle modules in: {}",
            sandbox.base().display()
        ));
        let project = ModuleDiscovery::new(&sandbox, &reader).discover();
        progress_reporter.report(&format!("✅ Found {} module(s)", project.modules.len()));

        let cache = gradle_user_home().and_then(|home| match ModuleCache::new(&home) {
            Ok(cache) => Some(cache),
            Err(e) => {
                tracing::warn!("Gradle module cache unavailable: {:#}", e);
                None
            }
        });

        Ok(Self {
            executor,
            reader,
            progress_reporter,
            request,
            sandbox,
            project,
            cache,
        })
    }

    /// Replaces the module cache located from the Gradle user home.
    pub fn with_module_cache(mut self, cache: Option<ModuleCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn modules(&self) -> &ModuleTable {
        &self.project.table
    }

    /// Collects build info for every discovered module
    ///
    /// Cancellation and the collection deadline are checked between modules.
    ///
    /// # Errors
    /// Returns [`CollectError`] when the call was cancelled or ran past its
    /// deadline; the error carries every module finished before that.
    pub async fn execute(&self, cancel: &CancellationToken) -> std::result::Result<CollectResponse, CollectError> {
        let started = Instant::now();
        let total = self.project.modules.len();
        let mut modules = Vec::with_capacity(total);
        let mut dropped = 0;
        let mut manifest: Option<Vec<ArtifactRecord>> = None;

        for (index, module) in self.project.modules.iter().enumerate() {
            if cancel.is_cancelled() {
                tracing::info!("Collection cancelled after {} of {} module(s)", index, total);
                return Err(CollectError::Cancelled {
                    partial: Box::new(CollectResponse::new(modules, dropped)),
                });
            }
            if let Some(deadline) = self.request.collection_timeout {
                if started.elapsed() >= deadline {
                    tracing::warn!("Collection deadline reached after {} of {} module(s)", index, total);
                    return Err(CollectError::DeadlineExceeded {
                        deadline,
                        partial: Box::new(CollectResponse::new(modules, dropped)),
                    });
                }
            }

            let Some(metadata) = self.project.table.get(&module.path) else {
                continue;
            };
            let label = module_label(&module.path);
            self.progress_reporter
                .report_progress(index, total, Some(label.as_str()));

            if manifest.is_none() {
                manifest = Some(if self.request.publish_occurred {
                    self.load_manifest().await
                } else {
                    Vec::new()
                });
            }
            let artifacts = manifest.as_deref().unwrap_or_default();

            let (record, module_dropped) = self.collect_module(module, metadata, artifacts).await;
            tracing::debug!(
                "Module {} collected: {} dependency(ies), {} dropped",
                record.id,
                record.dependencies.len(),
                module_dropped
            );
            dropped += module_dropped;
            modules.push(record);
        }

        self.progress_reporter.report_progress(total, total, None);
        let response = CollectResponse::new(modules, dropped);
        self.progress_reporter.report_completion(&format!(
            "✅ Collected {} module(s), {} dependency(ies); {} dropped without checksum",
            response.modules.len(),
            response.dependency_count(),
            response.dropped_dependencies
        ));
        Ok(response)
    }

    /// Builds the record for one module. Returns the record and the number
    /// of dependencies dropped for lack of a checksum.
    async fn collect_module(
        &self,
        module: &ProjectModule,
        metadata: &ModuleMetadata,
        manifest: &[ArtifactRecord],
    ) -> (BuildInfoModule, usize) {
        let mut dependencies = self.resolve_with_gradle(module, metadata).await;
        if dependencies.is_empty() {
            if let Some(script) = module.build_script.as_deref() {
                tracing::debug!(
                    "Gradle reported no dependencies for {}; reading build script",
                    module_label(&module.path)
                );
                dependencies = FallbackDependencyParser::new(&self.project.table, metadata).parse(script);
            }
        }

        let requested_by = dependencies.requested_by();
        let resolver = ChecksumResolver::new(manifest, self.cache.as_ref());
        let (verified, dropped) = resolver.verify_all(dependencies.records);

        let dependencies = verified
            .into_iter()
            .map(|dependency| BuildInfoDependency::from_verified(dependency, &requested_by))
            .collect();
        let artifacts = manifest
            .iter()
            .filter(|artifact| artifact.module_name == module.path)
            .map(BuildInfoArtifact::from)
            .collect();

        (BuildInfoModule::new(metadata, dependencies, artifacts), dropped)
    }

    /// Queries each relevant configuration; a failed invocation skips only
    /// that configuration.
    async fn resolve_with_gradle(&self, module: &ProjectModule, metadata: &ModuleMetadata) -> ModuleDependencies {
        let script = module.build_script.as_deref().unwrap_or_default();
        let configurations = ConfigurationSelector::relevant_configurations(
            script,
            self.request.include_test_dependencies,
        );
        let parser = DependencyTreeParser::new(&self.project.table, metadata);
        let mut accumulator = DependencyAccumulator::new();

        for configuration in configurations {
            let args = self.dependencies_args(&module.path, configuration);
            match self.executor.run(self.sandbox.base(), &args).await {
                Ok(output) => {
                    let tree = parser.parse(&output);
                    merge_tree(&tree, ScopeMapping::scope_for(configuration), &mut accumulator);
                }
                Err(e) => {
                    tracing::warn!(
                        target: "gradle",
                        "Skipping configuration {} of {}: {}",
                        configuration,
                        module_label(&module.path),
                        e
                    );
                }
            }
        }

        accumulator.finish()
    }

    fn dependencies_args(&self, module_path: &str, configuration: &str) -> Vec<String> {
        let task = if module_path.is_empty() {
            "dependencies".to_string()
        } else {
            format!(":{}:dependencies", module_path)
        };
        let mut args = vec![task, "--configuration".to_string(), configuration.to_string()];
        self.append_common_args(&mut args);
        args
    }

    fn append_common_args(&self, args: &mut Vec<String>) {
        args.extend(GRADLE_QUIET_FLAGS.iter().map(|flag| flag.to_string()));
        args.extend(self.request.gradle_args.iter().cloned());
    }

    /// Runs the manifest pipeline; any failure degrades to an empty manifest.
    async fn load_manifest(&self) -> Vec<ArtifactRecord> {
        self.progress_reporter
            .report("📦 Generating artifact manifest from the publish step");
        match self.generate_manifest().await {
            Ok(artifacts) => {
                tracing::debug!("Artifact manifest lists {} file(s)", artifacts.len());
                artifacts
            }
            Err(e) => {
                tracing::warn!("Artifact manifest unavailable: {:#}", e);
                self.progress_reporter.report_error(&format!(
                    "⚠️  Artifact manifest unavailable, using the Gradle cache for checksums: {}",
                    e
                ));
                Vec::new()
            }
        }
    }

    /// Writes the init script and manifest target as temporary files in the
    /// working directory, runs the manifest task and removes both files.
    async fn generate_manifest(&self) -> Result<Vec<ArtifactRecord>> {
        let base = self.sandbox.base();

        let mut init_script = tempfile::Builder::new()
            .prefix(".buildinfo-init-")
            .suffix(".gradle")
            .tempfile_in(base)?;
        init_script.write_all(MANIFEST_INIT_SCRIPT.as_bytes())?;
        init_script.flush()?;

        let manifest_file = tempfile::Builder::new()
            .prefix(".buildinfo-manifest-")
            .suffix(".json")
            .tempfile_in(base)?;

        let result = self
            .run_manifest_task(init_script.path(), manifest_file.path())
            .await;

        remove_temp_file(init_script);
        remove_temp_file(manifest_file);
        result
    }

    async fn run_manifest_task(&self, init_script: &Path, manifest_path: &Path) -> Result<Vec<ArtifactRecord>> {
        if !self.sandbox.contains(manifest_path) {
            anyhow::bail!(
                "Manifest path {} is outside the working directory",
                manifest_path.display()
            );
        }

        let mut args = vec![
            "--init-script".to_string(),
            init_script.display().to_string(),
            MANIFEST_TASK.to_string(),
            format!("-P{}={}", MANIFEST_PATH_PROPERTY, manifest_path.display()),
        ];
        self.append_common_args(&mut args);
        self.executor.run(self.sandbox.base(), &args).await?;

        let json = self
            .reader
            .read_text(manifest_path)?
            .ok_or_else(|| anyhow::anyhow!("Gradle did not write {}", manifest_path.display()))?;
        parse_manifest(&json)
    }
}

fn remove_temp_file(file: NamedTempFile) {
    let path = file.path().to_path_buf();
    if let Err(e) = file.close() {
        tracing::warn!("Failed to remove temporary file {}: {}", path.display(), e);
    }
}

/// Gradle-style display path: `:` for the root, `:a:b` otherwise.
fn module_label(module_path: &str) -> String {
    format!(":{}", module_path)
}

fn validate_working_dir(path: &Path) -> Result<()> {
    let invalid = |reason: &str| GradleBuildInfoError::InvalidWorkingDirectory {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if path.as_os_str().is_empty() {
        return Err(invalid("Working directory is empty").into());
    }
    let metadata = fs::symlink_metadata(path).map_err(|_| invalid("Directory does not exist"))?;
    if metadata.is_symlink() {
        return Err(invalid(
            "Working directory is a symbolic link. For security reasons, symbolic links are not allowed.",
        )
        .into());
    }
    if !metadata.is_dir() {
        return Err(invalid("Path is not a directory").into());
    }
    Ok(())
}

#[cfg(test)]
mod tests;

use super::dsl::strip_comments;
use super::metadata::{root_project_name, ScriptMetadata};
use crate::build_info::domain::{normalize_module_path, ModuleMetadata, ModuleTable, UNSPECIFIED};
use crate::ports::outbound::BuildScriptReader;
use crate::shared::security::PathSandbox;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Settings file names, Groovy first.
pub const SETTINGS_FILES: [&str; 2] = ["settings.gradle", "settings.gradle.kts"];

/// Build script names, Groovy first.
pub const BUILD_SCRIPT_FILES: [&str; 2] = ["build.gradle", "build.gradle.kts"];

/// One module of the project, as found on disk.
#[derive(Debug, Clone)]
pub struct ProjectModule {
    /// Module path without leading colon; empty for the root
    pub path: String,
    pub dir: PathBuf,
    /// Build script text, when the module has a readable one
    pub build_script: Option<String>,
}

impl ProjectModule {
    pub fn is_root(&self) -> bool {
        self.path.is_empty()
    }
}

/// Result of module discovery: modules in settings order (root first) and
/// their resolved identities.
#[derive(Debug, Clone, Default)]
pub struct DiscoveredProject {
    pub modules: Vec<ProjectModule>,
    pub table: ModuleTable,
}

/// Enumerates the modules of a Gradle build from its settings file.
///
/// Every path is built through the sandbox; includes that would escape the
/// working directory are logged and skipped. Missing or unreadable scripts
/// degrade to defaults.
pub struct ModuleDiscovery<'a, R: BuildScriptReader> {
    sandbox: &'a PathSandbox,
    reader: &'a R,
}

impl<'a, R: BuildScriptReader> ModuleDiscovery<'a, R> {
    pub fn new(sandbox: &'a PathSandbox, reader: &'a R) -> Self {
        Self { sandbox, reader }
    }

    pub fn discover(&self) -> DiscoveredProject {
        let base = self.sandbox.base().to_path_buf();
        let settings = self.read_first(&base, &SETTINGS_FILES);
        if settings.is_none() {
            tracing::debug!("No settings file in {}; single-module build", base.display());
        }
        let settings = settings.unwrap_or_default();

        let root_script = self.read_first(&base, &BUILD_SCRIPT_FILES);
        let root_declared = root_script
            .as_deref()
            .map(ScriptMetadata::parse)
            .unwrap_or_default();
        let root = ModuleMetadata::new(
            root_declared.group_or_default(),
            root_artifact(&settings, &root_declared, &base),
            root_declared.version_or_default(),
        );

        let mut project = DiscoveredProject::default();
        project.table.insert("", root.clone());
        project.modules.push(ProjectModule {
            path: String::new(),
            dir: base,
            build_script: root_script,
        });

        for module_path in parse_include_paths(&settings) {
            let components: Vec<&str> = module_path.split(':').collect();
            let dir = match self.sandbox.join_components(&components) {
                Ok(dir) => dir,
                Err(e) => {
                    tracing::warn!("Skipping module '{}': {}", module_path, e);
                    continue;
                }
            };

            let script = self.read_first(&dir, &BUILD_SCRIPT_FILES);
            let metadata = match script.as_deref() {
                Some(text) => {
                    let declared = ScriptMetadata::parse(text);
                    let artifact = declared.name.clone().unwrap_or_else(|| {
                        components.last().map(|c| c.to_string()).unwrap_or_default()
                    });
                    ModuleMetadata::new(
                        declared.group.unwrap_or_else(|| root.group.clone()),
                        artifact,
                        declared.version.unwrap_or_else(|| root.version.clone()),
                    )
                }
                None => ModuleMetadata::new(
                    root.group.clone(),
                    module_path.replace(':', "-"),
                    root.version.clone(),
                ),
            };

            project.table.insert(module_path.clone(), metadata);
            project.modules.push(ProjectModule {
                path: module_path,
                dir,
                build_script: script,
            });
        }

        tracing::debug!("Discovered {} module(s)", project.modules.len());
        project
    }

    /// Reads the first of `names` that exists in `dir` and can be read.
    ///
    /// A name that is refused or unreadable falls through to the next one.
    fn read_first(&self, dir: &Path, names: &[&str]) -> Option<String> {
        for name in names {
            let path = match self.sandbox.join_file(dir, name) {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!("Refusing to read {} in {}: {}", name, dir.display(), e);
                    continue;
                }
            };
            match self.reader.read_text(&path) {
                Ok(Some(text)) => return Some(text),
                Ok(None) => continue,
                Err(e) => {
                    tracing::warn!("Could not read {}: {:#}", path.display(), e);
                    continue;
                }
            }
        }
        None
    }
}

/// `rootProject.name` > declared `name` > directory name > `unspecified`.
fn root_artifact(settings: &str, declared: &ScriptMetadata, base: &Path) -> String {
    root_project_name(settings)
        .or_else(|| declared.name.clone())
        .or_else(|| {
            base.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .filter(|name| !name.is_empty())
        })
        .unwrap_or_else(|| UNSPECIFIED.to_string())
}

/// Collects module paths from `include` statements, in order and deduplicated.
///
/// `includeBuild` and `includeFlat` are not module declarations and are
/// ignored. An argument list may continue over several lines, either after a
/// trailing comma or inside an open parenthesis.
pub fn parse_include_paths(settings_text: &str) -> Vec<String> {
    static INCLUDE: OnceLock<Regex> = OnceLock::new();
    static QUOTED: OnceLock<Regex> = OnceLock::new();
    let include = INCLUDE.get_or_init(|| Regex::new(r"^\s*include\b(.*)$").expect("valid regex"));
    let quoted = QUOTED.get_or_init(|| Regex::new(r#"['"]([^'"]+)['"]"#).expect("valid regex"));

    let code = strip_comments(settings_text);
    let mut lines = code.lines();
    let mut paths: Vec<String> = Vec::new();

    while let Some(line) = lines.next() {
        let Some(caps) = include.captures(line) else {
            continue;
        };
        let mut statement = caps[1].to_string();
        while continues(&statement) {
            match lines.next() {
                Some(next) => {
                    statement.push(' ');
                    statement.push_str(next);
                }
                None => break,
            }
        }

        for arg in quoted.captures_iter(&statement) {
            let module_path = normalize_module_path(&arg[1]);
            if module_path.is_empty() || paths.contains(&module_path) {
                continue;
            }
            paths.push(module_path);
        }
    }

    paths
}

fn continues(statement: &str) -> bool {
    let open = statement.matches('(').count();
    let close = statement.matches(')').count();
    statement.trim_end().ends_with(',') || open > close
}

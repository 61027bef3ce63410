use super::*;
use crate::adapters::outbound::filesystem::FileSystemReader;
use crate::build_info::domain::Scope;
use crate::shared::error::CommandError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

/// Gradle stand-in answering `dependencies` queries from a table.
#[derive(Default)]
struct ScriptedGradle {
    /// (task, configuration) → tree output
    trees: HashMap<(String, String), String>,
    manifest_json: Option<String>,
    cancel_on_first_call: Option<CancellationToken>,
    calls: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGradle {
    fn with_tree(mut self, task: &str, configuration: &str, output: &str) -> Self {
        self.trees
            .insert((task.to_string(), configuration.to_string()), output.to_string());
        self
    }

    fn calls(&self) -> Vec<Vec<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GradleExecutor for ScriptedGradle {
    async fn run(&self, _working_dir: &Path, args: &[String]) -> std::result::Result<String, CommandError> {
        self.calls.lock().unwrap().push(args.to_vec());
        if let Some(token) = &self.cancel_on_first_call {
            token.cancel();
        }

        if args.iter().any(|arg| arg == MANIFEST_TASK) {
            let init_script = &args[1];
            assert!(Path::new(init_script).is_file(), "init script must exist during the run");
            let target = args
                .iter()
                .find_map(|arg| arg.strip_prefix("-PbuildInfoManifestPath="))
                .unwrap();
            fs::write(target, self.manifest_json.clone().unwrap_or_default()).unwrap();
            return Ok(String::new());
        }

        let key = (args[0].clone(), args[2].clone());
        self.trees
            .get(&key)
            .cloned()
            .ok_or_else(|| CommandError::NonZeroExit {
                command: args.join(" "),
                code: Some(1),
                output: String::new(),
            })
    }
}

struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, _message: &str) {}
    fn report_completion(&self, _message: &str) {}
}

/// Keeps every reported error; other messages are discarded.
#[derive(Clone, Default)]
struct ErrorLog {
    errors: Arc<Mutex<Vec<String>>>,
}

impl ErrorLog {
    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl ProgressReporter for ErrorLog {
    fn report(&self, _message: &str) {}
    fn report_progress(&self, _current: usize, _total: usize, _message: Option<&str>) {}
    fn report_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
    fn report_completion(&self, _message: &str) {}
}

struct Fixture {
    project: TempDir,
    gradle_home: TempDir,
}

impl Fixture {
    fn new() -> Self {
        let fixture = Self {
            project: TempDir::new().unwrap(),
            gradle_home: TempDir::new().unwrap(),
        };
        fixture.write("build.gradle", "group = 'com.acme'\nversion = '1.0'\n");
        fixture
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.project.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn cache_jar(&self, group: &str, name: &str, version: &str) {
        let dir = self
            .gradle_home
            .path()
            .join("caches/modules-2/files-2.1")
            .join(group)
            .join(name)
            .join(version)
            .join("5f1a");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}-{}.jar", name, version)), name).unwrap();
    }

    fn request(&self) -> CollectRequest {
        CollectRequest::new(self.project.path().to_path_buf())
    }

    fn use_case(
        &self,
        request: CollectRequest,
        gradle: ScriptedGradle,
    ) -> CollectBuildInfoUseCase<ScriptedGradle, FileSystemReader, SilentReporter> {
        self.use_case_reporting(request, gradle, SilentReporter)
    }

    fn use_case_reporting<PR: ProgressReporter>(
        &self,
        request: CollectRequest,
        gradle: ScriptedGradle,
        reporter: PR,
    ) -> CollectBuildInfoUseCase<ScriptedGradle, FileSystemReader, PR> {
        let cache = ModuleCache::new(self.gradle_home.path()).unwrap();
        CollectBuildInfoUseCase::new(request, gradle, FileSystemReader::new(), reporter)
            .unwrap()
            .with_module_cache(Some(cache))
    }
}

const ROOT_TREE: &str = "\
+--- org.slf4j:slf4j-api:2.0.0
+--- com.example:lib:1.0 -> 1.1
\\--- a:b:1.0
     +--- c:d:2.0
";

fn dependency_ids(module: &BuildInfoModule) -> Vec<&str> {
    module.dependencies.iter().map(|d| d.id.as_str()).collect()
}

#[tokio::test]
async fn test_collects_tree_with_checksums_and_requested_by() {
    let fixture = Fixture::new();
    fixture.cache_jar("org.slf4j", "slf4j-api", "2.0.0");
    fixture.cache_jar("a", "b", "1.0");
    fixture.cache_jar("c", "d", "2.0");
    let gradle = ScriptedGradle::default().with_tree("dependencies", "compileClasspath", ROOT_TREE);

    let use_case = fixture.use_case(fixture.request(), gradle);
    let response = use_case.execute(&CancellationToken::new()).await.unwrap();

    assert_eq!(response.modules.len(), 1);
    let root = &response.modules[0];
    assert!(root.id.starts_with("com.acme:"));
    assert!(root.id.ends_with(":1.0"));
    assert_eq!(root.module_type, "gradle");
    assert_eq!(
        dependency_ids(root),
        vec!["org.slf4j:slf4j-api:2.0.0", "a:b:1.0", "c:d:2.0"]
    );
    // com.example:lib:1.1 has no cached file
    assert_eq!(response.dropped_dependencies, 1);

    let child = &root.dependencies[2];
    assert_eq!(child.requested_by, vec![vec!["a:b:1.0".to_string()]]);
    assert_eq!(child.scopes, vec![Scope::Compile]);
    assert!(child.checksum.sha256.is_some());
}

#[tokio::test]
async fn test_scopes_merge_across_configurations() {
    let fixture = Fixture::new();
    fixture.cache_jar("a", "b", "1.0");
    let gradle = ScriptedGradle::default()
        .with_tree("dependencies", "compileClasspath", "\\--- a:b:1.0\n")
        .with_tree("dependencies", "runtimeClasspath", "\\--- a:b:1.0\n");

    let response = fixture
        .use_case(fixture.request(), gradle)
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    let dependency = &response.modules[0].dependencies[0];
    assert_eq!(dependency.scopes, vec![Scope::Compile, Scope::Runtime]);
}

#[tokio::test]
async fn test_failed_configuration_does_not_stop_the_next() {
    let fixture = Fixture::new();
    fixture.cache_jar("r", "only", "1.0");
    let gradle =
        ScriptedGradle::default().with_tree("dependencies", "runtimeClasspath", "\\--- r:only:1.0\n");

    let use_case = fixture.use_case(fixture.request(), gradle);
    let response = use_case.execute(&CancellationToken::new()).await.unwrap();

    let root = &response.modules[0];
    assert_eq!(dependency_ids(root), vec!["r:only:1.0"]);
    assert_eq!(root.dependencies[0].scopes, vec![Scope::Runtime]);
}

#[tokio::test]
async fn test_fallback_parser_used_when_gradle_yields_nothing() {
    let fixture = Fixture::new();
    fixture.write(
        "build.gradle",
        "group = 'com.acme'\nversion = '1.0'\ndependencies {\n    implementation 'org.slf4j:slf4j-api:2.0.0'\n    testImplementation 'junit:junit:4.13.2'\n}\n",
    );
    fixture.cache_jar("org.slf4j", "slf4j-api", "2.0.0");
    fixture.cache_jar("junit", "junit", "4.13.2");

    let use_case = fixture.use_case(fixture.request(), ScriptedGradle::default());
    let response = use_case.execute(&CancellationToken::new()).await.unwrap();

    let root = &response.modules[0];
    assert_eq!(
        dependency_ids(root),
        vec!["org.slf4j:slf4j-api:2.0.0", "junit:junit:4.13.2"]
    );
    assert_eq!(root.dependencies[1].scopes, vec![Scope::Test]);
    assert!(root.dependencies[0].requested_by.is_empty());
}

#[tokio::test]
async fn test_dependency_without_checksum_is_dropped() {
    let fixture = Fixture::new();
    fixture.write(
        "build.gradle",
        "dependencies {\n    implementation 'nowhere:to-be-found:1.0'\n}\n",
    );

    let use_case = fixture.use_case(fixture.request(), ScriptedGradle::default());
    let response = use_case.execute(&CancellationToken::new()).await.unwrap();

    assert!(response.modules[0].dependencies.is_empty());
    assert_eq!(response.dropped_dependencies, 1);
}

#[tokio::test]
async fn test_multi_module_uses_module_tasks() {
    let fixture = Fixture::new();
    fixture.write("settings.gradle", "rootProject.name = 'svc'\ninclude 'app'\n");
    fixture.write("app/build.gradle", "dependencies { implementation project(':lib') }\n");
    fixture.cache_jar("x", "y", "1.0");
    let gradle = ScriptedGradle::default()
        .with_tree(":app:dependencies", "compileClasspath", "\\--- x:y:1.0\n");

    let use_case = fixture.use_case(fixture.request(), gradle);
    let response = use_case.execute(&CancellationToken::new()).await.unwrap();

    let ids: Vec<_> = response.modules.iter().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["com.acme:svc:1.0", "com.acme:app:1.0"]);
    assert_eq!(dependency_ids(&response.modules[1]), vec!["x:y:1.0"]);
}

#[tokio::test]
async fn test_invocation_arguments() {
    let fixture = Fixture::new();
    let mut request = fixture.request();
    request.include_test_dependencies = true;
    request.gradle_args = vec!["--offline".to_string()];

    let use_case = fixture.use_case(request, ScriptedGradle::default());
    use_case.execute(&CancellationToken::new()).await.unwrap();

    let calls = use_case.executor.calls();
    let configurations: Vec<_> = calls.iter().map(|args| args[2].as_str()).collect();
    assert_eq!(
        configurations,
        vec![
            "compileClasspath",
            "runtimeClasspath",
            "testCompileClasspath",
            "testRuntimeClasspath"
        ]
    );
    assert_eq!(
        calls[0],
        vec![
            "dependencies",
            "--configuration",
            "compileClasspath",
            "--console=plain",
            "-q",
            "--offline"
        ]
    );
}

#[tokio::test]
async fn test_android_module_queries_variant_configurations() {
    let fixture = Fixture::new();
    fixture.write(
        "build.gradle",
        "plugins { id 'com.android.application' }\nandroid { namespace 'com.acme' }\n",
    );

    let use_case = fixture.use_case(fixture.request(), ScriptedGradle::default());
    use_case.execute(&CancellationToken::new()).await.unwrap();

    let calls = use_case.executor.calls();
    assert_eq!(calls.len(), 4);
    assert_eq!(calls[0][2], "debugCompileClasspath");
}

#[tokio::test]
async fn test_cancellation_keeps_finished_modules() {
    let fixture = Fixture::new();
    fixture.write("settings.gradle", "include 'app', 'lib'\n");
    let token = CancellationToken::new();
    let gradle = ScriptedGradle {
        cancel_on_first_call: Some(token.clone()),
        ..Default::default()
    };

    let use_case = fixture.use_case(fixture.request(), gradle);
    let err = use_case.execute(&token).await.unwrap_err();

    assert!(matches!(err, CollectError::Cancelled { .. }));
    let partial = err.into_partial();
    assert_eq!(partial.modules.len(), 1);
    assert!(partial.modules[0].id.starts_with("com.acme:"));
}

#[tokio::test]
async fn test_deadline_exceeded_is_reported() {
    let fixture = Fixture::new();
    let mut request = fixture.request();
    request.collection_timeout = Some(Duration::ZERO);

    let use_case = fixture.use_case(request, ScriptedGradle::default());
    let err = use_case.execute(&CancellationToken::new()).await.unwrap_err();

    assert!(matches!(err, CollectError::DeadlineExceeded { .. }));
    assert!(err.into_partial().modules.is_empty());
}

#[tokio::test]
async fn test_manifest_pipeline_supplies_artifacts_and_checksums() {
    let fixture = Fixture::new();
    fixture.write("settings.gradle", "include 'app'\n");
    let manifest = r#"[
        {"module_name": ":", "type": "jar", "name": "root-1.0.jar", "path": "/w/build/libs/root-1.0.jar",
         "sha1": "r1", "sha256": "r256", "md5": "r5"},
        {"module_name": ":app", "type": "jar", "name": "app-1.0.jar", "path": "/w/app/build/libs/app-1.0.jar",
         "sha1": "a1", "sha256": "a256", "md5": "a5"}
    ]"#;
    let gradle = ScriptedGradle {
        manifest_json: Some(manifest.to_string()),
        ..Default::default()
    }
    .with_tree("dependencies", "compileClasspath", "\\--- project :app\n");
    let mut request = fixture.request();
    request.publish_occurred = true;

    let use_case = fixture.use_case(request, gradle);
    let response = use_case.execute(&CancellationToken::new()).await.unwrap();

    let root = &response.modules[0];
    assert_eq!(root.artifacts.len(), 1);
    assert_eq!(root.artifacts[0].name, "root-1.0.jar");
    assert_eq!(dependency_ids(root), vec!["com.acme:app:1.0"]);
    assert_eq!(root.dependencies[0].checksum.sha1.as_deref(), Some("a1"));
    assert_eq!(response.modules[1].artifacts[0].name, "app-1.0.jar");

    let manifest_runs = use_case
        .executor
        .calls()
        .iter()
        .filter(|args| args.iter().any(|a| a == MANIFEST_TASK))
        .count();
    assert_eq!(manifest_runs, 1);

    let leftovers: Vec<PathBuf> = fs::read_dir(fixture.project.path())
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.to_string_lossy().contains(".buildinfo-"))
        .collect();
    assert!(leftovers.is_empty(), "temporary files left behind: {:?}", leftovers);
}

#[tokio::test]
async fn test_manifest_failure_degrades_to_cache() {
    let fixture = Fixture::new();
    fixture.cache_jar("a", "b", "1.0");
    let gradle = ScriptedGradle {
        manifest_json: Some("not json".to_string()),
        ..Default::default()
    }
    .with_tree("dependencies", "compileClasspath", "\\--- a:b:1.0\n");
    let mut request = fixture.request();
    request.publish_occurred = true;
    let log = ErrorLog::default();

    let response = fixture
        .use_case_reporting(request, gradle, log.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(dependency_ids(&response.modules[0]), vec!["a:b:1.0"]);
    assert!(response.modules[0].artifacts.is_empty());
    let errors = log.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("Artifact manifest unavailable"));
}

#[tokio::test]
async fn test_successful_run_reports_no_errors() {
    let fixture = Fixture::new();
    fixture.cache_jar("a", "b", "1.0");
    let gradle = ScriptedGradle::default().with_tree("dependencies", "compileClasspath", "\\--- a:b:1.0\n");
    let log = ErrorLog::default();

    fixture
        .use_case_reporting(fixture.request(), gradle, log.clone())
        .execute(&CancellationToken::new())
        .await
        .unwrap();

    assert!(log.errors().is_empty());
}

#[tokio::test]
async fn test_traversal_module_never_reaches_output() {
    let fixture = Fixture::new();
    fixture.write("settings.gradle", "include '..:..:etc'\ninclude 'app'\n");

    let use_case = fixture.use_case(fixture.request(), ScriptedGradle::default());
    let response = use_case.execute(&CancellationToken::new()).await.unwrap();

    assert_eq!(response.modules.len(), 2);
    assert!(response.modules.iter().all(|m| !m.id.contains("etc")));
    assert!(use_case
        .executor
        .calls()
        .iter()
        .all(|args| !args[0].contains("..")));
}

#[test]
fn test_missing_working_directory_is_fatal() {
    let request = CollectRequest::new(PathBuf::from("/nonexistent/gradle/project"));
    let result = CollectBuildInfoUseCase::new(
        request,
        ScriptedGradle::default(),
        FileSystemReader::new(),
        SilentReporter,
    );

    let err = result.err().unwrap();
    assert!(err.to_string().contains("Invalid working directory"));
    assert!(err.to_string().contains("Directory does not exist"));
}

#[test]
fn test_empty_working_directory_is_fatal() {
    let result = CollectBuildInfoUseCase::new(
        CollectRequest::new(PathBuf::new()),
        ScriptedGradle::default(),
        FileSystemReader::new(),
        SilentReporter,
    );
    assert!(result.is_err());
}

#[test]
fn test_file_as_working_directory_is_fatal() {
    let fixture = Fixture::new();
    let request = CollectRequest::new(fixture.project.path().join("build.gradle"));
    let result = CollectBuildInfoUseCase::new(
        request,
        ScriptedGradle::default(),
        FileSystemReader::new(),
        SilentReporter,
    );

    assert!(result.err().unwrap().to_string().contains("not a directory"));
}

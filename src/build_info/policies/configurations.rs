use crate::build_info::services::dsl::strip_comments;
use regex::Regex;
use std::sync::OnceLock;

const JVM_CONFIGURATIONS: &[&str] = &["compileClasspath", "runtimeClasspath"];

const JVM_TEST_CONFIGURATIONS: &[&str] = &["testCompileClasspath", "testRuntimeClasspath"];

const ANDROID_CONFIGURATIONS: &[&str] = &[
    "debugCompileClasspath",
    "debugRuntimeClasspath",
    "releaseCompileClasspath",
    "releaseRuntimeClasspath",
];

const ANDROID_TEST_CONFIGURATIONS: &[&str] = &[
    "debugUnitTestCompileClasspath",
    "debugUnitTestRuntimeClasspath",
    "debugAndroidTestCompileClasspath",
    "debugAndroidTestRuntimeClasspath",
];

/// ConfigurationSelector policy choosing which configurations to query
///
/// Android modules resolve per build variant, so a plain `compileClasspath`
/// does not exist there; the selector looks for Android plugin or block
/// markers in the build script and picks the variant configurations instead.
pub struct ConfigurationSelector;

impl ConfigurationSelector {
    /// Returns the configurations to resolve for a module, in query order.
    pub fn relevant_configurations(
        build_script: &str,
        include_test_dependencies: bool,
    ) -> Vec<&'static str> {
        let (main, tests) = if Self::is_android_project(build_script) {
            (ANDROID_CONFIGURATIONS, ANDROID_TEST_CONFIGURATIONS)
        } else {
            (JVM_CONFIGURATIONS, JVM_TEST_CONFIGURATIONS)
        };

        let mut configurations = main.to_vec();
        if include_test_dependencies {
            configurations.extend_from_slice(tests);
        }
        configurations
    }

    /// Heuristic Android detection on comment-stripped build-script text.
    pub fn is_android_project(build_script: &str) -> bool {
        static RE: OnceLock<Regex> = OnceLock::new();
        let re = RE.get_or_init(|| {
            Regex::new(
                r#"(?m)com\.android\.(?:application|library|dynamic-feature|test)|\bandroid\s*\{|\bandroid(?:Application|Library)\b|\bkotlin\s*\(\s*["']android["']\s*\)"#,
            )
            .expect("valid regex")
        });
        re.is_match(&strip_comments(build_script))
    }
}

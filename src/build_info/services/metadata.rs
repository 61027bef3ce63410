use super::dsl::{strip_comments, top_level_code};
use crate::build_info::domain::UNSPECIFIED;
use regex::Regex;
use std::sync::OnceLock;

/// Scalar project metadata declared in one build script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptMetadata {
    pub group: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
}

impl ScriptMetadata {
    /// Extracts `group`, `name` and `version` assignments from build-script text.
    ///
    /// Only top-level code is searched: comments are dropped, and so are
    /// assignments nested in blocks such as `tasks.register(...) { group = ... }`
    /// or `publishing { ... pom { name = ... } }`.
    pub fn parse(text: &str) -> Self {
        let code = top_level_code(text);
        Self {
            group: first_capture(group_regex(), &code),
            name: first_capture(name_regex(), &code),
            version: first_capture(version_regex(), &code),
        }
    }

    pub fn group_or_default(&self) -> String {
        self.group.clone().unwrap_or_else(|| UNSPECIFIED.to_string())
    }

    pub fn version_or_default(&self) -> String {
        self.version.clone().unwrap_or_else(|| UNSPECIFIED.to_string())
    }

    /// Declared artifact name, or an empty string when none is declared.
    pub fn artifact(&self) -> String {
        self.name.clone().unwrap_or_default()
    }
}

/// Reads `rootProject.name` from settings-file text.
pub fn root_project_name(settings_text: &str) -> Option<String> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| {
        Regex::new(r#"\brootProject\s*\.\s*name\s*[=:]\s*['"]([^'"]+)['"]"#).expect("valid regex")
    });
    first_capture(re, &strip_comments(settings_text))
}

fn group_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*(?:project\s*\.\s*)?group\s*[=:]\s*['"]([^'"]+)['"]"#)
            .expect("valid regex")
    })
}

fn name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?m)^\s*(?:project\s*\.\s*)?(?:artifactId|artifact|name)\s*[=:]\s*['"]([^'"]+)['"]"#,
        )
        .expect("valid regex")
    })
}

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?m)^\s*(?:project\s*\.\s*)?version\s*[=:]\s*['"]([^'"]+)['"]"#)
            .expect("valid regex")
    })
}

fn first_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|value| !value.is_empty())
}

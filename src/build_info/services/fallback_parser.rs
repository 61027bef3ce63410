use super::dsl::{extract_dependencies_block, strip_comments};
use super::graph_builder::{DependencyAccumulator, ModuleDependencies};
use crate::build_info::domain::{Coordinate, ModuleMetadata, ModuleTable};
use crate::build_info::policies::ScopeMapping;
use regex::Regex;
use std::sync::OnceLock;

const CONFIGURATION_KEYWORDS: &str = "implementation|api|compileOnly|runtimeOnly|testImplementation|testCompileOnly|testRuntimeOnly|compile|runtime|annotationProcessor|kapt|ksp";

fn string_notation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r#"\b({CONFIGURATION_KEYWORDS})\s*\(?\s*['"]([^'"\s]+)['"]"#
        ))
        .expect("valid regex")
    })
}

fn map_notation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r#"\b({CONFIGURATION_KEYWORDS})\s*\(?\s*group\s*[:=]\s*['"]([^'"]+)['"]\s*,\s*name\s*[:=]\s*['"]([^'"]+)['"](?:\s*,\s*version\s*[:=]\s*['"]([^'"]+)['"])?"#
        ))
        .expect("valid regex")
    })
}

fn project_notation() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r#"\b({CONFIGURATION_KEYWORDS})\s*\(?\s*project\s*\(?\s*(?:path\s*[:=]\s*)?['"]([^'"]+)['"]"#
        ))
        .expect("valid regex")
    })
}

/// Best-effort reader of declared dependencies, used when Gradle itself
/// could not be asked.
///
/// Only the first top-level `dependencies` block is read. Declarations are
/// recognised in string (`'g:a:v'`), map (`group: 'g', name: 'a'`) and
/// project (`project(':x')`) notation; anything computed at build time is
/// not seen.
pub struct FallbackDependencyParser<'a> {
    modules: &'a ModuleTable,
    current: &'a ModuleMetadata,
}

impl<'a> FallbackDependencyParser<'a> {
    pub fn new(modules: &'a ModuleTable, current: &'a ModuleMetadata) -> Self {
        Self { modules, current }
    }

    pub fn parse(&self, build_script: &str) -> ModuleDependencies {
        let block = strip_comments(&extract_dependencies_block(build_script));
        let mut declarations = self.declarations(&block);
        declarations.sort_by_key(|(offset, _, _)| *offset);

        let mut accumulator = DependencyAccumulator::new();
        for (_, configuration, coordinate) in declarations {
            accumulator.add(&coordinate, [ScopeMapping::scope_for(configuration)]);
        }
        tracing::debug!(
            "Fallback parser found {} dependency(ies) for {}",
            accumulator.len(),
            self.current.id()
        );
        accumulator.finish()
    }

    /// Every recognised declaration with its offset in `block`, so results
    /// can be ordered as written.
    fn declarations<'b>(&self, block: &'b str) -> Vec<(usize, &'b str, Coordinate)> {
        let mut found = Vec::new();

        for caps in string_notation().captures_iter(block) {
            match parse_string_notation(&caps[2]) {
                Some(coordinate) => found.push((offset(&caps), conf(&caps, block), coordinate)),
                None => tracing::debug!("Skipping declaration '{}'", &caps[2]),
            }
        }

        for caps in map_notation().captures_iter(block) {
            let version = caps.get(4).map(|m| m.as_str()).unwrap_or_default();
            let coordinate = Coordinate::new(caps[2].trim(), caps[3].trim(), version.trim());
            found.push((offset(&caps), conf(&caps, block), coordinate));
        }

        for caps in project_notation().captures_iter(block) {
            let coordinate = self.modules.project_coordinate(&caps[2], self.current);
            found.push((offset(&caps), conf(&caps, block), coordinate));
        }

        found
    }
}

fn offset(caps: &regex::Captures<'_>) -> usize {
    caps.get(0).map(|m| m.start()).unwrap_or_default()
}

fn conf<'b>(caps: &regex::Captures<'_>, block: &'b str) -> &'b str {
    caps.get(1).map(|m| &block[m.range()]).unwrap_or_default()
}

/// Parses `group:artifact:version[:classifier][@type]`.
pub fn parse_string_notation(notation: &str) -> Option<Coordinate> {
    let (coordinates, dep_type) = match notation.split_once('@') {
        Some((coordinates, dep_type)) => (coordinates, dep_type),
        None => (notation, ""),
    };

    let parts: Vec<&str> = coordinates.split(':').map(str::trim).collect();
    if parts.len() < 3 || parts[0].is_empty() || parts[1].is_empty() {
        return None;
    }

    Some(
        Coordinate::new(parts[0], parts[1], parts[2])
            .with_classifier(parts.get(3).map(|c| c.to_string()))
            .with_type(dep_type),
    )
}

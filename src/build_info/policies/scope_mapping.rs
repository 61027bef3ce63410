use crate::build_info::domain::Scope;

/// ScopeMapping policy translating Gradle configuration names into scopes
///
/// Matching is a case-insensitive substring test, most specific rule first:
/// 1. anything mentioning `test` (incl. Android unit / instrumented variants) → test
/// 2. `compileClasspath` / `compileOnly`, or exactly `api` / `compile` → compile
/// 3. `runtimeClasspath` / `runtimeOnly`, or exactly `runtime` → runtime
/// 4. anything mentioning `provided` → provided
/// 5. everything else → compile
pub struct ScopeMapping;

impl ScopeMapping {
    pub fn scope_for(configuration: &str) -> Scope {
        let name = configuration.trim().to_ascii_lowercase();

        if name.contains("test") {
            return Scope::Test;
        }
        if name.contains("compileclasspath")
            || name.contains("compileonly")
            || name == "api"
            || name == "compile"
        {
            return Scope::Compile;
        }
        if name.contains("runtimeclasspath") || name.contains("runtimeonly") || name == "runtime" {
            return Scope::Runtime;
        }
        if name.contains("provided") {
            return Scope::Provided;
        }
        Scope::Compile
    }
}

//! Gradle build-info domain: identities, dependency graphs and the services
//! that derive them from build scripts, CLI output and the module cache.
pub mod domain;
pub mod policies;
pub mod services;

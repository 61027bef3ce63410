/// Application layer - Use cases and DTOs
///
/// This layer orchestrates module discovery, per-module dependency
/// collection and checksum resolution, and talks to infrastructure only
/// through ports.
pub mod dto;
pub mod read_models;
pub mod use_cases;

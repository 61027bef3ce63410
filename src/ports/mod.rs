/// Ports module defining the interfaces the collector core talks through
///
/// Outbound (driven) ports cover everything outside the core: the Gradle
/// process, the project filesystem, progress output and result presentation.
pub mod outbound;

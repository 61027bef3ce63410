/// Formatter adapters for the build-info output
mod json_formatter;

pub use json_formatter::JsonBuildInfoFormatter;

use clap::Parser;
use std::path::PathBuf;

/// Extract build info (modules, dependency graphs, checksums) from Gradle projects
#[derive(Parser, Debug)]
#[command(name = "gradle-buildinfo")]
#[command(version)]
#[command(
    about = "Extract build info (modules, dependency graphs, checksums) from Gradle projects",
    long_about = None
)]
pub struct Args {
    /// Path to the Gradle project root (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file path (defaults to gradle-buildinfo.config.yml in the project root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Gradle executable used when the project has no wrapper
    #[arg(long, value_name = "EXE")]
    pub gradle: Option<PathBuf>,

    /// Timeout for each Gradle invocation, in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Deadline for the whole collection, in seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub collection_timeout: Option<u64>,

    /// Also resolve test configurations
    #[arg(long)]
    pub include_tests: bool,

    /// A local publish step ran; attach the artifacts it produced
    #[arg(long)]
    pub published: bool,

    /// Extra argument passed to every Gradle invocation.
    /// Can be specified multiple times: --gradle-arg=--offline --gradle-arg=-Penv=ci
    #[arg(long = "gradle-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub gradle_args: Vec<String>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

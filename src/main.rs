mod cli;

use cli::Args;
use gradle_buildinfo::config::{self, ConfigFile};
use gradle_buildinfo::prelude::*;
use gradle_buildinfo::shared::error::ExitCode;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    let code = match run(args).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            for cause in e.chain().skip(1) {
                eprintln!("\nCaused by: {}", cause);
            }

            eprintln!();
            ExitCode::ApplicationError
        }
    };
    process::exit(code.as_i32());
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gradle_buildinfo={0},gradle={0}", level)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run(args: Args) -> Result<ExitCode> {
    let project_path = args.path.clone().unwrap_or_else(|| PathBuf::from("."));

    let config = match args.config.as_deref() {
        Some(path) => load_explicit_config(path)?,
        None => config::discover_config(&project_path)?.unwrap_or_default(),
    };
    let request = build_request(&args, config, project_path);

    let sandbox = PathSandbox::new(&request.working_dir)?;
    let executor = GradleCliExecutor::for_project(
        &sandbox,
        request.gradle_executable.as_deref(),
        request.command_timeout,
    );
    tracing::debug!(target: "gradle", "Using Gradle executable {}", executor.executable().display());

    let use_case = CollectBuildInfoUseCase::new(
        request,
        executor,
        FileSystemReader::new(),
        StderrProgressReporter::new(),
    )?;

    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\n⚠️  Interrupted; finishing the current module");
            signal_token.cancel();
        }
    });

    let (response, code) = match use_case.execute(&cancel).await {
        Ok(response) => (response, ExitCode::Success),
        Err(e) => {
            eprintln!("⚠️  {}; writing partial build info", e);
            (e.into_partial(), ExitCode::Interrupted)
        }
    };

    let formatted_output = JsonBuildInfoFormatter::new().format(&response.modules)?;

    let presenter: Box<dyn OutputPresenter> = match args.output {
        Some(output_path) => Box::new(FileSystemWriter::new(output_path)),
        None => Box::new(StdoutPresenter::new()),
    };
    presenter.present(&formatted_output)?;

    Ok(code)
}

fn load_explicit_config(path: &Path) -> Result<ConfigFile> {
    tracing::debug!("Using config file {}", path.display());
    config::load_config_from_path(path)
}

/// Merges CLI flags over config-file values.
fn build_request(args: &Args, config: ConfigFile, working_dir: PathBuf) -> CollectRequest {
    let mut request = CollectRequest::new(working_dir);

    request.gradle_executable = args.gradle.clone().or(config.gradle_executable);
    if let Some(secs) = args.timeout.or(config.timeout_secs) {
        request.command_timeout = Duration::from_secs(secs);
    }
    request.collection_timeout = args
        .collection_timeout
        .or(config.collection_timeout_secs)
        .map(Duration::from_secs);
    request.include_test_dependencies =
        args.include_tests || config.include_test_dependencies.unwrap_or(false);
    request.publish_occurred = args.published || config.publish_occurred.unwrap_or(false);

    let mut gradle_args = config.gradle_args.unwrap_or_default();
    gradle_args.extend(args.gradle_args.iter().cloned());
    request.gradle_args = gradle_args;

    request
}

//! appid - rewrite the applicationId declaration in a build.gradle file.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use appid_rewrite::{ApplicationIdUpdater, strip_quotation_marks};

mod outputs;

/// Key the final application id is exported under for downstream steps.
const APPLICATION_ID_OUTPUT_KEY: &str = "ANDROID_APPLICATION_ID";

/// Rewrite the applicationId declaration in a build.gradle file
#[derive(Parser)]
#[command(name = "appid")]
#[command(about = "Rewrites the applicationId declaration in a build.gradle file")]
#[command(version)]
struct Args {
    /// Path to the build.gradle file to patch
    #[arg(long, env = "BUILD_GRADLE_PATH")]
    build_gradle_path: PathBuf,

    /// New applicationId value (quoted or unquoted)
    #[arg(long, env = "NEW_APPLICATION_ID")]
    new_application_id: String,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    info!("Configuration:");
    info!("- build_gradle_path: {}", args.build_gradle_path.display());
    info!("- new_application_id: {}", args.new_application_id);

    if args.new_application_id.is_empty() {
        bail!("--new-application-id (NEW_APPLICATION_ID) must not be empty");
    }
    if !args.build_gradle_path.is_file() {
        bail!(
            "build.gradle not found at {}",
            args.build_gradle_path.display()
        );
    }

    info!(
        "Updating applicationId in: {}",
        args.build_gradle_path.display()
    );

    let file = File::open(&args.build_gradle_path).with_context(|| {
        format!(
            "Failed to read build.gradle file {}",
            args.build_gradle_path.display()
        )
    })?;
    let report = ApplicationIdUpdater::new(BufReader::new(file))
        .update(&args.new_application_id)
        .context("Failed to update applicationId")?;

    outputs::export_output(
        APPLICATION_ID_OUTPUT_KEY,
        strip_quotation_marks(&report.final_application_id),
    )
    .context("Failed to export outputs")?;

    fs::write(&args.build_gradle_path, &report.new_content).with_context(|| {
        format!(
            "Failed to write build.gradle file {}",
            args.build_gradle_path.display()
        )
    })?;

    info!("{} applicationId updated", report.updated_count);
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_logging(&args.log_level);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

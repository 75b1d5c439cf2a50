//! Output export to the pipeline's key-value store.

use std::process::Command;

use anyhow::{Context, Result, bail};
use tracing::{debug, warn};

/// Name of the pipeline's output export helper.
const ENVMAN: &str = "envman";

/// Persist `value` under `key` for downstream pipeline steps.
///
/// Delegates to `envman add` when the helper is on PATH. Outside the
/// pipeline the helper is usually absent; that logs a warning and skips the
/// export rather than failing a local run. A helper that runs and exits
/// non-zero is an error.
pub fn export_output(key: &str, value: &str) -> Result<()> {
    let envman = match which::which(ENVMAN) {
        Ok(path) => path,
        Err(_) => {
            warn!("{ENVMAN} not found on PATH, skipping export of {key}");
            return Ok(());
        }
    };

    debug!("Exporting {key}={value}");
    let status = Command::new(envman)
        .args(["add", "--key", key, "--value", value])
        .status()
        .with_context(|| format!("Failed to run {ENVMAN} add for {key}"))?;
    if !status.success() {
        bail!("{ENVMAN} add --key {key} exited with {status}");
    }
    Ok(())
}

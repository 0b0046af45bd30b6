//! `trellis manifest` command implementation.
//!
//! Loads the dependency description, synthesizes the package manifest and
//! prints it or writes it to the requested file.

use camino::Utf8PathBuf;
use serde_json::json;
use trellis_config::DescriptionLoader;
use trellis_core::error::{TrellisError, TrellisResult};
use trellis_core::synthesize;

use super::CommandContext;

pub const MANIFEST_GENERATED: &str = "manifest_generated";

/// Execute the `trellis manifest` command, returning the manifest text
pub async fn execute(
    path: Option<Utf8PathBuf>,
    output: Option<Utf8PathBuf>,
    ctx: &CommandContext,
) -> TrellisResult<String> {
    let loader = DescriptionLoader::from_env(ctx.cwd.clone());
    let (dependencies, source) = loader.load(path.as_deref()).await?;

    let manifest = synthesize(&dependencies);

    let written_to = match output {
        Some(output) => {
            let output = if output.is_absolute() {
                output
            } else {
                ctx.cwd.join(output)
            };
            tokio::fs::write(&output, &manifest)
                .await
                .map_err(|e| TrellisError::io(format!("Failed to write {}", output), e))?;
            ctx.output.success(&format!(
                "Wrote {} with {} package(s)",
                output,
                dependencies.packages.len()
            ));
            Some(output)
        },
        None => {
            ctx.output.result(&manifest);
            None
        },
    };

    ctx.report_event(
        MANIFEST_GENERATED,
        json!({
            "description": source.path().as_str(),
            "packages": dependencies.packages.len(),
            "output": written_to.as_ref().map(|path| path.as_str()),
        }),
    );

    Ok(manifest)
}

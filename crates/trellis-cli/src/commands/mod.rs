//! Command implementations and dispatch.

use std::sync::Arc;

use camino::Utf8PathBuf;
use serde_json::Value;
use tracing::{info, warn};
use trellis_core::error::{TrellisError, TrellisResult};
use trellis_queue::{QueueDispatcher, QueueEvent, TracingDispatcher};

pub mod files;
pub mod manifest;


use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: Utf8PathBuf,
    pub output: OutputHandler,
    pub dispatcher: Arc<dyn QueueDispatcher>,
}

impl CommandContext {
    /// Context for the current directory, reporting events through tracing
    pub fn new(output: OutputHandler) -> TrellisResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| TrellisError::io("Failed to get current directory".to_string(), e))?;
        let cwd = Utf8PathBuf::from_path_buf(cwd).map_err(|path| TrellisError::ConfigValidation {
            field: "cwd".to_string(),
            reason: format!("Working directory {} is not valid UTF-8", path.display()),
        })?;

        Ok(Self {
            cwd,
            output,
            dispatcher: Arc::new(TracingDispatcher::new()),
        })
    }

    /// Report an event; delivery failures are logged and never fail the command
    pub fn report_event(&self, name: &str, payload: Value) {
        let event = QueueEvent::new(self.dispatcher.identifier(), name).with_payload(payload);
        if let Err(err) = self.dispatcher.dispatch(&event) {
            warn!(event = name, error = %err, "failed to report event");
        }
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> TrellisResult<()> {
    match command {
        Commands::Manifest { path, output } => {
            info!("Generating package manifest");
            manifest::execute(path, output, ctx).await.map(|_| ())
        },
        Commands::Files { path } => {
            info!("Encoding file selectors from {}", path);
            files::execute(path, ctx).await.map(|_| ())
        },
        Commands::Version => show_version(ctx),
    }
}

fn show_version(ctx: &CommandContext) -> TrellisResult<()> {
    ctx.output.result(&format!("trellis {}", env!("CARGO_PKG_VERSION")));
    ctx.output.result(&format!("Built: {}", env!("TRELLIS_BUILD_DATE")));
    ctx.output.result(&format!("Target: {}", env!("TRELLIS_TARGET")));
    ctx.output.result(&format!("Rust: {}", env!("TRELLIS_RUSTC_VERSION")));
    Ok(())
}

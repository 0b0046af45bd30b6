//! `trellis files` command implementation.

use camino::Utf8PathBuf;
use trellis_config::encode_file_list;
use trellis_config::files::load_from_file;
use trellis_core::error::TrellisResult;

use super::CommandContext;

/// Decode a file selector list and print its canonical JSON encoding
pub async fn execute(path: Utf8PathBuf, ctx: &CommandContext) -> TrellisResult<String> {
    let path = if path.is_absolute() {
        path
    } else {
        ctx.cwd.join(path)
    };

    let list = load_from_file(&path).await?;
    let encoded = encode_file_list(&list)?;
    ctx.output.result(&encoded);
    Ok(encoded)
}

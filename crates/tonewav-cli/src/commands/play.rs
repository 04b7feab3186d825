//! Play command implementation
//!
//! Forwards an existing file to standard output unchanged.

use anyhow::{Context, Result};
use std::io;
use std::path::Path;
use std::process::ExitCode;
use tonewav_backend_audio::play_file;
use tracing::info;

use super::STAGE_PLAYBACK;

/// Run the play command
///
/// # Returns
/// Exit code: 0 success, 1 on any failure
pub fn run(wav_path: &str) -> Result<ExitCode> {
    let path = Path::new(wav_path);
    let stdout = io::stdout();
    let bytes = play_file(path, stdout.lock())
        .with_context(|| format!("{}: {}", STAGE_PLAYBACK, path.display()))?;
    info!(path = %path.display(), bytes, "playback finished");
    Ok(ExitCode::SUCCESS)
}

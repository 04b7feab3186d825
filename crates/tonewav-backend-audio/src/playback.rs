//! Forwarding a written file to a playback sink.
//!
//! Playback is pass-through I/O: the file's bytes are copied verbatim to the
//! sink (typically stdout piped into an audio player) in fixed-size
//! transfers. Nothing is decoded or re-encoded.

use std::fs::File;
use std::io::{self, ErrorKind, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{AudioError, AudioResult};

/// Bytes moved per transfer.
pub const TRANSFER_CHUNK: usize = 1024;

/// Copies everything from `reader` to `sink` in transfers of at most
/// `chunk_size` bytes, then flushes the sink.
///
/// Returns the number of bytes copied. A zero `chunk_size` is rejected with
/// [`ErrorKind::InvalidInput`] before anything is read.
pub fn forward<R: Read, W: Write>(mut reader: R, mut sink: W, chunk_size: usize) -> io::Result<u64> {
    if chunk_size == 0 {
        return Err(io::Error::new(
            ErrorKind::InvalidInput,
            "transfer chunk size must be non-zero",
        ));
    }

    let mut buffer = vec![0u8; chunk_size];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        sink.write_all(&buffer[..n])?;
        total += n as u64;
    }

    sink.flush()?;
    Ok(total)
}

/// Reopens a written file and forwards its bytes to `sink`.
///
/// Any failure, including a missing file, is reported as
/// [`AudioError::Playback`].
pub fn play_file<W: Write>(path: &Path, sink: W) -> AudioResult<u64> {
    let file = File::open(path).map_err(AudioError::Playback)?;
    let copied = forward(file, sink, TRANSFER_CHUNK).map_err(AudioError::Playback)?;
    debug!(path = %path.display(), bytes = copied, "forwarded file to playback sink");
    Ok(copied)
}

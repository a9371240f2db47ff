use crate::Result;
use crate::config::{DecodeMode, Encoding};
use crate::source::decode;

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Decoded contents of one log file. Never modified after reading.
#[derive(Debug, Clone)]
pub struct RawLog {
    pub path: PathBuf,
    pub text: String,
}

/// Read the whole log file and decode it.
///
/// The file handle lives only for the duration of `fs::read`.
pub fn read_log(path: &Path, encoding: Encoding, mode: DecodeMode) -> Result<RawLog> {
    let bytes = fs::read(path).with_context(|| format!("read log file {}", path.display()))?;

    let text = decode(&bytes, encoding, mode)
        .with_context(|| format!("decode log file {} as {:?}", path.display(), encoding))?;

    debug!(
        path = %path.display(),
        bytes = bytes.len(),
        chars = text.chars().count(),
        "decoded log file"
    );

    Ok(RawLog {
        path: path.to_path_buf(),
        text,
    })
}

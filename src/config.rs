//! Run settings: hard-coded defaults plus whatever the CLI overrides.

use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_LOG_PATH: &str = "debug_api_error.log";
pub const DEFAULT_MARKER: &str = "FULL ERROR DETAILS:";

/// Characters shown when extraction fails and a human has to look at the text.
pub const EXCERPT_CHARS: usize = 500;

/// Window scanned by the regex-only `scan` command.
pub const SCAN_WINDOW_CHARS: usize = 5000;

/// Default length for the `raw` command.
pub const RAW_CHARS: usize = 2000;

/// Cap for pretty-printed `meta` in the `dump` command.
pub const DUMP_CHARS: usize = 2000;

/// Byte encoding of the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    #[value(name = "utf16le")]
    Utf16Le,
    #[value(name = "utf8")]
    Utf8,
}

/// What to do with byte sequences that do not decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeMode {
    /// Fail on the first invalid sequence.
    Strict,
    /// Drop invalid sequences and keep going.
    Lenient,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub log_path: PathBuf,
    pub marker: String,
    pub encoding: Encoding,
    pub decode_mode: DecodeMode,
    pub scan: crate::extract::ScanMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_path: PathBuf::from(DEFAULT_LOG_PATH),
            marker: DEFAULT_MARKER.to_string(),
            encoding: Encoding::Utf16Le,
            decode_mode: DecodeMode::Lenient,
            scan: crate::extract::ScanMode::StringAware,
        }
    }
}

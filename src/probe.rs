//! End-to-end pipeline: decoded log text in, rendered report and exit status out.
//!
//! Each command gets one function. Expected failures (missing marker, broken
//! JSON, absent fields) end up in the returned `Outcome`; only unexpected
//! errors come back as `Err`.

use crate::Result;
use crate::config::{RAW_CHARS, SCAN_WINDOW_CHARS, Settings};
use crate::diag::{FieldPath, find_diagnostic_fields};
use crate::extract::{ExtractError, extract_balanced_object, locate, parse, window};
use crate::report;

use serde_json::Value;
use std::process::ExitCode;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    /// Marker or object boundary missing.
    Abnormal,
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        match status {
            Status::Success => ExitCode::SUCCESS,
            Status::Abnormal => ExitCode::FAILURE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub output: String,
    pub status: Status,
}

impl Outcome {
    fn success(output: String) -> Self {
        Self {
            output,
            status: Status::Success,
        }
    }

    fn abnormal(output: String) -> Self {
        Self {
            output,
            status: Status::Abnormal,
        }
    }
}

fn find_marker(text: &str, settings: &Settings) -> std::result::Result<usize, ExtractError> {
    match locate(text, &settings.marker) {
        Some(at) => {
            debug!(offset = at, marker = %settings.marker, "marker located");
            Ok(at)
        }
        None => {
            warn!(marker = %settings.marker, "marker not found");
            Err(ExtractError::MarkerNotFound {
                marker: settings.marker.clone(),
            })
        }
    }
}

/// Why the embedded record could not be turned into a JSON value.
#[derive(Debug)]
enum RecordFailure<'a> {
    Extract(ExtractError),
    Parse {
        error: serde_json::Error,
        candidate: &'a str,
    },
}

impl RecordFailure<'_> {
    /// Broken JSON still counts as a normal run; a missing record does not.
    fn status(&self) -> Status {
        match self {
            RecordFailure::Extract(_) => Status::Abnormal,
            RecordFailure::Parse { .. } => Status::Success,
        }
    }

    fn render(&self, text: &str) -> String {
        match self {
            RecordFailure::Extract(e) => report::render_extract_failure(e, text, RAW_CHARS),
            RecordFailure::Parse { error, candidate } => {
                report::render_parse_failure(error, candidate)
            }
        }
    }

    fn render_json(&self, text: &str) -> Result<String> {
        match self {
            RecordFailure::Extract(e) => report::render_extract_failure_json(e, text, RAW_CHARS),
            RecordFailure::Parse { error, candidate } => {
                report::render_parse_failure_json(error, candidate)
            }
        }
    }

    fn into_outcome(self, text: &str) -> Outcome {
        Outcome {
            output: self.render(text),
            status: self.status(),
        }
    }
}

/// Locate, cut out and parse the embedded record.
fn extract_record<'a>(
    text: &'a str,
    settings: &Settings,
) -> std::result::Result<Value, RecordFailure<'a>> {
    let at = find_marker(text, settings).map_err(RecordFailure::Extract)?;

    let object = extract_balanced_object(text, at, settings.scan).map_err(|e| {
        warn!(error = %e, "embedded object not extracted");
        RecordFailure::Extract(e)
    })?;
    debug!(
        start = object.start,
        end = object.end,
        "extracted balanced object"
    );

    parse(object.json).map_err(|error| {
        warn!(%error, "embedded object is not valid JSON");
        RecordFailure::Parse {
            error,
            candidate: object.json,
        }
    })
}

/// Extract the record and report its diagnostic fields.
///
/// With `json` set, failures are reported as JSON too, tagged by `status`.
pub fn probe_fields(
    text: &str,
    settings: &Settings,
    paths: &[FieldPath],
    json: bool,
) -> Result<Outcome> {
    let root = match extract_record(text, settings) {
        Ok(v) => v,
        Err(failure) if json => {
            return Ok(Outcome {
                output: failure.render_json(text)?,
                status: failure.status(),
            });
        }
        Err(failure) => return Ok(failure.into_outcome(text)),
    };

    let found = find_diagnostic_fields(&root, paths);
    let output = if json {
        report::render_fields_json(&found)?
    } else {
        report::render_fields(&found)
    };
    Ok(Outcome::success(output))
}

pub fn probe_keys(text: &str, settings: &Settings) -> Outcome {
    match extract_record(text, settings) {
        Ok(root) => Outcome::success(report::render_keys(&root)),
        Err(failure) => failure.into_outcome(text),
    }
}

pub fn probe_dump(text: &str, settings: &Settings) -> Outcome {
    match extract_record(text, settings) {
        Ok(root) => Outcome::success(report::render_dump(&root)),
        Err(failure) => failure.into_outcome(text),
    }
}

/// Regex scan of the region after the marker, no JSON parsing involved.
pub fn probe_scan(text: &str, settings: &Settings) -> Result<Outcome> {
    let at = match find_marker(text, settings) {
        Ok(at) => at,
        Err(e) => return Ok(Outcome::abnormal(format!("{e}\n"))),
    };

    let region = window(text, at, SCAN_WINDOW_CHARS);
    let hits = report::scan_window(region)?;
    Ok(Outcome::success(report::render_scan(&hits, region)))
}

/// Print `len` characters starting at the marker.
pub fn probe_raw(text: &str, settings: &Settings, len: usize, safe: bool) -> Outcome {
    match find_marker(text, settings) {
        Ok(at) => Outcome::success(report::render_raw(window(text, at, len), safe)),
        Err(e) => Outcome::abnormal(format!("{e}\n")),
    }
}

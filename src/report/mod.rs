//! Output rendering: one function per command, plus the failure reports.

pub mod scan;
pub mod text;

pub use scan::{ScanHits, scan_window};
pub use text::{
    render_dump, render_extract_failure, render_extract_failure_json, render_fields,
    render_fields_json, render_keys, render_parse_failure, render_parse_failure_json, render_raw,
    render_scan,
};

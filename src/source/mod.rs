//! Raw log acquisition: read the file once, decode it to text.

pub mod decode;
pub mod read;

pub use decode::{DecodeError, decode};
pub use read::{RawLog, read_log};

use crate::config::{DecodeMode, Encoding};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("invalid UTF-16LE sequence at byte {offset}")]
    Utf16 { offset: usize },

    #[error("odd trailing byte at offset {offset} in UTF-16LE input")]
    OddLength { offset: usize },

    #[error("invalid UTF-8 sequence at byte {offset}")]
    Utf8 { offset: usize },
}

/// Decode raw log bytes.
///
/// In lenient mode undecodable sequences are dropped, never replaced, so the
/// resulting text contains only what was actually readable.
pub fn decode(bytes: &[u8], encoding: Encoding, mode: DecodeMode) -> Result<String, DecodeError> {
    match encoding {
        Encoding::Utf16Le => decode_utf16le(bytes, mode),
        Encoding::Utf8 => decode_utf8(bytes, mode),
    }
}

fn decode_utf16le(bytes: &[u8], mode: DecodeMode) -> Result<String, DecodeError> {
    let chunks = bytes.chunks_exact(2);
    if mode == DecodeMode::Strict && !chunks.remainder().is_empty() {
        return Err(DecodeError::OddLength {
            offset: bytes.len() - 1,
        });
    }

    let units = chunks.map(|pair| u16::from_le_bytes([pair[0], pair[1]]));

    let mut out = String::with_capacity(bytes.len() / 2);
    // Position in code units, for error reporting.
    let mut unit = 0usize;
    for decoded in char::decode_utf16(units) {
        match decoded {
            Ok(c) => {
                unit += c.len_utf16();
                out.push(c);
            }
            Err(_) => {
                if mode == DecodeMode::Strict {
                    return Err(DecodeError::Utf16 { offset: unit * 2 });
                }
                unit += 1;
            }
        }
    }
    Ok(out)
}

fn decode_utf8(bytes: &[u8], mode: DecodeMode) -> Result<String, DecodeError> {
    match mode {
        DecodeMode::Strict => std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| DecodeError::Utf8 {
                offset: e.valid_up_to(),
            }),
        DecodeMode::Lenient => Ok(bytes.utf8_chunks().map(|chunk| chunk.valid()).collect()),
    }
}

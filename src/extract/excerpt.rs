/// First `limit` characters of `text`, flattened onto one line.
pub fn excerpt(text: &str, limit: usize) -> String {
    text.chars()
        .take(limit)
        .map(|c| if c == '\r' || c == '\n' { ' ' } else { c })
        .collect()
}

/// Blank out control characters (C0, DEL, C1) so the text prints on one line
/// without upsetting the terminal.
pub fn sanitize_controls(text: &str) -> String {
    text.chars()
        .map(|c| match c as u32 {
            0x00..=0x1F | 0x7F..=0x9F => ' ',
            _ => c,
        })
        .collect()
}

/// Slice of at most `limit` characters starting at byte offset `from`.
pub fn window(text: &str, from: usize, limit: usize) -> &str {
    let rest = text.get(from..).unwrap_or("");
    match rest.char_indices().nth(limit) {
        Some((end, _)) => &rest[..end],
        None => rest,
    }
}

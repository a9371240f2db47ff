/// Byte offset of the first case-sensitive occurrence of `marker` in `text`.
pub fn locate(text: &str, marker: &str) -> Option<usize> {
    text.find(marker)
}

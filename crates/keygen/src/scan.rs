//! Character-level helpers shared by the expression compiler.

/// Returns the character following `idx`, if there is one.
pub(crate) fn peek(chars: &[char], idx: usize) -> Option<char> {
    chars.get(idx + 1).copied()
}

/// Whether the character at `idx` opens a reference delimited by `delim`. A delimiter
/// followed by a second copy of itself is an escape, and a delimiter in last position
/// opens nothing.
pub(crate) fn starts_reference(chars: &[char], idx: usize, delim: char) -> bool {
    chars.get(idx) == Some(&delim) && peek(chars, idx).is_some_and(|next| next != delim)
}

/// Collapses each doubled `delim` into a single occurrence.
pub(crate) fn unescape(chars: &[char], delim: char) -> String {
    let mut out = String::with_capacity(chars.len());
    let mut idx = 0;
    while idx < chars.len() {
        out.push(chars[idx]);
        if chars[idx] == delim && peek(chars, idx) == Some(delim) {
            idx += 2;
        } else {
            idx += 1;
        }
    }
    out
}

//! Line-ending helpers shared by the load/save path.

/// Platform line separator used when joining loaded lines.
#[cfg(windows)]
pub const LINE_SEPARATOR: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_SEPARATOR: &str = "\n";

/// Normalize file content to the platform line separator.
///
/// The file is read line by line and every line, including the last one,
/// is followed by [`LINE_SEPARATOR`]. An empty input stays empty.
pub fn normalize_line_endings(content: &str) -> String {
    if content.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(content.len() + 1);
    for line in content.lines() {
        out.push_str(line);
        out.push_str(LINE_SEPARATOR);
    }
    out
}

//! Display width of emitted text.

use unicode_width::UnicodeWidthStr;

/// Columns `text` occupies on screen.
///
/// East Asian wide characters count two columns; combining marks and control
/// characters count zero. Plain ASCII takes a fast path that counts bytes.
#[inline]
pub fn string_width(text: &str) -> usize {
    if text.is_ascii() {
        return text.len();
    }
    UnicodeWidthStr::width(text)
}

//! Input cleaning for caller supplied message text.
//!
//! Line breaks and tabs are rewritten into visible markers so they survive the trip through
//! the model untouched; every other control character is dropped.

pub const NEWLINE_MARKER: &str = "<<NEWLINE>>";
pub const CARRIAGE_RETURN_MARKER: &str = "<<CARRIAGE_RETURN>>";
pub const TAB_MARKER: &str = "<<TAB>>";

/// Replace `\n`, `\r` and `\t` with their markers and strip any other control character
pub fn clean(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => cleaned.push_str(NEWLINE_MARKER),
            '\r' => cleaned.push_str(CARRIAGE_RETURN_MARKER),
            '\t' => cleaned.push_str(TAB_MARKER),
            c if c.is_control() => {}
            c => cleaned.push(c),
        }
    }
    cleaned
}

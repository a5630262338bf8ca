//! Display helpers for text pulled out of Supabase.
//!
//! Some descriptions were stored after a Latin-1 round trip, so an accented
//! `é` shows up as `Ã©` and emoji as runs like `ð\u{9f}\u{98}\u{80}`. Repair is
//! best effort and all or nothing: either the whole string decodes cleanly or
//! the caller gets its input back.

pub const DESCRIPTION_THRESHOLD: usize = 50;
pub const DESCRIPTION_SLICE: usize = 150;
pub const URL_DISPLAY_LIMIT: usize = 30;
pub const ELLIPSIS: &str = "...";

/// Never fails. Text that does not decode is returned unchanged.
pub fn repair_text(text: &str) -> String {
    reencode(text)
        .and_then(|decoded| unescape_latin1(&decoded))
        .unwrap_or_else(|| text.to_string())
}

// Threshold and slice length differ; long descriptions between 51 and 150
// characters still get the ellipsis.
pub fn display_description(raw: &str) -> String {
    let shortened = if raw.chars().count() > DESCRIPTION_THRESHOLD {
        format!(
            "{}{ELLIPSIS}",
            repair_text(&take_chars(raw, DESCRIPTION_SLICE))
        )
    } else {
        repair_text(raw)
    };

    repair_text(&shortened)
}

pub fn display_url(url: &str) -> String {
    if url.chars().count() > URL_DISPLAY_LIMIT {
        format!("{}{ELLIPSIS}", take_chars(url, URL_DISPLAY_LIMIT))
    } else {
        url.to_string()
    }
}

pub fn take_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

fn reencode(text: &str) -> Option<String> {
    String::from_utf8(text.as_bytes().to_vec()).ok()
}

// Every char must fit in one byte, and the bytes must form valid UTF-8.
fn unescape_latin1(text: &str) -> Option<String> {
    let bytes = text
        .chars()
        .map(|c| u8::try_from(c).ok())
        .collect::<Option<Vec<u8>>>()?;

    String::from_utf8(bytes).ok()
}

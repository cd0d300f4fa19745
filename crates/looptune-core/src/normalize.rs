//! Cleanup of raw user input before classification.

use std::borrow::Cow;

/// Strip shell-quoting backslashes, percent-decode and trim.
///
/// The three steps are repeated until the text stops changing, so the result
/// is a fixed point: normalizing it again is a no-op and it never contains a
/// backslash, even one that only appeared after decoding `%5C`. Each pass that
/// changes the text makes it strictly shorter, which bounds the loop.
///
/// A decode that would produce invalid UTF-8 is skipped and the stripped text
/// is kept as it is.
pub fn normalize(raw: &str) -> String {
    let mut current = raw.to_string();
    loop {
        let next = normalize_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_once(raw: &str) -> String {
    let stripped = raw.replace('\\', "");
    let decoded = match urlencoding::decode(&stripped) {
        Ok(Cow::Owned(s)) => s,
        Ok(Cow::Borrowed(_)) | Err(_) => stripped,
    };
    decoded.trim().to_string()
}

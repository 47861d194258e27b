use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Characters treated as word separators.
fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '-' | '_' | '.' | ':' | '%' | '#' | '/')
}

/// Normalizes text for fuzzy comparison.
///
/// - decomposes (NFD) and drops combining marks, so `café` becomes `cafe`
/// - maps every separator run to a single space and trims the ends
/// - drops any other character that is not ASCII alphanumeric
/// - lower-cases unless `preserve_case` is set
///
/// The output alphabet is ASCII alphanumerics plus single inner spaces, so
/// normalizing twice gives the same result as normalizing once.
pub fn normalize_text(text: &str, preserve_case: bool) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.nfd().filter(|c| !is_combining_mark(*c)) {
        if is_separator(c) {
            pending_space = !out.is_empty();
            continue;
        }
        if !c.is_ascii_alphanumeric() {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(if preserve_case {
            c
        } else {
            c.to_ascii_lowercase()
        });
    }

    out
}

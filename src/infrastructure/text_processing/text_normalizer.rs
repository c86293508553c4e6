use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static HYPHEN_NEWLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<prefix>\w)-[ \t]*\r?\n[ \t]*(?P<suffix>\w)").unwrap());

/// Collapses every whitespace run to a single space, trims both ends and
/// keeps at most `max_chars` characters. Normalizing the output again
/// returns it unchanged.
pub fn normalize_text(raw: &str, max_chars: usize) -> String {
    let mut result = String::with_capacity(raw.len().min(max_chars * 4));
    let mut kept = 0;
    let mut pending_space = false;

    for ch in raw.chars() {
        if ch.is_whitespace() {
            pending_space = kept > 0;
            continue;
        }

        if pending_space {
            if kept == max_chars {
                break;
            }
            result.push(' ');
            kept += 1;
            pending_space = false;
        }

        if kept == max_chars {
            break;
        }
        result.push(ch);
        kept += 1;
    }

    // A cut right after a space would leave it dangling.
    let trimmed_len = result.trim_end().len();
    result.truncate(trimmed_len);
    result
}

/// Cleans the text of one PDF page: folds compatibility forms such as the
/// `fi` ligature and joins words hyphenated across a line break.
pub fn repair_pdf_text(raw: &str) -> String {
    let folded: String = raw.nfkc().collect();
    HYPHEN_NEWLINE
        .replace_all(&folded, "$prefix$suffix")
        .into_owned()
}

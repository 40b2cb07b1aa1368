//! Trailing qualifier stripping for display terms
//!
//! Dictionary entries often end in a severity or subtype clause ("Diabetes
//! mellitus type II", "Carcinoma stage IV", "Gleason Score 7"). For
//! completion suggestions the bare term is the more useful surface, so one
//! trailing qualifier is removed; the original spelling stays on the stored
//! document.

/// Numeral class accepted after a qualifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumeralKind {
    IntegerOnly,
    IntegerOrRoman,
}

/// Qualifier keywords recognized immediately before a trailing numeral.
///
/// A trailing bare integer is stripped even without a keyword.
pub const QUALIFIER_KEYWORDS: &[(&str, NumeralKind)] = &[
    ("type", NumeralKind::IntegerOrRoman),
    ("stage", NumeralKind::IntegerOrRoman),
    ("stadium", NumeralKind::IntegerOnly),
];

/// Remove one trailing qualifier clause from a display term.
///
/// Recognized tails (case-insensitive): a bare integer, `type`/`stage`
/// followed by an integer or Roman numeral, `stadium` followed by an
/// integer. Separating whitespace and punctuation before the clause are
/// removed as well. Anything else is returned trimmed but otherwise
/// unchanged; only a single qualifier is stripped per call.
pub fn strip_appendix(display: &str) -> String {
    let trimmed = display.trim();

    let Some((head, tail)) = trimmed.rsplit_once(char::is_whitespace) else {
        return trimmed.to_string();
    };

    let remainder = if is_integer(tail) {
        match qualifier_before(head) {
            Some((rest, _)) => rest,
            None => head,
        }
    } else if is_roman(tail) {
        match qualifier_before(head) {
            Some((rest, NumeralKind::IntegerOrRoman)) => rest,
            _ => return trimmed.to_string(),
        }
    } else {
        return trimmed.to_string();
    };

    let cleaned =
        remainder.trim_end_matches(|c: char| c.is_whitespace() || c.is_ascii_punctuation());

    if cleaned.is_empty() {
        // The whole term was a qualifier ("type 2"); leave it alone.
        trimmed.to_string()
    } else {
        cleaned.to_string()
    }
}

/// If `head` ends in a qualifier keyword, return the part before it and the
/// numeral class that keyword accepts.
fn qualifier_before(head: &str) -> Option<(&str, NumeralKind)> {
    let trimmed = head.trim_end();
    let (rest, last) = match trimmed.rsplit_once(char::is_whitespace) {
        Some((rest, last)) => (rest, last),
        None => ("", trimmed),
    };

    QUALIFIER_KEYWORDS
        .iter()
        .find(|(kw, _)| kw.eq_ignore_ascii_case(last))
        .map(|(_, kind)| (rest, *kind))
}

fn is_integer(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Roman numerals in the I through tens range (letters I, V, X).
fn is_roman(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| matches!(c.to_ascii_lowercase(), 'i' | 'v' | 'x'))
}

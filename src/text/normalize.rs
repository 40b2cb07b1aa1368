//! Canonical comparison keys for display terms
//!
//! Dictionary sources spell the same concept with inconsistent accents,
//! casing, and punctuation ("Ménière's disease" / "Meniere disease"). The
//! normalized key is used only for equality grouping and is never shown to
//! users.

/// Diacritic substitution table: unaccented base sequence → accented forms.
///
/// Covers the Latin-extended range seen in SNOMED/MeSH/ICD dumps, including
/// the ligatures æ/œ which decompose to two letters.
pub const DIACRITIC_FOLDS: &[(&str, &[char])] = &[
    ("a", &['à', 'á', 'â', 'ã', 'ä', 'å', 'ā', 'ă', 'ą']),
    ("ae", &['æ']),
    ("c", &['ç', 'ć', 'č']),
    ("d", &['ď', 'đ']),
    ("e", &['è', 'é', 'ê', 'ë', 'ē', 'ĕ', 'ė', 'ę', 'ě']),
    ("g", &['ğ', 'ģ']),
    ("i", &['ì', 'í', 'î', 'ï', 'ī', 'ĭ', 'į', 'ı']),
    ("l", &['ł', 'ļ']),
    ("n", &['ñ', 'ń', 'ņ', 'ň']),
    ("o", &['ò', 'ó', 'ô', 'õ', 'ö', 'ø', 'ō', 'ŏ', 'ő']),
    ("oe", &['œ']),
    ("r", &['ŕ', 'ř']),
    ("s", &['ś', 'ş', 'š']),
    ("ss", &['ß']),
    ("t", &['ţ', 'ť']),
    ("u", &['ù', 'ú', 'û', 'ü', 'ū', 'ŭ', 'ů', 'ű']),
    ("y", &['ý', 'ÿ']),
    ("z", &['ź', 'ż', 'ž']),
];

/// Normalize a raw display term into its comparison key.
///
/// Lowercases, folds diacritics through [`DIACRITIC_FOLDS`], replaces every
/// run of non-word characters with a single space, and trims. The result is
/// idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(raw: &str) -> String {
    let mut folded = String::with_capacity(raw.len());

    for c in raw.chars() {
        for lc in c.to_lowercase() {
            match fold_char(lc) {
                Some(base) => folded.push_str(base),
                None => folded.push(lc),
            }
        }
    }

    // Collapse every run of non-word characters to one interior space.
    let mut key = String::with_capacity(folded.len());
    let mut gap = false;

    for c in folded.chars() {
        if c.is_alphanumeric() || c == '_' {
            if gap && !key.is_empty() {
                key.push(' ');
            }
            gap = false;
            key.push(c);
        } else {
            gap = true;
        }
    }

    key
}

/// Normalize a term delivered as raw bytes from a dictionary dump.
///
/// A malformed byte sequence yields the empty string: the term drops out of
/// dedup consideration instead of failing the batch.
pub fn normalize_bytes(raw: &[u8]) -> String {
    match std::str::from_utf8(raw) {
        Ok(s) => normalize(s),
        Err(_) => String::new(),
    }
}

fn fold_char(c: char) -> Option<&'static str> {
    DIACRITIC_FOLDS
        .iter()
        .find_map(|(base, variants)| variants.contains(&c).then_some(*base))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_trim() {
        assert_eq!(normalize("  Diabetes Mellitus "), "diabetes mellitus");
    }

    #[test]
    fn test_diacritics_fold_to_base_letters() {
        assert_eq!(normalize("Ménière's disease"), "meniere s disease");
        assert_eq!(normalize("Sjögren"), "sjogren");
        assert_eq!(normalize("naïve"), "naive");
    }

    #[test]
    fn test_ligatures_expand() {
        assert_eq!(normalize("anæmia"), "anaemia");
        assert_eq!(normalize("œsophagus"), "oesophagus");
    }

    #[test]
    fn test_uppercase_accents_fold() {
        // Uppercase variants go through lowercasing before the fold table
        assert_eq!(normalize("MÉNIÈRE"), "meniere");
    }

    #[test]
    fn test_punctuation_collapses_to_single_space() {
        assert_eq!(normalize("heart--attack,  acute"), "heart attack acute");
        assert_eq!(normalize("(fracture) of ulna"), "fracture of ulna");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  ,;- "), "");
    }

    #[test]
    fn test_idempotent() {
        for s in ["Ménière's disease", "  HEART -- attack ", "anæmia", ""] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_malformed_bytes_become_empty() {
        assert_eq!(normalize_bytes(&[0xff, 0xfe, 0x41]), "");
        assert_eq!(normalize_bytes("Café".as_bytes()), "cafe");
    }
}

//! File name normalization.
//!
//! Turns an arbitrary file or folder name into a filesystem-safe one:
//! Cyrillic letters are transliterated to Latin, alphanumerics, dots and
//! spaces are kept, and everything else becomes an underscore.
//!
//! # Examples
//!
//! ```
//! use sortdir::normalize::normalize;
//!
//! assert_eq!(normalize("Привіт, світ.txt"), "Privit_ svit.txt");
//! assert_eq!(normalize("report (final).pdf"), "report _final_.pdf");
//! ```

use std::collections::HashMap;
use std::sync::LazyLock;

/// Lower-case Cyrillic letters with a Latin transliteration.
const CYRILLIC_LETTERS: &str = "абвгдеёжзийклмнопрстуфхцчшщъыьэюяєіїґ";

/// Latin replacements, position for position with [`CYRILLIC_LETTERS`].
const LATIN_REPLACEMENTS: [&str; 37] = [
    "a", "b", "v", "g", "d", "e", "e", "j", "z", "i", "j", "k", "l", "m", "n", "o", "p", "r", "s",
    "t", "u", "f", "h", "ts", "ch", "sh", "sch", "", "y", "", "e", "yu", "ya", "je", "i", "ji", "g",
];

static TRANSLITERATION: LazyLock<HashMap<char, &'static str>> = LazyLock::new(|| {
    CYRILLIC_LETTERS
        .chars()
        .zip(LATIN_REPLACEMENTS)
        .collect()
});

/// Returns the Latin spelling of a Cyrillic letter, keeping its case.
///
/// Returns `None` for characters outside the transliteration table.
pub fn transliterate(ch: char) -> Option<String> {
    let mut lower = ch.to_lowercase();
    let key = lower.next()?;
    if lower.next().is_some() {
        return None;
    }

    let latin = TRANSLITERATION.get(&key)?;
    if ch.is_uppercase() {
        Some(latin.to_uppercase())
    } else {
        Some((*latin).to_string())
    }
}

/// Normalizes a file or folder name.
///
/// Applied character by character:
/// 1. Cyrillic letters are replaced by their Latin spelling (upper-case
///    letters give an upper-case spelling; hard and soft signs disappear).
/// 2. Alphanumerics of any script, `.` and space are kept as-is.
/// 3. Anything else becomes `_`.
///
/// Nothing else is touched: runs of underscores, leading dots and reserved
/// names survive unchanged. The function is idempotent.
pub fn normalize(name: &str) -> String {
    let mut output = String::with_capacity(name.len());

    for ch in name.chars() {
        if let Some(latin) = transliterate(ch) {
            output.push_str(&latin);
        } else if ch.is_alphanumeric() || ch == '.' || ch == ' ' {
            output.push(ch);
        } else {
            output.push('_');
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tables_have_equal_length() {
        assert_eq!(CYRILLIC_LETTERS.chars().count(), LATIN_REPLACEMENTS.len());
        assert_eq!(TRANSLITERATION.len(), LATIN_REPLACEMENTS.len());
    }

    #[test]
    fn test_transliterate_lowercase() {
        assert_eq!(transliterate('ж').as_deref(), Some("j"));
        assert_eq!(transliterate('щ').as_deref(), Some("sch"));
        assert_eq!(transliterate('ї').as_deref(), Some("ji"));
        assert_eq!(transliterate('ґ').as_deref(), Some("g"));
    }

    #[test]
    fn test_transliterate_preserves_case() {
        assert_eq!(transliterate('Щ').as_deref(), Some("SCH"));
        assert_eq!(transliterate('Я').as_deref(), Some("YA"));
        assert_eq!(transliterate('Є').as_deref(), Some("JE"));
    }

    #[test]
    fn test_transliterate_signs_map_to_empty() {
        assert_eq!(transliterate('ъ').as_deref(), Some(""));
        assert_eq!(transliterate('Ь').as_deref(), Some(""));
    }

    #[test]
    fn test_transliterate_ignores_other_characters() {
        assert_eq!(transliterate('a'), None);
        assert_eq!(transliterate('7'), None);
        assert_eq!(transliterate('-'), None);
    }

    #[test]
    fn test_normalize_cyrillic_name() {
        assert_eq!(normalize("фото.jpg"), "foto.jpg");
        assert_eq!(normalize("Щоденник 2024.docx"), "SCHodennik 2024.docx");
        assert_eq!(normalize("під'їзд"), "pid_jizd");
    }

    #[test]
    fn test_normalize_replaces_symbols_one_for_one() {
        let input = "a-b+c(d)!e@f.txt";
        let output = normalize(input);
        assert_eq!(output, "a_b_c_d__e_f.txt");
        assert_eq!(output.chars().count(), input.chars().count());
    }

    #[test]
    fn test_normalize_all_symbols() {
        assert_eq!(normalize("#$%&"), "____");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_keeps_dots_spaces_and_other_scripts() {
        assert_eq!(normalize(".hidden file.tar.gz"), ".hidden file.tar.gz");
        assert_eq!(normalize("Ελληνικά 東京"), "Ελληνικά 東京");
    }

    #[test]
    fn test_normalize_cyrillic_output_is_plain_ascii() {
        let input = "Съешь же ещё этих мягких булок 42.txt";
        let output = normalize(input);
        assert!(
            output
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == ' ')
        );

        let expected_len: usize = input
            .chars()
            .map(|c| transliterate(c).map_or(1, |latin| latin.len()))
            .sum();
        assert_eq!(output.len(), expected_len);
        assert!(output.starts_with("Sesh je esche"));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in [
            "фото.jpg",
            "Звіт (копія) #2.pdf",
            "already_clean.txt",
            "ёЁъЪ??..",
            "",
        ] {
            let once = normalize(name);
            assert_eq!(normalize(&once), once, "not idempotent for {name:?}");
        }
    }
}

//! Diacritic-insensitive lemma patterns.
//!
//! When a lemma search ignores diacritics, the pattern is first stripped of
//! the accents this module knows about and then each of `a e i o u c` is
//! widened to a character class covering its accented variants:
//!
//! | base | class |
//! |------|-------|
//! | a | `[aáàäã]` |
//! | e | `[eéëè]` |
//! | i | `[iíïì]` |
//! | o | `[oóöò]` |
//! | u | `[uüúù]` |
//! | c | `[cç]` |
//!
//! Patterns are brought to NFC first, so a base letter followed by a
//! combining accent folds the same way as its precomposed form. Letters with
//! no entry in the table, such as `ř` or `ů`, keep their accents.
//!
//! Characters directly after a backslash are left alone so that escapes such
//! as `\s` or `\d` in a user pattern keep their meaning. Bracketed character
//! classes (`[a-z]`) and braced arguments (`\p{Latin}`, `{2,3}`) are copied
//! through unexpanded.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use unicode_normalization::UnicodeNormalization;

const CLASSES: [(char, &str); 6] = [
    ('a', "aáàäã"),
    ('e', "eéëè"),
    ('i', "iíïì"),
    ('o', "oóöò"),
    ('u', "uüúù"),
    ('c', "cç"),
];

/// Accented letter (either case) to its lowercase base letter.
static BASE_LETTER: Lazy<HashMap<char, char>> = Lazy::new(|| {
    let mut table = HashMap::new();
    for (base, variants) in CLASSES.iter() {
        for variant in variants.chars().filter(|c| c != base) {
            table.insert(variant, *base);
            for upper in variant.to_uppercase() {
                table.insert(upper, *base);
            }
        }
    }
    table
});

/// Remove the known accents from `text`.
///
/// ```
/// use synsem_evaluator::strip_diacritics;
///
/// assert_eq!(strip_diacritics("café"), "cafe");
/// assert_eq!(strip_diacritics("ÇA"), "cA");
/// assert_eq!(strip_diacritics("cafe\u{301}"), "cafe");
/// ```
pub fn strip_diacritics(text: &str) -> String {
    text.nfc()
        .map(|c| BASE_LETTER.get(&c).copied().unwrap_or(c))
        .collect()
}

/// Expand a lemma pattern so that it matches accented and unaccented
/// spellings interchangeably.
///
/// ```
/// use synsem_evaluator::expand_diacritics;
///
/// assert_eq!(expand_diacritics("café"), "[cç][aáàäã]f[eéëè]");
/// ```
pub fn expand_diacritics(pattern: &str) -> String {
    let stripped = strip_diacritics(pattern);
    let mut expanded = String::with_capacity(stripped.len() * 4);
    let mut escaped = false;
    let mut in_class = false;
    let mut in_braces = false;

    for c in stripped.chars() {
        if escaped {
            expanded.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '[' if !in_braces => in_class = true,
            ']' if in_class => in_class = false,
            '{' if !in_class => in_braces = true,
            '}' if in_braces => in_braces = false,
            _ if !in_class && !in_braces => {
                if let Some((_, variants)) =
                    CLASSES.iter().find(|(base, _)| *base == c.to_ascii_lowercase())
                {
                    expanded.push('[');
                    expanded.push_str(variants);
                    expanded.push(']');
                    continue;
                }
            }
            _ => {}
        }
        expanded.push(c);
    }

    expanded
}

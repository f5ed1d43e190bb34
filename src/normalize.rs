//! Header and limit key normalization
//!
//! Column headers exported by test stations are not consistent: spreadsheet
//! cells may contain line breaks, CSV headers may be quoted, and some tools put
//! a space before the unit in parentheses while others don't. Every adapter and
//! the limits loader pass names through [`normalize_key`] so they compare equal.

use once_cell::sync::Lazy;
use regex::Regex;

static SPACE_BEFORE_PAREN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+\(").unwrap());

/// Canonicalize a raw header or limit key.
///
/// Line feeds become spaces, carriage returns and double quotes are removed,
/// surrounding whitespace is trimmed and whitespace directly in front of an
/// opening parenthesis is dropped. Case and all other inner text is preserved.
///
/// # Examples
///
/// ```
/// use mfg_limits::normalize::normalize_key;
///
/// assert_eq!(normalize_key("\"Current  (mA)\""), "Current(mA)");
/// assert_eq!(normalize_key("Tx\nPower"), "Tx Power");
/// ```
pub fn normalize_key(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '\r' && *c != '"')
        .map(|c| if c == '\n' { ' ' } else { c })
        .collect();

    SPACE_BEFORE_PAREN
        .replace_all(cleaned.trim(), "(")
        .into_owned()
}

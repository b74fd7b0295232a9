//! Victim-count extraction

use once_cell::sync::Lazy;
use regex::Regex;
use rescue_domain::QUANTITY_NOT_GIVEN;

static COUNT_PHRASE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+)\s*(people|ppl|pp|members|kids|children|infants|persons|adults|family|person)")
        .expect("count phrase pattern is valid")
});

static FAMILY_OF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"family of ([0-9]+)").expect("family pattern is valid"));

/// Describe the number of people mentioned in `text`
///
/// Returns the first `<number> <group noun>` phrase verbatim (lowercased),
/// otherwise `"<n> family members"` for a `family of <n>` mention, otherwise
/// `"not given"`. Never returns an empty string.
pub fn extract_quantity(text: &str) -> String {
    let text = text.to_lowercase();

    if let Some(found) = COUNT_PHRASE.find(&text) {
        return found.as_str().to_string();
    }
    if let Some(caps) = FAMILY_OF.captures(&text) {
        return format!("{} family members", &caps[1]);
    }
    QUANTITY_NOT_GIVEN.to_string()
}

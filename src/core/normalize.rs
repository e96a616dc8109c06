//! Key normalization shared by insert and lookup paths of the duplicate
//! detector. A field that normalizes to an empty key is treated as missing.

/// Lowercased email, or `None` when absent or empty
pub fn email_key(email: Option<&str>) -> Option<String> {
    email
        .filter(|raw| !raw.is_empty())
        .map(str::to_lowercase)
}

/// Digits of the phone number, or `None` when no digit remains
///
/// An 11-digit number with the North American `1` trunk prefix keys the
/// same as its 10-digit form.
pub fn phone_key(phone: Option<&str>) -> Option<String> {
    let mut digits: String = phone?.chars().filter(char::is_ascii_digit).collect();
    if digits.len() == NANP_WITH_TRUNK && digits.starts_with('1') {
        digits.remove(0);
    }
    (!digits.is_empty()).then_some(digits)
}

const NANP_WITH_TRUNK: usize = 11;

/// Normalized "first last" key
///
/// Joins the parts with one space, lowercases, drops everything outside
/// `[a-z]` and whitespace, collapses whitespace runs and trims.
pub fn name_key(first: Option<&str>, last: Option<&str>) -> Option<String> {
    if first.is_none() && last.is_none() {
        return None;
    }

    let joined = format!("{} {}", first.unwrap_or(""), last.unwrap_or("")).to_lowercase();
    let filtered: String = joined
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_whitespace())
        .collect();
    let key = filtered.split_whitespace().collect::<Vec<_>>().join(" ");

    (!key.is_empty()).then_some(key)
}

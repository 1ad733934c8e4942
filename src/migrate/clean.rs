//! Field normalization for roster columns.
//!
//! Each function takes the raw cell text and returns the value to store.
//! Empty input always maps to `None`.

/// Kenyan mobile numbers written in local form start with this prefix.
const LOCAL_MOBILE_PREFIX: &str = "07";

/// International form of [`LOCAL_MOBILE_PREFIX`].
const INTERNATIONAL_MOBILE_PREFIX: &str = "+2547";

/// Normalize a rotary ID.
///
/// Spreadsheets often store IDs as numbers, which come back as text like
/// `"1.2284398E7"` or `"12284398.0"`; those become `"12284398"`. Text that
/// is not a finite number is kept unchanged.
pub fn clean_rotary_id(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    match value.trim().parse::<f64>() {
        Ok(number) if number.is_finite() => Some(integer_text(number)),
        _ => Some(value.to_string()),
    }
}

/// Normalize a phone number.
///
/// Spaces are removed. A number written in local mobile form (`07...`) is
/// rewritten to international form (`+2547...`); anything else is left as is.
pub fn clean_phone(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }
    let compact = value.replace(' ', "");
    if value.starts_with(LOCAL_MOBILE_PREFIX) {
        if let Some(rest) = compact.strip_prefix(LOCAL_MOBILE_PREFIX) {
            return Some(format!("{}{}", INTERNATIONAL_MOBILE_PREFIX, rest));
        }
    }
    Some(compact)
}

/// Parse a year such as `"2019"` or `"2019.0"`.
///
/// Unparseable, non-finite and zero values are `None`; a zero year means
/// the column was left unset.
pub fn parse_year(value: &str) -> Option<i64> {
    let number: f64 = value.trim().parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    let year = number.trunc();
    (year != 0.0).then_some(year as i64)
}

fn integer_text(number: f64) -> String {
    let whole = number.trunc();
    if whole == 0.0 {
        // avoids "-0"
        "0".to_string()
    } else {
        format!("{:.0}", whole)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotary_id_numeric_forms() {
        assert_eq!(clean_rotary_id("1.2284398E7").as_deref(), Some("12284398"));
        assert_eq!(clean_rotary_id("12284398").as_deref(), Some("12284398"));
        assert_eq!(clean_rotary_id("12284398.0").as_deref(), Some("12284398"));
        assert_eq!(clean_rotary_id("9876.9").as_deref(), Some("9876"));
        assert_eq!(clean_rotary_id("-0.4").as_deref(), Some("0"));
    }

    #[test]
    fn test_rotary_id_passthrough() {
        assert_eq!(clean_rotary_id(""), None);
        assert_eq!(clean_rotary_id("RC-001").as_deref(), Some("RC-001"));
        assert_eq!(clean_rotary_id("NaN").as_deref(), Some("NaN"));
        assert_eq!(clean_rotary_id("inf").as_deref(), Some("inf"));
        assert_eq!(clean_rotary_id(" ").as_deref(), Some(" "));
    }

    #[test]
    fn test_phone_local_mobile() {
        assert_eq!(clean_phone("0712 345 678").as_deref(), Some("+254712345678"));
        assert_eq!(clean_phone("0700000000").as_deref(), Some("+254700000000"));
    }

    #[test]
    fn test_phone_other_forms() {
        assert_eq!(clean_phone(""), None);
        assert_eq!(clean_phone("+254 712 345 678").as_deref(), Some("+254712345678"));
        assert_eq!(clean_phone("712345678").as_deref(), Some("712345678"));
        // only a leading 07 in the input counts as local form
        assert_eq!(clean_phone(" 0712").as_deref(), Some("0712"));
        assert_eq!(clean_phone("n/a").as_deref(), Some("n/a"));
    }

    #[test]
    fn test_parse_year() {
        assert_eq!(parse_year("2019"), Some(2019));
        assert_eq!(parse_year("2019.0"), Some(2019));
        assert_eq!(parse_year(" 2021 "), Some(2021));
        assert_eq!(parse_year(""), None);
        assert_eq!(parse_year("0"), None);
        assert_eq!(parse_year("last year"), None);
        assert_eq!(parse_year("inf"), None);
    }
}

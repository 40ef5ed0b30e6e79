//! Identifier normalization shared by every stage.

/// Keeps only ASCII decimal digits, in order. Leading zeros survive.
///
/// # Examples
///
/// ```
/// use cnh_transform::identifier::normalize_identifier;
///
/// assert_eq!(normalize_identifier("012.345.678-90"), "01234567890");
/// assert_eq!(normalize_identifier("n/a"), "");
/// ```
pub fn normalize_identifier(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_punctuation_and_spaces() {
        assert_eq!(normalize_identifier(" 123 456 "), "123456");
        assert_eq!(normalize_identifier("AB-12/3"), "123");
    }

    #[test]
    fn empty_and_digitless_inputs() {
        assert_eq!(normalize_identifier(""), "");
        assert_eq!(normalize_identifier("nan"), "");
    }

    #[test]
    fn non_ascii_digits_are_dropped() {
        assert_eq!(normalize_identifier("١٢3"), "3");
    }
}

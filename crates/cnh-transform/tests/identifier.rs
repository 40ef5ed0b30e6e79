//! Property tests for identifier normalization.

use cnh_transform::normalize_identifier;
use proptest::prelude::*;

proptest! {
    #[test]
    fn output_is_only_digits(input in ".*") {
        let normalized = normalize_identifier(&input);
        prop_assert!(normalized.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn output_is_the_ordered_digit_subsequence(input in ".*") {
        let expected: String = input.chars().filter(|c| c.is_ascii_digit()).collect();
        prop_assert_eq!(normalize_identifier(&input), expected);
    }

    #[test]
    fn formatted_cpf_keeps_leading_zeros(digits in "[0-9]{11}") {
        let formatted = format!(
            "{}.{}.{}-{}",
            &digits[0..3],
            &digits[3..6],
            &digits[6..9],
            &digits[9..11]
        );
        prop_assert_eq!(normalize_identifier(&formatted), digits);
    }

    #[test]
    fn normalization_is_idempotent(input in ".*") {
        let once = normalize_identifier(&input);
        prop_assert_eq!(normalize_identifier(&once), once.clone());
    }
}

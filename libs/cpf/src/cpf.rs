//! Canonical CPF type and the validation pipeline.
//!
//! A CPF is an 11-digit Brazilian natural-person tax identifier whose last
//! two digits are check digits. Input may arrive punctuated
//! (`529.982.247-25`) or bare (`52998224725`); both normalize to the same
//! canonical digit string before any checking happens.

use std::fmt;
use std::str::FromStr;

use crate::error::CpfError;

/// A validated CPF in canonical form: exactly 11 decimal digits.
///
/// Values of this type can only be produced by [`validate`] (or the
/// `FromStr`/serde impls, which go through it), so holding a `Cpf` proves
/// structural validity. `Display` renders the canonical 11-digit string,
/// which is the form to persist and compare; use [`Cpf::formatted`] for the
/// punctuated display form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cpf([u8; 11]);

impl Cpf {
    /// Parses and validates a CPF from a string.
    ///
    /// Accepts any punctuation; equivalent to [`validate`].
    pub fn parse(s: &str) -> Result<Self, CpfError> {
        validate(s)
    }

    /// Returns the 11 digit values (0–9 each), most significant first.
    #[must_use]
    pub const fn digits(&self) -> [u8; 11] {
        self.0
    }

    /// Returns the punctuated display form, `###.###.###-##`.
    #[must_use]
    pub fn formatted(&self) -> String {
        let s = self.to_string();
        format!("{}.{}.{}-{}", &s[..3], &s[3..6], &s[6..9], &s[9..])
    }
}

impl fmt::Display for Cpf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in self.0 {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for Cpf {
    type Err = CpfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate(s)
    }
}

impl serde::Serialize for Cpf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for Cpf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        validate(&s).map_err(serde::de::Error::custom)
    }
}

/// Strips every character that is not an ASCII digit.
///
/// Total: never fails, and an empty input yields an empty string. Length
/// checking is [`validate`]'s job, not this function's.
#[must_use]
pub fn normalize(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a CPF in any formatting and returns its canonical form.
///
/// Checks run in order and short-circuit on the first failure: length after
/// normalization, the all-digits-identical rejection, then the two check
/// digits. The second check digit is only computed once the first has been
/// verified.
pub fn validate(raw: &str) -> Result<Cpf, CpfError> {
    let canonical = normalize(raw);
    if canonical.len() != 11 {
        return Err(CpfError::WrongLength {
            found: canonical.len(),
        });
    }

    let mut digits = [0u8; 11];
    for (i, b) in canonical.bytes().enumerate() {
        digits[i] = b - b'0';
    }

    if digits.iter().all(|&d| d == digits[0]) {
        return Err(CpfError::RepeatedDigits);
    }

    for position in [9usize, 10] {
        let expected = check_digit(&digits[..position]);
        let found = digits[position];
        if found != expected {
            return Err(CpfError::CheckDigitMismatch {
                position,
                expected,
                found,
            });
        }
    }

    Ok(Cpf(digits))
}

/// Re-punctuates an identifier for display, `###.###.###-##`.
///
/// Display helper, not a gate: if the input does not carry exactly 11 digits
/// it is echoed back unchanged so display code never has to special-case
/// errors. No checksum is consulted; validate first.
#[must_use]
pub fn format_cpf(input: &str) -> String {
    let canonical = normalize(input);
    if canonical.len() != 11 {
        return input.to_string();
    }
    format!(
        "{}.{}.{}-{}",
        &canonical[..3],
        &canonical[3..6],
        &canonical[6..9],
        &canonical[9..]
    )
}

/// Computes one check digit over a digit prefix.
///
/// Weights run from `len + 1` down to 2 (10..2 for the first pass, 11..2 for
/// the second). `(sum * 10) % 11` folds the remainder-10 case to 0, matching
/// the standard's "11 - (sum % 11) >= 10 means 0" rule.
fn check_digit(digits: &[u8]) -> u8 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| u32::from(d) * (top - i as u32))
        .sum();
    let remainder = (sum * 10) % 11;
    if remainder == 10 {
        0
    } else {
        remainder as u8
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_validate_known_good() {
        let cpf = validate("529.982.247-25").unwrap();
        assert_eq!(cpf.to_string(), "52998224725");
    }

    #[test]
    fn test_validate_accepts_bare_digits() {
        let punctuated = validate("111.444.777-35").unwrap();
        let bare = validate("11144477735").unwrap();
        assert_eq!(punctuated, bare);
    }

    #[test]
    fn test_validate_flipped_last_digit() {
        let err = validate("529.982.247-26").unwrap_err();
        assert_eq!(
            err,
            CpfError::CheckDigitMismatch {
                position: 10,
                expected: 5,
                found: 6,
            }
        );
    }

    #[rstest]
    #[case("529.982.247-25")]
    #[case("111.444.777-35")]
    #[case("123.456.789-09")]
    fn test_validate_reference_table(#[case] input: &str) {
        assert!(validate(input).is_ok());
    }

    #[test]
    fn test_validate_second_digit_mismatch() {
        // 123456789 yields check digits 0 and 9, so -00 fails on the second.
        let err = validate("123.456.789-00").unwrap_err();
        assert_eq!(
            err,
            CpfError::CheckDigitMismatch {
                position: 10,
                expected: 9,
                found: 0,
            }
        );
    }

    #[test]
    fn test_validate_bad_first_check_digit() {
        // 529982247 computes first check digit 2; supply 3 instead.
        let err = validate("529.982.247-35").unwrap_err();
        assert!(matches!(
            err,
            CpfError::CheckDigitMismatch { position: 9, .. }
        ));
    }

    #[rstest]
    #[case("123", 3)]
    #[case("", 0)]
    #[case("529.982.247-250", 12)]
    #[case("abc-def", 0)]
    fn test_validate_wrong_length(#[case] input: &str, #[case] found: usize) {
        assert_eq!(validate(input).unwrap_err(), CpfError::WrongLength { found });
    }

    #[rstest]
    #[case("00000000000")]
    #[case("111.111.111-11")]
    #[case("99999999999")]
    fn test_validate_repeated_digits(#[case] input: &str) {
        assert_eq!(validate(input).unwrap_err(), CpfError::RepeatedDigits);
    }

    #[test]
    fn test_validate_remainder_ten_maps_to_zero() {
        // First pass over 000000006 sums to 12, so (12 * 10) % 11 == 10,
        // which the standard folds to check digit 0.
        let cpf = validate("000.000.006-04").unwrap();
        assert_eq!(cpf.to_string(), "00000000604");
    }

    #[test]
    fn test_digits_of_known_cpf() {
        let cpf = validate("529.982.247-25").unwrap();
        assert_eq!(cpf.digits(), [5, 2, 9, 9, 8, 2, 2, 4, 7, 2, 5]);
    }

    #[test]
    fn test_error_kind_helpers() {
        assert!(validate("123").unwrap_err().is_wrong_length());
        assert!(validate("529.982.247-26")
            .unwrap_err()
            .is_check_digit_mismatch());

        let repeated = validate("11111111111").unwrap_err();
        assert!(!repeated.is_wrong_length());
        assert!(!repeated.is_check_digit_mismatch());
    }

    #[test]
    fn test_normalize_strips_everything_non_digit() {
        assert_eq!(normalize("529.982.247-25"), "52998224725");
        assert_eq!(normalize(" 12a3 "), "123");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_format_cpf() {
        assert_eq!(format_cpf("52998224725"), "529.982.247-25");
        // Already punctuated input is re-derived, not double-punctuated.
        assert_eq!(format_cpf("529.982.247-25"), "529.982.247-25");
    }

    #[test]
    fn test_format_cpf_echoes_malformed_input() {
        assert_eq!(format_cpf("123"), "123");
        assert_eq!(format_cpf(""), "");
        assert_eq!(format_cpf("not-a-cpf"), "not-a-cpf");
    }

    #[test]
    fn test_display_is_canonical_form() {
        let cpf = validate("529.982.247-25").unwrap();
        assert_eq!(cpf.to_string(), "52998224725");
        assert_eq!(cpf.formatted(), "529.982.247-25");
    }

    #[test]
    fn test_json_roundtrip_is_canonical() {
        let cpf: Cpf = "529.982.247-25".parse().unwrap();
        let json = serde_json::to_string(&cpf).unwrap();
        assert_eq!(json, "\"52998224725\"");
        let back: Cpf = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cpf);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        let result: Result<Cpf, _> = serde_json::from_str("\"11111111111\"");
        assert!(result.is_err());
    }

    /// Builds a structurally valid CPF from a 9-digit base by computing both
    /// check digits the same way issuance does.
    fn with_check_digits(base: [u8; 9]) -> [u8; 11] {
        let mut digits = [0u8; 11];
        digits[..9].copy_from_slice(&base);
        digits[9] = check_digit(&digits[..9]);
        digits[10] = check_digit(&digits[..10]);
        digits
    }

    proptest! {
        #[test]
        fn prop_normalize_is_digits_only_and_no_longer(s in ".*") {
            let out = normalize(&s);
            prop_assert!(out.bytes().all(|b| b.is_ascii_digit()));
            prop_assert!(out.len() <= s.len());
        }

        #[test]
        fn prop_valid_cpf_roundtrips_through_display_form(base in proptest::array::uniform9(0u8..=9)) {
            let digits = with_check_digits(base);
            prop_assume!(!digits.iter().all(|&d| d == digits[0]));

            let canonical: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
            let cpf = validate(&canonical).unwrap();

            // Re-deriving from the punctuated display form must reproduce
            // the identical canonical identifier.
            let reparsed = validate(&cpf.formatted()).unwrap();
            prop_assert_eq!(reparsed, cpf);
            prop_assert_eq!(reparsed.to_string(), canonical);
        }

        #[test]
        fn prop_corrupting_second_check_digit_fails(base in proptest::array::uniform9(0u8..=9), bump in 1u8..=9) {
            let mut digits = with_check_digits(base);
            prop_assume!(!digits.iter().all(|&d| d == digits[0]));
            digits[10] = (digits[10] + bump) % 10;
            prop_assume!(!digits.iter().all(|&d| d == digits[0]));

            let s: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
            let is_second_check_digit_mismatch = matches!(
                validate(&s),
                Err(CpfError::CheckDigitMismatch { position: 10, .. })
            );
            prop_assert!(is_second_check_digit_mismatch);
        }
    }
}

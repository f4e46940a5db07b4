//! Canonicalisation of ICD-10 diagnosis and procedure codes
//!
//! The Definitions Manual indexes codes without decimal points and in upper
//! case. Every code is normalised at encounter construction and again at every
//! lookup site, so a lookup can never fail on case or punctuation.

/// Canonicalise a diagnosis or procedure code: uppercase, strip `.`
pub fn normalize_code(code: &str) -> String {
    code.replace('.', "").to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_dots_and_uppercases() {
        assert_eq!(normalize_code("i25.10"), "I2510");
        assert_eq!(normalize_code("J18.9"), "J189");
        assert_eq!(normalize_code("02YA0Z0"), "02YA0Z0");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_code(""), "");
    }

    proptest! {
        #[test]
        fn normalisation_is_idempotent(code in "[A-Za-z0-9.]{0,10}") {
            let once = normalize_code(&code);
            prop_assert_eq!(normalize_code(&once), once);
        }
    }
}

//! Pre-MDC procedure overrides
//!
//! Certain procedures (organ transplants, ECMO) assign their DRG before any
//! MDC logic runs. The manual fixes these pairs; they are keyed by exact
//! canonical ICD-10-PCS code and split only on MCC presence.

/// `(procedure, DRG with MCC, DRG without MCC)`
const PRE_MDC_PROCEDURES: [(&str, &str, &str); 16] = [
    // Heart transplant
    ("02YA0Z0", "001", "002"),
    ("02YA0Z1", "001", "002"),
    ("02YA0Z2", "001", "002"),
    // Liver transplant
    ("0FY00Z0", "005", "006"),
    ("0FY00Z1", "005", "006"),
    ("0FY00Z2", "005", "006"),
    // Lung transplant
    ("0BYK0Z0", "007", "007"),
    ("0BYK0Z1", "007", "007"),
    ("0BYK0Z2", "007", "007"),
    ("0BYL0Z0", "007", "007"),
    ("0BYL0Z1", "007", "007"),
    ("0BYL0Z2", "007", "007"),
    ("0BYM0Z0", "007", "007"),
    ("0BYM0Z1", "007", "007"),
    ("0BYM0Z2", "007", "007"),
    // Central ECMO
    ("5A1522F", "003", "003"),
];

/// The `(with-MCC, without-MCC)` DRG pair for a Pre-MDC procedure code
pub fn pre_mdc_drgs(code: &str) -> Option<(&'static str, &'static str)> {
    PRE_MDC_PROCEDURES
        .iter()
        .find(|(proc_code, _, _)| *proc_code == code)
        .map(|(_, with_mcc, without_mcc)| (*with_mcc, *without_mcc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heart_transplant_splits_on_mcc() {
        assert_eq!(pre_mdc_drgs("02YA0Z0"), Some(("001", "002")));
    }

    #[test]
    fn ecmo_does_not_split() {
        assert_eq!(pre_mdc_drgs("5A1522F"), Some(("003", "003")));
    }

    #[test]
    fn non_pre_mdc_procedures_miss() {
        assert_eq!(pre_mdc_drgs("0BBC0ZZ"), None);
    }
}

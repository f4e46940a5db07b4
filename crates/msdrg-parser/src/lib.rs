//! Parsers for the CMS MS-DRG Definitions Manual
//!
//! The Definitions Manual is a human-oriented plain-text publication. Each
//! parser here turns one of its files into typed lookup tables:
//! - Appendix A: the DRG catalogue (fixed-column)
//! - Appendix B: diagnosis → MDC/DRG index (fixed-column with continuation lines)
//! - Appendix C: CC/MCC definitions in three sequential parts
//! - MDC logic files: narrative sections carrying OR / non-OR procedure lists
//!
//! Parser policy: decorative and malformed lines are skipped, never fatal.
//! The publication interleaves headers, rules and page furniture with data,
//! so robustness wins over strict validation. Missing mandatory files are the
//! only fatal condition, detected by the `load_*` wrappers.

pub mod appendix_a;
pub mod appendix_b;
pub mod appendix_c;
pub mod mdc_logic;
pub mod range;

pub use appendix_a::{load_drg_definitions, parse_appendix_a};
pub use appendix_b::{load_diagnosis_index, parse_appendix_b};
pub use appendix_c::{load_cc_mcc_definitions, parse_appendix_c, CcMccTables};
pub use mdc_logic::{load_mdc_logic, parse_mdc_file, MdcLogicTables, MDC_LOGIC_FILES};
pub use range::expand_drg_range;

/// Slice a fixed-column field out of a line, tolerating short lines
///
/// Returns `""` when the line ends before `start` or a boundary falls inside
/// a multi-byte character (the manual is ASCII; anything else is decorative).
pub(crate) fn columns(line: &str, start: usize, end: usize) -> &str {
    if start >= line.len() {
        return "";
    }
    let end = end.min(line.len());
    line.get(start..end).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::columns;

    #[test]
    fn columns_tolerates_short_lines() {
        assert_eq!(columns("A000", 0, 8), "A000");
        assert_eq!(columns("A000", 8, 12), "");
        assert_eq!(columns("A000    06", 8, 12), "06");
    }
}

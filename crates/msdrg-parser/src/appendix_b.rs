//! Appendix B parser - Diagnosis Code/MDC/MS-DRG Index
//!
//! Fixed-column format with continuation lines:
//!
//! ```text
//! I10 Dx  MDC DRG(s)      ICD-10-CM Description
//! A000    06  371-373     Cholera due to Vibrio cholerae 01, biovar cholerae
//! A021    18  870-872     Salmonella sepsis
//!         25  974-976
//! ```
//!
//! A blank code column continues the previous diagnosis with another
//! `(MDC, DRG-range)` mapping. Mapping order is semantically meaningful:
//! the first mapping carries the primary MDC.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use msdrg_core::{DiagnosisInfo, Error, MdcMapping, Result};

use crate::columns;
use crate::range::expand_drg_range;

/// Parse Appendix B content into `{diagnosis code → DiagnosisInfo}`
pub fn parse_appendix_b(content: &str) -> Result<HashMap<String, DiagnosisInfo>> {
    let mut diagnoses = HashMap::new();
    let mut current: Option<DiagnosisInfo> = None;
    let mut in_data = false;

    for line in content.lines() {
        if line.contains("I10 Dx") && line.contains("MDC") {
            in_data = true;
            continue;
        }
        if !in_data || line.trim().is_empty() {
            continue;
        }

        let code = columns(line, 0, 8).trim();
        let mdc = columns(line, 8, 12).trim();
        let drg_range = columns(line, 12, 24).trim();

        if !code.is_empty() {
            // New diagnosis closes the previous one
            if let Some(dx) = current.take() {
                if !dx.mappings.is_empty() {
                    diagnoses.insert(dx.code.clone(), dx);
                }
            }

            let mut dx = DiagnosisInfo {
                code: code.to_string(),
                description: columns(line, 24, usize::MAX).trim().to_string(),
                mappings: Vec::new(),
            };
            if !mdc.is_empty() && !drg_range.is_empty() {
                dx.mappings.push(MdcMapping {
                    mdc: mdc.to_string(),
                    drgs: expand_drg_range(drg_range),
                });
            }
            current = Some(dx);
        } else if let Some(dx) = current.as_mut() {
            if !mdc.is_empty() && !drg_range.is_empty() {
                dx.mappings.push(MdcMapping {
                    mdc: mdc.to_string(),
                    drgs: expand_drg_range(drg_range),
                });
            }
        }
    }

    if let Some(dx) = current.take() {
        if !dx.mappings.is_empty() {
            diagnoses.insert(dx.code.clone(), dx);
        }
    }

    Ok(diagnoses)
}

/// Load `appendix_B.txt` from the data directory
///
/// A missing file is a fatal load error.
pub fn load_diagnosis_index(data_dir: &Path) -> Result<HashMap<String, DiagnosisInfo>> {
    let path = data_dir.join("appendix_B.txt");
    if !path.exists() {
        return Err(Error::missing_reference_file(path.display().to_string()));
    }
    let content = fs::read_to_string(&path)?;
    parse_appendix_b(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Appendix B  Diagnosis Code/MDC/MS-DRG Index
I10 Dx  MDC DRG(s)      ICD-10-CM Description
A000    06  371-373     Cholera due to Vibrio cholerae 01, biovar cholerae
A021    18  870-872     Salmonella sepsis
        25  974-976
J189    04  193-195     Pneumonia, unspecified organism
";

    #[test]
    fn parses_single_mapping_diagnosis() {
        let diagnoses = parse_appendix_b(SAMPLE).unwrap();
        let cholera = &diagnoses["A000"];

        assert_eq!(cholera.mappings.len(), 1);
        assert_eq!(cholera.mappings[0].mdc, "06");
        assert_eq!(cholera.mappings[0].drgs, vec!["371", "372", "373"]);
        assert!(cholera.description.starts_with("Cholera"));
    }

    #[test]
    fn continuation_line_extends_previous_diagnosis() {
        let diagnoses = parse_appendix_b(SAMPLE).unwrap();
        let sepsis = &diagnoses["A021"];

        assert_eq!(sepsis.mappings.len(), 2);
        assert_eq!(sepsis.primary_mdc(), Some("18"));
        assert_eq!(sepsis.mappings[1].mdc, "25");
        assert_eq!(sepsis.mappings[1].drgs, vec!["974", "975", "976"]);
        // description comes from the introducing line only
        assert_eq!(sepsis.description, "Salmonella sepsis");
    }

    #[test]
    fn last_diagnosis_is_emitted() {
        let diagnoses = parse_appendix_b(SAMPLE).unwrap();
        assert!(diagnoses.contains_key("J189"));
        assert_eq!(diagnoses.len(), 3);
    }

    #[test]
    fn nothing_parsed_before_header() {
        let content = "A000    06  371-373     Cholera\n";
        assert!(parse_appendix_b(content).unwrap().is_empty());
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_diagnosis_index(Path::new("/nonexistent")).unwrap_err();
        assert!(matches!(err, Error::MissingReferenceFile(_)));
    }
}

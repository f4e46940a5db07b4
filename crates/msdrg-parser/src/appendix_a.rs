//! Appendix A parser - the MS-DRG catalogue
//!
//! Fixed-column format, one DRG per line after the column-heading row:
//!
//! ```text
//! DRG MDC MS Description
//! 001     P  Heart Transplant or Implant of Heart Assist System with MCC
//! 020 01  P  Intracranial Vascular Procedures with PDX Hemorrhage with MCC
//! ```
//!
//! Pre-MDC DRGs leave the MDC column blank.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use msdrg_core::{DrgDefinition, DrgType, Error, Result};
use regex::Regex;

use crate::columns;

/// Parse Appendix A content into `{DRG → definition}`
pub fn parse_appendix_a(content: &str) -> Result<HashMap<String, DrgDefinition>> {
    // Some rows shift the type character out of its column; a narrow window
    // scan recovers it.
    let type_fallback = Regex::new(r"\s([MP])\s+")
        .map_err(|e| Error::parse(format!("type fallback pattern: {e}")))?;

    let mut definitions = HashMap::new();
    let mut in_data = false;

    for line in content.lines() {
        if line.trim().is_empty() {
            continue;
        }
        if line.starts_with(':') || line.starts_with('|') || line.starts_with("Appendix") {
            continue;
        }
        if line.contains("DRG MDC MS Description") {
            in_data = true;
            continue;
        }
        if !in_data || line.len() < 10 {
            continue;
        }

        let drg = columns(line, 0, 3).trim();
        if drg.is_empty() || !drg.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        let mdc = columns(line, 4, 6).trim();
        let mdc = if mdc.is_empty() {
            None
        } else {
            Some(mdc.to_string())
        };

        let type_char = columns(line, 7, 8).trim().chars().next();
        let drg_type = match type_char.and_then(DrgType::from_type_char) {
            Some(t) => t,
            None => match type_fallback
                .captures(columns(line, 4, 12))
                .and_then(|caps| caps[1].chars().next())
                .and_then(DrgType::from_type_char)
            {
                Some(t) => t,
                None => continue,
            },
        };

        let description = columns(line, 10, usize::MAX).trim().to_string();

        definitions.insert(
            drg.to_string(),
            DrgDefinition {
                drg: drg.to_string(),
                mdc,
                drg_type,
                description,
            },
        );
    }

    Ok(definitions)
}

/// Load `appendix_A.txt` from the data directory
///
/// A missing file is a fatal load error.
pub fn load_drg_definitions(data_dir: &Path) -> Result<HashMap<String, DrgDefinition>> {
    let path = data_dir.join("appendix_A.txt");
    if !path.exists() {
        return Err(Error::missing_reference_file(path.display().to_string()));
    }
    let content = fs::read_to_string(&path)?;
    parse_appendix_a(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Appendix A  List of MS-DRGs Version 43.0
:               This appendix lists each DRG with its MDC and type.
DRG MDC MS Description
001     P  Heart Transplant or Implant of Heart Assist System with MCC
020 01  P  Intracranial Vascular Procedures with PDX Hemorrhage with MCC
193 04  M  Simple Pneumonia and Pleurisy with MCC

|  page 2
XYZ bad line that is not a DRG
303 05  M  Atherosclerosis without MCC
";

    #[test]
    fn parses_pre_mdc_and_regular_rows() {
        let definitions = parse_appendix_a(SAMPLE).unwrap();
        assert_eq!(definitions.len(), 4);

        let heart = &definitions["001"];
        assert_eq!(heart.mdc, None);
        assert_eq!(heart.drg_type, DrgType::Surgical);
        assert!(heart.description.starts_with("Heart Transplant"));

        let intracranial = &definitions["020"];
        assert_eq!(intracranial.mdc.as_deref(), Some("01"));
        assert_eq!(intracranial.drg_type, DrgType::Surgical);

        let pneumonia = &definitions["193"];
        assert_eq!(pneumonia.mdc.as_deref(), Some("04"));
        assert_eq!(pneumonia.drg_type, DrgType::Medical);
    }

    #[test]
    fn skips_decorative_and_malformed_lines() {
        let definitions = parse_appendix_a(SAMPLE).unwrap();
        assert!(!definitions.contains_key("XYZ"));
        assert!(definitions.contains_key("303"));
    }

    #[test]
    fn nothing_parsed_before_column_heading() {
        let content = "001     P  Heart Transplant with MCC\n";
        let definitions = parse_appendix_a(content).unwrap();
        assert!(definitions.is_empty());
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_drg_definitions(Path::new("/nonexistent")).unwrap_err();
        assert!(matches!(err, Error::MissingReferenceFile(_)));
    }
}

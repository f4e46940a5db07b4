//! Appendix C parser - CC/MCC definitions and exclusions
//!
//! The file carries three sequential parts:
//! - Part 1: the CC/MCC list with optional PDX exclusion-group references
//! - Part 2: codes that act as CC/MCC only when the patient is discharged alive
//! - Part 3: diagnosis codes excluded for specific DRGs
//!
//! ```text
//! Part 1  List of CCs and MCCs
//!  I10 Dx  Lev PDX Exclusions   ICD-10-CM Description
//!  A000    CC  0002:3 codes     Cholera due to Vibrio cholerae 01, biovar cholerae
//! ```

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use msdrg_core::{CcLevel, CcMccInfo, Error, Result};
use regex::Regex;

use crate::columns;
use crate::range::expand_drg_range;

/// The three tables extracted from Appendix C
#[derive(Debug, Clone, Default)]
pub struct CcMccTables {
    /// CC/MCC classification per diagnosis code (Part 1)
    pub cc_mcc: HashMap<String, CcMccInfo>,
    /// Codes counting as CC/MCC only on live discharge (Part 2)
    pub discharge_alive: HashSet<String>,
    /// Excluded diagnosis codes per DRG (Part 3)
    pub drg_exclusions: HashMap<String, HashSet<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Part1,
    Part2,
    Part3,
}

/// Parse the full Appendix C content
pub fn parse_appendix_c(content: &str) -> Result<CcMccTables> {
    let exclusion_ref = Regex::new(r"^(\d+:\d+\s+codes?)\s+(.*)$")
        .map_err(|e| Error::parse(format!("exclusion reference pattern: {e}")))?;
    let drg_group_header = Regex::new(r"DRGs?\s+(\d+(?:-\d+)?)")
        .map_err(|e| Error::parse(format!("DRG group header pattern: {e}")))?;

    let mut tables = CcMccTables::default();
    let mut section = Section::Header;
    let mut in_data = false;
    let mut current_group: Vec<String> = Vec::new();

    for line in content.lines() {
        let stripped = line.trim();

        if line.contains("Part 1") {
            section = Section::Part1;
            in_data = false;
            continue;
        } else if line.contains("Part 2") {
            section = Section::Part2;
            in_data = false;
            continue;
        } else if line.contains("Part 3") {
            section = Section::Part3;
            in_data = false;
            current_group.clear();
            continue;
        }

        if stripped.is_empty() || stripped.starts_with(':') || stripped.starts_with('|') {
            continue;
        }
        if line.contains("I10 Dx") && line.contains("Lev") {
            in_data = true;
            continue;
        }

        match section {
            Section::Part1 if in_data => parse_part1_line(line, &exclusion_ref, &mut tables),
            Section::Part2 => parse_code_listing_line(stripped, |code| {
                tables.discharge_alive.insert(code.to_string());
            }),
            Section::Part3 => {
                if let Some(caps) = drg_group_header.captures(line) {
                    current_group = expand_drg_range(&caps[1]);
                    for drg in &current_group {
                        tables.drg_exclusions.entry(drg.clone()).or_default();
                    }
                    continue;
                }
                if !current_group.is_empty() {
                    parse_code_listing_line(stripped, |code| {
                        for drg in &current_group {
                            tables
                                .drg_exclusions
                                .entry(drg.clone())
                                .or_default()
                                .insert(code.to_string());
                        }
                    });
                }
            }
            _ => {}
        }
    }

    Ok(tables)
}

/// Part 1 line: ` A000    CC  0002:3 codes     Cholera due to ...`
fn parse_part1_line(line: &str, exclusion_ref: &Regex, tables: &mut CcMccTables) {
    if line.len() < 12 {
        return;
    }

    let code = columns(line, 1, 8).trim();
    if code.is_empty() || !code.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
        return;
    }

    let Some(level) = CcLevel::from_level_token(columns(line, 8, 12).trim()) else {
        return;
    };

    let rest = columns(line, 12, usize::MAX).trim();
    let (pdx_exclusion_group, description) = match exclusion_ref.captures(rest) {
        Some(caps) => (Some(caps[1].to_string()), caps[2].to_string()),
        None => (None, rest.to_string()),
    };

    tables.cc_mcc.insert(
        code.to_string(),
        CcMccInfo {
            code: code.to_string(),
            level,
            pdx_exclusion_group,
            description,
        },
    );
}

/// Parts 2 and 3 list one code per line as the first whitespace-delimited token
fn parse_code_listing_line(stripped: &str, mut on_code: impl FnMut(&str)) {
    if let Some(token) = stripped.split_whitespace().next() {
        if token.len() <= 8 && token.chars().next().is_some_and(|c| c.is_ascii_alphanumeric()) {
            on_code(token);
        }
    }
}

/// Load `appendix_C.txt` from the data directory
///
/// A missing file is a fatal load error.
pub fn load_cc_mcc_definitions(data_dir: &Path) -> Result<CcMccTables> {
    let path = data_dir.join("appendix_C.txt");
    if !path.exists() {
        return Err(Error::missing_reference_file(path.display().to_string()));
    }
    let content = fs::read_to_string(&path)?;
    parse_appendix_c(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Appendix C  Complications or Comorbidities Exclusion list
Part 1  List of CCs and MCCs
 I10 Dx  Lev PDX Exclusions   ICD-10-CM Description
 A000    CC  0002:3 codes     Cholera due to Vibrio cholerae 01, biovar cholerae
 E1100   MCC 0015:4 codes     Type 2 diabetes mellitus with hyperosmolarity
 I462    MCC 0042:2 codes     Cardiac arrest due to underlying cardiac condition
 Z515    N/A                  Encounter for palliative care

Part 2  Diagnoses that act as a CC or MCC only when the patient is discharged alive
  I462    Cardiac arrest due to underlying cardiac condition
  I469    Cardiac arrest, cause unspecified

Part 3  PDX exclusions for specific MS-DRGs
MDC 04 DRGs 193-195  Simple Pneumonia and Pleurisy
  J189    Pneumonia, unspecified organism
  J188    Other pneumonia, unspecified organism
MDC 05 DRGs 303  Atherosclerosis
  I2510   Athrsc heart disease of native coronary artery w/o ang pctrs
";

    #[test]
    fn part1_levels_and_exclusion_refs() {
        let tables = parse_appendix_c(SAMPLE).unwrap();

        let cholera = &tables.cc_mcc["A000"];
        assert_eq!(cholera.level, CcLevel::Cc);
        assert_eq!(cholera.pdx_exclusion_group.as_deref(), Some("0002:3 codes"));
        assert!(cholera.description.starts_with("Cholera"));

        let diabetes = &tables.cc_mcc["E1100"];
        assert_eq!(diabetes.level, CcLevel::Mcc);
    }

    #[test]
    fn part1_skips_non_cc_levels() {
        let tables = parse_appendix_c(SAMPLE).unwrap();
        assert!(!tables.cc_mcc.contains_key("Z515"));
    }

    #[test]
    fn part2_collects_discharge_alive_codes() {
        let tables = parse_appendix_c(SAMPLE).unwrap();
        assert!(tables.discharge_alive.contains("I462"));
        assert!(tables.discharge_alive.contains("I469"));
        assert_eq!(tables.discharge_alive.len(), 2);
    }

    #[test]
    fn part3_spreads_codes_over_drg_group() {
        let tables = parse_appendix_c(SAMPLE).unwrap();

        for drg in ["193", "194", "195"] {
            let excluded = &tables.drg_exclusions[drg];
            assert!(excluded.contains("J189"), "J189 missing for DRG {drg}");
            assert!(excluded.contains("J188"), "J188 missing for DRG {drg}");
        }
        assert!(tables.drg_exclusions["303"].contains("I2510"));
        assert!(!tables.drg_exclusions["303"].contains("J189"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = load_cc_mcc_definitions(Path::new("/nonexistent")).unwrap_err();
        assert!(matches!(err, Error::MissingReferenceFile(_)));
    }
}

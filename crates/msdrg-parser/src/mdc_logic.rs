//! MDC logic file parser
//!
//! The four `mdcs_*.txt` files narrate the grouping logic per MDC: DRG
//! headers, OPERATING ROOM / NON-OPERATING ROOM procedure lists, diagnosis
//! lists, and `and` continuation lines for procedure combinations.
//!
//! ```text
//! DRG 166  Other Respiratory System O.R. Procedures with MCC
//!
//! OPERATING ROOM PROCEDURES
//!   0BBC0ZZ  Excision of right upper lung lobe, open approach
//!   0BBC4ZZ* Excision of right upper lung lobe, perc endo approach
//!    and 0BBD4ZZ  Excision of right middle lung lobe, perc endo approach
//! ```
//!
//! An asterisk suffix keeps a code out of the OR set even inside an OR
//! section. An `and` line marks the preceding code as requiring a
//! combination partner.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use msdrg_core::{DrgSeverityRoles, Error, ProcedureCode, Result};
use regex::Regex;

/// The MDC logic files of the Definitions Manual, in load order
///
/// A missing file is tolerated; it simply contributes nothing.
pub const MDC_LOGIC_FILES: [&str; 4] = [
    "mdcs_00_07.txt",
    "mdcs_08_11.txt",
    "mdcs_12_21.txt",
    "mdcs_22_25.txt",
];

/// Tables extracted from the MDC logic files
#[derive(Debug, Clone, Default)]
pub struct MdcLogicTables {
    /// Procedure codes with their OR flag and DRG associations
    pub procedures: HashMap<String, ProcedureCode>,
    /// Severity roles per DRG, recovered from DRG header phrases
    pub severity_roles: HashMap<String, DrgSeverityRoles>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    OperatingRoom,
    NonOperatingRoom,
    Diagnosis,
}

/// Parse one MDC logic file's content
pub fn parse_mdc_file(content: &str) -> Result<MdcLogicTables> {
    let drg_header = Regex::new(r"^DRG\s+(\d{3})\s+(.+)$")
        .map_err(|e| Error::parse(format!("DRG header pattern: {e}")))?;
    let procedure_line = Regex::new(r"^\s{2}([A-Z0-9]{7})\*?\s+(.*)$")
        .map_err(|e| Error::parse(format!("procedure line pattern: {e}")))?;
    let combination_line = Regex::new(r"^\s+and\s+([A-Z0-9]{7})\*?\s+(.*)$")
        .map_err(|e| Error::parse(format!("combination line pattern: {e}")))?;

    let mut tables = MdcLogicTables::default();
    let mut current_drg: Option<String> = None;
    let mut section = Section::None;
    let mut pending_combination: Option<String> = None;

    for line in content.lines() {
        let stripped = line.trim();

        if let Some(caps) = drg_header.captures(stripped) {
            let drg = caps[1].to_string();
            let description = caps[2].to_string();
            record_severity_role(&mut tables.severity_roles, &drg, &description);
            current_drg = Some(drg);
            continue;
        }

        if stripped.contains("OPERATING ROOM PROCEDURES") && !stripped.contains("NON-") {
            section = Section::OperatingRoom;
            continue;
        } else if stripped.contains("NON-OPERATING ROOM PROCEDURES") {
            section = Section::NonOperatingRoom;
            continue;
        } else if stripped.contains("PRINCIPAL") || stripped.contains("SECONDARY") {
            section = Section::Diagnosis;
            continue;
        }

        if section != Section::OperatingRoom && section != Section::NonOperatingRoom {
            continue;
        }
        let in_or_section = section == Section::OperatingRoom;

        if let Some(caps) = combination_line.captures(line) {
            let code = caps[1].to_string();
            let description = caps[2].trim().to_string();

            if let Some(anchor) = &pending_combination {
                if let Some(info) = tables.procedures.get_mut(anchor) {
                    info.requires_combination = true;
                    info.combination_codes.push(code.clone());
                }
                tables.procedures.insert(
                    code.clone(),
                    ProcedureCode {
                        code,
                        description,
                        is_or_procedure: in_or_section,
                        drgs: current_drg.iter().cloned().collect(),
                        requires_combination: false,
                        combination_codes: Vec::new(),
                    },
                );
            }
            continue;
        }

        if let Some(caps) = procedure_line.captures(line) {
            let code = caps[1].to_string();
            let description = caps[2].trim().to_string();
            let has_asterisk = line.chars().take(20).any(|c| c == '*');
            let effective_is_or = in_or_section && !has_asterisk;

            let info = tables
                .procedures
                .entry(code.clone())
                .or_insert_with(|| ProcedureCode {
                    code: code.clone(),
                    description,
                    is_or_procedure: effective_is_or,
                    drgs: Vec::new(),
                    requires_combination: false,
                    combination_codes: Vec::new(),
                });
            if let Some(drg) = &current_drg {
                info.drgs.push(drg.clone());
            }

            pending_combination = Some(code);
        }
    }

    Ok(tables)
}

/// Interpret a DRG header phrase as the DRG's role in its severity family
fn record_severity_role(
    severity_roles: &mut HashMap<String, DrgSeverityRoles>,
    drg: &str,
    description: &str,
) {
    let roles = severity_roles
        .entry(drg.to_string())
        .or_insert_with(|| DrgSeverityRoles {
            base_description: description.to_string(),
            ..DrgSeverityRoles::default()
        });

    if description.contains("with MCC") {
        roles.mcc_drg = Some(drg.to_string());
    } else if description.contains("with CC") && !description.contains("without CC") {
        roles.cc_drg = Some(drg.to_string());
    } else if description.contains("without CC/MCC") || description.contains("without MCC") {
        roles.no_cc_drg = Some(drg.to_string());
    }
}

/// Load all MDC logic files from the data directory
///
/// Codes re-registered by a later file replace the earlier entry wholesale.
pub fn load_mdc_logic(data_dir: &Path) -> Result<MdcLogicTables> {
    let mut all = MdcLogicTables::default();

    for name in MDC_LOGIC_FILES {
        let path = data_dir.join(name);
        if !path.exists() {
            continue;
        }
        let content = fs::read_to_string(&path)?;
        let tables = parse_mdc_file(&content)?;
        all.procedures.extend(tables.procedures);
        all.severity_roles.extend(tables.severity_roles);
    }

    Ok(all)
}

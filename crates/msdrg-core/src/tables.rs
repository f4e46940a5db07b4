//! Reference-table records parsed from the CMS Definitions Manual

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{CcLevel, DrgType};

/// Definition of a single MS-DRG, from Appendix A
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrgDefinition {
    /// 3-digit DRG identifier
    pub drg: String,
    /// 2-digit MDC; `None` for Pre-MDC DRGs (transplants, ECMO)
    pub mdc: Option<String>,
    pub drg_type: DrgType,
    pub description: String,
}

impl DrgDefinition {
    pub fn is_surgical(&self) -> bool {
        self.drg_type == DrgType::Surgical
    }
}

/// One MDC assignment of a diagnosis, with its expanded DRG list
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MdcMapping {
    /// 2-digit MDC
    pub mdc: String,
    /// DRGs the diagnosis can land in under this MDC, in manual order
    pub drgs: Vec<String>,
}

/// A diagnosis code entry from Appendix B
///
/// `mappings` preserves manual order; the first mapping carries the primary
/// MDC for the code. A diagnosis may map into several MDCs (continuation
/// lines in the manual).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DiagnosisInfo {
    pub code: String,
    pub description: String,
    pub mappings: Vec<MdcMapping>,
}

impl DiagnosisInfo {
    /// The primary MDC: the first mapping in manual order
    pub fn primary_mdc(&self) -> Option<&str> {
        self.mappings.first().map(|m| m.mdc.as_str())
    }
}

/// CC/MCC classification of a diagnosis code, from Appendix C Part 1
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CcMccInfo {
    pub code: String,
    pub level: CcLevel,
    /// Reference into the PDX exclusion tables, e.g. `0002:3 codes`
    pub pdx_exclusion_group: Option<String>,
    pub description: String,
}

/// A procedure code extracted from the MDC logic files
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProcedureCode {
    /// 7-character ICD-10-PCS code
    pub code: String,
    pub description: String,
    /// True when parsed from an OPERATING ROOM PROCEDURES section without an
    /// asterisk suffix
    pub is_or_procedure: bool,
    /// DRGs this procedure is associated with, in manual order
    pub drgs: Vec<String>,
    /// True when the code only counts in combination with another procedure
    pub requires_combination: bool,
    /// Partner codes from `and` continuation lines
    pub combination_codes: Vec<String>,
}

/// Severity roles recovered from MDC-logic DRG headers
///
/// Each DRG header phrase (`with MCC`, `with CC`, `without CC/MCC`) marks the
/// DRG's own role in its severity family. Retained by the reference store as a
/// structural alternative to the description-substring variant selection; the
/// engine does not consult it yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrgSeverityRoles {
    pub base_description: String,
    pub mcc_drg: Option<String>,
    pub cc_drg: Option<String>,
    pub no_cc_drg: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_mdc_is_first_mapping() {
        let dx = DiagnosisInfo {
            code: "A021".to_string(),
            description: "Salmonella sepsis".to_string(),
            mappings: vec![
                MdcMapping {
                    mdc: "18".to_string(),
                    drgs: vec!["870".to_string(), "871".to_string(), "872".to_string()],
                },
                MdcMapping {
                    mdc: "25".to_string(),
                    drgs: vec!["974".to_string()],
                },
            ],
        };
        assert_eq!(dx.primary_mdc(), Some("18"));
    }

    #[test]
    fn surgical_flag_follows_type() {
        let def = DrgDefinition {
            drg: "001".to_string(),
            mdc: None,
            drg_type: DrgType::Surgical,
            description: "Heart Transplant with MCC".to_string(),
        };
        assert!(def.is_surgical());
    }
}

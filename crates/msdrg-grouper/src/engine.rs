//! The DRG assignment pipeline
//!
//! A fixed, ordered sequence of rules. Each step either produces a final
//! result and short-circuits, or refines state and falls through:
//!
//! 1. Principal-diagnosis lookup (unknown PDX → sentinel)
//! 2. MDC derivation from the PDX's primary mapping
//! 3. Severity extraction over secondary diagnoses (first MCC wins)
//! 4. Discharge-alive filter
//! 5. Pre-MDC override (transplants, ECMO)
//! 6. OR-procedure branch selection
//! 7. Surgical or medical severity-variant selection
//!
//! Grouping never returns an error: every failure mode materialises as the
//! `"999"` sentinel with a note describing what went wrong.

use std::path::Path;

use msdrg_core::{
    normalize_code, CcLevel, DischargeStatus, DrgResult, DrgType, Encounter, Result,
    UNGROUPABLE_DRG,
};

use crate::pre_mdc::pre_mdc_drgs;
use crate::store::ReferenceStore;

/// Medical-path redirects for candidates that Appendix A types as surgical,
/// keyed by candidate DRG: `(with MCC, with CC, without CC/MCC)`
const SURGICAL_TO_MEDICAL_FALLBACK: [(&str, [&str; 3]); 1] = [("173", ["175", "175", "176"])];

/// PDX codes treated as MCC-equivalent when the medical-path fallback fires
const ACUTE_COR_PULMONALE_PDX: [&str; 5] = ["I2601", "I2602", "I2603", "I2604", "I2609"];

/// The MS-DRG grouper: assigns DRGs to patient encounters
pub struct DrgGrouper {
    store: ReferenceStore,
}

impl DrgGrouper {
    /// Create a grouper over an already-loaded reference store
    pub fn new(store: ReferenceStore) -> Self {
        Self { store }
    }

    /// Load the reference tables from a Definitions Manual directory
    pub fn load(data_dir: &Path) -> Result<Self> {
        Ok(Self::new(ReferenceStore::load(data_dir)?))
    }

    /// The underlying reference store
    pub fn store(&self) -> &ReferenceStore {
        &self.store
    }

    /// Assign an MS-DRG to a patient encounter
    pub fn group(&self, encounter: &Encounter) -> DrgResult {
        let mut notes = Vec::new();

        // Step 1: the principal diagnosis must be indexable
        let pdx = normalize_code(&encounter.principal_dx);
        let Some(dx_info) = self.store.diagnosis(&pdx) else {
            return ungroupable(None, vec![format!("Principal diagnosis {pdx} not found")]);
        };

        // Step 2: MDC comes from the PDX's primary mapping
        let Some(mdc) = dx_info.primary_mdc().map(str::to_string) else {
            return ungroupable(
                None,
                vec![format!("Principal diagnosis {pdx} has no MDC mapping")],
            );
        };
        notes.push(format!("MDC {mdc} from PDX {pdx}"));

        // Step 3: highest-severity CC/MCC from the secondary diagnoses
        let (mut mcc_dx, mut cc_dx) = self.find_cc_mcc(encounter);

        // Step 4: some codes only carry severity when discharged alive
        if encounter.discharge_status != DischargeStatus::Alive {
            if let Some(code) = mcc_dx.take_if(|c| self.store.is_discharge_alive_code(c)) {
                notes.push(format!("MCC {code} excluded (patient not discharged alive)"));
            }
            if let Some(code) = cc_dx.take_if(|c| self.store.is_discharge_alive_code(c)) {
                notes.push(format!("CC {code} excluded (patient not discharged alive)"));
            }
        }
        let has_mcc = mcc_dx.is_some();
        let has_cc = cc_dx.is_some();

        // Step 5: Pre-MDC overrides (transplants, ECMO) bypass MDC logic
        if let Some(drg) = self.check_pre_mdc(encounter, has_mcc) {
            notes.push("Assigned via Pre-MDC logic".to_string());
            let (description, drg_type) = match self.store.drg_definition(&drg) {
                Some(def) => (def.description.clone(), def.drg_type),
                None => ("Pre-MDC".to_string(), DrgType::Surgical),
            };
            return DrgResult {
                drg,
                mdc: None,
                description,
                drg_type,
                mcc_dx,
                cc_dx: if has_mcc { None } else { cc_dx },
                surgical_procedure: None,
                notes,
            };
        }

        // Step 6: any OR procedure selects the surgical path
        let or_procedures = self.find_or_procedures(encounter);
        let selected = if or_procedures.is_empty() {
            notes.push("Medical path: no OR procedures".to_string());
            self.assign_medical_drg(&pdx, &mdc, has_mcc, has_cc)
        } else {
            notes.push(format!(
                "Surgical path: {} OR procedure(s)",
                or_procedures.len()
            ));
            self.assign_surgical_drg(&or_procedures, has_mcc, has_cc)
        };

        match selected {
            Some(drg) => {
                let (description, drg_type) = match self.store.drg_definition(&drg) {
                    Some(def) => (def.description.clone(), def.drg_type),
                    None => ("Unknown".to_string(), DrgType::Medical),
                };
                DrgResult {
                    drg,
                    mdc: Some(mdc),
                    description,
                    drg_type,
                    mcc_dx,
                    cc_dx: if has_mcc { None } else { cc_dx },
                    surgical_procedure: or_procedures.into_iter().next(),
                    notes,
                }
            }
            None => {
                notes.push("Could not determine DRG".to_string());
                ungroupable(Some(mdc), notes)
            }
        }
    }

    /// Step 3: scan secondary diagnoses in reporting order
    ///
    /// The first MCC wins and stops the scan; a CC recorded earlier is kept
    /// as evidence but suppressed later when an MCC is present.
    fn find_cc_mcc(&self, encounter: &Encounter) -> (Option<String>, Option<String>) {
        let mut mcc_dx = None;
        let mut cc_dx = None;

        for dx in &encounter.secondary_dx {
            let code = normalize_code(dx);
            if let Some(info) = self.store.cc_mcc(&code) {
                match info.level {
                    CcLevel::Mcc if mcc_dx.is_none() => mcc_dx = Some(code),
                    CcLevel::Cc if cc_dx.is_none() => cc_dx = Some(code),
                    _ => {}
                }
            }
            if mcc_dx.is_some() {
                break;
            }
        }

        (mcc_dx, cc_dx)
    }

    /// Ordered subsequence of encounter procedures flagged as OR procedures
    fn find_or_procedures(&self, encounter: &Encounter) -> Vec<String> {
        encounter
            .procedures
            .iter()
            .map(|p| normalize_code(p))
            .filter(|code| {
                self.store
                    .procedure(code)
                    .is_some_and(|info| info.is_or_procedure)
            })
            .collect()
    }

    /// Step 5: first Pre-MDC procedure match wins
    fn check_pre_mdc(&self, encounter: &Encounter, has_mcc: bool) -> Option<String> {
        for proc in &encounter.procedures {
            let code = normalize_code(proc);
            if let Some((with_mcc, without_mcc)) = pre_mdc_drgs(&code) {
                let drg = if has_mcc { with_mcc } else { without_mcc };
                return Some(drg.to_string());
            }
        }
        None
    }

    /// Step 7a: surgical path
    ///
    /// The first OR procedure with DRG associations supplies the base DRG;
    /// severity variants follow the catalogue's triplet convention
    /// (base = MCC, base+1 = CC, base+2 = no CC), verified against the
    /// variant descriptions before use.
    fn assign_surgical_drg(
        &self,
        or_procedures: &[String],
        has_mcc: bool,
        has_cc: bool,
    ) -> Option<String> {
        for proc in or_procedures {
            let Some(info) = self.store.procedure(proc) else {
                continue;
            };
            let Some(base) = info.drgs.first() else {
                continue;
            };
            return Some(self.select_surgical_variant(base, has_mcc, has_cc));
        }
        None
    }

    fn select_surgical_variant(&self, base: &str, has_mcc: bool, has_cc: bool) -> String {
        let base_desc = self.description_lower(base);
        let has_variants = ["with mcc", "without mcc", "without cc"]
            .iter()
            .any(|marker| base_desc.contains(marker));
        if !has_variants || has_mcc {
            return base.to_string();
        }

        let Ok(base_num) = base.parse::<u32>() else {
            return base.to_string();
        };
        let cc_variant = format!("{:03}", base_num + 1);
        let no_cc_variant = format!("{:03}", base_num + 2);

        if has_cc {
            if self.description_lower(&cc_variant).contains("with cc") {
                return cc_variant;
            }
            return base.to_string();
        }

        if self.description_lower(&no_cc_variant).contains("without cc") {
            return no_cc_variant;
        }
        let cc_desc = self.description_lower(&cc_variant);
        if cc_desc.contains("without") || cc_desc.contains("with cc") {
            return cc_variant;
        }
        base.to_string()
    }

    /// Step 7b: medical path
    ///
    /// The PDX mapping matching the derived MDC determines the variant list:
    /// `[MCC, CC, no-CC]` for triplets, `[any-CC, no-CC]` for pairs. A
    /// candidate the catalogue types as surgical cannot be assigned here; a
    /// sparse fallback table redirects known cases to their medical triplet,
    /// anything else is skipped.
    fn assign_medical_drg(
        &self,
        pdx: &str,
        mdc: &str,
        has_mcc: bool,
        has_cc: bool,
    ) -> Option<String> {
        let dx_info = self.store.diagnosis(pdx)?;

        for mapping in &dx_info.mappings {
            if mapping.mdc != mdc || mapping.drgs.is_empty() {
                continue;
            }

            let candidate = if mapping.drgs.len() >= 3 {
                if has_mcc {
                    &mapping.drgs[0]
                } else if has_cc {
                    &mapping.drgs[1]
                } else {
                    &mapping.drgs[2]
                }
            } else if mapping.drgs.len() == 2 {
                if has_mcc || has_cc {
                    &mapping.drgs[0]
                } else {
                    &mapping.drgs[1]
                }
            } else {
                &mapping.drgs[0]
            };

            if self
                .store
                .drg_definition(candidate)
                .is_some_and(|def| def.is_surgical())
            {
                if let Some(triplet) = surgical_fallback(candidate) {
                    let mcc_equivalent = has_mcc || ACUTE_COR_PULMONALE_PDX.contains(&pdx);
                    let slot = if mcc_equivalent {
                        triplet[0]
                    } else if has_cc {
                        triplet[1]
                    } else {
                        triplet[2]
                    };
                    return Some(slot.to_string());
                }
                continue;
            }

            return Some(candidate.clone());
        }

        None
    }

    fn description_lower(&self, drg: &str) -> String {
        self.store
            .drg_definition(drg)
            .map(|def| def.description.to_lowercase())
            .unwrap_or_default()
    }
}

fn surgical_fallback(drg: &str) -> Option<[&'static str; 3]> {
    SURGICAL_TO_MEDICAL_FALLBACK
        .iter()
        .find(|(key, _)| *key == drg)
        .map(|(_, triplet)| *triplet)
}

fn ungroupable(mdc: Option<String>, notes: Vec<String>) -> DrgResult {
    DrgResult {
        drg: UNGROUPABLE_DRG.to_string(),
        mdc,
        description: "Ungroupable".to_string(),
        drg_type: DrgType::Medical,
        mcc_dx: None,
        cc_dx: None,
        surgical_procedure: None,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_table_covers_thrombolysis_drg() {
        assert_eq!(surgical_fallback("173"), Some(["175", "175", "176"]));
        assert_eq!(surgical_fallback("174"), None);
    }

    #[test]
    fn ungroupable_result_shape() {
        let result = ungroupable(Some("04".to_string()), vec!["note".to_string()]);
        assert!(result.is_ungroupable());
        assert_eq!(result.mdc.as_deref(), Some("04"));
        assert_eq!(result.description, "Ungroupable");
        assert_eq!(result.drg_type, DrgType::Medical);
    }
}

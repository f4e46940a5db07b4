//! Immutable reference store assembled from the Definitions Manual

use std::collections::{HashMap, HashSet};
use std::path::Path;

use msdrg_core::{
    normalize_code, CcMccInfo, DiagnosisInfo, DrgDefinition, DrgSeverityRoles, ProcedureCode,
    Result,
};
use msdrg_parser::{
    load_cc_mcc_definitions, load_diagnosis_index, load_drg_definitions, load_mdc_logic,
    CcMccTables, MdcLogicTables,
};

/// All lookup tables the grouping engine consults
///
/// Built once from a data directory and immutable thereafter; safe to share
/// across concurrent grouping calls without synchronisation. Every code-keyed
/// lookup canonicalises its key, so callers may pass codes with dots or in
/// lower case.
#[derive(Debug, Clone)]
pub struct ReferenceStore {
    drg_definitions: HashMap<String, DrgDefinition>,
    diagnoses: HashMap<String, DiagnosisInfo>,
    cc_mcc: HashMap<String, CcMccInfo>,
    discharge_alive: HashSet<String>,
    drg_exclusions: HashMap<String, HashSet<String>>,
    procedures: HashMap<String, ProcedureCode>,
    severity_roles: HashMap<String, DrgSeverityRoles>,
}

impl ReferenceStore {
    /// Load every reference table from a Definitions Manual directory
    ///
    /// Appendices A, B and C are mandatory; a missing MDC logic file is
    /// tolerated and contributes nothing.
    pub fn load(data_dir: &Path) -> Result<Self> {
        log::info!("Loading DRG definitions (Appendix A)");
        let drg_definitions = load_drg_definitions(data_dir)?;

        log::info!("Loading diagnosis index (Appendix B)");
        let diagnoses = load_diagnosis_index(data_dir)?;

        log::info!("Loading CC/MCC definitions (Appendix C)");
        let cc_mcc_tables = load_cc_mcc_definitions(data_dir)?;

        log::info!("Loading MDC logic files");
        let mdc_logic = load_mdc_logic(data_dir)?;

        let store = Self::from_tables(drg_definitions, diagnoses, cc_mcc_tables, mdc_logic);
        log::info!(
            "Loaded {} DRGs, {} diagnoses, {} CC/MCC codes, {} procedure codes",
            store.drg_count(),
            store.diagnosis_count(),
            store.cc_mcc_count(),
            store.procedure_count()
        );
        Ok(store)
    }

    /// Assemble a store from already-parsed tables
    pub fn from_tables(
        drg_definitions: HashMap<String, DrgDefinition>,
        diagnoses: HashMap<String, DiagnosisInfo>,
        cc_mcc_tables: CcMccTables,
        mdc_logic: MdcLogicTables,
    ) -> Self {
        Self {
            drg_definitions,
            diagnoses,
            cc_mcc: cc_mcc_tables.cc_mcc,
            discharge_alive: cc_mcc_tables.discharge_alive,
            drg_exclusions: cc_mcc_tables.drg_exclusions,
            procedures: mdc_logic.procedures,
            severity_roles: mdc_logic.severity_roles,
        }
    }

    /// Look up a DRG definition by its 3-digit identifier
    pub fn drg_definition(&self, drg: &str) -> Option<&DrgDefinition> {
        self.drg_definitions.get(drg)
    }

    /// Look up a diagnosis in the Appendix B index
    pub fn diagnosis(&self, code: &str) -> Option<&DiagnosisInfo> {
        self.diagnoses.get(&normalize_code(code))
    }

    /// Look up the CC/MCC classification of a diagnosis
    pub fn cc_mcc(&self, code: &str) -> Option<&CcMccInfo> {
        self.cc_mcc.get(&normalize_code(code))
    }

    /// True when the code counts as CC/MCC only on live discharge
    pub fn is_discharge_alive_code(&self, code: &str) -> bool {
        self.discharge_alive.contains(&normalize_code(code))
    }

    /// Diagnosis codes excluded as PDX for the given DRG
    ///
    /// Parsed from Appendix C Part 3 and exposed for forward extensions; the
    /// grouping pipeline does not consult these yet.
    pub fn exclusions_for_drg(&self, drg: &str) -> Option<&HashSet<String>> {
        self.drg_exclusions.get(drg)
    }

    /// Look up a procedure code from the MDC logic files
    pub fn procedure(&self, code: &str) -> Option<&ProcedureCode> {
        self.procedures.get(&normalize_code(code))
    }

    /// Severity roles recovered from MDC-logic DRG headers
    pub fn severity_roles(&self, drg: &str) -> Option<&DrgSeverityRoles> {
        self.severity_roles.get(drg)
    }

    pub fn drg_count(&self) -> usize {
        self.drg_definitions.len()
    }

    pub fn diagnosis_count(&self) -> usize {
        self.diagnoses.len()
    }

    pub fn cc_mcc_count(&self) -> usize {
        self.cc_mcc.len()
    }

    pub fn procedure_count(&self) -> usize {
        self.procedures.len()
    }
}

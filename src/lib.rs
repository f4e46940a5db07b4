//! # msdrg - MS-DRG Grouping for Rust
//!
//! A Rust library for assigning Medicare Severity Diagnosis-Related Groups
//! (MS-DRGs) to inpatient hospital encounters, driven entirely by the plain-text
//! CMS Definitions Manual.
//!
//! ## Features
//!
//! - **Reference-data ingestion**: fixed-column parsers for Appendices A, B and C
//!   plus the four MDC logic files of the Definitions Manual
//! - **Deterministic grouping**: an ordered decision pipeline (Pre-MDC overrides,
//!   OR-procedure surgical path, severity-variant selection, medical fallback)
//! - **Auditable results**: every assignment carries an ordered trace of rule notes
//! - **Shareable reference store**: tables are loaded once and are immutable,
//!   safe to share across concurrent grouping calls
//!
//! ## Quick Start
//!
//! ```no_run
//! use msdrg::{DischargeStatus, DrgGrouper, Encounter, Sex};
//! use std::path::Path;
//!
//! let grouper = DrgGrouper::load(Path::new("./definitions_manual")).unwrap();
//!
//! let encounter = Encounter::new("J18.9")
//!     .secondary_dx(["E11.00"])
//!     .age(70)
//!     .sex(Sex::Female)
//!     .discharge_status(DischargeStatus::Alive);
//!
//! let result = grouper.group(&encounter);
//! println!("DRG {} - {}", result.drg, result.description);
//! for note in &result.notes {
//!     println!("  - {note}");
//! }
//! ```

pub use msdrg_core as core;
pub use msdrg_grouper as grouper;
pub use msdrg_parser as parser;

// Re-export commonly used types
pub use msdrg_core::{
    codes::normalize_code,
    encounter::Encounter,
    error::{Error, Result},
    result::{DrgResult, UNGROUPABLE_DRG},
    tables::{CcMccInfo, DiagnosisInfo, DrgDefinition, DrgSeverityRoles, MdcMapping, ProcedureCode},
    types::{CcLevel, DischargeStatus, DrgType, Sex},
};
pub use msdrg_grouper::{DrgGrouper, ReferenceStore};

//! Core data structures and types for MS-DRG grouping
//!
//! This crate provides the foundational types used throughout the msdrg library:
//! - Patient encounter input (diagnoses, procedures, demographics, discharge)
//! - Reference-table records parsed from the CMS Definitions Manual
//! - Grouping results with their audit-note trace
//! - Code normalisation
//! - Error types

pub mod codes;
pub mod encounter;
pub mod error;
pub mod result;
pub mod tables;
pub mod types;

pub use codes::normalize_code;
pub use encounter::Encounter;
pub use error::{Error, Result};
pub use result::{DrgResult, UNGROUPABLE_DRG};
pub use tables::{CcMccInfo, DiagnosisInfo, DrgDefinition, DrgSeverityRoles, MdcMapping, ProcedureCode};
pub use types::{CcLevel, DischargeStatus, DrgType, Sex};

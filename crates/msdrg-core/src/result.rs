//! Grouping results

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::{CcLevel, DrgType};

/// Sentinel DRG assigned to encounters that cannot be grouped
pub const UNGROUPABLE_DRG: &str = "999";

/// Result of grouping one encounter
///
/// `mcc_dx` and `cc_dx` are never both populated: when an MCC is found, CC
/// evidence is suppressed. `notes` is the ordered audit trace of the rules
/// that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DrgResult {
    /// Assigned 3-digit DRG, or `"999"` when ungroupable
    pub drg: String,
    /// Derived MDC; `None` for Pre-MDC assignments and unrecognised PDX
    pub mdc: Option<String>,
    pub description: String,
    pub drg_type: DrgType,
    /// Secondary diagnosis that triggered MCC severity
    pub mcc_dx: Option<String>,
    /// Secondary diagnosis that triggered CC severity (absent when MCC present)
    pub cc_dx: Option<String>,
    /// Primary surgical procedure, when the surgical path fired
    pub surgical_procedure: Option<String>,
    /// Ordered trace of grouping rule notes
    pub notes: Vec<String>,
}

impl DrgResult {
    /// True when the sentinel `"999"` was assigned
    pub fn is_ungroupable(&self) -> bool {
        self.drg == UNGROUPABLE_DRG
    }

    /// Severity level of the assignment
    pub fn severity(&self) -> CcLevel {
        if self.mcc_dx.is_some() {
            CcLevel::Mcc
        } else if self.cc_dx.is_some() {
            CcLevel::Cc
        } else {
            CcLevel::None
        }
    }
}

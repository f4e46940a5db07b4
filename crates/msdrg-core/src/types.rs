//! Tag enums shared across the grouping pipeline

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Type of DRG - Medical or Surgical
///
/// Appendix A encodes this as a single character: `M` for medical DRGs and
/// `P` (procedure) for surgical DRGs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DrgType {
    Medical,
    Surgical,
}

impl DrgType {
    /// Parse the Appendix A type character (`M` or `P`)
    pub fn from_type_char(c: char) -> Option<Self> {
        match c {
            'M' => Some(DrgType::Medical),
            'P' => Some(DrgType::Surgical),
            _ => None,
        }
    }

    /// Get the type as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            DrgType::Medical => "Medical",
            DrgType::Surgical => "Surgical",
        }
    }
}

/// Complication/Comorbidity severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CcLevel {
    None,
    Cc,
    Mcc,
}

impl CcLevel {
    /// Parse the Appendix C level token (`CC` or `MCC`)
    pub fn from_level_token(s: &str) -> Option<Self> {
        match s {
            "CC" => Some(CcLevel::Cc),
            "MCC" => Some(CcLevel::Mcc),
            _ => None,
        }
    }

    /// Get the level as a display string
    pub fn as_str(&self) -> &'static str {
        match self {
            CcLevel::None => "None",
            CcLevel::Cc => "CC",
            CcLevel::Mcc => "MCC",
        }
    }
}

/// Patient discharge status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DischargeStatus {
    Alive,
    Expired,
    Transferred,
}

impl DischargeStatus {
    /// Parse from string (e.g. "alive", "expired", "transferred")
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "alive" => Some(DischargeStatus::Alive),
            "expired" => Some(DischargeStatus::Expired),
            "transferred" => Some(DischargeStatus::Transferred),
            _ => None,
        }
    }

    /// Get the status as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DischargeStatus::Alive => "alive",
            DischargeStatus::Expired => "expired",
            DischargeStatus::Transferred => "transferred",
        }
    }
}

/// Patient sex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sex {
    Male,
    Female,
    Unknown,
}

impl Sex {
    /// Parse from string (`M`, `F` or `U`, case-insensitive)
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "M" => Some(Sex::Male),
            "F" => Some(Sex::Female),
            "U" => Some(Sex::Unknown),
            _ => None,
        }
    }

    /// Get the sex as a single-character string
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "M",
            Sex::Female => "F",
            Sex::Unknown => "U",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drg_type_from_char() {
        assert_eq!(DrgType::from_type_char('M'), Some(DrgType::Medical));
        assert_eq!(DrgType::from_type_char('P'), Some(DrgType::Surgical));
        assert_eq!(DrgType::from_type_char('X'), None);
    }

    #[test]
    fn cc_level_from_token() {
        assert_eq!(CcLevel::from_level_token("CC"), Some(CcLevel::Cc));
        assert_eq!(CcLevel::from_level_token("MCC"), Some(CcLevel::Mcc));
        assert_eq!(CcLevel::from_level_token("N/A"), None);
    }

    #[test]
    fn discharge_status_round_trips() {
        for status in [
            DischargeStatus::Alive,
            DischargeStatus::Expired,
            DischargeStatus::Transferred,
        ] {
            assert_eq!(DischargeStatus::from_str(status.as_str()), Some(status));
        }
    }

    #[test]
    fn sex_accepts_lowercase() {
        assert_eq!(Sex::from_str("m"), Some(Sex::Male));
        assert_eq!(Sex::from_str("f"), Some(Sex::Female));
        assert_eq!(Sex::from_str("x"), None);
    }
}

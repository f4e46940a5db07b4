//! Patient encounter input

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codes::normalize_code;
use crate::types::{DischargeStatus, Sex};

/// A patient encounter submitted for DRG assignment
///
/// All diagnosis and procedure codes are canonicalised (uppercase, `.`
/// stripped) at construction. The order of `secondary_dx` matters: the first
/// MCC encountered wins severity. The order of `procedures` matters: the
/// first operating-room procedure becomes the primary surgical procedure.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Encounter {
    /// Principal diagnosis (ICD-10-CM)
    pub principal_dx: String,
    /// Secondary diagnoses (ICD-10-CM), in reporting order
    pub secondary_dx: Vec<String>,
    /// Procedures performed (ICD-10-PCS), in reporting order
    pub procedures: Vec<String>,
    /// Patient age in years
    pub age: u32,
    /// Patient sex
    pub sex: Sex,
    /// Discharge status
    pub discharge_status: DischargeStatus,
}

impl Encounter {
    /// Create an encounter with the given principal diagnosis
    ///
    /// Defaults: no secondary diagnoses, no procedures, age 0, sex unknown,
    /// discharged alive. Use the chained setters to fill in the rest.
    pub fn new(principal_dx: impl AsRef<str>) -> Self {
        Self {
            principal_dx: normalize_code(principal_dx.as_ref()),
            secondary_dx: Vec::new(),
            procedures: Vec::new(),
            age: 0,
            sex: Sex::Unknown,
            discharge_status: DischargeStatus::Alive,
        }
    }

    /// Set the secondary diagnoses (canonicalised, order preserved)
    pub fn secondary_dx<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.secondary_dx = codes
            .into_iter()
            .map(|c| normalize_code(c.as_ref()))
            .collect();
        self
    }

    /// Set the procedure codes (canonicalised, order preserved)
    pub fn procedures<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.procedures = codes
            .into_iter()
            .map(|c| normalize_code(c.as_ref()))
            .collect();
        self
    }

    /// Set the patient age in years
    pub fn age(mut self, age: u32) -> Self {
        self.age = age;
        self
    }

    /// Set the patient sex
    pub fn sex(mut self, sex: Sex) -> Self {
        self.sex = sex;
        self
    }

    /// Set the discharge status
    pub fn discharge_status(mut self, status: DischargeStatus) -> Self {
        self.discharge_status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_canonicalises_codes() {
        let encounter = Encounter::new("i25.10")
            .secondary_dx(["e11.9", "I10"])
            .procedures(["02ya0z0"]);

        assert_eq!(encounter.principal_dx, "I2510");
        assert_eq!(encounter.secondary_dx, vec!["E119", "I10"]);
        assert_eq!(encounter.procedures, vec!["02YA0Z0"]);
    }

    #[test]
    fn defaults() {
        let encounter = Encounter::new("J189");
        assert!(encounter.secondary_dx.is_empty());
        assert!(encounter.procedures.is_empty());
        assert_eq!(encounter.age, 0);
        assert_eq!(encounter.sex, Sex::Unknown);
        assert_eq!(encounter.discharge_status, DischargeStatus::Alive);
    }

    #[test]
    fn code_order_is_preserved() {
        let encounter = Encounter::new("J189").secondary_dx(["E119", "E1100", "I10"]);
        assert_eq!(encounter.secondary_dx, vec!["E119", "E1100", "I10"]);
    }
}

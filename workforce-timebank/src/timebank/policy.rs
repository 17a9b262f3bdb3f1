use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Organization-wide time bank settings, read once per calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrgTimeBankPolicy {
    pub excess_grace_minutes: u32,
    pub deficit_grace_minutes: u32,
    pub rounding_increment_minutes: u32,
    pub max_positive_minutes: u32,
    pub max_negative_minutes: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PolicyError {
    #[error("rounding increment must be at least 1 minute")]
    ZeroRoundingIncrement,
}

impl Default for OrgTimeBankPolicy {
    fn default() -> Self {
        Self {
            excess_grace_minutes: 0,
            deficit_grace_minutes: 0,
            rounding_increment_minutes: 1,
            max_positive_minutes: 4800, // 80h
            max_negative_minutes: 480,  // 8h
        }
    }
}

impl OrgTimeBankPolicy {
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.rounding_increment_minutes == 0 {
            return Err(PolicyError::ZeroRoundingIncrement);
        }
        Ok(())
    }

    /// Lowest balance the ledger may hold, as signed minutes
    pub fn lower_bound(&self) -> i64 {
        -i64::from(self.max_negative_minutes)
    }

    /// Highest balance the ledger may hold, as signed minutes
    pub fn upper_bound(&self) -> i64 {
        i64::from(self.max_positive_minutes)
    }

    pub(crate) fn effective_increment(&self) -> i64 {
        i64::from(self.rounding_increment_minutes.max(1))
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use super::calculator::{clamp_to_limits, compute_adjustment};
use super::policy::OrgTimeBankPolicy;

/// Where a ledger movement came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementOrigin {
    AutoDaily,
    AutoFestive,
    AutoDeficit,
    ManualAdmin,
    EmployeeRequest,
    OvertimeAuthorization,
    FlexWindow,
    Correction,
}

impl MovementOrigin {
    pub fn is_automatic(self) -> bool {
        matches!(self, Self::AutoDaily | Self::AutoFestive | Self::AutoDeficit)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AutoDaily => "Daily balance",
            Self::AutoFestive => "Festive day",
            Self::AutoDeficit => "Daily deficit",
            Self::ManualAdmin => "Admin adjustment",
            Self::EmployeeRequest => "Employee request",
            Self::OvertimeAuthorization => "Overtime authorization",
            Self::FlexWindow => "Flex window",
            Self::Correction => "Correction",
        }
    }
}

/// Calendar classification of a worked day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayKind {
    #[default]
    Regular,
    Festive,
}

/// A single append-only entry in an employee's time bank
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerMovement {
    pub minutes: i64,
    pub origin: MovementOrigin,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub balance_minutes: i64,
    pub headroom_positive_minutes: i64,
    pub headroom_negative_minutes: i64,
    pub movement_count: usize,
}

/// Per-employee time bank. Movements are only ever appended; the balance is their sum.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    pub employee_id: String,
    movements: Vec<LedgerMovement>,
    balance_minutes: i64,
}

/// Sums a list of movements into a balance
pub fn fold_balance(movements: &[LedgerMovement]) -> i64 {
    movements.iter().fold(0i64, |acc, m| acc.saturating_add(m.minutes))
}

impl Ledger {
    pub fn new(employee_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            movements: Vec::new(),
            balance_minutes: 0,
        }
    }

    pub fn balance(&self) -> i64 {
        self.balance_minutes
    }

    pub fn movements(&self) -> &[LedgerMovement] {
        &self.movements
    }

    /// Posts a day's automatic adjustment. Returns `None` when grace margins absorbed it.
    /// A delta truncated to 0 by the balance limits is still recorded.
    pub fn record_daily(
        &mut self,
        date: NaiveDate,
        raw_delta_minutes: i64,
        day_kind: DayKind,
        policy: &OrgTimeBankPolicy,
    ) -> Option<LedgerMovement> {
        let adjustment = compute_adjustment(raw_delta_minutes, policy, self.balance_minutes);
        if adjustment.applied_minutes == 0 && !adjustment.clamped {
            log::debug!(
                "{}: {} delta {} absorbed (rounded {})",
                self.employee_id, date, raw_delta_minutes, adjustment.rounded_minutes
            );
            return None;
        }

        // Zero-minute truncations keep the direction of the day that produced them
        let direction = if adjustment.applied_minutes != 0 {
            adjustment.applied_minutes
        } else {
            adjustment.rounded_minutes
        };
        let origin = if direction < 0 {
            MovementOrigin::AutoDeficit
        } else if day_kind == DayKind::Festive {
            MovementOrigin::AutoFestive
        } else {
            MovementOrigin::AutoDaily
        };

        let description = adjustment
            .clamped
            .then(|| format!("Truncated from {} min to respect balance limits", adjustment.rounded_minutes));

        let movement = LedgerMovement {
            minutes: adjustment.applied_minutes,
            origin,
            date,
            description,
        };
        self.push(movement.clone(), adjustment.new_balance_minutes);
        Some(movement)
    }

    /// Posts a movement decided by a person (admin, approved request, correction).
    /// Clamped against the running total but always recorded, even when truncated to 0.
    pub fn record_manual(
        &mut self,
        minutes: i64,
        origin: MovementOrigin,
        date: NaiveDate,
        description: Option<String>,
        policy: &OrgTimeBankPolicy,
    ) -> LedgerMovement {
        let adjustment = clamp_to_limits(minutes, policy, self.balance_minutes);
        if adjustment.clamped {
            log::warn!(
                "{}: {:?} movement of {} min truncated to {} min",
                self.employee_id, origin, minutes, adjustment.applied_minutes
            );
        }

        let movement = LedgerMovement {
            minutes: adjustment.applied_minutes,
            origin,
            date,
            description,
        };
        self.push(movement.clone(), adjustment.new_balance_minutes);
        movement
    }

    pub fn summary(&self, policy: &OrgTimeBankPolicy) -> BalanceSummary {
        BalanceSummary {
            balance_minutes: self.balance_minutes,
            headroom_positive_minutes: (policy.upper_bound() - self.balance_minutes).max(0),
            headroom_negative_minutes: (self.balance_minutes - policy.lower_bound()).max(0),
            movement_count: self.movements.len(),
        }
    }

    fn push(&mut self, movement: LedgerMovement, new_balance_minutes: i64) {
        self.movements.push(movement);
        self.balance_minutes = new_balance_minutes;
        debug_assert_eq!(fold_balance(&self.movements), self.balance_minutes);
    }
}

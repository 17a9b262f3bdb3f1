use serde::Serialize;
use super::policy::OrgTimeBankPolicy;

/// Outcome of turning a raw daily delta into a ledger adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub rounded_minutes: i64,
    pub applied_minutes: i64,
    pub new_balance_minutes: i64,
    pub clamped: bool,
}

/// Rounds to the nearest multiple of `increment`, halves away from zero.
/// An increment of 0 is treated as 1.
pub fn round_to_increment(minutes: i64, increment: i64) -> i64 {
    let increment = increment.max(1);
    let magnitude = minutes.unsigned_abs();
    let step = increment.unsigned_abs();
    let remainder = magnitude % step;
    let base = magnitude - remainder;
    let rounded = if remainder.saturating_mul(2) >= step {
        base.saturating_add(step)
    } else {
        base
    };
    let rounded = i64::try_from(rounded).unwrap_or(i64::MAX);
    if minutes < 0 {
        -rounded
    } else {
        rounded
    }
}

/// Applies the balance limits to an already-decided movement.
///
/// When the running total would leave `[-max_negative, +max_positive]` the movement is
/// truncated so the balance lands exactly on the bound.
pub fn clamp_to_limits(requested_minutes: i64, policy: &OrgTimeBankPolicy, current_balance_minutes: i64) -> Adjustment {
    let upper = policy.upper_bound();
    let lower = policy.lower_bound();
    let tentative = current_balance_minutes.saturating_add(requested_minutes);

    let (applied_minutes, new_balance_minutes) = if tentative > upper {
        (upper.saturating_sub(current_balance_minutes), upper)
    } else if tentative < lower {
        (lower.saturating_sub(current_balance_minutes), lower)
    } else {
        (requested_minutes, tentative)
    };

    Adjustment {
        rounded_minutes: requested_minutes,
        applied_minutes,
        new_balance_minutes,
        clamped: applied_minutes != requested_minutes,
    }
}

/// Converts a day's worked-minus-expected delta into the adjustment to post.
///
/// Order: one rounding pass, then the grace margins on the rounded value, then the
/// balance clamp. Never fails.
pub fn compute_adjustment(raw_delta_minutes: i64, policy: &OrgTimeBankPolicy, current_balance_minutes: i64) -> Adjustment {
    let rounded = round_to_increment(raw_delta_minutes, policy.effective_increment());

    let within_excess_grace = rounded >= 0 && rounded <= i64::from(policy.excess_grace_minutes);
    let within_deficit_grace = rounded <= 0 && rounded.unsigned_abs() <= u64::from(policy.deficit_grace_minutes);

    let requested = if within_excess_grace || within_deficit_grace {
        0
    } else {
        rounded
    };

    let mut adjustment = clamp_to_limits(requested, policy, current_balance_minutes);
    adjustment.rounded_minutes = rounded;
    adjustment
}

pub mod policy;
pub mod calculator;
pub mod ledger;

pub use policy::{OrgTimeBankPolicy, PolicyError};
pub use calculator::{compute_adjustment, clamp_to_limits, round_to_increment, Adjustment};
pub use ledger::{fold_balance, BalanceSummary, DayKind, Ledger, LedgerMovement, MovementOrigin};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use super::slot_utils::minutes_to_time_string;
use super::types::{SlotInput, SlotType};
use super::validator::{validate_slots, SlotValidationError};

pub const MIN_REASON_LENGTH: usize = 10;

/// Manual time entry request from the frontend
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntryRequest {
    pub date: NaiveDate,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub slots: Vec<SlotInput>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedSlot {
    pub slot_type: SlotType,
    pub start_time: String,
    pub end_time: String,
}

/// Payload persisted for approval once a request passes validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEntrySubmission {
    pub date: NaiveDate,
    pub reason: String,
    pub slots: Vec<SubmittedSlot>,
    pub worked_minutes: u32,
    pub break_minutes: u32,
    pub status: RequestStatus,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManualEntryError {
    #[error("reason must be at least {} characters", MIN_REASON_LENGTH)]
    ReasonTooShort,

    #[error("date {0} is in the future")]
    DateInFuture(NaiveDate),

    #[error(transparent)]
    Slots(#[from] SlotValidationError),
}

impl ManualEntryError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ReasonTooShort => "ReasonTooShort",
            Self::DateInFuture(_) => "DateInFuture",
            Self::Slots(e) => e.kind(),
        }
    }
}

/// Validates a manual time entry request against `today` and builds the pending payload
pub fn validate_request(req: &ManualEntryRequest, today: NaiveDate) -> Result<ManualEntrySubmission, ManualEntryError> {
    let reason = req.reason.trim();
    if reason.chars().count() < MIN_REASON_LENGTH {
        return Err(ManualEntryError::ReasonTooShort);
    }

    if req.date > today {
        return Err(ManualEntryError::DateInFuture(req.date));
    }

    let validated = validate_slots(&req.slots)?;

    let slots = validated
        .slots
        .iter()
        .map(|s| SubmittedSlot {
            slot_type: s.slot_type,
            start_time: minutes_to_time_string(s.start_minutes),
            end_time: minutes_to_time_string(s.end_minutes),
        })
        .collect();

    Ok(ManualEntrySubmission {
        date: req.date,
        reason: reason.to_string(),
        slots,
        worked_minutes: validated.worked_minutes,
        break_minutes: validated.break_minutes,
        status: RequestStatus::Pending,
    })
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SlotType {
    Work,
    Break,
}

/// One segment of a retroactive time entry, as submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotInput {
    pub slot_type: SlotType,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl SlotInput {
    pub fn new(slot_type: SlotType, start_time: &str, end_time: &str) -> Self {
        Self {
            slot_type,
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
        }
    }
}

/// A segment with times resolved to minutes since midnight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSlot {
    pub slot_type: SlotType,
    pub start_minutes: u32,
    pub end_minutes: u32,
    /// Index in the submitted list; breaks ties between equal start times
    pub order: usize,
}

impl ParsedSlot {
    pub fn duration_minutes(&self) -> u32 {
        self.end_minutes.saturating_sub(self.start_minutes)
    }
}

/// Slots sorted by start time, with the totals the caller displays and persists
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedSlots {
    pub slots: Vec<ParsedSlot>,
    pub worked_minutes: u32,
    pub break_minutes: u32,
}

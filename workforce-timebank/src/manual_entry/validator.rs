use thiserror::Error;
use super::slot_utils::parse_time_to_minutes;
use super::types::{ParsedSlot, SlotInput, SlotType, ValidatedSlots};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    First,
    Last,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SlotValidationError {
    #[error("at least one time slot is required")]
    EmptyInput,

    #[error("slot {index} has a missing or invalid time, expected HH:MM")]
    MalformedTime { index: usize },

    #[error("the {0:?} slot of the day must be a work slot")]
    InvalidBoundary(Boundary),

    #[error("slot {index} ends at or before it starts")]
    InvertedRange { index: usize },

    #[error("slot {index} overlaps the previous slot")]
    Overlap { index: usize },

    #[error("the entry contains no worked time")]
    NoWorkTime,
}

impl SlotValidationError {
    /// Stable machine-readable name, used in API responses
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyInput => "EmptyInput",
            Self::MalformedTime { .. } => "MalformedTime",
            Self::InvalidBoundary(_) => "InvalidBoundary",
            Self::InvertedRange { .. } => "InvertedRange",
            Self::Overlap { .. } => "Overlap",
            Self::NoWorkTime => "NoWorkTime",
        }
    }
}

fn parse_slot(index: usize, input: &SlotInput) -> Result<ParsedSlot, SlotValidationError> {
    let malformed = || SlotValidationError::MalformedTime { index };
    let start_minutes = input.start_time.as_deref().and_then(parse_time_to_minutes).ok_or_else(malformed)?;
    let end_minutes = input.end_time.as_deref().and_then(parse_time_to_minutes).ok_or_else(malformed)?;
    Ok(ParsedSlot {
        slot_type: input.slot_type,
        start_minutes,
        end_minutes,
        order: index,
    })
}

/// Validates the work/break segments of a manual time entry.
///
/// Checks run in a fixed order and the first failure wins: empty list, time parsing,
/// first and last segment type, then per-segment range and overlap, then worked total.
/// Error indices refer to positions in the submitted list.
pub fn validate_slots(inputs: &[SlotInput]) -> Result<ValidatedSlots, SlotValidationError> {
    if inputs.is_empty() {
        return Err(SlotValidationError::EmptyInput);
    }

    let mut slots = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| parse_slot(index, input))
        .collect::<Result<Vec<_>, _>>()?;

    slots.sort_by_key(|s| (s.start_minutes, s.order));

    // Non-empty, checked above
    let (first, last) = (&slots[0], &slots[slots.len() - 1]);
    if first.slot_type != SlotType::Work {
        return Err(SlotValidationError::InvalidBoundary(Boundary::First));
    }
    if last.slot_type != SlotType::Work {
        return Err(SlotValidationError::InvalidBoundary(Boundary::Last));
    }

    let mut previous: Option<&ParsedSlot> = None;
    for slot in &slots {
        if slot.start_minutes >= slot.end_minutes {
            return Err(SlotValidationError::InvertedRange { index: slot.order });
        }
        if let Some(prev) = previous {
            if slot.start_minutes < prev.end_minutes {
                return Err(SlotValidationError::Overlap { index: slot.order });
            }
        }
        previous = Some(slot);
    }

    let total_for = |slot_type: SlotType| -> u32 {
        slots
            .iter()
            .filter(|s| s.slot_type == slot_type)
            .map(ParsedSlot::duration_minutes)
            .sum()
    };
    let worked_minutes = total_for(SlotType::Work);
    let break_minutes = total_for(SlotType::Break);

    if worked_minutes == 0 {
        return Err(SlotValidationError::NoWorkTime);
    }

    Ok(ValidatedSlots {
        slots,
        worked_minutes,
        break_minutes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work(start: &str, end: &str) -> SlotInput {
        SlotInput::new(SlotType::Work, start, end)
    }

    fn rest(start: &str, end: &str) -> SlotInput {
        SlotInput::new(SlotType::Break, start, end)
    }

    #[test]
    fn split_shift_with_lunch_is_valid() {
        let result = validate_slots(&[work("09:00", "13:00"), rest("13:00", "14:00"), work("14:00", "18:00")]).unwrap();
        assert_eq!(result.worked_minutes, 480);
        assert_eq!(result.break_minutes, 60);
        assert_eq!(result.slots.len(), 3);
    }

    #[test]
    fn slots_are_returned_sorted() {
        let result = validate_slots(&[work("14:00", "18:00"), rest("13:00", "14:00"), work("09:00", "13:00")]).unwrap();
        let starts: Vec<u32> = result.slots.iter().map(|s| s.start_minutes).collect();
        assert_eq!(starts, vec![540, 780, 840]);
        assert_eq!(result.slots[0].order, 2);
    }

    #[test]
    fn gaps_between_slots_are_allowed() {
        let result = validate_slots(&[work("08:00", "12:00"), work("15:00", "17:30")]).unwrap();
        assert_eq!(result.worked_minutes, 390);
        assert_eq!(result.break_minutes, 0);
    }

    #[test]
    fn empty_list_is_rejected() {
        assert_eq!(validate_slots(&[]), Err(SlotValidationError::EmptyInput));
    }

    #[test]
    fn malformed_or_missing_times_are_rejected() {
        let missing = SlotInput {
            slot_type: SlotType::Work,
            start_time: Some("09:00".to_string()),
            end_time: None,
        };
        assert_eq!(
            validate_slots(&[work("09:00", "12:00"), missing]),
            Err(SlotValidationError::MalformedTime { index: 1 })
        );
        assert_eq!(
            validate_slots(&[work("9h", "12:00")]),
            Err(SlotValidationError::MalformedTime { index: 0 })
        );
        assert_eq!(
            validate_slots(&[work("09:00", "24:00")]),
            Err(SlotValidationError::MalformedTime { index: 0 })
        );
    }

    #[test]
    fn overlapping_work_is_rejected() {
        assert_eq!(
            validate_slots(&[work("09:00", "13:00"), work("12:00", "17:00")]),
            Err(SlotValidationError::Overlap { index: 1 })
        );
    }

    #[test]
    fn boundary_is_checked_before_work_total() {
        assert_eq!(
            validate_slots(&[rest("09:00", "10:00")]),
            Err(SlotValidationError::InvalidBoundary(Boundary::First))
        );
    }

    #[test]
    fn trailing_break_is_rejected() {
        assert_eq!(
            validate_slots(&[work("09:00", "13:00"), rest("13:00", "14:00")]),
            Err(SlotValidationError::InvalidBoundary(Boundary::Last))
        );
    }

    #[test]
    fn zero_length_slot_is_inverted() {
        assert_eq!(
            validate_slots(&[work("09:00", "09:00")]),
            Err(SlotValidationError::InvertedRange { index: 0 })
        );
        assert_eq!(
            validate_slots(&[work("18:00", "09:00")]),
            Err(SlotValidationError::InvertedRange { index: 0 })
        );
    }

    #[test]
    fn equal_starts_keep_submission_order() {
        // Both start at 09:00; the break was submitted first so it sorts first.
        assert_eq!(
            validate_slots(&[rest("09:00", "09:30"), work("09:00", "12:00")]),
            Err(SlotValidationError::InvalidBoundary(Boundary::First))
        );
    }

    #[test]
    fn slot_input_from_json() {
        let slots: Vec<SlotInput> =
            serde_json::from_str(r#"[{"slotType":"WORK","startTime":"09:00","endTime":"17:00"},{"slotType":"BREAK"}]"#)
                .unwrap();
        assert_eq!(slots[0].slot_type, SlotType::Work);
        assert_eq!(slots[1].start_time, None);
        assert_eq!(validate_slots(&slots), Err(SlotValidationError::MalformedTime { index: 1 }));
    }

    #[test]
    fn error_kinds_are_stable() {
        assert_eq!(SlotValidationError::NoWorkTime.kind(), "NoWorkTime");
        assert_eq!(SlotValidationError::Overlap { index: 3 }.kind(), "Overlap");
    }
}

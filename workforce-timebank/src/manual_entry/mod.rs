pub mod types;
pub mod slot_utils;
pub mod validator;
pub mod request;

pub use types::{ParsedSlot, SlotInput, SlotType, ValidatedSlots};
pub use slot_utils::{minutes_to_time_string, parse_time_to_minutes};
pub use validator::{validate_slots, Boundary, SlotValidationError};
pub use request::{validate_request, ManualEntryError, ManualEntryRequest, ManualEntrySubmission, RequestStatus};

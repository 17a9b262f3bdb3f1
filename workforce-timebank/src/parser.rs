use csv::{ReaderBuilder, Trim};
use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::manual_entry::slot_utils::MINUTES_PER_DAY;
use crate::timebank::{DayKind, Ledger, OrgTimeBankPolicy};

#[derive(Debug, Deserialize)]
struct RawDailyRecord {
    employee_id: String,
    date: String,
    worked_minutes: String,
    expected_minutes: String,
    #[serde(default)]
    festive: String,
}

/// One employee-day of aggregated clock data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyDelta {
    pub employee_id: String,
    pub date: NaiveDate,
    pub worked_minutes: i64,
    pub expected_minutes: i64,
    pub day_kind: DayKind,
}

impl DailyDelta {
    /// Worked minus expected
    pub fn raw_delta(&self) -> i64 {
        self.worked_minutes.saturating_sub(self.expected_minutes)
    }
}

/// Parses a boolean value from various string representations
fn parse_bool(value: &str) -> bool {
    let lower = value.trim().to_lowercase();
    lower == "yes" || lower == "true" || lower == "1"
}

/// Parses a minute count within one day, returning 0 if empty
fn parse_minutes(value: &str, field: &str, line: u64) -> Result<i64, Box<dyn std::error::Error>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    let minutes: i64 = trimmed
        .parse()
        .map_err(|e| format!("line {}: invalid {} {:?}: {}", line, field, trimmed, e))?;
    let max = i64::from(MINUTES_PER_DAY);
    if !(0..=max).contains(&minutes) {
        return Err(format!("line {}: invalid {} {:?}: must be between 0 and {}", line, field, trimmed, max).into());
    }
    Ok(minutes)
}

/// Loads per-day worked/expected minutes from a CSV file
///
/// Expected header: `employee_id,date,worked_minutes,expected_minutes,festive`.
/// Dates are `YYYY-MM-DD`; rows without an employee id are skipped.
pub fn load_daily_deltas<P: AsRef<Path>>(csv_path: P) -> Result<Vec<DailyDelta>, Box<dyn std::error::Error>> {
    let mut reader = ReaderBuilder::new().trim(Trim::All).from_path(csv_path)?;
    let headers = reader.headers()?.clone();
    let mut deltas = Vec::new();

    for result in reader.records() {
        let row = result?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let record: RawDailyRecord = row.deserialize(Some(&headers))?;

        if record.employee_id.is_empty() {
            log::warn!("line {}: skipping row without employee id", line);
            continue;
        }

        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d")
            .map_err(|e| format!("line {}: invalid date {:?}: {}", line, record.date, e))?;

        let day_kind = if parse_bool(&record.festive) {
            DayKind::Festive
        } else {
            DayKind::Regular
        };

        deltas.push(DailyDelta {
            employee_id: record.employee_id,
            date,
            worked_minutes: parse_minutes(&record.worked_minutes, "worked_minutes", line)?,
            expected_minutes: parse_minutes(&record.expected_minutes, "expected_minutes", line)?,
            day_kind,
        });
    }

    Ok(deltas)
}

/// Replays imported days through each employee's ledger in date order
pub fn build_ledgers(deltas: &[DailyDelta], policy: &OrgTimeBankPolicy) -> BTreeMap<String, Ledger> {
    let mut by_employee: BTreeMap<&str, Vec<&DailyDelta>> = BTreeMap::new();
    for delta in deltas {
        by_employee.entry(delta.employee_id.as_str()).or_default().push(delta);
    }

    by_employee
        .into_iter()
        .map(|(employee_id, mut days)| {
            days.sort_by_key(|d| d.date);
            let mut ledger = Ledger::new(employee_id);
            for day in days {
                ledger.record_daily(day.date, day.raw_delta(), day.day_kind, policy);
            }
            (employee_id.to_string(), ledger)
        })
        .collect()
}

//! Time bank ledger and manual time entry validation for the workforce service.
//!
//! - `timebank`: organization policy, the daily adjustment calculator and the per-employee ledger
//! - `manual_entry`: work/break slot validation for retroactive time entries
//! - `parser` / `display`: CSV import of daily deltas and text reports
//! - `web`: the JSON API used by the frontend

pub mod config;
pub mod display;
pub mod manual_entry;
pub mod parser;
pub mod timebank;
pub mod web;

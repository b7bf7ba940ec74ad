//! Command handlers module.
//!
//! - `core.rs`: entry commands (add, list)
//! - `io.rs`: CSV import and export

mod core;
mod io;

pub use core::{AddArgs, cmd_add, cmd_list};
pub use io::{cmd_export, cmd_import};

use chrono::{NaiveDate, NaiveDateTime};
use session_journal::io::formats::csv::parse_timestamp;
use session_journal::{AdministrationMethod, Error, JournalConfig, JsonFileStore, Result, TreatmentType};

/// Accepted `--at` formats besides the journal's own display format.
const INPUT_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%dT%H:%M:%S"];

/// Opens the configured journal store.
pub fn open_store(config: &JournalConfig) -> JsonFileStore {
    JsonFileStore::new(config.store_path())
}

/// Parses a treatment type argument.
pub fn parse_treatment(s: &str) -> Result<TreatmentType> {
    TreatmentType::parse(s).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Unknown treatment type '{s}'. Expected one of: {}",
            TreatmentType::all()
                .iter()
                .map(TreatmentType::display_name)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

/// Parses an administration method argument.
pub fn parse_method(s: &str) -> Result<AdministrationMethod> {
    AdministrationMethod::parse(s).ok_or_else(|| {
        Error::InvalidInput(format!(
            "Unknown administration method '{s}'. Expected one of: {}",
            AdministrationMethod::all()
                .iter()
                .map(AdministrationMethod::display_name)
                .collect::<Vec<_>>()
                .join(", ")
        ))
    })
}

/// Parses a `YYYY-MM-DD` date argument.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| Error::InvalidInput(format!("Invalid date '{s}' (expected YYYY-MM-DD): {e}")))
}

/// Parses a session timestamp argument.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    INPUT_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| parse_timestamp(s))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "Invalid timestamp '{s}' (expected YYYY-MM-DD HH:MM)"
            ))
        })
}

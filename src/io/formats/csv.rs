//! CSV format adapter for journal import/export.
//!
//! The column layout is fixed; see [`HEADER`].

use crate::io::grammar::{
    FIELD_COUNT, HEADER, RECORD_TERMINATOR, decode_row, encode_text_field, join_record,
    quote_field, split_records, strip_guard,
};
use crate::io::music_link;
use crate::io::traits::ExportSink;
use crate::models::{AdministrationMethod, EntryId, JournalEntry, TreatmentType};
use crate::{Error, ImportError, Result};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write;

/// Medium date plus short time, POSIX month names and AM/PM markers.
///
/// Example: `Dec 1, 2024 at 10:30 AM`.
pub const DATE_FORMAT: &str = "%b %-d, %Y at %-I:%M %p";

/// Plain base-10 integer: optional leading minus, digits only.
static MOOD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap_or_else(|_| unreachable!()));

/// Renders a session timestamp in [`DATE_FORMAT`].
#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(DATE_FORMAT).to_string()
}

/// Parses a timestamp written in [`DATE_FORMAT`].
///
/// Only the canonical rendering is accepted: the value must re-format to
/// exactly the same text, which rules out zero padding, full month names and
/// irregular spacing.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let ts = NaiveDateTime::parse_from_str(s, DATE_FORMAT).ok()?;
    (format_timestamp(&ts) == s).then_some(ts)
}

/// Parses a mood token. Any `i64` is accepted; there is no range check.
#[must_use]
pub fn parse_mood(s: &str) -> Option<i64> {
    if !MOOD_TOKEN.is_match(s) {
        return None;
    }
    s.parse().ok()
}

/// Encodes one entry as a record, without the terminator.
///
/// Free-text columns and the music link get the formula guard; the date and
/// vocabulary columns are only quoted. Moods are bare integers.
#[must_use]
pub fn encode_record(entry: &JournalEntry) -> String {
    let date = format_timestamp(&entry.session_timestamp);
    let mood_before = entry.mood_before.to_string();
    let mood_after = entry.mood_after.to_string();
    let fields = [
        quote_field(&date).into_owned(),
        quote_field(entry.treatment_type.display_name()).into_owned(),
        quote_field(entry.administration_method.display_name()).into_owned(),
        encode_text_field(&entry.intention),
        mood_before,
        mood_after,
        encode_text_field(&entry.reflections),
        encode_text_field(entry.music_url().unwrap_or_default()),
    ];
    let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
    join_record(&refs)
}

/// CSV export sink.
///
/// Writes the header before the first entry, or on finalize when no entry was
/// written, so an empty export is still a valid header-only file.
pub struct CsvExportSink<W: Write> {
    writer: W,
    /// Whether the header has been written.
    header_written: bool,
    /// Entries written so far.
    rows_written: usize,
}

impl<W: Write> CsvExportSink<W> {
    /// Creates a new CSV export sink.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            rows_written: 0,
        }
    }

    /// Returns the number of entries written.
    #[must_use]
    pub const fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Writes the header if not already written.
    fn ensure_header(&mut self) -> Result<()> {
        if !self.header_written {
            self.write_line("write_csv_header", HEADER)?;
            self.header_written = true;
        }
        Ok(())
    }

    fn write_line(&mut self, operation: &str, line: &str) -> Result<()> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(RECORD_TERMINATOR.as_bytes()))
            .map_err(|e| write_error(operation, &e))
    }
}

impl<W: Write> ExportSink for CsvExportSink<W> {
    fn write(&mut self, entry: &JournalEntry) -> Result<()> {
        self.ensure_header()?;
        self.write_line("write_csv", &encode_record(entry))?;
        self.rows_written += 1;
        Ok(())
    }

    fn finalize(mut self: Box<Self>) -> Result<()> {
        self.ensure_header()?;
        self.writer
            .flush()
            .map_err(|e| write_error("flush_csv", &e))
    }
}

fn write_error(operation: &str, e: &std::io::Error) -> Error {
    Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}

/// CSV import source.
///
/// Validates the header up front, then yields one entry per non-empty data
/// record. Rows are numbered from 1 for the first record after the header.
pub struct CsvImportSource<'a> {
    records: std::vec::IntoIter<&'a str>,
    /// Index of the next data row (1-based).
    next_index: usize,
    total: usize,
}

impl<'a> CsvImportSource<'a> {
    /// Creates an import source over decoded text.
    ///
    /// Empty input and header-only input produce a source with no rows.
    ///
    /// # Errors
    ///
    /// Returns [`ImportError::InvalidHeader`] if the first non-empty record is
    /// not exactly [`HEADER`].
    pub fn new(text: &'a str) -> std::result::Result<Self, ImportError> {
        let mut records: Vec<&str> = split_records(text)
            .into_iter()
            .filter(|r| !r.is_empty())
            .collect();

        if let Some(first) = records.first() {
            if *first != HEADER {
                tracing::debug!(header = %first, "CSV header mismatch");
                return Err(ImportError::InvalidHeader);
            }
            records.remove(0);
        }

        let total = records.len();
        Ok(Self {
            records: records.into_iter(),
            next_index: 1,
            total,
        })
    }

    /// Returns the number of data rows.
    #[must_use]
    pub const fn row_count(&self) -> usize {
        self.total
    }

    /// Converts one scanned record into an entry.
    fn parse_record(
        fields: [String; FIELD_COUNT],
        index: usize,
    ) -> std::result::Result<JournalEntry, ImportError> {
        let [date, treatment, administration, intention, mood_before, mood_after, reflections, url] =
            fields;

        let session_timestamp =
            parse_timestamp(&date).ok_or_else(|| reject(index, "Date", "unrecognized date"))?;
        let treatment_type = TreatmentType::from_display_name(&treatment)
            .ok_or_else(|| reject(index, "Treatment Type", "unknown treatment type"))?;
        let administration_method = AdministrationMethod::from_display_name(&administration)
            .ok_or_else(|| reject(index, "Administration", "unknown administration method"))?;
        let mood_before = parse_mood(&mood_before)
            .ok_or_else(|| reject(index, "Mood Before", "not an integer"))?;
        let mood_after =
            parse_mood(&mood_after).ok_or_else(|| reject(index, "Mood After", "not an integer"))?;

        Ok(JournalEntry {
            id: EntryId::generate(),
            session_timestamp,
            treatment_type,
            administration_method,
            intention: strip_guard(&intention).to_string(),
            mood_before,
            mood_after,
            reflections: strip_guard(&reflections).to_string(),
            music_link: music_link::normalize(&url),
        })
    }
}

impl Iterator for CsvImportSource<'_> {
    type Item = std::result::Result<JournalEntry, ImportError>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        let index = self.next_index;
        self.next_index += 1;

        let parsed = decode_row(record)
            .map_err(|defect| {
                tracing::warn!(row = index, %defect, "Rejected malformed CSV row");
                ImportError::InvalidRow(index)
            })
            .and_then(|fields| Self::parse_record(fields, index));
        Some(parsed)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

fn reject(index: usize, field: &'static str, reason: &'static str) -> ImportError {
    tracing::warn!(row = index, field, reason, "Rejected CSV row");
    ImportError::InvalidRow(index)
}

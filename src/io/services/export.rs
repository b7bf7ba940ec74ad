//! Journal export service.
//!
//! Filters entries and encodes them to the CSV interchange format.

use crate::io::formats::CSV_EXTENSION;
use crate::io::formats::csv::{CsvExportSink, encode_record};
use crate::io::grammar::{HEADER, RECORD_TERMINATOR};
use crate::io::traits::ExportSink;
use crate::models::{JournalEntry, TreatmentType};
use crate::{Error, Result};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use std::io::Write;
use std::path::Path;

/// Inclusive range of session timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl DateRange {
    /// Creates a range covering `start..=end`. Reversed bounds are swapped.
    #[must_use]
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self { start: end, end: start }
        }
    }

    /// Creates a range covering whole calendar days, both ends included.
    ///
    /// The end bound is the last nanosecond of `last`, so sub-second
    /// timestamps late on the final day still match.
    #[must_use]
    pub fn days(first: NaiveDate, last: NaiveDate) -> Self {
        let end_of_day =
            NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
        let (first, last) = if first <= last { (first, last) } else { (last, first) };
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(end_of_day),
        }
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn start(&self) -> NaiveDateTime {
        self.start
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Returns whether `ts` falls inside the range, bounds included.
    #[must_use]
    pub fn contains(&self, ts: &NaiveDateTime) -> bool {
        self.start <= *ts && *ts <= self.end
    }
}

/// Options for journal export.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Keep only sessions inside this range.
    pub date_range: Option<DateRange>,
    /// Keep only sessions of this treatment type.
    pub treatment_type: Option<TreatmentType>,
}

impl ExportOptions {
    /// Sets the date range filter.
    #[must_use]
    pub const fn with_date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Sets the treatment type filter.
    #[must_use]
    pub const fn with_treatment_type(mut self, treatment_type: TreatmentType) -> Self {
        self.treatment_type = Some(treatment_type);
        self
    }

    /// Returns whether `entry` passes every configured filter.
    #[must_use]
    pub fn matches(&self, entry: &JournalEntry) -> bool {
        self.date_range
            .is_none_or(|range| range.contains(&entry.session_timestamp))
            && self
                .treatment_type
                .is_none_or(|t| t == entry.treatment_type)
    }
}

/// Result of an export operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportResult {
    /// Entries written.
    pub exported: usize,
    /// Entries offered before filtering.
    pub total_input: usize,
}

impl ExportResult {
    /// Returns whether any entries were exported.
    #[must_use]
    pub const fn has_exports(&self) -> bool {
        self.exported > 0
    }
}

/// Service for exporting journal entries.
///
/// Stateless: entries come from the caller and leave as CSV. Entries keep
/// their input order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportService;

impl ExportService {
    /// Encodes the entries that pass `options` into a CSV byte buffer.
    ///
    /// An empty selection yields the header line alone.
    #[must_use]
    pub fn encode(entries: &[JournalEntry], options: &ExportOptions) -> Vec<u8> {
        let mut out = String::from(HEADER);
        out.push_str(RECORD_TERMINATOR);

        let mut exported = 0usize;
        for entry in entries.iter().filter(|e| options.matches(e)) {
            out.push_str(&encode_record(entry));
            out.push_str(RECORD_TERMINATOR);
            exported += 1;
        }

        record_export(exported, entries.len());
        out.into_bytes()
    }

    /// Exports filtered entries through a sink.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink fails to write.
    pub fn export_to_sink<'a, I>(
        entries: I,
        sink: &mut dyn ExportSink,
        options: &ExportOptions,
    ) -> Result<ExportResult>
    where
        I: IntoIterator<Item = &'a JournalEntry>,
    {
        let mut result = ExportResult {
            exported: 0,
            total_input: 0,
        };

        for entry in entries {
            result.total_input += 1;
            if !options.matches(entry) {
                continue;
            }
            sink.write(entry)?;
            result.exported += 1;
        }

        record_export(result.exported, result.total_input);
        Ok(result)
    }

    /// Exports filtered entries as CSV to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing fails.
    pub fn export_to_writer<W: Write>(
        writer: W,
        entries: &[JournalEntry],
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let mut sink = CsvExportSink::new(writer);
        let result = Self::export_to_sink(entries, &mut sink, options)?;
        Box::new(sink).finalize()?;
        Ok(result)
    }

    /// Exports filtered entries as CSV to a file, replacing it if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn export_to_file(
        path: &Path,
        entries: &[JournalEntry],
        options: &ExportOptions,
    ) -> Result<ExportResult> {
        let file = std::fs::File::create(path).map_err(|e| Error::OperationFailed {
            operation: "create_export_file".to_string(),
            cause: format!("{}: {e}", path.display()),
        })?;
        let result = Self::export_to_writer(std::io::BufWriter::new(file), entries, options)?;
        tracing::info!(path = %path.display(), exported = result.exported, "Wrote journal export");
        Ok(result)
    }

    /// Returns the default file name for an export made on `date`.
    #[must_use]
    pub fn suggested_file_name(date: NaiveDate) -> String {
        format!("Journal_Export_{}.{CSV_EXTENSION}", date.format("%Y-%m-%d"))
    }
}

fn record_export(exported: usize, total_input: usize) {
    metrics::counter!("journal_csv_rows_exported_total").increment(exported as u64);
    tracing::debug!(exported, total_input, "Encoded journal entries as CSV");
}

//! Field grammar for the journal CSV dialect.
//!
//! One fixed dialect: comma separator, double-quote quoting, `""` as the
//! escaped quote, `\n` written as the record terminator. Free-text fields are
//! protected against spreadsheet formula execution with a leading apostrophe.
//!
//! Records are scanned by hand rather than split on commas so that quoted
//! commas, quotes and line breaks survive as field content.

use std::borrow::Cow;

/// Canonical header line. Decoding requires a byte-for-byte match.
pub const HEADER: &str =
    "Date,Treatment Type,Administration,Intention,Mood Before,Mood After,Reflections,Music Link URL";

/// Terminator written after every record, including the header.
pub const RECORD_TERMINATOR: &str = "\n";

/// Number of fields in every record.
pub const FIELD_COUNT: usize = 8;

/// Prefix that neutralizes formula execution in spreadsheet consumers.
pub const GUARD: char = '\'';

/// Leading characters that spreadsheets interpret as a formula.
const FORMULA_TRIGGERS: [char; 4] = ['=', '+', '-', '@'];

/// Structural defect found while scanning a single record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowDefect {
    /// A quoted field was never closed.
    #[error("unterminated quoted field")]
    UnterminatedQuote,
    /// A double quote appeared inside an unquoted field.
    #[error("unexpected quote in unquoted field {0}")]
    UnexpectedQuote(usize),
    /// Text followed a closing quote before the next separator.
    #[error("characters after closing quote in field {0}")]
    TrailingCharacters(usize),
    /// The record did not contain exactly [`FIELD_COUNT`] fields.
    #[error("expected 8 fields, found {0}")]
    FieldCount(usize),
}

/// Prepends the guard apostrophe when `value` starts with a formula trigger.
#[must_use]
pub fn guard_formula(value: &str) -> Cow<'_, str> {
    if value.starts_with(FORMULA_TRIGGERS) {
        Cow::Owned(format!("{GUARD}{value}"))
    } else {
        Cow::Borrowed(value)
    }
}

/// Removes a single leading guard apostrophe.
///
/// A leading `'` is always treated as a guard artifact, so text that genuinely
/// began with an apostrophe loses it on import.
#[must_use]
pub fn strip_guard(value: &str) -> &str {
    value.strip_prefix(GUARD).unwrap_or(value)
}

/// Returns whether `value` must be wrapped in quotes.
///
/// Empty values are quoted so a present-but-empty field is never confused with
/// a missing column.
#[must_use]
pub fn needs_quoting(value: &str) -> bool {
    value.is_empty() || value.contains([',', '"', '\r', '\n'])
}

/// Quotes `value` if required, doubling embedded quotes.
#[must_use]
pub fn quote_field(value: &str) -> Cow<'_, str> {
    if !needs_quoting(value) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' {
            out.push('"');
        }
        out.push(c);
    }
    out.push('"');
    Cow::Owned(out)
}

/// Encodes a free-text value: formula guard first, then quoting.
#[must_use]
pub fn encode_text_field(value: &str) -> String {
    quote_field(&guard_formula(value)).into_owned()
}

/// Joins already-encoded fields into one record, without the terminator.
#[must_use]
pub fn join_record(fields: &[&str]) -> String {
    fields.join(",")
}

/// Splits text into raw records.
///
/// `\r\n`, a lone `\r` and `\n` all end a record when they occur outside a
/// quoted field. Line breaks inside quotes are kept verbatim as content. A
/// trailing terminator does not produce an extra record; blank lines yield
/// empty records, which callers skip.
#[must_use]
pub fn split_records(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut records = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' => in_quotes = !in_quotes,
            b'\r' | b'\n' if !in_quotes => {
                records.push(&text[start..i]);
                if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                    i += 1;
                }
                start = i + 1;
            },
            _ => {},
        }
        i += 1;
    }

    if start < bytes.len() {
        records.push(&text[start..]);
    }
    records
}

/// Scans one record into exactly [`FIELD_COUNT`] unescaped fields.
///
/// Guard apostrophes are left in place; stripping is a per-column decision
/// made by the decoder.
///
/// # Errors
///
/// Returns a [`RowDefect`] for unterminated quotes, stray quotes, text after a
/// closing quote, or a field count other than [`FIELD_COUNT`].
pub fn decode_row(record: &str) -> Result<[String; FIELD_COUNT], RowDefect> {
    let mut fields: Vec<String> = Vec::with_capacity(FIELD_COUNT);
    let mut chars = record.chars().peekable();

    'fields: loop {
        let index = fields.len() + 1;
        let mut field = String::new();

        if chars.next_if_eq(&'"').is_some() {
            loop {
                match chars.next() {
                    None => return Err(RowDefect::UnterminatedQuote),
                    Some('"') if chars.next_if_eq(&'"').is_some() => field.push('"'),
                    Some('"') => break,
                    Some(c) => field.push(c),
                }
            }
            fields.push(field);
            match chars.next() {
                None => break 'fields,
                Some(',') => continue 'fields,
                Some(_) => return Err(RowDefect::TrailingCharacters(index)),
            }
        }

        loop {
            match chars.next() {
                None => {
                    fields.push(field);
                    break 'fields;
                },
                Some(',') => {
                    fields.push(field);
                    continue 'fields;
                },
                Some('"') => return Err(RowDefect::UnexpectedQuote(index)),
                Some(c) => field.push(c),
            }
        }
    }

    <[String; FIELD_COUNT]>::try_from(fields).map_err(|f| RowDefect::FieldCount(f.len()))
}

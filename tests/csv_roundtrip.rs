//! CSV interchange integration tests.
//!
//! Exercises the public encode/decode surface end to end:
//! - Round trip of every column
//! - Empty and header-only files
//! - Quoting, embedded line breaks and the formula guard
//! - Strict date, vocabulary and mood validation with accurate row indices
//! - Music link normalization
//! - Interoperability with an independent CSV reader

// Integration tests use expect/unwrap for simplicity - panics are acceptable in tests
#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use session_journal::io::HEADER;
use session_journal::{
    AdministrationMethod, ExportOptions, ExportService, ImportError, ImportService, JournalEntry,
    MusicLink, MusicProvider, TreatmentType,
};
use test_case::test_case;

// ============================================================================
// Test Helpers
// ============================================================================

fn ts(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, day)
        .and_then(|d| d.and_hms_opt(hour, minute, 0))
        .unwrap()
}

fn entry(intention: &str) -> JournalEntry {
    JournalEntry::new(ts(1, 10, 30), TreatmentType::Psilocybin, AdministrationMethod::Oral)
        .with_intention(intention)
}

fn encode(entries: &[JournalEntry]) -> Vec<u8> {
    ExportService::encode(entries, &ExportOptions::default())
}

fn decode_text(text: &str) -> Result<Vec<JournalEntry>, ImportError> {
    ImportService::decode(text.as_bytes())
}

/// Builds a file from the header and raw data rows joined by `\n`.
fn file_with_rows(rows: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    text.push('\n');
    text
}

const GOOD_ROW: &str = "\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,Intent,4,8,Reflect,";

// ============================================================================
// Round Trip
// ============================================================================

#[test]
fn test_round_trip_preserves_every_column() {
    let entries = vec![
        JournalEntry::new(ts(1, 22, 5), TreatmentType::Lsd, AdministrationMethod::Sublingual)
            .with_intention("Let go, \"see\" clearly")
            .with_reflections("Line1\nLine2\r\nLine3")
            .with_moods(3, 9)
            .with_music_link(MusicLink {
                url: "https://open.spotify.com/playlist/xyz".to_string(),
                provider: MusicProvider::Spotify,
            }),
        JournalEntry::new(ts(2, 0, 0), TreatmentType::Other, AdministrationMethod::Other)
            .with_moods(-4, 15),
        JournalEntry::new(ts(3, 12, 59), TreatmentType::Mdma, AdministrationMethod::Oral)
            .with_intention("=SUM(A1:A3)")
            .with_reflections("@mention +plus -minus")
            .with_music_link(MusicLink {
                url: "https://example.com/music".to_string(),
                provider: MusicProvider::LinkOnly,
            }),
    ];

    let decoded = ImportService::decode(&encode(&entries)).unwrap();
    assert_eq!(decoded.len(), entries.len());

    for (original, restored) in entries.iter().zip(&decoded) {
        assert_eq!(restored.session_timestamp, original.session_timestamp);
        assert_eq!(restored.treatment_type, original.treatment_type);
        assert_eq!(restored.administration_method, original.administration_method);
        assert_eq!(restored.intention, original.intention);
        assert_eq!(restored.mood_before, original.mood_before);
        assert_eq!(restored.mood_after, original.mood_after);
        assert_eq!(restored.reflections, original.reflections);
        assert_eq!(restored.music_link, original.music_link);
    }
}

#[test]
fn test_round_trip_truncates_to_minutes() {
    let with_seconds = NaiveDate::from_ymd_opt(2024, 6, 1)
        .and_then(|d| d.and_hms_opt(18, 15, 42))
        .unwrap();
    let original = JournalEntry::new(with_seconds, TreatmentType::Dmt, AdministrationMethod::Smoked);

    let decoded = ImportService::decode(&encode(&[original])).unwrap();
    assert_eq!(decoded[0].session_timestamp, with_seconds.with_second(0).unwrap());
}

#[test]
fn test_decoded_entries_get_fresh_ids() {
    let original = entry("same");
    let decoded = ImportService::decode(&encode(std::slice::from_ref(&original))).unwrap();
    assert_ne!(decoded[0].id, original.id);
}

// ============================================================================
// Empty Input
// ============================================================================

#[test_case("" ; "empty buffer")]
#[test_case(HEADER ; "header without newline")]
#[test_case("Date,Treatment Type,Administration,Intention,Mood Before,Mood After,Reflections,Music Link URL\n" ; "header with newline")]
#[test_case("Date,Treatment Type,Administration,Intention,Mood Before,Mood After,Reflections,Music Link URL\r\n\r\n" ; "header with blank lines")]
fn test_empty_inputs_decode_to_nothing(text: &str) {
    assert_eq!(decode_text(text).unwrap(), Vec::new());
}

#[test]
fn test_empty_export_is_header_only() {
    assert_eq!(encode(&[]), format!("{HEADER}\n").into_bytes());
}

// ============================================================================
// Quoting and Formula Guard
// ============================================================================

#[test_case("Hello, \"World\"" ; "comma and quotes")]
#[test_case("Line1\nLine2" ; "line feed")]
#[test_case("a\r\nb\rc" ; "mixed breaks")]
#[test_case("" ; "empty")]
#[test_case("   padded   " ; "whitespace")]
#[test_case("caf\u{e9} \u{1f344}" ; "non ascii")]
fn test_text_fields_round_trip(text: &str) {
    let original = entry(text).with_reflections(text);
    let decoded = ImportService::decode(&encode(&[original])).unwrap();
    assert_eq!(decoded[0].intention, text);
    assert_eq!(decoded[0].reflections, text);
}

#[test_case("=HYPERLINK(\"evil\")" ; "equals")]
#[test_case("@bad" ; "at")]
#[test_case("+cmd" ; "plus")]
#[test_case("-2-2" ; "minus")]
fn test_formula_guard(text: &str) {
    let bytes = encode(&[entry(text)]);
    let out = String::from_utf8(bytes.clone()).unwrap();
    let row = out.lines().nth(1).unwrap();
    let intention = row.split(',').nth(4).unwrap().trim_start_matches('"');
    assert!(intention.starts_with(&format!("'{}", &text[..1])), "row was {row}");

    let decoded = ImportService::decode(&bytes).unwrap();
    assert_eq!(decoded[0].intention, text);
}

#[test]
fn test_guarded_field_is_written_bare() {
    let sample = entry("=not a formula")
        .with_moods(4, 8)
        .with_reflections("Line1\nLine2")
        .with_music_link(MusicLink {
            url: "https://open.spotify.com/track/abc".to_string(),
            provider: MusicProvider::Spotify,
        });
    let out = String::from_utf8(encode(&[sample])).unwrap();
    let expected = "\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,'=not a formula,4,8,\"Line1\nLine2\",https://open.spotify.com/track/abc";
    assert!(out.contains(expected), "export was {out}");
}

#[test]
fn test_leading_apostrophe_is_lost() {
    let decoded = ImportService::decode(&encode(&[entry("'quoted'")])).unwrap();
    assert_eq!(decoded[0].intention, "quoted'");
}

// ============================================================================
// Validation
// ============================================================================

#[test_case("5.5" ; "decimal")]
#[test_case("abc" ; "alphabetic")]
#[test_case("" ; "empty")]
#[test_case(" 5" ; "leading space")]
#[test_case("+5" ; "plus sign")]
#[test_case("99999999999999999999" ; "overflow")]
fn test_invalid_mood_rejected(mood: &str) {
    let bad = format!("\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,,{mood},5,,");
    let text = file_with_rows(&[GOOD_ROW, &bad]);
    assert_eq!(decode_text(&text), Err(ImportError::InvalidRow(2)));
}

#[test_case("0", 0 ; "zero")]
#[test_case("-5", -5 ; "negative")]
#[test_case("15", 15 ; "above scale")]
#[test_case("3000000000", 3_000_000_000 ; "beyond 32 bits")]
#[test_case("-3000000000", -3_000_000_000 ; "negative beyond 32 bits")]
fn test_out_of_scale_moods_accepted(token: &str, expected: i64) {
    let row = format!("\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,,{token},{token},,");
    let decoded = decode_text(&file_with_rows(&[&row])).unwrap();
    assert_eq!(decoded[0].mood_before, expected);
    assert_eq!(decoded[0].mood_after, expected);
}

#[test_case("psilocybin" ; "wrong case")]
#[test_case("Coffee" ; "unknown")]
#[test_case("" ; "empty")]
fn test_unknown_treatment_rejected(name: &str) {
    let row = format!("\"Dec 1, 2024 at 10:30 AM\",{name},Oral,,5,5,,");
    assert_eq!(
        decode_text(&file_with_rows(&[&row])),
        Err(ImportError::InvalidRow(1))
    );
}

#[test]
fn test_display_names_accepted() {
    for treatment in TreatmentType::all() {
        for method in AdministrationMethod::all() {
            let row = format!(
                "\"Dec 1, 2024 at 10:30 AM\",{},{},,5,5,,",
                treatment.display_name(),
                method.display_name()
            );
            let decoded = decode_text(&file_with_rows(&[&row])).unwrap();
            assert_eq!(decoded[0].treatment_type, *treatment);
            assert_eq!(decoded[0].administration_method, *method);
        }
    }
}

#[test_case("2024-12-01" ; "iso date")]
#[test_case("Dec 01, 2024 at 10:30 AM" ; "zero padded day")]
#[test_case("December 1, 2024 at 10:30 AM" ; "full month")]
#[test_case("Dec 1, 2024 at 22:30" ; "24 hour clock")]
#[test_case("Feb 30, 2024 at 10:30 AM" ; "impossible day")]
fn test_foreign_date_formats_rejected(date: &str) {
    let row = format!("\"{date}\",Psilocybin,Oral,,5,5,,");
    assert_eq!(
        decode_text(&file_with_rows(&[&row])),
        Err(ImportError::InvalidRow(1))
    );
}

#[test]
fn test_header_mismatch() {
    let text = "date,Treatment Type,Administration,Intention,Mood Before,Mood After,Reflections,Music Link URL\n";
    assert_eq!(decode_text(text), Err(ImportError::InvalidHeader));
    assert_eq!(
        decode_text(&format!("\u{feff}{HEADER}\n")),
        Err(ImportError::InvalidHeader)
    );
}

#[test_case("\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,a,5,5,b" ; "too few fields")]
#[test_case("\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,a,5,5,b,,extra" ; "too many fields")]
#[test_case("\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,\"open,5,5,b," ; "unterminated quote")]
#[test_case("\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,a\"b,5,5,b," ; "stray quote")]
fn test_structural_defects(row: &str) {
    let text = file_with_rows(&[GOOD_ROW, row, GOOD_ROW]);
    assert_eq!(decode_text(&text), Err(ImportError::InvalidRow(2)));
}

#[test]
fn test_row_index_counts_data_rows_only() {
    let bad = "\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,,x,5,,";
    let text = format!("{HEADER}\n\n{GOOD_ROW}\n\n{bad}\n{GOOD_ROW}\n");
    assert_eq!(decode_text(&text), Err(ImportError::InvalidRow(2)));
}

#[test]
fn test_non_utf8_is_parse_failure() {
    let mut bytes = format!("{HEADER}\n").into_bytes();
    bytes.extend_from_slice(b"\xc3\x28,Psilocybin");
    assert!(matches!(
        ImportService::decode(&bytes),
        Err(ImportError::ParseFailure(reason)) if reason.contains("not valid UTF-8")
    ));
}

// ============================================================================
// Music Links
// ============================================================================

#[test]
fn test_music_link_normalization() {
    let rows = [
        "\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,,5,5,,open.spotify.com/track/abc",
        "\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,,5,5,,https://example.com/music",
        "\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,,5,5,,",
        "\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,,5,5,,'https://youtu.be/abc",
        "\"Dec 1, 2024 at 10:30 AM\",Psilocybin,Oral,,5,5,,spotify:track:abc",
    ];
    let decoded = decode_text(&file_with_rows(&rows)).unwrap();

    let spotify = decoded[0].music_link.as_ref().unwrap();
    assert_eq!(spotify.provider, MusicProvider::Spotify);
    assert_eq!(spotify.url, "https://open.spotify.com/track/abc");

    let other = decoded[1].music_link.as_ref().unwrap();
    assert_eq!(other.provider, MusicProvider::LinkOnly);
    assert_eq!(other.url, "https://example.com/music");

    assert!(decoded[2].music_link.is_none());

    let youtube = decoded[3].music_link.as_ref().unwrap();
    assert_eq!(youtube.provider, MusicProvider::YouTube);
    assert_eq!(youtube.url, "https://youtu.be/abc");

    let uri = decoded[4].music_link.as_ref().unwrap();
    assert_eq!(uri.provider, MusicProvider::Spotify);
    assert_eq!(uri.url, "spotify:track:abc");
}

// ============================================================================
// Line Endings
// ============================================================================

#[test]
fn test_mixed_line_endings() {
    let text = format!("{HEADER}\r\n{GOOD_ROW}\r{GOOD_ROW}\n{GOOD_ROW}\r\n");
    let decoded = decode_text(&text).unwrap();
    assert_eq!(decoded.len(), 3);
    assert!(decoded.iter().all(|e| e.intention == "Intent"));
}

#[test]
fn test_missing_trailing_newline() {
    let text = format!("{HEADER}\n{GOOD_ROW}");
    assert_eq!(decode_text(&text).unwrap().len(), 1);
}

// ============================================================================
// Interoperability
// ============================================================================

#[test]
fn test_export_readable_by_standard_csv_reader() {
    let entries: Vec<JournalEntry> = (1..=8)
        .map(|day| {
            JournalEntry::new(ts(day, 9, 0), TreatmentType::Ketamine, AdministrationMethod::Nasal)
                .with_intention(format!("day {day}, \"quoted\""))
                .with_reflections("multi\nline")
        })
        .collect();
    let bytes = encode(&entries);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_reader(bytes.as_slice());
    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();

    assert_eq!(records.len(), 9);
    assert!(records.iter().all(|r| r.len() == 8));
    assert_eq!(records[0].iter().collect::<Vec<_>>().join(","), HEADER);
    assert_eq!(&records[1][0], "Dec 1, 2024 at 9:00 AM");
    assert_eq!(&records[1][1], "Ketamine");
    assert_eq!(&records[1][3], "day 1, \"quoted\"");
    assert_eq!(&records[1][6], "multi\nline");
}

#[test]
fn test_decode_file_written_by_standard_csv_writer() {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADER.split(','))
        .unwrap();
    writer
        .write_record([
            "Jan 15, 2025 at 7:05 PM",
            "Ayahuasca",
            "Oral",
            "a, b",
            "2",
            "7",
            "say \"hi\"",
            "https://soundcloud.com/x",
        ])
        .unwrap();
    let bytes = writer.into_inner().unwrap();

    let decoded = ImportService::decode(&bytes).unwrap();
    assert_eq!(decoded.len(), 1);
    assert_eq!(decoded[0].treatment_type, TreatmentType::Ayahuasca);
    assert_eq!(decoded[0].intention, "a, b");
    assert_eq!(decoded[0].reflections, "say \"hi\"");
    assert_eq!(
        decoded[0].music_link.as_ref().map(|l| l.provider),
        Some(MusicProvider::SoundCloud)
    );
}

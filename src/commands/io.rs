//! Import and export command handlers.

use std::path::PathBuf;

use super::{open_store, parse_date, parse_treatment};
use session_journal::io::DateRange;
use session_journal::io::formats::csv::format_timestamp;
use session_journal::io::formats::has_csv_extension;
use session_journal::{
    EntryStore, Error, ExportOptions, ExportService, ImportError, ImportService, JournalConfig,
    Result,
};

/// Executes the import command.
///
/// Without `yes`, the file is decoded and summarized but nothing is merged.
pub fn cmd_import(config: &JournalConfig, file: PathBuf, yes: bool) -> Result<()> {
    if !has_csv_extension(&file) {
        tracing::warn!(path = %file.display(), "Import file does not have a .csv extension");
    }

    let pending = ImportService::import_from_file(&file).map_err(explain_import_error)?;

    if pending.is_empty() {
        println!("No entries found in {}", file.display());
        pending.discard();
        return Ok(());
    }

    println!("Found {} entries in {}:", pending.len(), file.display());
    for entry in pending.entries().iter().take(10) {
        println!(
            "  {}  {} ({})",
            format_timestamp(&entry.session_timestamp),
            entry.treatment_type,
            entry.administration_method,
        );
    }
    if pending.len() > 10 {
        println!("  ... and {} more", pending.len() - 10);
    }

    if !yes {
        println!();
        println!("Dry run completed (no changes made). Re-run with --yes to import.");
        pending.discard();
        return Ok(());
    }

    let mut store = open_store(config);
    let inserted = pending.confirm(&mut store)?;
    println!();
    println!("Imported {inserted} entries into {}", store.path().display());
    Ok(())
}

/// Executes the export command.
pub fn cmd_export(
    config: &JournalConfig,
    output: Option<PathBuf>,
    from: Option<String>,
    to: Option<String>,
    treatment: Option<String>,
) -> Result<()> {
    let mut options = ExportOptions::default();
    match (from.as_deref(), to.as_deref()) {
        (None, None) => {},
        (first, last) => {
            let first = first.map(parse_date).transpose()?.unwrap_or(chrono::NaiveDate::MIN);
            let last = last.map(parse_date).transpose()?.unwrap_or(chrono::NaiveDate::MAX);
            options = options.with_date_range(DateRange::days(first, last));
        },
    }
    if let Some(t) = treatment.as_deref() {
        options = options.with_treatment_type(parse_treatment(t)?);
    }

    let entries = open_store(config).list()?;

    if output.as_deref().is_some_and(|p| p.as_os_str() == "-") {
        let stdout = std::io::stdout();
        let result = ExportService::export_to_writer(stdout.lock(), &entries, &options)?;
        tracing::debug!(exported = result.exported, "Exported to stdout");
        return Ok(());
    }

    let path = output.unwrap_or_else(|| {
        PathBuf::from(ExportService::suggested_file_name(
            chrono::Local::now().date_naive(),
        ))
    });
    if !has_csv_extension(&path) {
        return Err(Error::InvalidInput(format!(
            "Export file must end in .csv: {}",
            path.display()
        )));
    }

    let result = ExportService::export_to_file(&path, &entries, &options)?;

    println!("Export completed:");
    println!("  Exported:        {}", result.exported);
    println!("  Total in journal:{}", result.total_input);
    println!("  Output file:     {}", path.display());
    if !result.has_exports() {
        println!();
        println!("No entries matched; the file contains the header only.");
    }

    Ok(())
}

/// Adds a user-facing hint to decoder failures.
fn explain_import_error(err: Error) -> Error {
    match err {
        Error::Import(ImportError::InvalidHeader) => Error::InvalidInput(
            "This file is not a journal export: the header line does not match".to_string(),
        ),
        Error::Import(ImportError::InvalidRow(row)) => Error::InvalidInput(format!(
            "Row {row} is malformed or has an invalid value; nothing was imported"
        )),
        Error::Import(ImportError::ParseFailure(reason)) => {
            Error::InvalidInput(format!("Could not read the file: {reason}"))
        },
        other => other,
    }
}

//! CSV interchange for journal entries.
//!
//! Provides a matched encoder/decoder pair over one fixed, single-dialect CSV
//! layout that spreadsheets can open safely and that restores entries
//! losslessly.
//!
//! # Architecture
//!
//! - [`grammar`]: quoting, escaping, the formula-injection guard, the
//!   canonical header and the quote-aware record scanner
//! - [`music_link`]: URL normalization and provider classification
//! - [`formats::csv`]: the column layout, date format and per-field validation
//! - **Services** orchestrate filtering, file access and staged imports
//!
//! # Wire format
//!
//! | Column | Encoding |
//! |--------|----------|
//! | Date | `Dec 1, 2024 at 10:30 AM` |
//! | Treatment Type | display name, exact match on import |
//! | Administration | display name, exact match on import |
//! | Intention | free text, guarded and quoted |
//! | Mood Before | bare integer |
//! | Mood After | bare integer |
//! | Reflections | free text, guarded and quoted |
//! | Music Link URL | URL or empty |
//!
//! # Examples
//!
//! ```rust,ignore
//! use session_journal::io::{ExportOptions, ExportService, ImportService};
//!
//! let bytes = ExportService::encode(&entries, &ExportOptions::default());
//! let pending = ImportService::stage(&bytes)?;
//! pending.confirm(&mut store)?;
//! ```

pub mod formats;
pub mod grammar;
pub mod music_link;
pub mod services;
pub mod traits;

// Re-exports for convenience
pub use grammar::HEADER;
pub use services::export::{DateRange, ExportOptions, ExportResult, ExportService};
pub use services::import::{ImportService, PendingImport};
pub use traits::ExportSink;

//! Entry command handlers.

use super::{open_store, parse_datetime, parse_method, parse_treatment};
use session_journal::io::formats::csv::format_timestamp;
use session_journal::io::music_link;
use session_journal::{EntryStore, Error, JournalConfig, JournalEntry, Result};

/// Arguments for the add command.
#[derive(Debug, Default)]
pub struct AddArgs {
    /// Session timestamp; now when absent.
    pub at: Option<String>,
    /// Treatment type name.
    pub treatment: String,
    /// Administration method name.
    pub method: String,
    /// Intention text.
    pub intention: Option<String>,
    /// Reflections text.
    pub reflections: Option<String>,
    /// Mood before the session.
    pub mood_before: i64,
    /// Mood after the session.
    pub mood_after: i64,
    /// Music link.
    pub music: Option<String>,
}

/// Executes the add command.
pub fn cmd_add(config: &JournalConfig, args: AddArgs) -> Result<()> {
    let timestamp = match args.at.as_deref() {
        Some(raw) => parse_datetime(raw)?,
        None => chrono::Local::now().naive_local(),
    };
    let treatment = parse_treatment(&args.treatment)?;
    let method = parse_method(&args.method)?;

    let mut entry = JournalEntry::new(timestamp, treatment, method)
        .with_moods(args.mood_before, args.mood_after);
    if let Some(intention) = args.intention {
        entry = entry.with_intention(intention);
    }
    if let Some(reflections) = args.reflections {
        entry = entry.with_reflections(reflections);
    }
    if let Some(raw) = args.music.as_deref() {
        let link = music_link::normalize(raw)
            .ok_or_else(|| Error::InvalidInput("Music link must not be empty".to_string()))?;
        entry = entry.with_music_link(link);
    }

    let id = entry.id.clone();
    let mut store = open_store(config);
    store.insert(entry)?;

    println!("Added entry {id}");
    Ok(())
}

/// Executes the list command.
pub fn cmd_list(config: &JournalConfig, limit: Option<usize>) -> Result<()> {
    let store = open_store(config);
    let mut entries = store.list()?;
    entries.sort_by(|a, b| b.session_timestamp.cmp(&a.session_timestamp));

    if entries.is_empty() {
        println!("No entries in {}", store.path().display());
        return Ok(());
    }

    let shown = limit.unwrap_or(entries.len());
    for entry in entries.iter().take(shown) {
        println!(
            "{}  {:<10} {:<13} mood {:>2} -> {:>2} ({:+})  {}",
            format_timestamp(&entry.session_timestamp),
            entry.treatment_type.display_name(),
            entry.administration_method.display_name(),
            entry.mood_before,
            entry.mood_after,
            entry.mood_delta(),
            first_line(&entry.intention),
        );
        if let Some(link) = &entry.music_link {
            println!("    {}: {}", link.provider, link.url);
        }
    }
    if shown < entries.len() {
        println!("... and {} more", entries.len() - shown);
    }

    Ok(())
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or_default()
}

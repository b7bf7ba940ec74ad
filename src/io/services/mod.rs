//! Import/export services.

pub mod export;
pub mod import;

//! Background services for the folio binary.

pub mod theme_watcher;

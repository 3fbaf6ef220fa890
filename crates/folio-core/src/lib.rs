//! Core library for folio.
//!
//! This crate contains the theme engine shared by the `folio` binary and any
//! embedding host: the theme model, undo history, presets, random generators,
//! contrast math, render-target sync and the background renderer adapter.

pub mod background;
pub mod color;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod presets;
pub mod randomizer;
pub mod render;
pub mod store;
pub mod theme;

pub use background::{BackgroundEffect, BackgroundHost, BackgroundRenderer, VantaConfig};
pub use color::Hsl;
pub use config::{ConfigLoadResult, DEFAULT_CONFIG_TOML, EngineConfig};
pub use error::{Error, Result};
pub use history::{Clock, ManualClock, SystemClock};
pub use render::{CssVariables, PageBackground, RenderTarget};
pub use store::{FilePersistence, ThemePersistence, ThemeStore};
pub use theme::Theme;

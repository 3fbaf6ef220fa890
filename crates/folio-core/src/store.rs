//! The theme store: single owner of the canonical theme.
//!
//! Every mutation goes through a [`ThemeStore`] method. After each change the
//! store pushes the theme into its render target, reschedules the history
//! snapshot and, when configured, writes the theme through to persistence.
//! Time only moves when the host calls [`ThemeStore::tick`].

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::background::VantaConfig;
use crate::color::{ContrastCheck, Hsl, WcagLevel, check_combination};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::history::{Clock, SnapshotDebounce, SystemClock, ThemeHistory};
use crate::presets;
use crate::randomizer;
use crate::render::{RenderOptions, RenderTarget, sync_theme_with};
use crate::theme::{
    BackdropFilterUpdate, BackgroundUpdate, ColorsUpdate, EffectsUpdate, FontsUpdate,
    SpacingUpdate, Theme,
};

/// Storage for the serialized theme between sessions.
pub trait ThemePersistence {
    /// Stored JSON for `key`, or `None` if nothing was saved yet.
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, json: &str) -> Result<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FilePersistence {
    directory: PathBuf,
}

impl FilePersistence {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.directory.join(format!("{key}.json"))
    }
}

impl ThemePersistence for FilePersistence {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn save(&mut self, key: &str, json: &str) -> Result<()> {
        std::fs::create_dir_all(&self.directory)?;
        std::fs::write(self.path_for(key), json)?;
        Ok(())
    }
}

/// Contrast of one theme color against the page background.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastEntry {
    pub role: &'static str,
    pub color: Hsl,
    pub check: ContrastCheck,
}

pub struct ThemeStore<T: RenderTarget> {
    theme: Theme,
    target: T,
    render_options: RenderOptions,
    history: ThemeHistory,
    debounce: SnapshotDebounce,
    clock: Box<dyn Clock>,
    rng: StdRng,
    persistence: Option<Box<dyn ThemePersistence>>,
    persistence_key: String,
    active_preset: Option<String>,
}

impl<T: RenderTarget> ThemeStore<T> {
    /// Store holding the default theme, already synced into `target`.
    ///
    /// When persistence is enabled in `config`, a previously saved theme is
    /// restored from the configured directory.
    pub fn new(config: &EngineConfig, target: T) -> Self {
        let rng = match config.randomizer.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let mut store = Self {
            theme: Theme::default(),
            target,
            render_options: config.render.options(),
            history: ThemeHistory::new(config.history.max_entries),
            debounce: SnapshotDebounce::new(config.history.debounce()),
            clock: Box::new(SystemClock),
            rng,
            persistence: None,
            persistence_key: config.persistence.key.clone(),
            active_preset: Some("default".to_string()),
        };

        store.sync();
        store.history.save_state(store.theme.clone());

        if config.persistence.enabled {
            match config.persistence.data_dir() {
                Some(dir) => store = store.with_persistence(FilePersistence::new(dir)),
                None => tracing::warn!("Persistence enabled but no storage directory resolved"),
            }
        }

        store
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Reseed the randomizer for reproducible output.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Attach a persistence backend and restore the theme saved under the
    /// configured key, if any. A stored theme that fails to parse or validate
    /// is logged and ignored.
    pub fn with_persistence(mut self, backend: impl ThemePersistence + 'static) -> Self {
        match backend.load(&self.persistence_key) {
            Ok(Some(json)) => match parse_theme(&json) {
                Ok(theme) => {
                    tracing::info!("Restored saved theme '{}'", self.persistence_key);
                    self.theme = theme;
                    self.active_preset = None;
                    self.history.clear_history();
                    self.history.save_state(self.theme.clone());
                    self.debounce.cancel();
                    self.sync();
                }
                Err(e) => {
                    tracing::warn!("Ignoring saved theme '{}': {}", self.persistence_key, e);
                }
            },
            Ok(None) => {}
            Err(e) => tracing::warn!("Failed to read saved theme: {}", e),
        }
        self.persistence = Some(Box::new(backend));
        self
    }

    // ===== Accessors =====

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn history_count(&self) -> usize {
        self.history.history_count()
    }

    /// Id of the preset the theme still matches, if any.
    pub fn active_preset(&self) -> Option<&str> {
        self.active_preset.as_deref()
    }

    pub fn has_pending_snapshot(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Primary, secondary and accent checked against the page start color.
    pub fn contrast_report(&self) -> Vec<ContrastEntry> {
        let colors = &self.theme.colors;
        let background = colors.background.start;
        [
            ("primary", colors.primary),
            ("secondary", colors.secondary),
            ("accent", colors.accent),
        ]
        .into_iter()
        .map(|(role, color)| ContrastEntry {
            role,
            color,
            check: check_combination(color, background, WcagLevel::Aa, false),
        })
        .collect()
    }

    // ===== Updates =====

    pub fn update_fonts(&mut self, update: FontsUpdate) {
        update.apply_to(&mut self.theme.fonts);
        self.active_preset = None;
        tracing::debug!("Updated fonts");
        self.commit();
    }

    pub fn update_colors(&mut self, update: ColorsUpdate) {
        update.apply_to(&mut self.theme.colors);
        self.active_preset = None;
        tracing::debug!("Updated colors");
        self.commit();
    }

    pub fn update_spacing(&mut self, update: SpacingUpdate) {
        update.apply_to(&mut self.theme.spacing);
        tracing::debug!("Updated spacing");
        self.commit();
    }

    pub fn update_effects(&mut self, update: EffectsUpdate) {
        update.apply_to(&mut self.theme.effects);
        self.active_preset = None;
        tracing::debug!("Updated effects");
        self.commit();
    }

    pub fn update_background(&mut self, update: BackgroundUpdate) {
        update.apply_to(&mut self.theme.background);
        tracing::debug!("Updated background ({})", self.theme.background.effect());
        self.commit();
    }

    pub fn update_backdrop_filter(&mut self, update: BackdropFilterUpdate) {
        update.apply_to(&mut self.theme.background.backdrop_filter);
        tracing::debug!("Updated backdrop filter");
        self.commit();
    }

    /// Replace the effect configuration wholesale. The configuration's own
    /// effect becomes the selected effect.
    pub fn update_vanta_config(&mut self, config: VantaConfig) {
        self.theme.background.vanta = config;
        tracing::debug!("Replaced {} configuration", self.theme.background.effect());
        self.commit();
    }

    /// Back to the default theme with a fresh history.
    pub fn reset_theme(&mut self) {
        self.theme = Theme::default();
        self.active_preset = Some("default".to_string());
        self.history.clear_history();
        self.debounce.cancel();
        self.history.save_state(self.theme.clone());
        tracing::info!("Reset theme to defaults");
        self.sync();
        self.persist();
    }

    /// Load a preset onto every branch except the background. Unknown ids
    /// leave the theme untouched and return `false`.
    pub fn load_preset(&mut self, id: &str) -> bool {
        let Some(preset) = presets::find(id) else {
            tracing::debug!("Ignoring unknown preset '{}'", id);
            return false;
        };
        preset.apply_to(&mut self.theme);
        self.active_preset = Some(preset.id.to_string());
        tracing::info!("Loaded preset '{}'", preset.id);
        self.commit();
        true
    }

    /// The theme as pretty-printed JSON.
    pub fn export_theme(&self) -> String {
        serde_json::to_string_pretty(&self.theme).unwrap_or_else(|e| {
            tracing::error!("Failed to serialize theme: {}", e);
            String::new()
        })
    }

    /// Replace the theme with a previously exported one.
    ///
    /// Malformed or out-of-range input leaves the current theme untouched.
    pub fn import_theme(&mut self, json: &str) -> Result<()> {
        let theme = match parse_theme(json) {
            Ok(theme) => theme,
            Err(e) => {
                tracing::warn!("Rejected theme import: {}", e);
                return Err(e);
            }
        };
        self.theme = theme;
        self.active_preset = None;
        tracing::info!("Imported theme");
        self.commit();
        Ok(())
    }

    /// Randomize fonts, colors, effects and background as one change.
    pub fn randomize_all(&mut self) {
        self.theme.fonts = randomizer::generate_fonts(&mut self.rng);
        self.theme.colors = randomizer::generate_colors(&mut self.rng);
        randomizer::generate_effects(&mut self.rng).apply_to(&mut self.theme.effects);
        self.theme.background = randomizer::generate_background(&mut self.rng);
        self.active_preset = None;
        tracing::info!(
            "Randomized theme ({} background)",
            self.theme.background.effect()
        );
        self.commit();
    }

    /// Restore the previous snapshot. Returns whether anything changed.
    pub fn undo(&mut self) -> bool {
        // A change still inside the quiet period is what the user expects
        // to undo, so record it first.
        self.flush_history();

        let Some(previous) = self.history.undo() else {
            return false;
        };
        self.theme = previous;
        // The restored state is already the newest entry; consume the
        // suppressed capture now rather than on a later, unrelated change.
        self.history.save_state(self.theme.clone());
        self.active_preset = None;
        tracing::debug!("Undo ({} step(s) left)", self.history.history_count());
        self.sync();
        self.persist();
        true
    }

    // ===== Time =====

    /// Take the pending snapshot once the quiet period has elapsed.
    /// Returns whether a snapshot was taken.
    pub fn tick(&mut self) -> bool {
        if self.debounce.fire_if_due(self.clock.now()) {
            self.capture();
            true
        } else {
            false
        }
    }

    /// Take the pending snapshot immediately, if there is one.
    pub fn flush_history(&mut self) {
        if self.debounce.is_pending() {
            self.debounce.cancel();
            self.capture();
        }
    }

    fn capture(&mut self) {
        self.history.save_state(self.theme.clone());
        tracing::debug!("Captured snapshot ({} undo step(s))", self.history.history_count());
    }

    fn commit(&mut self) {
        self.sync();
        self.debounce.schedule(self.clock.now());
        self.persist();
    }

    fn sync(&mut self) {
        sync_theme_with(&self.theme, &mut self.target, &self.render_options);
    }

    fn persist(&mut self) {
        let Some(backend) = self.persistence.as_mut() else {
            return;
        };
        let json = match serde_json::to_string(&self.theme) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize theme for saving: {}", e);
                return;
            }
        };
        if let Err(e) = backend.save(&self.persistence_key, &json) {
            tracing::warn!("Failed to save theme: {}", e);
        }
    }
}

fn parse_theme(json: &str) -> Result<Theme> {
    let theme: Theme = serde_json::from_str(json).map_err(Error::ThemeImport)?;
    theme.validate()?;
    Ok(theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::BackgroundEffect;
    use crate::history::ManualClock;
    use crate::render::CssVariables;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::time::Duration;

    /// Render target that counts background writes.
    #[derive(Default)]
    struct CountingTarget {
        backgrounds: usize,
    }

    impl RenderTarget for CountingTarget {
        fn set_property(&mut self, _name: &str, _value: &str) {}

        fn set_page_background(&mut self, _background: crate::render::PageBackground) {
            self.backgrounds += 1;
        }
    }

    #[derive(Clone, Default)]
    struct SharedMemory(Rc<RefCell<HashMap<String, String>>>);

    impl ThemePersistence for SharedMemory {
        fn load(&self, key: &str) -> Result<Option<String>> {
            Ok(self.0.borrow().get(key).cloned())
        }

        fn save(&mut self, key: &str, json: &str) -> Result<()> {
            self.0.borrow_mut().insert(key.to_string(), json.to_string());
            Ok(())
        }
    }

    fn store() -> (ThemeStore<CssVariables>, ManualClock) {
        let clock = ManualClock::new();
        let store = ThemeStore::new(&EngineConfig::default(), CssVariables::new())
            .with_clock(clock.clone())
            .with_seed(17);
        (store, clock)
    }

    fn settle(store: &mut ThemeStore<CssVariables>, clock: &ManualClock) {
        clock.advance(Duration::from_millis(500));
        store.tick();
    }

    #[test]
    fn test_new_store_is_synced_and_seeded() {
        let (store, _) = store();
        assert_eq!(store.target().get("font-heading"), Some("Inter"));
        assert!(!store.can_undo());
        assert_eq!(store.history_count(), 0);
        assert_eq!(store.active_preset(), Some("default"));
    }

    #[test]
    fn test_update_syncs_immediately() {
        let (mut store, _) = store();
        store.update_colors(ColorsUpdate {
            primary: Some(Hsl::new(10.0, 20.0, 30.0)),
            ..Default::default()
        });
        assert_eq!(store.target().get("color-primary"), Some("10 20% 30%"));
        assert_eq!(store.active_preset(), None);
    }

    #[test]
    fn test_debounce_snapshots_after_quiet_period() {
        let (mut store, clock) = store();

        for blur in [1.0, 2.0, 3.0] {
            store.update_backdrop_filter(BackdropFilterUpdate {
                blur: Some(blur),
                ..Default::default()
            });
            clock.advance(Duration::from_millis(200));
            assert!(!store.tick());
        }
        assert_eq!(store.history_count(), 0);

        clock.advance(Duration::from_millis(300));
        assert!(store.tick());
        assert_eq!(store.history_count(), 1);
    }

    #[test]
    fn test_undo_restores_previous() {
        let (mut store, clock) = store();
        store.update_fonts(FontsUpdate {
            heading: Some("Orbitron".to_string()),
            ..Default::default()
        });
        settle(&mut store, &clock);

        assert!(store.undo());
        assert_eq!(store.theme().fonts.heading, "Inter");
        assert_eq!(store.target().get("font-heading"), Some("Inter"));
        assert!(!store.can_undo());
    }

    #[test]
    fn test_undo_includes_pending_change() {
        let (mut store, _) = store();
        store.update_fonts(FontsUpdate {
            heading: Some("Orbitron".to_string()),
            ..Default::default()
        });
        assert!(store.undo());
        assert_eq!(store.theme().fonts.heading, "Inter");
    }

    #[test]
    fn test_undo_does_not_reenter_history() {
        let (mut store, clock) = store();
        for heading in ["Lato", "Poppins"] {
            store.update_fonts(FontsUpdate {
                heading: Some(heading.to_string()),
                ..Default::default()
            });
            settle(&mut store, &clock);
        }
        assert_eq!(store.history_count(), 2);

        store.undo();
        settle(&mut store, &clock);
        assert_eq!(store.history_count(), 1);

        // The next real change is recorded normally.
        store.update_fonts(FontsUpdate {
            heading: Some("Outfit".to_string()),
            ..Default::default()
        });
        settle(&mut store, &clock);
        assert_eq!(store.history_count(), 2);
    }

    #[test]
    fn test_undo_noop_without_history() {
        let (mut store, _) = store();
        let before = store.theme().clone();
        assert!(!store.undo());
        assert_eq!(store.theme(), &before);
    }

    #[test]
    fn test_reset_clears_history() {
        let (mut store, clock) = store();
        store.load_preset("neon");
        settle(&mut store, &clock);
        assert!(store.can_undo());

        store.reset_theme();
        assert_eq!(store.theme(), &Theme::default());
        assert!(!store.can_undo());
        assert_eq!(store.history_count(), 0);
        assert_eq!(store.active_preset(), Some("default"));
    }

    #[test]
    fn test_unknown_preset_is_noop() {
        let (mut store, _) = store();
        let before = store.theme().clone();
        assert!(!store.load_preset("nope"));
        assert_eq!(store.theme(), &before);
        assert!(!store.has_pending_snapshot());
    }

    #[test]
    fn test_active_preset_tracking() {
        let (mut store, _) = store();
        assert!(store.load_preset("ocean"));
        assert_eq!(store.active_preset(), Some("ocean"));

        store.update_spacing(SpacingUpdate {
            gap: Some("3rem".to_string()),
            ..Default::default()
        });
        assert_eq!(store.active_preset(), Some("ocean"));

        store.update_effects(EffectsUpdate {
            blur: Some("4px".to_string()),
            ..Default::default()
        });
        assert_eq!(store.active_preset(), None);
    }

    #[test]
    fn test_update_vanta_config_selects_effect() {
        let (mut store, _) = store();
        store.update_vanta_config(BackgroundEffect::Halo.defaults());
        assert_eq!(store.theme().background.effect(), BackgroundEffect::Halo);
        assert_eq!(store.target().get("vanta-effect"), Some("halo"));
    }

    #[test]
    fn test_randomize_all_syncs_once() {
        let mut store = ThemeStore::new(&EngineConfig::default(), CountingTarget::default());
        let initial = store.target().backgrounds;
        store.randomize_all();
        assert_eq!(store.target().backgrounds, initial + 1);
        assert!(store.has_pending_snapshot());
        assert!(store.theme().validate().is_ok());
    }

    #[test]
    fn test_import_rejects_out_of_range() {
        let (mut store, _) = store();
        let mut bad = Theme::default();
        bad.colors.primary.s = 150.0;
        let json = serde_json::to_string(&bad).unwrap();

        let err = store.import_theme(&json).unwrap_err();
        assert!(matches!(err, Error::ThemeValidation(_)));
        assert_eq!(store.theme(), &Theme::default());
    }

    #[test]
    fn test_persistence_writes_through_and_restores() {
        let memory = SharedMemory::default();
        let config = EngineConfig::default();

        let mut store = ThemeStore::new(&config, CssVariables::new()).with_persistence(memory.clone());
        store.load_preset("forest");
        assert!(memory.0.borrow().contains_key("portfolio-theme"));

        let restored = ThemeStore::new(&config, CssVariables::new()).with_persistence(memory);
        assert_eq!(restored.theme().fonts.heading, "Poppins");
        assert_eq!(restored.target().get("font-heading"), Some("Poppins"));
        assert!(!restored.can_undo());
    }

    #[test]
    fn test_persistence_ignores_garbage() {
        let memory = SharedMemory::default();
        memory
            .0
            .borrow_mut()
            .insert("portfolio-theme".to_string(), "{ not json".to_string());

        let store = ThemeStore::new(&EngineConfig::default(), CssVariables::new())
            .with_persistence(memory);
        assert_eq!(store.theme(), &Theme::default());
    }

    #[test]
    fn test_contrast_report_defaults() {
        let (store, _) = store();
        let report = store.contrast_report();
        assert_eq!(report.len(), 3);
        assert_eq!(report[0].role, "primary");
        assert!(report[0].check.accessible);
    }
}

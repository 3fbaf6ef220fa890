//! End-to-end behavior of the theme store.

use std::time::Duration;

use folio_core::background::{BackgroundHost, BackgroundRenderer, NetConfig, WavesConfig};
use folio_core::color::{WcagLevel, check_combination, contrast_ratio, meets_wcag};
use folio_core::randomizer::{MIN_HUE_SEPARATION, hue_distance};
use folio_core::theme::{BackgroundUpdate, ColorsUpdate, FontsUpdate, PageGradient};
use folio_core::{
    BackgroundEffect, CssVariables, EngineConfig, Error, FilePersistence, Hsl, ManualClock,
    PageBackground, Theme, ThemeStore, VantaConfig,
};
use serde_json::Value;

fn new_store() -> (ThemeStore<CssVariables>, ManualClock) {
    let clock = ManualClock::new();
    let store = ThemeStore::new(&EngineConfig::default(), CssVariables::new())
        .with_clock(clock.clone())
        .with_seed(2024);
    (store, clock)
}

fn settle(store: &mut ThemeStore<CssVariables>, clock: &ManualClock) {
    clock.advance(Duration::from_millis(600));
    store.tick();
}

#[test]
fn test_partial_color_update_keeps_siblings() {
    let (mut store, _) = new_store();
    let before = store.theme().colors.clone();

    store.update_colors(ColorsUpdate {
        primary: Some(Hsl::new(10.0, 20.0, 30.0)),
        ..Default::default()
    });

    let colors = &store.theme().colors;
    assert_eq!(colors.primary, Hsl::new(10.0, 20.0, 30.0));
    assert_eq!(colors.secondary, before.secondary);
    assert_eq!(colors.accent, before.accent);
    assert_eq!(colors.background, before.background);
    assert_eq!(colors.text, before.text);
    assert_eq!(colors.borders, before.borders);
}

#[test]
fn test_vanta_config_replaced_not_merged() {
    let (mut store, _) = new_store();
    store.update_vanta_config(VantaConfig::Net(NetConfig {
        color: Some(0xff0000),
        points: Some(12),
        ..Default::default()
    }));
    store.update_vanta_config(VantaConfig::Net(NetConfig {
        spacing: Some(18.0),
        ..Default::default()
    }));

    assert_eq!(
        store.theme().background.vanta.to_value(),
        serde_json::json!({ "spacing": 18.0 })
    );
}

#[test]
fn test_backdrop_filter_merge_is_one_level_deeper() {
    let (mut store, _) = new_store();
    let gradient = store.theme().background.backdrop_filter.gradient.clone();

    store.update_backdrop_filter(folio_core::theme::BackdropFilterUpdate {
        blur: Some(9.0),
        ..Default::default()
    });

    let filter = &store.theme().background.backdrop_filter;
    assert_eq!(filter.blur, 9.0);
    assert_eq!(filter.gradient_opacity, 0.23);
    assert_eq!(filter.gradient, gradient);
}

#[test]
fn test_background_effect_switch_drops_stale_keys() {
    let (mut store, _) = new_store();
    store.update_vanta_config(BackgroundEffect::Net.defaults());

    store.update_background(BackgroundUpdate {
        vanta_effect: Some(BackgroundEffect::Waves),
        ..Default::default()
    });

    assert_eq!(
        store.theme().background.vanta,
        VantaConfig::Waves(WavesConfig::default())
    );
}

#[test]
fn test_export_import_round_trip() {
    for seed in 0..500 {
        let (store, _) = new_store();
        let mut store = store.with_seed(seed);
        store.randomize_all();
        let exported = store.export_theme();
        let snapshot = store.theme().clone();

        let (mut other, _) = new_store();
        other.import_theme(&exported).unwrap();
        assert_eq!(other.theme(), &snapshot, "seed {seed}");
        assert_eq!(other.target(), store.target(), "seed {seed}");
    }
}

#[test]
fn test_export_is_two_space_pretty_json() {
    let (store, _) = new_store();
    let exported = store.export_theme();
    assert!(exported.starts_with("{\n  \"fonts\": {\n    \"heading\": \"Inter\""));
}

#[test]
fn test_malformed_import_leaves_state() {
    let (mut store, _) = new_store();
    store.load_preset("sunset");
    let before = store.theme().clone();
    let css_before = store.target().clone();

    let err = store.import_theme("{ not json").unwrap_err();
    assert!(matches!(err, Error::ThemeImport(_)));

    let err = store.import_theme(r#"{"fonts": {}}"#).unwrap_err();
    assert!(matches!(err, Error::ThemeImport(_)));

    assert_eq!(store.theme(), &before);
    assert_eq!(store.target(), &css_before);
}

#[test]
fn test_import_ignores_unknown_effect_keys() {
    let (mut store, _) = new_store();
    let mut json: Value = serde_json::from_str(&store.export_theme()).unwrap();
    json["background"]["vantaConfig"] = serde_json::json!({ "points": 9, "glitter": 3 });

    store.import_theme(&json.to_string()).unwrap();
    assert_eq!(
        store.theme().background.vanta,
        VantaConfig::Net(NetConfig {
            points: Some(9),
            ..Default::default()
        })
    );
}

#[test]
fn test_history_bounded_after_many_changes() {
    let (mut store, clock) = new_store();
    let max = EngineConfig::default().history.max_entries;

    for i in 0..(max + 10) {
        store.update_fonts(FontsUpdate {
            heading: Some(format!("Font {i}")),
            ..Default::default()
        });
        settle(&mut store, &clock);
    }

    assert_eq!(store.history_count(), max - 1);
}

#[test]
fn test_undo_boundary() {
    let (mut store, clock) = new_store();
    store.update_fonts(FontsUpdate {
        heading: Some("Lato".to_string()),
        ..Default::default()
    });
    settle(&mut store, &clock);

    assert!(store.undo());
    let after_first = store.theme().clone();
    assert!(!store.undo());
    assert_eq!(store.theme(), &after_first);
}

#[test]
fn test_reset_after_changes() {
    let (mut store, clock) = new_store();
    for id in ["ocean", "neon", "forest"] {
        store.load_preset(id);
        settle(&mut store, &clock);
    }
    store.reset_theme();

    assert_eq!(store.theme(), &Theme::default());
    assert!(!store.can_undo());
    assert_eq!(store.history_count(), 0);
}

#[test]
fn test_preset_preserves_background() {
    let (mut store, _) = new_store();
    store.randomize_all();
    let background = store.theme().background.clone();

    assert!(store.load_preset("midnight"));

    assert_eq!(store.theme().background, background);
    assert_eq!(store.theme().fonts.heading, "Orbitron");
}

#[test]
fn test_randomize_all_is_coherent() {
    let (mut store, _) = new_store();
    for _ in 0..200 {
        store.randomize_all();
        let theme = store.theme();
        theme.validate().unwrap();

        let effect = theme.background.effect();
        let config = theme.background.vanta.to_value();
        for key in config.as_object().unwrap().keys() {
            assert!(effect.config_keys().contains(&key.as_str()));
        }

        let ratio = contrast_ratio(theme.colors.primary, theme.colors.background.start);
        assert!(meets_wcag(ratio, WcagLevel::Aa, true));

        let colors = &theme.colors;
        assert!(hue_distance(colors.primary.h, colors.secondary.h) >= MIN_HUE_SEPARATION);
        assert!(hue_distance(colors.accent.h, colors.secondary.h) >= MIN_HUE_SEPARATION);
        assert_eq!(store.active_preset(), None);
    }
}

#[test]
fn test_starfield_page_background_transparent() {
    let (mut store, _) = new_store();
    store.update_background(BackgroundUpdate {
        vanta_effect: Some(BackgroundEffect::GravityStars),
        ..Default::default()
    });
    assert_eq!(
        store.target().page_background(),
        Some(PageBackground::Transparent)
    );

    store.update_colors(ColorsUpdate {
        background: Some(PageGradient {
            start: Hsl::new(0.0, 0.0, 10.0),
            end: Hsl::new(0.0, 0.0, 5.0),
        }),
        ..Default::default()
    });
    assert_eq!(
        store.target().page_background(),
        Some(PageBackground::Transparent)
    );

    store.update_background(BackgroundUpdate {
        vanta_effect: Some(BackgroundEffect::Fog),
        ..Default::default()
    });
    assert_eq!(
        store.target().page_background().map(|bg| bg.css()).as_deref(),
        Some("linear-gradient(to bottom, hsl(0 0% 10%), hsl(0 0% 5%))")
    );
}

#[test]
fn test_contrast_extremes() {
    let ratio = contrast_ratio(Hsl::WHITE, Hsl::BLACK);
    assert!((ratio - 21.0).abs() < 0.01);

    let gray = Hsl::new(0.0, 0.0, 45.0);
    let check = check_combination(gray, Hsl::BLACK, WcagLevel::Aaa, false);
    assert!(!check.accessible);
    assert!(check.recommendation.unwrap().contains("white"));
}

#[test]
fn test_file_persistence_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = EngineConfig::default();

    let mut store = ThemeStore::new(&config, CssVariables::new())
        .with_persistence(FilePersistence::new(dir.path()));
    store.load_preset("vintage");

    let saved = dir.path().join("portfolio-theme.json");
    assert!(saved.exists());

    let restored = ThemeStore::new(&config, CssVariables::new())
        .with_persistence(FilePersistence::new(dir.path()));
    assert_eq!(restored.theme(), store.theme());
}

#[test]
fn test_persistence_enabled_through_config() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = EngineConfig::default();
    config.persistence.enabled = true;
    config.persistence.directory = Some(dir.path().to_path_buf());
    config.persistence.key = "site".to_string();

    let mut store = ThemeStore::new(&config, CssVariables::new());
    store.load_preset("arctic");
    assert!(dir.path().join("site.json").exists());

    let restored = ThemeStore::new(&config, CssVariables::new());
    assert_eq!(restored.theme().fonts.heading, "Quicksand");
}

/// Renderer that records the effects it was asked to construct.
#[derive(Default)]
struct LogRenderer {
    inits: Vec<BackgroundEffect>,
    destroys: usize,
}

impl BackgroundRenderer for LogRenderer {
    fn init(&mut self, effect: BackgroundEffect, _options: &Value) -> folio_core::Result<()> {
        self.inits.push(effect);
        Ok(())
    }

    fn destroy(&mut self) {
        self.destroys += 1;
    }

    fn resize(&mut self) {}

    fn set_options(&mut self, _options: &Value) -> folio_core::Result<()> {
        Ok(())
    }
}

#[test]
fn test_background_host_follows_store() {
    let (mut store, _) = new_store();
    let mut host = BackgroundHost::new(LogRenderer::default());

    host.apply(&store.theme().background.vanta);
    store.update_background(BackgroundUpdate {
        vanta_effect: Some(BackgroundEffect::Globe),
        ..Default::default()
    });
    host.apply(&store.theme().background.vanta);
    store.update_background(BackgroundUpdate {
        vanta_effect: Some(BackgroundEffect::GravityStars),
        ..Default::default()
    });
    host.apply(&store.theme().background.vanta);

    assert_eq!(
        host.renderer().inits,
        vec![BackgroundEffect::Net, BackgroundEffect::Globe]
    );
    assert_eq!(host.renderer().destroys, 2);
    assert_eq!(host.live_effect(), None);
}

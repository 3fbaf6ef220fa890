//! Canonical theme model.
//!
//! `Theme` is the single source of truth for every visual value on the page.
//! It is a tree of five branches (fonts, colors, spacing, effects,
//! background), each updatable on its own through a matching `*Update`
//! struct. Updates are shallow merges: a `None` field keeps the current value,
//! a `Some` field replaces it wholesale (nested objects are never deep-merged).
//!
//! The serialized form uses camelCase keys and is the export/import format.

use serde::{Deserialize, Serialize};

use crate::background::{BackgroundEffect, VantaConfig};
use crate::color::Hsl;
use crate::error::{Error, Result};

/// Full theme snapshot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Theme {
    pub fonts: Fonts,
    pub colors: Colors,
    pub spacing: Spacing,
    pub effects: Effects,
    pub background: BackgroundState,
}

impl Theme {
    /// Validate value ranges, collecting every violation.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        let colors = &self.colors;
        colors.primary.check("colors.primary", &mut errors);
        colors.secondary.check("colors.secondary", &mut errors);
        colors.accent.check("colors.accent", &mut errors);
        colors.background.start.check("colors.background.start", &mut errors);
        colors.background.end.check("colors.background.end", &mut errors);
        check_unit("colors.borders.primary.opacity", colors.borders.primary.opacity, &mut errors);
        check_unit(
            "colors.borders.secondary.opacity",
            colors.borders.secondary.opacity,
            &mut errors,
        );
        check_unit("colors.borders.glass.opacity", colors.borders.glass.opacity, &mut errors);

        let effects = &self.effects;
        effects.border_color.check("effects.borderColor", &mut errors);
        effects.shadow_color.check("effects.shadowColor", &mut errors);
        effects.card_color.check("effects.cardColor", &mut errors);
        check_unit("effects.shadowIntensity", effects.shadow_intensity, &mut errors);
        check_unit("effects.cardOpacity", effects.card_opacity, &mut errors);
        check_unit("effects.glowIntensity", effects.glow_intensity, &mut errors);
        check_unit("effects.sectionFade.intensity", effects.section_fade.intensity, &mut errors);
        for (name, value) in [
            ("effects.saturate", effects.saturate),
            ("effects.brightness", effects.brightness),
            ("effects.animationSpeed", effects.animation_speed),
        ] {
            if !value.is_finite() || value < 0.0 {
                errors.push(format!("{name}: {value} must be a non-negative number"));
            }
        }

        let filter = &self.background.backdrop_filter;
        check_unit("background.backdropFilter.gradientOpacity", filter.gradient_opacity, &mut errors);
        if !filter.blur.is_finite() || filter.blur < 0.0 {
            errors.push(format!(
                "background.backdropFilter.blur: {} must be a non-negative number",
                filter.blur
            ));
        }
        filter
            .gradient
            .color1
            .check("background.backdropFilter.gradient.color1", &mut errors);
        filter
            .gradient
            .color2
            .check("background.backdropFilter.gradient.color2", &mut errors);
        for (name, value) in [
            ("color1Percent", filter.gradient.color1_percent),
            ("color2Percent", filter.gradient.color2_percent),
        ] {
            if !(0.0..=100.0).contains(&value) {
                errors.push(format!(
                    "background.backdropFilter.gradient.{name}: {value} is outside [0, 100]"
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(Error::ThemeValidation(errors))
        }
    }
}

fn check_unit(path: &str, value: f64, errors: &mut Vec<String>) {
    if !(0.0..=1.0).contains(&value) {
        errors.push(format!("{path}: {value} is outside [0, 1]"));
    }
}

/// Copy every `Some` field of an update onto its branch.
macro_rules! merge_fields {
    ($update:ident => $target:ident { $($field:ident),* $(,)? }) => {
        $(
            if let Some(value) = $update.$field {
                $target.$field = value;
            }
        )*
    };
}

// ===== Fonts =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fonts {
    pub heading: String,
    pub body: String,
    pub mono: String,
    pub sizes: FontSizes,
    pub weights: FontWeights,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            heading: "Inter".to_string(),
            body: "Inter".to_string(),
            mono: "JetBrains Mono".to_string(),
            sizes: FontSizes::default(),
            weights: FontWeights::default(),
        }
    }
}

/// Type scale. Each slot holds a CSS length such as `"1.25rem"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    pub h1: String,
    pub h2: String,
    pub h3: String,
    pub h4: String,
    pub body: String,
    pub small: String,
}

impl Default for FontSizes {
    fn default() -> Self {
        Self {
            h1: "5rem".to_string(),
            h2: "3rem".to_string(),
            h3: "2rem".to_string(),
            h4: "1.5rem".to_string(),
            body: "1rem".to_string(),
            small: "0.875rem".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontWeights {
    pub normal: u16,
    pub medium: u16,
    pub semibold: u16,
    pub bold: u16,
}

impl Default for FontWeights {
    fn default() -> Self {
        Self {
            normal: 400,
            medium: 500,
            semibold: 600,
            bold: 700,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontsUpdate {
    pub heading: Option<String>,
    pub body: Option<String>,
    pub mono: Option<String>,
    pub sizes: Option<FontSizes>,
    pub weights: Option<FontWeights>,
}

impl FontsUpdate {
    pub fn apply_to(self, fonts: &mut Fonts) {
        let update = self;
        merge_fields!(update => fonts { heading, body, mono, sizes, weights });
    }
}

// ===== Colors =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Colors {
    pub primary: Hsl,
    pub secondary: Hsl,
    pub accent: Hsl,
    pub background: PageGradient,
    pub text: TextColors,
    pub borders: BorderOpacities,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            primary: Hsl::new(180.0, 100.0, 50.0),
            secondary: Hsl::new(300.0, 100.0, 50.0),
            accent: Hsl::new(220.0, 80.0, 60.0),
            background: PageGradient::default(),
            text: TextColors::default(),
            borders: BorderOpacities::default(),
        }
    }
}

/// Vertical page gradient, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGradient {
    pub start: Hsl,
    pub end: Hsl,
}

impl Default for PageGradient {
    fn default() -> Self {
        Self {
            start: Hsl::new(240.0, 10.0, 5.0),
            end: Hsl::new(240.0, 10.0, 3.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextColors {
    pub white: String,
    pub gray300: String,
    pub gray400: String,
    pub gray500: String,
}

impl Default for TextColors {
    fn default() -> Self {
        Self {
            white: "#ffffff".to_string(),
            gray300: "#d1d5db".to_string(),
            gray400: "#9ca3af".to_string(),
            gray500: "#6b7280".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opacity {
    pub opacity: f64,
}

impl Opacity {
    pub const fn new(opacity: f64) -> Self {
        Self { opacity }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BorderOpacities {
    pub primary: Opacity,
    pub secondary: Opacity,
    pub glass: Opacity,
}

impl Default for BorderOpacities {
    fn default() -> Self {
        Self {
            primary: Opacity::new(0.1),
            secondary: Opacity::new(0.2),
            glass: Opacity::new(0.05),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ColorsUpdate {
    pub primary: Option<Hsl>,
    pub secondary: Option<Hsl>,
    pub accent: Option<Hsl>,
    pub background: Option<PageGradient>,
    pub text: Option<TextColors>,
    pub borders: Option<BorderOpacities>,
}

impl ColorsUpdate {
    pub fn apply_to(self, colors: &mut Colors) {
        let update = self;
        merge_fields!(update => colors { primary, secondary, accent, background, text, borders });
    }
}

// ===== Spacing =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacing {
    pub section: String,
    pub section_md: String,
    pub card: String,
    pub card_md: String,
    pub gap: String,
}

impl Default for Spacing {
    fn default() -> Self {
        Self {
            section: "5rem".to_string(),
            section_md: "10rem".to_string(),
            card: "1.5rem".to_string(),
            card_md: "2rem".to_string(),
            gap: "2rem".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpacingUpdate {
    pub section: Option<String>,
    pub section_md: Option<String>,
    pub card: Option<String>,
    pub card_md: Option<String>,
    pub gap: Option<String>,
}

impl SpacingUpdate {
    pub fn apply_to(self, spacing: &mut Spacing) {
        let update = self;
        merge_fields!(update => spacing { section, section_md, card, card_md, gap });
    }
}

// ===== Effects =====

/// Navigation bar silhouette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavShape {
    #[default]
    Rounded,
    Boxy,
    Beveled,
}

impl NavShape {
    pub fn as_str(self) -> &'static str {
        match self {
            NavShape::Rounded => "rounded",
            NavShape::Boxy => "boxy",
            NavShape::Beveled => "beveled",
        }
    }

    /// Border radius the navigation bar uses for this shape.
    pub fn border_radius(self) -> &'static str {
        match self {
            NavShape::Rounded => "9999px",
            NavShape::Boxy => "0px",
            NavShape::Beveled => "0.5rem",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effects {
    pub border_radius: String,
    pub border_width: String,
    pub border_color: Hsl,
    pub blur: String,
    #[serde(default = "default_true")]
    pub shadow_enabled: bool,
    pub shadow_intensity: f64,
    pub shadow_color: Hsl,
    #[serde(default = "default_card_color")]
    pub card_color: Hsl,
    pub card_opacity: f64,
    #[serde(default)]
    pub glow_enabled: bool,
    pub glow_intensity: f64,
    pub saturate: f64,
    pub brightness: f64,
    pub animation_speed: f64,
    pub section_fade: SectionFade,
    pub transition_duration: TransitionDurations,
    #[serde(default = "default_component_blur")]
    pub component_blur: String,
    #[serde(default)]
    pub nav_shape: NavShape,
}

fn default_true() -> bool {
    true
}

fn default_card_color() -> Hsl {
    Hsl::WHITE
}

fn default_component_blur() -> String {
    "12px".to_string()
}

impl Default for Effects {
    fn default() -> Self {
        Self {
            border_radius: "0.75rem".to_string(),
            border_width: "1px".to_string(),
            border_color: Hsl::WHITE,
            blur: "12px".to_string(),
            shadow_enabled: true,
            shadow_intensity: 0.5,
            shadow_color: Hsl::BLACK,
            card_color: default_card_color(),
            card_opacity: 0.1,
            glow_enabled: false,
            glow_intensity: 0.0,
            saturate: 1.0,
            brightness: 1.0,
            animation_speed: 1.0,
            section_fade: SectionFade::default(),
            transition_duration: TransitionDurations::default(),
            component_blur: default_component_blur(),
            nav_shape: NavShape::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectionFade {
    pub intensity: f64,
    /// Blur in pixels.
    pub blur: f64,
}

impl Default for SectionFade {
    fn default() -> Self {
        Self {
            intensity: 0.2,
            blur: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionDurations {
    pub fast: String,
    pub normal: String,
    pub slow: String,
}

impl Default for TransitionDurations {
    fn default() -> Self {
        Self {
            fast: "0.15s".to_string(),
            normal: "0.3s".to_string(),
            slow: "0.6s".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectsUpdate {
    pub border_radius: Option<String>,
    pub border_width: Option<String>,
    pub border_color: Option<Hsl>,
    pub blur: Option<String>,
    pub shadow_enabled: Option<bool>,
    pub shadow_intensity: Option<f64>,
    pub shadow_color: Option<Hsl>,
    pub card_color: Option<Hsl>,
    pub card_opacity: Option<f64>,
    pub glow_enabled: Option<bool>,
    pub glow_intensity: Option<f64>,
    pub saturate: Option<f64>,
    pub brightness: Option<f64>,
    pub animation_speed: Option<f64>,
    pub section_fade: Option<SectionFade>,
    pub transition_duration: Option<TransitionDurations>,
    pub component_blur: Option<String>,
    pub nav_shape: Option<NavShape>,
}

impl EffectsUpdate {
    pub fn apply_to(self, effects: &mut Effects) {
        let update = self;
        merge_fields!(update => effects {
            border_radius,
            border_width,
            border_color,
            blur,
            shadow_enabled,
            shadow_intensity,
            shadow_color,
            card_color,
            card_opacity,
            glow_enabled,
            glow_intensity,
            saturate,
            brightness,
            animation_speed,
            section_fade,
            transition_duration,
            component_blur,
            nav_shape,
        });
    }
}

// ===== Background =====

/// Background effect selection, its configuration and the backdrop overlay.
///
/// The effect identifier lives inside [`VantaConfig`], so a configuration can
/// never describe a different effect than the one selected. On the wire this
/// is still the flat `vantaEffect` / `vantaConfig` / `backdropFilter` shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BackgroundWire", into = "BackgroundWire")]
pub struct BackgroundState {
    pub vanta: VantaConfig,
    pub backdrop_filter: BackdropFilter,
}

impl BackgroundState {
    pub fn effect(&self) -> BackgroundEffect {
        self.vanta.effect()
    }
}

impl Default for BackgroundState {
    fn default() -> Self {
        Self {
            vanta: VantaConfig::empty(BackgroundEffect::Net),
            backdrop_filter: BackdropFilter::default(),
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BackgroundWire {
    vanta_effect: BackgroundEffect,
    #[serde(default)]
    vanta_config: serde_json::Value,
    backdrop_filter: BackdropFilter,
}

impl TryFrom<BackgroundWire> for BackgroundState {
    type Error = serde_json::Error;

    fn try_from(wire: BackgroundWire) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            vanta: VantaConfig::from_value(wire.vanta_effect, wire.vanta_config)?,
            backdrop_filter: wire.backdrop_filter,
        })
    }
}

impl From<BackgroundState> for BackgroundWire {
    fn from(state: BackgroundState) -> Self {
        Self {
            vanta_effect: state.vanta.effect(),
            vanta_config: state.vanta.to_value(),
            backdrop_filter: state.backdrop_filter,
        }
    }
}

/// Frosted-glass blur plus a translucent gradient layered over the background.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackdropFilter {
    pub enabled: bool,
    /// Blur in pixels, independent of the gradient.
    pub blur: f64,
    /// Visibility of the gradient overlay in `[0, 1]`, independent of blur.
    pub gradient_opacity: f64,
    pub gradient: BackdropGradient,
}

impl Default for BackdropFilter {
    fn default() -> Self {
        Self {
            enabled: true,
            blur: 5.0,
            gradient_opacity: 0.23,
            gradient: BackdropGradient::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackdropGradient {
    pub enabled: bool,
    pub color1: Hsl,
    pub color2: Hsl,
    /// Degrees. 135 puts the glare in the lower right.
    pub angle: f64,
    /// Radial extent in pixels.
    pub radius: f64,
    pub color1_percent: f64,
    pub color2_percent: f64,
}

impl Default for BackdropGradient {
    fn default() -> Self {
        Self {
            enabled: true,
            color1: Hsl::new(240.0, 50.0, 20.0),
            color2: Hsl::new(280.0, 50.0, 10.0),
            angle: 135.0,
            radius: 600.0,
            color1_percent: 65.0,
            color2_percent: 35.0,
        }
    }
}

/// Partial background change.
///
/// Deserializes from the same shape the theme exports:
/// `{"vantaEffect": ..., "vantaConfig": {...}, "backdropFilter": {...}}`,
/// with every key optional. A `vantaConfig` needs a `vantaEffect` to say
/// which effect it configures.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "BackgroundUpdateWire")]
pub struct BackgroundUpdate {
    /// Select a different effect. Ignored when `vanta_config` is also set,
    /// since the configuration carries its own effect.
    pub vanta_effect: Option<BackgroundEffect>,
    pub vanta_config: Option<VantaConfig>,
    pub backdrop_filter: Option<BackdropFilter>,
}

#[derive(Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct BackgroundUpdateWire {
    vanta_effect: Option<BackgroundEffect>,
    vanta_config: Option<serde_json::Value>,
    backdrop_filter: Option<BackdropFilter>,
}

impl TryFrom<BackgroundUpdateWire> for BackgroundUpdate {
    type Error = String;

    fn try_from(wire: BackgroundUpdateWire) -> std::result::Result<Self, Self::Error> {
        let vanta_config = match (wire.vanta_config, wire.vanta_effect) {
            (Some(config), Some(effect)) => Some(
                VantaConfig::from_value(effect, config).map_err(|e| e.to_string())?,
            ),
            (Some(_), None) => return Err("vantaConfig requires vantaEffect".to_string()),
            (None, _) => None,
        };
        Ok(Self {
            vanta_effect: wire.vanta_effect,
            vanta_config,
            backdrop_filter: wire.backdrop_filter,
        })
    }
}

impl BackgroundUpdate {
    pub fn apply_to(self, background: &mut BackgroundState) {
        match (self.vanta_config, self.vanta_effect) {
            (Some(config), _) => background.vanta = config,
            // Switching effects starts from an empty config so no keys leak
            // from the previous effect.
            (None, Some(effect)) if effect != background.effect() => {
                background.vanta = VantaConfig::empty(effect);
            }
            _ => {}
        }
        if let Some(filter) = self.backdrop_filter {
            background.backdrop_filter = filter;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BackdropFilterUpdate {
    pub enabled: Option<bool>,
    pub blur: Option<f64>,
    pub gradient_opacity: Option<f64>,
    pub gradient: Option<BackdropGradient>,
}

impl BackdropFilterUpdate {
    pub fn apply_to(self, filter: &mut BackdropFilter) {
        let update = self;
        merge_fields!(update => filter { enabled, blur, gradient_opacity, gradient });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::{NetConfig, WavesConfig};

    #[test]
    fn test_default_theme_validates() {
        assert!(Theme::default().validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let theme = Theme::default();
        assert_eq!(theme.fonts.heading, "Inter");
        assert_eq!(theme.fonts.mono, "JetBrains Mono");
        assert_eq!(theme.colors.primary, Hsl::new(180.0, 100.0, 50.0));
        assert_eq!(theme.spacing.section_md, "10rem");
        assert_eq!(theme.effects.nav_shape, NavShape::Rounded);
        assert_eq!(theme.background.effect(), BackgroundEffect::Net);
        assert_eq!(theme.background.backdrop_filter.blur, 5.0);
        assert_eq!(theme.background.backdrop_filter.gradient_opacity, 0.23);
    }

    #[test]
    fn test_colors_update_is_shallow() {
        let mut colors = Colors::default();
        let before = colors.clone();

        ColorsUpdate {
            primary: Some(Hsl::new(10.0, 20.0, 30.0)),
            ..Default::default()
        }
        .apply_to(&mut colors);

        assert_eq!(colors.primary, Hsl::new(10.0, 20.0, 30.0));
        assert_eq!(colors.secondary, before.secondary);
        assert_eq!(colors.accent, before.accent);
        assert_eq!(colors.background, before.background);
        assert_eq!(colors.borders, before.borders);
    }

    #[test]
    fn test_nested_object_replaced_wholesale() {
        let mut colors = Colors::default();
        let new_gradient = PageGradient {
            start: Hsl::new(1.0, 2.0, 3.0),
            end: Hsl::new(4.0, 5.0, 6.0),
        };
        ColorsUpdate {
            background: Some(new_gradient),
            ..Default::default()
        }
        .apply_to(&mut colors);
        assert_eq!(colors.background, new_gradient);
    }

    #[test]
    fn test_fonts_update_keeps_untouched_fields() {
        let mut fonts = Fonts::default();
        FontsUpdate {
            heading: Some("Orbitron".to_string()),
            ..Default::default()
        }
        .apply_to(&mut fonts);
        assert_eq!(fonts.heading, "Orbitron");
        assert_eq!(fonts.body, "Inter");
        assert_eq!(fonts.sizes, FontSizes::default());
    }

    #[test]
    fn test_effects_update_from_partial_json() {
        let update: EffectsUpdate =
            serde_json::from_str(r#"{"navShape": "beveled", "glowIntensity": 0.3}"#).unwrap();
        let mut effects = Effects::default();
        update.apply_to(&mut effects);
        assert_eq!(effects.nav_shape, NavShape::Beveled);
        assert_eq!(effects.glow_intensity, 0.3);
        assert_eq!(effects.border_radius, "0.75rem");
    }

    #[test]
    fn test_background_update_switches_effect_with_empty_config() {
        let mut background = BackgroundState {
            vanta: VantaConfig::Net(NetConfig {
                points: Some(12),
                ..Default::default()
            }),
            ..Default::default()
        };

        BackgroundUpdate {
            vanta_effect: Some(BackgroundEffect::Waves),
            ..Default::default()
        }
        .apply_to(&mut background);

        assert_eq!(background.vanta, VantaConfig::Waves(WavesConfig::default()));
    }

    #[test]
    fn test_background_update_same_effect_keeps_config() {
        let config = VantaConfig::Net(NetConfig {
            points: Some(12),
            ..Default::default()
        });
        let mut background = BackgroundState {
            vanta: config.clone(),
            ..Default::default()
        };

        BackgroundUpdate {
            vanta_effect: Some(BackgroundEffect::Net),
            ..Default::default()
        }
        .apply_to(&mut background);

        assert_eq!(background.vanta, config);
    }

    #[test]
    fn test_background_update_reads_export_shape() {
        let update: BackgroundUpdate = serde_json::from_str(
            r#"{"vantaEffect": "net", "vantaConfig": {"points": 9, "glitter": 1}}"#,
        )
        .unwrap();
        assert_eq!(
            update.vanta_config,
            Some(VantaConfig::Net(NetConfig {
                points: Some(9),
                ..Default::default()
            }))
        );

        let mut background = BackgroundState::default();
        update.apply_to(&mut background);
        assert_eq!(background.vanta.to_value(), serde_json::json!({ "points": 9 }));
    }

    #[test]
    fn test_background_update_partial_and_invalid_shapes() {
        let update: BackgroundUpdate = serde_json::from_str(r#"{"vantaEffect": "waves"}"#).unwrap();
        assert_eq!(update.vanta_effect, Some(BackgroundEffect::Waves));
        assert_eq!(update.vanta_config, None);

        let update: BackgroundUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(update, BackgroundUpdate::default());

        assert!(serde_json::from_str::<BackgroundUpdate>(r#"{"vantaConfig": {"points": 9}}"#).is_err());
    }

    #[test]
    fn test_backdrop_filter_update() {
        let mut filter = BackdropFilter::default();
        BackdropFilterUpdate {
            blur: Some(12.0),
            ..Default::default()
        }
        .apply_to(&mut filter);
        assert_eq!(filter.blur, 12.0);
        assert_eq!(filter.gradient_opacity, 0.23);
        assert_eq!(filter.gradient, BackdropGradient::default());
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let json = serde_json::to_value(Theme::default()).unwrap();
        assert!(json["spacing"].get("sectionMd").is_some());
        assert!(json["effects"].get("animationSpeed").is_some());
        assert_eq!(json["effects"]["navShape"], "rounded");
        assert_eq!(json["background"]["vantaEffect"], "net");
        assert!(json["background"]["vantaConfig"].is_object());
        assert!(json["background"]["backdropFilter"]["gradient"]
            .get("color1Percent")
            .is_some());
    }

    #[test]
    fn test_effects_extras_default_when_missing() {
        let mut json = serde_json::to_value(Effects::default()).unwrap();
        let obj = json.as_object_mut().unwrap();
        for key in ["shadowEnabled", "cardColor", "glowEnabled", "componentBlur", "navShape"] {
            obj.remove(key);
        }
        let effects: Effects = serde_json::from_value(json).unwrap();
        assert_eq!(effects, Effects::default());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let mut theme = Theme::default();
        theme.colors.primary.h = 400.0;
        theme.effects.card_opacity = 1.5;
        theme.background.backdrop_filter.gradient_opacity = -0.1;

        match theme.validate() {
            Err(Error::ThemeValidation(errors)) => {
                assert_eq!(errors.len(), 3, "{errors:?}");
                assert!(errors.iter().any(|e| e.starts_with("colors.primary.h")));
                assert!(errors.iter().any(|e| e.starts_with("effects.cardOpacity")));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}

//! Built-in theme presets.
//!
//! A preset carries every theme branch except the background, so loading one
//! restyles the page while the background effect stays as the user left it.

use std::sync::LazyLock;

use crate::color::Hsl;
use crate::theme::{
    Colors, ColorsUpdate, Effects, EffectsUpdate, Fonts, FontsUpdate, PageGradient, Spacing, Theme,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub fonts: Fonts,
    pub colors: Colors,
    pub spacing: Spacing,
    pub effects: Effects,
}

impl Preset {
    /// Overwrite every branch of `theme` except the background.
    pub fn apply_to(&self, theme: &mut Theme) {
        theme.fonts = self.fonts.clone();
        theme.colors = self.colors.clone();
        theme.spacing = self.spacing.clone();
        theme.effects = self.effects.clone();
    }
}

static PRESETS: LazyLock<Vec<Preset>> = LazyLock::new(build_presets);

/// All presets, `default` first.
pub fn all() -> &'static [Preset] {
    &PRESETS
}

pub fn find(id: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|preset| preset.id == id)
}

pub fn ids() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|preset| preset.id)
}

/// Look of a preset on top of the default theme.
struct Look {
    heading: &'static str,
    body: &'static str,
    primary: Hsl,
    secondary: Hsl,
    background: (Hsl, Hsl),
    border_radius: &'static str,
    border_width: &'static str,
    border_color: Hsl,
    shadow_intensity: f64,
    shadow_color: Hsl,
    card_opacity: f64,
    glow_intensity: f64,
    saturate: f64,
    brightness: f64,
}

fn styled(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    look: Look,
) -> Preset {
    let defaults = Theme::default();
    let mut fonts = defaults.fonts;
    let mut colors = defaults.colors;
    let mut effects = defaults.effects;

    FontsUpdate {
        heading: Some(look.heading.to_string()),
        body: Some(look.body.to_string()),
        ..Default::default()
    }
    .apply_to(&mut fonts);

    ColorsUpdate {
        primary: Some(look.primary),
        secondary: Some(look.secondary),
        background: Some(PageGradient {
            start: look.background.0,
            end: look.background.1,
        }),
        ..Default::default()
    }
    .apply_to(&mut colors);

    EffectsUpdate {
        border_radius: Some(look.border_radius.to_string()),
        border_width: Some(look.border_width.to_string()),
        border_color: Some(look.border_color),
        shadow_intensity: Some(look.shadow_intensity),
        shadow_color: Some(look.shadow_color),
        card_opacity: Some(look.card_opacity),
        glow_intensity: Some(look.glow_intensity),
        saturate: Some(look.saturate),
        brightness: Some(look.brightness),
        ..Default::default()
    }
    .apply_to(&mut effects);

    Preset {
        id,
        name,
        description,
        fonts,
        colors,
        spacing: defaults.spacing,
        effects,
    }
}

const fn hsl(h: f64, s: f64, l: f64) -> Hsl {
    Hsl::new(h, s, l)
}

fn build_presets() -> Vec<Preset> {
    let defaults = Theme::default();
    let default = Preset {
        id: "default",
        name: "Default",
        description: "Original cyber-physical theme",
        fonts: defaults.fonts,
        colors: defaults.colors,
        spacing: defaults.spacing,
        effects: defaults.effects,
    };

    vec![
        default,
        styled(
            "cyberpunk",
            "Cyberpunk",
            "Neon pink and cyan vibes",
            Look {
                heading: "Space Grotesk",
                body: "Inter",
                primary: hsl(320.0, 100.0, 50.0),
                secondary: hsl(180.0, 100.0, 50.0),
                background: (hsl(280.0, 30.0, 10.0), hsl(240.0, 30.0, 5.0)),
                border_radius: "0.25rem",
                border_width: "2px",
                border_color: hsl(320.0, 100.0, 50.0),
                shadow_intensity: 0.8,
                shadow_color: hsl(320.0, 100.0, 30.0),
                card_opacity: 0.15,
                glow_intensity: 0.3,
                saturate: 1.3,
                brightness: 1.1,
            },
        ),
        styled(
            "professional",
            "Professional",
            "Corporate blue and orange",
            Look {
                heading: "Montserrat",
                body: "Open Sans",
                primary: hsl(210.0, 80.0, 50.0),
                secondary: hsl(25.0, 80.0, 50.0),
                background: (hsl(220.0, 15.0, 12.0), hsl(210.0, 15.0, 8.0)),
                border_radius: "0.375rem",
                border_width: "1px",
                border_color: hsl(210.0, 60.0, 55.0),
                shadow_intensity: 0.4,
                shadow_color: hsl(210.0, 50.0, 25.0),
                card_opacity: 0.12,
                glow_intensity: 0.15,
                saturate: 1.0,
                brightness: 1.0,
            },
        ),
        styled(
            "minimal",
            "Minimal",
            "Clean black and white",
            Look {
                heading: "Outfit",
                body: "Work Sans",
                primary: hsl(0.0, 0.0, 100.0),
                secondary: hsl(0.0, 0.0, 50.0),
                background: (hsl(0.0, 0.0, 5.0), hsl(0.0, 0.0, 0.0)),
                border_radius: "0rem",
                border_width: "1px",
                border_color: hsl(0.0, 0.0, 20.0),
                shadow_intensity: 0.0,
                shadow_color: hsl(0.0, 0.0, 0.0),
                card_opacity: 0.05,
                glow_intensity: 0.0,
                saturate: 0.8,
                brightness: 0.9,
            },
        ),
        styled(
            "sunset",
            "Sunset",
            "Warm orange and pink tones",
            Look {
                heading: "Playfair Display",
                body: "Inter",
                primary: hsl(30.0, 100.0, 60.0),
                secondary: hsl(280.0, 60.0, 50.0),
                background: (hsl(20.0, 40.0, 15.0), hsl(260.0, 40.0, 10.0)),
                border_radius: "1.5rem",
                border_width: "1px",
                border_color: hsl(30.0, 100.0, 60.0),
                shadow_intensity: 0.5,
                shadow_color: hsl(30.0, 80.0, 30.0),
                card_opacity: 0.15,
                glow_intensity: 0.25,
                saturate: 1.4,
                brightness: 1.15,
            },
        ),
        styled(
            "ocean",
            "Ocean",
            "Cool blue depths",
            Look {
                heading: "Inter",
                body: "Work Sans",
                primary: hsl(195.0, 90.0, 55.0),
                secondary: hsl(230.0, 90.0, 60.0),
                background: (hsl(200.0, 40.0, 15.0), hsl(220.0, 40.0, 10.0)),
                border_radius: "0.5rem",
                border_width: "1px",
                border_color: hsl(195.0, 70.0, 60.0),
                shadow_intensity: 0.3,
                shadow_color: hsl(200.0, 60.0, 20.0),
                card_opacity: 0.1,
                glow_intensity: 0.15,
                saturate: 1.1,
                brightness: 1.0,
            },
        ),
        styled(
            "midnight",
            "Midnight",
            "Deep purple and dark blue",
            Look {
                heading: "Orbitron",
                body: "Roboto",
                primary: hsl(270.0, 70.0, 60.0),
                secondary: hsl(240.0, 60.0, 50.0),
                background: (hsl(260.0, 30.0, 8.0), hsl(240.0, 30.0, 3.0)),
                border_radius: "0.75rem",
                border_width: "1px",
                border_color: hsl(270.0, 60.0, 50.0),
                shadow_intensity: 0.7,
                shadow_color: hsl(270.0, 70.0, 20.0),
                card_opacity: 0.08,
                glow_intensity: 0.25,
                saturate: 1.1,
                brightness: 0.85,
            },
        ),
        styled(
            "forest",
            "Forest",
            "Natural green tones",
            Look {
                heading: "Poppins",
                body: "Lato",
                primary: hsl(140.0, 60.0, 45.0),
                secondary: hsl(85.0, 50.0, 50.0),
                background: (hsl(130.0, 25.0, 12.0), hsl(150.0, 20.0, 8.0)),
                border_radius: "1rem",
                border_width: "2px",
                border_color: hsl(140.0, 50.0, 50.0),
                shadow_intensity: 0.4,
                shadow_color: hsl(130.0, 60.0, 15.0),
                card_opacity: 0.12,
                glow_intensity: 0.2,
                saturate: 1.3,
                brightness: 0.95,
            },
        ),
        styled(
            "neon",
            "Neon",
            "Tokyo-style hot pink and purple",
            Look {
                heading: "Exo 2",
                body: "Rajdhani",
                primary: hsl(330.0, 100.0, 65.0),
                secondary: hsl(280.0, 100.0, 70.0),
                background: (hsl(300.0, 20.0, 8.0), hsl(280.0, 20.0, 3.0)),
                border_radius: "0.5rem",
                border_width: "2px",
                border_color: hsl(330.0, 100.0, 65.0),
                shadow_intensity: 0.8,
                shadow_color: hsl(330.0, 100.0, 40.0),
                card_opacity: 0.1,
                glow_intensity: 0.4,
                saturate: 1.5,
                brightness: 1.15,
            },
        ),
        styled(
            "arctic",
            "Arctic",
            "Icy blue and white",
            Look {
                heading: "Quicksand",
                body: "Nunito",
                primary: hsl(190.0, 70.0, 75.0),
                secondary: hsl(200.0, 60.0, 85.0),
                background: (hsl(195.0, 30.0, 15.0), hsl(200.0, 25.0, 10.0)),
                border_radius: "1.25rem",
                border_width: "1px",
                border_color: hsl(190.0, 50.0, 70.0),
                shadow_intensity: 0.25,
                shadow_color: hsl(190.0, 60.0, 30.0),
                card_opacity: 0.15,
                glow_intensity: 0.3,
                saturate: 0.8,
                brightness: 1.1,
            },
        ),
        styled(
            "volcano",
            "Volcano",
            "Fiery red and molten orange",
            Look {
                heading: "Bebas Neue",
                body: "Oxygen",
                primary: hsl(10.0, 90.0, 55.0),
                secondary: hsl(35.0, 95.0, 50.0),
                background: (hsl(15.0, 35.0, 10.0), hsl(5.0, 30.0, 5.0)),
                border_radius: "0.625rem",
                border_width: "2px",
                border_color: hsl(10.0, 80.0, 55.0),
                shadow_intensity: 0.65,
                shadow_color: hsl(10.0, 90.0, 25.0),
                card_opacity: 0.12,
                glow_intensity: 0.35,
                saturate: 1.4,
                brightness: 1.05,
            },
        ),
        styled(
            "vintage",
            "Vintage",
            "Warm retro gold and brown",
            Look {
                heading: "Abril Fatface",
                body: "Merriweather",
                primary: hsl(35.0, 70.0, 55.0),
                secondary: hsl(20.0, 60.0, 50.0),
                background: (hsl(30.0, 20.0, 12.0), hsl(25.0, 18.0, 8.0)),
                border_radius: "0.25rem",
                border_width: "2px",
                border_color: hsl(35.0, 60.0, 50.0),
                shadow_intensity: 0.5,
                shadow_color: hsl(25.0, 50.0, 20.0),
                card_opacity: 0.14,
                glow_intensity: 0.1,
                saturate: 0.9,
                brightness: 0.95,
            },
        ),
    ]
}

//! Random theme generators.
//!
//! Every generator takes the RNG explicitly so callers can seed it. The
//! generators are total: any RNG output produces a valid branch.

use rand::Rng;

use crate::background::{
    BackgroundEffect, BirdsConfig, CellsConfig, Clouds2Config, CloudsConfig, DotsConfig, FogConfig,
    GlobeConfig, GravityStarsConfig, HaloConfig, NetConfig, RingsConfig, TopologyConfig,
    TrunkConfig, VantaConfig, WavesConfig,
};
use crate::color::{Hsl, WcagLevel, contrast_ratio, fmt_num, meets_wcag};
use crate::theme::{
    BackdropFilter, BackdropGradient, BackgroundState, BorderOpacities, Colors, EffectsUpdate,
    FontSizes, FontWeights, Fonts, Opacity, PageGradient, SectionFade, TextColors,
    TransitionDurations,
};

pub const DISPLAY_FONTS: [&str; 19] = [
    "Inter",
    "Roboto",
    "Poppins",
    "Montserrat",
    "Open Sans",
    "Lato",
    "Nunito",
    "Work Sans",
    "Outfit",
    "Space Grotesk",
    "Orbitron",
    "Exo 2",
    "Rajdhani",
    "Quicksand",
    "Bebas Neue",
    "Abril Fatface",
    "Playfair Display",
    "Merriweather",
    "Fira Code",
];

pub const MONO_FONTS: [&str; 8] = [
    "JetBrains Mono",
    "Fira Code",
    "Source Code Pro",
    "IBM Plex Mono",
    "Inconsolata",
    "Cascadia Code",
    "Space Mono",
    "Courier Prime",
];

/// Minimum circular hue distance from secondary to primary and to accent.
pub const MIN_HUE_SEPARATION: f64 = 120.0;

/// Hand-picked `(primary, secondary, accent)` triples that read well on any
/// generated page background.
pub const CURATED_PALETTES: [(Hsl, Hsl, Hsl); 6] = [
    (
        Hsl::new(180.0, 100.0, 50.0),
        Hsl::new(300.0, 100.0, 60.0),
        Hsl::new(60.0, 100.0, 60.0),
    ),
    (
        Hsl::new(45.0, 100.0, 55.0),
        Hsl::new(200.0, 90.0, 60.0),
        Hsl::new(320.0, 80.0, 65.0),
    ),
    (
        Hsl::new(140.0, 70.0, 55.0),
        Hsl::new(270.0, 70.0, 70.0),
        Hsl::new(40.0, 90.0, 60.0),
    ),
    (
        Hsl::new(330.0, 90.0, 70.0),
        Hsl::new(90.0, 70.0, 55.0),
        Hsl::new(220.0, 80.0, 65.0),
    ),
    (
        Hsl::new(20.0, 95.0, 60.0),
        Hsl::new(170.0, 80.0, 50.0),
        Hsl::new(300.0, 70.0, 70.0),
    ),
    (
        Hsl::new(60.0, 90.0, 55.0),
        Hsl::new(200.0, 85.0, 60.0),
        Hsl::new(330.0, 70.0, 70.0),
    ),
];

/// Circular distance between two hues, in `[0, 180]`.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

fn int<R: Rng + ?Sized>(rng: &mut R, low: u32, high: u32) -> f64 {
    f64::from(rng.random_range(low..high))
}

fn range<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> f64 {
    rng.random_range(low..high)
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items[rng.random_range(0..items.len())]
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn rem<R: Rng + ?Sized>(rng: &mut R, low: f64, high: f64) -> String {
    format!("{:.2}rem", range(rng, low, high))
}

pub fn generate_fonts<R: Rng + ?Sized>(rng: &mut R) -> Fonts {
    Fonts {
        heading: pick(rng, &DISPLAY_FONTS).to_string(),
        body: pick(rng, &DISPLAY_FONTS).to_string(),
        mono: pick(rng, &MONO_FONTS).to_string(),
        sizes: FontSizes {
            h1: rem(rng, 3.0, 6.0),
            h2: rem(rng, 2.0, 4.0),
            h3: rem(rng, 1.5, 3.0),
            h4: rem(rng, 1.2, 2.0),
            body: rem(rng, 0.9, 1.2),
            small: rem(rng, 0.7, 0.9),
        },
        weights: FontWeights::default(),
    }
}

/// Triadic-ish palette on a dark page gradient.
///
/// Secondary sits 120-180 degrees from primary, accent the same distance from
/// secondary. If the primary is unreadable as large text on the page start
/// color, a curated palette is substituted.
pub fn generate_colors<R: Rng + ?Sized>(rng: &mut R) -> Colors {
    let primary_hue = int(rng, 0, 360);
    let secondary_hue = (primary_hue + 120.0 + int(rng, 0, 60)) % 360.0;
    let accent_hue = (secondary_hue + 120.0 + int(rng, 0, 60)) % 360.0;

    let mut primary = Hsl::new(primary_hue, int(rng, 60, 100), int(rng, 45, 65));
    let mut secondary = Hsl::new(secondary_hue, int(rng, 60, 100), int(rng, 45, 65));
    let mut accent = Hsl::new(accent_hue, int(rng, 60, 90), int(rng, 50, 70));

    let background = PageGradient {
        start: Hsl::new(int(rng, 0, 360), int(rng, 10, 30), int(rng, 5, 15)),
        end: Hsl::new(int(rng, 0, 360), int(rng, 10, 30), int(rng, 2, 8)),
    };

    let ratio = contrast_ratio(primary, background.start);
    if !meets_wcag(ratio, WcagLevel::Aa, true) {
        let index = rng.random_range(0..CURATED_PALETTES.len());
        tracing::debug!(
            "Generated primary has contrast {:.2}:1 on the page, using curated palette {}",
            ratio,
            index
        );
        (primary, secondary, accent) = CURATED_PALETTES[index];
    }

    Colors {
        primary,
        secondary,
        accent,
        background,
        text: TextColors::default(),
        borders: BorderOpacities {
            primary: Opacity::new(round_to(range(rng, 0.1, 0.3), 2)),
            secondary: Opacity::new(round_to(range(rng, 0.1, 0.3), 2)),
            glass: Opacity::new(round_to(range(rng, 0.05, 0.15), 2)),
        },
    }
}

/// Random effects. Component blur and nav shape are left unset so the
/// current values survive the merge.
pub fn generate_effects<R: Rng + ?Sized>(rng: &mut R) -> EffectsUpdate {
    EffectsUpdate {
        border_radius: Some(format!("{}rem", fmt_num(int(rng, 0, 12) * 0.25))),
        border_width: Some(format!("{}px", int(rng, 1, 4))),
        border_color: Some(Hsl::new(int(rng, 0, 360), int(rng, 40, 100), int(rng, 40, 80))),
        blur: Some(format!("{}px", int(rng, 0, 20))),
        shadow_enabled: Some(rng.random_bool(0.7)),
        shadow_intensity: Some(round_to(range(rng, 0.0, 0.8), 2)),
        shadow_color: Some(Hsl::new(int(rng, 0, 360), int(rng, 30, 80), int(rng, 10, 50))),
        card_color: Some(Hsl::new(int(rng, 0, 360), int(rng, 0, 30), int(rng, 90, 100))),
        card_opacity: Some(round_to(range(rng, 0.05, 0.2), 2)),
        glow_enabled: Some(rng.random_bool(0.5)),
        glow_intensity: Some(round_to(range(rng, 0.0, 0.5), 2)),
        saturate: Some(round_to(range(rng, 0.5, 1.5), 2)),
        brightness: Some(round_to(range(rng, 0.75, 1.25), 2)),
        animation_speed: Some(round_to(range(rng, 0.5, 2.0), 1)),
        section_fade: Some(SectionFade {
            intensity: round_to(range(rng, 0.1, 0.4), 2),
            blur: int(rng, 2, 8),
        }),
        transition_duration: Some(TransitionDurations::default()),
        component_blur: None,
        nav_shape: None,
    }
}

/// Random effect with a configuration that only uses keys the effect
/// understands, plus a matching backdrop gradient.
pub fn generate_background<R: Rng + ?Sized>(rng: &mut R) -> BackgroundState {
    let effect = BackgroundEffect::ALL[rng.random_range(0..BackgroundEffect::ALL.len())];

    let base_hue = int(rng, 0, 360);
    let base = Hsl::new(base_hue, int(rng, 20, 80), int(rng, 5, 20));
    let primary_hue = (base_hue + 180.0) % 360.0;
    let secondary_hue = (base_hue + 60.0) % 360.0;

    let bg = base.to_hex_u32();
    let primary = Hsl::new(primary_hue, 70.0, 60.0).to_hex_u32();
    let secondary = Hsl::new(secondary_hue, 70.0, 60.0).to_hex_u32();

    let vanta = match effect {
        BackgroundEffect::Fog => VantaConfig::Fog(FogConfig {
            highlight_color: Some(secondary),
            midtone_color: Some(primary),
            lowlight_color: Some(bg),
            base_color: Some(bg),
            blur_factor: Some(range(rng, 0.4, 0.9)),
            zoom: Some(range(rng, 0.8, 1.5)),
            speed: Some(range(rng, 1.0, 3.0)),
        }),
        BackgroundEffect::Net => VantaConfig::Net(NetConfig {
            color: Some(primary),
            background_color: Some(bg),
            points: Some(rng.random_range(8..15)),
            max_distance: Some(range(rng, 18.0, 26.0)),
            spacing: Some(range(rng, 14.0, 22.0)),
            show_dots: Some(rng.random_bool(0.7)),
        }),
        BackgroundEffect::Birds => VantaConfig::Birds(BirdsConfig {
            background_color: Some(bg),
            color1: Some(primary),
            color2: Some(secondary),
            color_mode: Some(pick(rng, &["complexity", "simple", "beacon"]).to_string()),
            quantity: Some(rng.random_range(2..5)),
            bird_size: Some(range(rng, 0.8, 1.5)),
            speed_limit: Some(range(rng, 3.0, 6.0)),
            ..Default::default()
        }),
        BackgroundEffect::Cells => VantaConfig::Cells(CellsConfig {
            color1: Some(primary),
            color2: Some(secondary),
            size: Some(range(rng, 1.0, 2.5)),
            speed: Some(range(rng, 1.0, 3.0)),
        }),
        BackgroundEffect::Clouds => VantaConfig::Clouds(CloudsConfig {
            background_color: Some(bg),
            sky_color: Some(bg),
            cloud_color: Some(primary),
            speed: Some(range(rng, 0.5, 1.5)),
            ..Default::default()
        }),
        BackgroundEffect::Clouds2 => VantaConfig::Clouds2(Clouds2Config {
            background_color: Some(bg),
            sky_color: Some(bg),
            cloud_color: Some(primary),
            speed: Some(range(rng, 0.5, 1.5)),
            ..Default::default()
        }),
        BackgroundEffect::Dots => VantaConfig::Dots(DotsConfig {
            background_color: Some(bg),
            color: Some(primary),
            color2: Some(secondary),
            size: Some(range(rng, 2.0, 4.0)),
            spacing: Some(range(rng, 25.0, 45.0)),
            show_lines: Some(rng.random_bool(0.6)),
        }),
        BackgroundEffect::Globe => VantaConfig::Globe(GlobeConfig {
            background_color: Some(bg),
            color: Some(primary),
            color2: Some(secondary),
            size: Some(range(rng, 0.8, 1.4)),
        }),
        BackgroundEffect::Halo => VantaConfig::Halo(HaloConfig {
            background_color: Some(bg),
            base_color: Some(primary),
            size: Some(range(rng, 1.0, 2.0)),
            amplitude_factor: Some(range(rng, 1.0, 2.0)),
            ..Default::default()
        }),
        BackgroundEffect::Rings => VantaConfig::Rings(RingsConfig {
            background_color: Some(bg),
            color: Some(primary),
            ..Default::default()
        }),
        BackgroundEffect::Topology => VantaConfig::Topology(TopologyConfig {
            background_color: Some(bg),
            color: Some(primary),
        }),
        BackgroundEffect::Trunk => VantaConfig::Trunk(TrunkConfig {
            background_color: Some(bg),
            color: Some(primary),
            spacing: Some(range(rng, 1.0, 6.0)),
            chaos: Some(range(rng, 1.0, 4.0)),
        }),
        BackgroundEffect::Waves => VantaConfig::Waves(WavesConfig {
            color: Some(primary),
            shininess: Some(range(rng, 20.0, 60.0)),
            wave_height: Some(range(rng, 10.0, 25.0)),
            wave_speed: Some(range(rng, 0.5, 1.5)),
            zoom: Some(range(rng, 0.8, 1.3)),
        }),
        BackgroundEffect::GravityStars => VantaConfig::GravityStars(GravityStarsConfig {
            stars_count: Some(rng.random_range(200..600)),
            stars_size: Some(range(rng, 1.5, 3.0)),
            stars_opacity: Some(range(rng, 0.6, 1.0)),
            stars_glow: Some(range(rng, 0.3, 0.8)),
        }),
    };

    // Blur and overlay opacity stay fixed; only the gradient varies.
    let backdrop_filter = BackdropFilter {
        enabled: true,
        blur: 5.0,
        gradient_opacity: 0.23,
        gradient: BackdropGradient {
            enabled: true,
            angle: int(rng, 90, 180),
            radius: int(rng, 400, 900),
            color1: Hsl::new(primary_hue, int(rng, 60, 90), int(rng, 45, 65)),
            color2: Hsl::new(secondary_hue, int(rng, 60, 90), int(rng, 45, 65)),
            color1_percent: int(rng, 30, 45),
            color2_percent: int(rng, 55, 70),
        },
    };

    BackgroundState {
        vanta,
        backdrop_filter,
    }
}

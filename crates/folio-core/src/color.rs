//! Color-space conversions and WCAG contrast math.
//!
//! Everything here is pure and deterministic. Theme colors are stored as
//! [`Hsl`] triples; the helpers convert them to RGB/hex for luminance math,
//! for the background renderer (which wants `0xRRGGBB` integers) and for CSS.

use serde::{Deserialize, Serialize};

// WCAG 2.x thresholds
const AA_NORMAL: f64 = 4.5;
const AA_LARGE: f64 = 3.0;
const AAA_NORMAL: f64 = 7.0;
const AAA_LARGE: f64 = 4.5;

// Backgrounds brighter than this get black text
const TEXT_LUMINANCE_THRESHOLD: f64 = 0.5;

/// Hue/saturation/lightness color. Hue in degrees `[0, 360)`,
/// saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const WHITE: Hsl = Hsl::new(0.0, 0.0, 100.0);
    pub const BLACK: Hsl = Hsl::new(0.0, 0.0, 0.0);

    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Rgb {
        hsl_to_rgb(self.h, self.s, self.l)
    }

    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }

    /// Packed `0xRRGGBB`, the color format the background renderer consumes.
    pub fn to_hex_u32(self) -> u32 {
        let Rgb { r, g, b } = self.to_rgb();
        (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b)
    }

    pub fn luminance(self) -> f64 {
        self.to_rgb().luminance()
    }

    /// Space-separated triplet (`"180 100% 50%"`) for use inside `hsl(var(--x))`.
    pub fn css_triplet(self) -> String {
        format!("{} {}% {}%", fmt_num(self.h), fmt_num(self.s), fmt_num(self.l))
    }

    pub fn css(self) -> String {
        format!("hsl({})", self.css_triplet())
    }

    pub fn css_alpha(self, alpha: f64) -> String {
        format!(
            "hsla({}, {}%, {}%, {})",
            fmt_num(self.h),
            fmt_num(self.s),
            fmt_num(self.l),
            fmt_num(alpha)
        )
    }

    /// Check the HSL invariants, pushing a message per violation.
    pub(crate) fn check(self, path: &str, errors: &mut Vec<String>) {
        if !(0.0..360.0).contains(&self.h) {
            errors.push(format!("{path}.h: {} is outside [0, 360)", self.h));
        }
        if !(0.0..=100.0).contains(&self.s) {
            errors.push(format!("{path}.s: {} is outside [0, 100]", self.s));
        }
        if !(0.0..=100.0).contains(&self.l) {
            errors.push(format!("{path}.l: {} is outside [0, 100]", self.l));
        }
    }
}

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hex(self) -> String {
        rgb_to_hex(self.r, self.g, self.b)
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self.r, self.g, self.b)
    }

    pub fn luminance(self) -> f64 {
        relative_luminance(self.r, self.g, self.b)
    }
}

/// Convert HSL (degrees, percent, percent) to 8-bit RGB.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let s = s / 100.0;
    let l = l / 100.0;

    let k = |n: f64| (n + h / 30.0).rem_euclid(12.0);
    let a = s * l.min(1.0 - l);
    let f = |n: f64| {
        let k = k(n);
        l - a * (-1.0_f64).max((k - 3.0).min(9.0 - k).min(1.0))
    };

    let channel = |v: f64| (255.0 * v).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(f(0.0)), channel(f(8.0)), channel(f(4.0)))
}

/// Convert 8-bit RGB to HSL (degrees, percent, percent).
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> Hsl {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    let l = (max + min) / 2.0;

    if delta == 0.0 {
        return Hsl::new(0.0, 0.0, l * 100.0);
    }

    let s = delta / (1.0 - (2.0 * l - 1.0).abs());
    let h = if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    Hsl::new(h.rem_euclid(360.0), s * 100.0, l * 100.0)
}

/// Convert HSL directly to a `#rrggbb` string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

/// Convert RGB tuple to hex color string.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parse a hex color string (`#rrggbb`, `rrggbb`, `#rgb`). Returns None if invalid.
pub fn parse_hex_color(color: &str) -> Option<Rgb> {
    let color = color.trim().trim_start_matches('#');

    // Expand shorthand (e.g., "fff" -> "ffffff")
    let color = if color.len() == 3 {
        color.chars().flat_map(|c| [c, c]).collect::<String>()
    } else {
        color.to_string()
    };

    if color.len() != 6 || !color.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&color[0..2], 16).ok()?;
    let g = u8::from_str_radix(&color[2..4], 16).ok()?;
    let b = u8::from_str_radix(&color[4..6], 16).ok()?;

    Some(Rgb::new(r, g, b))
}

/// Calculate relative luminance per WCAG formula (0.0 = black, 1.0 = white).
pub fn relative_luminance(r: u8, g: u8, b: u8) -> f64 {
    fn channel(c: u8) -> f64 {
        let c_srgb = f64::from(c) / 255.0;
        if c_srgb <= 0.03928 {
            c_srgb / 12.92
        } else {
            ((c_srgb + 0.055) / 1.055).powf(2.4)
        }
    }

    0.2126 * channel(r) + 0.7152 * channel(g) + 0.0722 * channel(b)
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
pub fn contrast_ratio(a: Hsl, b: Hsl) -> f64 {
    contrast_ratio_luminance(a.luminance(), b.luminance())
}

/// Contrast ratio from two precomputed luminances.
pub fn contrast_ratio_luminance(a: f64, b: f64) -> f64 {
    let lighter = a.max(b);
    let darker = a.min(b);
    (lighter + 0.05) / (darker + 0.05)
}

/// WCAG conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WcagLevel {
    #[default]
    Aa,
    Aaa,
}

impl WcagLevel {
    /// Minimum ratio for this level.
    pub fn threshold(self, large_text: bool) -> f64 {
        match (self, large_text) {
            (WcagLevel::Aa, false) => AA_NORMAL,
            (WcagLevel::Aa, true) => AA_LARGE,
            (WcagLevel::Aaa, false) => AAA_NORMAL,
            (WcagLevel::Aaa, true) => AAA_LARGE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WcagLevel::Aa => "AA",
            WcagLevel::Aaa => "AAA",
        }
    }
}

/// Whether a contrast ratio satisfies the given WCAG level.
pub fn meets_wcag(ratio: f64, level: WcagLevel, large_text: bool) -> bool {
    ratio >= level.threshold(large_text)
}

/// Black or white text, whichever reads better on `background`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextTone {
    Black,
    White,
}

impl TextTone {
    pub fn as_str(self) -> &'static str {
        match self {
            TextTone::Black => "black",
            TextTone::White => "white",
        }
    }

    pub fn to_hsl(self) -> Hsl {
        match self {
            TextTone::Black => Hsl::BLACK,
            TextTone::White => Hsl::WHITE,
        }
    }
}

/// Recommended text tone: black on light backgrounds, white on dark ones.
pub fn accessible_text_color(background: Hsl) -> TextTone {
    if background.luminance() > TEXT_LUMINANCE_THRESHOLD {
        TextTone::Black
    } else {
        TextTone::White
    }
}

/// [`accessible_text_color`] as an HSL color.
pub fn safe_text_color(background: Hsl) -> Hsl {
    accessible_text_color(background).to_hsl()
}

/// Result of checking a text/background pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastCheck {
    pub ratio: f64,
    pub accessible: bool,
    /// Set only when the pair fails.
    pub recommendation: Option<String>,
}

/// Check a text/background combination against a WCAG level.
pub fn check_combination(
    text: Hsl,
    background: Hsl,
    level: WcagLevel,
    large_text: bool,
) -> ContrastCheck {
    let ratio = contrast_ratio(text, background);
    let accessible = meets_wcag(ratio, level, large_text);

    let recommendation = (!accessible).then(|| {
        format!(
            "Use {} text for better contrast (current: {:.2}:1, required: {}:1)",
            accessible_text_color(background).as_str(),
            ratio,
            fmt_num(level.threshold(large_text))
        )
    });

    ContrastCheck {
        ratio,
        accessible,
        recommendation,
    }
}

/// Format a number without a trailing `.0` for whole values.
pub(crate) fn fmt_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        let s = format!("{:.3}", value);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

//! Pushing the theme into a render target.
//!
//! Every leaf of the theme becomes one named style property (custom property
//! names without the leading `--`). The page background is set separately
//! because it is not a custom property.

use std::collections::BTreeMap;

use crate::background::BackgroundEffect;
use crate::color::{Hsl, fmt_num};
use crate::theme::Theme;

/// Page background fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageBackground {
    /// Let a natively drawn effect show through.
    Transparent,
    Gradient { start: Hsl, end: Hsl },
}

impl PageBackground {
    pub fn css(&self) -> String {
        match self {
            PageBackground::Transparent => "transparent".to_string(),
            PageBackground::Gradient { start, end } => {
                format!("linear-gradient(to bottom, {}, {})", start.css(), end.css())
            }
        }
    }
}

/// Anything that accepts named style properties and a page background.
pub trait RenderTarget {
    fn set_property(&mut self, name: &str, value: &str);
    fn set_page_background(&mut self, background: PageBackground);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Clear the page background while `gravity-stars` is selected.
    pub transparent_for_starfield: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            transparent_for_starfield: true,
        }
    }
}

/// Write every theme value into `target`. Idempotent.
pub fn sync_theme(theme: &Theme, target: &mut dyn RenderTarget) {
    sync_theme_with(theme, target, &RenderOptions::default());
}

pub fn sync_theme_with(theme: &Theme, target: &mut dyn RenderTarget, options: &RenderOptions) {
    let fonts = &theme.fonts;
    target.set_property("font-heading", &fonts.heading);
    target.set_property("font-body", &fonts.body);
    target.set_property("font-mono", &fonts.mono);
    target.set_property("text-h1", &fonts.sizes.h1);
    target.set_property("text-h2", &fonts.sizes.h2);
    target.set_property("text-h3", &fonts.sizes.h3);
    target.set_property("text-h4", &fonts.sizes.h4);
    target.set_property("text-body", &fonts.sizes.body);
    target.set_property("text-small", &fonts.sizes.small);
    target.set_property("font-weight-normal", &fonts.weights.normal.to_string());
    target.set_property("font-weight-medium", &fonts.weights.medium.to_string());
    target.set_property("font-weight-semibold", &fonts.weights.semibold.to_string());
    target.set_property("font-weight-bold", &fonts.weights.bold.to_string());

    let colors = &theme.colors;
    for (name, color) in [
        ("primary", colors.primary),
        ("secondary", colors.secondary),
        ("accent", colors.accent),
    ] {
        target.set_property(&format!("color-{name}"), &color.css_triplet());
        target.set_property(&format!("color-{name}-dim"), &dim(color).css_triplet());
        target.set_property(&format!("color-{name}-glow"), &glow(color).css_triplet());
    }
    target.set_property("bg-start", &colors.background.start.css_triplet());
    target.set_property("bg-end", &colors.background.end.css_triplet());
    target.set_property("color-text-white", &colors.text.white);
    target.set_property("color-text-gray300", &colors.text.gray300);
    target.set_property("color-text-gray400", &colors.text.gray400);
    target.set_property("color-text-gray500", &colors.text.gray500);
    target.set_property("border-opacity-primary", &fmt_num(colors.borders.primary.opacity));
    target.set_property("border-opacity-secondary", &fmt_num(colors.borders.secondary.opacity));
    target.set_property("border-opacity-glass", &fmt_num(colors.borders.glass.opacity));

    let spacing = &theme.spacing;
    target.set_property("spacing-section", &spacing.section);
    target.set_property("spacing-section-md", &spacing.section_md);
    target.set_property("spacing-card", &spacing.card);
    target.set_property("spacing-card-md", &spacing.card_md);
    target.set_property("spacing-gap", &spacing.gap);

    let effects = &theme.effects;
    target.set_property("border-radius", &effects.border_radius);
    target.set_property("border-width", &effects.border_width);
    target.set_property("border-color", &effects.border_color.css_triplet());
    target.set_property("blur", &effects.blur);
    target.set_property("shadow-enabled", flag(effects.shadow_enabled));
    target.set_property("shadow-intensity", &fmt_num(effects.shadow_intensity));
    target.set_property("shadow-color", &effects.shadow_color.css_triplet());
    target.set_property("card-color", &effects.card_color.css_triplet());
    target.set_property("card-opacity", &fmt_num(effects.card_opacity));
    target.set_property("glow-enabled", flag(effects.glow_enabled));
    target.set_property("glow-intensity", &fmt_num(effects.glow_intensity));
    target.set_property("saturate", &fmt_num(effects.saturate));
    target.set_property("brightness", &fmt_num(effects.brightness));
    target.set_property("animation-speed", &fmt_num(effects.animation_speed));
    target.set_property("section-fade-intensity", &fmt_num(effects.section_fade.intensity));
    target.set_property("section-fade-blur", &format!("{}px", fmt_num(effects.section_fade.blur)));
    target.set_property("transition-fast", &effects.transition_duration.fast);
    target.set_property("transition-normal", &effects.transition_duration.normal);
    target.set_property("transition-slow", &effects.transition_duration.slow);
    target.set_property("component-blur", &effects.component_blur);
    target.set_property("nav-shape", effects.nav_shape.as_str());
    target.set_property("nav-radius", effects.nav_shape.border_radius());

    let background = &theme.background;
    let filter = &background.backdrop_filter;
    let gradient = &filter.gradient;
    target.set_property("vanta-effect", background.effect().as_str());
    target.set_property("backdrop-enabled", flag(filter.enabled));
    target.set_property("backdrop-blur", &format!("{}px", fmt_num(filter.blur)));
    target.set_property("backdrop-gradient-opacity", &fmt_num(filter.gradient_opacity));
    target.set_property("backdrop-gradient-enabled", flag(gradient.enabled));
    target.set_property("backdrop-gradient-color1", &gradient.color1.css_triplet());
    target.set_property("backdrop-gradient-color2", &gradient.color2.css_triplet());
    target.set_property("backdrop-gradient-angle", &format!("{}deg", fmt_num(gradient.angle)));
    target.set_property("backdrop-gradient-radius", &format!("{}px", fmt_num(gradient.radius)));
    target.set_property(
        "backdrop-gradient-color1-percent",
        &format!("{}%", fmt_num(gradient.color1_percent)),
    );
    target.set_property(
        "backdrop-gradient-color2-percent",
        &format!("{}%", fmt_num(gradient.color2_percent)),
    );

    let page = if options.transparent_for_starfield
        && background.effect() == BackgroundEffect::GravityStars
    {
        PageBackground::Transparent
    } else {
        PageBackground::Gradient {
            start: colors.background.start,
            end: colors.background.end,
        }
    };
    target.set_page_background(page);
}

/// Muted variant used for borders and inactive states.
fn dim(color: Hsl) -> Hsl {
    Hsl::new(color.h, (color.s - 20.0).max(0.0), (color.l - 20.0).max(10.0))
}

/// Fully saturated variant used for glows.
fn glow(color: Hsl) -> Hsl {
    Hsl::new(color.h, 100.0, 60.0)
}

fn flag(enabled: bool) -> &'static str {
    if enabled { "1" } else { "0" }
}

/// In-memory render target that renders to a stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CssVariables {
    properties: BTreeMap<String, String>,
    page_background: Option<PageBackground>,
}

impl CssVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_theme(theme: &Theme) -> Self {
        let mut vars = Self::new();
        sync_theme(theme, &mut vars);
        vars
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.properties.get(name).map(String::as_str)
    }

    pub fn page_background(&self) -> Option<PageBackground> {
        self.page_background
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// `:root { ... }` block with one custom property per line.
    pub fn css_vars_block(&self) -> String {
        let mut css = String::from(":root {\n");
        for (name, value) in &self.properties {
            css.push_str(&format!("    --{name}: {value};\n"));
        }
        css.push_str("}\n");
        css
    }

    pub fn body_rule(&self) -> String {
        match self.page_background {
            Some(background) => format!("body {{\n    background: {};\n}}\n", background.css()),
            None => String::new(),
        }
    }

    pub fn stylesheet(&self) -> String {
        format!("{}\n{}", self.css_vars_block(), self.body_rule())
    }
}

impl RenderTarget for CssVariables {
    fn set_property(&mut self, name: &str, value: &str) {
        self.properties.insert(name.to_string(), value.to_string());
    }

    fn set_page_background(&mut self, background: PageBackground) {
        self.page_background = Some(background);
    }
}

//! Animated background effects.
//!
//! Each effect has its own strongly typed configuration. Every field is
//! optional: an absent field means "use the renderer's default". Colors are
//! `0xRRGGBB` integers, which is what the external renderer consumes.
//!
//! [`BackgroundHost`] drives a [`BackgroundRenderer`] from successive
//! configurations, tearing down and re-creating the renderer instance when
//! the effect changes and pushing option updates otherwise.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::Result;

/// Identifier of a background effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundEffect {
    Birds,
    Fog,
    Waves,
    Clouds,
    Clouds2,
    Globe,
    Net,
    Cells,
    Trunk,
    Topology,
    Dots,
    Rings,
    Halo,
    GravityStars,
}

/// Runtime an effect needs before it can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectRuntime {
    ThreeJs,
    P5,
    /// Ships its own shader, no host library.
    Standalone,
    /// Drawn by the page itself, never by the external renderer.
    Native,
}

const P5_SCRIPT_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/p5.js/1.4.0/p5.min.js";

impl BackgroundEffect {
    pub const ALL: [BackgroundEffect; 14] = [
        BackgroundEffect::Birds,
        BackgroundEffect::Fog,
        BackgroundEffect::Waves,
        BackgroundEffect::Clouds,
        BackgroundEffect::Clouds2,
        BackgroundEffect::Globe,
        BackgroundEffect::Net,
        BackgroundEffect::Cells,
        BackgroundEffect::Trunk,
        BackgroundEffect::Topology,
        BackgroundEffect::Dots,
        BackgroundEffect::Rings,
        BackgroundEffect::Halo,
        BackgroundEffect::GravityStars,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BackgroundEffect::Birds => "birds",
            BackgroundEffect::Fog => "fog",
            BackgroundEffect::Waves => "waves",
            BackgroundEffect::Clouds => "clouds",
            BackgroundEffect::Clouds2 => "clouds2",
            BackgroundEffect::Globe => "globe",
            BackgroundEffect::Net => "net",
            BackgroundEffect::Cells => "cells",
            BackgroundEffect::Trunk => "trunk",
            BackgroundEffect::Topology => "topology",
            BackgroundEffect::Dots => "dots",
            BackgroundEffect::Rings => "rings",
            BackgroundEffect::Halo => "halo",
            BackgroundEffect::GravityStars => "gravity-stars",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            BackgroundEffect::Birds => "Birds",
            BackgroundEffect::Fog => "Fog",
            BackgroundEffect::Waves => "Waves",
            BackgroundEffect::Clouds => "Clouds",
            BackgroundEffect::Clouds2 => "Clouds 2",
            BackgroundEffect::Globe => "Globe",
            BackgroundEffect::Net => "Network",
            BackgroundEffect::Cells => "Cells",
            BackgroundEffect::Trunk => "Trunk",
            BackgroundEffect::Topology => "Topology",
            BackgroundEffect::Dots => "Dots",
            BackgroundEffect::Rings => "Rings",
            BackgroundEffect::Halo => "Halo",
            BackgroundEffect::GravityStars => "Gravity Stars",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BackgroundEffect::Birds => "Flocking birds simulation with murmuration effect",
            BackgroundEffect::Fog => "Volumetric fog with color gradients",
            BackgroundEffect::Waves => "Animated ocean waves with realistic movement",
            BackgroundEffect::Clouds => "Sky with sun and volumetric clouds",
            BackgroundEffect::Clouds2 => "Alternate clouds effect with lighting",
            BackgroundEffect::Globe => "Rotating globe with connection lines",
            BackgroundEffect::Net => "Connected network of particles",
            BackgroundEffect::Cells => "Organic cell movement and growth",
            BackgroundEffect::Trunk => "Tree trunk-like patterns",
            BackgroundEffect::Topology => "Topological surface animation",
            BackgroundEffect::Dots => "Animated dot matrix with connections",
            BackgroundEffect::Rings => "Concentric ring patterns",
            BackgroundEffect::Halo => "Radial halo effect with waves",
            BackgroundEffect::GravityStars => "Interactive stars with gravity effect",
        }
    }

    pub fn runtime(self) -> EffectRuntime {
        match self {
            BackgroundEffect::Trunk | BackgroundEffect::Topology => EffectRuntime::P5,
            BackgroundEffect::Fog => EffectRuntime::Standalone,
            BackgroundEffect::GravityStars => EffectRuntime::Native,
            _ => EffectRuntime::ThreeJs,
        }
    }

    /// Whether the external renderer draws this effect.
    pub fn uses_external_renderer(self) -> bool {
        self.runtime() != EffectRuntime::Native
    }

    /// Name of the renderer's constructor for this effect, e.g. `NET`.
    pub fn constructor_name(self) -> Option<String> {
        self.uses_external_renderer()
            .then(|| self.as_str().to_ascii_uppercase())
    }

    /// Scripts to load, in order, before the effect can be constructed.
    pub fn script_urls(self) -> Vec<String> {
        let mut urls = Vec::new();
        match self.runtime() {
            EffectRuntime::Native => return urls,
            EffectRuntime::P5 => urls.push(P5_SCRIPT_URL.to_string()),
            EffectRuntime::ThreeJs | EffectRuntime::Standalone => {}
        }
        urls.push(format!(
            "https://cdn.jsdelivr.net/npm/vanta@latest/dist/vanta.{}.min.js",
            self.as_str()
        ));
        urls
    }

    /// Configuration keys this effect understands.
    pub fn config_keys(self) -> &'static [&'static str] {
        match self {
            BackgroundEffect::Birds => &[
                "backgroundColor",
                "backgroundAlpha",
                "color1",
                "color2",
                "colorMode",
                "quantity",
                "birdSize",
                "wingSpan",
                "speedLimit",
                "separation",
                "alignment",
                "cohesion",
            ],
            BackgroundEffect::Fog => &[
                "highlightColor",
                "midtoneColor",
                "lowlightColor",
                "baseColor",
                "blurFactor",
                "zoom",
                "speed",
            ],
            BackgroundEffect::Waves => &["color", "shininess", "waveHeight", "waveSpeed", "zoom"],
            BackgroundEffect::Clouds => &[
                "backgroundColor",
                "skyColor",
                "cloudColor",
                "cloudShadowColor",
                "sunColor",
                "sunGlareColor",
                "sunlightColor",
                "speed",
            ],
            BackgroundEffect::Clouds2 => &[
                "backgroundColor",
                "skyColor",
                "cloudColor",
                "lightColor",
                "speed",
                "texturePath",
            ],
            BackgroundEffect::Globe => &["backgroundColor", "color", "color2", "size"],
            BackgroundEffect::Net => &[
                "color",
                "backgroundColor",
                "points",
                "maxDistance",
                "spacing",
                "showDots",
            ],
            BackgroundEffect::Cells => &["color1", "color2", "size", "speed"],
            BackgroundEffect::Trunk => &["backgroundColor", "color", "spacing", "chaos"],
            BackgroundEffect::Topology => &["backgroundColor", "color"],
            BackgroundEffect::Dots => &[
                "backgroundColor",
                "color",
                "color2",
                "size",
                "spacing",
                "showLines",
            ],
            BackgroundEffect::Rings => &["color", "backgroundColor", "backgroundAlpha"],
            BackgroundEffect::Halo => &[
                "backgroundColor",
                "baseColor",
                "size",
                "amplitudeFactor",
                "xOffset",
                "yOffset",
            ],
            BackgroundEffect::GravityStars => {
                &["starsCount", "starsSize", "starsOpacity", "starsGlow"]
            }
        }
    }

    /// The renderer's own default configuration for this effect.
    pub fn defaults(self) -> VantaConfig {
        match self {
            BackgroundEffect::Birds => VantaConfig::Birds(BirdsConfig {
                background_color: Some(0x07192f),
                background_alpha: Some(1.0),
                color1: Some(0xff0000),
                color2: Some(0x00d1ff),
                color_mode: Some("varianceGradient".to_string()),
                quantity: Some(5),
                bird_size: Some(1.0),
                wing_span: Some(30.0),
                speed_limit: Some(5.0),
                separation: Some(20.0),
                alignment: Some(20.0),
                cohesion: Some(20.0),
            }),
            BackgroundEffect::Fog => VantaConfig::Fog(FogConfig {
                highlight_color: Some(0xffc300),
                midtone_color: Some(0xff1f00),
                lowlight_color: Some(0x2d00ff),
                base_color: Some(0xffebeb),
                blur_factor: Some(0.6),
                zoom: Some(1.0),
                speed: Some(1.0),
            }),
            BackgroundEffect::Waves => VantaConfig::Waves(WavesConfig {
                color: Some(0x005588),
                shininess: Some(30.0),
                wave_height: Some(15.0),
                wave_speed: Some(1.0),
                zoom: Some(1.0),
            }),
            BackgroundEffect::Clouds => VantaConfig::Clouds(CloudsConfig {
                background_color: Some(0xffffff),
                sky_color: Some(0x68b8d7),
                cloud_color: Some(0xadc1de),
                cloud_shadow_color: Some(0x183550),
                sun_color: Some(0xff9919),
                sun_glare_color: Some(0xff6633),
                sunlight_color: Some(0xff9933),
                speed: Some(1.0),
            }),
            BackgroundEffect::Clouds2 => VantaConfig::Clouds2(Clouds2Config {
                background_color: Some(0x000000),
                sky_color: Some(0x5ca6ca),
                cloud_color: Some(0x334d80),
                light_color: Some(0xffffff),
                speed: Some(1.0),
                texture_path: None,
            }),
            BackgroundEffect::Globe => VantaConfig::Globe(GlobeConfig {
                background_color: Some(0x23153c),
                color: Some(0xff3f81),
                color2: Some(0xffffff),
                size: Some(1.0),
            }),
            BackgroundEffect::Net => VantaConfig::Net(NetConfig {
                color: Some(0xff3f81),
                background_color: Some(0x23153c),
                points: Some(10),
                max_distance: Some(20.0),
                spacing: Some(15.0),
                show_dots: Some(true),
            }),
            BackgroundEffect::Cells => VantaConfig::Cells(CellsConfig {
                color1: Some(0x008c8c),
                color2: Some(0xf2e735),
                size: Some(1.5),
                speed: Some(1.0),
            }),
            BackgroundEffect::Trunk => VantaConfig::Trunk(TrunkConfig {
                background_color: Some(0x222426),
                color: Some(0x98465f),
                spacing: Some(0.0),
                chaos: Some(1.0),
            }),
            BackgroundEffect::Topology => VantaConfig::Topology(TopologyConfig {
                background_color: Some(0x002222),
                color: Some(0x89964e),
            }),
            BackgroundEffect::Dots => VantaConfig::Dots(DotsConfig {
                background_color: Some(0x222222),
                color: Some(0xff8820),
                color2: Some(0xff8820),
                size: Some(3.0),
                spacing: Some(35.0),
                show_lines: Some(true),
            }),
            BackgroundEffect::Rings => VantaConfig::Rings(RingsConfig {
                color: Some(0x88ff00),
                background_color: Some(0x202428),
                background_alpha: Some(1.0),
            }),
            BackgroundEffect::Halo => VantaConfig::Halo(HaloConfig {
                background_color: Some(0x131a43),
                base_color: Some(0x001a59),
                size: Some(1.0),
                amplitude_factor: Some(1.0),
                x_offset: Some(0.0),
                y_offset: Some(0.0),
            }),
            BackgroundEffect::GravityStars => VantaConfig::GravityStars(GravityStarsConfig {
                stars_count: Some(150),
                stars_size: Some(1.5),
                stars_opacity: Some(0.6),
                stars_glow: Some(0.1),
            }),
        }
    }
}

impl std::fmt::Display for BackgroundEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BackgroundEffect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        BackgroundEffect::ALL
            .into_iter()
            .find(|effect| effect.as_str() == s)
            .ok_or_else(|| format!("unknown background effect '{s}'"))
    }
}

/// Effect selection plus its configuration.
///
/// Serialized standalone it is `{"vantaEffect": ..., "vantaConfig": {...}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "vantaEffect", content = "vantaConfig", rename_all = "kebab-case")]
pub enum VantaConfig {
    Birds(BirdsConfig),
    Fog(FogConfig),
    Waves(WavesConfig),
    Clouds(CloudsConfig),
    Clouds2(Clouds2Config),
    Globe(GlobeConfig),
    Net(NetConfig),
    Cells(CellsConfig),
    Trunk(TrunkConfig),
    Topology(TopologyConfig),
    Dots(DotsConfig),
    Rings(RingsConfig),
    Halo(HaloConfig),
    GravityStars(GravityStarsConfig),
}

impl VantaConfig {
    /// Configuration with every field unset.
    pub fn empty(effect: BackgroundEffect) -> Self {
        match effect {
            BackgroundEffect::Birds => VantaConfig::Birds(Default::default()),
            BackgroundEffect::Fog => VantaConfig::Fog(Default::default()),
            BackgroundEffect::Waves => VantaConfig::Waves(Default::default()),
            BackgroundEffect::Clouds => VantaConfig::Clouds(Default::default()),
            BackgroundEffect::Clouds2 => VantaConfig::Clouds2(Default::default()),
            BackgroundEffect::Globe => VantaConfig::Globe(Default::default()),
            BackgroundEffect::Net => VantaConfig::Net(Default::default()),
            BackgroundEffect::Cells => VantaConfig::Cells(Default::default()),
            BackgroundEffect::Trunk => VantaConfig::Trunk(Default::default()),
            BackgroundEffect::Topology => VantaConfig::Topology(Default::default()),
            BackgroundEffect::Dots => VantaConfig::Dots(Default::default()),
            BackgroundEffect::Rings => VantaConfig::Rings(Default::default()),
            BackgroundEffect::Halo => VantaConfig::Halo(Default::default()),
            BackgroundEffect::GravityStars => VantaConfig::GravityStars(Default::default()),
        }
    }

    pub fn effect(&self) -> BackgroundEffect {
        match self {
            VantaConfig::Birds(_) => BackgroundEffect::Birds,
            VantaConfig::Fog(_) => BackgroundEffect::Fog,
            VantaConfig::Waves(_) => BackgroundEffect::Waves,
            VantaConfig::Clouds(_) => BackgroundEffect::Clouds,
            VantaConfig::Clouds2(_) => BackgroundEffect::Clouds2,
            VantaConfig::Globe(_) => BackgroundEffect::Globe,
            VantaConfig::Net(_) => BackgroundEffect::Net,
            VantaConfig::Cells(_) => BackgroundEffect::Cells,
            VantaConfig::Trunk(_) => BackgroundEffect::Trunk,
            VantaConfig::Topology(_) => BackgroundEffect::Topology,
            VantaConfig::Dots(_) => BackgroundEffect::Dots,
            VantaConfig::Rings(_) => BackgroundEffect::Rings,
            VantaConfig::Halo(_) => BackgroundEffect::Halo,
            VantaConfig::GravityStars(_) => BackgroundEffect::GravityStars,
        }
    }

    /// Parse the configuration object of `effect`. Unknown keys are ignored;
    /// `null` reads as an empty configuration.
    pub fn from_value(
        effect: BackgroundEffect,
        config: Value,
    ) -> std::result::Result<Self, serde_json::Error> {
        let config = if config.is_null() {
            Value::Object(Map::new())
        } else {
            config
        };
        serde_json::from_value(json!({ "vantaEffect": effect, "vantaConfig": config }))
    }

    /// The bare configuration object, without the effect tag.
    pub fn to_value(&self) -> Value {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut tagged)) => tagged
                .remove("vantaConfig")
                .unwrap_or_else(|| Value::Object(Map::new())),
            _ => Value::Object(Map::new()),
        }
    }

    /// Whether every field is unset.
    pub fn is_empty(&self) -> bool {
        self.to_value().as_object().is_none_or(Map::is_empty)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BirdsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_alpha: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color1: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color2: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bird_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_span: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cohesion: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FogConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub midtone_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowlight_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WavesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shininess: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wave_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wave_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CloudsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sky_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_shadow_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sun_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sun_glare_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sunlight_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Clouds2Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sky_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub light_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GlobeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color2: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_dots: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CellsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color1: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color2: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrunkConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chaos: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopologyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DotsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color2: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spacing: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_lines: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RingsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_alpha: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HaloConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_color: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amplitude_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GravityStarsConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars_opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stars_glow: Option<f64>,
}

// ===== Renderer adapter =====

/// Handle to the external background renderer.
///
/// At most one effect instance is live at a time; `init` is only called
/// after the previous instance has been destroyed.
pub trait BackgroundRenderer {
    /// Construct an effect instance with the full option object.
    fn init(&mut self, effect: BackgroundEffect, options: &Value) -> Result<()>;
    /// Tear down the live instance.
    fn destroy(&mut self);
    /// Notify the live instance that its container was resized.
    fn resize(&mut self);
    /// Push new options to the live instance without re-creating it.
    fn set_options(&mut self, options: &Value) -> Result<()>;
}

fn merge_into(target: &mut Map<String, Value>, source: Value) {
    if let Value::Object(source) = source {
        target.extend(source);
    }
}

/// Full option object for constructing `config`'s effect.
///
/// Layered in order: the effect's defaults, performance overrides, the
/// user's configuration, then fixed interaction settings.
pub fn renderer_options(config: &VantaConfig) -> Value {
    let effect = config.effect();
    let mut options = Map::new();

    merge_into(&mut options, effect.defaults().to_value());
    if effect == BackgroundEffect::Clouds {
        options.insert("speed".to_string(), json!(0.5));
    }
    merge_into(&mut options, config.to_value());
    merge_into(
        &mut options,
        json!({
            "mouseControls": true,
            "touchControls": true,
            "gyroControls": false,
            "minHeight": 200.0,
            "minWidth": 200.0,
            "scale": 1.0,
            "scaleMobile": 0.8,
        }),
    );

    Value::Object(options)
}

/// Keeps a renderer in step with the selected background configuration.
pub struct BackgroundHost<R: BackgroundRenderer> {
    renderer: R,
    current: Option<VantaConfig>,
    live: Option<BackgroundEffect>,
}

impl<R: BackgroundRenderer> BackgroundHost<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            current: None,
            live: None,
        }
    }

    /// Effect currently drawn by the external renderer, if any.
    pub fn live_effect(&self) -> Option<BackgroundEffect> {
        self.live
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Apply the selected background configuration.
    pub fn apply(&mut self, config: &VantaConfig) {
        if self.current.as_ref() == Some(config) {
            return;
        }

        let effect = config.effect();
        let effect_changed = self.current.as_ref().map(VantaConfig::effect) != Some(effect);
        self.current = Some(config.clone());

        if !effect.uses_external_renderer() {
            tracing::debug!("Background effect '{}' is drawn natively", effect);
            self.teardown();
            return;
        }

        if effect_changed {
            self.teardown();
            let options = renderer_options(config);
            match self.renderer.init(effect, &options) {
                Ok(()) => {
                    tracing::debug!("Initialized background effect '{}'", effect);
                    self.live = Some(effect);
                }
                Err(e) => {
                    tracing::error!("Failed to initialize background effect '{}': {}", effect, e);
                }
            }
        } else if self.live.is_some() && !config.is_empty() {
            if let Err(e) = self.renderer.set_options(&config.to_value()) {
                tracing::error!("Failed to update background effect '{}': {}", effect, e);
            }
        }
    }

    /// Forward a container resize to the live instance.
    pub fn resize(&mut self) {
        if self.live.is_some() {
            self.renderer.resize();
        }
    }

    /// Destroy the live instance, if any.
    pub fn teardown(&mut self) {
        if self.live.take().is_some() {
            self.renderer.destroy();
        }
    }
}

impl<R: BackgroundRenderer> Drop for BackgroundHost<R> {
    fn drop(&mut self) {
        self.teardown();
    }
}

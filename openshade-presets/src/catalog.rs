//! The stock catalog: every tweak and post process OpenShade knows
//! about, with their preset section keys and default parameters.

use crate::preset::{CustomTweak, Parameter, PostProcess, Tweak};
use openshade_common::Category;

/// Identity of a stock tweak.
///
/// The catalog order of these variants is also the apply order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TweakId {
    // Clouds
    PopcornClouds,
    CloudGroupLighting,
    CirrusLighting,
    CloudLightScattering,
    CloudLightingTuning,
    CloudSaturation,
    CloudShadowDepth,
    CloudShadowSize,
    CloudTwilightBrightness,
    CirrusTwilightBrightness,
    CloudPuffScaling,
    // Lighting
    AircraftLighting,
    AutogenEmissiveLighting,
    ObjectsLighting,
    SpecularLighting,
    TerrainLighting,
    TerrainSaturation,
    UrbanNightLighting,
    // Atmosphere
    CloudsFogTuning,
    HazeEffect,
    RayleighScattering,
    SkyFogTuning,
    SkySaturation,
    // Water
    FsxReflections,
    WaterSaturation,
    WaterSurfaceTuning,
    WaveSize,
    WaveSpeed,
    // HDR
    AlternateTonemap,
    ContrastTuning,
    SceneToneAdjustment,
    DisableLuminanceAdaptation,
}

impl TweakId {
    /// The preset section name. These are load-bearing: existing preset
    /// files use them, so they never change.
    pub const fn key(self) -> &'static str {
        match self {
            TweakId::PopcornClouds => "CLOUDS_POPCORN_MODIFICATOR",
            TweakId::CloudGroupLighting => "CLOUDS_CLOUD_ALTERNATE_LIGHTING",
            TweakId::CirrusLighting => "CLOUDS_CIRRUS_LIGHTING",
            TweakId::CloudLightScattering => "CLOUDS_CLOUD_VOLUME",
            TweakId::CloudLightingTuning => "CLOUDS_CLOUDS_LIGHTING_TUNING",
            TweakId::CloudSaturation => "CLOUDS_CLOUD_SATURATION",
            TweakId::CloudShadowDepth => "CLOUDS_CLOUD_SHADOWS_DEPTH_NEW",
            TweakId::CloudShadowSize => "CLOUDS_CLOUD_SHADOWS_SIZE",
            TweakId::CloudTwilightBrightness => "CLOUDS_CLOUD_BRIGHTNESS_TWILIGHT",
            TweakId::CirrusTwilightBrightness => "CLOUDS_CIRRUS_BRIGHTNESS_TWILIGHT",
            TweakId::CloudPuffScaling => "CLOUDS_CLOUD_SIZE",
            TweakId::AircraftLighting => "LIGHTING_AIRCRAFT_LIGHTING",
            TweakId::AutogenEmissiveLighting => "LIGHTING_AUTOGEN_EMISSIVE",
            TweakId::ObjectsLighting => "LIGHTING_AUTOGEN_LIGHTING",
            TweakId::SpecularLighting => "LIGHTING_SPECULAR_LIGHTING",
            TweakId::TerrainLighting => "LIGHTING_TERRAIN_LIGHTING",
            TweakId::TerrainSaturation => "LIGHTING_TERRAIN_SATURATION",
            TweakId::UrbanNightLighting => "LIGHTING_BOOST_EMISSIVELANDCLASS",
            TweakId::CloudsFogTuning => "ATMOSPHERE & FOG_CLOUDS_FOG_TUNING",
            TweakId::HazeEffect => "ATMOSPHERE & FOG_ATMO_HAZE",
            TweakId::RayleighScattering => "ATMOSPHERE & FOG_RAYLEIGH_SCATTERING",
            TweakId::SkyFogTuning => "ATMOSPHERE & FOG_SKY_FOG_TUNING",
            TweakId::SkySaturation => "ATMOSPHERE & FOG_SKY_SATURATION",
            TweakId::FsxReflections => "WATER_FSXREFLECTION",
            TweakId::WaterSaturation => "WATER_WATER_SATURATION",
            TweakId::WaterSurfaceTuning => "WATER_WATERSURFACE",
            TweakId::WaveSize => "WATER_WAVESIZE",
            TweakId::WaveSpeed => "WATER_WAVESPEED",
            TweakId::AlternateTonemap => "HDR & POST-PROCESSING_HDRTONEMAP",
            TweakId::ContrastTuning => "HDR & POST-PROCESSING_HDRCONTRAST",
            TweakId::SceneToneAdjustment => "HDR & POST-PROCESSING_HDRTONE",
            TweakId::DisableLuminanceAdaptation => "HDR & POST-PROCESSING_HDRADAPTATION",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TweakId::PopcornClouds => "'No popcorn' clouds",
            TweakId::CloudGroupLighting => "Alternate lighting for cloud groups",
            TweakId::CirrusLighting => "Cirrus lighting",
            TweakId::CloudLightScattering => "Cloud light scattering",
            TweakId::CloudLightingTuning => "Cloud lighting tuning",
            TweakId::CloudSaturation => "Cloud saturation",
            TweakId::CloudShadowDepth => "Cloud shadow depth",
            TweakId::CloudShadowSize => "Cloud shadow extended size",
            TweakId::CloudTwilightBrightness => "Reduce cloud brightness at dawn/dusk/night",
            TweakId::CirrusTwilightBrightness => {
                "Reduce top layer cloud brightness at dawn/dusk/night"
            }
            TweakId::CloudPuffScaling => "Cloud puffs width and height scaling",
            TweakId::AircraftLighting => "Aircraft lighting and saturation",
            TweakId::AutogenEmissiveLighting => "Autogen emissive lighting",
            TweakId::ObjectsLighting => "Objects lighting",
            TweakId::SpecularLighting => "Specular lighting",
            TweakId::TerrainLighting => "Terrain lighting",
            TweakId::TerrainSaturation => "Terrain saturation",
            TweakId::UrbanNightLighting => "Urban areas lighting at night",
            TweakId::CloudsFogTuning => "Clouds Fog tuning",
            TweakId::HazeEffect => "Haze effect",
            TweakId::RayleighScattering => "Rayleigh scattering effect",
            TweakId::SkyFogTuning => "Sky Fog tuning",
            TweakId::SkySaturation => "Sky saturation",
            TweakId::FsxReflections => "FSX-style reflections",
            TweakId::WaterSaturation => "Water saturation",
            TweakId::WaterSurfaceTuning => "Water surface tuning",
            TweakId::WaveSize => "Wave size",
            TweakId::WaveSpeed => "Wave speed",
            TweakId::AlternateTonemap => "Alternate tonemap adjustment",
            TweakId::ContrastTuning => "Contrast tuning",
            TweakId::SceneToneAdjustment => "Scene tone adjustment",
            TweakId::DisableLuminanceAdaptation => "Turn off HDR luminance adaptation effect",
        }
    }

    pub const fn category(self) -> Category {
        match self {
            TweakId::PopcornClouds
            | TweakId::CloudGroupLighting
            | TweakId::CirrusLighting
            | TweakId::CloudLightScattering
            | TweakId::CloudLightingTuning
            | TweakId::CloudSaturation
            | TweakId::CloudShadowDepth
            | TweakId::CloudShadowSize
            | TweakId::CloudTwilightBrightness
            | TweakId::CirrusTwilightBrightness
            | TweakId::CloudPuffScaling => Category::Clouds,
            TweakId::AircraftLighting
            | TweakId::AutogenEmissiveLighting
            | TweakId::ObjectsLighting
            | TweakId::SpecularLighting
            | TweakId::TerrainLighting
            | TweakId::TerrainSaturation
            | TweakId::UrbanNightLighting => Category::Lighting,
            TweakId::CloudsFogTuning
            | TweakId::HazeEffect
            | TweakId::RayleighScattering
            | TweakId::SkyFogTuning
            | TweakId::SkySaturation => Category::Atmosphere,
            TweakId::FsxReflections
            | TweakId::WaterSaturation
            | TweakId::WaterSurfaceTuning
            | TweakId::WaveSize
            | TweakId::WaveSpeed => Category::Water,
            TweakId::AlternateTonemap
            | TweakId::ContrastTuning
            | TweakId::SceneToneAdjustment
            | TweakId::DisableLuminanceAdaptation => Category::Hdr,
        }
    }

    /// Whether the tweak has a working patch for the current shader
    /// generation. Unsupported tweaks still load and save so presets
    /// carrying them stay intact.
    pub const fn supported(self) -> bool {
        !matches!(self, TweakId::CloudShadowDepth)
    }
}

/// Identity of a stock post process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PostProcessId {
    Sepia,
    Curves,
    Levels,
    LiftGammaGain,
    Technicolor,
    Vibrance,
    CineonDpx,
    Tonemap,
    LumaSharpen,
}

impl PostProcessId {
    /// The preset section name, kept verbatim for compatibility with
    /// existing presets.
    pub const fn key(self) -> &'static str {
        match self {
            PostProcessId::Sepia => "POSTPROCESS_SHADER Sepia",
            PostProcessId::Curves => "POSTPROCESS_SHADER Curves",
            PostProcessId::Levels => "POSTPROCESS_SHADER Levels",
            PostProcessId::LiftGammaGain => "POSTPROCESS_SHADER LiftGammaGain",
            PostProcessId::Technicolor => "POSTPROCESS_SHADER Technicolor",
            PostProcessId::Vibrance => "POSTPROCESS_SHADER Vibrance",
            PostProcessId::CineonDpx => "POSTPROCESS_SHADER DPX",
            PostProcessId::Tonemap => "POSTPROCESS_SHADER Tonemap",
            PostProcessId::LumaSharpen => "POSTPROCESS_SHADER LumaSharpen",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PostProcessId::Sepia => "Sepia",
            PostProcessId::Curves => "Curves",
            PostProcessId::Levels => "Levels",
            PostProcessId::LiftGammaGain => "Lift Gamma Gain",
            PostProcessId::Technicolor => "Technicolor",
            PostProcessId::Vibrance => "Vibrance",
            PostProcessId::CineonDpx => "Cineon DPX",
            PostProcessId::Tonemap => "Tonemap",
            PostProcessId::LumaSharpen => "Luma Sharpen",
        }
    }

    /// The HLSL function name the effect is emitted as.
    pub const fn entry_point(self) -> &'static str {
        match self {
            PostProcessId::Sepia => "SepiaMain",
            PostProcessId::Curves => "CurvesMain",
            PostProcessId::Levels => "LevelsMain",
            PostProcessId::LiftGammaGain => "LiftGammaGainMain",
            PostProcessId::Technicolor => "TechnicolorMain",
            PostProcessId::Vibrance => "VibranceMain",
            PostProcessId::CineonDpx => "DPXMain",
            PostProcessId::Tonemap => "TonemapMain",
            PostProcessId::LumaSharpen => "LumaSharpenMain",
        }
    }
}

/// Key of the time-of-day gate parameter appended to every post process.
pub const DAY_NIGHT_KEY: &str = "DayNightUse";

fn day_night_use() -> Parameter {
    Parameter::combobox(
        DAY_NIGHT_KEY,
        "Use at specific time of day",
        0,
        &[
            "Always",
            "Day only",
            "Night only",
            "Day and dawn-dusk",
            "Night and dawn-dusk",
            "Dawn-dusk only",
        ],
    )
}

/// Fresh state for a brand new preset: stock catalogs and no custom
/// tweaks.
pub fn new_preset() -> (Vec<Tweak>, Vec<CustomTweak>, Vec<PostProcess>) {
    (tweak_catalog(), Vec::new(), post_process_catalog())
}

/// Builds the stock tweaks in catalog order, everything disabled and at
/// defaults.
pub fn tweak_catalog() -> Vec<Tweak> {
    vec![
        Tweak::stock(
            TweakId::PopcornClouds,
            vec![
                Parameter::text("CloudDistanceFactor", "Distance factor", "0.0000000005", 0.0000000001, 0.000000001),
                Parameter::text("CloudOpacity", "Opacity at far range", "1", 0.1, 1.0),
            ],
        ),
        Tweak::stock(TweakId::CloudGroupLighting, vec![]),
        Tweak::stock(
            TweakId::CirrusLighting,
            vec![
                Parameter::text("LightingRatio", "Lighting", "1", 0.0, 2.0),
                Parameter::text("SaturateRatio", "Saturation", "1", 0.0, 2.0),
            ],
        ),
        Tweak::stock(
            TweakId::CloudLightScattering,
            vec![
                Parameter::text("ScatteringFactor", "Scattering factor", "0.5", 0.1, 3.0),
                Parameter::text("LightingFactor", "Lighting factor", "0.5", 0.01, 2.0),
                Parameter::checkbox("NoPattern", "Don't use cloud lighting patterns", false),
            ],
        ),
        Tweak::stock(
            TweakId::CloudLightingTuning,
            vec![
                Parameter::text("CloudLightFactor", "Lighting factor", "0.85", 0.1, 5.0),
                Parameter::text("CloudSaturateFactor", "Saturation factor", "0.33", 0.1, 5.0),
            ],
        ),
        Tweak::stock(
            TweakId::CloudSaturation,
            vec![Parameter::text("ShadeFactor", "Saturation", "1", 0.0, 3.0)],
        ),
        Tweak::stock(
            TweakId::CloudShadowDepth,
            vec![Parameter::text("FDepthFactor", "Shadow depth", "0.15", 0.01, 0.25)],
        ),
        Tweak::stock(TweakId::CloudShadowSize, vec![]),
        Tweak::stock(TweakId::CloudTwilightBrightness, vec![]),
        Tweak::stock(TweakId::CirrusTwilightBrightness, vec![]),
        Tweak::stock(
            TweakId::CloudPuffScaling,
            vec![
                Parameter::text("CloudSizeHCoeff", "Horizontal", "0.5", 0.3, 1.0),
                Parameter::text("CloudSizeVCoeff", "Vertical", "0.5", 0.3, 1.0),
            ],
        ),
        Tweak::stock(
            TweakId::AircraftLighting,
            vec![
                Parameter::text("SunAmbientCoeff", "Ambient sunlight ratio", "1", 0.1, 5.0),
                Parameter::text("SunDiffuseCoeff", "Diffuse sunlight ratio", "1", 0.1, 5.0),
                Parameter::text("MoonAmbientCoeff", "Ambient moonlight ratio", "1", 0.1, 5.0),
                Parameter::text("MoonDiffuseCoeff", "Diffuse moonlight ratio", "1", 0.1, 5.0),
                Parameter::text("SaturateRatio", "Saturation", "1", 0.0, 2.0),
                Parameter::checkbox("VCOnly", "Adjust only internal/virtual cockpit view", false),
            ],
        ),
        Tweak::stock(
            TweakId::AutogenEmissiveLighting,
            vec![
                Parameter::text("LightsRatio", "Lights ratio", "1", 0.1, 5.0),
                Parameter::text("AutogenRatio", "Autogen ratio", "1", 0.1, 5.0),
                Parameter::checkbox("SmoothTransition", "Smooth day-night transition for lights", false),
            ],
        ),
        Tweak::stock(
            TweakId::ObjectsLighting,
            vec![
                Parameter::text("SunAmbientCoeff", "Ambient sunlight ratio", "0.65", 0.1, 5.0),
                Parameter::text("SunDiffuseCoeff", "Diffuse sunlight ratio", "1", 0.1, 5.0),
                Parameter::text("MoonAmbientCoeff", "Ambient moonlight ratio", "1", 0.1, 5.0),
                Parameter::text("MoonDiffuseCoeff", "Diffuse moonlight ratio", "1", 0.1, 5.0),
            ],
        ),
        Tweak::stock(
            TweakId::SpecularLighting,
            vec![Parameter::text("SpecularRatio", "Ratio", "1", 0.1, 4.0)],
        ),
        Tweak::stock(
            TweakId::TerrainLighting,
            vec![
                Parameter::text("SunAmbientCoeff", "Ambient sunlight ratio", "0.65", 0.1, 5.0),
                Parameter::text("SunDiffuseCoeff", "Diffuse sunlight ratio", "1", 0.1, 5.0),
                Parameter::text("MoonAmbientCoeff", "Ambient moonlight ratio", "1", 0.1, 5.0),
                Parameter::text("MoonDiffuseCoeff", "Diffuse moonlight ratio", "1", 0.1, 5.0),
            ],
        ),
        Tweak::stock(
            TweakId::TerrainSaturation,
            vec![Parameter::text("SaturateRatio", "Saturation", "1", 0.0, 2.0)],
        ),
        Tweak::stock(
            TweakId::UrbanNightLighting,
            vec![
                Parameter::text("BoostRatio", "Brightness", "1", 0.1, 15.0),
                Parameter::text("SaturateRatio", "Saturation", "2", 0.1, 3.0),
            ],
        ),
        Tweak::stock(
            TweakId::CloudsFogTuning,
            vec![Parameter::text("FogFactor", "Fog factor", "0.5", 0.1, 3.0)],
        ),
        Tweak::stock(
            TweakId::HazeEffect,
            vec![
                Parameter::text("Power", "Effect power", "2", 1.01, 7.0),
                Parameter::text("Distance", "Density factor", "0.00000000035", 0.00000000001, 0.000000002),
                Parameter::checkbox("DensityCorrection", "Density depends on altitude", true),
                Parameter::rgb(["Red", "Green", "Blue"], "RGB", ["1", "1", "1"], 0.5, 1.5),
            ],
        ),
        Tweak::stock(
            TweakId::RayleighScattering,
            vec![
                Parameter::text("Power", "Effect power", "2", 1.01, 7.0),
                Parameter::text("Density", "Density factor", "0.0000000002", 0.00000000001, 0.000000002),
                Parameter::checkbox("DensityCorrection", "Density depends on altitude", true),
                Parameter::checkbox("ExcludeClouds", "Exclude clouds", false),
                Parameter::text("Green", "Green", "0.055", 0.0, 0.5),
                Parameter::text("Blue", "Blue", "0.15", 0.0, 0.5),
            ],
        ),
        Tweak::stock(
            TweakId::SkyFogTuning,
            vec![Parameter::text("FogFactor", "Fog factor", "1", 0.1, 3.0)],
        ),
        Tweak::stock(
            TweakId::SkySaturation,
            vec![Parameter::text("SaturateRatio", "Saturation", "1", 0.0, 2.0)],
        ),
        Tweak::stock(TweakId::FsxReflections, vec![]),
        Tweak::stock(
            TweakId::WaterSaturation,
            vec![Parameter::text("SaturateRatio", "Saturation", "1", 0.0, 2.0)],
        ),
        Tweak::stock(
            TweakId::WaterSurfaceTuning,
            vec![
                Parameter::text("ReflectionCoeff", "Reflection coefficient", "0.4", 0.0, 1.0),
                Parameter::text("RefractionCoeff", "Refraction coefficient (limpidity)", "0.35", 0.0, 1.0),
                Parameter::text("GranularityCoeff", "Granularity", "3", 0.0, 5.0),
                Parameter::text("SpecularBlend", "Specular blend", "1", 0.0, 3.0),
                Parameter::text("FresnelAngle", "Water view angle/darkness factor", "4", 0.1, 6.0),
            ],
        ),
        Tweak::stock(
            TweakId::WaveSize,
            vec![
                Parameter::text("SizeRatio", "Scale ratio", "0", 0.0, 10.0),
                Parameter::text("SmoothRatio", "Waves smoothing", "0", 0.0, 10.0),
            ],
        ),
        Tweak::stock(
            TweakId::WaveSpeed,
            vec![Parameter::text("SpeedRatio", "Waves speed factor", "1", 0.0, 2.0)],
        ),
        Tweak::stock(TweakId::AlternateTonemap, vec![]),
        Tweak::stock(
            TweakId::ContrastTuning,
            vec![Parameter::text("Coeff", "Contrast", "0.5", 0.0, 1.0)],
        ),
        Tweak::stock(
            TweakId::SceneToneAdjustment,
            vec![Parameter::rgb(["Red", "Green", "Blue"], "RGB", ["1", "1", "1"], 0.5, 1.5)],
        ),
        Tweak::stock(TweakId::DisableLuminanceAdaptation, vec![]),
    ]
}

/// Builds the stock post processes in default chain order, everything
/// disabled and at defaults.
pub fn post_process_catalog() -> Vec<PostProcess> {
    vec![
        PostProcess::stock(
            PostProcessId::Sepia,
            0,
            vec![
                Parameter::rgb(
                    ["ColorToneX", "ColorToneY", "ColorToneZ"],
                    "Color Tone",
                    ["1.4", "1.1", "0.9"],
                    0.0,
                    2.55,
                )
                .describe("ColorTone values 0.00 to 2.55 can be thought of as equivalents to 0 to 255."),
                Parameter::text("GreyPower", "Grey Power", "0.11", 0.0, 1.0)
                    .describe("Desaturates the image this much before tinting."),
                Parameter::text("SepiaPower", "Sepia Power", "0.58", 0.0, 1.0)
                    .describe("How strong the tint color should be."),
                day_night_use(),
            ],
        )
        .describe("Sepia desaturates and colorizes the image with a specified color."),
        PostProcess::stock(
            PostProcessId::Curves,
            1,
            vec![
                Parameter::text("Curves_mode", "Curves Mode", "0", 0.0, 0.0),
                Parameter::text("Curves_contrast", "Curves Contrast", "0.65", 0.0, 0.0),
                Parameter::text("Curves_formula", "Curves Formula", "5", 0.0, 0.0),
                day_night_use(),
            ],
        ),
        PostProcess::stock(
            PostProcessId::Levels,
            2,
            vec![
                Parameter::text("Levels_black_point", "Black point", "16", 0.0, 255.0)
                    .describe("Anything below this value to 0 becomes solid black."),
                Parameter::text("Levels_white_point", "White point", "235", 0.0, 255.0)
                    .describe("Anything above this value to 255 becomes solid white."),
                day_night_use(),
            ],
        )
        .describe("Used sparingly, Levels trims off excess whiteness and darkens shadow areas that appear washed out."),
        PostProcess::stock(
            PostProcessId::LiftGammaGain,
            3,
            vec![
                Parameter::rgb(
                    ["RGB_LiftX", "RGB_LiftY", "RGB_LiftZ"],
                    "RGB Lift",
                    ["1", "1", "1"],
                    0.0,
                    2.0,
                )
                .describe("Lowering RGB Lift makes dark areas darker. Raising RGB Lift makes dark areas lighter."),
                Parameter::rgb(
                    ["RGB_GammaX", "RGB_GammaY", "RGB_GammaZ"],
                    "RGB Gamma",
                    ["1", "1", "1"],
                    0.0,
                    2.0,
                ),
                Parameter::rgb(
                    ["RGB_GainX", "RGB_GainY", "RGB_GainZ"],
                    "RGB Gain",
                    ["1", "1", "1"],
                    0.0,
                    2.0,
                )
                .describe("Raising RGB Gain makes light areas lighter. Lowering RGB Gain makes light areas darker."),
                day_night_use(),
            ],
        )
        .describe("Precise gamma control over shadow, midrange and bright areas, per RGB channel."),
        PostProcess::stock(
            PostProcessId::Technicolor,
            4,
            vec![
                Parameter::text("TechniAmount", "Techni Amount", "0.4", 0.0, 1.0)
                    .describe("Higher = more desaturated. Lower = more color."),
                Parameter::text("TechniPower", "Techni Power", "4", 0.0, 8.0)
                    .describe("Higher = closer to original white levels. 8 = original whites."),
                Parameter::text("redNegativeAmount", "Red Negative Amount", "0.88", 0.0, 1.0)
                    .describe("Reducing this value adds more of Red."),
                Parameter::text("greenNegativeAmount", "Green Negative Amount", "0.88", 0.0, 1.0)
                    .describe("Reducing this value adds more of Green."),
                Parameter::text("blueNegativeAmount", "Blue Negative Amount", "0.88", 0.0, 1.0)
                    .describe("Reducing this value adds more of Blue."),
                day_night_use(),
            ],
        )
        .describe("Recreates a pseudo-Technicolor three-strip film effect."),
        PostProcess::stock(
            PostProcessId::Vibrance,
            5,
            vec![
                Parameter::text("Vibrance", "Vibrance", "0.2", -1.0, 1.0)
                    .describe("Specifies how much to saturate (+) or desaturate (-) the image."),
                Parameter::rgb(
                    ["Vibrance_RGB_balanceX", "Vibrance_RGB_balanceY", "Vibrance_RGB_balanceZ"],
                    "Vibrance RGB Balance",
                    ["1", "1", "1"],
                    -10.0,
                    10.0,
                )
                .describe("Gives priority to a given RGB color."),
                day_night_use(),
            ],
        )
        .describe("Saturates or desaturates the image with per-channel balance."),
        PostProcess::stock(
            PostProcessId::CineonDpx,
            6,
            vec![
                Parameter::rgb(["Red", "Green", "Blue"], "RGB", ["8", "8", "8"], 1.0, 15.0),
                Parameter::text("ColorGamma", "Color Gamma", "2.5", 0.1, 2.5)
                    .describe("Adjusts how vibrant the colors should be."),
                Parameter::text("DPXSaturation", "DPX Saturation", "3", 0.0, 8.0)
                    .describe("Saturates colors."),
                Parameter::rgb(["RedC", "GreenC", "BlueC"], "RGB C", ["0.36", "0.36", "0.34"], 0.2, 0.6),
                Parameter::text("Blend", "Blend", "0.2", 0.0, 1.0)
                    .describe("Blend is how strong the effect should be applied."),
                day_night_use(),
            ],
        )
        .describe("Film-like color grading resembling the Kodak Cineon system."),
        PostProcess::stock(
            PostProcessId::Tonemap,
            7,
            vec![
                Parameter::text("Gamma", "Gamma", "1", 0.0, 2.0)
                    .describe("Adjusts gamma. For finer control use Lift Gamma Gain instead."),
                Parameter::text("Exposure", "Exposure", "0", -1.0, 1.0)
                    .describe("Makes the image brighter. Brightens the darks so more detail is visible."),
                Parameter::text("Saturation", "Saturation", "0", -1.0, 1.0)
                    .describe("Saturates or desaturates colors. Zero is neutral."),
                Parameter::text("Bleach", "Bleach", "0", 0.0, 1.0)
                    .describe("Small values, such as 0.020, are best."),
                Parameter::text("Defog", "Defog", "0", 0.0, 1.0)
                    .describe("How much of FogColor to remove."),
                Parameter::rgb(
                    ["FogColorX", "FogColorY", "FogColorZ"],
                    "FogColor RGB",
                    ["0", "0", "2.55"],
                    0.0,
                    2.55,
                )
                .describe("The color Defog removes, in decimal RGB."),
                day_night_use(),
            ],
        )
        .describe("A many-in-one adjustment for gamma, saturation, bleach, exposure and defog."),
        PostProcess::stock(
            PostProcessId::LumaSharpen,
            8,
            vec![
                Parameter::text("Sharp_strength", "Sharp Strength", "0.65", 0.1, 3.0)
                    .describe("Strength of the sharpening."),
                Parameter::text("Sharp_clamp", "Sharp Clamp", "0.035", 0.0, 0.0)
                    .describe("Limits the maximum amount of sharpening a pixel receives."),
                Parameter::text("Pattern", "Pattern", "2", 1.0, 4.0)
                    .describe("Sample pattern. 1 = Fast, 2 = Normal, 3 = Wider, 4 = Pyramid shaped."),
                Parameter::text("Offset_bias", "Offset Bias", "1", 0.0, 6.0)
                    .describe("Adjusts the radius of the sampling pattern."),
                day_night_use(),
            ],
        )
        .describe("Sharpens the image to enhance details, similar to an unsharp mask."),
    ]
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_every_stock_tweak_with_unique_keys() {
        let tweaks = tweak_catalog();
        assert_eq!(tweaks.len(), 32);
        let keys: HashSet<_> = tweaks.iter().map(|t| t.key()).collect();
        assert_eq!(keys.len(), tweaks.len());
        assert!(tweaks.iter().all(|t| !t.is_enabled && !t.was_enabled));
    }

    #[test]
    fn catalog_category_prefixes_match_section_keys() {
        for tweak in tweak_catalog() {
            assert!(
                tweak.key().starts_with(tweak.category.section_prefix()),
                "{} does not match {}",
                tweak.key(),
                tweak.category
            );
        }
    }

    #[test]
    fn post_process_indices_are_dense_and_ordered() {
        let posts = post_process_catalog();
        assert_eq!(posts.len(), 9);
        for (i, post) in posts.iter().enumerate() {
            assert_eq!(post.index, i as i32);
            assert!(post.key().starts_with("POSTPROCESS_SHADER "));
        }
    }

    #[test]
    fn every_post_process_carries_the_day_night_gate() {
        for post in post_process_catalog() {
            assert_eq!(
                post.parameter_value(DAY_NIGHT_KEY),
                Some("0"),
                "{} is missing the time-of-day gate",
                post.name
            );
        }
    }

    #[test]
    fn only_cloud_shadow_depth_is_unsupported() {
        for tweak in tweak_catalog() {
            assert_eq!(
                tweak.id.supported(),
                tweak.id != TweakId::CloudShadowDepth
            );
        }
    }
}

//! Per-tweak patch bodies.
//!
//! Each stock tweak edits one shader source through a [`PatchRun`]. The
//! anchor strings below are verbatim lines from the stock Prepar3D v4
//! shader files and must stay byte-exact, trailing whitespace included.

use openshade_common::ShaderFile;
use openshade_patch::PatchRun;
use openshade_presets::{PresetError, Tweak, TweakId, ValueKind};
use std::collections::HashSet;

use crate::sources::ShaderSources;

/// Which stock tweaks are enabled for this run.
///
/// A few tweak bodies change shape depending on whether another tweak
/// is also being applied; resolving that from the enabled set keeps the
/// patch bodies independent of buffer contents.
#[derive(Debug, Default)]
pub struct EnabledSet {
    ids: HashSet<TweakId>,
}

impl EnabledSet {
    pub fn from_tweaks(tweaks: &[Tweak]) -> Self {
        EnabledSet {
            ids: tweaks
                .iter()
                .filter(|t| t.is_enabled)
                .map(|t| t.id)
                .collect(),
        }
    }

    pub fn contains(&self, id: TweakId) -> bool {
        self.ids.contains(&id)
    }
}

/// Marker the haze body leaves behind for the Rayleigh body to fill in
/// when both tweaks are enabled.
const RAYLEIGH_SLOT: &str = "&&& ADD THE RAYLEIGH TWEAK HERE &&&";

/// The stock diffuse lighting block in General.fx, kept byte-exact
/// including the trailing spaces the file carries.
const DIFFUSE_BLOCK: &str = "cDiffuse = cBase * (float4( saturate( \r\n                (cb_mSun.mAmbient.xyz + (shadowContrib * (sunDiffuse * fDotSun))) + \r\n                (cb_mMoon.mAmbient.xyz + (shadowContrib * (moonDiffuse * fDotMoon)))), 1) + cDiffuse);";

const FOG_RETURN: &str =
    "return lerp(cFog, cColor, saturate(exp(-fDistance*fDistance*fFogDensitySquared)));";

/// What happened when one stock tweak was applied.
#[derive(Debug)]
pub(crate) enum TweakOutcome {
    /// Every patch step found its anchors.
    Applied,
    /// No working patch exists for the current shader generation.
    Unsupported,
    /// An anchor was missing; the buffer was left as it was.
    AnchorMissing,
    /// A parameter value failed to parse, before any patching.
    BadValue(PresetError),
}

/// Applies one stock tweak, returning the file it targets and the
/// outcome.
pub(crate) fn apply_tweak(
    tweak: &Tweak,
    enabled: &EnabledSet,
    sources: &mut ShaderSources,
) -> (ShaderFile, TweakOutcome) {
    let file = target_file(tweak.id);
    if !tweak.id.supported() {
        return (file, TweakOutcome::Unsupported);
    }

    let mut run = PatchRun::new(std::mem::take(sources.get_mut(file)));
    let parsed = patch_body(tweak, enabled, &mut run);
    if parsed.is_err() {
        run.fail();
    }
    let ok = run.ok();
    sources.set(file, run.into_text());
    let outcome = match parsed {
        Err(e) => TweakOutcome::BadValue(e),
        Ok(()) if ok => TweakOutcome::Applied,
        Ok(()) => TweakOutcome::AnchorMissing,
    };
    (file, outcome)
}

/// The shader source a tweak edits.
pub(crate) const fn target_file(id: TweakId) -> ShaderFile {
    match id {
        TweakId::PopcornClouds
        | TweakId::CloudGroupLighting
        | TweakId::CloudLightScattering
        | TweakId::CloudLightingTuning
        | TweakId::CloudSaturation
        | TweakId::CloudShadowDepth
        | TweakId::CloudShadowSize
        | TweakId::CloudTwilightBrightness
        | TweakId::CloudPuffScaling
        | TweakId::CloudsFogTuning => ShaderFile::Cloud,
        TweakId::CirrusLighting
        | TweakId::CirrusTwilightBrightness
        | TweakId::AircraftLighting
        | TweakId::AutogenEmissiveLighting
        | TweakId::ObjectsLighting
        | TweakId::SkySaturation => ShaderFile::General,
        TweakId::SpecularLighting
        | TweakId::HazeEffect
        | TweakId::RayleighScattering
        | TweakId::SkyFogTuning => ShaderFile::FuncLibrary,
        TweakId::TerrainLighting
        | TweakId::TerrainSaturation
        | TweakId::UrbanNightLighting
        | TweakId::FsxReflections
        | TweakId::WaterSaturation
        | TweakId::WaterSurfaceTuning
        | TweakId::WaveSize => ShaderFile::Terrain,
        TweakId::WaveSpeed => ShaderFile::TerrainHeader,
        TweakId::AlternateTonemap
        | TweakId::ContrastTuning
        | TweakId::SceneToneAdjustment
        | TweakId::DisableLuminanceAdaptation => ShaderFile::Hdr,
    }
}

fn value(tweak: &Tweak, index: usize) -> &str {
    tweak
        .parameters
        .get(index)
        .map(|p| p.value.as_str())
        .unwrap_or_default()
}

fn flag(tweak: &Tweak, index: usize) -> bool {
    value(tweak, index) == "1"
}

/// Formats a derived shader constant, rounded so float noise from the
/// arithmetic does not leak into the generated source.
fn fmt_constant(v: f64) -> String {
    ((v * 1e9).round() / 1e9).to_string()
}

fn patch_body(
    tweak: &Tweak,
    enabled: &EnabledSet,
    run: &mut PatchRun,
) -> Result<(), PresetError> {
    let p0 = value(tweak, 0);
    let p1 = value(tweak, 1);

    match tweak.id {
        TweakId::PopcornClouds => {
            run.add_after(
                "void GetPointDiffuse( out float4 diffuse, in float3 corner, in float3 groupCenter",
                ", in float cloudDistance",
                1,
            );
            run.add_after(
                "float  fIntensity = -1.0f * max(dot(lightDirection, cloudGroupNormal), dot(lightDirection, facingDirection));",
                &format!("\r\nconst float fExp = saturate(exp(-cloudDistance * cloudDistance * {p0}));\r\nfIntensity = lerp(0.35f, fIntensity, fExp);"),
                1,
            );
            run.add_after(
                "diffuse = saturate(float4(.85f * colorIntensity.rgb + (0.33f * saturate(colorIntensity.rgb - 1)), colorIntensity.a));",
                &format!("\r\nif (diffuse.a > {p1}) {{ diffuse.a = lerp({p1}, diffuse.a, fExp); }}"),
                1,
            );
            run.add_after(
                "GetPointDiffuse(Out.diffuse[i], position, spriteCenter.xyz",
                ", length(positionVector)",
                1,
            );
            run.add_after(
                "GetPointDiffuse( Out.diffuse[i], position, spriteCenter.xyz",
                ", length(positionVector)",
                1,
            );
        }

        TweakId::CloudGroupLighting => {
            run.replace_all(
                "GetPointDiffuse(Out.diffuse[i], position, spriteCenter.xyz",
                "GetPointDiffuse(Out.diffuse[i], position, groupCenter.xyz",
            );
            run.replace_all(
                "GetPointDiffuse( Out.diffuse[i], position, spriteCenter.xyz",
                "GetPointDiffuse(Out.diffuse[i], position, groupCenter.xyz",
            );
        }

        TweakId::CirrusLighting => {
            run.add_before(
                "// Apply IR if active",
                &format!("if (cb_mObjectType == (uint)3)\r\n    {{\r\n        cColor.rgb = {p0} * saturate(lerp(dot(cColor.rgb, float3(0.299f, 0.587f, 0.114f)), cColor.rgb, {p1}));\r\n   }}\r\n"),
            );
        }

        TweakId::CloudLightScattering => {
            run.comment_out_range(
                "if (fIntensity < -cb_mMedianLine)",
                "    fIntensity = clamp(fIntensity, 0, 1);",
                false,
            );
            run.add_before(
                "/*if (fIntensity < -cb_mMedianLine)",
                &format!("fIntensity =  saturate({p0} * fIntensity + {p1});\r\n"),
            );
            if flag(tweak, 2) {
                run.comment_out_range(
                    "float height = corner.y;",
                    "float4 color = lerp(baseColor, topColor, s);",
                    true,
                );
                run.replace_all(
                    "float4 colorIntensity = float4(fRed, fGreen, fBlue, saturate(alpha)) * color;",
                    "float4 colorIntensity = float4(fRed, fGreen, fBlue, saturate(alpha));",
                );
            }
        }

        TweakId::CloudLightingTuning => {
            run.replace_all(
                "diffuse = saturate(float4(.85f * colorIntensity.rgb + (0.33f * saturate(colorIntensity.rgb - 1)), colorIntensity.a));",
                &format!("diffuse = saturate( float4( {p0} * colorIntensity.rgb + ( {p1} * saturate(colorIntensity.rgb - 1)), colorIntensity.a));"),
            );
        }

        TweakId::CloudSaturation => {
            run.add_after(
                "* saturate(colorIntensity.rgb - 1)), colorIntensity.a));",
                &format!("\r\ndiffuse.rgb = saturate(lerp(dot(diffuse.rgb, float3(0.299f, 0.587f, 0.114f)), diffuse.rgb, {p0}));"),
                1,
            );
        }

        // No working patch for the current shader generation.
        TweakId::CloudShadowDepth => {}

        TweakId::CloudShadowSize => {
            run.replace_first(
                "Out.position[i] = mul(float4(position, 1.0), matWorld);",
                "Out.position[i] = mul(float4(position, 0.8), matWorld);",
            );
        }

        TweakId::CloudTwilightBrightness => {
            run.add_after(
                "float3 fColor = fIntensity * cb_mCloudDirectional.rgb + cb_mCloudAmbient.rgb;",
                "\r\n    float kk = 1 + saturate(fColor.g/(cb_mFogColor.g + 0.00001) - 2);\r\n    fColor /= kk;\r\n",
                1,
            );
        }

        TweakId::CirrusTwilightBrightness => {
            run.add_after(
                "#endif //SHD_ALPHA_TEST",
                "\r\nif (cb_mObjectType == (uint)3)\r\n {\r\n      float kk = 1 + saturate(cColor.g / (cb_mFogColor.g + 0.00001) - 2);\r\n     cColor.rgb /= kk;\r\n  }\r\n",
                2,
            );
        }

        TweakId::CloudPuffScaling => {
            run.replace_all(
                "GetScreenQuadPositions(quad, width*0.5, height*0.5);",
                &format!("GetScreenQuadPositions(quad, width*{p0}, height*{p1});"),
            );
        }

        TweakId::AircraftLighting => {
            let p2 = value(tweak, 2);
            let p3 = value(tweak, 3);
            if flag(tweak, 5) {
                run.replace_all(
                    DIFFUSE_BLOCK,
                    &format!("#if !defined(PS_NEEDS_TANSPACE)\r\n   if (cb_mObjectType == 19)\r\n cDiffuse = cBase * (float4(saturate((cb_mSun.mAmbient.xyz * {p0} + (shadowContrib * (sunDiffuse * {p1} * fDotSun))) +\r\n     (cb_mMoon.mAmbient.xyz * {p2} + (shadowContrib * (moonDiffuse * {p3} * fDotMoon)))), 1) + cDiffuse);\r\n  #else\r\n  if (cb_mObjectType == 19)\r\n   cDiffuse = cBase * (float4(saturate((cb_mSun.mAmbient.xyz + (shadowContrib * (sunDiffuse * fDotSun))) + (cb_mMoon.mAmbient.xyz + (shadowContrib * (moonDiffuse * fDotMoon)))), 1) + cDiffuse);\r\n #endif\r\n  else\r\n  cDiffuse = cBase * (float4(saturate((cb_mSun.mAmbient.xyz + (shadowContrib * (sunDiffuse * fDotSun))) + (cb_mMoon.mAmbient.xyz + (shadowContrib * (moonDiffuse * fDotMoon)))), 1) + cDiffuse);"),
                );
            } else {
                run.replace_all(
                    DIFFUSE_BLOCK,
                    &format!("if (cb_mObjectType == 19)\r\n cDiffuse = cBase * (float4( saturate((cb_mSun.mAmbient.xyz * {p0} + (shadowContrib * (sunDiffuse * {p1} * fDotSun))) + (cb_mMoon.mAmbient.xyz * {p2} + (shadowContrib * (moonDiffuse * {p3} * fDotMoon)))), 1) +cDiffuse);\r\n   else\r\n     cDiffuse = cBase * (float4(saturate((cb_mSun.mAmbient.xyz + (shadowContrib * (sunDiffuse * fDotSun))) + (cb_mMoon.mAmbient.xyz + (shadowContrib * (moonDiffuse * fDotMoon)))), 1) + cDiffuse); "),
                );
            }
            let p4 = value(tweak, 4);
            run.add_before(
                "// Apply IR if active",
                &format!("if ((cb_mObjectType == (uint)0)  ||  (cb_mObjectType == (uint)19))\r\n    {{\r\n   cColor.rgb = saturate(lerp(dot(cColor.rgb, float3(0.299f, 0.587f, 0.114f)), cColor.rgb, {p4}));\r\n    }}\r\n"),
            );
        }

        TweakId::AutogenEmissiveLighting => {
            run.add_before(
                "#if ( VIEW_TYPE == SHD_VIEW_TYPE_REFLECTION )",
                &format!("if (cb_mObjectType != 19) fEmissiveScale *= {p1};\r\n"),
            );
            run.replace_all(
                "cColor = lerp(fEmissiveScale * cEmissive, cColor, 1 - cb_mDayNightInterpolant);",
                "cColor = saturate(lerp(fEmissiveScale * cEmissive, cColor, 1 - cb_mDayNightInterpolant));",
            );
            run.replace_second(
                "fEmissiveScale = cb_mHDREmissiveScale * cEmissive.a;",
                &format!("fEmissiveScale = {p0} * cb_mHDREmissiveScale * cEmissive.a;"),
            );
            if flag(tweak, 2) {
                run.replace_second(
                    "cColor += float4(fEmissiveScale * cEmissive.rgb, 0);",
                    "if ((cb_mObjectType == 10) || (cb_mObjectType == 28)) cColor = lerp(fEmissiveScale * cEmissive, cColor, 1 - cb_mDayNightInterpolant); else cColor += float4(fEmissiveScale * cEmissive.rgb, 0);",
                );
            }
        }

        TweakId::ObjectsLighting => {
            let p2 = value(tweak, 2);
            let p3 = value(tweak, 3);
            // When the aircraft tweak runs first the diffuse block is
            // already rewritten, so hook the shadow guard instead.
            if enabled.contains(TweakId::AircraftLighting) {
                run.add_before(
                    "#if !defined(SHD_BASE) && defined(SHD_RECEIVE_SHADOWS)",
                    &format!("if (cb_mObjectType != 19)\r\n cDiffuse = cBase * (float4(saturate((cb_mSun.mAmbient.xyz * {p0} + (shadowContrib * (sunDiffuse * {p1} * fDotSun))) + (cb_mMoon.mAmbient.xyz * {p2} + (shadowContrib * (moonDiffuse * {p3} * fDotMoon)))), 1) + cDiffuse);\r\n   else\r\n cDiffuse = cBase * (float4(saturate((cb_mSun.mAmbient.xyz + (shadowContrib * (sunDiffuse * fDotSun))) + (cb_mMoon.mAmbient.xyz + (shadowContrib * (moonDiffuse * fDotMoon)))), 1) + cDiffuse);\r\n"),
                );
            } else {
                run.replace_all(
                    DIFFUSE_BLOCK,
                    &format!("if (cb_mObjectType != 19)\r\n cDiffuse = cBase * (float4(saturate((cb_mSun.mAmbient.xyz * {p0} + (shadowContrib * (sunDiffuse * {p1} * fDotSun))) + (cb_mMoon.mAmbient.xyz * {p2} + (shadowContrib * (moonDiffuse * {p3} * fDotMoon)))), 1) + cDiffuse);\r\n   else\r\n cDiffuse = cBase * (float4(saturate((cb_mSun.mAmbient.xyz + (shadowContrib * (sunDiffuse * fDotSun))) + (cb_mMoon.mAmbient.xyz + (shadowContrib * (moonDiffuse * fDotMoon)))), 1) + cDiffuse); "),
                );
            }
        }

        TweakId::SpecularLighting => {
            run.replace_all(
                "return specularIntensity * SpecularColor * DiffuseColor;",
                &format!("return {p0} * specularIntensity * SpecularColor * DiffuseColor;"),
            );
        }

        TweakId::TerrainLighting => {
            let p2 = value(tweak, 2);
            let p3 = value(tweak, 3);
            run.replace_all(
                "const float3 finalSunColor = (sunAmbient + (sunDiffuse * (sunContrib * shadowContrib)));",
                &format!("const float3 finalSunColor = (sunAmbient * {p0} + (sunDiffuse * {p1} * (sunContrib * shadowContrib)));"),
            );
            run.replace_all(
                "const float3 finalMoonColor = (moonAmbient + (moonDiffuse * (moonContrib * shadowContrib)));",
                &format!("const float3 finalMoonColor = (moonAmbient * {p2} + (moonDiffuse * {p3} * (moonContrib * shadowContrib)));"),
            );
        }

        TweakId::TerrainSaturation => {
            run.add_after(
                "FinalColor = float4(FinalLighting, fAlpha);",
                &format!("\r\nFinalColor.rgb = saturate(lerp(dot(FinalColor.rgb, float3(0.299f, 0.587f, 0.114f)), FinalColor.rgb, {p0}));"),
                1,
            );
        }

        TweakId::UrbanNightLighting => {
            run.replace_second(
                "EmissiveColor = (EmissiveColor*EmissiveColor);",
                &format!("EmissiveColor = pow(saturate(EmissiveColor), {p1});"),
            );
            run.add_after(
                "EmissiveColor *= 0.35f;\r\n        #endif",
                &format!("\r\nEmissiveColor *= {p0};"),
                1,
            );
        }

        TweakId::CloudsFogTuning => {
            run.replace_all(
                "cColor = VolumetricFogPS( In.mAlt, cColor, In.fFogDistance / 2.0, cb_mFogDensity, cb_mFogColor.xyz);",
                &format!("cColor = VolumetricFogPS( In.mAlt, cColor, In.fFogDistance * {p0}, cb_mFogDensity, cb_mFogColor.xyz);"),
            );
            run.replace_all(
                "cColor = float4( FogPS( cColor.xyz, In.fFogDistance / 2.0, cb_mFogDensity, cb_mFogColor.xyz ), cColor.a );",
                &format!("cColor = float4( FogPS( cColor.xyz, In.fFogDistance * {p0}, cb_mFogDensity, cb_mFogColor.xyz ), cColor.a );"),
            );
        }

        TweakId::HazeEffect => {
            let p3 = value(tweak, 3);
            let slot = if enabled.contains(TweakId::RayleighScattering) {
                RAYLEIGH_SLOT
            } else {
                ""
            };
            run.add_before(
                FOG_RETURN,
                &format!("#if !defined(SHD_VOLUMETRIC_FOG)\r\n float3 FinalColor = cColor;\r\n  if ((cb_mObjectType != (uint)1) && (cb_mObjectType != (uint)3) && (cb_mObjectType != (uint)21) && (cb_mObjectType != (uint)19))\r\n   {{\r\n   FinalColor.rgb = lerp(pow(saturate(cb_mFogColor.rgb * float3({p3})), (1 + saturate(cb_mSun.mDiffuse.g - 0.35f)) * {p0}), FinalColor.rgb, saturate(exp(-fDistance * fDistance * {p1})));\r\n  }}\r\n{slot}  return lerp(cFog, FinalColor, saturate(exp(-fDistance * fDistance * fFogDensitySquared)));\r\n #endif\r\n"),
            );
            run.add_after(
                "float horizonFogDensity = fFogDensity;",
                &format!("\r\n#if !defined(SHD_ADDITIVE) && !defined(SHD_MULTIPLICATIVE)\r\n if ((cb_mObjectType != (uint)1) && (cb_mObjectType != (uint)3) && (cb_mObjectType != (uint)21) && (cb_mObjectType != (uint)19))\r\n  {{\r\n  FinalColor.rgb = lerp(pow(saturate(cb_mFogColor.rgb * float3({p3})), (1 + saturate(cb_mSun.mDiffuse.g - 0.35f)) * {p0}), FinalColor.rgb, saturate(exp(-distQuared * {p1})));\r\n }}\r\n #endif"),
                1,
            );
            if flag(tweak, 2) {
                // The search text embeds the density value injected above.
                run.replace_all(
                    &format!("FinalColor.rgb, saturate(exp(-distQuared * {p1}))"),
                    &format!("FinalColor.rgb, saturate(exp(-distQuared * {p1} * saturate(1.0f - cb_Altitude/15000)))"),
                );
            }
        }

        TweakId::RayleighScattering => {
            let p4 = value(tweak, 4);
            let p5 = value(tweak, 5);
            let body = format!("if ((cb_mObjectType != (uint)1) && (cb_mObjectType != (uint)21) && (cb_mObjectType != (uint)19))\r\n  {{\r\n  const float DensFactor = {p1};\r\n  const float DistK = {p0} * (1 - saturate(exp(-fDistance * fDistance * DensFactor))) * saturate(cb_mSun.mDiffuse.g - 0.15);\r\n  FinalColor.rgb = FinalColor.rgb * (1 - float3(0.00, 0.055, 0.111) * DistK) + float3(0.00, 0.055, 0.111) * DistK;\r\n  }}\r\n");
            if enabled.contains(TweakId::HazeEffect) {
                run.replace_all(RAYLEIGH_SLOT, &body);
            } else {
                run.add_before(
                    FOG_RETURN,
                    &format!("#if !defined(SHD_VOLUMETRIC_FOG)\r\n     float3 FinalColor = cColor;\r\n  if ((cb_mObjectType != (uint)1) && (cb_mObjectType != (uint)21) && (cb_mObjectType != (uint)19))\r\n   {{\r\n  const float DensFactor = {p1};\r\n  const float DistK = {p0} * (1 - saturate(exp(-fDistance * fDistance * DensFactor))) * saturate(cb_mSun.mDiffuse.g - 0.15);\r\n    FinalColor.rgb = FinalColor.rgb * (1 - float3(0.00, 0.055, 0.111) * DistK) + float3(0.00, 0.055, 0.111) * DistK;\r\n  }}\r\n  return lerp(cFog, FinalColor, saturate(exp(-fDistance * fDistance * fFogDensitySquared)));\r\n #endif\r\n"),
                );
            }
            run.add_after(
                "float3 layerEnableFade = float3(1, 1, 1);",
                &format!("\r\n#if !defined(SHD_ADDITIVE) && !defined(SHD_MULTIPLICATIVE)\r\n  if ((cb_mObjectType != (uint)1) && (cb_mObjectType != (uint)21) && (cb_mObjectType != (uint)19))\r\n  {{\r\n    const float DensFactor = {p1};\r\n    const float DistK = {p0} * (1 - saturate(exp(-distQuared * DensFactor))) * saturate(cb_mSun.mDiffuse.g - 0.15);\r\n   FinalColor.rgb = FinalColor.rgb * (1 - float3(0.00, {p4}, {p5}) * DistK) + float3(0.00, {p4}, {p5}) * DistK;\r\n  }}\r\n#endif"),
                1,
            );
            if flag(tweak, 2) {
                run.replace_all(
                    &format!("const float DensFactor = {p1};"),
                    &format!("const float DensFactor = {p1} * saturate(1.0f - cb_Altitude/15000);"),
                );
                run.replace_all(
                    "if ((cb_mObjectType != (uint)1) && (cb_mObjectType != (uint)21) && (cb_mObjectType != (uint)19))",
                    "if ((cb_mObjectType != (uint)1) && (cb_mObjectType != (uint)3) && (cb_mObjectType != (uint)21) && (cb_mObjectType != (uint)19))",
                );
            }
        }

        TweakId::SkyFogTuning => {
            run.add_after(
                "float3 FogPS(const float3 cColor,\r\n             const float  fDistance,\r\n             const float  fFogDensitySquared,\r\n             const float3 cFog)\r\n{",
                &format!("\r\nfloat fDens = fFogDensitySquared;\r\n    if (cb_mObjectType == (uint)1) fDens *= {p0}; "),
                1,
            );
            run.replace_all(
                FOG_RETURN,
                "return lerp(cFog, cColor, saturate(exp(-fDistance*fDistance*fDens)));",
            );
        }

        TweakId::SkySaturation => {
            run.add_before(
                "// Apply IR if active",
                &format!("if (cb_mObjectType == (uint)1)\r\n    {{\r\n    cColor.rgb = saturate(lerp(dot(cColor.rgb, float3(0.299f, 0.587f, 0.114f)), cColor.rgb, {p0}));\r\n   }}\r\n"),
            );
        }

        TweakId::FsxReflections => {
            run.replace_all(
                "float3 vEyeDirWS = (vEyeVectWS) / eyeDist;",
                "float3 vEyeDirWS = (vEyeVectWS) * 0.99/ eyeDist;",
            );
            run.replace_all(
                "saturate((pow(abs(specularBoost * saturate(float2(dot(vreflect,vEyeDirWS.xyz), dot(runningNormal, vHN2))))",
                "saturate((pow(abs(specularBoost * saturate(float2(dot(runningNormal, vHN), dot(runningNormal, vHN2))))",
            );
            run.replace_all(
                "(pow(abs(specularBoost * saturate(float2(dot(vreflect,vEyeDirWS.xyz), dot(Bump.xyz, vHN2))))",
                "(pow(abs(specularBoost * saturate(float2(dot(Bump.xyz, vHN), dot(Bump.xyz, vHN2))))",
            );
        }

        TweakId::WaterSaturation => {
            run.add_after(
                "FinalColor = float4(FinalLighting, fAlpha);",
                &format!("\r\n#if defined(SHD_HAS_WATER)\r\n  if (Input.IsWater) FinalColor.rgb = saturate(lerp(dot(FinalColor.rgb, float3(0.299f, 0.587f, 0.114f)), FinalColor.rgb, {p0}));\r\n #endif"),
                1,
            );
        }

        TweakId::WaterSurfaceTuning => {
            let p2 = value(tweak, 2);
            let p3 = value(tweak, 3);
            let p4 = value(tweak, 4);
            run.replace_all(
                "const float bias = 1 + 3 * saturate( 1.0f - dot( vEyeDirWS,float3(  0, 1, 0 )));",
                &format!("const float bias = 1 + {p2} * saturate( 1.0f - dot( vEyeDirWS,float3(  0, 1, 0 )));"),
            );
            run.replace_all(
                "specularFactor = (specularBlend *",
                &format!("specularFactor = (specularBlend * {p3} *"),
            );
            run.replace_all(
                "reflectionFresnel = clamp( .001f + 0.99f * pow( saturate(1 - dot( vEyeDirWS.xyz, fresnelNormal)), 4 ), 0, 1 );",
                &format!("reflectionFresnel = clamp( .001f + 0.99f * pow( saturate(1 - dot( vEyeDirWS.xyz, fresnelNormal)), {p4} ), 0, 1 );"),
            );
            run.replace_all(
                "EnvironmentColor.rgb = .40f * reflectionRefractionColor.rgb * ( 1 - fAlpha );",
                &format!("EnvironmentColor.rgb = {p0} * reflectionRefractionColor.rgb * ( 1 - fAlpha );"),
            );
        }

        TweakId::WaveSize => {
            run.replace_all(
                "const float fLogEyeDist = min(log2(eyeDist) - 7, 7);",
                &format!("const float fLogEyeDist = min(log2(eyeDist/(1 + saturate(cb_Altitude/10000) * {p0})) - 7, 7);"),
            );
            run.add_after(
                "Bump.xyz = lerp(Bump.xyz, level[1], saturate((eyeDist - 24000) / 24000));",
                &format!("\r\nBump.xz *= (1 - saturate(cb_Altitude/10000 * {p1}));"),
                1,
            );
        }

        TweakId::WaveSpeed => {
            run.replace_all(
                "const float2 scrollOffset = windScaler * cb_mSimTime * float2(sc.x, sc.y);",
                &format!("const float2 scrollOffset = windScaler * {p0} * cb_mSimTime * float2(sc.x, sc.y);"),
            );
        }

        TweakId::AlternateTonemap => {
            run.replace_all(
                "return saturate(pow(color, 2.2f));",
                "return saturate(pow(color, 2.5f) * 1.2f);",
            );
        }

        TweakId::ContrastTuning => {
            let Ok(coeff) = p0.parse::<f64>() else {
                return Err(PresetError::ParseFailure {
                    section: tweak.key().to_string(),
                    key: "Coeff".to_string(),
                    value: p0.to_string(),
                    kind: ValueKind::Float,
                });
            };
            let val1 = fmt_constant(1.0 - coeff);
            let val2 = fmt_constant(2.2 - coeff);
            run.replace_all(
                "color = (color * (6.2f * color + 0.5f)) / (color * (6.2f * color + 1.7f) + 0.06f);",
                &format!("color = (color * (6.2f * color + {val1})) / (color * (6.2f * color + {val2}) + 0.06);"),
            );
        }

        TweakId::SceneToneAdjustment => {
            run.add_before(
                "return float4(finalColor, 1.0f);",
                &format!("finalColor.rgb = saturate(finalColor.rgb * float3({p0}))\r\n;"),
            );
        }

        TweakId::DisableLuminanceAdaptation => {
            run.replace_all(
                "return max(exp(lumTex.Sample(samClamp, texCoord).x), 0.1f);",
                "return max((1-cb_mDayNightInterpolant) * 0.35, 0.1);",
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use openshade_presets::tweak_catalog;

    fn catalog_tweak(id: TweakId) -> Tweak {
        let mut tweak = tweak_catalog()
            .into_iter()
            .find(|t| t.id == id)
            .unwrap();
        tweak.is_enabled = true;
        tweak
    }

    #[test]
    fn specular_lighting_scales_the_return_value() {
        let mut sources = ShaderSources::default();
        sources.set(
            ShaderFile::FuncLibrary,
            "return specularIntensity * SpecularColor * DiffuseColor;\r\n".to_string(),
        );
        let tweak = catalog_tweak(TweakId::SpecularLighting);
        let (file, outcome) = apply_tweak(&tweak, &EnabledSet::default(), &mut sources);
        assert!(matches!(outcome, TweakOutcome::Applied));
        assert_eq!(file, ShaderFile::FuncLibrary);
        assert_eq!(
            sources.get(ShaderFile::FuncLibrary),
            "return 1 * specularIntensity * SpecularColor * DiffuseColor;\r\n"
        );
    }

    #[test]
    fn a_missing_anchor_reports_failure_and_keeps_the_buffer() {
        let mut sources = ShaderSources::default();
        sources.set(ShaderFile::FuncLibrary, "nothing to see\r\n".to_string());
        let tweak = catalog_tweak(TweakId::SpecularLighting);
        let (_, outcome) = apply_tweak(&tweak, &EnabledSet::default(), &mut sources);
        assert!(matches!(outcome, TweakOutcome::AnchorMissing));
        assert_eq!(sources.get(ShaderFile::FuncLibrary), "nothing to see\r\n");
    }

    #[test]
    fn cloud_shadow_depth_is_reported_unsupported() {
        let mut sources = ShaderSources::default();
        let tweak = catalog_tweak(TweakId::CloudShadowDepth);
        let (file, outcome) = apply_tweak(&tweak, &EnabledSet::default(), &mut sources);
        assert_eq!(file, ShaderFile::Cloud);
        assert!(matches!(outcome, TweakOutcome::Unsupported));
    }

    #[test]
    fn contrast_tuning_derives_both_constants() {
        let mut sources = ShaderSources::default();
        sources.set(
            ShaderFile::Hdr,
            "color = (color * (6.2f * color + 0.5f)) / (color * (6.2f * color + 1.7f) + 0.06f);"
                .to_string(),
        );
        let tweak = catalog_tweak(TweakId::ContrastTuning);
        let (_, outcome) = apply_tweak(&tweak, &EnabledSet::default(), &mut sources);
        assert!(matches!(outcome, TweakOutcome::Applied));
        assert_eq!(
            sources.get(ShaderFile::Hdr),
            "color = (color * (6.2f * color + 0.5)) / (color * (6.2f * color + 1.7) + 0.06);"
        );
    }

    #[test]
    fn haze_leaves_a_slot_only_when_rayleigh_is_also_enabled() {
        let source = format!("float horizonFogDensity = fFogDensity;\r\n{FOG_RETURN}\r\n");

        let haze = catalog_tweak(TweakId::HazeEffect);
        let rayleigh = catalog_tweak(TweakId::RayleighScattering);
        let both = EnabledSet::from_tweaks(&[haze.clone(), rayleigh]);

        let mut sources = ShaderSources::default();
        sources.set(ShaderFile::FuncLibrary, source.clone());
        let (_, outcome) = apply_tweak(&haze, &both, &mut sources);
        assert!(matches!(outcome, TweakOutcome::Applied));
        assert!(sources.get(ShaderFile::FuncLibrary).contains(RAYLEIGH_SLOT));

        let alone = EnabledSet::from_tweaks(&[haze.clone()]);
        sources.set(ShaderFile::FuncLibrary, source);
        let (_, outcome) = apply_tweak(&haze, &alone, &mut sources);
        assert!(matches!(outcome, TweakOutcome::Applied));
        assert!(!sources.get(ShaderFile::FuncLibrary).contains(RAYLEIGH_SLOT));
    }

    #[test]
    fn rayleigh_fills_the_haze_slot() {
        let source = format!(
            "float3 layerEnableFade = float3(1, 1, 1);\r\n{RAYLEIGH_SLOT}\r\n{FOG_RETURN}\r\n"
        );
        let haze = catalog_tweak(TweakId::HazeEffect);
        let mut rayleigh = catalog_tweak(TweakId::RayleighScattering);
        // Altitude correction off keeps the injected block verbatim.
        rayleigh.parameters[2].value = "0".to_string();
        let both = EnabledSet::from_tweaks(&[haze, rayleigh.clone()]);

        let mut sources = ShaderSources::default();
        sources.set(ShaderFile::FuncLibrary, source);
        let (_, outcome) = apply_tweak(&rayleigh, &both, &mut sources);
        assert!(matches!(outcome, TweakOutcome::Applied));
        let patched = sources.get(ShaderFile::FuncLibrary);
        assert!(!patched.contains(RAYLEIGH_SLOT));
        assert!(patched.contains("const float DistK = 2 *"));
    }

    #[test]
    fn a_non_numeric_contrast_value_reports_the_value_and_keeps_the_buffer() {
        let source = "color = (color * (6.2f * color + 0.5f)) / (color * (6.2f * color + 1.7f) + 0.06f);";
        let mut sources = ShaderSources::default();
        sources.set(ShaderFile::Hdr, source.to_string());
        let mut tweak = catalog_tweak(TweakId::ContrastTuning);
        tweak.parameters[0].value = "strong".to_string();
        let (_, outcome) = apply_tweak(&tweak, &EnabledSet::default(), &mut sources);
        match outcome {
            TweakOutcome::BadValue(e) => {
                let message = e.to_string();
                assert!(message.contains("Coeff"), "{message}");
                assert!(message.contains("strong"), "{message}");
            }
            other => panic!("expected a bad value, got {other:?}"),
        }
        assert_eq!(sources.get(ShaderFile::Hdr), source);
    }

    #[test]
    fn every_supported_tweak_has_a_target_file() {
        for tweak in tweak_catalog() {
            // Exhaustiveness of the dispatch is what matters here.
            let _ = target_file(tweak.id);
        }
    }
}

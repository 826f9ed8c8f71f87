//! Common types shared across the OpenShade crates.

pub mod log;

use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// The name did not match any of the shader files the engine patches.
#[derive(Error, Debug)]
#[error("unknown shader file {0:?}")]
pub struct UnknownShaderFile(pub String);

/// One of the seven Prepar3D shader sources the patch engine rewrites.
///
/// The discriminant doubles as the index into shader buffer arrays, in
/// the order tweaks touch the files.
#[repr(usize)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderFile {
    /// `Cloud.fx`, volumetric cloud shading.
    Cloud = 0,
    /// `General.fx`, scenery and aircraft shading.
    General,
    /// `GPUTerrain.fx`, terrain shading entry points.
    Terrain,
    /// `FuncLibrary.fxh`, shared lighting helpers.
    FuncLibrary,
    /// `GPUTerrain.fxh`, terrain helper functions.
    TerrainHeader,
    /// `Shadow.fxh`, shadow sampling helpers.
    Shadow,
    /// `HDR.hlsl`, the tone mapping post pipeline.
    Hdr,
}

impl ShaderFile {
    /// Every patched file, in apply order.
    pub const ALL: [ShaderFile; 7] = [
        ShaderFile::Cloud,
        ShaderFile::General,
        ShaderFile::Terrain,
        ShaderFile::FuncLibrary,
        ShaderFile::TerrainHeader,
        ShaderFile::Shadow,
        ShaderFile::Hdr,
    ];

    /// The base file name, without any directory component.
    pub const fn file_name(self) -> &'static str {
        match self {
            ShaderFile::Cloud => "Cloud.fx",
            ShaderFile::General => "General.fx",
            ShaderFile::Terrain => "GPUTerrain.fx",
            ShaderFile::FuncLibrary => "FuncLibrary.fxh",
            ShaderFile::TerrainHeader => "GPUTerrain.fxh",
            ShaderFile::Shadow => "Shadow.fxh",
            ShaderFile::Hdr => "HDR.hlsl",
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Path of this file relative to the live shader directory.
    ///
    /// The simulator keeps `HDR.hlsl` under a `PostProcess` subdirectory
    /// there; backup directories store all seven files flat.
    pub fn live_path(self) -> PathBuf {
        match self {
            ShaderFile::Hdr => PathBuf::from("PostProcess").join(self.file_name()),
            _ => PathBuf::from(self.file_name()),
        }
    }
}

impl FromStr for ShaderFile {
    type Err = UnknownShaderFile;

    /// Parses a file name, ignoring any leading directory component.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let base = s.rsplit(['/', '\\']).next().unwrap_or(s);
        for file in ShaderFile::ALL {
            if file.file_name().eq_ignore_ascii_case(base) {
                return Ok(file);
            }
        }
        Err(UnknownShaderFile(s.to_string()))
    }
}

impl std::fmt::Display for ShaderFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Grouping of stock tweaks, mirroring the preset section name prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Clouds,
    Lighting,
    Atmosphere,
    Water,
    Hdr,
}

impl Category {
    /// The prefix stock tweak section names carry in preset files.
    pub const fn section_prefix(self) -> &'static str {
        match self {
            Category::Clouds => "CLOUDS",
            Category::Lighting => "LIGHTING",
            Category::Atmosphere => "ATMOSPHERE & FOG",
            Category::Water => "WATER",
            Category::Hdr => "HDR & POST-PROCESSING",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::Clouds => "Clouds",
            Category::Lighting => "Lighting",
            Category::Atmosphere => "Atmosphere",
            Category::Water => "Water",
            Category::Hdr => "HDR",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_file_names_case_insensitively() {
        assert_eq!(ShaderFile::from_str("cloud.FX").unwrap(), ShaderFile::Cloud);
        assert_eq!(
            ShaderFile::from_str("GPUTerrain.fxh").unwrap(),
            ShaderFile::TerrainHeader
        );
        assert!(ShaderFile::from_str("Water.fx").is_err());
    }

    #[test]
    fn strips_directory_components() {
        assert_eq!(
            ShaderFile::from_str("PostProcess\\HDR.hlsl").unwrap(),
            ShaderFile::Hdr
        );
        assert_eq!(
            ShaderFile::from_str("PostProcess/HDR.hlsl").unwrap(),
            ShaderFile::Hdr
        );
    }

    #[test]
    fn hdr_lives_under_postprocess() {
        assert_eq!(
            ShaderFile::Hdr.live_path(),
            PathBuf::from("PostProcess").join("HDR.hlsl")
        );
        assert_eq!(ShaderFile::Cloud.live_path(), PathBuf::from("Cloud.fx"));
    }
}

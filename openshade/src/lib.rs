#![forbid(missing_docs)]
//! Preset-driven shader tweaking for Prepar3D.
//!
//! OpenShade patches the simulator's HLSL shader files with a catalog
//! of toggleable, parameterized tweaks and post process effects, with
//! the whole state stored in INI style preset files.
//!
//! ## Usage
//! The core objects are the tweak/post-process catalogs in
//! [`presets`](crate::presets) and the apply engine in
//! [`engine`](crate::engine).
//!
//! The basic workflow: build the stock catalogs, load a preset file
//! into them, then hand the state to [`engine::apply_to_directory`]
//! to rebuild the live shader files from the unmodified backups and
//! clear the shader cache.

/// Preset files, the tweak and post process catalogs, and the mapping
/// between the two.
///
/// Presets store the full state of every tweak: enabled flags,
/// parameter values, custom search/replace patterns (hex encoded) and a
/// free form comment.
pub mod presets {
    pub use openshade_presets::*;
}

/// Literal text patch primitives over shader sources.
///
/// Everything is exact substring matching; a primitive that finds no
/// match reports failure and leaves the buffer untouched.
pub mod patch {
    pub use openshade_patch::*;
}

/// The apply engine: rebuilds the live shader files from backups with
/// every enabled tweak patched in.
pub mod engine {
    pub use openshade_engine::*;
}

/// Shared vocabulary: shader file identities, categories and the apply
/// log.
pub mod common {
    pub use openshade_common::*;
}

//! The OpenShade patch application engine.
//!
//! Takes the in-memory preset state (tweaks, custom tweaks, post
//! processes) and rebuilds the live Prepar3D shader files from the
//! unmodified backups. Every run starts from the backups, so applying
//! is idempotent and disabling a tweak simply drops its patches from
//! the next rebuild.

mod apply;
mod error;
mod postprocess;
mod sources;
mod tweaks;

pub use apply::{apply, apply_to_directory};
pub use error::ApplyError;
pub use sources::{
    backup_exists, backup_shaders, clear_directory, restore_shaders, ShaderSources,
};
pub use tweaks::EnabledSet;

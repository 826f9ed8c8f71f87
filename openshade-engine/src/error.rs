use openshade_common::ShaderFile;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort an apply run.
///
/// Stock tweak failures are reported as log events and do not abort;
/// custom tweaks and post processes are all-or-nothing, so their
/// failures surface here.
#[derive(Error, Debug)]
pub enum ApplyError {
    /// A shader source could not be read from disk.
    #[error("could not read shader file {0:?}")]
    ReadShader(PathBuf, #[source] io::Error),
    /// A patched shader source could not be written back.
    #[error("could not write shader file {0:?}")]
    WriteShader(PathBuf, #[source] io::Error),
    /// The shader cache directory could not be emptied.
    #[error("could not clear directory {0:?}")]
    ClearDirectory(PathBuf, #[source] io::Error),
    /// A custom tweak's search pattern matched nothing.
    #[error("custom tweak [{0}] did not match in {1}")]
    CustomTweakFailed(String, ShaderFile),
    /// A post process could not be spliced into the tone map pipeline.
    #[error("post process [{0}] could not be installed in {1}")]
    PostProcessFailed(String, ShaderFile),
    /// The color accumulator the post chain hangs off could not be
    /// installed.
    #[error("post process entry block could not be installed in {0}")]
    AccumulatorFailed(ShaderFile),
}

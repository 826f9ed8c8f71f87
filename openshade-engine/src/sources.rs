//! The in-memory shader source set and its file system layout.
//!
//! Backups hold all seven files flat in one directory. The live shader
//! directory keeps `HDR.hlsl` under a `PostProcess` subdirectory, which
//! `ShaderFile::live_path` encodes.

use crate::error::ApplyError;
use openshade_common::ShaderFile;
use std::fs;
use std::path::Path;

/// The seven shader sources an apply run patches, indexed by
/// [`ShaderFile`].
#[derive(Debug, Clone, Default)]
pub struct ShaderSources {
    texts: [String; 7],
}

impl ShaderSources {
    pub fn get(&self, file: ShaderFile) -> &str {
        &self.texts[file.index()]
    }

    pub fn get_mut(&mut self, file: ShaderFile) -> &mut String {
        &mut self.texts[file.index()]
    }

    pub fn set(&mut self, file: ShaderFile, text: String) {
        self.texts[file.index()] = text;
    }

    /// Reads all seven sources from a backup directory (flat layout).
    pub fn load(dir: &Path) -> Result<Self, ApplyError> {
        let mut sources = ShaderSources::default();
        for file in ShaderFile::ALL {
            let path = dir.join(file.file_name());
            let text = fs::read_to_string(&path)
                .map_err(|e| ApplyError::ReadShader(path.clone(), e))?;
            tracing::debug!(file = %file, bytes = text.len(), "loaded shader source");
            sources.set(file, text);
        }
        Ok(sources)
    }

    /// Writes all seven sources into a live shader directory.
    pub fn write_live(&self, dir: &Path) -> Result<(), ApplyError> {
        for file in ShaderFile::ALL {
            let path = dir.join(file.live_path());
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| ApplyError::WriteShader(path.clone(), e))?;
            }
            fs::write(&path, self.get(file))
                .map_err(|e| ApplyError::WriteShader(path.clone(), e))?;
        }
        Ok(())
    }
}

/// Whether a directory already holds a complete flat backup.
pub fn backup_exists(dir: &Path) -> bool {
    ShaderFile::ALL
        .iter()
        .all(|file| dir.join(file.file_name()).is_file())
}

/// Copies the unmodified sources out of the live directory into a flat
/// backup directory.
pub fn backup_shaders(live: &Path, backup: &Path) -> Result<(), ApplyError> {
    fs::create_dir_all(backup)
        .map_err(|e| ApplyError::WriteShader(backup.to_path_buf(), e))?;
    for file in ShaderFile::ALL {
        let from = live.join(file.live_path());
        let to = backup.join(file.file_name());
        fs::copy(&from, &to).map_err(|e| ApplyError::ReadShader(from.clone(), e))?;
    }
    Ok(())
}

/// Puts the backed up sources back into the live directory.
pub fn restore_shaders(backup: &Path, live: &Path) -> Result<(), ApplyError> {
    ShaderSources::load(backup)?.write_live(live)
}

/// Deletes every plain file in a directory, leaving subdirectories
/// alone. A missing directory counts as already clear.
pub fn clear_directory(dir: &Path) -> Result<(), ApplyError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(ApplyError::ClearDirectory(dir.to_path_buf(), e)),
    };
    for entry in entries {
        let entry = entry.map_err(|e| ApplyError::ClearDirectory(dir.to_path_buf(), e))?;
        let path = entry.path();
        if path.is_file() {
            fs::remove_file(&path)
                .map_err(|e| ApplyError::ClearDirectory(dir.to_path_buf(), e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn seed_backup(dir: &Path) {
        for file in ShaderFile::ALL {
            fs::write(dir.join(file.file_name()), format!("// {file}\r\n")).unwrap();
        }
    }

    #[test]
    fn load_and_write_live_round_trip() {
        let backup = tempfile::tempdir().unwrap();
        let live = tempfile::tempdir().unwrap();
        seed_backup(backup.path());

        let sources = ShaderSources::load(backup.path()).unwrap();
        sources.write_live(live.path()).unwrap();

        assert!(live.path().join("Cloud.fx").is_file());
        assert!(live.path().join("PostProcess").join("HDR.hlsl").is_file());
        assert!(!live.path().join("HDR.hlsl").exists());
    }

    #[test]
    fn backup_exists_needs_every_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!backup_exists(dir.path()));
        seed_backup(dir.path());
        assert!(backup_exists(dir.path()));
        fs::remove_file(dir.path().join("Shadow.fxh")).unwrap();
        assert!(!backup_exists(dir.path()));
    }

    #[test]
    fn clear_directory_removes_files_not_subdirectories() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.bin"), b"x").unwrap();
        fs::create_dir(dir.path().join("keep")).unwrap();
        clear_directory(dir.path()).unwrap();
        assert!(!dir.path().join("a.bin").exists());
        assert!(dir.path().join("keep").is_dir());
    }

    #[test]
    fn clear_directory_tolerates_a_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("never-made");
        assert!(clear_directory(&gone).is_ok());
    }
}

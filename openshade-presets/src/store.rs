//! The on-disk preset store.
//!
//! Presets are ordered `[SECTION]` blocks of `key=value` lines. Section
//! and key lookups are ASCII case insensitive, writes preserve the
//! casing they were given, and sections keep the order they first
//! appeared in.

use crate::error::PresetError;
use crate::parse::{do_lex, Token};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Section {
    name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn entry(&self, key: &str) -> Option<&(String, String)> {
        self.entries.iter().find(|(k, _)| k.eq_ignore_ascii_case(key))
    }
}

/// An in-memory preset file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PresetFile {
    sections: Vec<Section>,
}

impl PresetFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses preset text. Later duplicate keys overwrite earlier ones,
    /// and a section header reappearing continues the earlier section.
    pub fn parse(source: &str) -> Result<Self, PresetError> {
        let tokens = do_lex(source)?;
        let mut preset = PresetFile::default();
        let mut current = None;
        for token in tokens {
            match token {
                Token::Section(name) => {
                    let name = name.fragment().trim();
                    current = Some(preset.section_index(name));
                }
                Token::Entry { key, value } => {
                    let key = key.fragment().trim();
                    let Some(index) = current else {
                        return Err(PresetError::StrayEntry {
                            key: key.to_string(),
                        });
                    };
                    upsert(
                        &mut preset.sections[index].entries,
                        key,
                        value.fragment().trim().to_string(),
                    );
                }
            }
        }
        Ok(preset)
    }

    /// Reads a preset from disk. A missing file yields an empty preset,
    /// matching the behavior of writing the first preset to a new path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PresetError> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(source) => Self::parse(&source),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(PresetError::IOError(path.to_path_buf(), e)),
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PresetError> {
        let path = path.as_ref();
        fs::write(path, self.render()).map_err(|e| PresetError::IOError(path.to_path_buf(), e))
    }

    /// Serializes the preset with CRLF line endings.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for section in &self.sections {
            out.push('[');
            out.push_str(&section.name);
            out.push_str("]\r\n");
            for (key, value) in &section.entries {
                out.push_str(key);
                out.push('=');
                out.push_str(value);
                out.push_str("\r\n");
            }
            out.push_str("\r\n");
        }
        out
    }

    pub fn try_read(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)?
            .entry(key)
            .map(|(_, v)| v.as_str())
    }

    pub fn read(&self, section: &str, key: &str) -> Result<&str, PresetError> {
        self.try_read(section, key)
            .ok_or_else(|| PresetError::MissingKey {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    pub fn key_exists(&self, section: &str, key: &str) -> bool {
        self.try_read(section, key).is_some()
    }

    /// Upserts a value, creating the section at the end if needed.
    pub fn write(&mut self, section: &str, key: &str, value: impl Into<String>) {
        let index = self.section_index(section);
        upsert(&mut self.sections[index].entries, key, value.into());
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|s| s.name.as_str())
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    fn section_index(&mut self, name: &str) -> usize {
        match self
            .sections
            .iter()
            .position(|s| s.name.eq_ignore_ascii_case(name))
        {
            Some(index) => index,
            None => {
                self.sections.push(Section {
                    name: name.to_string(),
                    entries: Vec::new(),
                });
                self.sections.len() - 1
            }
        }
    }
}

fn upsert(entries: &mut Vec<(String, String)>, key: &str, value: String) {
    match entries
        .iter_mut()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
    {
        Some((_, v)) => *v = value,
        None => entries.push((key.to_string(), value)),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn lookups_are_case_insensitive() {
        let mut preset = PresetFile::new();
        preset.write("CUSTOM_TWEAK0", "IsActive", "1");
        assert_eq!(preset.try_read("custom_tweak0", "isActive"), Some("1"));
        assert!(preset.key_exists("CUSTOM_TWEAK0", "ISACTIVE"));
        assert_eq!(preset.try_read("CUSTOM_TWEAK0", "Name"), None);
    }

    #[test]
    fn write_preserves_original_key_casing() {
        let mut preset = PresetFile::new();
        preset.write("S", "IsActive", "0");
        preset.write("S", "isActive", "1");
        assert_eq!(preset.render(), "[S]\r\nIsActive=1\r\n\r\n");
    }

    #[test]
    fn sections_keep_insertion_order() {
        let mut preset = PresetFile::new();
        preset.write("B", "k", "1");
        preset.write("A", "k", "2");
        preset.write("B", "j", "3");
        let names: Vec<_> = preset.section_names().collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn parse_then_render_round_trips() {
        let text = "[WATER_WAVESPEED]\r\nIsActive=1\r\nSpeedRatio=1.5\r\n\r\n[PRESET COMMENTS]\r\nComment=\r\n\r\n";
        let preset = PresetFile::parse(text).unwrap();
        assert_eq!(preset.render(), text);
    }

    #[test]
    fn missing_key_reports_section_and_key() {
        let preset = PresetFile::new();
        let err = preset.read("WATER_WAVESPEED", "IsActive").unwrap_err();
        match err {
            PresetError::MissingKey { section, key } => {
                assert_eq!(section, "WATER_WAVESPEED");
                assert_eq!(key, "IsActive");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn entries_before_a_section_are_rejected() {
        assert!(matches!(
            PresetFile::parse("IsActive=1\r\n"),
            Err(PresetError::StrayEntry { .. })
        ));
    }
}

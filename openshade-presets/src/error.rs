use std::path::PathBuf;
use thiserror::Error;

/// The scalar type a preset value failed to coerce into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Int,
    Float,
    Bool,
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueKind::Int => "integer",
            ValueKind::Float => "float",
            ValueKind::Bool => "boolean",
        };
        f.write_str(name)
    }
}

/// The error type for preset parsing and persistence.
#[derive(Error, Debug)]
pub enum PresetError {
    /// The preset file did not lex at the given location.
    #[error("error parsing preset file at {row}:{col}")]
    LexerError {
        offset: usize,
        row: u32,
        col: usize,
    },
    /// A key appeared before any `[SECTION]` header.
    #[error("key {key} found outside of any section")]
    StrayEntry { key: String },
    /// A required key was absent from its section.
    #[error("missing key {key} in [{section}]")]
    MissingKey { section: String, key: String },
    /// A value failed to coerce into the expected scalar type.
    #[error("expected {kind} for {key} in [{section}], got {value:?}")]
    ParseFailure {
        section: String,
        key: String,
        value: String,
        kind: ValueKind,
    },
    /// A custom tweak referenced a file the engine does not patch.
    #[error("unknown shader file {value:?} in [{section}]")]
    UnknownShader { section: String, value: String },
    /// A hex payload was not valid hex.
    #[error("malformed hex payload")]
    InvalidHex(#[from] hex::FromHexError),
    /// A decoded hex payload was not valid UTF-8.
    #[error("hex payload is not valid utf-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
    /// The preset file could not be read or written.
    #[error("could not access preset file {0:?}")]
    IOError(PathBuf, #[source] std::io::Error),
}

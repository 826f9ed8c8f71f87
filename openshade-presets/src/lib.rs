//! Preset handling for OpenShade.
//!
//! A preset is an INI style file of `[SECTION]` blocks holding the
//! enabled state and parameter values of every tweak, post process and
//! custom tweak, plus a free form comment. This crate owns the stock
//! catalog, the preset file store, and the synchronisation between the
//! two.

mod catalog;
mod codec;
mod error;
mod hash;
mod parse;
mod preset;
mod store;
mod sync;

pub use catalog::{
    new_preset, post_process_catalog, tweak_catalog, PostProcessId, TweakId, DAY_NIGHT_KEY,
};
pub use codec::{decode_comment, encode_comment, Codec, HexCodec};
pub use error::{PresetError, ValueKind};
pub use hash::state_hash;
pub use preset::{
    custom_tweak_key, renumber_post_processes, reset_to_defaults, Control, CustomTweak, DataKey,
    Parameter, PostProcess, Tweak,
};
pub use store::PresetFile;
pub use sync::{
    load_comment, load_custom_tweaks, load_post_processes, load_tweaks, save_preset,
};

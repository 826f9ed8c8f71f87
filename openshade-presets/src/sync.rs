//! Synchronisation between the in-memory catalog and the preset store.
//!
//! Loading never hard-fails on a sparse or damaged preset: each problem
//! becomes a log entry and the affected entry keeps its current values,
//! so presets written by older releases (or edited by hand) still load
//! as far as they go.

use crate::codec::{decode_comment, encode_comment, Codec};
use crate::error::{PresetError, ValueKind};
use crate::preset::{custom_tweak_key, CustomTweak, DataKey, Parameter, PostProcess, Tweak};
use crate::store::PresetFile;
use openshade_common::log::{Log, LogEvent};
use openshade_common::ShaderFile;
use std::str::FromStr;

/// Loads enabled state and parameter values for every stock tweak.
///
/// With `monitor_changes` set, pre-load values stay around as the
/// change baseline; otherwise the loaded values become the baseline.
pub fn load_tweaks(tweaks: &mut [Tweak], store: &PresetFile, monitor_changes: bool) -> Log {
    let mut log = Log::new();
    'tweaks: for tweak in tweaks.iter_mut() {
        let active = match read_bool(store, tweak.key(), "IsActive") {
            Ok(active) => active,
            Err(e) => {
                warn(&mut log, format!("{e}, tweak left untouched."));
                continue;
            }
        };
        let was_enabled = tweak.is_enabled;
        tweak.is_enabled = active;
        tweak.was_enabled = if monitor_changes {
            was_enabled
        } else {
            tweak.is_enabled
        };

        let tweak_key = tweak.key().to_string();
        for parameter in &mut tweak.parameters {
            let loaded = match read_parameter_keys(store, &tweak_key, &parameter.data_key) {
                Some(value) => value,
                None => {
                    warn(
                        &mut log,
                        format!(
                            "Missing value for {} in [{}], remaining parameters skipped.",
                            parameter.data_key, tweak_key
                        ),
                    );
                    continue 'tweaks;
                }
            };
            apply_loaded_value(parameter, loaded, monitor_changes);
        }
    }
    log
}

/// Loads the post process chain and re-sorts it by stored chain index.
pub fn load_post_processes(
    posts: &mut [PostProcess],
    store: &PresetFile,
    codec: &dyn Codec,
    monitor_changes: bool,
) -> Log {
    let mut log = Log::new();
    'posts: for post in posts.iter_mut() {
        let active = match read_bool(store, post.key(), "IsActive") {
            Ok(active) => active,
            Err(e) => {
                warn(&mut log, format!("{e}, post process left untouched."));
                continue;
            }
        };
        let was_enabled = post.is_enabled;
        post.is_enabled = active;
        post.was_enabled = if monitor_changes {
            was_enabled
        } else {
            post.is_enabled
        };

        match read_int(store, post.key(), "Index") {
            Ok(index) => post.index = index,
            Err(e) => {
                warn(&mut log, format!("{e}, post process skipped."));
                continue;
            }
        }

        let lines = match read_params_blob(store, post.key(), codec) {
            Ok(lines) => lines,
            Err(e) => {
                warn(&mut log, format!("{e}, post process skipped."));
                continue;
            }
        };

        let post_key = post.key().to_string();
        for parameter in &mut post.parameters {
            let loaded = match read_parameter_lines(&lines, &parameter.data_key) {
                Some(value) => value,
                None => {
                    warn(
                        &mut log,
                        format!(
                            "Missing value for {} in [{}], remaining parameters skipped.",
                            parameter.data_key, post_key
                        ),
                    );
                    continue 'posts;
                }
            };
            apply_loaded_value(parameter, loaded, monitor_changes);
        }
    }

    // Stored order wins, ties keep catalog order.
    posts.sort_by_key(|p| p.index);
    log
}

/// Discovers custom tweaks by probing `CUSTOM_TWEAK0`, `CUSTOM_TWEAK1`,
/// and so on until a section without `IsActive` is hit.
pub fn load_custom_tweaks(
    customs: &mut Vec<CustomTweak>,
    store: &PresetFile,
    codec: &dyn Codec,
) -> Log {
    let mut log = Log::new();
    customs.clear();
    for count in 0.. {
        let section = custom_tweak_key(count);
        if !store.key_exists(&section, "IsActive") {
            break;
        }
        match read_custom_tweak(store, &section, codec) {
            Ok(custom) => customs.push(custom),
            Err(e) => {
                warn(&mut log, format!("{e}, custom tweak discovery stopped."));
                break;
            }
        }
    }
    log
}

fn read_custom_tweak(
    store: &PresetFile,
    section: &str,
    codec: &dyn Codec,
) -> Result<CustomTweak, PresetError> {
    let shader = store.read(section, "Shader")?;
    let shader_file = ShaderFile::from_str(shader).map_err(|_| PresetError::UnknownShader {
        section: section.to_string(),
        value: shader.to_string(),
    })?;
    Ok(CustomTweak::new(
        section,
        store.read(section, "Name")?,
        shader_file,
        read_int(store, section, "Index")?,
        codec.decode(store.read(section, "OldPattern")?)?,
        codec.decode(store.read(section, "NewPattern")?)?,
        read_bool(store, section, "IsActive")?,
    ))
}

/// Reads the free-form preset comment, empty if absent.
pub fn load_comment(store: &PresetFile) -> String {
    decode_comment(store.try_read("PRESET COMMENTS", "Comment").unwrap_or(""))
}

/// Writes the complete preset state into the store.
pub fn save_preset(
    store: &mut PresetFile,
    tweaks: &[Tweak],
    customs: &[CustomTweak],
    posts: &[PostProcess],
    comment: &str,
    codec: &dyn Codec,
) {
    for tweak in tweaks {
        store.write(tweak.key(), "IsActive", enabled_flag(tweak.is_enabled));
        for parameter in &tweak.parameters {
            write_parameter_keys(store, tweak.key(), parameter);
        }
    }

    for custom in customs {
        store.write(&custom.key, "IsActive", enabled_flag(custom.is_enabled));
        store.write(&custom.key, "Name", custom.name.clone());
        store.write(&custom.key, "Shader", custom.shader_file.file_name());
        store.write(&custom.key, "Index", custom.index.to_string());
        store.write(&custom.key, "OldPattern", codec.encode(&custom.old_code));
        store.write(&custom.key, "NewPattern", codec.encode(&custom.new_code));
    }

    for post in posts {
        store.write(post.key(), "IsActive", enabled_flag(post.is_enabled));
        store.write(post.key(), "Index", post.index.to_string());

        let mut blob = String::new();
        for parameter in &post.parameters {
            match &parameter.data_key {
                DataKey::Single(key) => {
                    blob.push_str(key);
                    blob.push('=');
                    blob.push_str(&parameter.value);
                    blob.push_str("\r\n");
                }
                DataKey::Rgb(keys) => {
                    for (key, channel) in keys.iter().zip(parameter.value.split(',')) {
                        blob.push_str(key);
                        blob.push('=');
                        blob.push_str(channel);
                        blob.push_str("\r\n");
                    }
                }
            }
        }
        store.write(post.key(), "Params", codec.encode(&blob));
    }

    store.write("PRESET COMMENTS", "Comment", encode_comment(comment));
}

fn enabled_flag(enabled: bool) -> &'static str {
    if enabled {
        "1"
    } else {
        "0"
    }
}

fn warn(log: &mut Log, message: String) {
    tracing::warn!("{message}");
    log.push(LogEvent::warning(message));
}

fn read_bool(store: &PresetFile, section: &str, key: &str) -> Result<bool, PresetError> {
    match store.read(section, key)?.trim() {
        "1" => Ok(true),
        "0" => Ok(false),
        value => Err(PresetError::ParseFailure {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            kind: ValueKind::Bool,
        }),
    }
}

fn write_parameter_keys(store: &mut PresetFile, section: &str, parameter: &Parameter) {
    match &parameter.data_key {
        DataKey::Single(key) => store.write(section, key, parameter.value.clone()),
        DataKey::Rgb(keys) => {
            for (key, channel) in keys.iter().zip(parameter.value.split(',')) {
                store.write(section, key, channel);
            }
        }
    }
}

fn apply_loaded_value(parameter: &mut Parameter, loaded: String, monitor_changes: bool) {
    let old = std::mem::replace(&mut parameter.value, loaded);
    parameter.old_value = if monitor_changes {
        old
    } else {
        parameter.value.clone()
    };
}

fn read_parameter_keys(store: &PresetFile, section: &str, key: &DataKey) -> Option<String> {
    match key {
        DataKey::Single(key) => store.try_read(section, key).map(str::to_string),
        DataKey::Rgb([r, g, b]) => Some(format!(
            "{},{},{}",
            store.try_read(section, r)?,
            store.try_read(section, g)?,
            store.try_read(section, b)?
        )),
    }
}

fn read_parameter_lines(lines: &[String], key: &DataKey) -> Option<String> {
    match key {
        DataKey::Single(key) => find_line(lines, key).map(str::to_string),
        DataKey::Rgb([r, g, b]) => Some(format!(
            "{},{},{}",
            find_line(lines, r)?,
            find_line(lines, g)?,
            find_line(lines, b)?
        )),
    }
}

fn find_line<'a>(lines: &'a [String], key: &str) -> Option<&'a str> {
    lines
        .iter()
        .find(|line| line.starts_with(key))
        .and_then(|line| line.split_once('='))
        .map(|(_, value)| value)
}

fn read_int(store: &PresetFile, section: &str, key: &str) -> Result<i32, PresetError> {
    let value = store.read(section, key)?;
    value
        .trim()
        .parse()
        .map_err(|_| PresetError::ParseFailure {
            section: section.to_string(),
            key: key.to_string(),
            value: value.to_string(),
            kind: ValueKind::Int,
        })
}

fn read_params_blob(
    store: &PresetFile,
    section: &str,
    codec: &dyn Codec,
) -> Result<Vec<String>, PresetError> {
    let blob = codec.decode(store.read(section, "Params")?)?;
    Ok(blob.split("\r\n").map(str::to_string).collect())
}

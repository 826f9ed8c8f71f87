//! The preset data model: tweaks, post processes, custom tweaks and
//! their parameters.

use crate::catalog::{PostProcessId, TweakId};
use openshade_common::{Category, ShaderFile};
use uuid::Uuid;

/// The widget a parameter is edited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Text,
    Checkbox,
    Rgb,
    Combobox,
}

/// The preset key (or keys) a parameter is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataKey {
    Single(String),
    /// Three keys holding the channels of one color value.
    Rgb([String; 3]),
}

impl std::fmt::Display for DataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataKey::Single(key) => f.write_str(key),
            DataKey::Rgb([r, g, b]) => write!(f, "{r},{g},{b}"),
        }
    }
}

/// A single tunable value of a tweak or post process.
///
/// Values are kept as the literal strings that get substituted into
/// shader code, so what the user typed is exactly what is applied and
/// saved. RGB values are the three channels joined with commas.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub id: Uuid,
    pub data_key: DataKey,
    pub label: String,
    pub description: String,
    pub control: Control,
    pub value: String,
    pub default_value: String,
    pub old_value: String,
    pub min: f64,
    pub max: f64,
    /// Choices for [`Control::Combobox`], empty otherwise.
    pub range: Vec<String>,
}

impl Parameter {
    fn new(data_key: DataKey, label: &str, default: String, min: f64, max: f64, control: Control) -> Self {
        Parameter {
            id: Uuid::new_v4(),
            data_key,
            label: label.to_string(),
            description: String::new(),
            control,
            value: default.clone(),
            old_value: default.clone(),
            default_value: default,
            min,
            max,
            range: Vec::new(),
        }
    }

    pub fn text(data_key: &str, label: &str, default: &str, min: f64, max: f64) -> Self {
        Self::new(
            DataKey::Single(data_key.to_string()),
            label,
            default.to_string(),
            min,
            max,
            Control::Text,
        )
    }

    pub fn checkbox(data_key: &str, label: &str, default: bool) -> Self {
        let default = if default { "1" } else { "0" };
        Self::new(
            DataKey::Single(data_key.to_string()),
            label,
            default.to_string(),
            0.0,
            1.0,
            Control::Checkbox,
        )
    }

    pub fn rgb(keys: [&str; 3], label: &str, default: [&str; 3], min: f64, max: f64) -> Self {
        Self::new(
            DataKey::Rgb(keys.map(str::to_string)),
            label,
            default.join(","),
            min,
            max,
            Control::Rgb,
        )
    }

    pub fn combobox(data_key: &str, label: &str, default: usize, range: &[&str]) -> Self {
        let mut parameter = Self::new(
            DataKey::Single(data_key.to_string()),
            label,
            default.to_string(),
            0.0,
            (range.len().saturating_sub(1)) as f64,
            Control::Combobox,
        );
        parameter.range = range.iter().map(|s| s.to_string()).collect();
        parameter
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Whether the value drifted from the last applied baseline.
    pub fn has_changed(&self) -> bool {
        self.value != self.old_value
    }

    pub fn reset(&mut self) {
        self.value = self.default_value.clone();
    }

    /// Makes the current value the new baseline.
    pub fn rebaseline(&mut self) {
        self.old_value = self.value.clone();
    }
}

/// A stock tweak: a named group of patches over one shader file.
#[derive(Debug, Clone, PartialEq)]
pub struct Tweak {
    pub id: TweakId,
    pub name: String,
    pub category: Category,
    pub description: String,
    pub is_enabled: bool,
    pub was_enabled: bool,
    pub parameters: Vec<Parameter>,
}

impl Tweak {
    pub(crate) fn stock(id: TweakId, parameters: Vec<Parameter>) -> Self {
        Tweak {
            id,
            name: id.name().to_string(),
            category: id.category(),
            description: String::new(),
            is_enabled: false,
            was_enabled: false,
            parameters,
        }
    }

    /// The preset section this tweak is stored under.
    pub fn key(&self) -> &'static str {
        self.id.key()
    }

    pub fn state_changed(&self) -> bool {
        self.is_enabled != self.was_enabled
    }

    /// Whether the enabled state or any parameter drifted since the
    /// last baseline.
    pub fn contains_changes(&self) -> bool {
        self.state_changed() || self.parameters.iter().any(|p| p.has_changed())
    }

    pub fn reset_parameters(&mut self) {
        for parameter in &mut self.parameters {
            parameter.reset();
        }
    }
}

/// A stock post process chained into the HDR pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct PostProcess {
    pub id: PostProcessId,
    pub name: String,
    pub description: String,
    pub is_enabled: bool,
    pub was_enabled: bool,
    /// Position in the effect chain, dense from zero.
    pub index: i32,
    pub parameters: Vec<Parameter>,
}

impl PostProcess {
    pub(crate) fn stock(id: PostProcessId, index: i32, parameters: Vec<Parameter>) -> Self {
        PostProcess {
            id,
            name: id.name().to_string(),
            description: String::new(),
            is_enabled: false,
            was_enabled: false,
            index,
            parameters,
        }
    }

    pub(crate) fn describe(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// The preset section this post process is stored under.
    pub fn key(&self) -> &'static str {
        self.id.key()
    }

    pub fn state_changed(&self) -> bool {
        self.is_enabled != self.was_enabled
    }

    pub fn contains_changes(&self) -> bool {
        self.state_changed() || self.parameters.iter().any(|p| p.has_changed())
    }

    /// Looks a parameter value up by its single data key.
    pub fn parameter_value(&self, key: &str) -> Option<&str> {
        self.parameters.iter().find_map(|p| match &p.data_key {
            DataKey::Single(k) if k == key => Some(p.value.as_str()),
            _ => None,
        })
    }

    pub fn reset_parameters(&mut self) {
        for parameter in &mut self.parameters {
            parameter.reset();
        }
    }
}

/// A user-authored search and replace over one shader file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomTweak {
    /// The preset section, `CUSTOM_TWEAK<n>`.
    pub key: String,
    pub name: String,
    pub shader_file: ShaderFile,
    pub index: i32,
    pub old_code: String,
    pub new_code: String,
    pub is_enabled: bool,
}

impl CustomTweak {
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        shader_file: ShaderFile,
        index: i32,
        old_code: impl Into<String>,
        new_code: impl Into<String>,
        is_enabled: bool,
    ) -> Self {
        CustomTweak {
            key: key.into(),
            name: name.into(),
            shader_file,
            index,
            old_code: old_code.into(),
            new_code: new_code.into(),
            is_enabled,
        }
    }
}

/// The preset section name for the custom tweak at `index`.
pub fn custom_tweak_key(index: usize) -> String {
    format!("CUSTOM_TWEAK{index}")
}

/// Returns every tweak and post process to catalog defaults and drops
/// all custom tweaks.
pub fn reset_to_defaults(
    tweaks: &mut [Tweak],
    customs: &mut Vec<CustomTweak>,
    posts: &mut [PostProcess],
) {
    for tweak in tweaks.iter_mut() {
        tweak.is_enabled = false;
        tweak.was_enabled = false;
        tweak.reset_parameters();
    }
    customs.clear();
    for post in posts.iter_mut() {
        post.is_enabled = false;
        post.was_enabled = false;
        post.reset_parameters();
    }
}

/// Reassigns post process chain indices densely from zero, keeping the
/// current order.
pub fn renumber_post_processes(posts: &mut [PostProcess]) {
    for (index, post) in posts.iter_mut().enumerate() {
        post.index = index as i32;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parameter_change_tracking_follows_the_baseline() {
        let mut parameter = Parameter::text("SpeedRatio", "Waves speed factor", "1", 0.0, 2.0);
        assert!(!parameter.has_changed());
        parameter.value = "1.5".to_string();
        assert!(parameter.has_changed());
        parameter.rebaseline();
        assert!(!parameter.has_changed());
        parameter.reset();
        assert_eq!(parameter.value, "1");
    }

    #[test]
    fn rgb_parameters_join_channels_with_commas() {
        let parameter = Parameter::rgb(
            ["Red", "Green", "Blue"],
            "RGB",
            ["1", "1", "1"],
            0.5,
            1.5,
        );
        assert_eq!(parameter.value, "1,1,1");
        assert_eq!(parameter.data_key.to_string(), "Red,Green,Blue");
    }

    #[test]
    fn custom_tweak_keys_are_indexed() {
        assert_eq!(custom_tweak_key(0), "CUSTOM_TWEAK0");
        assert_eq!(custom_tweak_key(12), "CUSTOM_TWEAK12");
    }

    #[test]
    fn reset_to_defaults_clears_state_and_customs() {
        let mut tweaks = crate::catalog::tweak_catalog();
        let mut posts = crate::catalog::post_process_catalog();
        tweaks[0].is_enabled = true;
        tweaks[0].parameters[0].value = "9".to_string();
        posts[0].is_enabled = true;
        let mut customs = vec![CustomTweak::new(
            custom_tweak_key(0),
            "x",
            openshade_common::ShaderFile::Cloud,
            0,
            "a",
            "b",
            true,
        )];

        reset_to_defaults(&mut tweaks, &mut customs, &mut posts);

        assert!(customs.is_empty());
        assert!(!tweaks[0].is_enabled);
        assert_eq!(tweaks[0].parameters[0].value, tweaks[0].parameters[0].default_value);
        assert!(!posts[0].is_enabled);
    }
}

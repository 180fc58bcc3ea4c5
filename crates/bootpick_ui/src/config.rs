//! # Picker Configuration
//!
//! Loaded once at startup from TOML. Every field has a default, so an empty
//! document is a valid configuration.
//!
//! ```toml
//! [picker]
//! max_entries = 32
//!
//! [labels]
//! use_disk_label = true
//! use_generic_label = false
//!
//! [animation]
//! slide_duration = 25
//! slide_distance = 35
//! smooth_motion = true
//! ```

use serde::Deserialize;

use crate::error::{PickerError, PickerResult};

/// Largest accepted `picker.max_entries`.
pub const MAX_ENTRIES_LIMIT: usize = 1024;

/// Complete picker configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    /// Scene capacity.
    pub picker: PickerLimits,
    /// Which label strategies are enabled.
    pub labels: LabelPolicy,
    /// Built-in animation timings.
    pub animation: AnimationConfig,
}

impl PickerConfig {
    /// Parses a configuration document.
    ///
    /// # Errors
    ///
    /// [`PickerError::Config`] if the document is not valid TOML, has
    /// fields of the wrong type, or fails [`PickerConfig::validate`].
    pub fn from_toml_str(source: &str) -> PickerResult<Self> {
        let config: Self = toml::from_str(source).map_err(|err| PickerError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges the type system does not.
    ///
    /// # Errors
    ///
    /// [`PickerError::Config`] if `picker.max_entries` is zero or above
    /// [`MAX_ENTRIES_LIMIT`].
    pub fn validate(&self) -> PickerResult<()> {
        let max_entries = self.picker.max_entries;
        if max_entries == 0 {
            return Err(PickerError::Config("picker.max_entries must be at least 1".into()));
        }
        if max_entries > MAX_ENTRIES_LIMIT {
            return Err(PickerError::Config(format!(
                "picker.max_entries is {max_entries}, at most {MAX_ENTRIES_LIMIT} are supported"
            )));
        }
        Ok(())
    }
}

/// Capacity limits of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PickerLimits {
    /// Most volume entries the picker will hold.
    pub max_entries: usize,
}

impl Default for PickerLimits {
    fn default() -> Self {
        Self { max_entries: 64 }
    }
}

/// Label strategies, tried in order: disk label, generic label, text.
///
/// Text rendering is always the final fallback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LabelPolicy {
    /// Use the pre-rendered label image stored on the volume.
    pub use_disk_label: bool,
    /// Use the generic per-category label images.
    pub use_generic_label: bool,
}

/// Timings of the three built-in animations, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Duration of the slide-in.
    pub slide_duration: u64,
    /// Pixels the picker travels while sliding in.
    pub slide_distance: u32,
    /// Duration of the fade-in.
    pub fade_duration: u64,
    /// Tick at which the icon-poof sweep starts.
    pub poof_start: u64,
    /// Duration of the icon-poof sweep.
    pub poof_duration: u64,
    /// Ease the slide and fade instead of moving linearly.
    pub smooth_motion: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            slide_duration: 25,
            slide_distance: 35,
            fade_duration: 25,
            poof_start: 25,
            poof_duration: 25,
            smooth_motion: true,
        }
    }
}

// SPDX-License-Identifier: MPL-2.0
//! This module handles the slideshow configuration, including loading and
//! saving user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[navigation]` - Window sizes, prefetch stagger, paging margin
//! - `[gesture]` - Swipe lock slop, commit threshold, reversal recovery
//! - `[animation]` - Exit, snap-back and dismissal timings
//!
//! Every field is optional; missing fields fall back to [`defaults`] and
//! out-of-range values are clamped when the runtime configuration is built.
//!
//! # Examples
//!
//! ```no_run
//! use iced_slideshow::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! config.gesture.threshold_px = Some(120.0);
//!
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;
pub mod paths;

pub use defaults::*;

use crate::animation::AnimationConfig;
use crate::error::{Error, Result};
use crate::gesture::GestureConfig;
use crate::media::prefetch::PrefetchConfig;
use crate::viewer::ViewerConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// Windowing and paging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NavigationConfig {
    /// Neighbors loaded on each side of the active item.
    #[serde(default = "default_load_buffer", skip_serializing_if = "Option::is_none")]
    pub load_buffer: Option<usize>,

    /// Loaded items farther than this from the active item are unloaded.
    #[serde(default = "default_drop_radius", skip_serializing_if = "Option::is_none")]
    pub drop_radius: Option<usize>,

    /// Per-step stagger of neighbor loads, in milliseconds.
    #[serde(
        default = "default_stagger_step_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub stagger_step_ms: Option<u64>,

    /// Distance from either end at which another page is requested.
    #[serde(
        default = "default_near_end_margin",
        skip_serializing_if = "Option::is_none"
    )]
    pub near_end_margin: Option<usize>,

    /// Whether neighbors are prefetched at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefetch_enabled: Option<bool>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            load_buffer: default_load_buffer(),
            drop_radius: default_drop_radius(),
            stagger_step_ms: default_stagger_step_ms(),
            near_end_margin: default_near_end_margin(),
            prefetch_enabled: Some(true),
        }
    }
}

/// Swipe recognition settings, in logical pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureSettings {
    #[serde(
        default = "default_min_horizontal_px",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_horizontal_px: Option<f32>,

    #[serde(
        default = "default_min_vertical_px",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_vertical_px: Option<f32>,

    /// Distance along the locked direction that commits on release.
    #[serde(default = "default_threshold_px", skip_serializing_if = "Option::is_none")]
    pub threshold_px: Option<f32>,

    /// Forward motion that restores a reversed swipe.
    #[serde(
        default = "default_reversal_recovery_px",
        skip_serializing_if = "Option::is_none"
    )]
    pub reversal_recovery_px: Option<f32>,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            min_horizontal_px: default_min_horizontal_px(),
            min_vertical_px: default_min_vertical_px(),
            threshold_px: default_threshold_px(),
            reversal_recovery_px: default_reversal_recovery_px(),
        }
    }
}

/// Animation timings, in milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnimationSettings {
    #[serde(
        default = "default_exit_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub exit_duration_ms: Option<u64>,

    #[serde(
        default = "default_snap_back_duration_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub snap_back_duration_ms: Option<u64>,

    #[serde(
        default = "default_dismiss_delay_ms",
        skip_serializing_if = "Option::is_none"
    )]
    pub dismiss_delay_ms: Option<u64>,
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            exit_duration_ms: default_exit_duration_ms(),
            snap_back_duration_ms: default_snap_back_duration_ms(),
            dismiss_delay_ms: default_dismiss_delay_ms(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Slideshow configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub navigation: NavigationConfig,

    #[serde(default)]
    pub gesture: GestureSettings,

    #[serde(default)]
    pub animation: AnimationSettings,
}

impl Config {
    /// Builds the windowing engine configuration.
    #[must_use]
    pub fn prefetch_config(&self) -> PrefetchConfig {
        let nav = &self.navigation;
        let mut config = PrefetchConfig::new(
            nav.load_buffer.unwrap_or(DEFAULT_LOAD_BUFFER),
            nav.drop_radius.unwrap_or(DEFAULT_DROP_RADIUS),
            Duration::from_millis(nav.stagger_step_ms.unwrap_or(DEFAULT_STAGGER_STEP_MS)),
        );
        config.enabled = nav.prefetch_enabled.unwrap_or(true);
        config
    }

    /// Builds the swipe recognizer configuration.
    #[must_use]
    pub fn gesture_config(&self) -> GestureConfig {
        let g = &self.gesture;
        GestureConfig::new(
            g.min_horizontal_px.unwrap_or(DEFAULT_MIN_HORIZONTAL_PX),
            g.min_vertical_px.unwrap_or(DEFAULT_MIN_VERTICAL_PX),
            g.threshold_px.unwrap_or(DEFAULT_SWIPE_THRESHOLD_PX),
            g.reversal_recovery_px
                .unwrap_or(DEFAULT_REVERSAL_RECOVERY_PX),
        )
    }

    /// Builds the animation driver configuration.
    #[must_use]
    pub fn animation_config(&self) -> AnimationConfig {
        let a = &self.animation;
        AnimationConfig::new(
            Duration::from_millis(a.exit_duration_ms.unwrap_or(DEFAULT_EXIT_DURATION_MS)),
            Duration::from_millis(
                a.snap_back_duration_ms
                    .unwrap_or(DEFAULT_SNAP_BACK_DURATION_MS),
            ),
        )
    }

    /// Builds the full viewer configuration.
    #[must_use]
    pub fn viewer_config(&self) -> ViewerConfig {
        ViewerConfig {
            prefetch: self.prefetch_config(),
            gesture: self.gesture_config(),
            animation: self.animation_config(),
            near_end_margin: self
                .navigation
                .near_end_margin
                .unwrap_or(DEFAULT_NEAR_END_MARGIN),
            dismiss_delay: Duration::from_millis(
                self.animation
                    .dismiss_delay_ms
                    .unwrap_or(DEFAULT_DISMISS_DELAY_MS)
                    .min(MAX_ANIMATION_DURATION_MS),
            ),
        }
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_load_buffer() -> Option<usize> {
    Some(DEFAULT_LOAD_BUFFER)
}

fn default_drop_radius() -> Option<usize> {
    Some(DEFAULT_DROP_RADIUS)
}

fn default_stagger_step_ms() -> Option<u64> {
    Some(DEFAULT_STAGGER_STEP_MS)
}

fn default_near_end_margin() -> Option<usize> {
    Some(DEFAULT_NEAR_END_MARGIN)
}

fn default_min_horizontal_px() -> Option<f32> {
    Some(DEFAULT_MIN_HORIZONTAL_PX)
}

fn default_min_vertical_px() -> Option<f32> {
    Some(DEFAULT_MIN_VERTICAL_PX)
}

fn default_threshold_px() -> Option<f32> {
    Some(DEFAULT_SWIPE_THRESHOLD_PX)
}

fn default_reversal_recovery_px() -> Option<f32> {
    Some(DEFAULT_REVERSAL_RECOVERY_PX)
}

fn default_exit_duration_ms() -> Option<u64> {
    Some(DEFAULT_EXIT_DURATION_MS)
}

fn default_snap_back_duration_ms() -> Option<u64> {
    Some(DEFAULT_SNAP_BACK_DURATION_MS)
}

fn default_dismiss_delay_ms() -> Option<u64> {
    Some(DEFAULT_DISMISS_DELAY_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// the default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let mut config = Config::default();
        config.navigation.drop_radius = Some(5);
        config.gesture.threshold_px = Some(120.0);
        config.animation.dismiss_delay_ms = Some(150);

        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "this is not = = toml").expect("failed to write file");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[gesture]\nthreshold_px = 100.0\n")
            .expect("failed to write file");

        let loaded = load_from_path(&config_path).expect("failed to load config");
        assert_eq!(loaded.gesture.threshold_px, Some(100.0));
        assert_eq!(loaded.gesture.min_horizontal_px, Some(DEFAULT_MIN_HORIZONTAL_PX));
        assert_eq!(loaded.navigation.drop_radius, Some(DEFAULT_DROP_RADIUS));
    }

    #[test]
    fn load_with_override_reports_warning_on_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[navigation\n")
            .expect("failed to write file");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn runtime_configs_clamp_out_of_range_values() {
        let mut config = Config::default();
        config.gesture.threshold_px = Some(5.0);
        config.navigation.load_buffer = Some(50);
        config.animation.dismiss_delay_ms = Some(60_000);

        let viewer = config.viewer_config();
        assert_eq!(viewer.gesture.threshold.value(), 20.0);
        assert_eq!(viewer.prefetch.load_buffer, MAX_LOAD_BUFFER);
        assert_eq!(
            viewer.dismiss_delay,
            Duration::from_millis(MAX_ANIMATION_DURATION_MS)
        );
    }

    #[test]
    fn default_viewer_config_matches_documented_values() {
        let viewer = Config::default().viewer_config();
        assert_eq!(viewer.prefetch.load_buffer, 1);
        assert_eq!(viewer.prefetch.drop_radius, 3);
        assert_eq!(viewer.prefetch.stagger_step, Duration::from_millis(100));
        assert_eq!(viewer.gesture.threshold.value(), 80.0);
        assert_eq!(viewer.gesture.min_horizontal.value(), 15.0);
        assert_eq!(viewer.near_end_margin, 2);
    }
}

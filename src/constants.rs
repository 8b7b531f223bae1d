//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and the fixed storage key.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Survivor Tracker";

/// The binary name of the application (used in command examples, lowercase with hyphens).
pub const APP_BINARY_NAME: &str = "survivor-tracker";

/// Directory name used under the platform config directory.
pub const APP_DIR_NAME: &str = "SurvivorTracker";

/// Environment variable that relocates the config directory (tests, portable installs).
pub const CONFIG_DIR_ENV: &str = "SURVIVOR_TRACKER_CONFIG_DIR";

/// Storage key holding the JSON array of tracked survivor names.
pub const TRACKED_STORAGE_KEY: &str = "ghostfaceTrackedSurvivors";

/// Noun used in the stats line.
pub const ENTITY_NOUN_PLURAL: &str = "survivors";

/// Relative directory holding portrait images.
pub const PORTRAIT_DIR: &str = "gallery/portraits";

/// Relative path of the crossed-out overlay image.
pub const CROSSED_OVERLAY_PATH: &str = "gallery/crossed.png";

/// Label shown in place of a portrait that failed to load.
pub const NO_IMAGE_LABEL: &str = "No Image";

//! # Window and Platform Configuration
//!
//! Serializable settings for the platform layer and for each window it
//! creates. Every type offers builder-style `with_*` setters and a
//! `validate()` check, and [`ApplicationConfig`] can be loaded from or saved
//! to TOML and RON files through the [`Config`] trait.

use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError};
use crate::window::WindowDesc;

/// # Rendering Context Configuration
///
/// Requested properties of the native OpenGL context created with each window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Requested context version (major, minor)
    pub version: (u32, u32),
    /// Request a core profile instead of a compatibility profile
    pub core_profile: bool,
    /// Request a debug context
    pub debug: bool,
}

impl ContextConfig {
    /// Create a context configuration for the given version
    pub fn new(major: u32, minor: u32) -> Self {
        Self {
            version: (major, minor),
            ..Self::default()
        }
    }

    /// Select core or compatibility profile
    pub fn with_core_profile(mut self, core: bool) -> Self {
        self.core_profile = core;
        self
    }

    /// Enable or disable the debug context
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (major, minor) = self.version;
        if major == 0 {
            return Err(ConfigError::Invalid("context major version must be at least 1".to_string()));
        }
        if self.core_profile && (major, minor) < (3, 2) {
            return Err(ConfigError::Invalid(format!(
                "core profile requires context version 3.2 or newer, got {major}.{minor}"
            )));
        }
        Ok(())
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            version: (4, 5),
            core_profile: true,
            debug: cfg!(debug_assertions),
        }
    }
}

/// # Window Configuration
///
/// Construction parameters of a window plus the presentation state applied
/// right after it is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Title bar text
    pub title: String,
    /// Left edge, monitor-relative
    pub x: i32,
    /// Top edge, monitor-relative
    pub y: i32,
    /// Client-area width hint
    pub width: u32,
    /// Client-area height hint
    pub height: u32,
    /// Show the window once it is created
    pub visible: bool,
    /// Enter fullscreen once it is created
    pub fullscreen: bool,
    /// Rendering context settings
    pub context: ContextConfig,
}

impl WindowConfig {
    /// Create a window configuration with the given title and default geometry
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the window position
    pub fn with_position(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// Set the client-area size hint
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Show or hide the window after creation
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Start in fullscreen
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Set the rendering context configuration
    pub fn with_context(mut self, context: ContextConfig) -> Self {
        self.context = context;
        self
    }

    /// Construction parameters for the native window
    pub fn desc(&self) -> WindowDesc {
        WindowDesc::new(&self.title, self.x, self.y, self.width, self.height).with_context(self.context.clone())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        self.context.validate()
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "age".to_string(),
            x: 100,
            y: 100,
            width: 800,
            height: 600,
            visible: true,
            fullscreen: false,
            context: ContextConfig::default(),
        }
    }
}

/// # Platform Configuration
///
/// Process-level settings for the platform layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl PlatformConfig {
    /// Create a new platform configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration applications load at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Platform layer configuration
    pub platform: PlatformConfig,
    /// Main window configuration
    pub window: WindowConfig,
}

impl ApplicationConfig {
    /// Create a new application configuration with defaults and a window title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            platform: PlatformConfig::default(),
            window: WindowConfig::new(title),
        }
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window.validate()
    }
}

impl Config for ApplicationConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ApplicationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_size_rejected() {
        let config = WindowConfig::new("zero").with_size(0, 600);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_core_profile_needs_3_2() {
        let context = ContextConfig::new(3, 1).with_core_profile(true);
        assert!(context.validate().is_err());
        assert!(context.with_core_profile(false).validate().is_ok());
    }

    #[test]
    fn test_toml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.toml");

        let config = ApplicationConfig::new("Round Trip")
            .tap_window(|w| w.with_position(-200, 40).with_size(1024, 768).with_fullscreen(true));
        config.save_to_file(&path).unwrap();

        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_ron_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.ron");

        let mut config = ApplicationConfig::new("Ron");
        config.platform = PlatformConfig::new().with_log_level("debug");
        config.save_to_file(&path).unwrap();

        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.platform.log_level, "debug");
        assert_eq!(loaded.window.title, "Ron");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[window]\ntitle = \"Partial\"\nwidth = 320\n").unwrap();

        let loaded = ApplicationConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.window.title, "Partial");
        assert_eq!(loaded.window.width, 320);
        assert_eq!(loaded.window.height, 600);
        assert_eq!(loaded.platform.log_level, "info");
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.json");
        let result = ApplicationConfig::default().save_to_file(&path);
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    impl ApplicationConfig {
        fn tap_window(mut self, f: impl FnOnce(WindowConfig) -> WindowConfig) -> Self {
            self.window = f(self.window);
            self
        }
    }
}

//! # Core Module
//!
//! Shared configuration types used by the platform and its windows.

pub mod config;

pub use config::{ApplicationConfig, Config, ConfigError, ContextConfig, PlatformConfig, WindowConfig};

//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Screen-space geometry
//! - Handle-keyed collections
//! - Logging utilities

pub mod collections;
pub mod geometry;
pub mod logging;

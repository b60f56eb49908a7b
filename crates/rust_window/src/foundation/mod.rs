//! Foundation module - Core utilities and types
//!
//! This module provides fundamental utilities used throughout the crate:
//! - Coordinate and area value types
//! - Logging utilities

pub mod geometry;
pub mod logging;

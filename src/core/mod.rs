//! Core module - Output model, rendering and shared utilities
//!
//! This module provides:
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Path resolution utilities
//! - Common utilities

pub mod model;
pub mod paths;
pub mod render;
pub mod util;

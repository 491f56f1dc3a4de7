//! Cache module - The recent-resumes list and its persistence
//!
//! Provides:
//! - Cache entries and the stored representation
//! - Store backends (file, memory)
//! - The bounded most-recently-added list
//! - Status snapshots
//! - Command handlers

pub mod api;
pub mod entry;
pub mod recent;
pub mod status;
pub mod store;

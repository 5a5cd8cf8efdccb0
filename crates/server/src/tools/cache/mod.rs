//! Cache management tools.
//!
//! This module provides tools for inspecting and flushing the shared
//! in-memory document cache.

pub mod clear;
pub mod stats;

pub use clear::{CacheClearOutput, clear_impl};
pub use stats::stats_impl;

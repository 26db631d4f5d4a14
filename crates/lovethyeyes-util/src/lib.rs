//! Shared utilities for lovethyeyes
//!
//! This crate provides:
//! - Dispatch identifiers handed back by the notification boundary
//! - Time utilities (mockable wall clock, elapsed/duration helpers)
//! - Default paths for the config and stats files

mod ids;
mod paths;
mod time;

pub use ids::*;
pub use paths::*;
pub use time::*;

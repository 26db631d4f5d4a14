//! Core break engine for lovethyeyes
//!
//! This crate contains:
//! - The message catalog (break, eco-tip and stats-summary pools)
//! - The engagement ledger (love/hatred scores, care classification)
//! - The break scheduler (short, long and stats timers against wall clock)
//! - `CoreEngine`, the context object that ties them to a stats store

mod catalog;
mod engine;
mod events;
mod ledger;
mod prompts;
mod scheduler;
mod summary;

pub use catalog::*;
pub use engine::*;
pub use events::*;
pub use ledger::*;
pub use prompts::*;
pub use scheduler::*;
pub use summary::*;

//! Host adapter trait interfaces for lovethyeyes
//!
//! This crate defines the boundary between the break engine and the desktop:
//! presenting prompts and ending the user session. It contains no platform
//! code itself.

mod fallback;
mod mock;
mod traits;

pub use fallback::*;
pub use mock::*;
pub use traits::*;

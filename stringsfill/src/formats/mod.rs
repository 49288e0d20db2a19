//! Localization file formats understood by stringsfill.
//!
//! Each format exposes a `Format` type implementing [`crate::traits::Parser`].

pub mod strings;

// Reexporting the formats for easier access
pub use strings::{Format as StringsFormat, Pair};

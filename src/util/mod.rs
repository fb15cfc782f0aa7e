//! Utility types and functions for the FBX importer.
//!
//! This module contains fundamental types used throughout the library:
//! - [`Error`] / [`Result`] - Error handling
//! - [`ImportPolicy`] - Abort-vs-skip behavior for malformed data
//! - Math type re-exports from glam plus Euler rotation helpers

mod error;
mod math;

pub use error::*;
pub use math::*;

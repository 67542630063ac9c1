//! Output generation.
//!
//! # Submodules
//!
//! - [`markdown`]: Loads the header/footer template and renders the weekly digest
//! - [`file`]: Writes the rendered digest to the configured output path

pub mod file;
pub mod markdown;

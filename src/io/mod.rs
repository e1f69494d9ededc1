//! Catalog loading, configuration, errors and everything that talks to the terminal or disk

/// Tile catalog files
pub mod catalog;
/// Command-line driver
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error type and result alias
pub mod error;
/// PNG previews
pub mod image;
/// Progress bars and log output
pub mod progress;

//! Error types for catalog loading, solver configuration and export

use std::fmt;
use std::path::PathBuf;

/// Main error type for all generation operations
#[derive(Debug)]
pub enum GenerationError {
    /// Tile catalog violates a structural requirement
    ///
    /// Raised while building a registry, never during solving:
    /// - Socket strings of the wrong length
    /// - Negative or non-finite spawn weights
    /// - An empty catalog
    MalformedCatalog {
        /// Name of the offending tile (empty for catalog-wide problems)
        tile: String,
        /// Description of what's wrong with the tile
        reason: String,
    },

    /// A tile was referenced by name but is not in the registry
    UnknownTile {
        /// The name that failed to resolve
        name: String,
    },

    /// An entity was referenced before being registered with the cluster registry
    UnknownEntity {
        /// Raw id of the unknown entity
        entity: u64,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to read a catalog file from disk
    CatalogLoad {
        /// Path to the catalog file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Catalog file is not valid TOML or doesn't match the catalog schema
    CatalogParse {
        /// Path to the catalog file
        path: PathBuf,
        /// Underlying deserialization error
        source: Box<toml::de::Error>,
    },

    /// Failed to save a preview image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// An export was requested but there was nothing to draw
    NothingToExport {
        /// What was missing
        what: &'static str,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedCatalog { tile, reason } => {
                if tile.is_empty() {
                    write!(f, "Malformed tile catalog: {reason}")
                } else {
                    write!(f, "Malformed tile '{tile}': {reason}")
                }
            }
            Self::UnknownTile { name } => {
                write!(f, "No tile named '{name}' in the catalog")
            }
            Self::UnknownEntity { entity } => {
                write!(f, "Entity {entity} was never registered")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::CatalogLoad { path, source } => {
                write!(f, "Failed to read catalog '{}': {source}", path.display())
            }
            Self::CatalogParse { path, source } => {
                write!(f, "Failed to parse catalog '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::NothingToExport { what } => {
                write!(f, "Nothing to export: {what}")
            }
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CatalogLoad { source, .. } | Self::FileSystem { source, .. } => Some(source),
            Self::CatalogParse { source, .. } => Some(source.as_ref()),
            Self::ImageExport { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for generation results
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> GenerationError {
    GenerationError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a malformed catalog error for one tile
pub fn malformed_catalog(tile: &str, reason: &impl ToString) -> GenerationError {
    GenerationError::MalformedCatalog {
        tile: tile.to_string(),
        reason: reason.to_string(),
    }
}

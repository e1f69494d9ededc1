//! TOML tile catalog loading
//!
//! A catalog names the socket length, optional run defaults and the tile
//! definitions:
//!
//! ```toml
//! socket_count = 3
//! columns = 12
//! border = "empty"
//!
//! [[tiles]]
//! name = "empty"
//! sockets = { up = "aaa", right = "aaa", down = "aaa", left = "aaa" }
//!
//! [[tiles]]
//! name = "straight"
//! weight = 2.0
//! sockets = { up = "aba", right = "aaa", down = "aba", left = "aaa" }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::io::error::{GenerationError, Result};
use crate::spatial::sockets::Sockets;
use crate::spatial::tiles::{TileDefinition, TileRegistry};

/// Parsed catalog file
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogFile {
    /// Symbols per edge, shared by every tile
    pub socket_count: usize,
    /// Default map side length
    pub columns: Option<usize>,
    /// Default seed
    pub seed: Option<u64>,
    /// Tile name used to frame the map
    pub border: Option<String>,
    /// Tile definitions in catalog order
    #[serde(default)]
    pub tiles: Vec<TileEntry>,
}

/// One `[[tiles]]` table
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TileEntry {
    /// Unique tile name
    pub name: String,
    /// Render handle, defaults to the name
    pub prefab: Option<String>,
    /// Relative selection weight
    #[serde(default = "default_weight")]
    pub weight: f64,
    /// Edge sockets
    pub sockets: SocketEntry,
}

/// Edge sockets of a catalog tile
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocketEntry {
    /// Top edge
    pub up: String,
    /// Right edge
    pub right: String,
    /// Bottom edge
    pub down: String,
    /// Left edge
    pub left: String,
}

const fn default_weight() -> f64 {
    1.0
}

impl CatalogFile {
    /// Read and parse a catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid catalog.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|source| GenerationError::CatalogLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents, path)
    }

    /// Parse catalog text; `origin` only labels errors
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid catalog.
    pub fn parse(contents: &str, origin: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|source| GenerationError::CatalogParse {
            path: PathBuf::from(origin),
            source: Box::new(source),
        })
    }

    /// Tile definitions in catalog order
    pub fn definitions(&self) -> Vec<TileDefinition> {
        self.tiles
            .iter()
            .map(|entry| {
                let sockets = Sockets::new(
                    entry.sockets.up.clone(),
                    entry.sockets.right.clone(),
                    entry.sockets.down.clone(),
                    entry.sockets.left.clone(),
                );
                let definition = TileDefinition::new(entry.name.clone(), sockets)
                    .with_weight(entry.weight);
                match &entry.prefab {
                    Some(prefab) => definition.with_prefab(prefab.clone()),
                    None => definition,
                }
            })
            .collect()
    }

    /// Validate the catalog and expand it into a registry
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is empty, has duplicate names, bad
    /// weights or sockets of the wrong length.
    pub fn into_registry(self, keep_symmetric_rotations: bool) -> Result<TileRegistry> {
        TileRegistry::with_options(
            self.definitions(),
            self.socket_count,
            keep_symmetric_rotations,
        )
    }
}

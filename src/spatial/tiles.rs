//! Tile definitions, rotation variants and the validated tile registry
//!
//! A catalog lists [`TileDefinition`]s. The registry expands every definition
//! into its quarter-turn [`TileVariant`]s, which are the candidates the solver
//! works with. A collapsed cell owns a [`TileInstance`] cloned from one variant.

use std::collections::HashSet;

use crate::io::configuration::{
    MAX_SOCKET_COUNT, MIN_SOCKET_COUNT, ROTATION_STEP_DEGREES, ROTATIONS,
};
use crate::io::error::{GenerationError, Result, invalid_parameter, malformed_catalog};
use crate::spatial::direction::Direction;
use crate::spatial::sockets::Sockets;

/// Opaque reference to whatever visual the host draws for a tile
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PrefabHandle(pub String);

/// Immutable tile template from the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct TileDefinition {
    /// Unique name within the catalog
    pub name: String,
    /// Visual reference handed back to the host untouched
    pub prefab: PrefabHandle,
    /// Relative spawn weight; zero keeps the tile out of weighted draws
    pub weight: f64,
    /// Edge sockets at rotation 0
    pub sockets: Sockets,
}

impl TileDefinition {
    /// Create a definition with weight 1 whose prefab handle is its name
    pub fn new(name: impl Into<String>, sockets: Sockets) -> Self {
        let name = name.into();
        Self {
            prefab: PrefabHandle(name.clone()),
            name,
            weight: 1.0,
            sockets,
        }
    }

    /// Replace the spawn weight
    #[must_use]
    pub const fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Replace the prefab handle
    #[must_use]
    pub fn with_prefab(mut self, prefab: impl Into<String>) -> Self {
        self.prefab = PrefabHandle(prefab.into());
        self
    }
}

/// One rotation of one definition: a solver candidate
#[derive(Debug, Clone, PartialEq)]
pub struct TileVariant {
    /// Index of the source definition in the registry
    pub definition: usize,
    /// Rotation in degrees, a multiple of 90 below 360
    pub rotation: u16,
    /// Sockets after rotation
    pub sockets: Sockets,
    /// Spawn weight inherited from the definition
    pub weight: f64,
}

impl TileVariant {
    /// The unrotated variant of a definition
    pub fn base(definition_index: usize, definition: &TileDefinition) -> Self {
        Self {
            definition: definition_index,
            rotation: 0,
            sockets: definition.sockets.clone(),
            weight: definition.weight,
        }
    }

    /// Quarter turn clockwise, shifting sockets and advancing the angle
    pub fn rotate(&mut self) {
        self.sockets.rotate();
        self.rotation = (self.rotation + ROTATION_STEP_DEGREES) % 360;
    }

    /// A copy turned `quarter_turns` times
    #[must_use]
    pub fn rotated(&self, quarter_turns: usize) -> Self {
        let mut variant = self.clone();
        for _ in 0..quarter_turns % ROTATIONS {
            variant.rotate();
        }
        variant
    }

    /// Plain socket match towards `other` placed in `direction`
    pub fn can_connect(&self, direction: Direction, other: &Self) -> bool {
        self.sockets.can_connect(direction, &other.sockets)
    }

    /// Blank-refusing socket match towards `other` placed in `direction`
    pub fn can_connect_with_blank(&self, direction: Direction, other: &Self) -> bool {
        self.sockets.can_connect_with_blank(direction, &other.sockets)
    }
}

/// A variant bound to one grid cell
///
/// Tracks the grid positions of the tiles it links to. Positions are used
/// instead of references so cells stay plain values.
#[derive(Debug, Clone, PartialEq)]
pub struct TileInstance {
    /// Index of the variant this tile was cloned from
    pub variant: usize,
    /// Index of the source definition
    pub definition: usize,
    /// Rotation in degrees
    pub rotation: u16,
    /// Sockets after rotation
    pub sockets: Sockets,
    neighbours: Vec<(usize, usize)>,
}

impl TileInstance {
    /// Clone a variant for placement
    pub fn from_variant(variant_index: usize, variant: &TileVariant) -> Self {
        Self {
            variant: variant_index,
            definition: variant.definition,
            rotation: variant.rotation,
            sockets: variant.sockets.clone(),
            neighbours: Vec::new(),
        }
    }

    /// Record a link to the tile at `position`
    ///
    /// Returns false if the link already existed.
    pub fn link(&mut self, position: (usize, usize)) -> bool {
        if self.neighbours.contains(&position) {
            return false;
        }
        self.neighbours.push(position);
        true
    }

    /// Positions of linked tiles in link order
    pub fn neighbours(&self) -> &[(usize, usize)] {
        &self.neighbours
    }

    /// Blank-refusing socket match towards `other` placed in `direction`
    pub fn can_connect_with_blank(&self, direction: Direction, other: &Self) -> bool {
        self.sockets.can_connect_with_blank(direction, &other.sockets)
    }
}

/// Validated catalog plus its expanded rotation variants
///
/// Variants are ordered with every definition's rotation 0 first, in catalog
/// order, so variant `i` for `i < definitions().len()` is the base of
/// definition `i`. The 90, 180 and 270 degree turns follow, definition by
/// definition.
#[derive(Debug, Clone)]
pub struct TileRegistry {
    definitions: Vec<TileDefinition>,
    variants: Vec<TileVariant>,
    socket_count: usize,
}

impl TileRegistry {
    /// Build a registry, dropping rotations that repeat an earlier rotation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `socket_count` is outside 1..=5
    /// - The catalog is empty or has duplicate names
    /// - Any socket string has the wrong length
    /// - Any weight is negative or not finite
    pub fn new(definitions: Vec<TileDefinition>, socket_count: usize) -> Result<Self> {
        Self::with_options(definitions, socket_count, false)
    }

    /// Build a registry, optionally keeping rotations with identical sockets
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_options(
        definitions: Vec<TileDefinition>,
        socket_count: usize,
        keep_symmetric_rotations: bool,
    ) -> Result<Self> {
        validate_catalog(&definitions, socket_count)?;

        let mut variants: Vec<TileVariant> = definitions
            .iter()
            .enumerate()
            .map(|(index, definition)| TileVariant::base(index, definition))
            .collect();

        for (index, definition) in definitions.iter().enumerate() {
            let base = TileVariant::base(index, definition);
            let mut seen = vec![base.sockets.clone()];
            for quarter_turns in 1..ROTATIONS {
                let rotated = base.rotated(quarter_turns);
                if !keep_symmetric_rotations && seen.contains(&rotated.sockets) {
                    continue;
                }
                seen.push(rotated.sockets.clone());
                variants.push(rotated);
            }
        }

        Ok(Self {
            definitions,
            variants,
            socket_count,
        })
    }

    /// Catalog definitions in input order
    pub fn definitions(&self) -> &[TileDefinition] {
        &self.definitions
    }

    /// All solver candidates
    pub fn variants(&self) -> &[TileVariant] {
        &self.variants
    }

    /// Look up a definition
    pub fn definition(&self, index: usize) -> Option<&TileDefinition> {
        self.definitions.get(index)
    }

    /// Look up a variant
    pub fn variant(&self, index: usize) -> Option<&TileVariant> {
        self.variants.get(index)
    }

    /// Number of solver candidates
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Length of every socket string in this registry
    pub const fn socket_count(&self) -> usize {
        self.socket_count
    }

    /// Index of the definition with the given name
    pub fn find(&self, name: &str) -> Option<usize> {
        self.definitions.iter().position(|d| d.name == name)
    }

    /// Variant index of the unrotated form of a named definition
    ///
    /// # Errors
    ///
    /// Returns `UnknownTile` if no definition has that name.
    pub fn base_variant(&self, name: &str) -> Result<usize> {
        self.find(name).ok_or_else(|| GenerationError::UnknownTile {
            name: name.to_string(),
        })
    }

    /// Plain socket match between two variants
    pub fn can_connect(&self, a: usize, direction: Direction, b: usize) -> bool {
        match (self.variants.get(a), self.variants.get(b)) {
            (Some(a), Some(b)) => a.can_connect(direction, b),
            _ => false,
        }
    }

    /// Blank-refusing socket match between two variants
    pub fn can_connect_with_blank(&self, a: usize, direction: Direction, b: usize) -> bool {
        match (self.variants.get(a), self.variants.get(b)) {
            (Some(a), Some(b)) => a.can_connect_with_blank(direction, b),
            _ => false,
        }
    }
}

fn validate_catalog(definitions: &[TileDefinition], socket_count: usize) -> Result<()> {
    if !(MIN_SOCKET_COUNT..=MAX_SOCKET_COUNT).contains(&socket_count) {
        return Err(invalid_parameter(
            "socket_count",
            &socket_count,
            &format!("must be between {MIN_SOCKET_COUNT} and {MAX_SOCKET_COUNT}"),
        ));
    }

    if definitions.is_empty() {
        return Err(malformed_catalog("", &"catalog contains no tiles"));
    }

    let mut names = HashSet::new();
    for definition in definitions {
        if !names.insert(definition.name.as_str()) {
            return Err(malformed_catalog(&definition.name, &"duplicate tile name"));
        }

        if !definition.weight.is_finite() || definition.weight < 0.0 {
            return Err(malformed_catalog(
                &definition.name,
                &format!("weight {} must be a finite non-negative number", definition.weight),
            ));
        }

        for direction in Direction::ALL {
            let socket = definition.sockets.get(direction);
            let length = socket.chars().count();
            if length != socket_count {
                return Err(malformed_catalog(
                    &definition.name,
                    &format!(
                        "{direction} socket '{socket}' has {length} symbols, expected {socket_count}"
                    ),
                ));
            }
        }
    }

    Ok(())
}

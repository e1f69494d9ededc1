use crate::{
    algorithm::propagation::propagate_from,
    algorithm::selection::{CellSelection, choose_variant, select_least_constrained},
    io::configuration::DEFAULT_SEED,
    io::error::{Result, invalid_parameter},
    math::random::RandomSource,
    spatial::grid::Grid,
    spatial::tiles::{TileInstance, TileRegistry},
};
use log::{debug, info, warn};

/// Solver parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Seed for every random draw of the run
    pub seed: u64,
    /// Tile name collapsed onto every edge cell before solving
    pub border: Option<String>,
    /// Stop after this many collapse steps
    pub max_iterations: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            border: None,
            max_iterations: None,
        }
    }
}

impl SolverConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns an error if the iteration cap is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == Some(0) {
            return Err(invalid_parameter(
                "max_iterations",
                &0,
                &"an iteration cap must allow at least one step",
            ));
        }
        Ok(())
    }
}

/// Why a run stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every cell holds a tile
    Complete,
    /// A cell ran out of candidates; the grid is left partially solved
    Contradiction {
        /// Row of the dead cell
        row: usize,
        /// Column of the dead cell
        col: usize,
    },
    /// The configured iteration cap was reached
    IterationLimit,
}

/// Solver lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverState {
    /// Grid is fresh; frame cells have not been placed
    Unsolved,
    /// Main loop in progress
    Iterating,
    /// Run finished
    Done(Termination),
}

/// One committed placement, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollapseEvent {
    /// Row of the collapsed cell
    pub row: usize,
    /// Column of the collapsed cell
    pub col: usize,
    /// Variant placed
    pub variant: usize,
    /// Definition the variant came from
    pub definition: usize,
    /// Rotation in degrees
    pub rotation: u16,
    /// Whether the placement was forced rather than drawn
    pub forced: bool,
}

/// Socket-matching tile collapse over a grid
///
/// Repeatedly picks the open cell with the fewest candidates, draws one of its
/// candidates by weight, places it and prunes the four neighbours. There is no
/// backtracking: a cell running out of candidates ends the run and the grid
/// stays partially solved.
pub struct WfcSolver {
    registry: TileRegistry,
    grid: Grid,
    config: SolverConfig,
    random: RandomSource,
    state: SolverState,
    events: Vec<CollapseEvent>,
    iteration: usize,
}

impl WfcSolver {
    /// Create a solver for a square map
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configuration is invalid
    /// - The border tile name is not in the registry
    /// - `columns` is zero or too large
    pub fn new(registry: TileRegistry, columns: usize, config: SolverConfig) -> Result<Self> {
        Self::with_dimensions(registry, columns, columns, config)
    }

    /// Create a solver for a rectangular map
    ///
    /// # Errors
    ///
    /// Same as [`Self::new`].
    pub fn with_dimensions(
        registry: TileRegistry,
        rows: usize,
        cols: usize,
        config: SolverConfig,
    ) -> Result<Self> {
        config.validate()?;
        if let Some(border) = &config.border {
            registry.base_variant(border)?;
        }

        let grid = Grid::new(rows, cols, registry.variant_count())?;
        let random = RandomSource::new(config.seed);

        Ok(Self {
            registry,
            grid,
            config,
            random,
            state: SolverState::Unsolved,
            events: Vec::new(),
            iteration: 0,
        })
    }

    /// Current lifecycle state
    pub const fn state(&self) -> SolverState {
        self.state
    }

    /// The map being solved
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Consume the solver, keeping the map
    pub fn into_grid(self) -> Grid {
        self.grid
    }

    /// Tile catalog in use
    pub const fn registry(&self) -> &TileRegistry {
        &self.registry
    }

    /// Active configuration
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Every placement so far, in order
    pub fn events(&self) -> &[CollapseEvent] {
        &self.events
    }

    /// Main-loop steps taken
    pub const fn iteration(&self) -> usize {
        self.iteration
    }

    /// Shared random source, for follow-up stages that continue the seed
    pub const fn random_mut(&mut self) -> &mut RandomSource {
        &mut self.random
    }

    /// Place the border frame and enter the main loop
    ///
    /// Does nothing unless the solver is `Unsolved`.
    ///
    /// # Errors
    ///
    /// Returns an error if the border tile is not in the registry.
    pub fn initialize(&mut self) -> Result<()> {
        if self.state != SolverState::Unsolved {
            return Ok(());
        }

        if let Some(border) = self.config.border.clone() {
            let variant = self.registry.base_variant(&border)?;
            let (rows, cols) = (self.grid.rows(), self.grid.cols());
            for row in 0..rows {
                for col in 0..cols {
                    let on_edge = row == 0 || col == 0 || row + 1 == rows || col + 1 == cols;
                    if on_edge && !self.grid.cell(row, col).is_collapsed() {
                        self.place(row, col, variant, true);
                    }
                }
            }
            debug!("Framed map with '{border}'");
        }

        self.state = SolverState::Iterating;
        Ok(())
    }

    /// Force a variant onto a cell before or during the run
    ///
    /// The placement ignores the cell's remaining candidates and prunes its
    /// neighbours like any other collapse.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The solver is already done
    /// - The position is outside the grid or already collapsed
    /// - The variant index is unknown
    pub fn pre_collapse(&mut self, row: usize, col: usize, variant: usize) -> Result<()> {
        if matches!(self.state, SolverState::Done(_)) {
            return Err(invalid_parameter(
                "pre_collapse",
                &format!("({row}, {col})"),
                &"the run has already finished",
            ));
        }
        let Some(cell) = self.grid.get(row, col) else {
            return Err(invalid_parameter(
                "pre_collapse",
                &format!("({row}, {col})"),
                &format!("outside {}x{} grid", self.grid.rows(), self.grid.cols()),
            ));
        };
        if cell.is_collapsed() {
            return Err(invalid_parameter(
                "pre_collapse",
                &format!("({row}, {col})"),
                &"cell is already collapsed",
            ));
        }
        if self.registry.variant(variant).is_none() {
            return Err(invalid_parameter(
                "variant",
                &variant,
                &format!("registry has {} variants", self.registry.variant_count()),
            ));
        }

        self.place(row, col, variant, true);
        Ok(())
    }

    /// Run a single select, collapse, propagate step
    ///
    /// # Errors
    ///
    /// Returns an error only if initialisation fails.
    pub fn step(&mut self) -> Result<SolverState> {
        if self.state == SolverState::Unsolved {
            self.initialize()?;
        }
        if let SolverState::Done(_) = self.state {
            return Ok(self.state);
        }

        match select_least_constrained(&self.grid) {
            CellSelection::Exhausted => Ok(self.finish(Termination::Complete)),
            CellSelection::Contradiction { row, col } => {
                Ok(self.finish(Termination::Contradiction { row, col }))
            }
            CellSelection::Candidate { .. }
                if self
                    .config
                    .max_iterations
                    .is_some_and(|cap| self.iteration >= cap) =>
            {
                Ok(self.finish(Termination::IterationLimit))
            }
            CellSelection::Candidate { row, col } => {
                self.iteration += 1;
                let chosen = self
                    .grid
                    .cell(row, col)
                    .possibilities()
                    .and_then(|possibilities| {
                        choose_variant(possibilities, &self.registry, &mut self.random)
                    });

                match chosen {
                    Some(variant) => {
                        self.place(row, col, variant, false);
                        Ok(self.state)
                    }
                    None => Ok(self.finish(Termination::Contradiction { row, col })),
                }
            }
        }
    }

    /// Run until done, then link connected tiles
    ///
    /// # Errors
    ///
    /// Returns an error only if initialisation fails.
    pub fn solve(&mut self) -> Result<Termination> {
        loop {
            if let SolverState::Done(termination) = self.step()? {
                return Ok(termination);
            }
        }
    }

    /// Record links between touching tiles whose shared edge connects
    ///
    /// Uses the blank-refusing test, so blank edges never link. Links are
    /// stored on both tiles without duplicates.
    pub fn connect_tiles(&mut self) {
        let mut links = Vec::new();
        for cell in self.grid.iter() {
            let Some(tile) = cell.tile() else {
                continue;
            };
            for (direction, (n_row, n_col)) in self.grid.neighbours(cell.row, cell.col) {
                let Some(other) = self.grid.cell(n_row, n_col).tile() else {
                    continue;
                };
                if tile.can_connect_with_blank(direction, other) {
                    links.push(((cell.row, cell.col), (n_row, n_col)));
                }
            }
        }

        for (from, to) in links {
            if let Some(tile) = self.grid.cell_mut(from.0, from.1).tile_mut() {
                tile.link(to);
            }
            if let Some(tile) = self.grid.cell_mut(to.0, to.1).tile_mut() {
                tile.link(from);
            }
        }
    }

    /// Throw the map away and start again, optionally with a new seed
    ///
    /// # Errors
    ///
    /// Returns an error if the grid cannot be rebuilt.
    pub fn reset(&mut self, seed: Option<u64>) -> Result<()> {
        if let Some(seed) = seed {
            self.config.seed = seed;
        }
        self.grid = Grid::new(
            self.grid.rows(),
            self.grid.cols(),
            self.registry.variant_count(),
        )?;
        self.random = RandomSource::new(self.config.seed);
        self.state = SolverState::Unsolved;
        self.events.clear();
        self.iteration = 0;
        Ok(())
    }

    fn place(&mut self, row: usize, col: usize, variant_index: usize, forced: bool) {
        let Some(variant) = self.registry.variant(variant_index) else {
            return;
        };
        let tile = TileInstance::from_variant(variant_index, variant);
        self.events.push(CollapseEvent {
            row,
            col,
            variant: variant_index,
            definition: tile.definition,
            rotation: tile.rotation,
            forced,
        });
        self.grid.cell_mut(row, col).collapse(tile);

        let report = propagate_from(&mut self.grid, &self.registry, row, col);
        for (d_row, d_col) in &report.contradictions {
            debug!("Cell ({d_row}, {d_col}) lost its last candidate after placing ({row}, {col})");
        }
    }

    fn finish(&mut self, termination: Termination) -> SolverState {
        match termination {
            Termination::Complete => info!(
                "Solved {}x{} map in {} steps",
                self.grid.rows(),
                self.grid.cols(),
                self.iteration
            ),
            Termination::Contradiction { row, col } => warn!(
                "Contradiction at ({row}, {col}) after {} steps; {} of {} cells collapsed",
                self.iteration,
                self.grid.collapsed_count(),
                self.grid.len()
            ),
            Termination::IterationLimit => warn!(
                "Stopped at iteration cap {}; {} of {} cells collapsed",
                self.iteration,
                self.grid.collapsed_count(),
                self.grid.len()
            ),
        }

        self.state = SolverState::Done(termination);
        self.connect_tiles();
        self.state
    }
}

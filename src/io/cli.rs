//! Command-line interface for generating a city map from a tile catalog

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use log::{LevelFilter, info, warn};

use crate::algorithm::executor::{SolverConfig, SolverState, Termination, WfcSolver};
use crate::building::lots::build_lot_clusters;
use crate::building::partition::PartitionConfig;
use crate::building::registry::ClusterRegistry;
use crate::io::catalog::CatalogFile;
use crate::io::configuration::{
    DEFAULT_COLUMNS, DEFAULT_LOT_RESOLUTION, DEFAULT_MAX_AREA, DEFAULT_MAX_SIDE_DIFFERENCE,
    DEFAULT_MIN_HOUSES, DEFAULT_MIN_ROOM_SIZE, DEFAULT_SEED, DEFAULT_SPLIT_CHANCE,
};
use crate::io::error::Result;
use crate::io::image::{export_houses_png, export_map_png, houses_path};
use crate::io::progress::ProgressDisplay;

#[derive(Parser, Debug)]
#[command(name = "tilecity")]
#[command(
    author,
    version,
    about = "Generate a road map from a tile catalog and partition its free lots into houses"
)]
/// Command-line arguments for the map generator
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// TOML tile catalog
    #[arg(value_name = "CATALOG")]
    pub catalog: PathBuf,

    /// Map side length (overrides the catalog)
    #[arg(short, long)]
    pub columns: Option<usize>,

    /// Random seed (overrides the catalog)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Stop after this many collapse steps
    #[arg(short = 'i', long)]
    pub max_iterations: Option<usize>,

    /// Tile used to frame the map (overrides the catalog)
    #[arg(short, long)]
    pub border: Option<String>,

    /// Do not frame the map even if the catalog names a border tile
    #[arg(long, conflicts_with = "border")]
    pub no_border: bool,

    /// Keep rotations whose sockets repeat an earlier rotation
    #[arg(long)]
    pub keep_symmetric: bool,

    /// Write a PNG preview of the map here
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Partition free lots into houses
    #[arg(short = 'H', long)]
    pub houses: bool,

    /// Sub-cells per side of one lot tile
    #[arg(long, default_value_t = DEFAULT_LOT_RESOLUTION)]
    pub lot_resolution: usize,

    /// Smallest side a house may have
    #[arg(long, default_value_t = DEFAULT_MIN_ROOM_SIZE)]
    pub min_room_size: i32,

    /// Splits required before a rectangle may stop early
    #[arg(long, default_value_t = DEFAULT_MIN_HOUSES)]
    pub min_houses: u32,

    /// Area below which a rectangle may stop early
    #[arg(long, default_value_t = DEFAULT_MAX_AREA)]
    pub max_area: i32,

    /// Largest side difference of a rectangle that stops early
    #[arg(long, default_value_t = DEFAULT_MAX_SIDE_DIFFERENCE)]
    pub max_side_difference: i32,

    /// Upper bound of the early stop roll
    #[arg(long, default_value_t = DEFAULT_SPLIT_CHANCE)]
    pub split_chance: i32,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Print per-step details
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,
}

impl Cli {
    /// Log level selected by the verbosity flags
    pub const fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::Warn
        } else if self.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    }

    /// House partition parameters from the flags
    pub const fn partition_config(&self) -> PartitionConfig {
        PartitionConfig {
            min_room_size: self.min_room_size,
            min_houses: self.min_houses,
            max_area: self.max_area,
            max_side_difference: self.max_side_difference,
            split_chance: self.split_chance,
        }
    }

    /// Solver parameters, with flags taking precedence over the catalog
    pub fn solver_config(&self, catalog: &CatalogFile) -> SolverConfig {
        let border = if self.no_border {
            None
        } else {
            self.border.clone().or_else(|| catalog.border.clone())
        };
        SolverConfig {
            seed: self.seed.or(catalog.seed).unwrap_or(DEFAULT_SEED),
            border,
            max_iterations: self.max_iterations,
        }
    }

    /// Map side length, with the flag taking precedence over the catalog
    pub fn columns(&self, catalog: &CatalogFile) -> usize {
        self.columns.or(catalog.columns).unwrap_or(DEFAULT_COLUMNS)
    }
}

/// Outcome of one generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Why the solver stopped
    pub termination: Termination,
    /// Collapsed cells
    pub collapsed: usize,
    /// All cells
    pub cells: usize,
    /// Live clusters, zero unless houses were requested
    pub clusters: usize,
    /// Houses, zero unless houses were requested
    pub houses: usize,
}

/// Runs the catalog, solve, cluster, partition and export pipeline
pub struct MapRunner {
    cli: Cli,
    progress: ProgressDisplay,
}

impl MapRunner {
    /// Create a runner; quiet runs draw no progress bars
    pub fn new(cli: Cli) -> Self {
        let progress = if cli.quiet {
            ProgressDisplay::hidden()
        } else {
            ProgressDisplay::new()
        };
        Self { cli, progress }
    }

    /// Route log output through the progress display
    pub fn install_logger(&self) -> bool {
        self.progress.install_logger(self.cli.log_level())
    }

    /// Run the whole pipeline
    ///
    /// A contradiction is reported, not returned as an error: the partial map
    /// is still exported.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog cannot be loaded or is malformed
    /// - Any solver or partition parameter is invalid
    /// - An export fails
    pub fn run(&mut self) -> Result<RunReport> {
        let start_time = Instant::now();

        let catalog = CatalogFile::load(&self.cli.catalog)?;
        let columns = self.cli.columns(&catalog);
        let config = self.cli.solver_config(&catalog);
        let registry = catalog.into_registry(self.cli.keep_symmetric)?;
        info!(
            "Loaded {} tiles expanding to {} variants from '{}'",
            registry.definitions().len(),
            registry.variant_count(),
            self.cli.catalog.display()
        );

        let partition_config = self.cli.partition_config();
        if self.cli.houses {
            partition_config.validate()?;
        }

        let mut solver = WfcSolver::new(registry, columns, config)?;
        let termination = self.solve(&mut solver)?;

        let grid = solver.grid();
        let mut report = RunReport {
            termination,
            collapsed: grid.collapsed_count(),
            cells: grid.len(),
            clusters: 0,
            houses: 0,
        };

        let mut clusters = ClusterRegistry::new();
        if self.cli.houses {
            clusters = build_lot_clusters(solver.grid(), self.cli.lot_resolution)?;
            report.houses = clusters.generate_houses(&partition_config, solver.random_mut())?;
            report.clusters = clusters.len();

            info!(
                "Partitioned {} clusters into {} houses",
                report.clusters, report.houses
            );
            for summary in clusters.summaries() {
                info!("{summary}");
            }
        }

        if let Some(output) = &self.cli.output {
            export_map_png(solver.grid(), output)?;
            info!("Wrote map preview to '{}'", output.display());

            if self.cli.houses {
                if report.houses == 0 {
                    warn!("No lots to build on; skipping house preview");
                } else {
                    let path = houses_path(output);
                    export_houses_png(&clusters, &path)?;
                    info!("Wrote house preview to '{}'", path.display());
                }
            }
        }

        self.progress.finish();
        info!("Finished in {:.2?}", start_time.elapsed());
        Ok(report)
    }

    fn solve(&mut self, solver: &mut WfcSolver) -> Result<Termination> {
        let total = solver.grid().len() as u64;
        self.progress.start_stage("solve", total);

        loop {
            let state = solver.step()?;
            self.progress.set_position(solver.events().len() as u64);
            if let SolverState::Done(termination) = state {
                let message = match termination {
                    Termination::Complete => "complete".to_string(),
                    Termination::Contradiction { row, col } => {
                        format!("contradiction at ({row}, {col})")
                    }
                    Termination::IterationLimit => "iteration cap".to_string(),
                };
                self.progress.finish_stage(message);
                return Ok(termination);
            }
        }
    }
}

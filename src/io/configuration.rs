//! Generation constants and runtime configuration defaults

// Socket model
/// Symbol marking an edge segment with no connection
pub const BLANK_SYMBOL: char = 'a';
/// Number of quarter turns a tile can take
pub const ROTATIONS: usize = 4;
/// Degrees added by one quarter turn
pub const ROTATION_STEP_DEGREES: u16 = 90;
/// Shortest allowed socket string
pub const MIN_SOCKET_COUNT: usize = 1;
/// Longest allowed socket string
pub const MAX_SOCKET_COUNT: usize = 5;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 1_000;

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 100;
/// Default side length of the square map
pub const DEFAULT_COLUMNS: usize = 10;

// House partitioning defaults
/// Smallest side a house may have
pub const DEFAULT_MIN_ROOM_SIZE: i32 = 2;
/// Split count that must be exceeded before a rectangle may stop splitting
pub const DEFAULT_MIN_HOUSES: u32 = 2;
/// Rectangles must be smaller than this area to stop splitting
pub const DEFAULT_MAX_AREA: i32 = 10;
/// Largest side difference tolerated for a finished house
pub const DEFAULT_MAX_SIDE_DIFFERENCE: i32 = 2;
/// Upper bound of the stop roll
pub const DEFAULT_SPLIT_CHANCE: i32 = 5;
/// Roll value that lets an eligible rectangle stop splitting
pub const STOP_SENTINEL: i32 = 1;

// Lots
/// Sub-cells per side of one map tile when it becomes a building lot
pub const DEFAULT_LOT_RESOLUTION: usize = 3;
/// Largest lot resolution accepted
pub const MAX_LOT_RESOLUTION: usize = 16;

// Output settings
/// Suffix added to the map image filename for the house layout
pub const HOUSES_SUFFIX: &str = "_houses";
/// Pixels per side used to draw one map cell
pub const CELL_PIXELS: u32 = 3;

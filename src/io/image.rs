//! PNG previews of the solved map and of the house layout
//!
//! The map preview draws each cell as a `CELL_PIXELS` square: non-blank edges
//! are painted as road stubs running into the centre, lots are filled, open
//! cells stay transparent and dead cells are marked. The house preview draws
//! one pixel per lot sub-cell, so at the default lot resolution both images
//! line up.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageBuffer, Rgba, RgbaImage};

use crate::building::bounds::{GridPos, MinMax, Rect};
use crate::building::registry::ClusterRegistry;
use crate::io::configuration::{CELL_PIXELS, HOUSES_SUFFIX};
use crate::io::error::{GenerationError, Result};
use crate::spatial::direction::Direction;
use crate::spatial::grid::{CellState, Grid};

const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);
const GROUND: Rgba<u8> = Rgba([205, 196, 170, 255]);
const ROAD: Rgba<u8> = Rgba([64, 64, 72, 255]);
const LOT: Rgba<u8> = Rgba([136, 184, 104, 255]);
const DEAD: Rgba<u8> = Rgba([220, 40, 40, 255]);
const HOUSE_EDGE: Rgba<u8> = Rgba([40, 32, 28, 255]);

const HOUSE_PALETTE: [[u8; 4]; 6] = [
    [214, 120, 88, 255],
    [232, 182, 92, 255],
    [120, 160, 210, 255],
    [176, 128, 200, 255],
    [112, 190, 170, 255],
    [200, 200, 120, 255],
];

/// Path of the house preview that goes with a map preview
///
/// `out/city.png` becomes `out/city_houses.png`.
pub fn houses_path(map_path: &Path) -> PathBuf {
    let stem = map_path
        .file_stem()
        .map_or_else(|| "map".to_string(), |s| s.to_string_lossy().into_owned());
    let extension = map_path
        .extension()
        .map_or_else(|| "png".to_string(), |e| e.to_string_lossy().into_owned());
    map_path.with_file_name(format!("{stem}{HOUSES_SUFFIX}.{extension}"))
}

/// Render the map preview in memory
pub fn render_map(grid: &Grid) -> RgbaImage {
    let width = grid.cols() as u32 * CELL_PIXELS;
    let height = grid.rows() as u32 * CELL_PIXELS;
    let mut img = ImageBuffer::from_pixel(width, height, TRANSPARENT);

    let mid = CELL_PIXELS / 2;
    let last = CELL_PIXELS - 1;

    for cell in grid.iter() {
        let origin_x = cell.col as u32 * CELL_PIXELS;
        let origin_y = cell.row as u32 * CELL_PIXELS;

        match &cell.state {
            CellState::Open(possibilities) => {
                if possibilities.is_empty() {
                    fill(&mut img, origin_x, origin_y, CELL_PIXELS, CELL_PIXELS, DEAD);
                }
            }
            CellState::Collapsed(tile) => {
                if tile.sockets.is_all_blank() {
                    fill(&mut img, origin_x, origin_y, CELL_PIXELS, CELL_PIXELS, LOT);
                    continue;
                }

                fill(&mut img, origin_x, origin_y, CELL_PIXELS, CELL_PIXELS, GROUND);
                img.put_pixel(origin_x + mid, origin_y + mid, ROAD);
                for direction in Direction::ALL {
                    if tile.sockets.is_blank(direction) {
                        continue;
                    }
                    let (x, y) = match direction {
                        Direction::Up => (mid, 0),
                        Direction::Right => (last, mid),
                        Direction::Down => (mid, last),
                        Direction::Left => (0, mid),
                    };
                    img.put_pixel(origin_x + x, origin_y + y, ROAD);
                }
            }
        }
    }

    img
}

/// Render the house preview in memory
///
/// Returns `None` when no cluster holds a house.
pub fn render_houses(registry: &ClusterRegistry) -> Option<RgbaImage> {
    let mut extent = MinMax::EMPTY;
    for cluster in registry.clusters() {
        for house in cluster.houses() {
            extent.include_point(GridPos::new(house.rect.x, house.rect.y));
            extent.include_point(GridPos::new(
                house.rect.x + (house.rect.width - 1),
                house.rect.y + (house.rect.height - 1),
            ));
        }
    }
    if extent.is_empty() {
        return None;
    }

    // Anchored at the origin, like the map preview
    let width = extent.max_x.max(0) as u32 + 1;
    let height = extent.max_y.max(0) as u32 + 1;
    let mut img = ImageBuffer::from_pixel(width, height, TRANSPARENT);

    let mut colour_index = 0;
    for cluster in registry.clusters() {
        for house in cluster.houses() {
            let colour = HOUSE_PALETTE
                .get(colour_index % HOUSE_PALETTE.len())
                .copied()
                .map_or(GROUND, Rgba);
            colour_index += 1;
            draw_house(&mut img, house.rect, colour);
        }
    }

    Some(img)
}

/// Write the map preview as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the image
/// cannot be saved.
pub fn export_map_png(grid: &Grid, path: &Path) -> Result<()> {
    save(&render_map(grid), path)
}

/// Write the house preview as PNG, creating parent directories
///
/// # Errors
///
/// Returns an error if:
/// - No cluster holds a house
/// - The parent directory cannot be created
/// - The image cannot be saved
pub fn export_houses_png(registry: &ClusterRegistry, path: &Path) -> Result<()> {
    let img = render_houses(registry).ok_or(GenerationError::NothingToExport {
        what: "no cluster has been partitioned into houses",
    })?;
    save(&img, path)
}

fn draw_house(img: &mut RgbaImage, rect: Rect, colour: Rgba<u8>) {
    let (last_x, last_y) = (rect.x + (rect.width - 1), rect.y + (rect.height - 1));
    for y in rect.y.max(0)..=last_y {
        for x in rect.x.max(0)..=last_x {
            let on_edge = x == rect.x || y == rect.y || x == last_x || y == last_y;
            let pixel = if on_edge && rect.width > 2 && rect.height > 2 {
                HOUSE_EDGE
            } else {
                colour
            };
            if let Some(target) = img.get_pixel_mut_checked(x as u32, y as u32) {
                *target = pixel;
            }
        }
    }
}

fn fill(img: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, colour: Rgba<u8>) {
    for dy in 0..height {
        for dx in 0..width {
            if let Some(target) = img.get_pixel_mut_checked(x + dx, y + dy) {
                *target = colour;
            }
        }
    }
}

fn save(img: &RgbaImage, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| GenerationError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source,
        })?;
    }

    img.save(path).map_err(|source| GenerationError::ImageExport {
        path: path.to_path_buf(),
        source,
    })
}

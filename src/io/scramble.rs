//! Seeded generation of solvable tile puzzles
//!
//! A master image of side `k * (s - 1) + 1` is cut into overlapping `s`-sided
//! windows, so every pair of neighbouring tiles shares its touching border
//! exactly. Grid-line segments are drawn so that no border reads the same in
//! both directions and no two segments are equal up to reversal; every pair of
//! tiles therefore matches in at most one configuration. Each tile is then
//! given a random id and orientation and the set is shuffled.

use crate::analysis::scanner::PatternOccurrence;
use crate::io::configuration::{
    DEFAULT_SEED, DEFAULT_TILE_SIDE, GENERATED_ID_RANGE, MAX_GENERATION_ATTEMPTS,
};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::bitmap::Bitmap;
use crate::spatial::tiles::{Tile, TileId, TileSet};
use crate::spatial::transform::Transform;
use ndarray::Array2;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::collections::HashSet;

/// Parameters of a generated puzzle
#[derive(Clone, Debug)]
pub struct ScrambleConfig {
    /// Tiles per row and column
    pub grid_side: usize,
    /// Side of every tile, border included
    pub tile_side: usize,
    /// Probability of an interior cell being on
    pub density: f64,
    /// Seed for every random choice
    pub seed: u64,
    /// Feature planted into the stitched image
    pub pattern: Option<Bitmap>,
    /// Number of non-overlapping copies of `pattern` to plant
    pub plants: usize,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            grid_side: 3,
            tile_side: DEFAULT_TILE_SIDE,
            density: 0.3,
            seed: DEFAULT_SEED,
            pattern: None,
            plants: 0,
        }
    }
}

/// A generated puzzle together with its solution
#[derive(Clone, Debug)]
pub struct ScrambledPuzzle {
    /// Shuffled, randomly oriented tiles
    pub tiles: TileSet,
    /// Stitched interiors in the orientation they were generated in
    pub solution: Bitmap,
    /// Tile ids by (row, column) in the generated orientation
    pub layout: Array2<TileId>,
    /// Planted pattern copies, in `solution` coordinates
    pub planted: Vec<PatternOccurrence>,
}

/// Generate a puzzle with a unique arrangement
///
/// # Errors
///
/// Returns an error if:
/// - `grid_side` is zero, `tile_side` is below 3, or `density` is not a probability
/// - More tiles are requested than there are ids to draw from
/// - Unique borders or non-overlapping plants cannot be drawn within the attempt limit
pub fn scramble(config: &ScrambleConfig) -> Result<ScrambledPuzzle> {
    validate(config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let k = config.grid_side;
    let step = config.tile_side - 1;
    let inner = config.tile_side - 2;
    let master_side = k * step + 1;
    let mut master = Bitmap::blank(master_side, master_side);

    draw_grid_lines(&mut master, &mut rng, k, step)?;

    // Interior cells never lie on a grid line
    for y in (0..master_side).filter(|y| y % step != 0) {
        for x in (0..master_side).filter(|x| x % step != 0) {
            master.set(x, y, rng.random_bool(config.density));
        }
    }

    let to_master = |v: usize| (v / inner) * step + 1 + v % inner;
    let planted = match &config.pattern {
        Some(pattern) => plant(&mut master, pattern, config, &mut rng, to_master)?,
        None => Vec::new(),
    };

    let solution_side = k * inner;
    let solution = Bitmap::new(
        solution_side,
        solution_side,
        (0..solution_side)
            .flat_map(|y| (0..solution_side).map(move |x| (x, y)))
            .map(|(x, y)| master.get(to_master(x), to_master(y))),
    )?;

    let span = (GENERATED_ID_RANGE.end - GENERATED_ID_RANGE.start) as usize;
    let ids: Vec<TileId> = rand::seq::index::sample(&mut rng, span, k * k)
        .into_iter()
        .map(|offset| GENERATED_ID_RANGE.start + offset as TileId)
        .collect();

    let mut layout = Array2::zeros((k, k));
    let mut tiles = Vec::with_capacity(k * k);
    for (index, id) in ids.into_iter().enumerate() {
        let (row, col) = (index / k, index % k);
        let window = master.crop(col * step, row * step, config.tile_side, config.tile_side)?;
        let transform = Transform::from_index(rng.random_range(0..8));
        tiles.push(Tile::new(id, window.transform(transform)));
        if let Some(cell) = layout.get_mut([row, col]) {
            *cell = id;
        }
    }
    tiles.shuffle(&mut rng);

    Ok(ScrambledPuzzle {
        tiles: TileSet::from_tiles(tiles)?,
        solution,
        layout,
        planted,
    })
}

fn validate(config: &ScrambleConfig) -> Result<()> {
    if config.grid_side == 0 {
        return Err(invalid_parameter(
            "grid_side",
            &config.grid_side,
            &"at least one tile is required",
        ));
    }
    if config.tile_side < 3 {
        return Err(invalid_parameter(
            "tile_side",
            &config.tile_side,
            &"tiles need an interior",
        ));
    }
    if !(0.0..=1.0).contains(&config.density) {
        return Err(invalid_parameter(
            "density",
            &config.density,
            &"must lie between 0 and 1",
        ));
    }
    let available = GENERATED_ID_RANGE.end - GENERATED_ID_RANGE.start;
    if (config.grid_side * config.grid_side) as u64 > available {
        return Err(invalid_parameter(
            "grid_side",
            &config.grid_side,
            &format!("more tiles than the {available} available ids"),
        ));
    }
    Ok(())
}

// Intersections first, then every segment between two intersections
fn draw_grid_lines(master: &mut Bitmap, rng: &mut StdRng, k: usize, step: usize) -> Result<()> {
    for i in 0..=k {
        for j in 0..=k {
            master.set(j * step, i * step, rng.random_bool(0.5));
        }
    }

    let mut used = HashSet::new();
    for line in 0..=k {
        for cell in 0..k {
            let fixed = line * step;
            let start = cell * step;

            let first = master.get(start, fixed);
            let last = master.get(start + step, fixed);
            let bits = draw_segment(rng, first, last, step + 1, &mut used)?;
            for (offset, bit) in bits.into_iter().enumerate() {
                master.set(start + offset, fixed, bit);
            }

            let first = master.get(fixed, start);
            let last = master.get(fixed, start + step);
            let bits = draw_segment(rng, first, last, step + 1, &mut used)?;
            for (offset, bit) in bits.into_iter().enumerate() {
                master.set(fixed, start + offset, bit);
            }
        }
    }
    Ok(())
}

// Redraws the free middle cells until the segment is asymmetric and unseen
fn draw_segment(
    rng: &mut StdRng,
    first: bool,
    last: bool,
    length: usize,
    used: &mut HashSet<Vec<bool>>,
) -> Result<Vec<bool>> {
    for _ in 0..MAX_GENERATION_ATTEMPTS {
        let mut bits = Vec::with_capacity(length);
        bits.push(first);
        bits.extend((2..length).map(|_| rng.random_bool(0.5)));
        bits.push(last);

        let reversed: Vec<bool> = bits.iter().rev().copied().collect();
        if reversed == bits {
            continue;
        }
        let canonical = if reversed < bits {
            reversed
        } else {
            bits.clone()
        };
        if used.insert(canonical) {
            return Ok(bits);
        }
    }

    Err(computation_error(
        "scramble",
        &"could not draw unique borders; use larger tiles or fewer of them",
    ))
}

fn plant(
    master: &mut Bitmap,
    pattern: &Bitmap,
    config: &ScrambleConfig,
    rng: &mut StdRng,
    to_master: impl Fn(usize) -> usize,
) -> Result<Vec<PatternOccurrence>> {
    let side = config.grid_side * (config.tile_side - 2);
    let mut planted: Vec<(PatternOccurrence, usize, usize)> = Vec::with_capacity(config.plants);

    for _ in 0..config.plants {
        let mut placed = false;
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let transform = Transform::from_index(rng.random_range(0..8));
            let (height, width) =
                transform.transformed_dimensions(pattern.height(), pattern.width());
            if height > side || width > side {
                continue;
            }
            let x = rng.random_range(0..=side - width);
            let y = rng.random_range(0..=side - height);

            let overlaps = planted.iter().any(|(other, other_height, other_width)| {
                x < other.x + other_width
                    && other.x < x + width
                    && y < other.y + other_height
                    && other.y < y + height
            });
            if overlaps {
                continue;
            }

            for (cx, cy) in pattern.transform(transform).on_cells() {
                master.set(to_master(x + cx), to_master(y + cy), true);
            }
            planted.push((PatternOccurrence { x, y, transform }, height, width));
            placed = true;
            break;
        }

        if !placed {
            return Err(computation_error(
                "scramble",
                &"could not place the pattern without overlapping earlier copies",
            ));
        }
    }

    Ok(planted.into_iter().map(|(occurrence, _, _)| occurrence).collect())
}

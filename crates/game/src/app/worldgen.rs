use engine::{TileGrid, TileKind};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

use super::config::MapConfig;

/// Carve a tile grid with independent random walks: wall walks first, then
/// water walks. Walks may cross and overwrite each other; the last write
/// wins. A step that would leave the grid is skipped (the walk stays on
/// its current cell for that step), which deliberately biases walks toward
/// edges and corners.
pub(crate) fn generate_tile_grid(map: &MapConfig, rng: &mut StdRng) -> TileGrid {
    let mut grid = TileGrid::filled(map.cols, map.rows, map.tile_size, TileKind::Walkable)
        .expect("map config was validated before generation");

    for _ in 0..map.wall_walks {
        carve_walk(&mut grid, map.wall_walk_length, TileKind::Wall, rng);
    }
    for _ in 0..map.water_walks {
        carve_walk(&mut grid, map.water_walk_length, TileKind::Water, rng);
    }

    let mut wall_cells = 0usize;
    let mut water_cells = 0usize;
    for row in 0..map.rows as i32 {
        for col in 0..map.cols as i32 {
            match grid.tile_at(col, row) {
                Some(TileKind::Wall) => wall_cells += 1,
                Some(TileKind::Water) => water_cells += 1,
                _ => {}
            }
        }
    }
    debug!(wall_cells, water_cells, "tile_grid_generated");

    grid
}

fn carve_walk(grid: &mut TileGrid, length: u32, kind: TileKind, rng: &mut StdRng) {
    let mut col = rng.gen_range(0..grid.cols()) as i32;
    let mut row = rng.gen_range(0..grid.rows()) as i32;

    for _ in 0..length {
        grid.set_tile(col, row, kind);
        match rng.gen_range(0..4u32) {
            0 if col > 0 => col -= 1,
            1 if col < grid.cols() as i32 - 1 => col += 1,
            2 if row > 0 => row -= 1,
            3 if row < grid.rows() as i32 - 1 => row += 1,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn map_config(wall_walks: u32, water_walks: u32) -> MapConfig {
        MapConfig {
            cols: 10,
            rows: 10,
            tile_size: 50.0,
            wall_walks,
            wall_walk_length: 20,
            water_walks,
            water_walk_length: 15,
        }
    }

    fn count_kind(grid: &TileGrid, kind: TileKind) -> usize {
        let mut count = 0;
        for row in 0..grid.rows() as i32 {
            for col in 0..grid.cols() as i32 {
                if grid.tile_at(col, row) == Some(kind) {
                    count += 1;
                }
            }
        }
        count
    }

    #[test]
    fn zero_walks_yield_an_all_walkable_grid() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = generate_tile_grid(&map_config(0, 0), &mut rng);
        assert_eq!(count_kind(&grid, TileKind::Walkable), 100);
    }

    #[test]
    fn every_cell_has_a_defined_value_after_generation() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid = generate_tile_grid(&map_config(5, 3), &mut rng);
        for row in 0..grid.rows() as i32 {
            for col in 0..grid.cols() as i32 {
                assert!(grid.tile_at(col, row).is_some(), "undefined cell ({col}, {row})");
            }
        }
    }

    #[test]
    fn carved_cells_never_exceed_walk_budget() {
        let mut rng = StdRng::seed_from_u64(13);
        let config = map_config(5, 3);
        let grid = generate_tile_grid(&config, &mut rng);

        let wall_budget = (config.wall_walks * config.wall_walk_length) as usize;
        let water_budget = (config.water_walks * config.water_walk_length) as usize;
        assert!(count_kind(&grid, TileKind::Wall) <= wall_budget);
        assert!(count_kind(&grid, TileKind::Water) <= water_budget);
    }

    #[test]
    fn walks_stay_inside_the_grid_on_a_tiny_map() {
        // A 1x1 grid forces every step to hit the boundary skip.
        let config = MapConfig {
            cols: 1,
            rows: 1,
            tile_size: 50.0,
            wall_walks: 1,
            wall_walk_length: 50,
            water_walks: 0,
            water_walk_length: 0,
        };
        let mut rng = StdRng::seed_from_u64(17);
        let grid = generate_tile_grid(&config, &mut rng);
        assert_eq!(grid.tile_at(0, 0), Some(TileKind::Wall));
    }

    #[test]
    fn water_overwrites_wall_where_walks_cross() {
        // With the whole map walled first, any water walk must overwrite.
        let config = MapConfig {
            cols: 2,
            rows: 2,
            tile_size: 50.0,
            wall_walks: 8,
            wall_walk_length: 10,
            water_walks: 1,
            water_walk_length: 4,
        };
        let mut rng = StdRng::seed_from_u64(19);
        let grid = generate_tile_grid(&config, &mut rng);
        assert!(count_kind(&grid, TileKind::Water) > 0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedMove {
    pub(crate) position: Vec2,
    /// False when the intended motion collapsed to nothing (blocked or
    /// under tolerance on both axes).
    pub(crate) displaced: bool,
}

/// Shared movement primitive for every mover. Each axis resolves
/// independently, X first, and the Y pass sees the already-resolved X so
/// diagonal motion against a corner slides along one wall instead of
/// stopping dead. Per axis: clamp to map bounds, snap out of blocking
/// tiles toward the travel direction, then snap out of solid obstacle
/// rects. Residual motion below `MOVEMENT_TOLERANCE` rounds to zero to
/// keep floating-point dust from oscillating the mover.
pub(crate) fn resolve_move(
    grid: &TileGrid,
    start: Vec2,
    width: f32,
    height: f32,
    delta: Vec2,
    obstacles: &[Rect],
) -> ResolvedMove {
    let mut x = start.x;
    let mut y = start.y;

    if delta.x != 0.0 {
        x = resolve_axis_x(grid, start.x + delta.x, y, width, height, delta.x, obstacles);
    }
    if delta.y != 0.0 {
        y = resolve_axis_y(grid, x, start.y + delta.y, width, height, delta.y, obstacles);
    }

    if (x - start.x).abs() < MOVEMENT_TOLERANCE {
        x = start.x;
    }
    if (y - start.y).abs() < MOVEMENT_TOLERANCE {
        y = start.y;
    }

    ResolvedMove {
        position: Vec2 { x, y },
        displaced: x != start.x || y != start.y,
    }
}

fn resolve_axis_x(
    grid: &TileGrid,
    proposed_x: f32,
    y: f32,
    width: f32,
    height: f32,
    dx: f32,
    obstacles: &[Rect],
) -> f32 {
    let mut x = proposed_x;
    if x < 0.0 {
        x = 0.0;
    }
    if x + width > grid.width() {
        x = grid.width() - width;
    }

    let rect = Rect::new(x, y, width, height);
    if !grid.rect_is_walkable(&rect) {
        if let Some(snapped) = snap_x_to_tile_edge(grid, &rect, dx) {
            x = snapped;
        }
    }

    let rect = Rect::new(x, y, width, height);
    for obstacle in obstacles {
        if rect.overlaps(obstacle) {
            if dx > 0.0 {
                x = obstacle.x - width;
            } else {
                x = obstacle.x + obstacle.width;
            }
            break;
        }
    }
    x
}

fn resolve_axis_y(
    grid: &TileGrid,
    x: f32,
    proposed_y: f32,
    width: f32,
    height: f32,
    dy: f32,
    obstacles: &[Rect],
) -> f32 {
    let mut y = proposed_y;
    if y < 0.0 {
        y = 0.0;
    }
    if y + height > grid.height() {
        y = grid.height() - height;
    }

    let rect = Rect::new(x, y, width, height);
    if !grid.rect_is_walkable(&rect) {
        if let Some(snapped) = snap_y_to_tile_edge(grid, &rect, dy) {
            y = snapped;
        }
    }

    let rect = Rect::new(x, y, width, height);
    for obstacle in obstacles {
        if rect.overlaps(obstacle) {
            if dy > 0.0 {
                y = obstacle.y - height;
            } else {
                y = obstacle.y + obstacle.height;
            }
            break;
        }
    }
    y
}

/// Scan the covered columns in travel order for the nearest blocking tile
/// and snap flush against its near edge.
fn snap_x_to_tile_edge(grid: &TileGrid, rect: &Rect, dx: f32) -> Option<f32> {
    let (start_col, end_col) = grid.covered_cols(rect);
    let (start_row, end_row) = grid.covered_rows(rect);
    let tile = grid.tile_size();

    let column_blocked = |col: i32| {
        (start_row..=end_row).any(|row| !grid.tile_is_walkable(col, row))
    };

    if dx > 0.0 {
        (start_col..=end_col)
            .find(|col| column_blocked(*col))
            .map(|col| col as f32 * tile - rect.width)
    } else {
        (start_col..=end_col)
            .rev()
            .find(|col| column_blocked(*col))
            .map(|col| (col + 1) as f32 * tile)
    }
}

fn snap_y_to_tile_edge(grid: &TileGrid, rect: &Rect, dy: f32) -> Option<f32> {
    let (start_col, end_col) = grid.covered_cols(rect);
    let (start_row, end_row) = grid.covered_rows(rect);
    let tile = grid.tile_size();

    let row_blocked = |row: i32| {
        (start_col..=end_col).any(|col| !grid.tile_is_walkable(col, row))
    };

    if dy > 0.0 {
        (start_row..=end_row)
            .find(|row| row_blocked(*row))
            .map(|row| row as f32 * tile - rect.height)
    } else {
        (start_row..=end_row)
            .rev()
            .find(|row| row_blocked(*row))
            .map(|row| (row + 1) as f32 * tile)
    }
}

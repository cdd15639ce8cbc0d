//! Autotile resolution: neighborhood bitmasks to tile variants
//!
//! Four passes over the normalized grid, in a fixed order:
//! floor/wall, T-junction exceptions, wall-to-roof reclassification,
//! then shadows and cliffs. Wall selection matches an 8-neighbor
//! occupancy pattern against mask/match rules in strict priority
//! order; the first matching rule wins. The rule constants below are a
//! matched set; changing one mask invalidates the exception rules
//! derived from it, so they are kept as literal tables.

use bitflags::bitflags;
use hashbrown::HashMap;
use strum::Display;

use crate::grid::{Cell, Grid};

/// Tile-variant palette shared by all layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TileKind {
    Floor,
    WallTopLeft,
    WallTopRight,
    WallTopCenter,
    WallBottomLeft,
    WallBottomRight,
    WallBottom,
    WallTop,
    WallRight,
    WallLeft,
    WallCenter,
    WallCenterCenter,
    WallCenterRight,
    WallCenterLeft,
    WallT,
    Cliff0,
    Cliff1,
    ShadowRightTop,
    ShadowRight,
    ShadowRightBottom,
}

/// Sparse tile layers keyed by grid-local position, at most one tile
/// per position per layer. The blocking layer is the union of wall and
/// wall-top occupancy for the collision consumer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TileLayers {
    pub floor: HashMap<(i32, i32), TileKind>,
    pub wall: HashMap<(i32, i32), TileKind>,
    pub wall_top: HashMap<(i32, i32), TileKind>,
    pub cliff: HashMap<(i32, i32), TileKind>,
    pub shadow: HashMap<(i32, i32), TileKind>,
    pub blocking: HashMap<(i32, i32), TileKind>,
}

bitflags! {
    /// 9-bit neighborhood occupancy pattern. One bit per position in
    /// the 3x3 block around a cell (center included), in the fixed
    /// direction order of [`OFFSETS`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Pattern: u16 {
        const DOWN_RIGHT = 1 << 0;
        const DOWN = 1 << 1;
        const DOWN_LEFT = 1 << 2;
        const RIGHT = 1 << 3;
        const CENTER = 1 << 4;
        const LEFT = 1 << 5;
        const UP_RIGHT = 1 << 6;
        const UP = 1 << 7;
        const UP_LEFT = 1 << 8;
    }
}

/// Bit order for pattern computation: (dx, dy) per bit index.
const OFFSETS: [(i32, i32); 9] = [
    (1, -1),
    (0, -1),
    (-1, -1),
    (1, 0),
    (0, 0),
    (-1, 0),
    (1, 1),
    (0, 1),
    (-1, 1),
];

// Directional wall rules. Priority order is the order they are tested
// in `determine_wall_tile`.
const TOP_MASK: Pattern = Pattern::DOWN.union(Pattern::RIGHT).union(Pattern::LEFT);
const TOP_MATCH: Pattern = Pattern::DOWN;
const BOTTOM_MASK: Pattern = Pattern::RIGHT.union(Pattern::LEFT).union(Pattern::UP);
const BOTTOM_MATCH: Pattern = Pattern::UP;
const LEFT_MASK: Pattern = Pattern::DOWN.union(Pattern::RIGHT).union(Pattern::UP);
const LEFT_MATCH: Pattern = Pattern::RIGHT;
const RIGHT_MASK: Pattern = Pattern::DOWN.union(Pattern::LEFT).union(Pattern::UP);
const RIGHT_MATCH: Pattern = Pattern::LEFT;

const TOP_LEFT_MASK_0: Pattern = Pattern::RIGHT.union(Pattern::DOWN).union(Pattern::DOWN_RIGHT);
const TOP_LEFT_MATCH_0: Pattern = Pattern::DOWN_RIGHT;
const TOP_RIGHT_MASK_0: Pattern = Pattern::DOWN.union(Pattern::DOWN_LEFT).union(Pattern::LEFT);
const TOP_RIGHT_MATCH_0: Pattern = Pattern::DOWN_LEFT;
const BOTTOM_LEFT_MASK_0: Pattern = Pattern::RIGHT.union(Pattern::UP_RIGHT).union(Pattern::UP);
const BOTTOM_LEFT_MATCH_0: Pattern = Pattern::UP_RIGHT;
const BOTTOM_RIGHT_MASK_0: Pattern = Pattern::LEFT.union(Pattern::UP).union(Pattern::UP_LEFT);
const BOTTOM_RIGHT_MATCH_0: Pattern = Pattern::UP_LEFT;

const TOP_LEFT_MASK_1: Pattern = Pattern::LEFT.union(Pattern::UP);
const TOP_LEFT_MATCH_1: Pattern = Pattern::LEFT.union(Pattern::UP);
const TOP_RIGHT_MASK_1: Pattern = Pattern::RIGHT.union(Pattern::UP);
const TOP_RIGHT_MATCH_1: Pattern = Pattern::RIGHT.union(Pattern::UP);
const BOTTOM_LEFT_MASK_1: Pattern = Pattern::DOWN.union(Pattern::LEFT);
const BOTTOM_LEFT_MATCH_1: Pattern = Pattern::DOWN.union(Pattern::LEFT);
const BOTTOM_RIGHT_MASK_1: Pattern = Pattern::DOWN.union(Pattern::RIGHT);
const BOTTOM_RIGHT_MATCH_1: Pattern = Pattern::DOWN.union(Pattern::RIGHT);

// Surrounded-junction exceptions, tested before the directional rules.
const EXCEPTION_MASK: Pattern = Pattern::DOWN
    .union(Pattern::RIGHT)
    .union(Pattern::LEFT)
    .union(Pattern::UP);
const EXCEPTION_MATCH: Pattern = EXCEPTION_MASK;
const EXCEPTION_MASK_0: Pattern = Pattern::DOWN.union(Pattern::LEFT).union(Pattern::UP);
const EXCEPTION_MATCH_0: Pattern = EXCEPTION_MASK_0;
const EXCEPTION_MASK_1: Pattern = Pattern::DOWN.union(Pattern::RIGHT).union(Pattern::UP);
const EXCEPTION_MATCH_1: Pattern = EXCEPTION_MASK_1;
const EXCEPTION_MASK_2: Pattern = Pattern::DOWN.union(Pattern::RIGHT).union(Pattern::LEFT);
const EXCEPTION_MATCH_2: Pattern = EXCEPTION_MASK_2;
const EXCEPTION_MASK_3: Pattern = Pattern::RIGHT.union(Pattern::LEFT).union(Pattern::UP);
const EXCEPTION_MATCH_3: Pattern = EXCEPTION_MASK_3;

// T-junction patterns the priority table above cannot disambiguate.
// T1 and T2 share a mask; only the required corner bit differs.
const EXCEPTION_MASK_T1: Pattern = Pattern::DOWN_RIGHT
    .union(Pattern::DOWN)
    .union(Pattern::DOWN_LEFT)
    .union(Pattern::RIGHT)
    .union(Pattern::CENTER)
    .union(Pattern::LEFT)
    .union(Pattern::UP);
const EXCEPTION_MASK_T2: Pattern = EXCEPTION_MASK_T1;
const EXCEPTION_MASK_T3: Pattern = Pattern::DOWN_RIGHT
    .union(Pattern::DOWN)
    .union(Pattern::DOWN_LEFT)
    .union(Pattern::RIGHT)
    .union(Pattern::CENTER)
    .union(Pattern::LEFT);
const EXCEPTION_MATCH_T1: Pattern = Pattern::DOWN_RIGHT.union(Pattern::UP);
const EXCEPTION_MATCH_T2: Pattern = Pattern::DOWN_LEFT.union(Pattern::UP);
const EXCEPTION_MATCH_T3: Pattern = Pattern::DOWN_RIGHT.union(Pattern::DOWN_LEFT);

// Shadow band on the right-hand column of the neighborhood.
const SHADOW_MASK: Pattern = Pattern::DOWN_RIGHT
    .union(Pattern::RIGHT)
    .union(Pattern::UP_RIGHT);
const SHADOW_TOP_MATCH: Pattern = Pattern::DOWN_RIGHT.union(Pattern::RIGHT);
const SHADOW_MID_MATCH: Pattern = SHADOW_MASK;
const SHADOW_BOTTOM_MATCH: Pattern = Pattern::RIGHT.union(Pattern::UP_RIGHT);

/// Only the masked bits matter; among those, exactly `want` must be set.
fn matches(pattern: Pattern, mask: Pattern, want: Pattern) -> bool {
    pattern & mask == want
}

/// Resolve the tile layers for a normalized grid.
pub fn resolve(grid: &Grid) -> TileLayers {
    AutoTiler::new(grid).run()
}

struct AutoTiler<'a> {
    grid: &'a Grid,
    layers: TileLayers,
}

impl<'a> AutoTiler<'a> {
    fn new(grid: &'a Grid) -> Self {
        Self {
            grid,
            layers: TileLayers::default(),
        }
    }

    fn run(mut self) -> TileLayers {
        let w = self.grid.width() as i32;
        let h = self.grid.height() as i32;

        // Floor/wall pass. Later cells can see earlier wall writes, so
        // the reverse scan order is part of the contract.
        for y in (0..h).rev() {
            for x in (0..w).rev() {
                if self.grid.get(x, y) == Cell::Empty {
                    self.place_wall(x, y);
                } else {
                    self.layers.floor.insert((x, y), TileKind::Floor);
                }
            }
        }

        // T-junction exception pass.
        for y in (0..h).rev() {
            for x in (0..w).rev() {
                self.place_exception(x, y);
            }
        }

        // Reclassification: roof pieces over open space move from the
        // wall layer to the wall-top layer.
        for y in (0..h).rev() {
            for x in (0..w).rev() {
                self.reclassify_wall(x, y);
            }
        }

        // Shadows and cliffs read the finished wall layers.
        for y in 0..h {
            for x in 0..w {
                self.place_shadow(x, y);
                self.place_cliff(x, y);
            }
        }

        for (&pos, &tile) in self.layers.wall_top.iter() {
            self.layers.blocking.insert(pos, tile);
        }
        for (&pos, &tile) in self.layers.wall.iter() {
            self.layers.blocking.insert(pos, tile);
        }

        self.layers
    }

    /// Occupancy pattern over the grid: a bit per neighbor that is a
    /// non-Empty cell. Off-grid neighbors contribute nothing.
    fn pattern(&self, x: i32, y: i32) -> Pattern {
        let mut pattern = Pattern::empty();
        for (i, (dx, dy)) in OFFSETS.iter().enumerate() {
            if self.grid.get(x + dx, y + dy) != Cell::Empty {
                pattern |= Pattern::from_bits_truncate(1 << i);
            }
        }
        pattern
    }

    /// Occupancy pattern over the wall and wall-top layers, bounded to
    /// the grid rectangle.
    fn shadow_pattern(&self, x: i32, y: i32) -> Pattern {
        let w = self.grid.width() as i32;
        let h = self.grid.height() as i32;
        let mut pattern = Pattern::empty();
        for (i, (dx, dy)) in OFFSETS.iter().enumerate() {
            let (cx, cy) = (x + dx, y + dy);
            if cx < 0 || cx >= w || cy < 0 || cy >= h {
                continue;
            }
            if self.layers.wall.contains_key(&(cx, cy))
                || self.layers.wall_top.contains_key(&(cx, cy))
            {
                pattern |= Pattern::from_bits_truncate(1 << i);
            }
        }
        pattern
    }

    /// Pick the wall variant for an Empty cell. The surrounded
    /// exceptions go first; among the directional rules the first
    /// match wins. Returns None when no rule matches (the cell stays
    /// untiled) or when the rule already wrote its tiles itself.
    fn determine_wall_tile(&mut self, x: i32, y: i32) -> Option<TileKind> {
        let p = self.pattern(x, y);

        if matches(p, EXCEPTION_MASK, EXCEPTION_MATCH)
            || matches(p, EXCEPTION_MASK_0, EXCEPTION_MATCH_0)
            || matches(p, EXCEPTION_MASK_1, EXCEPTION_MATCH_1)
            || matches(p, EXCEPTION_MASK_2, EXCEPTION_MATCH_2)
        {
            return Some(TileKind::WallTopCenter);
        }
        if matches(p, EXCEPTION_MASK_3, EXCEPTION_MATCH_3) {
            self.layers.wall.insert((x, y + 1), TileKind::WallRight);
            self.layers.wall.insert((x, y), TileKind::WallRight);
            return None;
        }

        if matches(p, TOP_MASK, TOP_MATCH) {
            return Some(TileKind::WallTop);
        }
        if matches(p, BOTTOM_MASK, BOTTOM_MATCH) {
            return Some(TileKind::WallBottom);
        }
        if matches(p, LEFT_MASK, LEFT_MATCH) {
            return Some(TileKind::WallLeft);
        }
        if matches(p, RIGHT_MASK, RIGHT_MATCH) {
            return Some(TileKind::WallRight);
        }
        if matches(p, TOP_LEFT_MASK_0, TOP_LEFT_MATCH_0) {
            return Some(TileKind::WallTopLeft);
        }
        if matches(p, TOP_RIGHT_MASK_0, TOP_RIGHT_MATCH_0) {
            return Some(TileKind::WallTopRight);
        }
        if matches(p, BOTTOM_LEFT_MASK_0, BOTTOM_LEFT_MATCH_0) {
            return Some(TileKind::WallBottomLeft);
        }
        if matches(p, BOTTOM_RIGHT_MASK_0, BOTTOM_RIGHT_MATCH_0) {
            return Some(TileKind::WallBottomRight);
        }
        if matches(p, TOP_LEFT_MASK_1, TOP_LEFT_MATCH_1) {
            return Some(TileKind::WallTopLeft);
        }
        if matches(p, TOP_RIGHT_MASK_1, TOP_RIGHT_MATCH_1) {
            return Some(TileKind::WallTopRight);
        }
        if matches(p, BOTTOM_LEFT_MASK_1, BOTTOM_LEFT_MATCH_1) {
            return Some(TileKind::WallBottomLeft);
        }
        if matches(p, BOTTOM_RIGHT_MASK_1, BOTTOM_RIGHT_MATCH_1) {
            return Some(TileKind::WallBottomRight);
        }

        None
    }

    /// Write a wall tile with its composite: most variants occupy two
    /// vertically adjacent cells and leave a roof piece in the
    /// wall-top layer so the 2-cell-tall silhouette renders from one
    /// logical wall cell.
    fn place_wall(&mut self, x: i32, y: i32) {
        let Some(tile) = self.determine_wall_tile(x, y) else {
            return;
        };
        let pos = (x, y);
        let above = (x, y + 1);

        match tile {
            TileKind::WallLeft | TileKind::WallRight => {
                self.layers.wall.insert(pos, tile);
            }
            TileKind::WallTopLeft => {
                self.layers.wall.insert(above, tile);
                self.layers.wall.insert(pos, TileKind::WallLeft);
            }
            TileKind::WallTopRight => {
                self.layers.wall.insert(above, tile);
                self.layers.wall.insert(pos, TileKind::WallRight);
            }
            TileKind::WallTopCenter => {
                self.layers.wall.insert(above, tile);
                self.layers.wall_top.insert(pos, TileKind::WallCenterCenter);
            }
            TileKind::WallBottomLeft => {
                self.layers.wall.insert(above, tile);
                self.layers.wall_top.insert(pos, TileKind::WallCenterLeft);
            }
            TileKind::WallBottomRight => {
                self.layers.wall.insert(above, tile);
                self.layers.wall_top.insert(pos, TileKind::WallCenterRight);
            }
            _ => {
                self.layers.wall.insert(above, tile);
                self.layers.wall_top.insert(pos, TileKind::WallCenter);
            }
        }
    }

    /// Detect the three T-junction patterns and overwrite with a T
    /// tile plus its directional companion.
    fn place_exception(&mut self, x: i32, y: i32) {
        let p = self.pattern(x, y);
        if matches(p, EXCEPTION_MASK_T1, EXCEPTION_MATCH_T1)
            || matches(p, EXCEPTION_MASK_T2, EXCEPTION_MATCH_T2)
            || matches(p, EXCEPTION_MASK_T3, EXCEPTION_MATCH_T3)
        {
            self.layers.wall.insert((x, y + 1), TileKind::WallT);
            self.layers.wall.insert((x, y), TileKind::WallRight);
        }
    }

    /// Wall tiles of the roof subset sitting over true void belong in
    /// the wall-top layer, not the wall layer.
    fn reclassify_wall(&mut self, x: i32, y: i32) {
        let pos = (x, y);
        let Some(&tile) = self.layers.wall.get(&pos) else {
            return;
        };
        let roof = matches!(
            tile,
            TileKind::WallTop
                | TileKind::WallBottomRight
                | TileKind::WallBottomLeft
                | TileKind::WallTopCenter
        );
        if roof && self.grid.get(x, y) == Cell::Empty {
            self.layers.wall.remove(&pos);
            self.layers.wall_top.insert(pos, tile);
        }
    }

    fn place_shadow(&mut self, x: i32, y: i32) {
        let pos = (x, y);
        if self.layers.wall.contains_key(&pos) || self.layers.wall_top.contains_key(&pos) {
            return;
        }

        let p = self.shadow_pattern(x, y);
        let tile = if matches(p, SHADOW_MASK, SHADOW_MID_MATCH) {
            Some(TileKind::ShadowRight)
        } else if matches(p, SHADOW_MASK, SHADOW_TOP_MATCH) {
            Some(TileKind::ShadowRightTop)
        } else if matches(p, SHADOW_MASK, SHADOW_BOTTOM_MATCH) {
            Some(TileKind::ShadowRightBottom)
        } else {
            None
        };

        if let Some(tile) = tile {
            self.layers.shadow.insert(pos, tile);
        }
    }

    /// Wall-top center pieces get a cliff face one and two cells
    /// below, but only over true voids (no wall, roof or floor tile).
    fn place_cliff(&mut self, x: i32, y: i32) {
        let top = self.layers.wall_top.get(&(x, y));
        if !matches!(
            top,
            Some(TileKind::WallCenterLeft | TileKind::WallCenterRight | TileKind::WallCenter)
        ) {
            return;
        }

        for (drop, tile) in [(1, TileKind::Cliff0), (2, TileKind::Cliff1)] {
            let below = (x, y - drop);
            if !self.layers.wall.contains_key(&below)
                && !self.layers.wall_top.contains_key(&below)
                && !self.layers.floor.contains_key(&below)
            {
                self.layers.cliff.insert(below, tile);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell;

    /// Grid from an ascii sketch: '#' is MainRoom, '.' Empty, 'h'
    /// Hallway. Row 0 of the sketch is the highest y.
    fn grid_from(rows: &[&str]) -> Grid {
        let height = rows.len();
        let width = rows[0].len();
        let mut cells = vec![Cell::Empty; width * height];
        for (r, row) in rows.iter().enumerate() {
            let y = height - 1 - r;
            for (x, ch) in row.chars().enumerate() {
                cells[y * width + x] = match ch {
                    '#' => Cell::MainRoom,
                    'h' => Cell::Hallway,
                    _ => Cell::Empty,
                };
            }
        }
        Grid::from_cells(0, 0, width, height, cells)
    }

    #[test]
    fn floors_under_open_cells() {
        let grid = grid_from(&[
            ".....",
            ".###.",
            ".#h#.",
            ".###.",
            ".....",
        ]);
        let layers = resolve(&grid);
        assert_eq!(layers.floor.len(), 9);
        assert_eq!(layers.floor.get(&(2, 2)), Some(&TileKind::Floor));
    }

    #[test]
    fn top_wall_above_room() {
        // 3-wide room band: the cell above the middle column sees only
        // its DOWN neighbor occupied.
        let grid = grid_from(&[
            ".....",
            ".....",
            ".###.",
            ".###.",
            ".###.",
        ]);
        let layers = resolve(&grid);
        // (2, 3) is Empty with the room below: a WallTop composite,
        // reclassified to the wall-top layer because (2, 4) above and
        // the cell itself are void.
        assert_eq!(layers.wall_top.get(&(2, 4)), Some(&TileKind::WallTop));
        assert_eq!(layers.wall_top.get(&(2, 3)), Some(&TileKind::WallCenter));
    }

    #[test]
    fn surrounded_cell_is_top_center_not_corner() {
        // A hole with all 8 neighbors occupied: the surrounded
        // exception must win over every directional corner rule.
        let grid = grid_from(&[
            "#####",
            "#####",
            "##.##",
            "#####",
            "#####",
        ]);
        let mut tiler = AutoTiler::new(&grid);
        assert_eq!(
            tiler.determine_wall_tile(2, 2),
            Some(TileKind::WallTopCenter)
        );
    }

    #[test]
    fn side_walls_flank_the_room() {
        let grid = grid_from(&[
            ".....",
            ".###.",
            ".###.",
            ".###.",
            ".....",
        ]);
        let layers = resolve(&grid);
        // Left of the room: only the RIGHT neighbor is occupied.
        assert_eq!(layers.wall.get(&(0, 2)), Some(&TileKind::WallLeft));
        // Right of the room: only the LEFT neighbor is occupied.
        assert_eq!(layers.wall.get(&(4, 2)), Some(&TileKind::WallRight));
    }

    #[test]
    fn bottom_wall_composite_writes_roof_piece() {
        let grid = grid_from(&[
            ".###.",
            ".###.",
            ".###.",
            ".....",
            ".....",
        ]);
        let layers = resolve(&grid);
        // (2, 1) is Empty with the room above: WallBottom goes one up
        // (over the floor row), WallCenter marks the roof cell.
        assert_eq!(layers.wall.get(&(2, 2)), Some(&TileKind::WallBottom));
        assert_eq!(layers.wall_top.get(&(2, 1)), Some(&TileKind::WallCenter));
    }

    #[test]
    fn cliffs_only_over_voids() {
        let grid = grid_from(&[
            ".###.",
            ".###.",
            ".###.",
            ".....",
            ".....",
        ]);
        let layers = resolve(&grid);
        // The roof piece at (2, 1) drops cliff faces into the void.
        assert_eq!(layers.wall_top.get(&(2, 1)), Some(&TileKind::WallCenter));
        assert_eq!(layers.cliff.get(&(2, 0)), Some(&TileKind::Cliff0));
        // No cliff where a floor tile sits.
        assert!(!layers.cliff.contains_key(&(2, 2)));
    }

    #[test]
    fn shadows_hug_the_right_wall_column() {
        // Two cells of margin so the column left of the wall has no
        // tile of its own.
        let grid = grid_from(&[
            ".......",
            ".......",
            "..###..",
            "..###..",
            "..###..",
            ".......",
            ".......",
        ]);
        let layers = resolve(&grid);
        // (0, 3) sees wall tiles at (1, 2..=4): the full shadow band.
        assert_eq!(layers.shadow.get(&(0, 3)), Some(&TileKind::ShadowRight));
        for (pos, tile) in &layers.shadow {
            assert!(
                matches!(
                    tile,
                    TileKind::ShadowRight
                        | TileKind::ShadowRightTop
                        | TileKind::ShadowRightBottom
                ),
                "unexpected {tile} at {pos:?}"
            );
        }
    }

    #[test]
    fn blocking_is_union_of_wall_layers() {
        let grid = grid_from(&[
            ".....",
            ".###.",
            ".###.",
            ".###.",
            ".....",
        ]);
        let layers = resolve(&grid);
        for pos in layers.wall.keys() {
            assert!(layers.blocking.contains_key(pos));
        }
        for pos in layers.wall_top.keys() {
            assert!(layers.blocking.contains_key(pos));
        }
        assert_eq!(
            layers.blocking.len(),
            layers
                .wall
                .keys()
                .chain(layers.wall_top.keys())
                .collect::<hashbrown::HashSet<_>>()
                .len()
        );
    }

    #[test]
    fn matching_is_deterministic() {
        let grid = grid_from(&[
            "..##.",
            ".###.",
            ".#h#.",
            ".##..",
            ".....",
        ]);
        let a = resolve(&grid);
        let b = resolve(&grid);
        assert_eq!(a, b);
    }

    #[test]
    fn untiled_cells_are_left_empty() {
        // A lone far-away Empty corner matches no rule: no tile, no
        // panic.
        let grid = grid_from(&[
            "#....",
            ".....",
            ".....",
            ".....",
            "....#",
        ]);
        let layers = resolve(&grid);
        assert!(!layers.wall.contains_key(&(2, 2)));
        assert!(!layers.wall_top.contains_key(&(2, 2)));
    }
}

//! Typed grid synthesis: rasterize, frame, smooth, normalize
//!
//! The grid covers the union bounding box of all rooms (selected or
//! not). During construction cells carry transient states; `finish`
//! collapses everything to the three terminal states Empty, MainRoom
//! and Hallway.

use strum::Display;

use crate::errors::GenerationError;
use crate::geometry::Vertex;
use crate::room::RoomDesc;

/// Grid cell state.
///
/// `Unassigned`, `Room`, `TmpHallway` and `CellularMark` exist only
/// while the grid is being built; a normalized [`Grid`] contains only
/// `Empty`, `MainRoom` and `Hallway`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Cell {
    /// No owner yet (construction): becomes `Empty`.
    #[default]
    Unassigned,
    /// Footprint of the room with this index.
    Room(usize),
    /// Carved corridor cell awaiting normalization.
    TmpHallway,
    /// Smoothing mark, committed to `TmpHallway` at end of pass.
    CellularMark,
    /// Terminal: nothing here.
    Empty,
    /// Terminal: interior of an active room.
    MainRoom,
    /// Terminal: corridor.
    Hallway,
}

impl Cell {
    /// True for the walkable terminal states.
    pub fn is_open(&self) -> bool {
        matches!(self, Cell::MainRoom | Cell::Hallway)
    }
}

/// Finished, normalized grid plus its world-space origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    min_x: i32,
    min_y: i32,
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Build a grid straight from normalized cells (row-major, y then x).
    #[cfg(test)]
    pub(crate) fn from_cells(
        min_x: i32,
        min_y: i32,
        width: usize,
        height: usize,
        cells: Vec<Cell>,
    ) -> Grid {
        assert_eq!(cells.len(), width * height);
        Grid {
            min_x,
            min_y,
            width,
            height,
            cells,
        }
    }

    /// Cell at grid-local coordinates; off-grid positions are Empty.
    pub fn get(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return Cell::Empty;
        }
        self.cells[y as usize * self.width + x as usize]
    }

    /// World-space offset of the grid's (0, 0) corner.
    pub fn origin(&self) -> (i32, i32) {
        (self.min_x, self.min_y)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Count of cells in a given state.
    pub fn count(&self, state: Cell) -> usize {
        self.cells.iter().filter(|&&c| c == state).count()
    }
}

/// Mutable grid under construction, with the room table and per-room
/// activity flags (selected rooms start active; carving may activate
/// others).
#[derive(Debug, Clone)]
pub struct GridBuilder {
    rooms: Vec<RoomDesc>,
    active: Vec<bool>,
    min_x: i32,
    min_y: i32,
    max_x: i32,
    max_y: i32,
    cells: Vec<Cell>,
}

impl GridBuilder {
    /// Size the grid to the union bounding box of all rooms (extended
    /// by each room's full size as margin) and stamp every room's
    /// footprint with its index.
    pub fn new(rooms: &[RoomDesc]) -> Result<Self, GenerationError> {
        if rooms.is_empty() {
            return Err(GenerationError::NoRooms);
        }

        let mut min_x = i32::MAX;
        let mut min_y = i32::MAX;
        let mut max_x = i32::MIN;
        let mut max_y = i32::MIN;
        for room in rooms {
            let c = room.center_cell();
            min_x = min_x.min(c.x - room.size.0);
            min_y = min_y.min(c.y - room.size.1);
            max_x = max_x.max(c.x + room.size.0);
            max_y = max_y.max(c.y + room.size.1);
        }

        let width = (max_x - min_x) as usize;
        let height = (max_y - min_y) as usize;

        let mut builder = Self {
            rooms: rooms.to_vec(),
            active: rooms.iter().map(|r| r.selected).collect(),
            min_x,
            min_y,
            max_x,
            max_y,
            cells: vec![Cell::Unassigned; width * height],
        };

        for (i, room) in rooms.iter().enumerate() {
            let c = room.center_cell();
            let (w, h) = room.size;
            for dx in -(w / 2)..(w - w / 2) {
                for dy in -(h / 2)..(h - h / 2) {
                    builder.set_world(c.x + dx, c.y + dy, Cell::Room(i));
                }
            }
        }

        Ok(builder)
    }

    pub fn width(&self) -> usize {
        (self.max_x - self.min_x) as usize
    }

    pub fn height(&self) -> usize {
        (self.max_y - self.min_y) as usize
    }

    /// Grid center in world coordinates, the L-corridor quadrant pivot.
    pub(crate) fn center_world(&self) -> (i32, i32) {
        (
            self.min_x + self.width() as i32 / 2,
            self.min_y + self.height() as i32 / 2,
        )
    }

    pub(crate) fn in_bounds_world(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }

    pub(crate) fn cell_world(&self, x: i32, y: i32) -> Cell {
        if !self.in_bounds_world(x, y) {
            return Cell::Unassigned;
        }
        let w = self.width();
        self.cells[(y - self.min_y) as usize * w + (x - self.min_x) as usize]
    }

    pub(crate) fn set_world(&mut self, x: i32, y: i32, cell: Cell) {
        if !self.in_bounds_world(x, y) {
            return;
        }
        let w = self.width();
        self.cells[(y - self.min_y) as usize * w + (x - self.min_x) as usize] = cell;
    }

    pub(crate) fn is_active(&self, room: usize) -> bool {
        self.active[room]
    }

    pub(crate) fn room_size(&self, room: usize) -> (i32, i32) {
        self.rooms[room].size
    }

    /// Room index occupying the grid cell at `v`. A spanning-tree
    /// endpoint must land inside its room; anything else is an
    /// inconsistency error.
    pub(crate) fn room_id_at(&self, v: Vertex) -> Result<usize, GenerationError> {
        match self.cell_world(v.x, v.y) {
            Cell::Room(i) => Ok(i),
            _ => Err(GenerationError::InconsistentTopology { x: v.x, y: v.y }),
        }
    }

    /// Carve one corridor centerline cell at world position (x, y):
    /// claim unassigned cells and re-activate inactive rooms touched
    /// by the corridor. Active room interiors are left alone.
    pub(crate) fn carve_cell(&mut self, x: i32, y: i32) {
        match self.cell_world(x, y) {
            Cell::Unassigned => self.set_world(x, y, Cell::TmpHallway),
            Cell::Room(i) if !self.active[i] => self.active[i] = true,
            _ => {}
        }
    }

    /// Width expansion: dilate a carved centerline cell by its 3x3
    /// neighborhood. Cells of inactive rooms are overwritten rather
    /// than re-activated; finalized room interiors are never touched.
    pub(crate) fn widen_cell(&mut self, x: i32, y: i32) {
        for dx in -1..=1 {
            for dy in -1..=1 {
                let (px, py) = (x + dx, y + dy);
                if !self.in_bounds_world(px, py) {
                    continue;
                }
                match self.cell_world(px, py) {
                    Cell::TmpHallway => {}
                    Cell::Unassigned => self.set_world(px, py, Cell::TmpHallway),
                    Cell::Room(i) if !self.active[i] => self.set_world(px, py, Cell::TmpHallway),
                    _ => {}
                }
            }
        }
    }

    /// Clear the border of each selected room's occupied bounding
    /// rectangle so the autotiler can paint walls along it.
    pub fn frame_main_rooms(&mut self) {
        let width = self.width() as i32;
        let height = self.height() as i32;

        for id in 0..self.rooms.len() {
            if !self.rooms[id].selected {
                continue;
            }

            let mut min_ix = i32::MAX;
            let mut min_iy = i32::MAX;
            let mut max_ix = i32::MIN;
            let mut max_iy = i32::MIN;
            for y in 0..height {
                for x in 0..width {
                    if self.cells[(y * width + x) as usize] == Cell::Room(id) {
                        min_ix = min_ix.min(x);
                        max_ix = max_ix.max(x);
                        min_iy = min_iy.min(y);
                        max_iy = max_iy.max(y);
                    }
                }
            }
            if min_ix > max_ix {
                // Fully overwritten by a later room's footprint.
                continue;
            }

            for y in min_iy..=max_iy {
                for x in min_ix..=max_ix {
                    if x == min_ix || x == max_ix || y == min_iy || y == max_iy {
                        self.cells[(y * width + x) as usize] = Cell::Unassigned;
                    }
                }
            }
        }
    }

    /// One two-phase cellular-automata pass: mark every non-open cell
    /// whose 3x3 neighborhood holds at least `threshold` occupied
    /// cells, then commit all marks. Marking first keeps the result
    /// independent of scan order; threshold 9 can never trigger.
    pub fn smooth(&mut self, threshold: u32) {
        let width = self.width() as i32;
        let height = self.height() as i32;

        for x in 0..width {
            for y in 0..height {
                let cell = self.cells[(y * width + x) as usize];
                let eligible = match cell {
                    Cell::Unassigned => true,
                    Cell::Room(i) => !self.active[i],
                    _ => false,
                };
                if !eligible {
                    continue;
                }

                let mut occupied = 0u32;
                for dx in -1..=1 {
                    for dy in -1..=1 {
                        let (cx, cy) = (x + dx, y + dy);
                        if cx < 0 || cx >= width || cy < 0 || cy >= height {
                            continue;
                        }
                        match self.cells[(cy * width + cx) as usize] {
                            Cell::TmpHallway => occupied += 1,
                            Cell::Room(i) if self.active[i] => occupied += 1,
                            _ => {}
                        }
                    }
                }

                if occupied >= threshold {
                    self.cells[(y * width + x) as usize] = Cell::CellularMark;
                }
            }
        }

        for cell in &mut self.cells {
            if *cell == Cell::CellularMark {
                *cell = Cell::TmpHallway;
            }
        }
    }

    /// Collapse all transient states to the terminal three. Idempotent.
    pub fn normalize(&mut self) {
        for cell in &mut self.cells {
            *cell = match *cell {
                Cell::Unassigned => Cell::Empty,
                Cell::Room(i) => {
                    if self.active[i] {
                        Cell::MainRoom
                    } else {
                        Cell::Empty
                    }
                }
                Cell::TmpHallway | Cell::CellularMark => Cell::Hallway,
                terminal => terminal,
            };
        }
    }

    /// Normalize and freeze into the final grid.
    pub fn finish(mut self) -> Grid {
        self.normalize();
        Grid {
            min_x: self.min_x,
            min_y: self.min_y,
            width: self.width(),
            height: self.height(),
            cells: self.cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(id: usize, x: f32, y: f32, w: i32, h: i32, selected: bool) -> RoomDesc {
        RoomDesc {
            id,
            pos: (x, y),
            size: (w, h),
            selected,
        }
    }

    #[test]
    fn empty_room_list_rejected() {
        assert!(matches!(
            GridBuilder::new(&[]),
            Err(GenerationError::NoRooms)
        ));
    }

    #[test]
    fn rasterize_stamps_room_ids() {
        let rooms = [room(0, 0.0, 0.0, 4, 4, true)];
        let b = GridBuilder::new(&rooms).unwrap();
        // Footprint spans [-2, 2) on both axes.
        assert_eq!(b.cell_world(-2, -2), Cell::Room(0));
        assert_eq!(b.cell_world(1, 1), Cell::Room(0));
        assert_eq!(b.cell_world(2, 2), Cell::Unassigned);
        assert_eq!(b.cell_world(-3, 0), Cell::Unassigned);
    }

    #[test]
    fn framing_clears_border_keeps_interior() {
        let rooms = [room(0, 0.0, 0.0, 6, 6, true)];
        let mut b = GridBuilder::new(&rooms).unwrap();
        b.frame_main_rooms();

        // Border of the footprint [-3, 3) is cleared.
        assert_eq!(b.cell_world(-3, 0), Cell::Unassigned);
        assert_eq!(b.cell_world(2, 2), Cell::Unassigned);
        assert_eq!(b.cell_world(0, -3), Cell::Unassigned);
        // Interior survives.
        assert_eq!(b.cell_world(0, 0), Cell::Room(0));
        assert_eq!(b.cell_world(-2, -2), Cell::Room(0));
    }

    #[test]
    fn unselected_rooms_normalize_to_empty() {
        let rooms = [
            room(0, 0.0, 0.0, 4, 4, true),
            room(1, 20.0, 0.0, 4, 4, false),
        ];
        let grid = GridBuilder::new(&rooms).unwrap().finish();
        let (ox, oy) = grid.origin();
        assert_eq!(grid.get(-ox, -oy), Cell::MainRoom);
        assert_eq!(grid.get(20 - ox, -oy), Cell::Empty);
    }

    #[test]
    fn carving_reactivates_room() {
        let rooms = [
            room(0, 0.0, 0.0, 4, 4, true),
            room(1, 20.0, 0.0, 4, 4, false),
        ];
        let mut b = GridBuilder::new(&rooms).unwrap();
        b.carve_cell(20, 0);
        assert!(b.is_active(1));
        let grid = b.finish();
        let (ox, oy) = grid.origin();
        assert_eq!(grid.get(20 - ox, -oy), Cell::MainRoom);
    }

    #[test]
    fn widen_does_not_touch_active_rooms() {
        let rooms = [room(0, 0.0, 0.0, 4, 4, true)];
        let mut b = GridBuilder::new(&rooms).unwrap();
        b.widen_cell(-3, 0);
        // Dilation claims free cells but not the room footprint.
        assert_eq!(b.cell_world(-4, 0), Cell::TmpHallway);
        assert_eq!(b.cell_world(-2, 0), Cell::Room(0));
    }

    #[test]
    fn normalize_is_idempotent() {
        let rooms = [
            room(0, 0.0, 0.0, 6, 6, true),
            room(1, 14.0, 2.0, 4, 4, false),
        ];
        let mut b = GridBuilder::new(&rooms).unwrap();
        b.frame_main_rooms();
        b.carve_cell(5, 0);
        b.smooth(5);

        b.normalize();
        let once = b.cells.clone();
        b.normalize();
        assert_eq!(once, b.cells);
    }

    #[test]
    fn smooth_commits_marks_in_two_phases() {
        // A ring of hallway around one free cell: 8 occupied neighbors.
        let rooms = [
            room(0, 0.0, 0.0, 4, 4, true),
            room(1, 20.0, 0.0, 4, 4, false),
        ];
        let mut b = GridBuilder::new(&rooms).unwrap();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if dx != 0 || dy != 0 {
                    b.set_world(10 + dx, dy, Cell::TmpHallway);
                }
            }
        }
        b.smooth(8);
        assert_eq!(b.cell_world(10, 0), Cell::TmpHallway);
    }

    #[test]
    fn smooth_is_monotonic_across_reruns() {
        let rooms = [
            room(0, 0.0, 0.0, 6, 6, true),
            room(1, 5.0, 5.0, 4, 4, true),
        ];
        let mut b = GridBuilder::new(&rooms).unwrap();
        b.smooth(3);
        let after_first: Vec<Cell> = b.cells.clone();
        b.smooth(3);
        // Re-running may only add filled cells, never remove them.
        for (before, after) in after_first.iter().zip(&b.cells) {
            if *before == Cell::TmpHallway {
                assert_eq!(*after, Cell::TmpHallway);
            }
        }
    }

    #[test]
    fn max_smooth_level_disables_smoothing() {
        let rooms = [room(0, 0.0, 0.0, 6, 6, true)];
        let mut b = GridBuilder::new(&rooms).unwrap();
        let before = b.cells.clone();
        b.smooth(9);
        assert_eq!(before, b.cells);
    }
}

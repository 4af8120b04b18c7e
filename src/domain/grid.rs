use super::Cell;
use rand::Rng;
use rayon::prelude::*;
use std::mem;

/// Grid manages the 2D cellular automaton state as a pair of same-shape
/// buffers: `cells` holds the current generation, `scratch` receives the
/// next one. A step writes every cell of `scratch` from `cells` and then
/// swaps the two by role, so a generation is only ever computed from
/// fully pre-step values.
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    scratch: Vec<Cell>,
}

impl Grid {
    /// Create a new grid with all cells initially dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Dead; width * height],
            scratch: vec![Cell::Dead; width * height],
        }
    }

    /// Get grid dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Convert 2D coordinates to 1D index
    const fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get current-generation cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[self.index(x, y)])
    }

    /// Set cell at position (pattern placement)
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    /// Count live cells among the 8 neighbors of (x, y). Positions
    /// outside the grid are dead; edges do not wrap.
    pub fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        live_neighbors_in(&self.cells, self.width, self.height, x, y)
    }

    /// Advance one generation: evaluate every cell of the current buffer
    /// into the scratch buffer (rows in parallel), then swap the buffers
    /// by role. No allocation per step.
    pub fn step(&mut self) {
        let width = self.width;
        let height = self.height;
        let cells: &[Cell] = &self.cells;

        self.scratch
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, slot) in row.iter_mut().enumerate() {
                    let neighbors = live_neighbors_in(cells, width, height, x, y);
                    *slot = cells[y * width + x].evolve(neighbors);
                }
            });

        mem::swap(&mut self.cells, &mut self.scratch);
    }

    /// Randomize the current generation; each cell is independently
    /// alive with probability `density`.
    pub fn randomize(&mut self, rng: &mut impl Rng, density: f64) {
        for cell in &mut self.cells {
            *cell = if rng.random_bool(density) {
                Cell::Alive
            } else {
                Cell::Dead
            };
        }
    }

    /// Immutable copy of the current generation, safe to hand across a
    /// thread boundary while this grid keeps stepping.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            width: self.width,
            height: self.height,
            cells: self.cells.clone(),
        }
    }
}

fn live_neighbors_in(cells: &[Cell], width: usize, height: usize, x: usize, y: usize) -> u8 {
    (-1isize..=1)
        .flat_map(|dy| (-1isize..=1).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
        .filter_map(|(dx, dy)| {
            let nx = x as isize + dx;
            let ny = y as isize + dy;
            (nx >= 0 && ny >= 0 && (nx as usize) < width && (ny as usize) < height)
                .then(|| cells[ny as usize * width + nx as usize])
        })
        .filter(|cell| cell.is_alive())
        .count() as u8
}

/// Read-only view of one generation's liveness.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Snapshot {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Snapshot {
    /// Get snapshot dimensions
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Get cell at position (with bounds checking)
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    /// Iterate over all cells with their positions
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .map(|(x, y)| (x, y, self.cells[y * self.width + x]))
    }
}

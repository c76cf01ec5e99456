use core::cmp::Reverse;
use std::collections::BinaryHeap;

use mate_core::Vec3;

use crate::{NavPath, Navigator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
struct Cell {
    x: i32,
    z: i32,
}

/// Step costs in tenths of a cell: orthogonal 10, diagonal 14.
const STRAIGHT_COST: u32 = 10;
const DIAGONAL_COST: u32 = 14;

/// Neighbor offsets `(dx, dz)` in a fixed order so equal-cost searches are deterministic.
const OFFSETS: [(i32, i32); 8] = [
    (0, -1),
    (1, 0),
    (0, 1),
    (-1, 0),
    (1, -1),
    (1, 1),
    (-1, 1),
    (-1, -1),
];

/// Uniform walkability grid on the XZ plane, searched with 8-connected A*.
///
/// A diagonal step is only taken when both orthogonal cells it passes between are free, so
/// paths never cut the corner of a blocked cell.
///
/// Cell `(0, 0)` starts at `origin`; heights are ignored and path points keep the start's
/// elevation (the goal keeps its own).
#[derive(Debug, Clone)]
pub struct NavGrid {
    width: i32,
    depth: i32,
    cell_size: f32,
    origin: Vec3,
    blocked: Vec<bool>,
}

impl NavGrid {
    pub fn new(width: u32, depth: u32, cell_size: f32) -> Self {
        Self::with_origin(width, depth, cell_size, Vec3::ZERO)
    }

    pub fn with_origin(width: u32, depth: u32, cell_size: f32, origin: Vec3) -> Self {
        let width = width.max(1) as i32;
        let depth = depth.max(1) as i32;
        let cell_size = if cell_size > 0.0 { cell_size } else { 1.0 };
        Self {
            width,
            depth,
            cell_size,
            origin,
            blocked: vec![false; (width * depth) as usize],
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    pub fn set_blocked(&mut self, x: i32, z: i32, blocked: bool) {
        if let Some(idx) = self.idx(Cell { x, z }) {
            self.blocked[idx] = blocked;
        }
    }

    /// Block or unblock the cell containing a world point.
    pub fn set_blocked_at(&mut self, point: Vec3, blocked: bool) {
        if let Some(cell) = self.world_to_cell(point) {
            self.set_blocked(cell.x, cell.z, blocked);
        }
    }

    pub fn is_blocked(&self, x: i32, z: i32) -> bool {
        self.idx(Cell { x, z })
            .map(|idx| self.blocked[idx])
            .unwrap_or(true)
    }

    fn in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.z >= 0 && cell.x < self.width && cell.z < self.depth
    }

    fn idx(&self, cell: Cell) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        Some((cell.z * self.width + cell.x) as usize)
    }

    fn world_to_cell(&self, p: Vec3) -> Option<Cell> {
        let x = ((p.x - self.origin.x) / self.cell_size).floor() as i32;
        let z = ((p.z - self.origin.z) / self.cell_size).floor() as i32;
        let cell = Cell { x, z };
        if self.in_bounds(cell) {
            Some(cell)
        } else {
            None
        }
    }

    fn cell_center(&self, cell: Cell, y: f32) -> Vec3 {
        Vec3::new(
            self.origin.x + (cell.x as f32 + 0.5) * self.cell_size,
            y,
            self.origin.z + (cell.z as f32 + 0.5) * self.cell_size,
        )
    }

    /// Octile distance in step-cost units.
    fn heuristic(a: Cell, b: Cell) -> u32 {
        let dx = (a.x - b.x).unsigned_abs();
        let dz = (a.z - b.z).unsigned_abs();
        STRAIGHT_COST * dx.max(dz) + (DIAGONAL_COST - STRAIGHT_COST) * dx.min(dz)
    }

    fn is_free(&self, cell: Cell) -> bool {
        self.idx(cell).is_some_and(|idx| !self.blocked[idx])
    }

    /// Walkable cells reachable in one step from `cell`, with the step cost.
    fn successors(&self, cell: Cell) -> impl Iterator<Item = (Cell, u32)> + '_ {
        OFFSETS.iter().filter_map(move |&(dx, dz)| {
            let next = Cell {
                x: cell.x + dx,
                z: cell.z + dz,
            };
            if !self.is_free(next) {
                return None;
            }
            if dx != 0 && dz != 0 {
                let side_a = Cell { x: cell.x + dx, z: cell.z };
                let side_b = Cell { x: cell.x, z: cell.z + dz };
                if !self.is_free(side_a) || !self.is_free(side_b) {
                    return None;
                }
                return Some((next, DIAGONAL_COST));
            }
            Some((next, STRAIGHT_COST))
        })
    }

    fn cell_from_idx(&self, idx: usize) -> Cell {
        let idx = idx as i32;
        Cell {
            x: idx % self.width,
            z: idx / self.width,
        }
    }

    fn a_star(&self, start: Cell, goal: Cell) -> Option<Vec<Cell>> {
        if !self.is_free(start) || !self.is_free(goal) {
            return None;
        }
        let start_idx = self.idx(start)?;
        let goal_idx = self.idx(goal)?;

        let len = self.blocked.len();
        let mut cost = vec![u32::MAX; len];
        let mut parent: Vec<Option<usize>> = vec![None; len];
        let mut closed = vec![false; len];
        // Min-heap on (estimated total, insertion order, cell index).
        let mut frontier = BinaryHeap::new();
        let mut order: u64 = 0;

        cost[start_idx] = 0;
        frontier.push(Reverse((Self::heuristic(start, goal), order, start_idx)));

        while let Some(Reverse((_, _, idx))) = frontier.pop() {
            if closed[idx] {
                continue;
            }
            if idx == goal_idx {
                return Some(self.trace_back(&parent, goal_idx));
            }
            closed[idx] = true;

            let cell = self.cell_from_idx(idx);
            for (next, step) in self.successors(cell) {
                let Some(next_idx) = self.idx(next) else {
                    continue;
                };
                let candidate = cost[idx].saturating_add(step);
                if closed[next_idx] || candidate >= cost[next_idx] {
                    continue;
                }
                cost[next_idx] = candidate;
                parent[next_idx] = Some(idx);
                order += 1;
                frontier.push(Reverse((
                    candidate.saturating_add(Self::heuristic(next, goal)),
                    order,
                    next_idx,
                )));
            }
        }

        None
    }

    fn trace_back(&self, parent: &[Option<usize>], goal_idx: usize) -> Vec<Cell> {
        let mut cells: Vec<Cell> =
            std::iter::successors(Some(goal_idx), |&idx| parent[idx])
                .map(|idx| self.cell_from_idx(idx))
                .collect();
        cells.reverse();
        cells
    }
}

impl Navigator for NavGrid {
    fn find_path(&self, start: Vec3, goal: Vec3) -> Option<NavPath> {
        let start_cell = self.world_to_cell(start)?;
        let goal_cell = self.world_to_cell(goal)?;
        let cells = self.a_star(start_cell, goal_cell)?;

        // Exact endpoints, cell centers in between.
        let inner_len = cells.len().saturating_sub(2);
        let mut points = Vec::with_capacity(inner_len + 2);
        points.push(start);
        for cell in cells.into_iter().skip(1).take(inner_len) {
            points.push(self.cell_center(cell, start.y));
        }
        points.push(goal);
        Some(NavPath::new(points))
    }

    fn is_walkable(&self, point: Vec3) -> bool {
        self.world_to_cell(point)
            .and_then(|cell| self.idx(cell))
            .is_some_and(|idx| !self.blocked[idx])
    }
}

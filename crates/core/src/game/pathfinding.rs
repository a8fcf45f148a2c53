//! Unweighted breadth-first shortest paths over the static grid.
//! This module exists so route computation stays separate from session
//! control flow. It does not own movement validation or phase rules.

use std::collections::VecDeque;

use crate::grid::Grid;
use crate::types::Cell;

/// Shortest path from `start` to `goal`, inclusive of both endpoints.
///
/// Neighbors are visited in the fixed order up, right, down, left, so ties
/// between equally short paths resolve the same way on every call. Returns
/// `[start]` when `start == goal` and also when the goal is unreachable;
/// callers treat a length-1 result with `start != goal` as "no movement
/// possible". The grid is never mutated; the visited and parent working
/// sets are allocated per call.
pub fn shortest_path(grid: &Grid, start: Cell, goal: Cell) -> Vec<Cell> {
    if start == goal {
        return vec![start];
    }
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return vec![start];
    }

    let width = grid.width();
    let cell_count = width * grid.height();
    let mut visited = vec![false; cell_count];
    let mut parents: Vec<Option<Cell>> = vec![None; cell_count];
    let mut queue = VecDeque::new();

    visited[index(width, start)] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == goal {
            return reconstruct(&parents, width, start, goal);
        }

        for neighbor in neighbors(current) {
            // is_walkable answers false out of bounds, so no separate check.
            if !grid.is_walkable(neighbor) {
                continue;
            }
            let slot = index(width, neighbor);
            if visited[slot] {
                continue;
            }
            visited[slot] = true;
            parents[slot] = Some(current);
            queue.push_back(neighbor);
        }
    }

    vec![start]
}

fn reconstruct(parents: &[Option<Cell>], width: usize, start: Cell, goal: Cell) -> Vec<Cell> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        let Some(previous) = parents[index(width, current)] else {
            return vec![start];
        };
        current = previous;
        path.push(current);
    }
    path.reverse();
    path
}

fn neighbors(cell: Cell) -> [Cell; 4] {
    [
        Cell::new(cell.x, cell.y - 1),
        Cell::new(cell.x + 1, cell.y),
        Cell::new(cell.x, cell.y + 1),
        Cell::new(cell.x - 1, cell.y),
    ]
}

fn index(width: usize, cell: Cell) -> usize {
    (cell.y as usize) * width + (cell.x as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::reference_grid;

    fn open_room(width: usize, height: usize) -> Grid {
        let rows: Vec<Vec<u8>> = (0..height)
            .map(|y| {
                (0..width)
                    .map(|x| u8::from(x == 0 || y == 0 || x == width - 1 || y == height - 1))
                    .collect()
            })
            .collect();
        Grid::from_rows(&rows)
    }

    /// Independent distance reference: plain BFS counting hops, no paths.
    fn bfs_distance(grid: &Grid, start: Cell, goal: Cell) -> Option<usize> {
        let width = grid.width();
        let mut distances = vec![None; width * grid.height()];
        let mut queue = VecDeque::new();
        distances[index(width, start)] = Some(0usize);
        queue.push_back(start);
        while let Some(current) = queue.pop_front() {
            let current_distance =
                distances[index(width, current)].expect("queued cells carry a distance");
            if current == goal {
                return Some(current_distance);
            }
            for neighbor in neighbors(current) {
                if grid.is_walkable(neighbor) && distances[index(width, neighbor)].is_none() {
                    distances[index(width, neighbor)] = Some(current_distance + 1);
                    queue.push_back(neighbor);
                }
            }
        }
        None
    }

    #[test]
    fn straight_corridor_path_is_inclusive_of_endpoints() {
        let grid = open_room(7, 3);
        let path = shortest_path(&grid, Cell::new(1, 1), Cell::new(5, 1));
        assert_eq!(
            path,
            vec![Cell::new(1, 1), Cell::new(2, 1), Cell::new(3, 1), Cell::new(4, 1), Cell::new(5, 1)]
        );
    }

    #[test]
    fn start_equals_goal_returns_single_cell() {
        let grid = open_room(5, 5);
        assert_eq!(shortest_path(&grid, Cell::new(2, 2), Cell::new(2, 2)), vec![Cell::new(2, 2)]);
    }

    #[test]
    fn unreachable_goal_returns_only_start() {
        // Goal boxed in by walls.
        let grid = Grid::from_rows(&[
            [1u8, 1, 1, 1, 1, 1],
            [1, 0, 0, 1, 0, 1],
            [1, 0, 0, 1, 1, 1],
            [1, 1, 1, 1, 1, 1],
        ]);
        let start = Cell::new(1, 1);
        assert_eq!(shortest_path(&grid, start, Cell::new(4, 1)), vec![start]);
    }

    #[test]
    fn wall_goal_returns_only_start() {
        let grid = open_room(5, 5);
        let start = Cell::new(1, 1);
        assert_eq!(shortest_path(&grid, start, Cell::new(0, 0)), vec![start]);
    }

    #[test]
    fn tie_break_prefers_up_before_right() {
        // Two equally short L-paths around nothing: fixed neighbor order must
        // pick the one that leaves upward first.
        let grid = open_room(5, 5);
        let path = shortest_path(&grid, Cell::new(1, 2), Cell::new(2, 1));
        assert_eq!(path[1], Cell::new(1, 1));
    }

    #[test]
    fn path_lengths_match_reference_distances_on_the_fixed_maze() {
        let grid = reference_grid();
        let pairs = [
            (Cell::new(1, 1), Cell::new(13, 9)),
            (Cell::new(1, 1), Cell::new(7, 5)),
            (Cell::new(13, 1), Cell::new(1, 9)),
            (Cell::new(7, 5), Cell::new(13, 9)),
            (Cell::new(1, 9), Cell::new(13, 1)),
        ];
        for (start, goal) in pairs {
            let expected = bfs_distance(&grid, start, goal).expect("maze is fully connected");
            let path = shortest_path(&grid, start, goal);
            assert_eq!(path.len() - 1, expected, "distance mismatch for {start:?} -> {goal:?}");
            assert_eq!(path[0], start);
            assert_eq!(*path.last().expect("non-empty"), goal);
        }
    }

    #[test]
    fn every_path_step_is_adjacent_and_walkable() {
        let grid = reference_grid();
        let path = shortest_path(&grid, Cell::new(13, 9), Cell::new(1, 1));
        for window in path.windows(2) {
            let dx = (window[1].x - window[0].x).abs();
            let dy = (window[1].y - window[0].y).abs();
            assert_eq!(dx + dy, 1, "steps must be 4-directional");
            assert!(grid.is_walkable(window[1]));
        }
    }
}

//! Breadth-first shortest paths over the ghost-passable grid
//!
//! Ghost movement itself is greedy and never calls this; it is a reachability
//! service for callers that want whole routes.

use std::collections::VecDeque;

use glam::IVec2;

use super::maze::Maze;
use super::movement::Direction;

/// Shortest route from `start` to `target` as a list of steps.
///
/// - `Some(vec![])` when `start` is impassable or already equals `target`
/// - `None` when no route exists
///
/// Neighbours are expanded Up, Left, Down, Right, so among equal-length routes
/// the one found first in that order wins.
pub fn find_path(maze: &Maze, start: IVec2, target: IVec2) -> Option<Vec<Direction>> {
    if !maze.is_passable_for_ghost(start.x, start.y) || start == target {
        return Some(Vec::new());
    }

    let width = maze.width();
    let index = |t: IVec2| (t.y * width + t.x) as usize;
    let cells = (width * maze.height()) as usize;

    // Step that first reached each cell, for path reconstruction
    let mut came_by: Vec<Option<Direction>> = vec![None; cells];
    let mut visited = vec![false; cells];
    visited[index(start)] = true;

    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        for dir in Direction::PRIORITY {
            let next = maze.neighbor(current, dir);
            if !maze.is_passable_for_ghost(next.x, next.y) || visited[index(next)] {
                continue;
            }
            visited[index(next)] = true;
            came_by[index(next)] = Some(dir);

            if next == target {
                return Some(reconstruct(maze, &came_by, start, target));
            }
            queue.push_back(next);
        }
    }

    None
}

/// Walk the arrival steps back from `target` to `start`
fn reconstruct(
    maze: &Maze,
    came_by: &[Option<Direction>],
    start: IVec2,
    target: IVec2,
) -> Vec<Direction> {
    let width = maze.width();
    let mut path = Vec::new();
    let mut cell = target;
    while cell != start {
        let Some(dir) = came_by[(cell.y * width + cell.x) as usize] else {
            break;
        };
        path.push(dir);
        cell = maze.neighbor(cell, dir.reverse());
    }
    path.reverse();
    path
}

//! Path carving: six top-to-bottom walks that build the room DAG.

use std::cmp::Ordering;

use crate::rng::GameRng;

use super::node::Exit;
use super::{Map, BOSS_COLUMN, COLUMN_COUNT, COLUMN_MAX, PATH_DENSITY, ROW_COUNT};

pub(super) fn create_paths(map: &mut Map, rng: &mut GameRng) {
    let first_start_col = rng.random_range(0, COLUMN_MAX as i32);
    carve_path(map, rng, first_start_col);
    for path in 1..PATH_DENSITY {
        let mut start_col = rng.random_range(0, COLUMN_MAX as i32);
        // Only the second path refuses to share the first path's start.
        while start_col == first_start_col && path == 1 {
            start_col = rng.random_range(0, COLUMN_MAX as i32);
        }
        carve_path(map, rng, start_col);
    }
}

fn carve_path(map: &mut Map, rng: &mut GameRng, start_col: i32) {
    let mut col = start_col as usize;
    for row in 0..ROW_COUNT - 1 {
        let next_col = choose_next_col(map, rng, col as i32, row as i32) as usize;
        map.node_mut(col, row).add_exit(Exit::toward(col, next_col));
        map.node_mut(next_col, row + 1).add_entrance_col(col);
        col = next_col;
    }
    map.node_mut(col, ROW_COUNT - 1).add_exit(Exit::toward(col, BOSS_COLUMN));
}

fn choose_next_col(map: &Map, rng: &mut GameRng, cur_col: i32, cur_row: i32) -> i32 {
    let (min, max) = if cur_col == 0 {
        (0, 1)
    } else if cur_col == COLUMN_MAX as i32 {
        (-1, 0)
    } else {
        (-1, 1)
    };
    let candidate = cur_col + rng.random_range(min, max);
    let candidate = reroll_shared_ancestry(map, rng, cur_col, cur_row, candidate);
    clamp_between_neighbors(map, cur_col, cur_row, candidate)
}

/// Re-randomizes the candidate destination once per already-recorded parent
/// that shares an ancestor with the current column, so two paths leaving one
/// node cannot reconverge two rows later.
///
/// The parent list walked here is the first candidate's, captured before any
/// reroll moves the destination.
fn reroll_shared_ancestry(
    map: &Map,
    rng: &mut GameRng,
    cur_col: i32,
    cur_row: i32,
    candidate: i32,
) -> i32 {
    let entrances: Vec<usize> =
        map.node(candidate as usize, cur_row as usize + 1).entrance_cols().to_vec();

    let mut next_col = candidate;
    for &parent_col in &entrances {
        if parent_col as i32 == cur_col {
            continue;
        }
        if common_ancestor(map, parent_col as i32, cur_col, cur_row).is_none() {
            continue;
        }
        next_col = match next_col.cmp(&cur_col) {
            Ordering::Greater => {
                let rerolled = cur_col + rng.random_range(-1, 0);
                if rerolled < 0 {
                    cur_col
                } else {
                    rerolled
                }
            }
            Ordering::Equal => {
                let rerolled = cur_col + rng.random_range(-1, 1);
                if rerolled > COLUMN_MAX as i32 {
                    cur_col - 1
                } else if rerolled < 0 {
                    cur_col + 1
                } else {
                    rerolled
                }
            }
            Ordering::Less => {
                let rerolled = cur_col + rng.random_range(0, 1);
                if rerolled > COLUMN_MAX as i32 {
                    cur_col
                } else {
                    rerolled
                }
            }
        };
    }
    next_col
}

/// Shared ancestor of two row-`row` columns, defined as the rightmost parent
/// of the left one when it is also the leftmost parent of the right one.
///
/// Which input counts as "left" is decided by comparing the first column
/// against the row index, not against the other column; the mispairings
/// this produces are part of the generated layout.
fn common_ancestor(map: &Map, a_col: i32, b_col: i32, row: i32) -> Option<usize> {
    if row < 0 {
        return None;
    }
    let (left_col, right_col) = if a_col < row { (a_col, b_col) } else { (b_col, a_col) };
    let left_max = map.node(left_col as usize, row as usize).rightmost_entrance_col()?;
    let right_min = map.node(right_col as usize, row as usize).leftmost_entrance_col()?;
    (left_max == right_min).then_some(left_max)
}

/// Pulls the candidate back between the neighbors' already-carved edges so
/// two adjacent paths never cross.
fn clamp_between_neighbors(map: &Map, cur_col: i32, cur_row: i32, candidate: i32) -> i32 {
    let mut next_col = candidate;
    if cur_col > 0 {
        if let Some(rightmost) = map.node(cur_col as usize - 1, cur_row as usize).rightmost_exit_col()
        {
            if rightmost as i32 > next_col {
                next_col = rightmost as i32;
            }
        }
    }
    if cur_col < COLUMN_MAX as i32 {
        if let Some(leftmost) = map.node(cur_col as usize + 1, cur_row as usize).leftmost_exit_col()
        {
            if (leftmost as i32) < next_col {
                next_col = leftmost as i32;
            }
        }
    }
    next_col
}

/// Drops duplicate row-0 destinations: scanning columns left to right and
/// each node's edges right to left, an edge into a column already reached
/// from this row is removed along with its parent record.
pub(super) fn filter_redundant_first_row_edges(map: &mut Map) {
    let mut visited = [false; COLUMN_COUNT];
    for src_col in 0..COLUMN_COUNT {
        let exit_cols: Vec<usize> = map.node(src_col, 0).exit_cols().collect();
        for &dest_col in exit_cols.iter().rev() {
            if visited[dest_col] {
                map.node_mut(dest_col, 1).remove_entrance_col(src_col);
                map.node_mut(src_col, 0).remove_exit(Exit::toward(src_col, dest_col));
            } else {
                visited[dest_col] = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_ancestor_requires_matching_extreme_parents() {
        let mut map = Map::empty();
        map.node_mut(2, 3).add_entrance_col(1);
        map.node_mut(2, 3).add_entrance_col(2);
        map.node_mut(3, 3).add_entrance_col(2);
        map.node_mut(3, 3).add_entrance_col(4);
        assert_eq!(common_ancestor(&map, 2, 3, 3), Some(2));

        map.node_mut(3, 3).remove_entrance_col(2);
        assert_eq!(common_ancestor(&map, 2, 3, 3), None);
    }

    #[test]
    fn common_ancestor_is_none_without_parents() {
        let mut map = Map::empty();
        map.node_mut(1, 2).add_entrance_col(1);
        assert_eq!(common_ancestor(&map, 1, 2, 2), None);
        assert_eq!(common_ancestor(&map, 0, 1, -1), None);
    }

    #[test]
    fn ancestor_ordering_keys_off_the_row_index() {
        let mut map = Map::empty();
        // Both inputs sit at or above the row index, so the second input is
        // treated as the left node even though its column is larger.
        map.node_mut(5, 2).add_entrance_col(3);
        map.node_mut(5, 2).add_entrance_col(4);
        map.node_mut(4, 2).add_entrance_col(4);
        map.node_mut(4, 2).add_entrance_col(6);
        assert_eq!(common_ancestor(&map, 4, 5, 2), Some(4));
    }

    #[test]
    fn neighbor_clamp_prevents_crossing_edges() {
        let mut map = Map::empty();
        // Left neighbor of column 3 already goes right, into column 3.
        map.node_mut(2, 5).add_exit(Exit::Right);
        assert_eq!(clamp_between_neighbors(&map, 3, 5, 2), 3);

        // Right neighbor already goes left, into column 3.
        let mut map = Map::empty();
        map.node_mut(4, 5).add_exit(Exit::Left);
        assert_eq!(clamp_between_neighbors(&map, 3, 5, 4), 3);

        // No neighboring edges: the candidate stands.
        let map = Map::empty();
        assert_eq!(clamp_between_neighbors(&map, 3, 5, 4), 4);
    }

    #[test]
    fn first_row_filter_keeps_one_edge_per_destination() {
        let mut map = Map::empty();
        map.node_mut(1, 0).add_exit(Exit::Straight);
        map.node_mut(1, 1).add_entrance_col(1);
        map.node_mut(2, 0).add_exit(Exit::Left);
        map.node_mut(1, 1).add_entrance_col(2);
        map.node_mut(2, 0).add_exit(Exit::Right);
        map.node_mut(3, 1).add_entrance_col(2);

        filter_redundant_first_row_edges(&mut map);

        assert_eq!(map.node(1, 0).exit_cols().collect::<Vec<_>>(), vec![1]);
        assert_eq!(map.node(2, 0).exit_cols().collect::<Vec<_>>(), vec![3]);
        assert_eq!(map.node(1, 1).entrance_cols(), &[1]);
        assert_eq!(map.node(3, 1).entrance_cols(), &[2]);
    }
}

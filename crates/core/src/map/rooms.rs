//! Room-quota construction and mask-checked room assignment.

use crate::act;
use crate::rng::GameRng;

use super::node::{Node, Room};
use super::{Map, COLUMN_COUNT, ROW_COUNT};

const MONSTER_ROW: usize = 0;
const TREASURE_ROW: usize = 8;
const PRE_TREASURE_ROW: usize = TREASURE_ROW - 1;
const REST_ROW: usize = ROW_COUNT - 1;
const PENULTIMATE_ROW: usize = ROW_COUNT - 2;

/// Per-room-tag bit columns: one byte per grid column, one bit per room.
const ROOM_MASKS: [u64; 7] = [
    0x0101_0101_0101_0101,
    0x0202_0202_0202_0202,
    0x0404_0404_0404_0404,
    0x0808_0808_0808_0808,
    0x1010_1010_1010_1010,
    0x2020_2020_2020_2020,
    0x4040_4040_4040_4040,
];

/// The pool only ever holds the five room types with tags below this.
const TRIED_ROOM_TYPES: usize = 5;

struct RoomCounts {
    total: f32,
    unassigned: usize,
}

pub(super) fn assign_rooms(map: &mut Map, rng: &mut GameRng, ascension: i32) {
    let counts = tally_rooms_and_assign_fixed(map);
    let mut pool = fill_room_pool(&counts, act::elite_room_chance(ascension));
    rng.shuffle(&mut pool);

    let mut stream = RoomStream::new(pool);
    for row in 0..ROW_COUNT - 1 {
        assign_row(map, &mut stream, row);
    }
}

/// Stamps the fixed rows and tallies the rest.
///
/// The penultimate row counts toward the pool length but not toward the
/// quota total, and the quota total is carried as a float.
fn tally_rooms_and_assign_fixed(map: &mut Map) -> RoomCounts {
    let mut counts = RoomCounts { total: 0.0, unassigned: 0 };
    for row in 0..ROW_COUNT {
        for col in 0..COLUMN_COUNT {
            let node = map.node_mut(col, row);
            if node.edge_count() == 0 {
                continue;
            }
            match row {
                MONSTER_ROW => {
                    node.set_room(Room::Monster);
                    counts.total += 1.0;
                }
                TREASURE_ROW => {
                    node.set_room(Room::Treasure);
                    counts.total += 1.0;
                }
                REST_ROW => {
                    node.set_room(Room::Rest);
                    counts.total += 1.0;
                }
                PENULTIMATE_ROW => counts.unassigned += 1,
                _ => {
                    counts.total += 1.0;
                    counts.unassigned += 1;
                }
            }
        }
    }
    counts
}

/// Builds the unshuffled pool: each optional room type in quota order, then
/// monsters padding the pool out to the unassigned-node count.
fn fill_room_pool(counts: &RoomCounts, elite_chance: f32) -> Vec<Room> {
    let quota = |chance: f32| (counts.total * chance).round() as usize;
    let mut pool = Vec::with_capacity(counts.unassigned);
    for (room, chance) in [
        (Room::Shop, act::SHOP_ROOM_CHANCE),
        (Room::Rest, act::REST_ROOM_CHANCE),
        (Room::Treasure, act::TREASURE_ROOM_CHANCE),
        (Room::Elite, elite_chance),
        (Room::Event, act::EVENT_ROOM_CHANCE),
    ] {
        pool.extend(std::iter::repeat(room).take(quota(chance)));
    }
    pool.resize(counts.unassigned, Room::Monster);
    pool
}

fn assign_row(map: &mut Map, stream: &mut RoomStream, row: usize) {
    for col in 0..COLUMN_COUNT {
        let node = map.node_mut(col, row);
        if node.edge_count() == 0 {
            continue;
        }
        match row {
            // Fixed rows: nothing to assign, only masks for the row above.
            MONSTER_ROW | TREASURE_ROW => stream.propagate_masks(node),
            // Rows feeding a fixed row: assign, record, no masks upward.
            PRE_TREASURE_ROW | PENULTIMATE_ROW => {
                stream.assign_room(node);
                stream.record_node_room(node);
            }
            _ => {
                stream.assign_room(node);
                stream.propagate_masks(node);
            }
        }
    }
    stream.next_row();
}

/// Sliding assignment state: the shuffled pool with a consumed-head offset,
/// plus per-row bitmaps of placed rooms and sibling/parent column sets.
struct RoomStream {
    pool: Vec<Room>,
    offset: usize,
    row_data: u64,
    prev_row_data: u64,
    sibling_masks: [u64; COLUMN_COUNT],
    next_sibling_masks: [u64; COLUMN_COUNT],
    parent_masks: [u64; COLUMN_COUNT],
    next_parent_masks: [u64; COLUMN_COUNT],
}

impl RoomStream {
    fn new(pool: Vec<Room>) -> Self {
        Self {
            pool,
            offset: 0,
            row_data: 0,
            prev_row_data: 0,
            sibling_masks: [0; COLUMN_COUNT],
            next_sibling_masks: [0; COLUMN_COUNT],
            parent_masks: [0; COLUMN_COUNT],
            next_parent_masks: [0; COLUMN_COUNT],
        }
    }

    /// Walks the remaining pool, trying each room type at most once, and
    /// assigns the first acceptable room. A node nothing fits becomes a
    /// monster room without consuming from the pool or marking the row.
    fn assign_room(&mut self, node: &mut Node) {
        let mut tried = [false; TRIED_ROOM_TYPES];
        for index in self.offset..self.pool.len() {
            let room = self.pool[index];
            if tried[room as usize] {
                continue;
            }
            tried[room as usize] = true;

            let accepted = match room {
                Room::Elite if node.y <= 4 => continue,
                Room::Rest if node.y <= 4 || node.y >= 13 => continue,
                // Events and monsters only refuse to sit next to a sibling
                // of the same type; parent rooms are not consulted.
                Room::Event | Room::Monster => !self.sibling_has(node.x, room),
                _ => !self.parent_has(node.x, room) && !self.sibling_has(node.x, room),
            };
            if accepted {
                node.set_room(room);
                self.record_room(node.x, room);
                self.consume_pool_entry(index);
                return;
            }
        }
        node.set_room(Room::Monster);
    }

    fn sibling_has(&self, col: usize, room: Room) -> bool {
        self.row_data & self.sibling_masks[col] & ROOM_MASKS[room as usize] != 0
    }

    fn parent_has(&self, col: usize, room: Room) -> bool {
        self.prev_row_data & self.parent_masks[col] & ROOM_MASKS[room as usize] != 0
    }

    fn record_room(&mut self, col: usize, room: Room) {
        self.row_data |= 1 << (room as u32 + col as u32 * 8);
    }

    /// Records the node's final room in the row bitmap. Used on the rows
    /// below the fixed rows, where even a fallback monster is recorded.
    fn record_node_room(&mut self, node: &Node) {
        if let Some(room) = node.room() {
            self.record_room(node.x, room);
        }
    }

    /// Accumulates next-row masks from this node's edges. A node with a
    /// single edge contributes a parent column only; with more, each edge in
    /// ascending order also picks up the edges before it as siblings.
    fn propagate_masks(&mut self, node: &Node) {
        let parent_bits = 0xFF << (node.x as u32 * 8);
        if node.edge_count() == 1 {
            for col in node.exit_cols() {
                self.next_parent_masks[col] |= parent_bits;
            }
        } else {
            let mut sibling_mask = 0u64;
            for col in node.exit_cols() {
                sibling_mask |= 0xFF << (col as u32 * 8);
                self.next_sibling_masks[col] |= sibling_mask;
                self.next_parent_masks[col] |= parent_bits;
            }
        }
    }

    /// Removes the chosen pool entry by shifting the unconsumed head right
    /// one slot, preserving the order of everything still in the pool.
    fn consume_pool_entry(&mut self, index: usize) {
        self.pool.copy_within(self.offset..index, self.offset + 1);
        self.offset += 1;
    }

    fn next_row(&mut self) {
        self.prev_row_data = self.row_data;
        self.row_data = 0;
        self.sibling_masks = self.next_sibling_masks;
        self.next_sibling_masks = [0; COLUMN_COUNT];
        self.parent_masks = self.next_parent_masks;
        self.next_parent_masks = [0; COLUMN_COUNT];
    }
}

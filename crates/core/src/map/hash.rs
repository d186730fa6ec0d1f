//! Stable layout hashing for determinism checks.
//! Hashing lives apart from generation so comparison tooling does not pull
//! in any of the carving or assignment code paths.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::{Map, COLUMN_COUNT, ROW_COUNT};

impl Map {
    /// Hash of everything observable about the layout: exits, rooms, and
    /// the burning-elite tag.
    pub fn layout_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        for row in 0..ROW_COUNT {
            for col in 0..COLUMN_COUNT {
                let node = self.node(col, row);
                hasher.write_u8(node.exits().bits());
                hasher.write_u8(node.room().map_or(u8::MAX, |room| room as u8));
            }
        }
        match self.burning_elite() {
            Some(elite) => {
                hasher.write_u8(1);
                hasher.write_u8(elite.x as u8);
                hasher.write_u8(elite.y as u8);
                hasher.write_u8(elite.buff as u8);
            }
            None => hasher.write_u8(0),
        }
        hasher.finish()
    }
}

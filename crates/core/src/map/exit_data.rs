//! Bit-packed serialization of the map's exits.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::{Map, COLUMN_COUNT, ROW_COUNT};

impl Map {
    /// Per-node exit bits for every row below the top one.
    pub fn exit_bits(&self) -> [[u8; COLUMN_COUNT]; ROW_COUNT - 1] {
        let mut exits = [[0; COLUMN_COUNT]; ROW_COUNT - 1];
        for (row, row_exits) in exits.iter_mut().enumerate() {
            for (col, bits) in row_exits.iter_mut().enumerate() {
                *bits = self.node(col, row).exits().bits();
            }
        }
        exits
    }

    /// Base64 of the exit bits packed 21 three-bit values per big-endian
    /// 64-bit word; the final partial word stays low-order aligned.
    pub fn write_exit_data(&self) -> String {
        STANDARD.encode(
            self.exit_bits()
                .as_flattened()
                .chunks(21)
                .map(|chunk| chunk.iter().fold(0u64, |acc, &bits| (acc << 3) | u64::from(bits)))
                .flat_map(u64::to_be_bytes)
                .collect::<Vec<u8>>(),
        )
    }
}

//! Act seeding offsets and room-quota chances.

pub const SHOP_ROOM_CHANCE: f32 = 0.05;
pub const REST_ROOM_CHANCE: f32 = 0.12;
pub const TREASURE_ROOM_CHANCE: f32 = 0.0;
pub const EVENT_ROOM_CHANCE: f32 = 0.22;

const ELITE_ROOM_CHANCE: f32 = 0.08;
const ELITE_CHANCE_ASCENSION_SCALE: f32 = 1.6;

/// Offset added to the run seed to derive the act's map stream.
pub fn act_offset(act: i32) -> u64 {
    if act == 1 {
        1
    } else {
        (act * (100 * (act - 1))) as u64
    }
}

/// Elite quota chance; ascended runs carry a scaled-up chance.
pub fn elite_room_chance(ascension: i32) -> f32 {
    if ascension > 0 {
        ELITE_ROOM_CHANCE * ELITE_CHANCE_ASCENSION_SCALE
    } else {
        ELITE_ROOM_CHANCE
    }
}

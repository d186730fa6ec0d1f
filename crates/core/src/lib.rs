pub mod act;
pub mod map;
pub mod rng;
pub mod vectors;

pub use map::{
    BurningElite, Exit, Map, Node, Room, BOSS_COLUMN, COLUMN_COUNT, COLUMN_MAX, PATH_DENSITY,
    ROW_COUNT,
};
pub use rng::GameRng;

//! Act-map generation: a seeded 15x7 grid of candidate rooms carved into a
//! DAG that funnels into the boss.
//!
//! Everything here is a pure function of the inputs. One shared stream
//! drives carving, room assignment, and the burning-elite draws in a fixed
//! order; the map is immutable once built.

mod carve;
mod exit_data;
mod hash;
mod node;
mod render;
mod rooms;

pub use node::{Exit, Node, Room};

use crate::act;
use crate::rng::GameRng;

pub const ROW_COUNT: usize = 15;
pub const COLUMN_COUNT: usize = 7;
pub const COLUMN_MAX: usize = COLUMN_COUNT - 1;
pub const PATH_DENSITY: usize = 6;
pub const BOSS_COLUMN: usize = 3;

/// The elite node tagged as burning, with its rolled buff (0..=3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BurningElite {
    pub x: usize,
    pub y: usize,
    pub buff: i32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Map {
    nodes: [[Node; COLUMN_COUNT]; ROW_COUNT],
    burning_elite: Option<BurningElite>,
}

impl Map {
    pub(crate) fn empty() -> Self {
        let nodes = std::array::from_fn(|row| std::array::from_fn(|col| Node::at(col, row)));
        Self { nodes, burning_elite: None }
    }

    /// Generates the act map for a seed. Acts 1 through 3 only; the final
    /// act's constant map comes from [`Map::act4`].
    pub fn from_seed(seed: u64, ascension: i32, act: i32, set_burning: bool) -> Self {
        let mut rng = GameRng::named(seed.wrapping_add(act::act_offset(act)), "mapRng");
        let mut map = Self::empty();
        carve::create_paths(&mut map, &mut rng);
        carve::filter_redundant_first_row_edges(&mut map);
        rooms::assign_rooms(&mut map, &mut rng, ascension);
        if set_burning {
            // The coordinate draw comes before the buff draw.
            let (x, y) = pick_burning_elite(&map, &mut rng);
            let buff = rng.random_range(0, 3);
            map.burning_elite = Some(BurningElite { x, y, buff });
        }
        map
    }

    /// The final act's fixed climb: rest, shop, elite, boss stacked on the
    /// boss column. No randomness.
    pub fn act4() -> Self {
        let mut map = Self::empty();
        let rooms = [Room::Rest, Room::Shop, Room::Elite, Room::Boss];
        for (row, room) in rooms.into_iter().enumerate() {
            map.node_mut(BOSS_COLUMN, row).set_room(room);
        }
        for row in 0..rooms.len() - 1 {
            map.node_mut(BOSS_COLUMN, row).add_exit(Exit::Straight);
            map.node_mut(BOSS_COLUMN, row + 1).add_entrance_col(BOSS_COLUMN);
        }
        map
    }

    pub fn node(&self, x: usize, y: usize) -> &Node {
        &self.nodes[y][x]
    }

    pub(crate) fn node_mut(&mut self, x: usize, y: usize) -> &mut Node {
        &mut self.nodes[y][x]
    }

    pub fn burning_elite(&self) -> Option<&BurningElite> {
        self.burning_elite.as_ref()
    }
}

/// Picks the burning elite uniformly among the map's elite nodes, consuming
/// one draw. A map without elites puts the draw out of domain; the quota
/// keeps at least one elite in every reachable pool.
fn pick_burning_elite(map: &Map, rng: &mut GameRng) -> (usize, usize) {
    let mut elites = Vec::new();
    for row in 0..ROW_COUNT {
        for col in 0..COLUMN_COUNT {
            if map.node(col, row).room() == Some(Room::Elite) {
                elites.push((col, row));
            }
        }
    }
    let index = rng.random(elites.len() as i32 - 1);
    elites[index as usize]
}

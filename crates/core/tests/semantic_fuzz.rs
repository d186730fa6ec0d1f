use proptest::{
    arbitrary::any,
    test_runner::{Config as ProptestConfig, TestCaseError, TestRunner},
};
use spiremap_core::{Exit, Map, Room, BOSS_COLUMN, COLUMN_COUNT, COLUMN_MAX, ROW_COUNT};

fn check_map_invariants(seed: u64, ascension: i32, act: i32) -> Result<(), String> {
    let map = Map::from_seed(seed, ascension, act, false);

    // Edges stay within one column of their source; bottom-row edges aim at
    // the boss column.
    for row in 0..ROW_COUNT {
        for col in 0..COLUMN_COUNT {
            let node = map.node(col, row);
            if node.edge_count() == 0 {
                if node.room().is_some() {
                    return Err(format!("seed {seed}: unreached ({col}, {row}) has a room"));
                }
                continue;
            }
            if row == ROW_COUNT - 1 {
                if node.exits() != Exit::toward(col, BOSS_COLUMN) {
                    return Err(format!("seed {seed}: ({col}, {row}) does not exit to the boss"));
                }
                continue;
            }
            if col == 0 && node.exits().contains(Exit::Left) {
                return Err(format!("seed {seed}: column 0 exits left at row {row}"));
            }
            if col == COLUMN_MAX && node.exits().contains(Exit::Right) {
                return Err(format!("seed {seed}: column {COLUMN_MAX} exits right at row {row}"));
            }
        }
    }

    // First-row destinations are pairwise distinct.
    let mut seen = [false; COLUMN_COUNT];
    for col in 0..COLUMN_COUNT {
        for dest in map.node(col, 0).exit_cols() {
            if seen[dest] {
                return Err(format!("seed {seed}: duplicate first-row destination {dest}"));
            }
            seen[dest] = true;
        }
    }

    // Fixed rows and positional room restrictions.
    for row in 0..ROW_COUNT {
        for col in 0..COLUMN_COUNT {
            let node = map.node(col, row);
            if node.edge_count() == 0 {
                continue;
            }
            let Some(room) = node.room() else {
                return Err(format!("seed {seed}: reached ({col}, {row}) has no room"));
            };
            let violation = match row {
                0 => room != Room::Monster,
                8 => room != Room::Treasure,
                14 => room != Room::Rest,
                _ => match room {
                    Room::Elite => row <= 4,
                    Room::Rest => row <= 4 || row >= 13,
                    Room::Treasure | Room::Boss => true,
                    _ => false,
                },
            };
            if violation {
                return Err(format!("seed {seed}: {room:?} misplaced at ({col}, {row})"));
            }
        }
    }

    // Siblings assigned from the pool never share a room type. Children in
    // the fixed rows are exempt; fallback monsters make Monster exempt too.
    for row in (0..=6).chain(8..=12) {
        for col in 0..COLUMN_COUNT {
            let node = map.node(col, row);
            if node.edge_count() < 2 {
                continue;
            }
            let child_rooms: Vec<Room> =
                node.exit_cols().filter_map(|dest| map.node(dest, row + 1).room()).collect();
            for pool_room in [Room::Shop, Room::Rest, Room::Elite, Room::Event] {
                if child_rooms.iter().filter(|&&room| room == pool_room).count() > 1 {
                    return Err(format!(
                        "seed {seed}: siblings under ({col}, {row}) share {pool_room:?}"
                    ));
                }
            }
        }
    }

    if map.write_exit_data().len() != 56 {
        return Err(format!("seed {seed}: exit encoding length changed"));
    }

    Ok(())
}

#[test]
fn generated_maps_preserve_structural_invariants() {
    let mut runner = TestRunner::new(ProptestConfig::with_cases(64));
    let inputs = (any::<u64>(), any::<bool>(), 1..=3_i32);

    runner
        .run(&inputs, |(seed, ascended, act)| {
            let ascension = if ascended { 20 } else { 0 };
            check_map_invariants(seed, ascension, act).map_err(TestCaseError::fail)?;
            Ok(())
        })
        .expect("generated maps should preserve structural invariants");
}

use anyhow::Result;
use clap::Parser;
use rand_chacha::{
    rand_core::{RngCore, SeedableRng},
    ChaCha8Rng,
};
use spiremap_core::{Exit, Map, Room, BOSS_COLUMN, COLUMN_COUNT, COLUMN_MAX, ROW_COUNT};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    runs: u32,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Fuzzing {} generated maps from meta-seed {}...", args.runs, args.seed);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);

    for _ in 0..args.runs {
        let map_seed = rng.next_u64();
        let ascension = if rng.next_u64() & 1 == 0 { 0 } else { 20 };
        let act = (rng.next_u64() % 3 + 1) as i32;

        let map = Map::from_seed(map_seed, ascension, act, false);
        let regenerated = Map::from_seed(map_seed, ascension, act, false);
        assert_eq!(
            map.layout_hash(),
            regenerated.layout_hash(),
            "regeneration diverged on seed {map_seed}"
        );

        // Assert structural invariants
        let mut first_row_seen = [false; COLUMN_COUNT];
        for col in 0..COLUMN_COUNT {
            for dest in map.node(col, 0).exit_cols() {
                assert!(!first_row_seen[dest], "duplicate first-row destination on {map_seed}");
                first_row_seen[dest] = true;
            }
        }
        for row in 0..ROW_COUNT {
            for col in 0..COLUMN_COUNT {
                let node = map.node(col, row);
                if node.edge_count() == 0 {
                    continue;
                }
                if row == ROW_COUNT - 1 {
                    assert_eq!(
                        node.exits(),
                        Exit::toward(col, BOSS_COLUMN),
                        "bottom row must exit to the boss on {map_seed}"
                    );
                    assert_eq!(node.room(), Some(Room::Rest));
                } else {
                    assert!(
                        !(col == 0 && node.exits().contains(Exit::Left))
                            && !(col == COLUMN_MAX && node.exits().contains(Exit::Right)),
                        "edge leaves the grid on {map_seed}"
                    );
                    assert!(node.room().is_some(), "reached node without a room on {map_seed}");
                }
            }
        }
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}

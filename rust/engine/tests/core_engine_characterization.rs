// rust/engine/tests/core_engine_characterization.rs
#![forbid(unsafe_code)]

/**
 * Core engine characterization tests.
 *
 * Purpose:
 * - Lock in the observable behavior of the move kernel on small hand-built boards.
 * - Catch regressions in traversal order, merge-once semantics, win detection,
 *   terminal detection, spawning and input translation.
 *
 * How the tests work:
 * - Boards are built from row-major value literals (`0` = empty).
 * - Assertions compare whole rows/boards and outcome structs rather than isolated
 *   fields, and only go through the public API.
 */
mod common;

use common::{grid4, row4, signature, top_row};
use twenty48_engine::engine::{MAX_MERGE_VALUE, MergeSource, TileSpawner};
use twenty48_engine::{
    ConfigError, Direction, Engine, EngineConfig, Grid, MoveOutcome, Position, TileIds, apply_move,
    moves_available,
};

fn play(grid: &mut Grid, ids: &mut TileIds, d: Direction) -> MoveOutcome {
    apply_move(grid, d, ids, 2048)
}

// ---------------------------------------------------------------------------
// Move kernel
// ---------------------------------------------------------------------------

#[test]
fn pair_merges_toward_left_and_right_walls() {
    let (mut g, mut ids) = row4([2, 2, 0, 0]);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert_eq!(top_row(&g), vec![4, 0, 0, 0]);
    assert_eq!(
        r,
        MoveOutcome {
            moved: true,
            score: 4,
            won: false
        }
    );

    let (mut g, mut ids) = row4([2, 2, 0, 0]);
    let r = play(&mut g, &mut ids, Direction::Right);
    assert_eq!(top_row(&g), vec![0, 0, 0, 4]);
    assert!(r.moved);
    assert_eq!(r.score, 4);
}

#[test]
fn leftover_tile_slides_but_does_not_remerge() {
    let (mut g, mut ids) = row4([2, 0, 2, 2]);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert_eq!(top_row(&g), vec![4, 2, 0, 0]);
    assert_eq!(r.score, 4);
    assert!(r.moved);
}

#[test]
fn triple_merges_only_the_pair_nearest_the_wall() {
    let (mut g, mut ids) = row4([2, 2, 2, 0]);
    let r = play(&mut g, &mut ids, Direction::Right);
    assert_eq!(top_row(&g), vec![0, 0, 2, 4]);
    assert_eq!(r.score, 4);

    let (mut g, mut ids) = row4([2, 2, 2, 0]);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert_eq!(top_row(&g), vec![4, 2, 0, 0]);
    assert_eq!(r.score, 4);
}

#[test]
fn full_row_of_equal_tiles_forms_two_pairs() {
    let (mut g, mut ids) = row4([2, 2, 2, 2]);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert_eq!(top_row(&g), vec![4, 4, 0, 0]);
    assert_eq!(r.score, 8);

    let (mut g, mut ids) = row4([4, 4, 8, 8]);
    let r = play(&mut g, &mut ids, Direction::Right);
    assert_eq!(top_row(&g), vec![0, 0, 8, 16]);
    assert_eq!(r.score, 24);
}

#[test]
fn merged_tile_does_not_chain_into_equal_neighbour() {
    // 2+2 -> 4 must not then absorb the existing 4 in the same move.
    let (mut g, mut ids) = row4([4, 2, 2, 0]);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert_eq!(top_row(&g), vec![4, 4, 0, 0]);
    assert_eq!(r.score, 4);
}

#[test]
fn vertical_moves_use_rows_as_lines() {
    let (mut g, mut ids) = grid4([
        [2, 0, 0, 8],
        [2, 0, 0, 0],
        [0, 0, 0, 8],
        [4, 0, 0, 0],
    ]);
    let r = play(&mut g, &mut ids, Direction::Down);
    assert_eq!(
        g.values(),
        vec![
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![4, 0, 0, 0],
            vec![4, 0, 0, 16],
        ]
    );
    assert_eq!(r.score, 4 + 16);

    let r = play(&mut g, &mut ids, Direction::Up);
    assert_eq!(
        g.values(),
        vec![
            vec![8, 0, 0, 16],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]
    );
    assert_eq!(r.score, 8);
}

#[test]
fn blocked_move_reports_not_moved_and_leaves_grid_untouched() {
    let (mut g, mut ids) = grid4([
        [2, 4, 8, 0],
        [8, 16, 0, 0],
        [16, 0, 0, 0],
        [0, 0, 0, 0],
    ]);
    let before = signature(&g);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert_eq!(r, MoveOutcome::default());
    assert_eq!(signature(&g), before);

    let r = play(&mut g, &mut ids, Direction::Up);
    assert!(!r.moved);
    assert_eq!(signature(&g), before);
}

#[test]
fn single_slide_without_merge_counts_as_moved() {
    let (mut g, mut ids) = row4([0, 0, 0, 2]);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert_eq!(top_row(&g), vec![2, 0, 0, 0]);
    assert_eq!(
        r,
        MoveOutcome {
            moved: true,
            score: 0,
            won: false
        }
    );
}

#[test]
fn empty_grid_never_moves() {
    let mut ids = TileIds::new();
    let mut g = Grid::new(4);
    for d in Direction::ALL {
        assert!(!play(&mut g, &mut ids, d).moved);
    }
}

// ---------------------------------------------------------------------------
// Win detection
// ---------------------------------------------------------------------------

#[test]
fn merging_two_1024s_wins() {
    let (mut g, mut ids) = row4([1024, 1024, 0, 0]);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert!(r.won);
    assert_eq!(r.score, 2048);
    assert_eq!(top_row(&g), vec![2048, 0, 0, 0]);
}

#[test]
fn merges_below_and_above_the_win_value_do_not_win() {
    for v in [2u32, 512, 2048, 4096] {
        let (mut g, mut ids) = row4([v, v, 0, 0]);
        let r = play(&mut g, &mut ids, Direction::Left);
        assert!(r.moved);
        assert!(!r.won, "merging {v}s must not win");
    }
}

#[test]
fn engine_uses_configured_win_value() {
    let mut engine = Engine::new(EngineConfig {
        win_value: 64,
        ..EngineConfig::default()
    })
    .expect("valid config");
    let (mut g, _) = row4([32, 32, 0, 0]);
    engine.adopt(&g);
    let r = engine.apply_move(&mut g, Direction::Right);
    assert!(r.won);
}

// ---------------------------------------------------------------------------
// Tile identity and provenance
// ---------------------------------------------------------------------------

#[test]
fn merge_records_provenance_and_mints_a_fresh_id() {
    let (mut g, mut ids) = row4([2, 2, 0, 0]);
    let a = *g.cell_tile(Position::new(0, 0)).expect("tile a");
    let b = *g.cell_tile(Position::new(1, 0)).expect("tile b");

    play(&mut g, &mut ids, Direction::Left);

    let merged = *g.cell_tile(Position::new(0, 0)).expect("merged tile");
    assert_ne!(merged.id, a.id);
    assert_ne!(merged.id, b.id);
    assert_eq!(merged.value, 4);
    assert_eq!(
        merged.merged_from,
        Some([
            MergeSource {
                id: b.id,
                value: 2,
                previous_position: Position::new(1, 0),
            },
            MergeSource {
                id: a.id,
                value: 2,
                previous_position: Position::new(0, 0),
            },
        ])
    );

    // The next move clears provenance and records where the tile started.
    play(&mut g, &mut ids, Direction::Right);
    let moved = *g.cell_tile(Position::new(3, 0)).expect("moved tile");
    assert_eq!(moved.id, merged.id);
    assert_eq!(moved.merged_from, None);
    assert_eq!(moved.previous_position, Some(Position::new(0, 0)));
}

#[test]
fn sliding_keeps_tile_identity() {
    let (mut g, mut ids) = row4([0, 8, 0, 0]);
    let id = g.cell_tile(Position::new(1, 0)).expect("tile").id;
    play(&mut g, &mut ids, Direction::Down);
    let t = g.cell_tile(Position::new(1, 3)).expect("slid tile");
    assert_eq!(t.id, id);
    assert_eq!(t.previous_position, Some(Position::new(1, 0)));
    assert!(g.is_coherent());
}

#[test]
fn ids_are_never_reused_across_moves_and_spawns() {
    let mut engine = Engine::with_seed(7);
    let mut g = engine.setup();
    let mut seen = std::collections::HashSet::new();
    for t in g.tiles() {
        assert!(seen.insert(t.id));
    }
    for i in 0..200usize {
        let d = Direction::ALL[i % 4];
        if engine.apply_move(&mut g, d).moved {
            if let Some(t) = engine.add_random_tile(&mut g) {
                assert!(seen.insert(t.id), "spawned id {} reused", t.id);
            }
        }
        for t in g.tiles().filter(|t| t.merged_from.is_some()) {
            assert!(seen.insert(t.id), "merged id {} reused", t.id);
        }
        if !Engine::moves_available(&g) {
            break;
        }
    }
}

// ---------------------------------------------------------------------------
// Terminal detection
// ---------------------------------------------------------------------------

fn checkerboard() -> (Grid, TileIds) {
    grid4([
        [2, 4, 2, 4],
        [4, 2, 4, 2],
        [2, 4, 2, 4],
        [4, 2, 4, 2],
    ])
}

#[test]
fn full_grid_without_adjacent_pairs_is_terminal() {
    let (g, _) = checkerboard();
    assert!(!moves_available(&g));
    assert!(!g.has_empty_cell());
}

#[test]
fn one_empty_cell_or_one_adjacent_pair_reopens_the_grid() {
    let (mut g, _) = checkerboard();
    let t = *g.cell_tile(Position::new(2, 1)).expect("tile");
    g.remove_tile(&t);
    assert!(moves_available(&g));

    let (mut g, mut ids) = checkerboard();
    let mut twin = *g.cell_tile(Position::new(1, 0)).expect("tile");
    twin.value = 2;
    twin.id = ids.next_id();
    g.place_tile(twin);
    assert!(!g.has_empty_cell());
    assert!(moves_available(&g));
}

#[test]
fn terminal_grid_rejects_every_direction() {
    let (mut g, mut ids) = checkerboard();
    let before = signature(&g);
    for d in Direction::ALL {
        assert!(!play(&mut g, &mut ids, d).moved);
    }
    assert_eq!(signature(&g), before);
}

#[test]
fn tiles_at_the_u32_ceiling_never_merge() {
    let top = MAX_MERGE_VALUE * 2;

    let (mut g, mut ids) = row4([MAX_MERGE_VALUE, MAX_MERGE_VALUE, 0, 0]);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert_eq!(top_row(&g), vec![top, 0, 0, 0]);
    assert_eq!(r.score, u64::from(top));

    let (mut g, mut ids) = row4([top, top, 0, 0]);
    let r = play(&mut g, &mut ids, Direction::Left);
    assert_eq!(r, MoveOutcome::default());
    let r = play(&mut g, &mut ids, Direction::Right);
    assert!(r.moved);
    assert_eq!(r.score, 0);
    assert_eq!(top_row(&g), vec![0, 0, top, top]);
}

#[test]
fn full_grid_of_ceiling_pairs_is_terminal() {
    let top = MAX_MERGE_VALUE * 2;
    let (mut g, mut ids) = grid4([[top; 4], [top; 4], [top; 4], [top; 4]]);
    assert!(!moves_available(&g));
    for d in Direction::ALL {
        assert!(!play(&mut g, &mut ids, d).moved);
    }
}

// ---------------------------------------------------------------------------
// Grid primitives
// ---------------------------------------------------------------------------

#[test]
fn empty_cells_are_listed_row_major() {
    let mut ids = TileIds::new();
    let g = Grid::from_rows(&[[0u32, 2], [0, 0]], &mut ids);
    assert_eq!(
        g.empty_cells(),
        vec![Position::new(0, 0), Position::new(0, 1), Position::new(1, 1)]
    );
    assert!(g.has_empty_cell());
}

#[test]
fn out_of_bounds_queries_return_none() {
    let (g, _) = row4([2, 0, 0, 0]);
    for p in [
        Position::new(-1, 0),
        Position::new(0, -1),
        Position::new(4, 0),
        Position::new(0, 4),
    ] {
        assert!(!g.in_bounds(p));
        assert!(g.cell_tile(p).is_none());
    }
    assert!(g.in_bounds(Position::new(3, 3)));
    assert_eq!(g.cell_tile(Position::new(0, 0)).map(|t| t.value), Some(2));
}

#[test]
fn place_and_remove_keep_cells_coherent() {
    let (mut g, _) = row4([2, 4, 0, 0]);
    let t = *g.cell_tile(Position::new(1, 0)).expect("tile");
    assert_eq!(g.remove_tile(&t), Some(t));
    assert!(g.cell_tile(Position::new(1, 0)).is_none());
    assert_eq!(g.remove_tile(&t), None);

    g.place_tile(t);
    assert_eq!(g.cell_tile(Position::new(1, 0)), Some(&t));
    assert!(g.is_coherent());
    assert_eq!(g.tile_count(), 2);
    assert_eq!(g.value_sum(), 6);
    assert_eq!(g.max_value(), 4);
}

#[test]
fn random_empty_cell_is_none_on_full_grid() {
    let (g, _) = checkerboard();
    let mut rng = <rand::rngs::StdRng as rand::SeedableRng>::seed_from_u64(1);
    assert_eq!(g.random_empty_cell(&mut rng), None);
}

#[test]
fn render_ascii_shows_every_row() {
    let (g, _) = row4([2, 0, 0, 2048]);
    let s = g.render_ascii();
    assert_eq!(s.lines().count(), 4 + 2);
    assert!(s.contains("2048"));
}

// ---------------------------------------------------------------------------
// Engine facade: setup, spawn, simulate
// ---------------------------------------------------------------------------

#[test]
fn setup_spawns_two_small_tiles() {
    for seed in 0..32u64 {
        let mut engine = Engine::with_seed(seed);
        let g = engine.setup();
        assert_eq!(g.size(), 4);
        assert_eq!(g.tile_count(), 2);
        assert!(g.tiles().all(|t| t.value == 2 || t.value == 4));
        assert!(g.is_coherent());
    }
}

#[test]
fn same_seed_same_setup() {
    let a = Engine::with_seed(20260228).setup();
    let b = Engine::with_seed(20260228).setup();
    assert_eq!(a.values(), b.values());
}

#[test]
fn spawn_on_full_grid_is_a_silent_noop() {
    let mut engine = Engine::with_seed(3);
    let (mut g, _) = checkerboard();
    let before = signature(&g);
    assert!(engine.add_random_tile(&mut g).is_none());
    assert_eq!(signature(&g), before);
}

#[test]
fn spawn_fills_the_only_empty_cell() {
    let mut engine = Engine::with_seed(11);
    let (mut g, _) = checkerboard();
    let t = *g.cell_tile(Position::new(3, 3)).expect("tile");
    g.remove_tile(&t);
    engine.adopt(&g);
    let spawned = engine.add_random_tile(&mut g).expect("one empty cell");
    assert_eq!(spawned.position, Position::new(3, 3));
    assert!(spawned.value == 2 || spawned.value == 4);
    assert!(!g.has_empty_cell());
}

#[test]
fn spawn_values_are_roughly_nine_twos_to_one_four() {
    let mut spawner = TileSpawner::new(42, 0.1);
    let n = 100_000u32;
    let fours = (0..n).filter(|_| spawner.draw_value() == 4).count() as f64;
    let p = fours / n as f64;
    assert!((0.09..=0.11).contains(&p), "four frequency {p}");
}

#[test]
fn engine_spawns_follow_the_same_distribution() {
    let mut engine = Engine::with_seed(99);
    let mut fours = 0u32;
    let n = 20_000u32;
    for _ in 0..n {
        let mut g = Grid::new(4);
        let t = engine.add_random_tile(&mut g).expect("empty grid");
        match t.value {
            4 => fours += 1,
            2 => {}
            v => panic!("unexpected spawn value {v}"),
        }
    }
    let p = f64::from(fours) / f64::from(n);
    assert!((0.08..=0.12).contains(&p), "four frequency {p}");
}

#[test]
fn simulate_leaves_the_live_grid_alone() {
    let mut engine = Engine::with_seed(5);
    let (g, _) = row4([2, 2, 0, 4]);
    engine.adopt(&g);
    let before = signature(&g);
    let (after, r) = engine.simulate(&g, Direction::Left);
    assert_eq!(signature(&g), before);
    assert_eq!(after.values()[0], vec![4, 4, 0, 0]);
    assert_eq!(r.score, 4);
    // Everything already touches the top wall, so only Up is blocked.
    assert_eq!(
        engine.moving_directions(&g),
        vec![Direction::Right, Direction::Down, Direction::Left]
    );
}

#[test]
fn invalid_configs_are_rejected() {
    let bad = |f: fn(&mut EngineConfig)| {
        let mut c = EngineConfig::default();
        f(&mut c);
        Engine::new(c).err()
    };
    assert_eq!(bad(|c| c.size = 1), Some(ConfigError::Size(1)));
    assert_eq!(
        bad(|c| c.start_tiles = 17),
        Some(ConfigError::StartTiles {
            start_tiles: 17,
            size: 4
        })
    );
    assert_eq!(bad(|c| c.win_value = 1000), Some(ConfigError::WinValue(1000)));
    assert_eq!(bad(|c| c.win_value = 2), Some(ConfigError::WinValue(2)));
    assert_eq!(
        bad(|c| c.four_probability = 1.5),
        Some(ConfigError::FourProbability(1.5))
    );
    assert_eq!(
        bad(|c| c.four_probability = -0.1),
        Some(ConfigError::FourProbability(-0.1))
    );
    assert!(Engine::new(EngineConfig::default()).is_ok());
}

#[test]
fn boundary_four_probabilities_are_used_as_given() {
    for (p, expected) in [(0.0, 2), (1.0, 4)] {
        let mut engine = Engine::new(EngineConfig {
            four_probability: p,
            start_tiles: 16,
            ..EngineConfig::default()
        })
        .expect("valid config");
        let g = engine.setup();
        assert_eq!(g.tile_count(), 16);
        assert!(g.tiles().all(|t| t.value == expected), "p = {p}");
    }
}

#[test]
fn larger_boards_are_supported() {
    let mut engine = Engine::new(EngineConfig {
        size: 6,
        start_tiles: 3,
        ..EngineConfig::default()
    })
    .expect("valid config");
    let g = engine.setup();
    assert_eq!(g.size(), 6);
    assert_eq!(g.tile_count(), 3);
    assert_eq!(g.empty_cells().len(), 33);
}

// ---------------------------------------------------------------------------
// Input translation
// ---------------------------------------------------------------------------

#[test]
fn swipes_resolve_by_dominant_axis_then_sign() {
    assert_eq!(Direction::from_swipe(31.0, 0.0), Some(Direction::Right));
    assert_eq!(Direction::from_swipe(-40.0, 10.0), Some(Direction::Left));
    assert_eq!(Direction::from_swipe(10.0, -50.0), Some(Direction::Up));
    assert_eq!(Direction::from_swipe(0.0, 31.0), Some(Direction::Down));
    // Equal magnitudes resolve vertically.
    assert_eq!(Direction::from_swipe(40.0, 40.0), Some(Direction::Down));
    assert_eq!(Direction::from_swipe(-40.0, -40.0), Some(Direction::Up));
}

#[test]
fn short_or_garbage_swipes_are_ignored() {
    assert_eq!(Direction::from_swipe(30.0, 0.0), None);
    assert_eq!(Direction::from_swipe(-12.0, 29.9), None);
    assert_eq!(Direction::from_swipe(f64::NAN, 100.0), None);
}

#[test]
fn direction_symbols_parse_and_unknown_input_is_rejected() {
    assert_eq!("up".parse::<Direction>().ok(), Some(Direction::Up));
    assert_eq!(" W ".parse::<Direction>().ok(), Some(Direction::Up));
    assert_eq!("a".parse::<Direction>().ok(), Some(Direction::Left));
    assert_eq!("Right".parse::<Direction>().ok(), Some(Direction::Right));
    assert_eq!("s".parse::<Direction>().ok(), Some(Direction::Down));
    // `d` belongs to the w/a/s/d layout; Down has no one-letter initial.
    assert_eq!("d".parse::<Direction>().ok(), Some(Direction::Right));
    assert_eq!("D".parse::<Direction>().ok(), Some(Direction::Right));
    assert_eq!("u".parse::<Direction>().ok(), Some(Direction::Up));
    assert_eq!("r".parse::<Direction>().ok(), Some(Direction::Right));
    assert_eq!("l".parse::<Direction>().ok(), Some(Direction::Left));
    assert!("diagonal".parse::<Direction>().is_err());

    for d in Direction::ALL {
        assert_eq!(Direction::from_index(d.index()), Some(d));
        assert_eq!(d.to_string().parse::<Direction>().ok(), Some(d));
    }
    assert_eq!(Direction::from_index(4), None);
}

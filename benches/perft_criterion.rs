use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sable_chess::game_state::chess_rules::STARTING_POSITION_FEN;
use sable_chess::game_state::game_state::GameState;
use sable_chess::move_generation::perft::perft_legal;

#[derive(Clone, Copy)]
struct PerftCase {
    name: &'static str,
    fen: &'static str,
    nodes_by_depth: &'static [u64],
}

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
const ROOK_ENDGAME: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

const QUICK: &[PerftCase] = &[
    PerftCase {
        name: "initial",
        fen: STARTING_POSITION_FEN,
        nodes_by_depth: &[20, 400, 8902],
    },
    PerftCase {
        name: "kiwipete",
        fen: KIWIPETE,
        nodes_by_depth: &[48, 2039],
    },
    PerftCase {
        name: "rook_endgame",
        fen: ROOK_ENDGAME,
        nodes_by_depth: &[14, 191, 2812],
    },
];

const FULL: &[PerftCase] = &[
    PerftCase {
        name: "initial",
        fen: STARTING_POSITION_FEN,
        nodes_by_depth: &[20, 400, 8902, 197_281],
    },
    PerftCase {
        name: "kiwipete",
        fen: KIWIPETE,
        nodes_by_depth: &[48, 2039, 97_862],
    },
    PerftCase {
        name: "rook_endgame",
        fen: ROOK_ENDGAME,
        nodes_by_depth: &[14, 191, 2812, 43_238],
    },
    PerftCase {
        name: "promotions",
        fen: "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        nodes_by_depth: &[6, 264, 9467],
    },
    PerftCase {
        name: "discovered_checks",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        nodes_by_depth: &[44, 1486, 62_379],
    },
];

/// `SABLE_BENCH_SUITE=full` selects the deeper table.
fn suite() -> (&'static str, &'static [PerftCase]) {
    match std::env::var("SABLE_BENCH_SUITE") {
        Ok(value) if value.eq_ignore_ascii_case("full") => ("full", FULL),
        _ => ("quick", QUICK),
    }
}

fn bench_perft(c: &mut Criterion) {
    let (suite_name, cases) = suite();

    let mut group = c.benchmark_group(format!("perft_{suite_name}"));
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(20);

    for case in cases {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");

        for (idx, expected) in case.nodes_by_depth.iter().enumerate() {
            let depth = (idx + 1) as u8;

            // A wrong count makes the timing meaningless.
            let check = perft_legal(&game, depth).expect("perft should run");
            assert_eq!(
                check.nodes as u64, *expected,
                "{} depth {depth} node count",
                case.name
            );

            group.throughput(Throughput::Elements(*expected));
            group.bench_with_input(
                BenchmarkId::new(case.name, format!("d{depth}")),
                &game,
                |b, game| {
                    b.iter(|| {
                        let counts = perft_legal(black_box(game), black_box(depth))
                            .expect("perft should run");
                        black_box(counts.nodes)
                    });
                },
            );
        }
    }

    group.finish();
}

criterion_group!(perft_benches, bench_perft);
criterion_main!(perft_benches);

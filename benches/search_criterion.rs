use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chessplainer_core::game_state::chess_rules::STARTING_POSITION_FEN;
use chessplainer_core::game_state::game_state::GameState;
use chessplainer_core::search::search_config::SearchConfig;
use chessplainer_core::search::search_engine::SearchEngine;

#[derive(Clone, Copy)]
struct PerfCase {
    name: &'static str,
    fen: &'static str,
}

const CASES: &[PerfCase] = &[
    PerfCase {
        name: "open_startpos",
        fen: STARTING_POSITION_FEN,
    },
    PerfCase {
        name: "mid_kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    },
    PerfCase {
        name: "end_kpk",
        fen: "8/8/8/8/8/4k3/4P3/4K3 w - - 0 1",
    },
];

fn bench_search(c: &mut Criterion) {
    let depth = std::env::var("CHESSPLAINER_SEARCH_DEPTH")
        .ok()
        .and_then(|v| v.parse::<u8>().ok())
        .unwrap_or(3)
        .max(1);
    let threads = std::env::var("CHESSPLAINER_SEARCH_THREADS")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(1)
        .max(1);

    let mut group = c.benchmark_group("search");
    group.warm_up_time(Duration::from_secs(1));
    group.measurement_time(Duration::from_secs(4));
    group.sample_size(10);

    let engine: SearchEngine = SearchEngine::default();
    let config = SearchConfig::new(depth, 3)
        .expect("benchmark config should be valid")
        .with_threads(threads);

    for case in CASES {
        let game = GameState::from_fen(case.fen).expect("benchmark FEN should parse");
        group.bench_with_input(
            BenchmarkId::new(case.name, format!("d{depth}_t{threads}")),
            &game,
            |b, game| {
                b.iter(|| {
                    let mut game = game.clone();
                    let result = engine
                        .search(black_box(&mut game), black_box(&config))
                        .expect("search should run");
                    black_box(result.nodes)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(search_benches, bench_search);
criterion_main!(search_benches);

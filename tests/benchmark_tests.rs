//! Performance benchmarks for the match-state engine

use server::game::UpdateProcessor;
use server::match_store::MatchStore;
use shared::{Action, GameState, Side};
use std::time::Instant;

/// Benchmarks score updates including set evaluation
#[test]
fn benchmark_score_updates() {
    let processor = UpdateProcessor::default();
    let mut state = GameState::new();

    let iterations = 100_000;
    let start = Instant::now();

    for i in 0..iterations {
        let team = if i % 3 == 0 { Side::B } else { Side::A };
        processor.apply(&mut state, &Action::Score { team, delta: 1 });
        if state.team_a_sets == 3 || state.team_b_sets == 3 {
            state = GameState::new();
        }
    }

    let duration = start.elapsed();
    println!(
        "Score updates: {} iterations in {:?} ({:.2} ns/iter)",
        iterations,
        duration,
        duration.as_nanos() as f64 / iterations as f64
    );

    // Should complete in under 1 second
    assert!(duration.as_millis() < 1000);
}

/// Benchmarks payload parsing into typed actions
#[test]
fn benchmark_action_parsing() {
    let bodies: [&[u8]; 4] = [
        br#"{"action":"score","team":"A","delta":1}"#,
        br#"{"action":"timeout","team":"B","delta":-1}"#,
        br#"{"action":"set_config","teamA_name":"Lions","logoB":null}"#,
        b"not json at all",
    ];

    let iterations = 50_000;
    let start = Instant::now();

    for i in 0..iterations {
        std::hint::black_box(Action::from_body(bodies[i % bodies.len()]));
    }

    let duration = start.elapsed();
    println!(
        "Action parsing: {} iterations in {:?} ({:.2} μs/iter)",
        iterations,
        duration,
        duration.as_micros() as f64 / iterations as f64
    );

    // Should complete in under 2 seconds
    assert!(duration.as_millis() < 2000);
}

/// Benchmarks locked store updates spread across many matches
#[test]
fn benchmark_store_updates() {
    let store = MatchStore::new();
    let processor = UpdateProcessor::default();
    let match_ids: Vec<String> = (0..16).map(|i| format!("Court {}", i)).collect();

    let iterations = 20_000;
    let start = Instant::now();

    tokio_test::block_on(async {
        for i in 0..iterations {
            let id = &match_ids[i % match_ids.len()];
            store
                .apply(id, &processor, &Action::Sub { team: Side::A, delta: 1 })
                .await;
        }
    });

    let duration = start.elapsed();
    println!(
        "Store updates: {} iterations across {} matches in {:?}",
        iterations,
        match_ids.len(),
        duration
    );

    assert_eq!(tokio_test::block_on(store.len()), match_ids.len());
    let state = tokio_test::block_on(store.snapshot("Court 0"));
    assert_eq!(state.team_a_subs, state.max_subs);

    // Should complete in under 2 seconds
    assert!(duration.as_millis() < 2000);
}

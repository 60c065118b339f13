use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::time::Duration;

use brinkmanship::battle::comparator::TierComparator;
use brinkmanship::battle::legal_attack_sources;
use brinkmanship::board::player::PlayerId;
use brinkmanship::board::region::ALL_REGIONS;
use brinkmanship::board::route::{connected_component, has_route};
use brinkmanship::board::state::WorldState;
use brinkmanship::config::RulesConfig;
use brinkmanship::engine::apply_action;
use brinkmanship::movegen::{acting_player, legal_actions, random_action};
use brinkmanship::protocol::action::PlayerAction;
use brinkmanship::selfplay::{play_game, SelfPlayConfig};
use rand::rngs::SmallRng;
use rand::SeedableRng;

fn dealt_world(players: usize) -> WorldState {
    let mut rng = SmallRng::seed_from_u64(1962);
    WorldState::setup(players, RulesConfig::default(), &mut rng).unwrap()
}

fn bench_route_queries(c: &mut Criterion) {
    let state = dealt_world(4);
    let p = PlayerId(0);
    let held = state.ownership.regions_of(p);
    let extra = state.mission_edges(p);

    c.bench_function("has_route_all_held_pairs", |b| {
        b.iter(|| {
            let mut n = 0;
            for a in &held {
                for z in &held {
                    if has_route(*a, *z, p, black_box(&state.ownership), &extra) {
                        n += 1;
                    }
                }
            }
            n
        })
    });

    c.bench_function("connected_component_each_held", |b| {
        b.iter(|| {
            held.iter()
                .map(|r| connected_component(*r, p, black_box(&state.ownership), &extra).len())
                .sum::<usize>()
        })
    });
}

fn bench_attack_sources(c: &mut Criterion) {
    let state = dealt_world(4);
    let p = PlayerId(0);
    c.bench_function("legal_attack_sources_every_region", |b| {
        b.iter(|| {
            ALL_REGIONS
                .iter()
                .map(|t| legal_attack_sources(black_box(&state), p, *t).len())
                .sum::<usize>()
        })
    });
}

fn bench_legal_actions(c: &mut Criterion) {
    let state = dealt_world(4);
    let Some(p) = acting_player(&state) else {
        return;
    };
    c.bench_function("legal_actions_opening", |b| b.iter(|| legal_actions(black_box(&state), p)));
}

fn bench_random_playout(c: &mut Criterion) {
    let mut group = c.benchmark_group("playout");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("200_random_actions", |b| {
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(7);
            let mut state = dealt_world(4);
            for _ in 0..200 {
                let Some(p) = acting_player(&state) else { break };
                let Some(action) = random_action(&state, p, &mut rng) else { break };
                match apply_action(&state, &PlayerAction::new(p, action), &mut rng, &TierComparator) {
                    Ok(t) => state = t.state,
                    Err(_) => break,
                }
            }
            state
        })
    });

    group.bench_function("full_game_4p", |b| {
        let config = SelfPlayConfig { max_rounds: 10, ..SelfPlayConfig::default() };
        b.iter(|| {
            let mut rng = SmallRng::seed_from_u64(11);
            play_game(black_box(&config), 0, &mut rng)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_route_queries,
    bench_attack_sources,
    bench_legal_actions,
    bench_random_playout,
);
criterion_main!(benches);

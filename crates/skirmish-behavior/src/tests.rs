//! Tests for steering and the soldier state machine.

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::config::SimConfig;
use skirmish_core::enums::SoldierState;
use skirmish_core::types::{Kinematics, UnitColor};

use crate::fsm::{
    drive, flee_target, nearest, perturb, react, update, Neighbor, SoldierMind, Transition,
};
use crate::steering::{advance, limit_speed, steer};

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

/// Config with random perturbation disabled so only the rules under test fire.
fn calm_config() -> SimConfig {
    SimConfig {
        idle_chance: 0.0,
        wander_chance: 0.0,
        ..SimConfig::default()
    }
}

fn mind(state: SoldierState, target: Vec2) -> SoldierMind {
    SoldierMind {
        state,
        target,
        ticks_in_state: 0,
    }
}

fn neighbor(id: usize, x: f32, y: f32, color: UnitColor) -> Neighbor {
    Neighbor {
        id,
        position: Vec2::new(x, y),
        color,
    }
}

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-3
}

// ---- Steering ----

#[test]
fn test_steer_moves_velocity_toward_target() {
    let config = SimConfig::default();
    let mut kin = Kinematics::new(Vec2::new(0.0, 0.0), Vec2::ZERO, 0.0);
    assert!(steer(&mut kin, Vec2::new(100.0, 0.0), &config));

    // desired (1, 0), steering delta (1, 0), scaled by damping 0.1
    assert!(approx(kin.velocity, Vec2::new(0.1, 0.0)));
    assert!(kin.angle.abs() < 1e-6);
}

#[test]
fn test_steer_updates_angle() {
    let config = SimConfig::default();
    let mut kin = Kinematics::new(Vec2::ZERO, Vec2::ZERO, 0.0);
    steer(&mut kin, Vec2::new(0.0, 100.0), &config);
    assert!((kin.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
}

#[test]
fn test_steer_inside_arrival_threshold_is_noop() {
    let config = SimConfig::default();
    let velocity = Vec2::new(0.3, -0.2);
    let mut kin = Kinematics::new(Vec2::new(10.0, 10.0), velocity, 1.0);
    // squared distance 25 < 50
    assert!(!steer(&mut kin, Vec2::new(13.0, 14.0), &config));
    assert_eq!(kin.velocity, velocity);
    assert_eq!(kin.angle, 1.0);
}

#[test]
fn test_steer_onto_own_position_with_zero_threshold() {
    let config = SimConfig {
        arrival_distance_sq: 0.0,
        ..SimConfig::default()
    };
    let mut kin = Kinematics::new(Vec2::new(5.0, 5.0), Vec2::new(1.0, 0.0), 0.0);
    assert!(!steer(&mut kin, Vec2::new(5.0, 5.0), &config));
    assert!(kin.velocity.is_finite());
}

#[test]
fn test_limit_speed_rescales() {
    let mut kin = Kinematics::new(Vec2::ZERO, Vec2::new(3.0, 4.0), 0.0);
    limit_speed(&mut kin, 2.0);
    assert!((kin.speed() - 2.0).abs() < 1e-5);
    assert!(approx(kin.velocity, Vec2::new(1.2, 1.6)));

    let mut slow = Kinematics::new(Vec2::ZERO, Vec2::new(0.5, 0.0), 0.0);
    limit_speed(&mut slow, 2.0);
    assert_eq!(slow.velocity, Vec2::new(0.5, 0.0));
}

#[test]
fn test_advance_integrates_after_clamp() {
    let config = SimConfig::default();
    let mut kin = Kinematics::new(Vec2::new(10.0, 10.0), Vec2::new(10.0, 0.0), 0.0);
    advance(&mut kin, &config);
    assert!(approx(kin.position, Vec2::new(12.0, 10.0)));
}

// ---- Flee / nearest ----

#[test]
fn test_flee_target_points_away_from_threat() {
    let target = flee_target(Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0), 100.0);
    assert!(approx(target, Vec2::new(0.0, 100.0)));
}

#[test]
fn test_flee_target_coincident_threat_is_own_position() {
    let p = Vec2::new(40.0, 40.0);
    assert_eq!(flee_target(p, p, 100.0), p);
}

#[test]
fn test_nearest_prefers_first_on_tie() {
    let here = Vec2::new(0.0, 0.0);
    let neighbors = [
        neighbor(4, 10.0, 0.0, UnitColor::RED),
        neighbor(5, 0.0, 10.0, UnitColor::BLUE),
        neighbor(6, 20.0, 0.0, UnitColor::GREEN),
    ];
    assert_eq!(nearest(here, &neighbors).map(|n| n.id), Some(4));
    assert!(nearest(here, &[]).is_none());
}

#[test]
fn test_nearest_picks_closest() {
    let here = Vec2::new(0.0, 0.0);
    let neighbors = [
        neighbor(1, 30.0, 0.0, UnitColor::RED),
        neighbor(2, 5.0, 5.0, UnitColor::RED),
    ];
    assert_eq!(nearest(here, &neighbors).map(|n| n.id), Some(2));
}

// ---- Reactions ----

#[test]
fn test_same_color_neighbor_triggers_chase() {
    let config = calm_config();
    let mut m = mind(SoldierState::Idle, Vec2::ZERO);
    let others = [neighbor(1, 120.0, 110.0, UnitColor::GREEN)];

    let change = react(
        &mut m,
        Vec2::new(100.0, 100.0),
        UnitColor::GREEN,
        &others,
        &config,
        &mut rng(),
    );

    assert_eq!(
        change,
        Some(Transition {
            from: SoldierState::Idle,
            to: SoldierState::Chasing
        })
    );
    assert_eq!(m.state, SoldierState::Chasing);
    assert_eq!(m.target, Vec2::new(120.0, 110.0));
}

#[test]
fn test_chase_target_tracks_neighbor_each_pass() {
    let config = calm_config();
    let mut m = mind(SoldierState::Chasing, Vec2::new(1.0, 1.0));
    m.ticks_in_state = 30;
    let others = [neighbor(1, 140.0, 100.0, UnitColor::RED)];

    let change = react(&mut m, Vec2::new(100.0, 100.0), UnitColor::RED, &others, &config, &mut rng());
    assert!(change.is_none(), "staying in the same state is not a transition");
    assert_eq!(m.target, Vec2::new(140.0, 100.0));
    assert_eq!(m.ticks_in_state, 30);
}

#[test]
fn test_other_color_neighbor_triggers_flee() {
    let config = calm_config();
    let mut m = mind(SoldierState::Wandering, Vec2::new(500.0, 500.0));
    let others = [neighbor(1, 110.0, 100.0, UnitColor::BLUE)];

    react(&mut m, Vec2::new(100.0, 100.0), UnitColor::RED, &others, &config, &mut rng());

    assert_eq!(m.state, SoldierState::Fleeing);
    assert!(approx(m.target, Vec2::new(0.0, 100.0)));
}

#[test]
fn test_nearest_decides_between_friend_and_foe() {
    let config = calm_config();
    let mut m = mind(SoldierState::Idle, Vec2::ZERO);
    let others = [
        neighbor(1, 140.0, 100.0, UnitColor::RED),
        neighbor(2, 105.0, 100.0, UnitColor::BLUE),
    ];
    react(&mut m, Vec2::new(100.0, 100.0), UnitColor::RED, &others, &config, &mut rng());
    assert_eq!(m.state, SoldierState::Fleeing);
}

#[test]
fn test_no_neighbors_chasing_becomes_wandering() {
    let config = calm_config();
    let old_target = Vec2::new(123.0, 321.0);
    let mut m = mind(SoldierState::Chasing, old_target);

    let change = react(&mut m, Vec2::new(100.0, 100.0), UnitColor::RED, &[], &config, &mut rng());

    assert_eq!(change.map(|t| t.to), Some(SoldierState::Wandering));
    assert_eq!(m.state, SoldierState::Wandering);
    assert_ne!(m.target, old_target);
    assert!(config.world_bounds().contains(m.target));
}

#[test]
fn test_no_neighbors_idle_stays_idle() {
    let config = calm_config();
    let mut m = mind(SoldierState::Idle, Vec2::ZERO);
    assert!(react(&mut m, Vec2::new(1.0, 1.0), UnitColor::RED, &[], &config, &mut rng()).is_none());
    assert_eq!(m.state, SoldierState::Idle);
}

#[test]
fn test_no_neighbors_wandering_keeps_target() {
    let config = calm_config();
    let target = Vec2::new(700.0, 50.0);
    let mut m = mind(SoldierState::Wandering, target);
    react(&mut m, Vec2::new(1.0, 1.0), UnitColor::RED, &[], &config, &mut rng());
    assert_eq!(m.target, target);
}

// ---- Movement pass ----

#[test]
fn test_idle_velocity_decays() {
    let config = calm_config();
    let mut m = mind(SoldierState::Idle, Vec2::ZERO);
    let mut kin = Kinematics::new(Vec2::new(100.0, 100.0), Vec2::new(1.0, 0.0), 0.0);
    update(&mut m, &mut kin, &config, &mut rng());
    assert!((kin.velocity.x - 0.95).abs() < 1e-6);
    assert!((kin.position.x - 100.95).abs() < 1e-4);
    assert_eq!(m.ticks_in_state, 1);
}

#[test]
fn test_wandering_arrival_picks_new_target() {
    let config = calm_config();
    let here = Vec2::new(200.0, 200.0);
    let mut m = mind(SoldierState::Wandering, here + Vec2::new(1.0, 1.0));
    let mut kin = Kinematics::new(here, Vec2::ZERO, 0.0);

    drive(&mut m, &mut kin, &config, &mut rng());

    assert_eq!(m.state, SoldierState::Wandering);
    assert_ne!(m.target, here + Vec2::new(1.0, 1.0));
    assert!(config.world_bounds().contains(m.target));
}

#[test]
fn test_wandering_at_exact_arrival_distance_retargets() {
    let config = calm_config();
    let here = Vec2::new(200.0, 200.0);
    // squared distance 50, the steering cutoff
    let old_target = here + Vec2::new(5.0, 5.0);
    let mut m = mind(SoldierState::Wandering, old_target);
    let mut kin = Kinematics::new(here, Vec2::ZERO, 0.0);

    drive(&mut m, &mut kin, &config, &mut rng());

    assert_ne!(m.target, old_target);
    assert!(config.world_bounds().contains(m.target));
}

#[test]
fn test_chasing_steers_toward_target() {
    let config = calm_config();
    let mut m = mind(SoldierState::Chasing, Vec2::new(300.0, 100.0));
    let mut kin = Kinematics::new(Vec2::new(100.0, 100.0), Vec2::ZERO, 0.0);
    update(&mut m, &mut kin, &config, &mut rng());
    assert!(kin.velocity.x > 0.0);
    assert!(kin.position.x > 100.0);
}

#[test]
fn test_flee_reverts_to_wandering_after_duration() {
    let config = calm_config();
    let mut m = mind(SoldierState::Fleeing, Vec2::new(0.0, 100.0));
    let mut kin = Kinematics::new(Vec2::new(400.0, 300.0), Vec2::ZERO, 0.0);
    let mut r = rng();

    for _ in 0..config.flee_duration_ticks - 1 {
        assert!(update(&mut m, &mut kin, &config, &mut r).is_none());
        assert_eq!(m.state, SoldierState::Fleeing);
    }

    let change = update(&mut m, &mut kin, &config, &mut r);
    assert_eq!(
        change,
        Some(Transition {
            from: SoldierState::Fleeing,
            to: SoldierState::Wandering
        })
    );
    assert_eq!(m.ticks_in_state, 0);
}

#[test]
fn test_repeated_flee_reaction_keeps_timer() {
    let config = calm_config();
    let mut m = mind(SoldierState::Fleeing, Vec2::ZERO);
    m.ticks_in_state = 20;
    let others = [neighbor(1, 110.0, 100.0, UnitColor::BLUE)];
    react(&mut m, Vec2::new(100.0, 100.0), UnitColor::RED, &others, &config, &mut rng());
    assert_eq!(m.ticks_in_state, 20);
}

// ---- Perturbation ----

#[test]
fn test_perturbation_waits_for_dwell_time() {
    let config = SimConfig {
        idle_chance: 1.0,
        wander_chance: 0.0,
        ..SimConfig::default()
    };
    let mut m = mind(SoldierState::Chasing, Vec2::new(10.0, 10.0));
    m.ticks_in_state = config.min_dwell_ticks - 1;
    assert!(perturb(&mut m, &config, &mut rng()).is_none());

    m.ticks_in_state = config.min_dwell_ticks;
    let change = perturb(&mut m, &config, &mut rng());
    assert_eq!(change.map(|t| t.to), Some(SoldierState::Idle));
}

#[test]
fn test_perturbation_to_wandering_sets_target() {
    let config = SimConfig {
        idle_chance: 0.0,
        wander_chance: 1.0,
        ..SimConfig::default()
    };
    let mut m = mind(SoldierState::Fleeing, Vec2::new(-50.0, -50.0));
    m.ticks_in_state = config.min_dwell_ticks;
    perturb(&mut m, &config, &mut rng());
    assert_eq!(m.state, SoldierState::Wandering);
    assert!(config.world_bounds().contains(m.target));
}

#[test]
fn test_perturbation_never_fires_with_zero_chance() {
    let config = calm_config();
    let mut m = mind(SoldierState::Chasing, Vec2::ZERO);
    let mut r = rng();
    for ticks in 100..1100 {
        m.ticks_in_state = ticks;
        assert!(perturb(&mut m, &config, &mut r).is_none());
    }
}

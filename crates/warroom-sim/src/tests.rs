//! Tests for the capacity auditor, allocator, lifecycle and tick systems.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use warroom_core::commands::{AttackTarget, MissionCommand};
use warroom_core::components::Payload;
use warroom_core::enums::*;
use warroom_core::types::GeoPosition;

use crate::allocator::allocate;
use crate::capacity::{audit, FleetCapacity, SwarmCapacity};
use crate::config::{EngineConfig, FleetConfig, SwarmSpec};
use crate::engine::MissionEngine;
use crate::error::Rejection;
use crate::lifecycle::{self, AssignGate};
use crate::mission::{Mission, SubMission, SwarmQueue};
use crate::world_setup::build_fleet;

// ---- Helpers ----

fn swarm(vehicles: u32, guided: u32, gravity: u32) -> SwarmSpec {
    SwarmSpec {
        vehicles,
        payloads: vec![
            Payload::new(PayloadType::GuidedBomb, guided),
            Payload::new(PayloadType::GravityBomb, gravity),
        ],
        leader_payloads: None,
    }
}

fn fleet_config(swarms: Vec<SwarmSpec>) -> FleetConfig {
    FleetConfig {
        scatter_deg: 0.0,
        swarms,
        ..FleetConfig::default()
    }
}

fn engine(swarms: Vec<SwarmSpec>) -> MissionEngine {
    MissionEngine::from_config(&fleet_config(swarms), EngineConfig::default()).unwrap()
}

fn origin() -> GeoPosition {
    FleetConfig::default().origin
}

fn at(d_lat: f64, d_lon: f64) -> GeoPosition {
    let o = origin();
    GeoPosition::new(o.lat + d_lat, o.lon + d_lon, 0.0)
}

fn target(action: &str, uid: &str, count: i64) -> AttackTarget {
    AttackTarget::new(action, uid, at(0.01, 0.01), count)
}

fn capacity(stocks: &[(u64, u64)]) -> FleetCapacity {
    FleetCapacity {
        swarms: stocks
            .iter()
            .enumerate()
            .map(|(i, &(guided, gravity))| SwarmCapacity {
                swarm_uid: format!("swarm-{}", i + 1),
                guided,
                gravity,
            })
            .collect(),
    }
}

fn assign(uid: &str, targets: Vec<AttackTarget>) -> MissionCommand {
    MissionCommand::Assign {
        mission_uid: uid.into(),
        targets,
    }
}

fn engage(uid: &str) -> MissionCommand {
    MissionCommand::Engage {
        mission_uid: uid.into(),
    }
}

fn terminate(uid: &str) -> MissionCommand {
    MissionCommand::Terminate {
        mission_uid: uid.into(),
    }
}

fn leg_counts(queue: &SwarmQueue) -> Vec<u32> {
    queue.legs.iter().map(|leg| leg.count).collect()
}

fn leg_targets(queue: &SwarmQueue) -> Vec<&str> {
    queue
        .legs
        .iter()
        .map(|leg| leg.target_uid.as_deref().unwrap_or(""))
        .collect()
}

// ---- Fleet model ----

#[test]
fn test_fleet_ids_and_rosters() {
    let fleet = build_fleet(&fleet_config(vec![swarm(2, 1, 1), swarm(3, 1, 1)])).unwrap();
    assert_eq!(fleet.swarm_count(), 2);
    assert_eq!(fleet.vehicle_count(), 5);
    assert_eq!(fleet.swarms()[0].swarm_uid, "swarm-1");
    assert_eq!(fleet.swarms()[1].swarm_uid, "swarm-2");
    assert!(fleet.find_vehicle("uav-1").is_some());
    assert!(fleet.find_vehicle("uav-5").is_some());
    assert!(fleet.find_vehicle("uav-6").is_none());
    assert_eq!(fleet.swarms()[1].members[0], fleet.find_vehicle("uav-3").unwrap());
}

#[test]
fn test_leader_payload_override() {
    let spec = SwarmSpec {
        vehicles: 3,
        payloads: vec![Payload::new(PayloadType::GuidedBomb, 1)],
        leader_payloads: Some(vec![Payload::new(PayloadType::GravityBomb, 4)]),
    };
    let fleet = build_fleet(&fleet_config(vec![spec])).unwrap();
    assert_eq!(fleet.swarm_stock(0, PayloadType::GuidedBomb), 2);
    assert_eq!(fleet.swarm_stock(0, PayloadType::GravityBomb), 4);
    assert_eq!(fleet.remaining_ammunition(0), 6);
}

#[test]
fn test_fleet_scatter_is_seeded() {
    let mut config = fleet_config(vec![swarm(3, 0, 1)]);
    config.scatter_deg = 0.01;
    let a = build_fleet(&config).unwrap();
    let b = build_fleet(&config).unwrap();
    config.seed += 1;
    let c = build_fleet(&config).unwrap();

    let pos_a = a.position_of("uav-2").unwrap();
    assert_eq!(pos_a, b.position_of("uav-2").unwrap());
    assert_ne!(pos_a, c.position_of("uav-2").unwrap());
    assert!((pos_a.lat - origin().lat).abs() <= 0.01);
    assert!((pos_a.lon - origin().lon).abs() <= 0.01);
    assert_eq!(pos_a.alt, origin().alt);
}

#[test]
fn test_fleet_config_validation() {
    assert!(build_fleet(&fleet_config(vec![])).is_err());
    assert!(build_fleet(&fleet_config(vec![swarm(0, 1, 1)])).is_err());
    let mut config = fleet_config(vec![swarm(1, 1, 1)]);
    config.scatter_deg = -1.0;
    assert!(build_fleet(&config).is_err());
}

#[test]
fn test_fleet_config_from_json() {
    let json = r#"{
        "systemUid": "station-7",
        "seed": 9,
        "scatterDeg": 0.0,
        "origin": [25.0, 121.5, 40.0],
        "swarms": [
            {"vehicles": 2, "payloads": [{"type": "gravityBomb", "amount": 3}]},
            {"vehicles": 1, "payloads": [{"type": "guidedBomb", "amount": 1},
                                         {"type": "camera", "amount": 1}]}
        ]
    }"#;
    let config = FleetConfig::from_json_str(json).unwrap();
    assert_eq!(config.system_uid, "station-7");
    assert_eq!(config.vehicle_count(), 3);
    assert_eq!(config.vehicle_prefix, "uav");

    let fleet = build_fleet(&config).unwrap();
    assert_eq!(fleet.swarm_stock(0, PayloadType::GravityBomb), 6);
    assert_eq!(fleet.swarm_stock(1, PayloadType::GuidedBomb), 1);
    assert_eq!(fleet.remaining_ammunition(1), 1);
    assert_eq!(fleet.leader_position(0), GeoPosition::new(25.0, 121.5, 40.0));
}

// ---- Capacity auditor ----

#[test]
fn test_capacity_snapshot_sums_per_swarm() {
    let fleet = build_fleet(&fleet_config(vec![swarm(2, 1, 2), swarm(1, 3, 0)])).unwrap();
    let snapshot = FleetCapacity::snapshot(&fleet);
    assert_eq!(snapshot, capacity(&[(2, 4), (3, 0)]));
    assert_eq!(snapshot.total(PayloadType::GuidedBomb), 5);
    assert_eq!(snapshot.total(PayloadType::GravityBomb), 4);
}

#[test]
fn test_audit_accepts_demand_within_capacity() {
    let cap = capacity(&[(2, 2), (1, 1)]);
    let demand = audit(&[target("snipe", "a", 3), target("bombard", "b", 3)], &cap).unwrap();
    assert_eq!(demand.guided, 3);
    assert_eq!(demand.gravity, 3);
}

#[test]
fn test_audit_rejects_zero_demand() {
    let cap = capacity(&[(2, 2)]);
    assert_eq!(
        audit(&[target("snipe", "a", 0), target("bombard", "b", 0)], &cap),
        Err(Rejection::InvalidCount)
    );
    assert_eq!(audit(&[], &cap), Err(Rejection::InvalidCount));
    assert_eq!(Rejection::InvalidCount.to_string(), "Attack count invalid");
}

#[test]
fn test_audit_rejects_negative_counts() {
    let cap = capacity(&[(5, 5)]);
    assert_eq!(
        audit(&[target("snipe", "a", -1)], &cap),
        Err(Rejection::InvalidCount)
    );
    // Positive category total, but one target is negative.
    assert_eq!(
        audit(&[target("snipe", "a", 3), target("snipe", "b", -1)], &cap),
        Err(Rejection::InvalidCount)
    );
}

#[test]
fn test_audit_rejects_missing_position() {
    let cap = capacity(&[(5, 5)]);
    let mut unpositioned = target("bombard", "a", 1);
    unpositioned.position = None;
    assert_eq!(audit(&[unpositioned], &cap), Err(Rejection::MissingPosition));
}

#[test]
fn test_audit_rejects_other_actions() {
    let cap = capacity(&[(5, 5)]);
    let result = audit(&[target("snipe", "a", 1), target("strafe", "b", 1)], &cap);
    assert_eq!(result, Err(Rejection::UnsupportedAction("strafe".into())));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Unsupported action: strafe"
    );
}

#[test]
fn test_audit_rejects_insufficient_capacity() {
    let cap = capacity(&[(1, 4), (1, 0)]);
    assert_eq!(
        audit(&[target("snipe", "a", 3)], &cap),
        Err(Rejection::InsufficientCapacity {
            payload: PayloadType::GuidedBomb,
            requested: 3,
            available: 2,
        })
    );
    assert_eq!(
        audit(&[target("bombard", "a", 5)], &cap)
            .unwrap_err()
            .to_string(),
        "Insufficient gravity ordnance: requested 5, available 4"
    );
}

// ---- Allocator ----

#[test]
fn test_allocator_skips_swarms_without_stock() {
    let cap = capacity(&[(0, 2), (0, 0), (0, 3)]);
    let anchors = vec![origin(); 3];
    let allocation = allocate(&[target("bombard", "t", 5)], &cap, &anchors).unwrap();

    assert_eq!(leg_counts(&allocation.queues[0]), vec![2]);
    assert!(allocation.queues[1].legs.is_empty());
    assert_eq!(leg_counts(&allocation.queues[2]), vec![3]);
    assert_eq!(allocation.committed(), 5);
    assert_eq!(allocation.total_legs(), 2);
}

#[test]
fn test_allocator_pointer_carries_across_targets() {
    let cap = capacity(&[(0, 4), (0, 4)]);
    let anchors = vec![origin(); 2];
    let targets = vec![
        target("bombard", "a", 1),
        target("bombard", "b", 1),
        target("bombard", "c", 1),
    ];
    let allocation = allocate(&targets, &cap, &anchors).unwrap();

    assert_eq!(leg_targets(&allocation.queues[0]), vec!["a", "c"]);
    assert_eq!(leg_targets(&allocation.queues[1]), vec!["b"]);
}

#[test]
fn test_allocator_wraps_around_with_partial_fills() {
    let cap = capacity(&[(0, 3), (0, 1)]);
    let anchors = vec![origin(); 2];
    let targets = vec![target("bombard", "t1", 1), target("bombard", "t2", 3)];
    let allocation = allocate(&targets, &cap, &anchors).unwrap();

    // t1 -> swarm 1; t2 -> swarm 2 (1 round), then wraps to swarm 1 (2 rounds).
    assert_eq!(leg_targets(&allocation.queues[0]), vec!["t1", "t2"]);
    assert_eq!(leg_counts(&allocation.queues[0]), vec![1, 2]);
    assert_eq!(leg_targets(&allocation.queues[1]), vec!["t2"]);
    assert_eq!(leg_counts(&allocation.queues[1]), vec![1]);
    assert_eq!(allocation.committed(), 4);
}

#[test]
fn test_allocator_matches_action_to_stock() {
    let cap = capacity(&[(2, 0), (0, 2)]);
    let anchors = vec![origin(); 2];
    let targets = vec![target("bombard", "g", 2), target("snipe", "p", 2)];
    let allocation = allocate(&targets, &cap, &anchors).unwrap();

    // bombard: swarm 1 has no gravity stock, swarm 2 takes it.
    // snipe: pointer is back on swarm 1, which has the guided stock.
    assert_eq!(leg_targets(&allocation.queues[0]), vec!["p"]);
    assert_eq!(allocation.queues[0].legs[0].action, AttackAction::Snipe);
    assert_eq!(leg_targets(&allocation.queues[1]), vec!["g"]);
    assert_eq!(allocation.queues[1].legs[0].action, AttackAction::Bombard);
}

#[test]
fn test_allocator_chains_leg_vectors() {
    let cap = capacity(&[(0, 4), (0, 4)]);
    let leader = GeoPosition::new(10.0, 20.0, 30.0);
    let anchors = vec![leader, leader];
    let targets = vec![
        AttackTarget::new("bombard", "a", GeoPosition::new(11.0, 21.0, 0.0), 1),
        AttackTarget::new("bombard", "b", GeoPosition::new(9.0, 20.0, 0.0), 1),
        AttackTarget::new("bombard", "c", GeoPosition::new(13.0, 19.0, 0.0), 1),
    ];
    let allocation = allocate(&targets, &cap, &anchors).unwrap();

    let swarm_one = &allocation.queues[0].legs;
    assert_eq!(swarm_one[0].delta, DVec2::new(1.0, 1.0));
    // Second leg starts where the first ended, not at the leader.
    assert_eq!(swarm_one[1].delta, DVec2::new(2.0, -2.0));
    assert_eq!(allocation.queues[1].legs[0].delta, DVec2::new(-1.0, 0.0));
}

#[test]
fn test_allocator_skips_zero_count_targets() {
    let cap = capacity(&[(0, 2), (0, 2)]);
    let anchors = vec![origin(); 2];
    let targets = vec![target("bombard", "none", 0), target("bombard", "x", 1)];
    let allocation = allocate(&targets, &cap, &anchors).unwrap();
    assert_eq!(allocation.total_legs(), 1);
    assert_eq!(leg_targets(&allocation.queues[0]), vec!["x"]);
}

#[test]
fn test_allocator_rejects_instead_of_looping() {
    let cap = capacity(&[(0, 1), (0, 1)]);
    let anchors = vec![origin(); 2];
    let result = allocate(&[target("bombard", "t", 3)], &cap, &anchors);
    assert!(matches!(
        result,
        Err(Rejection::InsufficientCapacity {
            payload: PayloadType::GravityBomb,
            requested: 1,
            ..
        })
    ));
    assert!(allocate(&[target("bombard", "t", 1)], &capacity(&[]), &[]).is_err());
}

#[test]
fn test_allocator_rejects_unsupported_action() {
    let cap = capacity(&[(5, 5)]);
    let result = allocate(&[target("strafe", "t", 1)], &cap, &[origin()]);
    assert_eq!(result, Err(Rejection::UnsupportedAction("strafe".into())));
}

#[test]
fn test_allocator_random_lists_within_capacity() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for _ in 0..200 {
        let swarm_count = rng.gen_range(1..=5);
        let stocks: Vec<(u64, u64)> = (0..swarm_count)
            .map(|_| (rng.gen_range(0..6), rng.gen_range(0..6)))
            .collect();
        let cap = capacity(&stocks);
        let mut guided_left = cap.total(PayloadType::GuidedBomb) as i64;
        let mut gravity_left = cap.total(PayloadType::GravityBomb) as i64;

        let mut targets = Vec::new();
        for i in 0..rng.gen_range(1..6) {
            let snipe = rng.gen_bool(0.5);
            let left = if snipe { &mut guided_left } else { &mut gravity_left };
            let count = rng.gen_range(0..=*left);
            *left -= count;
            let action = if snipe { "snipe" } else { "bombard" };
            targets.push(target(action, &format!("t{i}"), count));
        }
        let requested: i64 = targets.iter().map(|t| t.count).sum();
        if requested == 0 {
            continue;
        }

        assert!(audit(&targets, &cap).is_ok());
        let allocation = allocate(&targets, &cap, &vec![origin(); swarm_count]).unwrap();
        assert_eq!(allocation.committed() as i64, requested);

        for (queue, &(guided, gravity)) in allocation.queues.iter().zip(&stocks) {
            let committed = |action: AttackAction| -> u32 {
                queue
                    .legs
                    .iter()
                    .filter(|leg| leg.action == action)
                    .map(|leg| leg.count)
                    .sum()
            };
            assert!(u64::from(committed(AttackAction::Snipe)) <= guided);
            assert!(u64::from(committed(AttackAction::Bombard)) <= gravity);
            assert!(queue.legs.iter().all(|leg| leg.count > 0));
        }
    }
}

// ---- Mission model ----

#[test]
fn test_aggregate_progress_floors_average() {
    let leg = |progress| SubMission {
        progress,
        ..SubMission::new(
            AttackAction::Bombard,
            None,
            GeoPosition::default(),
            1,
            DVec2::ZERO,
        )
    };
    let mut mission = Mission::new(3);
    mission.commit(
        "m".into(),
        vec![
            SwarmQueue {
                legs: vec![leg(100), leg(33)],
                cursor: 1,
            },
            SwarmQueue {
                legs: vec![leg(0)],
                cursor: 0,
            },
        ],
    );
    assert_eq!(mission.total_legs, 3);
    assert_eq!(mission.aggregate_progress(), 44);

    for queue in &mut mission.queues {
        for leg in &mut queue.legs {
            leg.progress = 100;
        }
    }
    assert_eq!(mission.aggregate_progress(), 100);
    assert_eq!(Mission::new(3).aggregate_progress(), 0);
}

#[test]
fn test_queue_cursor_never_passes_the_end() {
    let mut queue = SwarmQueue::default();
    queue.advance();
    assert_eq!(queue.cursor, 0);
    assert!(queue.is_drained());
}

// ---- Lifecycle ----

#[test]
fn test_gate_assign() {
    let mut mission = Mission::new(3);
    assert_eq!(lifecycle::gate_assign(&mission, "m1"), Ok(AssignGate::Open));
    mission.commit("m1".into(), vec![]);
    assert_eq!(
        lifecycle::gate_assign(&mission, "m1"),
        Ok(AssignGate::Reacknowledge)
    );
    assert_eq!(lifecycle::gate_assign(&mission, "m2"), Err(Rejection::Busy));
}

#[test]
fn test_lifecycle_transitions() {
    let mut mission = Mission::new(3);
    assert_eq!(
        lifecycle::engage(&mut mission, "m1"),
        Err(Rejection::NoActiveMission)
    );
    assert_eq!(
        lifecycle::terminate(&mut mission, "m1"),
        Err(Rejection::NoActiveMission)
    );

    mission.commit("m1".into(), vec![]);
    assert_eq!(lifecycle::engage(&mut mission, "m2"), Err(Rejection::Busy));
    assert_eq!(lifecycle::engage(&mut mission, "m1"), Ok(()));
    assert_eq!(mission.state, MissionState::Engaging);
    assert_eq!(lifecycle::engage(&mut mission, "m1"), Ok(()));
    assert_eq!(mission.state, MissionState::Engaging);

    mission.progress = 100;
    lifecycle::observe_progress(&mut mission);
    assert_eq!(mission.state, MissionState::Completed);

    assert_eq!(
        lifecycle::engage(&mut mission, "m1"),
        Err(Rejection::InvalidTransition {
            command: "engage",
            state: MissionState::Completed
        })
    );
    assert_eq!(lifecycle::terminate(&mut mission, "m1"), Ok(()));
    assert_eq!(mission.state, MissionState::Finished);
    assert_eq!(lifecycle::terminate(&mut mission, "m1"), Ok(()));
    assert_eq!(mission.state, MissionState::Finished);
}

#[test]
fn test_terminate_ready_mission_cancels() {
    let mut mission = Mission::new(3);
    mission.commit("m1".into(), vec![]);
    assert_eq!(lifecycle::terminate(&mut mission, "m1"), Ok(()));
    assert_eq!(mission.state, MissionState::Canceled);
}

#[test]
fn test_fade_releases_after_counter_drops_below_zero() {
    let mut mission = Mission::new(3);
    mission.commit("m1".into(), vec![]);
    assert!(!lifecycle::fade(&mut mission, 3), "non-terminal missions do not fade");
    assert_eq!(mission.fade, 3);

    mission.state = MissionState::Canceled;
    assert!(!lifecycle::fade(&mut mission, 3));
    assert!(!lifecycle::fade(&mut mission, 3));
    assert!(!lifecycle::fade(&mut mission, 3));
    assert_eq!(mission.fade, 0);
    assert!(lifecycle::fade(&mut mission, 3));
    assert_eq!(mission.mission_uid, None);
    assert_eq!(mission.state, MissionState::None);
    assert_eq!(mission.fade, 3);
}

// ---- Engine ----

#[test]
fn test_rejected_assign_leaves_state_untouched() {
    let mut engine = engine(vec![swarm(2, 1, 1)]);
    let before = FleetCapacity::snapshot(engine.fleet());

    let reply = engine.handle_command(assign("m1", vec![target("snipe", "a", 3)]));
    assert_eq!(reply.reply, ReplyStatus::Rejected);
    assert_eq!(
        reply.description.as_deref(),
        Some("Insufficient guided ordnance: requested 3, available 2")
    );
    assert!(!engine.mission().is_active());
    assert_eq!(FleetCapacity::snapshot(engine.fleet()), before);
    assert!(engine.mission_status().is_none());
}

#[test]
fn test_busy_and_idle_rejections() {
    let mut engine = engine(vec![swarm(2, 2, 2)]);

    let reply = engine.handle_command(engage("m1"));
    assert_eq!(reply.reply, ReplyStatus::Rejected);
    assert_eq!(reply.reply_command, CommandKind::Engage);
    assert_eq!(reply.description.as_deref(), Some("No active mission"));

    assert!(engine
        .handle_command(assign("m1", vec![target("bombard", "a", 1)]))
        .is_accepted());

    for command in [
        assign("m2", vec![target("bombard", "b", 1)]),
        engage("m2"),
        terminate("m2"),
    ] {
        let reply = engine.handle_command(command);
        assert_eq!(reply.reply, ReplyStatus::Rejected);
        assert_eq!(reply.mission_uid, "m2");
        assert_eq!(reply.description.as_deref(), Some("System is busy."));
    }
    assert_eq!(engine.mission().state, MissionState::Ready);
}

#[test]
fn test_ready_mission_does_not_move() {
    let mut engine = engine(vec![swarm(2, 2, 2)]);
    engine.handle_command(assign("m1", vec![target("bombard", "a", 1)]));
    let before = engine.fleet_status();

    for _ in 0..5 {
        let output = engine.tick();
        assert!(output.attack_events.is_empty());
        assert_eq!(output.status.unwrap().state, MissionState::Ready);
    }
    assert_eq!(engine.fleet_status().vehicles, before.vehicles);
    assert_eq!(engine.mission().progress, 0);
}

#[test]
fn test_status_reports_ammunition_and_current_target() {
    let mut engine = engine(vec![swarm(2, 1, 2), swarm(1, 0, 1)]);
    engine.handle_command(assign(
        "m1",
        vec![target("bombard", "a", 4), target("bombard", "b", 1)],
    ));

    let status = engine.mission_status().unwrap();
    assert_eq!(status.mission_uid, "m1");
    assert_eq!(status.state, MissionState::Ready);
    assert_eq!(status.swarms.len(), 2);
    assert_eq!(status.swarms[0].swarm_uid, "swarm-1");
    assert_eq!(status.swarms[0].remaining_ammunition, 6);
    assert_eq!(status.swarms[0].current_target.as_deref(), Some("a"));
    assert_eq!(status.swarms[1].remaining_ammunition, 1);
    assert_eq!(status.swarms[1].current_target.as_deref(), Some("b"));
}

#[test]
fn test_swarm_stock_beyond_u32_range() {
    let mut engine = engine(vec![swarm(2, 0, 3_000_000_000)]);
    assert_eq!(
        FleetCapacity::snapshot(engine.fleet()).swarms[0].gravity,
        6_000_000_000
    );

    let reply = engine.handle_command(assign("m1", vec![target("bombard", "a", 1)]));
    assert!(reply.is_accepted());
    let status = engine.mission_status().unwrap();
    assert_eq!(status.swarms[0].remaining_ammunition, 6_000_000_000);
    assert_eq!(leg_counts(&engine.mission().queues[0]), vec![1]);
}

#[test]
fn test_single_rounds_emit_events_without_count() {
    let spec = SwarmSpec {
        vehicles: 1,
        payloads: vec![
            Payload::new(PayloadType::GravityBomb, 1),
            Payload::new(PayloadType::GuidedBomb, 5),
            Payload::new(PayloadType::GravityBomb, 1),
        ],
        leader_payloads: None,
    };
    let mut engine = engine(vec![spec]);
    engine.handle_command(assign("m1", vec![target("bombard", "a", 2)]));
    engine.handle_command(engage("m1"));

    let mut events = Vec::new();
    for _ in 0..20 {
        events.extend(engine.tick().attack_events);
    }
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.count.is_none()));
    assert!(events.iter().all(|e| e.vehicle_uid == "uav-1"));
    assert!(events.iter().all(|e| e.target_uid.as_deref() == Some("a")));

    let bay = engine.fleet().payloads_of("uav-1").unwrap();
    assert_eq!(bay.stock(PayloadType::GravityBomb), 0);
    assert_eq!(bay.stock(PayloadType::GuidedBomb), 5);
}

#[test]
fn test_fleet_status_lists_every_vehicle_in_order() {
    let engine = engine(vec![swarm(2, 1, 1), swarm(2, 1, 1)]);
    let status = engine.fleet_status();
    assert_eq!(status.system_uid, "warroom");
    assert_eq!(status.ttl, 1);
    let uids: Vec<&str> = status.vehicles.iter().map(|v| v.vehicle_uid.as_str()).collect();
    assert_eq!(uids, vec!["uav-1", "uav-2", "uav-3", "uav-4"]);
    let leaders: Vec<bool> = status.vehicles.iter().map(|v| v.is_leader).collect();
    assert_eq!(leaders, vec![true, false, true, false]);
    assert_eq!(status.vehicles[2].swarm_uid, "swarm-2");
    assert_eq!(status.vehicles[0].kind, "copter");
}

#[test]
fn test_tick_counter_advances_in_every_state() {
    let mut engine = engine(vec![swarm(1, 1, 1)]);
    engine.tick();
    engine.tick();
    assert_eq!(engine.time().tick, 2);
    assert_eq!(engine.fleet_status().time.tick, 2);
}

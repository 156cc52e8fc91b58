//! Game loop thread: owns the mission engine, answers commands and ticks at a
//! fixed period.
//!
//! Commands arrive via `mpsc` from the transport reader and are handled as
//! soon as they arrive, between ticks. Replies, attack events, mission status
//! and fleet telemetry are pushed to the outbound channel for the writer.

use std::io;
use std::sync::mpsc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use tracing::{debug, info};

use warroom_sim::{MissionEngine, TickOutput};

use crate::state::{LoopCommand, Outbound};

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the transport reader to use.
pub fn spawn_game_loop(
    engine: MissionEngine,
    tick: Duration,
    outbound: Sender<Outbound>,
) -> io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = thread::Builder::new()
        .name("warroom-game-loop".into())
        .spawn(move || run_game_loop(engine, tick, cmd_rx, &outbound))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut engine: MissionEngine,
    tick: Duration,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    outbound: &Sender<Outbound>,
) {
    info!(tick_ms = tick.as_millis() as u64, "game loop started");
    let mut next_tick_time = Instant::now() + tick;

    loop {
        let now = Instant::now();
        if now >= next_tick_time {
            // 1. Advance one tick and publish everything it produced
            let output = engine.tick();
            publish_tick(&engine, output, outbound);

            // 2. Schedule the next tick
            next_tick_time += tick;
            let now = Instant::now();
            if now > next_tick_time && now - next_tick_time > tick * 2 {
                // Too far behind, reset to avoid catch-up spiral
                next_tick_time = now;
            }
            continue;
        }

        // 3. Wait for a command until the tick deadline
        match cmd_rx.recv_timeout(next_tick_time - now) {
            Ok(LoopCommand::Mission(command)) => {
                let reply = engine.handle_command(command);
                publish(outbound, Outbound::Reply(reply));
            }
            Ok(LoopCommand::Shutdown) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    info!(tick = engine.time().tick, "game loop stopped");
}

/// Push one tick's output: attack events, then mission status, then fleet telemetry.
fn publish_tick(engine: &MissionEngine, output: TickOutput, outbound: &Sender<Outbound>) {
    for event in output.attack_events {
        publish(outbound, Outbound::Attack(event));
    }
    if let Some(status) = output.status {
        publish(outbound, Outbound::Status(status));
    }
    publish(outbound, Outbound::Fleet(engine.fleet_status()));
}

fn publish(outbound: &Sender<Outbound>, message: Outbound) {
    if outbound.send(message).is_err() {
        debug!("outbound channel closed, message dropped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::{unbounded, Receiver};
    use warroom_core::commands::{AttackTarget, MissionCommand};
    use warroom_core::enums::{CommandKind, MissionState, ReplyStatus};
    use warroom_core::types::GeoPosition;
    use warroom_sim::config::{EngineConfig, FleetConfig};

    const WAIT: Duration = Duration::from_secs(5);

    fn engine() -> MissionEngine {
        MissionEngine::from_config(&FleetConfig::default(), EngineConfig::default()).unwrap()
    }

    fn next_reply(rx: &Receiver<Outbound>) -> warroom_core::events::CommandReply {
        let deadline = Instant::now() + WAIT;
        while Instant::now() < deadline {
            if let Ok(Outbound::Reply(reply)) = rx.recv_timeout(WAIT) {
                return reply;
            }
        }
        panic!("no reply within {WAIT:?}");
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Mission(MissionCommand::Engage {
            mission_uid: "m1".into(),
        }))
        .unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let commands: Vec<LoopCommand> = rx.try_iter().collect();
        assert_eq!(commands.len(), 2);
        assert!(matches!(
            &commands[0],
            LoopCommand::Mission(MissionCommand::Engage { mission_uid }) if mission_uid == "m1"
        ));
        assert!(matches!(commands[1], LoopCommand::Shutdown));
    }

    #[test]
    fn test_replies_do_not_wait_for_a_tick() {
        let (out_tx, out_rx) = unbounded();
        // Long tick: the reply must arrive well before the first tick.
        let (cmd_tx, handle) = spawn_game_loop(engine(), Duration::from_secs(60), out_tx).unwrap();

        let started = Instant::now();
        cmd_tx
            .send(LoopCommand::Mission(MissionCommand::Engage {
                mission_uid: "m1".into(),
            }))
            .unwrap();
        let reply = next_reply(&out_rx);
        assert!(started.elapsed() < Duration::from_secs(5));
        assert_eq!(reply.reply_command, CommandKind::Engage);
        assert_eq!(reply.reply, ReplyStatus::Rejected);

        cmd_tx.send(LoopCommand::Shutdown).unwrap();
        handle.join().unwrap();
    }

    #[test]
    fn test_ticks_publish_status_and_telemetry() {
        let (out_tx, out_rx) = unbounded();
        let (cmd_tx, handle) =
            spawn_game_loop(engine(), Duration::from_millis(5), out_tx).unwrap();

        let target = AttackTarget::new("bombard", "t1", GeoPosition::new(24.78, 121.05, 0.0), 1);
        cmd_tx
            .send(LoopCommand::Mission(MissionCommand::Assign {
                mission_uid: "m1".into(),
                targets: vec![target],
            }))
            .unwrap();
        assert!(next_reply(&out_rx).is_accepted());
        cmd_tx
            .send(LoopCommand::Mission(MissionCommand::Engage {
                mission_uid: "m1".into(),
            }))
            .unwrap();
        assert!(next_reply(&out_rx).is_accepted());

        // Run until the mission completes: profile 0 needs 20 ticks.
        let deadline = Instant::now() + WAIT;
        let mut attacks = 0;
        let mut fleet_reports = 0;
        let mut completed = false;
        while !completed && Instant::now() < deadline {
            match out_rx.recv_timeout(WAIT) {
                Ok(Outbound::Attack(event)) => {
                    assert_eq!(event.mission_uid, "m1");
                    attacks += 1;
                }
                Ok(Outbound::Status(status)) => {
                    completed = status.state == MissionState::Completed;
                }
                Ok(Outbound::Fleet(fleet)) => {
                    assert_eq!(fleet.vehicles.len(), 2);
                    fleet_reports += 1;
                }
                Ok(Outbound::Reply(_)) => {}
                Err(_) => break,
            }
        }
        assert!(completed, "mission did not complete");
        assert_eq!(attacks, 1);
        assert!(fleet_reports >= 19);

        drop(cmd_tx);
        handle.join().unwrap();
    }
}

//! Game loop thread: runs the simulation at 60Hz and publishes snapshots.
//!
//! The manager is moved into the thread, so nothing else can touch it while a
//! tick runs. Commands arrive via `mpsc` channel; the latest snapshot is
//! stored in shared state for the frame printer to poll.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use skirmish_core::constants::TICK_RATE;
use skirmish_core::state::FrameSnapshot;
use skirmish_sim::SimulationManager;

use crate::state::LoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Loop-side view of the commands received so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopControl {
    pub paused: bool,
    pub shutdown: bool,
}

impl LoopControl {
    /// Apply one command. The overlay flag is shared with the printer.
    pub fn apply(&mut self, command: LoopCommand, show_quadtree: &AtomicBool) {
        match command {
            LoopCommand::Pause => self.paused = true,
            LoopCommand::Resume => self.paused = false,
            LoopCommand::ToggleQuadtree => {
                show_quadtree.fetch_xor(true, Ordering::Relaxed);
            }
            LoopCommand::Shutdown => self.shutdown = true,
        }
    }

    /// Drain every pending command. A disconnected channel counts as shutdown.
    pub fn drain(&mut self, rx: &mpsc::Receiver<LoopCommand>, show_quadtree: &AtomicBool) {
        loop {
            match rx.try_recv() {
                Ok(command) => {
                    debug!(?command, "loop command");
                    self.apply(command, show_quadtree);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    self.shutdown = true;
                    break;
                }
            }
        }
    }
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and a handle that yields the final tick count.
pub fn spawn_game_loop(
    sim: SimulationManager,
    latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    show_quadtree: Arc<AtomicBool>,
) -> io::Result<(mpsc::Sender<LoopCommand>, JoinHandle<u64>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || run_game_loop(sim, cmd_rx, &latest_snapshot, &show_quadtree))?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    mut sim: SimulationManager,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<FrameSnapshot>>,
    show_quadtree: &AtomicBool,
) -> u64 {
    let mut control = LoopControl::default();
    let mut next_tick_time = Instant::now();
    info!(units = sim.units().len(), "game loop started");

    loop {
        // 1. Drain all pending commands
        control.drain(&cmd_rx, show_quadtree);
        if control.shutdown {
            break;
        }

        // 2. Advance one tick and publish
        if !control.paused {
            sim.tick();
            let snapshot = sim.snapshot();
            if let Ok(mut lock) = latest_snapshot.lock() {
                *lock = Some(snapshot);
            }
        }

        // 3. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }

    let ticks = sim.time().tick;
    info!(ticks, "game loop stopped");
    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::config::SimConfig;
    use skirmish_sim::world_setup;

    fn wait_for_frame(latest: &Mutex<Option<FrameSnapshot>>) -> Option<FrameSnapshot> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(frame) = latest.lock().unwrap().clone() {
                return Some(frame);
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();
        tx.send(LoopCommand::Pause).unwrap();
        tx.send(LoopCommand::ToggleQuadtree).unwrap();
        tx.send(LoopCommand::Resume).unwrap();

        let overlay = AtomicBool::new(true);
        let mut control = LoopControl::default();
        control.drain(&rx, &overlay);

        assert!(!control.paused);
        assert!(!control.shutdown);
        assert!(!overlay.load(Ordering::Relaxed));
    }

    #[test]
    fn test_pause_and_shutdown() {
        let overlay = AtomicBool::new(true);
        let mut control = LoopControl::default();
        control.apply(LoopCommand::Pause, &overlay);
        assert!(control.paused);
        control.apply(LoopCommand::Shutdown, &overlay);
        assert!(control.shutdown);
    }

    #[test]
    fn test_disconnect_counts_as_shutdown() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();
        drop(tx);
        let overlay = AtomicBool::new(true);
        let mut control = LoopControl::default();
        control.drain(&rx, &overlay);
        assert!(control.shutdown);
    }

    #[test]
    fn test_loop_publishes_and_stops() {
        let mut sim = SimulationManager::new(SimConfig::default()).unwrap();
        world_setup::setup_default(&mut sim);

        let latest = Arc::new(Mutex::new(None));
        let overlay = Arc::new(AtomicBool::new(true));
        let (tx, handle) =
            spawn_game_loop(sim, Arc::clone(&latest), Arc::clone(&overlay)).unwrap();

        let frame = wait_for_frame(&latest).expect("no frame published");
        assert_eq!(frame.units.len(), 4);
        assert!(frame.time.tick >= 1);

        tx.send(LoopCommand::Shutdown).unwrap();
        let ticks = handle.join().unwrap();
        assert!(ticks >= frame.time.tick);
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut sim = SimulationManager::new(SimConfig::default()).unwrap();
        world_setup::setup_default(&mut sim);
        world_setup::spawn_random_soldiers(&mut sim, 100);
        for _ in 0..50 {
            sim.tick();
        }

        let snapshot = sim.snapshot();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.667ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}

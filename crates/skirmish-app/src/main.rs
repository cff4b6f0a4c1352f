use std::io::BufRead;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::{info, warn};

use skirmish_app::game_loop;
use skirmish_app::state::{AppState, LoopCommand};
use skirmish_app::terminal::AsciiCanvas;
use skirmish_core::config::SimConfig;
use skirmish_sim::render::Renderer;
use skirmish_sim::{world_setup, SimulationManager};

/// Extra soldiers scattered on top of the default four.
const RANDOM_SOLDIERS: usize = 40;
/// Terminal frames are printed far below the tick rate.
const FRAME_INTERVAL: Duration = Duration::from_millis(250);
const GRID_COLS: usize = 80;
const GRID_ROWS: usize = 30;

fn main() -> Result<()> {
    init_tracing();

    let config = load_config()?;
    let mut sim = SimulationManager::new(config).context("building simulation")?;
    world_setup::setup_default(&mut sim);
    world_setup::spawn_random_soldiers(&mut sim, RANDOM_SOLDIERS);
    let world = sim.world();

    let state = AppState::new();
    let (tx, handle) = game_loop::spawn_game_loop(
        sim,
        Arc::clone(&state.latest_snapshot),
        Arc::clone(&state.show_quadtree),
    )
    .context("spawning game loop")?;
    spawn_input_reader(tx.clone());
    if let Ok(mut slot) = state.command_tx.lock() {
        *slot = Some(tx);
    }
    info!("Starting skirmish; commands: p(ause) r(esume) q(uadtree) x(exit)");

    let frame_limit = frame_limit();
    let mut renderer = Renderer::default();
    let mut canvas = AsciiCanvas::new(world, GRID_COLS, GRID_ROWS);
    let mut printed = 0u64;

    while !handle.is_finished() {
        std::thread::sleep(FRAME_INTERVAL);
        let Some(frame) = state.latest() else {
            continue;
        };
        renderer.show_quadtree = state.show_quadtree.load(Ordering::Relaxed);
        renderer.render_snapshot(&frame, &mut canvas);
        print!("\x1b[2J\x1b[H{canvas}\ntick {}  units {}\n", frame.time.tick, frame.units.len());

        printed += 1;
        if frame_limit.is_some_and(|limit| printed >= limit) {
            state.send(LoopCommand::Shutdown);
            break;
        }
    }

    match handle.join() {
        Ok(ticks) => info!(ticks, "simulation finished"),
        Err(_) => warn!("game loop thread panicked"),
    }
    Ok(())
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Config from the file named by `SKIRMISH_CONFIG`, or the defaults.
fn load_config() -> Result<SimConfig> {
    match std::env::var_os("SKIRMISH_CONFIG") {
        Some(path) => {
            let config = SimConfig::load(&path)
                .with_context(|| format!("loading config from {}", path.to_string_lossy()))?;
            info!(path = %path.to_string_lossy(), "config loaded");
            Ok(config)
        }
        None => Ok(SimConfig::default()),
    }
}

/// Optional frame count after which the program exits, from `SKIRMISH_FRAMES`.
fn frame_limit() -> Option<u64> {
    let raw = std::env::var("SKIRMISH_FRAMES").ok()?;
    match raw.parse() {
        Ok(limit) => Some(limit),
        Err(_) => {
            warn!(value = %raw, "ignoring unparsable SKIRMISH_FRAMES");
            None
        }
    }
}

/// Forward terminal lines to the game loop until stdin closes or the loop exits.
fn spawn_input_reader(tx: std::sync::mpsc::Sender<LoopCommand>) {
    let spawned = std::thread::Builder::new()
        .name("skirmish-input".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                match LoopCommand::parse(&line) {
                    Some(command) => {
                        if tx.send(command).is_err() {
                            break;
                        }
                    }
                    None => warn!(input = %line, "unknown command"),
                }
            }
        });
    if let Err(err) = spawned {
        warn!(%err, "terminal input disabled");
    }
}

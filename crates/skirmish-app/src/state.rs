//! Application state shared between the frame printer and the game loop thread.

use std::sync::atomic::AtomicBool;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use skirmish_core::state::FrameSnapshot;

/// Commands sent to the game loop thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopCommand {
    /// Stop advancing ticks; the last frame stays published.
    Pause,
    Resume,
    /// Flip the quadtree overlay.
    ToggleQuadtree,
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

impl LoopCommand {
    /// Parse one line of terminal input.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "p" | "pause" => Some(Self::Pause),
            "r" | "resume" => Some(Self::Resume),
            "q" | "quadtree" => Some(Self::ToggleQuadtree),
            "x" | "exit" | "quit" => Some(Self::Shutdown),
            _ => None,
        }
    }
}

/// Shared application state.
///
/// The snapshot and overlay flag are shared with the game loop thread; the
/// sender is `None` until the loop has been spawned.
pub struct AppState {
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Latest frame, replaced after every tick.
    pub latest_snapshot: Arc<Mutex<Option<FrameSnapshot>>>,
    pub show_quadtree: Arc<AtomicBool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            show_quadtree: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the game loop. Returns false if no loop is listening.
    pub fn send(&self, command: LoopCommand) -> bool {
        match self.command_tx.lock() {
            Ok(guard) => guard.as_ref().is_some_and(|tx| tx.send(command).is_ok()),
            Err(_) => false,
        }
    }

    /// Clone of the most recent frame, if any has been published.
    pub fn latest(&self) -> Option<FrameSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|frame| frame.clone())
    }
}

//! Shared shell state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle over the shell's shared control flags.
///
/// Handlers request loop exit through this rather than returning a special
/// value, so a deeply nested helper can stop the shell the same way a
/// built-in does.
#[derive(Debug, Clone, Default)]
pub struct ShellContext {
    /// Set when a command asks the loop to stop
    quit: Arc<AtomicBool>,

    /// Set when a command asks the host process to re-execute itself
    reload: Arc<AtomicBool>,
}

impl ShellContext {
    /// Create a context with both flags clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask the run loop to stop after the current command.
    pub fn request_quit(&self) {
        self.quit.store(true, Ordering::Relaxed);
    }

    /// Whether a quit has been requested.
    pub fn quit_requested(&self) -> bool {
        self.quit.load(Ordering::Relaxed)
    }

    /// Ask the host process to re-execute itself once the loop stops.
    pub fn request_reload(&self) {
        self.reload.store(true, Ordering::Relaxed);
    }

    /// Whether a reload has been requested.
    pub fn reload_requested(&self) -> bool {
        self.reload.load(Ordering::Relaxed)
    }

    /// Clear both flags.
    pub fn reset(&self) {
        self.quit.store(false, Ordering::Relaxed);
        self.reload.store(false, Ordering::Relaxed);
    }
}

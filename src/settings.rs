//! Library Settings
//!
//! Process-wide mutable settings: the fail-safe, the per-operation pause, and
//! the cached mouse-acceleration snapshot. None of this has a lifecycle
//! beyond process duration.

use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{InputError, Result};
use crate::platform::{InputSystem, MouseParameters};

fn default_failsafe() -> bool {
    true
}

fn default_failsafe_points() -> Vec<(i32, i32)> {
    vec![(0, 0)]
}

fn default_pause_ms() -> u64 {
    10
}

/// Tunable library behavior
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Abort operations when the cursor rests on a fail-safe point
    #[serde(default = "default_failsafe")]
    pub failsafe: bool,

    /// Cursor positions that trigger the fail-safe (screen corners by default)
    #[serde(default = "default_failsafe_points")]
    pub failsafe_points: Vec<(i32, i32)>,

    /// Pause applied after each top-level operation, in milliseconds
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            failsafe: default_failsafe(),
            failsafe_points: default_failsafe_points(),
            pause_ms: default_pause_ms(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| InputError::Config(e.to_string()))
    }

    /// The per-operation pause as a [`Duration`]
    pub fn pause(&self) -> Duration {
        Duration::from_millis(self.pause_ms)
    }

    /// Whether a cursor position sits on a fail-safe point
    pub fn is_failsafe_position(&self, pos: (i32, i32)) -> bool {
        self.failsafe && self.failsafe_points.contains(&pos)
    }

    /// Run the fail-safe check against the current cursor position
    ///
    /// Skips the cursor query entirely while the fail-safe is disabled.
    pub fn check_failsafe<S: InputSystem + ?Sized>(&self, system: &S) -> Result<()> {
        if !self.failsafe {
            return Ok(());
        }
        let pos = system.cursor_position()?;
        if self.failsafe_points.contains(&pos) {
            warn!(x = pos.0, y = pos.1, "fail-safe triggered");
            return Err(InputError::FailSafeTriggered { x: pos.0, y: pos.1 });
        }
        Ok(())
    }
}

/// Guarded snapshot of the system mouse-acceleration parameters
///
/// The mutex serializes snapshot/restore pairs against each other; the
/// snapshot itself lives exactly as long as the process.
#[derive(Debug, Default)]
pub struct AccelerationGuard {
    cached: Mutex<Option<MouseParameters>>,
}

impl AccelerationGuard {
    /// Create an empty guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the current acceleration parameters
    ///
    /// A second store without an intervening restore overwrites the snapshot.
    pub fn store<S: InputSystem + ?Sized>(&self, system: &S) -> Result<()> {
        let mut cached = self.cached.lock();
        let params = system.mouse_parameters()?;
        debug!(?params, "mouse acceleration stored");
        *cached = Some(params);
        Ok(())
    }

    /// Snapshot and then switch off enhanced pointer precision
    ///
    /// Raw relative movement is distorted by the acceleration curve; callers
    /// disable it around relative moves and restore afterwards.
    pub fn disable<S: InputSystem + ?Sized>(&self, system: &S) -> Result<()> {
        let mut cached = self.cached.lock();
        let params = system.mouse_parameters()?;
        *cached = Some(params);
        let disabled = MouseParameters {
            acceleration: 0,
            ..params
        };
        system.set_mouse_parameters(&disabled)
    }

    /// Restore the snapshotted parameters; no-op without a snapshot
    pub fn restore<S: InputSystem + ?Sized>(&self, system: &S) -> Result<()> {
        let mut cached = self.cached.lock();
        match cached.take() {
            Some(params) => {
                debug!(?params, "mouse acceleration restored");
                system.set_mouse_parameters(&params)
            }
            None => Ok(()),
        }
    }

    /// Whether a snapshot is currently held
    pub fn has_snapshot(&self) -> bool {
        self.cached.lock().is_some()
    }
}

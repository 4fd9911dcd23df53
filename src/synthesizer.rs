//! Input Synthesizer
//!
//! Facade tying the keyboard, mouse, settings, and acceleration guard to a
//! single input system. Most callers construct one of these and never touch
//! the parts individually.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::error::Result;
use crate::keyboard::Keyboard;
use crate::mouse::Mouse;
use crate::platform::InputSystem;
use crate::settings::{AccelerationGuard, Settings};

/// Combined keyboard and mouse synthesizer over one input system
pub struct InputSynthesizer<S: InputSystem> {
    system: Arc<S>,
    settings: Arc<RwLock<Settings>>,
    /// Keyboard half
    pub keyboard: Keyboard<S>,
    /// Mouse half
    pub mouse: Mouse<S>,
    acceleration: AccelerationGuard,
}

impl<S: InputSystem> InputSynthesizer<S> {
    /// Create a synthesizer with default settings
    pub fn new(system: S) -> Self {
        Self::with_settings(system, Settings::default())
    }

    /// Create a synthesizer with explicit settings
    pub fn with_settings(system: S, settings: Settings) -> Self {
        let system = Arc::new(system);
        let settings = Arc::new(RwLock::new(settings));
        info!(
            failsafe = settings.read().failsafe,
            pause_ms = settings.read().pause_ms,
            "input synthesizer created"
        );
        Self {
            keyboard: Keyboard::new(Arc::clone(&system), Arc::clone(&settings)),
            mouse: Mouse::new(Arc::clone(&system), Arc::clone(&settings)),
            acceleration: AccelerationGuard::new(),
            system,
            settings,
        }
    }

    /// Current pointer position in pixels
    pub fn position(&self) -> Result<(i32, i32)> {
        self.system.cursor_position()
    }

    /// Primary display size in pixels
    pub fn display_size(&self) -> Result<(u32, u32)> {
        self.system.display_size()
    }

    /// Snapshot the system mouse-acceleration parameters
    pub fn store_acceleration(&self) -> Result<()> {
        self.acceleration.store(self.system.as_ref())
    }

    /// Snapshot, then switch off pointer acceleration
    pub fn disable_acceleration(&self) -> Result<()> {
        self.acceleration.disable(self.system.as_ref())
    }

    /// Restore the snapshotted acceleration parameters
    pub fn restore_acceleration(&self) -> Result<()> {
        self.acceleration.restore(self.system.as_ref())
    }

    /// Set the pause applied after each operation, in milliseconds
    pub fn set_pause(&self, pause_ms: u64) {
        self.settings.write().pause_ms = pause_ms;
    }

    /// Enable or disable the fail-safe
    pub fn set_failsafe(&self, enabled: bool) {
        self.settings.write().failsafe = enabled;
    }

    /// Add a cursor position that triggers the fail-safe
    pub fn add_failsafe_point(&self, x: i32, y: i32) {
        self.settings.write().failsafe_points.push((x, y));
    }

    /// The underlying input system
    pub fn system(&self) -> &S {
        self.system.as_ref()
    }

    /// Snapshot of the current settings
    pub fn settings(&self) -> Settings {
        self.settings.read().clone()
    }

    /// Total events accepted by the input system, both halves combined
    pub fn events_injected(&self) -> u64 {
        self.keyboard.events_injected() + self.mouse.events_injected()
    }

    /// Total completed operations, both halves combined
    pub fn operations_completed(&self) -> u64 {
        self.keyboard.operations_completed() + self.mouse.operations_completed()
    }
}

/// Synthesizer backed by the native Windows input system
#[cfg(windows)]
pub fn native() -> InputSynthesizer<crate::platform::WindowsInputSystem> {
    InputSynthesizer::new(crate::platform::WindowsInputSystem::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MockInputSystem;

    #[test]
    fn test_position_and_display_size() {
        let mut mock = MockInputSystem::new();
        mock.expect_cursor_position().returning(|| Ok((12, 34)));
        mock.expect_display_size().returning(|| Ok((2560, 1440)));

        let synth = InputSynthesizer::new(mock);
        assert_eq!(synth.position().unwrap(), (12, 34));
        assert_eq!(synth.display_size().unwrap(), (2560, 1440));
    }

    #[test]
    fn test_settings_shared_with_halves() {
        let mut mock = MockInputSystem::new();
        mock.expect_send().returning(|r| Ok(r.len() as u32));

        let mut synth = InputSynthesizer::new(mock);
        synth.set_failsafe(false);
        synth.set_pause(0);

        // With the fail-safe off, no cursor query happens; the mock would
        // panic on an unexpected cursor_position call.
        synth.keyboard.press("a").unwrap();
        assert_eq!(synth.events_injected(), 2);
        assert_eq!(synth.operations_completed(), 1);
    }

    #[test]
    fn test_add_failsafe_point() {
        let mock = MockInputSystem::new();
        let synth = InputSynthesizer::new(mock);
        synth.add_failsafe_point(1919, 1079);

        let settings = synth.settings();
        assert!(settings.is_failsafe_position((1919, 1079)));
        assert!(settings.is_failsafe_position((0, 0)));
    }
}

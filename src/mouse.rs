//! Mouse Synthesis
//!
//! Pointer movement, button transitions, clicks, and wheel scrolling.
//! Absolute moves travel as normalized desktop coordinates; `move_rel_raw`
//! bypasses normalization and is subject to the system acceleration curve.

use std::str::FromStr;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::coordinates::{clamp_to_display, lerp_path, to_absolute};
use crate::error::{InputError, Result};
use crate::event::{mouse_flags, InputRecord, WHEEL_DELTA};
use crate::platform::{inject, InputSystem};
use crate::settings::Settings;

/// Step duration for timed movement interpolation
const MOVE_QUANTUM: Duration = Duration::from_millis(10);

/// Physical mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Left (primary) button
    Left,
    /// Middle button / wheel click
    Middle,
    /// Right (secondary) button
    Right,
}

impl MouseButton {
    /// Button-down event flag
    pub fn down_flag(self) -> u32 {
        match self {
            Self::Left => mouse_flags::LEFTDOWN,
            Self::Middle => mouse_flags::MIDDLEDOWN,
            Self::Right => mouse_flags::RIGHTDOWN,
        }
    }

    /// Button-up event flag
    pub fn up_flag(self) -> u32 {
        match self {
            Self::Left => mouse_flags::LEFTUP,
            Self::Middle => mouse_flags::MIDDLEUP,
            Self::Right => mouse_flags::RIGHTUP,
        }
    }

    /// Combined down+up flags for a single-record click
    pub fn click_flags(self) -> u32 {
        self.down_flag() | self.up_flag()
    }

    fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }
}

impl FromStr for MouseButton {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "left" | "primary" => Ok(Self::Left),
            "middle" => Ok(Self::Middle),
            "right" | "secondary" => Ok(Self::Right),
            other => Err(InputError::UnknownKey {
                key: other.to_string(),
            }),
        }
    }
}

/// Mouse event synthesizer
pub struct Mouse<S: InputSystem> {
    system: Arc<S>,
    settings: Arc<RwLock<Settings>>,
    button_states: [bool; 3],
    events_injected: u64,
    operations_completed: u64,
}

impl<S: InputSystem> Mouse<S> {
    /// Create a mouse bound to an input system
    pub fn new(system: Arc<S>, settings: Arc<RwLock<Settings>>) -> Self {
        Self {
            system,
            settings,
            button_states: [false; 3],
            events_injected: 0,
            operations_completed: 0,
        }
    }

    /// Move the pointer to an absolute pixel position
    pub fn move_to(&mut self, x: i32, y: i32) -> Result<()> {
        self.check_failsafe()?;
        self.jump_to(x, y)?;
        self.complete_op();
        Ok(())
    }

    /// Move to a position where either axis may be left unchanged
    pub fn move_to_partial(&mut self, x: Option<i32>, y: Option<i32>) -> Result<()> {
        self.check_failsafe()?;
        let (cx, cy) = self.system.cursor_position()?;
        self.jump_to(x.unwrap_or(cx), y.unwrap_or(cy))?;
        self.complete_op();
        Ok(())
    }

    /// Move to an absolute position over a duration, in interpolated steps
    ///
    /// The path is quantized to 10 ms steps; durations below one step
    /// collapse to a single jump. The fail-safe is checked at every step,
    /// so a user slamming the cursor into a corner aborts mid-path.
    pub fn move_to_over(&mut self, x: i32, y: i32, duration: Duration) -> Result<()> {
        self.check_failsafe()?;

        let steps = (duration.as_millis() / MOVE_QUANTUM.as_millis()) as u32;
        if steps <= 1 {
            self.jump_to(x, y)?;
            self.complete_op();
            return Ok(());
        }

        let from = self.system.cursor_position()?;
        let path = lerp_path(from, (x, y), steps);
        debug!(?from, to_x = x, to_y = y, steps, "interpolated move");
        for (px, py) in path {
            self.check_failsafe()?;
            self.jump_to(px, py)?;
            thread::sleep(MOVE_QUANTUM);
        }
        self.complete_op();
        Ok(())
    }

    /// Move the pointer by a pixel offset, via an absolute target
    ///
    /// Computes the destination from the current position and injects an
    /// absolute move, which keeps the result exact under pointer
    /// acceleration.
    pub fn move_rel(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.check_failsafe()?;
        let (cx, cy) = self.system.cursor_position()?;
        self.jump_to(cx + dx, cy + dy)?;
        self.complete_op();
        Ok(())
    }

    /// Move the pointer by a raw relative offset
    ///
    /// The offset goes through the system acceleration curve, so the
    /// observed travel may differ from the requested one. Callers wanting
    /// exact travel should disable acceleration first or use [`move_rel`].
    ///
    /// [`move_rel`]: Self::move_rel
    pub fn move_rel_raw(&mut self, dx: i32, dy: i32) -> Result<()> {
        self.check_failsafe()?;
        let record = InputRecord::relative_move(dx, dy);
        self.events_injected += inject(self.system.as_ref(), &[record])? as u64;
        self.complete_op();
        Ok(())
    }

    /// Press a button down without releasing it
    pub fn button_down(&mut self, button: MouseButton) -> Result<()> {
        self.button_down_at(None, button)
    }

    /// Press a button down, optionally moving to a position first
    pub fn button_down_at(&mut self, at: Option<(i32, i32)>, button: MouseButton) -> Result<()> {
        self.check_failsafe()?;
        if let Some((x, y)) = at {
            self.jump_to(x, y)?;
        }
        let record = InputRecord::button(button.down_flag());
        self.events_injected += inject(self.system.as_ref(), &[record])? as u64;
        self.button_states[button.index()] = true;
        trace!(?button, "button down");
        self.complete_op();
        Ok(())
    }

    /// Release a previously pressed button
    pub fn button_up(&mut self, button: MouseButton) -> Result<()> {
        self.button_up_at(None, button)
    }

    /// Release a button, optionally moving to a position first
    pub fn button_up_at(&mut self, at: Option<(i32, i32)>, button: MouseButton) -> Result<()> {
        self.check_failsafe()?;
        if let Some((x, y)) = at {
            self.jump_to(x, y)?;
        }
        let record = InputRecord::button(button.up_flag());
        self.events_injected += inject(self.system.as_ref(), &[record])? as u64;
        self.button_states[button.index()] = false;
        trace!(?button, "button up");
        self.complete_op();
        Ok(())
    }

    /// Click a button one or more times
    ///
    /// Each click is one record carrying the combined down+up flags, with
    /// the fail-safe checked before each repetition.
    pub fn click(&mut self, button: MouseButton, clicks: u32, interval: Duration) -> Result<()> {
        for repetition in 0..clicks {
            self.check_failsafe()?;
            let record = InputRecord::button(button.click_flags());
            self.events_injected += inject(self.system.as_ref(), &[record])? as u64;
            if repetition + 1 < clicks && !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        self.complete_op();
        Ok(())
    }

    /// Move to a position, then click there
    pub fn click_at(&mut self, x: i32, y: i32, button: MouseButton) -> Result<()> {
        self.check_failsafe()?;
        self.jump_to(x, y)?;
        let record = InputRecord::button(button.click_flags());
        self.events_injected += inject(self.system.as_ref(), &[record])? as u64;
        self.complete_op();
        Ok(())
    }

    /// Double-click the left button
    pub fn double_click(&mut self) -> Result<()> {
        self.click(MouseButton::Left, 2, Duration::ZERO)
    }

    /// Triple-click the left button
    pub fn triple_click(&mut self) -> Result<()> {
        self.click(MouseButton::Left, 3, Duration::ZERO)
    }

    /// Scroll the wheel; positive scrolls up, negative down
    ///
    /// Each click is one wheel detent (120 units).
    pub fn scroll(&mut self, clicks: i32, interval: Duration) -> Result<()> {
        let delta = if clicks >= 0 { WHEEL_DELTA } else { -WHEEL_DELTA };
        for repetition in 0..clicks.unsigned_abs() {
            self.check_failsafe()?;
            let record = InputRecord::wheel(delta);
            self.events_injected += inject(self.system.as_ref(), &[record])? as u64;
            if repetition + 1 < clicks.unsigned_abs() && !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        self.complete_op();
        Ok(())
    }

    /// Whether a button is currently held down by this mouse
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.button_states[button.index()]
    }

    /// Total mouse events accepted by the input system
    pub fn events_injected(&self) -> u64 {
        self.events_injected
    }

    /// Total completed mouse operations
    pub fn operations_completed(&self) -> u64 {
        self.operations_completed
    }

    /// Inject one absolute move to a pixel position
    fn jump_to(&mut self, x: i32, y: i32) -> Result<()> {
        let (width, height) = self.system.display_size()?;
        let (x, y) = clamp_to_display(x, y, width, height);
        let (nx, ny) = to_absolute(x, y, width, height)?;
        let record = InputRecord::absolute_move(nx, ny);
        self.events_injected += inject(self.system.as_ref(), &[record])? as u64;
        Ok(())
    }

    fn check_failsafe(&self) -> Result<()> {
        self.settings.read().check_failsafe(self.system.as_ref())
    }

    /// Count a finished operation and apply the configured pause
    fn complete_op(&mut self) {
        self.operations_completed += 1;
        let pause = self.settings.read().pause();
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
}

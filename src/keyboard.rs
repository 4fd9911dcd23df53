//! Keyboard Synthesis
//!
//! Scan-code keyboard injection: single key transitions, taps, typed text,
//! and hotkey chords. Keys are addressed by name and resolved through the
//! scan-code table; characters requiring Shift are wrapped in a synthetic
//! Shift press around the key itself.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::error::{InputError, Result};
use crate::event::InputRecord;
use crate::platform::{inject, InputSystem};
use crate::scancode::{ScanCode, ScanCodeTable};
use crate::settings::Settings;

/// Left Shift scan code, used for shifted characters
const SHIFT_SCAN: u16 = 0x2A;

/// Keyboard event synthesizer
pub struct Keyboard<S: InputSystem> {
    system: Arc<S>,
    settings: Arc<RwLock<Settings>>,
    table: ScanCodeTable,
    /// Encoded scan codes currently held down
    pressed: HashSet<u32>,
    events_injected: u64,
    operations_completed: u64,
}

impl<S: InputSystem> Keyboard<S> {
    /// Create a keyboard bound to an input system
    pub fn new(system: Arc<S>, settings: Arc<RwLock<Settings>>) -> Self {
        Self {
            system,
            settings,
            table: ScanCodeTable::new(),
            pressed: HashSet::new(),
            events_injected: 0,
            operations_completed: 0,
        }
    }

    /// Press a key down without releasing it
    pub fn key_down(&mut self, key: &str) -> Result<()> {
        self.check_failsafe()?;
        let scan = self.resolve(key)?;
        self.transition_down(scan)?;
        self.complete_op();
        Ok(())
    }

    /// Release a previously pressed key
    pub fn key_up(&mut self, key: &str) -> Result<()> {
        self.check_failsafe()?;
        let scan = self.resolve(key)?;
        self.transition_up(scan)?;
        self.complete_op();
        Ok(())
    }

    /// Tap a key: press and release
    pub fn press(&mut self, key: &str) -> Result<()> {
        self.press_keys(&[key], 1, Duration::ZERO)
    }

    /// Tap a set of keys, in order, a number of times
    ///
    /// The fail-safe is checked before each repetition, not just once
    /// up front.
    pub fn press_keys(&mut self, keys: &[&str], presses: u32, interval: Duration) -> Result<()> {
        for repetition in 0..presses {
            self.check_failsafe()?;
            for key in keys {
                let scan = self.resolve(key)?;
                self.transition_down(scan)?;
                self.transition_up(scan)?;
            }
            if repetition + 1 < presses && !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        self.complete_op();
        Ok(())
    }

    /// Type a string character by character
    ///
    /// Fails on the first character with no scan-code mapping; characters
    /// already typed stay typed.
    pub fn write(&mut self, text: &str, interval: Duration) -> Result<()> {
        for ch in text.chars() {
            self.check_failsafe()?;
            let scan = self.resolve_char(ch)?;
            self.transition_down(scan)?;
            self.transition_up(scan)?;
            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        self.complete_op();
        Ok(())
    }

    /// Press a chord of keys in order, then release in reverse order
    ///
    /// `wait` separates the full press phase from the release phase.
    pub fn hotkey(&mut self, keys: &[&str], interval: Duration, wait: Duration) -> Result<()> {
        self.check_failsafe()?;

        let mut held = Vec::with_capacity(keys.len());
        for key in keys {
            let scan = self.resolve(key)?;
            self.transition_down(scan)?;
            held.push(scan);
            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        for scan in held.into_iter().rev() {
            self.transition_up(scan)?;
            if !interval.is_zero() {
                thread::sleep(interval);
            }
        }
        self.complete_op();
        Ok(())
    }

    /// Release every key this keyboard still holds down
    pub fn release_all(&mut self) -> Result<()> {
        let held: Vec<u32> = self.pressed.iter().copied().collect();
        for encoded in held {
            let scan = ScanCode::from_raw(encoded);
            let record = InputRecord::key_up(scan.code, scan.extended);
            self.events_injected += inject(self.system.as_ref(), &[record])? as u64;
            self.pressed.remove(&encoded);
        }
        debug!("released all held keys");
        Ok(())
    }

    /// Whether a key is currently held down by this keyboard
    pub fn is_key_down(&self, key: &str) -> bool {
        self.table
            .lookup(key)
            .map(|scan| self.pressed.contains(&Self::encode(scan)))
            .unwrap_or(false)
    }

    /// Total keyboard events accepted by the input system
    pub fn events_injected(&self) -> u64 {
        self.events_injected
    }

    /// Total completed keyboard operations
    pub fn operations_completed(&self) -> u64 {
        self.operations_completed
    }

    fn transition_down(&mut self, scan: ScanCode) -> Result<()> {
        let mut records = Vec::with_capacity(3);
        if scan.shifted {
            records.push(InputRecord::key_down(SHIFT_SCAN, false));
        }
        records.push(InputRecord::key_down(scan.code, scan.extended));
        if scan.shifted {
            records.push(InputRecord::key_up(SHIFT_SCAN, false));
        }
        trace!(code = scan.code, extended = scan.extended, "key down");
        self.events_injected += inject(self.system.as_ref(), &records)? as u64;
        self.pressed.insert(Self::encode(scan));
        Ok(())
    }

    fn transition_up(&mut self, scan: ScanCode) -> Result<()> {
        let record = InputRecord::key_up(scan.code, scan.extended);
        trace!(code = scan.code, extended = scan.extended, "key up");
        self.events_injected += inject(self.system.as_ref(), &[record])? as u64;
        self.pressed.remove(&Self::encode(scan));
        Ok(())
    }

    fn resolve(&self, key: &str) -> Result<ScanCode> {
        self.table.lookup(key).ok_or_else(|| InputError::UnknownKey {
            key: key.to_string(),
        })
    }

    fn resolve_char(&self, ch: char) -> Result<ScanCode> {
        self.table
            .lookup_char(ch)
            .ok_or(InputError::UnknownChar(ch))
    }

    fn encode(scan: ScanCode) -> u32 {
        let mut encoded = u32::from(scan.code);
        if scan.extended {
            encoded |= crate::scancode::EXTENDED_OFFSET;
        }
        encoded
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InputError;
    use crate::event::key_flags;
    use crate::platform::MockInputSystem;
    use parking_lot::Mutex;

    fn quiet_settings() -> Arc<RwLock<Settings>> {
        let mut settings = Settings::default();
        settings.failsafe = false;
        settings.pause_ms = 0;
        Arc::new(RwLock::new(settings))
    }

    /// Mock that records every injected batch and accepts everything
    fn recording_system(log: Arc<Mutex<Vec<Vec<InputRecord>>>>) -> MockInputSystem {
        let mut mock = MockInputSystem::new();
        mock.expect_send().returning(move |records| {
            log.lock().push(records.to_vec());
            Ok(records.len() as u32)
        });
        mock
    }

    #[test]
    fn test_key_down_up_tracks_state() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let system = Arc::new(recording_system(Arc::clone(&log)));
        let mut kb = Keyboard::new(system, quiet_settings());

        kb.key_down("a").unwrap();
        assert!(kb.is_key_down("a"));
        kb.key_up("a").unwrap();
        assert!(!kb.is_key_down("a"));
        assert_eq!(kb.events_injected(), 2);
    }

    #[test]
    fn test_extended_flag_set_on_both_transitions() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let system = Arc::new(recording_system(Arc::clone(&log)));
        let mut kb = Keyboard::new(system, quiet_settings());

        kb.press("up").unwrap();

        let batches = log.lock();
        let mut flags = Vec::new();
        for batch in batches.iter() {
            for record in batch {
                if let InputRecord::Keyboard { flags: f, .. } = record {
                    flags.push(*f);
                }
            }
        }
        assert_eq!(flags.len(), 2);
        assert!(flags[0] & key_flags::EXTENDEDKEY != 0);
        assert!(flags[1] & key_flags::EXTENDEDKEY != 0);
        assert!(flags[1] & key_flags::KEYUP != 0);
    }

    #[test]
    fn test_shifted_char_wrapped_in_shift() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let system = Arc::new(recording_system(Arc::clone(&log)));
        let mut kb = Keyboard::new(system, quiet_settings());

        kb.write("!", Duration::ZERO).unwrap();

        let batches = log.lock();
        // Down batch: shift down, key down, shift up
        let down = &batches[0];
        assert_eq!(down.len(), 3);
        match down[0] {
            InputRecord::Keyboard { scan, flags } => {
                assert_eq!(scan, SHIFT_SCAN);
                assert_eq!(flags & key_flags::KEYUP, 0);
            }
            _ => panic!("expected keyboard record"),
        }
        match down[2] {
            InputRecord::Keyboard { scan, flags } => {
                assert_eq!(scan, SHIFT_SCAN);
                assert!(flags & key_flags::KEYUP != 0);
            }
            _ => panic!("expected keyboard record"),
        }
    }

    #[test]
    fn test_write_unknown_char_errors() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let system = Arc::new(recording_system(Arc::clone(&log)));
        let mut kb = Keyboard::new(system, quiet_settings());

        let result = kb.write("a\u{263A}", Duration::ZERO);
        assert!(matches!(result, Err(InputError::UnknownChar('\u{263A}'))));
        // The leading 'a' was still typed
        assert_eq!(log.lock().len(), 2);
    }

    #[test]
    fn test_hotkey_releases_in_reverse_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let system = Arc::new(recording_system(Arc::clone(&log)));
        let mut kb = Keyboard::new(system, quiet_settings());

        kb.hotkey(&["ctrl", "shift", "escape"], Duration::ZERO, Duration::ZERO)
            .unwrap();

        let batches = log.lock();
        let events: Vec<(u16, bool)> = batches
            .iter()
            .flatten()
            .map(|r| match r {
                InputRecord::Keyboard { scan, flags } => (*scan, flags & key_flags::KEYUP != 0),
                _ => panic!("expected keyboard record"),
            })
            .collect();

        assert_eq!(events.len(), 6);
        // Presses in order, releases reversed
        let downs: Vec<u16> = events.iter().filter(|(_, up)| !up).map(|(s, _)| *s).collect();
        let ups: Vec<u16> = events.iter().filter(|(_, up)| *up).map(|(s, _)| *s).collect();
        let mut reversed = downs.clone();
        reversed.reverse();
        assert_eq!(ups, reversed);
    }

    #[test]
    fn test_press_keys_repeats() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let system = Arc::new(recording_system(Arc::clone(&log)));
        let mut kb = Keyboard::new(system, quiet_settings());

        kb.press_keys(&["enter"], 3, Duration::ZERO).unwrap();
        assert_eq!(kb.events_injected(), 6);
    }

    #[test]
    fn test_release_all() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let system = Arc::new(recording_system(Arc::clone(&log)));
        let mut kb = Keyboard::new(system, quiet_settings());

        kb.key_down("w").unwrap();
        kb.key_down("shift").unwrap();
        kb.release_all().unwrap();

        assert!(!kb.is_key_down("w"));
        assert!(!kb.is_key_down("shift"));
    }

    #[test]
    fn test_failsafe_blocks_key_press() {
        let mut mock = MockInputSystem::new();
        mock.expect_cursor_position().returning(|| Ok((0, 0)));

        let settings = Arc::new(RwLock::new(Settings::default()));
        let mut kb = Keyboard::new(Arc::new(mock), settings);

        let result = kb.press("a");
        assert!(matches!(result, Err(InputError::FailSafeTriggered { .. })));
        assert_eq!(kb.events_injected(), 0);
    }

    #[test]
    fn test_unknown_key_errors() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let system = Arc::new(recording_system(Arc::clone(&log)));
        let mut kb = Keyboard::new(system, quiet_settings());

        let result = kb.press("hyperdrive");
        assert!(matches!(result, Err(InputError::UnknownKey { .. })));
    }
}

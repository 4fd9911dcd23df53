//! Injection Event Records
//!
//! Platform-neutral representations of the event records marshalled for the
//! injection call, plus the winuser.h flag constants they carry. The Windows
//! backend converts these one-to-one into `INPUT` structures.

/// Keyboard input flags (KEYBDINPUT.dwFlags)
pub mod key_flags {
    /// Scan code carries the E0 prefix (extended key)
    pub const EXTENDEDKEY: u32 = 0x0001;
    /// Key release (absence means key press)
    pub const KEYUP: u32 = 0x0002;
    /// Interpret wScan as a hardware scan code instead of wVk
    pub const SCANCODE: u32 = 0x0008;
}

/// Mouse input flags (MOUSEINPUT.dwFlags)
pub mod mouse_flags {
    /// Movement occurred
    pub const MOVE: u32 = 0x0001;
    /// Left button down
    pub const LEFTDOWN: u32 = 0x0002;
    /// Left button up
    pub const LEFTUP: u32 = 0x0004;
    /// Right button down
    pub const RIGHTDOWN: u32 = 0x0008;
    /// Right button up
    pub const RIGHTUP: u32 = 0x0010;
    /// Middle button down
    pub const MIDDLEDOWN: u32 = 0x0020;
    /// Middle button up
    pub const MIDDLEUP: u32 = 0x0040;
    /// Wheel rotation, amount in the data field
    pub const WHEEL: u32 = 0x0800;
    /// dx/dy are normalized absolute coordinates (0-65535)
    pub const ABSOLUTE: u32 = 0x8000;
}

/// Wheel rotation amount corresponding to one detent click
pub const WHEEL_DELTA: i32 = 120;

/// A single event record for the injection call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRecord {
    /// Keyboard event (KEYBDINPUT)
    Keyboard {
        /// Hardware scan code
        scan: u16,
        /// Combination of [`key_flags`]
        flags: u32,
    },

    /// Mouse event (MOUSEINPUT)
    Mouse {
        /// X movement or normalized absolute X
        dx: i32,
        /// Y movement or normalized absolute Y
        dy: i32,
        /// Wheel delta or button data
        data: i32,
        /// Combination of [`mouse_flags`]
        flags: u32,
    },
}

impl InputRecord {
    /// Key press by scan code
    pub fn key_down(scan: u16, extended: bool) -> Self {
        let mut flags = key_flags::SCANCODE;
        if extended {
            flags |= key_flags::EXTENDEDKEY;
        }
        InputRecord::Keyboard { scan, flags }
    }

    /// Key release by scan code
    pub fn key_up(scan: u16, extended: bool) -> Self {
        let mut flags = key_flags::SCANCODE | key_flags::KEYUP;
        if extended {
            flags |= key_flags::EXTENDEDKEY;
        }
        InputRecord::Keyboard { scan, flags }
    }

    /// Mouse button event from raw button flags
    pub fn button(flags: u32) -> Self {
        InputRecord::Mouse {
            dx: 0,
            dy: 0,
            data: 0,
            flags,
        }
    }

    /// Absolute move to normalized (0-65535) coordinates
    pub fn absolute_move(nx: i32, ny: i32) -> Self {
        InputRecord::Mouse {
            dx: nx,
            dy: ny,
            data: 0,
            flags: mouse_flags::MOVE | mouse_flags::ABSOLUTE,
        }
    }

    /// Raw relative move in pixels, subject to OS pointer acceleration
    pub fn relative_move(dx: i32, dy: i32) -> Self {
        InputRecord::Mouse {
            dx,
            dy,
            data: 0,
            flags: mouse_flags::MOVE,
        }
    }

    /// Vertical wheel rotation; positive scrolls up
    pub fn wheel(delta: i32) -> Self {
        InputRecord::Mouse {
            dx: 0,
            dy: 0,
            data: delta,
            flags: mouse_flags::WHEEL,
        }
    }

    /// Whether this record is a keyboard event
    pub fn is_keyboard(&self) -> bool {
        matches!(self, InputRecord::Keyboard { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_down_flags() {
        let record = InputRecord::key_down(0x1E, false);
        match record {
            InputRecord::Keyboard { scan, flags } => {
                assert_eq!(scan, 0x1E);
                assert_eq!(flags, key_flags::SCANCODE);
            }
            _ => panic!("Expected Keyboard record"),
        }
    }

    #[test]
    fn test_extended_key_flags() {
        let record = InputRecord::key_down(0x48, true);
        match record {
            InputRecord::Keyboard { flags, .. } => {
                assert_ne!(flags & key_flags::EXTENDEDKEY, 0);
                assert_eq!(flags & key_flags::KEYUP, 0);
            }
            _ => panic!("Expected Keyboard record"),
        }

        let record = InputRecord::key_up(0x48, true);
        match record {
            InputRecord::Keyboard { flags, .. } => {
                assert_ne!(flags & key_flags::EXTENDEDKEY, 0);
                assert_ne!(flags & key_flags::KEYUP, 0);
            }
            _ => panic!("Expected Keyboard record"),
        }
    }

    #[test]
    fn test_absolute_move_record() {
        let record = InputRecord::absolute_move(32768, 32768);
        match record {
            InputRecord::Mouse { dx, dy, flags, .. } => {
                assert_eq!((dx, dy), (32768, 32768));
                assert_ne!(flags & mouse_flags::ABSOLUTE, 0);
                assert_ne!(flags & mouse_flags::MOVE, 0);
            }
            _ => panic!("Expected Mouse record"),
        }
    }

    #[test]
    fn test_relative_move_has_no_absolute_flag() {
        let record = InputRecord::relative_move(-5, 12);
        match record {
            InputRecord::Mouse { dx, dy, flags, .. } => {
                assert_eq!((dx, dy), (-5, 12));
                assert_eq!(flags & mouse_flags::ABSOLUTE, 0);
            }
            _ => panic!("Expected Mouse record"),
        }
    }

    #[test]
    fn test_wheel_record() {
        let record = InputRecord::wheel(-WHEEL_DELTA);
        match record {
            InputRecord::Mouse { data, flags, .. } => {
                assert_eq!(data, -120);
                assert_eq!(flags, mouse_flags::WHEEL);
            }
            _ => panic!("Expected Mouse record"),
        }
    }
}

//! Scan Code Mapping Table
//!
//! Key-name to DirectInput scan-code translation. Raw table values use two
//! offsets on top of the base scan code: [`EXTENDED_OFFSET`] marks keys that
//! need the E0 prefix (extended-key flag on injection) and [`SHIFT_OFFSET`]
//! marks characters only reachable while Shift is held.

use std::collections::HashMap;

/// Offset marking extended-set (E0 prefix) keys in raw table values
pub const EXTENDED_OFFSET: u32 = 0x400;

/// Offset marking characters that require Shift in raw table values
pub const SHIFT_OFFSET: u32 = 0x10000;

/// A decoded scan code ready for event construction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanCode {
    /// Hardware scan code
    pub code: u16,
    /// Key needs the extended-key flag (E0 prefix)
    pub extended: bool,
    /// Key is only reachable with Shift held
    pub shifted: bool,
}

impl ScanCode {
    /// Decode a raw table value into its components
    pub fn from_raw(raw: u32) -> Self {
        Self {
            code: (raw & 0x3FF) as u16,
            extended: raw & EXTENDED_OFFSET != 0,
            shifted: raw & SHIFT_OFFSET != 0,
        }
    }
}

// Named keys, base and extended set. Values follow the DirectInput key codes,
// with EXTENDED_OFFSET on E0-prefixed keys. Arrow keys are pinned to the
// extended navigation cluster rather than resolved through MapVirtualKey;
// standard layouts report exactly these codes.
const NAMED_KEYS: &[(&str, u32)] = &[
    ("escape", 0x01),
    ("esc", 0x01),
    ("f1", 0x3B),
    ("f2", 0x3C),
    ("f3", 0x3D),
    ("f4", 0x3E),
    ("f5", 0x3F),
    ("f6", 0x40),
    ("f7", 0x41),
    ("f8", 0x42),
    ("f9", 0x43),
    ("f10", 0x44),
    ("f11", 0x57),
    ("f12", 0x58),
    ("printscreen", 0xB7),
    ("prntscrn", 0xB7),
    ("prtsc", 0xB7),
    ("prtscr", 0xB7),
    ("scrolllock", 0x46),
    ("pause", 0xC5),
    ("`", 0x29),
    ("1", 0x02),
    ("2", 0x03),
    ("3", 0x04),
    ("4", 0x05),
    ("5", 0x06),
    ("6", 0x07),
    ("7", 0x08),
    ("8", 0x09),
    ("9", 0x0A),
    ("0", 0x0B),
    ("-", 0x0C),
    ("=", 0x0D),
    ("backspace", 0x0E),
    ("insert", 0xD2 + EXTENDED_OFFSET),
    ("home", 0xC7 + EXTENDED_OFFSET),
    ("pageup", 0xC9 + EXTENDED_OFFSET),
    ("pagedown", 0xD1 + EXTENDED_OFFSET),
    // numpad
    ("numlock", 0x45),
    ("divide", 0xB5 + EXTENDED_OFFSET),
    ("multiply", 0x37),
    ("subtract", 0x4A),
    ("add", 0x4E),
    ("decimal", 0x53),
    ("numpadenter", 0x9C + EXTENDED_OFFSET),
    ("numpad1", 0x4F),
    ("numpad2", 0x50),
    ("numpad3", 0x51),
    ("numpad4", 0x4B),
    ("numpad5", 0x4C),
    ("numpad6", 0x4D),
    ("numpad7", 0x47),
    ("numpad8", 0x48),
    ("numpad9", 0x49),
    ("numpad0", 0x52),
    ("tab", 0x0F),
    ("q", 0x10),
    ("w", 0x11),
    ("e", 0x12),
    ("r", 0x13),
    ("t", 0x14),
    ("y", 0x15),
    ("u", 0x16),
    ("i", 0x17),
    ("o", 0x18),
    ("p", 0x19),
    ("[", 0x1A),
    ("]", 0x1B),
    ("\\", 0x2B),
    ("del", 0xD3 + EXTENDED_OFFSET),
    ("delete", 0xD3 + EXTENDED_OFFSET),
    ("end", 0xCF + EXTENDED_OFFSET),
    ("capslock", 0x3A),
    ("a", 0x1E),
    ("s", 0x1F),
    ("d", 0x20),
    ("f", 0x21),
    ("g", 0x22),
    ("h", 0x23),
    ("j", 0x24),
    ("k", 0x25),
    ("l", 0x26),
    (";", 0x27),
    ("'", 0x28),
    ("enter", 0x1C),
    ("return", 0x1C),
    ("shift", 0x2A),
    ("shiftleft", 0x2A),
    ("z", 0x2C),
    ("x", 0x2D),
    ("c", 0x2E),
    ("v", 0x2F),
    ("b", 0x30),
    ("n", 0x31),
    ("m", 0x32),
    (",", 0x33),
    (".", 0x34),
    ("/", 0x35),
    ("shiftright", 0x36),
    ("ctrl", 0x1D),
    ("ctrlleft", 0x1D),
    ("win", 0xDB + EXTENDED_OFFSET),
    ("winleft", 0xDB + EXTENDED_OFFSET),
    ("alt", 0x38),
    ("altleft", 0x38),
    (" ", 0x39),
    ("space", 0x39),
    ("altright", 0xB8 + EXTENDED_OFFSET),
    ("winright", 0xDC + EXTENDED_OFFSET),
    ("apps", 0xDD + EXTENDED_OFFSET),
    ("ctrlright", 0x9D + EXTENDED_OFFSET),
    ("up", 0x48 + EXTENDED_OFFSET),
    ("left", 0x4B + EXTENDED_OFFSET),
    ("down", 0x50 + EXTENDED_OFFSET),
    ("right", 0x4D + EXTENDED_OFFSET),
];

// Shift-offset characters: each maps to its base key's scan code plus
// SHIFT_OFFSET (US layout).
const SHIFTED_KEYS: &[(&str, u32)] = &[
    ("!", 0x02 + SHIFT_OFFSET),
    ("@", 0x03 + SHIFT_OFFSET),
    ("#", 0x04 + SHIFT_OFFSET),
    ("$", 0x05 + SHIFT_OFFSET),
    ("%", 0x06 + SHIFT_OFFSET),
    ("^", 0x07 + SHIFT_OFFSET),
    ("&", 0x08 + SHIFT_OFFSET),
    ("*", 0x09 + SHIFT_OFFSET),
    ("(", 0x0A + SHIFT_OFFSET),
    (")", 0x0B + SHIFT_OFFSET),
    ("_", 0x0C + SHIFT_OFFSET),
    ("+", 0x0D + SHIFT_OFFSET),
    ("{", 0x1A + SHIFT_OFFSET),
    ("}", 0x1B + SHIFT_OFFSET),
    ("|", 0x2B + SHIFT_OFFSET),
    (":", 0x27 + SHIFT_OFFSET),
    ("\"", 0x28 + SHIFT_OFFSET),
    ("~", 0x29 + SHIFT_OFFSET),
    ("<", 0x33 + SHIFT_OFFSET),
    (">", 0x34 + SHIFT_OFFSET),
    ("?", 0x35 + SHIFT_OFFSET),
];

/// Scan code table handles key-name to scan-code translation
pub struct ScanCodeTable {
    /// Name map, named keys plus shifted characters
    map: HashMap<&'static str, u32>,
}

impl ScanCodeTable {
    /// Create a new scan code table
    pub fn new() -> Self {
        let mut map = HashMap::with_capacity(NAMED_KEYS.len() + SHIFTED_KEYS.len());
        for &(name, raw) in NAMED_KEYS {
            map.insert(name, raw);
        }
        for &(name, raw) in SHIFTED_KEYS {
            map.insert(name, raw);
        }
        Self { map }
    }

    /// Look up a key by name
    ///
    /// Multi-character names are matched case-insensitively; single
    /// characters resolve through [`ScanCodeTable::lookup_char`] so that
    /// uppercase letters pick up the shift requirement.
    pub fn lookup(&self, key: &str) -> Option<ScanCode> {
        let mut chars = key.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return self.lookup_char(c);
        }
        let lowered = key.to_ascii_lowercase();
        self.map.get(lowered.as_str()).map(|&raw| ScanCode::from_raw(raw))
    }

    /// Look up a single character
    ///
    /// Uppercase ASCII letters resolve to the lowercase key with the shift
    /// requirement set; shifted punctuation resolves through the table's
    /// shift-offset entries.
    pub fn lookup_char(&self, c: char) -> Option<ScanCode> {
        if c.is_ascii_uppercase() {
            let lower = c.to_ascii_lowercase();
            let mut buf = [0u8; 4];
            let raw = *self.map.get(lower.encode_utf8(&mut buf) as &str)?;
            let mut sc = ScanCode::from_raw(raw);
            sc.shifted = true;
            return Some(sc);
        }
        let mut buf = [0u8; 4];
        self.map
            .get(c.encode_utf8(&mut buf) as &str)
            .map(|&raw| ScanCode::from_raw(raw))
    }

    /// Check if a key name is mapped
    pub fn is_mapped(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Get total number of mapped names (aliases counted separately)
    pub fn mapped_key_count(&self) -> usize {
        self.map.len()
    }
}

impl Default for ScanCodeTable {
    fn default() -> Self {
        Self::new()
    }
}

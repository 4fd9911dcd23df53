//! # directinput
//!
//! Scan-code level keyboard and mouse synthesis for Windows.
//!
//! Events are injected at the hardware scan-code layer rather than through
//! virtual-key messages, so DirectInput applications (games, full-screen
//! clients) observe them the same way they observe a physical device.
//!
//! # Architecture
//!
//! ```text
//! InputSynthesizer
//!   ├─> Keyboard (scan-code table, shift wrapping, hotkey chords)
//!   ├─> Mouse (normalized absolute moves, clicks, wheel)
//!   ├─> Settings (fail-safe, per-operation pause)
//!   ├─> AccelerationGuard (mouse-acceleration snapshot/restore)
//!   └─> InputSystem (platform seam; SendInput on Windows)
//! ```
//!
//! Everything above the [`InputSystem`] trait is platform independent and
//! tests against a mock; only the Windows backend touches the OS.
//!
//! # Example
//!
//! ```no_run
//! # #[cfg(windows)]
//! # fn run() -> directinput::Result<()> {
//! use std::time::Duration;
//!
//! let mut synth = directinput::native();
//! synth.mouse.move_to_over(800, 600, Duration::from_millis(250))?;
//! synth.keyboard.hotkey(&["ctrl", "s"], Duration::ZERO, Duration::ZERO)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Pixel to normalized desktop coordinate conversion
pub mod coordinates;

/// Error types and classification
pub mod error;

/// Platform-neutral input event records
pub mod event;

/// Keyboard synthesis
pub mod keyboard;

/// Mouse synthesis
pub mod mouse;

/// Input system trait and platform backends
pub mod platform;

/// Key name to scan-code resolution
pub mod scancode;

/// Library settings and the acceleration guard
pub mod settings;

/// Combined keyboard and mouse facade
pub mod synthesizer;

pub use error::{classify_error, ErrorKind, InputError, Result};
pub use event::InputRecord;
pub use keyboard::Keyboard;
pub use mouse::{Mouse, MouseButton};
pub use platform::{InputSystem, MouseParameters};
pub use scancode::{ScanCode, ScanCodeTable};
pub use settings::{AccelerationGuard, Settings};
pub use synthesizer::InputSynthesizer;

#[cfg(windows)]
pub use platform::WindowsInputSystem;
#[cfg(windows)]
pub use synthesizer::native;

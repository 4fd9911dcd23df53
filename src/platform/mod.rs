//! Platform Abstraction
//!
//! The syscall seam: everything the library needs from the operating system
//! is behind [`InputSystem`]. The core logic (tables, conversion, sequencing)
//! never touches the OS directly, so it tests against a mock backend; the
//! only real implementation is the Windows one.

use crate::error::{InputError, Result};
use crate::event::InputRecord;

#[cfg(windows)]
mod windows;

#[cfg(windows)]
pub use self::windows::WindowsInputSystem;

/// System-wide mouse acceleration parameters (the SPI_GETMOUSE triple)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseParameters {
    /// First movement threshold
    pub threshold1: i32,
    /// Second movement threshold
    pub threshold2: i32,
    /// Acceleration level (0 disables enhanced pointer precision)
    pub acceleration: i32,
}

/// Operating system input primitives
///
/// `send` is the injection call itself: it accepts a batch of event records
/// and returns how many the OS inserted into the input stream. The remaining
/// methods are the query/update primitives the conveniences are built on.
#[cfg_attr(test, mockall::automock)]
pub trait InputSystem {
    /// Inject a batch of event records, returning the accepted count
    fn send(&self, records: &[InputRecord]) -> Result<u32>;

    /// Current cursor position in pixels
    fn cursor_position(&self) -> Result<(i32, i32)>;

    /// Primary display size in pixels
    fn display_size(&self) -> Result<(u32, u32)>;

    /// Read the system mouse acceleration parameters
    fn mouse_parameters(&self) -> Result<MouseParameters>;

    /// Write the system mouse acceleration parameters
    fn set_mouse_parameters(&self, params: &MouseParameters) -> Result<()>;
}

/// Inject records and verify the accepted count
///
/// The injection call reports success as a count of accepted events; anything
/// short of the submitted batch is surfaced as [`InputError::InjectionRejected`].
pub fn inject<S: InputSystem + ?Sized>(system: &S, records: &[InputRecord]) -> Result<u32> {
    let expected = records.len() as u32;
    let injected = system.send(records)?;
    if injected != expected {
        return Err(InputError::InjectionRejected { expected, injected });
    }
    Ok(injected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::InputRecord;

    #[test]
    fn test_inject_full_batch_ok() {
        let mut mock = MockInputSystem::new();
        mock.expect_send().returning(|records| Ok(records.len() as u32));

        let records = [InputRecord::key_down(0x1E, false), InputRecord::key_up(0x1E, false)];
        assert_eq!(inject(&mock, &records).unwrap(), 2);
    }

    #[test]
    fn test_inject_partial_batch_rejected() {
        let mut mock = MockInputSystem::new();
        mock.expect_send().returning(|_| Ok(0));

        let records = [InputRecord::key_down(0x1E, false)];
        match inject(&mock, &records) {
            Err(InputError::InjectionRejected { expected, injected }) => {
                assert_eq!(expected, 1);
                assert_eq!(injected, 0);
            }
            other => panic!("Expected InjectionRejected, got {other:?}"),
        }
    }
}

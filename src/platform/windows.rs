//! Windows Backend
//!
//! Marshals [`InputRecord`] batches into `INPUT` structures and drives the
//! user32 primitives: SendInput, GetCursorPos, GetSystemMetrics, and
//! SystemParametersInfo for the acceleration triple.

use std::ffi::c_void;
use std::mem::size_of;

use tracing::debug;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS,
    MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SystemParametersInfoW, SM_CXSCREEN, SM_CYSCREEN, SPI_GETMOUSE,
    SPI_SETMOUSE, SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
};

use crate::error::{InputError, Result};
use crate::event::InputRecord;
use crate::platform::{InputSystem, MouseParameters};

/// Input backend driving the Win32 injection primitives
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowsInputSystem;

impl WindowsInputSystem {
    /// Create the Windows backend
    pub fn new() -> Self {
        Self
    }
}

fn marshal(record: &InputRecord) -> INPUT {
    match *record {
        InputRecord::Keyboard { scan, flags } => INPUT {
            r#type: INPUT_KEYBOARD,
            Anonymous: INPUT_0 {
                ki: KEYBDINPUT {
                    wVk: VIRTUAL_KEY(0),
                    wScan: scan,
                    dwFlags: KEYBD_EVENT_FLAGS(flags),
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        },
        InputRecord::Mouse {
            dx,
            dy,
            data,
            flags,
        } => INPUT {
            r#type: INPUT_MOUSE,
            Anonymous: INPUT_0 {
                mi: MOUSEINPUT {
                    dx,
                    dy,
                    mouseData: data,
                    dwFlags: MOUSE_EVENT_FLAGS(flags),
                    time: 0,
                    dwExtraInfo: 0,
                },
            },
        },
    }
}

impl InputSystem for WindowsInputSystem {
    fn send(&self, records: &[InputRecord]) -> Result<u32> {
        let inputs: Vec<INPUT> = records.iter().map(marshal).collect();
        let accepted = unsafe { SendInput(&inputs, size_of::<INPUT>() as i32) };
        debug!(submitted = inputs.len(), accepted, "SendInput");
        Ok(accepted)
    }

    fn cursor_position(&self) -> Result<(i32, i32)> {
        let mut point = POINT::default();
        unsafe { GetCursorPos(&mut point) }
            .map_err(|e| InputError::CursorPosition(e.to_string()))?;
        Ok((point.x, point.y))
    }

    fn display_size(&self) -> Result<(u32, u32)> {
        let width = unsafe { GetSystemMetrics(SM_CXSCREEN) };
        let height = unsafe { GetSystemMetrics(SM_CYSCREEN) };
        if width <= 0 || height <= 0 {
            return Err(InputError::DisplayMetrics(width.max(0) as u32, height.max(0) as u32));
        }
        Ok((width as u32, height as u32))
    }

    fn mouse_parameters(&self) -> Result<MouseParameters> {
        let mut triple = [0i32; 3];
        unsafe {
            SystemParametersInfoW(
                SPI_GETMOUSE,
                0,
                Some(triple.as_mut_ptr() as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|e| InputError::MouseParameters(e.to_string()))?;
        Ok(MouseParameters {
            threshold1: triple[0],
            threshold2: triple[1],
            acceleration: triple[2],
        })
    }

    fn set_mouse_parameters(&self, params: &MouseParameters) -> Result<()> {
        let mut triple = [params.threshold1, params.threshold2, params.acceleration];
        unsafe {
            SystemParametersInfoW(
                SPI_SETMOUSE,
                0,
                Some(triple.as_mut_ptr() as *mut c_void),
                SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
            )
        }
        .map_err(|e| InputError::MouseParameters(e.to_string()))?;
        debug!(?params, "mouse parameters updated");
        Ok(())
    }
}

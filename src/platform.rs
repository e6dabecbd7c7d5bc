//! The two OS primitives the registry and the event loop are built on.

use crate::hotkey::Modifiers;
use std::io;

/// Raw outcome of an OS call: the result code plus whatever the system reported as
/// its last error.
#[derive(Debug)]
pub struct CallResult {
    pub code: isize,
    pub error: Option<io::Error>,
}

impl CallResult {
    /// Success sentinel for both primitives.
    pub const SUCCESS: isize = 1;

    pub fn ok() -> Self {
        Self {
            code: Self::SUCCESS,
            error: None,
        }
    }

    pub fn failed(code: isize, error: io::Error) -> Self {
        Self {
            code,
            error: Some(error),
        }
    }

    /// A reported error only counts when the code is not the success sentinel.
    pub fn is_fatal(&self) -> bool {
        self.error.is_some() && self.code != Self::SUCCESS
    }

    /// Text of the reported error, if any.
    pub fn error_text(&self) -> Option<String> {
        self.error.as_ref().map(|e| e.to_string())
    }
}

/// One retrieved message. `param` carries the hotkey id, 0 for anything else.
#[derive(Debug)]
pub struct Message {
    pub result: CallResult,
    pub param: usize,
}

/// Access to the host's hotkey binding and message queue.
///
/// Implementations tied to a thread-affine queue should not be `Send`.
pub trait Platform {
    /// Ask the OS to deliver `id` whenever `modifiers` + `key_code` is pressed.
    fn register_hotkey(&self, id: i32, modifiers: Modifiers, key_code: u32) -> CallResult;

    /// Block until the next message arrives on the owning thread's queue.
    fn next_message(&self) -> Message;
}

#[cfg(windows)]
pub use crate::win32::Win32Queue as NativeQueue;

#[cfg(not(windows))]
pub use crate::unsupported::UnsupportedQueue as NativeQueue;

//! Stand-in for targets without a Win32 message queue.

use crate::hotkey::Modifiers;
use crate::platform::{CallResult, Message, Platform};
use std::io;

/// Every registration is refused and the message loop fails on its first poll.
pub struct UnsupportedQueue;

impl UnsupportedQueue {
    pub fn current_thread() -> Self {
        UnsupportedQueue
    }

    fn error() -> io::Error {
        io::Error::new(
            io::ErrorKind::Unsupported,
            "Global hotkeys are not supported on this platform",
        )
    }
}

impl Platform for UnsupportedQueue {
    fn register_hotkey(&self, _id: i32, _modifiers: Modifiers, _key_code: u32) -> CallResult {
        CallResult::failed(0, Self::error())
    }

    fn next_message(&self) -> Message {
        Message {
            result: CallResult::failed(-1, Self::error()),
            param: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_fails() {
        let queue = UnsupportedQueue::current_thread();
        assert!(queue
            .register_hotkey(1, Modifiers::CTRL, 'A' as u32)
            .is_fatal());
        assert!(queue.next_message().result.is_fatal());
    }
}

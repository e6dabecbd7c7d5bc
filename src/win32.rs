//! Win32 implementation using `RegisterHotKey` and `GetMessageW`.

use crate::hotkey::Modifiers;
use crate::platform::{CallResult, Message, Platform};
use std::io;
use std::marker::PhantomData;
use ::windows::Win32::UI::Input::KeyboardAndMouse::{RegisterHotKey, HOT_KEY_MODIFIERS};
use ::windows::Win32::UI::WindowsAndMessaging::{GetMessageW, MSG, WM_HOTKEY};

/// The calling thread's message queue.
///
/// Hotkeys registered without a window are posted to the queue of the thread
/// that registered them, so this type is `!Send` and `!Sync`: create it on
/// the thread that will run the event loop and keep it there.
pub struct Win32Queue {
    _thread_bound: PhantomData<*const ()>,
}

impl Win32Queue {
    /// Bind to the current thread's message queue.
    pub fn current_thread() -> Self {
        log::debug!("Using message queue of thread {:?}", std::thread::current().id());
        Self {
            _thread_bound: PhantomData,
        }
    }
}

impl Platform for Win32Queue {
    fn register_hotkey(&self, id: i32, modifiers: Modifiers, key_code: u32) -> CallResult {
        // SAFETY: no window handle is involved; the hotkey is bound to this thread.
        match unsafe { RegisterHotKey(None, id, HOT_KEY_MODIFIERS(modifiers.bits()), key_code) } {
            Ok(()) => CallResult::ok(),
            Err(e) => CallResult::failed(0, io::Error::other(e.to_string())),
        }
    }

    fn next_message(&self) -> Message {
        let mut msg = MSG::default();
        // SAFETY: `msg` is a valid, writable MSG for the duration of the call.
        let ret = unsafe { GetMessageW(&mut msg, None, 0, 0) }.0 as isize;

        let result = match ret {
            -1 => CallResult::failed(ret, io::Error::last_os_error()),
            0 => CallResult::failed(ret, io::Error::other("WM_QUIT received")),
            _ => CallResult::ok(),
        };
        let param = if msg.message == WM_HOTKEY {
            msg.wParam.0
        } else {
            0
        };

        Message { result, param }
    }
}

//! Global hotkeys on the Win32 message queue.
//!
//! Hotkeys are bound with `RegisterHotKey` and delivered through the calling
//! thread's message queue. A [`Registry`] keeps the id → hotkey table and an
//! [`EventLoop`] pumps the queue, handing every match to the hotkey's callback
//! (on its own thread) and/or its bounded channel (without blocking).
//!
//! # Features
//!
//! - **Callback and channel delivery** - attach either or both to a hotkey
//! - **Non-blocking fan-out** - a slow consumer never stalls the message pump
//! - **Accelerator strings** - parse `Ctrl+Shift+A` style definitions
//! - **Thread affinity in the type system** - the native registry is `!Send`
//!
//! # Example
//!
//! ```no_run
//! use std::sync::{mpsc, Arc};
//! use std::thread;
//! use win_hotkey::{parse_hotkey, EventLoop, Hotkey, Modifiers, Registry};
//!
//! fn main() -> anyhow::Result<()> {
//!     // Registry and loop must live on the thread that owns the message queue.
//!     let registry = Arc::new(Registry::for_current_thread());
//!
//!     let (tx, rx) = mpsc::sync_channel(8);
//!     registry.register(parse_hotkey(1, "NoRepeat Ctrl+Shift+A")?.with_channel(tx))?;
//!     registry.register(
//!         Hotkey::new(2, Modifiers::CTRL | Modifiers::ALT, 'A' as u32)
//!             .with_callback(|h| println!("{} pressed", h)),
//!     )?;
//!
//!     thread::spawn(move || {
//!         for hotkey in rx {
//!             println!("{} received", hotkey);
//!         }
//!     });
//!
//!     Err(EventLoop::new(registry).run().into())
//! }
//! ```
//!
//! # Platform support
//!
//! Only Windows has a native backend. Elsewhere registration fails and the
//! loop returns immediately, so code using the crate still builds.

mod error;
mod event_loop;
mod hotkey;
mod key;
mod platform;
mod registry;

#[cfg(windows)]
mod win32;

#[cfg(not(windows))]
mod unsupported;

pub use error::{Error, Result};
pub use event_loop::EventLoop;
pub use hotkey::{parse_hotkey, Hotkey, HotkeyCallback, Modifiers};
pub use key::Key;
pub use platform::{CallResult, Message, NativeQueue, Platform};
pub use registry::Registry;

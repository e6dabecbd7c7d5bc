//! Registers a few hotkeys and logs every time one is pressed.
//!
//! Run with `RUST_LOG=debug cargo run --example register` and press
//! Ctrl+Shift+A, Ctrl+Alt+A or Ctrl+Win+A. Ctrl-C exits.

use anyhow::{Context, Result};
use std::sync::{mpsc, Arc};
use std::thread;
use win_hotkey::{parse_hotkey, EventLoop, Hotkey, Modifiers, Registry};

fn on_pressed(hotkey: &Hotkey) {
    log::info!("Callback {} pressed", hotkey);
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Registration and the loop have to stay on this thread: it owns the message queue.
    let registry = Arc::new(Registry::for_current_thread());
    let (tx, rx) = mpsc::sync_channel(16);

    let hotkeys = [
        parse_hotkey(1, "NoRepeat Ctrl+Shift+A")?.with_channel(tx.clone()),
        Hotkey::new(2, Modifiers::CTRL | Modifiers::ALT, 'A' as u32).with_callback(on_pressed),
        Hotkey::new(3, Modifiers::CTRL | Modifiers::WIN, 'A' as u32)
            .with_channel(tx)
            .with_callback(on_pressed),
    ];
    for hotkey in hotkeys {
        let hotkey = registry.register(hotkey)?;
        log::info!("Listening for {}", hotkey);
    }

    ctrlc::set_handler(|| {
        log::info!("Interrupted, exiting");
        std::process::exit(0);
    })
    .context("Failed to install Ctrl-C handler")?;

    thread::spawn(move || {
        for hotkey in rx {
            log::info!("Channel {} pressed", hotkey);
        }
    });

    let err = EventLoop::new(registry).run();
    Err(err).context("Hotkey loop stopped")
}

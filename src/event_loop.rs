//! Message pump that turns OS hotkey messages into notifications.

use crate::error::Error;
use crate::hotkey::Hotkey;
use crate::platform::{NativeQueue, Platform};
use crate::registry::Registry;
use std::sync::mpsc::TrySendError;
use std::sync::Arc;
use std::thread;

/// Pumps the message queue of the thread that owns the registry's platform.
///
/// Win32 only delivers hotkey messages to the thread that registered them, so
/// [`run`](EventLoop::run) has to be called on that thread. With the native
/// platform this is enforced by the registry not being `Send`.
pub struct EventLoop<P: Platform = NativeQueue> {
    registry: Arc<Registry<P>>,
}

impl<P: Platform> EventLoop<P> {
    pub fn new(registry: Arc<Registry<P>>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Arc<Registry<P>> {
        &self.registry
    }

    /// Pump messages until the OS reports a fatal error.
    ///
    /// Messages without an id, and ids nobody registered, are skipped.
    /// Never returns otherwise.
    pub fn run(&self) -> Error {
        loop {
            let message = self.registry.platform().next_message();
            if message.result.is_fatal() {
                let detail = message
                    .result
                    .error_text()
                    .unwrap_or_else(|| format!("result code {}", message.result.code));
                log::error!("Hotkey message loop stopped: {}", detail);
                return Error::MessageLoopFailure(detail);
            }

            if message.param == 0 {
                continue;
            }

            let hotkey = i32::try_from(message.param)
                .ok()
                .and_then(|id| self.registry.lookup(id));
            match hotkey {
                Some(hotkey) => Self::dispatch(&hotkey),
                None => log::trace!("Ignoring unregistered hotkey id {}", message.param),
            }
        }
    }

    /// Notify every consumer attached to `hotkey` without blocking the caller.
    ///
    /// The callback runs on a fresh thread. The channel gets a `try_send`; when
    /// it is full or closed this occurrence is dropped.
    pub fn dispatch(hotkey: &Arc<Hotkey>) {
        if hotkey.callback.is_some() {
            let fired = Arc::clone(hotkey);
            let spawned = thread::Builder::new()
                .name("hotkey-callback".to_string())
                .spawn(move || {
                    if let Some(callback) = &fired.callback {
                        callback(&fired);
                    }
                });
            if let Err(e) = spawned {
                log::warn!("Failed to spawn callback thread for {}: {}", hotkey, e);
            }
        }

        if let Some(channel) = &hotkey.channel {
            match channel.try_send(Arc::clone(hotkey)) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    log::debug!("Channel full, dropped notification for {}", hotkey)
                }
                Err(TrySendError::Disconnected(_)) => {
                    log::debug!("Channel closed, dropped notification for {}", hotkey)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkey::Modifiers;
    use crate::platform::testing::ScriptedQueue;
    use crate::platform::{CallResult, Message};
    use std::io;
    use std::sync::mpsc;
    use std::time::Duration;

    fn event_loop() -> EventLoop<ScriptedQueue> {
        EventLoop::new(Arc::new(Registry::new(ScriptedQueue::new())))
    }

    #[test]
    fn test_run_dispatches_to_callback_and_channel() {
        let event_loop = event_loop();
        let (tx, rx) = mpsc::sync_channel(10);
        let (called_tx, called_rx) = mpsc::channel();
        event_loop
            .registry()
            .register(
                Hotkey::new(
                    1,
                    Modifiers::ALT | Modifiers::CTRL | Modifiers::NO_REPEAT,
                    'A' as u32,
                )
                .with_channel(tx)
                .with_callback(move |h| {
                    let _ = called_tx.send(h.describe());
                }),
            )
            .unwrap();

        let platform = event_loop.registry().platform();
        for _ in 0..3 {
            platform.push_hotkey(1);
        }

        let err = event_loop.run();
        assert!(matches!(err, Error::MessageLoopFailure(_)));
        assert_eq!(err.to_string(), "message loop failed: test error");

        // Three occurrences delivered; the fatal poll dispatched nothing.
        let received: Vec<_> = rx.try_iter().collect();
        assert_eq!(received.len(), 3);
        assert!(received.iter().all(|h| h.id == 1));
        for _ in 0..3 {
            let label = called_rx.recv_timeout(Duration::from_secs(5)).unwrap();
            assert_eq!(label, "Hotkey[ID: 1, NoRepeat Ctrl+Alt+A]");
        }
        assert_eq!(platform.poll_count(), 4);
    }

    #[test]
    fn test_full_channel_drops_but_callback_fires() {
        let event_loop = event_loop();
        let (tx, rx) = mpsc::sync_channel(1);
        let (called_tx, called_rx) = mpsc::channel();
        event_loop
            .registry()
            .register(
                Hotkey::new(3, Modifiers::CTRL | Modifiers::WIN, 'A' as u32)
                    .with_channel(tx)
                    .with_callback(move |h| {
                        let _ = called_tx.send(h.id);
                    }),
            )
            .unwrap();

        let platform = event_loop.registry().platform();
        platform.push_hotkey(3);
        platform.push_hotkey(3);
        event_loop.run();

        assert_eq!(rx.try_iter().count(), 1);
        for _ in 0..2 {
            assert_eq!(called_rx.recv_timeout(Duration::from_secs(5)).unwrap(), 3);
        }
    }

    #[test]
    fn test_zero_and_unknown_ids_are_skipped() {
        let event_loop = event_loop();
        let (tx, rx) = mpsc::sync_channel(10);
        event_loop
            .registry()
            .register(Hotkey::new(2, Modifiers::SHIFT, 'B' as u32).with_channel(tx))
            .unwrap();

        let platform = event_loop.registry().platform();
        platform.push_hotkey(0);
        platform.push_hotkey(99);
        platform.push_hotkey(usize::MAX);
        platform.push_hotkey(2);
        let err = event_loop.run();

        assert!(matches!(err, Error::MessageLoopFailure(_)));
        assert_eq!(platform.poll_count(), 5);
        let received: Vec<_> = rx.try_iter().map(|h| h.id).collect();
        assert_eq!(received, vec![2]);
    }

    #[test]
    fn test_stale_error_with_success_code_keeps_running() {
        let event_loop = event_loop();
        let (tx, rx) = mpsc::sync_channel(10);
        event_loop
            .registry()
            .register(Hotkey::new(1, Modifiers::ALT, 'A' as u32).with_channel(tx))
            .unwrap();

        let platform = event_loop.registry().platform();
        platform.push_message(Message {
            result: CallResult {
                code: 1,
                error: Some(io::Error::other("stale")),
            },
            param: 1,
        });
        event_loop.run();

        assert_eq!(rx.try_iter().count(), 1);
        assert_eq!(platform.poll_count(), 2);
    }

    #[test]
    fn test_fatal_error_stops_before_dispatch() {
        let event_loop = event_loop();
        let (tx, rx) = mpsc::sync_channel(10);
        event_loop
            .registry()
            .register(Hotkey::new(1, Modifiers::ALT, 'A' as u32).with_channel(tx))
            .unwrap();

        let platform = event_loop.registry().platform();
        platform.push_message(Message {
            result: CallResult::failed(-1, io::Error::other("invalid handle")),
            param: 1,
        });
        platform.push_hotkey(1);

        let err = event_loop.run();
        assert_eq!(err.to_string(), "message loop failed: invalid handle");
        assert_eq!(rx.try_iter().count(), 0);
        assert_eq!(platform.poll_count(), 1);
    }

    #[test]
    fn test_closed_channel_does_not_stop_loop() {
        let event_loop = event_loop();
        let (tx, rx) = mpsc::sync_channel(1);
        drop(rx);
        event_loop
            .registry()
            .register(Hotkey::new(7, Modifiers::CTRL, 'K' as u32).with_channel(tx))
            .unwrap();

        let platform = event_loop.registry().platform();
        platform.push_hotkey(7);
        platform.push_hotkey(7);
        event_loop.run();

        assert_eq!(platform.poll_count(), 3);
    }

    #[test]
    fn test_hotkey_without_consumers_is_silent() {
        let event_loop = event_loop();
        event_loop
            .registry()
            .register(Hotkey::new(4, Modifiers::WIN, 'E' as u32))
            .unwrap();

        let platform = event_loop.registry().platform();
        platform.push_hotkey(4);
        event_loop.run();
        assert_eq!(platform.poll_count(), 2);
    }

    #[test]
    fn test_panicking_callback_does_not_reach_loop() {
        let event_loop = event_loop();
        let (tx, rx) = mpsc::sync_channel(10);
        event_loop
            .registry()
            .register(
                Hotkey::new(1, Modifiers::ALT, 'P' as u32)
                    .with_channel(tx)
                    .with_callback(|_| panic!("callback failure")),
            )
            .unwrap();

        let platform = event_loop.registry().platform();
        platform.push_hotkey(1);
        platform.push_hotkey(1);
        let err = event_loop.run();

        assert!(matches!(err, Error::MessageLoopFailure(_)));
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn test_registration_before_run_is_visible() {
        let event_loop = event_loop();
        let (tx, rx) = mpsc::sync_channel(10);
        let platform = event_loop.registry().platform();
        platform.push_hotkey(5);

        event_loop
            .registry()
            .register(Hotkey::new(5, Modifiers::SHIFT, 'R' as u32).with_channel(tx))
            .unwrap();
        event_loop.run();

        assert_eq!(rx.try_recv().unwrap().id, 5);
    }

    #[test]
    fn test_registration_while_running_is_dispatched() {
        let registry = Arc::new(Registry::new(ScriptedQueue::new()));
        let (reached_tx, reached_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let platform = registry.platform();
        platform.push_hotkey(5);
        platform.push_gate(reached_tx, release_rx);
        platform.push_hotkey(5);

        let event_loop = EventLoop::new(Arc::clone(&registry));
        let handle = thread::spawn(move || event_loop.run());

        // The loop has skipped the unregistered id and is parked on its next poll.
        reached_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let (tx, rx) = mpsc::sync_channel(10);
        registry
            .register(Hotkey::new(5, Modifiers::SHIFT, 'R' as u32).with_channel(tx))
            .unwrap();
        release_tx.send(()).unwrap();

        let err = handle.join().unwrap();
        assert!(matches!(err, Error::MessageLoopFailure(_)));
        let received: Vec<_> = rx.try_iter().map(|h| h.id).collect();
        assert_eq!(received, vec![5]);
        assert_eq!(registry.platform().poll_count(), 3);
    }
}

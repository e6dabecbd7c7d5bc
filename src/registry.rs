//! Registration table mapping hotkey ids to their definitions.

use crate::error::{Error, Result};
use crate::hotkey::Hotkey;
use crate::platform::{NativeQueue, Platform};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Owns the id → hotkey table and the platform the hotkeys are bound through.
///
/// Create one when the hotkey subsystem starts and share it (usually in an
/// `Arc`) with the [`EventLoop`](crate::EventLoop). There is no way to remove
/// an entry; the table lives as long as the registry.
pub struct Registry<P: Platform = NativeQueue> {
    platform: P,
    keys: RwLock<HashMap<i32, Arc<Hotkey>>>,
}

impl Registry<NativeQueue> {
    /// Registry bound to the calling thread's native message queue.
    ///
    /// The event loop must later run on this same thread.
    pub fn for_current_thread() -> Self {
        Self::new(NativeQueue::current_thread())
    }
}

impl<P: Platform> Registry<P> {
    pub fn new(platform: P) -> Self {
        Self {
            platform,
            keys: RwLock::new(HashMap::new()),
        }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Register a hotkey with the OS and add it to the table.
    ///
    /// The id is checked for duplicates before the OS is asked. Failed
    /// attempts leave the table untouched. On success the shared handle is
    /// returned so the caller can keep inspecting it.
    pub fn register(&self, hotkey: Hotkey) -> Result<Arc<Hotkey>> {
        let mut keys = self.write();

        if let Some(existing) = keys.get(&hotkey.id) {
            log::warn!("Rejected {}: id already taken by {}", hotkey, existing);
            return Err(Error::DuplicateId {
                id: hotkey.id,
                existing: existing.to_string(),
            });
        }

        let result = self
            .platform
            .register_hotkey(hotkey.id, hotkey.modifiers, hotkey.key_code);
        // A success code wins over a stale error value.
        if result.code == 0 || result.is_fatal() {
            let detail = result
                .error_text()
                .unwrap_or_else(|| "unknown error".to_string());
            log::warn!("OS refused {}: {}", hotkey, detail);
            return Err(Error::RegistrationFailed {
                hotkey: hotkey.to_string(),
                detail,
            });
        }

        log::debug!("Registered {}", hotkey);
        let hotkey = Arc::new(hotkey);
        keys.insert(hotkey.id, Arc::clone(&hotkey));
        Ok(hotkey)
    }

    /// Find the hotkey registered under `id`.
    pub fn lookup(&self, id: i32) -> Option<Arc<Hotkey>> {
        self.read().get(&id).cloned()
    }

    pub fn contains(&self, id: i32) -> bool {
        self.read().contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered ids in ascending order.
    pub fn ids(&self) -> Vec<i32> {
        let mut ids: Vec<i32> = self.read().keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    // The map is never left half-updated, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<i32, Arc<Hotkey>>> {
        self.keys.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<i32, Arc<Hotkey>>> {
        self.keys.write().unwrap_or_else(PoisonError::into_inner)
    }
}

//! Errors returned by registration and the message loop.

/// Errors that can occur while registering hotkeys or pumping messages.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Another registered hotkey already uses this id. Raised before the OS is asked.
    #[error("ID {id} already assigned to {existing}")]
    DuplicateId { id: i32, existing: String },

    /// The OS refused the binding, e.g. the combination is claimed by another process.
    #[error("failed to register {hotkey}: {detail}")]
    RegistrationFailed { hotkey: String, detail: String },

    /// The message pump hit a fatal error and stopped.
    #[error("message loop failed: {0}")]
    MessageLoopFailure(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

//! Error types for the conversation engine.

/// Errors from the chat engine and its session store.
///
/// None of these are user mistakes. Bad input is answered with a
/// conversational reply instead.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("session store error: {0}")]
    StorageError(String),
}

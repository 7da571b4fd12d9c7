//! Session state - prompt, output and transient display flags

use tokio::time::Instant;
use tracing::warn;

use crate::config::COPY_CONFIRMATION;
use crate::storage::{StorageProvider, OUTPUT_KEY, PROMPT_KEY};

/// In-memory session mirrored into a [`StorageProvider`].
///
/// `prompt` is persisted on every change. `output` is persisted only when
/// non-empty, so an empty result never overwrites a stored output.
#[derive(Debug)]
pub struct SessionState<S> {
    storage: S,
    prompt: String,
    output: String,
    is_loading: bool,
    output_loaded: bool,
    output_revision: u64,
    copy_success_until: Option<Instant>,
}

impl<S: StorageProvider> SessionState<S> {
    /// Restore prompt and output from `storage`; absent keys read as empty
    pub fn restore(storage: S) -> Self {
        let prompt = storage.get_item(PROMPT_KEY).unwrap_or_default();
        let output = storage.get_item(OUTPUT_KEY).unwrap_or_default();
        let output_loaded = !output.is_empty();

        Self {
            storage,
            prompt,
            output,
            is_loading: false,
            output_loaded,
            output_revision: 0,
            copy_success_until: None,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn output_loaded(&self) -> bool {
        self.output_loaded
    }

    pub fn output_revision(&self) -> u64 {
        self.output_revision
    }

    /// Whether the copy confirmation is still showing
    pub fn copy_success(&self) -> bool {
        self.copy_success_until
            .is_some_and(|until| Instant::now() < until)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replace the prompt and persist it. Any string is accepted.
    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
        if let Err(e) = self.storage.set_item(PROMPT_KEY, &self.prompt) {
            warn!("Failed to persist prompt: {}", e);
        }
    }

    /// Replace the output; persist it only when non-empty
    pub fn set_output(&mut self, text: impl Into<String>) {
        self.output = text.into();
        if self.output.is_empty() {
            return;
        }
        if let Err(e) = self.storage.set_item(OUTPUT_KEY, &self.output) {
            warn!("Failed to persist output: {}", e);
        }
    }

    /// Store a fresh enhancement result and bump the revision tick
    pub fn commit_result(&mut self, text: impl Into<String>) {
        self.set_output(text);
        self.output_revision += 1;
        self.output_loaded = true;
    }

    /// Reset prompt and output and drop both persisted keys
    pub fn clear(&mut self) {
        self.prompt.clear();
        self.output.clear();
        self.output_loaded = false;

        for key in [PROMPT_KEY, OUTPUT_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                warn!("Failed to remove {}: {}", key, e);
            }
        }
    }

    pub(crate) fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    /// Show the copy confirmation; a repeat copy re-arms the window
    pub(crate) fn mark_copied(&mut self) {
        self.copy_success_until = Some(Instant::now() + COPY_CONFIRMATION);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;

    /// Reads fine, rejects every write
    struct ReadOnlyStorage(MemoryStorage);

    impl StorageProvider for ReadOnlyStorage {
        fn get_item(&self, key: &str) -> Option<String> {
            self.0.get_item(key)
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }

        fn remove_item(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "read-only",
            )))
        }
    }

    fn read_only_with_output(output: &str) -> ReadOnlyStorage {
        let mut inner = MemoryStorage::new();
        inner.set_item(OUTPUT_KEY, output).unwrap();
        ReadOnlyStorage(inner)
    }

    #[test]
    fn test_write_failures_still_update_memory() {
        let mut state = SessionState::restore(read_only_with_output("stored"));

        state.set_prompt("new prompt");
        assert_eq!(state.prompt(), "new prompt");

        state.commit_result("fresh");
        assert_eq!(state.output(), "fresh");
        assert_eq!(state.output_revision(), 1);
        assert!(state.output_loaded());

        // The failed writes never reached the backing store
        assert_eq!(state.storage().get_item(OUTPUT_KEY).as_deref(), Some("stored"));
        assert!(state.storage().get_item(PROMPT_KEY).is_none());
    }

    #[test]
    fn test_clear_with_failing_removal_still_resets_memory() {
        let mut state = SessionState::restore(read_only_with_output("stored"));
        state.set_prompt("p");

        state.clear();

        assert_eq!(state.prompt(), "");
        assert_eq!(state.output(), "");
        assert!(!state.output_loaded());
        assert_eq!(state.storage().get_item(OUTPUT_KEY).as_deref(), Some("stored"));
    }

    #[test]
    fn test_restore_from_empty_storage() {
        let state = SessionState::restore(MemoryStorage::new());
        assert_eq!(state.prompt(), "");
        assert_eq!(state.output(), "");
        assert!(!state.output_loaded());
        assert!(!state.is_loading());
        assert_eq!(state.output_revision(), 0);
    }

    #[test]
    fn test_restore_marks_existing_output_loaded() {
        let mut storage = MemoryStorage::new();
        storage.set_item(OUTPUT_KEY, "previous").unwrap();

        let state = SessionState::restore(storage);
        assert_eq!(state.output(), "previous");
        assert!(state.output_loaded());
    }

    #[test]
    fn test_set_prompt_persists_empty_string() {
        let mut state = SessionState::restore(MemoryStorage::new());
        state.set_prompt("draft");
        state.set_prompt("");
        assert_eq!(state.storage().get_item(PROMPT_KEY).as_deref(), Some(""));
    }

    #[test]
    fn test_set_output_empty_keeps_stored_value() {
        let mut state = SessionState::restore(MemoryStorage::new());
        state.set_output("kept");
        state.set_output("");
        assert_eq!(state.output(), "");
        assert_eq!(
            state.storage().get_item(OUTPUT_KEY).as_deref(),
            Some("kept")
        );
    }

    #[test]
    fn test_commit_result_bumps_revision() {
        let mut state = SessionState::restore(MemoryStorage::new());
        state.commit_result("one");
        state.commit_result("two");
        assert_eq!(state.output(), "two");
        assert_eq!(state.output_revision(), 2);
        assert!(state.output_loaded());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut state = SessionState::restore(MemoryStorage::new());
        state.set_prompt("p");
        state.commit_result("o");

        state.clear();
        assert_eq!(state.prompt(), "");
        assert_eq!(state.output(), "");
        assert!(!state.output_loaded());
        assert!(state.storage().is_empty());
    }
}

//! Application controller - the user actions over session, client and clipboard

use tracing::{error, info, warn};

use crate::client::EnhancementClient;
use crate::clipboard::ClipboardProvider;
use crate::notify::{Notifier, REQUEST_FAILED_MESSAGE};
use crate::session::SessionState;
use crate::storage::StorageProvider;

/// Result of a rephrase action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RephraseOutcome {
    /// Prompt was blank, no request sent
    Skipped,
    /// Output replaced with a fresh result
    Updated,
    /// Response carried no result field, output untouched
    NoResult,
    /// Request failed and the user was alerted
    Failed,
}

/// Result of a copy action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Nothing to copy
    Empty,
    Copied,
    /// Clipboard write failed, logged only
    Failed,
}

pub struct App<S, C, N> {
    state: SessionState<S>,
    client: EnhancementClient,
    clipboard: C,
    notifier: N,
}

impl<S, C, N> App<S, C, N>
where
    S: StorageProvider,
    C: ClipboardProvider,
    N: Notifier,
{
    /// Build the controller, restoring the session from `storage`
    pub fn new(storage: S, client: EnhancementClient, clipboard: C, notifier: N) -> Self {
        Self {
            state: SessionState::restore(storage),
            client,
            clipboard,
            notifier,
        }
    }

    pub fn state(&self) -> &SessionState<S> {
        &self.state
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn set_prompt(&mut self, text: impl Into<String>) {
        self.state.set_prompt(text);
    }

    /// Reset the session. A request already awaiting is not affected.
    pub fn clear(&mut self) {
        self.state.clear();
        info!("Session cleared");
    }

    /// Send the current prompt for enhancement; also serves as "regenerate"
    pub async fn rephrase(&mut self) -> RephraseOutcome {
        if self.state.prompt().trim().is_empty() {
            return RephraseOutcome::Skipped;
        }

        self.state.set_loading(true);
        let prompt = self.state.prompt().to_string();
        let result = self.client.rephrase(&prompt).await;
        self.state.set_loading(false);

        match result {
            Ok(Some(text)) => {
                self.state.commit_result(text);
                info!(
                    "Output updated (revision {})",
                    self.state.output_revision()
                );
                RephraseOutcome::Updated
            }
            Ok(None) => {
                warn!("Rephrase response had neither text nor rephrased.text, output unchanged");
                RephraseOutcome::NoResult
            }
            Err(e) => {
                error!("{}", e);
                self.notifier.alert(REQUEST_FAILED_MESSAGE);
                RephraseOutcome::Failed
            }
        }
    }

    /// Copy the output to the clipboard and show the confirmation for 2s
    pub fn copy_output(&mut self) -> CopyOutcome {
        if self.state.output().is_empty() {
            return CopyOutcome::Empty;
        }

        match self.clipboard.write_text(self.state.output()) {
            Ok(()) => {
                self.state.mark_copied();
                CopyOutcome::Copied
            }
            Err(e) => {
                error!("{}", e);
                CopyOutcome::Failed
            }
        }
    }
}

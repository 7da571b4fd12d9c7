//! Clipboard export

use cli_clipboard::{ClipboardContext, ClipboardProvider as _};

use crate::error::ClipboardError;

/// Write-only clipboard access
pub trait ClipboardProvider {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// The platform clipboard. A context is opened per write, so a clipboard
/// that becomes available later is picked up.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl ClipboardProvider for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut ctx = ClipboardContext::new().map_err(|e| ClipboardError(e.to_string()))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

/// Clipboard kept in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    writes: usize,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }

    /// Number of successful writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.contents = Some(text.to_string());
        self.writes += 1;
        Ok(())
    }
}

//! prompt-perfect library - client for a prompt rephrase service

pub mod app;
pub mod client;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod http_logger;
pub mod notify;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use app::{App, CopyOutcome, RephraseOutcome};
pub use client::EnhancementClient;
pub use config::{Config, ConfigOptions};
pub use error::{ClipboardError, EnhanceError, StorageError};
pub use session::SessionState;
pub use storage::{FileStorage, MemoryStorage, StorageProvider};

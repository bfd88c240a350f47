// src/core/mod.rs
//! Platform services the form controller depends on, each behind a trait so
//! tests can substitute fakes.

pub mod clipboard;
pub mod config_manager;
pub mod credential_store;
pub mod fs_ops;
pub mod notifier;
pub mod service_client;

pub use clipboard::{Clipboard, SystemClipboard};
pub use config_manager::ConfigManager;
pub use credential_store::{FileStore, KeyValueStore, CREDENTIAL_KEY};
pub use fs_ops::{DownloadDir, FileSaver, FsOps};
pub use notifier::{ConsoleNotifier, Notifier};
pub use service_client::{GenerationTransport, RawResponse, ServiceClient};

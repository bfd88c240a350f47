// src/core/clipboard.rs
use anyhow::{Context, Result};

use crate::app_log;

pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}

/// The desktop clipboard. A fresh handle is opened per write since the
/// controller may be shared across threads.
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        let mut clipboard = arboard::Clipboard::new().context("Clipboard is not available")?;
        set_text(&mut clipboard, text).context("Failed to write to clipboard")
    }
}

/// X11 and Wayland drop the selection together with its owner, so the write
/// blocks until a clipboard manager or another application takes it over.
#[cfg(target_os = "linux")]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    use arboard::SetExtLinux;

    app_log!(info, "Serving clipboard contents until another application owns them");
    eprintln!("Keeping the text on the clipboard until something else is copied...");
    clipboard.set().wait().text(text.to_string())
}

#[cfg(not(target_os = "linux"))]
fn set_text(clipboard: &mut arboard::Clipboard, text: &str) -> Result<(), arboard::Error> {
    app_log!(debug, "Writing {} bytes to clipboard", text.len());
    clipboard.set_text(text.to_string())
}

// src/lib.rs
//! Resume and cover-letter form client.
//!
//! The [`controller::FormController`] owns the form's UI state and the single
//! exchange with the generation endpoint. Everything it touches outside of
//! memory (credential storage, HTTP, clipboard, file saving, notifications)
//! is injected through the traits in [`core`].

pub mod controller;
pub mod core;
pub mod form_cli;
pub mod types;
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::{FormController, GenerateError, Tab, UiState};
pub use types::{decode_response, Decoded, GenerationRequest, GenerationResult};

/// Log through `tracing` at the given level.
///
/// `app_log!(info, "Saved {}", path)` expands to `tracing::info!(...)`.
#[macro_export]
macro_rules! app_log {
    (trace, $($arg:tt)+) => { ::tracing::trace!($($arg)+) };
    (debug, $($arg:tt)+) => { ::tracing::debug!($($arg)+) };
    (info, $($arg:tt)+) => { ::tracing::info!($($arg)+) };
    (warn, $($arg:tt)+) => { ::tracing::warn!($($arg)+) };
    (error, $($arg:tt)+) => { ::tracing::error!($($arg)+) };
}

// src/controller/mod.rs
//! The form controller: credential handling, tab selection, the generation
//! exchange and the copy/download affordances.

pub mod error;
pub mod state;

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::app_log;
use crate::core::{
    Clipboard, FileSaver, GenerationTransport, KeyValueStore, Notifier, CREDENTIAL_KEY,
};
use crate::types::{decode_response, Decoded, FormInput, GenerationRequest, GenerationResult};
use crate::types::request::MissingInput;

pub use error::{CredentialError, GenerateError, ResultActionError, UnknownTab};
pub use state::{StatusKind, StatusLine, Tab, TabSet, UiState, ViewState};

const CREDENTIAL_LOADED: &str = "API key is saved locally";
const CREDENTIAL_SAVED: &str = "API key saved successfully!";
const CREDENTIAL_INVALID: &str = "Please enter a valid API key";
const CREDENTIAL_UNREADABLE: &str = "Failed to read saved API key";
const GENERATING: &str = "Generating your resume and cover letter...";
const COPIED: &str = "Copied to clipboard!";
const COPY_FAILED: &str = "Failed to copy text. Please try again.";

/// Collaborators injected into the controller.
pub struct Services {
    pub store: Arc<dyn KeyValueStore>,
    pub transport: Arc<dyn GenerationTransport>,
    pub clipboard: Arc<dyn Clipboard>,
    pub saver: Arc<dyn FileSaver>,
    pub notifier: Arc<dyn Notifier>,
}

pub struct FormController {
    services: Services,
    view: Mutex<ViewState>,
}

impl FormController {
    pub fn new(services: Services) -> Self {
        Self {
            services,
            view: Mutex::new(ViewState::default()),
        }
    }

    /// Snapshot of the current view state.
    pub fn view(&self) -> ViewState {
        self.lock_view().clone()
    }

    /// Consume a pending scroll-into-view request.
    pub fn take_scroll_request(&self) -> bool {
        std::mem::take(&mut self.lock_view().scroll_requested)
    }

    /// Read the persisted credential. When one exists it is returned so the
    /// input can be populated, and the status line reports it as saved. An
    /// unreadable store yields `None` with an error on the status line.
    pub async fn load_credential(&self) -> Option<String> {
        let stored = match self.services.store.get_item(CREDENTIAL_KEY).await {
            Ok(stored) => stored.filter(|key| !key.is_empty()),
            Err(e) => {
                app_log!(error, "Failed to read stored credential: {:#}", e);
                self.lock_view().credential_status = Some(StatusLine::error(&format!(
                    "{}: {:#}",
                    CREDENTIAL_UNREADABLE, e
                )));
                return None;
            }
        };

        if stored.is_some() {
            self.lock_view().credential_status = Some(StatusLine::success(CREDENTIAL_LOADED));
        }
        stored
    }

    /// Persist the trimmed credential, overwriting any previous one.
    pub async fn save_credential(&self, input: &str) -> Result<(), CredentialError> {
        let api_key = input.trim();
        if api_key.is_empty() {
            self.lock_view().credential_status = Some(StatusLine::error(CREDENTIAL_INVALID));
            return Err(CredentialError::Empty);
        }

        if let Err(e) = self.services.store.set_item(CREDENTIAL_KEY, api_key).await {
            app_log!(error, "Failed to store credential: {:#}", e);
            let err = CredentialError::Storage(e);
            self.lock_view().credential_status = Some(StatusLine::error(&err.to_string()));
            return Err(err);
        }

        self.lock_view().credential_status = Some(StatusLine::success(CREDENTIAL_SAVED));
        Ok(())
    }

    /// Activate the tab with the given identifier. An unknown identifier
    /// leaves the current selection untouched.
    pub fn switch_tab(&self, tab_id: &str) -> Result<Tab, UnknownTab> {
        let tab: Tab = tab_id.parse()?;
        self.select_tab(tab);
        Ok(tab)
    }

    pub fn select_tab(&self, tab: Tab) {
        self.lock_view().tabs.select(tab);
    }

    /// Validate the form, send it and display the result.
    ///
    /// Nothing is sent when validation fails or another request is already
    /// in flight. Every failure after the request was sent restores
    /// [`UiState::Idle`] and raises an alert.
    pub async fn generate(&self, form: &FormInput) -> Result<GenerationResult, GenerateError> {
        let request = match self.begin(form) {
            Ok(request) => request,
            Err(e) => {
                self.report(&e);
                return Err(e);
            }
        };

        app_log!(info, "Generating resume and cover letter");
        let loading = LoadingGuard::new(&self.view);
        self.services.notifier.progress(GENERATING);
        let outcome = self.exchange(&request).await;

        {
            let mut view = loading.finish();
            if let Ok(result) = &outcome {
                view.state = UiState::Displaying;
                view.result = Some(result.clone());
                view.scroll_requested = true;
            }
        }

        match &outcome {
            Ok(result) => app_log!(
                info,
                "Generation succeeded (resume {} chars, cover letter {} chars)",
                result.resume.len(),
                result.cover_letter.len()
            ),
            Err(e) => self.report(e),
        }
        outcome
    }

    /// Copy the text shown in `tab` to the clipboard.
    pub fn copy_result(&self, tab: Tab) -> Result<(), ResultActionError> {
        let text = self.lock_view().displayed_text(tab).to_string();

        match self.services.clipboard.write_text(&text) {
            Ok(()) => {
                app_log!(info, "Copied {} to clipboard", tab);
                self.services.notifier.alert(COPIED);
                Ok(())
            }
            Err(e) => {
                app_log!(error, "Failed to copy text: {:#}", e);
                self.services.notifier.alert(COPY_FAILED);
                Err(ResultActionError::Clipboard(e))
            }
        }
    }

    /// Save the text shown in `tab` as a plain-text file with the tab's
    /// fixed file name.
    pub fn download_result(&self, tab: Tab) -> Result<PathBuf, ResultActionError> {
        let text = self.lock_view().displayed_text(tab).to_string();
        let file_name = tab.file_name();

        match self.services.saver.save(file_name, &text) {
            Ok(path) => {
                self.services
                    .notifier
                    .alert(&format!("Saved {}", path.display()));
                Ok(path)
            }
            Err(e) => {
                app_log!(error, "Failed to save {}: {:#}", file_name, e);
                self.services
                    .notifier
                    .alert(&format!("Failed to save {}", file_name));
                Err(ResultActionError::Save {
                    file_name,
                    source: e,
                })
            }
        }
    }

    /// Run pre-flight checks and enter `Loading` under a single lock.
    fn begin(&self, form: &FormInput) -> Result<GenerationRequest, GenerateError> {
        let mut view = self.lock_view();
        if view.state == UiState::Loading {
            return Err(GenerateError::AlreadyInFlight);
        }

        match GenerationRequest::from_form(form) {
            Ok(request) => {
                view.state = UiState::Loading;
                Ok(request)
            }
            Err(MissingInput::Credential) => {
                view.state = UiState::Error;
                view.credential_status = Some(StatusLine::error(error::MISSING_CREDENTIAL));
                Err(GenerateError::MissingCredential)
            }
            Err(MissingInput::Fields) => {
                view.state = UiState::Error;
                Err(GenerateError::MissingFields)
            }
        }
    }

    async fn exchange(&self, request: &GenerationRequest) -> Result<GenerationResult, GenerateError> {
        let raw = self
            .services
            .transport
            .generate(request)
            .await
            .map_err(GenerateError::Transport)?;

        match decode_response(raw.status, &raw.body)? {
            Decoded::Success(result) => Ok(result),
            Decoded::Failure { message } => Err(GenerateError::Server {
                status: raw.status,
                message,
            }),
        }
    }

    fn report(&self, e: &GenerateError) {
        match e {
            GenerateError::AlreadyInFlight => app_log!(warn, "{}", e),
            GenerateError::MissingCredential | GenerateError::MissingFields => {
                app_log!(info, "Submission rejected: {}", e)
            }
            _ => app_log!(error, "Generation failed: {:#}", e),
        }

        if let Some(text) = e.alert_text() {
            self.services.notifier.alert(&text);
        }
    }

    fn lock_view(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Leaves `Loading` when dropped, so the loading indicator is cleared even
/// if the generate future is cancelled mid-request.
struct LoadingGuard<'a> {
    view: &'a Mutex<ViewState>,
    finished: bool,
}

impl<'a> LoadingGuard<'a> {
    fn new(view: &'a Mutex<ViewState>) -> Self {
        Self {
            view,
            finished: false,
        }
    }

    /// Return to `Idle` and hand back the lock so the caller can apply the
    /// outcome without another submission slipping in between.
    fn finish(mut self) -> MutexGuard<'a, ViewState> {
        self.finished = true;
        let shared: &'a Mutex<ViewState> = self.view;
        let mut view = shared.lock().unwrap_or_else(PoisonError::into_inner);
        view.state = UiState::Idle;
        view
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        let mut view = self.view.lock().unwrap_or_else(PoisonError::into_inner);
        if view.state == UiState::Loading {
            view.state = UiState::Idle;
        }
    }
}

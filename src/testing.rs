// src/testing.rs
//! In-memory collaborators for controller tests.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

use crate::controller::{FormController, Services};
use crate::core::{
    Clipboard, FileSaver, GenerationTransport, KeyValueStore, Notifier, RawResponse,
};
use crate::types::{FormInput, GenerationRequest};

#[derive(Default)]
pub struct MemoryStore {
    pub items: Mutex<HashMap<String, String>>,
    pub fail_reads: bool,
    pub fail_writes: bool,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads {
            anyhow::bail!("corrupt credentials file");
        }
        Ok(self.items.lock().unwrap().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("disk full");
        }
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Replies from a script, recording every request. With a gate set, each
/// reply waits for `gate.notify_one()`.
#[derive(Default)]
pub struct FakeTransport {
    pub replies: Mutex<VecDeque<Result<RawResponse, String>>>,
    pub requests: Mutex<Vec<GenerationRequest>>,
    pub gate: Option<Arc<Notify>>,
}

impl FakeTransport {
    pub fn reply(self, status: u16, body: &str) -> Self {
        self.replies.lock().unwrap().push_back(Ok(RawResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, reason: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Err(reason.to_string()));
        self
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerationTransport for FakeTransport {
    async fn generate(&self, request: &GenerationRequest) -> Result<RawResponse> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(reason)) => Err(anyhow::anyhow!(reason)),
            None => anyhow::bail!("no scripted reply"),
        }
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub texts: Mutex<Vec<String>>,
    pub fail: bool,
}

impl Clipboard for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("clipboard locked");
        }
        self.texts.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemorySaver {
    pub files: Mutex<Vec<(String, String)>>,
    pub fail: bool,
}

impl FileSaver for MemorySaver {
    fn save(&self, file_name: &str, contents: &str) -> Result<PathBuf> {
        if self.fail {
            anyhow::bail!("read-only file system");
        }
        self.files
            .lock()
            .unwrap()
            .push((file_name.to_string(), contents.to_string()));
        Ok(PathBuf::from("/downloads").join(file_name))
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub alerts: Mutex<Vec<String>>,
    pub progress: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    fn progress(&self, message: &str) {
        self.progress.lock().unwrap().push(message.to_string());
    }
}

/// A controller plus handles on each of its fakes.
pub struct Harness {
    pub controller: Arc<FormController>,
    pub store: Arc<MemoryStore>,
    pub transport: Arc<FakeTransport>,
    pub clipboard: Arc<RecordingClipboard>,
    pub saver: Arc<MemorySaver>,
    pub notifier: Arc<RecordingNotifier>,
}

impl Harness {
    pub fn new(transport: FakeTransport) -> Self {
        Self::with(
            MemoryStore::default(),
            transport,
            RecordingClipboard::default(),
            MemorySaver::default(),
        )
    }

    pub fn with(
        store: MemoryStore,
        transport: FakeTransport,
        clipboard: RecordingClipboard,
        saver: MemorySaver,
    ) -> Self {
        let store = Arc::new(store);
        let transport = Arc::new(transport);
        let clipboard = Arc::new(clipboard);
        let saver = Arc::new(saver);
        let notifier = Arc::new(RecordingNotifier::default());

        let controller = Arc::new(FormController::new(Services {
            store: store.clone(),
            transport: transport.clone(),
            clipboard: clipboard.clone(),
            saver: saver.clone(),
            notifier: notifier.clone(),
        }));

        Self {
            controller,
            store,
            transport,
            clipboard,
            saver,
            notifier,
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.notifier.alerts.lock().unwrap().clone()
    }

    pub fn progress(&self) -> Vec<String> {
        self.notifier.progress.lock().unwrap().clone()
    }
}

pub fn filled_form() -> FormInput {
    FormInput {
        api_key: "sk-test".to_string(),
        skills: "Rust, PostgreSQL".to_string(),
        experience: "Backend intern, 2024".to_string(),
        job_description: "Platform engineer".to_string(),
    }
}

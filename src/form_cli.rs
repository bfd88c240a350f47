// src/form_cli.rs
//! Terminal front-end for the form controller.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;

use crate::app_log;
use crate::controller::{FormController, GenerateError, Services, StatusKind, StatusLine, Tab};
use crate::core::{
    ConfigManager, ConsoleNotifier, DownloadDir, FileStore, ServiceClient, SystemClipboard,
};
use crate::types::FormInput;
use crate::utils::{mask_key, resolve_field_arg};

#[derive(Parser)]
#[command(name = "resume-builder")]
#[command(about = "Generate a tailored resume and cover letter")]
pub struct FormCli {
    #[command(subcommand)]
    pub command: FormCommand,
}

#[derive(Subcommand)]
pub enum FormCommand {
    /// Manage the locally stored API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Generate a resume and cover letter from skills, experience and a job description
    Generate(GenerateArgs),
}

#[derive(Subcommand)]
pub enum KeyAction {
    /// Save (or replace) the API key
    Save { api_key: String },
    /// Show whether an API key is saved
    Show,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Skills, or @FILE to read them from a file
    #[arg(long)]
    pub skills: String,

    /// Experience, or @FILE
    #[arg(long)]
    pub experience: String,

    /// Target job description, or @FILE
    #[arg(long)]
    pub job_description: String,

    /// API key to send instead of the saved one
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Tab to display: resume or cover-letter
    #[arg(long, default_value = "resume")]
    pub tab: String,

    /// Copy the displayed tab to the clipboard
    #[arg(long)]
    pub copy: bool,

    /// Save resume.txt and cover_letter.txt into the downloads directory
    #[arg(long)]
    pub download: bool,
}

/// Wire the controller to the real storage, network, clipboard and disk.
pub fn production_controller(config: &ConfigManager) -> Result<FormController> {
    let transport = ServiceClient::new(
        config.service.origin.clone(),
        config.service.timeout_seconds,
    )
    .context("Failed to set up generation client")?;

    Ok(FormController::new(Services {
        store: Arc::new(FileStore::new(config.storage.credentials_path())),
        transport: Arc::new(transport),
        clipboard: Arc::new(SystemClipboard),
        saver: Arc::new(DownloadDir::new(config.storage.downloads_dir.clone())),
        notifier: Arc::new(ConsoleNotifier),
    }))
}

/// Run one command. Returns whether it succeeded; failures have already
/// been reported to the user.
pub async fn handle_form_command(cli: FormCli, controller: &FormController) -> Result<bool> {
    match cli.command {
        FormCommand::Key { action } => handle_key(action, controller).await,
        FormCommand::Generate(args) => handle_generate(args, controller).await,
    }
}

async fn handle_key(action: KeyAction, controller: &FormController) -> Result<bool> {
    match action {
        KeyAction::Save { api_key } => {
            let saved = controller.save_credential(&api_key).await;
            print_status(controller);
            Ok(saved.is_ok())
        }
        KeyAction::Show => {
            let stored = controller.load_credential().await;
            print_status(controller);
            match stored {
                Some(api_key) => println!("   Key: {}", mask_key(&api_key)),
                None if controller.view().credential_status.is_some() => return Ok(false),
                None => println!("No API key saved"),
            }
            Ok(true)
        }
    }
}

async fn handle_generate(args: GenerateArgs, controller: &FormController) -> Result<bool> {
    let saved_key = controller.load_credential().await;

    controller
        .switch_tab(&args.tab)
        .context("Use --tab resume or --tab cover-letter")?;

    let form = FormInput {
        api_key: args.api_key.or(saved_key).unwrap_or_default(),
        skills: resolve_field_arg(&args.skills)?,
        experience: resolve_field_arg(&args.experience)?,
        job_description: resolve_field_arg(&args.job_description)?,
    };

    match controller.generate(&form).await {
        Ok(_) => {}
        Err(GenerateError::MissingCredential) => {
            print_status(controller);
            return Ok(false);
        }
        Err(e) => {
            app_log!(info, "Generate command failed: {}", e);
            return Ok(false);
        }
    }

    let view = controller.view();
    let active = view.tabs.active();
    if controller.take_scroll_request() {
        println!("=== {} ===", active.label());
        println!("{}", view.displayed_text(active));
    }

    if args.download {
        for tab in Tab::ALL {
            if controller.download_result(tab).is_err() {
                return Ok(false);
            }
        }
    }

    // Last, since the system clipboard may block until the text is taken over.
    if args.copy && controller.copy_result(active).is_err() {
        return Ok(false);
    }

    Ok(true)
}

fn print_status(controller: &FormController) {
    if let Some(StatusLine { kind, text }) = controller.view().credential_status {
        match kind {
            StatusKind::Success => println!("✓ {}", text),
            StatusKind::Error => eprintln!("❌ {}", text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Clipboard;
    use crate::testing::{
        FakeTransport, Harness, MemorySaver, MemoryStore, RecordingClipboard, RecordingNotifier,
    };
    use std::sync::Mutex;

    fn parse(args: &[&str]) -> FormCli {
        FormCli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_generate_arguments() {
        let cli = parse(&[
            "resume-builder",
            "generate",
            "--skills",
            "Rust",
            "--experience",
            "Intern",
            "--job-description",
            "@job.txt",
            "--tab",
            "cover-letter",
            "--download",
        ]);
        let FormCommand::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.job_description, "@job.txt");
        assert_eq!(args.tab, "cover-letter");
        assert!(args.download);
        assert!(!args.copy);
    }

    #[test]
    fn test_generate_requires_all_fields() {
        assert!(FormCli::try_parse_from(["resume-builder", "generate", "--skills", "Rust"]).is_err());
    }

    #[tokio::test]
    async fn test_generate_uses_saved_key_when_none_given() {
        let h = Harness::new(
            FakeTransport::default().reply(200, r#"{"resume":"R","cover_letter":"C"}"#),
        );
        h.controller.save_credential("sk-saved").await.unwrap();

        let args = GenerateArgs {
            skills: "Rust".to_string(),
            experience: "Intern".to_string(),
            job_description: "Engineer".to_string(),
            api_key: None,
            tab: "cover-letter".to_string(),
            copy: false,
            download: true,
        };
        let succeeded = handle_generate(args, &h.controller).await.unwrap();
        assert!(succeeded);

        assert_eq!(h.transport.requests.lock().unwrap()[0].api_key, "sk-saved");
        assert_eq!(h.controller.view().tabs.active(), Tab::CoverLetter);
        assert_eq!(h.saver.files.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_generate_rejects_unknown_tab_before_sending() {
        let h = Harness::new(FakeTransport::default());
        let args = GenerateArgs {
            skills: "Rust".to_string(),
            experience: "Intern".to_string(),
            job_description: "Engineer".to_string(),
            api_key: Some("sk-test".to_string()),
            tab: "preview".to_string(),
            copy: false,
            download: false,
        };
        assert!(handle_generate(args, &h.controller).await.is_err());
        assert_eq!(h.transport.call_count(), 0);
    }

    /// Records how many files were saved when the copy happened.
    struct OrderedClipboard {
        saver: Arc<MemorySaver>,
        saved_at_copy: Mutex<Option<usize>>,
    }

    impl Clipboard for OrderedClipboard {
        fn write_text(&self, _text: &str) -> anyhow::Result<()> {
            *self.saved_at_copy.lock().unwrap() = Some(self.saver.files.lock().unwrap().len());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_generate_copies_after_downloads() {
        let saver = Arc::new(MemorySaver::default());
        let clipboard = Arc::new(OrderedClipboard {
            saver: saver.clone(),
            saved_at_copy: Mutex::new(None),
        });
        let controller = FormController::new(Services {
            store: Arc::new(MemoryStore::default()),
            transport: Arc::new(
                FakeTransport::default().reply(200, r#"{"resume":"R","cover_letter":"C"}"#),
            ),
            clipboard: clipboard.clone(),
            saver: saver.clone(),
            notifier: Arc::new(RecordingNotifier::default()),
        });

        let args = GenerateArgs {
            skills: "Rust".to_string(),
            experience: "Intern".to_string(),
            job_description: "Engineer".to_string(),
            api_key: Some("sk-test".to_string()),
            tab: "resume".to_string(),
            copy: true,
            download: true,
        };
        assert!(handle_generate(args, &controller).await.unwrap());
        assert_eq!(*clipboard.saved_at_copy.lock().unwrap(), Some(2));
    }

    #[tokio::test]
    async fn test_key_show_fails_on_unreadable_store() {
        let h = Harness::with(
            MemoryStore {
                fail_reads: true,
                ..MemoryStore::default()
            },
            FakeTransport::default(),
            RecordingClipboard::default(),
            MemorySaver::default(),
        );
        assert!(!handle_key(KeyAction::Show, &h.controller).await.unwrap());
    }

    #[tokio::test]
    async fn test_generate_without_any_key_fails() {
        let h = Harness::new(FakeTransport::default());
        let args = GenerateArgs {
            skills: "Rust".to_string(),
            experience: "Intern".to_string(),
            job_description: "Engineer".to_string(),
            api_key: None,
            tab: "resume".to_string(),
            copy: false,
            download: false,
        };
        let succeeded = handle_generate(args, &h.controller).await.unwrap();
        assert!(!succeeded);
        assert_eq!(h.transport.call_count(), 0);
        assert!(h.progress().is_empty());
    }
}

// src/controller/state.rs
//! View state owned by the form controller.

use std::fmt;
use std::str::FromStr;

use crate::controller::error::UnknownTab;
use crate::types::GenerationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    /// A request is in flight; the loading indicator is visible.
    Loading,
    /// A result is shown.
    Displaying,
    /// The last submission was rejected before any network activity.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Resume,
    CoverLetter,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Resume, Tab::CoverLetter];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Resume => "resume",
            Tab::CoverLetter => "cover-letter",
        }
    }

    pub fn pane_id(self) -> String {
        format!("{}-content", self.id())
    }

    /// Name offered when the tab's text is downloaded.
    pub fn file_name(self) -> &'static str {
        match self {
            Tab::Resume => "resume.txt",
            Tab::CoverLetter => "cover_letter.txt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::Resume => "Resume",
            Tab::CoverLetter => "Cover Letter",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Tab {
    type Err = UnknownTab;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.id() == s)
            .ok_or_else(|| UnknownTab(s.to_string()))
    }
}

/// Tab strip plus panes. Holding a single `active` value means exactly one
/// tab and its pane are active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TabSet {
    active: Tab,
}

impl TabSet {
    pub fn select(&mut self, tab: Tab) {
        self.active = tab;
    }

    pub fn active(&self) -> Tab {
        self.active
    }

    pub fn is_tab_active(&self, tab: Tab) -> bool {
        self.active == tab
    }

    pub fn is_pane_active(&self, pane_id: &str) -> bool {
        self.active.pane_id() == pane_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

/// Inline status text shown next to the API key input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn success(text: &str) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.to_string(),
        }
    }

    pub fn error(text: &str) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    pub state: UiState,
    pub credential_status: Option<StatusLine>,
    pub tabs: TabSet,
    /// Last successful result. Kept visible when a later attempt fails.
    pub result: Option<GenerationResult>,
    /// Set when a new result should be scrolled into view.
    pub scroll_requested: bool,
}

impl ViewState {
    pub fn loading_visible(&self) -> bool {
        self.state == UiState::Loading
    }

    pub fn output_visible(&self) -> bool {
        self.result.is_some()
    }

    /// Text currently shown in the given pane; empty before any result.
    pub fn displayed_text(&self, tab: Tab) -> &str {
        match (&self.result, tab) {
            (Some(result), Tab::Resume) => &result.resume,
            (Some(result), Tab::CoverLetter) => &result.cover_letter,
            (None, _) => "",
        }
    }
}

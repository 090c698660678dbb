// Link-edit session
// A two-state machine gating the toolbar between formatting controls and the
// URL input. While editing, the URL field steals focus and the host may drop
// the document selection, so the selection captured at open time is the
// durable record the commit step operates on. No tree mutation happens
// before submit.

use crate::commands::{apply_link, link_at, remove_link};
use crate::document::{Document, EditResult};
use crate::selection::Selection;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEditSession {
    state: SessionState,
    pending_url: String,
    saved_selection: Option<Selection>,
}

impl LinkEditSession {
    pub fn new() -> Self {
        LinkEditSession {
            state: SessionState::Idle,
            pending_url: String::new(),
            saved_selection: None,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_editing(&self) -> bool {
        self.state == SessionState::Editing
    }

    pub fn pending_url(&self) -> &str {
        &self.pending_url
    }

    pub fn saved_selection(&self) -> Option<&Selection> {
        self.saved_selection.as_ref()
    }

    /// Idle → Editing: capture the selection and seed the pending URL from
    /// any link already under it. Without a selection there is nothing to
    /// link, so this stays Idle.
    pub fn open(&mut self, doc: &Document, selection: Option<&Selection>) {
        let Some(selection) = selection else {
            return;
        };
        self.pending_url = link_at(doc, selection).unwrap_or_default();
        self.saved_selection = Some(*selection);
        self.state = SessionState::Editing;
        debug!(seed = %self.pending_url, "link editor opened");
    }

    /// Editing → Editing: track the URL field, no tree mutation
    pub fn set_pending_url(&mut self, url: impl Into<String>) {
        if self.is_editing() {
            self.pending_url = url.into();
        }
    }

    /// Editing → Idle, commit path. All tree mutation of the session is
    /// concentrated here: apply the pending URL to the saved selection, or
    /// remove the link when the field was left empty.
    pub fn submit(&mut self, doc: &mut Document) -> EditResult {
        if !self.is_editing() {
            return Ok(());
        }
        let url = std::mem::take(&mut self.pending_url);
        let saved = self.saved_selection.take();
        self.state = SessionState::Idle;

        let Some(selection) = saved else {
            return Ok(());
        };
        debug!(url = %url, "link editor submitted");
        if url.is_empty() {
            remove_link(doc, &selection)
        } else {
            apply_link(doc, &selection, &url)
        }
    }

    /// Editing → Idle, cancel path: discard everything, touch nothing
    pub fn cancel(&mut self) {
        self.pending_url.clear();
        self.saved_selection = None;
        self.state = SessionState::Idle;
    }
}

impl Default for LinkEditSession {
    fn default() -> Self {
        Self::new()
    }
}

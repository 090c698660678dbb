// Floating toolbar
// Owns the link-edit session and derives the panel's on-screen placement
// from the selection geometry the host reports. The host calls reposition()
// after any command from the same input event has committed, so geometry
// always reflects the post-mutation selection.

use crate::commands;
use crate::document::{Document, EditResult, StyleKind};
use crate::selection::Selection;
use crate::session::LinkEditSession;
use serde::{Deserialize, Serialize};

/// Screen-space rectangle of the native selection range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Rect { x, y, w, h }
    }
}

/// Selection geometry supplied by the hosting editing surface
pub trait SelectionSurface {
    /// Bounding rectangle of the native selection range, if one exists
    fn selection_rect(&self) -> Option<Rect>;
    /// Whether the editing surface currently holds input focus
    fn is_focused(&self) -> bool;
    /// Current (horizontal, vertical) scroll offset of the surface
    fn scroll_offset(&self) -> (i32, i32);
}

/// Where the panel goes this render pass; never persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToolbarGeometry {
    pub top: i32,
    pub left: i32,
    pub visible: bool,
}

impl ToolbarGeometry {
    fn hidden() -> Self {
        Self::default()
    }
}

/// Host-tunable toolbar settings. The fade is cosmetic only and not part
/// of the positioning contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolbarOptions {
    pub panel_width: i32,
    pub panel_height: i32,
    pub fade_ms: u64,
}

impl Default for ToolbarOptions {
    fn default() -> Self {
        ToolbarOptions {
            panel_width: 240,
            panel_height: 40,
            fade_ms: 750,
        }
    }
}

/// The floating control panel: formatting buttons in Idle, a URL input
/// while a link-edit session is active.
pub struct FloatingToolbar {
    options: ToolbarOptions,
    session: LinkEditSession,
    geometry: ToolbarGeometry,
}

impl FloatingToolbar {
    pub fn new(options: ToolbarOptions) -> Self {
        FloatingToolbar {
            options,
            session: LinkEditSession::new(),
            geometry: ToolbarGeometry::hidden(),
        }
    }

    pub fn options(&self) -> &ToolbarOptions {
        &self.options
    }

    pub fn session(&self) -> &LinkEditSession {
        &self.session
    }

    /// Geometry from the last reposition pass
    pub fn geometry(&self) -> ToolbarGeometry {
        self.geometry
    }

    /// Hook for the host to report the measured panel size when it differs
    /// from the configured one (fonts, icon sets).
    pub fn set_panel_size(&mut self, width: i32, height: i32) {
        self.options.panel_width = width;
        self.options.panel_height = height;
    }

    /// Pressed-state for a formatting button
    pub fn is_format_active(
        &self,
        doc: &Document,
        selection: Option<&Selection>,
        kind: StyleKind,
    ) -> bool {
        selection.is_some_and(|sel| commands::is_format_active(doc, sel, kind))
    }

    /// Toggle a mark on the current selection; without one this is a no-op
    pub fn toggle_format(
        &mut self,
        doc: &mut Document,
        selection: Option<&Selection>,
        kind: StyleKind,
    ) -> EditResult {
        match selection {
            Some(sel) => commands::toggle_format(doc, sel, kind),
            None => Ok(()),
        }
    }

    /// Switch the panel into URL-input mode for the current selection
    pub fn open_link_editor(&mut self, doc: &Document, selection: Option<&Selection>) {
        self.session.open(doc, selection);
    }

    /// Track keystrokes in the URL field
    pub fn set_pending_url(&mut self, url: impl Into<String>) {
        self.session.set_pending_url(url);
    }

    /// Commit the URL edit against the selection captured at open time.
    /// `url` is the field's final value as handed over by the form.
    pub fn submit_link_editor(&mut self, doc: &mut Document, url: impl Into<String>) -> EditResult {
        self.session.set_pending_url(url);
        self.session.submit(doc)
    }

    /// Drop the URL edit without touching the document
    pub fn cancel_link_editor(&mut self) {
        self.session.cancel();
    }

    /// Recompute visibility and placement from the current selection state.
    ///
    /// Visible iff a selection exists, the surface is focused, the selection
    /// is non-collapsed and its text is non-empty, except while a link-edit
    /// session is active, which forces the panel to stay up even though
    /// focus has moved to the URL field. Either way, no native selection
    /// rectangle means there is nothing to anchor to and the panel hides.
    pub fn reposition<S: SelectionSurface>(
        &mut self,
        doc: &Document,
        selection: Option<&Selection>,
        surface: &S,
    ) -> ToolbarGeometry {
        let selection_visible = match selection {
            Some(sel) => {
                !sel.is_collapsed() && surface.is_focused() && !sel.text(doc).is_empty()
            }
            None => false,
        };

        if !selection_visible && !self.session.is_editing() {
            self.geometry = ToolbarGeometry::hidden();
            return self.geometry;
        }

        self.geometry = match surface.selection_rect() {
            Some(rect) => {
                let (scroll_x, scroll_y) = surface.scroll_offset();
                ToolbarGeometry {
                    top: rect.y + scroll_y - self.options.panel_height,
                    left: rect.x + scroll_x - self.options.panel_width / 2 + rect.w / 2,
                    visible: true,
                }
            }
            None => ToolbarGeometry::hidden(),
        };
        self.geometry
    }
}

impl Default for FloatingToolbar {
    fn default() -> Self {
        Self::new(ToolbarOptions::default())
    }
}

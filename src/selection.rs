// Selection
// An anchor/focus pair of document positions. Direction matters to the host
// (shift-extension, rendering) but not to the formatting commands, which
// always work on the normalized span.

use crate::document::{Document, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    pub fn new(anchor: Position, focus: Position) -> Self {
        Selection { anchor, focus }
    }

    /// A zero-width selection (a caret)
    pub fn caret(pos: Position) -> Self {
        Selection {
            anchor: pos,
            focus: pos,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// (start, end) in document order, regardless of selection direction
    pub fn normalized(&self) -> (Position, Position) {
        if self.focus < self.anchor {
            (self.focus, self.anchor)
        } else {
            (self.anchor, self.focus)
        }
    }

    /// Plain text covered by this selection
    pub fn text(&self, doc: &Document) -> String {
        let (start, end) = self.normalized();
        doc.text_in_range(start, end)
    }
}

// Formatting and link commands
// Every command takes the target selection explicitly, is scoped to it, and
// leaves the selection untouched. Splits happen exactly at the selection
// edges; uncovered remainders keep their prior attrs.

use crate::document::{Document, EditResult, Leaf, Link, StyleKind};
use crate::selection::Selection;
use tracing::debug;

/// Uniform-on activity check: true iff every leaf-fragment intersecting the
/// selection has the mark set. A mixed selection reports inactive, so the
/// next toggle turns the mark on everywhere.
pub fn is_format_active(doc: &Document, selection: &Selection, kind: StyleKind) -> bool {
    let (start, end) = selection.normalized();
    let fragments = doc.leaves_in_range(start, end);
    !fragments.is_empty() && fragments.iter().all(|f| f.style.is_set(kind))
}

/// Toggle a mark across the selection: clear it everywhere when uniformly
/// on, set it everywhere otherwise.
pub fn toggle_format(doc: &mut Document, selection: &Selection, kind: StyleKind) -> EditResult {
    if selection.is_collapsed() {
        return Ok(());
    }
    let on = !is_format_active(doc, selection, kind);
    debug!(style = kind.name(), on, "toggle format");
    let (start, end) = selection.normalized();
    doc.set_leaf_attrs(start, end, |leaf| leaf.style.set(kind, on))
}

/// Apply a link across the selection. A collapsed selection inserts a new
/// leaf whose text is the URL itself; an expanded one re-tags every
/// intersecting fragment, replacing any link already there (at most one
/// link per fragment). An empty URL is equivalent to `remove_link`.
pub fn apply_link(doc: &mut Document, selection: &Selection, url: &str) -> EditResult {
    if url.is_empty() {
        return remove_link(doc, selection);
    }
    debug!(url, collapsed = selection.is_collapsed(), "apply link");
    if selection.is_collapsed() {
        let caret = doc.clamp_position(selection.anchor);
        return doc.insert_leaf(caret, Leaf::linked(url, url));
    }
    let (start, end) = selection.normalized();
    doc.set_leaf_attrs(start, end, |leaf| leaf.link = Some(Link::new(url)))
}

/// Clear the link annotation on every intersecting fragment that carries
/// one. Text and marks are preserved; removing a link never deletes text.
pub fn remove_link(doc: &mut Document, selection: &Selection) -> EditResult {
    if selection.is_collapsed() {
        return Ok(());
    }
    debug!("remove link");
    let (start, end) = selection.normalized();
    doc.set_leaf_attrs(start, end, |leaf| leaf.link = None)
}

/// First link URL under the selection, if any. A collapsed selection looks
/// at the leaf the caret sits in.
pub fn link_at(doc: &Document, selection: &Selection) -> Option<String> {
    if selection.is_collapsed() {
        return doc
            .leaf_at(selection.anchor)
            .and_then(|leaf| leaf.link.as_ref())
            .map(|link| link.url.clone());
    }
    let (start, end) = selection.normalized();
    doc.query_leaves(start, end, |f| f.link.is_some())
        .first()
        .and_then(|f| f.link.as_ref().map(|link| link.url.clone()))
}

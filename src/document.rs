// Inline document model
// Blocks of styled leaves plus the structural primitives the formatting
// commands are built on: splitting at range boundaries, inserting leaves,
// applying attribute changes to a range, and querying leaf fragments.

use serde::{Deserialize, Serialize};
use std::cmp::{max, min};
use std::fmt;
use thiserror::Error;

/// Result of a structural operation
pub type EditResult = Result<(), EditError>;

/// Errors that can occur during structural mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("block index out of range")]
    InvalidBlockIndex,
    #[error("offset past end of block or inside a multi-byte character")]
    InvalidPosition,
}

/// The closed set of character-level marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleKind {
    Bold,
    Italic,
    Underlined,
}

impl StyleKind {
    pub const ALL: [StyleKind; 3] = [StyleKind::Bold, StyleKind::Italic, StyleKind::Underlined];

    pub fn name(self) -> &'static str {
        match self {
            StyleKind::Bold => "bold",
            StyleKind::Italic => "italic",
            StyleKind::Underlined => "underlined",
        }
    }
}

/// Character-level style flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underlined: bool,
}

impl TextStyle {
    pub fn plain() -> Self {
        Self::default()
    }

    pub fn bold() -> Self {
        TextStyle {
            bold: true,
            ..Default::default()
        }
    }

    pub fn italic() -> Self {
        TextStyle {
            italic: true,
            ..Default::default()
        }
    }

    pub fn is_set(&self, kind: StyleKind) -> bool {
        match kind {
            StyleKind::Bold => self.bold,
            StyleKind::Italic => self.italic,
            StyleKind::Underlined => self.underlined,
        }
    }

    pub fn set(&mut self, kind: StyleKind, on: bool) {
        match kind {
            StyleKind::Bold => self.bold = on,
            StyleKind::Italic => self.italic = on,
            StyleKind::Underlined => self.underlined = on,
        }
    }
}

/// Link annotation (URL taken verbatim, validation is the renderer's problem)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

impl Link {
    pub fn new(url: impl Into<String>) -> Self {
        Link { url: url.into() }
    }
}

/// A leaf: a run of text with uniform styling and at most one link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    pub style: TextStyle,
    pub link: Option<Link>,
}

impl Leaf {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Leaf {
            text: text.into(),
            style,
            link: None,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, TextStyle::plain())
    }

    pub fn linked(text: impl Into<String>, url: impl Into<String>) -> Self {
        Leaf {
            text: text.into(),
            style: TextStyle::plain(),
            link: Some(Link::new(url)),
        }
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        self.link = Some(Link::new(url));
        self
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Split this leaf at the given byte offset, both halves keeping the
    /// style-and-link state. Returns (left, right).
    pub fn split_at(&self, offset: usize) -> (Leaf, Leaf) {
        let (left, right) = self.text.split_at(offset);
        (
            Leaf {
                text: left.to_string(),
                style: self.style,
                link: self.link.clone(),
            },
            Leaf {
                text: right.to_string(),
                style: self.style,
                link: self.link.clone(),
            },
        )
    }

    /// Two leaves with identical attrs may be merged by the normalizer
    pub fn same_attrs(&self, other: &Leaf) -> bool {
        self.style == other.style && self.link == other.link
    }
}

/// A described leaf-fragment: the part of a leaf covered by a query range
#[derive(Debug, Clone, PartialEq)]
pub struct LeafFragment {
    pub block_index: usize,
    pub text: String,
    pub style: TextStyle,
    pub link: Option<Link>,
}

/// A block element holding an ordered run of leaves
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub content: Vec<Leaf>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(mut self, text: impl Into<String>, style: TextStyle) -> Self {
        self.content.push(Leaf::new(text, style));
        self
    }

    pub fn with_plain_text(self, text: impl Into<String>) -> Self {
        self.with_text(text, TextStyle::plain())
    }

    pub fn with_linked_text(mut self, text: impl Into<String>, url: impl Into<String>) -> Self {
        self.content.push(Leaf::linked(text, url));
        self
    }

    pub fn text_len(&self) -> usize {
        self.content.iter().map(|l| l.len()).sum()
    }

    pub fn to_plain_text(&self) -> String {
        self.content.iter().map(|l| l.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.content.iter().all(|l| l.is_empty())
    }

    /// Snap a flattened offset back to the nearest char boundary at or
    /// before it. Hosts measure positions in their own layout, so an offset
    /// landing inside a multi-byte character must not reach `str` slicing.
    fn snap_to_char_boundary(&self, offset: usize) -> usize {
        let mut pos = 0;
        for leaf in &self.content {
            if offset <= pos + leaf.len() {
                let mut local = offset - pos;
                while local > 0 && !leaf.text.is_char_boundary(local) {
                    local -= 1;
                }
                return pos + local;
            }
            pos += leaf.len();
        }
        pos
    }

    /// Find the leaf containing the given flattened offset.
    /// Returns (leaf index, offset within that leaf); an offset landing on a
    /// leaf boundary resolves to the following leaf at local offset 0.
    fn leaf_index_at(&self, offset: usize) -> (usize, usize) {
        let mut pos = 0;
        for (i, leaf) in self.content.iter().enumerate() {
            if offset < pos + leaf.len() {
                return (i, offset - pos);
            }
            pos += leaf.len();
        }
        (self.content.len(), 0)
    }

    /// Drop empty leaves and merge adjacent leaves with identical attrs
    fn normalize(&mut self) {
        let mut merged: Vec<Leaf> = Vec::new();
        for leaf in self.content.drain(..) {
            if leaf.is_empty() {
                continue;
            }
            match merged.last_mut() {
                Some(prev) if prev.same_attrs(&leaf) => prev.text.push_str(&leaf.text),
                _ => merged.push(leaf),
            }
        }
        self.content = merged;
    }
}

/// Position within a document: block index plus byte offset into the
/// block's flattened text. Ordered in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub block_index: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(block_index: usize, offset: usize) -> Self {
        Position {
            block_index,
            offset,
        }
    }

    pub fn start() -> Self {
        Position::new(0, 0)
    }
}

/// The document tree: an ordered sequence of blocks
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with a single plain paragraph
    pub fn with_paragraph(text: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.add_block(Block::new().with_plain_text(text));
        doc
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut Vec<Block> {
        &mut self.blocks
    }

    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Clamp a position to document bounds. An offset inside a multi-byte
    /// character snaps back to the previous char boundary.
    pub fn clamp_position(&self, pos: Position) -> Position {
        if self.blocks.is_empty() {
            return Position::start();
        }
        let block_index = pos.block_index.min(self.blocks.len() - 1);
        let block = &self.blocks[block_index];
        let offset = block.snap_to_char_boundary(pos.offset.min(block.text_len()));
        Position::new(block_index, offset)
    }

    /// Position just past the last character of the document
    pub fn end_position(&self) -> Position {
        if self.blocks.is_empty() {
            return Position::start();
        }
        let last = self.blocks.len() - 1;
        Position::new(last, self.blocks[last].text_len())
    }

    pub fn to_plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.to_plain_text())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Plain text for a document range, blocks joined with blank lines
    pub fn text_in_range(&self, start: Position, end: Position) -> String {
        if self.blocks.is_empty() {
            return String::new();
        }
        let (a, b) = ordered(self.clamp_position(start), self.clamp_position(end));
        let mut s = String::new();
        for bi in a.block_index..=b.block_index {
            let text = self.blocks[bi].to_plain_text();
            let from = if bi == a.block_index { a.offset } else { 0 };
            let to = if bi == b.block_index { b.offset } else { text.len() };
            if from < to {
                if !s.is_empty() {
                    s.push_str("\n\n");
                }
                s.push_str(&text[from..to]);
            }
        }
        s
    }

    /// Ensure a leaf boundary exists exactly at the given position.
    /// No-op when the position already falls on a boundary; offsets past the
    /// block end or inside a multi-byte character are rejected.
    pub fn split_leaf_at(&mut self, pos: Position) -> EditResult {
        if pos.block_index >= self.blocks.len() {
            return Err(EditError::InvalidBlockIndex);
        }
        let block = &mut self.blocks[pos.block_index];
        if pos.offset > block.text_len() {
            return Err(EditError::InvalidPosition);
        }
        let (idx, local) = block.leaf_index_at(pos.offset);
        if local == 0 || idx >= block.content.len() {
            return Ok(());
        }
        if !block.content[idx].text.is_char_boundary(local) {
            return Err(EditError::InvalidPosition);
        }
        let (left, right) = block.content[idx].split_at(local);
        block.content[idx] = left;
        block.content.insert(idx + 1, right);
        Ok(())
    }

    /// Splice a leaf in at a caret position
    pub fn insert_leaf(&mut self, pos: Position, leaf: Leaf) -> EditResult {
        if self.blocks.is_empty() {
            let mut block = Block::new();
            block.content.push(leaf);
            block.normalize();
            self.blocks.push(block);
            return Ok(());
        }
        self.split_leaf_at(pos)?;
        let block = &mut self.blocks[pos.block_index];
        let (idx, _) = block.leaf_index_at(pos.offset);
        block.content.insert(idx, leaf);
        block.normalize();
        Ok(())
    }

    /// Apply a mutation to every leaf-fragment intersecting [start..end],
    /// splitting partially covered leaves exactly at the range edges so the
    /// uncovered remainders keep their prior attrs. Touched blocks are
    /// re-normalized afterwards.
    pub fn set_leaf_attrs<F>(&mut self, start: Position, end: Position, mut f: F) -> EditResult
    where
        F: FnMut(&mut Leaf),
    {
        if self.blocks.is_empty() {
            return Ok(());
        }
        let (start, end) = ordered(self.clamp_position(start), self.clamp_position(end));

        if start.block_index == end.block_index {
            let block = &mut self.blocks[start.block_index];
            apply_in_block(block, start.offset, end.offset, &mut f);
            return Ok(());
        }

        // Tail of the start block
        {
            let block = &mut self.blocks[start.block_index];
            let len = block.text_len();
            apply_in_block(block, start.offset, len, &mut f);
        }

        // Whole middle blocks
        for bi in (start.block_index + 1)..end.block_index {
            let block = &mut self.blocks[bi];
            for leaf in &mut block.content {
                f(leaf);
            }
            block.normalize();
        }

        // Head of the end block
        {
            let block = &mut self.blocks[end.block_index];
            apply_in_block(block, 0, end.offset, &mut f);
        }

        Ok(())
    }

    /// Describe the leaf-fragments intersecting [start..end]. Partially
    /// covered leaves report only the covered part of their text.
    pub fn leaves_in_range(&self, start: Position, end: Position) -> Vec<LeafFragment> {
        let mut fragments = Vec::new();
        if self.blocks.is_empty() {
            return fragments;
        }
        let (a, b) = ordered(self.clamp_position(start), self.clamp_position(end));
        for bi in a.block_index..=b.block_index {
            let block = &self.blocks[bi];
            let from = if bi == a.block_index { a.offset } else { 0 };
            let to = if bi == b.block_index {
                b.offset
            } else {
                block.text_len()
            };
            let mut pos = 0;
            for leaf in &block.content {
                let leaf_start = pos;
                let leaf_end = pos + leaf.len();
                let lo = max(leaf_start, from);
                let hi = min(leaf_end, to);
                if lo < hi {
                    fragments.push(LeafFragment {
                        block_index: bi,
                        text: leaf.text[lo - leaf_start..hi - leaf_start].to_string(),
                        style: leaf.style,
                        link: leaf.link.clone(),
                    });
                }
                pos = leaf_end;
            }
        }
        fragments
    }

    /// Leaf-fragments intersecting the range that match a predicate
    pub fn query_leaves<P>(&self, start: Position, end: Position, predicate: P) -> Vec<LeafFragment>
    where
        P: Fn(&LeafFragment) -> bool,
    {
        self.leaves_in_range(start, end)
            .into_iter()
            .filter(|f| predicate(f))
            .collect()
    }

    /// The leaf a caret position sits in. A position on a leaf boundary
    /// resolves to the following leaf, so a caret at a link's leading edge
    /// reports the link.
    pub fn leaf_at(&self, pos: Position) -> Option<&Leaf> {
        if self.blocks.is_empty() {
            return None;
        }
        let pos = self.clamp_position(pos);
        let block = &self.blocks[pos.block_index];
        let (idx, _) = block.leaf_index_at(pos.offset);
        block.content.get(idx).or_else(|| block.content.last())
    }

    /// Restore the adjacency invariant across all blocks
    pub fn merge_adjacent_leaves(&mut self) {
        for block in &mut self.blocks {
            block.normalize();
        }
    }
}

/// Split the covered range out of a block, mutate it, reassemble, normalize
fn apply_in_block<F>(block: &mut Block, start_offset: usize, end_offset: usize, f: &mut F)
where
    F: FnMut(&mut Leaf),
{
    let (before, mut selected, after) =
        split_leaves_for_range(&block.content, start_offset, end_offset);
    for leaf in &mut selected {
        f(leaf);
    }
    block.content = before.into_iter().chain(selected).chain(after).collect();
    block.normalize();
}

/// Split a run of leaves into three parts: before the range, within it,
/// and after it. Leaves straddling a range edge are split at exactly that
/// edge, never mid-leaf arbitrarily.
fn split_leaves_for_range(
    content: &[Leaf],
    start_offset: usize,
    end_offset: usize,
) -> (Vec<Leaf>, Vec<Leaf>, Vec<Leaf>) {
    let mut before = Vec::new();
    let mut selected = Vec::new();
    let mut after = Vec::new();

    let mut pos = 0;
    for leaf in content {
        let leaf_start = pos;
        let leaf_end = pos + leaf.len();

        if leaf_end <= start_offset {
            before.push(leaf.clone());
        } else if leaf_start >= end_offset {
            after.push(leaf.clone());
        } else if leaf_start >= start_offset && leaf_end <= end_offset {
            selected.push(leaf.clone());
        } else {
            // Partial overlap: carve the leaf at the range edges
            let sel_start = start_offset.saturating_sub(leaf_start);
            let sel_end = min(leaf.len(), end_offset - leaf_start);

            if sel_start > 0 {
                let (head, _) = leaf.split_at(sel_start);
                before.push(head);
            }
            if sel_end > sel_start {
                let mut mid = leaf.clone();
                mid.text = leaf.text[sel_start..sel_end].to_string();
                selected.push(mid);
            }
            if sel_end < leaf.len() {
                let (_, tail) = leaf.split_at(sel_end);
                after.push(tail);
            }
        }

        pos = leaf_end;
    }

    (before, selected, after)
}

fn ordered(a: Position, b: Position) -> (Position, Position) {
    if b < a { (b, a) } else { (a, b) }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Document ({} blocks):", self.blocks.len())?;
        for (i, block) in self.blocks.iter().enumerate() {
            write!(f, "  [{}]", i)?;
            for leaf in &block.content {
                write!(f, " {:?}", leaf.text)?;
                let mut tags: Vec<String> = StyleKind::ALL
                    .iter()
                    .filter(|k| leaf.style.is_set(**k))
                    .map(|k| k.name().to_string())
                    .collect();
                if let Some(link) = &leaf.link {
                    tags.push(format!("link={}", link.url));
                }
                if !tags.is_empty() {
                    write!(f, "({})", tags.join("+"))?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_split() {
        let leaf = Leaf::plain("hello world");
        assert_eq!(leaf.len(), 11);

        let (left, right) = leaf.split_at(5);
        assert_eq!(left.text, "hello");
        assert_eq!(right.text, " world");
        assert!(left.same_attrs(&right));
    }

    #[test]
    fn test_split_keeps_link_on_both_halves() {
        let leaf = Leaf::linked("click here", "https://example.com");
        let (left, right) = leaf.split_at(5);
        assert_eq!(left.link.as_ref().unwrap().url, "https://example.com");
        assert_eq!(right.link.as_ref().unwrap().url, "https://example.com");
    }

    #[test]
    fn test_block_text_len() {
        let block = Block::new()
            .with_plain_text("hello")
            .with_text(" world", TextStyle::bold());
        assert_eq!(block.text_len(), 11);
        assert_eq!(block.to_plain_text(), "hello world");
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 5) < Position::new(0, 6));
        assert!(Position::new(0, 100) < Position::new(1, 0));
    }

    #[test]
    fn test_position_clamping() {
        let doc = Document::with_paragraph("hello");
        let clamped = doc.clamp_position(Position::new(0, 100));
        assert_eq!(clamped.offset, 5);
        let clamped = doc.clamp_position(Position::new(9, 2));
        assert_eq!(clamped.block_index, 0);
    }

    #[test]
    fn test_split_leaf_at_creates_boundary() {
        let mut doc = Document::with_paragraph("hello world");
        doc.split_leaf_at(Position::new(0, 5)).unwrap();
        let block = &doc.blocks()[0];
        assert_eq!(block.content.len(), 2);
        assert_eq!(block.content[0].text, "hello");
        assert_eq!(block.content[1].text, " world");
    }

    #[test]
    fn test_split_leaf_at_boundary_is_noop() {
        let mut doc = Document::new();
        doc.add_block(
            Block::new()
                .with_plain_text("ab")
                .with_text("cd", TextStyle::bold()),
        );
        doc.split_leaf_at(Position::new(0, 2)).unwrap();
        assert_eq!(doc.blocks()[0].content.len(), 2);
    }

    #[test]
    fn test_split_leaf_at_out_of_range() {
        let mut doc = Document::with_paragraph("ab");
        assert_eq!(
            doc.split_leaf_at(Position::new(3, 0)),
            Err(EditError::InvalidBlockIndex)
        );
        assert_eq!(
            doc.split_leaf_at(Position::new(0, 9)),
            Err(EditError::InvalidPosition)
        );
    }

    #[test]
    fn test_split_leaf_at_mid_char_is_rejected() {
        // 'é' occupies bytes 1..3
        let mut doc = Document::with_paragraph("héllo");
        assert_eq!(
            doc.split_leaf_at(Position::new(0, 2)),
            Err(EditError::InvalidPosition)
        );
        assert_eq!(doc.blocks()[0].content.len(), 1);
    }

    #[test]
    fn test_clamp_snaps_mid_char_offset() {
        let doc = Document::with_paragraph("héllo");
        assert_eq!(doc.clamp_position(Position::new(0, 2)).offset, 1);
        assert_eq!(doc.clamp_position(Position::new(0, 3)).offset, 3);
    }

    #[test]
    fn test_set_leaf_attrs_snaps_mid_char_range() {
        let mut doc = Document::with_paragraph("héllo");
        doc.set_leaf_attrs(Position::new(0, 0), Position::new(0, 2), |leaf| {
            leaf.style.bold = true;
        })
        .unwrap();
        let block = &doc.blocks()[0];
        assert_eq!(block.content[0].text, "h");
        assert!(block.content[0].style.bold);
        assert_eq!(block.content[1].text, "éllo");
        assert!(!block.content[1].style.bold);
    }

    #[test]
    fn test_insert_leaf_at_caret() {
        let mut doc = Document::with_paragraph("ab");
        doc.insert_leaf(Position::new(0, 1), Leaf::linked("x", "https://x"))
            .unwrap();
        let block = &doc.blocks()[0];
        assert_eq!(block.to_plain_text(), "axb");
        assert_eq!(block.content.len(), 3);
        assert_eq!(block.content[1].link.as_ref().unwrap().url, "https://x");
    }

    #[test]
    fn test_insert_leaf_into_empty_document() {
        let mut doc = Document::new();
        doc.insert_leaf(Position::start(), Leaf::plain("hi"))
            .unwrap();
        assert_eq!(doc.to_plain_text(), "hi");
    }

    #[test]
    fn test_normalize_merges_identical_neighbours() {
        let mut doc = Document::new();
        doc.add_block(
            Block::new()
                .with_text("hello", TextStyle::bold())
                .with_text(" world", TextStyle::bold()),
        );
        doc.merge_adjacent_leaves();
        let block = &doc.blocks()[0];
        assert_eq!(block.content.len(), 1);
        assert_eq!(block.content[0].text, "hello world");
    }

    #[test]
    fn test_normalize_keeps_distinct_neighbours() {
        let mut doc = Document::new();
        doc.add_block(
            Block::new()
                .with_plain_text("a")
                .with_linked_text("b", "https://x")
                .with_plain_text("c"),
        );
        doc.merge_adjacent_leaves();
        assert_eq!(doc.blocks()[0].content.len(), 3);
    }

    #[test]
    fn test_set_leaf_attrs_partial_coverage() {
        let mut doc = Document::with_paragraph("hello world");
        doc.set_leaf_attrs(Position::new(0, 6), Position::new(0, 11), |leaf| {
            leaf.style.bold = true;
        })
        .unwrap();
        let block = &doc.blocks()[0];
        assert_eq!(block.content.len(), 2);
        assert_eq!(block.content[0].text, "hello ");
        assert!(!block.content[0].style.bold);
        assert_eq!(block.content[1].text, "world");
        assert!(block.content[1].style.bold);
    }

    #[test]
    fn test_set_leaf_attrs_reversed_range() {
        let mut doc = Document::with_paragraph("hello world");
        doc.set_leaf_attrs(Position::new(0, 11), Position::new(0, 6), |leaf| {
            leaf.style.italic = true;
        })
        .unwrap();
        assert!(doc.blocks()[0].content[1].style.italic);
    }

    #[test]
    fn test_set_leaf_attrs_multi_block() {
        let mut doc = Document::new();
        doc.add_block(Block::new().with_plain_text("first"));
        doc.add_block(Block::new().with_plain_text("middle"));
        doc.add_block(Block::new().with_plain_text("last"));

        doc.set_leaf_attrs(Position::new(0, 3), Position::new(2, 2), |leaf| {
            leaf.style.bold = true;
        })
        .unwrap();

        let b0 = &doc.blocks()[0];
        assert_eq!(b0.content[0].text, "fir");
        assert!(!b0.content[0].style.bold);
        assert!(b0.content[1].style.bold);

        assert!(doc.blocks()[1].content[0].style.bold);

        let b2 = &doc.blocks()[2];
        assert_eq!(b2.content[0].text, "la");
        assert!(b2.content[0].style.bold);
        assert!(!b2.content[1].style.bold);
    }

    #[test]
    fn test_leaves_in_range_reports_covered_text_only() {
        let mut doc = Document::new();
        doc.add_block(
            Block::new()
                .with_plain_text("hello ")
                .with_text("world", TextStyle::bold()),
        );
        let frags = doc.leaves_in_range(Position::new(0, 3), Position::new(0, 8));
        assert_eq!(frags.len(), 2);
        assert_eq!(frags[0].text, "lo ");
        assert_eq!(frags[1].text, "wo");
        assert!(frags[1].style.bold);
    }

    #[test]
    fn test_leaves_in_range_collapsed_is_empty() {
        let doc = Document::with_paragraph("hello");
        assert!(
            doc.leaves_in_range(Position::new(0, 2), Position::new(0, 2))
                .is_empty()
        );
    }

    #[test]
    fn test_query_leaves_by_link() {
        let mut doc = Document::new();
        doc.add_block(
            Block::new()
                .with_plain_text("go to ")
                .with_linked_text("site", "https://example.com"),
        );
        let linked = doc.query_leaves(Position::new(0, 0), Position::new(0, 10), |f| {
            f.link.is_some()
        });
        assert_eq!(linked.len(), 1);
        assert_eq!(linked[0].text, "site");
    }

    #[test]
    fn test_leaf_at_inside_link() {
        let mut doc = Document::new();
        doc.add_block(
            Block::new()
                .with_plain_text("ab")
                .with_linked_text("cd", "https://x"),
        );
        let leaf = doc.leaf_at(Position::new(0, 3)).unwrap();
        assert_eq!(leaf.link.as_ref().unwrap().url, "https://x");
        // A caret on the link's left boundary belongs to the link side
        let leaf = doc.leaf_at(Position::new(0, 2)).unwrap();
        assert!(leaf.link.is_some());
    }

    #[test]
    fn test_text_in_range_across_blocks() {
        let mut doc = Document::new();
        doc.add_block(Block::new().with_plain_text("first block"));
        doc.add_block(Block::new().with_plain_text("second"));
        let text = doc.text_in_range(Position::new(0, 6), Position::new(1, 3));
        assert_eq!(text, "block\n\nsec");
    }

    #[test]
    fn test_display_rendering() {
        let mut doc = Document::new();
        doc.add_block(
            Block::new()
                .with_plain_text("hello ")
                .with_text("world", TextStyle::bold()),
        );
        insta::assert_snapshot!(doc.to_string(), @r#"
        Document (1 blocks):
          [0] "hello " "world"(bold)
        "#);
    }
}

//! Line-level GEDCOM parser
//!
//! Turns raw GEDCOM text into a forest of generic nodes. Each source line is
//! `<level> <pointer?> <tag> <data?>`; hierarchy is reconstructed purely from
//! the level-number prefix. No tag is interpreted here — the normalizer
//! downstream decides which records and sub-tags matter.

use super::node::GedcomNode;
use tracing::warn;

/// Parse GEDCOM text into the top-level node forest.
///
/// Tolerant by design: blank lines are ignored, and lines without a numeric
/// level or without a tag are skipped with a warning rather than aborting the
/// parse. The normalizer is equally tolerant of missing substructure, so a
/// partially damaged file still yields every readable record.
pub fn parse(text: &str) -> Vec<GedcomNode> {
    let mut roots: Vec<GedcomNode> = Vec::new();
    // Open nodes from the root down to the deepest unfinished one. A node is
    // attached to its parent only once all of its children have been seen.
    let mut stack: Vec<(u32, GedcomNode)> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        let Some((level, node)) = parse_line(line) else {
            warn!(line = index + 1, "skipping malformed GEDCOM line");
            continue;
        };

        close_down_to(level, &mut stack, &mut roots);
        stack.push((level, node));
    }

    close_down_to(0, &mut stack, &mut roots);
    roots
}

/// Pop every open node at `level` or deeper, attaching each to the node
/// beneath it (or to the root forest). A line that skips levels upward ends
/// up under the deepest still-open node.
fn close_down_to(level: u32, stack: &mut Vec<(u32, GedcomNode)>, roots: &mut Vec<GedcomNode>) {
    while stack.last().is_some_and(|(open_level, _)| *open_level >= level) {
        let (_, node) = stack.pop().expect("stack checked non-empty");
        match stack.last_mut() {
            Some((_, parent)) => parent.tree.push(node),
            None => roots.push(node),
        }
    }
}

/// Split one line into its level and node. Returns `None` for lines that
/// cannot carry a node: missing or non-numeric level, or no tag.
fn parse_line(line: &str) -> Option<(u32, GedcomNode)> {
    let (level_token, rest) = split_token(line);
    let level: u32 = level_token.parse().ok()?;

    // An @...@ token right after the level is the record's cross-reference
    // pointer; cross-references in payload position stay in `data`.
    let (pointer, rest) = if rest.starts_with('@') {
        let (pointer, rest) = split_token(rest);
        (pointer, rest)
    } else {
        ("", rest)
    };

    let (tag, data) = split_token(rest);
    if tag.is_empty() {
        return None;
    }

    Some((level, GedcomNode::new(pointer, tag, data)))
}

/// First whitespace-separated token and the trimmed remainder.
fn split_token(s: &str) -> (&str, &str) {
    match s.split_once(' ') {
        Some((token, rest)) => (token, rest.trim_start()),
        None => (s, ""),
    }
}

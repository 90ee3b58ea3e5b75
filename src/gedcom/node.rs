/// A single node of the parsed GEDCOM tree
///
/// Nodes carry no record semantics: `tag` is whatever the source line said,
/// and the normalizer decides which tags it cares about. The tree mirrors the
/// line-level nesting of the source file, with level numbers strictly
/// increasing downward (a pure forest, no cycles possible by construction).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GedcomNode {
    /// Cross-reference identifier of the record (`@I1@` style), or empty.
    /// Only record-defining lines (level 0) carry one.
    pub pointer: String,
    /// Line tag (e.g. `INDI`, `NAME`, `DATE`)
    pub tag: String,
    /// Line payload after the tag, or empty
    pub data: String,
    /// Child nodes, one nesting level down, in source order
    pub tree: Vec<GedcomNode>,
}

impl GedcomNode {
    pub fn new(pointer: impl Into<String>, tag: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            pointer: pointer.into(),
            tag: tag.into(),
            data: data.into(),
            tree: Vec::new(),
        }
    }

    /// First child with the given tag
    pub fn child(&self, tag: &str) -> Option<&GedcomNode> {
        self.tree.iter().find(|n| n.tag == tag)
    }

    /// All children with the given tag, in source order
    pub fn children<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a GedcomNode> {
        self.tree.iter().filter(move |n| n.tag == tag)
    }

    /// Payload of the first child with the given tag
    pub fn child_data(&self, tag: &str) -> Option<&str> {
        self.child(tag).map(|n| n.data.as_str())
    }

    /// Payload two levels down: first child with `tag`, then its first child
    /// with `subtag` (e.g. `BIRT` → `DATE`)
    pub fn nested_data(&self, tag: &str, subtag: &str) -> Option<&str> {
        self.child(tag).and_then(|n| n.child_data(subtag))
    }
}

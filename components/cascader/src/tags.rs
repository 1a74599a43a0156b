//! The ordered list of selected leaves shown as chips.

use crate::tree::NodeId;

/// A selected leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<V> {
    /// The leaf this tag stands for.
    pub node: NodeId,
    /// The leaf's value.
    pub value: V,
}

/// Selected leaves in the order they were selected.
///
/// The list itself does not deduplicate; the engine checks membership before
/// adding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagList<V> {
    tags: Vec<Tag<V>>,
}

impl<V> Default for TagList<V> {
    fn default() -> Self {
        Self { tags: Vec::new() }
    }
}

impl<V> TagList<V> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Appends a tag to the end.
    pub fn push(&mut self, tag: Tag<V>) {
        self.tags.push(tag);
    }

    /// Removes the entry for `node`, if any.
    pub fn remove_node(&mut self, node: NodeId) -> Option<Tag<V>> {
        let index = self.tags.iter().position(|tag| tag.node == node)?;
        Some(self.tags.remove(index))
    }

    /// `true` if `node` has an entry.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.tags.iter().any(|tag| tag.node == node)
    }

    /// Empties the list.
    pub fn clear(&mut self) {
        self.tags.clear();
    }

    /// Number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// `true` if nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Tags in selection order.
    pub fn iter(&self) -> core::slice::Iter<'_, Tag<V>> {
        self.tags.iter()
    }

    /// Node ids in selection order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.tags.iter().map(|tag| tag.node)
    }
}

impl<V: PartialEq> TagList<V> {
    /// Removes the first tag whose value equals `value`. Absent values are a
    /// no-op.
    pub fn remove(&mut self, value: &V) -> Option<Tag<V>> {
        let index = self.tags.iter().position(|tag| tag.value == *value)?;
        Some(self.tags.remove(index))
    }
}

impl<'a, V> IntoIterator for &'a TagList<V> {
    type Item = &'a Tag<V>;
    type IntoIter = core::slice::Iter<'a, Tag<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tag(index: usize, value: &'static str) -> Tag<&'static str> {
        Tag {
            node: NodeId::from_index(index),
            value,
        }
    }

    #[test]
    fn push_keeps_selection_order() {
        let mut tags = TagList::new();
        tags.push(tag(4, "d"));
        tags.push(tag(1, "a"));
        assert_eq!(tags.iter().map(|t| t.value).collect::<Vec<_>>(), ["d", "a"]);
    }

    #[test]
    fn push_does_not_deduplicate() {
        let mut tags = TagList::new();
        tags.push(tag(1, "a"));
        tags.push(tag(1, "a"));
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn remove_takes_first_matching_value() {
        let mut tags = TagList::new();
        tags.push(tag(1, "x"));
        tags.push(tag(2, "y"));
        tags.push(tag(3, "x"));

        let removed = tags.remove(&"x").unwrap();
        assert_eq!(removed.node, NodeId::from_index(1));
        assert_eq!(tags.nodes().collect::<Vec<_>>(), [
            NodeId::from_index(2),
            NodeId::from_index(3)
        ]);
    }

    #[test]
    fn removing_absent_entries_is_a_no_op() {
        let mut tags = TagList::new();
        tags.push(tag(1, "a"));
        assert!(tags.remove(&"zzz").is_none());
        assert!(tags.remove_node(NodeId::from_index(7)).is_none());
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn clear_resets() {
        let mut tags = TagList::new();
        tags.push(tag(1, "a"));
        tags.clear();
        assert!(tags.is_empty());
        assert!(!tags.contains(NodeId::from_index(1)));
    }
}

//! Arena-backed option tree.
//!
//! Nodes live in a flat vector and refer to each other by [`NodeId`]. A parent
//! owns the ordering of its children; children only keep the parent's id, so
//! the back-reference never affects lifetime.

use core::fmt::{self, Display};

use crate::state::CheckState;

/// Index of a node inside an [`OptionTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Creates an id from a raw arena index.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    /// Returns the raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Source record for a single option, as supplied by the host.
///
/// ```
/// use arbor_cascader::OptionData;
///
/// let region = OptionData::new(1)
///     .label("Europe")
///     .child(OptionData::new(10).label("Berlin"))
///     .child(OptionData::new(11).label("Paris").disabled(true));
/// assert_eq!(region.children.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionData<V> {
    /// Identifier, unique among siblings.
    pub value: V,
    /// Display text.
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: String,
    /// Whether the option is locked against selection changes.
    #[cfg_attr(feature = "serde", serde(default))]
    pub disabled: bool,
    /// Nested options. Empty for leaves.
    #[cfg_attr(
        feature = "serde",
        serde(default = "Vec::new", skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<OptionData<V>>,
}

impl<V> OptionData<V> {
    /// Creates an enabled option without a label or children.
    pub const fn new(value: V) -> Self {
        Self {
            value,
            label: String::new(),
            disabled: false,
            children: Vec::new(),
        }
    }

    /// Sets the display text.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets whether the option is disabled.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Appends a child option.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Appends several child options.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }
}

/// A node of the option tree together with its selection state.
#[derive(Debug, Clone)]
pub struct OptionNode<V> {
    value: V,
    label: String,
    disabled: bool,
    state: CheckState,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
}

impl<V> OptionNode<V> {
    /// The option's identifier.
    pub const fn value(&self) -> &V {
        &self.value
    }

    /// The option's display text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the option is disabled.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Current check state.
    #[must_use]
    pub const fn state(&self) -> CheckState {
        self.state
    }

    /// Shorthand for `state().checked()`.
    #[must_use]
    pub const fn checked(&self) -> bool {
        self.state.checked()
    }

    /// Shorthand for `state().half_checked()`.
    #[must_use]
    pub const fn half_checked(&self) -> bool {
        self.state.half_checked()
    }

    /// The owning node, `None` for options in the root column.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child ids in source order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Column index of this node; root options are at depth 0.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// A node without children.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub(crate) const fn set_state(&mut self, state: CheckState) {
        self.state = state;
    }
}

/// Hierarchical options stored in an arena.
#[derive(Debug, Clone)]
pub struct OptionTree<V> {
    nodes: Vec<OptionNode<V>>,
    roots: Vec<NodeId>,
}

impl<V> Default for OptionTree<V> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }
}

impl<V> OptionTree<V> {
    /// Builds a tree from source records.
    ///
    /// Parent links are set as each node is inserted, so every node is fully
    /// linked before it can be looked up.
    pub fn from_options(options: impl IntoIterator<Item = OptionData<V>>) -> Self {
        let mut tree = Self::default();
        for option in options {
            let id = tree.insert(option, None, 0);
            tree.roots.push(id);
        }
        tree
    }

    fn insert(&mut self, option: OptionData<V>, parent: Option<NodeId>, depth: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(OptionNode {
            value: option.value,
            label: option.label,
            disabled: option.disabled,
            state: CheckState::Unchecked,
            parent,
            children: Vec::with_capacity(option.children.len()),
            depth,
        });
        for child in option.children {
            let child_id = self.insert(child, Some(id), depth + 1);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// `true` if the tree has no options.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The first column of options.
    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Looks up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&OptionNode<V>> {
        self.nodes.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut OptionNode<V>> {
        self.nodes.get_mut(id.0)
    }

    /// Child ids of `id`; empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[] as &[NodeId], OptionNode::children)
    }

    /// Parent of `id`.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(OptionNode::parent)
    }

    /// Check state of `id`; unknown ids read as unchecked.
    #[must_use]
    pub fn state(&self, id: NodeId) -> CheckState {
        self.get(id).map_or(CheckState::Unchecked, OptionNode::state)
    }

    /// Iterates over the strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        core::iter::successors(self.parent(id), |&node| self.parent(node))
    }

    /// Node ids from the root column down to `id`, inclusive.
    #[must_use]
    pub fn path(&self, id: NodeId) -> Vec<NodeId> {
        let mut path: Vec<NodeId> = self.ancestors(id).collect();
        path.reverse();
        path.push(id);
        path
    }

    /// `true` if `id` or any of its ancestors is disabled.
    #[must_use]
    pub fn is_locked(&self, id: NodeId) -> bool {
        core::iter::once(id)
            .chain(self.ancestors(id))
            .any(|node| self.get(node).is_some_and(OptionNode::is_disabled))
    }

    /// Iterates over every node in insertion (pre-)order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &OptionNode<V>)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index), node))
    }
}

impl<V: Clone> OptionTree<V> {
    /// Values from the root column down to `id`, inclusive.
    #[must_use]
    pub fn value_path(&self, id: NodeId) -> Vec<V> {
        self.path(id)
            .into_iter()
            .filter_map(|node| self.get(node).map(|node| node.value.clone()))
            .collect()
    }
}

impl<V: PartialEq> OptionTree<V> {
    /// Finds the node in `column` whose value equals `value`.
    #[must_use]
    pub fn find_in(&self, column: &[NodeId], value: &V) -> Option<NodeId> {
        column
            .iter()
            .copied()
            .find(|&id| self.get(id).is_some_and(|node| node.value == *value))
    }
}

impl<V> FromIterator<OptionData<V>> for OptionTree<V> {
    fn from_iter<T: IntoIterator<Item = OptionData<V>>>(iter: T) -> Self {
        Self::from_options(iter)
    }
}

//! The selection engine: keeps per-node tri-state and the tag list consistent
//! while options are toggled.

use core::fmt::Debug;

use tracing::{debug, debug_span, trace};

use crate::{
    error::CascaderError,
    state::CheckState,
    tags::{Tag, TagList},
    tree::{NodeId, OptionData, OptionNode, OptionTree},
};

/// Owns an option tree and the list of selected leaves derived from it.
///
/// ```
/// use arbor_cascader::{OptionData, SelectionEngine};
///
/// let mut engine = SelectionEngine::from_options([OptionData::new("fruit")
///     .child(OptionData::new("apple"))
///     .child(OptionData::new("pear"))]);
///
/// let fruit = engine.tree().roots()[0];
/// engine.toggle(fruit)?;
/// assert_eq!(engine.tags().len(), 2);
/// assert_eq!(
///     engine.selected_values(),
///     vec![vec!["fruit", "apple"], vec!["fruit", "pear"]]
/// );
/// # Ok::<(), arbor_cascader::CascaderError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SelectionEngine<V> {
    tree: OptionTree<V>,
    tags: TagList<V>,
}

impl<V> Default for SelectionEngine<V> {
    fn default() -> Self {
        Self::new(OptionTree::default())
    }
}

impl<V> SelectionEngine<V> {
    /// Wraps an existing tree with an empty selection.
    #[must_use]
    pub const fn new(tree: OptionTree<V>) -> Self {
        Self {
            tree,
            tags: TagList::new(),
        }
    }

    /// Builds the tree from source records.
    pub fn from_options(options: impl IntoIterator<Item = OptionData<V>>) -> Self {
        Self::new(OptionTree::from_options(options))
    }

    /// The option tree.
    #[must_use]
    pub const fn tree(&self) -> &OptionTree<V> {
        &self.tree
    }

    /// The selected leaves in selection order.
    #[must_use]
    pub const fn tags(&self) -> &TagList<V> {
        &self.tags
    }

    /// Looks up a node.
    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&OptionNode<V>> {
        self.tree.get(id)
    }

    /// Check state of `id`.
    #[must_use]
    pub fn state(&self, id: NodeId) -> CheckState {
        self.tree.state(id)
    }

    /// Resets every option to unchecked and empties the tag list.
    pub fn clear(&mut self) {
        let ids: Vec<NodeId> = self.tree.iter().map(|(id, _)| id).collect();
        for id in ids {
            self.set_state(id, CheckState::Unchecked);
        }
        self.tags.clear();
        debug!("selection cleared");
    }

    fn set_state(&mut self, id: NodeId, state: CheckState) {
        if let Some(node) = self.tree.get_mut(id) {
            node.set_state(state);
        }
    }
}

impl<V: Clone + PartialEq + Debug> SelectionEngine<V> {
    /// Resolves a value path to the first leaf it reaches.
    ///
    /// Each value is matched against one column, starting at the roots.
    /// Values after the leaf are ignored.
    ///
    /// # Errors
    ///
    /// [`CascaderError::NodeNotFound`] if a level has no matching option,
    /// [`CascaderError::IncompletePath`] if the values run out on a branch.
    pub fn find_path(&self, values: &[V]) -> Result<NodeId, CascaderError> {
        let mut column = self.tree.roots();
        for (level, value) in values.iter().enumerate() {
            let id = self
                .tree
                .find_in(column, value)
                .ok_or_else(|| CascaderError::NodeNotFound {
                    level,
                    value: format!("{value:?}"),
                })?;
            let children = self.tree.children(id);
            if children.is_empty() {
                return Ok(id);
            }
            column = children;
        }
        Err(CascaderError::IncompletePath {
            levels: values.len(),
        })
    }

    /// Marks the leaf at the end of `target_values` as selected and
    /// re-derives every ancestor up to the root.
    ///
    /// A disabled leaf, or one under a disabled ancestor, is left as it is.
    ///
    /// # Errors
    ///
    /// Fails when the values do not describe a path to a leaf; see
    /// [`SelectionEngine::find_path`].
    pub fn initialize_from_values(&mut self, target_values: &[V]) -> Result<NodeId, CascaderError> {
        let leaf = self.find_path(target_values)?;
        if self.tree.is_locked(leaf) {
            debug!(node = %leaf, "skipping initial selection of disabled option");
            return Ok(leaf);
        }

        self.set_state(leaf, CheckState::Checked);
        self.reconcile_leaf_tag(leaf);
        let ancestors: Vec<NodeId> = self.tree.ancestors(leaf).collect();
        for ancestor in ancestors {
            self.reconcile_branch(ancestor);
        }
        Ok(leaf)
    }

    /// Applies [`SelectionEngine::initialize_from_values`] to each path of a
    /// multiple-selection value, in order.
    ///
    /// # Errors
    ///
    /// Stops at the first path that does not resolve. Paths before it stay
    /// applied.
    pub fn initialize_many<P: AsRef<[V]>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<Vec<NodeId>, CascaderError> {
        paths
            .into_iter()
            .map(|path| self.initialize_from_values(path.as_ref()))
            .collect()
    }

    /// Replaces the whole selection with `paths`.
    ///
    /// Either every path is applied or, on error, the current selection is
    /// left exactly as it was.
    ///
    /// # Errors
    ///
    /// The first path that does not resolve; see
    /// [`SelectionEngine::find_path`].
    pub fn replace_selection<P: AsRef<[V]>>(
        &mut self,
        paths: impl IntoIterator<Item = P>,
    ) -> Result<(), CascaderError> {
        let mut next = self.clone();
        next.clear();
        next.initialize_many(paths)?;
        *self = next;
        Ok(())
    }

    /// Toggles `node`, using its depth as the level index.
    ///
    /// # Errors
    ///
    /// [`CascaderError::UnknownNode`] if `node` is not in the tree.
    pub fn toggle(&mut self, node: NodeId) -> Result<(), CascaderError> {
        let level = self
            .tree
            .get(node)
            .ok_or(CascaderError::UnknownNode(node))?
            .depth();
        self.toggle_node(node, level)
    }

    /// Toggles `node`, which the host shows in column `level`.
    ///
    /// The subtree settles first; then `level` ancestors are re-derived from
    /// their children, nearest first. A toggle in column 0 touches no
    /// ancestor. Disabled options, and options under a disabled ancestor,
    /// ignore the toggle.
    ///
    /// # Errors
    ///
    /// [`CascaderError::UnknownNode`] if `node` is not in the tree, and
    /// [`CascaderError::MissingParent`] if `level` is deeper than the node
    /// actually sits. Both are detected before anything changes.
    pub fn toggle_node(&mut self, node: NodeId, level: usize) -> Result<(), CascaderError> {
        let current = self.tree.get(node).ok_or(CascaderError::UnknownNode(node))?;
        if level > current.depth() {
            return Err(CascaderError::MissingParent { node, level });
        }
        if self.tree.is_locked(node) {
            debug!(node = %node, "toggle ignored on disabled option");
            return Ok(());
        }

        let next = current.state().toggled();
        let _span = debug_span!("toggle", node = %node, level, ?next).entered();

        self.set_state(node, next);
        self.propagate_down(node, next);

        let mut child = node;
        for _ in 0..level {
            let parent = self
                .tree
                .parent(child)
                .ok_or(CascaderError::MissingParent { node, level })?;
            self.reconcile_branch(parent);
            child = parent;
        }
        debug!(state = ?self.tree.state(node), tags = self.tags.len(), "toggle settled");
        Ok(())
    }

    /// Re-derives `node` from its current children and returns the result.
    ///
    /// Leaves have nothing to aggregate: their tag entry is reconciled and
    /// their state is returned unchanged. Disabled nodes, and branches whose
    /// children are all disabled, keep their state.
    ///
    /// # Errors
    ///
    /// [`CascaderError::UnknownNode`] if `node` is not in the tree.
    pub fn reconcile_from_children(&mut self, node: NodeId) -> Result<CheckState, CascaderError> {
        if self.tree.get(node).is_none() {
            return Err(CascaderError::UnknownNode(node));
        }
        Ok(self.reconcile_branch(node))
    }

    /// Value paths of the selected leaves, in tag order.
    #[must_use]
    pub fn selected_values(&self) -> Vec<Vec<V>> {
        self.tags
            .iter()
            .map(|tag| self.tree.value_path(tag.node))
            .collect()
    }

    /// Pushes `target` through the enabled part of the subtree below `id`.
    ///
    /// Clearing stops at children that were already clear. Branches are
    /// re-derived once their children have settled.
    fn propagate_down(&mut self, id: NodeId, target: CheckState) {
        let children = self.tree.children(id).to_vec();
        if children.is_empty() {
            self.reconcile_leaf_tag(id);
            return;
        }

        for child in children {
            let Some(node) = self.tree.get(child) else {
                continue;
            };
            if node.is_disabled() {
                continue;
            }
            let was_clear = node.state().is_clear();
            self.set_state(child, target);
            if target.checked() || !was_clear {
                self.propagate_down(child, target);
            }
        }
        self.reconcile_branch(id);
    }

    fn reconcile_branch(&mut self, id: NodeId) -> CheckState {
        let Some(node) = self.tree.get(id) else {
            return CheckState::Unchecked;
        };
        if node.is_leaf() {
            let state = node.state();
            self.reconcile_leaf_tag(id);
            return state;
        }
        if node.is_disabled() {
            return node.state();
        }

        let enabled: Vec<CheckState> = node
            .children()
            .iter()
            .filter_map(|&child| self.tree.get(child))
            .filter(|child| !child.is_disabled())
            .map(OptionNode::state)
            .collect();
        if enabled.is_empty() {
            return node.state();
        }

        let state = CheckState::aggregate(enabled);
        self.set_state(id, state);
        state
    }

    fn reconcile_leaf_tag(&mut self, id: NodeId) {
        let Some(node) = self.tree.get(id) else {
            return;
        };
        if node.checked() {
            if !self.tags.contains(id) {
                self.tags.push(Tag {
                    node: id,
                    value: node.value().clone(),
                });
                trace!(node = %id, value = ?node.value(), "tag added");
            }
        } else if self.tags.remove_node(id).is_some() {
            trace!(node = %id, "tag removed");
        }
    }
}

//! A multiple-selection cascader bound to a reactive value.
//!
//! [`Cascader`] drives a [`SelectionEngine`] and mirrors its selection, as a
//! list of value paths, into a [`Binding`]. The rendering layer reads node
//! states and tags from the cascader and forwards toggle events to it.

use core::cell::{Ref, RefCell};
use core::fmt::Debug;
use std::rc::Rc;

use nami::{Binding, Signal, watcher::BoxWatcherGuard};
use tracing::{debug, warn};

use crate::{
    engine::SelectionEngine,
    error::CascaderError,
    tree::{NodeId, OptionData},
};

#[non_exhaustive]
#[derive(Debug)]
/// Configuration for the [`Cascader`] component.
pub struct CascaderConfig<V: 'static> {
    /// The option tree in source form.
    pub options: Vec<OptionData<V>>,
    /// Binding to the selected value paths, one root-to-leaf path per
    /// selected leaf.
    pub selection: Binding<Vec<Vec<V>>>,
}

impl<V: 'static> CascaderConfig<V> {
    /// Creates a configuration from options and a selection binding.
    pub fn new(
        options: impl IntoIterator<Item = OptionData<V>>,
        selection: &Binding<Vec<Vec<V>>>,
    ) -> Self {
        Self {
            options: options.into_iter().collect(),
            selection: selection.clone(),
        }
    }
}

/// A cascading multi-select control.
///
/// The selection binding is two-way: toggles are written into it, and a value
/// set on it from outside replaces the engine's selection. An outside value
/// that does not resolve to leaves is logged and ignored.
///
/// # Examples
///
/// ```ignore
/// let selection = binding(vec![vec![1, 10]]);
/// let mut cascader = Cascader::new(options, &selection)?;
///
/// // Clicking a checkbox in the second column
/// cascader.toggle_node(node, 1)?;
///
/// // Closing a chip
/// cascader.remove_tag(node)?;
/// ```
pub struct Cascader<V: 'static> {
    engine: Rc<RefCell<SelectionEngine<V>>>,
    selection: Binding<Vec<Vec<V>>>,
    _guard: BoxWatcherGuard,
}

impl<V: Debug + 'static> Debug for Cascader<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cascader")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl<V> Cascader<V>
where
    V: Clone + PartialEq + Debug + 'static,
{
    /// Creates a cascader whose initial selection is read from `selection`.
    ///
    /// # Errors
    ///
    /// Fails if a path in `selection` does not lead to a leaf option.
    pub fn new(
        options: impl IntoIterator<Item = OptionData<V>>,
        selection: &Binding<Vec<Vec<V>>>,
    ) -> Result<Self, CascaderError> {
        Self::from_config(CascaderConfig::new(options, selection))
    }

    /// Creates a cascader from a configuration.
    ///
    /// The binding is rewritten afterwards so it only holds paths that are
    /// actually selected, in tag order.
    ///
    /// # Errors
    ///
    /// Fails if a path in the configured selection does not lead to a leaf
    /// option.
    pub fn from_config(config: CascaderConfig<V>) -> Result<Self, CascaderError> {
        let mut engine = SelectionEngine::from_options(config.options);
        engine.initialize_many(config.selection.get())?;
        let engine = Rc::new(RefCell::new(engine));

        let guard = config.selection.watch({
            let engine = Rc::clone(&engine);
            move |context| {
                let value: Vec<Vec<V>> = context.into_value();
                let Ok(mut engine) = engine.try_borrow_mut() else {
                    warn!("selection changed while the cascader was busy; ignored");
                    return;
                };
                if engine.selected_values() == value {
                    return;
                }
                match engine.replace_selection(&value) {
                    Ok(()) => debug!(paths = value.len(), "selection replaced from binding"),
                    Err(error) => warn!(%error, "ignoring unresolvable selection from binding"),
                }
            }
        });

        let cascader = Self {
            engine,
            selection: config.selection,
            _guard: guard,
        };
        cascader.publish();
        Ok(cascader)
    }

    /// The underlying engine, for reading node states.
    ///
    /// # Panics
    ///
    /// If called from inside a watcher of the selection binding while the
    /// cascader is applying a change.
    #[must_use]
    pub fn engine(&self) -> Ref<'_, SelectionEngine<V>> {
        self.engine.borrow()
    }

    /// The bound selection.
    #[must_use]
    pub const fn selection(&self) -> &Binding<Vec<Vec<V>>> {
        &self.selection
    }

    /// Selected leaves with their labels, in selection order.
    #[must_use]
    pub fn tags(&self) -> Vec<(NodeId, String)> {
        let engine = self.engine.borrow();
        let tags = engine
            .tags()
            .iter()
            .filter_map(|tag| {
                engine
                    .node(tag.node)
                    .map(|node| (tag.node, node.label().to_owned()))
            })
            .collect();
        tags
    }

    /// Toggles `node` at its own depth.
    ///
    /// # Errors
    ///
    /// See [`SelectionEngine::toggle`].
    pub fn toggle(&mut self, node: NodeId) -> Result<(), CascaderError> {
        self.engine.borrow_mut().toggle(node)?;
        self.publish();
        Ok(())
    }

    /// Toggles `node` shown in column `level`.
    ///
    /// # Errors
    ///
    /// See [`SelectionEngine::toggle_node`].
    pub fn toggle_node(&mut self, node: NodeId, level: usize) -> Result<(), CascaderError> {
        self.engine.borrow_mut().toggle_node(node, level)?;
        self.publish();
        Ok(())
    }

    /// Deselects a leaf from its chip. Does nothing if it is not selected.
    ///
    /// # Errors
    ///
    /// [`CascaderError::UnknownNode`] if `node` is not in the tree.
    pub fn remove_tag(&mut self, node: NodeId) -> Result<(), CascaderError> {
        let selected = {
            let engine = self.engine.borrow();
            let option = engine.node(node).ok_or(CascaderError::UnknownNode(node))?;
            option.checked() && engine.tags().contains(node)
        };
        if selected {
            self.toggle(node)?;
        }
        Ok(())
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.engine.borrow_mut().clear();
        self.publish();
    }

    // The engine borrow must end before `set`, which runs the watcher.
    fn publish(&self) {
        let values = self.engine.borrow().selected_values();
        if self.selection.get() != values {
            self.selection.set(values);
        }
    }
}

#[cfg(test)]
mod tests {
    use nami::{Binding, Signal, binding};

    use super::*;
    use crate::state::CheckState;

    fn options() -> Vec<OptionData<u32>> {
        vec![
            OptionData::new(1)
                .label("Fruit")
                .child(OptionData::new(10).label("Apple"))
                .child(OptionData::new(11).label("Pear")),
            OptionData::new(2)
                .label("Vegetable")
                .child(OptionData::new(20).label("Leek")),
        ]
    }

    #[test]
    fn initial_selection_comes_from_binding() {
        let selection: Binding<Vec<Vec<u32>>> = binding(vec![vec![1_u32, 11]]);
        let cascader = Cascader::new(options(), &selection).unwrap();

        let fruit = cascader.engine().tree().roots()[0];
        assert_eq!(cascader.engine().state(fruit), CheckState::HalfChecked);
        let labels: Vec<String> = cascader.tags().into_iter().map(|(_, label)| label).collect();
        assert_eq!(labels, ["Pear"]);
    }

    #[test]
    fn toggles_are_written_back() {
        let selection: Binding<Vec<Vec<u32>>> = binding(Vec::<Vec<u32>>::new());
        let mut cascader = Cascader::new(options(), &selection).unwrap();

        let vegetable = cascader.engine().tree().roots()[1];
        cascader.toggle_node(vegetable, 0).unwrap();
        assert_eq!(selection.get(), vec![vec![2, 20]]);

        let fruit = cascader.engine().tree().roots()[0];
        cascader.toggle(fruit).unwrap();
        assert_eq!(selection.get(), vec![vec![2, 20], vec![1, 10], vec![1, 11]]);

        cascader.clear();
        assert!(selection.get().is_empty());
    }

    #[test]
    fn removing_a_tag_deselects_the_leaf() {
        let selection: Binding<Vec<Vec<u32>>> = binding(vec![vec![1_u32, 10], vec![1, 11]]);
        let mut cascader = Cascader::new(options(), &selection).unwrap();
        let fruit = cascader.engine().tree().roots()[0];
        let apple = cascader.engine().tree().children(fruit)[0];

        cascader.remove_tag(apple).unwrap();
        assert_eq!(selection.get(), vec![vec![1, 11]]);
        assert_eq!(cascader.engine().state(fruit), CheckState::HalfChecked);

        cascader.remove_tag(apple).unwrap();
        assert_eq!(selection.get(), vec![vec![1, 11]]);
    }

    #[test]
    fn invalid_initial_path_fails() {
        let selection: Binding<Vec<Vec<u32>>> = binding(vec![vec![1_u32, 99]]);
        let error = Cascader::new(options(), &selection).unwrap_err();
        assert_eq!(
            error,
            CascaderError::NodeNotFound {
                level: 1,
                value: "99".to_string(),
            }
        );
    }

    #[test]
    fn duplicate_initial_paths_are_normalized() {
        let selection: Binding<Vec<Vec<u32>>> = binding(vec![vec![2_u32, 20], vec![2, 20]]);
        let cascader = Cascader::from_config(CascaderConfig::new(options(), &selection)).unwrap();
        assert_eq!(cascader.engine().tags().len(), 1);
        assert_eq!(selection.get(), vec![vec![2, 20]]);
    }

    #[test]
    fn outside_writes_replace_the_selection() {
        let selection: Binding<Vec<Vec<u32>>> = binding(Vec::<Vec<u32>>::new());
        let mut cascader = Cascader::new(options(), &selection).unwrap();
        let fruit = cascader.engine().tree().roots()[0];
        let vegetable = cascader.engine().tree().roots()[1];

        selection.set(vec![vec![1_u32, 10]]);
        assert_eq!(cascader.engine().state(fruit), CheckState::HalfChecked);
        assert_eq!(cascader.engine().selected_values(), vec![vec![1, 10]]);

        cascader.toggle(vegetable).unwrap();
        assert_eq!(selection.get(), vec![vec![1, 10], vec![2, 20]]);

        selection.set(Vec::<Vec<u32>>::new());
        assert!(cascader.engine().tags().is_empty());
        assert!(cascader.engine().state(vegetable).is_clear());
    }

    #[test]
    fn unresolvable_outside_writes_keep_the_selection() {
        let selection: Binding<Vec<Vec<u32>>> = binding(vec![vec![2_u32, 20]]);
        let mut cascader = Cascader::new(options(), &selection).unwrap();
        let fruit = cascader.engine().tree().roots()[0];

        selection.set(vec![vec![1_u32, 10], vec![7, 70]]);
        assert_eq!(cascader.engine().selected_values(), vec![vec![2, 20]]);

        cascader.toggle(fruit).unwrap();
        assert_eq!(selection.get(), vec![vec![2, 20], vec![1, 10], vec![1, 11]]);
    }
}

//! Cascading multi-select for Arbor.
//!
//! Options form a tree. Each option is unchecked, half-checked or checked;
//! toggling an option pushes its new state down through the enabled part of
//! its subtree and then re-derives its ancestors from their children. The
//! selected leaves are kept, in selection order, in a [`TagList`] that the
//! rendering layer shows as chips.
//!
//! ```
//! use arbor_cascader::{CheckState, OptionData, SelectionEngine};
//!
//! let mut engine = SelectionEngine::from_options([OptionData::new('A')
//!     .child(
//!         OptionData::new('B')
//!             .child(OptionData::new('D'))
//!             .child(OptionData::new('E')),
//!     )
//!     .child(OptionData::new('C'))]);
//!
//! engine.initialize_from_values(&['A', 'B', 'D'])?;
//!
//! let a = engine.tree().roots()[0];
//! assert_eq!(engine.state(a), CheckState::HalfChecked);
//! assert_eq!(engine.selected_values(), vec![vec!['A', 'B', 'D']]);
//! # Ok::<(), arbor_cascader::CascaderError>(())
//! ```

pub mod cascader;
pub mod engine;
mod error;
pub mod state;
pub mod tags;
pub mod tree;

pub use cascader::{Cascader, CascaderConfig};
pub use engine::SelectionEngine;
pub use error::CascaderError;
pub use state::CheckState;
pub use tags::{Tag, TagList};
pub use tree::{NodeId, OptionData, OptionNode, OptionTree};

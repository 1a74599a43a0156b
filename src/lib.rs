#![doc = include_str!("../README.md")]
#![allow(clippy::multiple_crate_versions)]

pub mod logging;

#[doc(inline)]
pub use arbor_cascader as cascader;

pub mod prelude {
    //! A collection of commonly used types for easy importing.
    //!
    //! ```rust
    //! use arbor::prelude::*;
    //!
    //! let selection: Binding<Vec<Vec<u32>>> = binding(Vec::<Vec<u32>>::new());
    //! let cascader = Cascader::new([OptionData::new(1)], &selection)?;
    //! assert!(cascader.tags().is_empty());
    //! # Ok::<(), CascaderError>(())
    //! ```
    pub use arbor_cascader::{
        Cascader, CascaderConfig, CascaderError, CheckState, NodeId, OptionData, OptionNode,
        OptionTree, SelectionEngine, Tag, TagList,
    };
    pub use nami::{Binding, Signal, binding};
}

//! Navigation state: the folder [`tree::DirTree`] and the
//! [`inspector::Inspector`] that ties it to the preview pane.

pub mod inspector;
pub mod tree;

pub use inspector::{home_dir, Inspector};
pub use tree::{DirTree, TreeRow};

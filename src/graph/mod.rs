//! Traversierung des Gleisgraphen.
//!
//! - `walk`: Begrenzte, zyklenerkennende Folge ([`BoundedWalk`])
//! - `path_graph`: Nachfolger/Vorgänger über Modulgrenzen hinweg ([`PathGraph`])

pub mod path_graph;
pub mod walk;

pub use path_graph::PathGraph;
pub use walk::{BoundedWalk, WalkEnd};

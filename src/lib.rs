//! A height-balanced binary search tree whose nodes keep links to their parents.
//!
//! Nodes are stored in a typed arena and addressed by handles, so the parent links used to
//! walk back up after a structural change carry no ownership.

pub mod arena;
pub mod avl_tree;

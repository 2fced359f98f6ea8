//! Myers' O(ND) difference algorithm
//!
//! A clean-room implementation of Eugene Myers' greedy shortest edit script
//! algorithm (see "An O(ND) Difference Algorithm and Its Variations"):
//!
//! - `path_node`: tagged path nodes and the arena they live in
//! - `diff_algorithm`: the furthest-reaching search and patch reconstruction
//!
//! The engine compares two finite sequences under a caller-supplied
//! equivalence predicate and produces a minimal [`Patch`](crate::patch::patch::Patch).

pub mod diff_algorithm;
pub mod path_node;

//! Furthest-reaching path search and patch reconstruction

use crate::error::{DiffError, DiffResult};
use crate::myers::path_node::{PathArena, PathNode};
use crate::patch::chunk::Chunk;
use crate::patch::delta::Delta;
use crate::patch::patch::Patch;

/// Equivalence predicate over compared elements.
///
/// Reflexivity, symmetry and transitivity are the caller's responsibility;
/// the engine only ever asks whether two elements match.
pub type Equalizer<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Myers' O(ND) difference algorithm.
///
/// An instance is stateless apart from its equalizer and may be shared
/// across threads when the predicate is thread safe.
pub struct MyersDiff<T> {
    equalizer: Equalizer<T>,
}

impl<T: PartialEq> Default for MyersDiff<T> {
    fn default() -> Self {
        MyersDiff {
            equalizer: Box::new(|original, revised| original == revised),
        }
    }
}

impl<T> MyersDiff<T> {
    /// Engine comparing elements by structural equality.
    pub fn new() -> Self
    where
        T: PartialEq,
    {
        Self::default()
    }

    /// Engine comparing elements through a custom equivalence predicate.
    pub fn with_equalizer(equalizer: Equalizer<T>) -> Self {
        MyersDiff { equalizer }
    }

    /// Compute a minimal patch that rewrites `original` into `revised`.
    ///
    /// The total edit cost (inserted plus deleted elements) is the Myers
    /// shortest edit distance, and the emitted deltas carry ascending,
    /// non-overlapping original positions.
    pub fn diff(&self, original: &[T], revised: &[T]) -> DiffResult<Patch<T>>
    where
        T: Clone,
    {
        let (arena, head) = self.build_path(original, revised)?;
        Self::build_revision(&arena, head, original, revised)
    }

    /// Run the greedy furthest-reaching search over the edit graph.
    ///
    /// The `diagonal` buffer is the V-array of the paper, a linear buffer
    /// indexed by `middle + k`. Slots for `k - 1` are dropped as soon as a
    /// pass is done reading them so path prefixes can be freed eagerly.
    fn build_path(&self, orig: &[T], rev: &[T]) -> DiffResult<(PathArena, usize)> {
        let n = orig.len() as isize;
        let m = rev.len() as isize;

        let max = n + m + 1;
        let size = (1 + 2 * max) as usize;
        let middle = (size / 2) as isize;

        let mut arena = PathArena::default();
        let mut diagonal: Vec<Option<usize>> = vec![None; size];

        // Seed snake one diagonal up, so that the first pass starts the
        // k = -d branch at (0, 0).
        let seed = arena.push(PathNode::Snake {
            i: 0,
            j: -1,
            prev: None,
        });
        diagonal[(middle + 1) as usize] = Some(seed);

        for d in 0..max {
            for k in (-d..=d).step_by(2) {
                let kmiddle = (middle + k) as usize;
                let kplus = kmiddle + 1;
                let kminus = kmiddle - 1;

                let advance_by_insertion = k == -d
                    || (k != d
                        && Self::slot(&arena, &diagonal, kminus)?.i()
                            < Self::slot(&arena, &diagonal, kplus)?.i());

                let (mut i, prev_slot) = if advance_by_insertion {
                    (Self::slot(&arena, &diagonal, kplus)?.i(), diagonal[kplus])
                } else {
                    (
                        Self::slot(&arena, &diagonal, kminus)?.i() + 1,
                        diagonal[kminus],
                    )
                };

                diagonal[kminus] = None;

                let mut j = i - k;
                let anchor_i = i;

                // A diff node's predecessor collapses to the nearest snake
                // behind it, so consecutive edit steps share one anchor and
                // reconstruction emits them as a single delta.
                let prev = prev_slot.and_then(|slot| arena.previous_snake(slot));
                let diff_index = arena.push(PathNode::Diff { i, j, prev });

                while i < n && j < m && (self.equalizer)(&orig[i as usize], &rev[j as usize]) {
                    i += 1;
                    j += 1;
                }

                let node_index = if i > anchor_i {
                    arena.push(PathNode::Snake {
                        i,
                        j,
                        prev: Some(diff_index),
                    })
                } else {
                    diff_index
                };

                diagonal[kmiddle] = Some(node_index);

                if i >= n && j >= m {
                    return Ok((arena, node_index));
                }
            }
            diagonal[(middle + d - 1) as usize] = None;
        }

        // According to Myers, this cannot happen for finite inputs.
        Err(DiffError::DifferentiationFailed)
    }

    /// Walk the terminal path backwards and emit one delta per edit run.
    fn build_revision(
        arena: &PathArena,
        head: usize,
        orig: &[T],
        rev: &[T],
    ) -> DiffResult<Patch<T>>
    where
        T: Clone,
    {
        let mut deltas: Vec<Delta<T>> = Vec::new();

        let head_node = Self::node(arena, head)?;
        let mut path = if head_node.is_snake() {
            head_node.prev()
        } else {
            Some(head)
        };

        while let Some(index) = path {
            let node = Self::node(arena, index)?;
            let Some(prev_index) = node.prev() else {
                break;
            };
            let prev = Self::node(arena, prev_index)?;
            if prev.j() < 0 {
                break;
            }
            if node.is_snake() {
                return Err(DiffError::InvariantViolation(
                    "found snake when looking for diff",
                ));
            }

            let (i, j) = (node.i() as usize, node.j() as usize);
            let (ianchor, janchor) = (prev.i() as usize, prev.j() as usize);

            let original = Chunk::new(ianchor, orig[ianchor..i].to_vec());
            let revised = Chunk::new(janchor, rev[janchor..j].to_vec());
            deltas.push(Delta::from_chunks(original, revised));

            path = if prev.is_snake() {
                prev.prev()
            } else {
                Some(prev_index)
            };
        }

        // The walk runs back to front; restore ascending position order.
        deltas.reverse();

        let mut patch = Patch::new();
        for delta in deltas {
            patch.add_delta(delta);
        }
        Ok(patch)
    }

    fn slot<'a>(
        arena: &'a PathArena,
        diagonal: &[Option<usize>],
        at: usize,
    ) -> DiffResult<&'a PathNode> {
        diagonal[at]
            .and_then(|index| arena.get(index))
            .ok_or(DiffError::InvariantViolation(
                "missing furthest reaching node",
            ))
    }

    fn node(arena: &PathArena, index: usize) -> DiffResult<&PathNode> {
        arena
            .get(index)
            .ok_or(DiffError::InvariantViolation("dangling path node"))
    }
}

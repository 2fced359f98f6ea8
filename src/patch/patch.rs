//! An ordered edit script relating two sequences

use crate::error::{DiffError, DiffResult};
use crate::patch::chunk::Chunk;
use crate::patch::delta::Delta;

/// An ordered sequence of deltas describing how to turn an original
/// sequence into a revised one.
///
/// Producers append deltas in ascending order of their original chunk
/// positions; the patch performs no re-sorting of its own. Engine-produced
/// patches additionally guarantee that original chunks do not overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patch<T> {
    deltas: Vec<Delta<T>>,
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch { deltas: Vec::new() }
    }
}

impl<T> Patch<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a delta, preserving the caller-supplied order.
    pub fn add_delta(&mut self, delta: Delta<T>) {
        self.deltas.push(delta);
    }

    pub fn deltas(&self) -> &[Delta<T>] {
        &self.deltas
    }

    pub fn len(&self) -> usize {
        self.deltas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty()
    }
}

impl<T: Clone + PartialEq> Patch<T> {
    /// Apply the patch to `original`, replacing each original chunk range
    /// with its revised lines.
    ///
    /// Every chunk is verified against the document before being consumed,
    /// and deltas must be ordered and non-overlapping.
    pub fn apply_to(&self, original: &[T]) -> DiffResult<Vec<T>> {
        self.rewrite(original, |delta| (delta.original(), delta.revised()))
    }

    /// Apply the patch in reverse, turning a revised sequence back into the
    /// original one.
    pub fn restore(&self, revised: &[T]) -> DiffResult<Vec<T>> {
        self.rewrite(revised, |delta| (delta.revised(), delta.original()))
    }

    fn rewrite(
        &self,
        document: &[T],
        sides: impl Fn(&Delta<T>) -> (&Chunk<T>, &Chunk<T>),
    ) -> DiffResult<Vec<T>> {
        let mut result = Vec::with_capacity(document.len());
        let mut consumed = 0usize;

        for delta in &self.deltas {
            let (source, target) = sides(delta);
            if source.position() < consumed {
                return Err(DiffError::PatchFailed(format!(
                    "delta at position {} overlaps the previous delta",
                    source.position()
                )));
            }
            source.verify(document)?;

            result.extend_from_slice(&document[consumed..source.position()]);
            result.extend(target.lines().iter().cloned());
            consumed = source.position() + source.size();
        }
        result.extend_from_slice(&document[consumed..]);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patch::chunk::Chunk;
    use pretty_assertions::assert_eq;

    fn change(
        pos_a: usize,
        from: Vec<&'static str>,
        pos_b: usize,
        to: Vec<&'static str>,
    ) -> Delta<&'static str> {
        Delta::from_chunks(Chunk::new(pos_a, from), Chunk::new(pos_b, to))
    }

    #[test]
    fn empty_patch_is_an_identity() {
        let patch: Patch<&str> = Patch::new();

        let result = patch.apply_to(&["a", "b"]).unwrap();
        assert_eq!(result, vec!["a", "b"]);
    }

    #[test]
    fn apply_replaces_chunk_ranges() {
        let mut patch = Patch::new();
        patch.add_delta(change(1, vec!["b"], 1, vec!["x"]));
        patch.add_delta(change(3, vec!["d"], 3, vec![]));

        let result = patch.apply_to(&["a", "b", "c", "d"]).unwrap();
        assert_eq!(result, vec!["a", "x", "c"]);
    }

    #[test]
    fn restore_inverts_apply() {
        let mut patch = Patch::new();
        patch.add_delta(change(0, vec![], 0, vec!["new"]));
        patch.add_delta(change(1, vec!["old"], 2, vec![]));

        let original = ["keep", "old"];
        let revised = patch.apply_to(&original).unwrap();
        assert_eq!(revised, vec!["new", "keep"]);

        let restored = patch.restore(&revised).unwrap();
        assert_eq!(restored, original);
    }

    #[test]
    fn apply_rejects_mismatched_document() {
        let mut patch = Patch::new();
        patch.add_delta(change(0, vec!["was"], 0, vec!["now"]));

        let err = patch.apply_to(&["other"]).unwrap_err();
        assert!(matches!(err, DiffError::PatchFailed(_)));
    }

    #[test]
    fn apply_rejects_overlapping_deltas() {
        let mut patch = Patch::new();
        patch.add_delta(change(0, vec!["a", "b"], 0, vec!["x"]));
        patch.add_delta(change(1, vec!["b"], 1, vec!["y"]));

        let err = patch.apply_to(&["a", "b", "c"]).unwrap_err();
        assert!(matches!(err, DiffError::PatchFailed(_)));
    }
}

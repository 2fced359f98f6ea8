//! A contiguous run of elements taken from one side of a comparison

use crate::error::{DiffError, DiffResult};
use derive_new::new;

/// A contiguous run of elements with the index of its first element in the
/// sequence it was taken from.
///
/// For an empty chunk, `position` is the notional insertion point.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Chunk<T> {
    position: usize,
    lines: Vec<T>,
}

impl<T> Chunk<T> {
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn lines(&self) -> &[T] {
        &self.lines
    }

    pub fn size(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<T: PartialEq> Chunk<T> {
    /// Check that this chunk is still present, verbatim, at its recorded
    /// position in `target`. Application refuses to touch a document that
    /// fails this check.
    pub fn verify(&self, target: &[T]) -> DiffResult<()> {
        let end = self.position + self.size();
        if end > target.len() {
            return Err(DiffError::PatchFailed(format!(
                "chunk [{}, {}) is outside the target document of length {}",
                self.position,
                end,
                target.len()
            )));
        }
        if self.lines != target[self.position..end] {
            return Err(DiffError::PatchFailed(format!(
                "chunk content at position {} does not match the target document",
                self.position
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn chunk_reports_position_and_size() {
        let chunk = Chunk::new(3, vec!["a", "b"]);

        assert_eq!(chunk.position(), 3);
        assert_eq!(chunk.size(), 2);
        assert_eq!(chunk.lines(), &["a", "b"]);
        assert!(!chunk.is_empty());
    }

    #[test]
    fn empty_chunk_keeps_its_insertion_point() {
        let chunk: Chunk<&str> = Chunk::new(5, vec![]);

        assert_eq!(chunk.position(), 5);
        assert!(chunk.is_empty());
    }

    #[test]
    fn verify_accepts_matching_target() {
        let chunk = Chunk::new(1, vec!["b", "c"]);

        assert!(chunk.verify(&["a", "b", "c", "d"]).is_ok());
    }

    #[test]
    fn verify_rejects_out_of_bounds_chunk() {
        let chunk = Chunk::new(3, vec!["d", "e"]);

        let err = chunk.verify(&["a", "b", "c", "d"]).unwrap_err();
        assert!(matches!(err, DiffError::PatchFailed(_)));
    }

    #[test]
    fn verify_rejects_content_mismatch() {
        let chunk = Chunk::new(0, vec!["x"]);

        let err = chunk.verify(&["a"]).unwrap_err();
        assert!(matches!(err, DiffError::PatchFailed(_)));
    }
}

//! One structured edit aligning an original chunk to a revised chunk

use crate::patch::chunk::Chunk;

/// A localized edit pairing a chunk of the original sequence with a chunk
/// of the revised sequence.
///
/// The engine picks the variant from the two chunk sizes (see
/// [`Delta::from_chunks`]). The unified diff parser records every hunk as a
/// [`Delta::Change`] because a hunk body carries the paired line runs as
/// read; splitting it further would require re-running a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta<T> {
    /// Original chunk is empty, revised chunk carries the inserted lines.
    Insert {
        original: Chunk<T>,
        revised: Chunk<T>,
    },
    /// Original chunk carries the deleted lines, revised chunk is empty.
    Delete {
        original: Chunk<T>,
        revised: Chunk<T>,
    },
    /// Both chunks are non-empty.
    Change {
        original: Chunk<T>,
        revised: Chunk<T>,
    },
}

impl<T> Delta<T> {
    /// Build a delta whose variant is determined by the chunk sizes:
    /// empty original with a non-empty revised chunk is an insert, the
    /// converse is a delete, anything else is a change.
    pub fn from_chunks(original: Chunk<T>, revised: Chunk<T>) -> Self {
        if original.is_empty() && !revised.is_empty() {
            Delta::Insert { original, revised }
        } else if !original.is_empty() && revised.is_empty() {
            Delta::Delete { original, revised }
        } else {
            Delta::Change { original, revised }
        }
    }

    /// Build a `Change` delta regardless of the chunk sizes.
    ///
    /// This is the parser path: a hunk is recorded as read, even when one
    /// of its sides turns out to be empty.
    pub fn change(original: Chunk<T>, revised: Chunk<T>) -> Self {
        Delta::Change { original, revised }
    }

    pub fn original(&self) -> &Chunk<T> {
        match self {
            Delta::Insert { original, .. }
            | Delta::Delete { original, .. }
            | Delta::Change { original, .. } => original,
        }
    }

    pub fn revised(&self) -> &Chunk<T> {
        match self {
            Delta::Insert { revised, .. }
            | Delta::Delete { revised, .. }
            | Delta::Change { revised, .. } => revised,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(vec![], vec!["x"], true, false, false)]
    #[case(vec!["x"], vec![], false, true, false)]
    #[case(vec!["x"], vec!["y"], false, false, true)]
    #[case(vec![], vec![], false, false, true)]
    fn variant_is_determined_by_chunk_sizes(
        #[case] original: Vec<&str>,
        #[case] revised: Vec<&str>,
        #[case] insert: bool,
        #[case] delete: bool,
        #[case] change: bool,
    ) {
        let delta = Delta::from_chunks(Chunk::new(0, original), Chunk::new(0, revised));

        assert_eq!(matches!(delta, Delta::Insert { .. }), insert);
        assert_eq!(matches!(delta, Delta::Delete { .. }), delete);
        assert_eq!(matches!(delta, Delta::Change { .. }), change);
    }

    #[test]
    fn change_constructor_ignores_sizes() {
        let delta = Delta::change(Chunk::new(0, Vec::<&str>::new()), Chunk::new(0, vec!["x"]));

        assert!(matches!(delta, Delta::Change { .. }));
    }

    #[test]
    fn accessors_return_both_sides() {
        let delta = Delta::from_chunks(Chunk::new(1, vec!["b"]), Chunk::new(1, vec!["x"]));

        assert_eq!(delta.original(), &Chunk::new(1, vec!["b"]));
        assert_eq!(delta.revised(), &Chunk::new(1, vec!["x"]));
    }
}

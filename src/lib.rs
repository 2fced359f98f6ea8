//! Line-oriented differencing for ordered sequences
//!
//! Two independently usable halves share one patch model:
//!
//! - the [`myers`] engine computes a minimal edit script between two finite
//!   sequences under a caller-supplied equivalence predicate
//! - the [`unified`] reader and writer translate between the textual
//!   unified diff format and the same patch model
//!
//! ```
//! use riff::{MyersDiff, parse_unified_diff};
//!
//! let engine = MyersDiff::new();
//! let patch = engine.diff(&["a", "b", "c"], &["a", "x", "c"])?;
//! assert_eq!(patch.len(), 1);
//!
//! let diff = parse_unified_diff(
//!     "--- a/file\n+++ b/file\n@@ -1,1 +1,1 @@\n-b\n+x\n".as_bytes(),
//! )?;
//! assert_eq!(diff.files().len(), 1);
//! # Ok::<(), riff::DiffError>(())
//! ```

pub mod error;
pub mod myers;
pub mod patch;
pub mod unified;

pub use error::{DiffError, DiffResult};
pub use myers::diff_algorithm::{Equalizer, MyersDiff};
pub use patch::chunk::Chunk;
pub use patch::delta::Delta;
pub use patch::patch::Patch;
pub use unified::document::{UnifiedDiff, UnifiedDiffFile};
pub use unified::reader::{UnifiedDiffReader, parse_unified_diff};
pub use unified::writer::write_unified_diff;

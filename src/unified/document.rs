//! Parsed representation of a unified diff document

use crate::patch::patch::Patch;

/// Header metadata and patch for one file section of a unified diff.
///
/// Every field except the patch is optional because both the `diff --git`
/// form and the bare `---`/`+++` form are accepted, and timestamps are a
/// decoration some producers omit.
#[derive(Debug, Clone, Default)]
pub struct UnifiedDiffFile {
    pub(crate) diff_command: Option<String>,
    pub(crate) index: Option<String>,
    pub(crate) from_file: Option<String>,
    pub(crate) to_file: Option<String>,
    pub(crate) from_timestamp: Option<String>,
    pub(crate) to_timestamp: Option<String>,
    pub(crate) patch: Patch<String>,
}

impl UnifiedDiffFile {
    /// The raw `diff ...` line this section was opened by, if any.
    pub fn diff_command(&self) -> Option<&str> {
        self.diff_command.as_deref()
    }

    /// The `index` line with its `index ` prefix stripped, if present.
    pub fn index(&self) -> Option<&str> {
        self.index.as_deref()
    }

    pub fn from_file(&self) -> Option<&str> {
        self.from_file.as_deref()
    }

    pub fn to_file(&self) -> Option<&str> {
        self.to_file.as_deref()
    }

    pub fn from_timestamp(&self) -> Option<&str> {
        self.from_timestamp.as_deref()
    }

    pub fn to_timestamp(&self) -> Option<&str> {
        self.to_timestamp.as_deref()
    }

    pub fn patch(&self) -> &Patch<String> {
        &self.patch
    }

    pub fn set_diff_command(&mut self, diff_command: impl Into<String>) {
        self.diff_command = Some(diff_command.into());
    }

    pub fn set_index(&mut self, index: impl Into<String>) {
        self.index = Some(index.into());
    }

    pub fn set_from_file(&mut self, from_file: impl Into<String>) {
        self.from_file = Some(from_file.into());
    }

    pub fn set_to_file(&mut self, to_file: impl Into<String>) {
        self.to_file = Some(to_file.into());
    }

    pub fn set_from_timestamp(&mut self, from_timestamp: impl Into<String>) {
        self.from_timestamp = Some(from_timestamp.into());
    }

    pub fn set_to_timestamp(&mut self, to_timestamp: impl Into<String>) {
        self.to_timestamp = Some(to_timestamp.into());
    }

    pub fn patch_mut(&mut self) -> &mut Patch<String> {
        &mut self.patch
    }
}

/// A fully parsed unified diff: free-text preamble, file sections, and
/// free-text trailer.
#[derive(Debug, Clone, Default)]
pub struct UnifiedDiff {
    pub(crate) header: Option<String>,
    pub(crate) files: Vec<UnifiedDiffFile>,
    pub(crate) tail: Option<String>,
}

impl UnifiedDiff {
    /// Free text found before the first recognized header line.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn files(&self) -> &[UnifiedDiffFile] {
        &self.files
    }

    /// Free text found after the terminating `--` line.
    pub fn tail(&self) -> Option<&str> {
        self.tail.as_deref()
    }

    pub fn set_header(&mut self, header: impl Into<String>) {
        self.header = Some(header.into());
    }

    pub fn set_tail(&mut self, tail: impl Into<String>) {
        self.tail = Some(tail.into());
    }

    pub fn add_file(&mut self, file: UnifiedDiffFile) {
        self.files.push(file);
    }
}

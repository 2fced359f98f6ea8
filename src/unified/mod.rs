//! Unified diff reading and writing
//!
//! This module handles the textual unified diff format:
//!
//! - `document`: the parsed multi-file document and its per-file headers
//! - `reader`: a line-oriented state machine turning text into a document
//! - `writer`: the canonical formatter turning a document back into text
//!
//! ## Accepted input
//!
//! Both the `diff --git` form and the bare `---`/`+++` form are accepted,
//! with optional free text before the first header line and after the last
//! hunk. Timestamps decorating `---`/`+++` lines are captured separately
//! from the filenames.

pub mod document;
pub mod reader;
pub mod writer;

/// Pattern for the `diff ...` command line opening a file section
pub const DIFF_COMMAND_REGEX: &str = r"^diff\s";

/// Pattern for the `index <hash>..<hash>[ <mode>]` header line
pub const INDEX_REGEX: &str = r"^index\s[0-9a-zA-Z]+\.\.[0-9a-zA-Z]+(\s(\d+))?$";

/// Pattern for the `--- <path>` header line
pub const FROM_FILE_REGEX: &str = r"^---\s";

/// Pattern for the `+++ <path>` header line
pub const TO_FILE_REGEX: &str = r"^\+\+\+\s";

/// Pattern for the `@@ -l,s +l,s @@` hunk header; sizes are optional
pub const UNIFIED_DIFF_CHUNK_REGEX: &str =
    r"^@@\s+-(?:(\d+)(?:,(\d+))?)\s+\+(?:(\d+)(?:,(\d+))?)\s+@@";

/// Pattern for a context line inside a hunk body
pub const LINE_NORMAL_REGEX: &str = r"^\s";

/// Pattern for an added line inside a hunk body
pub const LINE_ADD_REGEX: &str = r"^\+";

/// Pattern for a removed line inside a hunk body
pub const LINE_DEL_REGEX: &str = r"^-";

/// Pattern for the ISO-like timestamp decorating `---`/`+++` lines
pub const TIMESTAMP_REGEX: &str = r"(\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}\.\d{3,})";

//! Canonical textual rendering of a unified diff document

use crate::error::DiffResult;
use crate::patch::delta::Delta;
use crate::unified::document::{UnifiedDiff, UnifiedDiffFile};
use std::io::Write;

/// Render a document back to its unified diff form.
///
/// Each delta becomes one hunk: the header carries the one-based positions
/// and sizes of both chunks, followed by the original lines as removals and
/// the revised lines as additions. Re-parsing the output preserves file
/// count, filenames, hunk starts, sizes, and line contents.
pub fn write_unified_diff<W: Write>(writer: &mut W, diff: &UnifiedDiff) -> DiffResult<()> {
    if let Some(header) = diff.header() {
        write!(writer, "{header}")?;
    }

    for file in diff.files() {
        write_file(writer, file)?;
    }

    if let Some(tail) = diff.tail() {
        writeln!(writer, "--")?;
        write!(writer, "{tail}")?;
    }

    Ok(())
}

fn write_file<W: Write>(writer: &mut W, file: &UnifiedDiffFile) -> DiffResult<()> {
    if let Some(diff_command) = file.diff_command() {
        writeln!(writer, "{diff_command}")?;
    }
    if let Some(index) = file.index() {
        writeln!(writer, "index {index}")?;
    }
    if let Some(from_file) = file.from_file() {
        write_file_line(writer, "---", from_file, file.from_timestamp())?;
    }
    if let Some(to_file) = file.to_file() {
        write_file_line(writer, "+++", to_file, file.to_timestamp())?;
    }

    for delta in file.patch().deltas() {
        write_hunk(writer, delta)?;
    }

    Ok(())
}

fn write_file_line<W: Write>(
    writer: &mut W,
    prefix: &str,
    file_name: &str,
    timestamp: Option<&str>,
) -> DiffResult<()> {
    match timestamp {
        Some(timestamp) => writeln!(writer, "{prefix} {file_name}\t{timestamp}")?,
        None => writeln!(writer, "{prefix} {file_name}")?,
    }
    Ok(())
}

fn write_hunk<W: Write>(writer: &mut W, delta: &Delta<String>) -> DiffResult<()> {
    let original = delta.original();
    let revised = delta.revised();

    writeln!(
        writer,
        "@@ -{},{} +{},{} @@",
        original.position() + 1,
        original.size(),
        revised.position() + 1,
        revised.size()
    )?;
    for line in original.lines() {
        writeln!(writer, "-{line}")?;
    }
    for line in revised.lines() {
        writeln!(writer, "+{line}")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unified::reader::parse_unified_diff;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_hunks_with_one_based_positions() {
        let input = "\
--- a/greeting.txt
+++ b/greeting.txt
@@ -1,1 +1,1 @@
-hello
+goodbye
";
        let diff = parse_unified_diff(input.as_bytes()).unwrap();

        let mut rendered = Vec::new();
        write_unified_diff(&mut rendered, &diff).unwrap();

        let rendered = String::from_utf8(rendered).unwrap();
        assert_eq!(
            rendered,
            "--- greeting.txt\n+++ greeting.txt\n@@ -1,1 +1,1 @@\n-hello\n+goodbye\n"
        );
    }

    #[test]
    fn renders_timestamps_tab_separated() {
        let input = "\
--- a/notes.txt\t2019-04-18 13:49:39.516149751 +0200
+++ b/notes.txt\t2019-04-18 13:49:40.516149751 +0200
@@ -1,1 +1,1 @@
-old
+new
";
        let diff = parse_unified_diff(input.as_bytes()).unwrap();

        let mut rendered = Vec::new();
        write_unified_diff(&mut rendered, &diff).unwrap();

        let rendered = String::from_utf8(rendered).unwrap();
        assert!(rendered.starts_with("--- notes.txt\t2019-04-18 13:49:39.516149751\n"));
        assert!(rendered.contains("+++ notes.txt\t2019-04-18 13:49:40.516149751\n"));
    }
}

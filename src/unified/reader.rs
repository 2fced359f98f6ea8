//! Line-oriented state machine reading a unified diff into a document

use crate::error::{DiffError, DiffResult};
use crate::patch::chunk::Chunk;
use crate::patch::delta::Delta;
use crate::unified::document::{UnifiedDiff, UnifiedDiffFile};
use crate::unified::{
    DIFF_COMMAND_REGEX, FROM_FILE_REGEX, INDEX_REGEX, LINE_ADD_REGEX, LINE_DEL_REGEX,
    LINE_NORMAL_REGEX, TIMESTAMP_REGEX, TO_FILE_REGEX, UNIFIED_DIFF_CHUNK_REGEX,
};
use derive_new::new;
use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::io::{BufRead, BufReader, Read};

/// Parse a unified diff from a character stream.
///
/// The stream is borrowed for the duration of the call; the parser neither
/// opens nor closes it.
pub fn parse_unified_diff<R: Read>(stream: R) -> DiffResult<UnifiedDiff> {
    UnifiedDiffReader::new(BufReader::new(stream)).parse()
}

/// The recognized line kinds, in dispatch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RuleKind {
    DiffCommand,
    Index,
    FromFile,
    ToFile,
    Chunk,
    LineNormal,
    LineAdd,
    LineDel,
}

/// One recognizer of the dispatch table: a pattern, the handler it selects,
/// and whether matching it ends preamble accumulation.
#[derive(new)]
struct LineRule {
    kind: RuleKind,
    pattern: Regex,
    stops_header_parsing: bool,
}

lazy_static! {
    static ref LINE_RULES: [LineRule; 8] = [
        LineRule::new(
            RuleKind::DiffCommand,
            Regex::new(DIFF_COMMAND_REGEX).unwrap(),
            true
        ),
        LineRule::new(RuleKind::Index, Regex::new(INDEX_REGEX).unwrap(), true),
        LineRule::new(
            RuleKind::FromFile,
            Regex::new(FROM_FILE_REGEX).unwrap(),
            true
        ),
        LineRule::new(RuleKind::ToFile, Regex::new(TO_FILE_REGEX).unwrap(), true),
        LineRule::new(
            RuleKind::Chunk,
            Regex::new(UNIFIED_DIFF_CHUNK_REGEX).unwrap(),
            false
        ),
        LineRule::new(
            RuleKind::LineNormal,
            Regex::new(LINE_NORMAL_REGEX).unwrap(),
            false
        ),
        LineRule::new(
            RuleKind::LineAdd,
            Regex::new(LINE_ADD_REGEX).unwrap(),
            false
        ),
        LineRule::new(
            RuleKind::LineDel,
            Regex::new(LINE_DEL_REGEX).unwrap(),
            false
        ),
    ];
    static ref TIMESTAMP_RE: Regex = Regex::new(TIMESTAMP_REGEX).unwrap();
    static ref FILE_NAME_PREFIX_RE: Regex = Regex::new(r"^(a|b|old|new)(/)?").unwrap();
}

const HEADER_RULES: [RuleKind; 4] = [
    RuleKind::DiffCommand,
    RuleKind::Index,
    RuleKind::FromFile,
    RuleKind::ToFile,
];

const BODY_RULES: [RuleKind; 3] = [RuleKind::LineNormal, RuleKind::LineAdd, RuleKind::LineDel];

fn rule(kind: RuleKind) -> &'static LineRule {
    &LINE_RULES[kind as usize]
}

fn stops_header_parsing(line: &str) -> bool {
    LINE_RULES
        .iter()
        .any(|rule| rule.stops_header_parsing && rule.pattern.is_match(line))
}

/// One-shot unified diff parser, consumed by [`UnifiedDiffReader::parse`].
///
/// The running hunk counters and the original/revised accumulators are
/// parser state; a reader instance is not reentrant.
pub struct UnifiedDiffReader<R: BufRead> {
    lines: LineReader<R>,
    data: UnifiedDiff,
    original_txt: Vec<String>,
    revised_txt: Vec<String>,
    old_ln: usize,
    old_size: usize,
    new_ln: usize,
    new_size: usize,
}

impl<R: BufRead> UnifiedDiffReader<R> {
    pub fn new(reader: R) -> Self {
        UnifiedDiffReader {
            lines: LineReader::new(reader),
            data: UnifiedDiff::default(),
            original_txt: Vec::new(),
            revised_txt: Vec::new(),
            old_ln: 0,
            old_size: 0,
            new_ln: 0,
            new_size: 0,
        }
    }

    /// Run the state machine to completion and hand back the document.
    pub fn parse(mut self) -> DiffResult<UnifiedDiff> {
        log::debug!("parsing unified diff header");

        let mut header_txt = String::new();
        let mut line: Option<String> = None;
        while self.lines.ready()? {
            line = self.lines.read_line()?;
            if let Some(current) = &line {
                log::trace!("parsing line {current:?}");
                if stops_header_parsing(current) {
                    break;
                }
                header_txt.push_str(current);
                header_txt.push('\n');
            }
        }
        if !header_txt.is_empty() {
            self.data.header = Some(header_txt);
        }

        while let Some(mut current) = line {
            if !rule(RuleKind::Chunk).pattern.is_match(&current) {
                self.init_file_if_necessary()?;
                while !rule(RuleKind::Chunk).pattern.is_match(&current) {
                    if !self.process_line(&current, &HEADER_RULES)? {
                        return Err(DiffError::parse(
                            "expected file start line not found",
                            current,
                        ));
                    }
                    current = self.lines.read_line()?.ok_or_else(|| {
                        DiffError::parse("unexpected end of input in file header", "")
                    })?;
                }
            }

            self.process_line(&current, &[RuleKind::Chunk])?;

            while let Some(body) = self.lines.read_line()? {
                if !self.process_line(&body, &BODY_RULES)? {
                    return Err(DiffError::parse("expected data line not found", body));
                }
                if (self.original_txt.len() == self.old_size
                    && self.revised_txt.len() == self.new_size)
                    || (self.old_size == 0
                        && self.new_size == 0
                        && self.original_txt.len() == self.old_ln
                        && self.revised_txt.len() == self.new_ln)
                {
                    self.finalize_chunk()?;
                    break;
                }
            }

            line = self.lines.read_line()?;
            if let Some(next) = &line
                && next.starts_with("--")
            {
                break;
            }
        }

        if self.lines.ready()? {
            let mut tail_txt = String::new();
            while self.lines.ready()? {
                if let Some(rest) = self.lines.read_line()? {
                    tail_txt.push_str(&rest);
                    tail_txt.push('\n');
                }
            }
            self.data.tail = Some(tail_txt);
        }

        log::debug!("parsed {} file section(s)", self.data.files.len());
        Ok(self.data)
    }

    /// Try the given rule subset against `line`, first match wins. Returns
    /// whether any rule fired.
    fn process_line(&mut self, line: &str, kinds: &[RuleKind]) -> DiffResult<bool> {
        for &kind in kinds {
            if !rule(kind).pattern.is_match(line) {
                continue;
            }
            log::trace!("line {line:?} matched rule {kind:?}");
            match kind {
                RuleKind::DiffCommand => self.process_diff(line)?,
                RuleKind::Index => self.process_index(line)?,
                RuleKind::FromFile => self.process_from_file(line)?,
                RuleKind::ToFile => self.process_to_file(line)?,
                RuleKind::Chunk => self.process_chunk(line)?,
                RuleKind::LineNormal => self.process_normal_line(line),
                RuleKind::LineAdd => self.process_add_line(line),
                RuleKind::LineDel => self.process_del_line(line),
            }
            return Ok(true);
        }
        log::trace!("no rule matched {line:?}");
        Ok(false)
    }

    /// Open a new file section before header lines are dispatched into it.
    fn init_file_if_necessary(&mut self) -> DiffResult<()> {
        if !self.original_txt.is_empty() || !self.revised_txt.is_empty() {
            return Err(DiffError::InvariantViolation(
                "unterminated chunk before new file section",
            ));
        }
        self.data.files.push(UnifiedDiffFile::default());
        Ok(())
    }

    fn actual_file_mut(&mut self) -> DiffResult<&mut UnifiedDiffFile> {
        self.data
            .files
            .last_mut()
            .ok_or(DiffError::InvariantViolation("no active file section"))
    }

    /// Handle the `diff ...` command line. Both filenames come from the
    /// command line itself; later `---`/`+++` lines overwrite them.
    fn process_diff(&mut self, line: &str) -> DiffResult<()> {
        log::debug!("file section start {line:?}");
        let (from_file, to_file) = parse_file_names(line)?;
        let file = self.actual_file_mut()?;
        file.from_file = Some(from_file);
        file.to_file = Some(to_file);
        file.diff_command = Some(line.to_string());
        Ok(())
    }

    fn process_index(&mut self, line: &str) -> DiffResult<()> {
        log::debug!("index {line:?}");
        self.actual_file_mut()?.index = Some(line.chars().skip("index ".len()).collect());
        Ok(())
    }

    fn process_from_file(&mut self, line: &str) -> DiffResult<()> {
        let file_name = extract_file_name(line);
        let timestamp = extract_timestamp(line);
        let file = self.actual_file_mut()?;
        file.from_file = Some(file_name);
        file.from_timestamp = timestamp;
        Ok(())
    }

    fn process_to_file(&mut self, line: &str) -> DiffResult<()> {
        let file_name = extract_file_name(line);
        let timestamp = extract_timestamp(line);
        let file = self.actual_file_mut()?;
        file.to_file = Some(file_name);
        file.to_timestamp = timestamp;
        Ok(())
    }

    fn process_chunk(&mut self, line: &str) -> DiffResult<()> {
        let captures = rule(RuleKind::Chunk)
            .pattern
            .captures(line)
            .ok_or_else(|| DiffError::parse("malformed chunk header", line))?;

        self.old_ln = capture_number(&captures, 1, 1, line)?;
        self.old_size = capture_number(&captures, 2, 0, line)?;
        self.new_ln = capture_number(&captures, 3, 1, line)?;
        self.new_size = capture_number(&captures, 4, 0, line)?;
        if self.old_ln == 0 {
            self.old_ln = 1;
        }
        if self.new_ln == 0 {
            self.new_ln = 1;
        }
        self.original_txt.clear();
        self.revised_txt.clear();
        Ok(())
    }

    fn process_normal_line(&mut self, line: &str) {
        let content = strip_first_char(line);
        self.original_txt.push(content.to_string());
        self.revised_txt.push(content.to_string());
    }

    fn process_add_line(&mut self, line: &str) {
        self.revised_txt.push(strip_first_char(line).to_string());
    }

    fn process_del_line(&mut self, line: &str) {
        self.original_txt.push(strip_first_char(line).to_string());
    }

    /// Emit the accumulated hunk as one `Change` delta. Hunk positions are
    /// one-based in the textual form and zero-based in the patch model.
    fn finalize_chunk(&mut self) -> DiffResult<()> {
        if !self.original_txt.is_empty() || !self.revised_txt.is_empty() {
            let original = Chunk::new(self.old_ln - 1, std::mem::take(&mut self.original_txt));
            let revised = Chunk::new(self.new_ln - 1, std::mem::take(&mut self.revised_txt));
            self.actual_file_mut()?
                .patch
                .add_delta(Delta::change(original, revised));
            self.old_ln = 0;
            self.new_ln = 0;
        }
        Ok(())
    }
}

/// Split the `diff --git a/<path> b/<path>` line on single spaces and take
/// tokens 2 and 3, stripped of their `a/` and `b/` prefixes. Paths that
/// contain spaces break this tokenization; that limitation is inherited
/// from the format itself.
pub(crate) fn parse_file_names(line: &str) -> DiffResult<(String, String)> {
    let split: Vec<&str> = line.split(' ').collect();
    let from_file = split
        .get(2)
        .ok_or_else(|| DiffError::parse("diff command line carries no file names", line))?;
    let to_file = split
        .get(3)
        .ok_or_else(|| DiffError::parse("diff command line carries no file names", line))?;

    Ok((
        from_file.strip_prefix("a/").unwrap_or(from_file).to_string(),
        to_file.strip_prefix("b/").unwrap_or(to_file).to_string(),
    ))
}

/// Extract the filename from a `---`/`+++` line: truncate before any
/// timestamp, drop the four-character prefix, strip a leading `a/`, `b/`,
/// `old/` or `new/`, and trim.
pub(crate) fn extract_file_name(line: &str) -> String {
    let truncated = match TIMESTAMP_RE.find(line) {
        Some(found) => &line[..found.start()],
        None => line,
    };
    let payload: String = truncated.chars().skip(4).collect();
    FILE_NAME_PREFIX_RE.replace(&payload, "").trim().to_string()
}

pub(crate) fn extract_timestamp(line: &str) -> Option<String> {
    TIMESTAMP_RE.find(line).map(|found| found.as_str().to_string())
}

fn capture_number(
    captures: &Captures,
    group: usize,
    default: usize,
    line: &str,
) -> DiffResult<usize> {
    match captures.get(group) {
        Some(found) => found
            .as_str()
            .parse()
            .map_err(|_| DiffError::parse("invalid number in chunk header", line)),
        None => Ok(default),
    }
}

fn strip_first_char(line: &str) -> &str {
    let mut chars = line.chars();
    chars.next();
    chars.as_str()
}

/// Buffered line source with one line of lookahead, so the parser can ask
/// whether input remains without consuming it.
struct LineReader<R: BufRead> {
    lines: std::io::Lines<R>,
    peeked: Option<Option<String>>,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        LineReader {
            lines: reader.lines(),
            peeked: None,
        }
    }

    fn ready(&mut self) -> DiffResult<bool> {
        if self.peeked.is_none() {
            self.peeked = Some(self.fetch()?);
        }
        Ok(matches!(self.peeked, Some(Some(_))))
    }

    fn read_line(&mut self) -> DiffResult<Option<String>> {
        match self.peeked.take() {
            Some(line) => Ok(line),
            None => self.fetch(),
        }
    }

    fn fetch(&mut self) -> DiffResult<Option<String>> {
        match self.lines.next() {
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(error)) => Err(error.into()),
            None => Ok(None),
        }
    }
}

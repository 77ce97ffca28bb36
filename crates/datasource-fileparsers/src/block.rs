//! Source for multi-line, tag-prefixed record blocks.
//!
//! Used by EMBL-style flat files such as TRANSFAC `matrix.dat`:
//!
//! ```text
//! AC  M00001
//! XX
//! ID  V$MYOD_01
//! XX
//! BF  T00526; MyoD; Species: mouse, Mus musculus.
//! //
//! ```
//!
//! Each line starts with a two-character tag. `XX` lines are separators and
//! `//` terminates a block.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::Path;

use crate::parser::{open_file, RecordReader, RecordSource};
use crate::types::{ParseError, ParseResult, ParseStats, ParserConfig};

const SEPARATOR_TAG: &str = "XX";
const TERMINATOR: &str = "//";

/// Trait for record types parsed from one tagged block.
pub trait BlockRecord: Sized {
    /// Tag whose presence marks a block as a record. Blocks without it
    /// (file headers) are skipped.
    const KEY_TAG: &'static str;

    /// Parses a record from a block.
    fn from_block(block: &Block) -> ParseResult<Self>;

    /// Returns true if this record passes the given filter config.
    fn passes_filter(&self, _config: &ParserConfig) -> bool {
        true
    }
}

/// One tagged line of a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLine {
    /// Two-character tag.
    pub tag: String,
    /// Value after the tag, trimmed.
    pub value: String,
    /// 1-based line number.
    pub line: u64,
}

/// The tagged lines between two `//` terminators.
#[derive(Debug, Clone, Default)]
pub struct Block {
    lines: Vec<BlockLine>,
}

impl Block {
    /// Line number of the first tagged line.
    pub fn start_line(&self) -> u64 {
        self.lines.first().map_or(0, |l| l.line)
    }

    /// Returns true if the block has no tagged lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns true if any line carries `tag`.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.lines.iter().any(|l| l.tag == tag)
    }

    /// All lines carrying `tag`, in file order.
    pub fn lines_with<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a BlockLine> + 'a {
        self.lines.iter().filter(move |l| l.tag == tag)
    }

    /// First line carrying `tag`.
    pub fn first(&self, tag: &str) -> Option<&BlockLine> {
        self.lines.iter().find(|l| l.tag == tag)
    }

    /// Values of all lines carrying `tag` joined with a space, for fields that
    /// wrap over several lines.
    pub fn joined(&self, tag: &str) -> Option<String> {
        let values: Vec<&str> = self.lines_with(tag).map(|l| l.value.as_str()).collect();
        if values.is_empty() {
            None
        } else {
            Some(values.join(" "))
        }
    }

    /// Builds a `MalformedBlock` error for this block.
    pub fn malformed(&self, reason: impl Into<String>) -> ParseError {
        ParseError::MalformedBlock {
            line: self.start_line(),
            reason: reason.into(),
        }
    }
}

/// Source yielding one record per tagged block.
pub struct BlockSource<R: BufRead, T: BlockRecord> {
    reader: R,
    config: ParserConfig,
    line_number: u64,
    buffer: String,
    stats: ParseStats,
    _marker: PhantomData<T>,
}

impl<T: BlockRecord> BlockSource<BufReader<File>, T> {
    /// Opens a block file.
    pub fn from_path<P: AsRef<Path>>(path: P, config: ParserConfig) -> ParseResult<Self> {
        Ok(Self::from_reader(open_file(path)?, config))
    }
}

impl<R: BufRead, T: BlockRecord> BlockSource<R, T> {
    /// Creates a source over any buffered reader.
    pub fn from_reader(reader: R, config: ParserConfig) -> Self {
        Self {
            reader,
            config,
            line_number: 0,
            buffer: String::new(),
            stats: ParseStats::default(),
            _marker: PhantomData,
        }
    }

    /// Reads lines up to the next terminator. Returns `None` at end of input
    /// when nothing was read.
    fn read_block(&mut self) -> ParseResult<Option<Block>> {
        let mut block = Block::default();

        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                if block.is_empty() {
                    return Ok(None);
                }
                if block.has_tag(T::KEY_TAG) {
                    return Err(block.malformed("block is not terminated by '//'"));
                }
                // Trailing header lines without a record
                return Ok(None);
            }
            self.line_number += 1;

            let line = self.buffer.trim_end_matches(['\n', '\r']);
            if !self.config.encoding.permits(line) {
                return Err(ParseError::Encoding {
                    line: self.line_number,
                });
            }
            if line.trim().is_empty() {
                continue;
            }
            if line.starts_with(TERMINATOR) {
                return Ok(Some(block));
            }

            let (tag, value) = split_tag(line).ok_or_else(|| ParseError::MalformedBlock {
                line: self.line_number,
                reason: format!("expected a two-character tag, found '{line}'"),
            })?;
            if tag == SEPARATOR_TAG {
                continue;
            }
            block.lines.push(BlockLine {
                tag: tag.to_string(),
                value: value.to_string(),
                line: self.line_number,
            });
        }
    }
}

impl<R: BufRead, T: BlockRecord> RecordSource for BlockSource<R, T> {
    type Record = T;

    fn read_record(&mut self) -> ParseResult<Option<T>> {
        while let Some(block) = self.read_block()? {
            if !block.has_tag(T::KEY_TAG) {
                continue;
            }
            let parsed = T::from_block(&block)?;
            self.stats.total_records += 1;
            if parsed.passes_filter(&self.config) {
                self.stats.filtered_records += 1;
                return Ok(Some(parsed));
            }
            self.stats.skipped_records += 1;
        }
        Ok(None)
    }

    fn stats(&self) -> ParseStats {
        self.stats
    }
}

/// Splits `AC  M00001` into (`AC`, `M00001`).
fn split_tag(line: &str) -> Option<(&str, &str)> {
    if line.len() < 2 || !line.is_char_boundary(2) {
        return None;
    }
    let (tag, rest) = line.split_at(2);
    if !tag.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return None;
    }
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((tag, rest.trim()))
}

/// Reader over a block file.
pub type BlockReader<T> = RecordReader<BlockSource<BufReader<File>, T>>;

impl<T: BlockRecord> BlockReader<T> {
    /// Opens a block datasource file.
    pub fn open<P: AsRef<Path>>(path: P, config: ParserConfig) -> ParseResult<Self> {
        BlockSource::from_path(path, config).map(RecordReader::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ReaderState;

    #[derive(Debug)]
    struct Entry {
        accession: String,
        names: Vec<String>,
    }

    impl BlockRecord for Entry {
        const KEY_TAG: &'static str = "AC";

        fn from_block(block: &Block) -> ParseResult<Self> {
            let accession = block
                .first("AC")
                .map(|l| l.value.clone())
                .ok_or_else(|| block.malformed("missing AC"))?;
            Ok(Entry {
                accession,
                names: block.lines_with("NA").map(|l| l.value.clone()).collect(),
            })
        }
    }

    fn reader(input: &str) -> RecordReader<BlockSource<&[u8], Entry>> {
        RecordReader::new(BlockSource::from_reader(
            input.as_bytes(),
            ParserConfig::default(),
        ))
    }

    #[test]
    fn test_split_tag() {
        assert_eq!(split_tag("AC  M00001"), Some(("AC", "M00001")));
        assert_eq!(split_tag("XX"), Some(("XX", "")));
        assert_eq!(split_tag("ACM00001"), None);
        assert_eq!(split_tag("A"), None);
    }

    #[test]
    fn test_skips_header_block() {
        let input = "VV  RELEASE 1\nXX\n//\nAC  E1\nXX\nNA  one\nNA  two\n//\nAC  E2\n//\n";
        let mut reader = reader(input);

        let first = reader.next_record().unwrap();
        assert_eq!(first.accession, "E1");
        assert_eq!(first.names, vec!["one", "two"]);

        let second = reader.next_record().unwrap();
        assert_eq!(second.accession, "E2");
        assert!(second.names.is_empty());

        assert!(!reader.has_next());
        assert_eq!(reader.state(), ReaderState::Exhausted);
        assert_eq!(reader.stats().total_records, 2);
    }

    #[test]
    fn test_unterminated_block_is_malformed() {
        let mut reader = reader("AC  E1\nNA  one\n");
        assert!(matches!(
            reader.next_record(),
            Err(ParseError::MalformedBlock { line: 1, .. })
        ));
        assert_eq!(reader.state(), ReaderState::Failed);
    }

    #[test]
    fn test_untagged_line_is_malformed() {
        let mut reader = reader("AC  E1\nthis is not tagged\n//\n");
        assert!(matches!(
            reader.next_record(),
            Err(ParseError::MalformedBlock { line: 2, .. })
        ));
    }

    #[test]
    fn test_joined_values() {
        let block = Block {
            lines: vec![
                BlockLine { tag: "DE".into(), value: "first".into(), line: 1 },
                BlockLine { tag: "DE".into(), value: "second".into(), line: 2 },
            ],
        };
        assert_eq!(block.joined("DE").as_deref(), Some("first second"));
        assert_eq!(block.joined("BF"), None);
    }
}

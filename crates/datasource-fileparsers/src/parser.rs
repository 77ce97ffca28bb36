//! Generic record reader.
//!
//! A [`RecordReader`] wraps a [`RecordSource`] and exposes it through an
//! explicit `has_next` / `next_record` state machine. [`DelimitedSource`]
//! is the source for one-record-per-line column files.

use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::marker::PhantomData;
use std::path::Path;
use std::str::FromStr;

use csv::{Reader, ReaderBuilder, StringRecord};
use datasource_identifiers::IdentifierError;

use crate::types::{CharacterEncoding, ParseError, ParseResult, ParseStats, ParserConfig};

/// Something that produces records one at a time from an underlying input.
pub trait RecordSource {
    /// Record type produced.
    type Record;

    /// Reads the next record that passes the source's filters.
    ///
    /// Returns `Ok(None)` at end of input.
    fn read_record(&mut self) -> ParseResult<Option<Self::Record>>;

    /// Statistics gathered so far.
    fn stats(&self) -> ParseStats;
}

/// Trait for record types parsed from one delimited line.
///
/// Implement this trait for each column-delimited datasource format.
pub trait DelimitedRecord: Sized {
    /// Column delimiter.
    const DELIMITER: u8 = b'\t';

    /// Column names, in file order. Lines must have at least this many
    /// columns; extra trailing columns are ignored.
    const COLUMNS: &'static [&'static str];

    /// Names of trailing columns that only some releases of the format carry.
    const OPTIONAL_COLUMNS: &'static [&'static str] = &[];

    /// Parses a record from the columns of one line.
    fn from_columns(columns: &Columns<'_>) -> ParseResult<Self>;

    /// Returns true if this record passes the given filter config.
    fn passes_filter(&self, _config: &ParserConfig) -> bool {
        true
    }
}

/// One line split into columns, with the context needed for error reporting.
pub struct Columns<'a> {
    record: &'a StringRecord,
    names: &'static [&'static str],
    optional_names: &'static [&'static str],
    line: u64,
}

impl<'a> Columns<'a> {
    /// Wraps a split line.
    pub fn new(record: &'a StringRecord, names: &'static [&'static str], line: u64) -> Self {
        Self {
            record,
            names,
            optional_names: &[],
            line,
        }
    }

    /// Names the optional trailing columns, for error reporting.
    pub fn with_optional_names(mut self, names: &'static [&'static str]) -> Self {
        self.optional_names = names;
        self
    }

    /// 1-based line number of the record.
    pub fn line(&self) -> u64 {
        self.line
    }

    /// Number of columns on the line.
    pub fn len(&self) -> usize {
        self.record.len()
    }

    /// Returns true if the line has no columns.
    pub fn is_empty(&self) -> bool {
        self.record.is_empty()
    }

    /// Raw token at `index` (empty if the column is missing).
    pub fn raw(&self, index: usize) -> &'a str {
        self.record.get(index).unwrap_or("")
    }

    /// Column name at `index`.
    pub fn name(&self, index: usize) -> &'static str {
        self.names
            .get(index)
            .or_else(|| {
                index
                    .checked_sub(self.names.len())
                    .and_then(|i| self.optional_names.get(i))
            })
            .copied()
            .unwrap_or("?")
    }

    /// Raw token at `index`, or `None` if the line has no such column or the
    /// token is one of `sentinels`.
    pub fn optional(&self, index: usize, sentinels: &[&str]) -> Option<&'a str> {
        self.record
            .get(index)
            .and_then(|value| parse::present(value, sentinels))
    }

    /// Parses a required identifier column.
    pub fn identifier<T>(&self, index: usize) -> ParseResult<T>
    where
        T: FromStr<Err = IdentifierError>,
    {
        self.raw(index)
            .parse()
            .map_err(|source| self.identifier_error(index, source))
    }

    /// Parses an identifier column that may hold a missing-value sentinel.
    pub fn optional_identifier<T>(&self, index: usize, sentinels: &[&str]) -> ParseResult<Option<T>>
    where
        T: FromStr<Err = IdentifierError>,
    {
        self.optional(index, sentinels)
            .map(|value| value.parse().map_err(|source| self.identifier_error(index, source)))
            .transpose()
    }

    /// Parses an integer column that may hold a missing-value sentinel.
    pub fn optional_integer<N: FromStr>(
        &self,
        index: usize,
        sentinels: &[&str],
    ) -> ParseResult<Option<N>> {
        self.optional(index, sentinels)
            .map(|value| {
                value
                    .parse::<N>()
                    .map_err(|_| self.invalid(index, "expected an integer"))
            })
            .transpose()
    }

    /// Text column that may hold a missing-value sentinel.
    pub fn optional_text(&self, index: usize, sentinels: &[&str]) -> Option<String> {
        self.optional(index, sentinels).map(str::to_string)
    }

    /// Builds an `InvalidField` error for the column at `index`.
    pub fn invalid(&self, index: usize, reason: impl Into<String>) -> ParseError {
        ParseError::InvalidField {
            line: self.line,
            column: self.name(index),
            value: self.raw(index).to_string(),
            reason: reason.into(),
        }
    }

    /// Builds an `Identifier` error for the column at `index`.
    pub fn identifier_error(&self, index: usize, source: IdentifierError) -> ParseError {
        ParseError::Identifier {
            line: self.line,
            column: self.name(index),
            source,
        }
    }
}

/// Source for files with one delimited record per line.
///
/// Lines starting with `#` are comments (column headers in NCBI files),
/// quoting is disabled and blank lines are skipped.
pub struct DelimitedSource<R: Read, T: DelimitedRecord> {
    reader: Reader<R>,
    record: StringRecord,
    config: ParserConfig,
    stats: ParseStats,
    _marker: PhantomData<T>,
}

impl<T: DelimitedRecord> DelimitedSource<BufReader<File>, T> {
    /// Opens a delimited file.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn from_path<P: AsRef<Path>>(path: P, config: ParserConfig) -> ParseResult<Self> {
        Ok(Self::from_reader(open_file(path)?, config))
    }
}

impl<R: Read, T: DelimitedRecord> DelimitedSource<R, T> {
    /// Creates a source over any reader.
    pub fn from_reader(reader: R, config: ParserConfig) -> Self {
        let reader = ReaderBuilder::new()
            .delimiter(T::DELIMITER)
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .comment(Some(b'#'))
            .trim(csv::Trim::None)
            .from_reader(reader);

        Self {
            reader,
            record: StringRecord::new(),
            config,
            stats: ParseStats::default(),
            _marker: PhantomData,
        }
    }

    fn parse_current(&self) -> ParseResult<T> {
        let line = self.record.position().map_or(0, |p| p.line());

        if self.config.encoding == CharacterEncoding::UsAscii
            && !self.record.iter().all(|field| field.is_ascii())
        {
            return Err(ParseError::Encoding { line });
        }

        if self.record.len() < T::COLUMNS.len() {
            return Err(ParseError::ColumnCount {
                line,
                expected: T::COLUMNS.len(),
                found: self.record.len(),
            });
        }

        T::from_columns(
            &Columns::new(&self.record, T::COLUMNS, line).with_optional_names(T::OPTIONAL_COLUMNS),
        )
    }
}

impl<R: Read, T: DelimitedRecord> RecordSource for DelimitedSource<R, T> {
    type Record = T;

    fn read_record(&mut self) -> ParseResult<Option<T>> {
        loop {
            if !self.reader.read_record(&mut self.record)? {
                return Ok(None);
            }

            // Skip empty records
            if self.record.iter().all(|f| f.trim().is_empty()) {
                continue;
            }

            let parsed = self.parse_current()?;
            self.stats.total_records += 1;
            if parsed.passes_filter(&self.config) {
                self.stats.filtered_records += 1;
                return Ok(Some(parsed));
            }
            self.stats.skipped_records += 1;
        }
    }

    fn stats(&self) -> ParseStats {
        self.stats
    }
}

/// Opens a file for buffered reading.
pub(crate) fn open_file<P: AsRef<Path>>(path: P) -> ParseResult<BufReader<File>> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ParseError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    tracing::debug!(path = %path.display(), "opening datasource file");
    Ok(BufReader::new(File::open(path)?))
}

/// State of a [`RecordReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Records may still be available.
    Ready,
    /// Input ended cleanly.
    Exhausted,
    /// A malformed record was reported; the position is unreliable.
    Failed,
}

impl fmt::Display for ReaderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Ready => "ready",
            Self::Exhausted => "exhausted",
            Self::Failed => "failed",
        })
    }
}

/// Forward-only, single-pass reader over a [`RecordSource`].
///
/// `next_record` is only valid while `has_next` returns true. A clean end of
/// input moves the reader to [`ReaderState::Exhausted`]; a malformed record is
/// reported by the following `next_record` call and moves the reader to
/// [`ReaderState::Failed`]. The underlying source (and its file handle) is
/// dropped as soon as either happens.
///
/// # Example
///
/// ```ignore
/// let mut reader = Gene2RefseqReader::open("gene2refseq", ParserConfig::default())?;
/// while reader.has_next() {
///     let record = reader.next_record()?;
///     println!("{}", record.gene_id);
/// }
/// ```
pub struct RecordReader<S: RecordSource> {
    source: Option<S>,
    pending: Option<ParseResult<S::Record>>,
    state: ReaderState,
    stats: ParseStats,
}

impl<S: RecordSource> RecordReader<S> {
    /// Creates a reader over a source.
    pub fn new(source: S) -> Self {
        Self {
            source: Some(source),
            pending: None,
            state: ReaderState::Ready,
            stats: ParseStats::default(),
        }
    }

    /// Current state.
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> ParseStats {
        self.source.as_ref().map_or(self.stats, |source| source.stats())
    }

    /// Returns true if a call to `next_record` will yield a record or the
    /// error for a malformed one.
    pub fn has_next(&mut self) -> bool {
        if self.state != ReaderState::Ready {
            return false;
        }
        if self.pending.is_none() {
            self.advance();
        }
        self.pending.is_some()
    }

    /// Returns the next record.
    ///
    /// # Errors
    /// Returns the parse error for a malformed record (the reader is then
    /// failed), or [`ParseError::ReaderState`] if no record is available.
    pub fn next_record(&mut self) -> ParseResult<S::Record> {
        if !self.has_next() {
            return Err(ParseError::ReaderState { state: self.state });
        }
        match self.pending.take() {
            Some(Ok(record)) => Ok(record),
            Some(Err(err)) => {
                self.state = ReaderState::Failed;
                Err(err)
            }
            None => Err(ParseError::ReaderState { state: self.state }),
        }
    }

    /// Reads every remaining record into a Vec, stopping at the first error.
    ///
    /// Note: This loads all records into memory.
    pub fn parse_all(mut self) -> ParseResult<Vec<S::Record>> {
        let mut results = Vec::new();
        while self.has_next() {
            results.push(self.next_record()?);
        }
        Ok(results)
    }

    fn advance(&mut self) {
        let Some(source) = self.source.as_mut() else {
            self.state = ReaderState::Exhausted;
            return;
        };

        match source.read_record() {
            Ok(Some(record)) => self.pending = Some(Ok(record)),
            Ok(None) => {
                self.release();
                self.state = ReaderState::Exhausted;
            }
            Err(err) => {
                self.pending = Some(Err(err));
                self.release();
            }
        }
    }

    fn release(&mut self) {
        if let Some(source) = self.source.take() {
            self.stats = source.stats();
            tracing::debug!(
                records = self.stats.total_records,
                skipped = self.stats.skipped_records,
                "datasource reader released"
            );
        }
    }
}

impl<S: RecordSource> Iterator for RecordReader<S> {
    type Item = ParseResult<S::Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.has_next() {
            Some(self.next_record())
        } else {
            None
        }
    }
}

/// Reader over a delimited file.
pub type DelimitedReader<T> = RecordReader<DelimitedSource<BufReader<File>, T>>;

impl<T: DelimitedRecord> DelimitedReader<T> {
    /// Opens a delimited datasource file.
    pub fn open<P: AsRef<Path>>(path: P, config: ParserConfig) -> ParseResult<Self> {
        DelimitedSource::from_path(path, config).map(RecordReader::new)
    }
}

/// Helper functions for interpreting column tokens.
pub mod parse {
    /// Returns `None` if `value` is one of the format's missing-value
    /// sentinels, otherwise the value itself.
    ///
    /// Sentinels are format-specific; every parser passes its own list.
    pub fn present<'a>(value: &'a str, sentinels: &[&str]) -> Option<&'a str> {
        if sentinels.contains(&value) {
            None
        } else {
            Some(value)
        }
    }

    /// Splits a multi-valued column on `separator`, dropping sentinels and
    /// empty entries.
    pub fn split_values<'a>(
        value: &'a str,
        separator: char,
        sentinels: &'a [&'a str],
    ) -> impl Iterator<Item = &'a str> + 'a {
        value
            .split(separator)
            .map(str::trim)
            .filter(move |token| !token.is_empty() && !sentinels.contains(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pair {
        key: String,
        value: Option<u32>,
    }

    impl DelimitedRecord for Pair {
        const COLUMNS: &'static [&'static str] = &["key", "value"];

        fn from_columns(columns: &Columns<'_>) -> ParseResult<Self> {
            Ok(Pair {
                key: columns.raw(0).to_string(),
                value: columns.optional_integer(1, &["-"])?,
            })
        }

        fn passes_filter(&self, _config: &ParserConfig) -> bool {
            self.key != "skip"
        }
    }

    fn reader(input: &str) -> RecordReader<DelimitedSource<&[u8], Pair>> {
        RecordReader::new(DelimitedSource::from_reader(
            input.as_bytes(),
            ParserConfig::with_encoding(CharacterEncoding::UsAscii),
        ))
    }

    #[test]
    fn test_present() {
        assert_eq!(parse::present("-", &["-"]), None);
        assert_eq!(parse::present("?", &["-"]), Some("?"));
        assert_eq!(parse::present("", &["-"]), Some(""));
    }

    #[test]
    fn test_missing_trailing_columns_are_absent() {
        let record = StringRecord::from(vec!["a", "1"]);
        let columns = Columns::new(&record, &["key", "value"], 7).with_optional_names(&["extra"]);

        assert_eq!(columns.optional(2, &["-"]), None);
        assert_eq!(columns.optional_text(2, &["-"]), None);
        assert_eq!(columns.optional_integer::<u64>(3, &["-"]).unwrap(), None);
        assert_eq!(
            columns
                .optional_identifier::<datasource_identifiers::GenBankId>(2, &["-"])
                .unwrap(),
            None
        );
        assert_eq!(columns.name(2), "extra");
        assert_eq!(columns.name(3), "?");
    }

    #[test]
    fn test_present_trailing_column_is_parsed() {
        let record = StringRecord::from(vec!["a", "1", ""]);
        let columns = Columns::new(&record, &["key", "value"], 7).with_optional_names(&["extra"]);

        // An empty column that is present is not a sentinel
        assert!(matches!(
            columns.optional_identifier::<datasource_identifiers::GenBankId>(2, &["-"]),
            Err(ParseError::Identifier { line: 7, column: "extra", .. })
        ));
    }

    #[test]
    fn test_split_values() {
        let values: Vec<&str> = parse::split_values("a|-|b||c", '|', &["-"]).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_reads_until_exhausted() {
        let mut reader = reader("#key\tvalue\na\t1\n\nb\t-\n");

        assert!(reader.has_next());
        assert_eq!(
            reader.next_record().unwrap(),
            Pair { key: "a".into(), value: Some(1) }
        );
        assert!(reader.has_next());
        assert_eq!(
            reader.next_record().unwrap(),
            Pair { key: "b".into(), value: None }
        );
        assert!(!reader.has_next());
        assert_eq!(reader.state(), ReaderState::Exhausted);
        assert!(matches!(
            reader.next_record(),
            Err(ParseError::ReaderState { state: ReaderState::Exhausted })
        ));
    }

    #[test]
    fn test_has_next_is_idempotent() {
        let mut reader = reader("a\t1\n");
        assert!(reader.has_next());
        assert!(reader.has_next());
        assert!(reader.next_record().is_ok());
        assert!(!reader.has_next());
    }

    #[test]
    fn test_malformed_line_fails_reader() {
        let mut reader = reader("a\t1\nb\tnot-a-number\nc\t3\n");

        assert!(reader.next_record().is_ok());
        assert!(reader.has_next());
        let err = reader.next_record().unwrap_err();
        assert!(matches!(err, ParseError::InvalidField { line: 2, column: "value", .. }));
        assert_eq!(reader.state(), ReaderState::Failed);
        assert!(!reader.has_next());
        assert!(matches!(
            reader.next_record(),
            Err(ParseError::ReaderState { state: ReaderState::Failed })
        ));
    }

    #[test]
    fn test_column_count_checked() {
        let mut reader = reader("only-one-column\n");
        let err = reader.next_record().unwrap_err();
        assert!(matches!(
            err,
            ParseError::ColumnCount { line: 1, expected: 2, found: 1 }
        ));
    }

    #[test]
    fn test_ascii_encoding_enforced() {
        let mut reader = reader("caf\u{e9}\t1\n");
        assert!(matches!(
            reader.next_record(),
            Err(ParseError::Encoding { line: 1 })
        ));
    }

    #[test]
    fn test_filter_skips_and_counts() {
        let mut reader = reader("a\t1\nskip\t2\nb\t3\n");
        let keys: Vec<String> = reader.by_ref().map(|r| r.unwrap().key).collect();
        assert_eq!(keys, vec!["a", "b"]);

        let stats = reader.stats();
        assert_eq!(stats.total_records, 3);
        assert_eq!(stats.filtered_records, 2);
        assert_eq!(stats.skipped_records, 1);
    }

    #[test]
    fn test_parse_all_stops_at_error() {
        assert_eq!(reader("a\t1\nb\t2\n").parse_all().unwrap().len(), 2);
        assert!(reader("a\t1\nb\tx\n").parse_all().is_err());
    }

    #[test]
    fn test_open_missing_file() {
        let result = DelimitedReader::<Pair>::open("/nonexistent/gene2refseq", ParserConfig::default());
        assert!(matches!(result, Err(ParseError::FileNotFound { .. })));
    }
}

//! Parser-specific types: errors, configuration, statistics and discovered
//! datasource files.

use std::fmt;
use std::path::{Path, PathBuf};

use datasource_identifiers::{IdentifierError, NcbiTaxonomyId};
use thiserror::Error;

use crate::parser::ReaderState;

/// Errors that can occur while reading a datasource file.
#[derive(Error, Debug)]
pub enum ParseError {
    /// I/O error reading the file.
    #[error("IO error reading datasource file: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited (CSV/TSV) reader error, including invalid UTF-8.
    #[error("delimited file error: {0}")]
    Csv(#[from] csv::Error),

    /// Non-ASCII content in a file declared as US-ASCII.
    #[error("line {line}: non-ASCII content in a US-ASCII file")]
    Encoding {
        /// 1-based line number.
        line: u64,
    },

    /// A line has fewer columns than the format requires.
    #[error("line {line}: expected at least {expected} columns, found {found}")]
    ColumnCount {
        /// 1-based line number.
        line: u64,
        /// Minimum column count for the format.
        expected: usize,
        /// Columns found on the line.
        found: usize,
    },

    /// A column value could not be interpreted.
    #[error("line {line}: invalid value '{value}' in column '{column}': {reason}")]
    InvalidField {
        /// 1-based line number.
        line: u64,
        /// Column name.
        column: &'static str,
        /// The offending token.
        value: String,
        /// Why the token was rejected.
        reason: String,
    },

    /// A column token failed identifier validation.
    #[error("line {line}, column '{column}': {source}")]
    Identifier {
        /// 1-based line number.
        line: u64,
        /// Column name.
        column: &'static str,
        /// The identifier validation failure.
        #[source]
        source: IdentifierError,
    },

    /// A multi-line block is structurally invalid.
    #[error("line {line}: malformed block: {reason}")]
    MalformedBlock {
        /// 1-based line number.
        line: u64,
        /// What was wrong with the block.
        reason: String,
    },

    /// `next_record` was called when no record was available.
    #[error("reader is {state}; no record available")]
    ReaderState {
        /// State the reader was in.
        state: ReaderState,
    },

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Directory not found.
    #[error("Directory not found: {path}")]
    DirectoryNotFound {
        /// The path that was not found.
        path: String,
    },
}

impl ParseError {
    /// Line number the error refers to, if it is a line-level error.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Encoding { line }
            | Self::ColumnCount { line, .. }
            | Self::InvalidField { line, .. }
            | Self::Identifier { line, .. }
            | Self::MalformedBlock { line, .. } => Some(*line),
            Self::Csv(err) => err.position().map(|p| p.line()),
            _ => None,
        }
    }
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Character encoding declared for a datasource file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharacterEncoding {
    /// UTF-8 (validated while decoding).
    #[default]
    Utf8,
    /// 7-bit US-ASCII.
    UsAscii,
}

impl CharacterEncoding {
    /// Canonical label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::UsAscii => "us-ascii",
        }
    }

    /// Parses an encoding label, case-insensitively.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Some(Self::Utf8),
            "us-ascii" | "us_ascii" | "ascii" => Some(Self::UsAscii),
            _ => None,
        }
    }

    /// Returns true if already-decoded text is permitted by this encoding.
    pub fn permits(self, text: &str) -> bool {
        match self {
            Self::Utf8 => true,
            Self::UsAscii => text.is_ascii(),
        }
    }
}

impl fmt::Display for CharacterEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configuration for reading a datasource file.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Declared character encoding of the file.
    pub encoding: CharacterEncoding,
    /// Only yield records for this organism (formats without taxonomy
    /// columns ignore the filter).
    pub taxon_filter: Option<NcbiTaxonomyId>,
}

impl ParserConfig {
    /// Creates a config with the given encoding and no taxon filter.
    pub fn with_encoding(encoding: CharacterEncoding) -> Self {
        Self {
            encoding,
            taxon_filter: None,
        }
    }

    /// Returns a copy restricted to one organism.
    pub fn for_taxon(mut self, taxon: NcbiTaxonomyId) -> Self {
        self.taxon_filter = Some(taxon);
        self
    }

    /// Returns true if a record for `taxon` passes the taxon filter.
    pub fn accepts_taxon(&self, taxon: Option<&NcbiTaxonomyId>) -> bool {
        match &self.taxon_filter {
            None => true,
            Some(wanted) => taxon == Some(wanted),
        }
    }
}

/// Statistics from reading a datasource file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseStats {
    /// Records parsed from the file.
    pub total_records: usize,
    /// Records that passed filters and were handed to the caller.
    pub filtered_records: usize,
    /// Records skipped by filters.
    pub skipped_records: usize,
}

impl ParseStats {
    /// Returns the percentage of records that passed filters.
    pub fn filter_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.filtered_records as f64 / self.total_records as f64) * 100.0
        }
    }
}

/// Supported datasource file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasourceFormat {
    /// NCBI Entrez Gene `gene2refseq`.
    EntrezGene2Refseq,
    /// TRANSFAC `matrix.dat`.
    TransfacMatrix,
    /// iRefWeb PSI-MITAB interaction file.
    IRefWebMitab,
}

impl DatasourceFormat {
    /// All supported formats.
    pub const ALL: [DatasourceFormat; 3] = [
        Self::EntrezGene2Refseq,
        Self::TransfacMatrix,
        Self::IRefWebMitab,
    ];

    /// Label used on the command line.
    pub fn label(self) -> &'static str {
        match self {
            Self::EntrezGene2Refseq => "gene2refseq",
            Self::TransfacMatrix => "transfac-matrix",
            Self::IRefWebMitab => "irefweb-mitab",
        }
    }

    /// Parses a command line label.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|format| format.label() == label)
    }

    /// File stem of the N-Triples output stream.
    pub fn output_stem(self) -> &'static str {
        match self {
            Self::EntrezGene2Refseq => "entrezgene-2refseqOrAccession",
            Self::TransfacMatrix => "transfac-matrix",
            Self::IRefWebMitab => "irefweb-interactions",
        }
    }

    /// Encoding the source files are distributed in.
    pub fn default_encoding(self) -> CharacterEncoding {
        match self {
            Self::EntrezGene2Refseq | Self::TransfacMatrix => CharacterEncoding::UsAscii,
            Self::IRefWebMitab => CharacterEncoding::Utf8,
        }
    }

    /// Returns true if a file name looks like a file of this format.
    pub fn matches_file_name(self, file_name: &str) -> bool {
        match self {
            Self::EntrezGene2Refseq => file_name == "gene2refseq" || file_name == "gene2refseq.txt",
            Self::TransfacMatrix => file_name == "matrix.dat",
            Self::IRefWebMitab => file_name.contains("mitab") && file_name.ends_with(".txt"),
        }
    }
}

impl fmt::Display for DatasourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Datasource files discovered in a staging directory.
#[derive(Debug, Clone, Default)]
pub struct DatasourceFiles {
    /// Path to the gene2refseq file.
    pub gene2refseq_file: Option<PathBuf>,
    /// Path to the TRANSFAC matrix file.
    pub transfac_matrix_file: Option<PathBuf>,
    /// Paths to iRefWeb PSI-MITAB files (one per organism).
    pub irefweb_mitab_files: Vec<PathBuf>,
}

impl DatasourceFiles {
    /// Creates a new empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no supported file was found.
    pub fn is_empty(&self) -> bool {
        self.gene2refseq_file.is_none()
            && self.transfac_matrix_file.is_none()
            && self.irefweb_mitab_files.is_empty()
    }

    /// Records a file under the given format.
    pub fn insert(&mut self, format: DatasourceFormat, path: PathBuf) {
        match format {
            DatasourceFormat::EntrezGene2Refseq => self.gene2refseq_file = Some(path),
            DatasourceFormat::TransfacMatrix => self.transfac_matrix_file = Some(path),
            DatasourceFormat::IRefWebMitab => self.irefweb_mitab_files.push(path),
        }
    }

    /// Lists every discovered file with its format.
    pub fn entries(&self) -> Vec<(DatasourceFormat, &Path)> {
        let mut entries = Vec::new();
        if let Some(path) = &self.gene2refseq_file {
            entries.push((DatasourceFormat::EntrezGene2Refseq, path.as_path()));
        }
        if let Some(path) = &self.transfac_matrix_file {
            entries.push((DatasourceFormat::TransfacMatrix, path.as_path()));
        }
        for path in &self.irefweb_mitab_files {
            entries.push((DatasourceFormat::IRefWebMitab, path.as_path()));
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_default() {
        let config = ParserConfig::default();
        assert_eq!(config.encoding, CharacterEncoding::Utf8);
        assert!(config.taxon_filter.is_none());
        assert!(config.accepts_taxon(None));
    }

    #[test]
    fn test_taxon_filter() {
        let config = ParserConfig::default().for_taxon(NcbiTaxonomyId::new(10090));
        assert!(config.accepts_taxon(Some(&NcbiTaxonomyId::new(10090))));
        assert!(!config.accepts_taxon(Some(&NcbiTaxonomyId::new(9606))));
        assert!(!config.accepts_taxon(None));
    }

    #[test]
    fn test_encoding_labels() {
        assert_eq!(
            CharacterEncoding::from_label("US-ASCII"),
            Some(CharacterEncoding::UsAscii)
        );
        assert_eq!(
            CharacterEncoding::from_label("utf8"),
            Some(CharacterEncoding::Utf8)
        );
        assert_eq!(CharacterEncoding::from_label("latin-1"), None);
        assert!(CharacterEncoding::UsAscii.permits("NM_010696.3"));
        assert!(!CharacterEncoding::UsAscii.permits("Müller"));
        assert!(CharacterEncoding::Utf8.permits("Müller"));
    }

    #[test]
    fn test_parse_stats_filter_rate() {
        let stats = ParseStats {
            total_records: 100,
            filtered_records: 75,
            ..Default::default()
        };
        assert!((stats.filter_rate() - 75.0).abs() < 0.01);
        assert_eq!(ParseStats::default().filter_rate(), 0.0);
    }

    #[test]
    fn test_format_file_names() {
        assert!(DatasourceFormat::EntrezGene2Refseq.matches_file_name("gene2refseq"));
        assert!(DatasourceFormat::TransfacMatrix.matches_file_name("matrix.dat"));
        assert!(DatasourceFormat::IRefWebMitab.matches_file_name("10090.mitab.04072015.txt"));
        assert!(!DatasourceFormat::IRefWebMitab.matches_file_name("gene2refseq"));
        assert_eq!(
            DatasourceFormat::from_label("transfac-matrix"),
            Some(DatasourceFormat::TransfacMatrix)
        );
    }

    #[test]
    fn test_datasource_files_entries() {
        let mut files = DatasourceFiles::new();
        assert!(files.is_empty());
        files.insert(DatasourceFormat::TransfacMatrix, PathBuf::from("matrix.dat"));
        files.insert(DatasourceFormat::IRefWebMitab, PathBuf::from("a.mitab.txt"));
        files.insert(DatasourceFormat::IRefWebMitab, PathBuf::from("b.mitab.txt"));

        let entries = files.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, DatasourceFormat::TransfacMatrix);
        assert!(!files.is_empty());
    }
}

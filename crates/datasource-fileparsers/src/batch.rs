//! Datasource file discovery and conversion to N-Triples.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::emit::{emit_all, EmitError};
use crate::irefweb::{IRefWebMitabReader, INTERACTION_SCHEMA};
use crate::ncbi::{Gene2RefseqReader, GENE2REFSEQ_SCHEMA};
use crate::ntriples::{data_file_name, meta_file_name, NTriplesWriter, StatementSink, StreamMetadata};
use crate::parser::{RecordReader, RecordSource};
use crate::record::{Record, RecordSchema};
use crate::transfac::{TransfacMatrixReader, MATRIX_SCHEMA};
use crate::types::{
    CharacterEncoding, DatasourceFiles, DatasourceFormat, ParseError, ParseResult, ParseStats,
    ParserConfig,
};
use datasource_identifiers::NcbiTaxonomyId;

/// Errors from converting one datasource file.
#[derive(Error, Debug)]
pub enum ConvertError {
    /// The input could not be read or parsed.
    #[error("{path}: {source}")]
    Parse {
        /// Input file.
        path: String,
        /// Underlying error.
        #[source]
        source: ParseError,
    },

    /// A record could not be serialized.
    #[error("{path}: record {record}: {source}")]
    Emit {
        /// Input file.
        path: String,
        /// 1-based index of the record.
        record: u64,
        /// Underlying error.
        #[source]
        source: EmitError,
    },

    /// An output file could not be written.
    #[error("{path}: {source}")]
    Io {
        /// Output file or directory.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

/// Result type for conversions.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// Options for converting datasource files.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Directory receiving the `.nt` files.
    pub output_dir: PathBuf,
    /// Encoding override; defaults to the format's distribution encoding.
    pub encoding: Option<CharacterEncoding>,
    /// Only convert records for this organism.
    pub taxon_filter: Option<NcbiTaxonomyId>,
    /// Write the `kabob-meta-<stem>.nt` provenance file.
    pub write_meta: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            encoding: None,
            taxon_filter: None,
            write_meta: true,
        }
    }
}

impl ConvertOptions {
    /// Creates options writing to `output_dir`.
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Parser configuration for a file of `format`.
    pub fn parser_config(&self, format: DatasourceFormat) -> ParserConfig {
        ParserConfig {
            encoding: self.encoding.unwrap_or_else(|| format.default_encoding()),
            taxon_filter: self.taxon_filter,
        }
    }
}

/// Result of converting one file.
#[derive(Debug, Clone)]
pub struct ConversionSummary {
    /// Format of the input.
    pub format: DatasourceFormat,
    /// Input file.
    pub input: PathBuf,
    /// N-Triples data file written.
    pub data_file: PathBuf,
    /// Provenance file written, if enabled.
    pub meta_file: Option<PathBuf>,
    /// Records serialized.
    pub records: u64,
    /// Statements written to the data file.
    pub statements: u64,
    /// Reader statistics.
    pub stats: ParseStats,
}

/// Schema of the top-level records of a format.
pub fn record_schema(format: DatasourceFormat) -> &'static RecordSchema {
    match format {
        DatasourceFormat::EntrezGene2Refseq => &GENE2REFSEQ_SCHEMA,
        DatasourceFormat::TransfacMatrix => &MATRIX_SCHEMA,
        DatasourceFormat::IRefWebMitab => &INTERACTION_SCHEMA,
    }
}

/// Output stem for a file. iRefWeb files are distributed per organism
/// (`10090.mitab.04072015.txt`), so their stem carries the file's leading
/// name segment.
pub fn output_stem(format: DatasourceFormat, input: &Path) -> String {
    let base = format.output_stem();
    if format != DatasourceFormat::IRefWebMitab {
        return base.to_string();
    }
    let segment = input
        .file_name()
        .map(|name| name.to_string_lossy())
        .and_then(|name| name.split('.').next().map(str::to_string))
        .filter(|segment| !segment.is_empty());
    match segment {
        Some(segment) => format!("{base}-{segment}"),
        None => base.to_string(),
    }
}

/// Discovers datasource files in a staging directory.
///
/// Looks at the directory itself and one level of subdirectories, matching
/// file names against the supported formats.
pub fn discover_datasource_files<P: AsRef<Path>>(path: P) -> ParseResult<DatasourceFiles> {
    let path = path.as_ref();

    if !path.is_dir() {
        return Err(ParseError::DirectoryNotFound {
            path: path.display().to_string(),
        });
    }

    let mut files = DatasourceFiles::new();
    scan_directory(path, &mut files)?;

    for entry in fs::read_dir(path)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            scan_directory(&entry.path(), &mut files)?;
        }
    }

    // read_dir order is platform dependent
    files.irefweb_mitab_files.sort();

    tracing::debug!(
        directory = %path.display(),
        found = files.entries().len(),
        "discovered datasource files"
    );
    Ok(files)
}

fn scan_directory(dir: &Path, files: &mut DatasourceFiles) -> ParseResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let filename = entry.file_name();
        let filename_str = filename.to_string_lossy();

        if let Some(format) = DatasourceFormat::ALL
            .into_iter()
            .find(|format| format.matches_file_name(&filename_str))
        {
            files.insert(format, entry.path());
        }
    }
    Ok(())
}

/// Converts one datasource file to `<output_dir>/<stem>.nt` (and the
/// provenance file).
///
/// Statements are written record by record, so a failure leaves every earlier
/// record's statements intact in the output.
pub fn convert_file<P: AsRef<Path>>(
    format: DatasourceFormat,
    input: P,
    options: &ConvertOptions,
) -> ConvertResult<ConversionSummary> {
    let input = input.as_ref();
    let config = options.parser_config(format);
    let parse_error = |source| ConvertError::Parse {
        path: input.display().to_string(),
        source,
    };

    tracing::info!(format = %format, input = %input.display(), "converting datasource file");

    match format {
        DatasourceFormat::EntrezGene2Refseq => {
            let reader = Gene2RefseqReader::open(input, config).map_err(parse_error)?;
            write_stream(reader, format, input, options)
        }
        DatasourceFormat::TransfacMatrix => {
            let reader = TransfacMatrixReader::open(input, config).map_err(parse_error)?;
            write_stream(reader, format, input, options)
        }
        DatasourceFormat::IRefWebMitab => {
            let reader = IRefWebMitabReader::open(input, config).map_err(parse_error)?;
            write_stream(reader, format, input, options)
        }
    }
}

/// Writes every record of `reader`, returning the number of records read.
fn write_records<S, W>(
    reader: &mut RecordReader<S>,
    writer: &mut NTriplesWriter<W>,
    input: &Path,
    data_file: &Path,
) -> ConvertResult<u64>
where
    S: RecordSource,
    S::Record: Record,
    W: Write,
{
    let mut records = 0u64;
    while reader.has_next() {
        let record = reader.next_record().map_err(|source| ConvertError::Parse {
            path: input.display().to_string(),
            source,
        })?;
        records += 1;

        let statements = emit_all(&record).map_err(|source| ConvertError::Emit {
            path: input.display().to_string(),
            record: records,
            source,
        })?;
        writer
            .write_statements(&statements)
            .map_err(io_error(data_file))?;
    }
    Ok(records)
}

fn write_stream<S>(
    mut reader: RecordReader<S>,
    format: DatasourceFormat,
    input: &Path,
    options: &ConvertOptions,
) -> ConvertResult<ConversionSummary>
where
    S: RecordSource,
    S::Record: Record,
{
    fs::create_dir_all(&options.output_dir).map_err(io_error(&options.output_dir))?;

    let stem = output_stem(format, input);
    let data_file = options.output_dir.join(data_file_name(&stem));
    let mut writer = NTriplesWriter::create(&data_file).map_err(io_error(&data_file))?;

    let records = match write_records(&mut reader, &mut writer, input, &data_file) {
        Ok(records) => records,
        Err(err) => {
            // Keep the statements written before the failure
            if let Err(flush) = writer.finish() {
                tracing::warn!(
                    output = %data_file.display(),
                    error = %flush,
                    "failed to flush partial output"
                );
            }
            return Err(err);
        }
    };

    let statements = writer.statement_count();
    writer.finish().map_err(io_error(&data_file))?;

    let schema = record_schema(format);
    let meta_file = if options.write_meta {
        let metadata = StreamMetadata {
            stem: stem.clone(),
            source_file: input.display().to_string(),
            data_source: schema.data_source,
            record_class: schema.class,
            record_count: records,
            statement_count: statements,
        };
        let meta_file = options.output_dir.join(meta_file_name(&stem));
        metadata
            .write_to_dir(&options.output_dir)
            .map_err(io_error(&meta_file))?;
        Some(meta_file)
    } else {
        None
    };

    let stats = reader.stats();
    let size = fs::metadata(&data_file).map(|m| m.len()).unwrap_or(0);
    tracing::info!(
        format = %format,
        records,
        statements,
        skipped = stats.skipped_records,
        output = %data_file.display(),
        size = %format_bytes(size as usize),
        "conversion complete"
    );

    Ok(ConversionSummary {
        format,
        input: input.to_path_buf(),
        data_file,
        meta_file,
        records,
        statements,
        stats,
    })
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ConvertError {
    let path = path.display().to_string();
    move |source| ConvertError::Io { path, source }
}

/// Converts every discovered file, one after another.
///
/// A failing file is logged and reported in its slot; the remaining files are
/// still converted.
pub fn convert_all(
    files: &DatasourceFiles,
    options: &ConvertOptions,
) -> Vec<ConvertResult<ConversionSummary>> {
    files
        .entries()
        .into_iter()
        .map(|(format, path)| {
            let result = convert_file(format, path, options);
            if let Err(err) = &result {
                tracing::warn!(format = %format, error = %err, "skipping datasource file");
            }
            result
        })
        .collect()
}

/// Formats a byte count as a human-readable string.
pub fn format_bytes(bytes: usize) -> String {
    const KB: usize = 1024;
    const MB: usize = KB * 1024;
    const GB: usize = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} bytes", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_field_names_are_unique() {
        use crate::irefweb::{INTERACTOR_SCHEMA, ORGANISM_SCHEMA};

        let schemas = DatasourceFormat::ALL
            .into_iter()
            .map(record_schema)
            .chain([&INTERACTOR_SCHEMA, &ORGANISM_SCHEMA]);
        for schema in schemas {
            let mut names: Vec<&str> = schema.fields.iter().map(|field| field.name).collect();
            names.sort_unstable();
            names.dedup();
            assert_eq!(names.len(), schema.fields.len(), "{}", schema.label);
            for field in schema.fields {
                assert_eq!(
                    schema.descriptor(field.name).map(|d| d.predicate),
                    Some(field.predicate)
                );
            }
        }
    }

    #[test]
    fn test_output_stem() {
        assert_eq!(
            output_stem(DatasourceFormat::EntrezGene2Refseq, Path::new("/data/gene2refseq")),
            "entrezgene-2refseqOrAccession"
        );
        assert_eq!(
            output_stem(
                DatasourceFormat::IRefWebMitab,
                Path::new("/data/10090.mitab.04072015.txt")
            ),
            "irefweb-interactions-10090"
        );
    }

    #[test]
    fn test_discover_datasource_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("gene2refseq"), "").unwrap();
        fs::write(dir.path().join("README"), "").unwrap();
        let sub = dir.path().join("irefweb");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("9606.mitab.04072015.txt"), "").unwrap();
        fs::write(sub.join("10090.mitab.04072015.txt"), "").unwrap();

        let files = discover_datasource_files(dir.path()).unwrap();
        assert_eq!(files.gene2refseq_file, Some(dir.path().join("gene2refseq")));
        assert!(files.transfac_matrix_file.is_none());
        assert_eq!(
            files.irefweb_mitab_files,
            vec![
                sub.join("10090.mitab.04072015.txt"),
                sub.join("9606.mitab.04072015.txt"),
            ]
        );
    }

    #[test]
    fn test_discover_missing_directory() {
        assert!(matches!(
            discover_datasource_files("/nonexistent/staging"),
            Err(ParseError::DirectoryNotFound { .. })
        ));
    }

    #[test]
    fn test_convert_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = convert_file(
            DatasourceFormat::TransfacMatrix,
            dir.path().join("matrix.dat"),
            &ConvertOptions::new(dir.path()),
        );
        assert!(matches!(
            result,
            Err(ConvertError::Parse { source: ParseError::FileNotFound { .. }, .. })
        ));
    }

    #[test]
    fn test_failed_conversion_keeps_earlier_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("gene2refseq");
        fs::write(
            &input,
            "10090\t16825\t-\t-\t-\t-\t-\tAC108484.25\t31076542\t69411\t76442\t-\t-\n\
             10090\tgene\t-\t-\t-\t-\t-\t-\t-\t-\t-\t-\t-\n",
        )
        .unwrap();

        let result = convert_file(
            DatasourceFormat::EntrezGene2Refseq,
            &input,
            &ConvertOptions::new(dir.path()),
        );
        assert!(matches!(
            result,
            Err(ConvertError::Parse { source: ParseError::Identifier { line: 2, .. }, .. })
        ));

        let data =
            fs::read_to_string(dir.path().join("entrezgene-2refseqOrAccession.nt")).unwrap();
        assert_eq!(data.lines().count(), 4);
        assert!(!dir
            .path()
            .join("kabob-meta-entrezgene-2refseqOrAccession.nt")
            .is_file());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(500), "500 bytes");
        assert_eq!(format_bytes(1536), "1.50 KB");
        assert_eq!(format_bytes(1024 * 1024), "1.00 MB");
    }
}

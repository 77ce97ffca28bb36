//! Command line values and the conversion options built from them.

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use datasource_fileparsers::{CharacterEncoding, ConvertOptions, DatasourceFormat};
use datasource_identifiers::{IdentifierError, NcbiTaxonomyId};

/// Parses a `--format` value.
pub fn parse_format(value: &str) -> Result<DatasourceFormat, String> {
    DatasourceFormat::from_label(value).ok_or_else(|| {
        let known: Vec<&str> = DatasourceFormat::ALL.iter().map(|f| f.label()).collect();
        format!("unknown format '{value}' (expected one of: {})", known.join(", "))
    })
}

/// Parses an `--encoding` value.
pub fn parse_encoding(value: &str) -> Result<CharacterEncoding, String> {
    CharacterEncoding::from_label(value)
        .ok_or_else(|| format!("unsupported encoding '{value}' (expected us-ascii or utf-8)"))
}

/// Parses a `--taxon` value.
pub fn parse_taxon(value: &str) -> Result<NcbiTaxonomyId, String> {
    value.parse().map_err(|e: IdentifierError| e.to_string())
}

/// Options shared by the commands that read datasource files.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Character encoding of the input (defaults to the format's own)
    #[arg(long, env = "KB_RDFGEN_ENCODING", value_parser = parse_encoding)]
    pub encoding: Option<CharacterEncoding>,

    /// Only read records for this NCBI taxonomy id
    #[arg(long, env = "KB_RDFGEN_TAXON", value_parser = parse_taxon)]
    pub taxon: Option<NcbiTaxonomyId>,
}

impl InputArgs {
    /// Encoding to read a file of `format` with.
    pub fn encoding_for(&self, format: DatasourceFormat) -> CharacterEncoding {
        self.encoding.unwrap_or_else(|| format.default_encoding())
    }
}

/// Options for commands writing N-Triples.
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Directory receiving the .nt files
    #[arg(short, long, env = "KB_RDFGEN_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Skip the kabob-meta provenance files
    #[arg(long, env = "KB_RDFGEN_NO_META")]
    pub no_meta: bool,
}

/// Builds conversion options from command line arguments.
pub fn convert_options(input: &InputArgs, output: &OutputArgs) -> ConvertOptions {
    ConvertOptions {
        output_dir: output.output_dir.clone(),
        encoding: input.encoding,
        taxon_filter: input.taxon,
        write_meta: !output.no_meta,
    }
}

/// Key of a `group` mapping.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupKey {
    /// Protein GI number to Entrez Gene ids
    ProteinGi,
    /// Unversioned RefSeq protein accession to Entrez Gene ids
    ProteinAccession,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("gene2refseq"), Ok(DatasourceFormat::EntrezGene2Refseq));
        assert_eq!(parse_format("irefweb-mitab"), Ok(DatasourceFormat::IRefWebMitab));
        let err = parse_format("rf2").unwrap_err();
        assert!(err.contains("transfac-matrix"));
    }

    #[test]
    fn test_parse_encoding_and_taxon() {
        assert_eq!(parse_encoding("US-ASCII"), Ok(CharacterEncoding::UsAscii));
        assert!(parse_encoding("latin-1").is_err());
        assert_eq!(parse_taxon("10090"), Ok(NcbiTaxonomyId::new(10090)));
        assert!(parse_taxon("mouse").is_err());
    }

    #[test]
    fn test_encoding_defaults_to_format_encoding() {
        let args = InputArgs::default();
        assert_eq!(
            args.encoding_for(DatasourceFormat::TransfacMatrix),
            CharacterEncoding::UsAscii
        );
        assert_eq!(
            args.encoding_for(DatasourceFormat::IRefWebMitab),
            CharacterEncoding::Utf8
        );

        let args = InputArgs {
            encoding: Some(CharacterEncoding::Utf8),
            taxon: Some(NcbiTaxonomyId::new(9606)),
        };
        assert_eq!(
            args.encoding_for(DatasourceFormat::EntrezGene2Refseq),
            CharacterEncoding::Utf8
        );
    }

    #[test]
    fn test_convert_options() {
        let output = OutputArgs {
            output_dir: PathBuf::from("out"),
            no_meta: true,
        };
        let options = convert_options(&InputArgs::default(), &output);
        assert_eq!(options.output_dir, PathBuf::from("out"));
        assert!(!options.write_meta);
        assert!(options.taxon_filter.is_none());
    }
}

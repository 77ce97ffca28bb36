//! # datasource-rdfgen
//!
//! Command line driver converting biomedical datasource files to N-Triples.
//!
//! - `kb-rdfgen convert`: convert one file of a given format
//! - `kb-rdfgen discover`: find known files in a staging directory and convert each
//! - `kb-rdfgen group`: print gene2refseq protein to gene mappings as JSON

pub mod commands;
pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use datasource_fileparsers::DatasourceFormat;

pub use config::{GroupKey, InputArgs, OutputArgs};

/// Knowledge base RDF generator for datasource files
#[derive(Parser, Debug)]
#[command(name = "kb-rdfgen")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert one datasource file to N-Triples
    Convert {
        /// Input format
        #[arg(short, long, env = "KB_RDFGEN_FORMAT", value_parser = config::parse_format)]
        format: DatasourceFormat,

        /// Datasource file
        #[arg(short, long, env = "KB_RDFGEN_INPUT")]
        input: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        options: InputArgs,
    },

    /// Convert every known datasource file found in a directory
    Discover {
        /// Staging directory
        #[arg(env = "KB_RDFGEN_STAGING_DIR")]
        directory: PathBuf,

        #[command(flatten)]
        output: OutputArgs,

        #[command(flatten)]
        options: InputArgs,
    },

    /// Print gene2refseq mappings to Entrez Gene ids as JSON
    Group {
        /// gene2refseq file
        #[arg(short, long, env = "KB_RDFGEN_INPUT")]
        input: PathBuf,

        /// Mapping key
        #[arg(long, value_enum, default_value = "protein-gi")]
        by: GroupKey,

        #[command(flatten)]
        options: InputArgs,
    },
}

/// Runs a parsed command line.
pub fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Convert {
            format,
            input,
            output,
            options,
        } => commands::convert(*format, input, &config::convert_options(options, output)),
        Commands::Discover {
            directory,
            output,
            options,
        } => commands::discover(directory, &config::convert_options(options, output)),
        Commands::Group { input, by, options } => {
            commands::group(input, *by, options, std::io::stdout().lock())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use datasource_identifiers::NcbiTaxonomyId;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert() {
        let cli = Cli::try_parse_from([
            "kb-rdfgen",
            "convert",
            "--format",
            "transfac-matrix",
            "--input",
            "matrix.dat",
            "--output-dir",
            "out",
            "--taxon",
            "10090",
        ])
        .unwrap();

        match cli.command {
            Commands::Convert {
                format,
                input,
                output,
                options,
            } => {
                assert_eq!(format, DatasourceFormat::TransfacMatrix);
                assert_eq!(input, PathBuf::from("matrix.dat"));
                assert_eq!(output.output_dir, PathBuf::from("out"));
                assert!(!output.no_meta);
                assert_eq!(options.taxon, Some(NcbiTaxonomyId::new(10090)));
                assert!(options.encoding.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_parse_group() {
        let cli = Cli::try_parse_from([
            "kb-rdfgen",
            "-v",
            "group",
            "--input",
            "gene2refseq",
            "--by",
            "protein-accession",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Group {
                by: GroupKey::ProteinAccession,
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = Cli::try_parse_from([
            "kb-rdfgen",
            "convert",
            "--format",
            "rf2",
            "--input",
            "x",
            "--output-dir",
            "out",
        ]);
        assert!(result.is_err());
    }
}

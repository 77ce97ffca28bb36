//! # datasource-fileparsers
//!
//! Parsers for flat-file biomedical datasources and their serialization as
//! RDF statements.
//!
//! Each supported format has a record type, a forward-only reader and a
//! static record schema. The [`emit`](emit::emit) function walks a record's
//! schema and produces statements; [`NTriplesWriter`] writes them out.
//!
//! ## Supported formats
//!
//! | Format | Record | Reader |
//! |--------|--------|--------|
//! | NCBI `gene2refseq` | [`EntrezGene2RefseqRecord`] | [`Gene2RefseqReader`] |
//! | TRANSFAC `matrix.dat` | [`TransfacMatrixRecord`] | [`TransfacMatrixReader`] |
//! | iRefWeb PSI-MITAB | [`IRefWebInteractionRecord`] | [`IRefWebMitabReader`] |
//!
//! ## Usage
//!
//! ```no_run
//! use datasource_fileparsers::{emit_all, Gene2RefseqReader, ParserConfig};
//!
//! let mut reader = Gene2RefseqReader::open("gene2refseq", ParserConfig::default())?;
//! while reader.has_next() {
//!     let record = reader.next_record()?;
//!     for statement in emit_all(&record)? {
//!         println!("{statement}");
//!     }
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Features
//!
//! - `serde` (default): serde derives on records.

#![warn(missing_docs)]

pub mod batch;
pub mod block;
pub mod emit;
pub mod grouping;
pub mod irefweb;
pub mod ncbi;
pub mod ntriples;
pub mod parser;
pub mod record;
pub mod statement;
pub mod transfac;
pub mod types;

// Re-export commonly used types
pub use batch::{
    convert_all, convert_file, discover_datasource_files, ConversionSummary, ConvertError,
    ConvertOptions, ConvertResult,
};
pub use block::{Block, BlockReader, BlockRecord, BlockSource};
pub use emit::{emit, emit_all, EmitError, EmitResult, Emission};
pub use grouping::group_by;
pub use irefweb::{
    IRefWebInteractionRecord, IRefWebInteractor, IRefWebInteractorOrganism, IRefWebMitabReader,
};
pub use ncbi::{
    protein_accession_to_entrez_gene_map, protein_gi_to_entrez_gene_map, EntrezGene2RefseqRecord,
    Gene2RefseqReader, Strand,
};
pub use ntriples::{NTriplesWriter, StatementSink, StreamMetadata};
pub use parser::{Columns, DelimitedReader, DelimitedRecord, DelimitedSource, ReaderState, RecordReader, RecordSource};
pub use record::{FieldDescriptor, FieldValue, Multiplicity, ObjectKind, Record, RecordSchema, SubjectRule, Value};
pub use statement::{Literal, Object, Statement};
pub use transfac::{TransfacMatrixReader, TransfacMatrixRecord};
pub use types::{
    CharacterEncoding, DatasourceFiles, DatasourceFormat, ParseError, ParseResult, ParseStats,
    ParserConfig,
};

// Re-export the identifiers crate for convenience
pub use datasource_identifiers;

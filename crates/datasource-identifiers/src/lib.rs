//! # datasource-identifiers
//!
//! Typed, provenance-tagged identifiers for biomedical datasources.
//!
//! Every identifier kind wraps one raw token (a string or a number) and is
//! bound at the type level to a single [`DataSource`]. Equality and hashing
//! are structural, and all kinds share the [`DataSourceIdentifier`]
//! capability used to mint IRIs during RDF serialization.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!
//! ## Usage
//!
//! ```rust
//! use datasource_identifiers::{DataSource, DataSourceIdentifier, EntrezGeneId, RefSeqId};
//!
//! let gene = EntrezGeneId::new(16822);
//! assert_eq!(gene.data_source(), DataSource::EntrezGene);
//!
//! let rna: RefSeqId = "NM_010696.3".parse().unwrap();
//! assert_eq!(rna.ice_iri(), "http://www.ncbi.nlm.nih.gov/refseq/NM_010696.3_ICE");
//!
//! assert!("".parse::<RefSeqId>().is_err());
//! ```

#![warn(missing_docs)]

#[macro_use]
mod identifier;
mod data_source;
mod ncbi;
pub mod ontology;
mod other;
mod transfac;

// Re-export all public types at crate root
pub use data_source::DataSource;
pub use identifier::{DataSourceIdentifier, IdentifierError, IdentifierResult};
pub use ncbi::{
    is_refseq_accession, EntrezGeneId, GenBankId, GiNumberId, NcbiTaxonomyId,
    NucleotideAccession, RefSeqId,
};
pub use other::{EchoBaseId, IRefWebInteractorId, PubMedId};
pub use transfac::{TransfacFactorId, TransfacMatrixId};

//! NCBI datasource files.

pub mod gene2refseq;

pub use gene2refseq::{
    protein_accession_to_entrez_gene_map, protein_gi_to_entrez_gene_map, EntrezGene2RefseqRecord,
    Gene2RefseqReader, Strand, GENE2REFSEQ_SCHEMA,
};

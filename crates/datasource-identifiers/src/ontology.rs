//! Ontology and namespace IRIs used when serializing records.
//!
//! This is the constant table that binds record classes and record fields to
//! semantic terms. Record schemas in the file parser crate refer to these
//! constants rather than spelling IRIs inline.
//!
//! # Examples
//!
//! ```
//! use datasource_identifiers::ontology;
//!
//! assert_eq!(ontology::IAO_IS_ABOUT, "http://purl.obolibrary.org/obo/IAO_0000136");
//! assert!(ontology::gene2refseq::RECORD_CLASS.ends_with("EntrezGene2AccessionRecord"));
//! ```

// =============================================================================
// Core vocabularies
// =============================================================================

/// `rdf:type`.
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

/// IAO "is about" (information content entity to the entity it denotes).
pub const IAO_IS_ABOUT: &str = "http://purl.obolibrary.org/obo/IAO_0000136";

/// `xsd:string`.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// `xsd:integer`.
pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// Base namespace of the knowledge base.
pub const KABOB_NAMESPACE: &str = "http://kabob.ucdenver.edu/iao/";

// =============================================================================
// Entrez Gene gene2refseq
// =============================================================================

/// Terms for the Entrez Gene `gene2refseq` file.
pub mod gene2refseq {
    /// Namespace for gene2refseq record subjects.
    pub const NAMESPACE: &str = "http://www.ncbi.nlm.nih.gov/gene/";
    /// Prefix of the record subject local name.
    pub const RECORD_PREFIX: &str = "ENTREZ_GENE2ACCESSION_RECORD_";
    /// Record class.
    pub const RECORD_CLASS: &str = "http://www.ncbi.nlm.nih.gov/gene/EntrezGene2AccessionRecord";
    /// Link to the Entrez Gene ICE.
    pub const LINKED_TO_ENTREZ_GENE: &str = "http://www.informatics.jax.org/isLinkedToEntrezGeneICE";
    /// Link to the RNA nucleotide accession ICE.
    pub const LINKED_TO_RNA_ACCESSION: &str =
        "http://www.ncbi.nlm.nih.gov/gene/isLinkedToRnaNucleotideAccession";
    /// Link to the RNA nucleotide GI ICE.
    pub const LINKED_TO_RNA_GI: &str = "http://www.ncbi.nlm.nih.gov/gene/isLinkedToRnaNucleotideGi";
    /// Link to the protein accession ICE.
    pub const LINKED_TO_PROTEIN_ACCESSION: &str =
        "http://www.ncbi.nlm.nih.gov/gene/isLinkedToProteinAccession";
    /// Link to the protein GI ICE.
    pub const LINKED_TO_PROTEIN_GI: &str = "http://www.ncbi.nlm.nih.gov/gene/isLinkedToProteinGi";
    /// Link to the genomic nucleotide accession ICE.
    pub const LINKED_TO_GENOMIC_ACCESSION: &str =
        "http://www.ncbi.nlm.nih.gov/gene/isLinkedToGenomicNucleotideAccession";
    /// Link to the genomic nucleotide GI ICE.
    pub const LINKED_TO_GENOMIC_GI: &str =
        "http://www.ncbi.nlm.nih.gov/gene/isLinkedToGenomicNucleotideGi";
}

// =============================================================================
// TRANSFAC matrix.dat
// =============================================================================

/// Terms for the TRANSFAC `matrix.dat` file.
pub mod transfac {
    /// Record class.
    pub const MATRIX_RECORD_CLASS: &str = "http://kabob.ucdenver.edu/iao/transfac/TransfacMatrixIce1";
    /// Literal form of the matrix accession.
    pub const HAS_TRANSFAC_GENE_ID: &str = "http://kabob.ucdenver.edu/iao/transfac/hasTransfacGeneID";
    /// Link to a binding factor ICE.
    pub const LINKED_TO_BINDING_FACTOR: &str =
        "http://kabob.ucdenver.edu/iao/transfac/isLinkedToTransfacBindingFactorICE";
}

// =============================================================================
// iRefWeb PSI-MITAB
// =============================================================================

/// Terms for iRefWeb PSI-MITAB files.
pub mod irefweb {
    /// Namespace for interaction record subjects.
    pub const NAMESPACE: &str = "http://kabob.ucdenver.edu/iao/irefweb/";
    /// Prefix of the interaction record subject local name.
    pub const RECORD_PREFIX: &str = "IREFWEB_INTERACTION_RECORD_";
    /// Interaction record class.
    pub const INTERACTION_RECORD_CLASS: &str =
        "http://kabob.ucdenver.edu/iao/irefweb/IRefWebInteractionRecord";
    /// Interactor record class.
    pub const INTERACTOR_RECORD_CLASS: &str =
        "http://kabob.ucdenver.edu/iao/irefweb/IRefWebInteractorRecord";
    /// Interactor organism record class.
    pub const INTERACTOR_ORGANISM_RECORD_CLASS: &str =
        "http://kabob.ucdenver.edu/iao/irefweb/IRefWebInteractorOrganismRecord";
    /// Link to interactor A.
    pub const HAS_INTERACTOR_A: &str = "http://kabob.ucdenver.edu/iao/irefweb/hasInteractorA";
    /// Link to interactor B.
    pub const HAS_INTERACTOR_B: &str = "http://kabob.ucdenver.edu/iao/irefweb/hasInteractorB";
    /// Detection method term.
    pub const HAS_DETECTION_METHOD: &str = "http://kabob.ucdenver.edu/iao/irefweb/hasDetectionMethod";
    /// Supporting publication ICE.
    pub const HAS_PUBLICATION: &str = "http://kabob.ucdenver.edu/iao/irefweb/hasPublicationReference";
    /// Interaction type term.
    pub const HAS_INTERACTION_TYPE: &str = "http://kabob.ucdenver.edu/iao/irefweb/hasInteractionType";
    /// Source database term.
    pub const HAS_SOURCE_DATABASE: &str = "http://kabob.ucdenver.edu/iao/irefweb/hasSourceDatabase";
    /// Interaction identifier literal.
    pub const HAS_INTERACTION_IDENTIFIER: &str =
        "http://kabob.ucdenver.edu/iao/irefweb/hasInteractionIdentifier";
    /// Unique interactor identifier ICE.
    pub const HAS_UNIQUE_IDENTIFIER: &str = "http://kabob.ucdenver.edu/iao/irefweb/hasUniqueIdentifier";
    /// Alternative interactor identifier ICE.
    pub const HAS_ALTERNATIVE_IDENTIFIER: &str =
        "http://kabob.ucdenver.edu/iao/irefweb/hasAlternativeIdentifier";
    /// Link from interactor to its organism record.
    pub const HAS_ORGANISM: &str = "http://kabob.ucdenver.edu/iao/irefweb/hasOrganism";
    /// Organism taxonomy identifier ICE.
    pub const ORGANISM_TAXONOMY_ID: &str =
        "http://kabob.ucdenver.edu/iao/irefweb/IRefWebInteractorOrganismRecord___taxonomyIdentifierFieldValue";
    /// Organism taxonomy name literal.
    pub const ORGANISM_TAXONOMY_NAME: &str =
        "http://kabob.ucdenver.edu/iao/irefweb/IRefWebInteractorOrganismRecord___taxonomyNameFieldValue";
}

// =============================================================================
// Output stream provenance
// =============================================================================

/// Terms for the per-stream provenance ("meta") statements.
pub mod meta {
    /// Namespace for output stream subjects.
    pub const NAMESPACE: &str = "http://kabob.ucdenver.edu/iao/meta/";
    /// Class of an output stream.
    pub const OUTPUT_STREAM_CLASS: &str = "http://kabob.ucdenver.edu/iao/meta/RdfOutputStream";
    /// Source file the stream was generated from.
    pub const HAS_SOURCE_FILE: &str = "http://kabob.ucdenver.edu/iao/meta/hasSourceFile";
    /// Datasource label of the stream.
    pub const HAS_DATA_SOURCE: &str = "http://kabob.ucdenver.edu/iao/meta/hasDataSource";
    /// Record class serialized in the stream.
    pub const HAS_RECORD_CLASS: &str = "http://kabob.ucdenver.edu/iao/meta/hasRecordClass";
    /// Number of records serialized.
    pub const HAS_RECORD_COUNT: &str = "http://kabob.ucdenver.edu/iao/meta/hasRecordCount";
    /// Number of statements written.
    pub const HAS_STATEMENT_COUNT: &str = "http://kabob.ucdenver.edu/iao/meta/hasStatementCount";
}

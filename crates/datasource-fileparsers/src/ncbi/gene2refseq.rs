//! Entrez Gene `gene2refseq` file parser.
//!
//! Parses the tab-delimited `gene2refseq` file distributed by NCBI. Each line
//! links one Entrez Gene record to RNA, protein and genomic sequence
//! accessions and their GI numbers.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::path::Path;

use datasource_identifiers::{
    ontology::gene2refseq as terms, DataSource, DataSourceIdentifier, EntrezGeneId, GiNumberId,
    NcbiTaxonomyId, NucleotideAccession, RefSeqId,
};

use crate::grouping::group_by;
use crate::parser::{Columns, DelimitedReader, DelimitedRecord};
use crate::record::{FieldDescriptor, FieldValue, Record, RecordSchema, SubjectRule};
use crate::types::{CharacterEncoding, ParseResult, ParserConfig};

/// Expected columns in a gene2refseq file. Newer releases append
/// `mature_peptide_accession.version`, `mature_peptide_gi` and `Symbol`.
const GENE2REFSEQ_COLUMNS: &[&str] = &[
    "tax_id",
    "GeneID",
    "status",
    "RNA_nucleotide_accession.version",
    "RNA_nucleotide_gi",
    "protein_accession.version",
    "protein_gi",
    "genomic_nucleotide_accession.version",
    "genomic_nucleotide_gi",
    "start_position_on_the_genomic_accession",
    "end_position_on_the_genomic_accession",
    "orientation",
    "assembly",
];

const GENE2REFSEQ_OPTIONAL_COLUMNS: &[&str] =
    &["mature_peptide_accession.version", "mature_peptide_gi", "Symbol"];

const MATURE_PEPTIDE_ACCESSION: usize = 13;
const MATURE_PEPTIDE_GI: usize = 14;
const SYMBOL: usize = 15;

/// `-` marks a missing value in every column but `orientation`.
const SENTINELS: &[&str] = &["-"];

/// Strand of the genomic region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strand {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `?`
    Unknown,
}

impl Strand {
    /// Parses the orientation column.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Self::Plus),
            "-" => Some(Self::Minus),
            "?" => Some(Self::Unknown),
            _ => None,
        }
    }

    /// Symbol used in the file.
    pub fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Unknown => '?',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One line of the `gene2refseq` file.
///
/// Accession columns mix RefSeq and GenBank accessions, so they are kept as
/// [`NucleotideAccession`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntrezGene2RefseqRecord {
    /// Organism.
    pub taxon_id: NcbiTaxonomyId,
    /// Gene.
    pub gene_id: EntrezGeneId,
    /// RefSeq status (`PROVISIONAL`, `REVIEWED`, ...).
    pub status: Option<String>,
    /// RNA accession.
    pub rna_accession: Option<NucleotideAccession>,
    /// RNA GI.
    pub rna_gi: Option<GiNumberId>,
    /// Protein accession.
    pub protein_accession: Option<NucleotideAccession>,
    /// Protein GI.
    pub protein_gi: Option<GiNumberId>,
    /// Genomic accession.
    pub genomic_accession: Option<NucleotideAccession>,
    /// Genomic GI.
    pub genomic_gi: Option<GiNumberId>,
    /// Start of the gene on the genomic accession (0-based).
    pub start_position: Option<u64>,
    /// End of the gene on the genomic accession (0-based).
    pub end_position: Option<u64>,
    /// Strand.
    pub orientation: Strand,
    /// Assembly name.
    pub assembly: Option<String>,
    /// Mature peptide accession (newer releases only).
    pub mature_peptide_accession: Option<NucleotideAccession>,
    /// Mature peptide GI (newer releases only).
    pub mature_peptide_gi: Option<GiNumberId>,
    /// Gene symbol (newer releases only).
    pub symbol: Option<String>,
}

impl EntrezGene2RefseqRecord {
    /// RefSeq protein accession without its version, if the protein
    /// accession is a RefSeq one.
    pub fn unversioned_protein_refseq(&self) -> Option<RefSeqId> {
        self.protein_accession
            .as_ref()
            .and_then(NucleotideAccession::as_refseq)
            .map(RefSeqId::without_version)
    }
}

impl DelimitedRecord for EntrezGene2RefseqRecord {
    const COLUMNS: &'static [&'static str] = GENE2REFSEQ_COLUMNS;
    const OPTIONAL_COLUMNS: &'static [&'static str] = GENE2REFSEQ_OPTIONAL_COLUMNS;

    fn from_columns(columns: &Columns<'_>) -> ParseResult<Self> {
        let orientation = Strand::from_symbol(columns.raw(11))
            .ok_or_else(|| columns.invalid(11, "expected '+', '-' or '?'"))?;

        Ok(EntrezGene2RefseqRecord {
            taxon_id: columns.identifier(0)?,
            gene_id: columns.identifier(1)?,
            status: columns.optional_text(2, SENTINELS),
            rna_accession: columns.optional_identifier(3, SENTINELS)?,
            rna_gi: columns.optional_identifier(4, SENTINELS)?,
            protein_accession: columns.optional_identifier(5, SENTINELS)?,
            protein_gi: columns.optional_identifier(6, SENTINELS)?,
            genomic_accession: columns.optional_identifier(7, SENTINELS)?,
            genomic_gi: columns.optional_identifier(8, SENTINELS)?,
            start_position: columns.optional_integer(9, SENTINELS)?,
            end_position: columns.optional_integer(10, SENTINELS)?,
            orientation,
            assembly: columns.optional_text(12, SENTINELS),
            mature_peptide_accession: columns
                .optional_identifier(MATURE_PEPTIDE_ACCESSION, SENTINELS)?,
            mature_peptide_gi: columns.optional_identifier(MATURE_PEPTIDE_GI, SENTINELS)?,
            symbol: columns.optional_text(SYMBOL, SENTINELS),
        })
    }

    fn passes_filter(&self, config: &ParserConfig) -> bool {
        config.accepts_taxon(Some(&self.taxon_id))
    }
}

static GENE2REFSEQ_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::ice("gene_id", terms::LINKED_TO_ENTREZ_GENE, DataSource::EntrezGene),
    FieldDescriptor::ice("rna_accession", terms::LINKED_TO_RNA_ACCESSION, DataSource::RefSeq),
    FieldDescriptor::ice("rna_gi", terms::LINKED_TO_RNA_GI, DataSource::GenBank),
    FieldDescriptor::ice(
        "protein_accession",
        terms::LINKED_TO_PROTEIN_ACCESSION,
        DataSource::RefSeq,
    ),
    FieldDescriptor::ice("protein_gi", terms::LINKED_TO_PROTEIN_GI, DataSource::GenBank),
    FieldDescriptor::ice(
        "genomic_accession",
        terms::LINKED_TO_GENOMIC_ACCESSION,
        DataSource::RefSeq,
    ),
    FieldDescriptor::ice("genomic_gi", terms::LINKED_TO_GENOMIC_GI, DataSource::GenBank),
];

/// Schema of [`EntrezGene2RefseqRecord`].
pub static GENE2REFSEQ_SCHEMA: RecordSchema = RecordSchema {
    label: "gene2refseq",
    class: terms::RECORD_CLASS,
    data_source: DataSource::EntrezGene,
    subject: SubjectRule::RecordKey {
        namespace: terms::NAMESPACE,
        prefix: terms::RECORD_PREFIX,
    },
    fields: GENE2REFSEQ_FIELDS,
};

impl Record for EntrezGene2RefseqRecord {
    fn schema(&self) -> &'static RecordSchema {
        &GENE2REFSEQ_SCHEMA
    }

    fn subject_key(&self) -> Option<String> {
        Some(format!("{}{}", self.gene_id.ice_prefix(), self.gene_id))
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "gene_id" => FieldValue::identifier(Some(&self.gene_id)),
            "rna_accession" => FieldValue::identifier(self.rna_accession.as_ref()),
            "rna_gi" => FieldValue::identifier(self.rna_gi.as_ref()),
            "protein_accession" => FieldValue::identifier(self.protein_accession.as_ref()),
            "protein_gi" => FieldValue::identifier(self.protein_gi.as_ref()),
            "genomic_accession" => FieldValue::identifier(self.genomic_accession.as_ref()),
            "genomic_gi" => FieldValue::identifier(self.genomic_gi.as_ref()),
            _ => return None,
        })
    }
}

/// Reader over a `gene2refseq` file.
pub type Gene2RefseqReader = DelimitedReader<EntrezGene2RefseqRecord>;

fn grouping_config(encoding: CharacterEncoding, taxon: Option<NcbiTaxonomyId>) -> ParserConfig {
    ParserConfig {
        encoding,
        taxon_filter: taxon,
    }
}

/// Maps each protein GI to the genes it is linked to.
///
/// # Errors
/// Returns the first read or parse error.
pub fn protein_gi_to_entrez_gene_map<P: AsRef<Path>>(
    path: P,
    encoding: CharacterEncoding,
    taxon: Option<NcbiTaxonomyId>,
) -> ParseResult<HashMap<GiNumberId, HashSet<EntrezGeneId>>> {
    let reader = Gene2RefseqReader::open(path, grouping_config(encoding, taxon))?;
    group_by(reader, |record| record.protein_gi.map(|gi| (gi, record.gene_id)))
}

/// Maps each RefSeq protein accession (version stripped) to the genes it is
/// linked to. GenBank protein accessions are ignored.
///
/// # Errors
/// Returns the first read or parse error.
pub fn protein_accession_to_entrez_gene_map<P: AsRef<Path>>(
    path: P,
    encoding: CharacterEncoding,
    taxon: Option<NcbiTaxonomyId>,
) -> ParseResult<HashMap<RefSeqId, HashSet<EntrezGeneId>>> {
    let reader = Gene2RefseqReader::open(path, grouping_config(encoding, taxon))?;
    group_by(reader, |record| {
        record
            .unversioned_protein_refseq()
            .map(|accession| (accession, record.gene_id))
    })
}

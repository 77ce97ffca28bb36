//! Datasource provenance tags.
//!
//! Every identifier kind is bound to exactly one [`DataSource`]. The tag
//! supplies the namespaces used to build IRIs for the identifier itself
//! (its information content entity, or ICE) and for the external entity the
//! identifier denotes.

use std::fmt;

/// The datasource an identifier or record originates from.
///
/// # Examples
///
/// ```
/// use datasource_identifiers::DataSource;
///
/// let source = DataSource::from_label("EG");
/// assert_eq!(source, Some(DataSource::EntrezGene));
/// assert_eq!(DataSource::EntrezGene.ice_namespace(), "http://www.ncbi.nlm.nih.gov/gene/");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataSource {
    /// NCBI Taxonomy.
    NcbiTaxon,
    /// NCBI Entrez Gene.
    EntrezGene,
    /// NCBI GenBank (accessions and GI numbers).
    GenBank,
    /// NCBI RefSeq.
    RefSeq,
    /// TRANSFAC transcription factor database.
    Transfac,
    /// EchoBase (E. coli gene annotation).
    EchoBase,
    /// PubMed literature references.
    PubMed,
    /// iRefWeb / iRefIndex protein interactions.
    IRefWeb,
    /// The knowledge base itself (provenance records).
    Kabob,
}

impl DataSource {
    /// All datasource tags, in declaration order.
    pub const ALL: [DataSource; 9] = [
        Self::NcbiTaxon,
        Self::EntrezGene,
        Self::GenBank,
        Self::RefSeq,
        Self::Transfac,
        Self::EchoBase,
        Self::PubMed,
        Self::IRefWeb,
        Self::Kabob,
    ];

    /// Short label used in provenance statements.
    pub fn label(self) -> &'static str {
        match self {
            Self::NcbiTaxon => "NCBI_TAXON",
            Self::EntrezGene => "EG",
            Self::GenBank => "GENBANK",
            Self::RefSeq => "REFSEQ",
            Self::Transfac => "TRANSFAC",
            Self::EchoBase => "ECHOBASE",
            Self::PubMed => "PUBMED",
            Self::IRefWeb => "IREFWEB",
            Self::Kabob => "KABOB",
        }
    }

    /// Looks up a datasource by its label.
    ///
    /// Returns `None` if the label is not recognized.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|source| source.label() == label)
    }

    /// Namespace for identifier (ICE) IRIs minted for this datasource.
    pub fn ice_namespace(self) -> &'static str {
        match self {
            Self::NcbiTaxon => "http://www.ncbi.nlm.nih.gov/taxonomy/",
            Self::EntrezGene => "http://www.ncbi.nlm.nih.gov/gene/",
            Self::GenBank => "http://www.ncbi.nlm.nih.gov/genbank/",
            Self::RefSeq => "http://www.ncbi.nlm.nih.gov/refseq/",
            Self::Transfac => "http://kabob.ucdenver.edu/iao/transfac/",
            Self::EchoBase => "http://kabob.ucdenver.edu/iao/echobase/",
            Self::PubMed => "http://kabob.ucdenver.edu/iao/pubmed/",
            Self::IRefWeb => "http://kabob.ucdenver.edu/iao/irefweb/",
            Self::Kabob => "http://kabob.ucdenver.edu/iao/",
        }
    }

    /// Namespace of the external entities this datasource's identifiers denote.
    pub fn entity_namespace(self) -> &'static str {
        match self {
            Self::NcbiTaxon => "http://purl.obolibrary.org/obo/NCBITaxon_",
            Self::EntrezGene => "http://www.ncbi.nlm.nih.gov/gene/",
            Self::GenBank | Self::RefSeq => "http://www.ncbi.nlm.nih.gov/nuccore/",
            Self::Transfac => "http://www.gene-regulation.com/transfac/",
            Self::EchoBase => "http://www.york.ac.uk/res/thomas/Gene.cfm?recordID=",
            Self::PubMed => "http://www.ncbi.nlm.nih.gov/pubmed/",
            Self::IRefWeb => "http://irefindex.org/",
            Self::Kabob => "http://kabob.ucdenver.edu/",
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_roundtrip() {
        for source in DataSource::ALL {
            assert_eq!(DataSource::from_label(source.label()), Some(source));
        }
        assert_eq!(DataSource::from_label("UNKNOWN"), None);
    }

    #[test]
    fn test_namespaces_end_with_separator() {
        for source in DataSource::ALL {
            let ns = source.ice_namespace();
            assert!(ns.ends_with('/'), "{ns}");
        }
    }

    #[test]
    fn test_refseq_and_genbank_share_entity_namespace() {
        assert_eq!(
            DataSource::RefSeq.entity_namespace(),
            DataSource::GenBank.entity_namespace()
        );
        assert_ne!(
            DataSource::RefSeq.ice_namespace(),
            DataSource::GenBank.ice_namespace()
        );
    }
}

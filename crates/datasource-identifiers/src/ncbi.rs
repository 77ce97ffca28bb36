//! NCBI identifier kinds: taxonomy, Entrez Gene, GI numbers and sequence
//! accessions.

use std::fmt;

use crate::{DataSource, DataSourceIdentifier, IdentifierError, IdentifierResult};

integer_identifier!(
    /// An NCBI Taxonomy identifier, e.g. `10090` (Mus musculus).
    NcbiTaxonomyId,
    DataSource::NcbiTaxon,
    "NCBITaxon_"
);

integer_identifier!(
    /// An Entrez Gene identifier, e.g. `16822`.
    EntrezGeneId,
    DataSource::EntrezGene,
    "EG_"
);

integer_identifier!(
    /// A GenBank GI number, e.g. `118130099`.
    GiNumberId,
    DataSource::GenBank,
    "GI_"
);

string_identifier!(
    /// A RefSeq accession, optionally versioned, e.g. `NM_010696.3`.
    ///
    /// RefSeq accessions are two upper case letters, an underscore and an
    /// alphanumeric body, optionally followed by `.<version>`.
    RefSeqId,
    DataSource::RefSeq,
    "",
    is_refseq_accession
);

string_identifier!(
    /// A GenBank/INSDC accession, optionally versioned, e.g. `AC108484.25`.
    GenBankId,
    DataSource::GenBank,
    ""
);

impl RefSeqId {
    /// Returns the accession with any `.version` suffix removed.
    ///
    /// ```
    /// use datasource_identifiers::RefSeqId;
    ///
    /// let id = RefSeqId::new("NP_034826.2").unwrap();
    /// assert_eq!(id.without_version(), RefSeqId::new("NP_034826").unwrap());
    /// ```
    pub fn without_version(&self) -> RefSeqId {
        match self.0.split_once('.') {
            Some((base, _)) => RefSeqId(base.to_string()),
            None => self.clone(),
        }
    }

    /// Returns the version number, if the accession is versioned.
    pub fn version(&self) -> Option<u32> {
        self.0
            .split_once('.')
            .and_then(|(_, version)| version.parse().ok())
    }

    /// Returns true for protein accessions (`NP_`, `XP_`, `YP_`, `WP_`, `AP_`).
    pub fn is_protein(&self) -> bool {
        matches!(&self.0[..3], "NP_" | "XP_" | "YP_" | "WP_" | "AP_")
    }
}

/// Returns true if `value` has the RefSeq accession form.
pub fn is_refseq_accession(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() < 4 || bytes[2] != b'_' {
        return false;
    }
    if !bytes[..2].iter().all(u8::is_ascii_uppercase) {
        return false;
    }
    let (body, version) = match value[3..].split_once('.') {
        Some((body, version)) => (body, Some(version)),
        None => (&value[3..], None),
    };
    if body.is_empty() || !body.bytes().all(|b| b.is_ascii_alphanumeric()) {
        return false;
    }
    match version {
        Some(v) => !v.is_empty() && v.bytes().all(|b| b.is_ascii_digit()),
        None => true,
    }
}

/// A nucleotide or protein accession from a column that mixes RefSeq and
/// GenBank accessions.
///
/// # Examples
///
/// ```
/// use datasource_identifiers::{DataSource, DataSourceIdentifier, NucleotideAccession};
///
/// let refseq = NucleotideAccession::parse("AC_000033.1").unwrap();
/// assert_eq!(refseq.data_source(), DataSource::RefSeq);
///
/// let genbank = NucleotideAccession::parse("AC108484.25").unwrap();
/// assert_eq!(genbank.data_source(), DataSource::GenBank);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NucleotideAccession {
    /// A RefSeq accession.
    RefSeq(RefSeqId),
    /// A GenBank accession.
    GenBank(GenBankId),
}

impl NucleotideAccession {
    /// Classifies and validates an accession token.
    pub fn parse(value: &str) -> IdentifierResult<Self> {
        if is_refseq_accession(value) {
            RefSeqId::new(value).map(Self::RefSeq)
        } else {
            GenBankId::new(value).map(Self::GenBank)
        }
    }

    /// Returns the RefSeq accession, if this is one.
    pub fn as_refseq(&self) -> Option<&RefSeqId> {
        match self {
            Self::RefSeq(id) => Some(id),
            Self::GenBank(_) => None,
        }
    }

    fn inner(&self) -> &dyn DataSourceIdentifier {
        match self {
            Self::RefSeq(id) => id,
            Self::GenBank(id) => id,
        }
    }
}

impl std::str::FromStr for NucleotideAccession {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for NucleotideAccession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.inner(), f)
    }
}

impl DataSourceIdentifier for NucleotideAccession {
    fn data_source(&self) -> DataSource {
        self.inner().data_source()
    }

    fn raw_value(&self) -> String {
        self.inner().raw_value()
    }

    fn ice_prefix(&self) -> &'static str {
        self.inner().ice_prefix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IdentifierError;

    #[test]
    fn test_numeric_kinds() {
        let taxon: NcbiTaxonomyId = "10090".parse().unwrap();
        assert_eq!(taxon, NcbiTaxonomyId::new(10090));
        assert_eq!(taxon.value(), 10090);
        assert_eq!(taxon.to_string(), "10090");
        assert_eq!(
            taxon.entity_iri(),
            "http://purl.obolibrary.org/obo/NCBITaxon_10090"
        );

        let gi: GiNumberId = "118130099".parse().unwrap();
        assert_eq!(
            gi.ice_iri(),
            "http://www.ncbi.nlm.nih.gov/genbank/GI_118130099_ICE"
        );

        assert!(matches!(
            "16822a".parse::<EntrezGeneId>(),
            Err(IdentifierError::NotNumeric { kind: "EntrezGeneId", .. })
        ));
        assert_eq!(
            "".parse::<GiNumberId>(),
            Err(IdentifierError::Empty { kind: "GiNumberId" })
        );
    }

    #[test]
    fn test_refseq_accession_form() {
        assert!(is_refseq_accession("NM_010696.3"));
        assert!(is_refseq_accession("NP_034826"));
        assert!(is_refseq_accession("NZ_ABCD01000001.1"));
        assert!(!is_refseq_accession("AC108484.25"));
        assert!(!is_refseq_accession("AAC40064.1"));
        assert!(!is_refseq_accession("nm_010696"));
        assert!(!is_refseq_accession("NM_"));
        assert!(!is_refseq_accession("NM_010696."));
    }

    #[test]
    fn test_refseq_rejects_genbank_accession() {
        assert!(matches!(
            RefSeqId::new("AAC40064.1"),
            Err(IdentifierError::Malformed { kind: "RefSeqId", .. })
        ));
    }

    #[test]
    fn test_refseq_version_handling() {
        let id = RefSeqId::new("NM_010696.3").unwrap();
        assert_eq!(id.version(), Some(3));
        assert_eq!(id.without_version().as_str(), "NM_010696");
        assert!(!id.is_protein());
        assert!(RefSeqId::new("NP_034826.2").unwrap().is_protein());
        assert_eq!(
            id.ice_iri(),
            "http://www.ncbi.nlm.nih.gov/refseq/NM_010696.3_ICE"
        );
    }

    #[test]
    fn test_nucleotide_accession_classification() {
        let acc = NucleotideAccession::parse("AF024524.1").unwrap();
        assert!(acc.as_refseq().is_none());
        assert_eq!(
            acc.ice_iri(),
            "http://www.ncbi.nlm.nih.gov/genbank/AF024524.1_ICE"
        );

        let acc = NucleotideAccession::parse("NP_034826.2").unwrap();
        assert_eq!(acc.as_refseq().map(RefSeqId::as_str), Some("NP_034826.2"));
        assert_eq!(acc.to_string(), "NP_034826.2");

        assert!(NucleotideAccession::parse("").is_err());
    }

    #[test]
    fn test_equality_is_by_kind_and_value() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(EntrezGeneId::new(16825));
        set.insert(EntrezGeneId::new(16825));
        set.insert(EntrezGeneId::new(16822));
        assert_eq!(set.len(), 2);
    }
}

//! Identifier kinds for smaller datasources.

use crate::DataSource;

string_identifier!(
    /// An EchoBase gene identifier, e.g. `EB0001`.
    EchoBaseId,
    DataSource::EchoBase,
    "ECHOBASE_"
);

integer_identifier!(
    /// A PubMed identifier.
    PubMedId,
    DataSource::PubMed,
    "PMID_"
);

string_identifier!(
    /// An iRefWeb interactor identifier in `database:accession` form,
    /// e.g. `uniprotkb:P12345`.
    IRefWebInteractorId,
    DataSource::IRefWeb,
    "IREFWEB_",
    |value: &str| matches!(value.split_once(':'), Some((db, acc)) if !db.is_empty() && !acc.is_empty())
);

impl IRefWebInteractorId {
    /// The database part of the identifier (`uniprotkb`).
    pub fn database(&self) -> &str {
        self.0.split_once(':').map_or("", |(db, _)| db)
    }

    /// The accession part of the identifier (`P12345`).
    pub fn accession(&self) -> &str {
        self.0.split_once(':').map_or("", |(_, acc)| acc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataSourceIdentifier, IdentifierError};

    #[test]
    fn test_echobase_id() {
        let id = EchoBaseId::new("EB0001").unwrap();
        assert_eq!(id.data_source(), DataSource::EchoBase);
        assert_eq!(
            id.ice_iri(),
            "http://kabob.ucdenver.edu/iao/echobase/ECHOBASE_EB0001_ICE"
        );
        assert_eq!(EchoBaseId::new(""), Err(IdentifierError::Empty { kind: "EchoBaseId" }));
    }

    #[test]
    fn test_pubmed_id() {
        let id: PubMedId = "9804419".parse().unwrap();
        assert_eq!(id.ice_local_name(), "PMID_9804419_ICE");
        assert_eq!(id.entity_iri(), "http://www.ncbi.nlm.nih.gov/pubmed/9804419");
    }

    #[test]
    fn test_irefweb_interactor_id() {
        let id = IRefWebInteractorId::new("uniprotkb:P12345").unwrap();
        assert_eq!(id.database(), "uniprotkb");
        assert_eq!(id.accession(), "P12345");
        assert!(IRefWebInteractorId::new("P12345").is_err());
        assert!(IRefWebInteractorId::new("uniprotkb:").is_err());
    }
}

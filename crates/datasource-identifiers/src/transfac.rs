//! TRANSFAC identifier kinds.

use crate::DataSource;

string_identifier!(
    /// A TRANSFAC matrix accession, e.g. `M00001`.
    TransfacMatrixId,
    DataSource::Transfac,
    "",
    |value: &str| value.starts_with('M')
);

string_identifier!(
    /// A TRANSFAC factor accession, e.g. `T00526`.
    TransfacFactorId,
    DataSource::Transfac,
    "",
    |value: &str| value.starts_with('T')
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DataSourceIdentifier, IdentifierError};

    #[test]
    fn test_matrix_id_iris() {
        let id = TransfacMatrixId::new("M00001").unwrap();
        assert_eq!(
            id.ice_iri(),
            "http://kabob.ucdenver.edu/iao/transfac/M00001_ICE"
        );
        assert_eq!(
            id.entity_iri(),
            "http://www.gene-regulation.com/transfac/M00001"
        );
    }

    #[test]
    fn test_prefix_checks() {
        assert!(TransfacFactorId::new("T00526").is_ok());
        assert!(matches!(
            TransfacFactorId::new("M00001"),
            Err(IdentifierError::Malformed { .. })
        ));
        assert!(matches!(
            TransfacMatrixId::new(""),
            Err(IdentifierError::Empty { .. })
        ));
    }
}

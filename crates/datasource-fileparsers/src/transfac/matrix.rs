//! TRANSFAC `matrix.dat` file parser.
//!
//! Each matrix entry is a block of tagged lines terminated by `//`:
//!
//! ```text
//! AC  M00001
//! XX
//! ID  V$MYOD_01
//! XX
//! DE  myoblast determination gene product
//! XX
//! BF  T00526; MyoD; Species: mouse, Mus musculus.
//! XX
//! P0      A      C      G      T
//! 01      1      2      2      0      S
//! //
//! ```
//!
//! Count rows and the other tags are skipped.

use std::collections::BTreeSet;

use datasource_identifiers::{
    ontology::{self, transfac as terms},
    DataSource, DataSourceIdentifier, TransfacFactorId, TransfacMatrixId,
};

use crate::block::{Block, BlockReader, BlockRecord};
use crate::record::{FieldDescriptor, FieldValue, Record, RecordSchema, SubjectRule};
use crate::types::{ParseError, ParseResult};

const ACCESSION_TAG: &str = "AC";
const NAME_TAG: &str = "ID";
const DESCRIPTION_TAG: &str = "DE";
const BINDING_FACTOR_TAG: &str = "BF";

/// One matrix entry of `matrix.dat`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransfacMatrixRecord {
    /// Matrix accession (`M00001`).
    pub matrix_id: TransfacMatrixId,
    /// Matrix name (`V$MYOD_01`).
    pub name: Option<String>,
    /// Description.
    pub description: Option<String>,
    /// Factors binding this matrix, sorted.
    pub binding_factor_ids: BTreeSet<TransfacFactorId>,
}

impl BlockRecord for TransfacMatrixRecord {
    const KEY_TAG: &'static str = ACCESSION_TAG;

    fn from_block(block: &Block) -> ParseResult<Self> {
        let accession = block
            .first(ACCESSION_TAG)
            .ok_or_else(|| block.malformed("missing AC line"))?;
        let matrix_id = accession
            .value
            .parse()
            .map_err(|source| ParseError::Identifier {
                line: accession.line,
                column: ACCESSION_TAG,
                source,
            })?;

        let mut binding_factor_ids = BTreeSet::new();
        for line in block.lines_with(BINDING_FACTOR_TAG) {
            // T00526; MyoD; Species: mouse, Mus musculus.
            let token = line.value.split(';').next().unwrap_or("").trim();
            let factor = token.parse().map_err(|source| ParseError::Identifier {
                line: line.line,
                column: BINDING_FACTOR_TAG,
                source,
            })?;
            binding_factor_ids.insert(factor);
        }

        Ok(TransfacMatrixRecord {
            matrix_id,
            name: block.first(NAME_TAG).map(|l| l.value.clone()),
            description: block.joined(DESCRIPTION_TAG),
            binding_factor_ids,
        })
    }
}

static MATRIX_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::literal("matrix_accession", terms::HAS_TRANSFAC_GENE_ID, DataSource::Transfac)
        .with_language("en"),
    FieldDescriptor::entity("matrix_id", ontology::IAO_IS_ABOUT, DataSource::Transfac),
    FieldDescriptor::ice(
        "binding_factor_ids",
        terms::LINKED_TO_BINDING_FACTOR,
        DataSource::Transfac,
    )
    .many(),
];

/// Schema of [`TransfacMatrixRecord`].
pub static MATRIX_SCHEMA: RecordSchema = RecordSchema {
    label: "transfac-matrix",
    class: terms::MATRIX_RECORD_CLASS,
    data_source: DataSource::Transfac,
    subject: SubjectRule::PrimaryIce,
    fields: MATRIX_FIELDS,
};

impl Record for TransfacMatrixRecord {
    fn schema(&self) -> &'static RecordSchema {
        &MATRIX_SCHEMA
    }

    fn primary_identifier(&self) -> Option<&dyn DataSourceIdentifier> {
        Some(&self.matrix_id)
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "matrix_accession" | "matrix_id" => FieldValue::identifier(Some(&self.matrix_id)),
            "binding_factor_ids" => FieldValue::identifiers(&self.binding_factor_ids),
            _ => return None,
        })
    }
}

/// Reader over a `matrix.dat` file.
pub type TransfacMatrixReader = BlockReader<TransfacMatrixRecord>;

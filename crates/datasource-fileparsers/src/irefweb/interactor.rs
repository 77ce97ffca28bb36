//! Interactor and interactor-organism records nested in an iRefWeb
//! interaction.

use std::collections::BTreeSet;

use datasource_identifiers::{
    ontology::irefweb as terms, DataSource, IRefWebInteractorId, NcbiTaxonomyId,
};

use crate::record::{FieldDescriptor, FieldValue, Record, RecordSchema, SubjectRule};

const TAXID_PREFIX: &str = "taxid:";

/// Organism of an interactor, from a MITAB taxonomy column such as
/// `taxid:10090(Mus musculus)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IRefWebInteractorOrganism {
    /// NCBI taxonomy identifier. iRefWeb uses negative ids for
    /// pseudo-organisms (`taxid:-1(in vitro)`); those have no identifier.
    pub taxonomy_id: Option<NcbiTaxonomyId>,
    /// Organism name.
    pub taxonomy_name: Option<String>,
}

impl IRefWebInteractorOrganism {
    /// Parses a `taxid:<id>(<name>)` token.
    ///
    /// # Errors
    /// Returns a reason if the token is not in that form.
    pub fn parse(token: &str) -> Result<Self, &'static str> {
        let rest = token
            .strip_prefix(TAXID_PREFIX)
            .ok_or("expected 'taxid:<id>(<name>)'")?;

        let (id, name) = match rest.split_once('(') {
            Some((id, name)) => {
                let name = name
                    .strip_suffix(')')
                    .ok_or("unterminated organism name")?;
                (id, Some(name))
            }
            None => (rest, None),
        };

        let taxonomy_id = match id.strip_prefix('-') {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                None
            }
            Some(_) => return Err("expected a numeric taxonomy id"),
            None => Some(
                id.parse::<NcbiTaxonomyId>()
                    .map_err(|_| "expected a numeric taxonomy id")?,
            ),
        };

        Ok(IRefWebInteractorOrganism {
            taxonomy_id,
            taxonomy_name: name.filter(|n| !n.is_empty()).map(str::to_string),
        })
    }
}

static ORGANISM_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::ice("taxonomy_id", terms::ORGANISM_TAXONOMY_ID, DataSource::NcbiTaxon),
    FieldDescriptor::literal("taxonomy_name", terms::ORGANISM_TAXONOMY_NAME, DataSource::IRefWeb)
        .with_language("en"),
];

/// Schema of [`IRefWebInteractorOrganism`].
pub static ORGANISM_SCHEMA: RecordSchema = RecordSchema {
    label: "organism",
    class: terms::INTERACTOR_ORGANISM_RECORD_CLASS,
    data_source: DataSource::IRefWeb,
    subject: SubjectRule::Nested,
    fields: ORGANISM_FIELDS,
};

impl Record for IRefWebInteractorOrganism {
    fn schema(&self) -> &'static RecordSchema {
        &ORGANISM_SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "taxonomy_id" => FieldValue::identifier(self.taxonomy_id.as_ref()),
            "taxonomy_name" => FieldValue::text(self.taxonomy_name.as_deref()),
            _ => return None,
        })
    }
}

/// One side of an interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IRefWebInteractor {
    /// Unique identifier (`uniprotkb:P12345`).
    pub unique_id: IRefWebInteractorId,
    /// Alternative identifiers.
    pub alternative_ids: BTreeSet<IRefWebInteractorId>,
    /// Aliases (not serialized).
    pub aliases: BTreeSet<String>,
    /// Organism.
    pub organism: Option<IRefWebInteractorOrganism>,
}

impl IRefWebInteractor {
    /// Taxonomy id of the interactor's organism, if known.
    pub fn taxonomy_id(&self) -> Option<&NcbiTaxonomyId> {
        self.organism.as_ref().and_then(|o| o.taxonomy_id.as_ref())
    }
}

static INTERACTOR_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::ice("unique_id", terms::HAS_UNIQUE_IDENTIFIER, DataSource::IRefWeb),
    FieldDescriptor::ice(
        "alternative_ids",
        terms::HAS_ALTERNATIVE_IDENTIFIER,
        DataSource::IRefWeb,
    )
    .many(),
    FieldDescriptor::nested("organism", terms::HAS_ORGANISM, DataSource::IRefWeb),
];

/// Schema of [`IRefWebInteractor`].
pub static INTERACTOR_SCHEMA: RecordSchema = RecordSchema {
    label: "interactor",
    class: terms::INTERACTOR_RECORD_CLASS,
    data_source: DataSource::IRefWeb,
    subject: SubjectRule::Nested,
    fields: INTERACTOR_FIELDS,
};

impl Record for IRefWebInteractor {
    fn schema(&self) -> &'static RecordSchema {
        &INTERACTOR_SCHEMA
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "unique_id" => FieldValue::identifier(Some(&self.unique_id)),
            "alternative_ids" => FieldValue::identifiers(&self.alternative_ids),
            "organism" => FieldValue::record(self.organism.as_ref()),
            _ => return None,
        })
    }
}

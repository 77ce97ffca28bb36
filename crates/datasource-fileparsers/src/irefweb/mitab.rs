//! iRefWeb PSI-MITAB interaction file parser.
//!
//! Reads the first 15 (MITAB 2.5) columns of the tab-delimited iRefWeb
//! export. Multi-valued columns are `|` separated and `-` marks an empty
//! column. Later columns (iRefIndex extensions) are tolerated and ignored.

use std::collections::BTreeSet;

use datasource_identifiers::{
    ontology::irefweb as terms, DataSource, IRefWebInteractorId, PubMedId,
};

use super::interactor::{IRefWebInteractor, IRefWebInteractorOrganism};
use crate::parser::{parse, Columns, DelimitedReader, DelimitedRecord};
use crate::record::{FieldDescriptor, FieldValue, Record, RecordSchema, SubjectRule};
use crate::types::{ParseResult, ParserConfig};

/// Expected columns in a MITAB 2.5 file.
const MITAB_COLUMNS: &[&str] = &[
    "uidA",
    "uidB",
    "altA",
    "altB",
    "aliasA",
    "aliasB",
    "method",
    "author",
    "pmids",
    "taxa",
    "taxb",
    "interactionType",
    "sourcedb",
    "interactionIdentifier",
    "confidence",
];

const SENTINELS: &[&str] = &["-"];
const SEPARATOR: char = '|';
const PUBMED_PREFIX: &str = "pubmed:";
const IRIGID_PREFIX: &str = "irigid:";

/// One interaction line of an iRefWeb MITAB file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IRefWebInteractionRecord {
    /// Interactor A.
    pub interactor_a: IRefWebInteractor,
    /// Interactor B.
    pub interactor_b: IRefWebInteractor,
    /// Detection methods (`psi-mi:"MI:0018"(two hybrid)`).
    pub detection_methods: BTreeSet<String>,
    /// Authors (not serialized).
    pub authors: BTreeSet<String>,
    /// Supporting publications.
    pub publications: BTreeSet<PubMedId>,
    /// Interaction types.
    pub interaction_types: BTreeSet<String>,
    /// Source databases.
    pub source_databases: BTreeSet<String>,
    /// Interaction identifiers (`rigid:...`, `irigid:...`, ...).
    pub interaction_ids: BTreeSet<String>,
    /// Confidence scores (not serialized).
    pub confidence: BTreeSet<String>,
}

impl IRefWebInteractionRecord {
    /// Key of the interaction: the `irigid:` identifier, else the first
    /// interaction identifier, else the two interactor ids joined by `_`.
    ///
    /// Components are percent-encoded (only ASCII alphanumerics kept), so
    /// distinct identifiers never share a key.
    pub fn interaction_key(&self) -> String {
        if let Some(irigid) = self
            .interaction_ids
            .iter()
            .find_map(|id| id.strip_prefix(IRIGID_PREFIX))
        {
            return encode_key(irigid);
        }
        match self.interaction_ids.iter().next() {
            Some(id) => encode_key(id),
            None => format!(
                "{}_{}",
                encode_key(self.interactor_a.unique_id.as_str()),
                encode_key(self.interactor_b.unique_id.as_str())
            ),
        }
    }
}

fn encode_key(value: &str) -> String {
    let mut key = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() {
            key.push(char::from(byte));
        } else {
            key.push_str(&format!("%{byte:02X}"));
        }
    }
    key
}

fn text_set(columns: &Columns<'_>, index: usize) -> BTreeSet<String> {
    parse::split_values(columns.raw(index), SEPARATOR, SENTINELS)
        .map(str::to_string)
        .collect()
}

fn interactor(
    columns: &Columns<'_>,
    uid: usize,
    alt: usize,
    alias: usize,
    taxon: usize,
) -> ParseResult<IRefWebInteractor> {
    let unique_id = columns.identifier(uid)?;

    let alternative_ids = parse::split_values(columns.raw(alt), SEPARATOR, SENTINELS)
        .map(|token| {
            token
                .parse::<IRefWebInteractorId>()
                .map_err(|source| columns.identifier_error(alt, source))
        })
        .collect::<ParseResult<BTreeSet<_>>>()?;

    // Only the first organism of a multi-valued column is kept
    let organism = parse::split_values(columns.raw(taxon), SEPARATOR, SENTINELS)
        .next()
        .map(|token| {
            IRefWebInteractorOrganism::parse(token).map_err(|reason| columns.invalid(taxon, reason))
        })
        .transpose()?;

    Ok(IRefWebInteractor {
        unique_id,
        alternative_ids,
        aliases: text_set(columns, alias),
        organism,
    })
}

impl DelimitedRecord for IRefWebInteractionRecord {
    const COLUMNS: &'static [&'static str] = MITAB_COLUMNS;

    fn from_columns(columns: &Columns<'_>) -> ParseResult<Self> {
        let publications = parse::split_values(columns.raw(8), SEPARATOR, SENTINELS)
            .filter_map(|token| token.strip_prefix(PUBMED_PREFIX))
            .map(|pmid| {
                pmid.parse::<PubMedId>()
                    .map_err(|source| columns.identifier_error(8, source))
            })
            .collect::<ParseResult<BTreeSet<_>>>()?;

        Ok(IRefWebInteractionRecord {
            interactor_a: interactor(columns, 0, 2, 4, 9)?,
            interactor_b: interactor(columns, 1, 3, 5, 10)?,
            detection_methods: text_set(columns, 6),
            authors: text_set(columns, 7),
            publications,
            interaction_types: text_set(columns, 11),
            source_databases: text_set(columns, 12),
            interaction_ids: text_set(columns, 13),
            confidence: text_set(columns, 14),
        })
    }

    /// An interaction passes a taxon filter if either interactor belongs to
    /// the organism.
    fn passes_filter(&self, config: &ParserConfig) -> bool {
        config.taxon_filter.is_none()
            || config.accepts_taxon(self.interactor_a.taxonomy_id())
            || config.accepts_taxon(self.interactor_b.taxonomy_id())
    }
}

static INTERACTION_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor::nested("interactor_a", terms::HAS_INTERACTOR_A, DataSource::IRefWeb),
    FieldDescriptor::nested("interactor_b", terms::HAS_INTERACTOR_B, DataSource::IRefWeb),
    FieldDescriptor::literal("detection_methods", terms::HAS_DETECTION_METHOD, DataSource::IRefWeb)
        .many(),
    FieldDescriptor::ice("publications", terms::HAS_PUBLICATION, DataSource::PubMed).many(),
    FieldDescriptor::literal("interaction_types", terms::HAS_INTERACTION_TYPE, DataSource::IRefWeb)
        .many(),
    FieldDescriptor::literal("source_databases", terms::HAS_SOURCE_DATABASE, DataSource::IRefWeb)
        .many(),
    FieldDescriptor::literal(
        "interaction_ids",
        terms::HAS_INTERACTION_IDENTIFIER,
        DataSource::IRefWeb,
    )
    .many(),
];

/// Schema of [`IRefWebInteractionRecord`].
pub static INTERACTION_SCHEMA: RecordSchema = RecordSchema {
    label: "irefweb-interaction",
    class: terms::INTERACTION_RECORD_CLASS,
    data_source: DataSource::IRefWeb,
    subject: SubjectRule::RecordKey {
        namespace: terms::NAMESPACE,
        prefix: terms::RECORD_PREFIX,
    },
    fields: INTERACTION_FIELDS,
};

impl Record for IRefWebInteractionRecord {
    fn schema(&self) -> &'static RecordSchema {
        &INTERACTION_SCHEMA
    }

    fn subject_key(&self) -> Option<String> {
        Some(self.interaction_key())
    }

    fn field(&self, name: &str) -> Option<FieldValue<'_>> {
        Some(match name {
            "interactor_a" => FieldValue::record(Some(&self.interactor_a)),
            "interactor_b" => FieldValue::record(Some(&self.interactor_b)),
            "detection_methods" => FieldValue::texts(&self.detection_methods),
            "publications" => FieldValue::identifiers(&self.publications),
            "interaction_types" => FieldValue::texts(&self.interaction_types),
            "source_databases" => FieldValue::texts(&self.source_databases),
            "interaction_ids" => FieldValue::texts(&self.interaction_ids),
            _ => return None,
        })
    }
}

/// Reader over an iRefWeb MITAB file.
pub type IRefWebMitabReader = DelimitedReader<IRefWebInteractionRecord>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::emit_all;
    use crate::types::ParseError;
    use csv::StringRecord;
    use datasource_identifiers::NcbiTaxonomyId;

    const LINE: &str = "uniprotkb:P10085\tuniprotkb:Q60954\tentrezgene/locuslink:17927|refseq:NP_034996\tentrezgene/locuslink:17252\tuniprotkb:MYOD1_MOUSE\t-\tpsi-mi:\"MI:0018\"(two hybrid)\tLemercier et al. (2000)\tpubmed:10938121|pubmed:10938121\ttaxid:10090(Mus musculus)\ttaxid:10090(Mus musculus)\tpsi-mi:\"MI:0915\"(physical association)\tMI:0469(intact)\trigid:3jr1Ei3fsAeSBHZ5DQV7ThhV2Ww|edgetype:X|irigid:1186512\thpr:3|lpr:3|np:1\textra";

    fn parse_line(line: &str) -> ParseResult<IRefWebInteractionRecord> {
        let record = StringRecord::from(line.split('\t').collect::<Vec<_>>());
        IRefWebInteractionRecord::from_columns(&Columns::new(&record, MITAB_COLUMNS, 1))
    }

    #[test]
    fn test_parse_interaction() {
        let record = parse_line(LINE).unwrap();
        assert_eq!(record.interactor_a.unique_id.as_str(), "uniprotkb:P10085");
        assert_eq!(record.interactor_a.alternative_ids.len(), 2);
        assert!(record.interactor_b.aliases.is_empty());
        assert_eq!(
            record.interactor_a.taxonomy_id(),
            Some(&NcbiTaxonomyId::new(10090))
        );
        // Duplicate pmids collapse
        assert_eq!(record.publications.len(), 1);
        assert_eq!(record.interaction_ids.len(), 3);
        assert_eq!(record.interaction_key(), "1186512");
    }

    #[test]
    fn test_interaction_key_fallback() {
        let line = LINE.replace("|irigid:1186512", "");
        let record = parse_line(&line).unwrap();
        assert_eq!(record.interaction_key(), "edgetype%3AX");
    }

    #[test]
    fn test_interaction_key_keeps_identifiers_apart() {
        let without_irigid = LINE.replace("|irigid:1186512", "");
        let dotted = parse_line(&without_irigid.replace("edgetype:X", "a.b")).unwrap();
        let underscored = parse_line(&without_irigid.replace("edgetype:X", "a_b")).unwrap();
        assert_eq!(dotted.interaction_key(), "a%2Eb");
        assert_eq!(underscored.interaction_key(), "a%5Fb");
    }

    #[test]
    fn test_interaction_without_identifiers_keyed_by_interactors() {
        let line = LINE.replace(
            "rigid:3jr1Ei3fsAeSBHZ5DQV7ThhV2Ww|edgetype:X|irigid:1186512",
            "-",
        );
        let record = parse_line(&line).unwrap();
        assert!(record.interaction_ids.is_empty());
        assert_eq!(
            record.interaction_key(),
            "uniprotkb%3AP10085_uniprotkb%3AQ60954"
        );

        let statements = emit_all(&record).unwrap();
        assert_eq!(
            statements[0].subject,
            "http://kabob.ucdenver.edu/iao/irefweb/IREFWEB_INTERACTION_RECORD_uniprotkb%3AP10085_uniprotkb%3AQ60954"
        );
    }

    #[test]
    fn test_invalid_taxonomy_column() {
        let line = LINE.replacen("taxid:10090(Mus musculus)", "mouse", 1);
        assert!(matches!(
            parse_line(&line),
            Err(ParseError::InvalidField { column: "taxa", .. })
        ));
    }

    #[test]
    fn test_taxon_filter() {
        let record = parse_line(LINE).unwrap();
        assert!(record.passes_filter(&ParserConfig::default()));
        assert!(record.passes_filter(&ParserConfig::default().for_taxon(NcbiTaxonomyId::new(10090))));
        assert!(!record.passes_filter(&ParserConfig::default().for_taxon(NcbiTaxonomyId::new(9606))));
    }

    #[test]
    fn test_nested_emission() {
        let record = parse_line(LINE).unwrap();
        let statements = emit_all(&record).unwrap();
        let subject = "http://kabob.ucdenver.edu/iao/irefweb/IREFWEB_INTERACTION_RECORD_1186512";

        assert_eq!(statements[0].subject, subject);
        assert_eq!(statements[1].predicate, terms::HAS_INTERACTOR_A);
        assert_eq!(
            statements[1].object.as_iri(),
            Some(format!("{subject}_interactor_a").as_str())
        );
        // Interactor A: type, unique id, two alternative ids, organism link,
        // then the organism's type, taxonomy id and name
        assert_eq!(statements[2].subject, format!("{subject}_interactor_a"));
        assert_eq!(
            statements[6].object.as_iri(),
            Some(format!("{subject}_interactor_a_organism").as_str())
        );
        assert_eq!(statements[9].subject, format!("{subject}_interactor_a_organism"));
        assert_eq!(statements[10].predicate, terms::HAS_INTERACTOR_B);

        // 1 type + 1 + 8 (interactor A) + 1 + 7 (interactor B)
        // + method, pmid, type, sourcedb, 3 interaction ids
        assert_eq!(statements.len(), 25);
    }
}

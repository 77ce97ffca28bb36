//! Record schemas and field descriptors.
//!
//! Each record type declares a `static` [`RecordSchema`]: its ontology class,
//! how its subject IRI is derived, and an ordered table of
//! [`FieldDescriptor`]s binding field names to predicates. The emitter walks
//! this table; records only hand out field values by name.

use std::fmt;

use datasource_identifiers::{DataSource, DataSourceIdentifier};

/// Whether a field holds one value or a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Multiplicity {
    /// At most one value.
    Single,
    /// Any number of values; one statement per distinct element.
    Collection,
}

/// How a field value is rendered as a statement object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// A literal, optionally tagged with a language or a datatype.
    Literal {
        /// Language tag (`en`).
        language: Option<&'static str>,
        /// Datatype IRI.
        datatype: Option<&'static str>,
    },
    /// The ICE IRI of an identifier.
    IceReference,
    /// The IRI of the external entity an identifier denotes.
    EntityReference,
    /// A nested record, linked by its subject IRI.
    Nested,
}

/// Static metadata binding one record field to a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Field name the record answers to.
    pub name: &'static str,
    /// Predicate IRI of statements produced for this field.
    pub predicate: &'static str,
    /// How values are rendered.
    pub object: ObjectKind,
    /// Datasource of the field's values.
    pub data_source: DataSource,
    /// Single or collection.
    pub multiplicity: Multiplicity,
}

impl FieldDescriptor {
    /// A single-valued field rendered as an identifier's ICE IRI.
    pub const fn ice(name: &'static str, predicate: &'static str, data_source: DataSource) -> Self {
        Self {
            name,
            predicate,
            object: ObjectKind::IceReference,
            data_source,
            multiplicity: Multiplicity::Single,
        }
    }

    /// A single-valued field rendered as the entity an identifier denotes.
    pub const fn entity(name: &'static str, predicate: &'static str, data_source: DataSource) -> Self {
        Self {
            name,
            predicate,
            object: ObjectKind::EntityReference,
            data_source,
            multiplicity: Multiplicity::Single,
        }
    }

    /// A single-valued plain literal field.
    pub const fn literal(name: &'static str, predicate: &'static str, data_source: DataSource) -> Self {
        Self {
            name,
            predicate,
            object: ObjectKind::Literal {
                language: None,
                datatype: None,
            },
            data_source,
            multiplicity: Multiplicity::Single,
        }
    }

    /// A single-valued nested record field.
    pub const fn nested(name: &'static str, predicate: &'static str, data_source: DataSource) -> Self {
        Self {
            name,
            predicate,
            object: ObjectKind::Nested,
            data_source,
            multiplicity: Multiplicity::Single,
        }
    }

    /// Tags literal values with a language.
    pub const fn with_language(self, language: &'static str) -> Self {
        Self {
            object: ObjectKind::Literal {
                language: Some(language),
                datatype: None,
            },
            ..self
        }
    }

    /// Types literal values with a datatype IRI.
    pub const fn with_datatype(self, datatype: &'static str) -> Self {
        Self {
            object: ObjectKind::Literal {
                language: None,
                datatype: Some(datatype),
            },
            ..self
        }
    }

    /// Marks the field as multi-valued.
    pub const fn many(self) -> Self {
        Self {
            multiplicity: Multiplicity::Collection,
            ..self
        }
    }
}

/// How the subject IRI of a record is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectRule {
    /// `namespace + prefix + key`, the key supplied by [`Record::subject_key`].
    RecordKey {
        /// Namespace IRI.
        namespace: &'static str,
        /// Local name prefix.
        prefix: &'static str,
    },
    /// The ICE IRI of [`Record::primary_identifier`].
    PrimaryIce,
    /// `parent subject + "_" + field name` (plus `_n` inside collections).
    /// Only valid for records reached through a nested field.
    Nested,
}

/// Static description of a record type.
#[derive(Debug)]
pub struct RecordSchema {
    /// Short record label.
    pub label: &'static str,
    /// Ontology class of the record.
    pub class: &'static str,
    /// Datasource the record comes from.
    pub data_source: DataSource,
    /// Subject derivation.
    pub subject: SubjectRule,
    /// Declared fields, in emission order.
    pub fields: &'static [FieldDescriptor],
}

impl RecordSchema {
    /// Looks up a field descriptor by name.
    pub fn descriptor(&self, name: &str) -> Option<&'static FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// One value handed out by a record for emission.
#[derive(Clone, Copy)]
pub enum Value<'a> {
    /// An identifier.
    Identifier(&'a dyn DataSourceIdentifier),
    /// Free text.
    Text(&'a str),
    /// An integer.
    Integer(i64),
    /// A nested record.
    Record(&'a dyn Record),
}

impl Value<'_> {
    /// Short name of the value shape, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Identifier(_) => "an identifier",
            Self::Text(_) => "text",
            Self::Integer(_) => "an integer",
            Self::Record(_) => "a nested record",
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(id) => f.debug_tuple("Identifier").field(id).finish(),
            Self::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Self::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Self::Record(record) => f.debug_tuple("Record").field(&record.schema().label).finish(),
        }
    }
}

/// The value of one field.
#[derive(Debug, Clone)]
pub enum FieldValue<'a> {
    /// No value (a sentinel in the source, or an empty collection).
    Absent,
    /// One value.
    One(Value<'a>),
    /// Several values.
    Many(Vec<Value<'a>>),
}

impl<'a> FieldValue<'a> {
    /// An optional identifier.
    pub fn identifier<T: DataSourceIdentifier>(id: Option<&'a T>) -> Self {
        match id {
            Some(id) => Self::One(Value::Identifier(id)),
            None => Self::Absent,
        }
    }

    /// An optional text value.
    pub fn text(text: Option<&'a str>) -> Self {
        match text {
            Some(text) => Self::One(Value::Text(text)),
            None => Self::Absent,
        }
    }

    /// An optional nested record.
    pub fn record<R: Record>(record: Option<&'a R>) -> Self {
        match record {
            Some(record) => Self::One(Value::Record(record)),
            None => Self::Absent,
        }
    }

    /// A collection of identifiers.
    pub fn identifiers<T, I>(ids: I) -> Self
    where
        T: DataSourceIdentifier + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        Self::Many(
            ids.into_iter()
                .map(|id| Value::Identifier(id as &dyn DataSourceIdentifier))
                .collect(),
        )
    }

    /// A collection of text values.
    pub fn texts<I>(texts: I) -> Self
    where
        I: IntoIterator<Item = &'a String>,
    {
        Self::Many(texts.into_iter().map(|t| Value::Text(t.as_str())).collect())
    }

    /// Returns true if the field has no value.
    pub fn is_absent(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::One(_) => false,
            Self::Many(values) => values.is_empty(),
        }
    }
}

/// A typed record that can be serialized through its schema.
pub trait Record: fmt::Debug {
    /// The record type's static schema.
    fn schema(&self) -> &'static RecordSchema;

    /// Key used by [`SubjectRule::RecordKey`].
    fn subject_key(&self) -> Option<String> {
        None
    }

    /// Identifier used by [`SubjectRule::PrimaryIce`].
    fn primary_identifier(&self) -> Option<&dyn DataSourceIdentifier> {
        None
    }

    /// Value of the field named `name`.
    ///
    /// Returns `None` if the record does not know the field; for a field the
    /// schema declares, that is a schema mismatch.
    fn field(&self, name: &str) -> Option<FieldValue<'_>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use datasource_identifiers::ontology;

    static FIELDS: &[FieldDescriptor] = &[
        FieldDescriptor::ice("gene", "http://example.org/gene", DataSource::EntrezGene),
        FieldDescriptor::literal("name", "http://example.org/name", DataSource::Kabob)
            .with_language("en"),
        FieldDescriptor::literal("count", "http://example.org/count", DataSource::Kabob)
            .with_datatype(ontology::XSD_INTEGER)
            .many(),
    ];

    static SCHEMA: RecordSchema = RecordSchema {
        label: "example",
        class: "http://example.org/Example",
        data_source: DataSource::Kabob,
        subject: SubjectRule::PrimaryIce,
        fields: FIELDS,
    };

    #[test]
    fn test_descriptor_lookup() {
        let gene = SCHEMA.descriptor("gene").unwrap();
        assert_eq!(gene.object, ObjectKind::IceReference);
        assert_eq!(gene.multiplicity, Multiplicity::Single);
        assert!(SCHEMA.descriptor("missing").is_none());
    }

    #[test]
    fn test_descriptor_builders() {
        let name = SCHEMA.descriptor("name").unwrap();
        assert_eq!(
            name.object,
            ObjectKind::Literal { language: Some("en"), datatype: None }
        );

        let count = SCHEMA.descriptor("count").unwrap();
        assert_eq!(count.multiplicity, Multiplicity::Collection);
        assert_eq!(
            count.object,
            ObjectKind::Literal { language: None, datatype: Some(ontology::XSD_INTEGER) }
        );
    }

    #[test]
    fn test_field_value_absence() {
        assert!(FieldValue::text(None).is_absent());
        assert!(FieldValue::Many(Vec::new()).is_absent());
        assert!(!FieldValue::text(Some("x")).is_absent());
    }
}

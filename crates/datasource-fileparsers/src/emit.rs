//! Record-to-statement emission.
//!
//! [`emit`] turns one [`Record`] into a lazy, finite [`Emission`] of
//! statements: the `rdf:type` statement first, then the fields in the order
//! the schema declares them. Nested records are linked from their parent and
//! emitted depth-first before the parent's remaining fields.

use std::collections::VecDeque;

use datasource_identifiers::ontology;
use thiserror::Error;

use crate::record::{FieldDescriptor, FieldValue, Multiplicity, ObjectKind, Record, SubjectRule, Value};
use crate::statement::{Literal, Object, Statement};

/// Errors raised while emitting a record. All of them are schema defects and
/// abort emission of the record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EmitError {
    /// The subject IRI cannot be derived.
    #[error("cannot derive a subject for {record} record: {reason}")]
    UnresolvableSubject {
        /// Record label.
        record: &'static str,
        /// What was missing.
        reason: &'static str,
    },

    /// The schema declares a field the record does not provide.
    #[error("{record} record does not provide declared field '{field}'")]
    UndeclaredField {
        /// Record label.
        record: &'static str,
        /// Field name.
        field: &'static str,
    },

    /// A value does not fit its field descriptor.
    #[error("field '{field}' of {record} record holds {found}, which does not fit its descriptor")]
    KindMismatch {
        /// Record label.
        record: &'static str,
        /// Field name.
        field: &'static str,
        /// Shape of the offending value.
        found: &'static str,
    },
}

/// Result type for emission.
pub type EmitResult<T> = Result<T, EmitError>;

struct Frame<'a> {
    record: &'a dyn Record,
    subject: String,
    typed: bool,
    next_field: usize,
}

/// Lazy statement sequence for one record.
///
/// Yields `Err` at most once; the sequence ends after an error.
pub struct Emission<'a> {
    stack: Vec<Frame<'a>>,
    buffer: VecDeque<Statement>,
    failed: bool,
}

/// Starts emitting `record`.
///
/// # Errors
/// Returns [`EmitError::UnresolvableSubject`] if the record's subject cannot
/// be derived. Errors in individual fields are yielded by the iterator.
pub fn emit(record: &dyn Record) -> EmitResult<Emission<'_>> {
    let subject = root_subject(record)?;
    Ok(Emission {
        stack: vec![Frame {
            record,
            subject,
            typed: false,
            next_field: 0,
        }],
        buffer: VecDeque::new(),
        failed: false,
    })
}

/// Emits `record` completely.
pub fn emit_all(record: &dyn Record) -> EmitResult<Vec<Statement>> {
    emit(record)?.collect()
}

/// Subject IRI of a top-level record.
pub fn root_subject(record: &dyn Record) -> EmitResult<String> {
    let schema = record.schema();
    match schema.subject {
        SubjectRule::RecordKey { namespace, prefix } => record
            .subject_key()
            .map(|key| format!("{namespace}{prefix}{key}"))
            .ok_or(EmitError::UnresolvableSubject {
                record: schema.label,
                reason: "record has no key",
            }),
        SubjectRule::PrimaryIce => record
            .primary_identifier()
            .map(|id| id.ice_iri())
            .ok_or(EmitError::UnresolvableSubject {
                record: schema.label,
                reason: "record has no primary identifier",
            }),
        SubjectRule::Nested => Err(EmitError::UnresolvableSubject {
            record: schema.label,
            reason: "nested record emitted without a parent",
        }),
    }
}

fn nested_subject(
    record: &dyn Record,
    parent: &str,
    field: &FieldDescriptor,
    position: Option<usize>,
) -> EmitResult<String> {
    let schema = record.schema();
    match schema.subject {
        SubjectRule::Nested => Ok(match position {
            Some(n) => format!("{parent}_{}_{n}", field.name),
            None => format!("{parent}_{}", field.name),
        }),
        _ => root_subject(record),
    }
}

impl<'a> Emission<'a> {
    /// Expands one field of the frame on top of the stack into the buffer.
    /// Nested records found in the field are returned for the caller to push.
    fn expand(
        &mut self,
        record: &'a dyn Record,
        subject: &str,
        field: &'static FieldDescriptor,
    ) -> EmitResult<Vec<Frame<'a>>> {
        let label = record.schema().label;
        let value = record.field(field.name).ok_or(EmitError::UndeclaredField {
            record: label,
            field: field.name,
        })?;

        let (values, in_collection) = match value {
            FieldValue::Absent => return Ok(Vec::new()),
            FieldValue::One(value) => (vec![value], false),
            FieldValue::Many(values) => {
                if field.multiplicity == Multiplicity::Single {
                    return Err(EmitError::KindMismatch {
                        record: label,
                        field: field.name,
                        found: "a collection",
                    });
                }
                (values, true)
            }
        };

        let mut emitted: Vec<Object> = Vec::with_capacity(values.len());
        let mut nested = Vec::new();
        for value in values {
            let object = match (field.object, value) {
                (ObjectKind::Literal { language, datatype }, Value::Identifier(id)) => {
                    literal(id.raw_value(), language, datatype)
                }
                (ObjectKind::Literal { language, datatype }, Value::Text(text)) => {
                    literal(text.to_string(), language, datatype)
                }
                (ObjectKind::Literal { language, datatype }, Value::Integer(n)) => {
                    literal(n.to_string(), language, datatype)
                }
                // Namespaces follow the field's data source, not the identifier's form
                (ObjectKind::IceReference, Value::Identifier(id)) => Object::Iri(format!(
                    "{}{}",
                    field.data_source.ice_namespace(),
                    id.ice_local_name()
                )),
                (ObjectKind::EntityReference, Value::Identifier(id)) => Object::Iri(format!(
                    "{}{}",
                    field.data_source.entity_namespace(),
                    id.raw_value()
                )),
                (ObjectKind::Nested, Value::Record(child)) => {
                    let position = in_collection.then_some(nested.len() + 1);
                    let child_subject = nested_subject(child, subject, field, position)?;
                    let object = Object::Iri(child_subject.clone());
                    if !emitted.contains(&object) {
                        nested.push(Frame {
                            record: child,
                            subject: child_subject,
                            typed: false,
                            next_field: 0,
                        });
                    }
                    object
                }
                (_, other) => {
                    return Err(EmitError::KindMismatch {
                        record: label,
                        field: field.name,
                        found: other.kind_name(),
                    })
                }
            };

            if emitted.contains(&object) {
                continue;
            }
            self.buffer
                .push_back(Statement::new(subject, field.predicate, object.clone()));
            emitted.push(object);
        }
        Ok(nested)
    }

    fn step(&mut self) -> EmitResult<bool> {
        let Some(frame) = self.stack.last_mut() else {
            return Ok(false);
        };
        let schema = frame.record.schema();

        if !frame.typed {
            frame.typed = true;
            self.buffer.push_back(Statement::iri(
                frame.subject.clone(),
                ontology::RDF_TYPE,
                schema.class,
            ));
            return Ok(true);
        }

        let Some(field) = schema.fields.get(frame.next_field) else {
            self.stack.pop();
            return Ok(true);
        };
        frame.next_field += 1;

        let record = frame.record;
        let subject = frame.subject.clone();
        let nested = self.expand(record, &subject, field)?;
        // First nested record ends up on top
        self.stack.extend(nested.into_iter().rev());
        Ok(true)
    }
}

fn literal(
    lexical: String,
    language: Option<&'static str>,
    datatype: Option<&'static str>,
) -> Object {
    Object::Literal(Literal {
        lexical,
        language,
        datatype,
    })
}

impl Iterator for Emission<'_> {
    type Item = EmitResult<Statement>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(statement) = self.buffer.pop_front() {
                return Some(Ok(statement));
            }
            if self.failed {
                return None;
            }
            match self.step() {
                Ok(true) => continue,
                Ok(false) => return None,
                Err(err) => {
                    self.failed = true;
                    self.stack.clear();
                    self.buffer.clear();
                    return Some(Err(err));
                }
            }
        }
    }
}

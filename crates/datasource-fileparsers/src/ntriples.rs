//! N-Triples output.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use datasource_identifiers::{ontology, DataSource};

use crate::statement::{Literal, Object, Statement};

/// Destination for emitted statements.
pub trait StatementSink {
    /// Writes one statement.
    fn write_statement(&mut self, statement: &Statement) -> io::Result<()>;

    /// Statements written so far.
    fn statement_count(&self) -> u64;

    /// Writes a batch of statements.
    fn write_statements<'s, I>(&mut self, statements: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'s Statement>,
        Self: Sized,
    {
        for statement in statements {
            self.write_statement(statement)?;
        }
        Ok(())
    }
}

/// Writes statements as N-Triples lines.
pub struct NTriplesWriter<W: Write> {
    writer: W,
    count: u64,
}

impl NTriplesWriter<BufWriter<File>> {
    /// Creates (or truncates) an N-Triples file.
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "creating N-Triples file");
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> NTriplesWriter<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer, count: 0 }
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> StatementSink for NTriplesWriter<W> {
    fn write_statement(&mut self, statement: &Statement) -> io::Result<()> {
        writeln!(self.writer, "{statement}")?;
        self.count += 1;
        Ok(())
    }

    fn statement_count(&self) -> u64 {
        self.count
    }
}

impl StatementSink for Vec<Statement> {
    fn write_statement(&mut self, statement: &Statement) -> io::Result<()> {
        self.push(statement.clone());
        Ok(())
    }

    fn statement_count(&self) -> u64 {
        self.len() as u64
    }
}

/// File name of a data stream.
pub fn data_file_name(stem: &str) -> String {
    format!("{stem}.nt")
}

/// File name of the provenance file accompanying a data stream.
pub fn meta_file_name(stem: &str) -> String {
    format!("kabob-meta-{stem}.nt")
}

/// Provenance of one output stream.
#[derive(Debug, Clone)]
pub struct StreamMetadata {
    /// Output stream stem.
    pub stem: String,
    /// Source file the stream was generated from.
    pub source_file: String,
    /// Datasource of the serialized records.
    pub data_source: DataSource,
    /// Class of the serialized records.
    pub record_class: &'static str,
    /// Records serialized.
    pub record_count: u64,
    /// Statements written to the data stream.
    pub statement_count: u64,
}

impl StreamMetadata {
    /// Subject IRI of the stream.
    pub fn subject(&self) -> String {
        format!("{}{}", ontology::meta::NAMESPACE, self.stem)
    }

    /// The six provenance statements.
    pub fn statements(&self) -> [Statement; 6] {
        use ontology::meta;

        let subject = self.subject();
        [
            Statement::iri(subject.clone(), ontology::RDF_TYPE, meta::OUTPUT_STREAM_CLASS),
            Statement::new(
                subject.clone(),
                meta::HAS_SOURCE_FILE,
                Object::Literal(Literal::plain(self.source_file.clone())),
            ),
            Statement::new(
                subject.clone(),
                meta::HAS_DATA_SOURCE,
                Object::Literal(Literal::plain(self.data_source.label())),
            ),
            Statement::iri(subject.clone(), meta::HAS_RECORD_CLASS, self.record_class),
            Statement::new(
                subject.clone(),
                meta::HAS_RECORD_COUNT,
                Object::Literal(Literal::typed(self.record_count.to_string(), ontology::XSD_INTEGER)),
            ),
            Statement::new(
                subject,
                meta::HAS_STATEMENT_COUNT,
                Object::Literal(Literal::typed(
                    self.statement_count.to_string(),
                    ontology::XSD_INTEGER,
                )),
            ),
        ]
    }

    /// Writes the provenance statements to `<dir>/kabob-meta-<stem>.nt`.
    pub fn write_to_dir<P: AsRef<Path>>(&self, dir: P) -> io::Result<u64> {
        let mut writer = NTriplesWriter::create(dir.as_ref().join(meta_file_name(&self.stem)))?;
        writer.write_statements(&self.statements())?;
        let count = writer.statement_count();
        writer.finish()?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_counts_lines() {
        let mut writer = NTriplesWriter::new(Vec::new());
        writer
            .write_statement(&Statement::iri("http://a/s", "http://a/p", "http://a/o"))
            .unwrap();
        writer
            .write_statement(&Statement::new(
                "http://a/s",
                "http://a/q",
                Object::Literal(Literal::plain("x")),
            ))
            .unwrap();
        assert_eq!(writer.statement_count(), 2);

        let output = String::from_utf8(writer.finish().unwrap()).unwrap();
        assert_eq!(
            output,
            "<http://a/s> <http://a/p> <http://a/o> .\n<http://a/s> <http://a/q> \"x\" .\n"
        );
    }

    #[test]
    fn test_file_names() {
        assert_eq!(data_file_name("transfac-matrix"), "transfac-matrix.nt");
        assert_eq!(meta_file_name("transfac-matrix"), "kabob-meta-transfac-matrix.nt");
    }

    #[test]
    fn test_metadata_statements() {
        let metadata = StreamMetadata {
            stem: "transfac-matrix".into(),
            source_file: "matrix.dat".into(),
            data_source: DataSource::Transfac,
            record_class: ontology::transfac::MATRIX_RECORD_CLASS,
            record_count: 2,
            statement_count: 10,
        };
        let statements = metadata.statements();
        assert!(statements
            .iter()
            .all(|s| s.subject == "http://kabob.ucdenver.edu/iao/meta/transfac-matrix"));
        assert_eq!(statements[0].predicate, ontology::RDF_TYPE);
        assert_eq!(
            statements[5].to_string(),
            "<http://kabob.ucdenver.edu/iao/meta/transfac-matrix> \
             <http://kabob.ucdenver.edu/iao/meta/hasStatementCount> \
             \"10\"^^<http://www.w3.org/2001/XMLSchema#integer> ."
        );
    }

    #[test]
    fn test_metadata_file() {
        let dir = tempfile::tempdir().unwrap();
        let metadata = StreamMetadata {
            stem: "example".into(),
            source_file: "example.txt".into(),
            data_source: DataSource::Kabob,
            record_class: "http://example.org/Record",
            record_count: 0,
            statement_count: 0,
        };
        assert_eq!(metadata.write_to_dir(dir.path()).unwrap(), 6);

        let content = std::fs::read_to_string(dir.path().join("kabob-meta-example.nt")).unwrap();
        assert_eq!(content.lines().count(), 6);
    }
}

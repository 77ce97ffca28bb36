//! RDF statements.
//!
//! `Display` renders a statement as one N-Triples line without the trailing
//! newline. Characters not allowed in an N-Triples IRI reference are
//! percent-encoded on output.

use std::borrow::Cow;
use std::fmt;

/// A literal object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Literal {
    /// Lexical form.
    pub lexical: String,
    /// Language tag.
    pub language: Option<&'static str>,
    /// Datatype IRI.
    pub datatype: Option<&'static str>,
}

impl Literal {
    /// A plain literal.
    pub fn plain(lexical: impl Into<String>) -> Self {
        Self {
            lexical: lexical.into(),
            language: None,
            datatype: None,
        }
    }

    /// A typed literal.
    pub fn typed(lexical: impl Into<String>, datatype: &'static str) -> Self {
        Self {
            lexical: lexical.into(),
            language: None,
            datatype: Some(datatype),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", escape(&self.lexical))?;
        if let Some(language) = self.language {
            write!(f, "@{language}")
        } else if let Some(datatype) = self.datatype {
            write!(f, "^^{}", IriRef(datatype))
        } else {
            Ok(())
        }
    }
}

/// Object of a statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Object {
    /// An IRI.
    Iri(String),
    /// A literal.
    Literal(Literal),
}

impl Object {
    /// Returns the IRI if the object is one.
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(iri) => Some(iri),
            Self::Literal(_) => None,
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Iri(iri) => IriRef(iri).fmt(f),
            Self::Literal(literal) => literal.fmt(f),
        }
    }
}

/// A subject-predicate-object triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement {
    /// Subject IRI.
    pub subject: String,
    /// Predicate IRI.
    pub predicate: &'static str,
    /// Object.
    pub object: Object,
}

impl Statement {
    /// Creates a statement.
    pub fn new(subject: impl Into<String>, predicate: &'static str, object: Object) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object,
        }
    }

    /// Creates a statement with an IRI object.
    pub fn iri(subject: impl Into<String>, predicate: &'static str, object: impl Into<String>) -> Self {
        Self::new(subject, predicate, Object::Iri(object.into()))
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} .",
            IriRef(&self.subject),
            IriRef(self.predicate),
            self.object
        )
    }
}

/// An IRI written between angle brackets.
struct IriRef<'a>(&'a str);

impl fmt::Display for IriRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("<")?;
        f.write_str(&escape_iri(self.0))?;
        f.write_str(">")
    }
}

/// Percent-encodes the characters an N-Triples IRI reference may not
/// contain: space, controls and ``<>"{}|^`\``.
pub fn escape_iri(iri: &str) -> Cow<'_, str> {
    let forbidden =
        |c: char| c <= ' ' || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\');
    if !iri.contains(forbidden) {
        return Cow::Borrowed(iri);
    }

    let mut escaped = String::with_capacity(iri.len() + 8);
    let mut buf = [0u8; 4];
    for c in iri.chars() {
        if forbidden(c) {
            for byte in c.encode_utf8(&mut buf).bytes() {
                escaped.push_str(&format!("%{byte:02X}"));
            }
        } else {
            escaped.push(c);
        }
    }
    Cow::Owned(escaped)
}

/// Escapes a string for use inside an N-Triples literal.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            c if c.is_control() => escaped.push_str(&format!("\\u{:04X}", c as u32)),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iri_statement_line() {
        let statement = Statement::iri("http://a/s", "http://a/p", "http://a/o");
        assert_eq!(statement.to_string(), "<http://a/s> <http://a/p> <http://a/o> .");
    }

    #[test]
    fn test_literal_rendering() {
        let tagged = Literal {
            lexical: "V$MYOD_01".into(),
            language: Some("en"),
            datatype: None,
        };
        assert_eq!(tagged.to_string(), "\"V$MYOD_01\"@en");

        let typed = Literal::typed("2", "http://www.w3.org/2001/XMLSchema#integer");
        assert_eq!(
            typed.to_string(),
            "\"2\"^^<http://www.w3.org/2001/XMLSchema#integer>"
        );
        assert_eq!(Literal::plain("x").to_string(), "\"x\"");
    }

    #[test]
    fn test_iri_characters_percent_encoded() {
        let statement = Statement::iri(
            "http://a/record 1",
            "http://a/p",
            "http://a/x>y\"z{}|^`\\",
        );
        assert_eq!(
            statement.to_string(),
            "<http://a/record%201> <http://a/p> <http://a/x%3Ey%22z%7B%7D%7C%5E%60%5C> ."
        );
        // Existing escapes and non-ASCII pass through
        assert_eq!(escape_iri("http://a/b%3Ac"), "http://a/b%3Ac");
        assert_eq!(escape_iri("http://a/Müller"), "http://a/Müller");
        assert_eq!(escape_iri("http://a/\u{7}"), "http://a/%07");
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"say "hi"\"#), r#"say \"hi\"\\"#);
        assert_eq!(escape("a\tb\nc"), "a\\tb\\nc");
        assert_eq!(escape("\u{1}"), "\\u0001");
        assert_eq!(escape("Müller"), "Müller");
    }
}

//! Shared identifier capability and the macros that declare identifier kinds.
//!
//! Each identifier kind is a flat newtype bound to one [`DataSource`]. Kinds
//! are declared with `integer_identifier!` or `string_identifier!`, which
//! generate validation, `FromStr`, `Display`, serde support and the
//! [`DataSourceIdentifier`] implementation.

use std::fmt;

use thiserror::Error;

use crate::DataSource;

/// Errors raised when constructing an identifier from a raw token.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The token was empty or only whitespace.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Identifier kind being constructed.
        kind: &'static str,
    },

    /// A numeric identifier kind received a non-numeric token.
    #[error("{kind} requires a numeric value, found '{value}'")]
    NotNumeric {
        /// Identifier kind being constructed.
        kind: &'static str,
        /// The offending token.
        value: String,
    },

    /// The token does not have the lexical form required by the kind.
    #[error("malformed {kind}: '{value}'")]
    Malformed {
        /// Identifier kind being constructed.
        kind: &'static str,
        /// The offending token.
        value: String,
    },
}

/// Result type for identifier construction.
pub type IdentifierResult<T> = Result<T, IdentifierError>;

/// A named value with provenance.
///
/// Implemented by every identifier kind. The trait is object safe so records
/// can hand out `&dyn DataSourceIdentifier` during statement emission.
///
/// # Examples
///
/// ```
/// use datasource_identifiers::{DataSourceIdentifier, EntrezGeneId};
///
/// let gene = EntrezGeneId::new(16822);
/// assert_eq!(gene.raw_value(), "16822");
/// assert_eq!(gene.ice_iri(), "http://www.ncbi.nlm.nih.gov/gene/EG_16822_ICE");
/// ```
pub trait DataSourceIdentifier: fmt::Debug + fmt::Display {
    /// The datasource this identifier belongs to.
    fn data_source(&self) -> DataSource;

    /// The raw lexical value as it appeared in the source file.
    fn raw_value(&self) -> String;

    /// Prefix placed before the raw value in the ICE local name.
    fn ice_prefix(&self) -> &'static str {
        ""
    }

    /// Local name of the ICE IRI, e.g. `EG_16822_ICE`.
    fn ice_local_name(&self) -> String {
        format!("{}{}_ICE", self.ice_prefix(), self.raw_value())
    }

    /// IRI of the information content entity standing for this identifier.
    fn ice_iri(&self) -> String {
        format!(
            "{}{}",
            self.data_source().ice_namespace(),
            self.ice_local_name()
        )
    }

    /// IRI of the external entity this identifier denotes.
    fn entity_iri(&self) -> String {
        format!(
            "{}{}",
            self.data_source().entity_namespace(),
            self.raw_value()
        )
    }
}

/// Parses a numeric identifier token. Only ASCII digits are accepted.
pub(crate) fn parse_numeric(kind: &'static str, value: &str) -> IdentifierResult<u64> {
    if value.trim().is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IdentifierError::NotNumeric {
            kind,
            value: value.to_string(),
        });
    }
    value.parse::<u64>().map_err(|_| IdentifierError::NotNumeric {
        kind,
        value: value.to_string(),
    })
}

/// Checks the rules shared by all string identifier kinds.
pub(crate) fn validate_token(kind: &'static str, value: &str) -> IdentifierResult<()> {
    if value.trim().is_empty() {
        return Err(IdentifierError::Empty { kind });
    }
    if value.chars().any(char::is_whitespace) {
        return Err(IdentifierError::Malformed {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Declares a numeric identifier kind.
macro_rules! integer_identifier {
    ($(#[$meta:meta])* $name:ident, $source:expr, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(u64);

        impl $name {
            /// Datasource every identifier of this kind belongs to.
            pub const DATA_SOURCE: $crate::DataSource = $source;

            /// Wraps a numeric identifier value.
            pub const fn new(value: u64) -> Self {
                Self(value)
            }

            /// Returns the wrapped value.
            pub const fn value(&self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(value: u64) -> Self {
                Self(value)
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $crate::identifier::parse_numeric(stringify!($name), s).map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl $crate::DataSourceIdentifier for $name {
            fn data_source(&self) -> $crate::DataSource {
                Self::DATA_SOURCE
            }

            fn raw_value(&self) -> String {
                self.0.to_string()
            }

            fn ice_prefix(&self) -> &'static str {
                $prefix
            }
        }
    };
}

/// Declares a string identifier kind, optionally with an extra lexical check.
macro_rules! string_identifier {
    ($(#[$meta:meta])* $name:ident, $source:expr, $prefix:literal) => {
        string_identifier!($(#[$meta])* $name, $source, $prefix, |_: &str| true);
    };
    ($(#[$meta:meta])* $name:ident, $source:expr, $prefix:literal, $valid:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
        pub struct $name(String);

        impl $name {
            /// Datasource every identifier of this kind belongs to.
            pub const DATA_SOURCE: $crate::DataSource = $source;

            /// Validates and wraps a raw token.
            ///
            /// # Errors
            /// Returns an error if the token is empty, contains whitespace or
            /// fails the kind's lexical check.
            pub fn new(value: impl Into<String>) -> $crate::IdentifierResult<Self> {
                let value = value.into();
                $crate::identifier::validate_token(stringify!($name), &value)?;
                let valid: fn(&str) -> bool = $valid;
                if !valid(&value) {
                    return Err($crate::IdentifierError::Malformed {
                        kind: stringify!($name),
                        value,
                    });
                }
                Ok(Self(value))
            }

            /// Returns the wrapped token.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::IdentifierError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::IdentifierError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl $crate::DataSourceIdentifier for $name {
            fn data_source(&self) -> $crate::DataSource {
                Self::DATA_SOURCE
            }

            fn raw_value(&self) -> String {
                self.0.clone()
            }

            fn ice_prefix(&self) -> &'static str {
                $prefix
            }
        }
    };
}

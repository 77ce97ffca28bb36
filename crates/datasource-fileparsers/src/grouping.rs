//! Whole-file grouping of records by a key.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::parser::{RecordReader, RecordSource};
use crate::types::ParseResult;

/// Consumes a reader and groups its records into `key -> {values}`.
///
/// `extract` returns the key/value pairs contributed by one record (none if
/// the record lacks either side). Values for a repeated key are unioned.
/// Records rejected by the reader's filter never reach `extract`.
///
/// # Errors
/// Stops at the first malformed record.
pub fn group_by<S, K, V, F, I>(
    reader: RecordReader<S>,
    mut extract: F,
) -> ParseResult<HashMap<K, HashSet<V>>>
where
    S: RecordSource,
    K: Eq + Hash,
    V: Eq + Hash,
    F: FnMut(&S::Record) -> I,
    I: IntoIterator<Item = (K, V)>,
{
    let mut groups: HashMap<K, HashSet<V>> = HashMap::new();
    for record in reader {
        let record = record?;
        for (key, value) in extract(&record) {
            groups.entry(key).or_default().insert(value);
        }
    }
    tracing::debug!(keys = groups.len(), "grouped records");
    Ok(groups)
}

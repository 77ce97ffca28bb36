//! Command implementations.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::hash::Hash;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context};
use datasource_fileparsers::{
    convert_all, convert_file, discover_datasource_files, protein_accession_to_entrez_gene_map,
    protein_gi_to_entrez_gene_map, ConversionSummary, ConvertOptions, DatasourceFormat,
};
use serde::Serialize;

use crate::config::{GroupKey, InputArgs};

/// Converts one file.
pub fn convert(
    format: DatasourceFormat,
    input: &Path,
    options: &ConvertOptions,
) -> anyhow::Result<()> {
    let summary = convert_file(format, input, options)
        .with_context(|| format!("failed to convert {}", input.display()))?;
    report(&summary);
    Ok(())
}

/// Converts every datasource file found under `directory`.
///
/// Every file is attempted; the command fails if any of them failed.
pub fn discover(directory: &Path, options: &ConvertOptions) -> anyhow::Result<()> {
    let files = discover_datasource_files(directory)
        .with_context(|| format!("failed to scan {}", directory.display()))?;

    if files.is_empty() {
        tracing::warn!(directory = %directory.display(), "no datasource files found");
        return Ok(());
    }

    let results = convert_all(&files, options);
    let mut failed = 0usize;
    for result in &results {
        match result {
            Ok(summary) => report(summary),
            Err(_) => failed += 1,
        }
    }

    if failed > 0 {
        bail!("{failed} of {} datasource files failed to convert", results.len());
    }
    Ok(())
}

/// Writes a gene2refseq grouping to `out` as a JSON object.
pub fn group<W: Write>(
    input: &Path,
    key: GroupKey,
    options: &InputArgs,
    out: W,
) -> anyhow::Result<()> {
    let encoding = options.encoding_for(DatasourceFormat::EntrezGene2Refseq);
    let context = || format!("failed to group {}", input.display());

    match key {
        GroupKey::ProteinGi => {
            let map = protein_gi_to_entrez_gene_map(input, encoding, options.taxon)
                .with_context(context)?;
            write_json(sorted(map), out)
        }
        GroupKey::ProteinAccession => {
            let map = protein_accession_to_entrez_gene_map(input, encoding, options.taxon)
                .with_context(context)?;
            write_json(sorted(map), out)
        }
    }
}

fn sorted<K, V>(map: HashMap<K, HashSet<V>>) -> BTreeMap<K, BTreeSet<V>>
where
    K: Ord + Hash,
    V: Ord + Hash,
{
    map.into_iter()
        .map(|(key, values)| (key, values.into_iter().collect()))
        .collect()
}

fn write_json<T: Serialize, W: Write>(value: T, mut out: W) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut out, &value).context("failed to write JSON")?;
    writeln!(out)?;
    Ok(())
}

fn report(summary: &ConversionSummary) {
    tracing::info!(
        format = %summary.format,
        input = %summary.input.display(),
        records = summary.records,
        statements = summary.statements,
        "wrote {}",
        summary.data_file.display()
    );
}

//! JSON file storage for decklists, results and the analysis report.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use super::StorageError;
use crate::models::{DecklistEntry, MatchResult, MetagameReport};

/// Read decklists, keeping file order. A missing file yields no decklists.
///
/// Accepts a JSON array of decklists or an object mapping URL to decklist.
/// A repeated `(url, player)` registration keeps its first occurrence.
pub fn read_decklists(path: &Path) -> Result<Vec<DecklistEntry>, StorageError> {
    let Some(value) = read_value(path)? else {
        return Ok(Vec::new());
    };

    let decklists = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<DecklistEntry>, _>>()?,
        Value::Object(map) => map
            .into_iter()
            .map(|(url, item)| {
                let mut deck: DecklistEntry = serde_json::from_value(item)?;
                if deck.url.is_empty() {
                    deck.url = url;
                }
                Ok(deck)
            })
            .collect::<Result<Vec<DecklistEntry>, serde_json::Error>>()?,
        _ => return Err(StorageError::InvalidFormat(path.to_path_buf())),
    };

    let mut seen = HashSet::new();
    let decklists: Vec<DecklistEntry> = decklists
        .into_iter()
        .filter(|deck| {
            let fresh = seen.insert(deck.id());
            if !fresh {
                debug!("Dropping duplicate decklist for {:?} at {}", deck.player, deck.url);
            }
            fresh
        })
        .collect();

    info!("Read {} decklists from {:?}", decklists.len(), path);
    Ok(decklists)
}

/// Read round results in file order. A missing file yields no results.
pub fn read_results(path: &Path) -> Result<Vec<MatchResult>, StorageError> {
    let Some(value) = read_value(path)? else {
        return Ok(Vec::new());
    };

    let results: Vec<MatchResult> = serde_json::from_value(value)?;
    info!("Read {} match results from {:?}", results.len(), path);
    Ok(results)
}

/// Write the report as pretty-printed JSON, replacing any existing file.
pub fn write_report(path: &Path, report: &MetagameReport) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writeln!(writer)?;
    writer.flush()?;

    info!("Wrote analysis to {:?}", path);
    Ok(())
}

fn read_value(path: &Path) -> Result<Option<Value>, StorageError> {
    if !path.exists() {
        warn!("{:?} does not exist", path);
        return Ok(None);
    }

    let file = File::open(path)?;
    let value = serde_json::from_reader(BufReader::new(file))?;
    debug!("Parsed {:?}", path);
    Ok(Some(value))
}

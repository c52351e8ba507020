//! Structural diff between a record and any normalizable source.
//!
//! Both sides are reduced to canonical maps — the instance through its
//! outbound-cast representation, the other side through the same source
//! normalization used by construction — then compared key-by-key.
//!
//! Comparison is value equality on the canonical scalar representation,
//! never type-coerced: an integer field holding `30` differs from an
//! XML-sourced `"30"`. Absence on either side is reported with a `null`
//! sentinel. Output order follows the instance's field declaration order,
//! with source-only keys appended in their source order.

use remap_engine::{Engine, EngineResult, Instance, Source};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// One differing field.
///
/// `local` is the instance side, `remote` the compared source. Swapping the
/// call's sides swaps these roles but preserves the set of differing keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffEntry {
    pub field: String,
    pub local: Value,
    pub remote: Value,
}

/// Compares an instance against any normalizable source.
///
/// With `ignore_missing`, keys present on only one side produce no entry;
/// only both-sides-present keys with differing values are reported.
pub fn diff(
    engine: &Engine,
    instance: &Instance,
    other: Source<'_>,
    ignore_missing: bool,
) -> EngineResult<Vec<DiffEntry>> {
    let local = engine.to_canonical_map(instance)?;
    let remote = engine.normalize(other)?;

    let mut entries = Vec::new();

    for (field, local_value) in &local {
        match remote.get(field) {
            Some(remote_value) if remote_value == local_value => {}
            Some(remote_value) => entries.push(DiffEntry {
                field: field.clone(),
                local: local_value.clone(),
                remote: remote_value.clone(),
            }),
            None if ignore_missing => {}
            None => entries.push(DiffEntry {
                field: field.clone(),
                local: local_value.clone(),
                remote: Value::Null,
            }),
        }
    }

    if !ignore_missing {
        for (field, remote_value) in &remote {
            if !local.contains_key(field) {
                entries.push(DiffEntry {
                    field: field.clone(),
                    local: Value::Null,
                    remote: remote_value.clone(),
                });
            }
        }
    }

    debug!(
        record_type = instance.record_type(),
        differing = entries.len(),
        "diffed record against source"
    );
    Ok(entries)
}

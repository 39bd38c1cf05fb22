//! Loading policy snapshots and engine configuration

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use policy_alerts_core::{parse_date_strict, AlertConfig, PolicyRecord};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Policy snapshots come either as a bare array or wrapped in `{"policies": [...]}`
///
/// Records stay untyped here so one malformed record cannot reject the rest.
#[derive(Deserialize)]
#[serde(untagged)]
enum PolicyDocument {
    List(Vec<Value>),
    Wrapped { policies: Vec<Value> },
}

/// Read a file, or stdin when the path is `-`
fn read_source(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read policies from stdin")?;
        return Ok(buffer);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn load_policies(path: &Path) -> Result<Vec<PolicyRecord>> {
    let raw = read_source(path)?;
    parse_policies(&raw).with_context(|| format!("{} is not a valid policy snapshot", path.display()))
}

/// Parse a snapshot document, skipping records that cannot be read as policies
pub fn parse_policies(raw: &str) -> Result<Vec<PolicyRecord>, serde_json::Error> {
    let records = match serde_json::from_str::<PolicyDocument>(raw)? {
        PolicyDocument::List(records) => records,
        PolicyDocument::Wrapped { policies } => policies,
    };

    let mut policies = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let id = record.get("id").map(Value::to_string);
        match serde_json::from_value::<PolicyRecord>(record) {
            Ok(policy) => policies.push(policy),
            Err(err) => warn!(index, id = ?id, error = %err, "skipping malformed policy record"),
        }
    }
    Ok(policies)
}

pub fn load_config(path: Option<&Path>) -> Result<AlertConfig> {
    let Some(path) = path else {
        return Ok(AlertConfig::default());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    AlertConfig::from_json(&raw).with_context(|| format!("invalid config {}", path.display()))
}

/// `--today` if given, otherwise the local calendar date
pub fn resolve_today(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(value) => Ok(parse_date_strict(value)?),
        None => Ok(chrono::Local::now().date_naive()),
    }
}

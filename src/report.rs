//! Scan report data model
//!
//! A report is a list of scanned files. Each file carries its triggered
//! indicators and the recommended fixes for the issues found.
//!
//! Accepted JSON shapes:
//! - a single file object
//! - an array of file objects
//! - a scan envelope `{ "results": [...] }` (extra keys ignored)
//!
//! A scanner error reply `{ "error": "..." }` is rejected with its message.
//!
//! Every field is optional; absent or `null` lists become empty.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Severity level of an indicator.
///
/// Matching is exact: "high" or "HIGH" land in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Level {
    High,
    Medium,
    LowMedium,
    Low,
    Other(String),
}

impl Level {
    pub fn as_str(&self) -> &str {
        match self {
            Level::High => "High",
            Level::Medium => "Medium",
            Level::LowMedium => "Low-Medium",
            Level::Low => "Low",
            Level::Other(s) => s,
        }
    }
}

impl Default for Level {
    fn default() -> Self {
        Level::Other(String::new())
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        match s.as_str() {
            "High" => Level::High,
            "Medium" => Level::Medium,
            "Low-Medium" => Level::LowMedium,
            "Low" => Level::Low,
            _ => Level::Other(s),
        }
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        Level::from(s.to_string())
    }
}

/// A single triggered indicator (one table row)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IndicatorEntry {
    #[serde(deserialize_with = "null_as_default")]
    pub level: Level,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Triggered action description
    #[serde(alias = "triggered_action", deserialize_with = "null_as_default")]
    pub indicator: String,
}

/// One issue with its ordered remediation steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FixGroup {
    #[serde(deserialize_with = "null_as_default")]
    pub issue: String,
    #[serde(deserialize_with = "null_as_default")]
    pub fix: Vec<String>,
}

/// Everything the indicator panel shows for one scanned file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PanelInput {
    pub file: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub indicators: Vec<IndicatorEntry>,
    #[serde(
        rename = "recommendedFixes",
        alias = "recommended_fixes",
        deserialize_with = "null_as_default"
    )]
    pub recommended_fixes: Vec<FixGroup>,

    // Scan summary (file list only)
    pub risk_level: Option<String>,
    pub risk_type: Option<String>,
    pub vulnerability_type: Option<String>,
    pub vulnerability_count: Option<u64>,
}

impl PanelInput {
    /// Panel title, "File" when the scanner gave no name
    pub fn title(&self) -> &str {
        self.file.as_deref().unwrap_or("File")
    }

    pub fn level(&self) -> Option<Level> {
        self.risk_level.as_deref().map(Level::from)
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct Envelope {
    results: Vec<PanelInput>,
}

/// A loaded scan report
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub files: Vec<PanelInput>,
}

impl Report {
    /// Parse a report from JSON text. `source` names the input in errors.
    pub fn parse(json: &str, source: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .with_context(|| format!("{} is not a valid scan report", source))?;

        if let Some(error) = value.get("error") {
            let message = match error {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            bail!("{}: scanner reported an error: {}", source, message);
        }

        let is_envelope = value.get("results").is_some();
        let files = match value {
            Value::Object(_) if is_envelope => {
                serde_json::from_value::<Envelope>(value)
                    .with_context(|| format!("{} has malformed results", source))?
                    .results
            }
            Value::Array(_) => serde_json::from_value::<Vec<PanelInput>>(value)
                .with_context(|| format!("{} has a malformed file entry", source))?,
            Value::Object(_) => vec![serde_json::from_value::<PanelInput>(value)
                .with_context(|| format!("{} is not a valid scan report", source))?],
            _ => bail!("{} is not a valid scan report: expected an object or array", source),
        };

        log::info!("Loaded {} file(s) from {}", files.len(), source);
        Ok(Self { files })
    }

    /// Load a report from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read report from {:?}", path))?;
        Self::parse(&content, &path.display().to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// On-disk language table:
///
/// ```json
/// {
///   "languages": [
///     {
///       "id": "json",
///       "command": ["json-parser", "--dump"],
///       "default_source": "{ \"a\": 1 }",
///       "source_url": "https://example.com/grammars/json"
///     }
///   ]
/// }
/// ```
#[derive(Debug, Deserialize)]
pub struct LanguageTable {
    pub languages: Vec<LanguageEntry>,
}

#[derive(Debug, Deserialize)]
pub struct LanguageEntry {
    /// Identifier shown in the language selector.
    pub id: String,
    /// Argv of the external parser. It receives the source on stdin and
    /// answers with the dump on stdout and diagnostics on stderr.
    pub command: Vec<String>,
    /// Buffer seed for the language's first visit.
    #[serde(default)]
    pub default_source: String,
    /// "View grammar source" link target.
    #[serde(default)]
    pub source_url: String,
}

pub fn load(path: &Path) -> Result<LanguageTable> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read language table {}", path.display()))?;
    let table = serde_json::from_str(&content)
        .with_context(|| format!("invalid language table {}", path.display()))?;
    Ok(table)
}

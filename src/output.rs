//! Result rendering
//!
//! Two formats, both parsed by the consuming shim:
//! - line mode: each record's raw line verbatim, one per stdout line
//! - JSON mode: a single object keyed by record name, fields per record kind
//!
//! An empty result renders as nothing at all - not an empty line, not an
//! empty JSON object.

use crate::record::{Database, GroupEntry, PasswdEntry, Record, ShadowEntry};
use crate::Result;

/// Render records as raw colon-delimited lines, insertion order preserved.
pub fn render_lines(records: &[&Record]) -> String {
    let mut out = String::new();
    for record in records {
        out.push_str(record.line());
        out.push('\n');
    }
    out
}

/// Render records as the JSON object form: `{ "<name>": { ...fields } }`.
///
/// Returns `None` for an empty result so the caller prints nothing.
pub fn render_json(database: Database, records: &[&Record]) -> Result<Option<String>> {
    if records.is_empty() {
        return Ok(None);
    }

    let mut map = serde_json::Map::new();
    for record in records {
        let value = match database {
            Database::Group => serde_json::to_value(GroupEntry::parse(record.line())?)?,
            Database::Passwd => serde_json::to_value(PasswdEntry::parse(record.line())?)?,
            Database::Shadow => serde_json::to_value(ShadowEntry::parse(record.line())?)?,
        };
        map.insert(record.name().to_string(), value);
    }

    let rendered = serde_json::to_string_pretty(&serde_json::Value::Object(map))?;
    Ok(Some(rendered))
}

//! Record types - colon-delimited identity database lines
//!
//! Every record is kept verbatim as the raw line it was defined with, since
//! the consuming shim parses the line formats bit-for-bit. Alongside the raw
//! line we precompute the two fields queries key on:
//! - `name`: the first colon-separated token, unique within a table
//! - `id`: the third token (gid or uid), compared as a string
//!
//! Typed views (`GroupEntry`, `PasswdEntry`, `ShadowEntry`) parse the raw
//! line into the field structure the shim itself uses, and serialize to the
//! JSON object form it accepts as an alternative response format.

use crate::{Error, Result};
use serde::Serialize;
use std::str::FromStr;

/// The identity databases a resolver can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Database {
    Group,
    Passwd,
    Shadow,
}

impl Database {
    /// Get the string representation of the database kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Database::Group => "group",
            Database::Passwd => "passwd",
            Database::Shadow => "shadow",
        }
    }

    /// Get all database kinds
    pub fn all() -> &'static [Database] {
        &[Database::Group, Database::Passwd, Database::Shadow]
    }

    /// Minimum number of `:` separators a raw line must carry.
    ///
    /// Group lines have 4 fields, passwd 7, shadow 8 with the trailing
    /// reserved field truly optional.
    pub fn min_separators(&self) -> usize {
        match self {
            Database::Group => 3,
            Database::Passwd => 6,
            Database::Shadow => 7,
        }
    }

    /// Environment variable carrying the key for a by-name query.
    pub fn name_var(&self) -> &'static str {
        match self {
            Database::Group => "LIBNSS_SHIM_GROUP_NAME",
            Database::Passwd => "LIBNSS_SHIM_PASSWD_NAME",
            Database::Shadow => "LIBNSS_SHIM_SHADOW_NAME",
        }
    }

    /// Environment variable carrying the key for a by-id query.
    ///
    /// Shadow records have no numeric id field, so no variable exists for
    /// them and an id-shaped query matches nothing.
    pub fn id_var(&self) -> Option<&'static str> {
        match self {
            Database::Group => Some("LIBNSS_SHIM_GROUP_ID"),
            Database::Passwd => Some("LIBNSS_SHIM_PASSWD_ID"),
            Database::Shadow => None,
        }
    }
}

impl FromStr for Database {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "group" => Ok(Database::Group),
            "passwd" => Ok(Database::Passwd),
            "shadow" => Ok(Database::Shadow),
            _ => Err(Error::UnknownDatabase(s.to_string())),
        }
    }
}

impl std::fmt::Display for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One immutable identity record.
///
/// The raw line is the source of truth; `name` and `id` are cached copies of
/// the fields lookups match on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    line: String,
    name: String,
    id: String,
}

impl Record {
    /// Parse a raw colon-delimited line into a record for the given database.
    ///
    /// Validates field count and a non-empty name; field contents beyond
    /// that are accepted verbatim.
    pub fn parse(database: Database, line: &str) -> Result<Self> {
        let line = line.trim_end_matches('\n');
        if line.matches(':').count() < database.min_separators() {
            return Err(Error::InvalidRecord {
                database,
                reason: "too few fields".to_string(),
                line: line.to_string(),
            });
        }

        let mut fields = line.split(':');
        let name = fields.next().unwrap_or("").to_string();
        if name.is_empty() {
            return Err(Error::InvalidRecord {
                database,
                reason: "empty name".to_string(),
                line: line.to_string(),
            });
        }
        let id = fields.nth(1).unwrap_or("").to_string();

        Ok(Self {
            line: line.to_string(),
            name,
            id,
        })
    }

    /// The raw line, exactly as defined
    pub fn line(&self) -> &str {
        &self.line
    }

    /// First colon-separated token
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Third colon-separated token (gid/uid as a string)
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// Typed view of a group record, in the shim's field structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupEntry {
    #[serde(skip)]
    pub name: String,
    pub passwd: String,
    pub gid: u32,
    pub members: Vec<String>,
}

impl GroupEntry {
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = line.splitn(4, ':');
        let name = next_field(&mut fields);
        let passwd = next_field(&mut fields);
        let gid = parse_u32(Database::Group, line, "gid", fields.next())?;
        let members = match fields.next() {
            Some("") | None => Vec::new(),
            Some(list) => list.split(',').map(str::to_string).collect(),
        };
        Ok(Self {
            name,
            passwd,
            gid,
            members,
        })
    }
}

/// Typed view of a passwd record, in the shim's field structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswdEntry {
    #[serde(skip)]
    pub name: String,
    pub passwd: String,
    pub uid: u32,
    pub gid: u32,
    pub gecos: String,
    pub dir: String,
    pub shell: String,
}

impl PasswdEntry {
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = line.splitn(7, ':');
        let name = next_field(&mut fields);
        let passwd = next_field(&mut fields);
        let uid = parse_u32(Database::Passwd, line, "uid", fields.next())?;
        let gid = parse_u32(Database::Passwd, line, "gid", fields.next())?;
        let gecos = next_field(&mut fields);
        let dir = next_field(&mut fields);
        let shell = next_field(&mut fields);
        Ok(Self {
            name,
            passwd,
            uid,
            gid,
            gecos,
            dir,
            shell,
        })
    }
}

/// Typed view of a shadow record, in the shim's field structure.
///
/// Blank aging fields map to -1; the trailing reserved field is omitted
/// entirely when blank, matching what the shim does with missing entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShadowEntry {
    #[serde(skip)]
    pub name: String,
    pub passwd: String,
    pub last_change: i64,
    pub change_min_days: i64,
    pub change_max_days: i64,
    pub change_warn_days: i64,
    pub change_inactive_days: i64,
    pub expire_date: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reserved: Option<u64>,
}

impl ShadowEntry {
    pub fn parse(line: &str) -> Result<Self> {
        let mut fields = line.splitn(9, ':');
        let name = next_field(&mut fields);
        let passwd = next_field(&mut fields);
        let last_change = parse_days(fields.next());
        let change_min_days = parse_days(fields.next());
        let change_max_days = parse_days(fields.next());
        let change_warn_days = parse_days(fields.next());
        let change_inactive_days = parse_days(fields.next());
        let expire_date = parse_days(fields.next());
        let reserved = fields.next().and_then(|s| s.parse().ok());
        Ok(Self {
            name,
            passwd,
            last_change,
            change_min_days,
            change_max_days,
            change_warn_days,
            change_inactive_days,
            expire_date,
            reserved,
        })
    }
}

fn next_field<'a>(fields: &mut impl Iterator<Item = &'a str>) -> String {
    fields.next().unwrap_or("").to_string()
}

fn parse_u32(database: Database, line: &str, field: &str, value: Option<&str>) -> Result<u32> {
    value
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::InvalidRecord {
            database,
            reason: format!("unparseable {field}"),
            line: line.to_string(),
        })
}

fn parse_days(value: Option<&str>) -> i64 {
    value.and_then(|s| s.parse().ok()).unwrap_or(-1)
}

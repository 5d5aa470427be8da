//! Static record resolver
//!
//! One pure evaluation per invocation: scan an immutable table with a query
//! descriptor and return the matching records in table order. Every
//! unsupported shape - missing key, empty key, id query against shadow -
//! resolves to the empty sequence rather than an error, because the shim on
//! the other side reads empty output as "not found" regardless of cause.

use crate::record::{Database, Record};
use crate::table::Table;
use std::str::FromStr;

/// Query modes, mapping to the `--all` / `--name` / `--id` selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    All,
    ByName,
    ById,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::All => "all",
            Mode::ByName => "name",
            Mode::ById => "id",
        }
    }
}

impl FromStr for Mode {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Mode::All),
            "name" => Ok(Mode::ByName),
            "id" => Ok(Mode::ById),
            _ => Err(crate::Error::UnknownMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Resolve a query against a table.
///
/// - `All` returns every record in insertion order; `key` is ignored.
/// - `ByName` is an exact match on the name field, so at most one record.
/// - `ById` compares the string form of the third field and returns all
///   matches, in table order - id uniqueness is an invariant of the fixture
///   data, not an assumption of the scan. Leading zeros are significant.
///
/// A `None` or empty key resolves to no matches.
pub fn resolve<'a>(table: &'a Table, mode: Mode, key: Option<&str>) -> Vec<&'a Record> {
    let key = match mode {
        Mode::All => return table.iter().collect(),
        Mode::ByName | Mode::ById => match key {
            Some(k) if !k.is_empty() => k,
            _ => {
                tracing::debug!(database = %table.database(), %mode, "no key provided");
                return Vec::new();
            }
        },
    };

    match mode {
        Mode::ByName => table.get(key).into_iter().collect(),
        Mode::ById if table.database().id_var().is_some() => {
            table.iter().filter(|r| r.id() == key).collect()
        }
        // Shadow has no id field; an id-shaped query matches nothing
        _ => Vec::new(),
    }
}

/// Read the query key for a (database, mode) pair from the environment.
pub fn query_key(database: Database, mode: Mode) -> Option<String> {
    key_from(database, mode, |var| std::env::var(var).ok())
}

/// Env-var sourcing with the lookup injected, so the mapping is testable
/// without touching process state. Unset and empty are both "absent".
pub fn key_from<F>(database: Database, mode: Mode, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    let var = match mode {
        Mode::All => return None,
        Mode::ByName => database.name_var(),
        Mode::ById => database.id_var()?,
    };
    lookup(var).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    fn group() -> Table {
        Table::builtin(Database::Group).unwrap()
    }

    #[test]
    fn test_all_returns_every_record_in_order() {
        let table = group();
        let results = resolve(&table, Mode::All, None);
        assert_eq!(results.len(), 4);
        assert_eq!(
            results[0].line(),
            "test-shim-users:x:2000:test-shim-user-1,test-shim-user-2,test-shim-user-3"
        );
        assert_eq!(results[3].line(), "test-shim-user-3:x:2003:");
        // Key is ignored in all mode
        let keyed = resolve(&table, Mode::All, Some("test-shim-user-1"));
        assert_eq!(keyed.len(), 4);
    }

    #[test]
    fn test_by_name_exact_match() {
        let table = Table::builtin(Database::Passwd).unwrap();
        let results = resolve(&table, Mode::ByName, Some("test-shim-user-2"));
        assert_eq!(results.len(), 1);
        assert_eq!(
            results[0].line(),
            "test-shim-user-2:x:2002:2002::/home/test-shim-user-2:/bin/bash"
        );
    }

    #[test]
    fn test_by_name_misses() {
        let table = Table::builtin(Database::Shadow).unwrap();
        assert!(resolve(&table, Mode::ByName, Some("nonexistent")).is_empty());
        assert!(resolve(&table, Mode::ByName, None).is_empty());
        assert!(resolve(&table, Mode::ByName, Some("")).is_empty());
    }

    #[test]
    fn test_by_id_scans_third_field() {
        let table = group();
        let results = resolve(&table, Mode::ById, Some("2001"));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name(), "test-shim-user-1");
        assert!(resolve(&table, Mode::ById, Some("9999")).is_empty());
    }

    #[test]
    fn test_by_id_compares_strings_not_numbers() {
        let table = Table::new(Database::Group, ["padded:x:0042:"]).unwrap();
        assert!(resolve(&table, Mode::ById, Some("42")).is_empty());
        assert_eq!(resolve(&table, Mode::ById, Some("0042")).len(), 1);
    }

    #[test]
    fn test_by_id_returns_duplicates() {
        let table = Table::new(Database::Group, ["a:x:7:", "b:x:7:", "c:x:8:"]).unwrap();
        let results = resolve(&table, Mode::ById, Some("7"));
        let names: Vec<&str> = results.iter().map(|r| r.name()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_shadow_by_id_matches_nothing() {
        let table = Table::builtin(Database::Shadow).unwrap();
        // The shadow third field holds data, but id is not a defined mode
        assert!(resolve(&table, Mode::ById, Some("19879")).is_empty());
    }

    #[test]
    fn test_mode_roundtrip() {
        for mode in [Mode::All, Mode::ByName, Mode::ById] {
            let parsed: Mode = mode.as_str().parse().unwrap();
            assert_eq!(mode, parsed);
        }
        assert!("gid".parse::<Mode>().is_err());
    }

    #[test]
    fn test_key_from_variable_mapping() {
        let env = |var: &str| match var {
            "LIBNSS_SHIM_GROUP_NAME" => Some("test-shim-users".to_string()),
            "LIBNSS_SHIM_PASSWD_ID" => Some("2002".to_string()),
            "LIBNSS_SHIM_SHADOW_NAME" => Some("".to_string()),
            _ => None,
        };
        assert_eq!(
            key_from(Database::Group, Mode::ByName, env).as_deref(),
            Some("test-shim-users")
        );
        assert_eq!(
            key_from(Database::Passwd, Mode::ById, env).as_deref(),
            Some("2002")
        );
        // Empty value is treated as absent
        assert_eq!(key_from(Database::Shadow, Mode::ByName, env), None);
        // No id variable exists for shadow
        assert_eq!(key_from(Database::Shadow, Mode::ById, env), None);
        // All mode never consults the environment
        assert_eq!(key_from(Database::Group, Mode::All, env), None);
    }
}

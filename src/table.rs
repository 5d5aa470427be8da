//! Fixture tables - fixed, insertion-ordered record sets
//!
//! A table is built once at startup and never mutated. `--all` iteration
//! replays insertion order, so the literals below are listed exactly in the
//! order the shim's test suite expects them back.

use crate::record::{Database, Record};
use crate::{Error, Result};

/// Built-in group fixtures. The aggregate group lists every test user as a
/// member; the per-user groups carry empty member lists.
const GROUP_LINES: [&str; 4] = [
    "test-shim-users:x:2000:test-shim-user-1,test-shim-user-2,test-shim-user-3",
    "test-shim-user-1:x:2001:",
    "test-shim-user-2:x:2002:",
    "test-shim-user-3:x:2003:",
];

const PASSWD_LINES: [&str; 3] = [
    "test-shim-user-1:x:2001:2001::/home/test-shim-user-1:/bin/bash",
    "test-shim-user-2:x:2002:2002::/home/test-shim-user-2:/bin/bash",
    "test-shim-user-3:x:2003:2003::/home/test-shim-user-3:/bin/bash",
];

// Each test user's password is the same as its username
const SHADOW_LINES: [&str; 3] = [
    "test-shim-user-1:$y$j9T$mpqMRQPh51zsMQlg6Koa5/$iYcT2urasxmk99rWCuahIEcNEQDGZcVN0876t80XUm2:19879:0:99999:7:::",
    "test-shim-user-2:$y$j9T$SEsXgfv/SUN3EZQJqLfIA/$mG9uKqlqDOqY2oYzuu1O89nmf1BiYs2//3rPof97vq9:19879:0:99999:7:::",
    "test-shim-user-3:$y$j9T$loMKkB7paRkhAPE7VUa9I.$7CoM0O7XZASdb4olZ8w3YkyjMw2TpoBjlUynOXDLOEB:19879:0:99999:7:::",
];

/// An insertion-ordered, read-only set of records for one database.
#[derive(Debug, Clone)]
pub struct Table {
    database: Database,
    records: Vec<Record>,
}

impl Table {
    /// Build a table from raw lines, validating each record and enforcing
    /// name uniqueness.
    pub fn new<I, S>(database: Database, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut records: Vec<Record> = Vec::new();
        for line in lines {
            let record = Record::parse(database, line.as_ref())?;
            if records.iter().any(|r| r.name() == record.name()) {
                return Err(Error::DuplicateEntry {
                    database,
                    name: record.name().to_string(),
                });
            }
            records.push(record);
        }
        Ok(Self { database, records })
    }

    /// The built-in fixture table for a database.
    pub fn builtin(database: Database) -> Result<Self> {
        match database {
            Database::Group => Self::new(database, GROUP_LINES),
            Database::Passwd => Self::new(database, PASSWD_LINES),
            Database::Shadow => Self::new(database, SHADOW_LINES),
        }
    }

    pub fn database(&self) -> Database {
        self.database
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.records.iter()
    }

    /// Exact-match lookup on the name field
    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sizes() {
        assert_eq!(Table::builtin(Database::Group).unwrap().len(), 4);
        assert_eq!(Table::builtin(Database::Passwd).unwrap().len(), 3);
        assert_eq!(Table::builtin(Database::Shadow).unwrap().len(), 3);
    }

    #[test]
    fn test_builtin_group_order() {
        let table = Table::builtin(Database::Group).unwrap();
        let names: Vec<&str> = table.iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec![
                "test-shim-users",
                "test-shim-user-1",
                "test-shim-user-2",
                "test-shim-user-3",
            ]
        );
    }

    #[test]
    fn test_get_exact_match() {
        let table = Table::builtin(Database::Passwd).unwrap();
        let rec = table.get("test-shim-user-2").unwrap();
        assert_eq!(
            rec.line(),
            "test-shim-user-2:x:2002:2002::/home/test-shim-user-2:/bin/bash"
        );
        assert!(table.get("test-shim-user").is_none());
        assert!(table.get("TEST-SHIM-USER-2").is_none());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = Table::new(Database::Group, ["dup:x:1:", "dup:x:2:"]);
        assert!(matches!(result, Err(Error::DuplicateEntry { .. })));
    }
}

//! Optional fixture-file loading
//!
//! The built-in tables cover the stock test users. A TOML file can replace
//! any of them per database:
//!
//! ```toml
//! [group]
//! entries = ["staff:x:50:alice,bob"]
//!
//! [passwd]
//! entries = ["alice:x:1000:50::/home/alice:/bin/zsh"]
//! ```
//!
//! Sections left out fall back to the built-ins. A malformed file or an
//! invalid record line is an operator error and fails loudly, unlike query
//! misses which stay silent.

use crate::record::Database;
use crate::table::Table;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Fixtures {
    pub group: Option<FixtureTable>,
    pub passwd: Option<FixtureTable>,
    pub shadow: Option<FixtureTable>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FixtureTable {
    pub entries: Vec<String>,
}

pub fn load_fixtures(path: &Path) -> anyhow::Result<Fixtures> {
    let contents = std::fs::read_to_string(path)?;
    let fixtures: Fixtures = toml::from_str(&contents)?;
    Ok(fixtures)
}

/// Build the table for a database: the fixture-file override when one is
/// present, the built-in literals otherwise.
pub fn table_for(fixtures: Option<&Fixtures>, database: Database) -> anyhow::Result<Table> {
    let override_lines = fixtures.and_then(|f| match database {
        Database::Group => f.group.as_ref(),
        Database::Passwd => f.passwd.as_ref(),
        Database::Shadow => f.shadow.as_ref(),
    });

    let table = match override_lines {
        Some(fixture) => Table::new(database, &fixture.entries)?,
        None => Table::builtin(database)?,
    };
    Ok(table)
}

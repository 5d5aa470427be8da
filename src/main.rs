//! shim-resolver CLI - static identity lookups for NSS shim testing

use clap::error::ErrorKind;
use clap::Parser;
use shim_resolver::{config, output, resolver, Database, Mode};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "shim-resolver")]
#[command(version)]
#[command(about = "Static user/group/shadow record resolver for NSS shim testing")]
#[command(long_about = r#"
Serves fixed identity records the way an NSS shim expects a backend command
to: pick one database and one query mode, and matching records land on
stdout as colon-delimited lines (or, with --json, as the JSON object form).
The lookup key comes from an environment variable named after the database
and mode, e.g. LIBNSS_SHIM_PASSWD_NAME for `--passwd --name`.

Empty output means "not found" - the process exits successfully either way,
and an unsupported query shape is treated the same as a miss.

Example usage:
  shim-resolver --group --all
  LIBNSS_SHIM_PASSWD_NAME=test-shim-user-2 shim-resolver --passwd --name
  LIBNSS_SHIM_GROUP_ID=2001 shim-resolver --group --id
"#)]
struct Cli {
    /// Query the group database
    #[arg(long)]
    group: bool,

    /// Query the passwd database
    #[arg(long)]
    passwd: bool,

    /// Query the shadow database
    #[arg(long)]
    shadow: bool,

    /// Print every record in the table
    #[arg(long)]
    all: bool,

    /// Look up one record by name (key from LIBNSS_SHIM_<DB>_NAME)
    #[arg(long)]
    name: bool,

    /// Look up records by numeric id (key from LIBNSS_SHIM_<DB>_ID)
    #[arg(long)]
    id: bool,

    /// Replace built-in tables with entries from a TOML file
    #[arg(long, value_name = "PATH")]
    fixtures: Option<PathBuf>,

    /// Render matches as a JSON object instead of colon-delimited lines
    #[arg(long)]
    json: bool,

    /// Enable verbose logging (stderr)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Exactly one database selector, or the query shape is unsupported.
    fn database(&self) -> Option<Database> {
        match (self.group, self.passwd, self.shadow) {
            (true, false, false) => Some(Database::Group),
            (false, true, false) => Some(Database::Passwd),
            (false, false, true) => Some(Database::Shadow),
            _ => None,
        }
    }

    /// Exactly one mode selector, or the query shape is unsupported.
    fn mode(&self) -> Option<Mode> {
        match (self.all, self.name, self.id) {
            (true, false, false) => Some(Mode::All),
            (false, true, false) => Some(Mode::ByName),
            (false, false, true) => Some(Mode::ById),
            _ => None,
        }
    }
}

fn main() -> anyhow::Result<()> {
    // An unparseable invocation is an unsupported query shape: the shim
    // reads empty output as "not found", so stay silent and exit clean.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err)
            if err.kind() == ErrorKind::DisplayHelp
                || err.kind() == ErrorKind::DisplayVersion =>
        {
            err.print()?;
            return Ok(());
        }
        Err(_) => return Ok(()),
    };

    // Logging goes to stderr; stdout carries only record data.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let Some(database) = cli.database() else {
        tracing::debug!("no single database selected");
        return Ok(());
    };
    let Some(mode) = cli.mode() else {
        tracing::debug!(%database, "no single query mode selected");
        return Ok(());
    };

    let fixtures = cli
        .fixtures
        .as_deref()
        .map(config::load_fixtures)
        .transpose()?;
    let table = config::table_for(fixtures.as_ref(), database)?;

    let key = resolver::query_key(database, mode);
    let matches = resolver::resolve(&table, mode, key.as_deref());
    tracing::debug!(%database, %mode, matches = matches.len(), "resolved");

    if cli.json {
        if let Some(rendered) = output::render_json(database, &matches)? {
            println!("{rendered}");
        }
    } else {
        print!("{}", output::render_lines(&matches));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("shim-resolver").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_selectors() {
        let cli = parse(&["--group", "--all"]);
        assert_eq!(cli.database(), Some(Database::Group));
        assert_eq!(cli.mode(), Some(Mode::All));

        let cli = parse(&["--shadow", "--name"]);
        assert_eq!(cli.database(), Some(Database::Shadow));
        assert_eq!(cli.mode(), Some(Mode::ByName));
    }

    #[test]
    fn test_ambiguous_or_missing_selectors_are_unsupported() {
        let cli = parse(&["--group", "--passwd", "--all"]);
        assert_eq!(cli.database(), None);

        let cli = parse(&["--passwd"]);
        assert_eq!(cli.mode(), None);

        let cli = parse(&["--all", "--id"]);
        assert_eq!(cli.mode(), None);
    }

    #[test]
    fn test_unknown_flags_fail_parse() {
        assert!(Cli::try_parse_from(["shim-resolver", "--hosts", "--all"]).is_err());
    }
}

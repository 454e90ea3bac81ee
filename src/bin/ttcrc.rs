//! Audit the checksums of a batman-adv global translation table dump.
//!
//! Usage:
//!   ttcrc [OPTIONS] <DUMP>
//!
//! `DUMP` is the output of `batctl tg` (or the `transtable_global` debugfs
//! file); `-` reads it from stdin. One line per (originator, vid) goes to
//! stdout; logs go to stderr and follow `RUST_LOG` or `-v`.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use ttcrc::{audit, parse_dump, parse_dump_file, write_report, GroupTable, ReportOptions, TtEntry};

#[derive(Parser, Debug)]
#[command(name = "ttcrc")]
#[command(version, about = "Recompute batman-adv global TT checksums and compare them with a dump", long_about = None)]
struct Cli {
    /// Global translation table dump (`-` for stdin)
    #[arg(value_name = "DUMP")]
    dump: PathBuf,

    /// Do not print the number of records per group
    #[arg(long)]
    omit_count: bool,

    /// Only print groups whose checksum does not match
    #[arg(long)]
    fail_only: bool,

    /// Print each entry's checksum contribution
    #[arg(long)]
    entries: bool,

    /// Print group totals to stderr when done
    #[arg(long)]
    summary: bool,

    /// Exit with status 1 if any group does not match
    #[arg(long)]
    exit_code: bool,

    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_entries(path: &Path) -> anyhow::Result<Vec<TtEntry>> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("reading dump from stdin")?;
        return parse_dump(&text).context("parsing dump from stdin");
    }
    Ok(parse_dump_file(path)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let entries = load_entries(&cli.dump)?;
    tracing::info!(entries = entries.len(), "dump parsed");

    let table = GroupTable::build(entries);
    let results = audit(&table);

    let opts = ReportOptions {
        omit_count: cli.omit_count,
        fail_only: cli.fail_only,
        show_entries: cli.entries,
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let summary = write_report(&mut out, &results, &opts)?;

    drop(out);

    if cli.summary {
        eprintln!("{}", summary);
    }
    if cli.exit_code && summary.fail > 0 {
        std::process::exit(1);
    }
    Ok(())
}

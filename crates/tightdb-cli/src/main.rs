//   Copyright (c) 2024-2026 Anton Kundenko <singaraiona@gmail.com>
//   All rights reserved.
//
//   Permission is hereby granted, free of charge, to any person obtaining a copy
//   of this software and associated documentation files (the "Software"), to deal
//   in the Software without restriction, including without limitation the rights
//   to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
//   copies of the Software, and to permit persons to whom the Software is
//   furnished to do so, subject to the following conditions:
//
//   The above copyright notice and this permission notice shall be included in all
//   copies or substantial portions of the Software.
//
//   THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
//   IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//   FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
//   AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
//   LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
//   OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
//   SOFTWARE.

mod theme;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tightdb::{calllog, AbiWidth, Context, DataType, LoadConfig, MixedValue, RowSet};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tightdb-probe", version, about = "Inspect and verify the TightDB native binding")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the host ABI and where the library is looked for
    Info(Source),
    /// Load the library and run the interop self-test
    Selftest(Source),
    /// Run a short table, mixed-cell and group workload
    Smoke {
        #[command(flatten)]
        source: Source,
        /// Write the foreign call log to this file
        #[arg(long)]
        log: Option<PathBuf>,
    },
}

#[derive(Args)]
struct Source {
    /// Exact path of the native library
    #[arg(long)]
    lib: Option<PathBuf>,
    /// Extra directory to search (repeatable)
    #[arg(long = "dir")]
    dirs: Vec<PathBuf>,
    /// Use the in-process engine instead of a library
    #[arg(long, conflicts_with_all = ["lib", "dirs"])]
    simulated: bool,
}

impl Source {
    fn config(&self) -> LoadConfig {
        let mut config = LoadConfig::from_env();
        if let Some(lib) = &self.lib {
            config = config.with_library(lib);
        }
        for dir in &self.dirs {
            config = config.with_search_dir(dir);
        }
        config
    }

    fn context(&self) -> tightdb::Result<Context> {
        if self.simulated {
            return Context::with_entry_points(tightdb_testkit::entry_points());
        }
        Context::load(&self.config())
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Command::Info(source) => {
            info(source);
            Ok(())
        }
        Command::Selftest(source) => selftest(source),
        Command::Smoke { source, log } => smoke(source, log.as_ref()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e}", theme::fail().paint("error:"));
            ExitCode::FAILURE
        }
    }
}

fn field(name: &str, value: impl std::fmt::Display) {
    println!("  {} {value}", theme::label().paint(format!("{name:<10}")));
}

fn info(source: &Source) {
    let config = source.config();
    println!("{}", theme::title().paint("tightdb native binding"));
    let abi = AbiWidth::host();
    field("abi", abi);
    field("library", abi.library_name());
    if let Some(lib) = &config.library {
        field("explicit", theme::path().paint(lib.display().to_string()));
        return;
    }
    println!("  {}", theme::label().paint("search path"));
    for dir in config.search_path() {
        println!("    {}", theme::path().paint(dir.display().to_string()));
    }
    println!("  {}", theme::label().paint("file names"));
    for name in config.candidate_file_names() {
        println!("    {name}");
    }
}

fn selftest(source: &Source) -> tightdb::Result<()> {
    let ctx = source.context()?;
    println!(
        "{} {} (binding version {})",
        theme::title().paint("interop self-test"),
        ctx.abi(),
        ctx.native_version()
    );
    for check in ctx.interop_checks() {
        println!("  {} {check}", theme::pass().paint("ok"));
    }
    println!(
        "{}",
        theme::pass().paint(format!("{} checks passed", ctx.interop_checks().len()))
    );
    Ok(())
}

fn smoke(source: &Source, log: Option<&PathBuf>) -> tightdb::Result<()> {
    let ctx = source.context()?;
    if log.is_some() {
        calllog::enable("-- tightdb-probe smoke");
    }

    let t = ctx.new_table()?;
    t.add_column(DataType::Int, "a")?;
    t.add_column(DataType::Mixed, "m")?;
    t.add_empty_row(3)?;
    for (r, v) in [5, 7, 9].into_iter().enumerate() {
        t.set_int(0, r as u64, v)?;
    }
    let hit = t.find_first_int(0, 7)?;
    println!("  {} find_first_int(7) = {hit:?}", theme::pass().paint("ok"));

    t.set_mixed(1, 0, &MixedValue::from("hello"))?;
    let tag = t.mixed_type(1, 0)?;
    match t.get_mixed_string(1, 0) {
        Ok(text) => println!("  {} mixed cell holds {tag} {text:?}", theme::pass().paint("ok")),
        Err(tightdb::Error::NotImplemented(what)) => println!(
            "  {} mixed cell holds {tag} ({} not available)",
            theme::pass().paint("ok"),
            theme::hint().paint(what)
        ),
        Err(e) => return Err(e),
    }

    let path = std::env::temp_dir().join(format!("tightdb-probe-{}.tightdb", std::process::id()));
    {
        let g = ctx.new_group()?;
        let gt = g.table("T")?;
        gt.add_column(DataType::String, "name")?;
        g.write(&path)?;
    }
    let reopened = ctx.open_group(&path)?;
    let columns = reopened.table("T")?.column_count()?;
    drop(reopened);
    if let Err(e) = std::fs::remove_file(&path) {
        tracing::warn!(path = %path.display(), error = %e, "could not remove group file");
    }
    println!("  {} group round trip kept {columns} column(s)", theme::pass().paint("ok"));

    if let Some(log) = log {
        calllog::disable();
        if let Err(e) = calllog::save_file(log) {
            tracing::warn!(path = %log.display(), error = %e, "could not save call log");
        } else {
            println!(
                "  {} {}",
                theme::hint().paint("call log written to"),
                theme::path().paint(log.display().to_string())
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_line_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn simulated_conflicts_with_a_library_path() {
        let parsed = Cli::try_parse_from(["tightdb-probe", "selftest", "--simulated", "--lib", "x.so"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn library_options_reach_the_config() {
        let cli = Cli::try_parse_from([
            "tightdb-probe",
            "info",
            "--dir",
            "/opt/tightdb",
            "--lib",
            "/opt/tightdb/libcustom.so",
        ])
        .unwrap();
        let Command::Info(source) = cli.command else {
            panic!("expected info");
        };
        let config = source.config();
        assert!(config.search_dirs.contains(&PathBuf::from("/opt/tightdb")));
        assert_eq!(config.library, Some(PathBuf::from("/opt/tightdb/libcustom.so")));
    }

    #[test]
    fn abi_is_not_selectable() {
        let parsed = Cli::try_parse_from(["tightdb-probe", "info", "--abi", "narrow"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn simulated_selftest_passes() {
        let cli = Cli::try_parse_from(["tightdb-probe", "selftest", "--simulated"]).unwrap();
        let Command::Selftest(source) = cli.command else {
            panic!("expected selftest");
        };
        assert!(selftest(&source).is_ok());
    }
}

//! doxml — convert Doxygen comments in source files to XML doc comments.
//!
//! Each file is converted in place. A file is only replaced after its whole
//! conversion succeeded; a file that fails is reported and left untouched
//! while the rest of the batch carries on.

mod files;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use doxml::ConvertOptions;
use files::{Mode, RunConfig};
use rayon::prelude::*;
use std::io::{self, Write};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "doxml",
    version,
    about = "Convert Doxygen doc comments into XML doc comments"
)]
struct Cli {
    /// Input files, directories or glob patterns.
    files: Vec<String>,

    /// Copy each original to <file>.bak before replacing it
    #[arg(long)]
    backup: bool,

    /// Print converted text to stdout instead of rewriting files
    #[arg(long, conflicts_with = "check")]
    stdout: bool,

    /// Report files that would change and exit 1 if any would; write nothing
    #[arg(long)]
    check: bool,

    /// Fail a file on @param lines without a description
    #[arg(long)]
    strict: bool,

    /// Treat unmarked text before the first directive as the brief summary
    #[arg(long)]
    implicit_brief: bool,

    /// Suppress the per-file report
    #[arg(short = 'q', long)]
    quiet: bool,

    /// Worker threads (0 = one per CPU)
    #[arg(short = 'j', long, default_value_t = 0)]
    jobs: usize,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // --verbose forces debug, otherwise RUST_LOG or warn
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if cli.files.is_empty() {
        println!("Please specify an input file.");
        Cli::command().print_help()?;
        return Ok(());
    }

    let config = RunConfig {
        convert: ConvertOptions {
            strict: cli.strict,
            implicit_brief: cli.implicit_brief,
        },
        mode: if cli.stdout {
            Mode::Stdout
        } else if cli.check {
            Mode::Check
        } else {
            Mode::InPlace
        },
        backup: cli.backup,
    };

    let paths = files::expand_globs(&cli.files)?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.jobs)
        .build()
        .context("failed to start worker threads")?;
    let results: Vec<_> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| (path, files::convert_file(path, &config)))
            .collect()
    });

    let mut failed = false;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (path, result) in results {
        let report = match result {
            Ok(report) => report,
            Err(e) => {
                eprintln!("error: {:#}", e);
                failed = true;
                continue;
            }
        };

        for warning in &report.conversion.warnings {
            eprintln!("warning: {}:{}", path.display(), warning);
        }

        match config.mode {
            Mode::Stdout => {
                out.write_all(report.conversion.output.as_bytes())?;
            }
            Mode::Check => {
                if report.changed {
                    writeln!(out, "would convert: {}", path.display())?;
                    failed = true;
                }
            }
            Mode::InPlace => {
                if !cli.quiet {
                    writeln!(out, "{}", path.display())?;
                    writeln!(
                        out,
                        "{} comment blocks converted within {} lines in approx {:.2} seconds.",
                        report.conversion.blocks,
                        report.conversion.lines,
                        report.elapsed.as_secs_f64()
                    )?;
                    writeln!(out, "-----")?;
                }
            }
        }
    }
    out.flush()?;

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

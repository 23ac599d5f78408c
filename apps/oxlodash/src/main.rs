use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::{debug, info};
use oxlodash_optimize::Config;
use std::io::{BufWriter, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "oxlodash")]
#[command(about = "Keeps lodash out of your bundles by importing only what is used", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Rewrite whole-library lodash imports into per-function imports
    Optimize(Config),
}

fn main() -> Result<()> {
    env_logger::init();

    // stdio is blocked by LineWriter, use a BufWriter to reduce syscalls.
    // See https://github.com/rust-lang/rust/issues/60673
    let mut stdout = BufWriter::new(std::io::stdout());

    let cli = Cli::parse();
    debug!("Parsed CLI arguments: {:?}", cli.command);

    let start = Instant::now();

    match cli.command {
        Commands::Optimize(cfg) => {
            let num_threads = rayon::current_num_threads();
            info!("Running lodash import optimization (using {} threads)", num_threads);
            debug!("Config: {:?}", cfg);

            let json = cfg.json;
            let result = oxlodash_optimize::run_optimize(cfg)?;
            let elapsed_ms = start.elapsed().as_millis();

            if json {
                oxlodash_optimize::print_json(&mut stdout, &result)?;
            } else {
                if result.files.is_empty() {
                    oxlodash_optimize::print_nothing_to_do_message(&mut stdout)?;
                } else {
                    oxlodash_optimize::print_report(&mut stdout, &result)?;
                }
                writeln!(
                    stdout,
                    "\n{} Finished in {}ms on {} files (using {} threads).",
                    "●".bright_blue(),
                    elapsed_ms.to_string().cyan(),
                    result.files_analyzed.to_string().cyan(),
                    num_threads.to_string().cyan()
                )?;
            }
            stdout.flush()?;

            // Non-zero exit to fail CI on pending rewrites or broken files
            let pending = !result.written && result.changed_count() > 0;
            if pending || result.failed_count() > 0 {
                std::process::exit(1);
            }

            Ok(())
        }
    }
}

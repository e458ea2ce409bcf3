use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bruker_peaklist::{parse_file, write_file, PeakList, WriteOptions};
use clap::{Parser, Subcommand};
use log::info;

/// Inspect and rewrite Bruker `PeakList.xml` files
#[derive(Parser)]
#[command(name = "peaklist")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the contents of a peak list file
    Show {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print JSON instead of a text summary
        #[arg(long)]
        json: bool,
    },

    /// Parse a peak list file and write it back out
    Roundtrip {
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Omit the <?xml ...?> declaration
        #[arg(long)]
        no_declaration: bool,

        /// Spaces per indentation level (0 writes a single line)
        #[arg(long, default_value_t = 2)]
        indent: usize,
    },
}

fn load(path: &Path) -> Result<PeakList> {
    parse_file(path)
        .with_context(|| format!("Failed to parse {}", path.display()))?
        .with_context(|| format!("No <PeakList> element in {}", path.display()))
}

fn print_summary(path: &Path, peak_list: &PeakList) {
    println!("Peak list: {}", path.display());
    match peak_list.modified {
        Some(modified) => println!("Modified: {}", modified),
        None => println!("Modified: <none>"),
    }
    println!("Lists: {}", peak_list.children.len());

    for (i, list) in peak_list.children.iter().enumerate() {
        let header = &list.header;
        println!("\nPeakList1D #{}", i + 1);
        println!("  Name: {}", header.name.as_deref().unwrap_or("<none>"));
        println!("  Creator: {}", header.creator.as_deref().unwrap_or("<none>"));
        println!("  Owner: {}", header.owner.as_deref().unwrap_or("<none>"));
        println!("  Source: {}", header.source.as_deref().unwrap_or("<none>"));
        if let Some(date) = header.date {
            println!("  Date: {}", date);
        }
        if let (Some(exp_no), Some(proc_no)) = (header.exp_no, header.proc_no) {
            println!("  Experiment/Processing: {}/{}", exp_no, proc_no);
        }
        if let Some(details) = &header.details {
            println!("  Pick details: {}", details.to_content());
        }
        println!("  Peaks: {}", list.peaks.len());
        for peak in &list.peaks {
            let value = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
            println!(
                "    F1={:>12}  intensity={:>14}  type={}",
                value(peak.f1),
                value(peak.intensity),
                peak.peak_type.map_or_else(|| "-".to_string(), |t| t.to_string())
            );
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Show { file, json } => {
            let peak_list = load(&file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&peak_list)?);
            } else {
                print_summary(&file, &peak_list);
            }
        }
        Commands::Roundtrip {
            input,
            output,
            no_declaration,
            indent,
        } => {
            let peak_list = load(&input)?;
            let options = WriteOptions {
                declaration: !no_declaration,
                indent: (indent > 0).then_some(indent),
            };
            write_file(&peak_list, &output, &options)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(
                "Wrote {} lists ({} peaks) to {}",
                peak_list.children.len(),
                peak_list.peak_count(),
                output.display()
            );
        }
    }

    Ok(())
}

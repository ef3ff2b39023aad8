//! Clean command - decode, clean and write a data file.

use std::path::{Path, PathBuf};

use colored::Colorize;
use tidytab::{Cleaner, CleanerConfig, CleaningResult, ParserConfig, Writer};

/// Arguments for the clean command.
pub struct CleanArgs {
    pub file: PathBuf,
    pub output: Option<PathBuf>,
    pub report: Option<PathBuf>,
    pub delimiter: Option<u8>,
    pub json: bool,
    pub dry_run: bool,
}

pub fn run(args: CleanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = CleanerConfig {
        parser: ParserConfig {
            delimiter: args.delimiter,
            ..ParserConfig::default()
        },
    };

    let result = Cleaner::with_config(config).clean_file(&args.file)?;
    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&args.file));

    if !args.dry_run {
        Writer::new().to_path(&result.table, &output_path)?;

        if let Some(report_path) = &args.report {
            std::fs::write(report_path, result.report.to_json()?)?;
        }
    }

    if args.json {
        println!("{}", result.report.to_json()?);
    } else {
        print_summary(&result, &output_path, &args);
    }

    Ok(())
}

/// `<dir>/<stem>_cleaned.csv` beside the input.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    input.with_file_name(format!("{}_cleaned.csv", stem))
}

fn print_summary(result: &CleaningResult, output_path: &Path, args: &CleanArgs) {
    let report = &result.report;
    let summary = &result.summary;

    println!(
        "{} {}",
        "Cleaned".cyan().bold(),
        result.source.file.white()
    );
    println!();

    println!("{}", "Structure:".yellow().bold());
    println!(
        "  Rows:     {} -> {}",
        summary.rows_before,
        summary.rows_after.to_string().white().bold()
    );
    println!(
        "  Columns:  {} -> {}",
        summary.columns_before,
        summary.columns_after.to_string().white().bold()
    );
    println!(
        "  Duplicate rows removed: {}",
        report.duplicates_removed.to_string().red()
    );
    println!(
        "  Empty rows removed:     {}",
        report.empty_rows_removed.to_string().red()
    );
    println!(
        "  Empty columns removed:  {}",
        report.empty_columns_removed.to_string().red()
    );
    if report.whitespace_trimmed {
        println!("  Whitespace trimmed in text columns");
    }
    println!();

    let renamed: Vec<_> = report.renamed_columns().collect();
    if !renamed.is_empty() {
        println!("{}", "Renamed columns:".yellow().bold());
        for (before, after) in renamed {
            println!("  {:?} -> {}", before, after.green());
        }
        println!();
    }

    if report.conversions() > 0 {
        println!("{}", "Type conversions:".yellow().bold());
        for (label, columns) in [
            ("numeric", &report.numeric_converted),
            ("datetime", &report.datetime_converted),
            ("boolean", &report.boolean_converted),
        ] {
            if !columns.is_empty() {
                println!("  {:<9} {}", label, columns.join(", ").blue());
            }
        }
        println!();
    }

    if args.dry_run {
        println!("{} no files written", "Dry run:".yellow());
    } else {
        println!("Wrote {}", output_path.display().to_string().green());
        if let Some(report_path) = &args.report {
            println!("Report {}", report_path.display().to_string().green());
        }
    }
}

//! The batch conversion pipeline, wired in processing order: layout,
//! discovery, per-file convert/write/archive, optional bundling.

use crate::archive::archive_source;
use crate::bundle::{BundleMode, Bundler};
use crate::discover::find_csv_files;
use crate::error::LinkerResult;
use crate::excel::WorkbookWriter;
use crate::layout::ScanDirs;
use crate::prompt;
use crate::transform::load_scan_csv;
use crate::types::{FileOutcome, RunConfig, RunReport};
use colored::Colorize;
use std::path::{Path, PathBuf};

/// Status line, the `[+]` convention.
fn status(message: impl AsRef<str>) {
    println!("{} {}", "[+]".green().bold(), message.as_ref());
}

/// Problem line, the `[-]` convention.
fn problem(message: impl AsRef<str>) {
    eprintln!("{} {}", "[-]".red().bold(), message.as_ref());
}

fn banner() {
    println!("{}", "Nessus CSV Report Beautifier and Zip".bold().green());
    println!("Converts Nessus scan results from csv to xlsx, links every Plugin ID to its");
    println!("Tenable advisory page, and can bundle the workbooks into a password protected zip.");
    println!();
}

/// Run the whole pipeline. Startup layout errors are fatal; per-file errors
/// abort that file only and land in the report; bundle errors are reported
/// without rolling back the converted workbooks.
pub fn run(config: &RunConfig) -> LinkerResult<RunReport> {
    banner();

    status("Checking for ScanResults directory");
    let dirs = ScanDirs::under(&config.base_dir);
    let created = dirs.ensure()?;
    if created.is_empty() {
        status("ScanResults directory found!");
    } else {
        for dir in &created {
            status(format!("Created {}", dir.display()));
        }
    }
    println!(
        "Place one or more Nessus csv scan results in {}.",
        dirs.incoming.display()
    );
    println!();

    let mut report = RunReport::default();

    if !config.assume_yes {
        let stdin = std::io::stdin();
        let confirmed = prompt::confirm(&mut stdin.lock(), &mut std::io::stdout())?;
        if !confirmed {
            status("Goodbye!");
            report.declined = true;
            return Ok(report);
        }
        println!();
    }

    status("Looking for csv files...");
    let sources = find_csv_files(&dirs.incoming)?;
    if sources.is_empty() {
        problem(
            "No csv files were found; copy Nessus csv results into ScanResults and try again.",
        );
        return Ok(report);
    }
    status(format!("{} csv file(s) found.", sources.len()));
    println!();

    for source in sources {
        let result = convert_one(&source, &dirs, config.verbose);
        if let Err(e) = &result {
            problem(format!("Skipping {}: {e}", source.display()));
        }
        report.outcomes.push(FileOutcome { source, result });
    }

    let converted = report.converted();
    println!();
    status(format!(
        "Complete; {} csv file(s) converted into xlsx and located at {}.",
        converted.len(),
        dirs.converted.display()
    ));
    if report.failure_count() > 0 {
        problem(format!(
            "{} csv file(s) failed to convert.",
            report.failure_count()
        ));
    }

    if config.zip && !converted.is_empty() {
        println!();
        status("Starting zip and password process.");
        match bundle_outputs(config, &dirs, &converted) {
            Ok(bundles) => {
                for bundle in &bundles {
                    status(format!(
                        "{} created in {}",
                        bundle
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_default(),
                        dirs.converted.display()
                    ));
                }
                report.bundles = bundles;
            }
            Err(e) => {
                problem(format!("Bundling failed: {e}"));
                report.bundle_error = Some(e);
            }
        }
    }

    println!();
    println!("Finished - goodbye!");
    Ok(report)
}

/// Convert one csv: parse, linkify, write the workbook, archive the source.
/// The workbook write and the archive move are independent steps; a failed
/// move never removes the workbook that was already written.
fn convert_one(source: &Path, dirs: &ScanDirs, verbose: bool) -> LinkerResult<PathBuf> {
    let filename = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    status(format!("Processing {filename}"));

    let mut table = load_scan_csv(source)?;
    table.linkify();
    if verbose {
        status(format!(
            "{} row(s), {} column(s)",
            table.row_count(),
            table.column_count()
        ));
    }

    let workbook_path = dirs.converted.join(format!("{}.xlsx", file_stem(source)));
    WorkbookWriter::new(table).write(&workbook_path)?;
    status("Processing complete.");

    status(format!("Moving {filename} to {}.", dirs.archived.display()));
    archive_source(source, &dirs.archived)?;

    Ok(workbook_path)
}

/// Bundle the converted workbooks. More than one workbook goes into a single
/// named archive; exactly one gets its own archive named after it. The
/// passphrase and archive name come from the config when pre-supplied and
/// from the console otherwise.
fn bundle_outputs(
    config: &RunConfig,
    dirs: &ScanDirs,
    workbooks: &[PathBuf],
) -> LinkerResult<Vec<PathBuf>> {
    let mut bundler = Bundler::new(dirs.converted.clone());

    if config.password_protect {
        let passphrase = match &config.passphrase {
            Some(secret) => secret.clone(),
            None => {
                let stdin = std::io::stdin();
                prompt::read_passphrase(&mut stdin.lock(), &mut std::io::stdout())?
            }
        };
        bundler = bundler.with_passphrase(passphrase);
    }

    let mode = if workbooks.len() > 1 {
        let name = match &config.bundle_name {
            Some(name) => name.clone(),
            None => {
                let stdin = std::io::stdin();
                prompt::read_bundle_name(&mut stdin.lock(), &mut std::io::stdout())?
            }
        };
        BundleMode::Single { name }
    } else {
        BundleMode::PerFile
    };

    bundler.bundle(workbooks, mode)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

use clap::Parser;
use colored::Colorize;
use nessus_linker::cli;
use nessus_linker::types::RunConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nessus-linker")]
#[command(about = "Convert Nessus csv scan exports to styled xlsx workbooks, with optional zip bundling.")]
#[command(long_about = "nessus-linker - Nessus CSV Report Beautifier and Zip

Converts Nessus scan results from csv to xlsx and rewrites every Plugin ID
into a hyperlink, so admins can click through to the Tenable advisory page
straight from the spreadsheet. Adds color to the header row and can bundle
the converted workbooks into a zip, optionally AES password protected.

DIRECTORY LAYOUT (created under your home directory, or --base-dir):
  ScanResults/                 incoming csv files
  ScanResults/ModifiedResults/ converted workbooks and bundles
  ScanResults/OldResults/      archived (processed) csv files

EXAMPLES:
  nessus-linker                         # convert everything in ScanResults
  nessus-linker --zip                   # and bundle the workbooks
  nessus-linker -z -p                   # encrypted bundle, prompted passphrase
  nessus-linker -z -p --passphrase s3cret --yes   # fully non-interactive")]
#[command(version)]
struct Cli {
    /// Bundle the converted workbooks into zip archive(s)
    #[arg(short, long)]
    zip: bool,

    /// Password protect the bundle with AES encryption (requires --zip)
    #[arg(short, long, alias = "password_protect", requires = "zip")]
    password_protect: bool,

    /// Bundle passphrase; skips the interactive confirmation prompt
    #[arg(
        long,
        env = "NESSUS_LINKER_PASSPHRASE",
        hide_env_values = true,
        requires = "password_protect"
    )]
    passphrase: Option<String>,

    /// Name for a multi-file bundle; skips the interactive prompt
    #[arg(long, requires = "zip", value_name = "NAME")]
    bundle_name: Option<String>,

    /// Directory the ScanResults tree lives under [default: your home directory]
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Skip the "Ready to continue?" confirmation
    #[arg(short = 'y', long)]
    yes: bool,

    /// Show verbose processing steps
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let base_dir = match cli.base_dir.clone().or_else(home_dir) {
        Some(dir) => dir,
        None => {
            eprintln!(
                "{} Could not determine a home directory; pass --base-dir.",
                "[-]".red().bold()
            );
            std::process::exit(2);
        }
    };

    let config = RunConfig {
        base_dir,
        zip: cli.zip,
        password_protect: cli.password_protect,
        passphrase: cli.passphrase,
        bundle_name: cli.bundle_name,
        assume_yes: cli.yes,
        verbose: cli.verbose,
    };

    match cli::run(&config) {
        Ok(report) if report.has_failures() => std::process::exit(1),
        Ok(_) => {}
        Err(e) => {
            eprintln!("{} {e}", "[-]".red().bold());
            std::process::exit(2);
        }
    }
}

/// HOME on unix, USERPROFILE on windows.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
